//! Record of an artifact deployed by the deployment collaborator
//!
//! The engine only produces rendered content; this record is built and owned
//! by whatever deploys that content, and is never changed after construction.

use serde::{Deserialize, Serialize};

/// An execution node an artifact was deployed to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceNode {
    pub id: String,
    pub host: String,
    pub port: u16,
}

impl ResourceNode {
    pub fn new(id: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            id: id.into(),
            host: host.into(),
            port,
        }
    }
}

/// A rendered artifact and the node it runs on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployedArtifact {
    parent_app_name: String,
    group_name: String,
    app_name: String,
    content: String,
    deployed_node: ResourceNode,
}

impl DeployedArtifact {
    pub fn new(
        parent_app_name: impl Into<String>,
        group_name: impl Into<String>,
        app_name: impl Into<String>,
        content: impl Into<String>,
        deployed_node: ResourceNode,
    ) -> Self {
        Self {
            parent_app_name: parent_app_name.into(),
            group_name: group_name.into(),
            app_name: app_name.into(),
            content: content.into(),
            deployed_node,
        }
    }

    pub fn parent_app_name(&self) -> &str {
        &self.parent_app_name
    }

    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn deployed_node(&self) -> &ResourceNode {
        &self.deployed_node
    }
}
