#![forbid(unsafe_code)]

//! Catalog of validated template groups
//!
//! A catalog is loaded from a directory of template group documents. Every
//! group is validated once, in parallel, before it becomes visible. Readers
//! get an immutable `Arc<CatalogSnapshot>`; a reload builds a whole new
//! snapshot and swaps it in atomically, so a validation or render in progress
//! never sees a half-updated catalog.

use crate::document;
use crate::error::{CatalogError, DocumentError};
use crate::model::{RuleTemplate, TemplateGroup};
use crate::script::ScriptEvaluator;
use crate::validation::validate_template_group;
use arc_swap::ArcSwap;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// An immutable set of validated template groups keyed by UUID
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    groups: BTreeMap<String, TemplateGroup>,
}

impl CatalogSnapshot {
    /// Validate `groups` and build a snapshot from them
    ///
    /// # Errors
    ///
    /// Fails on the first invalid group or on two groups sharing a UUID.
    pub fn from_groups(
        groups: Vec<TemplateGroup>,
        evaluator: &dyn ScriptEvaluator,
    ) -> Result<Self, CatalogError> {
        let sourced = groups
            .into_iter()
            .map(|group| (PathBuf::from("<memory>"), group))
            .collect();
        Self::from_sourced(sourced, evaluator)
    }

    fn from_sourced(
        groups: Vec<(PathBuf, TemplateGroup)>,
        evaluator: &dyn ScriptEvaluator,
    ) -> Result<Self, CatalogError> {
        groups
            .par_iter()
            .try_for_each(|(path, group)| {
                validate_template_group(group, evaluator).map_err(|e| CatalogError::Validation {
                    path: path.clone(),
                    source: e,
                })
            })?;

        let mut snapshot = CatalogSnapshot::default();
        for (_, group) in groups {
            // Validation guarantees the UUID is present
            let uuid = group.uuid.clone().unwrap_or_default();
            if snapshot.groups.contains_key(&uuid) {
                return Err(CatalogError::DuplicateTemplateGroup(uuid));
            }
            snapshot.groups.insert(uuid, group);
        }
        Ok(snapshot)
    }

    /// Load and validate every `*.{extension}` document in `dir`
    ///
    /// Subdirectories and files with other extensions are skipped.
    pub fn load_directory(
        dir: &Path,
        extension: &str,
        evaluator: &dyn ScriptEvaluator,
    ) -> Result<Self, CatalogError> {
        if !dir.is_dir() {
            return Err(CatalogError::InvalidDirectory {
                path: dir.to_path_buf(),
            });
        }

        let entries = fs::read_dir(dir).map_err(|e| CatalogError::Document {
            path: dir.to_path_buf(),
            source: DocumentError::Io {
                path: dir.to_path_buf(),
                source: e,
            },
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| CatalogError::Document {
                path: dir.to_path_buf(),
                source: DocumentError::Io {
                    path: dir.to_path_buf(),
                    source: e,
                },
            })?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|s| s.to_str()) != Some(extension) {
                debug!(path = %path.display(), "skipping file with other extension");
                continue;
            }
            paths.push(path);
        }
        paths.sort();

        if paths.is_empty() {
            warn!(dir = %dir.display(), "no template group documents found");
        }

        let groups = paths
            .par_iter()
            .map(|path| {
                document::load_template_group(path)
                    .map(|group| (path.clone(), group))
                    .map_err(|e| CatalogError::Document {
                        path: path.clone(),
                        source: e,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let snapshot = Self::from_sourced(groups, evaluator)?;
        info!(
            dir = %dir.display(),
            template_groups = snapshot.len(),
            "catalog loaded"
        );
        Ok(snapshot)
    }

    pub fn template_group(&self, uuid: &str) -> Option<&TemplateGroup> {
        self.groups.get(uuid)
    }

    /// Look up a rule template by template group and rule template UUIDs
    pub fn rule_template(
        &self,
        group_uuid: &str,
        rule_template_uuid: &str,
    ) -> Result<&RuleTemplate, CatalogError> {
        let group = self
            .template_group(group_uuid)
            .ok_or_else(|| CatalogError::TemplateGroupNotFound(group_uuid.to_string()))?;
        group
            .rule_template(rule_template_uuid)
            .ok_or_else(|| CatalogError::RuleTemplateNotFound {
                group: group_uuid.to_string(),
                rule_template: rule_template_uuid.to_string(),
            })
    }

    /// Template groups in UUID order
    pub fn template_groups(&self) -> impl Iterator<Item = &TemplateGroup> {
        self.groups.values()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Shared handle to the current catalog snapshot
pub struct TemplateCatalog {
    current: ArcSwap<CatalogSnapshot>,
}

impl TemplateCatalog {
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        Self {
            current: ArcSwap::from_pointee(snapshot),
        }
    }

    /// The current snapshot; stays valid after later reloads
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        self.current.load_full()
    }

    /// Swap in a new snapshot
    pub fn replace(&self, snapshot: CatalogSnapshot) {
        self.current.store(Arc::new(snapshot));
    }

    /// Reload from a directory
    ///
    /// The current snapshot is kept if loading or validation fails.
    pub fn reload(
        &self,
        dir: &Path,
        extension: &str,
        evaluator: &dyn ScriptEvaluator,
    ) -> Result<usize, CatalogError> {
        let snapshot = CatalogSnapshot::load_directory(dir, extension, evaluator)?;
        let count = snapshot.len();
        self.replace(snapshot);
        Ok(count)
    }
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::new(CatalogSnapshot::default())
    }
}
