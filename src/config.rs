//! Configuration file parsing and validation

pub mod engine_toml;

pub use engine_toml::{
    CONFIG_FILE_NAME, CatalogConfig, ColorOption, Config, OutputConfig, OutputFormat, ScriptConfig,
};
