pub mod app_config;
pub mod config;
pub mod export;
pub mod query;
pub mod selection;
pub mod stores;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use export::{export_json, write_export, ExportError, EXPORT_FILE_NAME};
pub use query::{QueryField, QueryInput};
pub use selection::SelectionState;
pub use stores::{QueryResult, Store};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
