use serde::{Deserialize, Serialize};

/// Configuration from board/config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    pub board: BoardInfo,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardInfo {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Which gateway to use: local JSON files or a REST backend.
    #[serde(default)]
    pub backend: Backend,
    /// Base URL for the remote backend (only used when backend = "remote").
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            backend: Backend::Local,
            api_url: default_api_url(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Local,
    Remote,
}

/// Default: see src/io/board_io.rs config template
fn default_api_url() -> String {
    "http://localhost:5000/api".to_string()
}
