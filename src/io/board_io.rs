use std::fs;
use std::path::{Path, PathBuf};

use super::gateway::Gateway;
use super::local::LocalGateway;
use super::remote::RemoteGateway;
use crate::model::config::{Backend, BoardConfig};

/// Error type for board discovery and setup
#[derive(Debug, thiserror::Error)]
pub enum BoardIoError {
    #[error("not a tack board: no board/ directory with config.toml found (run `tack init`)")]
    NotABoard,
    #[error("board already initialized at {0} (use --force to overwrite the config)")]
    AlreadyInitialized(PathBuf),
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

const CONFIG_TEMPLATE: &str = r#"[board]
name = "{name}"

[storage]
# "local" keeps projects.json / tasks.json next to this file.
# "remote" syncs against a kanban REST backend instead.
backend = "local"

# Base URL for the remote backend (backend = "remote" only).
# api_url = "http://localhost:5000/api"
"#;

/// Discover the board by walking up from the given directory, looking
/// for a `board/` subdirectory with a config.toml. Returns the board
/// directory itself.
pub fn discover_board(start: &Path) -> Result<PathBuf, BoardIoError> {
    let mut current = start.to_path_buf();
    loop {
        let board_dir = current.join("board");
        if board_dir.is_dir() && board_dir.join("config.toml").exists() {
            return Ok(board_dir);
        }
        if !current.pop() {
            return Err(BoardIoError::NotABoard);
        }
    }
}

/// Read and parse the board's config.toml.
pub fn load_config(board_dir: &Path) -> Result<BoardConfig, BoardIoError> {
    let path = board_dir.join("config.toml");
    let content = fs::read_to_string(&path).map_err(|source| BoardIoError::ReadError {
        path: path.clone(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

/// Scaffold a `board/` directory under `root` with a config template.
/// The collections themselves are not written here — the local gateway
/// serves seed data until the first save.
pub fn init_board(root: &Path, name: &str, force: bool) -> Result<PathBuf, BoardIoError> {
    let board_dir = root.join("board");
    if board_dir.join("config.toml").exists() && !force {
        return Err(BoardIoError::AlreadyInitialized(board_dir));
    }
    fs::create_dir_all(&board_dir)?;
    let config = CONFIG_TEMPLATE.replace("{name}", name);
    fs::write(board_dir.join("config.toml"), config)?;
    Ok(board_dir)
}

/// Build the gateway the config asks for.
pub fn open_gateway(config: &BoardConfig, board_dir: &Path) -> Box<dyn Gateway> {
    match config.storage.backend {
        Backend::Local => Box::new(LocalGateway::new(board_dir)),
        Backend::Remote => Box::new(RemoteGateway::new(&config.storage.api_url)),
    }
}
