use std::path::PathBuf;

use crate::model::project::Project;
use crate::model::task::Task;

/// Error type for persistence operations
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("backend returned {status}: {message}")]
    Http { status: u16, message: String },
    #[error("could not reach backend: {0}")]
    Transport(String),
    #[error("malformed backend response: {0}")]
    Decode(String),
}

/// A persistence backend for the two board collections.
///
/// Loads and saves are whole-collection; how a variant maps that onto
/// its storage (JSON slots, REST records) is its own business. `Send`
/// so a gateway can move onto the autosave worker thread.
pub trait Gateway: Send {
    fn load_projects(&self) -> Result<Vec<Project>, GatewayError>;
    fn save_projects(&self, projects: &[Project]) -> Result<(), GatewayError>;
    fn load_tasks(&self) -> Result<Vec<Task>, GatewayError>;
    fn save_tasks(&self, tasks: &[Task]) -> Result<(), GatewayError>;
}
