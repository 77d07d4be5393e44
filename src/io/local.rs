use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;

use super::gateway::{Gateway, GatewayError};
use super::seed;
use crate::model::project::Project;
use crate::model::task::Task;

pub const PROJECTS_FILE: &str = "projects.json";
pub const TASKS_FILE: &str = "tasks.json";

/// Local durable storage: one JSON file per collection inside the
/// board directory. A missing or corrupt file yields the fixed seed
/// data instead of an error, so the board always renders on first run.
#[derive(Debug, Clone)]
pub struct LocalGateway {
    dir: PathBuf,
}

impl LocalGateway {
    pub fn new(board_dir: &Path) -> LocalGateway {
        LocalGateway {
            dir: board_dir.to_path_buf(),
        }
    }

    fn load_slot<T: DeserializeOwned>(&self, file: &str) -> Option<T> {
        let content = fs::read_to_string(self.dir.join(file)).ok()?;
        serde_json::from_str(&content).ok()
    }

    fn save_slot<T: Serialize>(&self, file: &str, value: &T) -> Result<(), GatewayError> {
        let path = self.dir.join(file);
        let content = serde_json::to_string_pretty(value).map_err(io::Error::from);
        content
            .and_then(|c| atomic_write(&path, c.as_bytes()))
            .map_err(|source| GatewayError::Write { path, source })
    }
}

impl Gateway for LocalGateway {
    fn load_projects(&self) -> Result<Vec<Project>, GatewayError> {
        Ok(self
            .load_slot(PROJECTS_FILE)
            .unwrap_or_else(seed::seed_projects))
    }

    fn save_projects(&self, projects: &[Project]) -> Result<(), GatewayError> {
        self.save_slot(PROJECTS_FILE, &projects)
    }

    fn load_tasks(&self) -> Result<Vec<Task>, GatewayError> {
        Ok(self.load_slot(TASKS_FILE).unwrap_or_else(seed::seed_tasks))
    }

    fn save_tasks(&self, tasks: &[Task]) -> Result<(), GatewayError> {
        self.save_slot(TASKS_FILE, &tasks)
    }
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
