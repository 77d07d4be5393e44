use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Persisted UI state (written to .state.json): which project is
/// selected and the last search. Never authoritative — the store
/// repairs a stale selection on load.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiState {
    #[serde(default)]
    pub active_project: String,
    #[serde(default)]
    pub last_search: Option<String>,
}

/// Read .state.json from the board directory
pub fn read_ui_state(board_dir: &Path) -> Option<UiState> {
    let path = board_dir.join(".state.json");
    let content = fs::read_to_string(&path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write .state.json to the board directory
pub fn write_ui_state(board_dir: &Path, state: &UiState) -> Result<(), std::io::Error> {
    let path = board_dir.join(".state.json");
    let content = serde_json::to_string_pretty(state)?;
    fs::write(&path, content)
}
