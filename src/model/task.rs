use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::id::fresh_id;

/// Workflow column a task lives in.
///
/// The order of `ALL` is display order (left to right), not a strict
/// progression — a task may move from any status to any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    Todo,
    InProgress,
    Testing,
    Complete,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Todo,
        Status::InProgress,
        Status::Testing,
        Status::Complete,
    ];

    pub fn parse(s: &str) -> Option<Status> {
        match s {
            "todo" => Some(Status::Todo),
            "in-progress" => Some(Status::InProgress),
            "testing" => Some(Status::Testing),
            "complete" => Some(Status::Complete),
            _ => None,
        }
    }

    /// Column header label.
    pub fn label(self) -> &'static str {
        match self {
            Status::Todo => "To Do",
            Status::InProgress => "In Progress",
            Status::Testing => "Testing",
            Status::Complete => "Complete",
        }
    }

    /// The wire/storage token, same as the serde form.
    pub fn token(self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "in-progress",
            Status::Testing => "testing",
            Status::Complete => "complete",
        }
    }
}

/// One checkbox inside a task. Item IDs are unique within the checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl ChecklistItem {
    pub fn new(text: String) -> ChecklistItem {
        ChecklistItem {
            id: fresh_id('c'),
            text,
            completed: false,
        }
    }
}

/// A card on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub project_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
    /// Creation time in epoch milliseconds. Used only for default
    /// ordering (newest first).
    pub created_at: i64,
}

impl Task {
    /// Create a task with a fresh ID, stamped with the current time.
    /// Callers are expected to reject blank titles before construction.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        project_id: String,
        title: String,
        description: String,
        status: Status,
        due_date: Option<NaiveDate>,
        tags: Vec<String>,
        checklist: Vec<ChecklistItem>,
    ) -> Task {
        Task {
            id: fresh_id('t'),
            project_id,
            title,
            description,
            status,
            tags,
            due_date,
            checklist,
            created_at: Utc::now().timestamp_millis(),
        }
    }
}

/// Partial update for a task: every field optional, applied as an
/// ownership-preserving merge. Doubles as the PUT body for the remote
/// backend, which merges fields the same way.
///
/// An absent field means "leave as is". The due date is doubly
/// optional so that clearing it is representable on the wire:
/// `Some(None)` serializes as an explicit `"dueDate": null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<NaiveDate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checklist: Option<Vec<ChecklistItem>>,
}

impl TaskPatch {
    /// A patch that carries every field of `task`, i.e. a full replace.
    pub fn replace(task: &Task) -> TaskPatch {
        TaskPatch {
            project_id: Some(task.project_id.clone()),
            title: Some(task.title.clone()),
            description: Some(task.description.clone()),
            status: Some(task.status),
            tags: Some(task.tags.clone()),
            due_date: Some(task.due_date),
            checklist: Some(task.checklist.clone()),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == TaskPatch::default()
    }

    /// Merge the set fields into `task`, leaving the rest untouched.
    pub fn apply(&self, task: &mut Task) {
        if let Some(v) = &self.project_id {
            task.project_id = v.clone();
        }
        if let Some(v) = &self.title {
            task.title = v.clone();
        }
        if let Some(v) = &self.description {
            task.description = v.clone();
        }
        if let Some(v) = self.status {
            task.status = v;
        }
        if let Some(v) = &self.tags {
            task.tags = v.clone();
        }
        if let Some(v) = self.due_date {
            task.due_date = v;
        }
        if let Some(v) = &self.checklist {
            task.checklist = v.clone();
        }
    }
}

/// Split a comma-separated tag entry ("Design, Research") into tags,
/// trimming whitespace and dropping blanks. Tags keep their case;
/// search matching is case-insensitive instead.
pub fn parse_tag_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}
