use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::gateway::{Gateway, GatewayError};
use crate::model::project::{Project, ThemeColor};
use crate::model::task::{ChecklistItem, Status, Task, TaskPatch};

/// REST persistence against a kanban backend:
/// `GET/POST {api}/projects`, `GET/POST/PUT/DELETE {api}/tasks`.
///
/// Record-level calls mirror the backend surface one to one; the
/// collection-level `Gateway` saves are a diff sync on top of them.
/// Any non-2xx response surfaces as `GatewayError::Http` — never as a
/// silently empty collection.
pub struct RemoteGateway {
    agent: ureq::Agent,
    base_url: String,
}

/// POST /projects body: a project minus its server-assigned `id`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectBody<'a> {
    name: &'a str,
    description: &'a str,
    theme_color: ThemeColor,
}

/// POST /tasks body: a task minus `id` and `createdAt`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TaskBody<'a> {
    project_id: &'a str,
    title: &'a str,
    description: &'a str,
    status: Status,
    tags: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    due_date: Option<NaiveDate>,
    checklist: &'a [ChecklistItem],
}

impl RemoteGateway {
    pub fn new(api_url: &str) -> RemoteGateway {
        RemoteGateway {
            agent: ureq::agent(),
            base_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// All projects, ordered by creation ascending (backend ordering).
    pub fn fetch_projects(&self) -> Result<Vec<Project>, GatewayError> {
        let resp = self
            .agent
            .get(&self.url("/projects"))
            .call()
            .map_err(request_error)?;
        decode(resp)
    }

    /// Create a project; the backend assigns the ID.
    pub fn create_project(&self, project: &Project) -> Result<Project, GatewayError> {
        let body = ProjectBody {
            name: &project.name,
            description: &project.description,
            theme_color: project.theme_color,
        };
        let resp = self
            .agent
            .post(&self.url("/projects"))
            .send_json(body)
            .map_err(request_error)?;
        decode(resp)
    }

    /// All tasks, newest first (backend ordering).
    pub fn fetch_tasks(&self) -> Result<Vec<Task>, GatewayError> {
        let resp = self
            .agent
            .get(&self.url("/tasks"))
            .call()
            .map_err(request_error)?;
        decode(resp)
    }

    /// Create a task; the backend assigns `id` and `createdAt`.
    pub fn create_task(&self, task: &Task) -> Result<Task, GatewayError> {
        let body = TaskBody {
            project_id: &task.project_id,
            title: &task.title,
            description: &task.description,
            status: task.status,
            tags: &task.tags,
            due_date: task.due_date,
            checklist: &task.checklist,
        };
        let resp = self
            .agent
            .post(&self.url("/tasks"))
            .send_json(body)
            .map_err(request_error)?;
        decode(resp)
    }

    /// Merge a partial update into one task; returns the merged task.
    pub fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<Task, GatewayError> {
        let resp = self
            .agent
            .put(&self.url(&format!("/tasks/{}", id)))
            .send_json(patch)
            .map_err(request_error)?;
        decode(resp)
    }

    /// Delete one task. An absent ID is tolerated.
    pub fn delete_task(&self, id: &str) -> Result<(), GatewayError> {
        let result = self
            .agent
            .delete(&self.url(&format!("/tasks/{}", id)))
            .call();
        match result {
            Ok(_) => Ok(()),
            Err(ureq::Error::Status(404, _)) => Ok(()),
            Err(e) => Err(request_error(e)),
        }
    }
}

impl Gateway for RemoteGateway {
    fn load_projects(&self) -> Result<Vec<Project>, GatewayError> {
        self.fetch_projects()
    }

    /// The backend surface has no project PUT/DELETE, so the sync only
    /// creates projects the backend does not know yet.
    fn save_projects(&self, projects: &[Project]) -> Result<(), GatewayError> {
        let known: Vec<String> = self.fetch_projects()?.into_iter().map(|p| p.id).collect();
        for project in projects {
            if !known.contains(&project.id) {
                self.create_project(project)?;
            }
        }
        Ok(())
    }

    fn load_tasks(&self) -> Result<Vec<Task>, GatewayError> {
        self.fetch_tasks()
    }

    /// Diff sync: delete tasks the board dropped, create unknown ones,
    /// PUT the ones that changed. Last write wins at the record level.
    fn save_tasks(&self, tasks: &[Task]) -> Result<(), GatewayError> {
        let existing = self.fetch_tasks()?;
        let desired: HashMap<&str, &Task> = tasks.iter().map(|t| (t.id.as_str(), t)).collect();

        for stale in existing.iter().filter(|t| !desired.contains_key(t.id.as_str())) {
            self.delete_task(&stale.id)?;
        }

        let known: HashMap<&str, &Task> = existing.iter().map(|t| (t.id.as_str(), t)).collect();
        for task in tasks {
            match known.get(task.id.as_str()) {
                None => {
                    self.create_task(task)?;
                }
                Some(prev) if **prev != *task => {
                    self.update_task(&task.id, &TaskPatch::replace(task))?;
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

fn request_error(err: ureq::Error) -> GatewayError {
    match err {
        ureq::Error::Status(status, resp) => GatewayError::Http {
            status,
            message: resp.into_string().unwrap_or_default(),
        },
        ureq::Error::Transport(t) => GatewayError::Transport(t.to_string()),
    }
}

fn decode<T: serde::de::DeserializeOwned>(resp: ureq::Response) -> Result<T, GatewayError> {
    resp.into_json()
        .map_err(|e| GatewayError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let gw = RemoteGateway::new("http://localhost:5000/api/");
        assert_eq!(gw.url("/tasks"), "http://localhost:5000/api/tasks");
        assert_eq!(gw.url("/tasks/t1"), "http://localhost:5000/api/tasks/t1");
    }

    #[test]
    fn task_body_omits_identity_fields() {
        let task = Task::new(
            "p1".into(),
            "Card".into(),
            String::new(),
            Status::Todo,
            None,
            vec![],
            vec![],
        );
        let body = TaskBody {
            project_id: &task.project_id,
            title: &task.title,
            description: &task.description,
            status: task.status,
            tags: &task.tags,
            due_date: task.due_date,
            checklist: &task.checklist,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("id").is_none());
        assert!(json.get("createdAt").is_none());
        assert!(json.get("dueDate").is_none());
        assert_eq!(json["projectId"], "p1");
        assert_eq!(json["status"], "todo");
    }

    #[test]
    fn project_body_carries_the_theme_color_token() {
        let project = Project {
            id: "p1".into(),
            name: "Board".into(),
            description: String::new(),
            theme_color: ThemeColor::Green,
        };
        let body = ProjectBody {
            name: &project.name,
            description: &project.description,
            theme_color: project.theme_color,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["themeColor"], "green");
    }
}
