use chrono::{Duration, Local, Utc};

use crate::model::project::{Project, ThemeColor};
use crate::model::task::{ChecklistItem, Status, Task};

/// Fixed starter data: two sample projects and four sample tasks, so a
/// fresh board always has something to render.
pub fn seed_projects() -> Vec<Project> {
    vec![
        Project {
            id: "p1".into(),
            name: "Design Weekly".into(),
            description: "A board to keep track of design progress.".into(),
            theme_color: ThemeColor::Pink,
        },
        Project {
            id: "p2".into(),
            name: "Personal".into(),
            description: "Household chores and personal goals.".into(),
            theme_color: ThemeColor::Blue,
        },
    ]
}

pub fn seed_tasks() -> Vec<Task> {
    let today = Local::now().date_naive();
    let now = Utc::now().timestamp_millis();
    vec![
        Task {
            id: "t1".into(),
            project_id: "p1".into(),
            title: "Review scope".into(),
            description: "Review #390.".into(),
            status: Status::Todo,
            tags: vec!["Design".into()],
            due_date: Some(today),
            checklist: vec![],
            created_at: now,
        },
        Task {
            id: "t2".into(),
            project_id: "p1".into(),
            title: "Usability test".into(),
            description: "Research questions with Carina.".into(),
            status: Status::InProgress,
            tags: vec!["Research".into()],
            due_date: None,
            checklist: vec![],
            created_at: now,
        },
        Task {
            id: "t3".into(),
            project_id: "p1".into(),
            title: "Culture workshop".into(),
            description: "Let’s build a great team.".into(),
            status: Status::Testing,
            tags: vec![],
            due_date: Some(today + Duration::days(2)),
            checklist: vec![
                ChecklistItem {
                    id: "c1".into(),
                    text: "Schedule time".into(),
                    completed: true,
                },
                ChecklistItem {
                    id: "c2".into(),
                    text: "Set up a Figma board".into(),
                    completed: false,
                },
                ChecklistItem {
                    id: "c3".into(),
                    text: "Review exercises with the team".into(),
                    completed: false,
                },
            ],
            created_at: now,
        },
        Task {
            id: "t4".into(),
            project_id: "p2".into(),
            title: "Take Coco to a vet".into(),
            description: "Regular checkup.".into(),
            status: Status::Todo,
            tags: vec!["Pet".into()],
            due_date: Some(today + Duration::days(5)),
            checklist: vec![],
            created_at: now,
        },
    ]
}
