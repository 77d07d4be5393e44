use serde::Serialize;

use crate::model::project::Project;
use crate::model::task::{Status, Task};
use crate::ops::board::BoardView;

#[derive(Serialize)]
struct ProjectListJson<'a> {
    active: &'a str,
    projects: &'a [Project],
}

#[derive(Serialize)]
struct ColumnJson<'a> {
    status: Status,
    label: &'static str,
    count: usize,
    tasks: Vec<&'a Task>,
}

#[derive(Serialize)]
struct BoardJson<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    project: Option<&'a Project>,
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<&'a str>,
    columns: Vec<ColumnJson<'a>>,
}

#[derive(Serialize)]
struct TaskListJson<'a> {
    count: usize,
    tasks: &'a [&'a Task],
}

pub fn print_projects(projects: &[Project], active_id: &str, json: bool) -> serde_json::Result<()> {
    if json {
        let out = ProjectListJson {
            active: active_id,
            projects,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }
    if projects.is_empty() {
        println!("no projects yet (try `tack project new <name>`)");
        return Ok(());
    }
    for project in projects {
        let marker = if project.id == active_id { "*" } else { " " };
        let mut line = format!(
            "{} {}  {} ({})",
            marker,
            project.id,
            project.name,
            project.theme_color.name()
        );
        if !project.description.is_empty() {
            line.push_str(&format!(" - {}", project.description));
        }
        println!("{}", line);
    }
    Ok(())
}

pub fn print_board(
    project: Option<&Project>,
    view: &BoardView,
    query: Option<&str>,
    json: bool,
) -> serde_json::Result<()> {
    if json {
        let out = BoardJson {
            project,
            query,
            columns: view
                .columns
                .iter()
                .map(|col| ColumnJson {
                    status: col.status,
                    label: col.status.label(),
                    count: col.tasks.len(),
                    tasks: col.tasks.clone(),
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    match project {
        Some(p) => {
            print!("{}  {}", p.id, p.name);
            if let Some(q) = query {
                print!("  [search: {}]", q);
            }
            println!();
        }
        None => {
            println!("no project selected (try `tack project new <name>`)");
            return Ok(());
        }
    }

    for col in &view.columns {
        println!();
        println!("{} ({})", col.status.label(), col.tasks.len());
        for task in &col.tasks {
            println!("  {}", task_line(task));
        }
    }
    Ok(())
}

pub fn print_task(task: &Task, json: bool) -> serde_json::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(task)?);
        return Ok(());
    }
    println!("{}  {}", task.id, task.title);
    println!("  project: {}", task.project_id);
    println!("  status:  {}", task.status.label());
    if !task.description.is_empty() {
        println!("  description: {}", task.description);
    }
    if !task.tags.is_empty() {
        println!("  tags: {}", task.tags.join(", "));
    }
    if let Some(due) = task.due_date {
        println!("  due: {}", due);
    }
    if !task.checklist.is_empty() {
        println!("  checklist:");
        for item in &task.checklist {
            let mark = if item.completed { "x" } else { " " };
            println!("    [{}] {}  ({})", mark, item.text, item.id);
        }
    }
    Ok(())
}

pub fn print_task_list(tasks: &[&Task], json: bool) -> serde_json::Result<()> {
    if json {
        let out = TaskListJson {
            count: tasks.len(),
            tasks,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }
    if tasks.is_empty() {
        println!("no matching tasks");
        return Ok(());
    }
    for task in tasks {
        println!("{}  ({})", task_line(task), task.status.token());
    }
    Ok(())
}

fn task_line(task: &Task) -> String {
    let mut line = format!("{}  {}", task.id, task.title);
    if !task.tags.is_empty() {
        line.push_str(&format!(" [{}]", task.tags.join(", ")));
    }
    if let Some(due) = task.due_date {
        line.push_str(&format!(" due {}", due));
    }
    if !task.checklist.is_empty() {
        let done = task.checklist.iter().filter(|c| c.completed).count();
        line.push_str(&format!(" ({}/{})", done, task.checklist.len()));
    }
    line
}
