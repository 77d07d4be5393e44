use crate::model::task::{Status, Task};

/// One column of the derived board view.
#[derive(Debug)]
pub struct BoardColumn<'a> {
    pub status: Status,
    pub tasks: Vec<&'a Task>,
}

/// The four-column view of a project's tasks. Derived state — never
/// persisted, always recomputable from the store.
#[derive(Debug)]
pub struct BoardView<'a> {
    pub columns: [BoardColumn<'a>; 4],
}

impl<'a> BoardView<'a> {
    pub fn column(&self, status: Status) -> &BoardColumn<'a> {
        // Status::ALL order matches the columns array.
        &self.columns[Status::ALL.iter().position(|s| *s == status).unwrap_or(0)]
    }

    /// Total visible tasks across all columns.
    pub fn len(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Whether a task matches a search query: case-insensitive containment
/// on the title or any tag. An empty query matches everything.
pub fn task_matches(task: &Task, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    task.title.to_lowercase().contains(&needle)
        || task.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
}

/// Derive the four-column board for one project, filtered by `query`.
///
/// A task is visible iff it belongs to `active_project_id` and matches
/// the query. Visible tasks are partitioned by status; each column
/// preserves the tasks' relative order from the source collection.
pub fn filter_and_group<'a>(
    tasks: &'a [Task],
    active_project_id: &str,
    query: &str,
) -> BoardView<'a> {
    let mut columns = Status::ALL.map(|status| BoardColumn {
        status,
        tasks: Vec::new(),
    });

    for task in tasks {
        if task.project_id != active_project_id || !task_matches(task, query) {
            continue;
        }
        if let Some(col) = columns.iter_mut().find(|c| c.status == task.status) {
            col.tasks.push(task);
        }
    }

    BoardView { columns }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn task(id: &str, project: &str, title: &str, status: Status, tags: &[&str]) -> Task {
        Task {
            id: id.into(),
            project_id: project.into(),
            title: title.into(),
            description: String::new(),
            status,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            due_date: None,
            checklist: vec![],
            created_at: 0,
        }
    }

    fn sample_tasks() -> Vec<Task> {
        vec![
            task("t1", "p1", "Review scope", Status::Todo, &["Design"]),
            task("t2", "p1", "Usability test", Status::InProgress, &["Research"]),
            task("t3", "p1", "Culture workshop", Status::Testing, &[]),
            task("t4", "p2", "Take Coco to a vet", Status::Todo, &["Pet"]),
            task("t5", "p1", "Ship the release", Status::Todo, &[]),
        ]
    }

    fn ids<'a>(col: &'a BoardColumn<'a>) -> Vec<&'a str> {
        col.tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn empty_query_partitions_exactly_the_project_tasks() {
        let tasks = sample_tasks();
        let view = filter_and_group(&tasks, "p1", "");
        assert_eq!(view.len(), 4);
        assert_eq!(ids(view.column(Status::Todo)), vec!["t1", "t5"]);
        assert_eq!(ids(view.column(Status::InProgress)), vec!["t2"]);
        assert_eq!(ids(view.column(Status::Testing)), vec!["t3"]);
        assert!(view.column(Status::Complete).tasks.is_empty());
    }

    #[test]
    fn partitions_are_disjoint_and_exhaustive() {
        let tasks = sample_tasks();
        let view = filter_and_group(&tasks, "p1", "");
        let mut seen: Vec<&str> = Vec::new();
        for col in &view.columns {
            for t in &col.tasks {
                assert_eq!(t.status, col.status);
                assert!(!seen.contains(&t.id.as_str()));
                seen.push(&t.id);
            }
        }
        let expected: Vec<&str> = tasks
            .iter()
            .filter(|t| t.project_id == "p1")
            .map(|t| t.id.as_str())
            .collect();
        seen.sort_unstable();
        let mut expected = expected;
        expected.sort_unstable();
        assert_eq!(seen, expected);
    }

    #[test]
    fn other_projects_are_never_visible() {
        let tasks = sample_tasks();
        let view = filter_and_group(&tasks, "p2", "");
        assert_eq!(view.len(), 1);
        assert_eq!(ids(view.column(Status::Todo)), vec!["t4"]);
    }

    #[test]
    fn unknown_project_yields_an_empty_board() {
        let tasks = sample_tasks();
        assert!(filter_and_group(&tasks, "p9", "").is_empty());
        assert!(filter_and_group(&tasks, "", "").is_empty());
    }

    #[test]
    fn title_search_is_case_insensitive() {
        let tasks = sample_tasks();
        for query in ["scope", "SCOPE", "Scope"] {
            let view = filter_and_group(&tasks, "p1", query);
            assert_eq!(ids(view.column(Status::Todo)), vec!["t1"], "query {query}");
        }
    }

    #[test]
    fn tag_search_is_case_insensitive() {
        let tasks = sample_tasks();
        let view = filter_and_group(&tasks, "p1", "research");
        assert_eq!(view.len(), 1);
        assert_eq!(ids(view.column(Status::InProgress)), vec!["t2"]);
    }

    #[test]
    fn search_never_leaks_across_projects() {
        let tasks = sample_tasks();
        // "Pet" only matches t4, which belongs to p2.
        assert!(filter_and_group(&tasks, "p1", "pet").is_empty());
    }

    #[test]
    fn column_order_follows_source_order() {
        let mut tasks = sample_tasks();
        // Prepend a newer todo task, as the store does.
        tasks.insert(0, task("t6", "p1", "Kickoff", Status::Todo, &[]));
        let view = filter_and_group(&tasks, "p1", "");
        assert_eq!(ids(view.column(Status::Todo)), vec!["t6", "t1", "t5"]);
    }

    #[test]
    fn grouping_is_pure_and_repeatable() {
        let tasks = sample_tasks();
        let a = filter_and_group(&tasks, "p1", "e");
        let b = filter_and_group(&tasks, "p1", "e");
        for (ca, cb) in a.columns.iter().zip(b.columns.iter()) {
            assert_eq!(ids(ca), ids(cb));
        }
    }
}
