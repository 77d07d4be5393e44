use chrono::NaiveDate;

use crate::model::project::{Project, ThemeColor};
use crate::model::task::{ChecklistItem, Status, Task, TaskPatch};

/// Which collections a batch of mutations touched. Drained by the
/// caller to decide what to persist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirtyFlags {
    pub projects: bool,
    pub tasks: bool,
}

/// The authoritative in-memory board: project and task collections plus
/// the active-project selection.
///
/// Mutations never fail loudly — a blank name/title or an unknown ID is
/// a no-op. Persistence failures belong to the gateway layer, not here.
#[derive(Debug, Default)]
pub struct BoardStore {
    projects: Vec<Project>,
    tasks: Vec<Task>,
    active_project_id: String,
    dirty: DirtyFlags,
}

impl BoardStore {
    /// Build a store from loaded collections, repairing the active
    /// selection if the remembered ID no longer matches a project.
    pub fn from_collections(
        projects: Vec<Project>,
        tasks: Vec<Task>,
        active_project_id: String,
    ) -> BoardStore {
        let mut store = BoardStore {
            projects,
            tasks,
            active_project_id,
            dirty: DirtyFlags::default(),
        };
        store.repair_selection();
        store
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn active_project_id(&self) -> &str {
        &self.active_project_id
    }

    pub fn active_project(&self) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == self.active_project_id)
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Take and reset the dirty flags accumulated since the last call.
    pub fn take_dirty(&mut self) -> DirtyFlags {
        std::mem::take(&mut self.dirty)
    }

    // -----------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------

    /// Select a project. Unknown IDs are ignored.
    pub fn set_active_project(&mut self, id: &str) {
        if self.projects.iter().any(|p| p.id == id) {
            self.active_project_id = id.to_string();
        }
    }

    /// If the active ID is blank or points at no live project, fall back
    /// to the first project in collection order. Runs after every
    /// project-collection mutation, not only at startup.
    fn repair_selection(&mut self) {
        let valid = !self.active_project_id.is_empty()
            && self.projects.iter().any(|p| p.id == self.active_project_id);
        if !valid {
            self.active_project_id = self
                .projects
                .first()
                .map(|p| p.id.clone())
                .unwrap_or_default();
        }
    }

    // -----------------------------------------------------------------
    // Project mutations
    // -----------------------------------------------------------------

    /// Create a project and make it active. Returns the new ID, or
    /// `None` (no-op) when the name trims to empty.
    pub fn create_project(&mut self, name: &str, description: &str) -> Option<String> {
        if name.trim().is_empty() {
            return None;
        }
        let project = Project::new(name.to_string(), description.to_string());
        let id = project.id.clone();
        self.projects.push(project);
        self.active_project_id = id.clone();
        self.dirty.projects = true;
        Some(id)
    }

    /// Delete a project and every task referencing it, as one logical
    /// update. No-op if the ID is unknown. Confirmation is the caller's
    /// concern.
    pub fn delete_project(&mut self, id: &str) {
        if !self.projects.iter().any(|p| p.id == id) {
            return;
        }
        self.projects.retain(|p| p.id != id);
        self.tasks.retain(|t| t.project_id != id);
        self.dirty.projects = true;
        self.dirty.tasks = true;
        if self.active_project_id == id {
            self.active_project_id.clear();
        }
        self.repair_selection();
    }

    /// Change a project's accent color. No-op if the ID is unknown.
    pub fn set_project_color(&mut self, id: &str, color: ThemeColor) {
        if let Some(project) = self.projects.iter_mut().find(|p| p.id == id) {
            project.theme_color = color;
            self.dirty.projects = true;
        }
    }

    // -----------------------------------------------------------------
    // Task mutations
    // -----------------------------------------------------------------

    /// Create a task attached to the active project. Returns the new
    /// ID, or `None` (no-op) when the title trims to empty or nothing
    /// is selected.
    #[allow(clippy::too_many_arguments)]
    pub fn create_task(
        &mut self,
        title: &str,
        description: &str,
        status: Status,
        due_date: Option<NaiveDate>,
        tags: Vec<String>,
        checklist: Vec<ChecklistItem>,
    ) -> Option<String> {
        let project_id = self.active_project_id.clone();
        self.create_task_in(&project_id, title, description, status, due_date, tags, checklist)
    }

    /// Create a task in a specific project. No-op if the project does
    /// not exist or the title trims to empty. New tasks go to the front
    /// so newest-first ordering falls out of insertion order.
    #[allow(clippy::too_many_arguments)]
    pub fn create_task_in(
        &mut self,
        project_id: &str,
        title: &str,
        description: &str,
        status: Status,
        due_date: Option<NaiveDate>,
        tags: Vec<String>,
        checklist: Vec<ChecklistItem>,
    ) -> Option<String> {
        if title.trim().is_empty() {
            return None;
        }
        if !self.projects.iter().any(|p| p.id == project_id) {
            return None;
        }
        let task = Task::new(
            project_id.to_string(),
            title.to_string(),
            description.to_string(),
            status,
            due_date,
            tags,
            checklist,
        );
        let id = task.id.clone();
        self.tasks.insert(0, task);
        self.dirty.tasks = true;
        Some(id)
    }

    /// Remove a task. No-op if absent. Confirmation is the caller's
    /// concern.
    pub fn delete_task(&mut self, id: &str) {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() != before {
            self.dirty.tasks = true;
        }
    }

    /// Replace the task with a matching ID wholesale. No-op if absent.
    pub fn update_task(&mut self, task: Task) {
        if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == task.id) {
            *slot = task;
            self.dirty.tasks = true;
        }
    }

    /// Merge a partial update into the task with this ID. No-op if
    /// absent or the patch is empty.
    pub fn patch_task(&mut self, id: &str, patch: &TaskPatch) {
        if patch.is_empty() {
            return;
        }
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            patch.apply(task);
            self.dirty.tasks = true;
        }
    }

    /// Change only the status of the matching task. No-op if absent.
    pub fn move_task(&mut self, id: &str, status: Status) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.status = status;
            self.dirty.tasks = true;
        }
    }

    /// Flip one checklist item's `completed` flag, leaving every other
    /// item untouched. Returns whether anything changed.
    pub fn toggle_checklist(&mut self, task_id: &str, item_id: &str) -> bool {
        let Some(task) = self.tasks.iter().find(|t| t.id == task_id) else {
            return false;
        };
        let mut updated = task.clone();
        let Some(item) = updated.checklist.iter_mut().find(|c| c.id == item_id) else {
            return false;
        };
        item.completed = !item.completed;
        self.update_task(updated);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn seeded_store() -> BoardStore {
        let mut store = BoardStore::default();
        store.create_project("Design Weekly", "Track design progress.");
        store.create_project("Personal", "Chores and goals.");
        store
    }

    fn first_project_id(store: &BoardStore) -> String {
        store.projects()[0].id.clone()
    }

    // --- Projects ---

    #[test]
    fn create_project_appends_and_activates() {
        let mut store = seeded_store();
        let id = store.create_project("Q1 Planning", "").unwrap();
        assert_eq!(store.projects().len(), 3);
        assert_eq!(store.projects().last().unwrap().id, id);
        assert_eq!(store.active_project_id(), id);
    }

    #[test]
    fn blank_project_name_is_a_noop() {
        let mut store = seeded_store();
        let active_before = store.active_project_id().to_string();
        assert_eq!(store.create_project("   ", "desc"), None);
        assert_eq!(store.projects().len(), 2);
        assert_eq!(store.active_project_id(), active_before);
    }

    #[test]
    fn delete_project_cascades_to_its_tasks() {
        let mut store = seeded_store();
        let doomed = store.active_project_id().to_string();
        store.create_task("One", "", Status::Todo, None, vec![], vec![]);
        store.create_task("Two", "", Status::Testing, None, vec![], vec![]);
        let keep = first_project_id(&store);
        store.set_active_project(&keep);
        store.create_task("Survivor", "", Status::Todo, None, vec![], vec![]);

        store.delete_project(&doomed);

        assert_eq!(store.projects().len(), 1);
        assert!(store.tasks().iter().all(|t| t.project_id != doomed));
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.tasks()[0].title, "Survivor");
    }

    #[test]
    fn deleting_active_project_repairs_selection_to_first() {
        let mut store = seeded_store();
        // "Personal" was created last and is active.
        let active = store.active_project_id().to_string();
        let first = first_project_id(&store);
        assert_ne!(active, first);

        store.delete_project(&active);
        assert_eq!(store.active_project_id(), first);
    }

    #[test]
    fn deleting_last_project_leaves_no_selection() {
        let mut store = BoardStore::default();
        let id = store.create_project("Only", "").unwrap();
        store.delete_project(&id);
        assert_eq!(store.active_project_id(), "");
        assert!(store.active_project().is_none());
    }

    #[test]
    fn delete_unknown_project_is_a_noop() {
        let mut store = seeded_store();
        store.take_dirty();
        store.delete_project("p-nope");
        assert_eq!(store.projects().len(), 2);
        assert_eq!(store.take_dirty(), DirtyFlags::default());
    }

    #[test]
    fn set_project_color_touches_only_the_target() {
        let mut store = seeded_store();
        let first = first_project_id(&store);
        store.set_project_color(&first, ThemeColor::Green);
        assert_eq!(store.projects()[0].theme_color, ThemeColor::Green);
        assert_eq!(store.projects()[1].theme_color, ThemeColor::Blue);

        store.take_dirty();
        store.set_project_color("p-nope", ThemeColor::Pink);
        assert_eq!(store.take_dirty(), DirtyFlags::default());
    }

    #[test]
    fn stale_selection_is_repaired_on_load() {
        let projects = vec![Project::new("A".into(), String::new())];
        let first = projects[0].id.clone();
        let store = BoardStore::from_collections(projects, vec![], "p-gone".into());
        assert_eq!(store.active_project_id(), first);
    }

    #[test]
    fn set_active_project_ignores_unknown_ids() {
        let mut store = seeded_store();
        let active = store.active_project_id().to_string();
        store.set_active_project("p-nope");
        assert_eq!(store.active_project_id(), active);
    }

    // --- Tasks ---

    #[test]
    fn create_task_prepends_to_the_collection() {
        let mut store = seeded_store();
        store.create_task("First", "", Status::Todo, None, vec![], vec![]);
        let id = store
            .create_task("Second", "", Status::Todo, None, vec![], vec![])
            .unwrap();
        assert_eq!(store.tasks()[0].id, id);
        assert_eq!(store.tasks()[1].title, "First");
    }

    #[test]
    fn blank_task_title_leaves_collection_unchanged() {
        let mut store = seeded_store();
        assert_eq!(
            store.create_task("  ", "desc", Status::Todo, None, vec![], vec![]),
            None
        );
        assert!(store.tasks().is_empty());
    }

    #[test]
    fn create_task_without_a_live_project_is_a_noop() {
        let mut store = BoardStore::default();
        assert_eq!(
            store.create_task("Orphan", "", Status::Todo, None, vec![], vec![]),
            None
        );
        assert!(store.tasks().is_empty());
    }

    #[test]
    fn tasks_always_reference_live_projects() {
        let mut store = seeded_store();
        let p2 = store.active_project_id().to_string();
        store.create_task("A", "", Status::Todo, None, vec![], vec![]);
        store.create_task("B", "", Status::InProgress, None, vec![], vec![]);
        store.delete_project(&p2);

        let live: Vec<&str> = store.projects().iter().map(|p| p.id.as_str()).collect();
        assert!(store.tasks().iter().all(|t| live.contains(&t.project_id.as_str())));
    }

    #[test]
    fn move_task_changes_only_status() {
        let mut store = seeded_store();
        let id = store
            .create_task("Card", "body", Status::Todo, None, vec!["x".into()], vec![])
            .unwrap();
        store.move_task(&id, Status::Testing);
        let task = store.task(&id).unwrap();
        assert_eq!(task.status, Status::Testing);
        assert_eq!(task.title, "Card");
        assert_eq!(task.description, "body");
        assert_eq!(task.tags, vec!["x".to_string()]);
    }

    #[test]
    fn move_unknown_task_is_a_noop() {
        let mut store = seeded_store();
        store.take_dirty();
        store.move_task("t-nope", Status::Complete);
        assert_eq!(store.take_dirty(), DirtyFlags::default());
    }

    #[test]
    fn update_task_replaces_wholesale() {
        let mut store = seeded_store();
        let id = store
            .create_task("Old", "", Status::Todo, None, vec![], vec![])
            .unwrap();
        let mut replacement = store.task(&id).unwrap().clone();
        replacement.title = "New".into();
        replacement.status = Status::Complete;
        store.update_task(replacement);
        let task = store.task(&id).unwrap();
        assert_eq!(task.title, "New");
        assert_eq!(task.status, Status::Complete);
    }

    #[test]
    fn patch_task_merges_fields() {
        let mut store = seeded_store();
        let id = store
            .create_task("Card", "keep me", Status::Todo, None, vec![], vec![])
            .unwrap();
        store.patch_task(
            &id,
            &TaskPatch {
                title: Some("Patched".into()),
                ..Default::default()
            },
        );
        let task = store.task(&id).unwrap();
        assert_eq!(task.title, "Patched");
        assert_eq!(task.description, "keep me");
    }

    #[test]
    fn toggle_checklist_round_trips_and_spares_siblings() {
        let mut store = seeded_store();
        let checklist = vec![
            ChecklistItem::new("Schedule time".into()),
            ChecklistItem::new("Set up a board".into()),
            ChecklistItem::new("Review exercises".into()),
        ];
        let c2 = checklist[1].id.clone();
        let id = store
            .create_task("Workshop", "", Status::Testing, None, vec![], checklist)
            .unwrap();

        assert!(store.toggle_checklist(&id, &c2));
        let items = &store.task(&id).unwrap().checklist;
        assert!(items[1].completed);
        assert!(!items[0].completed);
        assert!(!items[2].completed);

        assert!(store.toggle_checklist(&id, &c2));
        let items = &store.task(&id).unwrap().checklist;
        assert!(!items[1].completed);
    }

    #[test]
    fn toggle_unknown_item_is_a_noop() {
        let mut store = seeded_store();
        let id = store
            .create_task("Card", "", Status::Todo, None, vec![], vec![])
            .unwrap();
        assert!(!store.toggle_checklist(&id, "c-nope"));
        assert!(!store.toggle_checklist("t-nope", "c-nope"));
    }

    // --- Dirty tracking ---

    #[test]
    fn dirty_flags_track_touched_collections() {
        let mut store = seeded_store();
        store.take_dirty();

        store.create_task("Card", "", Status::Todo, None, vec![], vec![]);
        assert_eq!(
            store.take_dirty(),
            DirtyFlags {
                projects: false,
                tasks: true
            }
        );

        store.create_project("Another", "");
        assert_eq!(
            store.take_dirty(),
            DirtyFlags {
                projects: true,
                tasks: false
            }
        );

        let id = store.active_project_id().to_string();
        store.delete_project(&id);
        assert_eq!(
            store.take_dirty(),
            DirtyFlags {
                projects: true,
                tasks: true
            }
        );
    }
}
