use std::error::Error;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::commands::*;
use super::output;
use crate::io::board_io;
use crate::io::saver::Autosaver;
use crate::io::state::{self, UiState};
use crate::model::task::{ChecklistItem, TaskPatch, parse_tag_list};
use crate::ops::board::{filter_and_group, task_matches};
use crate::store::BoardStore;

/// An open board: loaded store, background saver, and the UI state to
/// write back on exit.
struct Session {
    board_dir: PathBuf,
    store: BoardStore,
    saver: Autosaver,
    ui: UiState,
}

impl Session {
    fn open(start: &Path) -> Result<Session, Box<dyn Error>> {
        let board_dir = board_io::discover_board(start)?;
        let config = board_io::load_config(&board_dir)?;
        let gateway = board_io::open_gateway(&config, &board_dir);
        let projects = gateway.load_projects()?;
        let tasks = gateway.load_tasks()?;
        let ui = state::read_ui_state(&board_dir).unwrap_or_default();
        let store = BoardStore::from_collections(projects, tasks, ui.active_project.clone());
        let saver = Autosaver::start(gateway);
        Ok(Session {
            board_dir,
            store,
            saver,
            ui,
        })
    }

    /// Queue snapshots of whatever collections changed. Returns
    /// immediately; the worker does the writing.
    fn autosave(&mut self) {
        let dirty = self.store.take_dirty();
        if dirty.projects {
            self.saver.save_projects(self.store.projects().to_vec());
        }
        if dirty.tasks {
            self.saver.save_tasks(self.store.tasks().to_vec());
        }
    }

    /// Persist UI state, flush pending saves, and report the first save
    /// failure, if any.
    fn finish(mut self) -> Result<(), Box<dyn Error>> {
        self.autosave();
        self.ui.active_project = self.store.active_project_id().to_string();
        state::write_ui_state(&self.board_dir, &self.ui)?;
        let errors = self.saver.finish();
        match errors.into_iter().next() {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }
}

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn Error>> {
    let json = cli.json;
    let start = match &cli.board_dir {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir()?,
    };

    // Init runs before discovery: there is no board yet.
    if let Commands::Init(args) = &cli.command {
        return cmd_init(&start, args);
    }

    let mut session = Session::open(&start)?;
    match cli.command {
        Commands::Init(_) => unreachable!("handled above"),
        Commands::Project(cmd) => cmd_project(&mut session, cmd, json)?,
        Commands::Board(args) => cmd_board(&mut session, args, json)?,
        Commands::Add(args) => cmd_add(&mut session, args)?,
        Commands::Show(args) => cmd_show(&session, args, json)?,
        Commands::Mv(args) => cmd_mv(&mut session, args)?,
        Commands::Edit(args) => cmd_edit(&mut session, args)?,
        Commands::Check(args) => cmd_check(&mut session, args)?,
        Commands::Rm(args) => cmd_rm(&mut session, args)?,
        Commands::Search(args) => cmd_search(&mut session, args, json)?,
    }
    session.finish()
}

fn cmd_init(start: &Path, args: &InitArgs) -> Result<(), Box<dyn Error>> {
    let name = match &args.name {
        Some(name) => name.clone(),
        None => infer_board_name(start),
    };
    let board_dir = board_io::init_board(start, &name, args.force)?;
    println!("initialized board \"{}\" at {}", name, board_dir.display());
    Ok(())
}

fn infer_board_name(start: &Path) -> String {
    start
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "board".to_string())
}

fn cmd_project(session: &mut Session, cmd: ProjectCmd, json: bool) -> Result<(), Box<dyn Error>> {
    match cmd.action {
        ProjectAction::List => {
            output::print_projects(
                session.store.projects(),
                session.store.active_project_id(),
                json,
            )?;
        }
        ProjectAction::New(args) => {
            match session.store.create_project(&args.name, &args.description) {
                Some(id) => {
                    if let Some(color) = args.color {
                        session.store.set_project_color(&id, color);
                    }
                    println!("created project {} (now active)", id);
                }
                None => println!("nothing created: project name is empty"),
            }
        }
        ProjectAction::Use(args) => {
            session.store.set_active_project(&args.id);
            match session.store.active_project() {
                Some(p) if p.id == args.id => println!("active project: {}  {}", p.id, p.name),
                _ => println!("no such project: {}", args.id),
            }
        }
        ProjectAction::Delete(args) => {
            let Some(project) = session.store.project(&args.id) else {
                println!("no such project: {}", args.id);
                return Ok(());
            };
            let task_count = session
                .store
                .tasks()
                .iter()
                .filter(|t| t.project_id == args.id)
                .count();
            let prompt = format!(
                "delete project \"{}\" and its {} task(s)?",
                project.name, task_count
            );
            if !args.yes && !confirm(&prompt)? {
                println!("aborted");
                return Ok(());
            }
            session.store.delete_project(&args.id);
            println!("deleted project {}", args.id);
        }
    }
    Ok(())
}

fn cmd_board(session: &mut Session, args: BoardArgs, json: bool) -> Result<(), Box<dyn Error>> {
    // An explicit query is remembered across runs; an explicit empty
    // one clears it. Without --search, the remembered query applies.
    if let Some(query) = &args.search {
        session.ui.last_search = (!query.is_empty()).then(|| query.clone());
    }
    let query = args
        .search
        .or_else(|| session.ui.last_search.clone())
        .unwrap_or_default();
    let view = filter_and_group(
        session.store.tasks(),
        session.store.active_project_id(),
        &query,
    );
    let shown_query = (!query.is_empty()).then_some(query.as_str());
    output::print_board(session.store.active_project(), &view, shown_query, json)?;
    Ok(())
}

fn cmd_add(session: &mut Session, args: AddArgs) -> Result<(), Box<dyn Error>> {
    let tags: Vec<String> = args
        .tag
        .iter()
        .flat_map(|entry| parse_tag_list(entry))
        .collect();
    let checklist: Vec<ChecklistItem> = args
        .item
        .into_iter()
        .map(ChecklistItem::new)
        .collect();
    let status = args.status.unwrap_or_default();

    let created = match &args.project {
        Some(project_id) => session.store.create_task_in(
            project_id,
            &args.title,
            &args.description,
            status,
            args.due,
            tags,
            checklist,
        ),
        None => session.store.create_task(
            &args.title,
            &args.description,
            status,
            args.due,
            tags,
            checklist,
        ),
    };
    match created {
        Some(id) => println!("created task {} ({})", id, status.label()),
        None => println!("nothing created: empty title or unknown project"),
    }
    Ok(())
}

fn cmd_show(session: &Session, args: ShowArgs, json: bool) -> Result<(), Box<dyn Error>> {
    match session.store.task(&args.id) {
        Some(task) => output::print_task(task, json)?,
        None => println!("no such task: {}", args.id),
    }
    Ok(())
}

fn cmd_mv(session: &mut Session, args: MvArgs) -> Result<(), Box<dyn Error>> {
    if session.store.task(&args.id).is_none() {
        println!("no such task: {}", args.id);
        return Ok(());
    }
    session.store.move_task(&args.id, args.status);
    println!("{} -> {}", args.id, args.status.label());
    Ok(())
}

fn cmd_edit(session: &mut Session, args: EditArgs) -> Result<(), Box<dyn Error>> {
    if session.store.task(&args.id).is_none() {
        println!("no such task: {}", args.id);
        return Ok(());
    }
    let due_date = if args.clear_due {
        Some(None)
    } else {
        args.due.map(Some)
    };
    let patch = TaskPatch {
        title: args.title,
        description: args.description,
        status: args.status,
        due_date,
        tags: args.tags.as_deref().map(parse_tag_list),
        ..Default::default()
    };
    if patch.is_empty() {
        println!("nothing to change");
        return Ok(());
    }
    session.store.patch_task(&args.id, &patch);
    println!("updated task {}", args.id);
    Ok(())
}

fn cmd_check(session: &mut Session, args: CheckArgs) -> Result<(), Box<dyn Error>> {
    if !session.store.toggle_checklist(&args.id, &args.item) {
        println!("no such task or checklist item");
        return Ok(());
    }
    let done = session
        .store
        .task(&args.id)
        .and_then(|t| t.checklist.iter().find(|c| c.id == args.item))
        .map(|c| c.completed)
        .unwrap_or(false);
    let mark = if done { "x" } else { " " };
    println!("[{}] {} on {}", mark, args.item, args.id);
    Ok(())
}

fn cmd_rm(session: &mut Session, args: RmArgs) -> Result<(), Box<dyn Error>> {
    let Some(task) = session.store.task(&args.id) else {
        println!("no such task: {}", args.id);
        return Ok(());
    };
    let prompt = format!("delete task \"{}\"?", task.title);
    if !args.yes && !confirm(&prompt)? {
        println!("aborted");
        return Ok(());
    }
    session.store.delete_task(&args.id);
    println!("deleted task {}", args.id);
    Ok(())
}

fn cmd_search(session: &mut Session, args: SearchArgs, json: bool) -> Result<(), Box<dyn Error>> {
    session.ui.last_search = Some(args.query.clone());
    let active = session.store.active_project_id();
    let hits: Vec<_> = session
        .store
        .tasks()
        .iter()
        .filter(|t| t.project_id == active && task_matches(t, &args.query))
        .collect();
    output::print_task_list(&hits, json)?;
    Ok(())
}

fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let answer = line.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}
