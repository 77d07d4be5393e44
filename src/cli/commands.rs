use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::model::project::ThemeColor;
use crate::model::task::Status;

#[derive(Parser)]
#[command(name = "tack", about = concat!("[=] tack v", env!("CARGO_PKG_VERSION"), " - your kanban board is a couple of json files"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Start board discovery from a different directory
    #[arg(short = 'C', long = "board-dir", global = true)]
    pub board_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new board in the current directory
    Init(InitArgs),
    /// List, create, select, or delete projects
    Project(ProjectCmd),
    /// Show the four-column board for the active project
    Board(BoardArgs),
    /// Add a task to the active project
    Add(AddArgs),
    /// Show task details
    Show(ShowArgs),
    /// Move a task to another column
    Mv(MvArgs),
    /// Edit task fields
    Edit(EditArgs),
    /// Toggle a checklist item on a task
    Check(CheckArgs),
    /// Delete a task
    Rm(RmArgs),
    /// Search the active project's tasks by title or tag
    Search(SearchArgs),
}

/// Clap value parser for a workflow column.
pub fn parse_status_arg(s: &str) -> Result<Status, String> {
    Status::parse(s).ok_or_else(|| {
        format!(
            "unknown status \"{}\" — use one of: todo, in-progress, testing, complete",
            s
        )
    })
}

/// Clap value parser for a project accent color.
pub fn parse_color_arg(s: &str) -> Result<ThemeColor, String> {
    ThemeColor::parse(s).ok_or_else(|| {
        format!(
            "unknown color \"{}\" — use one of: pink, purple, blue, green, yellow",
            s
        )
    })
}

/// Clap value parser for a due date.
pub fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("invalid date \"{}\" — use YYYY-MM-DD", s))
}

// ---------------------------------------------------------------------------
// Init
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InitArgs {
    /// Board name (default: inferred from directory name)
    #[arg(long)]
    pub name: Option<String>,
    /// Reinitialize even if board/ already exists
    #[arg(long)]
    pub force: bool,
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ProjectCmd {
    #[command(subcommand)]
    pub action: ProjectAction,
}

#[derive(Subcommand)]
pub enum ProjectAction {
    /// List projects (the active one is starred)
    List,
    /// Create a project and make it active
    New(ProjectNewArgs),
    /// Make a project active
    Use(ProjectIdArg),
    /// Delete a project and every task in it
    Delete(ProjectDeleteArgs),
}

#[derive(Args)]
pub struct ProjectNewArgs {
    /// Project name
    pub name: String,
    /// Free-text description
    #[arg(long, default_value = "")]
    pub description: String,
    /// Accent color (pink, purple, blue, green, yellow)
    #[arg(long, value_parser = parse_color_arg)]
    pub color: Option<ThemeColor>,
}

#[derive(Args)]
pub struct ProjectIdArg {
    /// Project ID
    pub id: String,
}

#[derive(Args)]
pub struct ProjectDeleteArgs {
    /// Project ID
    pub id: String,
    /// Skip the confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct BoardArgs {
    /// Only show tasks whose title or tags contain this text.
    /// Remembered between runs; pass an empty string to clear.
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,
    /// Free-text description
    #[arg(long, default_value = "")]
    pub description: String,
    /// Column for the new task (default: todo)
    #[arg(long, value_parser = parse_status_arg)]
    pub status: Option<Status>,
    /// Due date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    pub due: Option<NaiveDate>,
    /// Tag or comma-separated tags (repeatable)
    #[arg(long)]
    pub tag: Vec<String>,
    /// Checklist item (repeatable)
    #[arg(long)]
    pub item: Vec<String>,
    /// Attach to this project instead of the active one
    #[arg(long)]
    pub project: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Task ID
    pub id: String,
}

#[derive(Args)]
pub struct MvArgs {
    /// Task ID
    pub id: String,
    /// Target column (todo, in-progress, testing, complete)
    #[arg(value_parser = parse_status_arg)]
    pub status: Status,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task ID
    pub id: String,
    /// New title
    #[arg(long)]
    pub title: Option<String>,
    /// New description
    #[arg(long)]
    pub description: Option<String>,
    /// New column
    #[arg(long, value_parser = parse_status_arg)]
    pub status: Option<Status>,
    /// New due date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    pub due: Option<NaiveDate>,
    /// Remove the due date
    #[arg(long, conflicts_with = "due")]
    pub clear_due: bool,
    /// Replace all tags (comma separated)
    #[arg(long)]
    pub tags: Option<String>,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Task ID
    pub id: String,
    /// Checklist item ID
    pub item: String,
}

#[derive(Args)]
pub struct RmArgs {
    /// Task ID
    pub id: String,
    /// Skip the confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Text to look for in titles and tags (case-insensitive)
    pub query: String,
}
