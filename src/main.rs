//! Checklist Editor command line
//!
//! Thin front end over the editor engine and the SQLite backend.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use checklist_backend::commands;
use checklist_backend::domain::{EntryBody, EntryDraft, ResponseType};
use checklist_backend::{AppState, BackendConfig};
use checklist_editor::{ChecklistBackend, DisplayRow, DropOutcome, EditorStore};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "checklist-editor", version, about = "Edit checklist templates")]
struct Cli {
    /// SQLite database file (overrides CHECKLIST_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Directory for log files (overrides CHECKLIST_LOG_DIR)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an empty template and print its id
    NewTemplate { title: String },
    /// List templates
    Templates,
    /// Print a template's numbered entries
    Show { template: u32 },
    /// Append an entry; KIND is a response type name or "section"
    Add {
        template: u32,
        kind: String,
        details: String,
        #[arg(long)]
        mandatory: bool,
    },
    /// Drag the entry at position FROM to position TO (1-based)
    Move { template: u32, from: usize, to: usize },
    /// Delete an entry
    Remove { template: u32, entry_id: u32 },
    /// Assign a tag to a template, creating the tag if needed
    Tag { template: u32, name: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = BackendConfig::from_env();
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    if let Some(log_dir) = cli.log_dir {
        config.log_dir = log_dir;
    }

    rolling_logger::init_logger(&config.log_dir, "checklist-editor")
        .map_err(|e| anyhow!("failed to init rolling logger: {}", e))?;

    let runtime = tokio::runtime::Runtime::new().context("failed to start runtime")?;
    runtime.block_on(run(config, cli.command))
}

async fn run(config: BackendConfig, command: Command) -> Result<()> {
    let state = match AppState::open(&config) {
        Ok(state) => {
            let _ = rolling_logger::info(&format!("Opened database {}", config.db_path.display()));
            Arc::new(state)
        }
        Err(e) => {
            let _ = rolling_logger::error(&format!("DB init failed: {}", e));
            return Err(e.into());
        }
    };

    match command {
        Command::NewTemplate { title } => {
            let template = commands::create_template(&state, &title).await?;
            println!("{}", template.id);
        }
        Command::Templates => {
            for template in commands::list_templates(&state).await? {
                println!("{:>4}  {}", template.id, template.title);
            }
        }
        Command::Show { template } => {
            let store = EditorStore::load(state, template).await?;
            print_template(&store);
        }
        Command::Add { template, kind, details, mandatory } => {
            let draft = parse_draft(&kind, details, mandatory)?;
            let mut store = EditorStore::load(state, template).await?;
            let entry = store.model_mut().append(draft).await?;
            println!("{}", entry.id);
        }
        Command::Move { template, from, to } => {
            let mut store = EditorStore::load(state, template).await?;
            let len = store.model().len();
            let (from, to) = (position_index(from, len)?, position_index(to, len)?);

            store.start_drag(from);
            store.hover(to);
            match store.drop().await {
                DropOutcome::Reverted(err) => return Err(err.into()),
                DropOutcome::NoChange | DropOutcome::Reordered(_) => print_template(&store),
            }
        }
        Command::Remove { template, entry_id } => {
            let mut store = EditorStore::load(state, template).await?;
            store.model_mut().remove(entry_id).await?;
        }
        Command::Tag { template, name } => {
            let tag = commands::ensure_tag(&state, &name).await?;
            commands::assign_tag(&state, template, tag.id).await?;
        }
    }
    Ok(())
}

fn parse_draft(kind: &str, details: String, mandatory: bool) -> Result<EntryDraft> {
    if kind == "section" {
        if mandatory {
            bail!("section breaks cannot be mandatory");
        }
        return Ok(EntryDraft::section(details));
    }

    let response_type = ResponseType::from_name(kind).ok_or_else(|| {
        let names: Vec<&str> = ResponseType::ALL.iter().map(ResponseType::as_str).collect();
        anyhow!("unknown kind '{}', expected section or one of: {}", kind, names.join(", "))
    })?;
    Ok(EntryDraft::item(details, response_type).mandatory(mandatory))
}

fn position_index(position: usize, len: usize) -> Result<usize> {
    if position == 0 || position > len {
        bail!("position {} is out of range 1..={}", position, len);
    }
    Ok(position - 1)
}

fn print_template<B: ChecklistBackend>(store: &EditorStore<B>) {
    let model = store.model();
    println!("{}", model.template().title);
    if !model.tags().is_empty() {
        let names: Vec<&str> = model.tags().iter().map(|t| t.name.as_str()).collect();
        println!("tags: {}", names.join(", "));
    }
    for (index, row) in store.rows().iter().enumerate() {
        let flag = if is_mandatory(row) { " *" } else { "" };
        println!("{:>3} [{:>4}] {}{}  ({})", index + 1, row.entry.id, row, flag, row.meta.label);
    }
}

fn is_mandatory(row: &DisplayRow) -> bool {
    matches!(row.entry.body, EntryBody::Item { mandatory: true, .. })
}
