//! # CLI Layer
//!
//! This module is **one possible UI client** for pkeep.
//!
//! It is the only place in the codebase that:
//! - Knows about terminal I/O (stdin, stdout, stderr)
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! `run()` parses arguments, sets up logging and the [`PkeepApi`], then either
//! dispatches a one-shot subcommand or hands over to the interactive menu.

use super::menu;
use super::render::{print_messages, print_result, Render};
use super::setup::{Cli, Commands, CommonCommands, ContactCommands, NoteCommands, TaskCommands};
use clap::Parser;
use pkeep::api::{CmdMessage, Collection, PkeepApi, TaskFilter};
use pkeep::config::{resolve_data_dir, PkeepConfig};
use pkeep::error::{PkeepError, Result};
use pkeep::logging::init_logging;
use pkeep::model::{
    ContactDraft, ContactPatch, NoteDraft, NotePatch, Priority, RecordKind, TaskDraft, TaskPatch,
};
use pkeep::store::fs_backend::FsBackend;
use pkeep::store::StorageBackend;
use std::io;

struct AppContext {
    api: PkeepApi<FsBackend>,
    config: PkeepConfig,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let _logger = init_logging(cli.verbose)?;
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Note(cmd)) => handle_note(&mut ctx, cmd),
        Some(Commands::Task(cmd)) => handle_task(&mut ctx, cmd),
        Some(Commands::Contact(cmd)) => handle_contact(&mut ctx, cmd),
        Some(Commands::Config { init }) => handle_config(&ctx, init),
        Some(Commands::Menu) | None => {
            let stdin = io::stdin();
            menu::run(&mut ctx.api, stdin.lock())
        }
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli.data_dir.clone())?;
    let config = PkeepConfig::load(&data_dir)?;
    log::debug!("event=context_init data_dir={}", data_dir.display());

    Ok(AppContext {
        api: PkeepApi::open(&data_dir, &config),
        config,
    })
}

/// Converts a user-typed identifier.
pub fn parse_id(raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| PkeepError::InvalidId(raw.to_string()))
}

fn parse_priority(raw: Option<String>) -> Result<Option<Priority>> {
    raw.map(|p| p.parse()).transpose()
}

fn handle_note(ctx: &mut AppContext, cmd: NoteCommands) -> Result<()> {
    let mut notes = ctx.api.notes()?;
    match cmd {
        NoteCommands::Add { title, content } => {
            let result = notes.add(NoteDraft { title, content })?;
            print_messages(&result.messages);
        }
        NoteCommands::List => print_result(&notes.list()?, false),
        NoteCommands::Edit { id, title, content } => {
            let result = notes.edit(parse_id(&id)?, NotePatch { title, content })?;
            print_messages(&result.messages);
        }
        NoteCommands::Common(common) => handle_common(&mut notes, common)?,
    }
    Ok(())
}

fn handle_task(ctx: &mut AppContext, cmd: TaskCommands) -> Result<()> {
    let mut tasks = ctx.api.tasks()?;
    match cmd {
        TaskCommands::Add {
            title,
            description,
            priority,
            due,
        } => {
            let draft = TaskDraft {
                title,
                description,
                priority,
                due_date: due,
            };
            print_messages(&tasks.add(draft)?.messages);
        }
        TaskCommands::List { pending, priority } => {
            let filter = TaskFilter {
                pending_only: pending,
                priority: parse_priority(priority)?,
            };
            print_result(&tasks.list_filtered(filter)?, false);
        }
        TaskCommands::Edit {
            id,
            title,
            description,
            priority,
            due,
        } => {
            let patch = TaskPatch {
                title,
                description,
                done: None,
                priority,
                due_date: due,
            };
            print_messages(&tasks.edit(parse_id(&id)?, patch)?.messages);
        }
        TaskCommands::Done { id } => {
            print_messages(&tasks.complete(parse_id(&id)?, true)?.messages);
        }
        TaskCommands::Undo { id } => {
            print_messages(&tasks.complete(parse_id(&id)?, false)?.messages);
        }
        TaskCommands::Common(common) => handle_common(&mut tasks, common)?,
    }
    Ok(())
}

fn handle_contact(ctx: &mut AppContext, cmd: ContactCommands) -> Result<()> {
    let mut contacts = ctx.api.contacts()?;
    match cmd {
        ContactCommands::Add { name, phone, email } => {
            let draft = ContactDraft { name, phone, email };
            print_messages(&contacts.add(draft)?.messages);
        }
        ContactCommands::List => print_result(&contacts.list()?, false),
        ContactCommands::Edit {
            id,
            name,
            phone,
            email,
        } => {
            let patch = ContactPatch { name, phone, email };
            print_messages(&contacts.edit(parse_id(&id)?, patch)?.messages);
        }
        ContactCommands::Common(common) => handle_common(&mut contacts, common)?,
    }
    Ok(())
}

fn handle_common<R: Render, B: StorageBackend>(
    collection: &mut Collection<'_, R, B>,
    cmd: CommonCommands,
) -> Result<()> {
    match cmd {
        CommonCommands::View { id } => print_result(&collection.view(parse_id(&id)?)?, true),
        CommonCommands::Delete { id } => {
            print_messages(&collection.delete(parse_id(&id)?)?.messages)
        }
        CommonCommands::Search { term } => print_result(&collection.search(&term)?, false),
        CommonCommands::Export(args) => {
            print_messages(&collection.export(args.to.as_deref())?.messages)
        }
        CommonCommands::Import { file } => print_messages(&collection.import(&file)?.messages),
    }
    Ok(())
}

fn handle_config(ctx: &AppContext, init: bool) -> Result<()> {
    let data_dir = ctx.api.data_dir();
    let mut messages = Vec::new();
    if init {
        let config_path = PkeepConfig::path(data_dir);
        if config_path.exists() {
            messages.push(CmdMessage::warning(format!(
                "{} already exists, left unchanged",
                config_path.display()
            )));
        } else {
            let written = ctx.config.save(data_dir)?;
            messages.push(CmdMessage::success(format!("Wrote {}", written.display())));
        }
    }

    messages.push(CmdMessage::info(format!("data dir = {}", data_dir.display())));
    for kind in RecordKind::all() {
        let cfg = ctx.api.store_config(*kind);
        messages.push(CmdMessage::info(format!(
            "{} = {} (csv: {})",
            kind.plural(),
            cfg.backing_path.display(),
            cfg.csv_path.display()
        )));
    }
    print_messages(&messages);
    Ok(())
}
