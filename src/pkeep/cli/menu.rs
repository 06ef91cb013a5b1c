//! Interactive numbered menu.
//!
//! Reads one line per answer from any `BufRead`, so tests can drive it with a
//! byte slice. End of input behaves like choosing "Exit" everywhere.
//!
//! Recoverable errors (bad id, unknown record, invalid field) are printed and
//! the submenu keeps going. Anything else is printed and drops back to the
//! main menu, which is also what happens when a store can't be opened.

use super::commands::parse_id;
use super::render::{print_messages, print_result, Render};
use colored::Colorize;
use pkeep::api::{CmdMessage, Collection, PkeepApi};
use pkeep::error::{PkeepError, Result};
use pkeep::model::{
    Contact, ContactDraft, ContactPatch, Note, NoteDraft, NotePatch, Task, TaskDraft, TaskPatch,
};
use pkeep::store::StorageBackend;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

pub struct Prompter<In> {
    input: In,
    eof: bool,
}

impl<In: BufRead> Prompter<In> {
    pub fn new(input: In) -> Self {
        Self { input, eof: false }
    }

    /// Prints `prompt` and reads one trimmed line. Returns an empty string
    /// once input is exhausted.
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        print!("{}", prompt);
        io::stdout().flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            self.eof = true;
            println!();
        }
        Ok(line.trim().to_string())
    }

    /// `None` for a blank answer.
    pub fn ask_optional(&mut self, prompt: &str) -> Result<Option<String>> {
        let answer = self.ask(prompt)?;
        Ok((!answer.is_empty()).then_some(answer))
    }

    pub fn at_eof(&self) -> bool {
        self.eof
    }
}

/// Per-kind field prompts for the add and edit actions.
pub trait Prompt: Render {
    fn prompt_draft<In: BufRead>(prompter: &mut Prompter<In>) -> Result<Self::Draft>;

    fn prompt_patch<In: BufRead>(prompter: &mut Prompter<In>) -> Result<Self::Patch>;

    /// Extra submenu entries beyond the shared ones.
    fn extra_options() -> &'static [(&'static str, &'static str)] {
        &[]
    }

    /// Handles a choice listed in `extra_options`. Returns `false` if the
    /// choice isn't one of them.
    fn run_extra<B: StorageBackend, In: BufRead>(
        _collection: &mut Collection<'_, Self, B>,
        _choice: &str,
        _prompter: &mut Prompter<In>,
    ) -> Result<bool> {
        Ok(false)
    }
}

impl Prompt for Note {
    fn prompt_draft<In: BufRead>(prompter: &mut Prompter<In>) -> Result<NoteDraft> {
        let title = prompter.ask("Title: ")?;
        let content = prompter.ask("Content: ")?;
        Ok(NoteDraft::new(title, content))
    }

    fn prompt_patch<In: BufRead>(prompter: &mut Prompter<In>) -> Result<NotePatch> {
        Ok(NotePatch {
            title: prompter.ask_optional("New title (blank to keep): ")?,
            content: prompter.ask_optional("New content (blank to keep): ")?,
        })
    }
}

impl Prompt for Task {
    fn prompt_draft<In: BufRead>(prompter: &mut Prompter<In>) -> Result<TaskDraft> {
        Ok(TaskDraft {
            title: prompter.ask("Title: ")?,
            description: prompter.ask("Description: ")?,
            priority: prompter.ask_optional("Priority (Low/Medium/High, blank for Medium): ")?,
            due_date: prompter.ask_optional("Due date (DD-MM-YYYY, blank for none): ")?,
        })
    }

    fn prompt_patch<In: BufRead>(prompter: &mut Prompter<In>) -> Result<TaskPatch> {
        Ok(TaskPatch {
            title: prompter.ask_optional("New title (blank to keep): ")?,
            description: prompter.ask_optional("New description (blank to keep): ")?,
            done: None,
            priority: prompter.ask_optional("New priority (blank to keep): ")?,
            due_date: prompter.ask_optional("New due date (blank to keep): ")?,
        })
    }

    fn extra_options() -> &'static [(&'static str, &'static str)] {
        &[("9", "Mark done"), ("10", "Reopen")]
    }

    fn run_extra<B: StorageBackend, In: BufRead>(
        collection: &mut Collection<'_, Task, B>,
        choice: &str,
        prompter: &mut Prompter<In>,
    ) -> Result<bool> {
        let done = match choice {
            "9" => true,
            "10" => false,
            _ => return Ok(false),
        };
        let id = parse_id(&prompter.ask("ID: ")?)?;
        print_messages(&collection.complete(id, done)?.messages);
        Ok(true)
    }
}

impl Prompt for Contact {
    fn prompt_draft<In: BufRead>(prompter: &mut Prompter<In>) -> Result<ContactDraft> {
        Ok(ContactDraft {
            name: prompter.ask("Name: ")?,
            phone: prompter.ask("Phone: ")?,
            email: prompter.ask("Email: ")?,
        })
    }

    fn prompt_patch<In: BufRead>(prompter: &mut Prompter<In>) -> Result<ContactPatch> {
        Ok(ContactPatch {
            name: prompter.ask_optional("New name (blank to keep): ")?,
            phone: prompter.ask_optional("New phone (blank to keep): ")?,
            email: prompter.ask_optional("New email (blank to keep): ")?,
        })
    }
}

const SHARED_OPTIONS: &[(&str, &str)] = &[
    ("1", "Add"),
    ("2", "List"),
    ("3", "View"),
    ("4", "Edit"),
    ("5", "Delete"),
    ("6", "Export to CSV"),
    ("7", "Import from CSV"),
    ("8", "Back"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Back,
}

pub fn run<B: StorageBackend, In: BufRead>(api: &mut PkeepApi<B>, input: In) -> Result<()> {
    let mut prompter = Prompter::new(input);

    while !prompter.at_eof() {
        println!("\n{}", "Main menu".bold());
        println!("  1. Notes\n  2. Tasks\n  3. Contacts\n  4. Exit");

        let choice = prompter.ask("Choose an option: ")?;
        match choice.as_str() {
            "1" => submenu(api.notes(), &mut prompter)?,
            "2" => submenu(api.tasks(), &mut prompter)?,
            "3" => submenu(api.contacts(), &mut prompter)?,
            "4" => break,
            "" if prompter.at_eof() => break,
            other => report_invalid_choice(other),
        }
    }
    log::debug!("event=menu_exit");
    Ok(())
}

fn submenu<R: Prompt, B: StorageBackend, In: BufRead>(
    opened: Result<Collection<'_, R, B>>,
    prompter: &mut Prompter<In>,
) -> Result<()> {
    let mut collection = match opened {
        Ok(collection) => collection,
        Err(e) => {
            report_error(&e);
            return Ok(());
        }
    };

    while !prompter.at_eof() {
        println!("\n{}", format!("{} menu", R::KIND).bold());
        for (key, label) in SHARED_OPTIONS.iter().chain(R::extra_options()) {
            println!("  {}. {}", key, label);
        }

        let choice = prompter.ask("Choose an option: ")?;
        if choice.is_empty() && prompter.at_eof() {
            break;
        }
        match run_action(&mut collection, &choice, prompter) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Back) => break,
            Err(e) if e.is_recoverable() => report_error(&e),
            Err(e) => {
                report_error(&e);
                break;
            }
        }
    }
    Ok(())
}

fn run_action<R: Prompt, B: StorageBackend, In: BufRead>(
    collection: &mut Collection<'_, R, B>,
    choice: &str,
    prompter: &mut Prompter<In>,
) -> Result<Flow> {
    match choice {
        "1" => {
            let draft = R::prompt_draft(prompter)?;
            if prompter.at_eof() {
                return Ok(Flow::Back);
            }
            print_messages(&collection.add(draft)?.messages);
        }
        "2" => print_result(&collection.list()?, false),
        "3" => {
            let id = parse_id(&prompter.ask("ID: ")?)?;
            print_result(&collection.view(id)?, true);
        }
        "4" => {
            let id = parse_id(&prompter.ask("ID: ")?)?;
            let patch = R::prompt_patch(prompter)?;
            if prompter.at_eof() {
                return Ok(Flow::Back);
            }
            print_messages(&collection.edit(id, patch)?.messages);
        }
        "5" => {
            let id = parse_id(&prompter.ask("ID: ")?)?;
            print_messages(&collection.delete(id)?.messages);
        }
        "6" => {
            let target = prompter.ask_optional(&format!(
                "Export to [{}]: ",
                collection.default_csv_path().display()
            ))?;
            let result = collection.export(target.as_deref().map(Path::new))?;
            print_messages(&result.messages);
        }
        "7" => {
            let source = prompter
                .ask_optional(&format!(
                    "Import from [{}]: ",
                    collection.default_csv_path().display()
                ))?
                .map(PathBuf::from)
                .unwrap_or_else(|| collection.default_csv_path().to_path_buf());
            print_messages(&collection.import(&source)?.messages);
        }
        "8" => return Ok(Flow::Back),
        other => {
            if !R::run_extra(collection, other, prompter)? {
                report_invalid_choice(other);
            }
        }
    }
    Ok(Flow::Continue)
}

fn report_error(error: &PkeepError) {
    log::debug!("event=menu_error recoverable={}", error.is_recoverable());
    print_messages(&[CmdMessage::error(error.to_string())]);
}

fn report_invalid_choice(choice: &str) {
    print_messages(&[CmdMessage::warning(format!(
        "Invalid choice {:?}, pick one of the listed numbers.",
        choice
    ))]);
}
