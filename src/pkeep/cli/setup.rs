use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pkeep", bin_name = "pkeep", version)]
#[command(about = "Personal record keeper for notes, tasks and contacts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the record files (defaults to $PKEEP_HOME, then the OS data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage notes
    #[command(subcommand, alias = "n")]
    Note(NoteCommands),

    /// Manage tasks
    #[command(subcommand, alias = "t")]
    Task(TaskCommands),

    /// Manage contacts
    #[command(subcommand, alias = "c")]
    Contact(ContactCommands),

    /// Interactive menu (the default when no command is given)
    Menu,

    /// Show where records are stored
    Config {
        /// Write the current settings to config.json for editing
        #[arg(long)]
        init: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum NoteCommands {
    /// Add a note
    Add {
        title: String,

        /// Note body
        #[arg(short, long, default_value = "")]
        content: String,
    },

    /// List notes
    #[command(alias = "ls")]
    List,

    /// Change a note; omitted fields keep their value
    Edit {
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        content: Option<String>,
    },

    #[command(flatten)]
    Common(CommonCommands),
}

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Add a task
    Add {
        title: String,

        #[arg(short, long, default_value = "")]
        description: String,

        /// Low, Medium or High (default Medium)
        #[arg(short, long)]
        priority: Option<String>,

        /// Due date as DD-MM-YYYY
        #[arg(long)]
        due: Option<String>,
    },

    /// List tasks
    #[command(alias = "ls")]
    List {
        /// Only tasks that are not done
        #[arg(long)]
        pending: bool,

        /// Only tasks with this priority
        #[arg(short, long)]
        priority: Option<String>,
    },

    /// Change a task; omitted fields keep their value
    Edit {
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        priority: Option<String>,

        #[arg(long)]
        due: Option<String>,
    },

    /// Mark a task as done
    Done { id: String },

    /// Mark a task as not done
    Undo { id: String },

    #[command(flatten)]
    Common(CommonCommands),
}

#[derive(Subcommand, Debug)]
pub enum ContactCommands {
    /// Add a contact
    Add {
        name: String,

        #[arg(short, long, default_value = "")]
        phone: String,

        #[arg(short, long, default_value = "")]
        email: String,
    },

    /// List contacts
    #[command(alias = "ls")]
    List,

    /// Change a contact; omitted fields keep their value
    Edit {
        id: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        phone: Option<String>,

        #[arg(short, long)]
        email: Option<String>,
    },

    #[command(flatten)]
    Common(CommonCommands),
}

/// Operations every record kind supports the same way.
#[derive(Subcommand, Debug)]
pub enum CommonCommands {
    /// Show one record
    #[command(alias = "v")]
    View { id: String },

    /// Delete one record
    #[command(alias = "rm")]
    Delete { id: String },

    /// Find records containing a term
    Search { term: String },

    /// Write all records to a CSV file
    Export(ExportArgs),

    /// Add records from a CSV file
    Import {
        /// CSV file to read
        file: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Target file (defaults to the configured CSV file)
    #[arg(long, value_name = "FILE")]
    pub to: Option<PathBuf>,
}
