use chrono::{Local, NaiveDateTime, TimeZone};
use colored::{ColoredString, Colorize};
use pkeep::api::{CmdMessage, CmdResult, MessageLevel};
use pkeep::model::{Contact, Note, Priority, Record, Task, DUE_DATE_FORMAT, TIMESTAMP_FORMAT};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TRAILER_WIDTH: usize = 18;

/// How a record kind shows up in the terminal.
pub trait Render: Record {
    /// One-line summary for lists, as plain text. Lines are measured and
    /// truncated before [`Render::style`] colors them.
    fn summary(&self) -> String;

    /// Colors an already truncated summary.
    fn style(&self, summary: &str) -> ColoredString {
        summary.normal()
    }

    /// Right-aligned extra for lists (age, due date), if any.
    fn trailer(&self) -> Option<String> {
        None
    }

    /// Labelled fields for the detail view.
    fn fields(&self) -> Vec<(&'static str, String)>;
}

impl Render for Note {
    fn summary(&self) -> String {
        let preview: String = self
            .content
            .chars()
            .take(60)
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        if preview.is_empty() {
            self.title.clone()
        } else {
            format!("{} {}", self.title, preview)
        }
    }

    fn trailer(&self) -> Option<String> {
        Some(format_time_ago(self.timestamp))
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Title", self.title.clone()),
            ("Content", self.content.clone()),
            (
                "Last modified",
                self.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            ),
        ]
    }
}

impl Render for Task {
    fn summary(&self) -> String {
        let mark = if self.done { "[x]" } else { "[ ]" };
        format!("{} {} ({})", mark, self.title, self.priority)
    }

    fn style(&self, summary: &str) -> ColoredString {
        if self.done {
            return summary.dimmed();
        }
        match self.priority {
            Priority::High => summary.red(),
            Priority::Medium => summary.normal(),
            Priority::Low => summary.dimmed(),
        }
    }

    fn trailer(&self) -> Option<String> {
        self.due_date
            .map(|d| format!("due {}", d.format(DUE_DATE_FORMAT)))
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Title", self.title.clone()),
            ("Description", self.description.clone()),
            ("Status", self.status().to_string()),
            ("Priority", self.priority.to_string()),
            (
                "Due date",
                self.due_date
                    .map(|d| d.format(DUE_DATE_FORMAT).to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]
    }
}

impl Render for Contact {
    fn summary(&self) -> String {
        let details: Vec<&str> = [self.phone.as_str(), self.email.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
        if details.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.name, details.join(", "))
        }
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Name", self.name.clone()),
            ("Phone", self.phone.clone()),
            ("Email", self.email.clone()),
        ]
    }
}

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// Prints the listed records and any messages of a result.
pub fn print_result<R: Render>(result: &CmdResult<R>, detailed: bool) {
    if detailed {
        print_details(&result.listed);
    } else {
        print_list(&result.listed);
    }
    print_messages(&result.messages);
}

pub fn print_list<R: Render>(records: &[R]) {
    for record in records {
        println!("{}", list_line(record));
    }
}

pub fn print_details<R: Render>(records: &[R]) {
    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            println!("\n--------------------------------\n");
        }
        println!("{} {}", format!("#{}", record.id()).yellow(), R::KIND);
        for (label, value) in record.fields() {
            println!("{:>14}: {}", label.bold(), value);
        }
    }
}

/// Uncolored pieces of a list line, sized to [`LINE_WIDTH`] together.
struct LineParts {
    idx: String,
    summary: String,
    padding: String,
    trailer: String,
}

fn line_parts<R: Render>(record: &R) -> LineParts {
    let idx = format!("{:>4}. ", record.id());
    let trailer = record
        .trailer()
        .map(|t| format!("{:>width$}", t, width = TRAILER_WIDTH))
        .unwrap_or_default();
    let available = LINE_WIDTH.saturating_sub(idx.width() + trailer.width());

    let summary = truncate_to_width(&record.summary(), available);
    let padding = " ".repeat(available.saturating_sub(summary.width()));

    LineParts {
        idx,
        summary,
        padding,
        trailer,
    }
}

fn list_line<R: Render>(record: &R) -> String {
    let parts = line_parts(record);
    format!(
        "{}{}{}{}",
        parts.idx.yellow(),
        record.style(&parts.summary),
        parts.padding,
        parts.trailer.dimmed()
    )
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

fn format_time_ago(timestamp: NaiveDateTime) -> String {
    let then = match Local.from_local_datetime(&timestamp).earliest() {
        Some(then) => then,
        None => return timestamp.format(TIMESTAMP_FORMAT).to_string(),
    };
    let duration = Local::now().signed_duration_since(then);
    Formatter::new().convert(duration.to_std().unwrap_or_default())
}
