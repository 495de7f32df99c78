//! Status line formatting and printing.
//!
//! Every line is `[TAG] message`, the tag right-aligned to three columns and
//! colored by kind. Kept separate from the synchronizer so the library never
//! writes to the terminal itself.

use std::io::{self, IsTerminal, Write};

use colored::{Color, Colorize};

use super::run::RunSummary;
use crate::core::{SyncEvent, SyncStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    File,
    NotFound,
    Add,
    Extra,
    Delete,
    Skip,
    Error,
    Summary,
    Run,
    Total,
    Done,
}

impl Tag {
    pub fn label(self) -> &'static str {
        match self {
            Tag::File => "FIL",
            Tag::NotFound => "NF",
            Tag::Add => "ADD",
            Tag::Extra => "EXT",
            Tag::Delete => "DEL",
            Tag::Skip => "SKP",
            Tag::Error => "ERR",
            Tag::Summary => "SUM",
            Tag::Run => "RUN",
            Tag::Total => "TOT",
            Tag::Done => "OK",
        }
    }

    fn color(self) -> Color {
        match self {
            Tag::File | Tag::Run | Tag::Total => Color::Cyan,
            Tag::NotFound => Color::Yellow,
            Tag::Add | Tag::Done => Color::Green,
            Tag::Extra => Color::Magenta,
            Tag::Delete | Tag::Error => Color::Red,
            Tag::Skip => Color::BrightBlack,
            Tag::Summary => Color::Blue,
        }
    }
}

/// Disable colors unless stdout is an interactive, color-capable terminal.
///
/// `colored` already honors `NO_COLOR` and `CLICOLOR_FORCE`.
pub fn configure_colors() {
    let dumb = std::env::var("TERM").is_ok_and(|t| t.eq_ignore_ascii_case("dumb"));
    if dumb || !io::stdout().is_terminal() {
        colored::control::set_override(false);
    }
}

pub fn format_status(tag: Tag, message: &str) -> String {
    let label = format!("{:>3}", tag.label()).color(tag.color());
    format!("[{}] {}", label, message)
}

pub fn print_status(tag: Tag, message: &str) {
    if tag == Tag::Error {
        let _ = writeln!(io::stderr().lock(), "{}", format_status(tag, message));
    } else {
        let _ = writeln!(io::stdout().lock(), "{}", format_status(tag, message));
    }
}

/// Print synchronizer events; translation errors go to `err`.
pub fn print_events_to<W: Write, E: Write>(events: &[SyncEvent], out: &mut W, err: &mut E) {
    for event in events {
        let _ = match event {
            SyncEvent::NotFound { key } => writeln!(out, "{}", format_status(Tag::NotFound, key)),
            SyncEvent::Added {
                key,
                translated: true,
            } => writeln!(
                out,
                "{}",
                format_status(Tag::Add, &format!("{}  (translated)", key))
            ),
            SyncEvent::Added { key, .. } => writeln!(out, "{}", format_status(Tag::Add, key)),
            SyncEvent::TranslationFailed { key, error } => writeln!(
                err,
                "{}",
                format_status(
                    Tag::Error,
                    &format!("Failed to translate '{}': {}", key, error)
                )
            )
            .and_then(|_| {
                writeln!(
                    out,
                    "{}",
                    format_status(Tag::Skip, &format!("Untranslated: {}", key))
                )
            }),
            SyncEvent::Extra { key } => writeln!(out, "{}", format_status(Tag::Extra, key)),
            SyncEvent::Removed { key } => writeln!(out, "{}", format_status(Tag::Delete, key)),
        };
    }
}

pub fn print_events(events: &[SyncEvent]) {
    print_events_to(events, &mut io::stdout().lock(), &mut io::stderr().lock());
}

/// `name | NF:n ADD:n EXT:n DEL:n SKP:n | path`
pub fn file_summary(name: &str, stats: &SyncStats, display_path: &str) -> String {
    format!(
        "{} | NF:{} ADD:{} EXT:{} DEL:{} SKP:{} | {}",
        name, stats.not_found, stats.added, stats.extra, stats.removed, stats.skipped, display_path
    )
}

/// Run-wide totals; the file count is shown only when several files were processed.
pub fn totals(stats: &SyncStats, files: usize) -> String {
    let mut parts = Vec::new();
    if files > 1 {
        parts.push(format!("FILES:{}", files));
    }
    parts.push(format!("NF:{}", stats.not_found));
    parts.push(format!("ADD:{}", stats.added));
    parts.push(format!("EXT:{}", stats.extra));
    parts.push(format!("DEL:{}", stats.removed));
    parts.push(format!("SKP:{}", stats.skipped));
    parts.push(format!("ERR:{}", stats.errors));
    parts.join(" ")
}

/// Verbose run recap: what was scanned and how much was written.
pub fn run_details(summary: &RunSummary) -> String {
    format!(
        "{} keys in {} source files ({} skipped), {} files written",
        summary.keys_found,
        summary.source_files_scanned,
        summary.sources_skipped,
        summary.files_updated
    )
}
