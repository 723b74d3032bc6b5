//! Operator-facing terminal text: sections, labelled fields, status lines
//! and tables.
//!
//! Status lines go to stdout except errors, which go to stderr so a failing
//! command can be told apart in scripts.

use std::fmt::Display;
use std::io::{self, Write};

use owo_colors::{OwoColorize, Stream};
use tabled::settings::Style;
use tabled::{Table, Tabled};

const RULE: &str = "────────────────────────────────────────────────────────────────────────";
const LABEL_WIDTH: usize = 14;

#[derive(Clone, Copy)]
enum Tone {
    Good,
    Caution,
    Bad,
}

impl Tone {
    fn glyph(self) -> String {
        match self {
            Self::Good => "✓".if_supports_color(Stream::Stdout, |g| g.green()).to_string(),
            Self::Caution => "⚠".if_supports_color(Stream::Stdout, |g| g.yellow()).to_string(),
            Self::Bad => "×".if_supports_color(Stream::Stderr, |g| g.red()).to_string(),
        }
    }
}

fn status(tone: Tone, message: &str) {
    match tone {
        Tone::Bad => eprintln!("  {} {message}", tone.glyph()),
        _ => println!("  {} {message}", tone.glyph()),
    }
}

/// A blank line, a bold title and a rule.
pub fn section(title: &str) {
    println!();
    println!("{}", title.if_supports_color(Stream::Stdout, |t| t.bold()));
    println!("{}", RULE.if_supports_color(Stream::Stdout, |r| r.dimmed()));
}

pub fn field(label: &str, value: impl Display) {
    let label = format!("{label:<width$}", width = LABEL_WIDTH);
    println!("  {} {value}", label.if_supports_color(Stream::Stdout, |l| l.dimmed()));
}

pub fn success(message: &str) {
    status(Tone::Good, message);
}

pub fn warning(message: &str) {
    status(Tone::Caution, message);
}

pub fn error(message: &str) {
    status(Tone::Bad, message);
}

pub fn note(message: &str) {
    println!("  {message}");
}

/// Render rows with rounded borders, indented to line up with fields.
pub fn table<T: Tabled>(rows: impl IntoIterator<Item = T>) {
    let rendered = Table::new(rows).with(Style::rounded()).to_string();
    for line in rendered.lines() {
        println!("  {line}");
    }
}

/// Begin a `Label... ` line finished by [`progress_done`].
pub fn progress(label: &str) {
    print!("  {label}... ");
    let _ = io::stdout().flush();
}

pub fn progress_done(ok: bool) {
    if ok {
        println!("{}", "ok".if_supports_color(Stream::Stdout, |s| s.green()));
    } else {
        println!("{}", "failed".if_supports_color(Stream::Stdout, |s| s.red()));
    }
}
