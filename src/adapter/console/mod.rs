//! Operator console adapter for interactive terminals.

mod format;
mod terminal;

pub use format::{display_name, parse_command, usd, Command};
pub use terminal::TerminalConsole;
