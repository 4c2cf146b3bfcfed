//! Terminal styling for user-facing output.
//!
//! Built on the anstyle ecosystem:
//! - anstream for auto-detecting color support (NO_COLOR, CLICOLOR_FORCE, TTY)
//! - anstyle for composable style constants
//!
//! All tool output goes to stdout via `println!`; errors are written to
//! stderr by `main` after propagation. Child process (git) output is never
//! echoed directly — it is surfaced through debug logging or error messages.

use anstyle::{AnsiColor, Color, Style};

/// Auto-detecting println that respects NO_COLOR, CLICOLOR_FORCE, and terminal capabilities
pub use anstream::println;

/// Auto-detecting eprintln that respects NO_COLOR, CLICOLOR_FORCE, and terminal capabilities
pub use anstream::eprintln;

/// Error style (red) - use as `{ERROR}text{ERROR:#}`
pub const ERROR: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red)));

/// Success style (green) - use as `{SUCCESS}text{SUCCESS:#}`
pub const SUCCESS: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green)));

/// Warning style (yellow) - use as `{WARNING}text{WARNING:#}`
pub const WARNING: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow)));

/// Hint style (dimmed) - use as `{HINT}text{HINT:#}`
pub const HINT: Style = Style::new().dimmed();

/// Progress style (cyan) - use as `{PROGRESS}text{PROGRESS:#}`
pub const PROGRESS: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan)));

/// Error symbol prefix
pub const ERROR_SYMBOL: &str = "✗";

/// Success symbol prefix
pub const SUCCESS_SYMBOL: &str = "✓";

/// Hint symbol prefix
pub const HINT_SYMBOL: &str = "↳";

/// Format an error line: red text behind the error symbol.
pub fn error_message(message: impl AsRef<str>) -> String {
    format!("{ERROR_SYMBOL} {ERROR}{}{ERROR:#}", message.as_ref())
}

/// Format a success line: green text behind the success symbol.
pub fn success_message(message: impl AsRef<str>) -> String {
    format!("{SUCCESS_SYMBOL} {SUCCESS}{}{SUCCESS:#}", message.as_ref())
}

/// Format a hint line: dimmed text behind the hint symbol.
pub fn hint_message(message: impl AsRef<str>) -> String {
    format!("{HINT_SYMBOL} {HINT}{}{HINT:#}", message.as_ref())
}

/// Format a progress line (cyan, no symbol).
pub fn progress_message(message: impl AsRef<str>) -> String {
    format!("{PROGRESS}{}{PROGRESS:#}", message.as_ref())
}

/// Indent multi-line content behind a dimmed gutter, for quoting git output
/// inside error messages.
pub fn format_with_gutter(content: &str) -> String {
    content
        .lines()
        .map(|line| format!("{HINT}│{HINT:#} {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
