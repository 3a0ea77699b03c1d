//! Terminal output for the autoheader CLI.
//!
//! Status lines go to stdout with [`console`] styling; styling is dropped
//! automatically when stdout is not a terminal. `preview` bypasses these
//! helpers so its output stays pipeable.

use console::{style, StyledObject};

enum Status {
    Ok,
    Warn,
    Error,
}

impl Status {
    fn tag(&self) -> StyledObject<&'static str> {
        match self {
            Status::Ok => style("[OK]").green().bold(),
            Status::Warn => style("[WARN]").yellow().bold(),
            Status::Error => style("[ERROR]").red().bold(),
        }
    }
}

fn print_status(status: Status, text: &str) {
    println!("{} {}", status.tag(), text);
}

/// Print a bold cyan title followed by a dim rule of the same width.
pub fn print_header(text: &str) {
    println!("\n{}", style(text).bold().cyan());
    println!("{}", style("─".repeat(console::measure_text_width(text))).dim());
}

pub fn print_success(text: &str) {
    print_status(Status::Ok, text);
}

pub fn print_warning(text: &str) {
    print_status(Status::Warn, text);
}

pub fn print_error(text: &str) {
    print_status(Status::Error, text);
}

/// Print a progress step indicator like `[1/2] Loading settings`.
pub fn print_step(step: u32, total: u32, text: &str) {
    println!("{} {}", style(format!("[{step}/{total}]")).dim(), text);
}

/// Print an indented `key: value` line with the key dimmed.
pub fn print_key_value(key: &str, value: &str) {
    let value = if value.is_empty() {
        style("(empty)").italic().dim().to_string()
    } else {
        value.to_string()
    };
    println!("  {}: {}", style(key).dim(), value);
}
