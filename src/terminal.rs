//! Terminal output utilities

#![allow(dead_code)]

use console::style;

/// Print a plain user-facing notice
pub(crate) fn print_notice(message: &str) {
    println!("{}", message);
}

/// Print an error message to stderr
pub(crate) fn print_error(message: &str) {
    eprintln!("{}: {}", style("error").red().bold(), message);
}

/// Print a warning message to stderr
pub(crate) fn print_warning(message: &str) {
    eprintln!("{}: {}", style("warning").yellow().bold(), message);
}
