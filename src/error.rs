//! Error types and helpers for user-friendly error messages
//!
//! Compile-time specification errors carry actionable hints so callers can
//! fix the offending node quickly. Parse errors stay `clap::Error` and
//! callback failures stay `anyhow::Error`; neither is wrapped here.

use console::style;
use thiserror::Error;

/// Structural errors detected while compiling a command tree
#[derive(Error, Debug)]
pub enum SpecError {
    /// Two sibling subcommands share a name
    #[error("Duplicate subcommand '{name}' under '{parent}'")]
    DuplicateSubcommand {
        parent: String,
        name: String,
        hint: String,
    },

    /// Two arguments on one node share a name
    #[error("Duplicate argument '{name}' on command '{command}'")]
    DuplicateArgument {
        command: String,
        name: String,
        hint: String,
    },
}

impl SpecError {
    /// Create a duplicate-subcommand error
    pub fn duplicate_subcommand(parent: impl Into<String>, name: impl Into<String>) -> Self {
        let parent = parent.into();
        let name = name.into();
        let hint = format!(
            "subcommand names must be unique among siblings; rename one of the '{}' entries under '{}'",
            name, parent
        );
        Self::DuplicateSubcommand { parent, name, hint }
    }

    /// Create a duplicate-argument error
    pub fn duplicate_argument(command: impl Into<String>, name: impl Into<String>) -> Self {
        let command = command.into();
        let name = name.into();
        let hint = format!(
            "argument names must be unique per command; '{}' is declared twice on '{}'",
            name, command
        );
        Self::DuplicateArgument { command, name, hint }
    }

    /// The actionable hint attached to this error
    pub fn hint(&self) -> &str {
        match self {
            Self::DuplicateSubcommand { hint, .. } | Self::DuplicateArgument { hint, .. } => hint,
        }
    }

    /// Display the error with formatting and its hint
    pub fn display_with_hints(&self) {
        eprintln!("\n{} {}", style("ERROR:").red().bold(), self);
        eprintln!("\n{} {}", style("HINT:").yellow().bold(), self.hint());
        eprintln!();
    }
}
