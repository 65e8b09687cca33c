//! Declarative command-tree specification types
//!
//! A [`CommandSpec`] is one node of the tree: parser-construction options,
//! arguments registered at that level, an optional callback, and named
//! children. Nodes are assembled with builder methods and compiled by
//! [`CommandTree::compile`](crate::CommandTree::compile).

use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use clap::{Arg, ArgAction, Command};

use crate::args::ParsedArgs;

/// Callback invoked when its node is the resolved command.
///
/// Receives the full parsed-attribute bag (depth markers included, which it
/// may ignore). Failures propagate unmodified through dispatch.
pub type Callback = Arc<dyn Fn(&ParsedArgs) -> Result<()> + Send + Sync>;

/// One node of the command tree.
///
/// A node may carry its own arguments and callback *and* have children: an
/// intermediate command stays usable standalone while being extendable.
#[derive(Clone)]
pub struct CommandSpec {
    pub(crate) meta: MetaOpts,
    pub(crate) args: Vec<ArgSpec>,
    pub(crate) callback: Option<Callback>,
    pub(crate) sub_commands: Vec<(String, CommandSpec)>,
}

impl CommandSpec {
    /// Create a node from its parser-construction options
    pub fn new(meta: MetaOpts) -> Self {
        Self {
            meta,
            args: Vec::new(),
            callback: None,
            sub_commands: Vec::new(),
        }
    }

    /// Register an argument on this node.
    ///
    /// Declaration order is registration order.
    pub fn arg(mut self, arg: ArgSpec) -> Self {
        self.args.push(arg);
        self
    }

    /// Attach the callback invoked when this node is the resolved command
    pub fn callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ParsedArgs) -> Result<()> + Send + Sync + 'static,
    {
        self.callback = Some(Arc::new(callback));
        self
    }

    /// Add a named child node.
    ///
    /// Declaration order is registration order. Sibling names must be unique;
    /// duplicates are rejected at compile time.
    pub fn sub_command(mut self, name: impl Into<String>, spec: CommandSpec) -> Self {
        self.sub_commands.push((name.into(), spec));
        self
    }
}

impl fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSpec")
            .field("meta", &self.meta)
            .field("args", &self.args)
            .field("callback", &self.callback.is_some())
            .field("sub_commands", &self.sub_commands)
            .finish()
    }
}

/// Parser-construction options applied to a node's `clap::Command`
#[derive(Clone, Debug, Default)]
pub struct MetaOpts {
    pub(crate) prog: Option<String>,
    pub(crate) about: Option<String>,
    pub(crate) long_about: Option<String>,
    pub(crate) version: Option<String>,
}

impl MetaOpts {
    /// Create empty options (valid; applies no settings)
    pub fn new() -> Self {
        Self::default()
    }

    /// Program name shown in help and usage.
    ///
    /// Only honored on the root node; subcommand nodes are named by their
    /// `sub_command` key.
    pub fn prog(mut self, prog: impl Into<String>) -> Self {
        self.prog = Some(prog.into());
        self
    }

    /// Short description shown in help
    pub fn about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    /// Long description shown in `--help`
    pub fn long_about(mut self, long_about: impl Into<String>) -> Self {
        self.long_about = Some(long_about.into());
        self
    }

    /// Version string reported by `--version`
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub(crate) fn apply(&self, mut command: Command) -> Command {
        if let Some(about) = &self.about {
            command = command.about(about.clone());
        }
        if let Some(long_about) = &self.long_about {
            command = command.long_about(long_about.clone());
        }
        if let Some(version) = &self.version {
            command = command.version(version.clone());
        }
        command
    }
}

/// How an argument consumes tokens
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArgKind {
    /// Boolean switch, true when present
    Flag,
    /// Single value
    Value,
    /// Repeatable, collects every occurrence
    Values,
}

/// Explicit construction options for one argument.
///
/// An argument without a short or long form is positional.
#[derive(Clone, Debug)]
pub struct ArgSpec {
    pub(crate) name: String,
    pub(crate) kind: ArgKind,
    pub(crate) short: Option<char>,
    pub(crate) long: Option<String>,
    pub(crate) help: Option<String>,
    pub(crate) required: bool,
    pub(crate) default: Option<String>,
    pub(crate) value_name: Option<String>,
}

impl ArgSpec {
    fn with_kind(name: impl Into<String>, kind: ArgKind) -> Self {
        Self {
            name: name.into(),
            kind,
            short: None,
            long: None,
            help: None,
            required: false,
            default: None,
            value_name: None,
        }
    }

    /// A positional argument taking a single value
    pub fn positional(name: impl Into<String>) -> Self {
        Self::with_kind(name, ArgKind::Value)
    }

    /// A named option (`--name <VALUE>`) taking a single value
    pub fn option(name: impl Into<String>) -> Self {
        let name = name.into();
        let mut spec = Self::with_kind(name.clone(), ArgKind::Value);
        spec.long = Some(name);
        spec
    }

    /// A boolean switch (`--name`)
    pub fn flag(name: impl Into<String>) -> Self {
        let name = name.into();
        let mut spec = Self::with_kind(name.clone(), ArgKind::Flag);
        spec.long = Some(name);
        spec
    }

    /// Set the short flag form
    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Override the long flag form
    pub fn long(mut self, long: impl Into<String>) -> Self {
        self.long = Some(long.into());
        self
    }

    /// Help text shown next to the argument
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Require the argument to be supplied
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Default value used when the argument is absent
    pub fn default_value(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Placeholder name shown in help (`--name <PLACEHOLDER>`)
    pub fn value_name(mut self, value_name: impl Into<String>) -> Self {
        self.value_name = Some(value_name.into());
        self
    }

    /// Collect every occurrence instead of a single value
    pub fn multiple(mut self) -> Self {
        self.kind = ArgKind::Values;
        self
    }

    /// Forward the options to a `clap::Arg`, unchanged
    pub(crate) fn to_clap(&self) -> Arg {
        let mut arg = Arg::new(self.name.clone());
        if let Some(short) = self.short {
            arg = arg.short(short);
        }
        if let Some(long) = &self.long {
            arg = arg.long(long.clone());
        }
        arg = match self.kind {
            ArgKind::Flag => arg.action(ArgAction::SetTrue),
            ArgKind::Value => arg.action(ArgAction::Set),
            ArgKind::Values => arg.action(ArgAction::Append),
        };
        if let Some(help) = &self.help {
            arg = arg.help(help.clone());
        }
        if self.required {
            arg = arg.required(true);
        }
        if let Some(default) = &self.default {
            arg = arg.default_value(default.clone());
        }
        if let Some(value_name) = &self.value_name {
            arg = arg.value_name(value_name.clone());
        }
        arg
    }
}
