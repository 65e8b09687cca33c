//! Tree compiler: `CommandSpec` → clap parser hierarchy + callback map
//!
//! Compilation is a pre-order, depth-first walk. Every node becomes a
//! `clap::Command`; every node declaring a callback is recorded under its
//! fully-qualified dotted name (`root.remote.add`). The compiled tree owns
//! everything dispatch needs; there is no global state.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use clap::Command;

use crate::error::SpecError;
use crate::spec::{ArgKind, Callback, CommandSpec};

/// Name of the implicit root node, the first segment of every
/// fully-qualified command name
pub const ROOT_NAME: &str = "root";

/// A compiled command tree: the clap parser hierarchy, the callback map,
/// and the per-node argument index used to flatten parse results.
///
/// Immutable after [`compile`](Self::compile); parsing and dispatch borrow
/// it, so one tree serves any number of invocations.
pub struct CommandTree {
    pub(crate) command: Command,
    pub(crate) callbacks: HashMap<String, Callback>,
    pub(crate) arg_index: HashMap<String, Vec<(String, ArgKind)>>,
}

impl std::fmt::Debug for CommandTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandTree")
            .field("command", &self.command)
            .field("callbacks", &self.callbacks.keys())
            .field("arg_index", &self.arg_index)
            .finish()
    }
}

impl CommandTree {
    /// Compile a specification into a ready-to-parse tree.
    ///
    /// Borrows the spec; callbacks are `Arc`-shared, so compiling the same
    /// spec again yields an independent tree with identical callback
    /// identities. Fails on duplicate sibling subcommand names or duplicate
    /// argument names on one node.
    ///
    /// The root command parses bare token lists (no leading program name),
    /// mirroring how subcommand tokens are written on the command line.
    pub fn compile(spec: &CommandSpec) -> Result<Self, SpecError> {
        let mut callbacks = HashMap::new();
        let mut arg_index = HashMap::new();

        let root_name = spec
            .meta
            .prog
            .clone()
            .unwrap_or_else(|| ROOT_NAME.to_string());
        let root = Command::new(root_name).no_binary_name(true);
        let command = build_node(root, spec, ROOT_NAME, &mut callbacks, &mut arg_index)?;

        Ok(Self {
            command,
            callbacks,
            arg_index,
        })
    }

    /// The compiled clap command, e.g. for rendering help from the
    /// embedding application
    pub fn command(&self) -> &Command {
        &self.command
    }

    /// Fully-qualified names that have a registered callback
    pub fn callback_names(&self) -> impl Iterator<Item = &str> {
        self.callbacks.keys().map(String::as_str)
    }
}

fn build_node(
    mut command: Command,
    spec: &CommandSpec,
    fullname: &str,
    callbacks: &mut HashMap<String, Callback>,
    arg_index: &mut HashMap<String, Vec<(String, ArgKind)>>,
) -> Result<Command, SpecError> {
    command = spec.meta.apply(command);

    // register arguments in declaration order
    let mut declared: Vec<(String, ArgKind)> = Vec::with_capacity(spec.args.len());
    for arg in &spec.args {
        if declared.iter().any(|(name, _)| name == &arg.name) {
            return Err(SpecError::duplicate_argument(fullname, &arg.name));
        }
        command = command.arg(arg.to_clap());
        declared.push((arg.name.clone(), arg.kind));
    }
    arg_index.insert(fullname.to_string(), declared);

    if let Some(callback) = &spec.callback {
        callbacks.insert(fullname.to_string(), Arc::clone(callback));
    }

    // leaf: nothing left to descend into
    if spec.sub_commands.is_empty() {
        return Ok(command);
    }

    let mut seen: HashSet<&str> = HashSet::with_capacity(spec.sub_commands.len());
    for (name, sub_spec) in &spec.sub_commands {
        if !seen.insert(name.as_str()) {
            return Err(SpecError::duplicate_subcommand(fullname, name));
        }
        let sub_fullname = format!("{}.{}", fullname, name);
        let sub_command = build_node(
            Command::new(name.clone()),
            sub_spec,
            &sub_fullname,
            callbacks,
            arg_index,
        )?;
        command = command.subcommand(sub_command);
    }

    Ok(command)
}
