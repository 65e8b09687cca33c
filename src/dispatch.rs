//! Dispatcher: parsed attributes → callback invocation
//!
//! Rebuilds the fully-qualified name of the invoked command from the depth
//! markers, then looks it up in the compiled callback map. A resolved path
//! with no callback is a deliberate no-op (a pure grouping node), reported
//! to the user and returned cleanly. Stateless per invocation.

use std::ffi::OsString;

use anyhow::Result;

use crate::args::{flatten_matches, ParsedArgs};
use crate::terminal;
use crate::tree::{CommandTree, ROOT_NAME};

/// Outcome of one dispatch
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// The resolved command's callback ran successfully
    Invoked,
    /// The resolved command has no callback; the user was notified
    NothingToDo,
}

impl CommandTree {
    /// Parse a token list into the flat attribute bag.
    ///
    /// Tokens exclude the program name (`["remote", "add", "origin"]`).
    /// clap errors (unknown flags, missing required arguments, help and
    /// version requests) pass through untranslated.
    pub fn try_parse_from<I, T>(&self, tokens: I) -> Result<ParsedArgs, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.command.clone().try_get_matches_from(tokens)?;
        Ok(flatten_matches(&matches, &self.arg_index))
    }

    /// Fully-qualified dotted name of the invoked command.
    ///
    /// Joins `"root"` with the selected subcommand names in ascending depth
    /// order; levels where no subcommand was chosen contribute nothing, so
    /// an invocation terminating at a shallower node resolves to that node.
    pub fn command_fullname(&self, parsed: &ParsedArgs) -> String {
        let mut fullname = String::from(ROOT_NAME);
        for name in parsed.selected_path() {
            fullname.push('.');
            fullname.push_str(name);
        }
        fullname
    }

    /// Invoke the callback registered for the resolved command.
    ///
    /// Without a registered callback this prints `Nothing to do here.` and
    /// returns [`Dispatch::NothingToDo`] — a handled state, not an error.
    /// Callback failures propagate unmodified.
    pub fn dispatch(&self, parsed: &ParsedArgs) -> Result<Dispatch> {
        let fullname = self.command_fullname(parsed);
        match self.callbacks.get(&fullname) {
            Some(callback) => {
                callback(parsed)?;
                Ok(Dispatch::Invoked)
            }
            None => {
                terminal::print_notice("Nothing to do here.");
                Ok(Dispatch::NothingToDo)
            }
        }
    }

    /// Parse then dispatch in one step
    pub fn run<I, T>(&self, tokens: I) -> Result<Dispatch>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let parsed = self.try_parse_from(tokens)?;
        self.dispatch(&parsed)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use anyhow::bail;

    use super::*;
    use crate::spec::{ArgSpec, CommandSpec, MetaOpts};

    fn counter_callback(counter: &Arc<AtomicUsize>) -> impl Fn(&ParsedArgs) -> Result<()> {
        let counter = Arc::clone(counter);
        move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    /// root → a (CA), root → b (no callback) → c (CC)
    fn depth_spec(ca: &Arc<AtomicUsize>, cc: &Arc<AtomicUsize>) -> CommandSpec {
        CommandSpec::new(MetaOpts::new())
            .sub_command(
                "a",
                CommandSpec::new(MetaOpts::new()).callback(counter_callback(ca)),
            )
            .sub_command(
                "b",
                CommandSpec::new(MetaOpts::new()).sub_command(
                    "c",
                    CommandSpec::new(MetaOpts::new()).callback(counter_callback(cc)),
                ),
            )
    }

    #[test]
    fn test_fullname_resolution() {
        let ca = Arc::new(AtomicUsize::new(0));
        let cc = Arc::new(AtomicUsize::new(0));
        let tree = CommandTree::compile(&depth_spec(&ca, &cc)).unwrap();

        let parsed = tree.try_parse_from(["a"]).unwrap();
        assert_eq!(tree.command_fullname(&parsed), "root.a");

        let parsed = tree.try_parse_from(["b", "c"]).unwrap();
        assert_eq!(tree.command_fullname(&parsed), "root.b.c");

        let parsed = tree.try_parse_from(Vec::<&str>::new()).unwrap();
        assert_eq!(tree.command_fullname(&parsed), "root");
    }

    #[test]
    fn test_depth_scaling_example() {
        let ca = Arc::new(AtomicUsize::new(0));
        let cc = Arc::new(AtomicUsize::new(0));
        let tree = CommandTree::compile(&depth_spec(&ca, &cc)).unwrap();

        assert_eq!(tree.run(["a"]).unwrap(), Dispatch::Invoked);
        assert_eq!(ca.load(Ordering::SeqCst), 1);
        assert_eq!(cc.load(Ordering::SeqCst), 0);

        assert_eq!(tree.run(["b", "c"]).unwrap(), Dispatch::Invoked);
        assert_eq!(cc.load(Ordering::SeqCst), 1);

        // b itself has no callback
        assert_eq!(tree.run(["b"]).unwrap(), Dispatch::NothingToDo);
        assert_eq!(ca.load(Ordering::SeqCst), 1);
        assert_eq!(cc.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_grouping_node_without_callback_is_noop() {
        let leaf = Arc::new(AtomicUsize::new(0));
        let spec = CommandSpec::new(MetaOpts::new()).sub_command(
            "remote",
            CommandSpec::new(MetaOpts::new()).sub_command(
                "add",
                CommandSpec::new(MetaOpts::new()).callback(counter_callback(&leaf)),
            ),
        );
        let tree = CommandTree::compile(&spec).unwrap();

        assert_eq!(tree.run(["remote"]).unwrap(), Dispatch::NothingToDo);
        assert_eq!(leaf.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_spec_without_callbacks_never_errors() {
        let spec = CommandSpec::new(MetaOpts::new())
            .sub_command("x", CommandSpec::new(MetaOpts::new()))
            .sub_command(
                "y",
                CommandSpec::new(MetaOpts::new())
                    .sub_command("z", CommandSpec::new(MetaOpts::new())),
            );
        let tree = CommandTree::compile(&spec).unwrap();

        for tokens in [vec![], vec!["x"], vec!["y"], vec!["y", "z"]] {
            assert_eq!(tree.run(tokens).unwrap(), Dispatch::NothingToDo);
        }
    }

    #[test]
    fn test_root_callback_on_empty_tokens() {
        let hits = Arc::new(AtomicUsize::new(0));
        let spec = CommandSpec::new(MetaOpts::new()).callback(counter_callback(&hits));
        let tree = CommandTree::compile(&spec).unwrap();

        assert_eq!(tree.run(Vec::<&str>::new()).unwrap(), Dispatch::Invoked);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_callback_receives_parsed_values() {
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_in_callback = Arc::clone(&seen);
        let spec = CommandSpec::new(MetaOpts::new())
            .arg(ArgSpec::flag("verbose").short('v'))
            .sub_command(
                "build",
                CommandSpec::new(MetaOpts::new())
                    .arg(ArgSpec::positional("target").required(true))
                    .arg(ArgSpec::option("jobs").default_value("1"))
                    .arg(ArgSpec::option("define").short('D').multiple())
                    .callback(move |args| {
                        assert!(args.get_flag("verbose"));
                        assert_eq!(args.get_str("target"), Some("android"));
                        assert_eq!(args.get_str("jobs"), Some("4"));
                        assert_eq!(
                            args.get_many("define"),
                            Some(&["A=1".to_string(), "B=2".to_string()][..])
                        );
                        assert_eq!(args.selected(0), Some("build"));
                        seen_in_callback.fetch_add(1, Ordering::SeqCst);
                        Ok(())
                    }),
            );
        let tree = CommandTree::compile(&spec).unwrap();

        let outcome = tree
            .run([
                "--verbose", "build", "android", "--jobs", "4", "-D", "A=1", "-D", "B=2",
            ])
            .unwrap();
        assert_eq!(outcome, Dispatch::Invoked);
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_callback_failure_propagates() {
        let spec = CommandSpec::new(MetaOpts::new()).sub_command(
            "fail",
            CommandSpec::new(MetaOpts::new()).callback(|_| bail!("boom")),
        );
        let tree = CommandTree::compile(&spec).unwrap();

        let err = tree.run(["fail"]).unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_parse_error_passes_through() {
        let spec = CommandSpec::new(MetaOpts::new())
            .sub_command("known", CommandSpec::new(MetaOpts::new()));
        let tree = CommandTree::compile(&spec).unwrap();

        let err = tree.try_parse_from(["unknown"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidSubcommand);
    }

    #[test]
    fn test_markers_order_numerically_past_nine_levels() {
        // 12 nested levels; lexicographic marker ordering would interleave
        // depth 10 and 11 before depth 2 and corrupt the path
        let hits = Arc::new(AtomicUsize::new(0));
        let names: Vec<String> = (0..12).map(|i| format!("lvl{}", i)).collect();

        let mut spec = CommandSpec::new(MetaOpts::new()).callback(counter_callback(&hits));
        for name in names.iter().rev() {
            spec = CommandSpec::new(MetaOpts::new()).sub_command(name.clone(), spec);
        }
        let tree = CommandTree::compile(&spec).unwrap();

        let tokens: Vec<&str> = names.iter().map(String::as_str).collect();
        let parsed = tree.try_parse_from(tokens).unwrap();
        assert_eq!(
            tree.command_fullname(&parsed),
            format!("root.{}", names.join("."))
        );
        assert_eq!(tree.dispatch(&parsed).unwrap(), Dispatch::Invoked);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_deeper_level_wins_shared_argument_name() {
        let spec = CommandSpec::new(MetaOpts::new())
            .arg(ArgSpec::option("config").default_value("root.toml"))
            .sub_command(
                "run",
                CommandSpec::new(MetaOpts::new())
                    .arg(ArgSpec::option("config").default_value("run.toml")),
            );
        let tree = CommandTree::compile(&spec).unwrap();

        let parsed = tree.try_parse_from(["run"]).unwrap();
        assert_eq!(parsed.get_str("config"), Some("run.toml"));

        let parsed = tree.try_parse_from(Vec::<&str>::new()).unwrap();
        assert_eq!(parsed.get_str("config"), Some("root.toml"));
    }
}
