//! Build tree-like command structures from a declarative specification.
//!
//! `cmdtree` compiles a nested [`CommandSpec`] into a clap parser hierarchy
//! together with a dispatch table mapping fully-qualified dotted command
//! names (`root.remote.add`) to callbacks. After parsing a token list, the
//! tree resolves which node was invoked and calls its callback; a resolved
//! node without one prints `Nothing to do here.` and returns cleanly.
//!
//! The argument-parsing engine itself is clap: flag syntax, value coercion,
//! and help rendering are its job. This crate owns only the tree-to-parser
//! compilation and the reverse lookup from a parse result to a callback.
//!
//! # Example
//!
//! ```
//! use cmdtree::{ArgSpec, CommandSpec, CommandTree, Dispatch, MetaOpts};
//!
//! let spec = CommandSpec::new(MetaOpts::new().prog("demo").about("demo tool"))
//!     .sub_command(
//!         "greet",
//!         CommandSpec::new(MetaOpts::new().about("say hello"))
//!             .arg(ArgSpec::positional("name").required(true))
//!             .callback(|args| {
//!                 println!("hello {}", args.get_str("name").unwrap_or("world"));
//!                 Ok(())
//!             }),
//!     );
//!
//! let tree = CommandTree::compile(&spec)?;
//! let parsed = tree.try_parse_from(["greet", "ferris"])?;
//! assert_eq!(tree.command_fullname(&parsed), "root.greet");
//! assert_eq!(tree.dispatch(&parsed)?, Dispatch::Invoked);
//! # Ok::<(), anyhow::Error>(())
//! ```

mod args;
mod dispatch;
mod error;
mod spec;
mod terminal;
mod tree;

pub use args::{ArgValue, ParsedArgs};
pub use dispatch::Dispatch;
pub use error::SpecError;
pub use spec::{ArgKind, ArgSpec, Callback, CommandSpec, MetaOpts};
pub use tree::{CommandTree, ROOT_NAME};
