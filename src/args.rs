//! Flat parsed-attribute bag handed to callbacks
//!
//! clap reports a parse as a chain of nested `ArgMatches`, one per selected
//! subcommand. [`flatten_matches`] walks that chain into a single
//! [`ParsedArgs`]: one flat value map plus a depth marker per nesting level
//! recording which subcommand was selected there. Markers are keyed by the
//! integer depth, so path reconstruction orders numerically at any depth.

use std::collections::{BTreeMap, HashMap};

use clap::ArgMatches;

use crate::spec::ArgKind;
use crate::tree::ROOT_NAME;

/// A parsed argument value
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArgValue {
    /// Boolean switch state
    Flag(bool),
    /// Single value
    Single(String),
    /// Every occurrence of a repeatable argument, in token order
    Many(Vec<String>),
}

impl ArgValue {
    /// The value as a string, if it is a single value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Single(value) => Some(value),
            _ => None,
        }
    }

    /// The value as a switch state, if it is a flag
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(state) => Some(*state),
            _ => None,
        }
    }

    /// The collected values, if it is a repeatable argument
    pub fn as_many(&self) -> Option<&[String]> {
        match self {
            Self::Many(values) => Some(values),
            _ => None,
        }
    }
}

/// Flat attribute bag produced from one parse.
///
/// All levels of the selected path share one namespace: an argument name
/// declared on both a node and a deeper selected child ends up with the
/// deeper node's value.
#[derive(Clone, Debug, Default)]
pub struct ParsedArgs {
    pub(crate) values: HashMap<String, ArgValue>,
    pub(crate) markers: BTreeMap<usize, String>,
}

impl ParsedArgs {
    /// Look up an argument by name
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
    }

    /// Single string value of an argument, `None` when absent or not single
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ArgValue::as_str)
    }

    /// Switch state of a flag, `false` when absent
    pub fn get_flag(&self, name: &str) -> bool {
        self.get(name).and_then(ArgValue::as_flag).unwrap_or(false)
    }

    /// Collected values of a repeatable argument
    pub fn get_many(&self, name: &str) -> Option<&[String]> {
        self.get(name).and_then(ArgValue::as_many)
    }

    /// Subcommand name selected at the given nesting level, depth 0 being
    /// the root's immediate children
    pub fn selected(&self, depth: usize) -> Option<&str> {
        self.markers.get(&depth).map(String::as_str)
    }

    /// Selected subcommand names from the shallowest level down
    pub fn selected_path(&self) -> impl Iterator<Item = &str> {
        self.markers.values().map(String::as_str)
    }

    /// Number of nesting levels at which a subcommand was selected
    pub fn depth(&self) -> usize {
        self.markers.len()
    }
}

/// Flatten clap's nested matches into one attribute bag.
///
/// `arg_index` maps each node's fully-qualified name to its declared
/// arguments; only those are extracted at each level.
pub(crate) fn flatten_matches(
    root: &ArgMatches,
    arg_index: &HashMap<String, Vec<(String, ArgKind)>>,
) -> ParsedArgs {
    let mut parsed = ParsedArgs::default();
    let mut fullname = String::from(ROOT_NAME);
    let mut matches = root;
    let mut depth = 0usize;

    loop {
        if let Some(declared) = arg_index.get(&fullname) {
            for (name, kind) in declared {
                match kind {
                    ArgKind::Flag => {
                        parsed
                            .values
                            .insert(name.clone(), ArgValue::Flag(matches.get_flag(name)));
                    }
                    ArgKind::Value => {
                        if let Some(value) = matches.get_one::<String>(name) {
                            parsed
                                .values
                                .insert(name.clone(), ArgValue::Single(value.clone()));
                        }
                    }
                    ArgKind::Values => {
                        if let Some(values) = matches.get_many::<String>(name) {
                            parsed
                                .values
                                .insert(name.clone(), ArgValue::Many(values.cloned().collect()));
                        }
                    }
                }
            }
        }

        match matches.subcommand() {
            Some((name, sub_matches)) => {
                parsed.markers.insert(depth, name.to_string());
                fullname.push('.');
                fullname.push_str(name);
                depth += 1;
                matches = sub_matches;
            }
            None => break,
        }
    }

    parsed
}
