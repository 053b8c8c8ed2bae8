//! Core data model and definition-time validation for command trees.
//!
//! This crate defines the declaration types for a command-line interpreter:
//!
//! - [`Command`] — a command declaration: name, aliases, options, nested
//!   subcommands, visibility, metadata, and opaque async callables.
//! - [`OptionSpec`] — a closed set of option kinds ([`StringOpt`],
//!   [`NumberOpt`], [`BooleanOpt`], [`PositionalOpt`]), each built with pure
//!   chainable constructors.
//! - [`CommandTree`] — the validated, frozen arena with parent/child links
//!   as indices, safe to share across invocations.
//! - [`Value`]/[`Values`] — the coerced, typed option map a parse produces.
//! - [`CommandDescription`] — serializable introspection of a validated
//!   tree.
//!
//! Validation ([`validate_forest`], run automatically by
//! [`CommandTree::build`]) catches structural errors — sibling name/alias
//! collisions, reserved names, duplicate or reserved flags, positional
//! options on commands that own subcommands — before any token is parsed.
//!
//! # Example
//!
//! ```
//! use cmdtree_core::*;
//!
//! let tree = CommandTree::build(vec![
//!     Command::new("db")
//!         .with_description("Database maintenance")
//!         .with_subcommand(
//!             Command::new("migrate")
//!                 .with_option(BooleanOpt::new("dry-run"))
//!                 .with_option(NumberOpt::new("steps").integer_only().with_min(1.0))
//!                 .with_handler(|values| async move {
//!                     let _ = values.bool("dry-run");
//!                     Ok(())
//!                 }),
//!         ),
//! ])
//! .unwrap();
//!
//! let db = tree.find_in(None, "db").unwrap();
//! let migrate = tree.find_in(Some(db), "migrate").unwrap();
//! assert_eq!(tree.path(migrate), "db.migrate");
//! ```
//!
//! Token scanning, command resolution, and option parsing live in the
//! `cmdtree-engine` crate; this crate holds only the data model those
//! phases consume.

mod command;
mod describe;
mod option;
mod tree;
mod validate;
mod value;

pub use command::{Command, Handler, HandlerError, HandlerResult, Transform};
pub use describe::CommandDescription;
pub use option::{
    BooleanOpt, FLAG_PREFIX, HELP_FLAGS, NumberOpt, OptionSpec, PositionalOpt, StringOpt,
    VERSION_FLAGS, canonical_flag,
};
pub use tree::{CommandId, CommandTree};
pub use validate::{PATH_SEPARATOR, ValidationError, validate_forest};
pub use value::{Value, Values, parse_bool_literal};
