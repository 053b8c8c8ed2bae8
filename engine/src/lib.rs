//! Command resolution, option parsing, and the execution pipeline.
//!
//! This crate turns a raw token stream and a frozen
//! [`CommandTree`](cmdtree_core::CommandTree) into a handler invocation:
//!
//! - [`scan_candidates`] — extracts the tokens that could name a
//!   command-path segment, each tagged with its position.
//! - [`resolve`] — recursively matches candidates against the tree,
//!   removing consumed command-path tokens from the stream.
//! - [`parse_options`] — classifies the remaining tokens into
//!   positional/named options, coerces and validates them, and aggregates
//!   errors over the whole pass.
//! - [`Runner`] — orchestrates the above plus global help/version
//!   short-circuiting and the before-hook → transform → handler →
//!   after-hook sequence, reporting presentation to an injected
//!   [`EventHandler`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use cmdtree_core::{BooleanOpt, Command, CommandTree};
//! use cmdtree_engine::{Outcome, Runner, SilentEvents};
//!
//! # futures::executor::block_on(async {
//! let tree = CommandTree::build(vec![
//!     Command::new("db").with_subcommand(
//!         Command::new("migrate")
//!             .with_option(BooleanOpt::new("dry-run"))
//!             .with_handler(|values| async move {
//!                 assert_eq!(values.bool("dry-run"), Some(true));
//!                 Ok(())
//!             }),
//!     ),
//! ])
//! .unwrap();
//!
//! let runner = Runner::new(tree, Arc::new(SilentEvents));
//! let tokens: Vec<String> = ["db", "migrate", "--dry-run"]
//!     .iter()
//!     .map(ToString::to_string)
//!     .collect();
//!
//! let outcome = runner.dispatch(&tokens).await.unwrap();
//! assert!(matches!(outcome, Outcome::Completed { .. }));
//! # });
//! ```
//!
//! For test harnesses, [`simulate`] runs the option parser alone against a
//! shell-style argument string and returns the outcome as data.

mod error;
mod events;
mod options;
mod pipeline;
mod resolve;
mod scan;
mod testkit;
mod tokenize;

pub use error::{MissingOption, RunError};
pub use events::{ConsoleEvents, EventHandler, SilentEvents};
pub use options::{ParseOutcome, parse_options};
pub use pipeline::{Hook, Outcome, Runner};
pub use resolve::{Resolution, resolve};
pub use scan::{Candidate, scan_candidates};
pub use testkit::{Trial, simulate};
pub use tokenize::split_line;
