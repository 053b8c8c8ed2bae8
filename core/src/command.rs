//! Command declarations.
//!
//! A [`Command`] is the user-facing declaration form: a name, optional
//! aliases, option specs, nested subcommands, and opaque async callables
//! (handler and transform). Declarations are plain values assembled with
//! chainable builders, then frozen into a
//! [`CommandTree`](crate::CommandTree) which validates them.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::option::OptionSpec;
use crate::value::Values;

/// Error type user callbacks may return.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Result of a command handler invocation.
pub type HandlerResult = Result<(), HandlerError>;

/// Opaque async command handler, invoked with the parsed option map.
pub type Handler = Arc<dyn Fn(Values) -> BoxFuture<'static, HandlerResult> + Send + Sync>;

/// Opaque async transform applied to the option map before the handler runs.
pub type Transform =
    Arc<dyn Fn(Values) -> BoxFuture<'static, Result<Values, HandlerError>> + Send + Sync>;

/// A command declaration.
///
/// # Examples
///
/// ```
/// use cmdtree_core::{BooleanOpt, Command};
///
/// let migrate = Command::new("migrate")
///     .with_description("Apply pending migrations")
///     .with_option(BooleanOpt::new("dry-run"))
///     .with_handler(|values| async move {
///         assert!(values.contains("dry-run"));
///         Ok(())
///     });
///
/// let db = Command::new("db")
///     .with_alias("database")
///     .with_subcommand(migrate);
///
/// assert_eq!(db.name, "db");
/// assert_eq!(db.subcommands.len(), 1);
/// assert!(db.handler.is_none());
/// ```
#[derive(Clone, Default)]
pub struct Command {
    /// Name matched against command-path candidates; unique among siblings.
    pub name: String,
    /// Alternative names matched the same way.
    pub aliases: Vec<String>,
    /// Short description shown in help listings.
    pub description: Option<String>,
    /// Hidden commands are excluded from global help.
    pub hidden: bool,
    /// Option specs in declaration order.
    pub options: Vec<OptionSpec>,
    /// Child commands; drained into the arena at tree assembly.
    pub subcommands: Vec<Command>,
    /// Free-form metadata carried alongside the declaration.
    pub meta: serde_json::Value,
    /// Invoked with the parsed (and possibly transformed) option map.
    pub handler: Option<Handler>,
    /// Rewrites the option map before the handler runs.
    pub transform: Option<Transform>,
}

impl Command {
    /// Creates a command with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Adds an alias.
    pub fn with_alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Excludes the command from global help listings.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Appends an option spec.
    pub fn with_option(mut self, option: impl Into<OptionSpec>) -> Self {
        self.options.push(option.into());
        self
    }

    /// Appends a subcommand.
    pub fn with_subcommand(mut self, subcommand: Command) -> Self {
        self.subcommands.push(subcommand);
        self
    }

    /// Attaches free-form metadata.
    pub fn with_meta(mut self, meta: serde_json::Value) -> Self {
        self.meta = meta;
        self
    }

    /// Attaches the async handler.
    pub fn with_handler<F, Fut>(mut self, handler: F) -> Self
    where
        F: Fn(Values) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.handler = Some(Arc::new(move |values| Box::pin(handler(values))));
        self
    }

    /// Attaches the async option transform.
    pub fn with_transform<F, Fut>(mut self, transform: F) -> Self
    where
        F: Fn(Values) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Values, HandlerError>> + Send + 'static,
    {
        self.transform = Some(Arc::new(move |values| Box::pin(transform(values))));
        self
    }

    /// Option specs that fill by position, in declaration order.
    pub fn positional_options(&self) -> impl Iterator<Item = &OptionSpec> {
        self.options.iter().filter(|o| o.is_positional())
    }

    /// Option specs addressed by flag.
    pub fn named_options(&self) -> impl Iterator<Item = &OptionSpec> {
        self.options.iter().filter(|o| !o.is_positional())
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("description", &self.description)
            .field("hidden", &self.hidden)
            .field("options", &self.options)
            .field("subcommands", &self.subcommands)
            .field("meta", &self.meta)
            .field("handler", &self.handler.as_ref().map(|_| "<handler>"))
            .field("transform", &self.transform.as_ref().map(|_| "<transform>"))
            .finish()
    }
}
