//! The validated, frozen command arena.
//!
//! [`CommandTree::build`] validates a declaration forest and assembles it
//! into an arena: every command becomes a node holding its declaration plus
//! index links to its parent and children. The parent link is assigned
//! exactly once, top-down, and the arena is immutable afterwards, so the
//! tree can be shared across any number of independent invocations.

use crate::command::Command;
use crate::validate::{PATH_SEPARATOR, ValidationError, validate_forest};

/// Index of a command node inside a [`CommandTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandId(usize);

#[derive(Debug, Clone)]
struct Node {
    command: Command,
    parent: Option<CommandId>,
    children: Vec<CommandId>,
}

/// A validated command forest with parent/child links as arena indices.
///
/// # Examples
///
/// ```
/// use cmdtree_core::{Command, CommandTree};
///
/// let tree = CommandTree::build(vec![
///     Command::new("db")
///         .with_alias("database")
///         .with_subcommand(Command::new("migrate")),
/// ])
/// .unwrap();
///
/// let db = tree.find_in(None, "database").unwrap();
/// let migrate = tree.find_in(Some(db), "migrate").unwrap();
/// assert_eq!(tree.path(migrate), "db.migrate");
/// assert_eq!(tree.parent(migrate), Some(db));
/// ```
#[derive(Debug, Clone)]
pub struct CommandTree {
    nodes: Vec<Node>,
    roots: Vec<CommandId>,
}

impl CommandTree {
    /// Validates `forest` and freezes it into an arena.
    pub fn build(forest: Vec<Command>) -> Result<Self, ValidationError> {
        validate_forest(&forest)?;
        let mut tree = Self {
            nodes: Vec::new(),
            roots: Vec::new(),
        };
        for command in forest {
            let id = tree.insert(command, None);
            tree.roots.push(id);
        }
        Ok(tree)
    }

    fn insert(&mut self, mut command: Command, parent: Option<CommandId>) -> CommandId {
        let subcommands = std::mem::take(&mut command.subcommands);
        let id = CommandId(self.nodes.len());
        self.nodes.push(Node {
            command,
            parent,
            children: Vec::new(),
        });
        for subcommand in subcommands {
            let child = self.insert(subcommand, Some(id));
            self.nodes[id.0].children.push(child);
        }
        id
    }

    /// Top-level command ids in declaration order.
    pub fn roots(&self) -> &[CommandId] {
        &self.roots
    }

    /// The command declaration stored at `id`.
    pub fn command(&self, id: CommandId) -> &Command {
        &self.nodes[id.0].command
    }

    /// Child ids of `id` in declaration order.
    pub fn children(&self, id: CommandId) -> &[CommandId] {
        &self.nodes[id.0].children
    }

    /// Parent id of `id`, `None` for roots.
    pub fn parent(&self, id: CommandId) -> Option<CommandId> {
        self.nodes[id.0].parent
    }

    /// Returns `true` when `id` has no subcommands.
    pub fn is_leaf(&self, id: CommandId) -> bool {
        self.nodes[id.0].children.is_empty()
    }

    /// Total number of commands in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` for a tree with no commands.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Dotted path of `id`, walking the parent links.
    pub fn path(&self, id: CommandId) -> String {
        let mut segments = vec![self.command(id).name.as_str()];
        let mut cursor = self.parent(id);
        while let Some(parent) = cursor {
            segments.push(self.command(parent).name.as_str());
            cursor = self.parent(parent);
        }
        segments.reverse();
        segments.join(PATH_SEPARATOR)
    }

    /// Finds a command by exact name or alias among the roots (`scope` =
    /// `None`) or among the children of `scope`.
    pub fn find_in(&self, scope: Option<CommandId>, text: &str) -> Option<CommandId> {
        let ids = match scope {
            Some(parent) => self.children(parent),
            None => self.roots(),
        };
        ids.iter().copied().find(|id| {
            let command = self.command(*id);
            command.name == text || command.aliases.iter().any(|alias| alias == text)
        })
    }
}
