//! Presentation events.
//!
//! The pipeline never prints; it reports help and version requests to an
//! [`EventHandler`] injected at construction time. The engine works
//! identically with a no-op handler, which is what the tests use.

use cmdtree_core::{CommandDescription, OptionSpec};

/// Receiver for the pipeline's presentation events.
pub trait EventHandler: Send + Sync {
    /// Global help was requested; `commands` holds the visible roots.
    fn global_help(&self, commands: &[CommandDescription]);

    /// Help was requested for one resolved command.
    fn command_help(&self, command: &CommandDescription);

    /// The program version was requested.
    fn version(&self);
}

/// Event handler that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentEvents;

impl EventHandler for SilentEvents {
    fn global_help(&self, _commands: &[CommandDescription]) {}

    fn command_help(&self, _command: &CommandDescription) {}

    fn version(&self) {}
}

/// Console renderer for the outermost composition point.
///
/// Rendering is deliberately minimal: one line per command, one line per
/// option. Anything richer belongs to the embedding application.
#[derive(Debug, Clone)]
pub struct ConsoleEvents {
    program: String,
    version: String,
}

impl ConsoleEvents {
    /// Creates a renderer announcing itself as `program` at `version`.
    pub fn new(program: &str, version: &str) -> Self {
        Self {
            program: program.to_string(),
            version: version.to_string(),
        }
    }
}

impl EventHandler for ConsoleEvents {
    fn global_help(&self, commands: &[CommandDescription]) {
        println!("Usage: {} <command> [options]", self.program);
        if commands.is_empty() {
            return;
        }
        println!();
        println!("Commands:");
        for command in commands {
            println!(
                "  {:<20} {}",
                command_label(command),
                command.description.as_deref().unwrap_or("")
            );
        }
    }

    fn command_help(&self, command: &CommandDescription) {
        println!("Usage: {} {}{}", self.program, command.name, usage_suffix(command));
        if let Some(description) = &command.description {
            println!();
            println!("{description}");
        }
        if !command.subcommands.is_empty() {
            println!();
            println!("Subcommands:");
            for subcommand in &command.subcommands {
                println!(
                    "  {:<20} {}",
                    command_label(subcommand),
                    subcommand.description.as_deref().unwrap_or("")
                );
            }
        }
        let named: Vec<&OptionSpec> = command.options.iter().filter(|o| !o.is_positional()).collect();
        if !named.is_empty() {
            println!();
            println!("Options:");
            for spec in named {
                println!("  {:<20} {}", option_label(spec), option_notes(spec));
            }
        }
    }

    fn version(&self) {
        println!("{} {}", self.program, self.version);
    }
}

fn command_label(command: &CommandDescription) -> String {
    if command.aliases.is_empty() {
        command.name.clone()
    } else {
        format!("{} ({})", command.name, command.aliases.join(", "))
    }
}

fn usage_suffix(command: &CommandDescription) -> String {
    let mut suffix = String::new();
    if !command.subcommands.is_empty() {
        suffix.push_str(" <subcommand>");
    }
    for spec in command.options.iter().filter(|o| o.is_positional()) {
        suffix.push_str(&format!(" <{}>", spec.key()));
    }
    if command.options.iter().any(|o| !o.is_positional()) {
        suffix.push_str(" [options]");
    }
    suffix
}

fn option_label(spec: &OptionSpec) -> String {
    let mut forms = Vec::new();
    if let Some(name) = spec.canonical_name() {
        forms.push(name);
    }
    forms.extend(spec.canonical_aliases());
    match spec {
        OptionSpec::String(_) => format!("{} <value>", forms.join(", ")),
        OptionSpec::Number(_) => format!("{} <number>", forms.join(", ")),
        _ => forms.join(", "),
    }
}

fn option_notes(spec: &OptionSpec) -> String {
    let mut notes = Vec::new();
    if spec.required() {
        notes.push("required".to_string());
    }
    if let Some(choices) = spec.choices() {
        notes.push(format!("one of: {}", choices.join(", ")));
    }
    notes.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdtree_core::{Command, CommandTree, NumberOpt, StringOpt};

    fn described() -> CommandDescription {
        let tree = CommandTree::build(vec![
            Command::new("push")
                .with_option(StringOpt::new("remote").with_alias("r").required())
                .with_option(NumberOpt::new("retries")),
        ])
        .unwrap();
        tree.describe().remove(0)
    }

    #[test]
    fn test_option_label_lists_all_forms() {
        let command = described();
        assert_eq!(option_label(&command.options[0]), "--remote, -r <value>");
        assert_eq!(option_label(&command.options[1]), "--retries <number>");
    }

    #[test]
    fn test_option_notes_mark_required_and_choices() {
        let command = described();
        assert_eq!(option_notes(&command.options[0]), "required");

        let choosy = OptionSpec::from(StringOpt::new("mode").with_choices(["a", "b"]));
        assert_eq!(option_notes(&choosy), "one of: a, b");
    }

    #[test]
    fn test_usage_suffix_reflects_shape() {
        let command = described();
        assert_eq!(usage_suffix(&command), " [options]");
    }
}
