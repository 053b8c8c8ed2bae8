//! Demonstration binary: a small bookmark manager built on the cmdtree
//! engine. Exists to exercise the full pipeline — nested commands, every
//! option kind, hooks, and the exit-code convention — from a real `main`.

use std::process::ExitCode;
use std::sync::Arc;

use cmdtree_core::{
    BooleanOpt, Command, CommandTree, NumberOpt, PositionalOpt, StringOpt, Values,
};
use cmdtree_engine::{ConsoleEvents, Runner};
use tracing::debug;

const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

fn forest() -> Vec<Command> {
    vec![
        Command::new("add")
            .with_description("Store a bookmark")
            .with_option(PositionalOpt::new("url").required())
            .with_option(StringOpt::new("title").with_alias("t"))
            .with_option(NumberOpt::new("rating").integer_only().with_min(1.0).with_max(5.0))
            .with_handler(add_bookmark),
        Command::new("list")
            .with_description("List stored bookmarks")
            .with_alias("ls")
            .with_option(
                StringOpt::new("format")
                    .with_choices(["table", "json"])
                    .with_default("table"),
            )
            .with_option(NumberOpt::new("limit").integer_only().with_min(1.0))
            .with_option(BooleanOpt::new("all").with_alias("a"))
            .with_handler(list_bookmarks),
        Command::new("tag")
            .with_description("Manage bookmark tags")
            .with_subcommand(
                Command::new("rename")
                    .with_description("Rename a tag everywhere")
                    .with_option(StringOpt::new("from").required())
                    .with_option(StringOpt::new("to").required())
                    .with_option(BooleanOpt::new("dry-run"))
                    .with_handler(rename_tag),
            ),
    ]
}

async fn add_bookmark(values: Values) -> cmdtree_core::HandlerResult {
    let url = values.str("url").unwrap_or_default().to_string();
    let title = values.str("title").unwrap_or(&url).to_string();
    match values.number("rating") {
        Some(rating) => println!("added {title} ({url}), rated {rating}"),
        None => println!("added {title} ({url})"),
    }
    Ok(())
}

async fn list_bookmarks(values: Values) -> cmdtree_core::HandlerResult {
    let format = values.str("format").unwrap_or("table").to_string();
    let all = values.bool("all").unwrap_or(false);
    debug!(%format, all, "listing bookmarks");
    match format.as_str() {
        "json" => println!("{}", serde_json::json!({ "bookmarks": [] })),
        _ => println!("no bookmarks yet"),
    }
    Ok(())
}

async fn rename_tag(values: Values) -> cmdtree_core::HandlerResult {
    let from = values.str("from").unwrap_or_default().to_string();
    let to = values.str("to").unwrap_or_default().to_string();
    if values.bool("dry-run").unwrap_or(false) {
        println!("would rename tag {from} -> {to}");
    } else {
        println!("renamed tag {from} -> {to}");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let tree = match CommandTree::build(forest()) {
        Ok(tree) => tree,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let runner = Runner::new(tree, Arc::new(ConsoleEvents::new("cmdtree-demo", PACKAGE_VERSION)))
        .with_before(|command| async move {
            debug!(command = %command.name, "dispatching");
            Ok(())
        });

    let tokens: Vec<String> = std::env::args().skip(1).collect();
    runner.run(&tokens).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdtree_core::validate_forest;

    #[test]
    fn test_demo_forest_validates() {
        assert!(validate_forest(&forest()).is_ok());
    }
}
