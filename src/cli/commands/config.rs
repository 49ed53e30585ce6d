use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::config::Config;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change shell preferences",
        "config [show|set <key> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first().map(|sub| sub.to_lowercase()).as_deref() {
        None | Some("show") => show_config(context),
        Some("set") => {
            if args.len() < 3 {
                return Err(CommandError::InvalidArguments(format!(
                    "usage: config set <{}> <value>",
                    Config::KEYS.join("|")
                )));
            }
            let value = args[2..].join(" ");
            set_config_value(context, args[1], &value)
        }
        Some(other) => Err(CommandError::InvalidArguments(format!(
            "unknown config subcommand `{other}` (expected show or set)"
        ))),
    }
}

fn show_config(context: &ShellContext) -> CommandResult {
    output::section("Configuration");
    for (key, value) in context.config.entries() {
        output::info(format!("  {key:<20} {value}"));
    }
    if let Some(search) = &context.config.last_search {
        output::info(format!("  {:<20} {search}", "last_search"));
    }
    output::info(format!(
        "  {:<20} {}",
        "file",
        context.config_manager.path().display()
    ));
    Ok(())
}

fn set_config_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let mut updated = context.config.clone();
    updated.set(key, value)?;
    context.config_manager.save(&updated)?;
    context.config = updated;
    context.apply_output_preferences();
    output::success(format!("Updated {key}."));
    Ok(())
}
