use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::storage::LoadStatus;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new(
            "reload",
            "Re-read the ledger from disk",
            "reload",
            cmd_reload,
        ),
        CommandEntry::new("version", "Show the program version", "version", cmd_version),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit).with_aliases(&["quit"]),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first().map(|name| name.to_lowercase()) {
        match context.registry.get(&name) {
            Some(entry) => help::print_command(entry),
            None => context.suggest_command(args[0]),
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_reload(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.store.reload();
    match context.store.load_status() {
        LoadStatus::Corrupt(reason) => {
            output::warning(format!("Stored data is unreadable ({}).", reason))
        }
        LoadStatus::Missing => output::info("No saved expenses found."),
        LoadStatus::Loaded => {}
    }
    for warning in context.store.load_warnings() {
        output::warning(warning);
    }
    output::success(format!("Loaded {} expense(s).", context.store.len()));
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::info(format!("Expense Ledger v{}", env!("CARGO_PKG_VERSION")));
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
