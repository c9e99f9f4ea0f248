use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::formatters;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::core::SummaryService;
use crate::domain::{Amounted, BelongsToCategory, NewExpense};

use super::usage;

const ADD_USAGE: &str = "add <title> <amount> <category> [note] [date]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Record a new expense", ADD_USAGE, cmd_add),
        CommandEntry::new(
            "list",
            "Show the most recent expenses",
            "list [limit]",
            cmd_list,
        ),
        CommandEntry::new(
            "all",
            "Show every expense, newest first",
            "all",
            cmd_all,
        ),
        CommandEntry::new("delete", "Delete an expense by id", "delete <id>", cmd_delete),
        CommandEntry::new("clear", "Delete every expense", "clear", cmd_clear),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 3 || args.len() > 5 {
        return Err(usage(ADD_USAGE));
    }
    let note = args.get(3).copied().unwrap_or_default();
    let draft = NewExpense::from_form(args[0], args[1], args[2], note, args.get(4).copied())?;
    let record = context.store.add(draft)?;
    output::success(format!(
        "Added {} ({}) for {} [{}]",
        record.title(),
        record.category(),
        formatters::format_amount(record.amount(), context.currency_symbol()),
        record.id,
    ));
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let limit = match args.first() {
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| usage("list [limit]"))?,
        None => context.config.recent_limit,
    };
    let recent = SummaryService::recent_activity(context.store.get_all(), limit);
    output::section(format!("Recent activity ({} of {})", recent.len(), context.store.len()));
    print_rows(context, recent)
}

fn cmd_all(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let records = SummaryService::chronological(context.store.get_all());
    output::section(format!("All expenses ({})", records.len()));
    print_rows(context, records)
}

fn print_rows(
    context: &ShellContext,
    records: Vec<&crate::domain::ExpenseRecord>,
) -> CommandResult {
    if records.is_empty() {
        output::info("No expenses recorded yet.");
        output::hint(format!("Try `{}`.", ADD_USAGE));
        return Ok(());
    }
    for record in records {
        output::info(formatters::render_row(record, context.currency_symbol()));
    }
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [id] = args else {
        return Err(usage("delete <id>"));
    };
    let Some(record) = context.store.get(id) else {
        output::warning(format!("No expense with id `{}`.", id));
        return Ok(());
    };
    let prompt = format!("Delete \"{}\"?", record.title());
    if !context.confirm(&prompt)? {
        output::info("Delete cancelled.");
        return Ok(());
    }
    if context.store.remove(id)? {
        output::success("Expense deleted.");
    }
    Ok(())
}

fn cmd_clear(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.store.is_empty() {
        output::info("Ledger is already empty.");
        return Ok(());
    }
    if !context.confirm("Delete ALL expenses? This cannot be undone.")? {
        output::info("Clear cancelled.");
        return Ok(());
    }
    let cleared = context.store.clear_all()?;
    output::success(format!("Cleared {} expense(s).", cleared));
    Ok(())
}
