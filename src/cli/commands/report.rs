use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::formatters;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::core::{Clock, SummaryService};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "totals",
            "Show today's, this month's and overall spending",
            "totals",
            cmd_totals,
        ),
        CommandEntry::new(
            "categories",
            "Show spending per category",
            "categories",
            cmd_categories,
        ),
    ]
}

fn cmd_totals(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let symbol = context.currency_symbol();
    let records = context.store.get_all();
    let overview = SummaryService::overview(records, context.store.clock().now(), 0);

    output::section("Totals");
    output::info(format!(
        "  Today      : {}",
        formatters::format_amount(overview.today_total, symbol)
    ));
    output::info(format!(
        "  This month : {}",
        formatters::format_amount(overview.month_total, symbol)
    ));
    output::info(format!(
        "  Overall    : {} across {} expense(s)",
        formatters::format_amount(SummaryService::total(records), symbol),
        overview.record_count
    ));
    Ok(())
}

fn cmd_categories(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let totals = SummaryService::category_totals(context.store.get_all());
    output::section("Spending by category");
    if totals.is_empty() {
        output::info("No expenses recorded yet.");
        return Ok(());
    }
    for line in formatters::render_category_totals(&totals, context.currency_symbol()) {
        output::info(line);
    }
    Ok(())
}
