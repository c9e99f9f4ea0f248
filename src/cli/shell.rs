//! Line-driven front end: an interactive editor, or commands piped on stdin.

use std::{
    borrow::Cow,
    io::{self, BufRead},
};

use colored::Colorize;
use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Context, Editor, Helper,
};

use crate::cli::core::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandRegistry;
use crate::domain::Category;

/// Presence of this variable switches the shell to line-by-line stdin mode.
pub const SCRIPT_ENV: &str = "EXPENSE_LEDGER_CLI_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    tracing::debug!(?mode, records = context.store.len(), "shell started");

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    output::section("Expense Ledger");
    output::hint("Type `help` for commands, Tab to complete, `exit` to quit.");

    let mut editor = Editor::<LedgerHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(LedgerHelper::new(&context.registry)));

    while context.running {
        match editor.readline(&context.prompt()) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    editor.add_history_entry(line.trim()).ok();
                }
                execute(context, &line)?;
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                output::info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

/// Reads commands from stdin until it ends or a command exits. Lines starting
/// with `#` are comments.
fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim_start().starts_with('#') {
            continue;
        }
        execute(context, &line)?;
        if !context.running {
            break;
        }
    }
    Ok(())
}

/// Runs one input line. Command failures are reported and the shell goes on.
fn execute(context: &mut ShellContext, line: &str) -> Result<(), CliError> {
    match handle_line(context, line) {
        Ok(LoopControl::Continue) => Ok(()),
        Ok(LoopControl::Exit) => {
            context.running = false;
            Ok(())
        }
        Err(err) => context.report_error(err),
    }
}

pub(crate) fn handle_line(
    context: &mut ShellContext,
    line: &str,
) -> Result<LoopControl, CommandError> {
    let tokens = match parse_command_line(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(format!("Could not read command: {}", err));
            return Ok(LoopControl::Continue);
        }
    };
    let Some((raw, rest)) = tokens.split_first() else {
        return Ok(LoopControl::Continue);
    };
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();
    context.dispatch(&raw.to_lowercase(), raw, &args)
}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, shell_words::ParseError> {
    shell_words::split(input)
}

/// Tab completion of command words and `add` categories, plus a dimmed usage
/// hint once a command word is typed.
struct LedgerHelper {
    /// Invoking word and its argument synopsis.
    commands: Vec<(String, &'static str)>,
    categories: Vec<String>,
}

impl LedgerHelper {
    fn new(registry: &CommandRegistry) -> Self {
        let mut commands: Vec<_> = registry
            .names()
            .filter_map(|word| {
                registry
                    .get(word)
                    .map(|entry| (word.to_string(), entry.arguments()))
            })
            .collect();
        commands.sort();
        let categories = Category::ALL
            .iter()
            .map(|category| category.label().to_string())
            .collect();
        Self {
            commands,
            categories,
        }
    }

    /// Start of the word being typed and the words that could replace it.
    fn candidates(&self, prefix: &str) -> (usize, Vec<String>) {
        let start = prefix
            .rfind([' ', '\t'])
            .map_or(0, |index| index + 1);
        let Ok(before) = shell_words::split(&prefix[..start]) else {
            return (start, Vec::new());
        };

        let pool: Vec<&str> = match before.as_slice() {
            [] => self.commands.iter().map(|(word, _)| word.as_str()).collect(),
            [command, _, _] if command.eq_ignore_ascii_case("add") => {
                self.categories.iter().map(String::as_str).collect()
            }
            _ => Vec::new(),
        };
        let needle = prefix[start..].to_lowercase();
        let matches = pool
            .into_iter()
            .filter(|word| word.to_lowercase().starts_with(&needle))
            .map(str::to_string)
            .collect();
        (start, matches)
    }

    /// Argument synopsis for a line holding just a command word and a space.
    fn usage_hint(&self, line: &str) -> Option<String> {
        let word = line.trim_start().strip_suffix(' ')?;
        if word.is_empty() || word.contains(char::is_whitespace) {
            return None;
        }
        let word = word.to_lowercase();
        self.commands
            .iter()
            .find(|(known, _)| *known == word)
            .map(|(_, arguments)| *arguments)
            .filter(|arguments| !arguments.is_empty())
            .map(str::to_string)
    }
}

impl Helper for LedgerHelper {}

impl Completer for LedgerHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, words) = self.candidates(&line[..pos]);
        let pairs = words
            .into_iter()
            .map(|word| Pair {
                display: word.clone(),
                replacement: word,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for LedgerHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        self.usage_hint(line)
    }
}

impl Highlighter for LedgerHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(hint.dimmed().to_string())
    }
}

impl Validator for LedgerHelper {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;

    fn helper() -> LedgerHelper {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        LedgerHelper::new(&registry)
    }

    #[test]
    fn quoted_arguments_stay_together() {
        let tokens = parse_command_line("add \"Train ticket\" 42.5 Travel 'to work'").unwrap();
        assert_eq!(tokens, ["add", "Train ticket", "42.5", "Travel", "to work"]);
    }

    #[test]
    fn unbalanced_quotes_are_rejected() {
        assert!(parse_command_line("add \"Coffee 3 Food").is_err());
    }

    #[test]
    fn completes_command_words_and_aliases() {
        let helper = helper();
        assert_eq!(helper.candidates("cl"), (0, vec!["clear".to_string()]));
        assert_eq!(helper.candidates("qu"), (0, vec!["quit".to_string()]));
        assert!(helper.candidates("list ").1.is_empty());
    }

    #[test]
    fn completes_categories_in_the_add_category_slot() {
        let helper = helper();
        let line = "add \"Train ticket\" 42 tr";
        assert_eq!(helper.candidates(line), (22, vec!["Travel".to_string()]));
        assert_eq!(helper.candidates("add Coffee 3 ").1.len(), Category::ALL.len());
        assert!(helper.candidates("add Coffee ").1.is_empty());
        assert!(helper.candidates("add \"Train ti").1.is_empty());
    }

    #[test]
    fn hints_usage_after_a_command_word() {
        let helper = helper();
        assert_eq!(
            helper.usage_hint("add ").as_deref(),
            Some("<title> <amount> <category> [note] [date]")
        );
        assert_eq!(helper.usage_hint("LIST ").as_deref(), Some("[limit]"));
        assert_eq!(helper.usage_hint("clear "), None);
        assert_eq!(helper.usage_hint("add Coffee "), None);
    }
}
