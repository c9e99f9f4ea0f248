use std::iter;

use crate::cli::core::CommandResult;
use crate::cli::shell_context::ShellContext;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// A shell command and every word that invokes it.
pub struct CommandEntry {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            aliases: &[],
            description,
            usage,
            handler,
        }
    }

    pub fn with_aliases(self, aliases: &'static [&'static str]) -> Self {
        Self { aliases, ..self }
    }

    pub fn matches(&self, word: &str) -> bool {
        self.name == word || self.aliases.contains(&word)
    }

    /// The argument part of the usage line, e.g. `[limit]` for `list [limit]`.
    pub fn arguments(&self) -> &'static str {
        self.usage
            .split_once(' ')
            .map_or("", |(_, arguments)| arguments)
    }

    fn words(&self) -> impl Iterator<Item = &'static str> + '_ {
        iter::once(self.name).chain(self.aliases.iter().copied())
    }
}

/// Shell commands in the order they were registered. The table is small, so
/// lookups scan it.
#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `entry`, replacing an earlier command of the same name in place.
    pub fn register(&mut self, entry: CommandEntry) {
        match self.entries.iter().position(|known| known.name == entry.name) {
            Some(index) => self.entries[index] = entry,
            None => self.entries.push(entry),
        }
    }

    /// Finds the command invoked by `word`, by name or alias.
    pub fn get(&self, word: &str) -> Option<&CommandEntry> {
        self.entries.iter().find(|entry| entry.matches(word))
    }

    pub fn list(&self) -> &[CommandEntry] {
        &self.entries
    }

    /// Every word that invokes a command, aliases included.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().flat_map(CommandEntry::words)
    }

    pub fn handler(&self, word: &str) -> Option<CommandHandler> {
        self.get(word).map(|entry| entry.handler)
    }
}
