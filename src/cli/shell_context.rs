use dialoguer::theme::ColorfulTheme;

use crate::{
    config::{Config, ConfigManager},
    core::LedgerStore,
    errors::CliError,
    storage::{ExpenseRepository, FileStore, LoadStatus},
};

use super::{
    commands,
    output::{self, OutputPreferences},
    registry::CommandRegistry,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// State shared by every shell command: the ledger, settings, and the
/// command table.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub store: LedgerStore,
    pub config: Config,
    pub theme: ColorfulTheme,
    pub running: bool,
}

impl ShellContext {
    /// Builds a context from the config under the application home.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;

        output::set_preferences(OutputPreferences {
            color_enabled: config.ui_color_enabled && mode == CliMode::Interactive,
        });

        let data_dir = config.resolve_data_dir(config_manager.home());
        let file_store = FileStore::with_quota(data_dir, config.quota_bytes)?;
        let repository =
            ExpenseRepository::with_key(Box::new(file_store), config.storage_key.clone());
        let store = LedgerStore::with_system_clock(repository);

        Ok(Self::with_store(mode, store, config))
    }

    /// Wraps an already initialized ledger store.
    pub fn with_store(mode: CliMode, store: LedgerStore, config: Config) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let context = Self {
            mode,
            registry,
            store,
            config,
            theme: ColorfulTheme::default(),
            running: true,
        };
        context.report_load();
        context
    }

    pub fn prompt(&self) -> String {
        format!("expenses ({})> ", self.store.len())
    }

    pub fn currency_symbol(&self) -> &str {
        &self.config.currency_symbol
    }

    fn report_load(&self) {
        if let LoadStatus::Corrupt(reason) = self.store.load_status() {
            output::warning(format!(
                "Stored expenses could not be read ({reason}); starting with an empty ledger."
            ));
        }
        for warning in self.store.load_warnings() {
            output::warning(warning);
        }
    }
}
