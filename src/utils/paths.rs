use dirs::home_dir;
use std::{env, path::PathBuf};

/// Environment variable overriding the application home directory.
pub const HOME_ENV: &str = "EXPENSE_LEDGER_HOME";

const DEFAULT_DIR_NAME: &str = ".expense_ledger";
const DATA_DIR: &str = "data";
const CONFIG_FILE: &str = "config.json";

/// Returns the application-specific home directory, defaulting to `~/.expense_ledger`.
pub fn app_home_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Directory holding the durable key-value store inside `base`.
pub fn data_dir_in(base: &std::path::Path) -> PathBuf {
    base.join(DATA_DIR)
}

pub fn config_file_in(base: &std::path::Path) -> PathBuf {
    base.join(CONFIG_FILE)
}
