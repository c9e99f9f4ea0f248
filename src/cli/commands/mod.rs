pub mod expense;
pub mod report;
pub mod system;
pub mod transfer;

use crate::cli::core::CommandError;
use crate::cli::registry::CommandRegistry;

pub fn register_all(registry: &mut CommandRegistry) {
    let groups = [
        system::definitions(),
        expense::definitions(),
        report::definitions(),
        transfer::definitions(),
    ];
    for entry in groups.into_iter().flatten() {
        registry.register(entry);
    }
}

pub(crate) fn usage(usage: &str) -> CommandError {
    CommandError::InvalidArguments(format!("usage: {}", usage))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_every_shell_command() {
        let mut registry = CommandRegistry::new();
        register_all(&mut registry);
        let names: Vec<_> = registry.names().collect();
        for expected in [
            "help",
            "add",
            "list",
            "all",
            "delete",
            "clear",
            "totals",
            "categories",
            "export",
            "import",
            "reload",
            "version",
            "exit",
            "quit",
        ] {
            assert!(names.contains(&expected), "missing `{}`", expected);
        }
    }
}
