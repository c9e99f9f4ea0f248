use std::path::PathBuf;

use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::storage::export::EXPORT_FILE_NAME;

use super::usage;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "export",
            "Write all expenses to a JSON file",
            "export [path]",
            cmd_export,
        ),
        CommandEntry::new(
            "import",
            "Replace all expenses with a JSON file's contents",
            "import <path>",
            cmd_import,
        ),
    ]
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = match args {
        [] => PathBuf::from(EXPORT_FILE_NAME),
        [path] => PathBuf::from(*path),
        _ => return Err(usage("export [path]")),
    };
    context.store.export_file(&path)?;
    output::success(format!(
        "Exported {} expense(s) to {}",
        context.store.len(),
        path.display()
    ));
    Ok(())
}

fn cmd_import(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [path] = args else {
        return Err(usage("import <path>"));
    };
    let path = PathBuf::from(*path);
    if !context.store.is_empty()
        && !context.confirm("Importing replaces every current expense. Continue?")?
    {
        output::info("Import cancelled.");
        return Ok(());
    }
    let warnings = context.store.import_file(&path)?;
    for warning in &warnings {
        output::warning(warning);
    }
    output::success(format!(
        "Imported {} expense(s) from {}",
        context.store.len(),
        path.display()
    ));
    Ok(())
}
