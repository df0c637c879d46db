//! Delete command implementation.

use crate::cli::DeleteArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use snap_domain::traits::ExpenseStore;
use snap_domain::ExpenseId;
use snap_store::SharedStore;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Execute the delete command.
///
/// Unknown IDs are not an error.
pub async fn execute_delete(
    args: DeleteArgs,
    store: &SharedStore,
    formatter: &Formatter,
) -> Result<()> {
    let mut ids = args.ids.clone();

    if let Some(file_path) = &args.file {
        ids.extend(read_ids_from_file(file_path)?);
    }

    if ids.is_empty() {
        return Err(CliError::InvalidInput("No expense IDs provided".to_string()));
    }

    if !args.yes {
        println!("About to delete {} expense(s):", ids.len());
        for id in &ids {
            println!("  - {}", id);
        }
        print!("Continue? [y/N] ");
        io::stdout().flush()?;

        let mut response = String::new();
        io::stdin().read_line(&mut response)?;

        if !response.trim().eq_ignore_ascii_case("y") {
            println!("{}", formatter.info("Operation cancelled"));
            return Ok(());
        }
    }

    for id in &ids {
        store.delete(&ExpenseId::new(id.as_str())).await?;
    }

    println!("{}", formatter.bulk_result("Deleted", ids.len()));
    Ok(())
}

/// Read IDs from a file (one per line).
fn read_ids_from_file(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}
