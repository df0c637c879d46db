//! Scan command implementation.

use crate::cli::ScanArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use snap_domain::traits::ExpenseStore;
use snap_extractor::image::mime_from_extension;
use snap_extractor::ReceiptExtractor;
use snap_llm::SharedProvider;
use snap_store::SharedStore;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Execute the scan command.
///
/// `store` is only needed with `--save`.
pub async fn execute_scan(
    args: ScanArgs,
    extractor: &ReceiptExtractor<SharedProvider>,
    store: Option<&SharedStore>,
    formatter: &Formatter,
) -> Result<()> {
    let mime_type = match args.mime {
        Some(mime) => mime,
        None => guess_mime(&args.image)?,
    };

    let bytes = fs::read(&args.image)?;
    debug!(
        "Scanning {} ({} bytes, {})",
        args.image.display(),
        bytes.len(),
        mime_type
    );

    let draft = extractor.extract(&bytes, &mime_type).await?;

    let rendered = formatter.format_draft(&draft)?;
    if !rendered.is_empty() {
        println!("{}", rendered);
    }

    if args.save {
        let store = store.ok_or_else(|| CliError::Config("No store configured".to_string()))?;
        let expense = store.insert(&draft).await?;
        println!("{}", formatter.expense_saved("Saved", &expense.id));
    }

    Ok(())
}

/// Infer the MIME type from the file extension.
fn guess_mime(path: &Path) -> Result<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(mime_from_extension)
        .map(str::to_string)
        .ok_or_else(|| {
            CliError::InvalidInput(format!(
                "Cannot infer image type of '{}'; pass --mime",
                path.display()
            ))
        })
}
