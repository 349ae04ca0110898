//! JSON export of the selected stores.

use std::path::Path;

use thiserror::Error;

use crate::selection::SelectionState;
use crate::stores::QueryResult;

/// File name offered for the exported selection.
pub const EXPORT_FILE_NAME: &str = "stores_result.json";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no stores selected for export")]
    EmptySelection,

    #[error("failed to serialize export: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write export to {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Serializes the selected subset of `result` as two-space indented JSON.
///
/// Output depends only on `result` and `selection`, so repeated exports of
/// the same state are byte-identical.
///
/// # Errors
///
/// Returns [`ExportError::EmptySelection`] when nothing is selected, or
/// [`ExportError::Serialize`] if serialization fails.
pub fn export_json(result: &QueryResult, selection: &SelectionState) -> Result<String, ExportError> {
    if selection.is_empty() {
        return Err(ExportError::EmptySelection);
    }
    Ok(serde_json::to_string_pretty(&result.filtered(selection))?)
}

/// Writes the export for `result`/`selection` to `path`.
///
/// # Errors
///
/// Propagates [`export_json`] failures and returns [`ExportError::Write`] if
/// the file cannot be written.
pub fn write_export(
    path: &Path,
    result: &QueryResult,
    selection: &SelectionState,
) -> Result<(), ExportError> {
    let json = export_json(result, selection)?;
    std::fs::write(path, json).map_err(|source| ExportError::Write {
        path: path.display().to_string(),
        source,
    })
}
