//! Flat-file persistence for generated patient batches

use std::fs;
use std::path::Path;

use priorauth_core::{GenerateError, Patient};

/// Serialize a patient batch to pretty-printed JSON at `path`.
///
/// Creates intermediate directories as needed. The JSON is written to
/// a temporary sibling file and renamed into place, so either a fully
/// written file exists or none does. Non-ASCII characters are left
/// unescaped (serde_json writes UTF-8 as is).
pub fn save_patients(patients: &[Patient], path: &Path) -> Result<(), GenerateError> {
    let storage = |source: std::io::Error| GenerateError::Storage {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(storage)?;
        }
    }

    let json = serde_json::to_string_pretty(patients)
        .map_err(|e| storage(std::io::Error::other(e)))?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).map_err(storage)?;
    fs::rename(&tmp, path).map_err(storage)?;

    Ok(())
}
