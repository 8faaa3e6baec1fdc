//! JSON export of an asset collection.

use promptvault_core::Asset;
use std::path::Path;

/// File name used when no export path is given.
pub const DEFAULT_EXPORT_FILE: &str = "prompt_architect_export.json";

/// Pretty-printed JSON array of `assets`, in storage format.
///
/// # Errors
///
/// Returns error if encoding fails.
pub fn export_json(assets: &[Asset]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(assets)?)
}

/// Write [`export_json`] output to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns error if encoding or the write fails.
pub fn export_to_path(assets: &[Asset], path: &Path) -> Result<(), ExportError> {
    let json = export_json(assets)?;
    std::fs::write(path, json)?;
    tracing::info!(path = %path.display(), count = assets.len(), "Exported assets");
    Ok(())
}

/// Errors from exporting.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Encoding failure
    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
    /// File could not be written
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples::sample_assets;
    use chrono::Utc;

    #[test]
    fn export_is_pretty_and_decodable() {
        let assets = sample_assets(Utc::now());
        let json = export_json(&assets).unwrap();

        assert!(json.starts_with("[\n"));
        assert!(json.contains("\"currentVersion\": \"v1.0\""));
        let decoded: Vec<Asset> = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.len(), 2);
    }

    #[test]
    fn empty_collection_exports_empty_array() {
        assert_eq!(export_json(&[]).unwrap(), "[]");
    }
}
