use std::{fs, path::Path};

use super::PredictorConfig;
use crate::error::{PredictorError, Result};

/// Loads a [`PredictorConfig`] from a JSON file.
///
/// # Errors
/// Returns `InvalidConfig` if the file cannot be read or parsed.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PredictorConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        PredictorError::InvalidConfig(format!("cannot read '{}': {e}", path.display()))
    })?;

    serde_json::from_str(&content)
        .map_err(|e| PredictorError::InvalidConfig(format!("invalid JSON: {e}")))
}
