use std::path::Path;

use gems_core::{Item, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Read a local dataset file. A missing file or unparsable content yields an
/// empty dataset so a first enrichment run can bootstrap it.
pub async fn read_dataset(path: &Path) -> Vec<Item> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) => {
            debug!("Dataset {} not readable ({}), starting empty", path.display(), e);
            return Vec::new();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(items) => items,
        Err(e) => {
            warn!("Dataset {} is not valid JSON ({}), starting empty", path.display(), e);
            Vec::new()
        }
    }
}

/// Persist a dataset as pretty-printed JSON.
pub async fn write_dataset(path: &Path, items: &[Item]) -> Result<()> {
    let json = serde_json::to_string_pretty(items)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}

/// Identity of the last recommended item, persisted between `pick` runs so
/// the same suggestion is not repeated back to back.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PickState {
    #[serde(default)]
    pub last_pick_id: Option<String>,
}

impl PickState {
    pub async fn load(path: &Path) -> Self {
        match tokio::fs::read_to_string(path).await {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}
