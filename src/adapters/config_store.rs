use crate::domain::model::SavedConfig;
use crate::domain::ports::ConfigStore;
use crate::utils::error::{PlannerError, Result};
use std::path::{Path, PathBuf};

/// Keeps the building configuration as pretty-printed JSON on disk.
///
/// A store without a path behaves like a file dialog the user closed: both
/// operations fail with [`PlannerError::NoPathGiven`].
#[derive(Debug, Clone, Default)]
pub struct JsonConfigStore {
    path: Option<PathBuf>,
}

impl JsonConfigStore {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn require_path(&self) -> Result<&Path> {
        self.path().ok_or(PlannerError::NoPathGiven)
    }
}

impl ConfigStore for JsonConfigStore {
    async fn save_config(&self, config: &SavedConfig) -> Result<()> {
        let path = self.require_path()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_string_pretty(config)?;
        tokio::fs::write(path, json).await?;
        tracing::debug!("Saved configuration to {}", path.display());
        Ok(())
    }

    async fn read_config(&self) -> Result<SavedConfig> {
        let path = self.require_path()?;
        let content = tokio::fs::read_to_string(path).await?;
        let config = serde_json::from_str(&content)?;
        tracing::debug!("Read configuration from {}", path.display());
        Ok(config)
    }
}
