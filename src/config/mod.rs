pub mod model;

#[cfg(test)]
mod tests;

use anyhow::Result;
use std::path::Path;
use tokio::fs;
use tracing::debug;

use crate::constants::MAX_PROCESSING_THREADS;

// Re-export main types
pub use self::model::{Config, DedupConfig, IoConfig, LoggingConfig, NotifyConfig, ProcessingConfig};

impl Config {
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).await?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;

        debug!("Loaded configuration from {}", path.as_ref().display());
        Ok(config)
    }

    /// Load `path` when it exists, otherwise fall back to the defaults.
    pub async fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if fs::try_exists(path.as_ref()).await? {
            Self::load(path).await
        } else {
            debug!("No configuration at {}, using defaults", path.as_ref().display());
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.processing.max_threads > MAX_PROCESSING_THREADS {
            anyhow::bail!("max_threads cannot exceed {}", MAX_PROCESSING_THREADS);
        }

        if self.io.file_extensions.is_empty() {
            anyhow::bail!("file_extensions must list at least one extension");
        }

        if self.io.file_extensions.iter().any(|ext| ext.trim().is_empty() || ext.starts_with('.')) {
            anyhow::bail!("file_extensions entries must be bare extensions such as 'txt'");
        }

        if self.io.report_file_name.trim().is_empty() {
            anyhow::bail!("report_file_name cannot be empty");
        }

        if self.notify.attachment_name.trim().is_empty() {
            anyhow::bail!("attachment_name cannot be empty");
        }

        if !matches!(self.logging.verbosity.as_str(), "silent" | "normal" | "verbose") {
            anyhow::bail!("verbosity must be 'silent', 'normal', or 'verbose'");
        }

        Ok(())
    }
}
