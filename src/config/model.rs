use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::*;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub processing: ProcessingConfig,
    pub io: IoConfig,
    pub dedup: DedupConfig,
    pub logging: LoggingConfig,
    pub notify: NotifyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Worker threads for file parsing; 0 detects physical cores.
    pub max_threads: usize,
    /// Merge parsed files in discovery order instead of as workers finish.
    pub ordered_merge: bool,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            max_threads: 0,
            ordered_merge: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IoConfig {
    pub output_directory: String,
    pub report_file_name: String,
    pub file_extensions: Vec<String>,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            output_directory: DEFAULT_OUTPUT_DIRECTORY.to_string(),
            report_file_name: DEFAULT_REPORT_FILE_NAME.to_string(),
            file_extensions: vec![DEFAULT_FILE_EXTENSION.to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupConfig {
    pub case_sensitive_identities: bool,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            case_sensitive_identities: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub verbosity: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            verbosity: "normal".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    pub enabled: bool,
    pub outbox_directory: String,
    pub attachment_name: String,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            outbox_directory: DEFAULT_OUTBOX_DIRECTORY.to_string(),
            attachment_name: DEFAULT_ATTACHMENT_NAME.to_string(),
        }
    }
}

impl Config {
    pub fn output_directory(&self) -> PathBuf {
        PathBuf::from(&self.io.output_directory)
    }

    pub fn outbox_directory(&self) -> PathBuf {
        PathBuf::from(&self.notify.outbox_directory)
    }
}
