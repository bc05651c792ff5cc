//! JSON report output.
//!
//! Writes a [`SignalReport`] to disk as pretty-printed JSON, replacing any
//! previous report at the same path.

use crate::error::Result;
use crate::types::SignalReport;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes scan reports to a fixed path.
pub struct ReportWriter {
    path: PathBuf,
}

impl ReportWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize and write the report, creating parent directories as needed.
    pub fn write(&self, report: &SignalReport) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(report)?;
        fs::write(&self.path, content)?;
        debug!("Wrote report to {:?}", self.path);

        Ok(())
    }
}
