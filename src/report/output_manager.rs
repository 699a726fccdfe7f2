use crate::error::{DeckAuditError, Result};
use crate::extractor::AnalysisResult;
use crate::report::narrative;
use crate::report::reconciliation::ReconciliationTemplate;
use std::fs;
use std::path::{Path, PathBuf};

pub const ANALYSIS_FILE: &str = "analysis.json";
pub const REPORT_FILE: &str = "audit_report.md";
pub const RECONCILIATION_FILE: &str = "reconciliation.json";

/// Owns the output directory and writes the three analysis artifacts into
/// it. The directory is created if absent; files are overwritten on every
/// run, so repeated runs over the same deck are idempotent.
pub struct OutputManager {
    output_directory: PathBuf,
}

impl OutputManager {
    pub fn new<P: Into<PathBuf>>(output_directory: P) -> Self {
        Self {
            output_directory: output_directory.into(),
        }
    }

    pub fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.output_directory).map_err(|_| {
            DeckAuditError::OutputDirectory {
                path: self.output_directory.display().to_string(),
            }
        })
    }

    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    pub fn analysis_path(&self) -> PathBuf {
        self.output_directory.join(ANALYSIS_FILE)
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_directory.join(REPORT_FILE)
    }

    pub fn reconciliation_path(&self) -> PathBuf {
        self.output_directory.join(RECONCILIATION_FILE)
    }

    /// Write the structured dump of the full analysis.
    pub fn write_analysis(&self, analysis: &AnalysisResult) -> Result<PathBuf> {
        let path = self.analysis_path();
        let json = serde_json::to_string_pretty(analysis)?;
        fs::write(&path, json).map_err(DeckAuditError::Io)?;
        Ok(path)
    }

    /// Render and write the markdown audit report.
    pub fn write_report(&self, analysis: &AnalysisResult) -> Result<PathBuf> {
        let path = self.report_path();
        fs::write(&path, narrative::render(analysis)).map_err(DeckAuditError::Io)?;
        Ok(path)
    }

    /// Write the static reconciliation template.
    pub fn write_reconciliation(&self) -> Result<PathBuf> {
        let path = self.reconciliation_path();
        let json = serde_json::to_string_pretty(&ReconciliationTemplate::new())?;
        fs::write(&path, json).map_err(DeckAuditError::Io)?;
        Ok(path)
    }
}
