pub mod narrative;
pub mod output_manager;
pub mod reconciliation;

pub use output_manager::{OutputManager, ANALYSIS_FILE, RECONCILIATION_FILE, REPORT_FILE};
pub use reconciliation::{GoldenRecord, ReconciliationTemplate};
