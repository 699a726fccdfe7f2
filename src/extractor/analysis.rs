use serde::{Deserialize, Serialize};

/// The full analysis of one presentation. Serialized field names are the
/// output contract consumed by the downstream audit step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub total_slides: usize,
    pub slides: Vec<SlideAnalysis>,
    /// Document-wide concatenation: each text run appended after a space.
    pub all_text: String,
    /// Chart mentions across the deck, in emission order.
    pub charts_found: Vec<String>,
    /// Numeric tokens across the deck, duplicates retained; deduplication
    /// happens only at report time.
    pub numbers_found: Vec<String>,
}

impl AnalysisResult {
    /// Distinct extracted numbers, for summary counts.
    pub fn unique_number_count(&self) -> usize {
        let unique: std::collections::BTreeSet<&str> =
            self.numbers_found.iter().map(String::as_str).collect();
        unique.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlideAnalysis {
    pub slide_number: usize,
    pub title: String,
    pub text_content: Vec<String>,
    pub shapes: Vec<ShapeInfo>,
    pub charts: Vec<String>,
    pub numbers: Vec<String>,
}

/// One shape descriptor: its kind label, and a chart flag present only on
/// shapes classified as charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeInfo {
    #[serde(rename = "type")]
    pub shape_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<bool>,
}

impl ShapeInfo {
    pub fn new<S: Into<String>>(shape_type: S) -> Self {
        Self {
            shape_type: shape_type.into(),
            chart: None,
        }
    }

    pub fn is_chart(&self) -> bool {
        self.chart == Some(true)
    }
}
