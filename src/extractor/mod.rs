pub mod analysis;
pub mod numbers;
pub mod slide_analyzer;

pub use analysis::{AnalysisResult, ShapeInfo, SlideAnalysis};
pub use numbers::NumberScanner;
pub use slide_analyzer::SlideAnalyzer;
