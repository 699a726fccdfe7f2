use crate::extractor::analysis::{AnalysisResult, ShapeInfo, SlideAnalysis};
use crate::extractor::numbers::NumberScanner;
use crate::loader::SlideContent;

/// Substring of a shape kind label that classifies it as a chart.
const CHART_LABEL_MARKER: &str = "CHART";

/// Turns loaded slides into the analysis structure.
///
/// `analyze_slide` is pure per slide; `analyze_presentation` folds the
/// per-slide results into document-wide accumulators.
#[derive(Debug, Clone)]
pub struct SlideAnalyzer {
    scanner: NumberScanner,
    title_max_chars: usize,
}

impl SlideAnalyzer {
    pub fn new(title_max_chars: usize) -> Self {
        Self {
            scanner: NumberScanner::new(),
            title_max_chars,
        }
    }

    /// Analyze a single slide. `slide_number` is 1-based.
    pub fn analyze_slide(&self, slide_number: usize, slide: &SlideContent) -> SlideAnalysis {
        let mut result = SlideAnalysis {
            slide_number,
            ..Default::default()
        };

        for shape in &slide.shapes {
            let mut shape_info = ShapeInfo::new(shape.kind.label());

            let text = shape.text.trim();
            if !text.is_empty() {
                result.text_content.push(text.to_string());

                // The first short text run on the slide doubles as its title.
                if result.title.is_empty() && text.chars().count() < self.title_max_chars {
                    result.title = text.to_string();
                }

                result.numbers.extend(self.scanner.scan(text));
            }

            if shape.kind.label().contains(CHART_LABEL_MARKER) {
                result.charts.push(format!("Chart on slide {}", slide_number));
                shape_info.chart = Some(true);
            }

            result.shapes.push(shape_info);
        }

        result
    }

    /// Analyze a whole deck, folding per-slide results into the document
    /// accumulators. Slides are numbered contiguously from 1.
    pub fn analyze_presentation(&self, slides: &[SlideContent]) -> AnalysisResult {
        let mut analysis = AnalysisResult {
            total_slides: slides.len(),
            ..Default::default()
        };

        for (index, slide) in slides.iter().enumerate() {
            let slide_analysis = self.analyze_slide(index + 1, slide);

            for text in &slide_analysis.text_content {
                analysis.all_text.push(' ');
                analysis.all_text.push_str(text);
            }
            analysis
                .charts_found
                .extend(slide_analysis.charts.iter().cloned());
            analysis
                .numbers_found
                .extend(slide_analysis.numbers.iter().cloned());

            analysis.slides.push(slide_analysis);
        }

        analysis
    }
}
