use crate::extractor::AnalysisResult;
use std::collections::BTreeSet;

/// Render the markdown audit report from a finished analysis.
///
/// Slide sections mirror the analysis structure; the trailing sections list
/// the sorted unique numbers and the chart mentions in emission order.
pub fn render(analysis: &AnalysisResult) -> String {
    let mut report = String::new();

    report.push_str("# PowerPoint Analysis Report\n\n");
    report.push_str(&format!("**Total Slides:** {}\n", analysis.total_slides));
    report.push_str(&format!(
        "**Charts Found:** {}\n",
        analysis.charts_found.len()
    ));
    report.push_str(&format!(
        "**Numbers Extracted:** {}\n\n",
        analysis.unique_number_count()
    ));

    report.push_str("## Slide-by-Slide Analysis\n\n");
    for slide in &analysis.slides {
        report.push_str(&format!("### Slide {}\n", slide.slide_number));
        report.push_str(&format!("**Title:** {}\n\n", slide.title));

        if !slide.text_content.is_empty() {
            report.push_str("**Content:**\n");
            for text in &slide.text_content {
                report.push_str(&format!("- {}\n", text));
            }
            report.push('\n');
        }

        if !slide.charts.is_empty() {
            report.push_str("**Charts:**\n");
            for chart in &slide.charts {
                report.push_str(&format!("- {}\n", chart));
            }
            report.push('\n');
        }

        if !slide.numbers.is_empty() {
            report.push_str("**Key Numbers:**\n");
            for number in &slide.numbers {
                report.push_str(&format!("- {}\n", number));
            }
            report.push('\n');
        }

        report.push_str("---\n\n");
    }

    report.push_str("## All Extracted Numbers\n\n");
    let unique_numbers: BTreeSet<&str> =
        analysis.numbers_found.iter().map(String::as_str).collect();
    for number in &unique_numbers {
        report.push_str(&format!("- {}\n", number));
    }

    report.push_str("\n## Charts Identified\n\n");
    for chart in &analysis.charts_found {
        report.push_str(&format!("- {}\n", chart));
    }

    report
}
