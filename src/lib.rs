pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod loader;
pub mod report;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, ExtractionConfig, InputConfig, OutputConfig};
pub use error::{DeckAuditError, Result, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{AnalysisResult, NumberScanner, ShapeInfo, SlideAnalysis, SlideAnalyzer};
pub use loader::{PptxPackage, ShapeContent, ShapeKind, SlideContent};
pub use report::{GoldenRecord, OutputManager, ReconciliationTemplate};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use std::path::Path;

/// Main library interface for DeckAudit functionality
pub struct DeckAudit {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl DeckAudit {
    /// Create a new DeckAudit instance with the provided configuration
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager =
            ProgressManager::new(!quiet && output_mode == OutputMode::Human);

        Self {
            config,
            output_formatter,
            progress_manager,
        }
    }

    /// Create DeckAudit instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            crate::cli::OutputFormat::Human => OutputMode::Human,
            crate::cli::OutputFormat::Json => OutputMode::Json,
            crate::cli::OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(
            config,
            output_mode,
            cli_args.verbosity_level(),
            cli_args.quiet,
        ))
    }

    /// Run the full pipeline on the configured input deck.
    pub fn analyze(&self) -> Result<AnalysisResult> {
        let input = self.config.input.path.clone();

        self.output_formatter.start_operation("Starting deck analysis");

        // Step 1: Validate the input file
        if !input.exists() {
            return Err(DeckAuditError::InputNotFound {
                path: input.display().to_string(),
            });
        }

        if let Ok(metadata) = std::fs::metadata(&input) {
            self.output_formatter.info(&format!(
                "Found presentation file: {} ({})",
                input.display(),
                ui::output::format_bytes(metadata.len())
            ));
        }

        // Step 2: Open the package and resolve slides
        let mut package = PptxPackage::open(&input)?;
        let slide_count = package.slide_count();
        self.output_formatter
            .info(&format!("Found {} slides to analyze", slide_count));

        // Step 3: Read every slide, in deck order
        let slides = self.read_slides(&mut package)?;

        // Step 4: Analyze
        let analyzer = SlideAnalyzer::new(self.config.extraction.title_max_chars);
        let analysis = analyzer.analyze_presentation(&slides);

        // Step 5: Write output artifacts
        let output_manager = self.write_outputs(&analysis)?;

        self.output_formatter.success(&format!(
            "Analysis complete! Check the '{}' folder",
            output_manager.output_directory().display()
        ));

        // Step 6: Summary
        self.output_formatter.print_analysis_summary(&analysis);
        self.output_formatter.print_next_steps(
            output_manager.output_directory(),
            self.config.output.write_reconciliation,
        );

        Ok(analysis)
    }

    /// Read all slides with per-slide progress indication
    fn read_slides(&self, package: &mut PptxPackage) -> Result<Vec<SlideContent>> {
        let slide_count = package.slide_count();
        let progress = self.progress_manager.create_slide_progress(slide_count as u64);

        let mut slides = Vec::with_capacity(slide_count);
        for index in 0..slide_count {
            ui::progress::update_slide_progress(&progress, index + 1);
            self.output_formatter
                .debug(&format!("Processing slide {}...", index + 1));
            slides.push(package.read_slide(index)?);
        }

        ui::progress::finish_progress_with_summary(
            &progress,
            &format!("Processed {} slides", slide_count),
        );

        Ok(slides)
    }

    /// Write the structured dump, the narrative report, and (unless
    /// disabled) the reconciliation template
    fn write_outputs(&self, analysis: &AnalysisResult) -> Result<OutputManager> {
        let output_manager = OutputManager::new(self.config.output.base_directory.clone());
        output_manager.initialize()?;

        output_manager.write_analysis(analysis)?;
        output_manager.write_report(analysis)?;

        if self.config.output.write_reconciliation {
            output_manager.write_reconciliation()?;
            self.output_formatter.info("Created reconciliation template");
        }

        Ok(output_manager)
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config).map_err(DeckAuditError::Io)?;
        Ok(())
    }

    /// Get configuration reference
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get output formatter reference
    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &DeckAuditError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Convenience function to analyze a deck with minimal setup
pub fn analyze_file<P: AsRef<Path>>(
    input: P,
    output_dir: Option<&Path>,
) -> Result<AnalysisResult> {
    let mut config = Config::default();
    config.input.path = input.as_ref().to_path_buf();

    if let Some(output_path) = output_dir {
        config.output.base_directory = output_path.to_path_buf();
    }

    let audit = DeckAudit::new(config, OutputMode::Plain, 0, true);
    audit.analyze()
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
