use crate::config::{CliOverrides, Config, DEFAULT_INPUT_PATH};
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "deckaudit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract slide content and figures from a PowerPoint deck")]
#[command(
    long_about = "DeckAudit walks every slide of a .pptx presentation, extracts text, \
                  shape metadata, chart mentions, and numeric tokens, and writes a JSON \
                  dump, a markdown audit report, and a reconciliation template."
)]
#[command(before_help = "📊 DeckAudit - PowerPoint Analysis & Audit Tool")]
#[command(after_help = "EXAMPLES:\n  \
    deckaudit\n  \
    deckaudit decks/board-review.pptx\n  \
    deckaudit decks/board-review.pptx --output board-analysis --verbose\n  \
    deckaudit --config audit.toml --output-format json\n\n\
    With no arguments, the deck is read from its conventional location:\n    \
    data/Strategic & Operational Overview.pptx")]
pub struct Cli {
    /// Presentation file to analyze (defaults to the conventional deck path)
    #[arg(value_name = "PPTX")]
    pub input: Option<PathBuf>,

    /// Output directory for analysis artifacts
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for console messages
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Maximum title length in characters
    #[arg(long, help = "A text run shorter than this may become a slide title")]
    pub title_limit: Option<usize>,

    /// Skip writing the reconciliation template
    #[arg(long, help = "Do not write reconciliation.json")]
    pub skip_reconciliation: bool,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run (show what would be done without executing)
    #[arg(long, help = "Show what would be analyzed without actually doing it")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        let write_reconciliation = if self.skip_reconciliation {
            Some(false)
        } else {
            None
        };

        CliOverrides::new()
            .with_input(self.input.clone())
            .with_output_dir(self.output.clone())
            .with_title_max_chars(self.title_limit)
            .with_write_reconciliation(write_reconciliation)
    }

    /// The input path after applying the default, for display before config
    /// loading has happened.
    pub fn effective_input(&self) -> PathBuf {
        self.input
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_PATH))
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}
