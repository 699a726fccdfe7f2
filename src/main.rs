use clap::Parser;
use deckaudit::{Cli, DeckAudit, DeckAuditError, OutputFormatter, OutputMode, UserFriendlyError};
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Handle special commands first
    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    // Create DeckAudit instance
    let audit = match DeckAudit::from_cli(&cli) {
        Ok(audit) => audit,
        Err(e) => {
            print_startup_error(&e);
            return 1;
        }
    };

    // Handle dry run mode
    if cli.dry_run {
        return handle_dry_run(&audit);
    }

    // Execute the analysis pipeline; any failure maps to exit code 1
    match audit.analyze() {
        Ok(_) => 0,
        Err(e) => {
            audit.handle_error(&e);
            1
        }
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "deckaudit.toml".to_string());

    match DeckAudit::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  deckaudit --config {}", config_path);
            println!("\nEdit the file to customize settings for your needs.");
            0
        }
        Err(e) => {
            eprintln!(
                "Failed to generate configuration file: {}",
                e.user_message()
            );
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn handle_dry_run(audit: &DeckAudit) -> i32 {
    let formatter = audit.output_formatter();
    let config = audit.config();

    formatter.start_operation("DRY RUN MODE - No files will be written");
    formatter.print_separator();

    // Validate the input deck
    if config.input.path.exists() {
        formatter.success(&format!(
            "✓ Presentation file found: {}",
            config.input.path.display()
        ));
    } else {
        formatter.error(&format!(
            "✗ Presentation file not found: {}",
            config.input.path.display()
        ));
        return 1;
    }

    // Display configuration that would be used
    formatter.info("Configuration that would be used:");
    println!("  Title length limit: {} chars", config.extraction.title_max_chars);
    println!(
        "  Output directory: {}",
        config.output.base_directory.display()
    );
    println!(
        "  Write reconciliation: {}",
        config.output.write_reconciliation
    );

    formatter.print_separator();

    formatter.info("Artifacts that would be written:");
    println!(
        "  {}",
        config
            .output
            .base_directory
            .join(deckaudit::report::ANALYSIS_FILE)
            .display()
    );
    println!(
        "  {}",
        config
            .output
            .base_directory
            .join(deckaudit::report::REPORT_FILE)
            .display()
    );
    if config.output.write_reconciliation {
        println!(
            "  {}",
            config
                .output
                .base_directory
                .join(deckaudit::report::RECONCILIATION_FILE)
                .display()
        );
    }

    formatter.print_separator();
    formatter.success("Dry run completed successfully");
    formatter.info("Run without --dry-run to perform the analysis");

    0
}

fn print_startup_error(error: &DeckAuditError) {
    // Create a basic formatter for startup errors
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}
