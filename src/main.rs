use anyhow::Result;
use clap::Parser;
use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use sortphotos::sortphotos_core::{Cli, OutputFormat, Sorter};
use std::fs::File;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep stdout clean for the JSON report
    let terminal_mode = match cli.output {
        OutputFormat::Text => TerminalMode::Stdout,
        OutputFormat::Json => TerminalMode::Stderr,
    };

    // Initialize loggers
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        LevelFilter::Info,
        Config::default(),
        terminal_mode,
        ColorChoice::Auto,
    )];

    if cli.log {
        loggers.push(WriteLogger::new(
            cli.log_level,
            Config::default(),
            File::create("sortphotos.log")?,
        ));
    }

    CombinedLogger::init(loggers)?;

    let options = cli.sort_options();
    let sorter = Sorter::new(&cli.target, options);
    let report = sorter.run(&cli.source)?;

    match cli.output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            let verb = options.mode.past_tense().to_lowercase();
            if options.dry_run {
                println!("\n[DRY RUN] Nothing was changed.");
                println!("  {} files would be {}", report.planned, verb);
            } else {
                println!("\nSorting complete!");
                println!("  {} files {}", report.transferred, verb);
            }
            if report.duplicates_skipped > 0 {
                println!("  {} duplicates skipped", report.duplicates_skipped);
            }
            if report.undated_skipped > 0 {
                println!("  {} files without date skipped", report.undated_skipped);
            }
            if report.failed > 0 {
                println!("  {} files failed", report.failed);
            }
        }
    }

    Ok(())
}
