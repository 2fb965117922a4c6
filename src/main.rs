use clap::Parser;
use statement_extractor::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    // No subcommand: show help and available commands
    let Some(command) = args.command else {
        show_help_and_commands();
        process::exit(0);
    };

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        tokio::select! {
            result = commands::run(command) => result,
            signal = tokio::signal::ctrl_c() => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(match signal {
                    Ok(()) => statement_extractor::Error::processing_interrupted(
                        "Processing interrupted by user",
                    ),
                    Err(e) => statement_extractor::Error::processing_interrupted(format!(
                        "Failed to listen for CTRL+C: {}",
                        e
                    )),
                })
            }
        }
    });

    match result {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Statement Extractor - Statutory Annual Statement Data Extraction");
    println!("================================================================");
    println!();
    println!("Extract premium exhibit and Schedule P loss development tables from");
    println!("annual statement XML spreadsheets into a single .xlsx workbook.");
    println!();
    println!("USAGE:");
    println!("    statement-extractor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    extract     Extract all statements into one workbook (main command)");
    println!("    classify    Report how each worksheet classifies without extracting");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Extract ./Inputs/*.xml into ./Output:");
    println!("    statement-extractor extract");
    println!();
    println!("    # Extract with custom paths:");
    println!("    statement-extractor extract --input /path/to/statements --output /path/to/output");
    println!();
    println!("    # Check which worksheets would be extracted:");
    println!("    statement-extractor classify --input /path/to/statements --format json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    statement-extractor <COMMAND> --help");
}
