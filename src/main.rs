//! repatch - Patch eligibility checker for legacy macOS applications
//!
//! Locates a legacy application on disk, classifies its installed version
//! against the compatibility catalog, and reports which remediation path
//! applies: patch now, update first, already patched, or guidance.

use clap::Parser;
use repatch::cli::CliArgs;
use repatch::domain::TargetId;
use repatch::orchestrator::Orchestrator;
use repatch::output::{create_formatter, OutputConfig};
use std::io::{self, Write};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    if args.list_apps {
        for target in TargetId::all() {
            println!("{:<18} {}", target.key(), target.display_name());
        }
        return ExitCode::SUCCESS;
    }

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    if args.verbose {
        eprintln!("repatch v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Search root: {}", args.search_root.display());
        if let Some(path) = &args.locate {
            eprintln!("Mode: manual locate ({})", path.display());
        }
    }

    let orchestrator = Orchestrator::new(args.clone())?;
    if args.verbose {
        eprintln!("Checking: {}", orchestrator.target_id().display_name());
    }
    let result = orchestrator.run().await?;

    let output_config = OutputConfig::from_cli(args.json, args.verbose, args.quiet);
    let formatter = create_formatter(output_config);

    let mut stdout = io::stdout().lock();
    formatter.format(&result, &mut stdout)?;
    stdout.flush()?;

    // Classification always succeeds; non-fatal errors (e.g. a failed
    // catalog refresh) mean the result was computed from fallback data.
    if result.errors.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(2))
    }
}
