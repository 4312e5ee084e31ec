//! aic-build - Build orchestrator for the AIC browser extension
//!
//! This is the main entry point for the build pipeline CLI.

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use aic_build::cli::Cli;
use aic_build::output;
use aic_build::pipeline::{self, SkipReason};
use aic_build_core::Layout;

#[tokio::main]
async fn main() {
    // Parse CLI args
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose, cli.quiet);

    // Sub-build failures are reported inside the pipeline and never become
    // a non-zero exit; only config-stage failures do.
    if let Err(e) = run(cli).await {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    debug!(
        "aic-build {} ({}, built {})",
        env!("CARGO_PKG_VERSION"),
        option_env!("GIT_SHA").unwrap_or("unknown"),
        env!("BUILD_DATE")
    );

    let cwd = std::env::current_dir()?;
    let root = camino::Utf8PathBuf::from_path_buf(cwd)
        .map_err(|p| anyhow::anyhow!("Project root is not valid UTF-8: {}", p.display()))?;
    let layout = Layout::from_root(root);
    let args = cli.resolve();

    output::kv("Genesys", &args.genesys);
    output::kv("Okta", &args.okta);
    output::kv("Extension", &args.extension);

    let summary = pipeline::run(&layout, &args).await?;

    if let Some(archive) = &summary.archive {
        output::success(&format!("Release archive written to {archive}"));
    } else {
        match summary.skipped {
            Some(SkipReason::NotRequested) => {
                output::info("Packaging skipped: zip not requested");
            }
            Some(SkipReason::BuildFailed) => {
                output::warning("Packaging skipped: at least one sub-build failed");
            }
            None => {}
        }
    }
    Ok(())
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}
