//! CLI argument parsing with clap

use clap::Parser;

use aic_build_core::BuildArgs;

/// Build orchestrator for the AIC browser extension.
///
/// Derives env/config/manifest files from the template document, runs each
/// sub-project build concurrently, collects the artifacts into the
/// extension directory, and optionally zips a versioned release archive.
#[derive(Parser, Debug)]
#[command(name = "aic-build")]
#[command(author, about, long_about = None)]
pub struct Cli {
    /// Genesys profile name from the template document
    #[arg(short, long, default_value = "stage")]
    pub genesys: String,

    /// Okta profile name from the template document
    #[arg(short, long, default_value = "stage")]
    pub okta: String,

    /// Extension target profile name from the template document
    #[arg(short, long, default_value = "stage")]
    pub extension: String,

    /// Extension version; read from the VERSION file when omitted
    #[arg(short = 'v', long)]
    pub version: Option<String>,

    /// Accepted for compatibility; stale artifacts are always cleared
    #[arg(short, long)]
    pub clean: bool,

    /// Apply the chrome-store overlay to the background config
    #[arg(short = 'w', long)]
    pub chrome_store: bool,

    /// Dev mode: dev overlays, dev build variant, debug and sourcemap flags
    #[arg(short, long)]
    pub dev: bool,

    /// Support mode: build and collect the login/settings bundles
    #[arg(short, long)]
    pub support: bool,

    /// Release mode: write the version into package.json and lerna.json
    #[arg(short, long)]
    pub release: bool,

    /// Zip the extension directory into a release archive after the builds
    #[arg(short, long)]
    pub zip: bool,

    /// Skip config generation entirely
    #[arg(short, long)]
    pub nowrite: bool,

    /// Increase diagnostic verbosity (repeatable)
    #[arg(long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress diagnostic output
    #[arg(long)]
    pub quiet: bool,
}

impl Cli {
    /// Resolve raw flag values into the immutable argument record.
    pub fn resolve(&self) -> BuildArgs {
        BuildArgs {
            genesys: self.genesys.trim().to_string(),
            okta: self.okta.trim().to_string(),
            extension: self.extension.trim().to_string(),
            version: self.version.clone(),
            clean: self.clean,
            chrome_store: self.chrome_store,
            dev: self.dev,
            support: self.support,
            release: self.release,
            zip: self.zip,
            nowrite: self.nowrite,
        }
    }
}
