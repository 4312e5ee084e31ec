//! The build pipeline: the linear sequence the CLI driver walks through.
//!
//! `materialize config (unless skipped) -> clear stale artifacts -> fan out
//! builds -> join all -> copy artifacts -> package (gated on all-success
//! and zip-requested)`. No loops, no re-entrancy.

use anyhow::Result;
use camino::Utf8PathBuf;

use aic_build_core::{materialize, BuildArgs, Layout};

use crate::runner::BuildResult;
use crate::{collect, output, package, runner};

/// Why the packaging step did not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Zip was not requested on the command line
    NotRequested,
    /// At least one sub-build exited non-zero
    BuildFailed,
}

/// Outcome of one full pipeline run.
#[derive(Debug)]
pub struct RunSummary {
    /// Every sub-build's result, in completion order
    pub results: Vec<BuildResult>,

    /// Path of the release archive, when packaging ran
    pub archive: Option<Utf8PathBuf>,

    /// Why packaging was skipped, when it did not run
    pub skipped: Option<SkipReason>,
}

/// Drive one build run end to end.
///
/// A config-stage failure (profile validation or I/O) aborts before any
/// build is launched. Sub-build failures never abort the run: artifacts
/// are still collected and only the packaging gate reacts to them.
pub async fn run(layout: &Layout, args: &BuildArgs) -> Result<RunSummary> {
    if args.nowrite {
        output::info("Skipping config generation (--nowrite)");
    } else {
        materialize(layout, args)?;
        output::success("Config files materialized");
    }

    collect::clear_stale_artifacts(layout)?;

    let builds = runner::plan(layout, args.support, args.dev);
    let spinner = output::spinner(&format!("Running {} sub-build(s)...", builds.len()));
    let results = runner::run_all(builds).await?;
    spinner.finish_and_clear();

    let all_ok = collect::report(&results);
    collect::copy_artifacts(layout, args.support);

    let (archive, skipped) = if !args.zip {
        (None, Some(SkipReason::NotRequested))
    } else if !all_ok {
        (None, Some(SkipReason::BuildFailed))
    } else {
        (Some(package::create_archive(layout)?), None)
    };

    Ok(RunSummary {
        results,
        archive,
        skipped,
    })
}
