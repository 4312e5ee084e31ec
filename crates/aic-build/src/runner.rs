//! Sub-build fan-out and barrier join.
//!
//! Every enabled sub-project build runs as its own child process on its own
//! tokio task. All launches start before any is awaited; the coordinator
//! joins every task, then drains the shared completion channel. No timeout,
//! no retry, no cancellation: a hung build command hangs the run, and a
//! failed build never aborts its siblings.

use std::process::Stdio;

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::debug;

use aic_build_core::Layout;

/// One independently buildable unit and the command that builds it.
#[derive(Debug, Clone)]
pub struct SubBuild {
    /// Identifier echoed in build reports
    pub id: String,

    /// Program to launch
    pub program: String,

    /// Program arguments
    pub args: Vec<String>,

    /// Working directory for the build command
    pub cwd: Utf8PathBuf,
}

impl SubBuild {
    /// A sub-build driven by an npm script in the given directory.
    pub fn npm_script(id: &str, script: &str, cwd: Utf8PathBuf) -> Self {
        Self {
            id: id.to_string(),
            program: "npm".to_string(),
            args: vec!["run".to_string(), script.to_string()],
            cwd,
        }
    }
}

/// Exit status and combined output of one finished sub-build.
#[derive(Debug, Clone)]
pub struct BuildResult {
    /// Sub-build identifier
    pub id: String,

    /// Process exit code (127 when the command could not be launched)
    pub code: i32,

    /// Captured stdout and stderr, combined
    pub output: String,
}

impl BuildResult {
    /// Whether the build command exited zero.
    pub fn succeeded(&self) -> bool {
        self.code == 0
    }
}

/// Background bundle build variant, selected by mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BgVariant {
    Prod,
    Support,
    Dev,
}

impl BgVariant {
    /// Support mode wins over dev mode; prod is the fallback.
    pub fn select(support: bool, dev: bool) -> Self {
        if support {
            Self::Support
        } else if dev {
            Self::Dev
        } else {
            Self::Prod
        }
    }

    /// The npm script that builds this variant.
    pub fn npm_script(&self) -> &'static str {
        match self {
            Self::Prod => "build-prod",
            Self::Support => "build-support",
            Self::Dev => "build-dev",
        }
    }
}

/// The set of sub-builds enabled for this run.
///
/// UI and background always build; the login and settings bundles join in
/// support mode.
pub fn plan(layout: &Layout, support: bool, dev: bool) -> Vec<SubBuild> {
    let variant = BgVariant::select(support, dev);
    let mut builds = vec![
        SubBuild::npm_script("UI", "build", layout.ui_dir.clone()),
        SubBuild::npm_script("BG", variant.npm_script(), layout.bg_dir.clone()),
    ];
    if support {
        builds.push(SubBuild::npm_script("LOGIN", "build", layout.login_dir.clone()));
        builds.push(SubBuild::npm_script(
            "SETTINGS",
            "build",
            layout.settings_dir.clone(),
        ));
    }
    builds
}

/// Launch every sub-build concurrently and block until all have finished.
///
/// Each task deposits exactly one [`BuildResult`] on the completion
/// channel; the channel is only drained after the barrier join, so the
/// returned set is always complete.
pub async fn run_all(builds: Vec<SubBuild>) -> Result<Vec<BuildResult>> {
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut handles = Vec::with_capacity(builds.len());
    for build in builds {
        let tx = tx.clone();
        handles.push(tokio::spawn(async move {
            let result = execute(&build).await;
            let _ = tx.send(result);
        }));
    }
    drop(tx);

    for handle in handles {
        handle.await.context("sub-build task panicked")?;
    }

    let mut results = Vec::new();
    while let Ok(result) = rx.try_recv() {
        results.push(result);
    }
    Ok(results)
}

/// Run one build command to completion, capturing combined output.
async fn execute(build: &SubBuild) -> BuildResult {
    debug!("Launching {} ({} {:?}) in {}", build.id, build.program, build.args, build.cwd);

    let output = Command::new(&build.program)
        .args(&build.args)
        .current_dir(&build.cwd)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await;

    match output {
        Ok(output) => {
            let mut text = String::from_utf8_lossy(&output.stdout).trim().to_string();
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            if !stderr.is_empty() {
                if !text.is_empty() {
                    text.push('\n');
                }
                text.push_str(stderr);
            }
            BuildResult {
                id: build.id.clone(),
                code: output.status.code().unwrap_or(-1),
                output: text,
            }
        }
        // Shell convention for a command that could not be started; the
        // failed launch still deposits its one result.
        Err(e) => BuildResult {
            id: build.id.clone(),
            code: 127,
            output: format!("failed to launch {}: {}", build.program, e),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sh(id: &str, script: &str, cwd: &TempDir) -> SubBuild {
        SubBuild {
            id: id.to_string(),
            program: "sh".to_string(),
            args: vec!["-c".to_string(), script.to_string()],
            cwd: Utf8PathBuf::from_path_buf(cwd.path().to_path_buf()).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_every_launch_deposits_one_result() {
        let dir = TempDir::new().unwrap();
        let builds = vec![
            sh("A", "echo alpha", &dir),
            sh("B", "echo beta; exit 3", &dir),
            sh("C", "echo gamma", &dir),
        ];

        let mut results = run_all(builds).await.unwrap();
        results.sort_by(|a, b| a.id.cmp(&b.id));

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].code, 0);
        assert_eq!(results[0].output, "alpha");
        assert_eq!(results[1].code, 3);
        assert_eq!(results[2].code, 0);
    }

    #[tokio::test]
    async fn test_failure_does_not_abort_siblings() {
        let dir = TempDir::new().unwrap();
        let marker = dir.path().join("sibling-finished");
        let builds = vec![
            sh("FAST_FAIL", "exit 1", &dir),
            sh(
                "SLOW_OK",
                &format!("sleep 1 && touch {}", marker.display()),
                &dir,
            ),
        ];

        let results = run_all(builds).await.unwrap();

        assert_eq!(results.len(), 2);
        assert!(marker.exists(), "sibling build should run to completion");
    }

    #[tokio::test]
    async fn test_output_combines_stdout_and_stderr() {
        let dir = TempDir::new().unwrap();
        let builds = vec![sh("MIXED", "echo out; echo err >&2", &dir)];

        let results = run_all(builds).await.unwrap();

        assert!(results[0].output.contains("out"));
        assert!(results[0].output.contains("err"));
    }

    #[tokio::test]
    async fn test_unlaunchable_command_reports_exit_127() {
        let dir = TempDir::new().unwrap();
        let builds = vec![SubBuild {
            id: "MISSING".to_string(),
            program: "definitely-not-a-real-build-tool".to_string(),
            args: vec![],
            cwd: Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap(),
        }];

        let results = run_all(builds).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].code, 127);
        assert!(!results[0].succeeded());
        assert!(results[0].output.contains("failed to launch"));
    }

    #[test]
    fn test_bg_variant_selection() {
        assert_eq!(BgVariant::select(false, false), BgVariant::Prod);
        assert_eq!(BgVariant::select(false, true), BgVariant::Dev);
        // support wins even when dev is also set
        assert_eq!(BgVariant::select(true, true), BgVariant::Support);
        assert_eq!(BgVariant::select(true, false).npm_script(), "build-support");
    }

    #[test]
    fn test_plan_default_and_support() {
        let layout = Layout::from_root("/work/aic");

        let default = plan(&layout, false, true);
        assert_eq!(default.len(), 2);
        assert_eq!(default[0].id, "UI");
        assert_eq!(default[1].args, vec!["run", "build-dev"]);
        assert_eq!(default[1].cwd, "/work/aic/modules/aic-bg");

        let support = plan(&layout, true, false);
        assert_eq!(support.len(), 4);
        assert_eq!(support[2].id, "LOGIN");
        assert_eq!(support[3].cwd, "/work/aic/modules/aic-ui-utils/aic_settings");
    }
}
