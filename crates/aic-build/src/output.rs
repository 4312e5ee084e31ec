//! Styled terminal output for the build pipeline.
//!
//! Status lines keep the bracket prefixes the build scripts have always
//! printed, with color when the terminal supports it.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Print a success line
pub fn success(msg: &str) {
    println!(" {} {}", style("[+]").green().bold(), msg);
}

/// Print an error line
pub fn error(msg: &str) {
    eprintln!(" {} {}", style("[e]").red().bold(), msg);
}

/// Print a warning line
pub fn warning(msg: &str) {
    eprintln!(" {} {}", style("[w]").yellow().bold(), msg);
}

/// Print an informational line
pub fn info(msg: &str) {
    println!(" {} {}", style("[i]").blue().bold(), msg);
}

/// Print an indented key/value pair
pub fn kv(key: &str, value: &str) {
    println!("     {}: {}", style(key).dim(), value);
}

/// Spinner shown while the build fan-out waits on its barrier
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template(" {spinner:.cyan} {msg}")
            .unwrap()
            .tick_chars("-\\|/-"),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}
