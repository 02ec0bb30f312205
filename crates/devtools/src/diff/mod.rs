//! Chunked text diff.
//!
//! The cooperative loop made explicit: diff one bounded chunk, bump the
//! progress readout, check the cancellation flag, yield back to the runtime,
//! resume. The total line count is bounded before any work starts.

use crate::config;
use crate::prelude::{println, *};
use colored::{ColoredString, Colorize};
use devtools_core::diff::{
    diff_chunk, plan, summarize, ChangeTag, DiffLine, DEFAULT_CHUNK_LINES, DEFAULT_MAX_LINES,
};
use devtools_core::prefs::Theme;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, clap::Parser)]
#[command(name = "diff")]
#[command(about = "Chunked line diff between two files")]
pub struct App {
    #[clap(flatten)]
    pub options: DiffOptions,
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct DiffOptions {
    /// Left file
    #[arg(value_name = "LEFT")]
    pub left: PathBuf,

    /// Right file
    #[arg(value_name = "RIGHT")]
    pub right: PathBuf,

    /// Lines processed per cooperative slice
    #[arg(long, default_value_t = DEFAULT_CHUNK_LINES)]
    pub chunk_size: usize,

    /// Refuse inputs longer than this many lines
    #[arg(long, default_value_t = DEFAULT_MAX_LINES)]
    pub max_lines: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let options = app.options;

    let left_text = std::fs::read_to_string(&options.left)
        .map_err(|e| eyre!("Failed to read {}: {}", options.left.display(), e))?;
    let right_text = std::fs::read_to_string(&options.right)
        .map_err(|e| eyre!("Failed to read {}: {}", options.right.display(), e))?;
    let left: Vec<&str> = left_text.lines().collect();
    let right: Vec<&str> = right_text.lines().collect();

    let chunks = plan(left.len(), right.len(), options.max_lines, options.chunk_size)
        .map_err(|e| eyre!(e))?;

    if global.verbose {
        println!(
            "Diffing {} vs {} lines in {} chunks...",
            left.len(),
            right.len(),
            chunks.len()
        );
    }

    let cancelled = Arc::new(AtomicBool::new(false));
    let cancel_flag = cancelled.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_flag.store(true, Ordering::SeqCst);
        }
    });

    let progress = ProgressBar::new(chunks.len() as u64);
    progress.set_style(ProgressStyle::with_template(
        "{bar:40} {pos}/{len} chunks",
    )?);

    let mut lines: Vec<DiffLine> = Vec::new();
    for chunk in chunks {
        // One cancellation check per chunk boundary.
        if cancelled.load(Ordering::SeqCst) {
            progress.finish_and_clear();
            return Err(eyre!("diff cancelled"));
        }
        lines.extend(diff_chunk(&left, &right, chunk));
        progress.inc(1);
        tokio::task::yield_now().await;
    }
    progress.finish_and_clear();

    let summary = summarize(&lines);

    if options.json {
        let output = serde_json::json!({ "summary": summary, "lines": lines });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for line in &lines {
        match line.tag {
            ChangeTag::Added => println!("{}", added(&f!("+ {}", line.text))),
            ChangeTag::Removed => println!("{}", removed(&f!("- {}", line.text))),
            ChangeTag::Equal => println!("  {}", line.text),
        }
    }
    println!();
    println!(
        "{} added, {} removed, {} unchanged",
        summary.added, summary.removed, summary.unchanged
    );

    Ok(())
}

fn added(text: &str) -> ColoredString {
    match config::active_theme() {
        Theme::Dark => text.bright_green(),
        _ => text.green(),
    }
}

fn removed(text: &str) -> ColoredString {
    match config::active_theme() {
        Theme::Dark => text.bright_red(),
        _ => text.red(),
    }
}
