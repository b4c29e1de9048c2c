// src/utils/console.rs

//! Operator-facing console report.
//!
//! Stage banners, per-step lines and the sentiment summary block. Diagnostic
//! messages go through the `log` facade instead.

use std::sync::OnceLock;

use chrono::Local;

use crate::models::{SentimentLabel, SentimentResult};
use crate::pipeline::SummaryReport;

const RULE_WIDTH: usize = 50;

/// Percentage points represented by one bar glyph.
const PERCENT_PER_BAR: f64 = 5.0;

/// Whether console output is enabled
static ENABLED: OnceLock<bool> = OnceLock::new();

/// Enable or silence console output. Only the first call takes effect.
pub fn init(enabled: bool) {
    let _ = ENABLED.set(enabled);
}

fn enabled() -> bool {
    ENABLED.get().copied().unwrap_or(true)
}

fn timestamp() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

/// Log a header
pub fn header(title: &str) {
    if enabled() {
        println!();
        println!("{}", "=".repeat(RULE_WIDTH));
        println!("  {}", title);
        println!("{}", "=".repeat(RULE_WIDTH));
    }
}

/// Log a step in a process
pub fn step(step_num: usize, total: usize, message: &str) {
    if enabled() {
        println!("[{}] [STEP {}/{}] {}", timestamp(), step_num, total, message);
    }
}

/// Log a success message
pub fn success(message: &str) {
    if enabled() {
        println!("[{}] ✓ {}", timestamp(), message);
    }
}

/// Log a failure message; shown even when the console is silenced
pub fn failure(message: &str) {
    eprintln!("[{}] ✗ {}", timestamp(), message);
}

/// Log a sub-item (indented)
pub fn sub_item(message: &str) {
    if enabled() {
        println!("    {}", message);
    }
}

/// Per-post line of the scoring step.
pub fn post_line(number: usize, result: &SentimentResult) -> String {
    format!(
        "Tweet {}: {} (polarity: {:.3})",
        number,
        result.label.display_name(),
        result.polarity
    )
}

/// Distribution bar, one glyph per 5 percentage points.
pub fn bar(percentage: f64) -> String {
    let glyphs = (percentage / PERCENT_PER_BAR).max(0.0) as usize;
    "█".repeat(glyphs)
}

/// Lines of the summary block.
pub fn summary_lines(report: &SummaryReport, keyword: Option<&str>) -> Vec<String> {
    let rule = "=".repeat(RULE_WIDTH);
    let mut lines = vec![
        rule.clone(),
        "SENTIMENT ANALYSIS SUMMARY".to_string(),
        rule.clone(),
        format!("Total tweets analyzed: {}", report.total),
    ];
    if let Some(keyword) = keyword {
        lines.push(format!("Search keyword: {}", keyword));
    }

    lines.push(String::new());
    lines.push("Sentiment Distribution:".to_string());
    for label in SentimentLabel::ALL {
        let percentage = report.percentage(label);
        lines.push(format!(
            "  {:8} : {:2} tweets ({:5.1}%) {}",
            label.display_name(),
            report.count(label),
            percentage,
            bar(percentage)
        ));
    }

    lines.push(String::new());
    lines.push(format!("Average Polarity Score: {:.3}", report.mean_polarity));
    lines.push(format!(
        "Overall Sentiment: {}",
        report.overall.as_str().to_uppercase()
    ));
    lines.push(rule);
    lines
}

/// Print the summary block
pub fn summary(report: &SummaryReport, keyword: Option<&str>) {
    if enabled() {
        println!();
        for line in summary_lines(report, keyword) {
            println!("{}", line);
        }
    }
}
