//! Plain terminal rendering of a page view for one-shot runs.

use anyhow::{Context, Result};
use colored::*;

use crate::page::{ResultsRegion, SkillList};

const BAR_WIDTH: usize = 30;

/// Score bar, filled in proportion to the score. The fill is clamped to the
/// bar; the label next to it is not.
pub fn score_bar(fill_percent: f64, width: usize) -> (String, String) {
    let ratio = if fill_percent.is_finite() {
        (fill_percent / 100.0).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (width as f64 * ratio).round() as usize;
    let empty = width.saturating_sub(filled);
    ("█".repeat(filled), "░".repeat(empty))
}

/// Tags as `[a] [b]`, or `None` for an empty list.
pub fn tag_line(list: &SkillList) -> Option<String> {
    if list.is_empty() {
        return None;
    }
    let tags: Vec<String> = list
        .tags()
        .iter()
        .map(|tag| format!("[{}]", tag.display_text()))
        .collect();
    Some(tags.join(" "))
}

pub fn print_results(results: &ResultsRegion) {
    if !results.is_visible() {
        return;
    }

    let (filled, empty) = score_bar(results.fill_percent, BAR_WIDTH);
    println!("\n{}", "Match Results".bright_white().bold());
    println!(
        "  {} {}{} {}",
        "Match score".bright_white(),
        filled.bright_cyan(),
        empty.bright_black(),
        results.score_text.bright_cyan().bold()
    );

    println!("\n  {}", "Matching skills".bright_green().bold());
    match tag_line(&results.matching_skills) {
        Some(line) => println!("    {}", line.green()),
        None => println!("    {}", "(none)".bright_black()),
    }

    println!("\n  {}", "Missing skills".bright_red().bold());
    match tag_line(&results.missing_skills) {
        Some(line) => println!("    {}", line.red()),
        None => println!("    {}", "(none)".bright_black()),
    }
    println!();
}

pub fn print_json(results: &ResultsRegion) -> Result<()> {
    let json = serde_json::to_string_pretty(&results.displayed_result())
        .context("Failed to serialize match result")?;
    println!("{json}");
    Ok(())
}

pub fn print_alert(message: &str) {
    let message: String = message
        .chars()
        .map(|c| if c.is_control() && c != '\n' { ' ' } else { c })
        .collect();
    eprintln!("{} {}", "✗".bright_red(), message.bright_red());
}
