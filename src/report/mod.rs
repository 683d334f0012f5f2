pub mod types;

pub use types::Report;

use std::fmt::Write as _;
use std::path::Path;

use chrono::{DateTime, TimeZone};
use colored::Colorize;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::api::{Label, Repository};
use crate::catalog::{difficulty::Difficulty, Board, SortedContributor};
use crate::config::EventConfig;
use crate::countdown::Countdown;
use types::{visible_labels, visible_languages, ContributionBar, MAX_BAR_SEGMENTS};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report file: {0}")]
    FileWrite(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Where the rendered board goes.
#[derive(Debug, Clone, Copy)]
pub enum OutputTarget<'a> {
    /// Colored text on stdout
    Terminal,
    /// Markdown written to a file
    Markdown(&'a Path),
    /// JSON on stdout, using the API's field names
    Json,
}

/// Attach the countdown at `now` to a built board.
pub fn build<Tz: TimeZone>(board: Board, event: &EventConfig, now: &DateTime<Tz>) -> Report {
    Report {
        countdown: Countdown::at(event, now),
        board,
    }
}

#[instrument(skip(report), fields(repositories = report.board.repositories.len(), contributors = report.board.contributors.len()))]
pub fn output(report: &Report, target: OutputTarget<'_>) -> Result<(), ReportError> {
    match target {
        OutputTarget::Terminal => {
            debug!("writing board to terminal");
            print_terminal_report(report);
            Ok(())
        }
        OutputTarget::Markdown(path) => {
            debug!(path = %path.display(), "writing board to file");
            write_markdown_report(report, path)
        }
        OutputTarget::Json => {
            debug!("writing board as JSON");
            println!("{}", serde_json::to_string_pretty(report)?);
            Ok(())
        }
    }
}

/// Format and print the board to the terminal with colors:
///
/// 03 days 17 hours 29 minutes 08 seconds until Hacktoberfest starts
///
/// Filters: [difficulty: easy] enhancement help wanted
///
/// ═══ teknologi-umum/hacktoberfest ═══
/// Code for hacktoberfest.teknologiumum.com
/// Languages: CSS, Dockerfile, JavaScript
///   • Write unit test for frontend  [difficulty: medium] [good first issue] [help wanted]
///     https://github.com/teknologi-umum/hacktoberfest/issues/62
///
/// ═══ Contributors ═══
///   ★ aldy505          ██████████░░░░░░░░░░░░░░░░░░░░  21 merged, 42 pending
fn print_terminal_report(report: &Report) {
    let board = &report.board;

    println!();
    println!("{}", report.countdown.to_string().bold());
    println!();

    if !board.categories.is_empty() {
        let filters: Vec<String> = board
            .categories
            .iter()
            .map(|category| {
                if board.active_filters.contains(category) {
                    format!("[{}]", category).green().bold().to_string()
                } else {
                    category.dimmed().to_string()
                }
            })
            .collect();
        println!("Filters: {}", filters.join("  "));
        println!();
    }

    if board.repositories.is_empty() {
        println!("  No repositories match the selected filters.");
        println!();
    }

    for repository in &board.repositories {
        println!("═══ {} ═══", repository.full_name.bold());
        if !repository.description.is_empty() {
            println!("{}", repository.description);
        }
        let languages = visible_languages(repository);
        if !languages.is_empty() {
            println!("Languages: {}", languages.join(", "));
        }
        for issue in &repository.issues {
            let labels: Vec<String> = visible_labels(issue).iter().map(colorize_label).collect();
            println!("  • {}  {}", issue.title, labels.join(" "));
            println!("    {}", issue.html_url.dimmed());
        }
        println!();
    }

    if !board.contributors.is_empty() {
        println!("═══ Contributors ═══");
        let width = board
            .contributors
            .iter()
            .map(|c| c.contributor.full_name.len())
            .max()
            .unwrap_or(0);
        for sorted in &board.contributors {
            print_contributor(sorted, width);
        }
        println!();
    }
}

fn print_contributor(sorted: &SortedContributor, width: usize) {
    let contributor = &sorted.contributor;
    let bar = ContributionBar::for_contributor(contributor);
    let marker = if sorted.is_top_contributor {
        "★".yellow().bold()
    } else {
        " ".normal()
    };
    let padding = " ".repeat((MAX_BAR_SEGMENTS - bar.segments()) as usize);
    println!(
        "  {} {:<width$}  {}{}{}  {} merged, {} pending",
        marker,
        contributor.full_name,
        "█".repeat(bar.merged as usize).green(),
        "█".repeat(bar.pending as usize).yellow(),
        padding,
        contributor.merged_pulls,
        contributor.pending_pulls,
        width = width,
    );
}

/// Render the board as markdown.
pub fn render_markdown(report: &Report) -> String {
    let board = &report.board;
    let mut md = String::new();

    md.push_str("# Hacktoberfest\n\n");
    let _ = writeln!(md, "**{}**\n", report.countdown);

    if !board.categories.is_empty() {
        let filters: Vec<String> = board
            .categories
            .iter()
            .map(|category| {
                if board.active_filters.contains(category) {
                    format!("**`{}`**", category)
                } else {
                    format!("`{}`", category)
                }
            })
            .collect();
        let _ = writeln!(md, "**Filters:** {}\n", filters.join(" "));
    }

    md.push_str("## Repositories\n\n");
    if board.repositories.is_empty() {
        md.push_str("No repositories match the selected filters.\n\n");
    }
    for repository in &board.repositories {
        write_repository_markdown(&mut md, repository);
    }

    md.push_str("## Contributors\n\n");
    if board.contributors.is_empty() {
        md.push_str("No contributors yet.\n");
    } else {
        md.push_str("| | Contributor | Merged | Pending |\n");
        md.push_str("|---|---|---|---|\n");
        for sorted in &board.contributors {
            let contributor = &sorted.contributor;
            let _ = writeln!(
                md,
                "| {} | [{}]({}) | {} | {} |",
                if sorted.is_top_contributor { "★" } else { "" },
                contributor.full_name,
                contributor.profile_url,
                contributor.merged_pulls,
                contributor.pending_pulls,
            );
        }
    }

    md
}

fn write_repository_markdown(md: &mut String, repository: &Repository) {
    let _ = writeln!(md, "### [{}]({})\n", repository.full_name, repository.html_url);
    if !repository.description.is_empty() {
        let _ = writeln!(md, "{}\n", repository.description);
    }
    let languages = visible_languages(repository);
    if !languages.is_empty() {
        let _ = writeln!(md, "**Languages:** {}\n", languages.join(", "));
    }
    for issue in &repository.issues {
        let labels: Vec<String> = visible_labels(issue)
            .iter()
            .map(|label| format!("`{}`", label.name))
            .collect();
        let _ = writeln!(md, "- [{}]({}) {}", issue.title, issue.html_url, labels.join(" "));
    }
    md.push('\n');
}

fn write_markdown_report(report: &Report, path: &Path) -> Result<(), ReportError> {
    std::fs::write(path, render_markdown(report))?;
    Ok(())
}

/// Difficulty labels are colored by level, the rest are plain.
fn colorize_label(label: &Label) -> String {
    let text = format!("[{}]", label.name);
    match Difficulty::from_label(&label.name) {
        Some(Difficulty::Easy) => text.green().to_string(),
        Some(Difficulty::Medium) => text.yellow().to_string(),
        Some(Difficulty::Hard) => text.red().to_string(),
        None => text.cyan().to_string(),
    }
}
