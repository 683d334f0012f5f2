mod api;
mod catalog;
mod config;
mod countdown;
mod report;

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, info_span};
use tracing_subscriber::EnvFilter;

use api::{DataSource, FixtureSource, HttpSource};
use catalog::ActiveFilters;
use report::OutputTarget;

/// Hacktoberfest board: lists the event's repositories and their open issues,
/// filters issues by label, counts down to the event and ranks contributors.
#[derive(Parser, Debug)]
#[command(name = "hacktoberfest-board", version, about)]
struct Cli {
    /// Only show issues carrying this label (repeatable; any match counts)
    #[arg(short, long = "label", value_name = "NAME")]
    labels: Vec<String>,

    /// Base URL of the backend serving /repo and /contrib
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Path to the config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Optional output file path for a markdown board
    #[arg(short, long, conflicts_with = "json")]
    output: Option<PathBuf>,

    /// Print the board as JSON
    #[arg(long)]
    json: bool,

    /// Render the countdown at this RFC 3339 moment instead of now
    #[arg(long, value_name = "TIMESTAMP", value_parser = countdown::parse_moment)]
    now: Option<chrono::DateTime<chrono::FixedOffset>>,

    /// Use the built-in sample data instead of the backend
    #[arg(long)]
    r#mock: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let _main_span = info_span!("board", labels = cli.labels.len()).entered();

    info!(path = %cli.config.display(), "loading configuration");
    let config = config::Config::load(&cli.config)?;

    let source: Box<dyn DataSource> = if cli.r#mock {
        info!("using built-in sample data");
        Box::new(FixtureSource::new())
    } else {
        let base_url = config.api_base_url(cli.api_url.as_deref());
        debug!(%base_url, timeout_secs = config.api.timeout_secs, "resolved API endpoint");
        Box::new(HttpSource::new(
            &base_url,
            Duration::from_secs(config.api.timeout_secs),
        )?)
    };

    info!("fetching repositories and contributors");
    let (repositories, contributors) =
        api::fetch_snapshot(source.as_ref(), &config.contributors.bot_marker)
            .await
            .map_err(|e| format!("failed to load board data: {e}"))?;
    info!(repositories = repositories.len(), contributors = contributors.len(), "fetched snapshot");

    let filters: ActiveFilters = cli.labels.into_iter().collect();
    let board = catalog::build_board(
        &repositories,
        &contributors,
        &filters,
        config.contributors.top_count,
    );

    let built_report = match cli.now {
        Some(now) => report::build(board, &config.event, &now),
        None => report::build(board, &config.event, &chrono::Utc::now()),
    };

    let target = match (&cli.output, cli.json) {
        (Some(path), _) => OutputTarget::Markdown(path),
        (None, true) => OutputTarget::Json,
        (None, false) => OutputTarget::Terminal,
    };
    report::output(&built_report, target)?;
    info!(
        shown = built_report.board.repositories.len(),
        phase = ?built_report.countdown.phase,
        "done"
    );

    Ok(())
}
