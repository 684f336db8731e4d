//! # AI Daily Briefing
//!
//! Builds a daily HTML briefing of AI news, archives it, and publishes it to
//! a GitHub Pages repository.
//!
//! ## Usage
//!
//! ```sh
//! GITHUB_TOKEN=... ai_daily_briefing -r ./ai-daily-briefing
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture, one stage at a time:
//! 1. **Assembling**: Collect items from every source into a capped, padded record
//! 2. **Rendering**: Merge the record into the HTML template
//! 3. **Publishing**: Write the JSON snapshot and pages, then commit and push
//!
//! Exit status is 0 on success, including a run with nothing new to commit,
//! and 1 on any configuration, I/O or git failure.

use chrono::Local;
use clap::Parser;
use std::error::Error;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod assembler;
mod cli;
mod config;
mod git;
mod models;
mod outputs;
mod publish;
mod render;
mod sources;
mod utils;

use assembler::Assembler;
use cli::Cli;
use config::Config;
use publish::{PublishConfig, PublishOutcome, Publisher};
use utils::ensure_writable_dir;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("ai_daily_briefing starting up");

    match run(Cli::parse()).await {
        Ok(()) => {
            let elapsed = start_time.elapsed();
            info!(?elapsed, secs = elapsed.as_secs(), millis = elapsed.subsec_millis(), "✅ Done!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Briefing run failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Cli) -> Result<(), Box<dyn Error>> {
    debug!(
        config = ?args.config,
        root = ?args.root,
        template = ?args.template,
        no_push = args.no_push,
        token_set = args.github_token.is_some(),
        "Parsed CLI arguments"
    );

    let mut config = Config::load(args.config.as_deref())?;
    args.apply(&mut config);

    // Early check: the site root must be writable before anything is fetched
    ensure_writable_dir(&config.site.root).await?;

    let now = Local::now();

    // ---- Assemble ----
    info!("🔍 Fetching news...");
    let client = sources::http_client()?;
    let sources = sources::from_config(&config, &client);
    let record = Assembler::new(now.date_naive()).assemble(&sources).await;

    // ---- Render ----
    info!("🎨 Generating HTML...");
    let template =
        render::load_template(&config.site.template_path(), &config.github.repo_url()).await;
    let generated_at = now.format("%Y-%m-%d %H:%M").to_string();
    let document = render::render(&template, &record, &generated_at);
    info!(bytes = document.len(), "Rendered briefing");

    // ---- Publish ----
    info!("💾 Saving and pushing...");
    let publisher = Publisher::new(PublishConfig {
        root: config.site.root.clone(),
        github: config.github.clone(),
        token: args.github_token.clone(),
        push: !args.no_push,
    });
    match publisher.publish(&record, &document).await? {
        PublishOutcome::Unchanged => info!(date = %record.date, "Briefing already published"),
        PublishOutcome::Committed { pushed } => {
            info!(date = %record.date, pushed, "Briefing published")
        }
    }

    Ok(())
}
