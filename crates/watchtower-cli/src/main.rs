//! watchtower - トラッカーのデータを Watchtower ビューア向けの静的ツリーに書き出す
//!
//! ```text
//! watchtower kitsu   [-d DEST] [-p ID...] [--dotenv FILE | --base-url URL --email E --password P]
//! watchtower example [-d DEST] [-p ID...] [--seed N]
//! ```

mod args;
mod config;
mod kitsu;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use watchtower_core::app::PipelineBuilder;
use watchtower_core::impls::{ExampleSource, projects_root};
use watchtower_core::ports::{SystemClock, TrackerSource, UlidGenerator};

use crate::args::{Cli, Command, OutputArgs};
use crate::config::TrackerConfig;
use crate::kitsu::KitsuClient;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    match cli.command {
        Command::Kitsu(args) => {
            let config =
                TrackerConfig::resolve(&args.dotenv, args.base_url, args.email, args.password)
                    .context("failed to resolve Kitsu settings")?;
            info!(base_url = %config.base_url, "connecting to Kitsu");
            let client = KitsuClient::connect(&config)
                .await
                .context("failed to log in to Kitsu")?;
            execute(client, args.output).await
        }
        Command::Example(args) => {
            let source = match args.seed {
                Some(seed) => ExampleSource::seeded(seed),
                None => ExampleSource::generate(&UlidGenerator::new(SystemClock), None),
            };
            execute(source, args.output).await
        }
    }
}

/// source を受け取ってパイプラインを 1 回回す
async fn execute<S: TrackerSource + 'static>(source: S, output: OutputArgs) -> Result<()> {
    let destination = match output.destination {
        Some(path) => path,
        None => std::env::current_dir().context("failed to read current directory")?,
    };

    let mut builder = PipelineBuilder::new()
        .source(source)
        .destination(&destination)
        .only_projects(output.projects);
    if let Some(timestamp) = output.timestamp {
        builder = builder.timestamp(timestamp);
    }
    let pipeline = builder.build()?;

    let summary = pipeline.run().await?;
    info!(
        projects = summary.projects.len(),
        new_points = summary.new_points(),
        "data written to {}",
        display_path(projects_root(&destination))
    );

    if output.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}

fn display_path(path: PathBuf) -> String {
    path.canonicalize().unwrap_or(path).display().to_string()
}
