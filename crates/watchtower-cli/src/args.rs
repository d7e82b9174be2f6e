//! Command line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use watchtower_core::domain::Timestamp;

use crate::config::{EMAIL_KEY, PASSWORD_KEY, URL_KEY};

#[derive(Debug, Parser)]
#[command(name = "watchtower", version, about = "Export tracker data as a static tree for the Watchtower viewer")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Pull data from a Kitsu instance
    Kitsu(KitsuArgs),
    /// Generate synthetic demo data
    Example(ExampleArgs),
}

/// Options shared by every data source.
#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Directory in which `data/` is written (defaults to the current directory)
    #[arg(short, long, value_parser = existing_dir)]
    pub destination: Option<PathBuf>,

    /// Only process these project ids
    #[arg(short, long, num_args = 0..)]
    pub projects: Vec<String>,

    /// Record counts under this timestamp instead of now
    #[arg(long, value_parser = parse_timestamp)]
    pub timestamp: Option<Timestamp>,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct KitsuArgs {
    #[command(flatten)]
    pub output: OutputArgs,

    /// Dotenv file holding the Kitsu settings; takes precedence when present
    #[arg(long, default_value = ".env.local")]
    pub dotenv: PathBuf,

    /// Kitsu API base url, e.g. https://kitsu.example.com/api
    #[arg(long, env = URL_KEY)]
    pub base_url: Option<String>,

    #[arg(long, env = EMAIL_KEY)]
    pub email: Option<String>,

    #[arg(long, env = PASSWORD_KEY, hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Debug, Args)]
pub struct ExampleArgs {
    #[command(flatten)]
    pub output: OutputArgs,

    /// Seed for reproducible data
    #[arg(long)]
    pub seed: Option<u64>,
}

fn existing_dir(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.is_dir() {
        Ok(path)
    } else {
        Err(format!("{value} is not an existing directory"))
    }
}

fn parse_timestamp(value: &str) -> Result<Timestamp, String> {
    Timestamp::parse(value).map_err(|e| e.to_string())
}
