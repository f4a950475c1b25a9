//! `dogan-live` CLI - resolve HLS streams from Doğan Media Group pages

mod cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dogan_live::Config;

#[derive(Parser)]
#[command(name = "dogan-live")]
#[command(about = "Resolve HLS streams from teve2, Kanal D, CNN Türk, Dream TV and Dream Türk pages")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: ~/.config/dogan-live/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a page URL is supported (no network access)
    Check {
        /// Page URL
        url: String,
    },

    /// List the stream variants available on a page
    Streams {
        /// Page URL
        url: String,

        /// Print the variants as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the playlist URL of a single variant
    Url {
        /// Page URL
        url: String,

        /// Quality: best, worst, or a height such as 720
        #[arg(short, long)]
        quality: Option<String>,

        /// Print the master playlist URL instead of a variant
        #[arg(long)]
        manifest: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match cli.command {
        Commands::Check { url } => {
            cmd::check::cmd_check(&url)?;
        }
        Commands::Streams { url, json } => {
            let config = Config::load(cli.config.as_deref())?;
            cmd::streams::cmd_streams(&url, json, &config).await?;
        }
        Commands::Url {
            url,
            quality,
            manifest,
        } => {
            let config = Config::load(cli.config.as_deref())?;
            cmd::url::cmd_url(&url, quality.as_deref(), manifest, &config).await?;
        }
    }

    Ok(())
}
