// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: (C) 2025 Cranky Kernel <crankykernel@proton.me>

use anyhow::Result;
use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use tvmaze_tui::{Config, run_tui};

mod cli;
use cli::{CommandContext, EpisodesCommand, OutputFormat, ShowsCommand};

fn cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Cyan.on_default())
}

#[derive(Parser)]
#[command(name = "tvmaze-tui")]
#[command(about = "A terminal UI for browsing TV shows and episodes from TVMaze")]
#[command(version)]
#[command(styles = cargo_style())]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug logging to file (tvmaze_debug.log)
    #[arg(long, global = true)]
    debug_log: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch interactive TUI (default if no command given)
    Tui,

    /// Command-line interface for scriptable operations
    Cli(CliCommands),
}

#[derive(Parser)]
#[command(styles = cargo_style())]
struct CliCommands {
    #[command(subcommand)]
    command: CliSubcommands,
}

#[derive(Subcommand)]
enum CliSubcommands {
    /// List shows, sorted by name
    Shows {
        /// Case-insensitive substring filter (name, genres, summary)
        query: Option<String>,
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// List episodes of a show
    Episodes {
        /// Show id or exact show name
        show: String,
        /// Case-insensitive substring filter (name, summary)
        query: Option<String>,
        /// Print a single episode by SxxEyy code
        #[arg(short, long)]
        episode: Option<String>,
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    if cli.debug_log {
        let file = File::create("tvmaze_debug.log")?;
        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_level(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(file_layer)
            .with(
                EnvFilter::from_default_env()
                    .add_directive("tvmaze_tui=debug".parse()?)
                    .add_directive("hyper_util=error".parse()?),
            )
            .init();
    } else if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env()
                    .add_directive(tracing::Level::DEBUG.into())
                    .add_directive("hyper_util=error".parse()?),
            )
            .init();
    } else if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive("hyper_util=error".parse()?),
            )
            .init();
    }

    // Load configuration
    let config_path = dirs::config_dir()
        .map(|p| p.join("tvmaze-tui").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"));

    let config = if config_path.exists() {
        Config::load(&config_path)?
    } else {
        Config::default()
    };

    // Execute command
    match cli.command {
        Some(Commands::Tui) | None => {
            run_tui(config).await?;
        }

        Some(Commands::Cli(cli_args)) => {
            let context = CommandContext::new(config);

            match cli_args.command {
                CliSubcommands::Shows { query, format } => {
                    let output_format = OutputFormat::from_str(&format)?;
                    let cmd = ShowsCommand {
                        query,
                        format: output_format,
                    };
                    cmd.execute(context).await?;
                }

                CliSubcommands::Episodes {
                    show,
                    query,
                    episode,
                    format,
                } => {
                    let output_format = OutputFormat::from_str(&format)?;
                    let cmd = EpisodesCommand {
                        show,
                        query,
                        episode,
                        format: output_format,
                    };
                    cmd.execute(context).await?;
                }
            }
        }
    }

    Ok(())
}
