use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use scrollsnap_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "scrollsnap")]
#[command(author, version, about = "Section snap scrolling in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Read settings from this file instead of ~/.config/scrollsnap/config.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the terminal demo
    Run,
    /// Print the measurement pass for a stack of equal sections
    Inspect {
        /// Scroll offset of the viewport
        #[arg(long, default_value_t = 0.0)]
        scroll_top: f64,
        #[arg(long, default_value_t = 600.0)]
        viewport_height: f64,
        #[arg(long, default_value_t = 800.0)]
        viewport_width: f64,
        #[arg(long, default_value_t = 600.0)]
        section_height: f64,
        /// Number of sections
        #[arg(long, default_value_t = 4)]
        sections: usize,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print the effective settings as TOML
    Config {
        /// Print only the settings file location
        #[arg(long)]
        path: bool,
        /// Write the effective settings to the settings file
        #[arg(long)]
        save: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => AppConfig::load()?,
    };

    match cli.command {
        Some(Commands::Run) | None => {
            // The TUI owns the terminal, so logs go to a file
            init_logging(&config, true)?;
            commands::run::run(config)
        }
        Some(Commands::Inspect {
            scroll_top,
            viewport_height,
            viewport_width,
            section_height,
            sections,
            json,
        }) => {
            init_logging(&config, false)?;
            let layout = commands::inspect::Layout {
                scroll_top,
                viewport_width,
                viewport_height,
                section_height,
                sections,
            };
            commands::inspect::run(&config, &layout, json)
        }
        Some(Commands::Config { path, save }) => {
            init_logging(&config, false)?;
            commands::config::run(&config, path, save)
        }
    }
}

/// Install the tracing subscriber; `RUST_LOG` wins over the settings file
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );

    let file_layer = if to_file {
        let data_dir = config.data_dir();
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create {}", data_dir.display()))?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(config.log_path())?;
        Some(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
    } else {
        None
    };

    let stderr_layer = (!to_file).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();
    Ok(())
}
