use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use smooth_scroll_lib::commands::run::ParameterOverrides;
use smooth_scroll_lib::commands::settings::SettingsUpdate;
use smooth_scroll_lib::{commands, init_tracing, SettingsStore, Theme};

#[derive(Parser)]
#[command(name = "smooth-scroll")]
#[command(author, version, about = "System-wide smooth mouse-wheel scrolling")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Settings file to use instead of the per-user default
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Intercept and smooth wheel input until Ctrl+C (default)
    Run {
        /// Fraction of the remaining distance scrolled per tick (0-1]
        #[arg(long)]
        smoothness: Option<f64>,
        /// Scale applied to every wheel notch
        #[arg(long)]
        multiplier: Option<f64>,
        /// Tick period in milliseconds
        #[arg(long)]
        interval: Option<u32>,
    },
    /// Inspect or edit saved settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the effective settings
    Show,
    /// Change one or more settings
    Set {
        #[arg(long)]
        smoothness: Option<f64>,
        #[arg(long)]
        multiplier: Option<f64>,
        #[arg(long)]
        interval: Option<u32>,
        /// light or dark
        #[arg(long)]
        theme: Option<Theme>,
    },
    /// Restore default smoothing parameters
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(if cli.verbose {
        "smooth_scroll=debug,smooth_scroll_lib=debug"
    } else {
        "smooth_scroll=info,smooth_scroll_lib=info"
    });

    tracing::info!("Starting Smooth Scroll v{}", env!("CARGO_PKG_VERSION"));

    let store = match cli.settings {
        Some(path) => SettingsStore::new(path),
        None => SettingsStore::open_default()?,
    };

    match cli.command.unwrap_or(Commands::Run {
        smoothness: None,
        multiplier: None,
        interval: None,
    }) {
        Commands::Run {
            smoothness,
            multiplier,
            interval,
        } => {
            let overrides = ParameterOverrides {
                smoothness,
                scroll_multiplier: multiplier,
                interval_ms: interval,
            };
            commands::run::run(&store, overrides)
                .await
                .context("Smooth scrolling failed")?;
        }
        Commands::Settings { action } => match action {
            SettingsAction::Show => print!("{}", commands::settings::show(&store)),
            SettingsAction::Set {
                smoothness,
                multiplier,
                interval,
                theme,
            } => {
                let update = SettingsUpdate {
                    smoothness,
                    scroll_multiplier: multiplier,
                    timer_interval: interval,
                    theme,
                };
                commands::settings::set(&store, update)
                    .with_context(|| format!("Failed to update {}", store.path().display()))?;
                print!("{}", commands::settings::show(&store));
            }
            SettingsAction::Reset => {
                commands::settings::reset(&store)
                    .with_context(|| format!("Failed to reset {}", store.path().display()))?;
                print!("{}", commands::settings::show(&store));
            }
        },
    }

    Ok(())
}
