use std::{io, path::PathBuf};

use anyhow::Context;
use clap::ArgAction;
use flashcards::{Config, Session, domain::ColorChoice};
use tracing::instrument;

mod console;
mod menu;
mod terminal;

use console::Console;
use terminal::Palette;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// When to colour output (overrides the configuration file)
    #[arg(long, value_name = "WHEN")]
    color: Option<ColorChoice>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let mut config = self.load_config()?;
        if let Some(color) = self.color {
            config.color = color;
        }

        run_session(&config)
    }

    #[instrument(level = "debug")]
    fn load_config(&self) -> anyhow::Result<Config> {
        let Some(path) = &self.config else {
            return Ok(Config::default());
        };
        Config::load(path).with_context(|| format!("failed to load {}", path.display()))
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        // stdout carries the quiz itself
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn run_session(config: &Config) -> anyhow::Result<()> {
    let mut session = Session::new();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let palette = Palette::for_stdout(config.color);

    Console::new(stdin.lock(), stdout.lock(), palette, &config.title)
        .run(&mut session)
        .context("console I/O failed")
}
