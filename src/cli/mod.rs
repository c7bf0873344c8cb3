//! Command-line interface for the block storage ingester
//!
//! The config file options are handled by [`crate::bootstrap`] before this
//! parser runs; here they are accepted and ignored.

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command, CommandFactory, FromArgMatches, Parser};
use prometheus::Registry;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::bootstrap::{Bootstrap, BootstrapState, FailurePolicy};
use crate::config::Config;
use crate::metrics::{encode_text, ConfigHashGauge};

/// Block storage ingester
#[derive(Parser)]
#[command(name = "blockstore-ingester")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Print the effective configuration as YAML and exit
    #[arg(long = "print.config")]
    print_config: bool,

    /// Print all metrics in Prometheus text format and exit
    #[arg(long = "print.metrics")]
    print_metrics: bool,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long)]
    verbose: bool,
}

pub fn run() -> Result<()> {
    let args: Vec<String> =
        std::env::args_os().skip(1).map(|arg| arg.to_string_lossy().into_owned()).collect();

    // Logging must be up before bootstrap reports anything, so --verbose is
    // picked out of the raw arguments ahead of the main parse.
    init_logging(scan_verbose(&args));

    let registry = Registry::new();
    let sink = ConfigHashGauge::new(&registry).context("Failed registering config hash gauge")?;

    // Schema defaults are in place before any file is read.
    let mut config = Config::default();
    let (state, command) =
        Bootstrap::new(&sink, FailurePolicy::Exit).run(&args, &mut config, Cli::command())?;

    let matches = command.get_matches_from(std::env::args_os());
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());
    tracing::debug!(verbose = cli.verbose, "arguments parsed");

    match &state {
        BootstrapState::DefaultsOnly => tracing::debug!("no config file given, using defaults"),
        BootstrapState::DefaultsMerged { path, fingerprint } => {
            tracing::debug!(path = %path.display(), sha256 = %fingerprint, "active config")
        }
    }

    if cli.print_config {
        let yaml = serde_yaml::to_string(&config).context("Failed serializing config")?;
        print!("{yaml}");
        return Ok(());
    }

    if cli.print_metrics {
        let text = encode_text(&registry).context("Failed encoding metrics")?;
        print!("{text}");
        return Ok(());
    }

    tracing::info!(target_module = %config.target, "configuration ready");
    Ok(())
}

fn init_logging(verbose: bool) {
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(log_filter(verbose))
        .try_init();
}

// RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    }
}

/// Whether `-v`/`--verbose` appears anywhere in `args`, using the same
/// drop-one-and-retry scan as the config file locator.
fn scan_verbose(args: &[String]) -> bool {
    let mut rest = args;
    while !rest.is_empty() {
        if let Ok(matches) = verbose_command().try_get_matches_from(rest) {
            // A parse cut short by an error may not have filled in defaults.
            if matches.get_one::<bool>("verbose").copied().unwrap_or(false) {
                return true;
            }
        }
        rest = &rest[1..];
    }
    false
}

fn verbose_command() -> Command {
    Command::new("verbose")
        .no_binary_name(true)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .args_override_self(true)
        .ignore_errors(true)
        .arg(Arg::new("verbose").short('v').long("verbose").action(ArgAction::SetTrue))
}
