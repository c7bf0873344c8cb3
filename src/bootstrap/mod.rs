//! Startup configuration bootstrap
//!
//! Runs once, before the main argument parser:
//!   1. Locate `--config.file` / `--config.expand-env` in the raw arguments
//!   2. Load the file (if any) over the defaults already held by the target
//!   3. Register both options as ignored on the main parser
//!
//! A load failure is fatal. What "fatal" means is decided by the caller
//! through [`FailurePolicy`].

pub mod locate;

use clap::builder::BoolishValueParser;
use clap::{Arg, ArgAction, Command};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::config::{load_config, LoadError};
use crate::metrics::ConfigHashGauge;

pub use locate::{locate_config_file, BootstrapOptions, CONFIG_EXPAND_ENV_OPTION, CONFIG_FILE_OPTION};

pub const CONFIG_FILE_HELP: &str = "Configuration file to load.";
pub const CONFIG_EXPAND_ENV_HELP: &str =
    "Expands ${var} or $var in config according to the values of the environment variables.";

/// What to do once a load failure has been reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Terminate the process with status 1.
    #[default]
    Exit,
    /// Hand the error back to the caller. Used by tests.
    Return,
}

/// Terminal state of a successful bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapState {
    /// No config file was given; the target still holds its defaults.
    DefaultsOnly,
    /// The config file was merged over the defaults.
    DefaultsMerged { path: PathBuf, fingerprint: String },
}

pub struct Bootstrap<'a> {
    sink: &'a ConfigHashGauge,
    policy: FailurePolicy,
}

impl<'a> Bootstrap<'a> {
    pub fn new(sink: &'a ConfigHashGauge, policy: FailurePolicy) -> Self {
        Self { sink, policy }
    }

    /// Bootstrap `target` from `args` (program name excluded) and return the
    /// main `parser` with the bootstrap options registered as ignored.
    ///
    /// `target` must already hold its defaults. Under [`FailurePolicy::Exit`]
    /// this never returns `Err`.
    pub fn run<T>(
        &self,
        args: &[String],
        target: &mut T,
        parser: Command,
    ) -> Result<(BootstrapState, Command), LoadError>
    where
        T: Serialize + DeserializeOwned,
    {
        let options = locate_config_file(args);
        debug!(config_file = %options.config_file, expand_env = options.expand_env, "located bootstrap options");

        let state = if options.config_file.is_empty() {
            BootstrapState::DefaultsOnly
        } else {
            let path = PathBuf::from(&options.config_file);
            match load_config(&path, options.expand_env, target, self.sink) {
                Ok(fingerprint) => {
                    info!(path = %path.display(), sha256 = %fingerprint, "config loaded");
                    BootstrapState::DefaultsMerged { path, fingerprint }
                }
                Err(e) => return Err(self.fail(e)),
            }
        };

        Ok((state, ignore_bootstrap_args(parser)))
    }

    fn fail(&self, error: LoadError) -> LoadError {
        eprintln!("error loading config from {}: {}", error.path().display(), error);
        match self.policy {
            FailurePolicy::Exit => std::process::exit(1),
            FailurePolicy::Return => error,
        }
    }
}

/// Declare the bootstrap options on `parser` so it accepts them without
/// acting on them. Their values were already consumed by the bootstrap.
pub fn ignore_bootstrap_args(parser: Command) -> Command {
    parser
        .arg(
            Arg::new(CONFIG_FILE_OPTION)
                .long(CONFIG_FILE_OPTION)
                .value_name("PATH")
                .help(CONFIG_FILE_HELP)
                .num_args(1)
                .allow_hyphen_values(true)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new(CONFIG_EXPAND_ENV_OPTION)
                .long(CONFIG_EXPAND_ENV_OPTION)
                .help(CONFIG_EXPAND_ENV_HELP)
                .num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true")
                .value_parser(BoolishValueParser::new())
                .action(ArgAction::Append),
        )
}
