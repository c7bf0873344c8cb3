//! Config file option discovery
//!
//! Finds `--config.file` and `--config.expand-env` among the raw process
//! arguments before the main parser runs. The main parser knows many options
//! this stage does not, so a single tolerant parse would stop at the first
//! unknown token. Instead the arguments are parsed repeatedly, dropping the
//! leading argument each time, until none are left. Errors are discarded;
//! the main parser reports them later.

use clap::builder::BoolishValueParser;
use clap::{Arg, ArgAction, Command};

pub const CONFIG_FILE_OPTION: &str = "config.file";
pub const CONFIG_EXPAND_ENV_OPTION: &str = "config.expand-env";

/// Options the bootstrap needs before the main parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapOptions {
    /// Path to the YAML config; empty when not given.
    pub config_file: String,
    pub expand_env: bool,
}

/// Extract the bootstrap options from `args` (program name excluded).
///
/// Never fails. When an option occurs more than once, the last occurrence wins.
pub fn locate_config_file(args: &[String]) -> BootstrapOptions {
    let mut options = BootstrapOptions::default();
    let mut rest = args;

    while !rest.is_empty() {
        if let Ok(matches) = bootstrap_command().try_get_matches_from(rest) {
            if let Some(path) = matches.get_one::<String>(CONFIG_FILE_OPTION) {
                options.config_file = path.clone();
            }
            if let Some(expand) = matches.get_one::<bool>(CONFIG_EXPAND_ENV_OPTION) {
                options.expand_env = *expand;
            }
        }
        rest = &rest[1..];
    }

    options
}

/// Parser that only knows the two bootstrap options and keeps whatever it
/// matched before hitting an error.
fn bootstrap_command() -> Command {
    Command::new("bootstrap")
        .no_binary_name(true)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .args_override_self(true)
        .ignore_errors(true)
        .arg(
            Arg::new(CONFIG_FILE_OPTION)
                .long(CONFIG_FILE_OPTION)
                .num_args(1)
                .allow_hyphen_values(true)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new(CONFIG_EXPAND_ENV_OPTION)
                .long(CONFIG_EXPAND_ENV_OPTION)
                .num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true")
                .value_parser(BoolishValueParser::new())
                .action(ArgAction::Set),
        )
}
