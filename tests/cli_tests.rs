//! Integration tests for CLI

use assert_cmd::Command;
use blockstore_ingester::utils::sha256_hex;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn ingester() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("blockstore-ingester"))
}

#[test]
fn test_cli_version() {
    let mut cmd = ingester();
    cmd.arg("--version");
    cmd.assert().success().stdout(predicate::str::contains("blockstore-ingester"));
}

#[test]
fn test_cli_help_lists_bootstrap_options() {
    let mut cmd = ingester();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--config.file"))
        .stdout(predicate::str::contains("Configuration file to load."))
        .stdout(predicate::str::contains("--config.expand-env"))
        .stdout(predicate::str::contains("--print.config"));
}

#[test]
fn test_runs_with_defaults_without_config_file() {
    let mut cmd = ingester();
    cmd.arg("--print.config");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("target: ingester"))
        .stdout(predicate::str::contains("http_listen_port: 80"));
}

#[test]
fn test_expanded_config_file_is_applied() {
    let tmp = TempDir::new().expect("temp dir");
    let cfg = tmp.path().join("cfg.yaml");
    fs::write(&cfg, "http_prefix: \"${BSI_CLI_PREFIX:/api/world}\"\nserver:\n  http_listen_port: 9009\n")
        .expect("write config");

    let mut cmd = ingester();
    cmd.env_remove("BSI_CLI_PREFIX");
    cmd.args([
        "--print.config",
        "--config.file",
        cfg.to_str().expect("utf8 path"),
        "--config.expand-env",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("/api/world"))
        .stdout(predicate::str::contains("http_listen_port: 9009"))
        .stdout(predicate::str::contains("grpc_listen_port: 9095"));
}

#[test]
fn test_environment_value_overrides_default() {
    let tmp = TempDir::new().expect("temp dir");
    let cfg = tmp.path().join("cfg.yaml");
    fs::write(&cfg, "server:\n  log_level: ${BSI_CLI_LEVEL:info}\n").expect("write config");

    let file_arg = format!("--config.file={}", cfg.display());

    let mut cmd = ingester();
    cmd.env("BSI_CLI_LEVEL", "debug");
    cmd.args(["--config.expand-env", file_arg.as_str(), "--print.config"]);
    cmd.assert().success().stdout(predicate::str::contains("log_level: debug"));
}

#[test]
fn test_placeholders_kept_without_expand_flag() {
    let tmp = TempDir::new().expect("temp dir");
    let cfg = tmp.path().join("cfg.yaml");
    fs::write(&cfg, "http_prefix: \"${BSI_CLI_UNUSED:/expanded}\"\n").expect("write config");

    let mut cmd = ingester();
    cmd.args(["--config.file", cfg.to_str().expect("utf8 path"), "--print.config"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("BSI_CLI_UNUSED"));
}

#[test]
fn test_missing_config_file_exits_non_zero() {
    let tmp = TempDir::new().expect("temp dir");
    let missing = tmp.path().join("missing.yaml");

    let mut cmd = ingester();
    cmd.args(["--config.file", missing.to_str().expect("utf8 path")]);
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error loading config from"))
        .stderr(predicate::str::contains("missing.yaml"))
        .stderr(predicate::str::contains("error reading config file"));
}

#[test]
fn test_unknown_key_exits_non_zero() {
    let tmp = TempDir::new().expect("temp dir");
    let cfg = tmp.path().join("cfg.yaml");
    fs::write(&cfg, "server:\n  http_listen_prot: 9009\n").expect("write config");

    let mut cmd = ingester();
    cmd.args(["--config.file", cfg.to_str().expect("utf8 path")]);
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error parsing config file"))
        .stderr(predicate::str::contains("http_listen_prot"));
}

#[test]
fn test_metrics_expose_fingerprint_of_file_as_read() {
    let tmp = TempDir::new().expect("temp dir");
    let cfg = tmp.path().join("cfg.yaml");
    let content = "target: ${BSI_CLI_TARGET:ingester}\n";
    fs::write(&cfg, content).expect("write config");
    let expected = format!("cortex_config_hash{{sha256=\"{}\"}} 1", sha256_hex(content.as_bytes()));

    for expand in [false, true] {
        let mut cmd = ingester();
        cmd.args(["--print.metrics", "--config.file", cfg.to_str().expect("utf8 path")]);
        if expand {
            cmd.arg("--config.expand-env");
        }
        cmd.assert().success().stdout(predicate::str::contains(expected.clone()));
    }
}

#[test]
fn test_unknown_main_option_still_rejected() {
    let mut cmd = ingester();
    cmd.args(["--no-such-option"]);
    cmd.assert().failure().stderr(predicate::str::contains("--no-such-option"));
}

#[test]
fn test_verbose_shows_bootstrap_debug_events() {
    let tmp = TempDir::new().expect("temp dir");
    let cfg = tmp.path().join("cfg.yaml");
    fs::write(&cfg, "target: ingester\n").expect("write config");

    let mut cmd = ingester();
    cmd.env_remove("RUST_LOG");
    cmd.args(["--config.file", cfg.to_str().expect("utf8 path"), "-v"]);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("located bootstrap options"))
        .stderr(predicate::str::contains("config file read"));
}

#[test]
fn test_bootstrap_debug_events_hidden_by_default() {
    let tmp = TempDir::new().expect("temp dir");
    let cfg = tmp.path().join("cfg.yaml");
    fs::write(&cfg, "target: ingester\n").expect("write config");

    let mut cmd = ingester();
    cmd.env_remove("RUST_LOG");
    cmd.args(["--config.file", cfg.to_str().expect("utf8 path")]);
    cmd.assert().success().stderr(predicate::str::contains("config file read").not());
}

#[test]
fn test_expand_env_accepts_numeric_boolean() {
    let tmp = TempDir::new().expect("temp dir");
    let cfg = tmp.path().join("cfg.yaml");
    fs::write(&cfg, "http_prefix: \"${BSI_CLI_NUMERIC:/numeric}\"\n").expect("write config");

    let mut cmd = ingester();
    cmd.env_remove("BSI_CLI_NUMERIC");
    cmd.args(["--config.expand-env=1", "--config.file", cfg.to_str().expect("utf8 path"), "--print.config"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("/numeric"))
        .stdout(predicate::str::contains("BSI_CLI_NUMERIC").not());
}
