//! CLI-owned configuration: TOML file, environment, and translation to
//! `victory_admin_core::MonitorConfig`.
//!
//! Core never sees these types -- it receives a pre-built `MonitorConfig`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::ValueEnum;
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use victory_admin_core::{MonitorConfig, TransportConfig};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

pub const DEFAULT_URL: &str = "http://localhost:5050";

// ── TOML config ──────────────────────────────────────────────────────

/// CLI-owned TOML configuration.
///
/// ```toml
/// url = "http://broker.local:5050"
/// adapter_hz = 10
/// connect_timeout = 5
/// output = "json"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_url")]
    pub url: String,

    /// Adapter sampling rate in Hz; absent means broker default.
    pub adapter_hz: Option<u32>,

    /// Connection timeout in seconds.
    pub connect_timeout: Option<u64>,

    /// TCP keepalive interval in seconds.
    pub tcp_keepalive: Option<u64>,

    #[serde(default = "default_output")]
    pub output: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: default_url(),
            adapter_hz: None,
            connect_timeout: None,
            tcp_keepalive: None,
            output: default_output(),
        }
    }
}

fn default_url() -> String {
    DEFAULT_URL.into()
}
fn default_output() -> String {
    "table".into()
}

// ── Config file path ─────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("rs", "victory", "victory-admin")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("victory-admin.toml"))
}

// ── Config loading ───────────────────────────────────────────────────

/// Load the Config from defaults, the TOML file, and `VICTORY_ADMIN_*` env.
///
/// A missing file is not an error; a malformed one is.
pub fn load_config(path: &Path) -> Result<Config, CliError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("VICTORY_ADMIN_").only(&[
            "url",
            "adapter_hz",
            "connect_timeout",
            "tcp_keepalive",
            "output",
        ]));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Resolution ───────────────────────────────────────────────────────

/// Everything a command needs, after flags override the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub url: String,
    pub output: OutputFormat,
    pub monitor: MonitorConfig,
}

/// Translate the file config + global flags into core config.
///
/// This is the single boundary where CLI config types cross into core types.
pub fn resolve(config: &Config, global: &GlobalOpts) -> Result<Resolved, CliError> {
    // 1. Broker URL (flag/env > file > default). Validated by core on connect.
    let url = global.url.clone().unwrap_or_else(|| config.url.clone());

    // 2. Output format
    let output = match global.output {
        Some(format) => format,
        None => OutputFormat::from_str(&config.output, true).map_err(|_| {
            CliError::Validation {
                field: "output".into(),
                reason: format!(
                    "expected 'table', 'json' or 'json-compact', got '{}'",
                    config.output
                ),
            }
        })?,
    };

    // 3. Adapter sampling rate
    let adapter_sample_hz = global.hz.or(config.adapter_hz);

    // 4. Transport tuning
    let transport = TransportConfig {
        connect_timeout: global
            .connect_timeout
            .or(config.connect_timeout)
            .map(Duration::from_secs),
        tcp_keepalive: config.tcp_keepalive.map(Duration::from_secs),
    };

    Ok(Resolved {
        url,
        output,
        monitor: MonitorConfig {
            adapter_sample_hz,
            transport,
        },
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["victory-admin"];
        argv.extend_from_slice(args);
        argv.push("status");
        Cli::try_parse_from(argv).unwrap().global
    }

    #[test]
    fn defaults_point_at_local_broker() {
        let resolved = resolve(&Config::default(), &global(&[])).unwrap();
        assert_eq!(resolved.url, DEFAULT_URL);
        assert_eq!(resolved.output, OutputFormat::Table);
        assert_eq!(resolved.monitor, MonitorConfig::default());
    }

    #[test]
    fn flags_override_file() {
        let file = Config {
            url: "http://from-file:5050".into(),
            adapter_hz: Some(5),
            connect_timeout: Some(3),
            tcp_keepalive: Some(30),
            output: "json".into(),
        };
        let resolved = resolve(
            &file,
            &global(&["--url", "http://from-flag:5050", "--hz", "20", "-o", "table"]),
        )
        .unwrap();

        assert_eq!(resolved.url, "http://from-flag:5050");
        assert_eq!(resolved.output, OutputFormat::Table);
        assert_eq!(resolved.monitor.adapter_sample_hz, Some(20));
        assert_eq!(
            resolved.monitor.transport.connect_timeout,
            Some(Duration::from_secs(3))
        );
        assert_eq!(
            resolved.monitor.transport.tcp_keepalive,
            Some(Duration::from_secs(30))
        );
    }

    #[test]
    fn bad_output_in_file_is_a_validation_error() {
        let file = Config {
            output: "yaml".into(),
            ..Config::default()
        };
        let err = resolve(&file, &global(&[])).unwrap_err();
        assert!(matches!(err, CliError::Validation { .. }));
    }

    #[test]
    fn file_values_load_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "url = \"http://broker:6000\"\nadapter_hz = 10\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.url, "http://broker:6000");
        assert_eq!(config.adapter_hz, Some(10));
        assert_eq!(config.output, "table");
    }
}
