// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Layered configuration for the schoolhub CLI
//!
//! Layers, lowest precedence first: built-in defaults, the TOML file, the
//! `SCHOOLHUB_*` environment, command-line flags. Nested keys use `__` in
//! variable names, e.g. `SCHOOLHUB_TIMETABLE__DAYS=Monday,Wednesday`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Case, Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use sh_api_contract::Weekday;
use sh_logging::LoggingConfig;
use sh_rest_client::network_config::NetworkConfig;
use sh_store::{TimeSlot, default_slots};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const ENV_PREFIX: &str = "SCHOOLHUB";

/// Rows and columns fed to the schedule grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TimetableConfig {
    #[serde(default = "default_slots")]
    pub slots: Vec<TimeSlot>,
    #[serde(default = "all_days")]
    pub days: Vec<Weekday>,
}

impl Default for TimetableConfig {
    fn default() -> Self {
        Self {
            slots: default_slots(),
            days: all_days(),
        }
    }
}

fn all_days() -> Vec<Weekday> {
    Weekday::ALL.to_vec()
}

#[derive(Debug, Default, Deserialize)]
struct TimetableSection {
    #[serde(default)]
    timetable: TimetableConfig,
}

/// Effective configuration after all layers are merged
#[derive(Debug, Clone, Serialize)]
pub struct SchoolhubConfig {
    #[serde(flatten)]
    pub network: NetworkConfig,
    #[serde(flatten)]
    pub logging: LoggingConfig,
    pub timetable: TimetableConfig,
}

/// Values given on the command line; they win over every other layer
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub token: Option<String>,
}

/// `<platform config dir>/schoolhub/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("schoolhub").join("config.toml"))
}

/// Load the configuration from the process environment
///
/// An explicit `path` must exist; the default location is optional.
pub fn load(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<SchoolhubConfig> {
    load_with_env(path, overrides, None)
}

/// Like [`load`], reading environment variables from `env` when given
pub fn load_with_env(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
    env: Option<config::Map<String, String>>,
) -> Result<SchoolhubConfig> {
    let mut builder = Config::builder()
        .set_default("service-base-url", DEFAULT_BASE_URL)?
        .set_default("request-timeout-secs", DEFAULT_TIMEOUT_SECS)?;

    match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            builder = builder.add_source(File::from_str(&content, FileFormat::Toml));
        }
        None => {
            if let Some(path) = default_config_path() {
                builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
            }
        }
    }

    let settings = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .convert_case(Case::Kebab)
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("timetable.days")
                .source(env),
        )
        .set_override_option("service-base-url", overrides.base_url.clone())?
        .set_override_option("auth-token", overrides.token.clone())?
        .build()
        .context("building configuration")?;

    let network: NetworkConfig = settings
        .clone()
        .try_deserialize()
        .context("invalid network configuration")?;
    let logging: LoggingConfig = settings
        .clone()
        .try_deserialize()
        .context("invalid logging configuration")?;
    let TimetableSection { timetable } = settings
        .try_deserialize()
        .context("invalid timetable configuration")?;

    Ok(SchoolhubConfig {
        network,
        logging,
        timetable,
    })
}

impl SchoolhubConfig {
    /// Effective configuration as TOML, with the token redacted
    pub fn to_redacted_toml(&self) -> Result<String> {
        let mut shown = self.clone();
        if shown.network.auth_token.is_some() {
            shown.network.auth_token = Some(sh_logging::redact("").to_string());
        }
        toml::to_string_pretty(&shown).context("rendering configuration as TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sh_logging::CliLogLevel;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> Option<config::Map<String, String>> {
        Some(pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect())
    }

    fn config_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_apply_without_layers() {
        let file = config_file("");
        let config = load_with_env(Some(file.path()), &ConfigOverrides::default(), env(&[])).unwrap();

        assert_eq!(config.network.service_base_url.as_deref(), Some(DEFAULT_BASE_URL));
        assert_eq!(config.network.request_timeout_secs, Some(DEFAULT_TIMEOUT_SECS));
        assert!(config.network.auth_token.is_none());
        assert_eq!(config.timetable, TimetableConfig::default());
        assert_eq!(config.timetable.slots.len(), 8);
    }

    #[test]
    fn file_layer_sets_values() {
        let file = config_file(
            r#"
service-base-url = "https://portal.school.example/api/"
log-level = "debug"

[timetable]
days = ["Monday", "Wednesday"]

[[timetable.slots]]
label = "Homeroom"
start-time = "7:30"
end-time = "8:00"

[[timetable.slots]]
label = "Lunch"
start-time = "12:00"
end-time = "13:00"
is-break = true
"#,
        );
        let config = load_with_env(Some(file.path()), &ConfigOverrides::default(), env(&[])).unwrap();

        assert_eq!(
            config.network.service_base_url.as_deref(),
            Some("https://portal.school.example/api/")
        );
        assert_eq!(config.logging.log_level, Some(CliLogLevel::Debug));
        assert_eq!(config.timetable.days, vec![Weekday::Monday, Weekday::Wednesday]);
        assert_eq!(config.timetable.slots.len(), 2);
        assert!(config.timetable.slots[1].is_break);
    }

    #[test]
    fn environment_overrides_file_and_flags_override_environment() {
        let file = config_file("service-base-url = \"https://from-file.example/\"\n");
        let vars = env(&[
            ("SCHOOLHUB_SERVICE_BASE_URL", "https://from-env.example/"),
            ("SCHOOLHUB_AUTH_TOKEN", "env-token"),
        ]);

        let config = load_with_env(Some(file.path()), &ConfigOverrides::default(), vars.clone()).unwrap();
        assert_eq!(
            config.network.service_base_url.as_deref(),
            Some("https://from-env.example/")
        );
        assert_eq!(config.network.auth_token.as_deref(), Some("env-token"));

        let overrides = ConfigOverrides {
            base_url: Some("https://from-flag.example/".to_string()),
            token: None,
        };
        let config = load_with_env(Some(file.path()), &overrides, vars).unwrap();
        assert_eq!(
            config.network.service_base_url.as_deref(),
            Some("https://from-flag.example/")
        );
        assert_eq!(config.network.auth_token.as_deref(), Some("env-token"));
    }

    #[test]
    fn days_can_come_from_environment() {
        let file = config_file("");
        let vars = env(&[("SCHOOLHUB_TIMETABLE__DAYS", "Tuesday,Thursday")]);
        let config = load_with_env(Some(file.path()), &ConfigOverrides::default(), vars).unwrap();
        assert_eq!(config.timetable.days, vec![Weekday::Tuesday, Weekday::Thursday]);
        assert_eq!(config.timetable.slots.len(), 8);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let result = load_with_env(
            Some(Path::new("/nonexistent/schoolhub.toml")),
            &ConfigOverrides::default(),
            env(&[]),
        );
        assert!(result.is_err());
    }

    #[test]
    fn token_is_redacted_when_shown() {
        let file = config_file("auth-token = \"super-secret\"\n");
        let config = load_with_env(Some(file.path()), &ConfigOverrides::default(), env(&[])).unwrap();
        let shown = config.to_redacted_toml().unwrap();
        assert!(!shown.contains("super-secret"));
        assert!(shown.contains("[REDACTED]"));
    }
}
