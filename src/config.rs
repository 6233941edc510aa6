//! Exclusion configuration.
//!
//! The plugin reads an optional list of service names to ignore. The default
//! location is an INI file:
//!
//! ```ini
//! [EXCLUDE]
//! applications = legacy-api, batch
//! ```
//!
//! Files ending in `.yaml`/`.yml`, `.json` or `.toml` are decoded into the
//! same structure, where `applications` may also be a list. A missing or
//! broken file never blocks a health check: it yields an empty exclusion set.

use crate::classifier::ExclusionSet;
use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_CONFIG_PATH: &str = "/etc/haproxy-status.ini";
pub const EXCLUDE_SECTION: &str = "EXCLUDE";
pub const APPLICATIONS_KEY: &str = "applications";

/// Configuration format options for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    Ini,
    Yaml,
    Json,
    Toml,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed INI at line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "EXCLUDE", alias = "exclude", default)]
    pub exclude: ExcludeConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludeConfig {
    /// Services ignored by the check, matched by exact name.
    #[serde(default, deserialize_with = "deserialize_applications")]
    pub applications: Vec<String>,
}

impl Config {
    pub fn exclusions(&self) -> ExclusionSet {
        self.exclude.applications.iter().cloned().collect()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Applications {
    List(Vec<String>),
    Csv(String),
}

fn deserialize_applications<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Applications>::deserialize(deserializer)? {
        Some(Applications::List(names)) => names.iter().flat_map(|n| split_names(n)).collect(),
        Some(Applications::Csv(names)) => split_names(&names),
        None => Vec::new(),
    })
}

/// Splits a comma-separated list of names (continuation lines count as
/// separators too), trimming blanks and dropping empty entries.
pub fn split_names(value: &str) -> Vec<String> {
    value
        .split(|c: char| c == ',' || c == '\n')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses the INI dialect of the default config file.
///
/// Section names are case-sensitive, keys are not. `#` and `;` start comment
/// lines and indented lines continue the previous value.
pub fn parse_ini(content: &str) -> Result<Config, ConfigError> {
    let mut sections: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
    let mut current: Option<String> = None;
    let mut last_key: Option<String> = None;

    for (idx, raw) in content.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            last_key = None;
            continue;
        }
        if trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        if raw.starts_with(char::is_whitespace) {
            if let (Some(section), Some(key)) = (&current, &last_key) {
                if let Some(value) = sections
                    .get_mut(section)
                    .and_then(|values| values.get_mut(key))
                {
                    value.push('\n');
                    value.push_str(trimmed);
                }
                continue;
            }
        }

        if let Some(name) = trimmed.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
            let name = name.trim().to_string();
            sections.entry(name.clone()).or_default();
            current = Some(name);
            last_key = None;
            continue;
        }

        let Some(sep) = trimmed.find(|c: char| c == '=' || c == ':') else {
            return Err(ConfigError::Malformed {
                line,
                reason: "expected 'key = value'".into(),
            });
        };
        let Some(section) = &current else {
            return Err(ConfigError::Malformed {
                line,
                reason: "key outside of a section".into(),
            });
        };

        let key = trimmed[..sep].trim().to_lowercase();
        if key.is_empty() {
            return Err(ConfigError::Malformed {
                line,
                reason: "empty key".into(),
            });
        }
        let value = trimmed[sep + 1..].trim().to_string();

        sections
            .entry(section.clone())
            .or_default()
            .insert(key.clone(), value);
        last_key = Some(key);
    }

    let applications = sections
        .get(EXCLUDE_SECTION)
        .and_then(|values| values.get(APPLICATIONS_KEY))
        .map(|v| split_names(v))
        .unwrap_or_default();

    Ok(Config {
        exclude: ExcludeConfig { applications },
    })
}

/// Loads a config file, choosing the format by extension (INI by default).
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let config: Config = match path.extension().and_then(|s| s.to_str()) {
        Some("json") => serde_json::from_str(&content)?,
        Some("toml") => toml::from_str(&content)?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
        _ => parse_ini(&content)?,
    };

    debug!("Loaded exclusion configuration from: {}", path.display());
    Ok(config)
}

/// Loads the config at `path`, degrading to an empty config on any failure.
///
/// `None` means config loading is disabled.
pub fn load_or_default(path: Option<&Path>) -> Config {
    let Some(path) = path else {
        debug!("Exclusion config disabled");
        return Config::default();
    };

    if !path.exists() {
        debug!("No exclusion config at {}", path.display());
        return Config::default();
    }

    match load_config(path) {
        Ok(config) => config,
        Err(e) => {
            info!(
                "Ignoring exclusion config {}: {} - excluding nothing",
                path.display(),
                e
            );
            Config::default()
        }
    }
}

/// Exclusion set from the config at `path`; see [`load_or_default`].
pub fn load_exclusions(path: Option<&Path>) -> ExclusionSet {
    let exclusions = load_or_default(path).exclusions();
    debug!("{} services excluded", exclusions.len());
    exclusions
}

/// Renders configuration in the requested format
pub fn render_config(
    config: &Config,
    format: ConfigFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    let output = match format {
        ConfigFormat::Ini => format!(
            "[{}]\n{} = {}\n",
            EXCLUDE_SECTION,
            APPLICATIONS_KEY,
            config.exclude.applications.join(",")
        ),
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    };
    Ok(output)
}
