//! Configuration file loading for litmus.
//!
//! Reads `litmus.config.json` from the current working directory, or the
//! file given with `--config`. Also provides the JSON Schema for editor
//! autocompletion.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "litmus.config.json";

/// Top-level litmus configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LitmusConfig {
    /// JSON Schema reference (for editor autocompletion).
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Message locale (`en`, `ja`, `zh`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,

    /// Per-rule severity, keyed by rule name.
    #[serde(default)]
    pub rules: BTreeMap<String, RuleSetting>,

    /// Glob patterns of files never linted.
    #[serde(default)]
    pub ignore: Vec<String>,
}

/// Severity setting for one rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSetting {
    Error,
    #[serde(alias = "warning")]
    Warn,
    Off,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Load the configuration.
///
/// An explicit path must exist. Without one, `litmus.config.json` in `dir`
/// (or the CWD) is used when present, defaults otherwise.
pub fn load_config(
    explicit: Option<&Path>,
    dir: Option<&Path>,
) -> Result<LitmusConfig, ConfigError> {
    let config_path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let base = dir
                .map(|d| d.to_path_buf())
                .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());
            let path = base.join(CONFIG_FILE_NAME);
            if !path.exists() {
                return Ok(LitmusConfig::default());
            }
            path
        }
    };

    let content = std::fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
        path: config_path.clone(),
        source,
    })?;
    parse_config(&content).map_err(|source| ConfigError::Parse {
        path: config_path,
        source,
    })
}

pub fn parse_config(content: &str) -> Result<LitmusConfig, serde_json::Error> {
    serde_json::from_str(content)
}

/// JSON Schema for `litmus.config.json`.
pub const LITMUS_CONFIG_SCHEMA: &str = r##"{
  "$schema": "http://json-schema.org/draft-07/schema#",
  "title": "litmus Configuration",
  "description": "Configuration file for litmus - a linter for HTML in tagged templates",
  "type": "object",
  "properties": {
    "$schema": {
      "type": "string",
      "description": "JSON Schema reference for editor autocompletion"
    },
    "locale": {
      "type": "string",
      "description": "Language of diagnostic messages",
      "enum": ["en", "ja", "zh"]
    },
    "rules": {
      "type": "object",
      "description": "Severity per rule. Rules not listed keep their default severity.",
      "properties": {
        "lit/attribute-value-entities": { "$ref": "#/definitions/setting" }
      },
      "additionalProperties": { "$ref": "#/definitions/setting" }
    },
    "ignore": {
      "type": "array",
      "description": "Glob patterns of files that are never linted",
      "items": { "type": "string" },
      "examples": [["dist/**", "**/*.min.js"]]
    }
  },
  "definitions": {
    "setting": {
      "type": "string",
      "enum": ["error", "warn", "warning", "off"]
    }
  },
  "additionalProperties": false
}"##;
