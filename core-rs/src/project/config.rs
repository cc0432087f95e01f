/**
 * config.rs
 * Builder configuration (YAML format)
 *
 * Format:
 * ```yaml
 * paths:
 *   jsonRoot: data/raw
 *   ttlOut: data/out/ttl
 *   merged: data/out/ttl/skills.ttl
 *   reports: data/out/reports
 *   graph: data/out/graph
 * lang: en
 * keepFragments: false
 * logLevel: info
 * creator:
 *   linkPrefixes: ["http://", "https://", "urn:"]
 * ```
 *
 * Layering: defaults < YAML file < environment < CLI flags (applied by the binary).
 */

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{OsmtError, Result};
use crate::mapper::CreatorPolicy;

/// Config file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "osmt.yaml";

/// Merged ontology file name inside `ttlOut` when `merged` is unset.
pub const DEFAULT_MERGED_NAME: &str = "skills.ttl";

/// Input and output locations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PathsConfig {
    pub json_root: PathBuf,
    pub ttl_out: PathBuf,
    /// Defaults to `<ttlOut>/skills.ttl`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merged: Option<PathBuf>,
    pub reports: PathBuf,
    pub graph: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            json_root: PathBuf::from("data/raw"),
            ttl_out: PathBuf::from("data/out/ttl"),
            merged: None,
            reports: PathBuf::from("data/out/reports"),
            graph: PathBuf::from("data/out/graph"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BuilderConfig {
    pub paths: PathsConfig,
    /// Language preferred when picking labels
    pub lang: String,
    pub keep_fragments: bool,
    pub log_level: String,
    pub creator: CreatorPolicy,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            lang: "en".to_string(),
            keep_fragments: false,
            log_level: "info".to_string(),
            creator: CreatorPolicy::default(),
        }
    }
}

impl BuilderConfig {
    /// Load a config file. Missing keys keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(OsmtError::FileNotFound(path.to_string_lossy().to_string()));
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: BuilderConfig = serde_yaml::from_str(&content)
            .map_err(|e| OsmtError::Config(format!("Invalid config YAML {}: {}", path.display(), e)))?;
        config.validate()?;

        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Resolve the file layer.
    ///
    /// An explicit path must exist. Without one, `osmt.yaml` in `dir` is
    /// used when present, otherwise defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let candidate = dir.join(DEFAULT_CONFIG_FILE);
                if candidate.is_file() {
                    Self::load(candidate)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Apply the process environment on top of this config.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Apply environment overrides read through `lookup`. Empty values are
    /// ignored.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("WGU_JSON_ROOT") {
            self.paths.json_root = PathBuf::from(v);
        }
        if let Some(v) = get("WGU_TTL_DIR") {
            self.paths.ttl_out = PathBuf::from(v);
        }
        if let Some(v) = get("WGU_OWL_PATH") {
            self.paths.merged = Some(PathBuf::from(v));
        }
        if let Some(v) = get("WGU_REPORTS_DIR") {
            self.paths.reports = PathBuf::from(v);
        }
        if let Some(v) = get("WGU_GRAPH_DIR") {
            self.paths.graph = PathBuf::from(v);
        }
        if let Some(v) = get("LOG_LEVEL") {
            self.log_level = v.trim().to_ascii_lowercase();
        }
    }

    /// Merged ontology path, explicit or under `ttlOut`.
    pub fn merged_path(&self) -> PathBuf {
        self.paths
            .merged
            .clone()
            .unwrap_or_else(|| self.paths.ttl_out.join(DEFAULT_MERGED_NAME))
    }

    pub fn validate(&self) -> Result<()> {
        if self.lang.trim().is_empty() {
            return Err(OsmtError::Config("lang cannot be empty".to_string()));
        }
        if self.creator.link_prefixes.iter().any(|p| p.is_empty()) {
            return Err(OsmtError::Config("creator.linkPrefixes cannot contain empty prefixes".to_string()));
        }
        Ok(())
    }
}
