//! Build configuration.
//!
//! Defaults reproduce the stock install step (`go build -ldflags "-s -w"
//! -o bin/viren ./cmd/viren/main.go`). An optional `viren-build.toml` at the
//! project root can override any of them, and a couple of environment
//! variables take precedence over both.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::InstallError;

/// Name of the optional config file looked up at the project root.
pub const CONFIG_FILE_NAME: &str = "viren-build.toml";

/// Overrides the toolchain program (name on `PATH` or absolute path).
pub const ENV_TOOLCHAIN: &str = "VIREN_GO";
/// Overrides the output directory.
pub const ENV_OUTPUT_DIR: &str = "VIREN_OUTPUT_DIR";
/// Overrides the project root (defaults to the current directory).
pub const ENV_PROJECT_ROOT: &str = "VIREN_PROJECT_ROOT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallConfig {
    pub toolchain: String,
    pub binary_name: String,
    pub output_dir: PathBuf,
    pub entry_point: String,
    pub ldflags: String,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            toolchain: "go".to_string(),
            binary_name: "viren".to_string(),
            output_dir: PathBuf::from("bin"),
            entry_point: "./cmd/viren/main.go".to_string(),
            ldflags: "-s -w".to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigToml {
    #[serde(default)]
    build: BuildToml,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct BuildToml {
    toolchain: Option<String>,
    binary_name: Option<String>,
    output_dir: Option<PathBuf>,
    entry_point: Option<String>,
    ldflags: Option<String>,
}

impl InstallConfig {
    /// Load the configuration for `root`: defaults, then the config file if
    /// present, then environment overrides.
    pub fn load(root: &Path) -> Result<Self, InstallError> {
        let mut config = Self::default();

        let config_path = root.join(CONFIG_FILE_NAME);
        if config_path.is_file() {
            let contents = fs::read_to_string(&config_path).map_err(|e| InstallError::Config {
                path: config_path.clone(),
                source: Box::new(e),
            })?;
            config.apply_toml(&contents, &config_path)?;
            debug!(path = %config_path.display(), "loaded build config");
        }

        config.apply_env(|key| env::var(key).ok());
        Ok(config)
    }

    fn apply_toml(&mut self, contents: &str, config_path: &Path) -> Result<(), InstallError> {
        let parsed: ConfigToml = toml::from_str(contents).map_err(|e| InstallError::Config {
            path: config_path.to_path_buf(),
            source: Box::new(e),
        })?;

        let build = parsed.build;
        if let Some(toolchain) = non_empty(build.toolchain) {
            self.toolchain = toolchain;
        }
        if let Some(binary_name) = non_empty(build.binary_name) {
            self.binary_name = binary_name;
        }
        if let Some(output_dir) = build.output_dir {
            self.output_dir = output_dir;
        }
        if let Some(entry_point) = non_empty(build.entry_point) {
            self.entry_point = entry_point;
        }
        if let Some(ldflags) = build.ldflags {
            self.ldflags = ldflags.trim().to_string();
        }
        Ok(())
    }

    /// Apply environment overrides using `lookup` to read variables.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(toolchain) = non_empty(lookup(ENV_TOOLCHAIN)) {
            debug!(toolchain = %toolchain, "toolchain overridden via {}", ENV_TOOLCHAIN);
            self.toolchain = toolchain;
        }
        if let Some(output_dir) = non_empty(lookup(ENV_OUTPUT_DIR)) {
            self.output_dir = PathBuf::from(output_dir);
        }
    }
}

/// Resolve the project root: `VIREN_PROJECT_ROOT` if set, else the current
/// directory.
pub fn project_root() -> anyhow::Result<PathBuf> {
    use anyhow::Context;

    if let Some(root) = non_empty(env::var(ENV_PROJECT_ROOT).ok()) {
        return Ok(PathBuf::from(root));
    }
    env::current_dir().context("resolving current directory")
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
