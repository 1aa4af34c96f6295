//! Layered configuration for the parley server.
//!
//! Sources, lowest precedence first:
//! - Bundled defaults (include_str! from parley.toml)
//! - `~/.config/parley/parley.toml`
//! - `./parley.toml`
//! - An explicit file passed on the command line
//! - `PARLEY_*` environment variables, `__` between section and key
//!   (e.g. `PARLEY_UPSTREAM__API_KEY`)

use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use parley_error::{ConfigError, ParleyError, ParleyResult};
use parley_translate::{FetchConfig, ModeConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../parley.toml");

const ENV_PREFIX: &str = "PARLEY";
const ENV_SEPARATOR: &str = "__";

/// A configuration file consulted by [`ParleyConfig::load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    /// Location of the file
    pub path: PathBuf,
    /// Whether loading fails when the file is missing
    pub required: bool,
}

impl ConfigSource {
    /// Whether the file is present on disk.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }
}

/// Listener and logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSection {
    /// Socket address to listen on
    pub bind: String,
    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,
    /// Emit JSON-formatted logs
    #[serde(default)]
    pub json_logs: bool,
}

/// Downstream provider endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Provider API base URL
    pub base_url: String,
    /// Path of the chat endpoint under `base_url`
    pub path: String,
    /// Bearer token sent upstream
    #[serde(default)]
    pub api_key: Option<String>,
    /// Whole-request timeout, including streamed body
    pub timeout_secs: u64,
}

impl UpstreamConfig {
    /// Full URL of the chat endpoint.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        )
    }
}

/// Complete server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParleyConfig {
    /// Listener and logging
    pub server: ServerSection,
    /// Downstream provider
    pub upstream: UpstreamConfig,
    /// Prompt and model id policy
    pub mode: ModeConfig,
    /// Image retrieval limits
    pub fetch: FetchConfig,
}

impl ParleyConfig {
    /// Load configuration from every source, with `extra` as the highest
    /// precedence file.
    #[instrument]
    pub fn load(extra: Option<&Path>) -> ParleyResult<Self> {
        debug!(
            "Loading configuration with precedence: \
             env > explicit file > current dir > home dir > bundled defaults"
        );

        let mut builder = Self::defaults();

        for source in Self::file_sources(extra) {
            debug!(
                path = %source.path.display(),
                required = source.required,
                "Adding config file"
            );
            builder = builder.add_source(File::from(source.path).required(source.required));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        );

        Self::finish(builder)
    }

    /// Files layered over the bundled defaults, lowest precedence first.
    pub fn file_sources(extra: Option<&Path>) -> Vec<ConfigSource> {
        let mut sources = Vec::with_capacity(3);
        if let Some(home) = dirs::home_dir() {
            sources.push(ConfigSource {
                path: home.join(".config").join("parley").join("parley.toml"),
                required: false,
            });
        }
        sources.push(ConfigSource {
            path: PathBuf::from("parley.toml"),
            required: false,
        });
        if let Some(path) = extra {
            sources.push(ConfigSource {
                path: path.to_path_buf(),
                required: true,
            });
        }
        sources
    }

    /// Names of the `PARLEY_*` variables that override file settings.
    ///
    /// Values are not returned since they may hold credentials.
    pub fn env_overrides() -> Vec<String> {
        let prefix = format!("{}_", ENV_PREFIX);
        let mut names: Vec<String> = std::env::vars_os()
            .filter_map(|(name, _)| name.into_string().ok())
            .filter(|name| name.starts_with(&prefix) && name.contains(ENV_SEPARATOR))
            .collect();
        names.sort();
        names
    }

    /// Bundled defaults overlaid with a TOML string. Ignores the filesystem
    /// and environment.
    pub fn from_toml_str(overrides: &str) -> ParleyResult<Self> {
        Self::finish(Self::defaults().add_source(File::from_str(overrides, FileFormat::Toml)))
    }

    /// Reject values the server cannot run with.
    pub fn validate(&self) -> ParleyResult<()> {
        let fail = |message: &str| Err(ParleyError::from(ConfigError::new(message)));

        if self.fetch.max_concurrency == 0 {
            return fail("fetch.max_concurrency must be at least 1");
        }
        if self.fetch.max_image_bytes == 0 {
            return fail("fetch.max_image_bytes must be at least 1");
        }
        if self.fetch.default_mime.trim().is_empty() {
            return fail("fetch.default_mime must not be empty");
        }
        let namespace = &self.mode.default_namespace;
        if namespace.is_empty() || namespace.contains('/') {
            return fail("mode.default_namespace must be non-empty and contain no '/'");
        }
        if self.upstream.base_url.trim().is_empty() {
            return fail("upstream.base_url must not be empty");
        }
        Ok(())
    }

    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> ParleyResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| {
                ParleyError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                ParleyError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }
}
