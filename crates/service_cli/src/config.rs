//! CLI configuration management
//!
//! Handles loading configuration from TOML files, environment variables, and CLI arguments.
//!
//! ```toml
//! log_level = "info"
//!
//! [engine]
//! execution = "optimized"
//! chunk_size = 65536
//! summation = "plain"
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use pricer_core::types::PricingError;
use pricer_pricing::mc::{EngineConfig, EngineConfigFile, Execution, Summation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Engine variant override.
pub const ENV_ENGINE: &str = "MC_PRICER_ENGINE";
/// Chunk size override.
pub const ENV_CHUNK_SIZE: &str = "MC_PRICER_CHUNK_SIZE";
/// Summation policy override.
pub const ENV_SUMMATION: &str = "MC_PRICER_SUMMATION";
/// Log level override.
pub const ENV_LOG_LEVEL: &str = "MC_PRICER_LOG_LEVEL";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),

    #[error("{0}")]
    Engine(#[from] PricingError),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<Option<LogLevel>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s)
        .map(Some)
        .map_err(serde::de::Error::custom)
}

/// On-disk configuration file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default, deserialize_with = "deserialize_log_level")]
    log_level: Option<LogLevel>,
    #[serde(default)]
    engine: EngineConfigFile,
}

/// Resolved CLI configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CliConfig {
    /// Log level (overridden by `RUST_LOG` when set)
    pub log_level: LogLevel,
    /// Monte Carlo engine configuration
    pub engine: EngineConfig,
}

/// One configuration source; unset fields defer to lower-priority sources.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigLayer {
    pub log_level: Option<LogLevel>,
    pub execution: Option<Execution>,
    pub chunk_size: Option<usize>,
    pub summation: Option<Summation>,
}

impl ConfigLayer {
    /// Parse a TOML configuration document
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(input)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;

        Ok(Self {
            log_level: file.log_level,
            execution: file.engine.execution,
            chunk_size: file.engine.chunk_size,
            summation: file.engine.summation,
        })
    }

    /// Load a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Load overrides from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load overrides through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut layer = Self::default();

        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            layer.log_level = Some(LogLevel::from_str(&level)?);
        }

        if let Some(engine) = lookup(ENV_ENGINE) {
            layer.execution = Some(Execution::from_str(&engine)?);
        }

        if let Some(chunk) = lookup(ENV_CHUNK_SIZE) {
            let size = chunk.trim().parse().map_err(|_| {
                ConfigError::EnvError(format!("{}={} is not a positive integer", ENV_CHUNK_SIZE, chunk))
            })?;
            layer.chunk_size = Some(size);
        }

        if let Some(summation) = lookup(ENV_SUMMATION) {
            layer.summation = Some(Summation::from_str(&summation)?);
        }

        Ok(layer)
    }

    /// Fill unset fields of `self` from `lower`
    pub fn over(self, lower: ConfigLayer) -> ConfigLayer {
        ConfigLayer {
            log_level: self.log_level.or(lower.log_level),
            execution: self.execution.or(lower.execution),
            chunk_size: self.chunk_size.or(lower.chunk_size),
            summation: self.summation.or(lower.summation),
        }
    }

    /// Resolve against defaults and validate
    pub fn resolve(self) -> Result<CliConfig, ConfigError> {
        let mut builder = EngineConfig::builder();
        if let Some(execution) = self.execution {
            builder = builder.execution(execution);
        }
        if let Some(chunk_size) = self.chunk_size {
            builder = builder.chunk_size(chunk_size);
        }
        if let Some(summation) = self.summation {
            builder = builder.summation(summation);
        }

        Ok(CliConfig {
            log_level: self.log_level.unwrap_or_default(),
            engine: builder.build()?,
        })
    }
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<String>,
    /// Raise the default log level to debug
    pub verbose: bool,
    /// Engine variant override
    pub engine: Option<Execution>,
}

impl CliArgs {
    fn layer(&self) -> Result<ConfigLayer, ConfigError> {
        let log_level = match &self.log_level {
            Some(level) => Some(LogLevel::from_str(level)?),
            None if self.verbose => Some(LogLevel::Debug),
            None => None,
        };

        Ok(ConfigLayer {
            log_level,
            execution: self.engine,
            ..ConfigLayer::default()
        })
    }
}

/// Build configuration from all sources
///
/// The environment is read here only, never through clap, so a flag and
/// its variable cannot collide.
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<CliConfig, ConfigError> {
    build_config_with_env(cli, ConfigLayer::from_env()?)
}

fn build_config_with_env(cli: &CliArgs, env: ConfigLayer) -> Result<CliConfig, ConfigError> {
    let file = match &cli.config_file {
        Some(path) => ConfigLayer::from_file(path)?,
        None => ConfigLayer::default(),
    };

    cli.layer()?.over(env).over(file).resolve()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_pricing::mc::DEFAULT_CHUNK_SIZE;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ConfigLayer::default().resolve().unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.engine.execution(), Execution::Reference);
        assert_eq!(config.engine.chunk_size(), DEFAULT_CHUNK_SIZE);
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("WARN").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);

        assert!(LogLevel::from_str("invalid").is_err());
    }

    #[test]
    fn test_toml_layer() {
        let layer = ConfigLayer::from_toml_str(
            r#"
            log_level = "Debug"

            [engine]
            execution = "optimized"
            chunk_size = 1024
            "#,
        )
        .unwrap();

        assert_eq!(layer.log_level, Some(LogLevel::Debug));
        assert_eq!(layer.execution, Some(Execution::Optimized));
        assert_eq!(layer.chunk_size, Some(1024));
        assert_eq!(layer.summation, None);
    }

    #[test]
    fn test_toml_rejects_unknown_keys() {
        assert!(ConfigLayer::from_toml_str("paths = 10").is_err());
        assert!(ConfigLayer::from_toml_str("[engine]\nthreads = 4").is_err());
        assert!(ConfigLayer::from_toml_str("log_level = \"loud\"").is_err());
    }

    #[test]
    fn test_env_layer() {
        let layer = ConfigLayer::from_lookup(lookup(&[
            (ENV_ENGINE, "parallel"),
            (ENV_CHUNK_SIZE, " 4096 "),
            (ENV_SUMMATION, "kahan"),
            (ENV_LOG_LEVEL, "trace"),
        ]))
        .unwrap();

        assert_eq!(layer.execution, Some(Execution::Optimized));
        assert_eq!(layer.chunk_size, Some(4096));
        assert_eq!(layer.summation, Some(Summation::Compensated));
        assert_eq!(layer.log_level, Some(LogLevel::Trace));
    }

    #[test]
    fn test_env_layer_rejects_bad_values() {
        assert!(matches!(
            ConfigLayer::from_lookup(lookup(&[(ENV_CHUNK_SIZE, "lots")])),
            Err(ConfigError::EnvError(_))
        ));
        assert!(matches!(
            ConfigLayer::from_lookup(lookup(&[(ENV_ENGINE, "gpu")])),
            Err(ConfigError::Engine(_))
        ));
    }

    #[test]
    fn test_layer_priority() {
        let file = ConfigLayer {
            log_level: Some(LogLevel::Error),
            execution: Some(Execution::Optimized),
            chunk_size: Some(1000),
            summation: Some(Summation::Compensated),
        };
        let env = ConfigLayer {
            chunk_size: Some(2000),
            ..ConfigLayer::default()
        };
        let cli = ConfigLayer {
            execution: Some(Execution::Reference),
            ..ConfigLayer::default()
        };

        let config = cli.over(env).over(file).resolve().unwrap();
        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(config.engine.execution(), Execution::Reference);
        assert_eq!(config.engine.chunk_size(), 2000);
        assert_eq!(config.engine.summation(), Summation::Compensated);
    }

    #[test]
    fn test_resolve_validates_chunk_size() {
        let layer = ConfigLayer {
            chunk_size: Some(0),
            ..ConfigLayer::default()
        };
        assert!(matches!(layer.resolve(), Err(ConfigError::Engine(_))));
    }

    #[test]
    fn test_cli_args_layer() {
        let verbose = CliArgs {
            verbose: true,
            ..CliArgs::default()
        };
        assert_eq!(verbose.layer().unwrap().log_level, Some(LogLevel::Debug));

        let explicit = CliArgs {
            verbose: true,
            log_level: Some("error".to_string()),
            engine: Some(Execution::Optimized),
            ..CliArgs::default()
        };
        let layer = explicit.layer().unwrap();
        assert_eq!(layer.log_level, Some(LogLevel::Error));
        assert_eq!(layer.execution, Some(Execution::Optimized));

        let bad = CliArgs {
            log_level: Some("chatty".to_string()),
            ..CliArgs::default()
        };
        assert!(bad.layer().is_err());
    }

    #[test]
    fn test_build_config_missing_file() {
        let cli = CliArgs {
            config_file: Some(PathBuf::from("/nonexistent/mc_pricer.toml")),
            ..CliArgs::default()
        };
        assert!(matches!(
            build_config_with_env(&cli, ConfigLayer::default()),
            Err(ConfigError::FileError(_))
        ));
    }

    #[test]
    fn test_build_config_cli_over_env() {
        let cli = CliArgs {
            engine: Some(Execution::Optimized),
            ..CliArgs::default()
        };
        let env = ConfigLayer::from_lookup(lookup(&[(ENV_ENGINE, "reference"), (ENV_CHUNK_SIZE, "512")]))
            .unwrap();

        let config = build_config_with_env(&cli, env).unwrap();
        assert_eq!(config.engine.execution(), Execution::Optimized);
        assert_eq!(config.engine.chunk_size(), 512);
    }

    #[test]
    fn test_verbose_flag_beats_env_log_level() {
        let cli = CliArgs {
            verbose: true,
            ..CliArgs::default()
        };
        let env = ConfigLayer::from_lookup(lookup(&[(ENV_LOG_LEVEL, "warn")])).unwrap();
        let config = build_config_with_env(&cli, env).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);

        let explicit = CliArgs {
            verbose: true,
            log_level: Some("error".to_string()),
            ..CliArgs::default()
        };
        let env = ConfigLayer::from_lookup(lookup(&[(ENV_LOG_LEVEL, "warn")])).unwrap();
        let config = build_config_with_env(&explicit, env).unwrap();
        assert_eq!(config.log_level, LogLevel::Error);

        let quiet = CliArgs::default();
        let env = ConfigLayer::from_lookup(lookup(&[(ENV_LOG_LEVEL, "warn")])).unwrap();
        let config = build_config_with_env(&quiet, env).unwrap();
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_resolved_config_serialises_to_toml() {
        let config = CliConfig::default();
        let text = toml::to_string(&config).unwrap();
        assert!(text.contains("log_level = \"info\""));
        assert!(text.contains("[engine]"));
        assert!(text.contains("execution = \"reference\""));
    }
}
