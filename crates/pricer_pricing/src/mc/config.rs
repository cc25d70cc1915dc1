//! Monte Carlo engine configuration.
//!
//! This module provides [`EngineConfig`] and its builder. The configuration
//! selects the engine variant, the chunk size of the parallel variant and
//! the summation policy. It never affects the estimator itself, only how the
//! sum over paths is evaluated.

use std::fmt;
use std::str::FromStr;

use pricer_core::types::PricingError;
use serde::{Deserialize, Serialize};

/// Default number of paths per parallel chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 65_536;

/// Maximum number of paths per parallel chunk.
pub const MAX_CHUNK_SIZE: usize = 1 << 24;

/// Engine variant.
///
/// Both variants evaluate the same estimator with the same formula. They
/// differ in how normals are drawn and how the path sum is scheduled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Execution {
    /// Scalar loop on the calling thread: one generator, one draw per path.
    #[default]
    Reference,

    /// Fixed-size chunks evaluated on the rayon pool, each chunk with its own
    /// generator stream and batched normal generation.
    #[serde(alias = "optimised")]
    Optimized,
}

impl FromStr for Execution {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reference" | "ref" | "sequential" => Ok(Execution::Reference),
            "optimized" | "optimised" | "opt" | "parallel" => Ok(Execution::Optimized),
            _ => Err(PricingError::InvalidConfig {
                name: "execution",
                reason: format!("unknown engine variant '{}': expected reference or optimized", s),
            }),
        }
    }
}

impl fmt::Display for Execution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Execution::Reference => write!(f, "reference"),
            Execution::Optimized => write!(f, "optimized"),
        }
    }
}

/// Summation policy for the running payoff totals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Summation {
    /// Plain `f64` running sum.
    #[default]
    Plain,

    /// Kahan-Babuška (Neumaier) compensated summation.
    Compensated,
}

impl FromStr for Summation {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" => Ok(Summation::Plain),
            "compensated" | "kahan" | "neumaier" => Ok(Summation::Compensated),
            _ => Err(PricingError::InvalidConfig {
                name: "summation",
                reason: format!("unknown summation '{}': expected plain or compensated", s),
            }),
        }
    }
}

impl fmt::Display for Summation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Summation::Plain => write!(f, "plain"),
            Summation::Compensated => write!(f, "compensated"),
        }
    }
}

/// Monte Carlo engine configuration.
///
/// Immutable once built. Use [`EngineConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{EngineConfig, Execution, Summation};
///
/// let config = EngineConfig::builder()
///     .execution(Execution::Optimized)
///     .chunk_size(16_384)
///     .summation(Summation::Compensated)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.chunk_size(), 16_384);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct EngineConfig {
    execution: Execution,
    chunk_size: usize,
    summation: Summation,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            execution: Execution::Reference,
            chunk_size: DEFAULT_CHUNK_SIZE,
            summation: Summation::Plain,
        }
    }
}

impl EngineConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Default configuration with the given engine variant.
    #[inline]
    pub fn with_execution(execution: Execution) -> Self {
        Self {
            execution,
            ..Self::default()
        }
    }

    /// Returns the engine variant.
    #[inline]
    pub fn execution(&self) -> Execution {
        self.execution
    }

    /// Returns the number of paths per parallel chunk.
    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns the summation policy.
    #[inline]
    pub fn summation(&self) -> Summation {
        self.summation
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidConfig` if `chunk_size` is 0 or greater
    /// than [`MAX_CHUNK_SIZE`].
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.chunk_size == 0 || self.chunk_size > MAX_CHUNK_SIZE {
            return Err(PricingError::InvalidConfig {
                name: "chunk_size",
                reason: format!(
                    "{} is outside the valid range [1, {}]",
                    self.chunk_size, MAX_CHUNK_SIZE
                ),
            });
        }
        Ok(())
    }

    /// Parses a configuration from TOML. Missing keys take their defaults.
    ///
    /// ```rust
    /// use pricer_pricing::mc::{EngineConfig, Execution};
    ///
    /// let config = EngineConfig::from_toml_str("execution = \"optimized\"").unwrap();
    /// assert_eq!(config.execution(), Execution::Optimized);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidConfig` on malformed TOML or invalid values.
    pub fn from_toml_str(input: &str) -> Result<Self, PricingError> {
        let file: EngineConfigFile =
            toml::from_str(input).map_err(|e| PricingError::InvalidConfig {
                name: "engine",
                reason: e.to_string(),
            })?;
        file.into_builder().build()
    }
}

/// On-disk shape of [`EngineConfig`]; every key optional.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfigFile {
    /// Engine variant.
    pub execution: Option<Execution>,
    /// Paths per parallel chunk.
    pub chunk_size: Option<usize>,
    /// Summation policy.
    pub summation: Option<Summation>,
}

impl EngineConfigFile {
    /// Converts the file contents into a builder seeded with defaults.
    pub fn into_builder(self) -> EngineConfigBuilder {
        EngineConfigBuilder {
            execution: self.execution,
            chunk_size: self.chunk_size,
            summation: self.summation,
        }
    }
}

/// Builder for [`EngineConfig`].
///
/// Unset fields fall back to [`EngineConfig::default`]; validation happens
/// in [`build`](Self::build).
#[derive(Clone, Debug, Default)]
pub struct EngineConfigBuilder {
    execution: Option<Execution>,
    chunk_size: Option<usize>,
    summation: Option<Summation>,
}

impl EngineConfigBuilder {
    /// Sets the engine variant.
    #[inline]
    pub fn execution(mut self, execution: Execution) -> Self {
        self.execution = Some(execution);
        self
    }

    /// Sets the number of paths per parallel chunk.
    #[inline]
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    /// Sets the summation policy.
    #[inline]
    pub fn summation(mut self, summation: Summation) -> Self {
        self.summation = Some(summation);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidConfig` if the chunk size is out of range.
    pub fn build(self) -> Result<EngineConfig, PricingError> {
        let defaults = EngineConfig::default();
        let config = EngineConfig {
            execution: self.execution.unwrap_or(defaults.execution),
            chunk_size: self.chunk_size.unwrap_or(defaults.chunk_size),
            summation: self.summation.unwrap_or(defaults.summation),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.execution(), Execution::Reference);
        assert_eq!(config.chunk_size(), DEFAULT_CHUNK_SIZE);
        assert_eq!(config.summation(), Summation::Plain);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_defaults_match_default() {
        assert_eq!(EngineConfig::builder().build().unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_builder_overrides() {
        let config = EngineConfig::builder()
            .execution(Execution::Optimized)
            .chunk_size(1024)
            .summation(Summation::Compensated)
            .build()
            .unwrap();

        assert_eq!(config.execution(), Execution::Optimized);
        assert_eq!(config.chunk_size(), 1024);
        assert_eq!(config.summation(), Summation::Compensated);
    }

    #[test]
    fn test_invalid_chunk_size() {
        assert!(matches!(
            EngineConfig::builder().chunk_size(0).build(),
            Err(PricingError::InvalidConfig {
                name: "chunk_size",
                ..
            })
        ));
        assert!(EngineConfig::builder()
            .chunk_size(MAX_CHUNK_SIZE + 1)
            .build()
            .is_err());
    }

    #[test]
    fn test_execution_parsing() {
        assert_eq!(Execution::from_str("reference").unwrap(), Execution::Reference);
        assert_eq!(Execution::from_str("Optimized").unwrap(), Execution::Optimized);
        assert_eq!(Execution::from_str("optimised").unwrap(), Execution::Optimized);
        assert_eq!(Execution::from_str("parallel").unwrap(), Execution::Optimized);
        assert!(Execution::from_str("gpu").is_err());
    }

    #[test]
    fn test_summation_parsing() {
        assert_eq!(Summation::from_str("PLAIN").unwrap(), Summation::Plain);
        assert_eq!(Summation::from_str("kahan").unwrap(), Summation::Compensated);
        assert!(Summation::from_str("pairwise").is_err());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for e in [Execution::Reference, Execution::Optimized] {
            assert_eq!(Execution::from_str(&e.to_string()).unwrap(), e);
        }
        for s in [Summation::Plain, Summation::Compensated] {
            assert_eq!(Summation::from_str(&s.to_string()).unwrap(), s);
        }
    }

    #[test]
    fn test_from_toml_full() {
        let config = EngineConfig::from_toml_str(
            r#"
            execution = "optimized"
            chunk_size = 4096
            summation = "compensated"
            "#,
        )
        .unwrap();
        assert_eq!(config.execution(), Execution::Optimized);
        assert_eq!(config.chunk_size(), 4096);
        assert_eq!(config.summation(), Summation::Compensated);
    }

    #[test]
    fn test_from_toml_empty_is_default() {
        assert_eq!(EngineConfig::from_toml_str("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_from_toml_rejects_bad_input() {
        assert!(EngineConfig::from_toml_str("chunk_size = 0").is_err());
        assert!(EngineConfig::from_toml_str("execution = \"gpu\"").is_err());
        assert!(EngineConfig::from_toml_str("threads = 4").is_err());
    }
}
