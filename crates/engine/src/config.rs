//! Configuration loading and validation for the engine.
//!
//! Values are read from `ENGINE_*` environment variables. Every field has a
//! default, so an empty environment yields a usable configuration.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Validated engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Size of the batch worker pool. `0` means one thread per CPU.
    #[serde(default = "default_worker_threads")]
    pub worker_threads: usize,

    /// Batches smaller than this are generated inline on the caller's thread.
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_worker_threads() -> usize {
    0
}
fn default_parallel_threshold() -> usize {
    64
}
fn default_log_level() -> String {
    "info".into()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            worker_threads: default_worker_threads(),
            parallel_threshold: default_parallel_threshold(),
            log_level: default_log_level(),
        }
    }
}

impl EngineConfig {
    /// Load and validate configuration from `ENGINE_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or fails validation.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::with_prefix("ENGINE").try_parsing(true))
            .build()
            .context("failed to build configuration from environment")?;

        Self::from_config(cfg)
    }

    /// Deserialise and validate an already-built [`config::Config`].
    ///
    /// # Errors
    ///
    /// Returns an error if a value has the wrong type or fails validation.
    pub fn from_config(cfg: config::Config) -> Result<Self> {
        let c: EngineConfig = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    pub fn validate(&self) -> Result<()> {
        if self.parallel_threshold == 0 {
            anyhow::bail!("ENGINE_PARALLEL_THRESHOLD must be > 0");
        }
        if self.log_level.trim().is_empty() {
            anyhow::bail!("ENGINE_LOG_LEVEL must not be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        assert_eq!(default_worker_threads(), 0);
        assert_eq!(default_parallel_threshold(), 64);
        assert_eq!(default_log_level(), "info");
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_threshold() {
        let cfg = EngineConfig {
            parallel_threshold: 0,
            ..EngineConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_blank_log_level() {
        let cfg = EngineConfig {
            log_level: "  ".into(),
            ..EngineConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn empty_source_uses_defaults() {
        let cfg = config::Config::builder().build().unwrap();
        assert_eq!(EngineConfig::from_config(cfg).unwrap(), EngineConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = config::Config::builder()
            .set_override("worker_threads", 3)
            .unwrap()
            .set_override("log_level", "debug")
            .unwrap()
            .build()
            .unwrap();
        let c = EngineConfig::from_config(cfg).unwrap();
        assert_eq!(c.worker_threads, 3);
        assert_eq!(c.parallel_threshold, 64);
        assert_eq!(c.log_level, "debug");
    }

    #[test]
    fn invalid_values_are_rejected() {
        let zero = config::Config::builder()
            .set_override("parallel_threshold", 0)
            .unwrap()
            .build()
            .unwrap();
        assert!(EngineConfig::from_config(zero).is_err());

        let not_a_number = config::Config::builder()
            .set_override("worker_threads", "many")
            .unwrap()
            .build()
            .unwrap();
        assert!(EngineConfig::from_config(not_a_number).is_err());
    }
}
