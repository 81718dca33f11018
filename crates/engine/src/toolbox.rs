//! One instance of every tool, sharing a single worker pool.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::config::EngineConfig;
use crate::crypto::{Decryptor, Encryptor};
use crate::digest::Hasher;
use crate::identifier::{UlidGenerator, UuidGenerator};
use crate::pool::WorkerPool;
use crate::radix::BaseConverter;

/// Every engine operation, ready to execute.
///
/// Cheap to share across threads: tools hold no per-call state and the only
/// shared resource is the `Arc`-wrapped [`WorkerPool`].
#[derive(Debug, Clone)]
pub struct Toolbox {
    pub uuid: UuidGenerator,
    pub ulid: UlidGenerator,
    pub hash: Hasher,
    pub base: BaseConverter,
    pub encrypt: Encryptor,
    pub decrypt: Decryptor,
}

impl Toolbox {
    /// Build every tool from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the worker pool
    /// cannot be started.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        let pool = Arc::new(WorkerPool::new(config)?);
        info!(
            threads = pool.threads(),
            tools = crate::registry::all().len(),
            "toolbox ready"
        );
        Ok(Self {
            uuid: UuidGenerator::new(pool),
            ulid: UlidGenerator,
            hash: Hasher,
            base: BaseConverter,
            encrypt: Encryptor,
            decrypt: Decryptor,
        })
    }

    /// Build a toolbox from `ENGINE_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment is invalid or the worker pool
    /// cannot be started.
    pub fn from_env() -> Result<Self> {
        Self::new(&EngineConfig::from_env()?)
    }
}
