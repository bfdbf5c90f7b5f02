//! Configuration for every kairos component, loaded from TOML.
//!
//! Each section is optional and falls back to its defaults:
//!
//! ```toml
//! [engine]
//! include_outer_bodies = true
//! speed_step_hours = 1.0
//!
//! [context]
//! tight_orb_deg = 3.0
//!
//! [context.transition]
//! horizon_days = 400.0
//!
//! [context.orbs]
//! square = 6.0
//!
//! [batch]
//! cache_capacity = 1024
//! max_range_days = 45
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use kairos_batch::BatchConfig;
use kairos_core::EngineConfig;
use kairos_search::ContextConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Environment variable naming a config file for [`KairosConfig::from_env`].
pub const CONFIG_ENV_VAR: &str = "KAIROS_CONFIG";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// A section failed validation.
    #[error("invalid [{section}] config: {reason}")]
    Invalid {
        section: &'static str,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KairosConfig {
    pub engine: EngineConfig,
    pub context: ContextConfig,
    pub batch: BatchConfig,
}

impl KairosConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load the file named by `KAIROS_CONFIG`, or defaults when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_optional_path(std::env::var_os(CONFIG_ENV_VAR))
    }

    pub fn from_optional_path(path: Option<OsString>) -> Result<Self, ConfigError> {
        match path {
            Some(p) if !p.is_empty() => Self::load(PathBuf::from(p)),
            _ => Ok(Self::default()),
        }
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate().map_err(invalid("engine"))?;
        self.context.validate().map_err(invalid("context"))?;
        self.batch.validate().map_err(invalid("batch"))?;
        Ok(())
    }
}

fn invalid(section: &'static str) -> impl FnOnce(&'static str) -> ConfigError {
    move |reason| ConfigError::Invalid { section, reason }
}
