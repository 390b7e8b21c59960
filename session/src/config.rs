//! Matcher configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;

use splitticket_fees::{FeeModel, FeeParams};
use splitticket_types::{ChainHash, ChainParams, NetworkId};
use splitticket_utils::LogFormat;

use crate::{Session, SessionError};

/// Configuration of a split ticket matcher.
///
/// Can be loaded from a TOML file via [`MatcherConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Which network tickets are bought on.
    #[serde(default = "default_network")]
    pub network: NetworkId,

    /// Fee model constants; omitted fields keep their defaults.
    #[serde(default)]
    pub fees: FeeParams,

    /// Largest number of participants admitted to one session.
    #[serde(default = "default_max_participants")]
    pub max_participants: usize,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_network() -> NetworkId {
    NetworkId::Test
}

fn default_max_participants() -> usize {
    64
}

fn default_log_level() -> String {
    "info".to_string()
}

impl MatcherConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| SessionError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, SessionError> {
        let config: Self = toml::from_str(s).map_err(|e| SessionError::Config(e.to_string()))?;
        if config.max_participants == 0 {
            return Err(SessionError::Config(
                "max_participants must be at least 1".into(),
            ));
        }
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, SessionError> {
        toml::to_string_pretty(self).map_err(|e| SessionError::Config(e.to_string()))
    }

    pub fn chain_params(&self) -> ChainParams {
        ChainParams::for_network(self.network)
    }

    pub fn fee_model(&self) -> FeeModel {
        FeeModel::new(self.fees.clone())
    }

    /// Open an empty session anchored at `anchor`.
    pub fn new_session(&self, anchor: ChainHash) -> Session {
        Session::new(anchor, self.fee_model(), self.max_participants)
    }

    /// Install the global log subscriber described by this config.
    pub fn init_logging(&self) -> Result<(), SessionError> {
        splitticket_utils::init_logging(self.log_format, &self.log_level)?;
        Ok(())
    }
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            network: default_network(),
            fees: FeeParams::default(),
            max_participants: default_max_participants(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}
