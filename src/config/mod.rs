use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{ChainSealError, Result};

/// Minimum value a transaction output may carry, in lovelace
pub const MIN_OUTPUT_LOVELACE: u64 = 1_000_000;

/// Cardano network the anchor transactions live on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Preprod,
    Preview,
}

impl Network {
    /// Blockfrost-compatible query endpoint for this network
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            Network::Mainnet => "https://cardano-mainnet.blockfrost.io/api/v0",
            Network::Preprod => "https://cardano-preprod.blockfrost.io/api/v0",
            Network::Preview => "https://cardano-preview.blockfrost.io/api/v0",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Preprod => "preprod",
            Network::Preview => "preview",
        }
    }
}

/// ChainSeal configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub network: Network,
    pub ledger: LedgerConfig,
    pub anchor: AnchorConfig,
    pub certificate: CertificateConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    pub endpoint: String,
    pub project_id: String,
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnchorConfig {
    /// Value moved by the mandatory self-transfer, in lovelace
    pub output_lovelace: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateConfig {
    pub issuer_name: String,
    /// Base URL embedded in the scannable verification locator
    pub locator_base: String,
    /// Longest title/filename slice embedded in the locator
    pub max_locator_field_len: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub rest_port: u16,
}

impl Config {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.ledger.endpoint.is_empty() {
            return Err(ChainSealError::config("Ledger query endpoint required"));
        }

        if self.ledger.request_timeout_ms == 0 {
            return Err(ChainSealError::config("Request timeout must be > 0"));
        }

        if self.anchor.output_lovelace < MIN_OUTPUT_LOVELACE {
            return Err(ChainSealError::config(format!(
                "Anchor output ({} lovelace) is below the ledger minimum of {}",
                self.anchor.output_lovelace, MIN_OUTPUT_LOVELACE
            )));
        }

        if self.certificate.locator_base.is_empty() {
            return Err(ChainSealError::config("Verification locator base required"));
        }

        if self.certificate.max_locator_field_len == 0 {
            return Err(ChainSealError::config(
                "Locator field length bound must be > 0",
            ));
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.ledger.request_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::preprod()
    }
}

impl Config {
    /// Create preprod configuration (safer for testing)
    pub fn preprod() -> Self {
        Self::preset(Network::Preprod)
    }

    /// Create mainnet configuration (anchors cost real ADA)
    pub fn mainnet() -> Self {
        Self::preset(Network::Mainnet)
    }

    /// Create preview configuration
    pub fn preview() -> Self {
        Self::preset(Network::Preview)
    }

    /// Create custom configuration with a specific query endpoint
    pub fn custom(network: Network, endpoint: impl Into<String>) -> Self {
        let mut config = Self::preset(network);
        config.ledger.endpoint = endpoint.into();
        config
    }

    fn preset(network: Network) -> Self {
        Self {
            network,
            ledger: LedgerConfig {
                endpoint: network.default_endpoint().to_string(),
                project_id: String::new(),
                request_timeout_ms: 5000,
            },
            anchor: AnchorConfig {
                output_lovelace: MIN_OUTPUT_LOVELACE,
            },
            certificate: CertificateConfig {
                issuer_name: "ChainSeal".to_string(),
                locator_base: "https://chainseal.app/verify".to_string(),
                max_locator_field_len: 120,
            },
            api: ApiConfig { rest_port: 8081 },
        }
    }

    /// Layered load: network preset, then an optional `chainseal.toml`,
    /// then `CHAINSEAL__*` environment overrides. The Blockfrost project
    /// id additionally falls back to `BLOCKFROST_PROJECT_ID`.
    pub fn load(network: Network) -> Result<Self> {
        let defaults = config::Config::try_from(&Self::preset(network))
            .map_err(|e| ChainSealError::config(e.to_string()))?;

        let mut loaded: Config = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::with_name("chainseal").required(false))
            .add_source(config::Environment::with_prefix("CHAINSEAL").separator("__"))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| ChainSealError::config(e.to_string()))?;

        if loaded.ledger.project_id.is_empty() {
            if let Ok(project_id) = std::env::var("BLOCKFROST_PROJECT_ID") {
                loaded.ledger.project_id = project_id;
            }
        }

        loaded.validate()?;
        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.network, Network::Preprod);
    }

    #[test]
    fn test_network_presets() {
        assert!(Config::mainnet().validate().is_ok());
        assert!(Config::preview().validate().is_ok());
        assert_ne!(
            Config::mainnet().ledger.endpoint,
            Config::preprod().ledger.endpoint
        );
    }

    #[test]
    fn test_custom_endpoint() {
        let config = Config::custom(Network::Preview, "http://localhost:3100");
        assert!(config.validate().is_ok());
        assert_eq!(config.ledger.endpoint, "http://localhost:3100");
        assert_eq!(config.network, Network::Preview);
    }

    #[test]
    fn test_empty_endpoint_is_rejected() {
        let mut config = Config::default();
        config.ledger.endpoint.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_output_below_ledger_minimum_is_rejected() {
        let mut config = Config::default();
        config.anchor.output_lovelace = 999_999;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_locator_base_is_rejected() {
        let mut config = Config::default();
        config.certificate.locator_base.clear();
        assert!(config.validate().is_err());
    }
}
