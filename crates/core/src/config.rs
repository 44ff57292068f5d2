//! Configuration structures for the trading intent pipeline.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Main configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Classification provider configuration.
    pub provider: ProviderConfig,
    /// Symbol/side normalization configuration.
    pub normalizer: NormalizerConfig,
}

impl Config {
    /// Parse a JSON document. Missing sections fall back to defaults.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Check values that would make the pipeline misbehave.
    pub fn validate(&self) -> Result<()> {
        self.provider.validate()?;
        self.normalizer.validate()
    }
}

/// Classification provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Message endpoint URL.
    pub api_url: String,
    /// API version sent as the `v` query parameter.
    pub api_version: String,
    /// Bearer token. Falls back to `token_env` when unset.
    pub token: Option<String>,
    /// Environment variable holding the token.
    pub token_env: String,
    /// HTTP client timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.wit.ai/message".to_string(),
            api_version: "20240304".to_string(),
            token: None,
            token_env: "WIT_AI_TOKEN".to_string(),
            timeout_ms: 10_000,
        }
    }
}

impl ProviderConfig {
    fn validate(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(Error::config("provider.api_url must not be empty"));
        }
        if self.api_version.trim().is_empty() {
            return Err(Error::config("provider.api_version must not be empty"));
        }
        if self.timeout_ms == 0 {
            return Err(Error::config("provider.timeout_ms must be positive"));
        }
        Ok(())
    }

    /// Explicit token, or the value of `token_env`.
    pub fn resolve_token(&self) -> Result<String> {
        let token = match &self.token {
            Some(token) => token.clone(),
            None => std::env::var(&self.token_env).unwrap_or_default(),
        };
        if token.trim().is_empty() {
            return Err(Error::config(format!(
                "provider token is required (set provider.token or {})",
                self.token_env
            )));
        }
        Ok(token)
    }
}

/// Normalization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Quote asset appended to unknown symbols (e.g. "USDT").
    pub quote_asset: String,
    /// Extra alias -> canonical pair entries, merged over the built-in table.
    pub symbol_aliases: BTreeMap<String, String>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            quote_asset: "USDT".to_string(),
            symbol_aliases: BTreeMap::new(),
        }
    }
}

impl NormalizerConfig {
    /// Reject a blank quote asset or blank alias entries.
    pub fn validate(&self) -> Result<()> {
        if self.quote_asset.trim().is_empty() {
            return Err(Error::config("normalizer.quote_asset must not be empty"));
        }
        if let Some((alias, _)) = self
            .symbol_aliases
            .iter()
            .find(|(alias, pair)| alias.trim().is_empty() || pair.trim().is_empty())
        {
            return Err(Error::config(format!(
                "normalizer.symbol_aliases has an empty entry near {alias:?}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.provider.api_version, "20240304");
        assert_eq!(config.provider.timeout_ms, 10_000);
        assert_eq!(config.normalizer.quote_asset, "USDT");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = Config::from_json_str(
            r#"{"normalizer": {"symbol_aliases": {"avalanche": "AVAX-USDT"}}}"#,
        )
        .unwrap();
        assert_eq!(config.normalizer.quote_asset, "USDT");
        assert_eq!(config.normalizer.symbol_aliases["avalanche"], "AVAX-USDT");
        assert_eq!(config.provider.api_url, "https://api.wit.ai/message");
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = Config::from_json_str(r#"{"provider": {"timeout_ms": 0}}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_empty_quote_rejected() {
        let err = Config::from_json_str(r#"{"normalizer": {"quote_asset": " "}}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_normalizer_validate_is_public() {
        let config = NormalizerConfig {
            quote_asset: "".to_string(),
            ..NormalizerConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
        assert!(NormalizerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("intent.json");
        std::fs::write(
            &path,
            r#"{"provider": {"timeout_ms": 2500}, "normalizer": {"quote_asset": "USDC"}}"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.provider.timeout_ms, 2500);
        assert_eq!(config.normalizer.quote_asset, "USDC");
        assert_eq!(config.provider.api_version, "20240304");
    }

    #[test]
    fn test_from_file_missing_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::from_file(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_from_file_invalid_values_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("intent.json");
        std::fs::write(&path, r#"{"normalizer": {"quote_asset": ""}}"#).unwrap();
        assert!(matches!(Config::from_file(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_explicit_token_wins() {
        let provider = ProviderConfig {
            token: Some("abc".to_string()),
            token_env: "INTENT_TEST_UNSET_TOKEN_VAR".to_string(),
            ..ProviderConfig::default()
        };
        assert_eq!(provider.resolve_token().unwrap(), "abc");
    }

    #[test]
    fn test_missing_token_is_config_error() {
        let provider = ProviderConfig {
            token: None,
            token_env: "INTENT_TEST_UNSET_TOKEN_VAR".to_string(),
            ..ProviderConfig::default()
        };
        assert!(matches!(provider.resolve_token(), Err(Error::Config(_))));
    }
}
