//! Configuration module for the option selector.
//!
//! Loads YAML configuration with environment variable interpolation and
//! validates every section before anything else starts.
//!
//! # Usage
//!
//! ```rust,ignore
//! use option_selector::config::load_config;
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! // Access configuration values
//! println!("mode: {}", config.strategy.mode);
//! ```

mod feed;
mod filter;
mod observability;
mod portfolio;
mod selection;
mod strategy;
mod wheel;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use feed::FeedConfig;
pub use filter::FilterConfig;
pub use observability::{LogFormat, LoggingConfig, ObservabilityConfig};
pub use portfolio::PortfolioConfig;
pub use selection::SelectionConfig;
pub use strategy::{StrategyConfig, StrategyMode};
pub use wheel::WheelConfig;

use crate::domain::shared::Symbol;
use crate::error::ErrorCode;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

impl ConfigError {
    /// Classify this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        ErrorCode::ConfigInvalid
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Delta-targeted selection parameters.
    #[serde(default)]
    pub selection: SelectionConfig,
    /// Chain subscription filter.
    #[serde(default)]
    pub filter: FilterConfig,
    /// Wheel rotation parameters.
    #[serde(default)]
    pub wheel: WheelConfig,
    /// Snapshot feed.
    #[serde(default)]
    pub feed: FeedConfig,
    /// Strategy to run.
    #[serde(default)]
    pub strategy: StrategyConfig,
    /// Market session and holdings fed to the wheel.
    #[serde(default)]
    pub portfolio: PortfolioConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Configured underlyings as symbols.
    #[must_use]
    pub fn underlyings(&self) -> Vec<Symbol> {
        self.strategy.underlyings.iter().map(Symbol::new).collect()
    }
}

pub(crate) const fn default_true() -> bool {
    true
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or("config.yaml");

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax. A missing variable
/// without a default becomes the empty string.
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<Option<regex::Regex>> = OnceLock::new();

    let Some(re) = ENV_VAR_REGEX
        .get_or_init(|| regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}").ok())
    else {
        return input.to_string();
    };

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match cap.get(1).map(|m| std::env::var(m.as_str())) {
            Some(Ok(v)) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

#[allow(clippy::needless_pass_by_value)]
fn invalid(e: impl std::fmt::Display) -> ConfigError {
    ConfigError::ValidationError(e.to_string())
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Deltas are whole percentages strictly inside (0, 100)
    let selection = &config.selection;
    for (name, pct) in [
        ("selection.call_delta", selection.call_delta),
        ("selection.put_delta", selection.put_delta),
    ] {
        if !(1..=99).contains(&pct) {
            return Err(ConfigError::ValidationError(format!(
                "{name} must be between 1 and 99, got {pct}"
            )));
        }
    }
    for (name, dte) in [
        ("selection.call_dte", selection.call_dte),
        ("selection.put_dte", selection.put_dte),
    ] {
        if dte < 0 {
            return Err(ConfigError::ValidationError(format!(
                "{name} must be non-negative, got {dte}"
            )));
        }
    }
    selection.to_params().map_err(invalid)?;

    config.filter.to_filter().map_err(invalid)?;
    config.wheel.to_params().validate().map_err(invalid)?;

    if config.strategy.underlyings.is_empty() {
        return Err(ConfigError::ValidationError(
            "strategy.underlyings must not be empty".to_string(),
        ));
    }
    for symbol in config.underlyings() {
        if symbol.is_option() {
            return Err(ConfigError::ValidationError(format!(
                "strategy.underlyings must be equity symbols, got option {symbol}"
            )));
        }
        symbol.validate().map_err(invalid)?;
    }
    for symbol in config.portfolio.holdings.keys() {
        let symbol = Symbol::new(symbol.as_str());
        if symbol.is_option() {
            return Err(ConfigError::ValidationError(format!(
                "portfolio.holdings must be keyed by equity symbols, got option {symbol}"
            )));
        }
        symbol.validate().map_err(invalid)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.selection.call_delta, 30);
        assert_eq!(config.selection.put_delta, 20);
        assert_eq!(config.filter.strike_window_count, 30);
        assert_eq!(config.filter.min_dte, 55);
        assert_eq!(config.filter.max_dte, 65);
        assert!(config.filter.include_weeklys);
        assert_eq!(config.wheel.otm_threshold, dec!(0.051));
        assert_eq!(config.wheel.min_dte, 30);
        assert_eq!(config.wheel.put_allocation, dec!(0.2));
        assert_eq!(config.strategy.mode, StrategyMode::Wheel);
        assert_eq!(config.observability.logging.format, LogFormat::Json);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_load_empty_config_uses_defaults() {
        let config = match load_config_from_string("{}") {
            Ok(c) => c,
            Err(e) => panic!("should load empty config: {e}"),
        };
        assert_eq!(config.underlyings(), vec![Symbol::new("SPY")]);
    }

    #[test]
    fn test_env_var_with_default_when_missing() {
        let input = "mode: ${OPTION_SELECTOR_TEST_NONEXISTENT_VAR:-WHEEL}";
        assert_eq!(interpolate_env_vars(input), "mode: WHEEL");
    }

    #[test]
    #[expect(clippy::literal_string_with_formatting_args)] // ${...} is env var syntax, not format args
    fn test_env_var_with_default_uses_existing() {
        let input = "path: ${PATH:-default}";
        let result = interpolate_env_vars(input);

        assert_ne!(result, "path: default");
        assert!(result.starts_with("path: "));
    }

    #[test]
    fn test_env_var_without_default_becomes_empty() {
        let input = "dir: ${OPTION_SELECTOR_TEST_UNLIKELY_TO_EXIST}";
        assert_eq!(interpolate_env_vars(input), "dir: ");
    }

    #[test]
    fn test_validation_delta_out_of_range() {
        let yaml = r"
selection:
  call_delta: 0
";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for zero delta");
        };
        assert!(err.to_string().contains("selection.call_delta"));
        assert_eq!(err.code(), ErrorCode::ConfigInvalid);
    }

    #[test]
    fn test_validation_inverted_dte_range() {
        let yaml = r"
filter:
  min_dte: 70
  max_dte: 65
";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for inverted DTE range");
        };
        assert!(err.to_string().contains("min_dte"));
    }

    #[test]
    fn test_validation_wheel_threshold() {
        let yaml = r"
wheel:
  otm_threshold: 1.5
";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for otm_threshold");
        };
        assert!(err.to_string().contains("otm_threshold"));
    }

    #[test]
    fn test_validation_empty_underlyings() {
        let yaml = r"
strategy:
  underlyings: []
";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for empty underlyings");
        };
        assert!(err.to_string().contains("underlyings"));
    }

    #[test]
    fn test_invalid_mode_is_parse_error() {
        let yaml = r"
strategy:
  mode: STRADDLE
";
        assert!(matches!(
            load_config_from_string(yaml),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
selection:
  call_delta: 25
  call_dte: 45
  put_delta: 15
  put_dte: 40

filter:
  strike_window_count: 10
  min_dte: 20
  max_dte: 50
  include_weeklys: false

wheel:
  otm_threshold: 0.08
  min_dte: 21
  put_allocation: 0.5

feed:
  snapshot_dir: "${OPTION_SELECTOR_TEST_SNAPSHOT_DIR:-/var/lib/chains}"

strategy:
  mode: OTM_PUT
  underlyings: ["qqq", "IWM"]

observability:
  logging:
    level: "debug"
    format: "pretty"
"#;

        let config = match load_config_from_string(yaml) {
            Ok(c) => c,
            Err(e) => panic!("should load full config: {e}"),
        };

        let params = config.selection.to_params().unwrap();
        assert_eq!(params.call_delta, dec!(0.25));
        assert_eq!(params.put_dte, 40);
        let filter = config.filter.to_filter().unwrap();
        assert_eq!(filter.strike_window_count(), 10);
        assert_eq!(filter.dte_range(), (20, 50));
        assert!(!config.filter.include_weeklys);
        assert_eq!(config.wheel.to_params().otm_threshold, dec!(0.08));
        assert_eq!(config.wheel.to_params().put_allocation, dec!(0.5));
        assert_eq!(config.feed.snapshot_dir.to_str(), Some("/var/lib/chains"));
        assert_eq!(config.strategy.mode, StrategyMode::OtmPut);
        assert_eq!(config.underlyings(), vec![Symbol::new("QQQ"), Symbol::new("IWM")]);
        assert_eq!(config.observability.logging.level, "debug");
        assert_eq!(config.observability.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_portfolio_holdings() {
        let yaml = r"
portfolio:
  market_open: false
  holdings:
    spy:
      underlying_shares: 300
    QQQ:
      underlying_shares: 100
      option_contracts: 1
";
        let config = load_config_from_string(yaml).unwrap();

        assert!(!config.portfolio.market_open);
        let spy = config.portfolio.holdings_for(&Symbol::new("SPY"));
        assert_eq!(spy.underlying_shares, dec!(300));
        assert!(spy.holds_only_underlying());
        let qqq = config.portfolio.holdings_for(&Symbol::new("QQQ"));
        assert_eq!(qqq.option_contracts, 1);
        assert!(config.portfolio.holdings_for(&Symbol::new("IWM")).is_flat());
    }

    #[test]
    fn test_portfolio_defaults_to_flat_and_open() {
        let config = Config::default();
        assert!(config.portfolio.market_open);
        assert!(config.portfolio.holdings_for(&Symbol::new("SPY")).is_flat());
    }

    #[test]
    fn test_validation_option_keyed_holdings() {
        let yaml = r"
portfolio:
  holdings:
    SPY240419P00500000:
      option_contracts: 1
";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for option-keyed holdings");
        };
        assert!(err.to_string().contains("portfolio.holdings"));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "strategy:\n  mode: OTM_CALL").unwrap();

        let config = load_config(file.path().to_str()).unwrap();
        assert_eq!(config.strategy.mode, StrategyMode::OtmCall);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config(Some("/nonexistent/option-selector.yaml"));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }
}
