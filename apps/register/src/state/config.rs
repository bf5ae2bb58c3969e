//! # Register Configuration
//!
//! Settings loaded once at start-up.
//!
//! ## Configuration Sources (Priority Order)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Command line flags    --tax-rate 0.07  --receipts-dir /var/rcpt    │  wins
//! │  2. Environment           QUICKMART_TAX_RATE, QUICKMART_RECEIPTS_DIR,   │
//! │                           QUICKMART_STORE_NAME                          │
//! │  3. Config file           --config FILE, else ./quickmart.toml          │
//! │  4. Defaults              (this file)                                   │  loses
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## File Format
//! ```toml
//! store_name = "Jerry's Quick Mart"
//! tax_rate = 0.065          # or "6.5%"
//! receipts_dir = "receipts"
//! ```
//!
//! Read-only after start-up.

use std::path::{Path, PathBuf};

use quickmart_core::{TaxRate, ValidationError, DEFAULT_TAX_RATE_BPS};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "quickmart.toml";

/// Configuration errors. All of them stop start-up.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid {setting}: {source}")]
    InvalidValue {
        setting: String,
        #[source]
        source: ValidationError,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Config File
// =============================================================================

/// Tax rate as written in TOML: a bare number or a string like `"6.5%"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RateSetting {
    Number(f64),
    Text(String),
}

impl RateSetting {
    fn to_tax_rate(&self) -> Result<TaxRate, ValidationError> {
        match self {
            RateSetting::Number(n) => TaxRate::parse(&n.to_string()),
            RateSetting::Text(s) => TaxRate::parse(s),
        }
    }
}

/// On-disk shape; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    store_name: Option<String>,
    tax_rate: Option<RateSetting>,
    receipts_dir: Option<PathBuf>,
}

// =============================================================================
// Overrides
// =============================================================================

/// Values supplied on the command line. `None` keeps the lower layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_file: Option<PathBuf>,
    pub store_name: Option<String>,
    pub tax_rate: Option<String>,
    pub receipts_dir: Option<PathBuf>,
}

// =============================================================================
// Register Config
// =============================================================================

/// Register configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterConfig {
    /// Shown in the shell banner.
    pub store_name: String,

    /// Sales tax applied to taxable lines.
    pub tax_rate: TaxRate,

    /// Where receipts are written and transaction numbers recovered from.
    pub receipts_dir: PathBuf,
}

impl Default for RegisterConfig {
    /// ## Default Values
    /// - Store: "Jerry's Quick Mart"
    /// - Tax: 6.5%
    /// - Receipts: `./receipts`
    fn default() -> Self {
        RegisterConfig {
            store_name: "Jerry's Quick Mart".to_string(),
            tax_rate: TaxRate::from_bps(DEFAULT_TAX_RATE_BPS),
            receipts_dir: PathBuf::from("receipts"),
        }
    }
}

impl RegisterConfig {
    /// Loads configuration from every layer and validates the result.
    pub fn load(overrides: &ConfigOverrides) -> ConfigResult<Self> {
        Self::load_with_env(overrides, |key| std::env::var(key).ok())
    }

    /// Same as [`load`](Self::load) with an explicit environment lookup.
    pub fn load_with_env(
        overrides: &ConfigOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> ConfigResult<Self> {
        let mut config = RegisterConfig::default();

        // An explicit --config must exist; the implicit one is optional
        match &overrides.config_file {
            Some(path) => config.apply_file(path)?,
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    config.apply_file(path)?;
                } else {
                    debug!(?path, "Config file not found, using defaults");
                }
            }
        }

        config.apply_env_overrides(env)?;
        config.apply_overrides(overrides)?;
        config.validate()?;

        info!(
            store = %config.store_name,
            tax_rate = %config.tax_rate,
            receipts_dir = %config.receipts_dir.display(),
            "Configuration loaded"
        );
        Ok(config)
    }

    fn apply_file(&mut self, path: &Path) -> ConfigResult<()> {
        info!(?path, "Loading register config from file");

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(name) = file.store_name {
            self.store_name = name;
        }
        if let Some(rate) = file.tax_rate {
            self.tax_rate = rate.to_tax_rate().map_err(|source| ConfigError::InvalidValue {
                setting: "tax_rate".to_string(),
                source,
            })?;
        }
        if let Some(dir) = file.receipts_dir {
            self.receipts_dir = dir;
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self, env: impl Fn(&str) -> Option<String>) -> ConfigResult<()> {
        if let Some(name) = env("QUICKMART_STORE_NAME") {
            self.store_name = name;
        }

        if let Some(rate) = env("QUICKMART_TAX_RATE") {
            debug!(tax_rate = %rate, "Overriding tax rate from environment");
            self.tax_rate = parse_rate("QUICKMART_TAX_RATE", &rate)?;
        }

        if let Some(dir) = env("QUICKMART_RECEIPTS_DIR") {
            self.receipts_dir = PathBuf::from(dir);
        }
        Ok(())
    }

    fn apply_overrides(&mut self, overrides: &ConfigOverrides) -> ConfigResult<()> {
        if let Some(name) = &overrides.store_name {
            self.store_name = name.clone();
        }
        if let Some(rate) = &overrides.tax_rate {
            self.tax_rate = parse_rate("--tax-rate", rate)?;
        }
        if let Some(dir) = &overrides.receipts_dir {
            self.receipts_dir = dir.clone();
        }
        Ok(())
    }

    /// Validates the configuration.
    ///
    /// The tax rate range is enforced by [`TaxRate`] itself.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.store_name.trim().is_empty() {
            return Err(ConfigError::Invalid("store_name must not be empty".into()));
        }

        if self.receipts_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("receipts_dir must not be empty".into()));
        }

        Ok(())
    }
}

fn parse_rate(setting: &str, text: &str) -> ConfigResult<TaxRate> {
    TaxRate::parse(text).map_err(|source| ConfigError::InvalidValue {
        setting: setting.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("register.toml");
        std::fs::write(&path, contents).unwrap();
        path
    }

    /// Collects formatted log output.
    #[derive(Clone, Default)]
    struct LogBuffer(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_defaults() {
        let config = RegisterConfig::default();
        assert_eq!(config.store_name, "Jerry's Quick Mart");
        assert_eq!(config.tax_rate, TaxRate::from_bps(650));
        assert_eq!(config.receipts_dir, PathBuf::from("receipts"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_logs_configuration_once() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "store_name = \"Corner Shop\"\n");
        let overrides = ConfigOverrides {
            config_file: Some(path),
            ..Default::default()
        };

        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            RegisterConfig::load_with_env(&overrides, no_env).unwrap();
        });

        let text = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert_eq!(text.matches("Configuration loaded").count(), 1);
        assert!(text.contains("Corner Shop"));
    }

    #[test]
    fn test_file_values() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "store_name = \"Corner Shop\"\ntax_rate = 0.0825\nreceipts_dir = \"out\"\n",
        );

        let overrides = ConfigOverrides {
            config_file: Some(path),
            ..Default::default()
        };
        let config = RegisterConfig::load_with_env(&overrides, no_env).unwrap();

        assert_eq!(config.store_name, "Corner Shop");
        assert_eq!(config.tax_rate, TaxRate::from_bps(825));
        assert_eq!(config.receipts_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_file_percentage_rate() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "tax_rate = \"7%\"\n");

        let overrides = ConfigOverrides {
            config_file: Some(path),
            ..Default::default()
        };
        let config = RegisterConfig::load_with_env(&overrides, no_env).unwrap();
        assert_eq!(config.tax_rate, TaxRate::from_bps(700));
    }

    #[test]
    fn test_precedence_file_env_cli() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "tax_rate = 0.05\nreceipts_dir = \"from-file\"\n");

        let env: HashMap<&str, &str> = [
            ("QUICKMART_TAX_RATE", "0.06"),
            ("QUICKMART_RECEIPTS_DIR", "from-env"),
        ]
        .into_iter()
        .collect();
        let lookup = |key: &str| env.get(key).map(|v| v.to_string());

        let overrides = ConfigOverrides {
            config_file: Some(path),
            tax_rate: Some("6.5%".to_string()),
            ..Default::default()
        };
        let config = RegisterConfig::load_with_env(&overrides, lookup).unwrap();

        assert_eq!(config.tax_rate, TaxRate::from_bps(650));
        assert_eq!(config.receipts_dir, PathBuf::from("from-env"));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let overrides = ConfigOverrides {
            config_file: Some(dir.path().join("absent.toml")),
            ..Default::default()
        };

        assert!(matches!(
            RegisterConfig::load_with_env(&overrides, no_env),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_values() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "tax_rate = 2.5\n");
        let overrides = ConfigOverrides {
            config_file: Some(path),
            ..Default::default()
        };
        assert!(matches!(
            RegisterConfig::load_with_env(&overrides, no_env),
            Err(ConfigError::InvalidValue { .. })
        ));

        let path = write_config(&dir, "tax_rte = 0.05\n");
        let overrides = ConfigOverrides {
            config_file: Some(path),
            ..Default::default()
        };
        assert!(matches!(
            RegisterConfig::load_with_env(&overrides, no_env),
            Err(ConfigError::Parse { .. })
        ));

        let overrides = ConfigOverrides {
            store_name: Some("   ".to_string()),
            config_file: Some(write_config(&dir, "")),
            ..Default::default()
        };
        assert!(matches!(
            RegisterConfig::load_with_env(&overrides, no_env),
            Err(ConfigError::Invalid(_))
        ));
    }
}
