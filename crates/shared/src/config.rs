//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Reporting configuration.
    #[serde(default)]
    pub reporting: ReportingConfig,
    /// Fiscal calendar configuration.
    #[serde(default)]
    pub fiscal: FiscalConfig,
}

/// Reporting configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportingConfig {
    /// Common currency all amounts are converted into.
    #[serde(default = "default_reporting_currency")]
    pub currency: String,
    /// Decimal places for converted amounts.
    #[serde(default = "default_precision")]
    pub precision: u32,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            currency: default_reporting_currency(),
            precision: default_precision(),
        }
    }
}

fn default_reporting_currency() -> String {
    "USD".to_string()
}

fn default_precision() -> u32 {
    4
}

/// Fiscal calendar configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FiscalConfig {
    /// Default financial-year start month for entities that do not configure one.
    #[serde(default = "default_start_month")]
    pub start_month: u32,
    /// Default financial-year start day.
    #[serde(default = "default_start_day")]
    pub start_day: u32,
}

impl Default for FiscalConfig {
    fn default() -> Self {
        Self {
            start_month: default_start_month(),
            start_day: default_start_day(),
        }
    }
}

fn default_start_month() -> u32 {
    4 // April
}

fn default_start_day() -> u32 {
    1
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("MERIDIAN").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.reporting.currency, "USD");
        assert_eq!(config.reporting.precision, 4);
        assert_eq!(config.fiscal.start_month, 4);
        assert_eq!(config.fiscal.start_day, 1);
    }

    #[test]
    fn test_env_override() {
        temp_env::with_vars(
            [
                ("MERIDIAN__REPORTING__CURRENCY", Some("EUR")),
                ("MERIDIAN__FISCAL__START_MONTH", Some("1")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.reporting.currency, "EUR");
                assert_eq!(config.fiscal.start_month, 1);
                // Untouched values keep their defaults.
                assert_eq!(config.reporting.precision, 4);
            },
        );
    }
}
