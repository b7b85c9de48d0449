//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Store names of the two ledgers.
    #[serde(default)]
    pub ledgers: LedgerConfig,
    /// Period sheet layout.
    #[serde(default)]
    pub periods: PeriodConfig,
    /// Delays between consecutive store reads.
    #[serde(default)]
    pub pacing: PacingConfig,
    /// Operator input handling.
    #[serde(default)]
    pub input: InputConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Names under which the ledgers are opened in the store.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Store name of the sales ledger.
    #[serde(default = "default_sales")]
    pub sales: String,
    /// Store name of the purchases ledger.
    #[serde(default = "default_purchases")]
    pub purchases: String,
}

fn default_sales() -> String {
    "vat_sales".to_string()
}

fn default_purchases() -> String {
    "vat_purchases".to_string()
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            sales: default_sales(),
            purchases: default_purchases(),
        }
    }
}

/// Layout of newly created period sheets.
#[derive(Debug, Clone, Deserialize)]
pub struct PeriodConfig {
    /// Rows allocated when a period is created.
    #[serde(default = "default_row_capacity")]
    pub row_capacity: u32,
    /// Columns allocated when a period is created.
    #[serde(default = "default_column_capacity")]
    pub column_capacity: u32,
    /// Cell range styled as the header.
    #[serde(default = "default_header_range")]
    pub header_range: String,
}

fn default_row_capacity() -> u32 {
    150
}

fn default_column_capacity() -> u32 {
    10
}

fn default_header_range() -> String {
    "A1:I1".to_string()
}

impl Default for PeriodConfig {
    fn default() -> Self {
        Self {
            row_capacity: default_row_capacity(),
            column_capacity: default_column_capacity(),
            header_range: default_header_range(),
        }
    }
}

/// Fixed delays that keep aggregation under the store's read quota.
#[derive(Debug, Clone, Deserialize)]
pub struct PacingConfig {
    /// Milliseconds to wait between consecutive store reads. Zero disables.
    #[serde(default = "default_read_delay_ms")]
    pub read_delay_ms: u64,
}

fn default_read_delay_ms() -> u64 {
    1000
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            read_delay_ms: default_read_delay_ms(),
        }
    }
}

/// Operator input configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputConfig {
    /// Attempts per field before giving up. Zero means unbounded.
    #[serde(default)]
    pub max_attempts: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "vatbook=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("VATBOOK").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
