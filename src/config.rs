//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt::MakeWriter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::ApiConfig;
use crate::presentation::{CurrencyFormat, Grouping};
use crate::roster::{CommissionPolicy, Roster};
use crate::websocket::HubConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub commission: CommissionPolicy,

    #[serde(default)]
    pub roster: RosterConfig,

    #[serde(default)]
    pub display: CurrencyFormat,

    #[serde(default)]
    pub websocket: HubConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Initial roster contents
#[derive(Debug, Clone, Deserialize)]
pub struct RosterConfig {
    /// Start with the two demo employees
    #[serde(default = "default_seed_demo_data")]
    pub seed_demo_data: bool,
}

fn default_seed_demo_data() -> bool {
    true
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            seed_demo_data: default_seed_demo_data(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Install the global tracing subscriber, writing to stdout.
    ///
    /// `RUST_LOG` wins over the configured level when set.
    pub fn init(&self) {
        self.subscriber(std::io::stdout).init();
    }

    /// Install the global tracing subscriber, writing to stderr.
    ///
    /// For binaries that draw their own output on stdout.
    pub fn init_stderr(&self) {
        self.subscriber(std::io::stderr).init();
    }

    fn subscriber<W>(&self, writer: W) -> Box<dyn tracing::Subscriber + Send + Sync>
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!("tally={},tower_http=debug", self.level).into()
        });

        let registry = tracing_subscriber::registry().with(filter);

        if self.format.eq_ignore_ascii_case("json") {
            Box::new(registry.with(tracing_subscriber::fmt::layer().json().with_writer(writer)))
        } else {
            Box::new(registry.with(tracing_subscriber::fmt::layer().with_writer(writer)))
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `var` returns for each `TALLY_*` key
    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_overrides(var);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("tally").join("config.toml")),
            Some(PathBuf::from("/etc/tally/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env().unwrap_or_else(|e| {
            tracing::warn!("Ignoring environment overrides: {}", e);
            Config::default()
        })
    }

    /// Build the initial roster described by this configuration
    pub fn initial_roster(&self) -> Roster {
        if self.roster.seed_demo_data {
            Roster::seeded(self.commission)
        } else {
            Roster::new(self.commission)
        }
    }

    /// Reject settings that would break the commission rule
    pub fn validate(&self) -> Result<(), ConfigError> {
        let policy = &self.commission;
        if !policy.threshold.is_finite() || policy.threshold < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "commission.threshold must be a non-negative number, got {}",
                policy.threshold
            )));
        }
        if !policy.rate.is_finite() || policy.rate < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "commission.rate must be a non-negative number, got {}",
                policy.rate
            )));
        }
        Ok(())
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // API overrides
        if let Some(host) = var("TALLY_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = var("TALLY_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        // Commission overrides
        if let Some(threshold) = var("TALLY_COMMISSION_THRESHOLD") {
            if let Ok(t) = threshold.parse() {
                self.commission.threshold = t;
            }
        }
        if let Some(rate) = var("TALLY_COMMISSION_RATE") {
            if let Ok(r) = rate.parse() {
                self.commission.rate = r;
            }
        }

        // Roster overrides
        if let Some(seed) = var("TALLY_SEED_DEMO_DATA") {
            self.roster.seed_demo_data = seed.to_lowercase() != "false" && seed != "0";
        }

        // Display overrides
        if let Some(symbol) = var("TALLY_CURRENCY_SYMBOL") {
            self.display.symbol = symbol;
        }
        if let Some(grouping) = var("TALLY_CURRENCY_GROUPING") {
            match grouping.parse::<Grouping>() {
                Ok(g) => self.display.grouping = g,
                Err(e) => tracing::warn!("Ignoring TALLY_CURRENCY_GROUPING: {}", e),
            }
        }

        // Logging overrides
        if let Some(level) = var("TALLY_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("TALLY_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Tally Configuration
#
# Environment variables override these settings:
# - TALLY_API_HOST
# - TALLY_API_PORT
# - TALLY_COMMISSION_THRESHOLD
# - TALLY_COMMISSION_RATE
# - TALLY_SEED_DEMO_DATA
# - TALLY_CURRENCY_SYMBOL
# - TALLY_CURRENCY_GROUPING
# - TALLY_LOG_LEVEL
# - TALLY_LOG_FORMAT

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8082

# Allowed CORS origins (empty = allow any)
cors_origins = ["http://localhost:8084", "http://127.0.0.1:8084"]

# Maximum employees accepted in one batch request
max_batch_size = 1000

# Enable the export endpoint
enable_export = true

[commission]
# Sales must be strictly greater than this to earn commission
threshold = 50000.0

# Fraction of sales paid as commission once qualified
rate = 0.1

[roster]
# Start with the two demo employees
seed_demo_data = true

[display]
# Currency symbol prefixed to amounts
symbol = "₹"

# Digit grouping: western (1,000,000) or indian (10,00,000)
grouping = "western"

[websocket]
# Maximum concurrent dashboard connections
max_connections = 1000

# Capacity of the internal broadcast channel
broadcast_capacity = 1024

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.port, 8082);
        assert_eq!(config.commission, CommissionPolicy::default());
        assert!(config.roster.seed_demo_data);
        assert_eq!(config.display.symbol, "₹");
        assert_eq!(config.display.grouping, Grouping::Western);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_generated_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.api.host, "0.0.0.0");
        assert_eq!(config.api.max_batch_size, 1000);
        assert_eq!(config.commission.threshold, 50_000.0);
        assert_eq!(config.commission.rate, 0.1);
        assert_eq!(config.websocket.max_connections, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[commission]\nrate = 0.05\n\n[roster]\nseed_demo_data = false\n\n[display]\ngrouping = \"indian\""
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.commission.threshold, 50_000.0);
        assert_eq!(config.commission.rate, 0.05);
        assert_eq!(config.display.grouping, Grouping::Indian);
        assert!(config.initial_roster().is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Path::new("/nonexistent/tally/config.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[commission\nrate = ").unwrap();
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[commission]\nrate = -0.1").unwrap();
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_env_overrides_are_validated() {
        let result = Config::from_vars(|key| {
            (key == "TALLY_COMMISSION_RATE").then(|| "-0.1".to_string())
        });
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = Config::from_vars(|key| {
            (key == "TALLY_COMMISSION_THRESHOLD").then(|| "NaN".to_string())
        });
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_env_overrides_applied() {
        let config = Config::from_vars(|key| match key {
            "TALLY_COMMISSION_RATE" => Some("0.05".to_string()),
            "TALLY_SEED_DEMO_DATA" => Some("false".to_string()),
            "TALLY_CURRENCY_GROUPING" => Some("indian".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.commission.rate, 0.05);
        assert!(!config.roster.seed_demo_data);
        assert_eq!(config.display.grouping, Grouping::Indian);
    }

    #[test]
    fn test_log_lines_go_to_chosen_writer() {
        let captured = Captured::default();
        let writer = {
            let captured = captured.clone();
            move || captured.clone()
        };
        let logging = LoggingConfig {
            level: "info".to_string(),
            format: "json".to_string(),
        };

        tracing::subscriber::with_default(logging.subscriber(writer), || {
            tracing::warn!(target: "tally::terminal", "redrawing");
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("redrawing"));
    }

    #[test]
    fn test_initial_roster_is_seeded() {
        let roster = Config::default().initial_roster();
        assert_eq!(roster.len(), 2);
    }
}
