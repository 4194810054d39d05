use std::env;
use std::path::PathBuf;

use crate::storage::repositories::FileCartRepository;

pub const DEFAULT_CART_FILE: &str = "shopping_cart.json";
const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

#[derive(Debug, Clone)]
pub struct Config {
    pub cart_file: PathBuf,
    pub log_level: String,
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cart_file: PathBuf::from(DEFAULT_CART_FILE),
            log_level: "warn".to_string(),
            environment: "development".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        let defaults = Config::default();
        let config = Config {
            cart_file: env::var("CART_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.cart_file),
            log_level: env::var("LOG_LEVEL")
                .map(|level| level.to_lowercase())
                .unwrap_or(defaults.log_level),
            environment: env::var("APP_ENV").unwrap_or(defaults.environment),
        };

        config.validate()?;
        Ok(config)
    }

    /// `--file` on the command line wins over `CART_FILE`.
    pub fn with_cart_file(mut self, cart_file: Option<PathBuf>) -> Self {
        if let Some(path) = cart_file {
            self.cart_file = path;
        }
        self
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.cart_file.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("CART_FILE must not be empty"));
        }

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(anyhow::anyhow!(
                "LOG_LEVEL must be one of {}, got '{}'",
                LOG_LEVELS.join(", "),
                self.log_level
            ));
        }

        Ok(())
    }

    pub fn cart_repository(&self) -> FileCartRepository {
        FileCartRepository::new(&self.cart_file)
    }
}
