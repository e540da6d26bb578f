pub mod app_config;
pub mod catalog;
pub mod config;
pub mod edit_buffer;
pub mod price;

pub use app_config::{AppConfig, AuthMode};
pub use catalog::{Attribute, Product, ProductType, Row, RowKey, Variation, NO_COLOR};
pub use config::{load_app_config, load_app_config_from_env};
pub use edit_buffer::EditBuffer;
pub use price::{normalize_price, parse_price_input, PriceError, ValidationError};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
