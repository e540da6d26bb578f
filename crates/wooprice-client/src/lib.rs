pub mod auth;
pub mod client;
pub mod error;
pub mod normalize;
pub mod pagination;
pub mod types;

pub use auth::Credentials;
pub use client::WooClient;
pub use error::WooError;
pub use normalize::{normalize_product, normalize_variation};
pub use types::{MetaData, PriceUpdate, WooAttribute, WooProduct, WooVariation};
