//! WooCommerce REST v3 request and response shapes.
//!
//! ## Observed shape
//!
//! ### Prices
//! `price` and `regular_price` are decimal **strings** (`"199.00"`), and an
//! empty string `""` when the item has no price. Variable products usually
//! carry `""` on the parent. A few pricing plugins emit bare JSON numbers or
//! `null`, so the deserializer accepts all three.
//!
//! ### `type`
//! One of `simple`, `variable`, `grouped`, `external`. Missing on some
//! trimmed responses; treated as `simple`.
//!
//! ### Variation attributes
//! `[{ "id": 1, "name": "Color", "option": "Red" }]`. `name` keeps the
//! store's capitalization and language.

use serde::{Deserialize, Deserializer, Serialize};

/// A product from `GET products`.
#[derive(Debug, Deserialize)]
pub struct WooProduct {
    pub id: u64,

    #[serde(default)]
    pub name: String,

    #[serde(rename = "type", default)]
    pub product_type: String,

    #[serde(default, deserialize_with = "price_string")]
    pub price: String,
}

/// A variation from `GET products/{id}/variations`.
#[derive(Debug, Deserialize)]
pub struct WooVariation {
    pub id: u64,

    #[serde(default, deserialize_with = "price_string")]
    pub price: String,

    #[serde(default)]
    pub attributes: Vec<WooAttribute>,
}

#[derive(Debug, Deserialize)]
pub struct WooAttribute {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub option: String,
}

/// Error envelope the REST API returns with non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct WooErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of the partial update sent by `PUT products/{id}` and
/// `PUT products/{id}/variations/{vid}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceUpdate {
    pub regular_price: String,
    pub meta_data: Vec<MetaData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaData {
    pub key: String,
    pub value: String,
}

impl PriceUpdate {
    /// Sets the regular price and records the previous price under the
    /// `old_price` meta key.
    #[must_use]
    pub fn new(new_price: i64, old_price: i64) -> Self {
        Self {
            regular_price: new_price.to_string(),
            meta_data: vec![MetaData {
                key: "old_price".to_string(),
                value: old_price.to_string(),
            }],
        }
    }
}

fn price_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(s)) => s,
        Some(Raw::Number(n)) => n.to_string(),
        None => String::new(),
    })
}
