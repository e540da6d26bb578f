//! Read-only snapshots of the store's catalog and the rows derived from them.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// Color shown for rows that have no color attribute.
pub const NO_COLOR: &str = "none";

/// Attribute names (compared lower-cased) that carry a variation's color.
const COLOR_ATTRIBUTE_NAMES: [&str; 3] = ["color", "colour", "رنگ"];

/// WooCommerce product type.
///
/// Only `variable` products are expanded into per-variation rows; `grouped`,
/// `external` and any unrecognized type behave like `simple`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    Simple,
    Variable,
    Other(String),
}

impl ProductType {
    #[must_use]
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "simple" | "" => ProductType::Simple,
            "variable" => ProductType::Variable,
            other => ProductType::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn is_variable(&self) -> bool {
        matches!(self, ProductType::Variable)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub product_type: ProductType,
    /// Whole-number price; fractional parts are discarded on read.
    pub price: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: String,
    pub option: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variation {
    pub id: u64,
    pub parent_id: u64,
    /// Whole-number price; fractional parts are discarded on read.
    pub price: i64,
    pub attributes: Vec<Attribute>,
}

impl Variation {
    /// Returns the option of the first color attribute, or [`NO_COLOR`].
    #[must_use]
    pub fn color(&self) -> &str {
        self.attributes
            .iter()
            .find(|a| {
                let name = a.name.trim().to_lowercase();
                COLOR_ATTRIBUTE_NAMES.contains(&name.as_str())
            })
            .map_or(NO_COLOR, |a| a.option.as_str())
    }
}

/// Join key between a displayed row and the edit buffer.
///
/// Renders as `"{product_id}"` for simple rows and
/// `"{product_id}_{variation_id}"` for variation rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowKey {
    pub product_id: u64,
    pub variation_id: Option<u64>,
}

impl RowKey {
    #[must_use]
    pub fn product(product_id: u64) -> Self {
        Self {
            product_id,
            variation_id: None,
        }
    }

    #[must_use]
    pub fn variation(product_id: u64, variation_id: u64) -> Self {
        Self {
            product_id,
            variation_id: Some(variation_id),
        }
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.variation_id {
            Some(vid) => write!(f, "{}_{vid}", self.product_id),
            None => write!(f, "{}", self.product_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRowKeyError(String);

impl fmt::Display for ParseRowKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid row key \"{}\" (expected <product_id> or <product_id>_<variation_id>)",
            self.0
        )
    }
}

impl std::error::Error for ParseRowKeyError {}

impl FromStr for RowKey {
    type Err = ParseRowKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseRowKeyError(s.to_string());
        match s.trim().split_once('_') {
            Some((pid, vid)) => Ok(RowKey::variation(
                pid.parse().map_err(|_| err())?,
                vid.parse().map_err(|_| err())?,
            )),
            None => Ok(RowKey::product(s.trim().parse().map_err(|_| err())?)),
        }
    }
}

impl Serialize for RowKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One display-and-edit unit: a simple product, or one variation of a
/// variable product.
///
/// Rows never hold a pending price; that lives only in the edit buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub key: RowKey,
    pub name: String,
    pub color: String,
    pub old_price: i64,
}

impl Row {
    /// Row for a product that is not expanded into variations.
    #[must_use]
    pub fn for_product(product: &Product) -> Self {
        Self {
            key: RowKey::product(product.id),
            name: product.name.clone(),
            color: NO_COLOR.to_string(),
            old_price: product.price,
        }
    }

    /// Row for one variation of `product`.
    #[must_use]
    pub fn for_variation(product: &Product, variation: &Variation) -> Self {
        Self {
            key: RowKey::variation(product.id, variation.id),
            name: product.name.clone(),
            color: variation.color().to_string(),
            old_price: variation.price,
        }
    }
}
