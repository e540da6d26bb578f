//! Conversion from WooCommerce wire types to [`wooprice_core`] catalog types.
//!
//! Prices are reduced to whole currency units here, so nothing downstream
//! ever sees a fractional price.

use wooprice_core::{normalize_price, Attribute, Product, ProductType, Variation};

use crate::error::WooError;
use crate::types::{WooProduct, WooVariation};

/// Normalizes a raw [`WooProduct`] into a [`Product`].
///
/// # Errors
///
/// Returns [`WooError::InvalidPrice`] if the product's price is not numeric.
pub fn normalize_product(product: WooProduct) -> Result<Product, WooError> {
    let price = normalize_price(&product.price).map_err(|source| WooError::InvalidPrice {
        context: format!("product {}", product.id),
        source,
    })?;

    Ok(Product {
        id: product.id,
        name: product.name,
        product_type: ProductType::from_wire(&product.product_type),
        price,
    })
}

/// Normalizes a raw [`WooVariation`] of product `parent_id` into a [`Variation`].
///
/// # Errors
///
/// Returns [`WooError::InvalidPrice`] if the variation's price is not numeric.
pub fn normalize_variation(parent_id: u64, variation: WooVariation) -> Result<Variation, WooError> {
    let price = normalize_price(&variation.price).map_err(|source| WooError::InvalidPrice {
        context: format!("variation {} of product {parent_id}", variation.id),
        source,
    })?;

    Ok(Variation {
        id: variation.id,
        parent_id,
        price,
        attributes: variation
            .attributes
            .into_iter()
            .map(|a| Attribute {
                name: a.name,
                option: a.option,
            })
            .collect(),
    })
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
