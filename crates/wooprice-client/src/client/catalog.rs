//! Read endpoints: product search and variation listing.

use reqwest::Method;

use wooprice_core::{Product, Variation};

use crate::error::WooError;
use crate::normalize::{normalize_product, normalize_variation};
use crate::pagination::{has_next_page, total_pages};
use crate::types::{WooProduct, WooVariation};

use super::WooClient;

/// Largest page the REST API serves; used for variation listing.
const VARIATIONS_PER_PAGE: u32 = 100;

/// Guard against a store that reports an ever-growing page count.
const MAX_VARIATION_PAGES: u32 = 50;

impl WooClient {
    /// Runs the store's product search (`GET products?search=&per_page=`).
    ///
    /// The store matches loosely (SKU, description, ...); callers that need
    /// name matches must filter the result themselves.
    ///
    /// # Errors
    ///
    /// - [`WooError::Http`] on network failure or timeout.
    /// - [`WooError::UnexpectedStatus`] on a non-2xx response.
    /// - [`WooError::Deserialize`] if the body is not a product list.
    /// - [`WooError::InvalidPrice`] if a product's price is not numeric.
    pub async fn search_products(
        &self,
        query: &str,
        per_page: u32,
    ) -> Result<Vec<Product>, WooError> {
        let url = self.endpoint(
            "products",
            &[("search", query.to_owned()), ("per_page", per_page.to_string())],
        )?;
        let response = self.send(Method::GET, &url, None).await?;
        let raw: Vec<WooProduct> =
            Self::read_json(response, || format!("product search \"{query}\"")).await?;

        tracing::debug!(query, returned = raw.len(), "product search complete");
        raw.into_iter().map(normalize_product).collect()
    }

    /// Lists every variation of a variable product
    /// (`GET products/{id}/variations`), following `X-WP-TotalPages`.
    ///
    /// All-or-nothing: a failure on any page discards the pages already read.
    ///
    /// # Errors
    ///
    /// Same as [`Self::search_products`], plus [`WooError::PaginationLimit`]
    /// if the store reports more than `MAX_VARIATION_PAGES` pages.
    pub async fn list_variations(&self, product_id: u64) -> Result<Vec<Variation>, WooError> {
        let path = format!("products/{product_id}/variations");
        let mut variations = Vec::new();
        let mut page = 1u32;

        loop {
            let url = self.endpoint(
                &path,
                &[
                    ("per_page", VARIATIONS_PER_PAGE.to_string()),
                    ("page", page.to_string()),
                ],
            )?;
            let response = self.send(Method::GET, &url, None).await?;
            let total = total_pages(response.headers());
            let raw: Vec<WooVariation> = Self::read_json(response, || {
                format!("variations of product {product_id} (page {page})")
            })
            .await?;

            for variation in raw {
                variations.push(normalize_variation(product_id, variation)?);
            }

            if !has_next_page(page, total) {
                break;
            }
            page += 1;
            if page > MAX_VARIATION_PAGES {
                return Err(WooError::PaginationLimit {
                    url: url.to_string(),
                    max_pages: MAX_VARIATION_PAGES,
                });
            }
        }

        tracing::debug!(product_id, count = variations.len(), "variations listed");
        Ok(variations)
    }
}
