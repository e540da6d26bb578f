use wooprice_client::{WooClient, WooError};
use wooprice_core::{Product, RowKey, Variation};

use super::Catalog;

impl Catalog for WooClient {
    async fn search_products(
        &self,
        query: &str,
        per_page: u32,
    ) -> Result<Vec<Product>, WooError> {
        WooClient::search_products(self, query, per_page).await
    }

    async fn list_variations(&self, product_id: u64) -> Result<Vec<Variation>, WooError> {
        WooClient::list_variations(self, product_id).await
    }

    async fn push_price(
        &self,
        key: RowKey,
        new_price: i64,
        old_price: i64,
    ) -> Result<(), WooError> {
        self.update_price(key.product_id, key.variation_id, new_price, old_price)
            .await
    }
}

#[cfg(test)]
#[path = "remote_test.rs"]
mod tests;
