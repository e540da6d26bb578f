//! Write endpoint: regular-price updates.

use reqwest::Method;

use crate::error::WooError;
use crate::types::PriceUpdate;

use super::WooClient;

impl WooClient {
    /// Sets the regular price of a product, or of one of its variations when
    /// `variation_id` is given, and records `old_price` as `old_price` meta.
    ///
    /// Sends `PUT products/{id}` or `PUT products/{id}/variations/{vid}` with
    /// a partial body; other fields are left untouched.
    ///
    /// # Errors
    ///
    /// - [`WooError::Http`] on network failure or timeout.
    /// - [`WooError::UnexpectedStatus`] on a non-2xx response.
    pub async fn update_price(
        &self,
        product_id: u64,
        variation_id: Option<u64>,
        new_price: i64,
        old_price: i64,
    ) -> Result<(), WooError> {
        let path = match variation_id {
            Some(vid) => format!("products/{product_id}/variations/{vid}"),
            None => format!("products/{product_id}"),
        };
        let url = self.endpoint(&path, &[])?;
        let body = PriceUpdate::new(new_price, old_price);

        self.send(Method::PUT, &url, Some(&body)).await?;
        tracing::info!(product_id, ?variation_id, new_price, old_price, "regular price updated");
        Ok(())
    }
}
