//! Reconciliation between the store's catalog, the operator's staged edits
//! and the update calls that push them.
//!
//! A [`Session`] is the only holder of mutable state: the edit buffer, the
//! rows currently on screen and the last submitted query. Every operation
//! runs its network calls one after another and finishes before the next
//! command is read, so no two calls for the same operation are ever in
//! flight together.

mod commit;
mod remote;

#[cfg(test)]
pub(crate) mod fake;

use serde::Serialize;
use thiserror::Error;

use wooprice_client::WooError;
use wooprice_core::{EditBuffer, Product, Row, RowKey, ValidationError, Variation};

pub(crate) use commit::{CommitReport, Refresh};

/// The remote catalog operations the session needs.
///
/// Implemented by [`wooprice_client::WooClient`] and by in-memory fakes in
/// tests.
pub(crate) trait Catalog {
    async fn search_products(&self, query: &str, per_page: u32)
        -> Result<Vec<Product>, WooError>;

    async fn list_variations(&self, product_id: u64) -> Result<Vec<Variation>, WooError>;

    async fn push_price(&self, key: RowKey, new_price: i64, old_price: i64)
        -> Result<(), WooError>;
}

#[derive(Debug, Error)]
pub(crate) enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to fetch products: {0}")]
    Search(#[source] WooError),

    #[error("row {0} is not in the current result set")]
    UnknownRow(RowKey),
}

/// A row as shown to the operator: the catalog snapshot plus whatever the
/// edit buffer holds for its key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct DisplayRow {
    #[serde(flatten)]
    pub row: Row,
    pub new_price: Option<i64>,
}

pub(crate) struct Session<C> {
    catalog: C,
    page_size: u32,
    /// Cleared at the start of every search.
    edits: EditBuffer,
    rows: Vec<Row>,
    last_query: Option<String>,
}

impl<C: Catalog> Session<C> {
    pub(crate) fn new(catalog: C, page_size: u32) -> Self {
        Self {
            catalog,
            page_size,
            edits: EditBuffer::new(),
            rows: Vec::new(),
            last_query: None,
        }
    }

    /// Runs a fresh search and replaces the displayed rows.
    ///
    /// Staged edits and the previous rows are dropped before anything is
    /// fetched. Products whose name does not contain `query`
    /// (case-insensitively) are discarded even if the store returned them.
    /// Variable products are expanded into one row per variation; if listing
    /// any product's variations fails, the whole search fails and no rows are
    /// shown.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Validation`] for a blank query; state is untouched.
    /// - [`SessionError::Search`] if any remote call fails.
    pub(crate) async fn search(&mut self, query: &str) -> Result<Vec<DisplayRow>, SessionError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ValidationError::EmptyQuery.into());
        }

        self.edits.clear();
        self.rows.clear();
        self.last_query = Some(query.to_owned());

        let products = self
            .catalog
            .search_products(query, self.page_size)
            .await
            .map_err(SessionError::Search)?;
        let returned = products.len();

        let rows = flatten(&self.catalog, query, &products)
            .await
            .map_err(SessionError::Search)?;

        tracing::info!(query, returned, rows = rows.len(), "search complete");
        self.rows = rows;
        Ok(self.rows())
    }

    /// Stages `price` for the displayed row `key`, replacing any earlier edit.
    ///
    /// # Errors
    ///
    /// - [`SessionError::UnknownRow`] if `key` is not currently displayed.
    /// - [`SessionError::Validation`] if `price` is negative.
    pub(crate) fn stage_edit(&mut self, key: RowKey, price: i64) -> Result<DisplayRow, SessionError> {
        if price < 0 {
            return Err(ValidationError::Negative(price.to_string()).into());
        }
        let row = self
            .rows
            .iter()
            .find(|r| r.key == key)
            .ok_or(SessionError::UnknownRow(key))?;

        self.edits.set(key, price);
        tracing::debug!(%key, price, "edit staged");
        Ok(DisplayRow {
            row: row.clone(),
            new_price: Some(price),
        })
    }

    /// Displayed rows merged with the edit buffer, in display order.
    pub(crate) fn rows(&self) -> Vec<DisplayRow> {
        self.rows
            .iter()
            .map(|row| DisplayRow {
                row: row.clone(),
                new_price: self.edits.get(&row.key),
            })
            .collect()
    }

    /// Key of the 1-based row `number` as shown on screen.
    pub(crate) fn key_at(&self, number: usize) -> Option<RowKey> {
        number
            .checked_sub(1)
            .and_then(|i| self.rows.get(i))
            .map(|r| r.key)
    }

    /// The displayed row for `key`, if any.
    pub(crate) fn row(&self, key: RowKey) -> Option<DisplayRow> {
        self.rows.iter().find(|r| r.key == key).map(|row| DisplayRow {
            row: row.clone(),
            new_price: self.edits.get(&row.key),
        })
    }

    /// Number of displayed rows that a commit would push.
    pub(crate) fn pending(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| self.edits.get(&r.key).is_some_and(|p| p != 0))
            .count()
    }

    pub(crate) fn last_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }

    #[cfg(test)]
    pub(crate) fn edits(&self) -> &EditBuffer {
        &self.edits
    }

    #[cfg(test)]
    pub(crate) fn catalog(&self) -> &C {
        &self.catalog
    }
}

/// Applies the name filter and expands variable products into rows.
///
/// Variation lookups run sequentially, in result order; the first failure
/// aborts with no rows.
async fn flatten<C: Catalog>(
    catalog: &C,
    query: &str,
    products: &[Product],
) -> Result<Vec<Row>, WooError> {
    let needle = query.to_lowercase();
    let mut rows = Vec::new();

    for product in products {
        if !product.name.to_lowercase().contains(&needle) {
            tracing::debug!(product_id = product.id, name = %product.name, "skipping loose match");
            continue;
        }

        if product.product_type.is_variable() {
            let variations = catalog.list_variations(product.id).await?;
            rows.extend(variations.iter().map(|v| Row::for_variation(product, v)));
        } else {
            rows.push(Row::for_product(product));
        }
    }

    Ok(rows)
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
