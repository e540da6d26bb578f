//! Pushing staged prices to the store.

use thiserror::Error;

use wooprice_client::WooError;
use wooprice_core::RowKey;

use super::{Catalog, Session, SessionError};

/// A commit stopped at its first failed update.
///
/// Updates listed in `applied` already took effect on the store and are not
/// rolled back.
#[derive(Debug, Error)]
#[error("failed to update {failed}: {source} ({n} earlier update(s) were applied)", n = .applied.len())]
pub(crate) struct CommitError {
    pub applied: Vec<RowKey>,
    pub failed: RowKey,
    #[source]
    pub source: WooError,
}

/// Outcome of the search re-run after a successful commit.
#[derive(Debug)]
pub(crate) enum Refresh {
    /// No search had been run yet.
    Skipped,
    Done(usize),
    Failed(SessionError),
}

#[derive(Debug)]
pub(crate) struct CommitReport {
    pub applied: Vec<RowKey>,
    pub refresh: Refresh,
}

impl<C: Catalog> Session<C> {
    /// Pushes every staged price for the displayed rows, in display order.
    ///
    /// Only displayed rows are considered: an edit whose row is no longer on
    /// screen is not pushed. A staged price of `0` counts as no edit. After
    /// every update succeeds, the last search is re-run to show the store's
    /// state, which also clears the edit buffer.
    ///
    /// # Errors
    ///
    /// Returns [`CommitError`] at the first failed update; the rows and edit
    /// buffer are left as they were.
    pub(crate) async fn commit(&mut self) -> Result<CommitReport, CommitError> {
        let plan: Vec<(RowKey, i64, i64)> = self
            .rows
            .iter()
            .filter_map(|row| {
                self.edits
                    .get(&row.key)
                    .filter(|price| *price != 0)
                    .map(|price| (row.key, price, row.old_price))
            })
            .collect();

        let mut applied = Vec::with_capacity(plan.len());
        for (key, new_price, old_price) in plan {
            if let Err(source) = self.catalog.push_price(key, new_price, old_price).await {
                tracing::warn!(%key, applied = applied.len(), error = %source, "commit aborted");
                return Err(CommitError {
                    applied,
                    failed: key,
                    source,
                });
            }
            applied.push(key);
        }
        tracing::info!(updated = applied.len(), "commit complete");

        let refresh = match self.last_query.clone() {
            None => Refresh::Skipped,
            Some(query) => match self.search(&query).await {
                Ok(rows) => Refresh::Done(rows.len()),
                Err(e) => Refresh::Failed(e),
            },
        };

        Ok(CommitReport { applied, refresh })
    }
}
