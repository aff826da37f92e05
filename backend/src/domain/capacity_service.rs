//! Capacity ledger and eviction policy over a [`RowStore`].
//!
//! Nothing is cached: every decision re-reads the counts. Concurrent callers
//! are not serialised against each other, so two writers may both see enough
//! room and together overshoot the limit until the next write evicts again.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::ports::{RowStore, RowStoreError};
use crate::domain::{Error, RowLimit};

/// Translate row store failures into domain errors.
pub(crate) fn map_row_store_error(error: RowStoreError) -> Error {
    match error {
        RowStoreError::Connection { message } => {
            Error::service_unavailable(format!("row store unavailable: {message}"))
        }
        RowStoreError::Query { message } => Error::internal(format!("row store error: {message}")),
        RowStoreError::MissingPosting { posting_id } => {
            Error::reference_not_found(format!("Posting with ID {posting_id} not found"))
        }
    }
}

/// Computes how many rows may still be added under the configured limit.
pub struct CapacityLedger<S: ?Sized> {
    store: Arc<S>,
    row_limit: RowLimit,
}

impl<S: ?Sized> Clone for CapacityLedger<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            row_limit: self.row_limit,
        }
    }
}

impl<S> CapacityLedger<S>
where
    S: RowStore + ?Sized,
{
    /// Create a ledger reading counts from `store`.
    pub fn new(store: Arc<S>, row_limit: RowLimit) -> Self {
        Self { store, row_limit }
    }

    /// Configured row limit.
    pub fn row_limit(&self) -> RowLimit {
        self.row_limit
    }

    /// `row_limit - (postings + corrections + RESERVED_ROWS)`.
    ///
    /// Negative when the store is already over budget.
    ///
    /// # Errors
    /// Propagates the store failure when the counts cannot be read.
    pub async fn free_rows(&self) -> Result<i64, RowStoreError> {
        let counts = self.store.count_rows().await?;
        Ok(counts.free_under(self.row_limit))
    }
}

/// Evicts the oldest postings until a write of a given size fits.
pub struct EvictionPolicy<S: ?Sized> {
    ledger: CapacityLedger<S>,
}

impl<S: ?Sized> Clone for EvictionPolicy<S> {
    fn clone(&self) -> Self {
        Self {
            ledger: self.ledger.clone(),
        }
    }
}

impl<S> EvictionPolicy<S>
where
    S: RowStore + ?Sized,
{
    /// Create a policy evicting through the ledger's store.
    pub fn new(ledger: CapacityLedger<S>) -> Self {
        Self { ledger }
    }

    /// Ledger used to measure free rows.
    pub fn ledger(&self) -> &CapacityLedger<S> {
        &self.ledger
    }

    /// Make room for `rows_to_add` rows.
    ///
    /// Deletes the `rows_to_add - free_rows` oldest postings when that
    /// difference is positive; their corrections go with them through the
    /// store's cascade. Running out of postings before the deficit is covered
    /// is logged and tolerated.
    ///
    /// # Errors
    /// Propagates store failures from counting or deleting.
    pub async fn ensure_capacity(&self, rows_to_add: usize) -> Result<(), RowStoreError> {
        let requested = i64::try_from(rows_to_add).unwrap_or(i64::MAX);
        let free_rows = self.ledger.free_rows().await?;
        let deficit = requested.saturating_sub(free_rows);
        if deficit <= 0 {
            debug!(rows_to_add, free_rows, "row budget has room");
            return Ok(());
        }

        let to_evict = usize::try_from(deficit).unwrap_or(usize::MAX);
        let evicted = self.ledger.store.evict_oldest(to_evict).await?;
        if evicted < to_evict {
            warn!(
                deficit,
                evicted,
                row_limit = self.ledger.row_limit.get(),
                "ran out of postings to evict; row budget remains exceeded"
            );
        } else {
            info!(evicted, deficit, "evicted postings to free row capacity");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "capacity_service_tests.rs"]
mod tests;
