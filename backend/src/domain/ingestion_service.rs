//! Capacity-aware write path for postings and corrections.
//!
//! Every write first asks the [`EvictionPolicy`] for room, then inserts.
//! The two steps are separate store operations.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{IngestionCommand, RowStore};
use crate::domain::{
    CapacityLedger, Error, EvictionPolicy, NewCorrection, NewPosting, RowLimit,
    map_row_store_error,
};

/// Ingestion service implementing the [`IngestionCommand`] driving port.
pub struct IngestionService<S: ?Sized> {
    store: Arc<S>,
    eviction: EvictionPolicy<S>,
}

impl<S: ?Sized> Clone for IngestionService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            eviction: self.eviction.clone(),
        }
    }
}

impl<S> IngestionService<S>
where
    S: RowStore + ?Sized,
{
    /// Create a service writing to `store` under `row_limit`.
    pub fn new(store: Arc<S>, row_limit: RowLimit) -> Self {
        let eviction = EvictionPolicy::new(CapacityLedger::new(Arc::clone(&store), row_limit));
        Self { store, eviction }
    }
}

#[async_trait]
impl<S> IngestionCommand for IngestionService<S>
where
    S: RowStore + ?Sized,
{
    async fn add_postings(&self, postings: Vec<NewPosting>) -> Result<(), Error> {
        if postings.is_empty() {
            return Ok(());
        }

        self.eviction
            .ensure_capacity(postings.len())
            .await
            .map_err(map_row_store_error)?;
        self.store
            .insert_postings(&postings)
            .await
            .map_err(map_row_store_error)?;

        info!(inserted = postings.len(), "stored postings");
        Ok(())
    }

    async fn add_correction(&self, correction: NewCorrection) -> Result<(), Error> {
        self.eviction
            .ensure_capacity(1)
            .await
            .map_err(map_row_store_error)?;
        self.store
            .insert_correction(&correction)
            .await
            .map_err(map_row_store_error)?;

        info!(posting_id = %correction.posting_id, "stored correction");
        Ok(())
    }
}

#[cfg(test)]
#[path = "ingestion_service_tests.rs"]
mod tests;
