//! Port for the relational row store holding postings and corrections.
//!
//! Adapters own durability, id assignment and the foreign-key cascade from
//! corrections to postings. Each method is atomic on its own; callers never
//! get a transaction spanning several calls.

use async_trait::async_trait;

use crate::domain::{
    CorrectedPosting, NewCorrection, NewPosting, Page, Posting, PostingFilter, PostingId,
    RowCounts,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by row store adapters.
    pub enum RowStoreError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "row store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "row store query failed: {message}",
        /// A correction referenced a posting that is not stored.
        MissingPosting { posting_id: PostingId } =>
            "posting {posting_id} does not exist",
    }
}

/// Port for counting, evicting, inserting and reading rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RowStore: Send + Sync {
    /// Count postings and corrections in one consistent snapshot.
    async fn count_rows(&self) -> Result<RowCounts, RowStoreError>;

    /// Delete up to `count` postings with the smallest `(date, id)` in a
    /// single statement, cascading to their corrections.
    ///
    /// Returns how many postings were deleted, which is less than `count`
    /// when the store holds fewer postings.
    async fn evict_oldest(&self, count: usize) -> Result<usize, RowStoreError>;

    /// Insert every posting in one statement, or none of them.
    async fn insert_postings(&self, postings: &[NewPosting]) -> Result<(), RowStoreError>;

    /// Insert one correction.
    ///
    /// Fails with [`RowStoreError::MissingPosting`] when the referenced
    /// posting does not exist.
    async fn insert_correction(&self, correction: &NewCorrection) -> Result<(), RowStoreError>;

    /// Postings matching `filter`, newest first (`date` then `id`
    /// descending), windowed by `page`.
    async fn list_postings(
        &self,
        filter: &PostingFilter,
        page: Page,
    ) -> Result<Vec<Posting>, RowStoreError>;

    /// Postings with at least one correction, newest first, each with its
    /// corrections ordered by id.
    async fn list_corrected_postings(&self) -> Result<Vec<CorrectedPosting>, RowStoreError>;
}

/// Fixture implementation for tests that do not exercise persistence.
///
/// Behaves like an empty store that silently discards writes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRowStore;

#[async_trait]
impl RowStore for FixtureRowStore {
    async fn count_rows(&self) -> Result<RowCounts, RowStoreError> {
        Ok(RowCounts::default())
    }

    async fn evict_oldest(&self, _count: usize) -> Result<usize, RowStoreError> {
        Ok(0)
    }

    async fn insert_postings(&self, _postings: &[NewPosting]) -> Result<(), RowStoreError> {
        Ok(())
    }

    async fn insert_correction(&self, _correction: &NewCorrection) -> Result<(), RowStoreError> {
        Ok(())
    }

    async fn list_postings(
        &self,
        _filter: &PostingFilter,
        _page: Page,
    ) -> Result<Vec<Posting>, RowStoreError> {
        Ok(Vec::new())
    }

    async fn list_corrected_postings(&self) -> Result<Vec<CorrectedPosting>, RowStoreError> {
        Ok(Vec::new())
    }
}
