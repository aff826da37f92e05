//! Test utilities for the crate.
//!
//! Compiled for unit tests and, through the `test-support` feature, for the
//! integration suites in `tests/`.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{RowStore, RowStoreError};
use crate::domain::{
    CorrectedPosting, Correction, NewCorrection, NewPosting, Page, Posting, PostingFilter,
    PostingId, RowCounts,
};

#[derive(Debug)]
struct Tables {
    postings: Vec<Posting>,
    corrections: Vec<Correction>,
    next_posting_id: i64,
    next_correction_id: i64,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            postings: Vec::new(),
            corrections: Vec::new(),
            next_posting_id: 1,
            next_correction_id: 1,
        }
    }
}

/// [`RowStore`] held in process memory.
///
/// Mirrors the PostgreSQL adapter's observable behaviour: sequential ids that
/// are never reused, eviction by `(date, id)`, the correction cascade, and the
/// foreign-key check on corrections.
///
/// # Examples
/// ```
/// use find_my_bike::domain::ports::RowStore;
/// use find_my_bike::test_support::InMemoryRowStore;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let store = InMemoryRowStore::new();
/// let counts = store.count_rows().await.expect("count rows");
/// assert_eq!(counts.postings, 0);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryRowStore {
    tables: Mutex<Tables>,
}

impl InMemoryRowStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of stored postings in insertion order.
    #[must_use]
    pub fn postings(&self) -> Vec<Posting> {
        self.tables().postings.clone()
    }

    /// Snapshot of stored corrections in insertion order.
    #[must_use]
    pub fn corrections(&self) -> Vec<Correction> {
        self.tables().corrections.clone()
    }

    /// Identifiers of stored postings in insertion order.
    #[must_use]
    pub fn posting_ids(&self) -> Vec<i64> {
        self.tables()
            .postings
            .iter()
            .map(|posting| posting.id.as_i64())
            .collect()
    }
}

#[async_trait]
impl RowStore for InMemoryRowStore {
    async fn count_rows(&self) -> Result<RowCounts, RowStoreError> {
        let tables = self.tables();
        let postings = i64::try_from(tables.postings.len())
            .map_err(|err| RowStoreError::query(err.to_string()))?;
        let corrections = i64::try_from(tables.corrections.len())
            .map_err(|err| RowStoreError::query(err.to_string()))?;
        Ok(RowCounts {
            postings,
            corrections,
        })
    }

    async fn evict_oldest(&self, count: usize) -> Result<usize, RowStoreError> {
        let mut tables = self.tables();
        let mut keys: Vec<_> = tables.postings.iter().map(Posting::eviction_key).collect();
        keys.sort_unstable();
        let doomed: Vec<PostingId> = keys.into_iter().take(count).map(|(_, id)| id).collect();

        tables.postings.retain(|posting| !doomed.contains(&posting.id));
        tables
            .corrections
            .retain(|correction| !doomed.contains(&correction.posting_id));
        Ok(doomed.len())
    }

    async fn insert_postings(&self, postings: &[NewPosting]) -> Result<(), RowStoreError> {
        let mut tables = self.tables();
        for posting in postings {
            let id = PostingId::new(tables.next_posting_id);
            tables.next_posting_id += 1;
            tables.postings.push(Posting::from_new(id, posting.clone()));
        }
        Ok(())
    }

    async fn insert_correction(&self, correction: &NewCorrection) -> Result<(), RowStoreError> {
        let mut tables = self.tables();
        let exists = tables
            .postings
            .iter()
            .any(|posting| posting.id == correction.posting_id);
        if !exists {
            return Err(RowStoreError::missing_posting(correction.posting_id));
        }

        let id = tables.next_correction_id;
        tables.next_correction_id += 1;
        tables
            .corrections
            .push(Correction::from_new(id, correction.clone()));
        Ok(())
    }

    async fn list_postings(
        &self,
        filter: &PostingFilter,
        page: Page,
    ) -> Result<Vec<Posting>, RowStoreError> {
        let tables = self.tables();
        let mut matching: Vec<Posting> = tables
            .postings
            .iter()
            .filter(|posting| filter.matches(&posting.prediction))
            .cloned()
            .collect();
        matching.sort_by_key(|posting| std::cmp::Reverse(posting.eviction_key()));

        Ok(matching
            .into_iter()
            .skip(page.skip() as usize)
            .take(page.limit() as usize)
            .collect())
    }

    async fn list_corrected_postings(&self) -> Result<Vec<CorrectedPosting>, RowStoreError> {
        let tables = self.tables();
        let mut corrected: Vec<CorrectedPosting> = tables
            .postings
            .iter()
            .filter_map(|posting| {
                let mut corrections: Vec<Correction> = tables
                    .corrections
                    .iter()
                    .filter(|correction| correction.posting_id == posting.id)
                    .cloned()
                    .collect();
                if corrections.is_empty() {
                    return None;
                }
                corrections.sort_by_key(|correction| correction.id);
                Some(CorrectedPosting {
                    posting: posting.clone(),
                    corrections,
                })
            })
            .collect();
        corrected.sort_by_key(|entry| std::cmp::Reverse(entry.posting.eviction_key()));
        Ok(corrected)
    }
}
