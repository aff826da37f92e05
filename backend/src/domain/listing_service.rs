//! Read path for postings and corrected postings.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{ListingQuery, RowStore};
use crate::domain::{CorrectedPosting, Error, Page, Posting, PostingFilter, map_row_store_error};

/// Listing service implementing the [`ListingQuery`] driving port.
pub struct ListingService<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> ListingService<S> {
    /// Create a service reading from `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S> ListingQuery for ListingService<S>
where
    S: RowStore + ?Sized,
{
    async fn list_postings(
        &self,
        filter: PostingFilter,
        page: Page,
    ) -> Result<Vec<Posting>, Error> {
        self.store
            .list_postings(&filter, page)
            .await
            .map_err(map_row_store_error)
    }

    async fn list_corrected_postings(&self) -> Result<Vec<CorrectedPosting>, Error> {
        self.store
            .list_corrected_postings()
            .await
            .map_err(map_row_store_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockRowStore, RowStoreError};

    #[rstest]
    #[tokio::test]
    async fn forwards_filter_and_page() {
        let mut store = MockRowStore::new();
        store
            .expect_list_postings()
            .withf(|filter, page| {
                filter.bike.as_deref() == Some("bike") && *page == Page::new(Some(5), Some(2))
            })
            .times(1)
            .return_once(|_, _| Ok(Vec::new()));

        let service = ListingService::new(Arc::new(store));
        let filter = PostingFilter {
            bike: Some("bike".to_owned()),
            ..PostingFilter::default()
        };
        let postings = service
            .list_postings(filter, Page::new(Some(5), Some(2)))
            .await
            .expect("listing succeeds");

        assert!(postings.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn maps_store_failures() {
        let mut store = MockRowStore::new();
        store
            .expect_list_corrected_postings()
            .times(1)
            .return_once(|| Err(RowStoreError::connection("refused")));

        let service = ListingService::new(Arc::new(store));
        let error = service
            .list_corrected_postings()
            .await
            .expect_err("store failure surfaces");

        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}
