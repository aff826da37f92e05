//! Driving port for posting reads.

use async_trait::async_trait;

use crate::domain::{CorrectedPosting, Error, Page, Posting, PostingFilter};

/// Driving port for filtered posting listings and the correction review list.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingQuery: Send + Sync {
    /// Postings matching `filter`, newest first, windowed by `page`.
    async fn list_postings(&self, filter: PostingFilter, page: Page)
    -> Result<Vec<Posting>, Error>;

    /// Postings that received at least one correction, with those corrections.
    async fn list_corrected_postings(&self) -> Result<Vec<CorrectedPosting>, Error>;
}

/// Fixture query implementation backed by nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureListingQuery;

#[async_trait]
impl ListingQuery for FixtureListingQuery {
    async fn list_postings(
        &self,
        _filter: PostingFilter,
        _page: Page,
    ) -> Result<Vec<Posting>, Error> {
        Ok(Vec::new())
    }

    async fn list_corrected_postings(&self) -> Result<Vec<CorrectedPosting>, Error> {
        Ok(Vec::new())
    }
}
