//! Driving port for capacity-aware writes.

use async_trait::async_trait;

use crate::domain::{Error, NewCorrection, NewPosting};

/// Driving port for inserting postings and corrections within the row budget.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IngestionCommand: Send + Sync {
    /// Free room for `postings.len()` rows, then insert them in one batch.
    ///
    /// An empty batch returns immediately without touching the store.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use find_my_bike::domain::ports::{FixtureIngestionCommand, IngestionCommand};
    /// # async fn example() -> Result<(), find_my_bike::domain::Error> {
    /// let command = FixtureIngestionCommand;
    /// command.add_postings(Vec::new()).await?;
    /// # Ok(())
    /// # }
    /// ```
    async fn add_postings(&self, postings: Vec<NewPosting>) -> Result<(), Error>;

    /// Free room for one row, then insert the correction.
    ///
    /// Room is freed before the reference is checked, so a correction whose
    /// posting was just evicted fails with
    /// [`ErrorCode::ReferenceNotFound`](crate::domain::ErrorCode::ReferenceNotFound).
    async fn add_correction(&self, correction: NewCorrection) -> Result<(), Error>;
}

/// Fixture command implementation that accepts and discards every write.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIngestionCommand;

#[async_trait]
impl IngestionCommand for FixtureIngestionCommand {
    async fn add_postings(&self, _postings: Vec<NewPosting>) -> Result<(), Error> {
        Ok(())
    }

    async fn add_correction(&self, _correction: NewCorrection) -> Result<(), Error> {
        Ok(())
    }
}
