//! PostgreSQL-backed adapter for the row store port.
//!
//! Counting and the corrected-postings read run in read-only repeatable-read
//! transactions so both tables are observed in one snapshot. Eviction is a
//! single `DELETE` so concurrent writers never see a half-evicted store.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel::sql_query;
use diesel::sql_types::BigInt;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt;
use tracing::debug;

use crate::domain::ports::{RowStore, RowStoreError};
use crate::domain::{
    CorrectedPosting, Correction, NewCorrection, NewPosting, Page, Posting, PostingFilter,
    RowCounts,
};

use super::diesel_error_mapping::{map_correction_insert_error, map_diesel_error, map_pool_error};
use super::models::{CorrectionRow, NewCorrectionRow, NewPostingRow, PostingRow};
use super::pool::DbPool;
use super::schema::{corrections, postings};

/// Removes the `$1` oldest postings; the foreign key cascades to corrections.
const EVICT_OLDEST_SQL: &str = r#"
DELETE FROM postings
WHERE id IN (
    SELECT id FROM postings
    ORDER BY date ASC, id ASC
    LIMIT $1
)
"#;

/// Diesel-backed implementation of [`RowStore`].
#[derive(Clone)]
pub struct DieselRowStore {
    pool: DbPool,
}

impl DieselRowStore {
    /// Create a new row store with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_i64(value: usize, what: &str) -> Result<i64, RowStoreError> {
    i64::try_from(value).map_err(|_| RowStoreError::query(format!("{what} out of range: {value}")))
}

#[async_trait]
impl RowStore for DieselRowStore {
    async fn count_rows(&self) -> Result<RowCounts, RowStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (posting_count, correction_count) = conn
            .build_transaction()
            .read_only()
            .repeatable_read()
            .run(|conn| {
                async move {
                    let posting_count: i64 =
                        postings::table.count().get_result(conn).await?;
                    let correction_count: i64 =
                        corrections::table.count().get_result(conn).await?;
                    Ok::<_, DieselError>((posting_count, correction_count))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(RowCounts {
            postings: posting_count,
            corrections: correction_count,
        })
    }

    async fn evict_oldest(&self, count: usize) -> Result<usize, RowStoreError> {
        if count == 0 {
            return Ok(0);
        }
        let limit = to_i64(count, "eviction count")?;

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = sql_query(EVICT_OLDEST_SQL)
            .bind::<BigInt, _>(limit)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        debug!(requested = count, deleted, "evicted oldest postings");
        Ok(deleted)
    }

    async fn insert_postings(&self, new_postings: &[NewPosting]) -> Result<(), RowStoreError> {
        if new_postings.is_empty() {
            return Ok(());
        }
        let rows: Vec<NewPostingRow<'_>> = new_postings.iter().map(NewPostingRow::from).collect();

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(postings::table)
            .values(&rows)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn insert_correction(&self, correction: &NewCorrection) -> Result<(), RowStoreError> {
        let row = NewCorrectionRow::from(correction);

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(corrections::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|err| map_correction_insert_error(err, correction.posting_id))?;
        Ok(())
    }

    async fn list_postings(
        &self,
        filter: &PostingFilter,
        page: Page,
    ) -> Result<Vec<Posting>, RowStoreError> {
        let mut query = postings::table
            .select(PostingRow::as_select())
            .into_boxed();
        if let Some(bike) = &filter.bike {
            query = query.filter(postings::bike.eq(bike.clone()));
        }
        if let Some(frame) = &filter.frame {
            query = query.filter(postings::frame.eq(frame.clone()));
        }
        if let Some(color) = &filter.color {
            query = query.filter(postings::color.eq(color.clone()));
        }

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<PostingRow> = query
            .order((postings::date.desc(), postings::id.desc()))
            .offset(i64::from(page.skip()))
            .limit(i64::from(page.limit()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Posting::from).collect())
    }

    async fn list_corrected_postings(&self) -> Result<Vec<CorrectedPosting>, RowStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (posting_rows, correction_rows) = conn
            .build_transaction()
            .read_only()
            .repeatable_read()
            .run(|conn| {
                async move {
                    let posting_rows: Vec<PostingRow> = postings::table
                        .filter(postings::id.eq_any(corrections::table.select(corrections::posting_id)))
                        .select(PostingRow::as_select())
                        .order((postings::date.desc(), postings::id.desc()))
                        .load(conn)
                        .await?;
                    let correction_rows: Vec<CorrectionRow> =
                        CorrectionRow::belonging_to(&posting_rows)
                            .select(CorrectionRow::as_select())
                            .order(corrections::id.asc())
                            .load(conn)
                            .await?;
                    Ok::<_, DieselError>((posting_rows, correction_rows))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let grouped = correction_rows.grouped_by(&posting_rows);
        Ok(posting_rows
            .into_iter()
            .zip(grouped)
            .map(|(posting, rows)| CorrectedPosting {
                posting: Posting::from(posting),
                corrections: rows.into_iter().map(Correction::from).collect(),
            })
            .collect())
    }
}
