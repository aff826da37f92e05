//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. The classification columns are flat here
//! and regrouped into [`Classification`] on the way out.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{Classification, Correction, NewCorrection, NewPosting, Posting, PostingId};

use super::schema::{corrections, postings};

/// Row struct for reading from the postings table.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = postings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PostingRow {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub img_url: String,
    pub location: String,
    pub query: String,
    pub location_query: String,
    pub date: DateTime<Utc>,
    pub bike: String,
    pub frame: String,
    pub color: String,
}

impl From<PostingRow> for Posting {
    fn from(row: PostingRow) -> Self {
        Self {
            id: PostingId::new(row.id),
            title: row.title,
            url: row.url,
            img_url: row.img_url,
            location: row.location,
            query: row.query,
            location_query: row.location_query,
            date: row.date,
            prediction: Classification {
                bike: row.bike,
                frame: row.frame,
                color: row.color,
            },
        }
    }
}

/// Insertable struct for new postings.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = postings)]
pub(crate) struct NewPostingRow<'a> {
    pub title: &'a str,
    pub url: &'a str,
    pub img_url: &'a str,
    pub location: &'a str,
    pub query: &'a str,
    pub location_query: &'a str,
    pub date: DateTime<Utc>,
    pub bike: &'a str,
    pub frame: &'a str,
    pub color: &'a str,
}

impl<'a> From<&'a NewPosting> for NewPostingRow<'a> {
    fn from(posting: &'a NewPosting) -> Self {
        Self {
            title: &posting.title,
            url: &posting.url,
            img_url: &posting.img_url,
            location: &posting.location,
            query: &posting.query,
            location_query: &posting.location_query,
            date: posting.date,
            bike: &posting.prediction.bike,
            frame: &posting.prediction.frame,
            color: &posting.prediction.color,
        }
    }
}

/// Row struct for reading from the corrections table.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = corrections)]
#[diesel(belongs_to(PostingRow, foreign_key = posting_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CorrectionRow {
    pub id: i64,
    pub posting_id: i64,
    pub bike: String,
    pub frame: String,
    pub color: String,
}

impl From<CorrectionRow> for Correction {
    fn from(row: CorrectionRow) -> Self {
        Self {
            id: row.id,
            posting_id: PostingId::new(row.posting_id),
            classification: Classification {
                bike: row.bike,
                frame: row.frame,
                color: row.color,
            },
        }
    }
}

/// Insertable struct for new corrections.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = corrections)]
pub(crate) struct NewCorrectionRow<'a> {
    pub posting_id: i64,
    pub bike: &'a str,
    pub frame: &'a str,
    pub color: &'a str,
}

impl<'a> From<&'a NewCorrection> for NewCorrectionRow<'a> {
    fn from(correction: &'a NewCorrection) -> Self {
        Self {
            posting_id: correction.posting_id.as_i64(),
            bike: &correction.classification.bike,
            frame: &correction.classification.frame,
            color: &correction.classification.color,
        }
    }
}
