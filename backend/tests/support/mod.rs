//! Shared helper utilities for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`; this
//! module is the shared home for test-only helpers.

#![allow(dead_code, reason = "each suite uses a different subset of helpers")]

pub mod cluster_skip;
pub mod embedded_postgres;

use chrono::{DateTime, TimeZone, Utc};
use find_my_bike::domain::{Classification, NewCorrection, NewPosting, PostingId};

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::provision_database;

/// Render a `postgres` error with the SQLSTATE and server message.
///
/// `postgres::Error`'s `Display` often collapses database errors to
/// `db error`, which hides what went wrong.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

/// Midnight UTC on `2024-01-{day}`.
pub fn day(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0)
        .single()
        .expect("valid fixture date")
}

/// Classification with the given labels.
pub fn classification(bike: &str, frame: &str, color: &str) -> Classification {
    Classification {
        bike: bike.to_owned(),
        frame: frame.to_owned(),
        color: color.to_owned(),
    }
}

/// Posting titled `title` dated `date`, predicted as a red diamond bike.
pub fn posting_on(title: &str, date: DateTime<Utc>) -> NewPosting {
    posting_with(title, date, classification("bike", "diamond", "red"))
}

/// Posting titled `title` dated `date` with the given prediction.
pub fn posting_with(title: &str, date: DateTime<Utc>, prediction: Classification) -> NewPosting {
    NewPosting {
        title: title.to_owned(),
        url: format!("https://example.test/{title}"),
        img_url: format!("https://example.test/{title}.jpg"),
        location: "Berlin".to_owned(),
        query: "fahrrad".to_owned(),
        location_query: "berlin".to_owned(),
        date,
        prediction,
    }
}

/// Ten postings dated 2024-01-01 through 2024-01-10, oldest first.
pub fn ten_daily_postings() -> Vec<NewPosting> {
    (1..=10)
        .map(|n| posting_on(&format!("posting-{n}"), day(n)))
        .collect()
}

/// Correction relabelling `posting_id` as a blue step-through.
pub fn correction_for(posting_id: i64) -> NewCorrection {
    NewCorrection {
        posting_id: PostingId::new(posting_id),
        classification: classification("bike", "step-through", "blue"),
    }
}
