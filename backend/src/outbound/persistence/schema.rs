//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` when a migration changes the tables.

diesel::table! {
    /// Classified-ad postings with their predicted classification.
    postings (id) {
        /// Primary key: `BIGSERIAL`, never reused.
        id -> Int8,
        title -> Varchar,
        url -> Varchar,
        img_url -> Varchar,
        location -> Varchar,
        /// Search query that produced the posting.
        query -> Varchar,
        /// Location filter of that search.
        location_query -> Varchar,
        /// Listing timestamp; eviction removes the smallest first.
        date -> Timestamptz,
        bike -> Varchar,
        frame -> Varchar,
        color -> Varchar,
    }
}

diesel::table! {
    /// Human corrections of a posting's classification.
    ///
    /// `posting_id` references `postings.id` with `ON DELETE CASCADE`.
    corrections (id) {
        id -> Int8,
        posting_id -> Int8,
        bike -> Varchar,
        frame -> Varchar,
        color -> Varchar,
    }
}

diesel::joinable!(corrections -> postings (posting_id));
diesel::allow_tables_to_appear_in_same_query!(postings, corrections);
