//! Domain primitives and services.
//!
//! Purpose: model postings, corrections and the row budget, and implement the
//! capacity-aware write path and the read path against the ports in
//! [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Posting, NewPosting, Correction, NewCorrection, CorrectedPosting: records.
//! - RowLimit, RowCounts, RESERVED_ROWS: the row budget.
//! - CapacityLedger, EvictionPolicy: free-row accounting and eviction.
//! - IngestionService, ListingService: driving port implementations.

pub mod capacity;
mod capacity_service;
pub mod correction;
pub mod error;
mod ingestion_service;
mod listing_service;
pub mod ports;
pub mod posting;
pub mod trace_id;

pub(crate) use self::capacity_service::map_row_store_error;
pub use self::capacity::{RESERVED_ROWS, RowCounts, RowLimit, RowLimitError};
pub use self::capacity_service::{CapacityLedger, EvictionPolicy};
pub use self::correction::{CorrectedPosting, Correction, NewCorrection};
pub use self::error::{Error, ErrorCode};
pub use self::ingestion_service::IngestionService;
pub use self::listing_service::ListingService;
pub use self::posting::{Classification, NewPosting, Page, Posting, PostingFilter, PostingId};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
