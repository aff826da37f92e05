//! Corrections: human overrides of a posting's predicted classification.
//!
//! Corrections are created by submission, never updated, and disappear only
//! when the posting they reference is evicted.

use super::{Classification, Posting, PostingId};

/// A correction that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCorrection {
    /// Posting being corrected; must exist when the correction is inserted.
    pub posting_id: PostingId,
    pub classification: Classification,
}

/// A stored correction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    pub id: i64,
    pub posting_id: PostingId,
    pub classification: Classification,
}

impl Correction {
    /// Attach a store-assigned identifier to a new correction.
    #[must_use]
    pub fn from_new(id: i64, correction: NewCorrection) -> Self {
        Self {
            id,
            posting_id: correction.posting_id,
            classification: correction.classification,
        }
    }
}

/// A posting together with every correction submitted for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectedPosting {
    pub posting: Posting,
    /// Corrections in submission order.
    pub corrections: Vec<Correction>,
}
