//! Postings: classified-ad records carrying a predicted bike classification.

use chrono::{DateTime, Utc};

/// Store-assigned posting identifier.
///
/// Identifiers increase monotonically and are never reused, so they double as
/// the tie-breaker when two postings share a listing timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PostingId(i64);

impl PostingId {
    /// Wrap a raw store identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Access the raw identifier.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for PostingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bike type, frame and colour labels.
///
/// Postings carry the labels predicted by the external classifier; corrections
/// carry the labels a human submitted instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Classification {
    pub bike: String,
    pub frame: String,
    pub color: String,
}

/// A posting that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPosting {
    pub title: String,
    pub url: String,
    pub img_url: String,
    pub location: String,
    /// Search query that produced the posting.
    pub query: String,
    /// Location filter of that search.
    pub location_query: String,
    /// Listing timestamp; the eviction ordering key.
    pub date: DateTime<Utc>,
    pub prediction: Classification,
}

/// A stored posting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    pub id: PostingId,
    pub title: String,
    pub url: String,
    pub img_url: String,
    pub location: String,
    pub query: String,
    pub location_query: String,
    pub date: DateTime<Utc>,
    pub prediction: Classification,
}

impl Posting {
    /// Attach a store-assigned identifier to a new posting.
    #[must_use]
    pub fn from_new(id: PostingId, posting: NewPosting) -> Self {
        let NewPosting {
            title,
            url,
            img_url,
            location,
            query,
            location_query,
            date,
            prediction,
        } = posting;
        Self {
            id,
            title,
            url,
            img_url,
            location,
            query,
            location_query,
            date,
            prediction,
        }
    }

    /// Eviction sort key: oldest listing first, lowest id on ties.
    #[must_use]
    pub fn eviction_key(&self) -> (DateTime<Utc>, PostingId) {
        (self.date, self.id)
    }
}

/// Optional equality predicates on the predicted classification.
///
/// Present predicates are ANDed; an empty filter matches every posting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostingFilter {
    pub bike: Option<String>,
    pub frame: Option<String>,
    pub color: Option<String>,
}

impl PostingFilter {
    /// Whether the given prediction satisfies every present predicate.
    ///
    /// # Examples
    /// ```
    /// use find_my_bike::domain::{Classification, PostingFilter};
    ///
    /// let filter = PostingFilter {
    ///     bike: Some("bike".to_owned()),
    ///     ..PostingFilter::default()
    /// };
    /// let prediction = Classification {
    ///     bike: "bike".to_owned(),
    ///     frame: "diamond".to_owned(),
    ///     color: "red".to_owned(),
    /// };
    /// assert!(filter.matches(&prediction));
    /// ```
    #[must_use]
    pub fn matches(&self, prediction: &Classification) -> bool {
        fn accepts(predicate: Option<&String>, value: &str) -> bool {
            predicate.is_none_or(|expected| expected == value)
        }

        accepts(self.bike.as_ref(), &prediction.bike)
            && accepts(self.frame.as_ref(), &prediction.frame)
            && accepts(self.color.as_ref(), &prediction.color)
    }
}

/// Offset/limit pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    skip: u32,
    limit: u32,
}

impl Page {
    /// Offset applied when the caller does not supply one.
    pub const DEFAULT_SKIP: u32 = 0;
    /// Page size applied when the caller does not supply one.
    pub const DEFAULT_LIMIT: u32 = 10;

    /// Build a window, falling back to the defaults for absent values.
    #[must_use]
    pub fn new(skip: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            skip: skip.unwrap_or(Self::DEFAULT_SKIP),
            limit: limit.unwrap_or(Self::DEFAULT_LIMIT),
        }
    }

    /// Number of matching postings to skip.
    #[must_use]
    pub const fn skip(self) -> u32 {
        self.skip
    }

    /// Maximum number of postings to return.
    #[must_use]
    pub const fn limit(self) -> u32 {
        self.limit
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}
