//! Find-My-Bike backend library.
//!
//! Stores classified bike postings and human corrections of their predicted
//! classification under a fixed row budget, evicting the oldest postings
//! when an insert would overflow it.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by the docs endpoints.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
