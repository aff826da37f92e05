//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod ingestion_command;
mod listing_query;
mod row_store;

#[cfg(test)]
pub use ingestion_command::MockIngestionCommand;
pub use ingestion_command::{FixtureIngestionCommand, IngestionCommand};
#[cfg(test)]
pub use listing_query::MockListingQuery;
pub use listing_query::{FixtureListingQuery, ListingQuery};
#[cfg(test)]
pub use row_store::MockRowStore;
pub use row_store::{FixtureRowStore, RowStore, RowStoreError};
