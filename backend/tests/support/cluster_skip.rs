//! Policy for suites that need an embedded PostgreSQL cluster.
//!
//! Cluster bootstrap downloads binaries and needs a writable data directory,
//! which many environments lack. Suites skip with a marker by default; set
//! `REQUIRE_TEST_CLUSTER` to a truthy value to turn setup failures into test
//! failures.

/// Returns true when `REQUIRE_TEST_CLUSTER` is "1", "true" or "yes"
/// (case-insensitive).
pub fn cluster_required() -> bool {
    std::env::var("REQUIRE_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Handles embedded cluster setup failures consistently across suites.
///
/// Prints a skip marker and returns `None` unless the cluster is required,
/// in which case it panics with the reason.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if cluster_required() {
        panic!("Test cluster setup failed: {reason}. Unset REQUIRE_TEST_CLUSTER to skip.");
    }
    eprintln!("SKIP-TEST-CLUSTER: {reason}");
    None
}
