//! Behavioural tests for capacity-aware ingestion over the in-memory store.
//!
//! The store mirrors the PostgreSQL adapter's id assignment, `(date, id)`
//! eviction order and correction cascade, so these scenarios pin down the
//! observable write-path contract without a database.

use std::sync::Arc;

use find_my_bike::domain::ports::{IngestionCommand, RowStore};
use find_my_bike::domain::{
    CapacityLedger, ErrorCode, IngestionService, NewPosting, RowLimit,
};
use find_my_bike::test_support::InMemoryRowStore;
use rstest::{fixture, rstest};

mod support;

use support::{correction_for, day, posting_on, ten_daily_postings};

fn limit(value: i64) -> RowLimit {
    RowLimit::new(value).expect("valid row limit")
}

/// Store holding ten daily postings (ids 1..=10) and one correction on id 1.
#[fixture]
async fn seeded_store() -> Arc<InMemoryRowStore> {
    let store = Arc::new(InMemoryRowStore::new());
    store
        .insert_postings(&ten_daily_postings())
        .await
        .expect("seed postings");
    store
        .insert_correction(&correction_for(1))
        .await
        .expect("seed correction");
    store
}

#[rstest]
#[tokio::test]
async fn free_rows_accounts_for_both_tables_and_the_reserved_row(
    #[future] seeded_store: Arc<InMemoryRowStore>,
) {
    let ledger = CapacityLedger::new(seeded_store.await, limit(1000));

    assert_eq!(ledger.free_rows().await.expect("free rows"), 988);
}

#[rstest]
#[tokio::test]
async fn full_store_evicts_the_oldest_posting_and_its_correction(
    #[future] seeded_store: Arc<InMemoryRowStore>,
) {
    let store = seeded_store.await;
    let service = IngestionService::new(Arc::clone(&store), limit(12));

    service
        .add_postings(vec![posting_on("fresh", day(20))])
        .await
        .expect("add posting");

    let ids = store.posting_ids();
    assert_eq!(ids.len(), 10);
    assert!(!ids.contains(&1), "oldest posting should be evicted");
    assert_eq!(ids.last(), Some(&11));
    assert!(store.corrections().is_empty(), "correction should cascade");
}

#[rstest]
#[tokio::test]
async fn deficit_beyond_stored_postings_empties_the_table(
    #[future] seeded_store: Arc<InMemoryRowStore>,
) {
    let store = seeded_store.await;
    let service = IngestionService::new(Arc::clone(&store), limit(3));
    let batch: Vec<NewPosting> = (0..5)
        .map(|n| posting_on(&format!("batch-{n}"), day(21)))
        .collect();

    service.add_postings(batch).await.expect("add batch");

    assert_eq!(store.posting_ids(), [11, 12, 13, 14, 15]);
    assert!(store.corrections().is_empty());
}

#[rstest]
#[tokio::test]
async fn correction_for_unknown_posting_fails_and_stores_nothing(
    #[future] seeded_store: Arc<InMemoryRowStore>,
) {
    let store = seeded_store.await;
    let service = IngestionService::new(Arc::clone(&store), limit(1000));

    let err = service
        .add_correction(correction_for(42))
        .await
        .expect_err("unknown posting");

    assert_eq!(err.code(), ErrorCode::ReferenceNotFound);
    assert_eq!(err.message(), "Posting with ID 42 not found");
    assert_eq!(store.corrections().len(), 1);
}

#[rstest]
#[tokio::test]
async fn correction_eviction_may_remove_its_own_target(
    #[future] seeded_store: Arc<InMemoryRowStore>,
) {
    let store = seeded_store.await;
    let service = IngestionService::new(Arc::clone(&store), limit(12));

    let err = service
        .add_correction(correction_for(1))
        .await
        .expect_err("target evicted before insert");

    assert_eq!(err.code(), ErrorCode::ReferenceNotFound);
    assert!(!store.posting_ids().contains(&1));
}

#[rstest]
#[case(15, 4)]
#[case(25, 1)]
#[case(40, 10)]
#[tokio::test]
async fn sequential_writes_never_exceed_the_limit(#[case] row_limit: i64, #[case] batch: usize) {
    let store = Arc::new(InMemoryRowStore::new());
    let service = IngestionService::new(Arc::clone(&store), limit(row_limit));

    for round in 0..12_u32 {
        let postings: Vec<NewPosting> = (0..batch)
            .map(|n| posting_on(&format!("round-{round}-{n}"), day(1 + round % 28)))
            .collect();
        service.add_postings(postings).await.expect("add postings");

        let newest = *store.posting_ids().last().expect("at least one posting");
        service
            .add_correction(correction_for(newest))
            .await
            .expect("add correction");

        let counts = store.count_rows().await.expect("count rows");
        assert!(
            counts.used() <= row_limit,
            "round {round}: {} rows used under a limit of {row_limit}",
            counts.used()
        );
    }
}

#[rstest]
#[tokio::test]
async fn eviction_order_is_date_then_id() {
    let store = Arc::new(InMemoryRowStore::new());
    let postings = vec![
        posting_on("newest", day(9)),
        posting_on("tie-first", day(2)),
        posting_on("tie-second", day(2)),
        posting_on("middle", day(5)),
    ];
    store.insert_postings(&postings).await.expect("insert");

    store.evict_oldest(2).await.expect("evict");

    let titles: Vec<String> = store.postings().into_iter().map(|p| p.title).collect();
    assert_eq!(titles, ["newest", "middle"]);
}
