use std::collections::HashSet;

use wooprice_core::NO_COLOR;

use super::fake::{colored, shirt_store, simple, variable, Call, FakeCatalog};
use super::*;

#[tokio::test]
async fn blank_query_is_rejected_without_touching_state() {
    let mut session = Session::new(shirt_store(), 100);
    session.search("shirt").await.expect("search should succeed");
    session
        .stage_edit(RowKey::variation(1, 11), 190)
        .expect("stage should succeed");
    let calls_before = session.catalog().calls().len();

    let err = session.search("   ").await.expect_err("blank query must fail");

    assert!(matches!(err, SessionError::Validation(ValidationError::EmptyQuery)));
    assert_eq!(session.catalog().calls().len(), calls_before, "no network call");
    assert_eq!(session.rows().len(), 2, "rows kept");
    assert_eq!(session.edits().get(&RowKey::variation(1, 11)), Some(190));
}

#[tokio::test]
async fn search_passes_query_and_page_size() {
    let store = FakeCatalog::default().with_product(simple(5, "Mug", 120));
    let mut session = Session::new(store, 25);

    session.search("  Mug ").await.expect("search should succeed");

    assert_eq!(session.catalog().calls(), vec![Call::Search("Mug".into(), 25)]);
    assert_eq!(session.last_query(), Some("Mug"));
}

#[tokio::test]
async fn simple_product_yields_one_row_without_color() {
    let store = FakeCatalog::default().with_product(simple(5, "Mug", 120));
    let mut session = Session::new(store, 100);

    let rows = session.search("mug").await.expect("search should succeed");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].row.key, RowKey::product(5));
    assert_eq!(rows[0].row.color, NO_COLOR);
    assert_eq!(rows[0].row.old_price, 120);
    assert_eq!(rows[0].new_price, None);
}

#[tokio::test]
async fn variable_product_expands_into_variation_rows() {
    let mut session = Session::new(shirt_store(), 100);

    let rows = session.search("shirt").await.expect("search should succeed");

    let summary: Vec<(String, &str, i64)> = rows
        .iter()
        .map(|r| (r.row.key.to_string(), r.row.color.as_str(), r.row.old_price))
        .collect();
    assert_eq!(
        summary,
        vec![("1_11".to_string(), "red", 200), ("1_12".to_string(), "blue", 220)]
    );
    assert!(rows.iter().all(|r| r.row.name == "Shirt"));
}

#[tokio::test]
async fn loose_server_matches_are_excluded() {
    let store = FakeCatalog::default()
        .with_product(simple(5, "Coffee Mug", 120))
        .with_product(simple(6, "Tea Cup", 80))
        .with_product(variable(7, "Cupboard"));
    let mut session = Session::new(store, 100);

    let rows = session.search("MUG").await.expect("search should succeed");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].row.key, RowKey::product(5));
    assert!(
        !session.catalog().calls().contains(&Call::Variations(7)),
        "filtered-out variable products must not be expanded"
    );
}

#[tokio::test]
async fn variable_product_without_variations_yields_no_rows() {
    let store = FakeCatalog::default().with_product(variable(3, "Hat"));
    let mut session = Session::new(store, 100);

    let rows = session.search("hat").await.expect("search should succeed");

    assert!(rows.is_empty());
}

#[tokio::test]
async fn new_search_clears_staged_edits() {
    let mut session = Session::new(shirt_store(), 100);
    session.search("shirt").await.expect("search should succeed");
    session
        .stage_edit(RowKey::variation(1, 11), 190)
        .expect("stage should succeed");

    let rows = session.search("shirt").await.expect("search should succeed");

    assert!(session.edits().is_empty());
    assert!(rows.iter().all(|r| r.new_price.is_none()));
}

#[tokio::test]
async fn search_failure_leaves_no_rows() {
    let store = FakeCatalog {
        fail_search: true,
        ..shirt_store()
    };
    let mut session = Session::new(store, 100);

    let err = session.search("shirt").await.expect_err("search should fail");

    assert!(matches!(err, SessionError::Search(ref e) if e.status() == Some(500)));
    assert!(session.rows().is_empty());
}

#[tokio::test]
async fn variation_failure_aborts_whole_search() {
    let store = FakeCatalog {
        fail_variations: HashSet::from([2]),
        ..FakeCatalog::default()
            .with_product(variable(1, "Shirt A"))
            .with_product(variable(2, "Shirt B"))
            .with_product(variable(3, "Shirt C"))
            .with_variations(1, vec![colored(11, 1, "red", 200)])
            .with_variations(3, vec![colored(31, 3, "green", 300)])
    };
    let mut session = Session::new(store, 100);

    let err = session.search("shirt").await.expect_err("search should fail");

    assert!(matches!(err, SessionError::Search(ref e) if e.status() == Some(503)));
    assert!(session.rows().is_empty(), "no partial result set");
    assert!(
        !session.catalog().calls().contains(&Call::Variations(3)),
        "lookups stop at the first failure"
    );
}

#[tokio::test]
async fn stage_edit_rejects_unknown_row() {
    let mut session = Session::new(shirt_store(), 100);
    session.search("shirt").await.expect("search should succeed");

    let err = session
        .stage_edit(RowKey::variation(1, 99), 150)
        .expect_err("unknown row must be rejected");

    assert!(matches!(err, SessionError::UnknownRow(k) if k == RowKey::variation(1, 99)));
    assert!(session.edits().is_empty());
}

#[tokio::test]
async fn stage_edit_rejects_negative_price() {
    let mut session = Session::new(shirt_store(), 100);
    session.search("shirt").await.expect("search should succeed");

    let err = session
        .stage_edit(RowKey::variation(1, 11), -5)
        .expect_err("negative price must be rejected");

    assert!(matches!(err, SessionError::Validation(ValidationError::Negative(_))));
}

#[tokio::test]
async fn stage_edit_overwrites_and_shows_in_rows() {
    let mut session = Session::new(shirt_store(), 100);
    session.search("shirt").await.expect("search should succeed");
    let key = RowKey::variation(1, 12);

    session.stage_edit(key, 150).expect("stage should succeed");
    let staged = session.stage_edit(key, 160).expect("stage should succeed");

    assert_eq!(staged.new_price, Some(160));
    assert_eq!(session.row(key).and_then(|r| r.new_price), Some(160));
    assert_eq!(session.pending(), 1);
}

#[tokio::test]
async fn key_at_is_one_based() {
    let mut session = Session::new(shirt_store(), 100);
    session.search("shirt").await.expect("search should succeed");

    assert_eq!(session.key_at(1), Some(RowKey::variation(1, 11)));
    assert_eq!(session.key_at(2), Some(RowKey::variation(1, 12)));
    assert_eq!(session.key_at(0), None);
    assert_eq!(session.key_at(3), None);
}

#[tokio::test]
async fn commit_with_no_edits_sends_nothing() {
    let mut session = Session::new(shirt_store(), 100);
    session.search("shirt").await.expect("search should succeed");

    let report = session.commit().await.expect("commit should succeed");

    assert!(report.applied.is_empty());
    assert!(session.catalog().pushes().is_empty());
    assert!(matches!(report.refresh, Refresh::Done(2)));
}

#[tokio::test]
async fn commit_before_any_search_skips_refresh() {
    let mut session = Session::new(shirt_store(), 100);

    let report = session.commit().await.expect("commit should succeed");

    assert!(matches!(report.refresh, Refresh::Skipped));
    assert!(session.catalog().calls().is_empty());
}

#[tokio::test]
async fn commit_skips_rows_staged_at_zero() {
    let mut session = Session::new(shirt_store(), 100);
    session.search("shirt").await.expect("search should succeed");
    session
        .stage_edit(RowKey::variation(1, 11), 0)
        .expect("stage should succeed");

    assert_eq!(session.pending(), 0);
    let report = session.commit().await.expect("commit should succeed");

    assert!(report.applied.is_empty());
    assert!(session.catalog().pushes().is_empty());
}

#[tokio::test]
async fn fractional_prices_are_truncated_end_to_end() {
    let store = FakeCatalog::default().with_product(simple(9, "Lamp", 100));
    let mut session = Session::new(store, 100);
    session.search("lamp").await.expect("search should succeed");
    let price = wooprice_core::parse_price_input("85.5").expect("valid input");

    session
        .stage_edit(RowKey::product(9), price)
        .expect("stage should succeed");
    session.commit().await.expect("commit should succeed");

    assert_eq!(
        session.catalog().pushes(),
        vec![Call::Push(RowKey::product(9), 85, 100)]
    );
}

#[tokio::test]
async fn commit_pushes_staged_rows_in_display_order_then_refreshes() {
    let mut session = Session::new(shirt_store(), 100);
    session.search("shirt").await.expect("search should succeed");
    session
        .stage_edit(RowKey::variation(1, 12), 190)
        .expect("stage should succeed");
    session
        .stage_edit(RowKey::variation(1, 11), 180)
        .expect("stage should succeed");

    let report = session.commit().await.expect("commit should succeed");

    assert_eq!(
        session.catalog().pushes(),
        vec![
            Call::Push(RowKey::variation(1, 11), 180, 200),
            Call::Push(RowKey::variation(1, 12), 190, 220),
        ]
    );
    assert_eq!(
        report.applied,
        vec![RowKey::variation(1, 11), RowKey::variation(1, 12)]
    );
    assert!(matches!(report.refresh, Refresh::Done(2)));
    assert!(session.edits().is_empty(), "refresh clears the buffer");

    let prices: Vec<i64> = session.rows().iter().map(|r| r.row.old_price).collect();
    assert_eq!(prices, vec![180, 190], "rows show the store's new prices");
}

#[tokio::test]
async fn commit_stops_at_first_failure_without_rollback() {
    let store = FakeCatalog {
        fail_push: HashSet::from([RowKey::product(2)]),
        ..FakeCatalog::default()
            .with_product(simple(1, "Pen blue", 10))
            .with_product(simple(2, "Pen red", 20))
            .with_product(simple(3, "Pen black", 30))
    };
    let mut session = Session::new(store, 100);
    session.search("pen").await.expect("search should succeed");
    for (pid, price) in [(1, 11), (2, 22), (3, 33)] {
        session
            .stage_edit(RowKey::product(pid), price)
            .expect("stage should succeed");
    }

    let err = session.commit().await.expect_err("commit should fail");

    assert_eq!(err.applied, vec![RowKey::product(1)]);
    assert_eq!(err.failed, RowKey::product(2));
    assert_eq!(err.source.status(), Some(400));
    assert_eq!(
        session.catalog().pushes().len(),
        2,
        "no update attempted after the failure"
    );
    assert_eq!(session.pending(), 3, "edits are kept for a retry");
    assert_eq!(
        session.rows()[0].row.old_price,
        10,
        "rows are not refreshed after a failed commit"
    );
    let msg = err.to_string();
    assert!(msg.contains("1 earlier update(s)"), "got: {msg}");
}

#[tokio::test]
async fn refresh_failure_is_reported_separately() {
    let mut session = Session::new(shirt_store(), 100);
    session.search("shirt").await.expect("search should succeed");
    session
        .stage_edit(RowKey::variation(1, 11), 150)
        .expect("stage should succeed");
    // Make the refresh fail after the update lands.
    session.catalog.fail_search = true;

    let report = session.commit().await.expect("commit should succeed");

    assert_eq!(report.applied, vec![RowKey::variation(1, 11)]);
    assert!(matches!(report.refresh, Refresh::Failed(SessionError::Search(_))));
}

#[tokio::test]
async fn display_row_serializes_flat() {
    let mut session = Session::new(shirt_store(), 100);
    session.search("shirt").await.expect("search should succeed");
    session
        .stage_edit(RowKey::variation(1, 11), 150)
        .expect("stage should succeed");

    let json = serde_json::to_value(session.rows()).expect("rows should serialize");

    assert_eq!(
        json[0],
        serde_json::json!({
            "key": "1_11",
            "name": "Shirt",
            "color": "red",
            "old_price": 200,
            "new_price": 150
        })
    );
    assert_eq!(json[1]["new_price"], serde_json::Value::Null);
}

#[tokio::test]
async fn shirt_scenario_edits_red_and_commits_one_update() {
    let mut session = Session::new(shirt_store(), 100);

    let rows = session.search("Shirt").await.expect("search should succeed");
    let colors: Vec<&str> = rows.iter().map(|r| r.row.color.as_str()).collect();
    assert_eq!(colors, vec!["red", "blue"]);
    assert!(rows.iter().all(|r| r.new_price.is_none()));

    session
        .stage_edit(RowKey::variation(1, 11), 180)
        .expect("stage should succeed");
    session.commit().await.expect("commit should succeed");

    let calls = session.catalog().calls();
    assert_eq!(
        session.catalog().pushes(),
        vec![Call::Push(RowKey::variation(1, 11), 180, 200)]
    );
    assert_eq!(
        calls.last(),
        Some(&Call::Variations(1)),
        "commit re-runs the search"
    );
    assert_eq!(
        calls.iter().filter(|c| matches!(c, Call::Search(..))).count(),
        2
    );
}
