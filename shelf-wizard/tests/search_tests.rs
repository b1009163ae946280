//! Search dispatch tests
//!
//! Lookups are released by the test in an arbitrary order to check that only
//! the most recently issued query can reach the presented results.

mod helpers;

use helpers::*;
use shelf_wizard::{
    ClientError, QueryDispatch, SearchKind, SearchOutcome, SearchTicket, WizardController,
    WizardError,
};
use std::sync::Arc;
use tokio::task::JoinHandle;

fn ticket(dispatch: QueryDispatch) -> SearchTicket {
    match dispatch {
        QueryDispatch::Dispatch(ticket) => ticket,
        QueryDispatch::Cleared => panic!("expected a dispatched lookup"),
    }
}

/// Run the lookup for `ticket` in the background, as an adapter would
fn spawn_lookup(
    wizard: &WizardController,
    ticket: &SearchTicket,
) -> JoinHandle<Result<Vec<String>, ClientError>> {
    let backend = wizard.search_backend();
    let kind = ticket.kind;
    let query = ticket.query.clone();
    tokio::spawn(async move { backend.search(kind, &query).await })
}

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// TC-SRCH-001: Later query answered first, earlier answer arrives late
#[tokio::test]
async fn tc_srch_001_late_response_for_old_query_is_dropped() {
    // Given: two lookups in flight for "ag" then "agatha"
    let (backend, mut releases) = gated_search(&["ag", "agatha"]);
    let recommender = Arc::new(StubRecommender::new(Reply::Books(vec![])));
    let (mut wizard, log) = new_wizard(Arc::new(backend), recommender);
    walk_to_step(&mut wizard, 5).await;

    let first = ticket(wizard.begin_search(SearchKind::Authors, "ag"));
    let second = ticket(wizard.begin_search(SearchKind::Authors, "agatha"));
    let first_lookup = spawn_lookup(&wizard, &first);
    let second_lookup = spawn_lookup(&wizard, &second);

    // When: the newer lookup resolves first
    releases
        .remove("agatha")
        .unwrap()
        .send(names(&["Agatha Christie"]))
        .unwrap();
    let response = second_lookup.await.unwrap();
    let outcome = wizard.finish_search(&second, response).unwrap();
    assert_eq!(outcome, SearchOutcome::Presented(names(&["Agatha Christie"])));

    // And: the older lookup resolves afterwards
    releases
        .remove("ag")
        .unwrap()
        .send(names(&["Agatha Christie", "Agnes Grey"]))
        .unwrap();
    let response = first_lookup.await.unwrap();
    let outcome = wizard.finish_search(&first, response).unwrap();

    // Then: only the latest query's results are shown
    assert_eq!(outcome, SearchOutcome::Stale);
    assert_eq!(
        wizard.search_controller(SearchKind::Authors).presented(),
        Some(&names(&["Agatha Christie"])[..])
    );
    assert!(log.notices().is_empty());
}

/// TC-SRCH-002: In-order arrival still ends on the latest query
#[tokio::test]
async fn tc_srch_002_in_order_responses() {
    let (backend, mut releases) = gated_search(&["du", "dune"]);
    let recommender = Arc::new(StubRecommender::new(Reply::Books(vec![])));
    let (mut wizard, _log) = new_wizard(Arc::new(backend), recommender);

    let first = ticket(wizard.begin_search(SearchKind::Books, "du"));
    let second = ticket(wizard.begin_search(SearchKind::Books, "dune"));
    let first_lookup = spawn_lookup(&wizard, &first);
    let second_lookup = spawn_lookup(&wizard, &second);

    releases.remove("du").unwrap().send(names(&["Dubliners", "Dune"])).unwrap();
    let outcome = wizard
        .finish_search(&first, first_lookup.await.unwrap())
        .unwrap();
    assert_eq!(outcome, SearchOutcome::Stale);
    assert!(wizard.search_controller(SearchKind::Books).presented().is_none());

    releases.remove("dune").unwrap().send(names(&["Dune", "Dune Messiah"])).unwrap();
    let outcome = wizard
        .finish_search(&second, second_lookup.await.unwrap())
        .unwrap();
    assert_eq!(outcome, SearchOutcome::Presented(names(&["Dune", "Dune Messiah"])));
}

/// TC-SRCH-003: A stale failure raises nothing
#[tokio::test]
async fn tc_srch_003_stale_failure_is_silent() {
    let (backend, mut releases) = gated_search(&["le", "le guin"]);
    let recommender = Arc::new(StubRecommender::new(Reply::Books(vec![])));
    let (mut wizard, log) = new_wizard(Arc::new(backend), recommender);

    let first = ticket(wizard.begin_search(SearchKind::Authors, "le"));
    let second = ticket(wizard.begin_search(SearchKind::Authors, "le guin"));
    let first_lookup = spawn_lookup(&wizard, &first);
    let second_lookup = spawn_lookup(&wizard, &second);

    // Dropping the sender fails the first lookup
    drop(releases.remove("le"));
    let outcome = wizard.finish_search(&first, first_lookup.await.unwrap());
    assert_eq!(outcome, Ok(SearchOutcome::Stale));
    assert!(log.notices().is_empty());

    releases
        .remove("le guin")
        .unwrap()
        .send(names(&["Ursula K. Le Guin"]))
        .unwrap();
    let outcome = wizard
        .finish_search(&second, second_lookup.await.unwrap())
        .unwrap();
    assert_eq!(outcome, SearchOutcome::Presented(names(&["Ursula K. Le Guin"])));
}

/// TC-SRCH-004: Latest failure hides the list and raises an error notice
#[tokio::test]
async fn tc_srch_004_latest_failure_notifies() {
    let search = ScriptedSearch::new().answer(SearchKind::Books, "hobbit", &["The Hobbit"]);
    let recommender = Arc::new(StubRecommender::new(Reply::Books(vec![])));
    let (mut wizard, log) = new_wizard(Arc::new(search), recommender);

    wizard.search(SearchKind::Books, "hobbit").await.unwrap();
    assert!(wizard.search_controller(SearchKind::Books).presented().is_some());

    // "hobbits" has no scripted answer, so the backend fails
    let err = wizard.search(SearchKind::Books, "hobbits").await.unwrap_err();

    assert!(matches!(err, WizardError::SearchFailed { kind: SearchKind::Books, .. }));
    assert!(wizard.search_controller(SearchKind::Books).presented().is_none());
    let notice = log.last().unwrap();
    assert_eq!(notice.title, "Book search failed");
}

/// TC-SRCH-005: Short queries never reach the backend
#[tokio::test]
async fn tc_srch_005_short_query_short_circuits() {
    // An empty gate table makes any lookup fail loudly
    let (backend, _releases) = gated_search(&[]);
    let recommender = Arc::new(StubRecommender::new(Reply::Books(vec![])));
    let (mut wizard, log) = new_wizard(Arc::new(backend), recommender);

    for raw in ["", " ", "a", " b "] {
        let outcome = wizard.search(SearchKind::Authors, raw).await.unwrap();
        assert_eq!(outcome, SearchOutcome::Cleared);
    }
    assert!(log.notices().is_empty());
    assert!(!wizard.search_controller(SearchKind::Authors).is_pending());
}

/// TC-SRCH-006: Shortening the query invalidates the lookup in flight
#[tokio::test]
async fn tc_srch_006_clearing_query_invalidates_in_flight_lookup() {
    let (backend, mut releases) = gated_search(&["tolkien"]);
    let recommender = Arc::new(StubRecommender::new(Reply::Books(vec![])));
    let (mut wizard, _log) = new_wizard(Arc::new(backend), recommender);

    let pending = ticket(wizard.begin_search(SearchKind::Authors, "tolkien"));
    let lookup = spawn_lookup(&wizard, &pending);
    assert_eq!(wizard.begin_search(SearchKind::Authors, "t"), QueryDispatch::Cleared);

    releases
        .remove("tolkien")
        .unwrap()
        .send(names(&["J. R. R. Tolkien"]))
        .unwrap();
    let outcome = wizard.finish_search(&pending, lookup.await.unwrap()).unwrap();

    assert_eq!(outcome, SearchOutcome::Stale);
    assert!(wizard.search_controller(SearchKind::Authors).presented().is_none());
}

/// TC-SRCH-007: Empty results are shown, not treated as failure
#[tokio::test]
async fn tc_srch_007_empty_result_is_presented() {
    let search = ScriptedSearch::new().answer(SearchKind::Authors, "zzz", &[]);
    let recommender = Arc::new(StubRecommender::new(Reply::Books(vec![])));
    let (mut wizard, log) = new_wizard(Arc::new(search), recommender);

    let outcome = wizard.search(SearchKind::Authors, "zzz").await.unwrap();

    assert_eq!(outcome, SearchOutcome::Presented(vec![]));
    assert_eq!(
        wizard.search_controller(SearchKind::Authors).presented(),
        Some(&[][..])
    );
    assert!(log.notices().is_empty());
}

/// TC-SRCH-008: Author and book searches are sequenced independently
#[tokio::test]
async fn tc_srch_008_kinds_do_not_interfere() {
    let search = ScriptedSearch::new()
        .answer(SearchKind::Authors, "austen", &["Jane Austen"])
        .answer(SearchKind::Books, "emma", &["Emma"]);
    let recommender = Arc::new(StubRecommender::new(Reply::Books(vec![])));
    let (mut wizard, _log) = new_wizard(Arc::new(search), recommender);

    let authors = ticket(wizard.begin_search(SearchKind::Authors, "austen"));
    let books = ticket(wizard.begin_search(SearchKind::Books, "emma"));
    let author_lookup = spawn_lookup(&wizard, &authors);
    let book_lookup = spawn_lookup(&wizard, &books);

    let authors_outcome = wizard
        .finish_search(&authors, author_lookup.await.unwrap())
        .unwrap();
    let books_outcome = wizard.finish_search(&books, book_lookup.await.unwrap()).unwrap();

    assert_eq!(authors_outcome, SearchOutcome::Presented(names(&["Jane Austen"])));
    assert_eq!(books_outcome, SearchOutcome::Presented(names(&["Emma"])));
}

/// TC-SRCH-009: Hiding keeps the query but closes the list
#[tokio::test]
async fn tc_srch_009_hide_results() {
    let search = ScriptedSearch::new().answer(SearchKind::Books, "emma", &["Emma"]);
    let recommender = Arc::new(StubRecommender::new(Reply::Books(vec![])));
    let (mut wizard, _log) = new_wizard(Arc::new(search), recommender);

    wizard.search(SearchKind::Books, "emma").await.unwrap();
    wizard.hide_search_results(SearchKind::Books);

    let controller = wizard.search_controller(SearchKind::Books);
    assert!(controller.presented().is_none());
    assert_eq!(controller.query(), "emma");
}
