//! Controller lifecycle integration tests.
//!
//! These tests exercise the full request lifecycle against the mock
//! engine: search replacing the collection, id-keyed judge merging,
//! failure surfacing with state preservation, phase guarding and
//! cancellation.

use std::sync::Arc;
use std::time::Duration;

use paperino_core::testing::{fixtures, MockEngineClient};
use paperino_core::{
    ControllerError, EngineClient, EngineError, InfoController, ParamsUpdate, RequestPhase,
    SearchController, Verdict, UNKNOWN_OPTION,
};

fn search_controller(engine: &Arc<MockEngineClient>) -> SearchController {
    SearchController::new(Arc::clone(engine) as Arc<dyn EngineClient>)
}

fn info_controller(engine: &Arc<MockEngineClient>) -> InfoController {
    InfoController::new(Arc::clone(engine) as Arc<dyn EngineClient>)
}

async fn seeded_controller(
    engine: &Arc<MockEngineClient>,
    query: &str,
    documents: Vec<paperino_core::Document>,
) -> SearchController {
    engine.set_documents(documents).await;

    let mut ctl = search_controller(engine);
    ctl.update_params(ParamsUpdate {
        query: Some(query.to_string()),
        ..Default::default()
    });
    ctl.trigger_search().await.expect("seed search failed");
    ctl
}

#[tokio::test]
async fn test_search_replaces_collection_with_unset_verdicts() {
    let engine = Arc::new(MockEngineClient::new());
    engine
        .set_documents(vec![
            fixtures::document("a1", "Neural Networks"),
            fixtures::document("a2", "Deep Learning"),
        ])
        .await;

    let mut ctl = search_controller(&engine);
    ctl.update_params(ParamsUpdate {
        query: Some("neural nets".to_string()),
        ..Default::default()
    });

    let count = ctl.trigger_search().await.unwrap();

    assert_eq!(count, 2);
    assert_eq!(ctl.documents().len(), 2);
    assert_eq!(ctl.documents()[0].id, "a1");
    assert_eq!(ctl.documents()[1].id, "a2");
    assert!(ctl.documents().iter().all(|d| d.judge == Verdict::Unset));
    assert_eq!(ctl.phase(), RequestPhase::Idle);

    let searches = engine.recorded_searches().await;
    assert_eq!(searches.len(), 1);
    assert_eq!(searches[0].params.query, "neural nets");
}

#[tokio::test]
async fn test_judge_merges_verdicts_by_id() {
    let engine = Arc::new(MockEngineClient::new());
    let mut ctl = seeded_controller(
        &engine,
        "neural nets",
        vec![
            fixtures::document("a1", "Neural Networks"),
            fixtures::document("a2", "Deep Learning"),
        ],
    )
    .await;

    let before = ctl.documents().to_vec();

    engine
        .set_judge_entries(vec![
            fixtures::judge_entry("a1", true),
            fixtures::judge_entry("a2", false),
        ])
        .await;
    ctl.trigger_judge().await.unwrap();

    assert_eq!(ctl.documents()[0].judge, Verdict::Relevant);
    assert_eq!(ctl.documents()[1].judge, Verdict::NotRelevant);
    assert_eq!(ctl.phase(), RequestPhase::Idle);

    // Only the judge field changed.
    for (before, after) in before.iter().zip(ctl.documents()) {
        assert_eq!(before.id, after.id);
        assert_eq!(before.title, after.title);
        assert_eq!(before.authors, after.authors);
        assert_eq!(before.published, after.published);
        assert_eq!(before.summary, after.summary);
        assert_eq!(before.category_ids, after.category_ids);
    }

    // The judge request carried the query and the ordered ids.
    let judges = engine.recorded_judges().await;
    assert_eq!(judges.len(), 1);
    assert_eq!(judges[0].query, "neural nets");
    assert_eq!(judges[0].ids, vec!["a1", "a2"]);
}

#[tokio::test]
async fn test_judge_merge_keyed_by_id_not_position() {
    let engine = Arc::new(MockEngineClient::new());
    let mut ctl = seeded_controller(
        &engine,
        "neural nets",
        vec![
            fixtures::document("a1", "Neural Networks"),
            fixtures::document("a2", "Deep Learning"),
        ],
    )
    .await;

    // Entries arrive in reverse order; the merge must still land each
    // verdict on the matching document.
    engine
        .set_judge_entries(vec![
            fixtures::judge_entry("a2", false),
            fixtures::judge_entry("a1", true),
        ])
        .await;
    ctl.trigger_judge().await.unwrap();

    assert_eq!(ctl.documents()[0].judge, Verdict::Relevant);
    assert_eq!(ctl.documents()[1].judge, Verdict::NotRelevant);
}

#[tokio::test]
async fn test_judge_is_idempotent() {
    let engine = Arc::new(MockEngineClient::new());
    let mut ctl = seeded_controller(
        &engine,
        "neural nets",
        vec![
            fixtures::document("a1", "Neural Networks"),
            fixtures::document("a2", "Deep Learning"),
        ],
    )
    .await;

    engine
        .set_judge_entries(vec![
            fixtures::judge_entry("a1", true),
            fixtures::judge_entry("a2", false),
        ])
        .await;

    ctl.trigger_judge().await.unwrap();
    let first = ctl.documents().to_vec();

    ctl.trigger_judge().await.unwrap();

    assert_eq!(ctl.documents(), &first[..]);
    assert_eq!(engine.judge_count().await, 2);
}

#[tokio::test]
async fn test_judge_entry_missing_id_leaves_verdict_unset() {
    let engine = Arc::new(MockEngineClient::new());
    let mut ctl = seeded_controller(
        &engine,
        "neural nets",
        vec![
            fixtures::document("a1", "Neural Networks"),
            fixtures::document("a2", "Deep Learning"),
        ],
    )
    .await;

    // Length matches, but the second entry names an unknown id.
    engine
        .set_judge_entries(vec![
            fixtures::judge_entry("a1", true),
            fixtures::judge_entry("zz", false),
        ])
        .await;
    ctl.trigger_judge().await.unwrap();

    assert_eq!(ctl.documents()[0].judge, Verdict::Relevant);
    assert_eq!(ctl.documents()[1].judge, Verdict::Unset);
}

#[tokio::test]
async fn test_judge_length_mismatch_rejected_without_partial_merge() {
    let engine = Arc::new(MockEngineClient::new());
    let mut ctl = seeded_controller(
        &engine,
        "neural nets",
        vec![
            fixtures::document("a1", "Neural Networks"),
            fixtures::document("a2", "Deep Learning"),
        ],
    )
    .await;

    engine
        .set_judge_entries(vec![fixtures::judge_entry("a1", true)])
        .await;
    let err = ctl.trigger_judge().await.unwrap_err();

    assert!(matches!(
        err,
        ControllerError::JudgeMismatch {
            submitted: 2,
            received: 1
        }
    ));
    assert!(ctl.documents().iter().all(|d| d.judge == Verdict::Unset));
    assert_eq!(ctl.phase(), RequestPhase::Idle);
}

#[tokio::test]
async fn test_search_failure_preserves_state() {
    let engine = Arc::new(MockEngineClient::new());
    let mut ctl = seeded_controller(
        &engine,
        "neural nets",
        vec![
            fixtures::document("a1", "Neural Networks"),
            fixtures::document("a2", "Deep Learning"),
        ],
    )
    .await;
    let before = ctl.documents().to_vec();

    engine
        .set_next_error(EngineError::Server {
            status: 500,
            status_text: "Internal Server Error".to_string(),
            message: "index unavailable".to_string(),
        })
        .await;
    let err = ctl.trigger_search().await.unwrap_err();

    // The exact server detail is what gets surfaced.
    assert_eq!(err.message(), "index unavailable");
    assert_eq!(ctl.documents(), &before[..]);
    assert_eq!(ctl.phase(), RequestPhase::Idle);

    // The controller is retriable afterwards.
    assert_eq!(ctl.trigger_search().await.unwrap(), 2);
}

#[tokio::test]
async fn test_judge_failure_preserves_state() {
    let engine = Arc::new(MockEngineClient::new());
    let mut ctl = seeded_controller(
        &engine,
        "neural nets",
        vec![fixtures::document("a1", "Neural Networks")],
    )
    .await;

    engine
        .set_next_error(EngineError::ConnectionFailed("connection refused".to_string()))
        .await;
    let err = ctl.trigger_judge().await.unwrap_err();

    assert_eq!(err.message(), "connection refused");
    assert_eq!(ctl.documents()[0].judge, Verdict::Unset);
    assert_eq!(ctl.phase(), RequestPhase::Idle);
}

#[tokio::test]
async fn test_new_search_resets_verdicts() {
    let engine = Arc::new(MockEngineClient::new());
    let mut ctl = seeded_controller(
        &engine,
        "neural nets",
        vec![
            fixtures::document("a1", "Neural Networks"),
            fixtures::document("a2", "Deep Learning"),
        ],
    )
    .await;

    ctl.trigger_judge().await.unwrap();
    assert!(ctl.documents().iter().all(|d| d.judge == Verdict::Relevant));

    // A fresh search replaces the collection even when ids repeat.
    ctl.trigger_search().await.unwrap();

    assert_eq!(ctl.documents().len(), 2);
    assert!(ctl.documents().iter().all(|d| d.judge == Verdict::Unset));
}

#[tokio::test]
async fn test_empty_collection_judge_short_circuits() {
    let engine = Arc::new(MockEngineClient::new());
    let mut ctl = search_controller(&engine);

    ctl.trigger_judge().await.unwrap();

    assert_eq!(engine.judge_count().await, 0);
    assert!(ctl.documents().is_empty());
    assert_eq!(ctl.phase(), RequestPhase::Idle);
}

#[tokio::test]
async fn test_cancellation_during_search() {
    let engine = Arc::new(MockEngineClient::new());
    engine
        .set_documents(vec![fixtures::document("a1", "Neural Networks")])
        .await;
    engine.set_delay(Duration::from_millis(500)).await;

    let mut ctl = search_controller(&engine);
    let handle = ctl.cancel_handle();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.cancel();
    });

    let err = ctl.trigger_search().await.unwrap_err();

    assert!(matches!(err, ControllerError::Cancelled));
    assert!(ctl.documents().is_empty());
    assert_eq!(ctl.phase(), RequestPhase::Idle);
}

#[tokio::test]
async fn test_cancellation_during_judge() {
    let engine = Arc::new(MockEngineClient::new());
    let mut ctl = seeded_controller(
        &engine,
        "neural nets",
        vec![fixtures::document("a1", "Neural Networks")],
    )
    .await;

    engine.set_delay(Duration::from_millis(500)).await;
    let handle = ctl.cancel_handle();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.cancel();
    });

    let err = ctl.trigger_judge().await.unwrap_err();

    assert!(matches!(err, ControllerError::Cancelled));
    assert_eq!(ctl.documents()[0].judge, Verdict::Unset);
    assert_eq!(ctl.phase(), RequestPhase::Idle);
}

#[tokio::test]
async fn test_cancel_while_idle_is_a_noop() {
    let engine = Arc::new(MockEngineClient::new());
    engine
        .set_documents(vec![fixtures::document("a1", "Neural Networks")])
        .await;

    let mut ctl = search_controller(&engine);
    ctl.cancel_handle().cancel();

    // The next trigger is unaffected.
    assert_eq!(ctl.trigger_search().await.unwrap(), 1);
}

#[tokio::test]
async fn test_info_controller_loads_option() {
    let engine = Arc::new(MockEngineClient::new());
    engine.set_option("arxiv-sentences-bert-faiss").await;

    let mut ctl = info_controller(&engine);
    let label = ctl.load_info().await.unwrap().to_string();

    assert_eq!(label, "arxiv-sentences-bert-faiss");
    assert_eq!(ctl.option_label(), "arxiv-sentences-bert-faiss");
    assert_eq!(ctl.phase(), RequestPhase::Idle);
    assert_eq!(engine.info_count().await, 1);
}

#[tokio::test]
async fn test_info_controller_failure_sets_unknown_sentinel() {
    let engine = Arc::new(MockEngineClient::new());
    engine
        .set_next_error(EngineError::ConnectionFailed("connection refused".to_string()))
        .await;

    let mut ctl = info_controller(&engine);
    let err = ctl.load_info().await.unwrap_err();

    assert_eq!(err.message(), "connection refused");
    assert_eq!(ctl.option_label(), UNKNOWN_OPTION);
    assert_eq!(ctl.phase(), RequestPhase::Idle);
}

#[tokio::test]
async fn test_info_and_search_controllers_are_independent() {
    let engine = Arc::new(MockEngineClient::new());
    engine.set_delay(Duration::from_millis(100)).await;
    engine
        .set_documents(vec![fixtures::document("a1", "Neural Networks")])
        .await;

    let mut info_ctl = info_controller(&engine);
    let mut search_ctl = search_controller(&engine);

    // Both controllers can have a request in flight at the same time.
    let (info_result, search_result) =
        tokio::join!(info_ctl.load_info(), search_ctl.trigger_search());

    assert!(info_result.is_ok());
    assert_eq!(search_result.unwrap(), 1);
}
