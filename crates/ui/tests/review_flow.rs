//! End-to-end review flow against a mock REST server: open the create
//! dialog, save, and watch the mounted list pick up the new review.

use larder_client::ClientConfig;
use larder_core::EntityId;
use larder_model::Review;
use larder_ui::{AppContext, EntityListComponent, EntityPopupService, ModalOutcome, ReviewDialog, RouteParams};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_reference_lists(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 1, "login": "system" }])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/recipes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 10, "name": "Pesto" }])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn saved_review_shows_up_in_mounted_list() {
    let server = MockServer::start().await;
    mount_reference_lists(&server).await;

    // First list load sees nothing; every later one sees the saved review.
    Mock::given(method("GET"))
        .and(path("/api/reviews"))
        .and(query_param("size", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/reviews"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Total-Count", "1")
                .set_body_json(json!([{ "id": 42, "rating": 5, "comment": "great" }])),
        )
        .with_priority(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/reviews"))
        .and(body_json(json!({ "rating": 5, "comment": "great" })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "id": 42, "rating": 5, "comment": "great" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let ctx = AppContext::new(&ClientConfig::default().with_api_url(server.uri())).unwrap();
    let list = EntityListComponent::<Review>::new(&ctx);
    list.mount(&RouteParams::new()).await;
    assert!(list.items().await.is_empty());

    let popups = EntityPopupService::<Review>::new(&ctx);
    let opened = popups.open::<ReviewDialog>(None).await.unwrap();
    assert_eq!(opened.dialog.users.items().len(), 1);
    assert_eq!(opened.dialog.recipes.items().len(), 1);

    opened.dialog.edit(|review| {
        review.rating = Some(5);
        review.comment = Some("great".to_string());
    });
    let saved = opened.dialog.save().await.unwrap();
    assert_eq!(saved.id, Some(EntityId(42)));

    match opened.modal.result().await {
        ModalOutcome::Closed(review) => assert_eq!(review.id, Some(EntityId(42))),
        other => panic!("expected the dialog to close, got {:?}", other),
    }
    assert!(!popups.is_open());

    list.wait_idle().await;
    let ids: Vec<_> = list.items().await.iter().filter_map(|r| r.id).collect();
    assert_eq!(ids, vec![EntityId(42)]);
    assert_eq!(list.snapshot().await.total_items, Some(1));
    assert!(ctx.alerts.is_empty());

    list.unmount();
}

#[tokio::test]
async fn rejected_save_keeps_dialog_open() {
    let server = MockServer::start().await;
    mount_reference_lists(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/reviews"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "error.validation",
            "title": "Method argument not valid"
        })))
        .mount(&server)
        .await;

    let ctx = AppContext::new(&ClientConfig::default().with_api_url(server.uri())).unwrap();
    let popups = EntityPopupService::<Review>::new(&ctx);
    let mut opened = popups.open::<ReviewDialog>(None).await.unwrap();

    let err = opened.dialog.save().await.unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert!(!opened.dialog.is_saving());
    assert!(popups.is_open());
    assert_eq!(opened.modal.try_result(), None);
    assert_eq!(ctx.alerts.errors(), vec!["error.validation".to_string()]);
}
