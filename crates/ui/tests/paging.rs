//! List paging driven by the server's `Link` header.

use larder_client::ClientConfig;
use larder_core::EntityId;
use larder_model::Review;
use larder_ui::{AppContext, EntityListComponent, RouteParams};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_page(server: &MockServer, page: &str, id: i64, link: &str) {
    Mock::given(method("GET"))
        .and(path("/api/reviews"))
        .and(query_param("page", page))
        .and(query_param("size", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Total-Count", "2")
                .insert_header("Link", link)
                .set_body_json(json!([{ "id": id, "rating": 4 }])),
        )
        .mount(server)
        .await;
}

async fn ids(list: &EntityListComponent<Review>) -> Vec<EntityId> {
    list.items().await.iter().filter_map(|r| r.id).collect()
}

#[tokio::test]
async fn next_and_previous_follow_link_header() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "0",
        1,
        r#"</api/reviews?page=1&size=1>; rel="next",</api/reviews?page=1&size=1>; rel="last",</api/reviews?page=0&size=1>; rel="first""#,
    )
    .await;
    mount_page(
        &server,
        "1",
        2,
        r#"</api/reviews?page=0&size=1>; rel="prev",</api/reviews?page=1&size=1>; rel="last",</api/reviews?page=0&size=1>; rel="first""#,
    )
    .await;

    let mut config = ClientConfig::default().with_api_url(server.uri());
    config.items_per_page = 1;
    let ctx = AppContext::new(&config).unwrap();
    let list = EntityListComponent::<Review>::new(&ctx);

    list.mount(&RouteParams::new()).await;
    assert_eq!(ids(&list).await, vec![EntityId(1)]);
    assert_eq!(list.snapshot().await.total_items, Some(2));

    assert!(list.next_page().await.unwrap());
    assert_eq!(ids(&list).await, vec![EntityId(2)]);
    assert_eq!(list.snapshot().await.page, 1);
    assert!(!list.next_page().await.unwrap());

    assert!(list.previous_page().await.unwrap());
    assert_eq!(ids(&list).await, vec![EntityId(1)]);
    assert!(ctx.alerts.is_empty());
}
