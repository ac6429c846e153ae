//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: request generator → ApiClient → envelope
//! decoding → guard → cursor update, against a mock API.

use api_pager::config::ClientConfig;
use api_pager::error::Error;
use api_pager::http::{ApiClient, ApiRequest, ApiResponseSuccess};
use api_pager::pagination::{
    collect_all, into_stream, PageCursorState, Pull, TokenCursorState,
};
use api_pager::{Method, Result};
use futures::StreamExt;
use serde::Deserialize;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Widget {
    id: u32,
}

fn widgets(range: std::ops::Range<u32>) -> Value {
    Value::Array(range.map(|id| json!({ "id": id })).collect())
}

fn page_body(data: Value) -> Value {
    json!({ "data": data, "meta": { "status": 200, "version": "2.0.0", "request_id": "r" } })
}

fn token_body(data: Value, next: Option<&str>) -> Value {
    json!({
        "data": data,
        "meta": { "status": 200, "version": "2.0.0", "request_id": "r", "next_page_token": next }
    })
}

fn is_list(res: &ApiResponseSuccess) -> bool {
    res.items().is_some()
}

fn widget_reqgen(client: &ApiClient) -> impl Fn() -> Result<ApiRequest> + Send + Sync {
    let client = client.clone();
    move || client.make(Method::GET, "/widgets")
}

async fn mount_page(server: &MockServer, page: &str, body: Value, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/widgets"))
        .and(query_param("page", page))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected_calls)
        .mount(server)
        .await;
}

// ============================================================================
// Page Number Pagination
// ============================================================================

#[tokio::test]
async fn test_page_pagination_until_empty_page() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "1", page_body(widgets(0..10)), 1).await;
    mount_page(&mock_server, "2", page_body(widgets(10..20)), 1).await;
    mount_page(&mock_server, "3", page_body(json!([])), 1).await;
    mount_page(&mock_server, "4", page_body(widgets(20..30)), 0).await;

    let client = ApiClient::new(ClientConfig::new(mock_server.uri())).unwrap();
    let mut paginator = client.paginate::<Widget, _, _>(widget_reqgen(&client), is_list, None, None);

    let all = collect_all(&mut paginator).await.unwrap();

    assert_eq!(all.len(), 20);
    assert_eq!(all[19], Widget { id: 19 });
    assert_eq!(paginator.state().page, 4);
    assert_eq!(paginator.state().loaded, 20);
    assert!(paginator.pull().await.unwrap().is_exhausted());
}

#[tokio::test]
async fn test_page_pagination_short_page_with_page_size() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/widgets"))
        .and(query_param("page", "1"))
        .and(query_param("page_size", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(widgets(0..7))))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(ClientConfig::new(mock_server.uri())).unwrap();
    let mut paginator = client.paginate::<Widget, _, _>(
        widget_reqgen(&client),
        is_list,
        Some(PageCursorState::with_page_size(10)),
        None,
    );

    let page = paginator.pull().await.unwrap().into_page().unwrap();
    assert_eq!(page.len(), 7);
    assert!(paginator.state().done);
    assert_eq!(paginator.state().page, 2);
    assert!(paginator.pull().await.unwrap().is_exhausted());
}

#[tokio::test]
async fn test_page_pagination_max_cutoff() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "1", page_body(widgets(0..10)), 1).await;
    mount_page(&mock_server, "2", page_body(widgets(10..20)), 1).await;
    mount_page(&mock_server, "3", page_body(widgets(20..30)), 0).await;

    let client = ApiClient::new(ClientConfig::new(mock_server.uri())).unwrap();
    let mut paginator =
        client.paginate::<Widget, _, _>(widget_reqgen(&client), is_list, None, Some(15));

    let all = collect_all(&mut paginator).await.unwrap();
    assert_eq!(all.len(), 20);
    assert!(paginator.state().done);
}

#[tokio::test]
async fn test_page_pagination_guard_rejection() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "1",
        json!({ "data": { "not": "a list" }, "meta": { "status": 200 } }),
        1,
    )
    .await;

    let client = ApiClient::new(ClientConfig::new(mock_server.uri())).unwrap();
    let mut paginator =
        client.paginate::<Widget, _, _>(widget_reqgen(&client), is_list, None, None);

    let err = paginator.pull().await.unwrap_err();
    assert!(matches!(err, Error::FatalApiFormat { .. }));
    assert!(err.to_string().contains("/widgets?page=1"));
    assert!(!paginator.state().done);
    assert_eq!(paginator.state().page, 1);
}

#[tokio::test]
async fn test_page_pagination_server_error_propagates() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/widgets"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down for maintenance"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(ClientConfig::new(mock_server.uri())).unwrap();
    let mut paginator =
        client.paginate::<Widget, _, _>(widget_reqgen(&client), is_list, None, None);

    let err = paginator.pull().await.unwrap_err();
    assert_eq!(err.status(), Some(503));
    assert!(err.to_string().contains("down for maintenance"));
    assert_eq!(paginator.state().loaded, 0);
}

// ============================================================================
// Token Pagination
// ============================================================================

#[tokio::test]
async fn test_token_pagination_follows_next_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/widgets"))
        .and(query_param_is_missing("page_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body(widgets(0..3), Some("b"))))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/widgets"))
        .and(query_param("page_token", "b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body(widgets(3..5), None)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(ClientConfig::new(mock_server.uri())).unwrap();
    let paginator =
        client.paginate_tokens::<Widget, _, _>(widget_reqgen(&client), is_list, None, None);

    let pages: Vec<_> = into_stream(paginator).collect().await;
    let sizes: Vec<usize> = pages.iter().map(|p| p.as_ref().unwrap().len()).collect();
    assert_eq!(sizes, vec![3, 2]);
}

#[tokio::test]
async fn test_token_pagination_resumes_from_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/widgets"))
        .and(query_param("page_token", "saved"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body(widgets(7..9), None)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(ClientConfig::new(mock_server.uri())).unwrap();
    let mut paginator = client.paginate_tokens::<Widget, _, _>(
        widget_reqgen(&client),
        is_list,
        Some(TokenCursorState::with_page_token("saved")),
        None,
    );

    let all = collect_all(&mut paginator).await.unwrap();
    assert_eq!(all, vec![Widget { id: 7 }, Widget { id: 8 }]);
}

#[tokio::test]
async fn test_token_pagination_malformed_meta() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/widgets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": 1 }],
            "meta": { "status": 200, "next_page_token": { "nested": true } }
        })))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(ClientConfig::new(mock_server.uri())).unwrap();
    let mut paginator =
        client.paginate_tokens::<Widget, _, _>(widget_reqgen(&client), is_list, None, None);

    let err = paginator.pull().await.unwrap_err();
    assert!(matches!(err, Error::FatalApiFormat { .. }));
    assert_eq!(paginator.state(), &TokenCursorState::default());
}

#[tokio::test]
async fn test_token_pagination_no_content_is_rejected_by_list_guard() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/widgets"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(ClientConfig::new(mock_server.uri())).unwrap();
    let mut paginator =
        client.paginate_tokens::<Widget, _, _>(widget_reqgen(&client), is_list, None, None);

    match paginator.pull().await {
        Err(Error::FatalApiFormat { details }) => assert!(details.contains("Response: 204")),
        other => panic!("Expected FatalApiFormat, got {other:?}"),
    }
}

#[tokio::test]
async fn test_pull_after_exhaustion_issues_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/widgets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body(widgets(0..1), None)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(ClientConfig::new(mock_server.uri())).unwrap();
    let mut paginator =
        client.paginate_tokens::<Widget, _, _>(widget_reqgen(&client), is_list, None, None);

    assert!(matches!(paginator.pull().await.unwrap(), Pull::Page(_)));
    let snapshot = paginator.state().clone();
    for _ in 0..3 {
        assert_eq!(paginator.pull().await.unwrap(), Pull::Exhausted);
    }
    assert_eq!(paginator.state(), &snapshot);
}
