//! End-to-end tests of the HTTP API against mocked provider upstreams

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use omnisearch::{
    metrics::Metrics,
    network::HttpClient,
    providers::ProviderLoader,
    web::{create_router, AppState},
    Search, Settings,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Router whose providers all point at `server`; the dataset provider is off
fn app(server: &MockServer) -> Router {
    let mut settings = Settings::default();
    settings.history.enabled = false;
    for provider in &mut settings.providers {
        provider.base_url = Some(server.uri());
        provider.api_key = Some("test-key".to_string());
        provider.username = Some("tester".to_string());
        provider.disabled = provider.provider == "kaggle";
    }

    let client = HttpClient::with_settings(&settings.outgoing).unwrap();
    let metrics = Arc::new(Metrics::new());
    let registry = ProviderLoader::load(&settings, &client, Some(metrics.clone())).unwrap();
    let search = Search::new(Arc::new(registry), settings.search.clone()).with_metrics(metrics.clone());

    create_router(AppState::new(settings, search, Some(metrics)))
}

async fn mount_upstreams(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .and(query_param("q", "transformer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 1,
            "items": [{
                "id": 155220641,
                "full_name": "huggingface/transformers",
                "html_url": "https://github.com/huggingface/transformers",
                "description": "State-of-the-art Transformers for PyTorch",
                "language": "Python",
                "stargazers_count": 120000,
                "forks_count": 24000,
                "updated_at": "2024-01-01T00:00:00Z",
                "owner": {"login": "huggingface", "avatar_url": "https://avatars.example/hf.png"}
            }]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/youtube/v3/search"))
        .respond_with(ResponseTemplate::new(429))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/graph/v1/paper/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 1,
            "data": [{
                "paperId": "204e3073870fae3d05bcbc2f6a8e263d9b72e776",
                "title": "Attention Is All You Need",
                "abstract": "We propose the Transformer, a simple network architecture.",
                "authors": [{"name": "Ashish Vaswani"}],
                "year": 2017,
                "citationCount": 100000,
                "url": "https://www.semanticscholar.org/paper/204e"
            }]
        })))
        .mount(server)
        .await;
}

async fn post_search(app: Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/search/universal")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_universal_search_survives_failing_provider() {
    let server = MockServer::start().await;
    mount_upstreams(&server).await;

    let (status, body) = post_search(
        app(&server),
        json!({"query": "transformer", "content_types": ["code", "videos", "papers"], "limit": 10}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query"], "transformer");
    assert_eq!(body["total_results"], 2);

    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    // Title and description both match for the repository, only the abstract for the paper
    assert_eq!(results[0]["source_type"], "code");
    assert_eq!(results[0]["relevance_score"], 1.5);
    assert_eq!(results[0]["thumbnail_url"], "https://avatars.example/hf.png");
    assert_eq!(results[1]["source_type"], "paper");
    assert_eq!(results[1]["relevance_score"], 0.5);

    let by_type = body["results_by_type"].as_object().unwrap();
    assert_eq!(by_type.len(), 3);
    assert_eq!(by_type["code"].as_array().unwrap().len(), 1);
    assert_eq!(by_type["videos"], json!([]));
    assert_eq!(by_type["papers"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unregistered_category_is_omitted() {
    let server = MockServer::start().await;
    mount_upstreams(&server).await;

    let (status, body) = post_search(
        app(&server),
        json!({"query": "transformer", "content_types": ["datasets", "papers"]}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let by_type = body["results_by_type"].as_object().unwrap();
    assert_eq!(by_type.keys().collect::<Vec<_>>(), vec!["papers"]);
}

#[tokio::test]
async fn test_validation_errors_are_unprocessable() {
    let server = MockServer::start().await;

    for body in [
        json!({"query": "rust", "limit": 0}),
        json!({"query": "rust", "limit": -3}),
        json!({"query": "   "}),
        json!({"query": "rust", "content_types": []}),
        json!({"limit": 5}),
    ] {
        let (status, response) = post_search(app(&server), body).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(response["detail"].is_string());
    }

    // Rejected before any upstream is contacted
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_only_unresolvable_categories_is_empty_success() {
    let server = MockServer::start().await;

    for content_types in [json!(["datasets"]), json!(["music", "podcasts"])] {
        let (status, body) = post_search(
            app(&server),
            json!({"query": "transformer", "content_types": content_types}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_results"], 0);
        assert_eq!(body["results"], json!([]));
        assert_eq!(body["results_by_type"], json!({}));
    }

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_limit_above_provider_cap_is_accepted() {
    let server = MockServer::start().await;
    mount_upstreams(&server).await;

    let (status, body) = post_search(
        app(&server),
        json!({"query": "transformer", "content_types": ["code"], "limit": 1000}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_results"], 1);

    // Upstream volume stays within the provider's page size
    let requests = server.received_requests().await.unwrap();
    let per_page = requests[0]
        .url
        .query_pairs()
        .find(|(key, _)| key == "per_page")
        .map(|(_, value)| value.to_string());
    assert_eq!(per_page.as_deref(), Some("100"));
}

#[tokio::test]
async fn test_transformer_ranking_truncates_globally_only() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "id": 1,
                "full_name": "acme/transformer-lib",
                "html_url": "https://github.com/acme/transformer-lib",
                "description": "..."
            }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/graph/v1/paper/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"paperId": "p1", "title": "Attention is all you need", "abstract": "transformer architecture"},
                {"paperId": "p2", "title": "unrelated", "abstract": "no match"}
            ]
        })))
        .mount(&server)
        .await;

    let (status, body) = post_search(
        app(&server),
        json!({"query": "transformer", "content_types": ["code", "papers"], "limit": 2}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_results"], 3);

    let titles: Vec<&str> = body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["acme/transformer-lib", "Attention is all you need"]);
    assert!(body["results"][1]["relevance_score"].as_f64().unwrap() > 0.0);

    let papers = body["results_by_type"]["papers"].as_array().unwrap();
    assert_eq!(papers.len(), 2);
    assert_eq!(papers[1]["title"], "unrelated");
    assert_eq!(papers[1]["relevance_score"], 0.0);
}

#[tokio::test]
async fn test_service_endpoints() {
    let server = MockServer::start().await;

    let (status, body) = get(app(&server), "/api/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().starts_with("OmniSearch API"));

    let (status, body) = get(app(&server), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["providers"]["papers"], "semantic scholar");
    assert!(body["providers"].get("datasets").is_none());
}

#[tokio::test]
async fn test_stats_reflect_provider_outcomes() {
    let server = MockServer::start().await;
    mount_upstreams(&server).await;
    let app = app(&server);

    let (status, _) = post_search(app.clone(), json!({"query": "transformer"})).await;
    assert_eq!(status, StatusCode::OK);

    let (status, stats) = get(app, "/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_searches"], 1);
    assert_eq!(stats["providers"]["github"]["successes"], 1);
    assert_eq!(stats["providers"]["youtube"]["errors"]["too_many_requests"], 1);
}
