use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{HeaderMap, Request, StatusCode},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use shambala_backend::cms::client::{CmsError, ContentfulClient, EntryQuery};
use shambala_backend::cms::queries::fetch_home_hero;
use shambala_backend::config::{Config, ContentfulConfig};
use shambala_backend::{api_router, app, AppState};
use tokio::net::TcpListener;
use tower::ServiceExt;

#[derive(Default)]
struct StubState {
    /// Status to answer with instead of the page collection.
    fail_with: Option<StatusCode>,
    pages: HashMap<String, Value>,
    seen: Mutex<Vec<(String, HashMap<String, String>, Option<String>)>>,
}

fn link(link_type: &str, id: &str) -> Value {
    json!({"sys": {"type": "Link", "linkType": link_type, "id": id}})
}

fn home_collection() -> Value {
    json!({
        "items": [{
            "sys": {"id": "page-home", "contentType": {"sys": {"id": "page"}}},
            "fields": {"title": "Home", "slug": "home", "hero": link("Entry", "hero")}
        }],
        "includes": {
            "Entry": [
                {
                    "sys": {"id": "hero", "contentType": {"sys": {"id": "heroSection"}}},
                    "fields": {
                        "mainTitle": ["we", "build"],
                        "typedTexts": ["green roofs", "quiet courtyards"],
                        "ctaText": "Talk to us",
                        "ctaLink": "/contact",
                        "backgroundImage": link("Asset", "bg"),
                        "serviceBoxes": [link("Entry", "box-b"), link("Entry", "box-a"), link("Entry", "box-gone")]
                    }
                },
                {
                    "sys": {"id": "box-a", "contentType": {"sys": {"id": "serviceBox"}}},
                    "fields": {"id": 1, "index": 0, "title": "Design", "image": link("Asset", "img-a")}
                },
                {
                    "sys": {"id": "box-b", "contentType": {"sys": {"id": "serviceBox"}}},
                    "fields": {"id": 2, "index": 1, "title": "Build", "description": "Hardscaping", "image": link("Asset", "img-b")}
                }
            ],
            "Asset": [
                {"sys": {"id": "bg"}, "fields": {"file": {"url": "//images.ctfassets.net/s/bg.jpg"}}},
                {"sys": {"id": "img-a"}, "fields": {"file": {"url": "//images.ctfassets.net/s/a.jpg"}}},
                {"sys": {"id": "img-b"}, "fields": {"file": {"url": "//images.ctfassets.net/s/b.jpg"}}}
            ]
        }
    })
}

async fn stub_entries(
    State(stub): State<Arc<StubState>>,
    Path((space, env)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    stub.seen
        .lock()
        .unwrap()
        .push((format!("{}/{}", space, env), params.clone(), auth));

    if let Some(status) = stub.fail_with {
        return (status, Json(json!({"message": "boom"}))).into_response();
    }

    let slug = params.get("fields.slug").cloned().unwrap_or_default();
    let body = stub
        .pages
        .get(&slug)
        .cloned()
        .unwrap_or_else(|| json!({"items": [], "includes": {}}));
    Json(body).into_response()
}

async fn start_stub(stub: StubState) -> (String, Arc<StubState>) {
    let stub = Arc::new(stub);
    let router = Router::new()
        .route(
            "/spaces/{space}/environments/{env}/entries",
            get(stub_entries),
        )
        .with_state(stub.clone());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (format!("http://{}", addr), stub)
}

fn contentful_config(base_url: String) -> ContentfulConfig {
    ContentfulConfig {
        space_id: "space1".to_string(),
        environment_id: "master".to_string(),
        access_token: "secret-token".to_string(),
        base_url,
    }
}

fn config_for(base_url: String, static_dir: String) -> Config {
    Config {
        contentful: contentful_config(base_url),
        port: 0,
        frontend_url: "http://localhost:8080".to_string(),
        static_dir,
    }
}

fn app_for(base_url: String) -> Router {
    let config = config_for(base_url, "dist".to_string());
    api_router(Arc::new(AppState::new(&config)))
}

/// Full app over a throwaway dist directory holding an index page and one asset.
fn full_app(name: &str) -> (Router, std::path::PathBuf) {
    let dist = std::env::temp_dir().join(format!("shambala-dist-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dist).unwrap();
    std::fs::write(dist.join("index.html"), "<html>shell</html>").unwrap();
    std::fs::write(dist.join("app.js"), "console.log(1)").unwrap();
    let config = config_for(
        "http://127.0.0.1:9".to_string(),
        dist.to_string_lossy().into_owned(),
    );
    (app(Arc::new(AppState::new(&config)), &config), dist)
}

async fn get_text(app: Router, request: Request<Body>) -> (StatusCode, HeaderMap, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, String::from_utf8_lossy(&bytes).into_owned())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn stub_with_home() -> StubState {
    let mut pages = HashMap::new();
    pages.insert("home".to_string(), home_collection());
    StubState {
        pages,
        ..Default::default()
    }
}

#[tokio::test]
async fn fetcher_issues_one_expanded_query() {
    let (base, stub) = start_stub(stub_with_home()).await;
    let client = ContentfulClient::new(&contentful_config(base));

    let hero = fetch_home_hero(&client, "home").await.unwrap().unwrap();
    assert_eq!(hero.cta_text.as_deref(), Some("Talk to us"));

    let seen = stub.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let (path, params, auth) = &seen[0];
    assert_eq!(path, "space1/master");
    assert_eq!(params.get("content_type").map(String::as_str), Some("page"));
    assert_eq!(params.get("fields.slug").map(String::as_str), Some("home"));
    assert_eq!(params.get("include").map(String::as_str), Some("2"));
    assert_eq!(params.get("limit").map(String::as_str), Some("1"));
    assert_eq!(auth.as_deref(), Some("Bearer secret-token"));
}

#[tokio::test]
async fn get_entries_resolves_links() {
    let (base, _stub) = start_stub(stub_with_home()).await;
    let client = ContentfulClient::new(&contentful_config(base));
    let items = client
        .get_entries(&EntryQuery::content_type("page").field("slug", "home"))
        .await
        .unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(
        items[0].pointer("/fields/hero/fields/serviceBoxes/1/fields/title"),
        Some(&json!("Design"))
    );
    // box-gone has no target in includes
    assert_eq!(
        items[0].pointer("/fields/hero/fields/serviceBoxes/2/sys/type"),
        Some(&json!("Link"))
    );
}

#[tokio::test]
async fn home_endpoint_returns_mapped_hero() {
    let (base, _stub) = start_stub(stub_with_home()).await;
    let (status, body) = get_json(app_for(base), "/api/home").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mainTitle"], json!(["we", "build"]));
    assert_eq!(body["typedTexts"], json!(["green roofs", "quiet courtyards"]));
    assert_eq!(body["ctaLink"], "/contact");
    assert!(body.get("description").is_none());
    assert_eq!(
        body["backgroundImage"],
        "https://images.ctfassets.net/s/bg.jpg?w=600&q=70&fm=webp"
    );

    let boxes = body["serviceBoxes"].as_array().unwrap();
    assert_eq!(boxes.len(), 2);
    assert_eq!(boxes[0]["title"], "Design");
    assert_eq!(boxes[0]["description"], "");
    assert_eq!(boxes[1]["title"], "Build");
    assert_eq!(
        boxes[1]["imageSmall"],
        "https://images.ctfassets.net/s/b.jpg?w=40&q=20&fm=jpg"
    );
    assert_eq!(
        boxes[1]["fullImage"],
        "https://images.ctfassets.net/s/b.jpg?w=1600&q=80&fm=webp"
    );
}

#[tokio::test]
async fn unknown_slug_is_not_found() {
    let (base, stub) = start_stub(stub_with_home()).await;
    let (status, body) = get_json(app_for(base), "/api/home?slug=about").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("about"));
    assert_eq!(stub.seen.lock().unwrap()[0].1.get("fields.slug").unwrap(), "about");
}

#[tokio::test]
async fn page_without_hero_is_not_found() {
    let mut pages = HashMap::new();
    pages.insert(
        "home".to_string(),
        json!({"items": [{"sys": {"id": "p"}, "fields": {"slug": "home"}}]}),
    );
    let (base, _stub) = start_stub(StubState {
        pages,
        ..Default::default()
    })
    .await;
    let (status, _) = get_json(app_for(base), "/api/home").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn upstream_failure_is_bad_gateway() {
    let (base, _stub) = start_stub(StubState {
        fail_with: Some(StatusCode::UNAUTHORIZED),
        ..Default::default()
    })
    .await;
    let (status, body) = get_json(app_for(base.clone()), "/api/home").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "Failed to load content");

    let client = ContentfulClient::new(&contentful_config(base));
    let err = fetch_home_hero(&client, "home").await.unwrap_err();
    assert!(matches!(err, CmsError::Status { status: 401, .. }));
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ContentfulClient::new(&contentful_config(format!("http://{}", addr)));
    let err = fetch_home_hero(&client, "home").await.unwrap_err();
    assert!(matches!(err, CmsError::Transport(_)));
}

#[tokio::test]
async fn health_check_answers_ok() {
    let response = app_for("http://127.0.0.1:9".to_string())
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn client_side_routes_get_the_app_shell() {
    let (app, dist) = full_app("routes");

    let (status, _, body) = get_text(
        app.clone(),
        Request::builder().uri("/").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "<html>shell</html>");

    let (status, _, body) = get_text(
        app.clone(),
        Request::builder().uri("/services/gardens").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "<html>shell</html>");

    let (status, _, body) = get_text(
        app,
        Request::builder().uri("/app.js").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "console.log(1)");

    std::fs::remove_dir_all(dist).ok();
}

#[tokio::test]
async fn cors_allows_only_the_frontend_origin() {
    let (app, dist) = full_app("cors");

    let (_, headers, _) = get_text(
        app.clone(),
        Request::builder()
            .uri("/api/health")
            .header("origin", "http://localhost:8080")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(
        headers
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:8080")
    );

    let (status, headers, _) = get_text(
        app,
        Request::builder()
            .uri("/api/health")
            .header("origin", "https://elsewhere.example")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers.get("access-control-allow-origin").is_none());

    std::fs::remove_dir_all(dist).ok();
}
