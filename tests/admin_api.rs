//! Admin HTTP API integration tests

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use soulframe_atlas::admin::{admin_router, AccessPolicy, AdminState, DataStore};
use soulframe_atlas::core::config::AccessConfig;
use tempfile::TempDir;
use tower::ServiceExt;

const BODY_LIMIT: usize = 1024 * 1024;

fn app_with(access: AccessPolicy) -> (TempDir, Router) {
    let dir = tempfile::tempdir().unwrap();
    let store = DataStore::new(dir.path(), dir.path().join("backups"));
    std::fs::create_dir_all(dir.path().join("backups")).unwrap();
    let router = admin_router(AdminState::new(store, access, BODY_LIMIT));
    (dir, router)
}

fn app() -> (TempDir, Router) {
    app_with(AccessPolicy::open())
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), BODY_LIMIT).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let (_dir, app) = app();
    let (status, body) = send(&app, get("/api/admin/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_unknown_endpoint() {
    let (_dir, app) = app();
    let (status, body) = send(&app, get("/api/admin/nothing")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "success": false, "error": "Endpoint not found" }));
}

#[tokio::test]
async fn test_read_errors() {
    let (_dir, app) = app();

    let (status, body) = send(&app, get("/api/admin/data/read")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, _) = send(&app, get("/api/admin/data/read?name=..%2Fsecret.json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, get("/api/admin/data/read?name=ghost.json")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("ghost.json"));
}

#[tokio::test]
async fn test_save_read_and_list() {
    let (_dir, app) = app();

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/admin/data/save",
            json!({ "name": "weapons", "content": [{"id": "oathblade"}, {"id": "stiletto"}] }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "File weapons.json created successfully");
    assert!(body["backup"].is_null());

    let (status, body) = send(&app, get("/api/admin/data/read?name=weapons.json")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "weapons.json");
    assert_eq!(body["content"][1]["id"], "stiletto");
    assert_eq!(body["meta"], json!({ "isArray": true, "itemCount": 2 }));

    // content sent as a string is stored as-is
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/admin/data/save",
            json!({ "name": "weapons.json", "content": "[{\"id\": \"oathblade\"}]" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "File weapons.json saved successfully");
    assert!(body["backup"].as_str().unwrap().starts_with("weapons.json.bak-"));

    let (status, body) = send(&app, get("/api/admin/data/list")).await;
    assert_eq!(status, StatusCode::OK);
    let files = body["files"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["name"], "weapons.json");
    assert_eq!(files[0]["recordCount"], 1);
}

#[tokio::test]
async fn test_save_validation() {
    let (_dir, app) = app();

    let (status, _) = send(&app, json_request("POST", "/api/admin/data/save", json!({ "name": "a.json" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        json_request("POST", "/api/admin/data/save", json!({ "name": "a.json", "content": "{nope" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON"));

    let (status, _) = send(
        &app,
        json_request("POST", "/api/admin/data/save", json!({ "name": "sub/a.json", "content": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_json_then_conflict() {
    let (_dir, app) = app();
    let upload = json!({ "name": "pacts.json", "content": [{"id": "warden"}] });

    let (status, body) = send(&app, json_request("POST", "/api/admin/data/upload", upload.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "pacts.json");

    let (status, body) = send(&app, json_request("POST", "/api/admin/data/upload", upload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_upload_multipart() {
    let (dir, app) = app();
    let boundary = "atlasboundary";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"lore.json\"\r\nContent-Type: application/json\r\n\r\n{{\"items\": [1, 2, 3]}}\r\n--{b}--\r\n",
        b = boundary
    );
    let request = Request::builder()
        .method("POST")
        .uri("/api/admin/data/upload")
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={}", boundary))
        .body(Body::from(body))
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["name"], "lore.json");
    assert!(dir.path().join("lore.json").exists());
}

#[tokio::test]
async fn test_upload_unsupported_content_type() {
    let (_dir, app) = app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/admin/data/upload")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("hello"))
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_by_query_and_body() {
    let (dir, app) = app();
    std::fs::write(dir.path().join("a.json"), "[]").unwrap();
    std::fs::write(dir.path().join("b.json"), "{}").unwrap();

    let request = Request::builder()
        .method("DELETE")
        .uri("/api/admin/data/delete?name=a.json")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["backup"].as_str().unwrap().starts_with("a.json.bak-"));
    assert!(!dir.path().join("a.json").exists());

    let (status, _) = send(&app, json_request("DELETE", "/api/admin/data/delete", json!({ "name": "b" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!dir.path().join("b.json").exists());

    let (status, _) = send(&app, json_request("DELETE", "/api/admin/data/delete", json!({ "name": "b.json" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_access_check_guards_writes_only() {
    let access = AccessPolicy::from_config(&AccessConfig {
        enabled: true,
        ..Default::default()
    });
    let (_dir, app) = app_with(access);
    let save = || json_request("POST", "/api/admin/data/save", json!({ "name": "a.json", "content": [] }));

    let (status, body) = send(&app, save()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);

    let mut request = save();
    request
        .headers_mut()
        .insert("cf-access-jwt-assertion", "token".parse().unwrap());
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, get("/api/admin/data/list")).await;
    assert_eq!(status, StatusCode::OK);
}
