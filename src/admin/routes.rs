//! Admin HTTP API
//!
//! - `GET    /api/admin/health`
//! - `GET    /api/admin/data/list`
//! - `GET    /api/admin/data/read?name=`
//! - `POST   /api/admin/data/save`      `{name, content}`
//! - `POST   /api/admin/data/upload`    JSON `{name, content}` or multipart `file` (+ `name`)
//! - `DELETE /api/admin/data/delete`    `?name=` or `{name}`
//!
//! Write endpoints go through the [`AccessPolicy`]. Errors are returned as
//! `{"success": false, "error": ...}` with a matching status code.

use crate::admin::access::AccessPolicy;
use crate::admin::content::pretty_json;
use crate::admin::filename::DataFileName;
use crate::admin::store::DataStore;
use crate::core::config::AtlasConfig;
use crate::core::error::{AtlasError, Result};
use axum::body::{Body, Bytes};
use axum::extract::{DefaultBodyLimit, FromRequest, Multipart, Query, Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared handler state
#[derive(Clone)]
pub struct AdminState {
    pub store: Arc<DataStore>,
    pub access: Arc<AccessPolicy>,
    pub max_body_bytes: usize,
}

impl AdminState {
    pub fn new(store: DataStore, access: AccessPolicy, max_body_bytes: usize) -> Self {
        Self {
            store: Arc::new(store),
            access: Arc::new(access),
            max_body_bytes,
        }
    }

    pub fn from_config(config: &AtlasConfig) -> Self {
        Self::new(
            DataStore::from_config(&config.data),
            AccessPolicy::from_config(&config.access),
            config.server.max_body_bytes,
        )
    }
}

impl AtlasError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AtlasError::InvalidFilename(_)
            | AtlasError::InvalidJson(_)
            | AtlasError::MissingField(_)
            | AtlasError::UnsupportedContentType(_)
            | AtlasError::SerdeError(_) => StatusCode::BAD_REQUEST,
            AtlasError::FileNotFound(_) => StatusCode::NOT_FOUND,
            AtlasError::FileExists(_) => StatusCode::CONFLICT,
            AtlasError::Unauthorized(_) => StatusCode::FORBIDDEN,
            AtlasError::IoError(_) | AtlasError::Config(_) | AtlasError::TomlError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AtlasError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Admin request failed: {}", self);
        }
        (status, Json(json!({ "success": false, "error": self.to_string() }))).into_response()
    }
}

/// Build the admin router
pub fn admin_router(state: AdminState) -> Router {
    let body_limit = state.max_body_bytes;
    Router::new()
        .route("/api/admin/health", get(health))
        .route("/api/admin/data/list", get(list_files))
        .route("/api/admin/data/read", get(read_file))
        .route("/api/admin/data/save", post(save_file))
        .route("/api/admin/data/upload", post(upload_file))
        .route("/api/admin/data/delete", delete(delete_file))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
struct NameQuery {
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct WriteRequest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    content: Option<Value>,
}

/// JSON content as text: strings pass through, other values are pretty-printed
fn content_text(content: Option<Value>) -> Result<Option<String>> {
    match content {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => pretty_json(&other).map(Some),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_write_body(body: &[u8]) -> Result<WriteRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(WriteRequest::default());
    }
    Ok(serde_json::from_slice(body)?)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "timestamp": Utc::now().to_rfc3339() }))
}

async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "success": false, "error": "Endpoint not found" })),
    )
        .into_response()
}

async fn list_files(State(state): State<AdminState>) -> Result<Json<Value>> {
    let files = state.store.list().await?;
    Ok(Json(json!({ "success": true, "files": files })))
}

async fn read_file(
    State(state): State<AdminState>,
    Query(query): Query<NameQuery>,
) -> Result<Json<Value>> {
    let raw = non_empty(query.name).ok_or_else(|| AtlasError::MissingField("filename parameter".into()))?;
    let name = DataFileName::normalize(&raw)?;
    let doc = state.store.read(&name).await?;

    Ok(Json(json!({
        "success": true,
        "name": name,
        "content": doc.parsed,
        "meta": { "isArray": doc.is_array, "itemCount": doc.item_count },
    })))
}

async fn save_file(
    State(state): State<AdminState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>> {
    state.access.authorize(&headers)?;

    let request = parse_write_body(&body)?;
    let (Some(raw_name), Some(content)) = (non_empty(request.name), content_text(request.content)?) else {
        return Err(AtlasError::MissingField("name or content".into()));
    };
    let name = DataFileName::normalize(&raw_name)?;

    let outcome = state.store.save(&name, &content).await?;
    let verb = if outcome.created { "created" } else { "saved" };

    Ok(Json(json!({
        "success": true,
        "message": format!("File {} {} successfully", name, verb),
        "backup": outcome.backup,
    })))
}

async fn upload_file(
    State(state): State<AdminState>,
    headers: HeaderMap,
    request: Request,
) -> Result<Json<Value>> {
    state.access.authorize(&headers)?;

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_lowercase();

    let (raw_name, content) = if content_type.starts_with("application/json") {
        let body = axum::body::to_bytes(request.into_body(), state.max_body_bytes)
            .await
            .map_err(|e| AtlasError::InvalidJson(format!("Could not read body: {}", e)))?;
        let upload = parse_write_body(&body)?;
        (non_empty(upload.name), content_text(upload.content)?)
    } else if content_type.starts_with("multipart/form-data") {
        read_multipart(Multipart::from_request(request, &state).await.map_err(|e| {
            AtlasError::InvalidJson(format!("Invalid multipart body: {}", e))
        })?)
        .await?
    } else {
        return Err(AtlasError::UnsupportedContentType(if content_type.is_empty() {
            "none".to_string()
        } else {
            content_type
        }));
    };

    let (Some(raw_name), Some(content)) = (raw_name, content) else {
        return Err(AtlasError::MissingField("file or JSON data".into()));
    };
    let name = DataFileName::normalize(&raw_name)?;
    state.store.upload(&name, &content).await?;

    Ok(Json(json!({
        "success": true,
        "message": format!("File {} uploaded successfully", name),
        "name": name,
    })))
}

/// Pull `name` and `file` out of a multipart upload; the file's own name is
/// used when no explicit `name` field is sent
async fn read_multipart(mut multipart: Multipart) -> Result<(Option<String>, Option<String>)> {
    let mut name = None;
    let mut file_name = None;
    let mut content = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AtlasError::InvalidJson(format!("Invalid multipart body: {}", e)))?
    {
        match field.name() {
            Some("name") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AtlasError::InvalidJson(format!("Invalid name field: {}", e)))?;
                name = non_empty(Some(text));
            }
            Some("file") => {
                file_name = field.file_name().map(str::to_string);
                let text = field
                    .text()
                    .await
                    .map_err(|e| AtlasError::InvalidJson(format!("Invalid file field: {}", e)))?;
                content = Some(text).filter(|t| !t.is_empty());
            }
            _ => {}
        }
    }

    Ok((name.or(non_empty(file_name)), content))
}

async fn delete_file(
    State(state): State<AdminState>,
    headers: HeaderMap,
    Query(query): Query<NameQuery>,
    body: Body,
) -> Result<Json<Value>> {
    state.access.authorize(&headers)?;

    let raw_name = match non_empty(query.name) {
        Some(name) => name,
        None => {
            let bytes = axum::body::to_bytes(body, state.max_body_bytes)
                .await
                .map_err(|e| AtlasError::InvalidJson(format!("Could not read body: {}", e)))?;
            non_empty(parse_write_body(&bytes)?.name).ok_or_else(|| AtlasError::MissingField("name".into()))?
        }
    };
    let name = DataFileName::normalize(&raw_name)?;
    let backup = state.store.delete(&name).await?;

    Ok(Json(json!({
        "success": true,
        "message": format!("File {} deleted successfully", name),
        "backup": backup,
    })))
}
