//! restservice HTTP Routes
//!
//! - `POST   /restservice`      create a record (id assigned by the server)
//! - `GET    /restservice`      aggregated teacher directory
//! - `GET    /restservice/{id}` read one record
//! - `PATCH  /restservice/{id}` merge fields into a record
//! - `DELETE /restservice/{id}` delete a record
//!
//! `{id}` must be strictly numeric; anything else is answered with 404, the
//! same as an unknown route.

use std::sync::{Arc, LazyLock};

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use regex::Regex;
use serde_json::Value;

use crate::aggregation::AggregationQuery;
use crate::record_store::{Record, RecordId};
use crate::resource::{ModifiedResponse, RecordResource, ResourceError, ResourceResult};

static ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());

// ==================
// Shared State
// ==================

/// State shared across restservice handlers
#[derive(Debug)]
pub struct RestServiceState {
    pub records: RecordResource,
    pub directory: AggregationQuery,
}

impl RestServiceState {
    pub fn new(records: RecordResource, directory: AggregationQuery) -> Self {
        Self { records, directory }
    }
}

// ==================
// Routes
// ==================

/// Create restservice routes
pub fn restservice_routes(state: Arc<RestServiceState>) -> Router {
    Router::new()
        .route("/restservice", get(directory_handler).post(create_handler))
        .route(
            "/restservice/{id}",
            get(get_record_handler)
                .patch(update_handler)
                .delete(delete_handler),
        )
        .with_state(state)
}

/// Parse an `{id}` path segment
pub fn parse_record_id(raw: &str) -> ResourceResult<RecordId> {
    if !ID_PATTERN.is_match(raw) {
        return Err(ResourceError::NotFound);
    }
    raw.parse().map_err(|_| ResourceError::NotFound)
}

// ==================
// Handlers
// ==================

async fn create_handler(
    State(state): State<Arc<RestServiceState>>,
    Json(payload): Json<Value>,
) -> Result<ModifiedResponse, ResourceError> {
    state.records.create(payload)
}

/// The body is the encoded array wrapped in a JSON string
async fn directory_handler(
    State(state): State<Arc<RestServiceState>>,
) -> Result<Json<String>, ResourceError> {
    let encoded = state.directory.execute_encoded()?;
    Ok(Json(encoded))
}

async fn get_record_handler(
    State(state): State<Arc<RestServiceState>>,
    Path(id): Path<String>,
) -> Result<Json<Record>, ResourceError> {
    let id = parse_record_id(&id)?;
    Ok(Json(state.records.get(id)?))
}

async fn update_handler(
    State(state): State<Arc<RestServiceState>>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<ModifiedResponse, ResourceError> {
    let id = parse_record_id(&id)?;
    state.records.update(id, payload)
}

async fn delete_handler(
    State(state): State<Arc<RestServiceState>>,
    Path(id): Path<String>,
) -> Result<ModifiedResponse, ResourceError> {
    let id = parse_record_id(&id)?;
    state.records.delete(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::AggregationSettings;
    use crate::content::{MemoryContentRepository, PublicFileUrlGenerator};
    use crate::record_store::MemoryRecordStore;
    use crate::resource::{IdAllocator, IdStrategy};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn create_test_router() -> Router {
        let records = RecordResource::new(
            Arc::new(MemoryRecordStore::new()),
            IdAllocator::new(IdStrategy::Monotonic),
        );
        let directory = AggregationQuery::new(
            Arc::new(MemoryContentRepository::new()),
            Arc::new(PublicFileUrlGenerator::new("http://localhost", "files")),
            AggregationSettings::default(),
        );
        restservice_routes(Arc::new(RestServiceState::new(records, directory)))
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_parse_record_id() {
        assert_eq!(parse_record_id("42").unwrap(), 42);
        assert_eq!(parse_record_id("007").unwrap(), 7);
        assert!(matches!(parse_record_id("abc"), Err(ResourceError::NotFound)));
        assert!(matches!(parse_record_id("-1"), Err(ResourceError::NotFound)));
        assert!(matches!(parse_record_id("1.5"), Err(ResourceError::NotFound)));
        assert!(matches!(parse_record_id(""), Err(ResourceError::NotFound)));
        assert!(matches!(
            parse_record_id("99999999999999999999999"),
            Err(ResourceError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_create_returns_201() {
        let router = create_test_router();
        let response = router
            .oneshot(json_request("POST", "/restservice", r#"{"name":"A"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_string(response).await, r#"{"name":"A","id":1}"#);
    }

    #[tokio::test]
    async fn test_empty_directory_is_encoded_string() {
        let router = create_test_router();
        let response = router
            .oneshot(Request::get("/restservice").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, r#""[]""#);
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_404() {
        let router = create_test_router();
        let response = router
            .oneshot(json_request("PATCH", "/restservice/abc", r#"{"name":"B"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_string(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_is_404() {
        let router = create_test_router();
        let response = router
            .oneshot(
                Request::delete("/restservice/3")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_non_object_body_is_400() {
        let router = create_test_router();
        let response = router
            .oneshot(json_request("POST", "/restservice", "[1,2]"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["code"], 400);
    }
}
