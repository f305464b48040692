#![allow(dead_code)]

use std::sync::Arc;

use restservice::aggregation::{AggregationQuery, AggregationSettings};
use restservice::content::{ContentRepository, MemoryContentRepository, PublicFileUrlGenerator};
use restservice::http_server::{build_router, HttpServerConfig, RestServiceState};
use restservice::record_store::{MemoryRecordStore, RecordStore};
use restservice::resource::{IdAllocator, IdStrategy, RecordResource};

pub const BASE_URL: &str = "https://school.example.com";

pub fn state_with(
    store: Arc<dyn RecordStore>,
    strategy: IdStrategy,
    content: Arc<dyn ContentRepository>,
    settings: AggregationSettings,
) -> Arc<RestServiceState> {
    Arc::new(RestServiceState::new(
        RecordResource::new(store, IdAllocator::new(strategy)),
        AggregationQuery::new(
            content,
            Arc::new(PublicFileUrlGenerator::new(BASE_URL, "sites/default/files")),
            settings,
        ),
    ))
}

pub fn empty_state() -> Arc<RestServiceState> {
    state_with(
        Arc::new(MemoryRecordStore::new()),
        IdStrategy::Monotonic,
        Arc::new(MemoryContentRepository::new()),
        AggregationSettings::default(),
    )
}

/// Spin up the HTTP server on an OS-assigned port, returning the base URL.
pub async fn spawn_test_server(state: Arc<RestServiceState>) -> String {
    let app = build_router(&HttpServerConfig::default(), state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://127.0.0.1:{}", port)
}
