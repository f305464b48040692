//! Teacher directory aggregation over HTTP, backed by a JSON content fixture.

mod common;

use std::fs;
use std::sync::Arc;

use restservice::aggregation::{AggregationSettings, BrokenReferencePolicy, ProjectedRecord};
use restservice::content::MemoryContentRepository;
use restservice::record_store::MemoryRecordStore;
use restservice::resource::IdStrategy;
use serde_json::{json, Value};
use tempfile::TempDir;

use common::{spawn_test_server, state_with, BASE_URL};

fn fixture() -> Value {
    json!({
        "parents": [
            {
                "id": 10,
                "type": "teachers",
                "references": {"field_teachers": [{"target_id": 101}, {"target_id": 102}]}
            },
            {
                "id": 11,
                "type": "teachers",
                "published": false,
                "references": {"field_teachers": [{"target_id": 103}]}
            },
            {
                "id": 12,
                "type": "article",
                "references": {"field_teachers": [{"target_id": 103}]}
            }
        ],
        "children": [
            {
                "id": 101,
                "fields": {
                    "field_designation": [{"value": "Principal"}],
                    "field_teacher_full_name": [{"value": "Jane Doe"}],
                    "field_twitter_link": [{"uri": "https://twitter.com/jane"}]
                },
                "files": {"field_picture": {"id": 7, "uri": "public://teachers/jane doe.jpg"}}
            },
            {
                "id": 102,
                "fields": {
                    "field_designation": [{"value": "Math"}],
                    "field_teacher_full_name": [{"value": "John Roe"}]
                },
                "files": {"field_picture": {"id": 8, "uri": "public://john.png"}}
            },
            {
                "id": 103,
                "fields": {"field_teacher_full_name": [{"value": "Hidden"}]},
                "files": {"field_picture": {"id": 9, "uri": "public://hidden.png"}}
            }
        ]
    })
}

fn load_fixture(doc: &Value) -> (TempDir, MemoryContentRepository) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("content.json");
    fs::write(&path, serde_json::to_string_pretty(doc).unwrap()).unwrap();
    let repo = MemoryContentRepository::from_fixture(&path).unwrap();
    (temp, repo)
}

async fn fetch_directory(base: &str) -> (u16, Value) {
    let resp = reqwest::get(format!("{}/api/restservice", base)).await.unwrap();
    let status = resp.status().as_u16();
    let body: Value = resp.json().await.unwrap();
    (status, body)
}

async fn spawn_with(repo: MemoryContentRepository, settings: AggregationSettings) -> String {
    spawn_test_server(state_with(
        Arc::new(MemoryRecordStore::new()),
        IdStrategy::Monotonic,
        Arc::new(repo),
        settings,
    ))
    .await
}

#[tokio::test]
async fn directory_flattens_published_teachers_in_order() {
    let (_temp, repo) = load_fixture(&fixture());
    let base = spawn_with(repo, AggregationSettings::default()).await;

    let (status, body) = fetch_directory(&base).await;
    assert_eq!(status, 200);

    let encoded = body.as_str().expect("directory body is a JSON string");
    let rows: Vec<ProjectedRecord> = serde_json::from_str(encoded).unwrap();
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0].field_teacher_full_name, vec![json!({"value": "Jane Doe"})]);
    assert_eq!(rows[0].field_designation, vec![json!({"value": "Principal"})]);
    assert_eq!(
        rows[0].field_twitter_link,
        vec![json!({"uri": "https://twitter.com/jane"})]
    );
    assert!(rows[0].field_facebook_link.is_empty());
    assert!(rows[0].field_instagram_link.is_empty());
    assert_eq!(
        rows[0].field_picture,
        format!("{}/sites/default/files/teachers/jane%20doe.jpg", BASE_URL)
    );

    assert_eq!(rows[1].field_teacher_full_name, vec![json!({"value": "John Roe"})]);
    assert_eq!(
        rows[1].field_picture,
        format!("{}/sites/default/files/john.png", BASE_URL)
    );
}

#[tokio::test]
async fn directory_rows_keep_wire_key_order() {
    let (_temp, repo) = load_fixture(&fixture());
    let base = spawn_with(repo, AggregationSettings::default()).await;

    let (_, body) = fetch_directory(&base).await;
    let encoded = body.as_str().unwrap();
    let first = encoded.find("field_designation").unwrap();
    let facebook = encoded.find("field_facebook_link").unwrap();
    let instagram = encoded.find("field_instagram_link").unwrap();
    let name = encoded.find("field_teacher_full_name").unwrap();
    let twitter = encoded.find("field_twitter_link").unwrap();
    let picture = encoded.find("field_picture").unwrap();
    assert!(first < facebook && facebook < instagram && instagram < name);
    assert!(name < twitter && twitter < picture);
}

#[tokio::test]
async fn unpublished_parents_visible_without_access_check() {
    let (_temp, repo) = load_fixture(&fixture());
    let settings = AggregationSettings {
        access_check: false,
        ..AggregationSettings::default()
    };
    let base = spawn_with(repo, settings).await;

    let (_, body) = fetch_directory(&base).await;
    let rows: Vec<ProjectedRecord> = serde_json::from_str(body.as_str().unwrap()).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2].field_teacher_full_name, vec![json!({"value": "Hidden"})]);
}

#[tokio::test]
async fn empty_repository_yields_encoded_empty_array() {
    let base = spawn_with(MemoryContentRepository::new(), AggregationSettings::default()).await;

    let resp = reqwest::get(format!("{}/api/restservice", base)).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), r#""[]""#);
}

#[tokio::test]
async fn broken_child_reference_follows_policy() {
    let mut doc = fixture();
    doc["parents"][0]["references"]["field_teachers"]
        .as_array_mut()
        .unwrap()
        .insert(1, json!({"target_id": 999}));

    let (_temp, repo) = load_fixture(&doc);
    let base = spawn_with(repo.clone(), AggregationSettings::default()).await;
    let (status, body) = fetch_directory(&base).await;
    assert_eq!(status, 200);
    let rows: Vec<ProjectedRecord> = serde_json::from_str(body.as_str().unwrap()).unwrap();
    assert_eq!(rows.len(), 2);

    let settings = AggregationSettings {
        broken_references: BrokenReferencePolicy::Fail,
        ..AggregationSettings::default()
    };
    let base = spawn_with(repo, settings).await;
    let (status, body) = fetch_directory(&base).await;
    assert_eq!(status, 502);
    assert_eq!(body["code"], 502);
    assert!(body["error"].as_str().unwrap().contains("999"));
}

#[tokio::test]
async fn directory_does_not_touch_records() {
    let (_temp, repo) = load_fixture(&fixture());
    let base = spawn_with(repo, AggregationSettings::default()).await;
    let client = reqwest::Client::new();

    client
        .post(format!("{}/api/restservice", base))
        .json(&json!({"field_teacher_full_name": "Not a teacher"}))
        .send()
        .await
        .unwrap();

    let (_, body) = fetch_directory(&base).await;
    let rows: Vec<ProjectedRecord> = serde_json::from_str(body.as_str().unwrap()).unwrap();
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn picture_schemes_resolve_or_follow_policy() {
    let mut doc = fixture();
    doc["children"][0]["files"]["field_picture"]["uri"] = json!("private://staff/jane.jpg");
    doc["children"][1]["files"]["field_picture"]["uri"] = json!("temporary://john.png");

    let (_temp, repo) = load_fixture(&doc);
    let base = spawn_with(repo.clone(), AggregationSettings::default()).await;
    let (status, body) = fetch_directory(&base).await;
    assert_eq!(status, 200);
    let rows: Vec<ProjectedRecord> = serde_json::from_str(body.as_str().unwrap()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].field_picture, format!("{}/system/files/staff/jane.jpg", BASE_URL));

    let settings = AggregationSettings {
        broken_references: BrokenReferencePolicy::Fail,
        ..AggregationSettings::default()
    };
    let base = spawn_with(repo, settings).await;
    let (status, body) = fetch_directory(&base).await;
    assert_eq!(status, 502);
    assert!(body["error"].as_str().unwrap().contains("temporary://john.png"));
}
