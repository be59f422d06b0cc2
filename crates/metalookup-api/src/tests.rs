use super::router;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use metalookup_common::{Metadata, MetadataId};
use metalookup_service::{CachePolicy, LookupService};
use metalookup_store::{InMemoryMetadataStore, MetadataStore};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

fn app_with(store: Arc<dyn MetadataStore>) -> Router {
    router(Arc::new(LookupService::new(store)))
}

fn seeded_store() -> (Arc<dyn MetadataStore>, MetadataId) {
    let store: Arc<dyn MetadataStore> = Arc::new(InMemoryMetadataStore::new());
    let first = store
        .save(
            Metadata::builder()
                .group("mygroup")
                .name("myconfig")
                .value("key1", "value1")
                .value("key2", ["One", "Two", "Three"])
                .build()
                .unwrap(),
        )
        .unwrap();
    store
        .save(
            Metadata::builder()
                .group("mygroup")
                .name("myconfig2")
                .value("key3", "value3")
                .build()
                .unwrap(),
        )
        .unwrap();
    (store, first.id.unwrap())
}

async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .header(header::ACCEPT, "application/json")
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn cache_control(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(header::CACHE_CONTROL)
        .and_then(|v| v.to_str().ok())
}

fn assert_first_config(json: &Value) {
    assert_eq!(json["group"], "mygroup");
    assert_eq!(json["name"], "myconfig");
    assert_eq!(json["value"]["key1"], "value1");
    assert_eq!(
        json["value"]["key2"],
        serde_json::json!(["One", "Two", "Three"])
    );
}

#[tokio::test]
async fn returns_requested_config_for_group_and_name() {
    let (store, id) = seeded_store();
    let response = get(app_with(store), "/metadata/mygroup/myconfig").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(cache_control(&response), Some("max-age=3600, public"));
    let json = json_body(response).await;
    assert_eq!(json["id"], id.to_string());
    assert_first_config(&json);
}

#[tokio::test]
async fn returns_config_for_id() {
    let (store, id) = seeded_store();
    let response = get(app_with(store), &format!("/metadata/{id}")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(cache_control(&response), Some("max-age=3600, public"));
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    let json = json_body(response).await;
    assert_eq!(json["id"], id.to_string());
    assert_first_config(&json);
}

#[tokio::test]
async fn returns_404_when_group_and_name_missing() {
    let app = app_with(Arc::new(InMemoryMetadataStore::new()));
    let response = get(app, "/metadata/mygroup/myconfig").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(cache_control(&response), None);
    let json = json_body(response).await;
    assert_eq!(
        json["message"],
        "Requested metadata entity having id mygroup:myconfig does not exists in the system."
    );
}

#[tokio::test]
async fn returns_404_when_id_missing() {
    let app = app_with(Arc::new(InMemoryMetadataStore::new()));
    let response = get(app, "/metadata/507f1f77bcf86cd799439011").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(cache_control(&response), None);
    let json = json_body(response).await;
    assert_eq!(
        json["message"],
        "Requested metadata entity having id 507f1f77bcf86cd799439011 does not exists in the system."
    );
}

#[tokio::test]
async fn returns_404_for_well_formed_unknown_id() {
    let (store, _) = seeded_store();
    let id = MetadataId::new();
    let response = get(app_with(store), &format!("/metadata/{id}")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(cache_control(&response), None);
    let json = json_body(response).await;
    assert!(json["message"].as_str().unwrap().contains(&id.to_string()));
}

#[tokio::test]
async fn returns_all_configs_for_group_in_save_order() {
    let (store, _) = seeded_store();
    let response = get(app_with(store), "/metadata/groups/mygroup").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(cache_control(&response), Some("max-age=3600, public"));
    let json = json_body(response).await;
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_first_config(&items[0]);
    assert_eq!(items[1]["group"], "mygroup");
    assert_eq!(items[1]["name"], "myconfig2");
    assert_eq!(items[1]["value"]["key3"], "value3");
}

#[tokio::test]
async fn returns_empty_list_for_unknown_group() {
    let app = app_with(Arc::new(InMemoryMetadataStore::new()));
    let response = get(app, "/metadata/groups/mygroup").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(cache_control(&response), Some("max-age=3600, public"));
    assert_eq!(json_body(response).await, serde_json::json!([]));
}

#[tokio::test]
async fn value_keys_keep_insertion_order() {
    let store: Arc<dyn MetadataStore> = Arc::new(InMemoryMetadataStore::new());
    store
        .save(
            Metadata::builder()
                .group("g")
                .name("n")
                .value("zeta", "1")
                .value("alpha", "2")
                .build()
                .unwrap(),
        )
        .unwrap();
    let response = get(app_with(store), "/metadata/g/n").await;
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains(r#""value":{"zeta":"1","alpha":"2"}"#));
}

#[tokio::test]
async fn uses_configured_cache_policy() {
    let (store, _) = seeded_store();
    let service = LookupService::with_cache_policy(
        store,
        CachePolicy::new(Duration::from_secs(120), false),
    );
    let response = get(router(Arc::new(service)), "/metadata/mygroup/myconfig").await;
    assert_eq!(cache_control(&response), Some("max-age=120, private"));
}

#[tokio::test]
async fn health_is_not_cached() {
    let app = app_with(Arc::new(InMemoryMetadataStore::new()));
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(cache_control(&response), None);
    assert_eq!(json_body(response).await["status"], "healthy");
}
