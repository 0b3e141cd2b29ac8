use crate::api;
use crate::domain_model::{User, UserId};
use crate::domain_port::{PersistenceError, UserPersistence};
use crate::domain_service::{PermissiveUserValidator, UserValidator};
use crate::infra_memory::InMemoryUserPersistence;
use crate::server::Server;
use serde_json::{Value, json};
use std::sync::Arc;
use warp::http::StatusCode;

struct DownStore;

#[async_trait::async_trait]
impl UserPersistence for DownStore {
    async fn save(&self, _user: User) -> Result<User, PersistenceError> {
        Err(PersistenceError::Store("db01: connection reset".to_string()))
    }

    async fn find_by_id(&self, _id: UserId) -> Result<Option<User>, PersistenceError> {
        Err(PersistenceError::Store("db01: connection reset".to_string()))
    }
}

struct NoLovelace;

impl UserValidator for NoLovelace {
    fn validate(&self, user: &User) -> bool {
        user.last_name() != "Lovelace"
    }
}

fn memory_server() -> Arc<Server> {
    Arc::new(Server::with_persistence(
        Arc::new(InMemoryUserPersistence::new()),
        Arc::new(PermissiveUserValidator::new()),
    ))
}

async fn post_user(server: &Arc<Server>, payload: Value) -> (StatusCode, Value) {
    let res = warp::test::request()
        .method("POST")
        .path("/api/v1/users")
        .json(&payload)
        .reply(&api::service(server.clone()))
        .await;

    (res.status(), serde_json::from_slice(res.body()).unwrap())
}

async fn get_path(server: &Arc<Server>, path: &str) -> (StatusCode, Value) {
    let res = warp::test::request()
        .method("GET")
        .path(path)
        .reply(&api::service(server.clone()))
        .await;

    (res.status(), serde_json::from_slice(res.body()).unwrap())
}

#[tokio::test]
async fn create_returns_envelope_with_assigned_id() {
    let server = memory_server();

    let (status, body) =
        post_user(&server, json!({"firstName": "Ada", "lastName": "Lovelace"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "User created");
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["firstName"], "Ada");
    assert_eq!(body["data"]["lastName"], "Lovelace");
    assert!(body["timestamp"].is_i64());
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn created_user_is_readable_by_id() {
    let server = memory_server();
    post_user(&server, json!({"firstName": "Grace", "lastName": "Hopper"})).await;

    let (status, body) = get_path(&server, "/api/v1/users/1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User found");
    assert_eq!(
        body["data"],
        json!({"id": 1, "firstName": "Grace", "lastName": "Hopper"})
    );
}

#[tokio::test]
async fn missing_user_is_404_envelope() {
    let server = memory_server();

    let (status, body) = get_path(&server, "/api/v1/users/999999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "USER_NOT_FOUND");
    assert_eq!(body["error"]["detail"], "User with id 999999 not found");
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn non_numeric_id_is_route_not_found() {
    let server = memory_server();

    for path in ["/api/v1/users/abc", "/api/v1/users/-1"] {
        let (status, body) = get_path(&server, path).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}

#[tokio::test]
async fn short_name_is_rejected_with_field() {
    let server = memory_server();

    let (status, body) =
        post_user(&server, json!({"firstName": "A", "lastName": "Lovelace"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_ARGUMENT");
    assert_eq!(body["error"]["field"], "firstName");
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let server = memory_server();

    let (status, body) = post_user(&server, json!({"firstName": "Ada"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_ARGUMENT");
}

#[tokio::test]
async fn store_outage_is_500_without_details() {
    let server = Arc::new(Server::with_persistence(
        Arc::new(DownStore),
        Arc::new(PermissiveUserValidator::new()),
    ));

    let (status, body) =
        post_user(&server, json!({"firstName": "Ada", "lastName": "Lovelace"})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
    assert!(!body.to_string().contains("db01"));
}

#[tokio::test]
async fn business_rule_rejection_is_422() {
    let server = Arc::new(Server::with_persistence(
        Arc::new(InMemoryUserPersistence::new()),
        Arc::new(NoLovelace),
    ));

    let (rejected, body) =
        post_user(&server, json!({"firstName": "Ada", "lastName": "Lovelace"})).await;
    let (accepted, _) = post_user(&server, json!({"firstName": "Ada", "lastName": "Byron"})).await;

    assert_eq!(rejected, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "VALIDATION_FAILED");
    assert_eq!(accepted, StatusCode::OK);
}

#[tokio::test]
async fn listing_users_is_not_a_route() {
    let server = memory_server();

    let (status, body) = get_path(&server, "/api/v1/users").await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["error"]["code"], "METHOD_NOT_ALLOWED");
}

#[tokio::test]
async fn unknown_version_is_404() {
    let server = memory_server();

    let (status, body) = get_path(&server, "/api/v2/users/1").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn post_without_content_length_is_411() {
    let server = memory_server();

    let res = warp::test::request()
        .method("POST")
        .path("/api/v1/users")
        .reply(&api::service(server.clone()))
        .await;
    let body: Value = serde_json::from_slice(res.body()).unwrap();

    assert_eq!(res.status(), StatusCode::LENGTH_REQUIRED);
    assert_eq!(body["error"]["code"], "LENGTH_REQUIRED");
}

#[tokio::test]
async fn oversized_body_is_413() {
    let server = memory_server();

    let (status, body) = post_user(
        &server,
        json!({"firstName": "x".repeat(20 * 1024), "lastName": "Lovelace"}),
    )
    .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
}
