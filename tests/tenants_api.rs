//! Integration tests for the tenant endpoints, driven through the real
//! router.

mod common;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

use common::test_server;

fn owner_header(owner: Uuid) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("x-owner-id"),
        HeaderValue::from_str(&owner.to_string()).unwrap(),
    )
}

fn tenant_payload(name: &str, phone: &str, id_card: &str) -> Value {
    json!({
        "fullName": name,
        "phone": phone,
        "idCard": id_card,
    })
}

#[tokio::test]
async fn test_create_tenant_returns_201_with_code() {
    let (server, _state) = test_server();
    let owner = Uuid::new_v4();
    let (name, value) = owner_header(owner);

    let response = server
        .post("/tenants")
        .add_header(name, value)
        .json(&tenant_payload("Nguyễn Văn A", "0901234567", "079123456789"))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body = response.json::<Value>();
    let code = body["code"].as_str().unwrap();
    let re = regex::Regex::new(r"^T-[0-9A-Z]+-[0-9]{4,5}$").unwrap();
    assert!(re.is_match(code), "unexpected code: {code}");
    assert_eq!(body["fullName"], "Nguyễn Văn A");
    assert_eq!(body["fullNameNormalized"], "nguyen van a");
    assert_eq!(body["status"], "ACTIVE");
    assert_eq!(body["isDeleted"], false);
}

#[tokio::test]
async fn test_create_requires_owner_header() {
    let (server, _state) = test_server();

    let response = server
        .post("/tenants")
        .json(&tenant_payload("A", "0901234567", "079123456789"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], "MISSING_HEADER");
}

#[tokio::test]
async fn test_duplicate_phone_is_409() {
    let (server, _state) = test_server();
    let owner = Uuid::new_v4();
    let (name, value) = owner_header(owner);

    server
        .post("/tenants")
        .add_header(name.clone(), value.clone())
        .json(&tenant_payload("A", "0901234567", "079111111111"))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/tenants")
        .add_header(name, value)
        .json(&tenant_payload("B", "0901234567", "079222222222"))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["code"], "PHONE_EXISTS");
}

#[tokio::test]
async fn test_duplicate_id_card_is_409() {
    let (server, _state) = test_server();
    let owner = Uuid::new_v4();
    let (name, value) = owner_header(owner);

    server
        .post("/tenants")
        .add_header(name.clone(), value.clone())
        .json(&tenant_payload("A", "0901111111", "079123456789"))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/tenants")
        .add_header(name, value)
        .json(&tenant_payload("B", "0902222222", "079123456789"))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["code"], "ID_CARD_EXISTS");
}

#[tokio::test]
async fn test_renting_status_is_403() {
    let (server, _state) = test_server();
    let owner = Uuid::new_v4();
    let (name, value) = owner_header(owner);

    let mut payload = tenant_payload("A", "0901234567", "079123456789");
    payload["status"] = json!("RENTING");

    let response = server
        .post("/tenants")
        .add_header(name, value)
        .json(&payload)
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_invalid_payload_is_400_with_field_details() {
    let (server, _state) = test_server();
    let (name, value) = owner_header(Uuid::new_v4());

    let response = server
        .post("/tenants")
        .add_header(name, value)
        .json(&tenant_payload("A", "123", "079123456789"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["details"]["fields"].is_array());
}

#[tokio::test]
async fn test_search_is_diacritic_insensitive() {
    let (server, _state) = test_server();
    let owner = Uuid::new_v4();
    let (name, value) = owner_header(owner);

    server
        .post("/tenants")
        .add_header(name.clone(), value.clone())
        .json(&tenant_payload("NGUYEN VAN A", "0901111111", "079111111111"))
        .await
        .assert_status(StatusCode::CREATED);
    server
        .post("/tenants")
        .add_header(name.clone(), value.clone())
        .json(&tenant_payload("Lê Thị B", "0902222222", "079222222222"))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .get("/tenants")
        .add_header(name, value)
        .add_query_param("search", "Nguyễn")
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["data"][0]["fullName"], "NGUYEN VAN A");
}

#[tokio::test]
async fn test_pagination_meta_and_out_of_range_page() {
    let (server, _state) = test_server();
    let owner = Uuid::new_v4();
    let (name, value) = owner_header(owner);

    for i in 0..25 {
        server
            .post("/tenants")
            .add_header(name.clone(), value.clone())
            .json(&tenant_payload(
                &format!("Tenant {i}"),
                &format!("09012345{i:02}"),
                &format!("0791234567{i:02}"),
            ))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let response = server
        .get("/tenants")
        .add_header(name.clone(), value.clone())
        .add_query_param("limit", "10")
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["data"].as_array().unwrap().len(), 10);
    assert_eq!(body["meta"]["total"], 25);
    assert_eq!(body["meta"]["totalPages"], 3);

    let response = server
        .get("/tenants")
        .add_header(name, value)
        .add_query_param("page", "4")
        .add_query_param("limit", "10")
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert!(body["data"].as_array().unwrap().is_empty());
    assert_eq!(body["meta"]["total"], 25);
}

#[tokio::test]
async fn test_get_unknown_tenant_is_404() {
    let (server, _state) = test_server();
    let (name, value) = owner_header(Uuid::new_v4());

    let response = server
        .get(&format!("/tenants/{}", Uuid::new_v4()))
        .add_header(name, value)
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_soft_delete_then_phone_is_reusable() {
    let (server, _state) = test_server();
    let owner = Uuid::new_v4();
    let (name, value) = owner_header(owner);

    let created = server
        .post("/tenants")
        .add_header(name.clone(), value.clone())
        .json(&tenant_payload("A", "0901234567", "079111111111"))
        .await
        .json::<Value>();
    let id = created["id"].as_str().unwrap().to_string();

    server
        .delete(&format!("/tenants/{id}"))
        .add_header(name.clone(), value.clone())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    // Gone from reads
    server
        .get(&format!("/tenants/{id}"))
        .add_header(name.clone(), value.clone())
        .await
        .assert_status(StatusCode::NOT_FOUND);

    // Search by exact phone finds nothing
    let response = server
        .get("/tenants")
        .add_header(name.clone(), value.clone())
        .add_query_param("search", "0901234567")
        .await;
    assert_eq!(response.json::<Value>()["meta"]["total"], 0);

    // The phone can be used again
    server
        .post("/tenants")
        .add_header(name.clone(), value.clone())
        .json(&tenant_payload("B", "0901234567", "079222222222"))
        .await
        .assert_status(StatusCode::CREATED);

    // Deleting the tombstoned record again is a 404
    server
        .delete(&format!("/tenants/{id}"))
        .add_header(name, value)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_conflicts_exclude_self() {
    let (server, _state) = test_server();
    let owner = Uuid::new_v4();
    let (name, value) = owner_header(owner);

    let a = server
        .post("/tenants")
        .add_header(name.clone(), value.clone())
        .json(&tenant_payload("A", "0901111111", "079111111111"))
        .await
        .json::<Value>();
    let b = server
        .post("/tenants")
        .add_header(name.clone(), value.clone())
        .json(&tenant_payload("B", "0902222222", "079222222222"))
        .await
        .json::<Value>();

    // B taking A's phone is a conflict
    let response = server
        .patch(&format!("/tenants/{}", b["id"].as_str().unwrap()))
        .add_header(name.clone(), value.clone())
        .json(&json!({ "phone": "0901111111" }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["code"], "PHONE_EXISTS");

    // A re-submitting its own phone is fine, and the name re-normalizes
    let response = server
        .put(&format!("/tenants/{}", a["id"].as_str().unwrap()))
        .add_header(name, value)
        .json(&json!({ "phone": "0901111111", "fullName": "Trần Bình" }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["fullNameNormalized"], "tran binh");
}

#[tokio::test]
async fn test_owner_isolation_over_http() {
    let (server, _state) = test_server();
    let (name, value) = owner_header(Uuid::new_v4());

    let created = server
        .post("/tenants")
        .add_header(name, value)
        .json(&tenant_payload("A", "0901234567", "079111111111"))
        .await
        .json::<Value>();

    let (other_name, other_value) = owner_header(Uuid::new_v4());
    server
        .get(&format!("/tenants/{}", created["id"].as_str().unwrap()))
        .add_header(other_name.clone(), other_value.clone())
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let response = server
        .get("/tenants")
        .add_header(other_name, other_value)
        .await;
    assert_eq!(response.json::<Value>()["meta"]["total"], 0);
}

#[tokio::test]
async fn test_health_routes() {
    let (server, _state) = test_server();

    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "ok");

    server.get("/healthz").await.assert_status_ok();
}
