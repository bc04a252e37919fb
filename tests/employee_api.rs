//! Employee API Tests
//!
//! Drive the full router (CORS, routing, handlers, validation) against the
//! in-memory store:
//! - Create then list returns the record with a fresh id
//! - Missing and malformed fields are client errors
//! - Malformed identifiers are client errors
//! - Update of a missing id succeeds, delete of a missing id fails
//! - Store failures surface as 500 with the wrapped store message

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use async_trait::async_trait;
use employee_api::employee::{Employee, EmployeeId, EmployeeInput};
use employee_api::http_server::HttpServer;
use employee_api::store::{
    EmployeeStore, InMemoryEmployeeStore, StoreError, StoreResult, UpdateOutcome,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup() -> (Router, Arc<InMemoryEmployeeStore>) {
    let store = Arc::new(InMemoryEmployeeStore::new());
    let router = HttpServer::new(store.clone() as Arc<dyn EmployeeStore>).router();
    (router, store)
}

/// Store whose every call fails as if the database were down
struct FailingEmployeeStore;

#[async_trait]
impl EmployeeStore for FailingEmployeeStore {
    async fn list_all(&self) -> StoreResult<Vec<Employee>> {
        Err(StoreError::query("error finding employees", "connection refused"))
    }

    async fn insert(&self, _employee: &EmployeeInput) -> StoreResult<EmployeeId> {
        Err(StoreError::query("error inserting employee", "connection refused"))
    }

    async fn update_by_id(
        &self,
        _id: &str,
        _employee: &EmployeeInput,
    ) -> StoreResult<UpdateOutcome> {
        Err(StoreError::query("error updating employee", "connection refused"))
    }

    async fn delete_by_id(&self, _id: &str) -> StoreResult<()> {
        Err(StoreError::query("error deleting employee", "connection refused"))
    }
}

fn setup_failing() -> Router {
    HttpServer::new(Arc::new(FailingEmployeeStore)).router()
}

fn ann() -> Value {
    json!({"name": "Ann", "email": "ann@x.com", "phone": "123", "department": "Eng"})
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn send_json(router: &Router, method: Method, uri: &str, body: &Value) -> (StatusCode, Value) {
    send(router, method, uri, Some(&body.to_string())).await
}

async fn list(router: &Router) -> Vec<Value> {
    let (status, body) = send(router, Method::GET, "/api/employees", None).await;
    assert_eq!(status, StatusCode::OK);
    body.as_array().cloned().expect("list returns an array")
}

async fn create_and_get_id(router: &Router, body: &Value) -> String {
    let (status, _) = send_json(router, Method::POST, "/api/employees", body).await;
    assert_eq!(status, StatusCode::OK);
    list(router)
        .await
        .last()
        .and_then(|e| e["id"].as_str())
        .map(str::to_string)
        .expect("created employee has an id")
}

// =============================================================================
// List / Create
// =============================================================================

#[tokio::test]
async fn test_empty_list_is_empty_array() {
    let (router, _) = setup();
    let (status, body) = send(&router, Method::GET, "/api/employees", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_create_then_list() {
    let (router, _) = setup();

    let (status, body) = send_json(&router, Method::POST, "/api/employees", &ann()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Employee created successfully"}));

    let employees = list(&router).await;
    assert_eq!(employees.len(), 1);

    let employee = &employees[0];
    assert_eq!(employee["name"], "Ann");
    assert_eq!(employee["email"], "ann@x.com");
    assert_eq!(employee["phone"], "123");
    assert_eq!(employee["department"], "Eng");

    let id = employee["id"].as_str().unwrap();
    assert!(EmployeeId::parse(id).is_ok());
}

#[tokio::test]
async fn test_duplicates_are_permitted() {
    let (router, _) = setup();
    send_json(&router, Method::POST, "/api/employees", &ann()).await;
    send_json(&router, Method::POST, "/api/employees", &ann()).await;

    let employees = list(&router).await;
    assert_eq!(employees.len(), 2);
    assert_ne!(employees[0]["id"], employees[1]["id"]);
}

#[tokio::test]
async fn test_client_supplied_id_is_ignored() {
    let (router, _) = setup();
    let forced = EmployeeId::generate().to_hex();
    let mut body = ann();
    body["id"] = json!(forced);

    let id = create_and_get_id(&router, &body).await;
    assert_ne!(id, forced);
}

// =============================================================================
// Validation
// =============================================================================

#[tokio::test]
async fn test_missing_fields_all_listed() {
    let (router, store) = setup();

    let (status, body) = send_json(&router, Method::POST, "/api/employees", &json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Field 'Name' is required, Field 'Email' is required, \
         Field 'Phone' is required, Field 'Department' is required"
    );
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_each_missing_field_reported() {
    let (router, _) = setup();

    for (field, label) in [
        ("name", "Name"),
        ("email", "Email"),
        ("phone", "Phone"),
        ("department", "Department"),
    ] {
        let mut body = ann();
        body.as_object_mut().unwrap().remove(field);

        let (status, response) = send_json(&router, Method::POST, "/api/employees", &body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"], format!("Field '{}' is required", label));
    }
}

#[tokio::test]
async fn test_invalid_email_rejected() {
    let (router, store) = setup();
    let mut body = ann();
    body["email"] = json!("not-an-email");

    let (status, response) = send_json(&router, Method::POST, "/api/employees", &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["error"].as_str().unwrap().contains("Email"));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let (router, _) = setup();

    let (status, body) = send(&router, Method::POST, "/api/employees", Some("{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request payload: "));
}

#[tokio::test]
async fn test_array_body_is_bad_request() {
    let (router, store) = setup();

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/employees",
        Some(r#"["Ann","ann@x.com","123","Eng"]"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request payload: "));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_null_fields_listed_as_missing() {
    let (router, store) = setup();
    let body = json!({"name": null, "email": null, "phone": "123", "department": null});

    let (status, response) = send_json(&router, Method::POST, "/api/employees", &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response["error"],
        "Field 'Name' is required, Field 'Email' is required, Field 'Department' is required"
    );
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_empty_body_is_bad_request() {
    let (router, _) = setup();

    let (status, body) = send(&router, Method::POST, "/api/employees", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

// =============================================================================
// Update
// =============================================================================

#[tokio::test]
async fn test_update_replaces_fields_and_keeps_id() {
    let (router, _) = setup();
    let id = create_and_get_id(&router, &ann()).await;

    let update = json!({"name": "Bob", "email": "bob@x.com", "phone": "456", "department": "Ops"});
    let (status, body) =
        send_json(&router, Method::PUT, &format!("/api/employees/{}", id), &update).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Employee updated successfully"}));

    let employees = list(&router).await;
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0]["id"], id.as_str());
    assert_eq!(employees[0]["name"], "Bob");
    assert_eq!(employees[0]["department"], "Ops");
}

#[tokio::test]
async fn test_update_with_invalid_id_is_client_error() {
    let (router, _) = setup();

    let (status, body) = send_json(&router, Method::PUT, "/api/employees/xyz", &ann()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("invalid employee ID format"));
}

#[tokio::test]
async fn test_update_with_invalid_id_and_invalid_body_is_client_error() {
    let (router, _) = setup();

    let (status, body) = send_json(&router, Method::PUT, "/api/employees/xyz", &json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("is required"));
}

#[tokio::test]
async fn test_update_validates_payload() {
    let (router, _) = setup();
    let id = create_and_get_id(&router, &ann()).await;

    let mut update = ann();
    update["email"] = json!("not-an-email");
    let (status, _) =
        send_json(&router, Method::PUT, &format!("/api/employees/{}", id), &update).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(list(&router).await[0]["email"], "ann@x.com");
}

/// Updating a well-formed id that matches nothing reports success and
/// changes nothing, unlike delete.
#[tokio::test]
async fn test_update_missing_id_succeeds_without_changes() {
    let (router, store) = setup();
    let missing = EmployeeId::generate().to_hex();

    let (status, body) =
        send_json(&router, Method::PUT, &format!("/api/employees/{}", missing), &ann()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Employee updated successfully"}));

    let outcome = store.update_by_id(&missing, &Default::default()).await.unwrap();
    assert_eq!(outcome.matched, 0);
    assert!(store.is_empty());
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_delete_removes_employee() {
    let (router, _) = setup();
    let id = create_and_get_id(&router, &ann()).await;

    let (status, body) =
        send(&router, Method::DELETE, &format!("/api/employees/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Employee deleted successfully"}));

    assert!(list(&router).await.is_empty());
}

#[tokio::test]
async fn test_delete_missing_id_is_not_found() {
    let (router, _) = setup();
    let missing = EmployeeId::generate().to_hex();

    let (status, body) =
        send(&router, Method::DELETE, &format!("/api/employees/{}", missing), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["error"],
        format!(
            "Failed to delete employee: no employee found with ID: {}",
            missing
        )
    );
}

#[tokio::test]
async fn test_delete_twice_fails_second_time() {
    let (router, _) = setup();
    let id = create_and_get_id(&router, &ann()).await;
    let uri = format!("/api/employees/{}", id);

    let (first, _) = send(&router, Method::DELETE, &uri, None).await;
    let (second, _) = send(&router, Method::DELETE, &uri, None).await;
    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_with_invalid_id_is_client_error() {
    let (router, _) = setup();

    let (status, body) = send(&router, Method::DELETE, "/api/employees/xyz", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Failed to delete employee: invalid employee ID format"));
}

// =============================================================================
// Transport
// =============================================================================

#[tokio::test]
async fn test_cors_preflight() {
    let (router, _) = setup();

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/employees")
        .header(header::ORIGIN, "http://example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

    let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
    for method in ["GET", "POST", "PUT", "DELETE", "OPTIONS"] {
        assert!(methods.contains(method), "{} missing from {}", method, methods);
    }

    let allowed_headers = headers[header::ACCESS_CONTROL_ALLOW_HEADERS]
        .to_str()
        .unwrap()
        .to_ascii_lowercase();
    assert!(allowed_headers.contains("content-type"));
    assert!(allowed_headers.contains("authorization"));
}

#[tokio::test]
async fn test_cors_header_on_regular_response() {
    let (router, _) = setup();

    let request = Request::builder()
        .uri("/api/employees")
        .header(header::ORIGIN, "http://example.com")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn test_unsupported_method_rejected() {
    let (router, _) = setup();
    let (status, _) = send(&router, Method::PATCH, "/api/employees", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_only_api_routes_are_served() {
    let (router, _) = setup();
    let (status, _) = send(&router, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Store Failures
// =============================================================================

#[tokio::test]
async fn test_list_store_failure_is_server_error() {
    let router = setup_failing();
    let (status, body) = send(&router, Method::GET, "/api/employees", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"error": "Failed to retrieve employees: error finding employees: connection refused"})
    );
}

#[tokio::test]
async fn test_create_store_failure_is_server_error() {
    let router = setup_failing();
    let (status, body) = send_json(&router, Method::POST, "/api/employees", &ann()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"error": "Failed to insert employee: error inserting employee: connection refused"})
    );
}

#[tokio::test]
async fn test_update_store_failure_is_server_error() {
    let router = setup_failing();
    let uri = format!("/api/employees/{}", EmployeeId::generate());
    let (status, body) = send_json(&router, Method::PUT, &uri, &ann()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"error": "Failed to update employee: error updating employee: connection refused"})
    );
}

#[tokio::test]
async fn test_delete_store_failure_is_server_error() {
    let router = setup_failing();
    let uri = format!("/api/employees/{}", EmployeeId::generate());
    let (status, body) = send(&router, Method::DELETE, &uri, None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"error": "Failed to delete employee: error deleting employee: connection refused"})
    );
}

#[tokio::test]
async fn test_validation_runs_before_failing_store() {
    let router = setup_failing();
    let (status, _) = send_json(&router, Method::POST, "/api/employees", &json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
