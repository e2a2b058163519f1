//! Integration tests for the GraphQL client over HTTP.
//!
//! These tests run the client against a local mock server and verify the
//! request body, headers, retry handling and response parsing.

use gqlbind::clients::{HttpError, HttpResponseError, MaxHttpRetriesExceededError};
use gqlbind::{
    ClientConfig, Endpoint, Field, GraphqlClient, GraphqlError, GraphqlRequest, Operation, Shape,
    ShapeTable, Variable, VariableType,
};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Default, PartialEq)]
struct Person {
    id: i64,
    surname: String,
}

impl Shape for Person {
    fn describe(table: &mut ShapeTable<Self>) {
        table
            .field("id", |p: &mut Self, v| p.id = v)
            .field("surname", |p: &mut Self, v| p.surname = v);
    }
}

fn client_for(server: &MockServer, tries: u32) -> GraphqlClient {
    let config = ClientConfig::builder()
        .endpoint(Endpoint::new(format!("{}/graphql", server.uri())).unwrap())
        .bearer_token("test-token")
        .tries(tries)
        .build()
        .unwrap();
    GraphqlClient::new(&config).unwrap()
}

fn people_operation() -> Operation {
    Operation::query().field(Field::new("people").select(["id", "surname"]))
}

// ============================================================================
// Request Tests
// ============================================================================

#[tokio::test]
async fn test_query_posts_json_body_with_auth_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("authorization", "Bearer test-token"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "people": [{ "id": 1, "surname": "Doe" }] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server, 1)
        .query(&people_operation())
        .await
        .unwrap();

    let people: Vec<Person> = response.get_list("people").unwrap();
    assert_eq!(
        people,
        vec![Person {
            id: 1,
            surname: "Doe".to_string()
        }]
    );

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body, json!({ "query": "{ people { id surname } }" }));
}

#[tokio::test]
async fn test_variables_and_operation_name_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "profile": { "id": 7, "surname": "Roe" } }
        })))
        .mount(&server)
        .await;

    let person_id = Variable::new("personId", VariableType::named("Int").non_null());
    let operation = Operation::query()
        .name("profile")
        .variable(person_id.clone())
        .field(
            Field::new("profile")
                .arg("personId", &person_id)
                .select(["id", "surname"]),
        );
    let request = GraphqlRequest::from_operation(&operation)
        .unwrap()
        .variable("personId", 7);

    let response = client_for(&server, 1).execute(&request).await.unwrap();
    let profile: Person = response.get_object("profile").unwrap();
    assert_eq!(profile.surname, "Roe");

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(
        body["query"],
        "query profile($personId: Int!) { profile(personId: $personId) { id surname } }"
    );
    assert_eq!(body["variables"], json!({ "personId": 7 }));
    assert_eq!(body["operationName"], "profile");
}

#[tokio::test]
async fn test_per_request_headers_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("x-request-id", "abc-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
        .expect(1)
        .mount(&server)
        .await;

    let headers = vec![("X-Request-Id".to_string(), "abc-123".to_string())];
    let response = client_for(&server, 1)
        .execute_with_headers(&GraphqlRequest::new("{ a }"), &headers)
        .await
        .unwrap();

    assert!(response.has_data());
}

// ============================================================================
// Response Tests
// ============================================================================

#[tokio::test]
async fn test_server_errors_are_returned_not_raised() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [
                { "message": "Cannot query field \"nope\"", "locations": [{ "line": 1, "column": 3 }] }
            ]
        })))
        .mount(&server)
        .await;

    let response = client_for(&server, 1)
        .execute(&GraphqlRequest::new("{ nope }"))
        .await
        .unwrap();

    assert!(!response.has_data());
    assert!(response.has_error());
    assert_eq!(response.errors()[0].message, "Cannot query field \"nope\"");
}

#[tokio::test]
async fn test_non_graphql_body_is_a_response_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[1, 2, 3]"))
        .mount(&server)
        .await;

    let result = client_for(&server, 1)
        .execute(&GraphqlRequest::new("{ a }"))
        .await;

    assert!(matches!(result, Err(GraphqlError::Response(_))));
}

// ============================================================================
// Error and Retry Tests
// ============================================================================

#[tokio::test]
async fn test_client_error_status_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server, 3)
        .execute(&GraphqlRequest::new("{ a }"))
        .await;

    match result {
        Err(GraphqlError::Http(HttpError::Response(HttpResponseError { code, message }))) => {
            assert_eq!(code, 401);
            assert_eq!(message, "Unauthorized");
        }
        other => panic!("expected HTTP 401, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limited_request_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "people": [] }
        })))
        .mount(&server)
        .await;

    let response = client_for(&server, 2)
        .query(&people_operation())
        .await
        .unwrap();

    let people: Vec<Person> = response.get_list("people").unwrap();
    assert!(people.is_empty());
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_retries_exhausted_reports_last_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "0")
                .set_body_string("slow down"),
        )
        .expect(2)
        .mount(&server)
        .await;

    let result = client_for(&server, 2)
        .execute(&GraphqlRequest::new("{ a }"))
        .await;

    match result {
        Err(GraphqlError::Http(HttpError::MaxRetries(MaxHttpRetriesExceededError {
            code,
            tries,
            message,
        }))) => {
            assert_eq!(code, 429);
            assert_eq!(tries, 2);
            assert_eq!(message, "slow down");
        }
        other => panic!("expected retry exhaustion, got {other:?}"),
    }
}

#[tokio::test]
async fn test_build_error_skips_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = client_for(&server, 1).query(&Operation::mutation()).await;

    assert!(matches!(result, Err(GraphqlError::Build(_))));
}

#[test]
fn test_graphql_client_is_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphqlClient>();
}
