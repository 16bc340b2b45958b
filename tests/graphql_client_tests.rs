//! Integration tests for the GraphQL executor and client.
//!
//! These tests run the client against a `wiremock` server and check the
//! request it sends and how each kind of response is handled.

use borgbase_api::clients::graphql::{execute, selection, GraphqlClient};
use borgbase_api::{
    graphql_object, optional, required, ApiKey, Arguments, AuthedTransport, ClientConfig,
    ClientError, Endpoint, Operation,
};
use serde::Deserialize;
use serde_json::{json, Value};
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

graphql_object! {
    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(default)]
    struct Widget {
        id: String,
        name: String,
    }
}

fn endpoint(server: &MockServer) -> Endpoint {
    Endpoint::new(format!("{}/graphql", server.uri())).unwrap()
}

fn client(server: &MockServer) -> GraphqlClient {
    GraphqlClient::new(&ClientConfig::builder().endpoint(endpoint(server)).build())
}

fn body_of(request: &Request) -> Value {
    serde_json::from_slice(&request.body).unwrap()
}

// ============================================================================
// Request Encoding Tests
// ============================================================================

#[tokio::test]
async fn test_scalar_argument_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("content-type", "application/json"))
        .and(|request: &Request| {
            let body = body_of(request);
            let query = body["query"].as_str().unwrap_or_default();
            let variables: Value =
                serde_json::from_str(body["variables"].as_str().unwrap_or("null")).unwrap();

            query.contains("$name: String!")
                && query.contains("name: $name")
                && variables == json!({ "name": "abc" })
        })
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "widget": { "id": "1", "name": "abc" } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut widget = Widget::default();
    client(&server)
        .query(
            "widget",
            &mut widget,
            &Arguments::new().with("name", required("abc")),
        )
        .await
        .unwrap();

    assert_eq!(widget.id, "1");
    assert_eq!(widget.name, "abc");
}

#[tokio::test]
async fn test_variables_are_sent_as_json_string() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(|request: &Request| body_of(request)["variables"].is_string())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
        .expect(1)
        .mount(&server)
        .await;

    let arguments = Arguments::new()
        .with("id", required("42"))
        .with("keys", optional(vec!["a".to_string(), "b".to_string()]))
        .with("quota", optional(100_i64));

    let mut widget = Widget::default();
    client(&server)
        .mutation("widgetEdit", &mut widget, &arguments)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_mutation_document_lists_arguments_in_name_order() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(|request: &Request| {
            body_of(request)["query"]
                == "mutation widgetAdd($name: String!, $public: Boolean, $size: Float) \
                    { widgetAdd(name: $name, public: $public, size: $size) { id name } }"
        })
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
        .expect(1)
        .mount(&server)
        .await;

    let arguments = Arguments::new()
        .with("size", optional(1.5_f64))
        .with("public", optional(true))
        .with("name", required("w"));

    let mut widget = Widget::default();
    client(&server)
        .mutation("widgetAdd", &mut widget, &arguments)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_zero_argument_query() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(|request: &Request| {
            body_of(request) == json!({
                "query": "query widgets() { widgets() { id name } }",
                "variables": "{}"
            })
        })
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "widgets": [{ "id": "1" }, { "id": "2", "name": "two" }] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut widgets: Vec<Widget> = Vec::new();
    client(&server)
        .query("widgets", &mut widgets, &Arguments::new())
        .await
        .unwrap();

    assert_eq!(widgets.len(), 2);
    assert_eq!(widgets[0].name, "");
    assert_eq!(widgets[1].name, "two");
}

// ============================================================================
// Authentication Tests
// ============================================================================

#[tokio::test]
async fn test_bearer_header_is_sent_when_key_configured() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header("authorization", "bearer my-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::builder()
        .endpoint(endpoint(&server))
        .api_key(ApiKey::new("my-token").unwrap())
        .build();

    let mut widget = Widget::default();
    GraphqlClient::new(&config)
        .query("widget", &mut widget, &Arguments::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_no_authorization_header_without_key() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(401))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
        .expect(1)
        .mount(&server)
        .await;

    let mut widget = Widget::default();
    client(&server)
        .query("widget", &mut widget, &Arguments::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_execute_with_custom_transport() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header("authorization", "bearer direct"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "widget": { "id": "9" } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let transport = AuthedTransport::new(&ApiKey::new("direct").unwrap(), reqwest::Client::new());
    let url = endpoint(&server);

    let mut widget = Widget::default();
    execute(
        &transport,
        url.url(),
        Operation::Query,
        "widget",
        &mut widget,
        &Arguments::new(),
    )
    .await
    .unwrap();

    assert_eq!(widget.id, "9");
}

// ============================================================================
// Response Handling Tests
// ============================================================================

#[tokio::test]
async fn test_graphql_errors_take_precedence_over_data() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "x": { "id": "1" } },
            "errors": [{ "message": "boom", "locations": [{ "line": 1, "column": 2 }] }]
        })))
        .mount(&server)
        .await;

    let mut widget = Widget::default();
    let error = client(&server)
        .query("x", &mut widget, &Arguments::new())
        .await
        .unwrap_err();

    assert_eq!(error.to_string(), "boom at [1:2]");
    let errors = error.graphql_errors().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.as_slice()[0].message, "boom");
    assert_eq!(widget.id, "");
}

#[tokio::test]
async fn test_multiple_graphql_errors_are_joined() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [
                { "message": "first", "locations": [{ "line": 1, "column": 2 }, { "line": 3, "column": 4 }] },
                { "message": "second" }
            ]
        })))
        .mount(&server)
        .await;

    let mut widget = Widget::default();
    let error = client(&server)
        .query("x", &mut widget, &Arguments::new())
        .await
        .unwrap_err();

    assert_eq!(error.to_string(), "first at [1:2, 3:4]; second at []");
}

#[tokio::test]
async fn test_absent_field_is_a_silent_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {},
            "errors": []
        })))
        .mount(&server)
        .await;

    let mut widget = Widget {
        id: "untouched".to_string(),
        name: "also untouched".to_string(),
    };
    client(&server)
        .query("x", &mut widget, &Arguments::new())
        .await
        .unwrap();

    assert_eq!(widget.id, "untouched");
    assert_eq!(widget.name, "also untouched");
}

#[tokio::test]
async fn test_missing_data_is_a_silent_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let mut widget = Widget::default();
    client(&server)
        .query("x", &mut widget, &Arguments::new())
        .await
        .unwrap();

    assert_eq!(widget, Widget::default());
}

#[tokio::test]
async fn test_payload_replaces_schema_value() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "widget": { "id": "1" } }
        })))
        .mount(&server)
        .await;

    let mut widget = Widget {
        id: String::new(),
        name: "previous".to_string(),
    };
    client(&server)
        .query("widget", &mut widget, &Arguments::new())
        .await
        .unwrap();

    assert_eq!(
        widget,
        Widget {
            id: "1".to_string(),
            name: String::new(),
        }
    );
}

#[tokio::test]
async fn test_server_fault_short_circuits_decoding() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let mut widget = Widget::default();
    let error = client(&server)
        .query("x", &mut widget, &Arguments::new())
        .await
        .unwrap_err();

    let message = error.to_string();
    assert!(message.contains("500"));
    assert!(message.contains("internal error"));
    assert!(matches!(
        error,
        ClientError::ServerFault { status: 500, ref body } if body == "internal error"
    ));
}

#[tokio::test]
async fn test_server_fault_ignores_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "data": { "x": { "id": "1" } }
        })))
        .mount(&server)
        .await;

    let mut widget = Widget::default();
    let error = client(&server)
        .query("x", &mut widget, &Arguments::new())
        .await
        .unwrap_err();

    assert_eq!(error.status(), Some(503));
    assert_eq!(widget.id, "");
}

#[tokio::test]
async fn test_transport_error_is_surfaced() {
    // Bind and release a port so nothing is listening on it.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);
    let url = Endpoint::new(format!("http://{address}/graphql")).unwrap();

    let client = GraphqlClient::new(&ClientConfig::builder().endpoint(url).build());
    let mut widget = Widget::default();
    let error = client
        .query("x", &mut widget, &Arguments::new())
        .await
        .unwrap_err();

    assert!(matches!(error, ClientError::Transport(_)));
    assert!(error.to_string().starts_with("Network error: "));
}

// ============================================================================
// Selection Tests
// ============================================================================

#[test]
fn test_selection_is_cached_per_type() {
    let first = selection::<Widget>();
    let second = selection::<Widget>();
    assert!(std::sync::Arc::ptr_eq(&first, &second));
    assert_eq!(&*first, "id name");
}

#[test]
fn test_graphql_client_is_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphqlClient>();
}
