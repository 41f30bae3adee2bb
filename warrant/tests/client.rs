//! Wire-level tests against a mock Warrant server.

use serde_json::{json, Value};
use warrant::{
    CheckOp, CheckResult, Config, ErrorKind, ListOptions, ObjectRef, ObjectType, Query,
    QueryClause, RequestOptions, SelfServiceStrategy, Subject, WarrantCheck, WarrantClient,
    WarrantError, WarrantFilter, USER_AGENT,
};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> WarrantClient {
    let config = Config::builder()
        .api_key("api_test_123")
        .api_endpoint(server.uri())
        .build()
        .unwrap();
    WarrantClient::new(config).unwrap()
}

fn report_check() -> WarrantCheck {
    WarrantCheck::new(
        &ObjectRef::new("report", "q3"),
        "viewer",
        &Subject::new("user", "42"),
    )
}

#[tokio::test]
async fn test_sends_auth_and_user_agent_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/objects/user/42"))
        .and(header("authorization", "ApiKey api_test_123"))
        .and(header("user-agent", USER_AGENT))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"objectType": "user", "objectId": "42"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let object = client_for(&server)
        .get_object(&ObjectRef::new("user", "42"), &RequestOptions::default())
        .await
        .unwrap();

    assert_eq!(object.object_id, "42");
    assert_eq!(object.meta, None);
}

#[tokio::test]
async fn test_omits_authorization_without_api_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/objects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .mount(&server)
        .await;

    let config = Config::builder().api_endpoint(server.uri()).build().unwrap();
    WarrantClient::new(config)
        .unwrap()
        .list_objects(None, &ListOptions::default(), &RequestOptions::default())
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
    assert!(requests[0].headers.get("warrant-token").is_none());
}

#[tokio::test]
async fn test_forwards_warrant_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/check"))
        .and(header("warrant-token", "tok_abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "Authorized"})))
        .expect(1)
        .mount(&server)
        .await;

    let allowed = client_for(&server)
        .is_authorized(&report_check(), &RequestOptions::with_warrant_token("tok_abc"))
        .await
        .unwrap();

    assert!(allowed);
}

#[tokio::test]
async fn test_list_objects_query_string_is_camel_case() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/objects"))
        .and(query_param("objectType", "tenant"))
        .and(query_param("limit", "2"))
        .and(query_param("nextCursor", "c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"objectType": "tenant", "objectId": "acme", "meta": {"display_name": "Acme"}},
                {"objectType": "tenant", "objectId": "globex"}
            ],
            "prevCursor": "c0",
            "nextCursor": "c2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server)
        .list_objects(
            Some("tenant"),
            &ListOptions::default().limit(2).after("c1"),
            &RequestOptions::default(),
        )
        .await
        .unwrap();

    assert_eq!(page.results.len(), 2);
    assert_eq!(page.results[0].meta, Some(json!({"display_name": "Acme"})));
    assert_eq!(page.prev_cursor.as_deref(), Some("c0"));
    assert_eq!(page.next_cursor.as_deref(), Some("c2"));
}

#[tokio::test]
async fn test_create_object_camelizes_meta_keys() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/objects"))
        .and(body_json(json!({
            "objectType": "tenant",
            "objectId": "acme",
            "meta": {"displayName": "Acme"}
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Warrant-Token", "tok_1")
                .set_body_json(json!({
                    "objectType": "tenant",
                    "objectId": "acme",
                    "meta": {"displayName": "Acme"},
                    "createdAt": "2024-01-02T03:04:05Z"
                })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let object = client_for(&server)
        .create_object(
            ObjectType::Tenant,
            Some("acme"),
            Some(json!({"display_name": "Acme"})),
            &RequestOptions::default(),
        )
        .await
        .unwrap();

    assert_eq!(object.warrant_token.as_deref(), Some("tok_1"));
    assert_eq!(object.meta, Some(json!({"displayName": "Acme"})));
    assert!(object.created_at.is_some());
}

#[tokio::test]
async fn test_duplicate_record_is_classified() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/objects"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "code": "duplicate_record",
            "message": "DuplicateRecord"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_object("user", Some("42"), None, &RequestOptions::default())
        .await
        .unwrap_err();

    let api = err.as_api_error().unwrap();
    assert_eq!(api.kind(), ErrorKind::DuplicateRecord);
    assert_eq!(api.status().as_u16(), 409);
    assert_eq!(api.message(), "duplicate_record");
}

#[tokio::test]
async fn test_non_json_error_body_is_generic() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/objects/user/42"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_object(&ObjectRef::new("user", "42"), &RequestOptions::default())
        .await
        .unwrap_err();

    let api = err.as_api_error().unwrap();
    assert_eq!(api.kind(), ErrorKind::Generic);
    assert_eq!(api.body(), "bad gateway");
    assert_eq!(api.json(), &Value::Null);
}

#[tokio::test]
async fn test_check_verdicts() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/check"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"code": 403, "result": "Not Authorized"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client
        .check(&report_check(), &RequestOptions::default())
        .await
        .unwrap();

    assert_eq!(result, CheckResult::Decision(false));
    assert!(!client
        .has_permission("view-reports", &Subject::new("user", "42"), &RequestOptions::default())
        .await
        .unwrap());
}

#[tokio::test]
async fn test_check_many_with_debug_still_yields_verdict() {
    let server = MockServer::start().await;
    let debug_body = json!({"result": "Authorized", "processingTime": 12, "decisionPath": {}});

    Mock::given(method("POST"))
        .and(path("/v2/check"))
        .and(body_json(json!({
            "op": "anyOf",
            "debug": true,
            "warrants": [{
                "objectType": "report",
                "objectId": "q3",
                "relation": "viewer",
                "subject": "user:42"
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(debug_body.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .check_many(CheckOp::AnyOf, &[report_check()], true, &RequestOptions::default())
        .await
        .unwrap();

    assert_eq!(result, CheckResult::Decision(true));
}

#[tokio::test]
async fn test_is_authorized_rejects_unknown_result() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/check"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "Maybe"})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .is_authorized(&report_check(), &RequestOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, WarrantError::UnexpectedResponse(_)));
}

#[tokio::test]
async fn test_query_sends_rendered_expression() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/query"))
        .and(query_param("q", "SELECT permission FOR subject=user:42"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{
                "objectType": "permission",
                "objectId": "view-reports",
                "warrant": {
                    "objectType": "permission",
                    "objectId": "view-reports",
                    "relation": "member",
                    "subject": {"objectType": "user", "objectId": "42"}
                },
                "isImplicit": false
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = Query::new()
        .select(["permission"])
        .for_clause(QueryClause::subject(Subject::new("user", "42")));

    let page = client_for(&server)
        .query(&query, &ListOptions::default().limit(10), &RequestOptions::default())
        .await
        .unwrap();

    assert_eq!(page.results.len(), 1);
    assert_eq!(page.results[0].warrant.subject, Subject::new("user", "42"));
    assert_eq!(page.next_cursor, None);
}

#[tokio::test]
async fn test_incomplete_query_makes_no_request() {
    let server = MockServer::start().await;

    let err = client_for(&server)
        .query(&Query::new().select(["role"]), &ListOptions::default(), &RequestOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, WarrantError::InvalidQuery(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_warrant_returns_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/warrants"))
        .and(body_json(json!({
            "objectType": "role",
            "objectId": "admin",
            "relation": "member",
            "subject": {"objectType": "user", "objectId": "42"}
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Warrant-Token", "tok_w1")
                .set_body_json(json!({
                    "objectType": "role",
                    "objectId": "admin",
                    "relation": "member",
                    "subject": {"objectType": "user", "objectId": "42"}
                })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let warrant = client_for(&server)
        .assign_role_to_user("admin", "42", &RequestOptions::default())
        .await
        .unwrap();

    assert_eq!(warrant.relation, "member");
    assert_eq!(warrant.warrant_token.as_deref(), Some("tok_w1"));
}

#[tokio::test]
async fn test_delete_warrant_sends_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v2/warrants"))
        .and(body_json(json!({
            "objectType": "feature",
            "objectId": "sso",
            "relation": "member",
            "subject": {"objectType": "tenant", "objectId": "acme"}
        })))
        .respond_with(ResponseTemplate::new(200).insert_header("Warrant-Token", "tok_d1"))
        .expect(1)
        .mount(&server)
        .await;

    let token = client_for(&server)
        .remove_feature_from_tenant("sso", "acme", &RequestOptions::default())
        .await
        .unwrap();

    assert_eq!(token.as_deref(), Some("tok_d1"));
}

#[tokio::test]
async fn test_list_warrants_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/warrants"))
        .and(query_param("objectType", "role"))
        .and(query_param("subjectType", "user"))
        .and(query_param("subjectId", "42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&server)
        .await;

    let filter = WarrantFilter {
        object_type: Some("role".into()),
        ..WarrantFilter::subject(&Subject::new("user", "42"))
    };
    let page = client_for(&server)
        .list_warrants(&filter, &ListOptions::default(), &RequestOptions::default())
        .await
        .unwrap();

    assert!(page.results.is_empty());
}

#[tokio::test]
async fn test_self_service_session_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/sessions"))
        .and(body_json(json!({
            "type": "ssdash",
            "userId": "42",
            "tenantId": "acme",
            "selfServiceStrategy": "fgac"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "sess_xyz"})))
        .expect(1)
        .mount(&server)
        .await;

    let config = Config::builder()
        .api_key("api_test_123")
        .api_endpoint(server.uri())
        .self_service_dash_url("https://dash.example.com")
        .build()
        .unwrap();
    let url = WarrantClient::new(config)
        .unwrap()
        .create_self_service_session(
            "42",
            "acme",
            SelfServiceStrategy::Fgac,
            "https://app.example.com/settings",
            None,
            &RequestOptions::default(),
        )
        .await
        .unwrap();

    assert_eq!(
        url.as_str(),
        "https://dash.example.com/sess_xyz?redirectUrl=https%3A%2F%2Fapp.example.com%2Fsettings"
    );
}

#[tokio::test]
async fn test_authorization_session_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/sessions"))
        .and(body_json(json!({"type": "sess", "userId": "42", "ttl": 3600})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "sess_abc"})))
        .expect(1)
        .mount(&server)
        .await;

    let token = client_for(&server)
        .create_authorization_session("42", None, Some(3600), &RequestOptions::default())
        .await
        .unwrap();

    assert_eq!(token, "sess_abc");
}

#[tokio::test]
async fn test_delete_object_without_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v2/objects/user/42"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let token = client_for(&server)
        .delete_object(&ObjectRef::new("user", "42"), &RequestOptions::default())
        .await
        .unwrap();

    assert_eq!(token, None);
    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_use_ssl_false_downgrades_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/objects/role/admin"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"objectType": "role", "objectId": "admin"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let https_uri = server.uri().replacen("http://", "https://", 1);
    let config = Config::builder()
        .api_endpoint(https_uri)
        .use_ssl(false)
        .build()
        .unwrap();
    let object = WarrantClient::new(config)
        .unwrap()
        .get_object(&ObjectRef::new("role", "admin"), &RequestOptions::default())
        .await
        .unwrap();

    assert_eq!(object.object_type, "role");
}

#[tokio::test]
async fn test_update_object_camelizes_meta_keys() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v2/objects/user/1"))
        .and(body_json(json!({"meta": {"fullName": "x", "prefs": {"dark_mode": true}}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "objectType": "user",
            "objectId": "1",
            "meta": {"fullName": "x", "prefs": {"darkMode": true}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .update_object(
            &ObjectRef::new("user", "1"),
            json!({"full_name": "x", "prefs": {"dark_mode": true}}),
            &RequestOptions::default(),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_self_service_session_url_follows_use_ssl() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "sess_xyz"})))
        .mount(&server)
        .await;

    let config = Config::builder()
        .api_endpoint(server.uri())
        .self_service_dash_url("https://dash.example.com")
        .use_ssl(false)
        .build()
        .unwrap();
    let url = WarrantClient::new(config)
        .unwrap()
        .create_self_service_session(
            "42",
            "acme",
            SelfServiceStrategy::Rbac,
            "http://localhost:3000",
            None,
            &RequestOptions::default(),
        )
        .await
        .unwrap();

    assert_eq!(url.scheme(), "http");
    assert_eq!(url.path(), "/sess_xyz");
}
