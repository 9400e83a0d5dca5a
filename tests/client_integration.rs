use std::sync::{Arc, Mutex};

use reqwest::Method;
use reqwest::header::HeaderMap;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use apirone_api_client::logging::{LogContext, LogLevel, SinkError, SinkFailurePolicy};
use apirone_api_client::{ApironeClient, ApironeError, ErrorKind};

type Records = Arc<Mutex<Vec<(LogLevel, String, LogContext)>>>;

fn build_client(server: &MockServer) -> ApironeClient {
    ApironeClient::builder()
        .base_url(server.uri())
        .build()
        .unwrap()
}

fn build_logged_client(server: &MockServer, policy: SinkFailurePolicy, fail: bool) -> (ApironeClient, Records) {
    let records: Records = Arc::default();
    let captured = records.clone();
    let client = ApironeClient::builder()
        .base_url(server.uri())
        .sink_failure_policy(policy)
        .logger_fn(move |level, message, context| -> Result<(), SinkError> {
            captured
                .lock()
                .unwrap()
                .push((level, message.to_string(), context.clone()));
            if fail { Err("sink unavailable".into()) } else { Ok(()) }
        })
        .build()
        .unwrap();
    (client, records)
}

#[tokio::test]
async fn test_get_balance() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/accounts/ABC/balance"))
        .and(query_param("currency", "btc"))
        .and(header("accept", "application/json"))
        .and(header("accept-charset", "utf-8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"balance": 100})))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let balance: Value = client
        .get("v2/accounts/ABC/balance", json!({"currency": "btc"}).as_object().unwrap().clone())
        .await
        .unwrap();

    assert_eq!(balance, json!({"balance": 100}));

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
    assert!(requests[0].headers.get("content-type").is_none());
}

#[tokio::test]
async fn test_not_found_carries_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/accounts/ABC/balance"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "account not found"})),
        )
        .mount(&server)
        .await;

    let client = build_client(&server);
    let result = client
        .get::<Value>("v2/accounts/ABC/balance", "currency=btc")
        .await;

    match result {
        Err(ApironeError::NotFound(error)) => {
            assert_eq!(error.status, 404);
            assert_eq!(error.message, "account not found");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_status_mapping() {
    let server = MockServer::start().await;

    for (status, code) in [
        ("bad", 400),
        ("unauthorized", 401),
        ("forbidden", 403),
        ("method", 405),
        ("teapot", 418),
        ("broken", 500),
        ("unavailable", 503),
    ] {
        Mock::given(method("GET"))
            .and(path(format!("/v2/{status}")))
            .respond_with(ResponseTemplate::new(code).set_body_string("plain failure"))
            .mount(&server)
            .await;
    }

    let client = build_client(&server);
    let kind = |path: &'static str| {
        let client = client.clone();
        async move {
            let err = client.get::<Value>(path, ()).await.unwrap_err();
            assert_eq!(err.api_error().unwrap().message, "plain failure");
            (err.kind(), err.status())
        }
    };

    assert_eq!(kind("v2/bad").await, (ErrorKind::ValidationFailed, Some(400)));
    assert_eq!(kind("v2/unauthorized").await, (ErrorKind::Unauthorized, Some(401)));
    assert_eq!(kind("v2/forbidden").await, (ErrorKind::Forbidden, Some(403)));
    assert_eq!(kind("v2/method").await, (ErrorKind::MethodNotAllowed, Some(405)));
    assert_eq!(kind("v2/teapot").await, (ErrorKind::Generic, Some(418)));
    assert_eq!(kind("v2/broken").await, (ErrorKind::InternalServerError, Some(500)));
    assert_eq!(kind("v2/unavailable").await, (ErrorKind::Generic, Some(503)));
}

#[tokio::test]
async fn test_post_empty_options_sends_no_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "account": "apr-new",
            "transfer-key": "new-key"
        })))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let created = client.create_account().await.unwrap();
    assert_eq!(created["account"], "apr-new");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].body.is_empty());
    assert!(requests[0].headers.get("content-type").is_none());
}

#[tokio::test]
async fn test_post_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/auth/login"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"login": "apr-1", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access-token": "jwt"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let tokens = client.login("apr-1", "pw").await.unwrap();
    assert_eq!(tokens["access-token"], "jwt");
}

#[tokio::test]
async fn test_audit_log_masks_login_tokens() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access-token": "jwt-access",
            "refresh-token": "jwt-refresh"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, records) = build_logged_client(&server, SinkFailurePolicy::Ignore, false);
    let tokens = client.login("apr-1", "hunter2").await.unwrap();
    assert_eq!(tokens["access-token"], "jwt-access");

    let records = records.lock().unwrap();
    assert_eq!(records.len(), 1);
    let context = &records[0].2;
    let logged = serde_json::to_string(context).unwrap();
    assert!(!logged.contains("hunter2"));
    assert!(!logged.contains("jwt-access"));
    assert!(!logged.contains("jwt-refresh"));
    assert_eq!(context["_params"]["login"], "apr-1");
    assert_eq!(context["_response"]["body"]["refresh-token"], "[REDACTED]");
}

#[tokio::test]
async fn test_empty_and_null_bodies_fail_to_decode() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/empty"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/null"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/html"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let client = build_client(&server);
    for path in ["v2/empty", "v2/null", "v2/html"] {
        let err = client.get::<Value>(path, ()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeFailure, "{path}");
        assert_eq!(err.status(), None);
    }
}

#[tokio::test]
async fn test_options_ignores_options_and_caller_headers_win() {
    let server = MockServer::start().await;

    Mock::given(method("OPTIONS"))
        .and(path("/v2/wallets"))
        .and(header("accept", "text/plain"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"currencies": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let mut headers = HeaderMap::new();
    headers.insert("accept", "text/plain".parse().unwrap());
    let info: Value = client
        .request(Method::OPTIONS, "v2/wallets", "ignored=1", headers)
        .await
        .unwrap();
    assert_eq!(info, json!({"currencies": []}));

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].url.query().is_none());
    assert!(requests[0].body.is_empty());
    assert_eq!(requests[0].headers.get_all("accept").iter().count(), 1);
}

#[tokio::test]
async fn test_user_agent_suffix_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/ticker"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"usd": 1})))
        .mount(&server)
        .await;

    let client = ApironeClient::builder()
        .base_url(server.uri())
        .user_agent("shop/1.0")
        .build()
        .unwrap();
    client.ticker(None, None).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let agent = requests[0].headers.get("user-agent").unwrap().to_str().unwrap();
    assert!(agent.starts_with("apirone-api-client/"));
    assert!(agent.ends_with(" shop/1.0"));
    assert!(requests[0].url.query().is_none());
}

#[tokio::test]
async fn test_audit_log_masks_transfer_key() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/accounts/apr-1/transfer"))
        .and(body_json(json!({
            "currency": "btc",
            "transfer-key": "tk-secret",
            "destinations": [{"address": "addr1", "amount": "1000"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "account": "apr-1",
            "transfer-key": "tk-secret",
            "txs": ["tx1"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, records) = build_logged_client(&server, SinkFailurePolicy::Ignore, false);
    let transfer = apirone_api_client::types::TransferBuilder::new()
        .add_destination("addr1", "1000")
        .unwrap();
    let result = client
        .account("apr-1")
        .transfer_key("tk-secret")
        .transfer("btc", transfer)
        .await
        .unwrap();
    assert_eq!(result["txs"][0], "tx1");

    let records = records.lock().unwrap();
    assert_eq!(records.len(), 1);
    let (level, message, context) = &records[0];
    assert_eq!(*level, LogLevel::Info);
    assert!(message.contains("POST v2/accounts/apr-1/transfer"));

    let logged = serde_json::to_string(context).unwrap();
    assert!(!logged.contains("tk-secret"));
    assert_eq!(context["_params"]["transfer-key"], "[REDACTED]");
    assert_eq!(context["_response"]["body"]["transfer-key"], "[REDACTED]");
    assert_eq!(context["_response"]["code"], 200);
}

#[tokio::test]
async fn test_audit_log_error_level_and_token_masking() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/accounts/apr-1/invoices"))
        .and(header("authorization", "Bearer jwt-secret"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "token expired"})))
        .mount(&server)
        .await;

    let (client, records) = build_logged_client(&server, SinkFailurePolicy::Ignore, false);
    let err = client
        .account("apr-1")
        .token("jwt-secret")
        .invoices_list(())
        .await
        .unwrap_err();
    assert!(matches!(err, ApironeError::Unauthorized(ref e) if e.message == "token expired"));

    let records = records.lock().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].0, LogLevel::Error);
    assert!(records[0].1.contains("token expired"));
    assert_eq!(records[0].2["_headers"]["authorization"], "Bearer [REDACTED]");
    assert!(!serde_json::to_string(&records[0].2).unwrap().contains("jwt-secret"));
}

#[tokio::test]
async fn test_sink_failure_policies() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/ticker"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"usd": 1})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/networks/xyz/fee"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "unknown"})))
        .mount(&server)
        .await;

    let (client, _) = build_logged_client(&server, SinkFailurePolicy::Ignore, true);
    assert!(client.ticker(None, None).await.is_ok());

    let (client, records) = build_logged_client(&server, SinkFailurePolicy::Propagate, true);
    let err = client.ticker(None, None).await.unwrap_err();
    assert!(matches!(err, ApironeError::LogSink(ref m) if m == "sink unavailable"));

    // The API error wins over the sink failure.
    let err = client.network_fee("xyz").await.unwrap_err();
    assert!(matches!(err, ApironeError::NotFound(_)));
    assert_eq!(records.lock().unwrap().len(), 2);
}
