use serde_json::json;
use time::macros::datetime;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use apirone_api_client::types::{
    AddressesBuilder, CallbackBuilder, DestinationsBuilder, Fee, HistoryBuilder, HistoryItemType,
    InvoiceBuilder, SettingsBuilder, TransferBuilder,
};
use apirone_api_client::{Account, ApironeClient, Wallet};

fn build_client(server: &MockServer) -> ApironeClient {
    ApironeClient::builder()
        .base_url(server.uri())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_account_from_json_and_transfer_estimation() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/accounts/apr-1/transfer"))
        .and(query_param("currency", "btc"))
        .and(query_param("destinations", "addr1:1000,addr2:50%"))
        .and(query_param("fee", "priority"))
        .and(query_param_is_missing("transfer-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 1500})))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let account = Account::from_json(&client, &json!({"account": "apr-1", "transfer-key": "tk"}))
        .unwrap();
    assert_eq!(account.id(), "apr-1");

    let transfer = TransferBuilder::new()
        .add_destination("addr1", "1000")
        .unwrap()
        .add_destination("addr2", "50%")
        .unwrap()
        .fee(Fee::Priority);
    let estimation = account.estimation("btc", &transfer).await.unwrap();
    assert_eq!(estimation["total"], 1500);
}

#[tokio::test]
async fn test_account_history_filter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/accounts/apr-1/history"))
        .and(query_param("currency", "btc"))
        .and(query_param("limit", "10"))
        .and(query_param(
            "q",
            "date_from:2024-01-01T00:00:00Z,item_type:payment",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let history = HistoryBuilder::new()
        .currency("btc")
        .limit(10)
        .date_from(datetime!(2024-01-01 0:00 UTC))
        .item_type(HistoryItemType::Payment);
    let items = client.account("apr-1").history(history).await.unwrap();
    assert_eq!(items["items"], json!([]));
}

#[tokio::test]
async fn test_account_generate_address_with_callback() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/accounts/apr-1/addresses"))
        .and(body_json(json!({
            "currency": "btc",
            "addr-type": "p2wpkh",
            "callback": {
                "url": "https://shop.example/cb",
                "method": "POST",
                "data": [{"order": "42"}]
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"address": "bc1q"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let callback = CallbackBuilder::new()
        .url("https://shop.example/cb")
        .method("post")
        .data_item("order", "42");
    let address = client
        .account("apr-1")
        .generate_address("btc", Some("p2wpkh"), Some(callback))
        .await
        .unwrap();
    assert_eq!(address["address"], "bc1q");
}

#[tokio::test]
async fn test_account_addresses_and_balance() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/accounts/apr-1/addresses"))
        .and(query_param("currency", "ltc"))
        .and(query_param("q", "empty:false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"addresses": []})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/accounts/apr-1/balance"))
        .and(query_param("addresses", "a1,a2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"balance": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let account = client.account("apr-1");
    account
        .addresses("ltc", AddressesBuilder::new().empty(false))
        .await
        .unwrap();
    account.balance(None, &["a1", "a2"]).await.unwrap();
}

#[tokio::test]
async fn test_invoice_lifecycle() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/accounts/apr-1/invoices"))
        .and(body_json(json!({
            "currency": "btc",
            "amount": 15000,
            "lifetime": 3600,
            "user-data": {"merchant": "Shop", "price": {"currency": "usd", "amount": 10}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"invoice": "inv-1"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/invoices/inv-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "created"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/accounts/apr-1/invoices/inv-1"))
        .and(query_param("transfer-key", "tk"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"callback-url": "x"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let account = client.account("apr-1").transfer_key("tk");

    let invoice = InvoiceBuilder::new("btc")
        .amount(15_000)
        .lifetime(3600)
        .merchant("Shop")
        .price("usd", 10);
    let created = account.invoice_create(invoice).await.unwrap();
    let id = created["invoice"].as_str().unwrap();

    let public = account.invoice_info(id, false).await.unwrap();
    assert_eq!(public["status"], "created");
    let private = account.invoice_info(id, true).await.unwrap();
    assert_eq!(private["callback-url"], "x");
}

#[tokio::test]
async fn test_wallet_create_and_settings() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/wallets"))
        .and(body_json(json!({
            "currency": "btc",
            "destinations": [{"address": "addr1", "amount": "100%"}],
            "fee": "normal"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "wallet": "btc-1",
            "transfer-key": "wk"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/v2/wallets/btc-1"))
        .and(header("authorization", "Bearer jwt"))
        .and(body_json(json!({"callback": {"url": "https://shop.example/cb"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"wallet": "btc-1"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let settings = SettingsBuilder::new()
        .destinations(DestinationsBuilder::new().add("addr1", "100%").unwrap())
        .fee(Fee::Normal);
    let created = client.create_wallet("btc", settings).await.unwrap();

    let wallet = Wallet::from_json(&client, &created).unwrap().token("jwt");
    assert_eq!(wallet.id(), "btc-1");
    wallet
        .settings(SettingsBuilder::new().callback(CallbackBuilder::new().url("https://shop.example/cb")))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_wallet_transfer_with_transfer_key() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/wallets/btc-1/transfer"))
        .and(body_json(json!({
            "destinations": [{"address": "addr1", "amount": "5000"}],
            "subtract-fee-from-amount": true,
            "transfer-key": "wk"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"txs": ["t1"]})))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let transfer = TransferBuilder::new()
        .add_destination("addr1", "5000")
        .unwrap()
        .subtract_fee_from_amount(true);
    let result = client
        .wallet("btc-1")
        .transfer_key("wk")
        .transfer(transfer)
        .await
        .unwrap();
    assert_eq!(result["txs"][0], "t1");
}

#[tokio::test]
async fn test_service_endpoints() {
    let server = MockServer::start().await;

    Mock::given(method("OPTIONS"))
        .and(path("/v2/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"currencies": [{"abbr": "btc"}]})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/networks/btc/fee"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"fee": 1}])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/ticker"))
        .and(query_param("currency", "btc"))
        .and(query_param_is_missing("fiat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"usd": 60000})))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let info = client.account_service_info().await.unwrap();
    assert_eq!(info["currencies"][0]["abbr"], "btc");
    let fee = client.network_fee("btc").await.unwrap();
    assert!(fee.is_array());
    let ticker = client.ticker(Some("btc"), None).await.unwrap();
    assert_eq!(ticker["usd"], 60000);
}

#[tokio::test]
async fn test_refresh_and_logout_use_bearer_header() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/auth/refresh-token"))
        .and(header("authorization", "Bearer refresh-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access-token": "a2"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2/auth/logout"))
        .and(header("authorization", "Bearer a2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let tokens = client.refresh("refresh-1").await.unwrap();
    let access = tokens["access-token"].as_str().unwrap();
    client.logout(access).await.unwrap();

    for request in server.received_requests().await.unwrap() {
        assert!(request.body.is_empty());
    }
}
