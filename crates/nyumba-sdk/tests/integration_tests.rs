//! Integration tests for the Nyumba SDK

use nyumba_sdk::payment::{PaymentError, PaymentFlow, PaymentOrder, PaymentOutcome, PollerConfig};
use nyumba_sdk::{
    ApiError, ClientBuilder, InquiryRequest, ListingQuery, ListingRequest, ListingStatus,
    NyumbaClient, PayRequest, RemotePaymentStatus, SettingsUpdate,
};
use rust_decimal_macros::dec;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> NyumbaClient {
    ClientBuilder::default()
        .base_url(server.uri())
        .with_bearer_token("test-token")
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

fn accepted(checkout_id: &str) -> serde_json::Value {
    json!({
        "mpesaRes": {
            "MerchantRequestID": "29115-34620561-1",
            "CheckoutRequestID": checkout_id,
            "ResponseCode": "0",
            "ResponseDescription": "Success. Request accepted for processing",
            "CustomerMessage": "Success. Request accepted for processing"
        }
    })
}

#[tokio::test]
async fn test_client_creation() {
    let client = ClientBuilder::default()
        .base_url("https://api.nyumba.co.ke")
        .timeout(Duration::from_secs(30))
        .build();

    assert!(client.is_ok());
}

#[tokio::test]
async fn test_initiate_payment_sends_body_and_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/payment/pay"))
        .and(header("Authorization", "Bearer test-token"))
        .and(header("Idempotency-Key", "key-1"))
        .and(body_partial_json(json!({
            "sender_id": "tenant-1",
            "phone": "254712345678",
            "amount": 25000.0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(accepted("ws_CO_1")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client
        .initiate_payment(
            &PayRequest {
                sender_id: "tenant-1".into(),
                phone: "254712345678".into(),
                amount: dec!(25000),
            },
            "key-1",
        )
        .await
        .unwrap();

    let mpesa = response.mpesa_res.unwrap();
    assert!(mpesa.is_accepted());
    assert_eq!(mpesa.correlation_id(), Some("ws_CO_1"));
}

#[tokio::test]
async fn test_payment_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/payment/status/ws_CO_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "mpesaReceiptNumber": "QKX12ABC"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let status = client.payment_status("ws_CO_1").await.unwrap();

    assert_eq!(status.status, RemotePaymentStatus::Success);
    assert_eq!(status.receipt.as_deref(), Some("QKX12ABC"));
}

#[tokio::test]
async fn test_list_listings_with_filter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/listings"))
        .and(query_param("location", "Kilimani"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "_id": "l-1",
                "title": "Two bedroom apartment",
                "location": "Kilimani",
                "price": 45000,
                "bedrooms": 2,
                "status": "available"
            }
        ])))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let query = ListingQuery {
        location: Some("Kilimani".into()),
        ..Default::default()
    };
    let listings = client.list_listings(Some(&query)).await.unwrap();

    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].id, "l-1");
    assert_eq!(listings[0].price, dec!(45000));
    assert_eq!(listings[0].status, ListingStatus::Available);
}

#[tokio::test]
async fn test_create_listing_validates_before_sending() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/listings"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let request = ListingRequest {
        title: "  ".into(),
        description: "Spacious".into(),
        location: "Westlands".into(),
        price: dec!(30000),
        bedrooms: None,
        property_type: None,
        status: ListingStatus::Draft,
        images: vec![],
    };
    let result = client.create_listing(&request).await;

    assert!(matches!(result, Err(ApiError::Validation { field, .. }) if field == "title"));
}

#[tokio::test]
async fn test_delete_listing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/listings/l-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client.delete_listing("l-1").await.unwrap();
}

#[tokio::test]
async fn test_get_tenant_balance() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tenants/t-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "t-1",
            "name": "Wanjiku",
            "phone": "254712345678",
            "property_id": "p-1",
            "rent_amount": 25000,
            "balance_due": 12500.5
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let tenant = client.get_tenant("t-1").await.unwrap();

    assert_eq!(tenant.balance_due, dec!(12500.5));
    assert!(tenant.email.is_none());
}

#[tokio::test]
async fn test_submit_inquiry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/inquiries"))
        .and(body_partial_json(json!({ "listing_id": "l-1", "email": "amina@example.com" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "_id": "inq-9",
            "message": "Inquiry received"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client
        .submit_inquiry(&InquiryRequest {
            listing_id: "l-1".into(),
            name: "Amina".into(),
            email: "amina@example.com".into(),
            phone: None,
            message: "Is parking included?".into(),
        })
        .await
        .unwrap();

    assert_eq!(response.id.as_deref(), Some("inq-9"));
}

#[tokio::test]
async fn test_update_settings_requires_a_field() {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);

    let result = client.update_settings(&SettingsUpdate::default()).await;
    assert!(matches!(result, Err(ApiError::Validation { .. })));
}

#[tokio::test]
async fn test_authentication_required() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tenants"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Token expired"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.list_tenants().await;

    match result.unwrap_err() {
        ApiError::Authentication { message } => assert_eq!(message, "Token expired"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/maintenance/m-404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "Maintenance request not found"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.get_maintenance_request("m-404").await;

    assert!(matches!(result, Err(ApiError::NotFound { .. })));
}

#[tokio::test]
async fn test_rate_limit_exceeded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/referrals"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.list_referrals().await.unwrap_err();

    assert!(matches!(err, ApiError::RateLimitExceeded));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_bad_request_carries_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/payment/pay"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "Invalid phone number"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let request = PayRequest {
        sender_id: "tenant-1".into(),
        phone: "0700".into(),
        amount: dec!(10),
    };
    let err = client.initiate_payment(&request, "key-2").await.unwrap_err();

    match err {
        ApiError::BadRequest { message } => assert_eq!(message, "Invalid phone number"),
        other => panic!("unexpected error: {other:?}"),
    }
}

// ===== Payment flow against a live mock backend =====

fn fast_polling() -> PollerConfig {
    PollerConfig::default().interval(Duration::from_millis(10))
}

async fn mount_status(server: &MockServer, status: &str, times: u64) {
    Mock::given(method("GET"))
        .and(path("/api/payment/status/ws_CO_42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": status })))
        .up_to_n_times(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_payment_flow_end_to_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/payment/pay"))
        .and(header_exists("Idempotency-Key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(accepted("ws_CO_42")))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_status(&mock_server, "pending", 3).await;
    mount_status(&mock_server, "success", 1).await;

    let flow = PaymentFlow::new(Arc::new(client_for(&mock_server)), fast_polling());
    let order = PaymentOrder::new("tenant-1", "254712345678").amount(dec!(25000));
    let report = flow.run(&order).await.unwrap();

    assert_eq!(report.outcome, PaymentOutcome::Succeeded);
    assert_eq!(report.queries, 4);
    assert!(report.message().contains("successfully"));
}

#[tokio::test]
async fn test_payment_flow_uses_balance_due() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tenants/tenant-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "tenant-1",
            "name": "Otieno",
            "phone": "254700000001",
            "property_id": "p-1",
            "rent_amount": 18000,
            "balance_due": 18000
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/payment/pay"))
        .and(body_partial_json(json!({ "amount": 18000.0 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(accepted("ws_CO_42")))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_status(&mock_server, "failed", 1).await;

    let flow = PaymentFlow::new(Arc::new(client_for(&mock_server)), fast_polling());
    let report = flow
        .run(&PaymentOrder::new("tenant-1", "254700000001"))
        .await
        .unwrap();

    assert_eq!(report.outcome, PaymentOutcome::Failed);
    assert_eq!(report.attempt.amount, dec!(18000));
}

#[tokio::test]
async fn test_payment_flow_rejected_initiation_never_polls() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/payment/pay"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "M-Pesa gateway error"
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/payment/status/ws_CO_42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
        .expect(0)
        .mount(&mock_server)
        .await;

    let flow = PaymentFlow::new(Arc::new(client_for(&mock_server)), fast_polling());
    let order = PaymentOrder::new("tenant-1", "254712345678").amount(dec!(500));
    let result = flow.run(&order).await;

    assert!(matches!(result, Err(PaymentError::Initiation(_))));
}

#[tokio::test]
async fn test_payment_flow_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/payment/pay"))
        .respond_with(ResponseTemplate::new(200).set_body_json(accepted("ws_CO_42")))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/payment/status/ws_CO_42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "pending" })))
        .expect(4)
        .mount(&mock_server)
        .await;

    let config = fast_polling().max_attempts(4);
    let flow = PaymentFlow::new(Arc::new(client_for(&mock_server)), config);
    let order = PaymentOrder::new("tenant-1", "254712345678").amount(dec!(500));
    let report = flow.run(&order).await.unwrap();

    assert_eq!(report.outcome, PaymentOutcome::TimedOut);
    assert_eq!(report.queries, 4);
}
