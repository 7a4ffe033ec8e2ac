//! End-to-end tests of the Aliyun provider against a local mock gateway.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use smsgate_provider::provider::aliyun::{Signer, SIGNATURE_PARAM};
use smsgate_provider::{
    AliyunConfig, AliyunProvider, ErrorKind, MessageChannel, ProviderRegistry, RetryClass,
    SmsError, SmsProvider, TransportSettings,
};
use wiremock::matchers::{body_string_contains, header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SECRET: &str = "testsecret";

fn provider_for(server: &MockServer) -> AliyunProvider {
    provider_with_timeout(server, Duration::from_secs(5))
}

fn provider_with_timeout(server: &MockServer, timeout: Duration) -> AliyunProvider {
    let config = AliyunConfig::new("testid", SECRET, "Acme Inc").with_endpoint(server.uri());
    AliyunProvider::new(config, &TransportSettings::with_timeout(timeout)).unwrap()
}

fn form_params(body: &[u8]) -> BTreeMap<String, String> {
    url::form_urlencoded::parse(body).into_owned().collect()
}

#[tokio::test]
async fn send_success_returns_biz_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("Action=SendSms"))
        .and(body_string_contains("Signature="))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Message": "OK",
            "RequestId": "F655A8D5-B967-440B-8683-DAD6FF8DE990",
            "Code": "OK",
            "BizId": "123"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let id = provider_for(&server)
        .send_message("13800138000", "SMS_123456", MessageChannel::Sms, "654321")
        .await
        .unwrap();

    assert_eq!(id, "123");
}

#[tokio::test]
async fn posted_form_carries_verifiable_signature() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"Code": "OK", "BizId": "1"})),
        )
        .mount(&server)
        .await;

    provider_for(&server)
        .send_message("+86 138 0013 8000", "SMS_123456", MessageChannel::Sms, "654321")
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let params = form_params(&requests[0].body);
    assert_eq!(params["PhoneNumbers"], "+86 138 0013 8000");
    assert_eq!(params["SignName"], "Acme Inc");
    assert_eq!(params["TemplateCode"], "SMS_123456");
    assert_eq!(params["TemplateParam"], r#"{"code":"654321"}"#);
    assert!(!params.contains_key("SmsUpExtendCode"));

    // The gateway recomputes the signature over everything but `Signature`.
    let expected = Signer::new(SECRET).unwrap().sign(&params);
    assert_eq!(params[SIGNATURE_PARAM], expected);
}

#[tokio::test]
async fn consecutive_sends_use_distinct_nonces() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"Code": "OK", "BizId": "1"})),
        )
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    for _ in 0..3 {
        provider
            .send_message("13800138000", "SMS_1", MessageChannel::Sms, "1")
            .await
            .unwrap();
    }

    let requests = server.received_requests().await.unwrap();
    let mut nonces: Vec<String> = requests
        .iter()
        .map(|r| form_params(&r.body)["SignatureNonce"].clone())
        .collect();
    nonces.sort();
    nonces.dedup();
    assert_eq!(nonces.len(), 3);
}

#[tokio::test]
async fn vendor_rejection_is_passed_through_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Code": "isv.MOBILE_NUMBER_ILLEGAL",
            "Message": "bad number",
            "RequestId": "req-42"
        })))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .send_message("not-a-number", "SMS_1", MessageChannel::Sms, "1")
        .await
        .unwrap_err();

    assert_eq!(err.retry_class(), RetryClass::CallerPolicy);
    match err {
        SmsError::VendorRejection {
            code,
            message,
            request_id,
            status,
            ..
        } => {
            assert_eq!(code, "isv.MOBILE_NUMBER_ILLEGAL");
            assert_eq!(message, "bad number");
            assert_eq!(request_id.as_deref(), Some("req-42"));
            assert_eq!(status, 200);
        }
        other => panic!("expected VendorRejection, got {:?}", other),
    }
}

#[tokio::test]
async fn non_json_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .send_message("13800138000", "SMS_1", MessageChannel::Sms, "1")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ResponseDecode);
    assert_eq!(err.retry_class(), RetryClass::Never);
}

#[tokio::test]
async fn slow_gateway_times_out_as_retryable_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"Code": "OK", "BizId": "late"}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let err = provider_with_timeout(&server, Duration::from_millis(50))
        .send_message("13800138000", "SMS_1", MessageChannel::Sms, "1")
        .await
        .unwrap_err();

    assert!(err.is_retryable());
    match err {
        SmsError::Transport { timed_out, .. } => assert!(timed_out),
        other => panic!("expected Transport, got {:?}", other),
    }
}

#[tokio::test]
async fn unreachable_gateway_is_transport_error() {
    // Nothing listens on port 1.
    let config = AliyunConfig::new("testid", SECRET, "Acme").with_endpoint("http://127.0.0.1:1/");
    let provider = AliyunProvider::new(config, &TransportSettings::default()).unwrap();

    let err = provider
        .send_message("13800138000", "SMS_1", MessageChannel::Sms, "1")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn non_sms_channel_never_reaches_gateway() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    for phone in ["13800138000", "", "+1 (555) 010-9999"] {
        let err = provider
            .send_message(phone, "any message", MessageChannel::Whatsapp, "1")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedChannel);
    }

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn extend_code_is_sent_when_configured() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("SmsUpExtendCode=90999"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"Code": "OK", "BizId": "7"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = AliyunConfig::new("testid", SECRET, "Acme")
        .with_endpoint(server.uri())
        .with_extend_code("90999");
    let provider = AliyunProvider::new(config, &TransportSettings::default()).unwrap();

    let id = provider
        .send_message("13800138000", "SMS_1", MessageChannel::Sms, "1")
        .await
        .unwrap();
    assert_eq!(id, "7");
}

#[tokio::test]
async fn registry_routes_sms_to_aliyun() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"Code": "OK", "BizId": "99"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let providers: Vec<Arc<dyn SmsProvider>> = vec![Arc::new(provider_for(&server))];
    let registry = ProviderRegistry::new(providers);

    let id = registry
        .send_message("13800138000", "SMS_1", MessageChannel::Sms, "1")
        .await
        .unwrap();
    assert_eq!(id, "99");

    let err = registry
        .send_message("13800138000", "SMS_1", MessageChannel::Whatsapp, "1")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedChannel);

    let err = registry.verify_otp("13800138000", "1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedCapability);
}
