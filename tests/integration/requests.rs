//! Request pipeline against a mock instance.

use super::common::{builder_for, init_tracing};
use versionone_sdk::client::RequestFormat;
use versionone_sdk::{ConnectorConfig, Credentials, Payload};
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_get_data_normalizes_resource() {
    let mock_server = MockServer::start().await;
    let connector = builder_for(&mock_server).use_data_api().build();

    // Data prefix ends in '/', and the resource gains its own leading one.
    Mock::given(method("GET"))
        .and(path("/inst/rest-1.v1/Data//Story/1005"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<Asset id=\"Story:1005\"/>", "text/xml"))
        .expect(2)
        .mount(&mock_server)
        .await;

    let plain = connector.get_data(Some("Story/1005")).await.unwrap();
    let slashed = connector.get_data(Some("/Story/1005")).await.unwrap();
    assert_eq!(plain, slashed);
    assert_eq!(&plain[..], b"<Asset id=\"Story:1005\"/>");
}

#[tokio::test]
async fn test_endpoint_switch_between_requests() {
    let mock_server = MockServer::start().await;
    let mut connector = builder_for(&mock_server).use_meta_api().build();

    Mock::given(method("GET"))
        .and(path("/inst/meta.v1//Story"))
        .respond_with(ResponseTemplate::new(200).set_body_string("meta"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/inst/loc-2.v1//Story"))
        .respond_with(ResponseTemplate::new(200).set_body_string("loc"))
        .mount(&mock_server)
        .await;

    assert_eq!(&connector.get_data(Some("Story")).await.unwrap()[..], b"meta");
    connector.use_loc2_api();
    assert_eq!(&connector.get_data(Some("Story")).await.unwrap()[..], b"loc");
}

#[tokio::test]
async fn test_new_api_without_resource() {
    let mock_server = MockServer::start().await;
    let connector = builder_for(&mock_server).use_new_api().build();

    Mock::given(method("GET"))
        .and(path("/inst/rest-1.v1/New"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<Asset/>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    connector.get_data(None).await.unwrap();
}

#[tokio::test]
async fn test_send_xml_and_json() {
    let mock_server = MockServer::start().await;
    let mut connector = builder_for(&mock_server).use_data_api().build();

    Mock::given(method("POST"))
        .and(path("/inst/rest-1.v1/Data//Story"))
        .and(header("Content-Type", "application/xml"))
        .and(body_string("<Asset/>"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<Asset id=\"Story:1\"/>"))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/inst/query.v1//"))
        .and(header("Content-Type", "application/json"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([[{"_oid": "Story:1"}]])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let created = connector
        .send_data(Some("Story"), Some(Payload::from("<Asset/>")), None)
        .await
        .unwrap();
    assert_eq!(&created[..], b"<Asset id=\"Story:1\"/>");

    connector.use_query_api();
    let rows = connector
        .send_data(
            Some("/"),
            Some(Payload::from(r#"{"from":"Story","select":["Name"]}"#)),
            Some(RequestFormat::Json.into()),
        )
        .await
        .unwrap();
    let rows: serde_json::Value = serde_json::from_slice(&rows).unwrap();
    assert_eq!(rows[0][0]["_oid"], "Story:1");
}

#[tokio::test]
async fn test_token_auth_header() {
    let mock_server = MockServer::start().await;
    let connector = versionone_sdk::V1Connector::with_instance_url(&mock_server.uri())
        .unwrap()
        .with_user_agent_header("App", "1.0")
        .unwrap()
        .with_credentials(Credentials::access_token("1.abc=").unwrap())
        .use_meta_api()
        .build();

    Mock::given(method("GET"))
        .and(header("Authorization", "Bearer 1.abc="))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    connector.get_data(Some("Story")).await.unwrap();
}

#[tokio::test]
async fn test_debug_logging_keeps_payload_intact() {
    init_tracing();
    let mock_server = MockServer::start().await;
    let connector = builder_for(&mock_server)
        .use_data_api()
        .with_config(ConnectorConfig::builder().with_debug(true).with_locale("en-GB").build())
        .build();
    assert!(connector.config().debug);

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0u8, 159, 146, 150], "application/octet-stream"))
        .mount(&mock_server)
        .await;

    let body = connector
        .send_data(Some("Attachment"), Some(Payload::from(vec![1u8, 2, 3])), Some("application/octet-stream"))
        .await
        .unwrap();
    assert_eq!(&body[..], &[0u8, 159, 146, 150]);
}
