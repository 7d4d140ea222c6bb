//! Service failures surfaced as transport errors.

use super::common::builder_for;
use versionone_sdk::{ErrorKind, Payload};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_xml_message_in_transport_error() {
    let mock_server = MockServer::start().await;
    let connector = builder_for(&mock_server).use_data_api().build();

    Mock::given(method("POST"))
        .and(path("/inst/rest-1.v1/Data//Story"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_raw("<Error><Message>Access denied</Message></Error>", "text/xml; charset=utf-8"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = connector
        .send_data(Some("Story"), Some(Payload::from("<Asset/>")), Some("application/xml"))
        .await
        .unwrap_err();

    assert!(err.is_transport());
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.service_message(), Some("Access denied"));
    let text = err.to_string();
    assert!(text.contains("500"), "{text}");
    assert!(text.contains("Access denied"), "{text}");
}

#[tokio::test]
async fn test_innermost_xml_message_wins() {
    let mock_server = MockServer::start().await;
    let connector = builder_for(&mock_server).use_meta_api().build();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_raw(
            "<Error><Message>outer</Message><Exception><Message>inner</Message></Exception></Error>",
            "application/xml",
        ))
        .mount(&mock_server)
        .await;

    let err = connector.get_data(Some("Nope")).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.service_message(), Some("inner"));
}

#[tokio::test]
async fn test_xml_without_message_keeps_status_only() {
    let mock_server = MockServer::start().await;
    let connector = builder_for(&mock_server).use_data_api().build();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_raw("<Error><Code>1</Code></Error>", "text/xml"))
        .mount(&mock_server)
        .await;

    let err = connector.get_data(Some("Story/99999")).await.unwrap_err();
    match &err.kind {
        ErrorKind::Transport { status, message, .. } => {
            assert_eq!(*status, 404);
            assert!(message.is_none());
        }
        other => panic!("expected transport error, got {other:?}"),
    }
    assert_eq!(err.to_string(), "The remote server returned an error: (404) Not Found.");
}

#[tokio::test]
async fn test_malformed_xml_is_not_fatal() {
    let mock_server = MockServer::start().await;
    let connector = builder_for(&mock_server).use_data_api().build();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_raw("<Error><Message>half", "text/xml"))
        .mount(&mock_server)
        .await;

    let err = connector.get_data(Some("Story")).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(err.service_message().is_none());
}

#[tokio::test]
async fn test_json_exception_message() {
    let mock_server = MockServer::start().await;
    let connector = builder_for(&mock_server).use_query_api().build();

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({"exceptions": [{"message": "bad request"}]})),
        )
        .mount(&mock_server)
        .await;

    let err = connector
        .send_data(Some("/"), Some(Payload::from("{}")), Some("application/json"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(err.service_message(), Some("bad request"));
    assert!(err.to_string().ends_with(" bad request"));
}

#[tokio::test]
async fn test_string_send_data_returns_error_bodies() {
    let mock_server = MockServer::start().await;
    let connector = builder_for(&mock_server).use_data_api().build();

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_raw("<Error><Message>Access denied</Message></Error>", "text/xml"),
        )
        .mount(&mock_server)
        .await;

    let text = connector
        .string_send_data(Some("Story"), Some(Payload::from("<Asset/>")), None)
        .await
        .unwrap();
    assert!(text.contains("Access denied"));
}

#[tokio::test]
async fn test_unreachable_instance_is_connection_error() {
    let connector = versionone_sdk::V1Connector::with_instance_url("http://127.0.0.1:9/inst")
        .unwrap()
        .with_user_agent_header("App", "1.0")
        .unwrap()
        .anonymous()
        .use_meta_api()
        .build();

    let err = connector.get_data(Some("Story")).await.unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Connection(_)), "{err:?}");
}
