//! Staged builder behaviour observed from outside the crate.

use super::common::{builder_for, APP_NAME, APP_VERSION};
use versionone_sdk::client::user_agent::{CLIENT_NAME, CLIENT_VERSION};
use versionone_sdk::{Api, ProxyProvider, V1Connector};
use wiremock::matchers::{header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_instance_url_gains_trailing_slash() {
    let connector = V1Connector::with_instance_url("http://host/inst")
        .unwrap()
        .with_user_agent_header("App", "1.0")
        .unwrap()
        .anonymous()
        .build();

    assert_eq!(connector.base_address().as_str(), "http://host/inst/");
}

#[test]
fn test_invalid_instance_urls() {
    for url in ["", "  ", "relative/path", "http://"] {
        let err = V1Connector::with_instance_url(url).unwrap_err();
        assert!(err.is_configuration(), "{url:?} should be a configuration error");
    }
}

#[tokio::test]
async fn test_requests_fail_without_endpoint_for_every_auth_mode() {
    let proxy = || ProxyProvider::new("http://proxy.invalid:3128").unwrap();
    let stage2 = || {
        V1Connector::with_instance_url("http://v1.invalid/inst")
            .unwrap()
            .with_user_agent_header("App", "1.0")
            .unwrap()
    };

    let connectors = vec![
        stage2().anonymous().build(),
        stage2().anonymous().with_proxy(proxy()).build(),
        stage2().with_username_and_password("admin", "admin").unwrap().build(),
        stage2().with_windows_integrated().with_proxy(proxy()).build(),
        stage2().with_windows_integrated_as("CORP\\admin", "pw").unwrap().build(),
        stage2().with_access_token("token").unwrap().build(),
        stage2().with_oauth2_token("token").unwrap().with_proxy(proxy()).build(),
    ];

    for connector in connectors {
        let err = connector.get_data(Some("Story")).await.unwrap_err();
        assert!(err.is_configuration(), "{connector:?} should refuse to send");

        let err = connector.send_data(Some("Story"), None, None).await.unwrap_err();
        assert!(err.is_configuration());
    }
}

#[test]
fn test_build_hands_over_configured_connector() {
    let proxy = ProxyProvider::new("http://proxy.local:8080")
        .unwrap()
        .with_credentials("puser", "ppass")
        .unwrap();

    let connector = V1Connector::with_instance_url("https://v1.example.com/inst/")
        .unwrap()
        .with_user_agent_header("App", "2.0")
        .unwrap()
        .with_access_token("abc")
        .unwrap()
        .with_proxy(proxy.clone())
        .use_api(Api::Query)
        .with_header("X-Tenant", "blue")
        .unwrap()
        .build();

    assert_eq!(connector.credentials().and_then(|c| c.bearer_token()), Some("abc"));
    assert_eq!(connector.proxy(), Some(&proxy));
    assert_eq!(connector.endpoint(), Some("query.v1/"));
    assert_eq!(connector.headers().len(), 1);
    assert!(connector.user_agent().ends_with(" App/2.0"));
}

#[tokio::test]
async fn test_user_agent_on_the_wire() {
    let mock_server = MockServer::start().await;
    let connector = builder_for(&mock_server).use_meta_api().build();

    let agent = connector.user_agent();
    assert!(agent.starts_with(&format!("{}/{}", CLIENT_NAME, CLIENT_VERSION)));
    assert!(agent.ends_with(&format!(" {}/{}", APP_NAME, APP_VERSION)));

    Mock::given(method("GET"))
        .and(header("User-Agent", agent.as_str()))
        .and(header("Accept-Language", "en-GB"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    connector.get_data(Some("Story")).await.unwrap();
}
