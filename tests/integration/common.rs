use versionone_sdk::client::ConnectorBuilder;
use versionone_sdk::{ConnectorConfig, V1Connector};
use wiremock::MockServer;

/// Application identity every test connector reports.
pub const APP_NAME: &str = "IntegrationSuite";
pub const APP_VERSION: &str = "3.1.4";

/// Stage-3 builder for an anonymous connector against `server`.
///
/// The locale is pinned so header assertions do not depend on the host.
pub fn builder_for(server: &MockServer) -> ConnectorBuilder {
    V1Connector::with_instance_url(&format!("{}/inst", server.uri()))
        .expect("mock server URI should be valid")
        .with_user_agent_header(APP_NAME, APP_VERSION)
        .expect("user agent should be accepted")
        .anonymous()
        .with_config(ConnectorConfig::builder().with_locale("en-GB").build())
}

/// Install a test subscriber so wire logs show up with `--nocapture`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}
