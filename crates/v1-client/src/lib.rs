//! # v1-client
//!
//! Connector for the HTTP APIs of a VersionOne instance.
//!
//! One instance URL exposes several fixed sub-APIs (metadata, data, history,
//! new-asset templates, query, localization, configuration). The connector
//! holds the transport settings for that instance, points at one sub-API at
//! a time, and moves raw payloads in both directions. Turning those payloads
//! into domain objects is left to the caller.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │           Staged builder (builder.rs)                       │
//! │  URL ─► user agent ─► auth ─► proxy/endpoint/headers ─► build│
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    V1Connector                              │
//! │  - Endpoint selection (endpoint.rs)                         │
//! │  - get_data / send_data / string_send_data                  │
//! │  - Staged writes: begin_request / end_request (pending.rs)  │
//! │  - Lazy one-time transport setup                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Error translation (response.rs)   Wire logging (logging.rs)│
//! │  XML <Message> / JSON exceptions   debug-gated, redacted    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use versionone_client::{Payload, V1Connector};
//!
//! # async fn run() -> versionone_client::Result<()> {
//! let connector = V1Connector::with_instance_url("https://www14.v1host.com/v1sdktesting")?
//!     .with_user_agent_header("MyApp", "1.0")?
//!     .with_username_and_password("admin", "admin")?
//!     .use_data_api()
//!     .build();
//!
//! let story = connector.get_data(Some("Story/1005")).await?;
//!
//! let created = connector
//!     .send_data(
//!         Some("Story"),
//!         Some(Payload::from("<Asset><Attribute name=\"Name\" act=\"set\">New</Attribute></Asset>")),
//!         None,
//!     )
//!     .await?;
//! # let _ = (story, created);
//! # Ok(())
//! # }
//! ```

mod builder;
mod config;
mod connector;
mod endpoint;
mod error;
pub mod logging;
mod pending;
mod request;
pub mod response;
pub mod user_agent;

pub use builder::{ConnectorBuilder, NeedsAuth, NeedsUserAgent};
pub use config::{system_locale, ConnectorConfig, ConnectorConfigBuilder, DEBUG_ENV_VAR, DEFAULT_LOCALE};
pub use connector::V1Connector;
pub use endpoint::Api;
pub use error::{Error, ErrorKind, Result};
pub use pending::PendingWrite;
pub use request::{normalize_resource, Payload, RequestFormat, RequestMethod, DEFAULT_CONTENT_TYPE};
pub use versionone_auth::{Credentials, ProxyProvider};
