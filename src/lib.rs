//! # versionone-sdk
//!
//! Rust connector for the VersionOne HTTP APIs.
//!
//! This library configures an authenticated connection to one VersionOne
//! instance and moves raw XML/JSON payloads to and from its sub-APIs, with
//! service errors translated into a single error type.
//!
//! ## Security
//!
//! - Passwords and tokens are redacted in Debug output
//! - Wire logging is off unless `VERSIONONE_DEBUG` is set, and redacts
//!   `Authorization` headers when on
//!
//! ## Crates
//!
//! - **versionone-client** - Staged builder, connector, request pipeline, error translation
//! - **versionone-auth** - Credential strategies and proxy descriptors
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use versionone_sdk::V1Connector;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut connector = V1Connector::with_instance_url("https://www14.v1host.com/v1sdktesting")?
//!         .with_user_agent_header("MyApp", "1.0")?
//!         .with_access_token(&std::env::var("V1_ACCESS_TOKEN")?)?
//!         .build();
//!
//!     connector.use_meta_api();
//!     let meta = connector.get_data(Some("Story")).await?;
//!     println!("{}", String::from_utf8_lossy(&meta));
//!
//!     Ok(())
//! }
//! ```

// Re-export all crates for convenient access
#[cfg(feature = "auth")]
pub use versionone_auth as auth;
#[cfg(feature = "client")]
pub use versionone_client as client;

// Re-export commonly used types at the top level
#[cfg(feature = "auth")]
pub use versionone_auth::{Credentials, ProxyProvider};
#[cfg(feature = "client")]
pub use versionone_client::{Api, ConnectorConfig, Error, ErrorKind, Payload, Result, V1Connector};
