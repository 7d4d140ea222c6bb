//! # v1-auth
//!
//! Authentication strategies and proxy descriptors for the VersionOne
//! connector.
//!
//! A connector carries at most one [`Credentials`] value. The variants are
//! mutually exclusive, so choosing a new one always replaces the old one.
//!
//! ## Security
//!
//! - Passwords and tokens are redacted in Debug output
//! - Validation errors name the argument, never its value
//!
//! ## Example
//!
//! ```rust
//! use versionone_auth::{Credentials, ProxyProvider};
//!
//! let creds = Credentials::basic("admin", "secret")?;
//! assert_eq!(creds.scheme(), "Basic");
//!
//! let proxy = ProxyProvider::new("http://proxy.local:8080")?
//!     .with_credentials("proxyuser", "proxypass")?;
//! assert_eq!(proxy.address().as_str(), "http://proxy.local:8080/");
//! # Ok::<(), versionone_auth::Error>(())
//! ```

mod credentials;
mod error;
mod proxy;

pub use credentials::Credentials;
pub use error::{Error, ErrorKind, Result};
pub use proxy::ProxyProvider;
