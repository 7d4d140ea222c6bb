//! Proxy descriptor.

use url::Url;

use crate::error::{Error, ErrorKind, Result};

/// Describes the HTTP proxy all connector traffic is routed through.
#[derive(Clone, PartialEq, Eq)]
pub struct ProxyProvider {
    address: Url,
    username: Option<String>,
    password: Option<String>,
}

impl std::fmt::Debug for ProxyProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyProvider")
            .field("address", &self.address.as_str())
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl ProxyProvider {
    /// Create a proxy descriptor for an absolute proxy URI.
    pub fn new(address: &str) -> Result<Self> {
        if address.trim().is_empty() {
            return Err(Error::missing("proxyAddress"));
        }
        let address = Url::parse(address.trim())?;
        if !address.has_host() {
            return Err(Error::new(ErrorKind::InvalidProxy(
                "proxy address has no host".to_string(),
            )));
        }

        Ok(Self {
            address,
            username: None,
            password: None,
        })
    }

    /// Authenticate against the proxy with a username and password.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(Error::missing("proxyUsername"));
        }
        self.username = Some(username);
        self.password = Some(password.into());
        Ok(self)
    }

    /// The proxy URI.
    pub fn address(&self) -> &Url {
        &self.address
    }

    /// The proxy username, if the proxy requires authentication.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Build the transport-level proxy that routes every scheme through this address.
    pub fn to_reqwest(&self) -> Result<reqwest::Proxy> {
        let proxy = reqwest::Proxy::all(self.address.as_str())
            .map_err(|e| Error::with_source(ErrorKind::InvalidProxy(e.to_string()), e))?;

        Ok(match (&self.username, &self.password) {
            (Some(username), Some(password)) => proxy.basic_auth(username, password),
            _ => proxy,
        })
    }
}
