//! Staged connector configuration.
//!
//! Each stage is its own type and only offers the next legal steps, so a
//! connector cannot be built without an instance URL and a user agent:
//!
//! ```text
//! V1Connector::with_instance_url ─► NeedsUserAgent
//!     .with_user_agent_header    ─► NeedsAuth
//!     .with_*  / .anonymous()    ─► ConnectorBuilder
//!     .with_proxy / .use_*_api / .with_header / .with_config (any order)
//!     .build()                   ─► V1Connector
//! ```
//!
//! The connector under construction moves from stage to stage; nothing is
//! cloned and no network I/O happens until the first request.

use versionone_auth::{Credentials, ProxyProvider};

use crate::config::ConnectorConfig;
use crate::connector::{header_entry, validate_endpoint, V1Connector};
use crate::endpoint::Api;
use crate::error::{Error, Result};
use crate::user_agent::upstream_token;

impl V1Connector {
    /// Start configuring a connector for a VersionOne instance.
    ///
    /// The URL has the form `http(s)://server/instance`. Fails with a
    /// configuration error when it is blank or not an absolute URI.
    pub fn with_instance_url(instance_url: &str) -> Result<NeedsUserAgent> {
        Ok(NeedsUserAgent {
            connector: V1Connector::new(instance_url)?,
        })
    }
}

/// Stage 1: the application must identify itself.
#[derive(Debug)]
pub struct NeedsUserAgent {
    connector: V1Connector,
}

impl NeedsUserAgent {
    /// Name and version of the application, appended to the `User-Agent`.
    pub fn with_user_agent_header(mut self, name: &str, version: &str) -> Result<NeedsAuth> {
        if name.trim().is_empty() {
            return Err(Error::configuration("Missing required argument: name"));
        }
        if version.trim().is_empty() {
            return Err(Error::configuration("Missing required argument: version"));
        }

        self.connector.upstream_user_agent = Some(upstream_token(name, version));
        Ok(NeedsAuth {
            connector: self.connector,
        })
    }
}

/// Stage 2: choose one authentication strategy, or none.
#[derive(Debug)]
pub struct NeedsAuth {
    connector: V1Connector,
}

impl NeedsAuth {
    /// Authenticate with a member account.
    pub fn with_username_and_password(
        self,
        username: &str,
        password: &str,
    ) -> Result<ConnectorBuilder> {
        Ok(self.with_credentials(Credentials::basic(username, password)?))
    }

    /// Integrated authentication as the current process identity.
    pub fn with_windows_integrated(self) -> ConnectorBuilder {
        self.with_credentials(Credentials::integrated())
    }

    /// Integrated authentication as an explicit `DOMAIN\username`.
    pub fn with_windows_integrated_as(
        self,
        fully_qualified_domain_username: &str,
        password: &str,
    ) -> Result<ConnectorBuilder> {
        Ok(self.with_credentials(Credentials::integrated_as(
            fully_qualified_domain_username,
            password,
        )?))
    }

    /// Authenticate with an access token.
    pub fn with_access_token(self, access_token: &str) -> Result<ConnectorBuilder> {
        Ok(self.with_credentials(Credentials::access_token(access_token)?))
    }

    /// Authenticate with an OAuth2 access token.
    pub fn with_oauth2_token(self, access_token: &str) -> Result<ConnectorBuilder> {
        Ok(self.with_credentials(Credentials::oauth2_token(access_token)?))
    }

    /// Use an already validated strategy.
    pub fn with_credentials(mut self, credentials: Credentials) -> ConnectorBuilder {
        self.connector.credentials = Some(credentials);
        ConnectorBuilder {
            connector: self.connector,
        }
    }

    /// Connect without authenticating.
    pub fn anonymous(self) -> ConnectorBuilder {
        ConnectorBuilder {
            connector: self.connector,
        }
    }
}

/// Stage 3: optional settings in any order, then [`build`](Self::build).
///
/// Repeated calls overwrite earlier ones. Selecting an endpoint here is
/// optional; a connector without one fails every request until
/// [`V1Connector::use_api`] or a sibling is called.
#[derive(Debug)]
pub struct ConnectorBuilder {
    connector: V1Connector,
}

impl ConnectorBuilder {
    /// Route all traffic through a proxy.
    pub fn with_proxy(mut self, proxy: ProxyProvider) -> Self {
        self.connector.proxy = Some(proxy);
        self
    }

    /// Select a logical endpoint.
    pub fn use_api(mut self, api: Api) -> Self {
        self.connector.use_api(api);
        self
    }

    /// Select a literal endpoint prefix.
    pub fn use_endpoint(mut self, endpoint: &str) -> Result<Self> {
        self.connector.endpoint = Some(validate_endpoint(endpoint)?);
        Ok(self)
    }

    pub fn use_meta_api(self) -> Self {
        self.use_api(Api::Meta)
    }

    pub fn use_data_api(self) -> Self {
        self.use_api(Api::Data)
    }

    pub fn use_history_api(self) -> Self {
        self.use_api(Api::History)
    }

    pub fn use_new_api(self) -> Self {
        self.use_api(Api::New)
    }

    pub fn use_query_api(self) -> Self {
        self.use_api(Api::Query)
    }

    pub fn use_loc_api(self) -> Self {
        self.use_api(Api::Loc)
    }

    pub fn use_loc2_api(self) -> Self {
        self.use_api(Api::Loc2)
    }

    pub fn use_config_api(self) -> Self {
        self.use_api(Api::Config)
    }

    /// Send a custom header with every request.
    ///
    /// Names compare case-insensitively; repeating a name replaces its value
    /// and keeps its position.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(Error::configuration("Missing required argument: name"));
        }
        header_entry(name, value)?;

        let headers = &mut self.connector.headers;
        match headers.iter_mut().find(|(n, _)| n.eq_ignore_ascii_case(name)) {
            Some(entry) => entry.1 = value.to_string(),
            None => headers.push((name.to_string(), value.to_string())),
        }
        Ok(self)
    }

    /// Replace the transport configuration.
    pub fn with_config(mut self, config: ConnectorConfig) -> Self {
        self.connector.config = config;
        self
    }

    /// Finish configuration and hand over the connector.
    pub fn build(self) -> V1Connector {
        self.connector
    }
}
