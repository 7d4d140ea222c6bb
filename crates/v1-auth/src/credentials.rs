//! Credential strategies.
//!
//! All variants implement custom Debug to redact sensitive data.

use tracing::trace;

use crate::error::{Error, Result};

/// The single authentication strategy a connector uses.
///
/// Exactly one variant is active at a time. Constructors reject empty or
/// whitespace-only arguments.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Username and password of a member account, sent as HTTP Basic.
    Basic { username: String, password: String },

    /// Integrated authentication with the identity of the current process.
    ///
    /// The HTTP stack has no NTLM/Negotiate handshake, so no `Authorization`
    /// header is produced. Identity must be established by the network path,
    /// typically an authenticating proxy or a front end bound to the host.
    Integrated,

    /// Integrated authentication with an explicit `DOMAIN\username` identity.
    ///
    /// Sent as HTTP Basic with the domain-qualified username, which is what
    /// integrated-auth front ends accept as the fallback challenge.
    IntegratedAs {
        domain_username: String,
        password: String,
    },

    /// Personal access token, sent as `Authorization: Bearer <token>`.
    AccessToken(String),

    /// OAuth2 access token, sent as `Authorization: Bearer <token>`.
    OAuth2Token(String),
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"[REDACTED]")
                .finish(),
            Credentials::Integrated => f.write_str("Integrated"),
            Credentials::IntegratedAs {
                domain_username, ..
            } => f
                .debug_struct("IntegratedAs")
                .field("domain_username", domain_username)
                .field("password", &"[REDACTED]")
                .finish(),
            Credentials::AccessToken(_) => f.debug_tuple("AccessToken").field(&"[REDACTED]").finish(),
            Credentials::OAuth2Token(_) => f.debug_tuple("OAuth2Token").field(&"[REDACTED]").finish(),
        }
    }
}

fn require(value: impl Into<String>, argument: &str) -> Result<String> {
    let value = value.into();
    if value.trim().is_empty() {
        return Err(Error::missing(argument));
    }
    Ok(value)
}

impl Credentials {
    /// Username and password authentication.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        Ok(Credentials::Basic {
            username: require(username, "username")?,
            password: require(password, "password")?,
        })
    }

    /// Integrated authentication as the current process identity.
    pub fn integrated() -> Self {
        Credentials::Integrated
    }

    /// Integrated authentication as an explicit domain user.
    ///
    /// `domain_username` is expected in the form `DOMAIN\username`.
    pub fn integrated_as(
        domain_username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        Ok(Credentials::IntegratedAs {
            domain_username: require(domain_username, "fullyQualifiedDomainUsername")?,
            password: require(password, "password")?,
        })
    }

    /// Access token authentication.
    pub fn access_token(token: impl Into<String>) -> Result<Self> {
        Ok(Credentials::AccessToken(require(token, "accessToken")?))
    }

    /// OAuth2 token authentication.
    pub fn oauth2_token(token: impl Into<String>) -> Result<Self> {
        Ok(Credentials::OAuth2Token(require(token, "accessToken")?))
    }

    /// Name of the authentication scheme, for diagnostics.
    pub fn scheme(&self) -> &'static str {
        match self {
            Credentials::Basic { .. } => "Basic",
            Credentials::Integrated => "Integrated",
            Credentials::IntegratedAs { .. } => "IntegratedAs",
            Credentials::AccessToken(_) => "AccessToken",
            Credentials::OAuth2Token(_) => "OAuth2Token",
        }
    }

    /// The bearer token, if this is a token-based strategy.
    pub fn bearer_token(&self) -> Option<&str> {
        match self {
            Credentials::AccessToken(token) | Credentials::OAuth2Token(token) => Some(token),
            _ => None,
        }
    }

    /// Attach this strategy to an outgoing request.
    ///
    /// Basic credentials are sent up front rather than after a 401 challenge.
    pub fn apply(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self {
            Credentials::Basic { username, password } => {
                request.basic_auth(username, Some(password))
            }
            Credentials::IntegratedAs {
                domain_username,
                password,
            } => request.basic_auth(domain_username, Some(password)),
            Credentials::AccessToken(token) | Credentials::OAuth2Token(token) => {
                request.bearer_auth(token)
            }
            Credentials::Integrated => {
                trace!("integrated identity: no Authorization header attached");
                request
            }
        }
    }
}
