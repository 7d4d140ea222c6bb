//! Connector transport configuration.

use std::time::Duration;

/// Environment variable that turns on wire-level request logging.
pub const DEBUG_ENV_VAR: &str = "VERSIONONE_DEBUG";

/// Locale sent as `Accept-Language` when the environment names none.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Configuration for the connector's HTTP transport.
///
/// Fixed once the connector is built.
#[derive(Debug, Clone)]
pub struct ConnectorConfig {
    /// Record method, URL, headers and bodies of every exchange.
    pub debug: bool,
    /// Overall request timeout. `None` keeps the transport default.
    pub timeout: Option<Duration>,
    /// Connection timeout. `None` keeps the transport default.
    pub connect_timeout: Option<Duration>,
    /// Maximum number of redirects followed automatically.
    pub max_redirects: usize,
    /// Pool idle timeout.
    pub pool_idle_timeout: Duration,
    /// Maximum idle connections per host.
    pub pool_max_idle_per_host: usize,
    /// Accept gzip/deflate compressed responses.
    pub accept_compressed: bool,
    /// `Accept-Language` override. `None` derives it from the environment.
    pub locale: Option<String>,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            debug: false,
            timeout: None,
            connect_timeout: None,
            max_redirects: 10,
            pool_idle_timeout: Duration::from_secs(90),
            pool_max_idle_per_host: 10,
            accept_compressed: true,
            locale: None,
        }
    }
}

impl ConnectorConfig {
    /// Create a new connector config builder.
    pub fn builder() -> ConnectorConfigBuilder {
        ConnectorConfigBuilder::default()
    }

    /// Defaults, with the debug flag taken from [`DEBUG_ENV_VAR`].
    pub fn from_env() -> Self {
        let debug = std::env::var(DEBUG_ENV_VAR)
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        Self {
            debug,
            ..Default::default()
        }
    }

    /// The `Accept-Language` value to send.
    pub fn accept_language(&self) -> String {
        self.locale
            .clone()
            .unwrap_or_else(system_locale)
    }
}

/// Builder for ConnectorConfig.
#[derive(Debug, Default)]
pub struct ConnectorConfigBuilder {
    config: ConnectorConfig,
}

impl ConnectorConfigBuilder {
    /// Enable or disable wire-level request logging.
    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.config.debug = enabled;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Set connection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = Some(timeout);
        self
    }

    /// Set the maximum number of redirects to follow.
    pub fn with_max_redirects(mut self, max: usize) -> Self {
        self.config.max_redirects = max;
        self
    }

    /// Set pool idle timeout.
    pub fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.pool_idle_timeout = timeout;
        self
    }

    /// Set maximum idle connections per host.
    pub fn with_pool_max_idle(mut self, max: usize) -> Self {
        self.config.pool_max_idle_per_host = max;
        self
    }

    /// Accept compressed responses.
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.config.accept_compressed = enabled;
        self
    }

    /// Send a fixed `Accept-Language` value.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.config.locale = Some(locale.into());
        self
    }

    /// Build the connector configuration.
    pub fn build(self) -> ConnectorConfig {
        self.config
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Current locale name from the POSIX locale variables, e.g. `en-US`.
pub fn system_locale() -> String {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|value| locale_name(&value))
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string())
}

/// Convert a POSIX locale (`en_US.UTF-8@euro`) into a language tag (`en-US`).
///
/// Returns `None` for the `C`/`POSIX` locales and empty values.
fn locale_name(posix: &str) -> Option<String> {
    let base = posix
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim();

    if base.is_empty() || base == "C" || base == "POSIX" {
        return None;
    }

    Some(base.replace('_', "-"))
}
