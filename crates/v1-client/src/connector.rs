//! The VersionOne connector and its request pipeline.

use std::sync::OnceLock;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE};
use tracing::{debug, info, instrument};
use url::Url;
use versionone_auth::{Credentials, ProxyProvider};

use crate::config::ConnectorConfig;
use crate::endpoint::Api;
use crate::error::{Error, ErrorKind, Result};
use crate::logging::{header_pairs, redact, RequestLogger, WireRequest, WireResponse};
use crate::pending::{PendingWrite, PendingWrites};
use crate::request::{normalize_resource, Payload, RequestFormat, RequestMethod};
use crate::response::translate_error;
use crate::user_agent::client_user_agent;

/// An authenticated connection to one VersionOne instance.
///
/// Created through [`V1Connector::with_instance_url`], which walks the
/// caller through URL, user agent, authentication and optional proxy and
/// endpoint selection before [`ConnectorBuilder::build`](crate::ConnectorBuilder::build)
/// hands back the connector.
///
/// The base address, credentials, proxy and transport configuration are
/// fixed once built. The selected endpoint may change between requests; the
/// last selection wins.
///
/// ## Concurrency
///
/// Request methods take `&self`. Everything that changes connector state
/// (endpoint selection, upstream user agent, staged writes) takes
/// `&mut self`, so concurrent callers must coordinate through their own
/// lock. The HTTP transport is configured on first use, exactly once.
///
/// # Example
///
/// ```rust,no_run
/// use versionone_client::V1Connector;
///
/// # async fn run() -> versionone_client::Result<()> {
/// let mut connector = V1Connector::with_instance_url("https://www14.v1host.com/v1sdktesting")?
///     .with_user_agent_header("MyApp", "1.0")?
///     .with_access_token("1.bDRb...")?
///     .build();
///
/// connector.use_data_api();
/// let xml = connector.get_data(Some("Story?sel=Name")).await?;
/// # let _ = xml;
/// # Ok(())
/// # }
/// ```
pub struct V1Connector {
    base_address: Url,
    pub(crate) endpoint: Option<String>,
    pub(crate) credentials: Option<Credentials>,
    pub(crate) proxy: Option<ProxyProvider>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) upstream_user_agent: Option<String>,
    pub(crate) config: ConnectorConfig,
    transport: OnceLock<reqwest::Client>,
    pending: PendingWrites,
}

impl std::fmt::Debug for V1Connector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("V1Connector")
            .field("base_address", &self.base_address.as_str())
            .field("endpoint", &self.endpoint)
            .field("credentials", &self.credentials)
            .field("proxy", &self.proxy)
            .field("upstream_user_agent", &self.upstream_user_agent)
            .field("debug", &self.config.debug)
            .finish_non_exhaustive()
    }
}

/// Status, content type and body of a completed exchange.
struct Exchange {
    status: u16,
    content_type: Option<String>,
    body: Bytes,
}

impl Exchange {
    fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The body, or the translated service error for a non-success status.
    fn into_checked_body(self) -> Result<Bytes> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(translate_error(
                self.status,
                self.content_type.as_deref(),
                &self.body,
            ))
        }
    }
}

impl V1Connector {
    /// Validate the instance URL and start a connector with default settings.
    ///
    /// A trailing `/` is appended when missing so that endpoint paths resolve
    /// beneath the instance rather than beside it.
    pub(crate) fn new(instance_url: &str) -> Result<Self> {
        let instance_url = instance_url.trim();
        if instance_url.is_empty() {
            return Err(Error::configuration("Missing required argument: instanceUrl"));
        }

        let mut normalized = instance_url.to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }

        let base_address = Url::parse(&normalized)?;
        if base_address.cannot_be_a_base() || !base_address.has_host() {
            return Err(Error::configuration("Instance url is not valid."));
        }

        Ok(Self {
            base_address,
            endpoint: None,
            credentials: None,
            proxy: None,
            headers: Vec::new(),
            upstream_user_agent: None,
            config: ConnectorConfig::from_env(),
            transport: OnceLock::new(),
            pending: PendingWrites::default(),
        })
    }

    /// The instance URL, always ending in `/`.
    pub fn base_address(&self) -> &Url {
        &self.base_address
    }

    /// The currently selected endpoint prefix.
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// The active authentication strategy, if any.
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// The proxy traffic is routed through, if any.
    pub fn proxy(&self) -> Option<&ProxyProvider> {
        self.proxy.as_ref()
    }

    /// Transport configuration.
    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    /// Custom headers sent with every request, in insertion order.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// The `User-Agent` value sent with every request.
    pub fn user_agent(&self) -> String {
        client_user_agent(self.upstream_user_agent.as_deref())
    }

    /// Replace the token identifying the embedding application.
    ///
    /// Takes effect on the next request.
    pub fn set_upstream_user_agent(&mut self, user_agent: impl Into<String>) {
        self.upstream_user_agent = Some(user_agent.into());
        self.transport = OnceLock::new();
    }

    // =========================================================================
    // Endpoint selection
    // =========================================================================

    /// Select a logical endpoint.
    pub fn use_api(&mut self, api: Api) {
        self.endpoint = Some(api.path().to_string());
    }

    /// Select a literal endpoint prefix, bypassing the endpoint table.
    pub fn use_endpoint(&mut self, endpoint: &str) -> Result<()> {
        self.endpoint = Some(validate_endpoint(endpoint)?);
        Ok(())
    }

    pub fn use_meta_api(&mut self) {
        self.use_api(Api::Meta);
    }

    pub fn use_data_api(&mut self) {
        self.use_api(Api::Data);
    }

    pub fn use_history_api(&mut self) {
        self.use_api(Api::History);
    }

    pub fn use_new_api(&mut self) {
        self.use_api(Api::New);
    }

    pub fn use_query_api(&mut self) {
        self.use_api(Api::Query);
    }

    pub fn use_loc_api(&mut self) {
        self.use_api(Api::Loc);
    }

    pub fn use_loc2_api(&mut self) {
        self.use_api(Api::Loc2);
    }

    pub fn use_config_api(&mut self) {
        self.use_api(Api::Config);
    }

    // =========================================================================
    // Requests
    // =========================================================================

    /// GET a resource under the selected endpoint and return the raw body.
    #[instrument(skip(self), fields(endpoint = ?self.endpoint))]
    pub async fn get_data(&self, resource: Option<&str>) -> Result<Bytes> {
        self.execute(RequestMethod::Get, resource, None, None)
            .await?
            .into_checked_body()
    }

    /// POST a payload to a resource under the selected endpoint.
    ///
    /// `content_type` defaults to `application/xml` and is sent as both
    /// `Content-Type` and `Accept`. A missing payload sends an empty body.
    #[instrument(skip(self, payload), fields(endpoint = ?self.endpoint))]
    pub async fn send_data(
        &self,
        resource: Option<&str>,
        payload: Option<Payload>,
        content_type: Option<&str>,
    ) -> Result<Bytes> {
        self.execute(RequestMethod::Post, resource, payload, content_type)
            .await?
            .into_checked_body()
    }

    /// Like [`send_data`](Self::send_data), but returns the body as text and
    /// does not fail on a non-success status.
    ///
    /// The body is decoded with the charset named in `Content-Type`, UTF-8
    /// when none is named; undecodable bytes become U+FFFD.
    /// The caller must inspect the returned text to detect service errors.
    /// Configuration and connection failures are still returned as errors.
    #[instrument(skip(self, payload), fields(endpoint = ?self.endpoint))]
    pub async fn string_send_data(
        &self,
        resource: Option<&str>,
        payload: Option<Payload>,
        content_type: Option<&str>,
    ) -> Result<String> {
        self.dispatch(RequestMethod::Post, resource, payload, content_type)
            .await?
            .into_text()
            .await
    }

    /// Open a staged write for `api_path`.
    ///
    /// Opening the same path again discards what was written before.
    pub fn begin_request(&mut self, api_path: &str) -> &mut PendingWrite {
        self.pending.begin(api_path)
    }

    /// Send the staged write for `api_path` as a POST and close it.
    ///
    /// Fails with a lookup error when no write is open for `api_path`.
    pub async fn end_request(&mut self, api_path: &str, content_type: Option<&str>) -> Result<Bytes> {
        let body = self.pending.finish(api_path)?;
        self.send_data(Some(api_path), Some(Payload::Bytes(body)), content_type)
            .await
    }

    /// Returns true if a staged write is open for `api_path`.
    pub fn has_pending_request(&self, api_path: &str) -> bool {
        self.pending.contains(api_path)
    }

    /// Absolute URL for a resource under the selected endpoint.
    pub fn resource_url(&self, resource: Option<&str>) -> Result<Url> {
        let endpoint = self
            .endpoint
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| {
                Error::configuration(
                    "V1Connector is not properly configured. The API endpoint was not specified.",
                )
            })?;

        let relative = format!("{}{}", endpoint, normalize_resource(resource));
        Ok(self.base_address.join(&relative)?)
    }

    /// The HTTP client, configured on first use.
    fn transport(&self) -> Result<&reqwest::Client> {
        if let Some(client) = self.transport.get() {
            return Ok(client);
        }

        let client = self.build_transport()?;
        Ok(self.transport.get_or_init(|| client))
    }

    fn build_transport(&self) -> Result<reqwest::Client> {
        let mut headers = HeaderMap::new();
        for (name, value) in &self.headers {
            let (name, value) = header_entry(name, value)?;
            headers.insert(name, value);
        }
        let (_, language) = header_entry(ACCEPT_LANGUAGE.as_str(), &self.config.accept_language())?;
        headers.insert(ACCEPT_LANGUAGE, language);

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(self.user_agent())
            .redirect(reqwest::redirect::Policy::limited(self.config.max_redirects))
            .pool_idle_timeout(self.config.pool_idle_timeout)
            .pool_max_idle_per_host(self.config.pool_max_idle_per_host)
            .gzip(self.config.accept_compressed)
            .deflate(self.config.accept_compressed);

        if let Some(timeout) = self.config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = self.config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(ref proxy) = self.proxy {
            builder = builder.proxy(proxy.to_reqwest()?);
        }

        let client = builder
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Configuration(e.to_string()), e))?;

        debug!(
            base_address = %self.base_address,
            auth = self.credentials.as_ref().map(|c| c.scheme()).unwrap_or("Anonymous"),
            proxied = self.proxy.is_some(),
            "Transport configured"
        );

        Ok(client)
    }

    /// Headers the transport adds to every request, as logged.
    fn default_header_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<_> = self
            .headers
            .iter()
            .map(|(name, value)| redact(name, value))
            .collect();
        pairs.push((
            ACCEPT_LANGUAGE.as_str().to_string(),
            self.config.accept_language(),
        ));
        pairs.push(("user-agent".to_string(), self.user_agent()));
        pairs
    }

    /// Perform one HTTP exchange and read the whole response body.
    async fn execute(
        &self,
        method: RequestMethod,
        resource: Option<&str>,
        payload: Option<Payload>,
        content_type: Option<&str>,
    ) -> Result<Exchange> {
        self.dispatch(method, resource, payload, content_type)
            .await?
            .into_exchange()
            .await
    }

    /// Send one request and wait for the response head.
    async fn dispatch(
        &self,
        method: RequestMethod,
        resource: Option<&str>,
        payload: Option<Payload>,
        content_type: Option<&str>,
    ) -> Result<InFlight> {
        let url = self.resource_url(resource)?;
        let client = self.transport()?;
        let logger = RequestLogger::new(self.config.debug);

        let mut request = client.request(method.to_reqwest(), url.clone());
        if let Some(ref credentials) = self.credentials {
            request = credentials.apply(request);
        }

        let mut request_body = String::new();
        if method == RequestMethod::Post {
            let content_type = content_type.unwrap_or(RequestFormat::default().content_type());
            if logger.is_enabled() {
                request_body = payload
                    .as_ref()
                    .map(Payload::to_log_string)
                    .unwrap_or_default();
            }
            let body = payload
                .map(Payload::into_body)
                .unwrap_or_else(|| reqwest::Body::from(""));
            request = request
                .header(CONTENT_TYPE, content_type)
                .header(ACCEPT, content_type)
                .body(body);
        }

        let request = request.build()?;
        let wire_request = logger.is_enabled().then(|| {
            let mut headers = self.default_header_pairs();
            headers.extend(header_pairs(request.headers()));
            WireRequest {
                method,
                url: url.to_string(),
                headers,
                body: request_body,
            }
        });

        debug!(%method, %url, "Sending request");
        let response = client.execute(request).await?;

        let status = response.status().as_u16();
        if response.status().is_success() {
            debug!(status, content_length = response.content_length(), "Response received");
        } else {
            info!(status, content_length = response.content_length(), "Non-success response");
        }

        Ok(InFlight {
            status,
            content_type: response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            response_headers: wire_request
                .is_some()
                .then(|| header_pairs(response.headers()))
                .unwrap_or_default(),
            response,
            wire_request,
            logger,
        })
    }
}

/// A response whose body has not been read yet.
struct InFlight {
    status: u16,
    content_type: Option<String>,
    response_headers: Vec<(String, String)>,
    response: reqwest::Response,
    wire_request: Option<WireRequest>,
    logger: RequestLogger,
}

impl InFlight {
    /// Read the body as raw bytes.
    async fn into_exchange(self) -> Result<Exchange> {
        let body = self.response.bytes().await?;
        if let Some(ref wire_request) = self.wire_request {
            self.logger.log(
                wire_request,
                &WireResponse {
                    status: self.status,
                    headers: self.response_headers,
                    body: String::from_utf8_lossy(&body).into_owned(),
                },
            );
        }

        Ok(Exchange {
            status: self.status,
            content_type: self.content_type,
            body,
        })
    }

    /// Read the body as text, decoded with the declared charset.
    async fn into_text(self) -> Result<String> {
        let text = self.response.text().await?;
        if let Some(ref wire_request) = self.wire_request {
            self.logger.log(
                wire_request,
                &WireResponse {
                    status: self.status,
                    headers: self.response_headers,
                    body: text.clone(),
                },
            );
        }
        Ok(text)
    }
}

/// Reject empty endpoint prefixes.
pub(crate) fn validate_endpoint(endpoint: &str) -> Result<String> {
    if endpoint.trim().is_empty() {
        return Err(Error::configuration("Missing required argument: endpoint"));
    }
    Ok(endpoint.to_string())
}

/// Parse a header name and value, mapping failures to configuration errors.
pub(crate) fn header_entry(name: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
        Error::with_source(
            ErrorKind::Configuration(format!("Invalid header name '{}'", name)),
            e,
        )
    })?;
    let header_value = HeaderValue::from_str(value).map_err(|e| {
        Error::with_source(
            ErrorKind::Configuration(format!("Invalid header value for '{}'", name)),
            e,
        )
    })?;
    Ok((header_name, header_value))
}
