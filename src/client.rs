use std::fmt;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use url::Url;

use crate::error::{Error, RequestFailure, Result};
use crate::transport::{HttpRequest, HttpTransport, Transport};
use crate::types::{ApiResponse, GenerateOtpRequest, ValidateOtpRequest};

pub const DEFAULT_BASE_URL: &str = "https://api.fastotp.co";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-api-key");

/// Configuration for FastOtpClient
#[derive(Clone, PartialEq, Eq)]
pub struct FastOtpConfig {
    pub api_key: String,
    /// Service root, defaults to [`DEFAULT_BASE_URL`]
    pub base_url: String,
    /// Per-request timeout; `None` waits as long as the transport does
    pub timeout: Option<Duration>,
}

impl FastOtpConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for FastOtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FastOtpConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Client for the FastOTP service.
///
/// Holds no mutable state: every call is one request and one response, so a
/// single instance can be shared between tasks behind an `Arc`.
#[derive(Debug, Clone)]
pub struct FastOtpClient<T = HttpTransport> {
    base_url: Url,
    headers: HeaderMap,
    transport: T,
}

impl FastOtpClient<HttpTransport> {
    /// Client against the public service with default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(FastOtpConfig::new(api_key))
    }

    pub fn with_config(config: FastOtpConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.timeout)
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {e}")))?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> FastOtpClient<T> {
    pub fn with_transport(config: FastOtpConfig, transport: T) -> Result<Self> {
        let api_key = config.api_key.trim();
        if api_key.is_empty() {
            return Err(Error::Config("API key must not be empty".to_string()));
        }

        let mut key = HeaderValue::from_str(api_key).map_err(|_| {
            Error::Config("API key contains characters not allowed in a header".to_string())
        })?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(Self {
            base_url: parse_base_url(&config.base_url)?,
            headers,
            transport,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Issue a new OTP via `POST /generate`
    pub async fn generate_otp(&self, request: &GenerateOtpRequest) -> Result<ApiResponse> {
        let url = self.endpoint("generate");
        self.execute(Method::POST, url, Some(request)).await
    }

    /// Check a token against the OTP issued for `identifier` via `POST /validate`
    pub async fn validate_otp(&self, identifier: &str, token: &str) -> Result<ApiResponse> {
        require("identifier", identifier)?;
        require("token", token)?;

        let body = ValidateOtpRequest {
            identifier: identifier.to_string(),
            token: token.to_string(),
        };
        let url = self.endpoint("validate");
        self.execute(Method::POST, url, Some(&body)).await
    }

    /// Fetch a generated OTP by id via `GET /{otp_id}`
    pub async fn get_otp_details(&self, otp_id: &str) -> Result<ApiResponse> {
        require("otp_id", otp_id)?;
        // A dot segment would be resolved away instead of reaching the service
        if matches!(otp_id, "." | "..") {
            return Err(Error::InvalidArgument(format!(
                "`otp_id` must not be `{otp_id}`"
            )));
        }

        let url = self.endpoint(otp_id);
        self.execute::<()>(Method::GET, url, None).await
    }

    /// Base URL with `segment` appended as a single percent-encoded path segment
    fn endpoint(&self, segment: &str) -> String {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(segment);
        }
        url.into()
    }

    /// Send one request and decode a 2xx body as JSON
    async fn execute<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: String,
        body: Option<&B>,
    ) -> Result<ApiResponse> {
        let body = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|e| Error::InvalidArgument(format!("Failed to encode request body: {e}")))?;

        tracing::debug!(%method, %url, "sending request");

        let request = HttpRequest {
            method: method.clone(),
            url: url.clone(),
            headers: self.headers.clone(),
            body,
        };

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                return Err(Error::RequestFailed {
                    method,
                    url,
                    cause: RequestFailure::Transport(e),
                });
            }
        };

        tracing::debug!(%method, %url, status = %response.status, "received response");

        if !response.status.is_success() {
            return Err(Error::RequestFailed {
                method,
                url,
                cause: RequestFailure::Status {
                    status: response.status,
                    body: String::from_utf8_lossy(&response.body).into_owned(),
                },
            });
        }

        serde_json::from_slice(&response.body).map_err(|source| Error::Decode {
            method,
            url,
            source,
        })
    }
}

fn require(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::invalid_argument(name));
    }
    Ok(())
}

/// Messages never echo `raw`, which may carry credentials.
fn parse_base_url(raw: &str) -> Result<Url> {
    let raw = raw.trim().trim_end_matches('/');
    if raw.is_empty() {
        return Err(Error::Config("Base URL must not be empty".to_string()));
    }

    let url = Url::parse(raw).map_err(|e| Error::Config(format!("Invalid base URL: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(Error::Config("Base URL must be an http(s) URL".to_string()));
    }
    // Error messages carry the request URL, so credentials must never be part of it
    if !url.username().is_empty() || url.password().is_some() {
        return Err(Error::Config(
            "Base URL must not contain credentials".to_string(),
        ));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(Error::Config(
            "Base URL must not contain a query or fragment".to_string(),
        ));
    }
    Ok(url)
}
