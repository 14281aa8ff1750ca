//! Saved request payload.

use serde::{Deserialize, Serialize};

use super::key_value::KeyValue;
use super::kind::RequestType;

/// How the request body is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BodyType {
    /// No body
    #[default]
    None,
    /// `multipart/form-data`
    FormData,
    /// `application/x-www-form-urlencoded`
    #[serde(rename = "x-www-form-urlencoded")]
    UrlEncoded,
    /// Raw text in one of the [`RawType`] flavours
    Raw,
    /// Binary file upload
    Binary,
}

/// Flavour of a raw text body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawType {
    /// Plain text
    Text,
    /// JavaScript
    Javascript,
    /// JSON
    #[default]
    Json,
    /// HTML
    Html,
    /// XML
    Xml,
}

/// Authentication scheme applied to the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthType {
    /// No authentication
    #[default]
    None,
    /// API key in a header or query parameter
    ApiKey,
    /// Bearer token
    Bearer,
    /// HTTP basic
    Basic,
}

/// Where an API key is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
    /// Sent as a header
    #[default]
    Header,
    /// Sent as a query parameter
    Query,
}

/// API key credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiKeyAuth {
    /// Header or parameter name.
    pub key: String,
    /// Key value.
    pub value: String,
    /// Where the key goes.
    pub add_to: ApiKeyLocation,
}

/// Bearer token credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BearerAuth {
    /// Token value.
    pub token: String,
}

/// Basic auth credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicAuth {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

/// Credentials for every scheme, kept side by side so switching
/// [`AuthType`] back and forth does not lose input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthData {
    /// API key credentials.
    pub api_key: ApiKeyAuth,
    /// Bearer token credentials.
    pub bearer: BearerAuth,
    /// Basic auth credentials.
    pub basic: BasicAuth,
}

/// HTTP protocol version to negotiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HttpVersion {
    /// HTTP/1.1
    #[default]
    #[serde(rename = "HTTP/1.1")]
    Http11,
    /// HTTP/2
    #[serde(rename = "HTTP/2")]
    Http2,
}

/// Per-request transport settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestSettings {
    /// Protocol version.
    pub http_version: HttpVersion,
    /// Whether to verify TLS certificates.
    pub verify_ssl: bool,
    /// Whether to follow redirects.
    pub follow_redirects: bool,
}

impl Default for RequestSettings {
    fn default() -> Self {
        Self {
            http_version: HttpVersion::Http11,
            verify_ssl: true,
            follow_redirects: true,
        }
    }
}

/// Everything needed to replay a saved request.
///
/// Owned by the request composer; collection nodes only carry it.
/// Missing fields fall back to their defaults when deserializing so that
/// older saved documents keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestData {
    /// Method label (`GET`, `POST`, `WS`, `GRPC`, ...).
    pub method: String,
    /// Target URL. May contain `{{variables}}`.
    pub url: String,
    /// Protocol kind.
    pub request_type: RequestType,
    /// Query parameters.
    pub params: Vec<KeyValue>,
    /// Headers.
    pub headers: Vec<KeyValue>,
    /// Selected auth scheme.
    pub auth_type: AuthType,
    /// Credentials for all schemes.
    pub auth_data: AuthData,
    /// Selected body encoding.
    pub body_type: BodyType,
    /// Raw body flavour.
    pub raw_type: RawType,
    /// Raw body text.
    pub body_json: String,
    /// Multipart form rows.
    pub body_form_data: Vec<KeyValue>,
    /// URL-encoded form rows.
    pub body_url_encoded: Vec<KeyValue>,
    /// Transport settings.
    pub settings: RequestSettings,
}

impl Default for RequestData {
    fn default() -> Self {
        Self::new(RequestType::Http.default_method(), "")
    }
}

impl RequestData {
    /// Creates a bare request with the given method and URL.
    #[must_use]
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            request_type: RequestType::Http,
            params: Vec::new(),
            headers: Vec::new(),
            auth_type: AuthType::None,
            auth_data: AuthData::default(),
            body_type: BodyType::None,
            raw_type: RawType::Json,
            body_json: String::new(),
            body_form_data: Vec::new(),
            body_url_encoded: Vec::new(),
            settings: RequestSettings::default(),
        }
    }

    /// Sets the request type.
    #[must_use]
    pub const fn with_request_type(mut self, request_type: RequestType) -> Self {
        self.request_type = request_type;
        self
    }

    /// Adds a header row.
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(KeyValue::new(key, value));
        self
    }
}
