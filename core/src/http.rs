//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! crate builds `HttpRequest` values and parses `HttpResponse` values; the
//! actual round-trip happens behind the [`Transport`] trait, which the host
//! supplies. Tests substitute an in-memory transport, production code uses
//! [`crate::UreqTransport`] or whatever the embedding app provides.

use std::fmt;
use std::str::FromStr;

use crate::error::{ApiError, TransportError};

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// The upper-case verb as it goes on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether requests with this method carry a body.
    pub fn is_mutating(self) -> bool {
        !matches!(self, HttpMethod::Get)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-sensitive: `"get"` is rejected, only `"GET"` parses.
impl FromStr for HttpMethod {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            other => Err(ApiError::UnknownMethod(other.to_string())),
        }
    }
}

const MUTATING_VERBS: [&str; 4] = ["POST", "PUT", "PATCH", "DELETE"];

/// Exact, case-sensitive membership in POST/PUT/PATCH/DELETE.
pub fn is_mutating_verb(method: &str) -> bool {
    MUTATING_VERBS.contains(&method)
}

/// Ordered header list, sent exactly as given.
pub type Headers = Vec<(String, String)>;

/// An HTTP request described as plain data.
///
/// Built by `ApiClient::build_request` and by the script loader. `url` is
/// already absolute; `body` is JSON text (or `None`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Headers,
    pub body: Option<String>,
}

impl HttpRequest {
    /// A bodiless GET with no headers.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Headers,
    pub body: String,
}

/// Host collaborator that performs the network round-trip.
///
/// Implementations must support every [`HttpMethod`] and must return non-2xx
/// responses as data rather than as errors; status interpretation (if any)
/// belongs to the caller.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}
