//! Base JSON API client.
//!
//! # Design
//! `ApiClient` holds a `base_url` and an injected [`Transport`] and carries
//! no mutable state between calls. A call is split the same way the
//! host-does-IO types are: `build_request` produces an `HttpRequest`,
//! the transport executes it, `parse_json` consumes the `HttpResponse`.
//! `request_json` glues the three together and issues exactly one transport
//! call. Nothing is retried and no status code is inspected before parsing.
//!
//! Specific API clients wrap an `ApiClient` and expose typed methods on top
//! of `get_json` / `post_json`.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};

/// JSON API client bound to a fixed base URL.
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    base_url: String,
    transport: T,
}

impl<T> ApiClient<T> {
    /// The base URL is stored verbatim: no validation, no slash trimming.
    pub fn new(base_url: impl Into<String>, transport: T) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `base_url` immediately followed by `path`.
    pub fn build_url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Describe a request without sending it.
    ///
    /// The body is serialized only for mutating verbs, and only when it is
    /// truthy (`null`, `false`, `0` and `""` are treated as absent). Headers
    /// are copied verbatim; no `Content-Type` is added.
    pub fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        headers: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<HttpRequest, ApiError> {
        let url = self.build_url(path);
        let body = match body {
            Some(value) if method.is_mutating() && is_truthy(value) => {
                Some(serde_json::to_string(value).map_err(ApiError::Serialization)?)
            }
            _ => None,
        };
        tracing::debug!(%method, %url, has_body = body.is_some(), "built request");
        Ok(HttpRequest {
            method,
            url,
            headers: headers.to_vec(),
            body,
        })
    }

    /// Parse the response body as JSON, whatever the status code.
    pub fn parse_json<R: DeserializeOwned>(&self, response: HttpResponse) -> Result<R, ApiError> {
        serde_json::from_str(&response.body).map_err(ApiError::Deserialization)
    }
}

impl<T: Transport> ApiClient<T> {
    /// Build, send, and parse one request.
    pub fn request_json<R: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        headers: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<R, ApiError> {
        let request = self.build_request(method, path, headers, body)?;
        let response = self.transport.execute(request)?;
        self.parse_json(response)
    }

    pub fn post_json<R: DeserializeOwned>(
        &self,
        path: &str,
        body: &Value,
        headers: &[(String, String)],
    ) -> Result<R, ApiError> {
        self.request_json(HttpMethod::Post, path, headers, Some(body))
    }

    pub fn get_json<R: DeserializeOwned>(
        &self,
        path: &str,
        headers: &[(String, String)],
    ) -> Result<R, ApiError> {
        self.request_json(HttpMethod::Get, path, headers, None)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use serde_json::json;

    use super::*;
    use crate::error::TransportError;

    /// Records every request and answers with a fixed response.
    struct RecordingTransport {
        requests: RefCell<Vec<HttpRequest>>,
        reply: Result<HttpResponse, fn() -> TransportError>,
    }

    impl RecordingTransport {
        fn replying(status: u16, body: &str) -> Self {
            Self {
                requests: RefCell::new(Vec::new()),
                reply: Ok(HttpResponse {
                    status,
                    headers: Vec::new(),
                    body: body.to_string(),
                }),
            }
        }

        fn failing(make: fn() -> TransportError) -> Self {
            Self {
                requests: RefCell::new(Vec::new()),
                reply: Err(make),
            }
        }

        fn last(&self) -> HttpRequest {
            self.requests.borrow().last().cloned().unwrap()
        }
    }

    impl Transport for RecordingTransport {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.requests.borrow_mut().push(request);
            match &self.reply {
                Ok(response) => Ok(response.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    fn client(transport: RecordingTransport) -> ApiClient<RecordingTransport> {
        ApiClient::new("https://search.example/timetable/api", transport)
    }

    #[test]
    fn build_url_concatenates() {
        let c = client(RecordingTransport::replying(200, "{}"));
        assert_eq!(c.build_url("/x"), "https://search.example/timetable/api/x");
    }

    #[test]
    fn build_url_does_not_insert_separator() {
        let c = ApiClient::new("http://localhost:3000/", ());
        assert_eq!(c.build_url("/x"), "http://localhost:3000//x");
        assert_eq!(c.build_url("x"), "http://localhost:3000/x");
    }

    #[test]
    fn build_request_attaches_body_for_mutating_verbs() {
        let c = ApiClient::new("http://h", ());
        let body = json!({"title": "x"});
        for method in [
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Patch,
            HttpMethod::Delete,
        ] {
            let req = c.build_request(method, "/p", &[], Some(&body)).unwrap();
            let sent: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(sent, body, "{method}");
        }
    }

    #[test]
    fn build_request_never_attaches_body_to_get() {
        let c = ApiClient::new("http://h", ());
        let req = c
            .build_request(HttpMethod::Get, "/p", &[], Some(&json!({"a": 1})))
            .unwrap();
        assert!(req.body.is_none());
    }

    #[test]
    fn falsy_bodies_are_dropped() {
        let c = ApiClient::new("http://h", ());
        for body in [json!(null), json!(false), json!(0), json!("")] {
            let req = c
                .build_request(HttpMethod::Post, "/p", &[], Some(&body))
                .unwrap();
            assert!(req.body.is_none(), "{body}");
        }
    }

    #[test]
    fn empty_object_body_is_attached() {
        let c = ApiClient::new("http://h", ());
        let req = c
            .build_request(HttpMethod::Put, "/p", &[], Some(&json!({})))
            .unwrap();
        assert_eq!(req.body.as_deref(), Some("{}"));
    }

    #[test]
    fn headers_are_passed_verbatim() {
        let c = ApiClient::new("http://h", ());
        let headers = vec![
            ("X-Token".to_string(), "abc".to_string()),
            ("accept".to_string(), "application/json".to_string()),
        ];
        let req = c
            .build_request(HttpMethod::Post, "/p", &headers, Some(&json!([1])))
            .unwrap();
        assert_eq!(req.headers, headers);
    }

    #[test]
    fn request_json_issues_one_call_and_parses() {
        let c = client(RecordingTransport::replying(200, r#"{"ok":true}"#));
        let value: Value = c.get_json("/stationboard.json?stop=Bern", &[]).unwrap();
        assert_eq!(value, json!({"ok": true}));
        assert_eq!(c.transport().requests.borrow().len(), 1);
        let req = c.transport().last();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(
            req.url,
            "https://search.example/timetable/api/stationboard.json?stop=Bern"
        );
    }

    #[test]
    fn post_json_sends_serialized_body() {
        let c = client(RecordingTransport::replying(201, "[]"));
        let _: Value = c.post_json("/items", &json!({"n": 2}), &[]).unwrap();
        let req = c.transport().last();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.body.as_deref(), Some(r#"{"n":2}"#));
        assert!(req.headers.is_empty());
    }

    #[test]
    fn error_status_with_json_body_still_parses() {
        let c = client(RecordingTransport::replying(404, r#"{"error":"no such stop"}"#));
        let value: Value = c.get_json("/x", &[]).unwrap();
        assert_eq!(value["error"], "no such stop");
    }

    #[test]
    fn non_json_body_is_a_deserialization_error() {
        let c = client(RecordingTransport::replying(500, "internal error"));
        let err = c.get_json::<Value>("/x", &[]).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn transport_error_propagates_unmodified() {
        let c = client(RecordingTransport::failing(|| TransportError::Timeout));
        let err = c.get_json::<Value>("/x", &[]).unwrap_err();
        assert!(matches!(err, ApiError::Transport(TransportError::Timeout)));
        assert_eq!(c.transport().requests.borrow().len(), 1);
    }

    #[test]
    fn typed_responses_deserialize() {
        #[derive(serde::Deserialize)]
        struct Board {
            stop: String,
        }
        let c = client(RecordingTransport::replying(200, r#"{"stop":"Bern"}"#));
        let board: Board = c.get_json("/b", &[]).unwrap();
        assert_eq!(board.stop, "Bern");
    }
}
