use std::collections::HashMap;
use std::mem;

use crate::http::{Body, HttpMethod};

/// An inbound HTTP request as seen by the binding layer.
///
/// Host frameworks build one per request (see
/// [`ExtractRequest`](crate::web::ExtractRequest)). Only the method, the
/// content type and the body matter for DTO binding; the query parameters
/// are carried for handlers and never consulted by the binder.
///
/// # Examples
///
/// ```
/// use json_dto::{HttpMethod, Request};
///
/// let request = Request::new("req-1", HttpMethod::Post)
///     .with_content_type("application/json")
///     .with_body(r#"{"tit":"My note"}"#);
///
/// assert_eq!(request.method(), &HttpMethod::Post);
/// assert_eq!(request.content_type(), Some("application/json"));
/// ```
#[derive(Debug)]
pub struct Request {
    request_id: String,
    method: HttpMethod,
    content_type: Option<String>,
    query_params: HashMap<String, String>,
    body: Body,
}

impl Request {
    /// Creates a request with no content type and an empty body.
    pub fn new(request_id: impl Into<String>, method: impl Into<HttpMethod>) -> Self {
        Self {
            request_id: request_id.into(),
            method: method.into(),
            content_type: None,
            query_params: HashMap::new(),
            body: Body::empty(),
        }
    }

    /// Sets the declared content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Sets the body to the given bytes.
    pub fn with_body(self, bytes: impl Into<Vec<u8>>) -> Self {
        self.with_body_stream(Body::from_bytes(bytes))
    }

    /// Sets the body to an arbitrary stream.
    pub fn with_body_stream(mut self, body: Body) -> Self {
        self.body = body;
        self
    }

    /// Adds a query parameter.
    pub fn add_query_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.query_params.insert(key.into(), value.into());
    }

    /// Returns the request identifier used in log events.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Returns the HTTP method.
    pub fn method(&self) -> &HttpMethod {
        &self.method
    }

    /// Returns the declared content type, if any.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Returns a query parameter by name.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query_params.get(key).map(String::as_str)
    }

    /// Returns the body stream for reading.
    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Swaps in a new body stream and returns the previous one.
    pub fn replace_body(&mut self, body: Body) -> Body {
        mem::replace(&mut self.body, body)
    }
}
