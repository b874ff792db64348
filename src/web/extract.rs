//! Extraction boundary trait for web integration.

use crate::request::Request;

/// Converts a framework-specific request into a [`Request`].
///
/// Framework integrations implement this for their own request type. The
/// conversion hands over ownership of the body stream; nothing should read
/// the body before capture has run.
///
/// # Examples
///
/// ```
/// use json_dto::web::ExtractRequest;
/// use json_dto::{HttpMethod, Request};
///
/// struct MyFrameworkRequest {
///     id: u64,
///     method: String,
///     headers: Vec<(String, String)>,
///     body: Vec<u8>,
/// }
///
/// impl ExtractRequest for MyFrameworkRequest {
///     fn extract_request(self) -> Request {
///         let content_type = self
///             .headers
///             .iter()
///             .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
///             .map(|(_, value)| value.clone());
///
///         let request = Request::new(format!("req-{}", self.id), self.method.as_str())
///             .with_body(self.body);
///         match content_type {
///             Some(ct) => request.with_content_type(ct),
///             None => request,
///         }
///     }
/// }
///
/// let raw = MyFrameworkRequest {
///     id: 7,
///     method: "PUT".to_string(),
///     headers: vec![("Content-Type".to_string(), "application/json".to_string())],
///     body: b"{}".to_vec(),
/// };
/// let request = raw.extract_request();
/// assert_eq!(request.method(), &HttpMethod::Put);
/// assert_eq!(request.content_type(), Some("application/json"));
/// ```
pub trait ExtractRequest {
    /// Builds the request descriptor, moving the body stream into it.
    fn extract_request(self) -> Request;
}

impl ExtractRequest for Request {
    fn extract_request(self) -> Request {
        self
    }
}
