use std::io;

/// Outbound response the serializer writes into.
///
/// The host framework owns the real response; implement this trait over it
/// to let [`render`](crate::render) set the content type and write bytes.
pub trait ResponseSink {
    /// Sets the response content type.
    fn set_content_type(&mut self, content_type: &str);

    /// Writes the full response body.
    ///
    /// # Errors
    ///
    /// Returns the I/O error from the underlying transport. Callers propagate
    /// it; it is never swallowed.
    fn write_body(&mut self, bytes: &[u8]) -> io::Result<()>;
}

/// An in-memory response that collects the content type and body.
///
/// # Examples
///
/// ```
/// use json_dto::{BufferedResponse, ResponseSink};
///
/// let mut response = BufferedResponse::new();
/// response.set_content_type("text/plain; charset=utf-8");
/// response.write_body(b"hello").unwrap();
///
/// assert_eq!(response.content_type(), Some("text/plain; charset=utf-8"));
/// assert_eq!(response.body_str(), Some("hello"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferedResponse {
    content_type: Option<String>,
    body: Vec<u8>,
}

impl BufferedResponse {
    /// Creates an empty response with no content type.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the content type, if one was set.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Returns the raw body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Returns the body as text if it is valid UTF-8.
    pub fn body_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    /// Returns `true` if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Consumes the response and returns the body bytes.
    pub fn into_body(self) -> Vec<u8> {
        self.body
    }
}

impl ResponseSink for BufferedResponse {
    fn set_content_type(&mut self, content_type: &str) {
        self.content_type = Some(content_type.to_string());
    }

    fn write_body(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.body.extend_from_slice(bytes);
        Ok(())
    }
}
