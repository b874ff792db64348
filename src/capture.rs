//! Request matching and single-read body capture.
//!
//! An eligible request (POST or PUT declaring exactly `application/json`)
//! has its body read once into a [`CapturedBody`]. The request's stream is
//! swapped for an exhausted one whether or not the read succeeds, so every
//! later reader observes zero bytes.

use std::fmt;
use std::io::{self, Read};

use crate::http::{Body, JSON_CONTENT_TYPE};
use crate::logging::RequestLog;
use crate::request::Request;

/// A non-empty request body read during capture.
#[derive(Clone, PartialEq, Eq)]
pub struct CapturedBody(String);

impl CapturedBody {
    /// Wraps a body string, returning `None` when it is empty.
    pub(crate) fn new(body: String) -> Option<Self> {
        if body.is_empty() {
            None
        } else {
            Some(Self(body))
        }
    }

    /// Returns the body text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the body length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`: an empty body is never captured.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the wrapper and returns the body text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for CapturedBody {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Bodies may hold credentials; keep them out of Debug output.
impl fmt::Debug for CapturedBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapturedBody")
            .field("len", &self.0.len())
            .finish()
    }
}

/// Returns `true` if the request qualifies for DTO binding.
///
/// A request qualifies when it is present, declares exactly
/// [`JSON_CONTENT_TYPE`] (no parameters, no wildcards), and uses POST or
/// PUT. `None` stands for a missing request and never qualifies.
///
/// # Examples
///
/// ```
/// use json_dto::{is_eligible, HttpMethod, Request};
///
/// let json_post = Request::new("req-1", HttpMethod::Post).with_content_type("application/json");
/// let json_get = Request::new("req-2", HttpMethod::Get).with_content_type("application/json");
/// let form_post = Request::new("req-3", HttpMethod::Post)
///     .with_content_type("application/x-www-form-urlencoded");
///
/// assert!(is_eligible(Some(&json_post)));
/// assert!(!is_eligible(Some(&json_get)));
/// assert!(!is_eligible(Some(&form_post)));
/// assert!(!is_eligible(None));
/// ```
pub fn is_eligible(request: Option<&Request>) -> bool {
    request.is_some_and(|req| {
        req.content_type() == Some(JSON_CONTENT_TYPE) && req.method().is_bindable()
    })
}

/// Captures the body of an eligible request.
///
/// For an ineligible request this does nothing: the body stream is left
/// untouched and `None` is returned.
///
/// For an eligible request the body stream is replaced by an exhausted one
/// and the original is read to the end as UTF-8. A read failure (including
/// invalid UTF-8) is logged and treated as "no body"; it never fails the
/// request. A zero-length body is also treated as "no body".
pub fn capture(request: &mut Request) -> Option<CapturedBody> {
    let request_id = request.request_id().to_owned();
    let log = RequestLog::new(&request_id);

    log.debug(format_args!("body capture: checking request"));

    if !is_eligible(Some(&*request)) {
        return None;
    }

    log.info(format_args!(
        "body capture: reading {} request body",
        request.method()
    ));

    let mut original = request.replace_body(Body::empty());

    match read_stream(&mut original) {
        Ok(body) => {
            let captured = CapturedBody::new(body);
            if let Some(body) = &captured {
                log.debug(format_args!(
                    "body capture: stored {} byte body",
                    body.len()
                ));
            }
            captured
        }
        Err(err) => {
            log.error(format_args!(
                "body capture: could not read request body: {}",
                err
            ));
            None
        }
    }
}

/// Reads a stream to the end as UTF-8 text.
///
/// # Errors
///
/// Returns the underlying I/O error, or `InvalidData` if the bytes are not
/// valid UTF-8.
///
/// # Examples
///
/// ```
/// use json_dto::read_stream;
///
/// let mut input = "ABC".as_bytes();
/// assert_eq!(read_stream(&mut input).unwrap(), "ABC");
/// ```
pub fn read_stream<R: Read + ?Sized>(input: &mut R) -> io::Result<String> {
    let mut text = String::new();
    input.read_to_string(&mut text)?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "peer reset"))
        }
    }

    fn json_request(method: HttpMethod, body: &str) -> Request {
        Request::new("req-capture", method)
            .with_content_type(JSON_CONTENT_TYPE)
            .with_body(body)
    }

    fn remaining(request: &mut Request) -> String {
        read_stream(request.body_mut()).expect("readable")
    }

    #[test]
    fn eligible_for_json_post_and_put() {
        assert!(is_eligible(Some(&json_request(HttpMethod::Post, ""))));
        assert!(is_eligible(Some(&json_request(HttpMethod::Put, ""))));
    }

    #[test]
    fn not_eligible_for_other_methods() {
        for method in [
            HttpMethod::Get,
            HttpMethod::Delete,
            HttpMethod::Patch,
            HttpMethod::Head,
            HttpMethod::Options,
            HttpMethod::Other("PURGE".into()),
        ] {
            assert!(!is_eligible(Some(&json_request(method, ""))));
        }
    }

    #[test]
    fn content_type_must_match_exactly() {
        for content_type in [
            "application/json; charset=utf-8",
            "APPLICATION/JSON",
            "application/*",
            "*/*",
            "text/plain",
            "application/x-www-form-urlencoded",
        ] {
            let request = Request::new("req-1", HttpMethod::Post).with_content_type(content_type);
            assert!(!is_eligible(Some(&request)), "{content_type}");
        }

        let untyped = Request::new("req-2", HttpMethod::Post);
        assert!(!is_eligible(Some(&untyped)));
    }

    #[test]
    fn missing_request_is_not_eligible() {
        assert!(!is_eligible(None));
    }

    #[test]
    fn capture_stores_body_and_exhausts_stream() {
        let mut request = json_request(HttpMethod::Post, r#"{"tit":"My note"}"#);

        let captured = capture(&mut request).expect("body captured");

        assert_eq!(captured.as_str(), r#"{"tit":"My note"}"#);
        assert_eq!(remaining(&mut request), "");
    }

    #[test]
    fn capture_treats_empty_body_as_absent() {
        let mut request = json_request(HttpMethod::Put, "");

        assert!(capture(&mut request).is_none());
        assert_eq!(remaining(&mut request), "");
    }

    #[test]
    fn capture_ignores_ineligible_request() {
        let mut request = Request::new("req-form", HttpMethod::Post)
            .with_content_type("application/x-www-form-urlencoded")
            .with_body("wellhellothere");

        assert!(capture(&mut request).is_none());
        assert_eq!(remaining(&mut request), "wellhellothere");
    }

    #[test]
    fn capture_read_failure_still_exhausts_stream() {
        let mut request = Request::new("req-fail", HttpMethod::Post)
            .with_content_type(JSON_CONTENT_TYPE)
            .with_body_stream(Body::from_reader(FailingReader));

        assert!(capture(&mut request).is_none());
        assert_eq!(remaining(&mut request), "");
    }

    #[test]
    fn capture_rejects_invalid_utf8() {
        let mut request = Request::new("req-bytes", HttpMethod::Post)
            .with_content_type(JSON_CONTENT_TYPE)
            .with_body(vec![0xff, 0xfe, 0xfd]);

        assert!(capture(&mut request).is_none());
        assert_eq!(remaining(&mut request), "");
    }

    #[test]
    fn read_stream_reads_everything() {
        let mut input = "line one\nline two".as_bytes();
        assert_eq!(read_stream(&mut input).unwrap(), "line one\nline two");
    }

    #[test]
    fn read_stream_on_empty_input() {
        let mut input: &[u8] = b"";
        assert_eq!(read_stream(&mut input).unwrap(), "");
    }

    #[test]
    fn captured_body_debug_hides_content() {
        let body = CapturedBody::new("password=hunter2".to_string()).expect("non-empty");
        let debug = format!("{:?}", body);

        assert!(debug.contains("len"));
        assert!(!debug.contains("hunter2"));
    }
}
