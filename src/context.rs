use std::marker::PhantomData;

use crate::binder::Binder;
use crate::capture::{self, CapturedBody};
use crate::logging::RequestLog;
use crate::request::Request;
use crate::state::{Captured, Pending};

/// Per-request context carrying the request and its captured body.
///
/// `RequestContext<S>` is generic over the pipeline state:
/// - `RequestContext<Pending>`: body not captured yet
/// - `RequestContext<Captured>`: capture has run; binding is available
///
/// # Type-State Progression
///
/// ```text
/// RequestContext<Pending> --capture--> RequestContext<Captured> --binder--> Binder
/// ```
///
/// Capture consumes the pending context, so it runs at most once per
/// request, and the binder only exists after it. Each request owns its own
/// context; nothing is shared between requests.
///
/// # Examples
///
/// ```
/// use json_dto::{HttpMethod, Request, RequestContext};
///
/// let request = Request::new("req-1", HttpMethod::Post)
///     .with_content_type("application/json")
///     .with_body(r#"{"tit":"My note"}"#);
///
/// let ctx = RequestContext::new(request).capture();
/// assert_eq!(ctx.captured_body().map(|b| b.as_str()), Some(r#"{"tit":"My note"}"#));
/// ```
#[derive(Debug)]
pub struct RequestContext<S = Captured> {
    request: Request,
    captured: Option<CapturedBody>,
    _state: PhantomData<S>,
}

// ============================================================================
// Shared methods (available on all states)
// ============================================================================

impl<S> RequestContext<S> {
    /// Returns the request ID for this context.
    pub fn request_id(&self) -> &str {
        self.request.request_id()
    }

    /// Returns the underlying request.
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Returns a request-scoped logger.
    pub fn log(&self) -> RequestLog<'_> {
        RequestLog::new(self.request.request_id())
    }
}

// ============================================================================
// RequestContext<Pending> - Initial state
// ============================================================================

impl RequestContext<Pending> {
    /// Creates a context for a request that has not been captured yet.
    pub fn new(request: Request) -> Self {
        Self {
            request,
            captured: None,
            _state: PhantomData,
        }
    }

    /// Runs body capture and moves the context to the `Captured` state.
    ///
    /// Ineligible requests pass through untouched with no captured body.
    /// See [`capture`](crate::capture()) for the full rules.
    pub fn capture(mut self) -> RequestContext<Captured> {
        let captured = capture::capture(&mut self.request);

        RequestContext {
            request: self.request,
            captured,
            _state: PhantomData,
        }
    }
}

// ============================================================================
// RequestContext<Captured> - Capture has run
// ============================================================================

impl RequestContext<Captured> {
    /// Returns the captured body, if the request was eligible and non-empty.
    pub fn captured_body(&self) -> Option<&CapturedBody> {
        self.captured.as_ref()
    }

    /// Returns a binder over this request's captured body.
    pub fn binder(&self) -> Binder<'_> {
        Binder::new(&self.request, self.captured.as_ref())
    }

    /// Returns the underlying request for handlers that read it directly.
    ///
    /// After capture of an eligible request the body stream is exhausted.
    pub fn request_mut(&mut self) -> &mut Request {
        &mut self.request
    }

    /// Consumes the context and returns the request.
    pub fn into_request(self) -> Request {
        self.request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::read_stream;
    use crate::http::{HttpMethod, JSON_CONTENT_TYPE};

    fn json_post(body: &str) -> Request {
        Request::new("req-ctx", HttpMethod::Post)
            .with_content_type(JSON_CONTENT_TYPE)
            .with_body(body)
    }

    #[test]
    fn pending_context_exposes_request_id() {
        let ctx = RequestContext::new(json_post("{}"));
        assert_eq!(ctx.request_id(), "req-ctx");
        assert_eq!(ctx.log().request_id(), "req-ctx");
    }

    #[test]
    fn capture_transitions_and_stores_body() {
        let mut ctx = RequestContext::new(json_post(r#"{"a":1}"#)).capture();

        assert_eq!(ctx.captured_body().unwrap().as_str(), r#"{"a":1}"#);
        assert_eq!(read_stream(ctx.request_mut().body_mut()).unwrap(), "");
    }

    #[test]
    fn capture_of_ineligible_request_keeps_body() {
        let request = Request::new("req-get", HttpMethod::Get).with_body("left alone");
        let ctx = RequestContext::new(request).capture();

        assert!(ctx.captured_body().is_none());

        let mut request = ctx.into_request();
        assert_eq!(read_stream(request.body_mut()).unwrap(), "left alone");
    }

    #[test]
    fn contexts_do_not_share_bodies() {
        let first = RequestContext::new(json_post(r#"{"n":1}"#)).capture();
        let second = RequestContext::new(json_post(r#"{"n":2}"#)).capture();

        assert_eq!(first.captured_body().unwrap().as_str(), r#"{"n":1}"#);
        assert_eq!(second.captured_body().unwrap().as_str(), r#"{"n":2}"#);
    }

    #[test]
    fn context_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<RequestContext<Pending>>();
        assert_send::<RequestContext<Captured>>();
    }
}
