//! Per-request pipeline entry points.
//!
//! Hosts call one of these before invoking the handler. They:
//! - Build a fresh [`RequestContext`] for the request
//! - Run body capture exactly once
//! - Do NOT bind anything (binding happens per parameter, on demand)

use crate::context::RequestContext;
use crate::request::Request;
use crate::state::Captured;

use super::ExtractRequest;

/// Runs body capture for a request and returns its captured context.
///
/// # Examples
///
/// ```
/// use json_dto::web::before_invocation;
/// use json_dto::{HttpMethod, Request};
///
/// let request = Request::new("req-001", HttpMethod::Post)
///     .with_content_type("application/json")
///     .with_body(r#"{"tit":"x"}"#);
///
/// let ctx = before_invocation(request);
/// assert_eq!(ctx.request_id(), "req-001");
/// assert!(ctx.captured_body().is_some());
/// ```
pub fn before_invocation(request: Request) -> RequestContext<Captured> {
    RequestContext::new(request).capture()
}

/// Extracts a framework request and runs [`before_invocation`] on it.
pub fn prepare<R: ExtractRequest>(raw: R) -> RequestContext<Captured> {
    before_invocation(raw.extract_request())
}
