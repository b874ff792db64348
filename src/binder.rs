use crate::capture::{is_eligible, CapturedBody};
use crate::dto::JsonDto;
use crate::logging::RequestLog;
use crate::request::Request;

/// Input used when an eligible request carried no body.
const EMPTY_OBJECT: &str = "{}";

/// Outcome of binding a handler parameter.
///
/// `Unbound` means "no binding": the binder declined and the host falls back
/// to its own parameter handling, typically an absent value. It is distinct
/// from successfully binding a DTO whose fields are all absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding<T> {
    /// The parameter was bound to a value.
    Bound(T),
    /// The binder deferred to the host's default behaviour.
    Unbound,
}

impl<T> Binding<T> {
    /// Returns `true` if a value was bound.
    pub fn is_bound(&self) -> bool {
        matches!(self, Binding::Bound(_))
    }

    /// Converts into an `Option`, mapping `Unbound` to `None`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Binding::Bound(value) => Some(value),
            Binding::Unbound => None,
        }
    }

    /// Maps a bound value, leaving `Unbound` as is.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Binding<U> {
        match self {
            Binding::Bound(value) => Binding::Bound(f(value)),
            Binding::Unbound => Binding::Unbound,
        }
    }

    /// Returns the bound value or the given fallback.
    pub fn bound_or(self, fallback: T) -> T {
        self.into_option().unwrap_or(fallback)
    }
}

impl<T> From<Binding<T>> for Option<T> {
    fn from(binding: Binding<T>) -> Self {
        binding.into_option()
    }
}

/// Binds a captured request body into DTO parameters.
///
/// A `Binder` is borrowed from a captured
/// [`RequestContext`](crate::RequestContext). The DTO check is done by the
/// type system: only [`JsonDto`] types can be requested. Eligibility of the
/// request is re-checked on every call.
///
/// # Examples
///
/// ```
/// use json_dto::{Binding, HttpMethod, JsonDto, Request, RequestContext};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Default, Serialize, Deserialize)]
/// struct NoteDto {
///     tit: Option<String>,
/// }
///
/// impl JsonDto for NoteDto {}
///
/// let request = Request::new("req-1", HttpMethod::Post)
///     .with_content_type("application/json")
///     .with_body(r#"{"tit":"My note"}"#);
/// let ctx = RequestContext::new(request).capture();
///
/// match ctx.binder().bind::<NoteDto>("note") {
///     Binding::Bound(note) => assert_eq!(note.tit.as_deref(), Some("My note")),
///     Binding::Unbound => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Binder<'a> {
    request: &'a Request,
    captured: Option<&'a CapturedBody>,
}

impl<'a> Binder<'a> {
    pub(crate) fn new(request: &'a Request, captured: Option<&'a CapturedBody>) -> Self {
        Self { request, captured }
    }

    /// Binds the captured body into `D`.
    ///
    /// Returns `Unbound` when the request is not eligible, or when the body
    /// is not a JSON object matching `D`'s shape (the failure is logged).
    /// An eligible request without a body binds as `{}`. Fields missing from
    /// the object take their value from `D::default()`, so a partial body
    /// never fails on its own. Unknown JSON fields are ignored.
    ///
    /// The captured body is only read, so binding several parameters from
    /// one request is fine.
    pub fn bind<D: JsonDto>(&self, name: &str) -> Binding<D> {
        let log = RequestLog::new(self.request.request_id());

        if !is_eligible(Some(self.request)) {
            log.debug(format_args!(
                "binder: request not eligible, deferring parameter '{}'",
                name
            ));
            return Binding::Unbound;
        }

        let body = self.captured.map_or(EMPTY_OBJECT, CapturedBody::as_str);

        match decode_with_defaults::<D>(body) {
            Ok(dto) => {
                log.debug(format_args!(
                    "binder: bound parameter '{}' as {}",
                    name,
                    std::any::type_name::<D>()
                ));
                Binding::Bound(dto)
            }
            Err(err) => {
                log.warn(format_args!(
                    "binder: could not bind parameter '{}' as {}: {}",
                    name,
                    std::any::type_name::<D>(),
                    err
                ));
                Binding::Unbound
            }
        }
    }

    /// Returns the request this binder reads from.
    pub fn request(&self) -> &'a Request {
        self.request
    }
}

/// Decodes `body` into `D`, filling fields the object leaves out from
/// `D::default()`.
fn decode_with_defaults<D: JsonDto>(body: &str) -> serde_json::Result<D> {
    let mut value: serde_json::Value = serde_json::from_str(body)?;

    if let serde_json::Value::Object(fields) = &mut value {
        if let serde_json::Value::Object(defaults) = serde_json::to_value(D::default())? {
            for (key, default) in defaults {
                fields.entry(key).or_insert(default);
            }
        }
    }

    serde_json::from_value(value)
}
