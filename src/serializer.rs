//! Model-to-JSON serialization.
//!
//! Output values are described by [`Payload`], a tagged union over "absent",
//! one Representable model, or an ordered sequence of them. Because a
//! payload can only hold [`DtoSource`] values, a non-Representable value
//! cannot reach [`to_json`] through the typed API. Host values of unknown
//! type go through [`TypeRegistry::payload`](crate::TypeRegistry::payload),
//! which is where `InvalidArgument` is raised.

use crate::error::Result;
use crate::http::RESPONSE_CONTENT_TYPE;
use crate::representable::{DtoSource, Representable};
use crate::sink::ResponseSink;

/// A value to be written as JSON.
#[derive(Clone, Default)]
pub enum Payload<'a> {
    /// No value; encodes as `null`.
    #[default]
    Absent,
    /// A single model; encodes as its DTO object.
    Single(&'a dyn DtoSource),
    /// An ordered sequence of models; encodes as an array of DTO objects.
    Sequence(Vec<&'a dyn DtoSource>),
}

impl<'a> Payload<'a> {
    /// Creates a payload for one model.
    pub fn single<R: Representable>(value: &'a R) -> Self {
        Payload::Single(value)
    }

    /// Creates a payload for an ordered sequence of models.
    pub fn sequence<R, I>(values: I) -> Self
    where
        R: Representable + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        Payload::Sequence(
            values
                .into_iter()
                .map(|value| value as &'a dyn DtoSource)
                .collect(),
        )
    }

    /// Creates a payload from an optional model.
    pub fn from_option<R: Representable>(value: Option<&'a R>) -> Self {
        value.map_or(Payload::Absent, Payload::single)
    }

    /// Returns `true` for the `Absent` variant.
    pub fn is_absent(&self) -> bool {
        matches!(self, Payload::Absent)
    }
}

impl std::fmt::Debug for Payload<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Payload::Absent => write!(f, "Absent"),
            Payload::Single(value) => f.debug_tuple("Single").field(&value.type_name()).finish(),
            Payload::Sequence(values) => f
                .debug_tuple("Sequence")
                .field(&values.iter().map(|v| v.type_name()).collect::<Vec<_>>())
                .finish(),
        }
    }
}

/// Encodes a payload as compact JSON text.
///
/// - `Absent` → `null`
/// - `Single(v)` → `v.to_dto()` as an object, fields in declaration order
/// - `Sequence(vs)` → an array of each element's DTO, in input order;
///   an empty sequence is `[]`
///
/// # Errors
///
/// Returns `Error::Encode` if a DTO cannot be encoded. No partial output is
/// produced.
///
/// # Examples
///
/// ```
/// use json_dto::{to_json, Payload};
///
/// assert_eq!(to_json(&Payload::Absent).unwrap(), "null");
/// assert_eq!(to_json(&Payload::Sequence(Vec::new())).unwrap(), "[]");
/// ```
pub fn to_json(payload: &Payload<'_>) -> Result<String> {
    match payload {
        Payload::Absent => Ok("null".to_string()),
        Payload::Single(value) => Ok(value.dto_json()?),
        Payload::Sequence(values) => {
            let elements = values
                .iter()
                .map(|value| value.dto_json())
                .collect::<serde_json::Result<Vec<_>>>()?;
            Ok(format!("[{}]", elements.join(",")))
        }
    }
}

/// Serializes an optional model.
///
/// # Errors
///
/// See [`to_json`].
pub fn serialize<R: Representable>(value: Option<&R>) -> Result<String> {
    to_json(&Payload::from_option(value))
}

/// Serializes a slice of models as a JSON array.
///
/// # Errors
///
/// See [`to_json`].
pub fn serialize_all<R: Representable>(values: &[R]) -> Result<String> {
    to_json(&Payload::sequence(values))
}

/// Encodes a payload and writes it to a response.
///
/// The payload is fully encoded before the sink is touched, so an encoding
/// failure leaves the response as it was. On success the content type is
/// set to [`RESPONSE_CONTENT_TYPE`] and the JSON bytes are written.
///
/// # Errors
///
/// Returns `Error::Encode` for encoding failures and `Error::Io` if the
/// sink fails to write.
pub fn render<S: ResponseSink + ?Sized>(payload: &Payload<'_>, sink: &mut S) -> Result<()> {
    let json = to_json(payload)?;

    sink.set_content_type(RESPONSE_CONTENT_TYPE);
    sink.write_body(json.as_bytes())?;

    Ok(())
}
