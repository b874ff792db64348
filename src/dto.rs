//! The DTO marker.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Marks a plain record as a JSON Data Transfer Object.
///
/// Only types implementing `JsonDto` are ever instantiated from a request
/// body, and only `JsonDto` types can be produced by
/// [`Representable::to_dto`](crate::Representable::to_dto). The trait has no
/// methods: opting in is the whole contract.
///
/// Every DTO has a [`Default`]. When a request body leaves a field out, the
/// binder fills it from `Self::default()`, so partial input never fails on
/// its own. Unknown JSON fields are ignored as long as the type does not use
/// `#[serde(deny_unknown_fields)]`.
///
/// # Examples
///
/// ```
/// use json_dto::JsonDto;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Default, Serialize, Deserialize)]
/// struct NoteDto {
///     tit: Option<String>,
/// }
///
/// impl JsonDto for NoteDto {}
/// ```
pub trait JsonDto: Default + Serialize + DeserializeOwned {}
