use crate::dto::JsonDto;

/// A model that can represent itself as exactly one DTO shape.
///
/// `Representable` is the projection contract between an application
/// entity and its wire format:
/// - [`to_dto`](Self::to_dto) snapshots the current state into a fresh DTO
/// - [`merge`](Self::merge) overwrites the state from a DTO
///
/// The associated `Dto` type makes the 1:1 mapping explicit: a model has one
/// DTO type, though several models may share one.
///
/// `merge` is a full overwrite. A field that is absent in the DTO becomes
/// absent in the model; there is no "skip if missing" mode.
///
/// # Examples
///
/// ```
/// use json_dto::{JsonDto, Representable};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Default, Serialize, Deserialize)]
/// struct NoteDto {
///     tit: Option<String>,
/// }
///
/// impl JsonDto for NoteDto {}
///
/// struct Note {
///     title: Option<String>,
/// }
///
/// impl Representable for Note {
///     type Dto = NoteDto;
///
///     fn merge(&mut self, dto: NoteDto) {
///         self.title = dto.tit;
///     }
///
///     fn to_dto(&self) -> NoteDto {
///         NoteDto { tit: self.title.clone() }
///     }
/// }
///
/// let mut note = Note { title: Some("draft".to_string()) };
/// note.merge(NoteDto { tit: None });
/// assert!(note.title.is_none());
/// ```
pub trait Representable {
    /// The DTO shape this model maps to.
    type Dto: JsonDto;

    /// Copies all state from `dto` into this model.
    fn merge(&mut self, dto: Self::Dto);

    /// Returns a new DTO populated from this model's current state.
    fn to_dto(&self) -> Self::Dto;
}

mod private {
    pub trait Sealed {}

    impl<R: super::Representable> Sealed for R {}
}

/// Object-safe view of a [`Representable`] used by the serializer.
///
/// Every `Representable` is a `DtoSource` through a blanket implementation,
/// and the trait is sealed, so holding a `&dyn DtoSource` is proof that the
/// value declares a DTO projection. Heterogeneous sequences are built from
/// these.
///
/// Implementing it directly is rejected:
///
/// ```compile_fail
/// use json_dto::DtoSource;
///
/// struct Raw;
///
/// impl DtoSource for Raw {
///     fn dto_json(&self) -> serde_json::Result<String> {
///         Ok("\"raw\"".to_string())
///     }
///
///     fn type_name(&self) -> &'static str {
///         "Raw"
///     }
/// }
/// ```
pub trait DtoSource: private::Sealed {
    /// Projects the value through `to_dto()` and encodes the DTO as compact JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the DTO cannot be encoded (e.g. a
    /// map with non-string keys).
    fn dto_json(&self) -> serde_json::Result<String>;

    /// Returns the Rust type name of the model.
    fn type_name(&self) -> &'static str;
}

impl<R: Representable> DtoSource for R {
    fn dto_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.to_dto())
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<R>()
    }
}
