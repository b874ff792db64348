//! Explicit type registration for hosts that dispatch on declared types.
//!
//! Hosts that only know a parameter's declared type at runtime, or that hand
//! over output values of unknown type, register their DTO and model types in
//! a [`TypeRegistry`] once at startup. Registration is where the compile-time
//! checks happen: only [`JsonDto`] types can be registered for binding and
//! only [`Representable`] types for serialization. Lookups of anything else
//! defer (binding) or fail with `InvalidArgument` (serialization).

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

use crate::binder::{Binder, Binding};
use crate::dto::JsonDto;
use crate::error::{Error, Result};
use crate::logging::RequestLog;
use crate::representable::{DtoSource, Representable};
use crate::serializer::Payload;

type BindFn = for<'a> fn(&Binder<'a>, &str) -> Binding<Box<dyn Any + Send>>;
type ProjectFn = for<'v> fn(&'v (dyn Any + 'static)) -> Option<&'v dyn DtoSource>;

/// Runtime token for a declared parameter type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Returns the key for `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Returns the Rust type name.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// A host value whose concrete type is only known at runtime.
///
/// Implemented for every `'static` type.
pub trait AnyValue: Any {
    /// Returns `self` as `&dyn Any` for downcasting.
    fn as_any(&self) -> &(dyn Any + 'static);

    /// Returns the Rust type name of the value.
    fn value_type_name(&self) -> &'static str;
}

impl<T: Any> AnyValue for T {
    fn as_any(&self) -> &(dyn Any + 'static) {
        self
    }

    fn value_type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// A dynamically typed output value handed over by the host.
#[derive(Clone, Default)]
pub enum Dynamic<'v> {
    /// A null/absent value.
    #[default]
    Null,
    /// A single value of unknown type.
    Object(&'v dyn AnyValue),
    /// An ordered list of values of unknown types.
    List(Vec<&'v dyn AnyValue>),
}

impl fmt::Debug for Dynamic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dynamic::Null => write!(f, "Null"),
            Dynamic::Object(value) => f
                .debug_tuple("Object")
                .field(&(*value).value_type_name())
                .finish(),
            Dynamic::List(values) => f
                .debug_tuple("List")
                .field(
                    &values
                        .iter()
                        .map(|v| (*v).value_type_name())
                        .collect::<Vec<_>>(),
                )
                .finish(),
        }
    }
}

/// Table of the DTO and model types a host works with.
///
/// Build it once at startup and share it (it is `Send + Sync` and holds no
/// request data).
///
/// # Examples
///
/// ```
/// use json_dto::{HttpMethod, JsonDto, Representable, Request, RequestContext, TypeRegistry};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Default, Serialize, Deserialize)]
/// struct NoteDto { tit: Option<String> }
/// impl JsonDto for NoteDto {}
///
/// struct Note { title: Option<String> }
/// impl Representable for Note {
///     type Dto = NoteDto;
///     fn merge(&mut self, dto: NoteDto) { self.title = dto.tit; }
///     fn to_dto(&self) -> NoteDto { NoteDto { tit: self.title.clone() } }
/// }
///
/// let registry = TypeRegistry::new()
///     .register_dto::<NoteDto>()
///     .register_model::<Note>();
///
/// let request = Request::new("req-1", HttpMethod::Post)
///     .with_content_type("application/json")
///     .with_body(r#"{"tit":"My note"}"#);
/// let ctx = RequestContext::new(request).capture();
///
/// assert!(registry.bind_as::<NoteDto>(&ctx.binder(), "note").is_bound());
/// // Models are never synthesized from a body.
/// assert!(!registry.bind_as::<Note>(&ctx.binder(), "note").is_bound());
/// ```
#[derive(Default)]
pub struct TypeRegistry {
    dtos: HashMap<TypeId, (&'static str, BindFn)>,
    models: HashMap<TypeId, (&'static str, ProjectFn)>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `D` as a bindable DTO type.
    pub fn register_dto<D: JsonDto + Send + 'static>(mut self) -> Self {
        self.dtos.insert(
            TypeId::of::<D>(),
            (std::any::type_name::<D>(), bind_erased::<D> as BindFn),
        );
        self
    }

    /// Registers `R` as a serializable model type.
    pub fn register_model<R: Representable + 'static>(mut self) -> Self {
        self.models.insert(
            TypeId::of::<R>(),
            (std::any::type_name::<R>(), project::<R> as ProjectFn),
        );
        self
    }

    /// Returns `true` if the key names a registered DTO type.
    pub fn is_dto(&self, key: TypeKey) -> bool {
        self.dtos.contains_key(&key.id)
    }

    /// Returns `true` if the key names a registered model type.
    pub fn is_model(&self, key: TypeKey) -> bool {
        self.models.contains_key(&key.id)
    }

    /// Binds a parameter whose declared type is given at runtime.
    ///
    /// Only registered DTO types bind. Any other declared type, including
    /// Representable models, yields `Unbound` so the host applies its own
    /// default.
    pub fn bind(
        &self,
        binder: &Binder<'_>,
        name: &str,
        key: TypeKey,
    ) -> Binding<Box<dyn Any + Send>> {
        match self.dtos.get(&key.id) {
            Some((_, bind)) => bind(binder, name),
            None => {
                RequestLog::new(binder.request().request_id()).debug(format_args!(
                    "registry: {} is not a registered DTO type, deferring parameter '{}'",
                    key.name(),
                    name
                ));
                Binding::Unbound
            }
        }
    }

    /// Binds a parameter declared as `T`.
    pub fn bind_as<T: Any>(&self, binder: &Binder<'_>, name: &str) -> Binding<T> {
        match self.bind(binder, name, TypeKey::of::<T>()) {
            Binding::Bound(value) => match value.downcast::<T>() {
                Ok(value) => Binding::Bound(*value),
                Err(_) => Binding::Unbound,
            },
            Binding::Unbound => Binding::Unbound,
        }
    }

    /// Converts a dynamic host value into a serializer payload.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` naming the type of the value (or the
    /// first list element) that is not a registered model. Nothing is
    /// encoded in that case.
    pub fn payload<'v>(&self, value: &Dynamic<'v>) -> Result<Payload<'v>> {
        match value {
            Dynamic::Null => Ok(Payload::Absent),
            Dynamic::Object(value) => self.project(*value).map(Payload::Single),
            Dynamic::List(values) => values
                .iter()
                .map(|value| self.project(*value))
                .collect::<Result<Vec<_>>>()
                .map(Payload::Sequence),
        }
    }

    fn project<'v>(&self, value: &'v dyn AnyValue) -> Result<&'v dyn DtoSource> {
        let any = value.as_any();
        self.models
            .get(&any.type_id())
            .and_then(|(_, project)| project(any))
            .ok_or_else(|| Error::invalid_argument(value.value_type_name()))
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dtos: Vec<_> = self.dtos.values().map(|(name, _)| *name).collect();
        let mut models: Vec<_> = self.models.values().map(|(name, _)| *name).collect();
        dtos.sort_unstable();
        models.sort_unstable();

        f.debug_struct("TypeRegistry")
            .field("dtos", &dtos)
            .field("models", &models)
            .finish()
    }
}

fn bind_erased<D: JsonDto + Send + 'static>(
    binder: &Binder<'_>,
    name: &str,
) -> Binding<Box<dyn Any + Send>> {
    binder
        .bind::<D>(name)
        .map(|dto| Box::new(dto) as Box<dyn Any + Send>)
}

fn project<'a, R: Representable + 'static>(
    value: &'a (dyn Any + 'static),
) -> Option<&'a dyn DtoSource> {
    value
        .downcast_ref::<R>()
        .map(|model| model as &dyn DtoSource)
}
