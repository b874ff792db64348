//! JSON request binding and model-to-DTO rendering for web handlers.
//!
//! This crate sits between a host web framework and typed model objects:
//! - **Capture**: the JSON body of an eligible request (POST/PUT with
//!   exactly `application/json`) is read once per request, and the
//!   request's stream is left exhausted for every other reader
//! - **Binding**: the captured body is deserialized into a parameter only
//!   when that parameter's type is a DTO
//! - **Serialization**: models that declare a DTO projection are rendered
//!   as JSON, alone or as an ordered sequence
//!
//! # Core Types
//!
//! - [`JsonDto`]: Marker for plain records exchanged on the wire
//! - [`Representable`]: A model's `merge`/`to_dto` projection onto its DTO
//! - [`RequestContext`]: Per-request context; capture runs once, then binding
//! - [`Binder`] / [`Binding`]: Typed DTO binding with an explicit "no binding"
//! - [`Payload`] / [`render`]: Output values and the response writer
//! - [`TypeRegistry`]: Explicit registration for runtime-typed hosts
//!
//! # Examples
//!
//! ```
//! use json_dto::{render, BufferedResponse, HttpMethod, JsonDto, Payload, Representable, Request, RequestContext};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Default, Serialize, Deserialize)]
//! struct NoteDto {
//!     tit: Option<String>,
//! }
//!
//! impl JsonDto for NoteDto {}
//!
//! #[derive(Default)]
//! struct Note {
//!     title: Option<String>,
//! }
//!
//! impl Representable for Note {
//!     type Dto = NoteDto;
//!
//!     fn merge(&mut self, dto: NoteDto) {
//!         self.title = dto.tit;
//!     }
//!
//!     fn to_dto(&self) -> NoteDto {
//!         NoteDto { tit: self.title.clone() }
//!     }
//! }
//!
//! // Inbound: capture once, then bind the DTO parameter
//! let request = Request::new("req-123", HttpMethod::Post)
//!     .with_content_type("application/json")
//!     .with_body(r#"{"tit":"My note"}"#);
//! let ctx = RequestContext::new(request).capture();
//!
//! let mut note = Note::default();
//! if let Some(dto) = ctx.binder().bind::<NoteDto>("note").into_option() {
//!     note.merge(dto);
//! }
//!
//! // Outbound: render the model through its DTO
//! let mut response = BufferedResponse::new();
//! render(&Payload::single(&note), &mut response).expect("writable");
//! assert_eq!(response.body_str(), Some(r#"{"tit":"My note"}"#));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod binder;
mod capture;
mod context;
mod dto;
mod error;
mod http;
mod logging;
mod registry;
mod representable;
mod request;
mod serializer;
mod sink;
mod state;
pub mod web;

pub use binder::{Binder, Binding};
pub use capture::{capture, is_eligible, read_stream, CapturedBody};
pub use context::RequestContext;
pub use dto::JsonDto;
pub use error::{Error, Result};
pub use http::{
    Body, HttpMethod, CHARSET, JSON_CONTENT_TYPE, RESPONSE_CONTENT_TYPE, TEXT_CONTENT_TYPE,
};
pub use logging::RequestLog;
pub use registry::{AnyValue, Dynamic, TypeKey, TypeRegistry};
pub use representable::{DtoSource, Representable};
pub use request::Request;
pub use serializer::{render, serialize, serialize_all, to_json, Payload};
pub use sink::{BufferedResponse, ResponseSink};
pub use state::{Captured, Pending};
