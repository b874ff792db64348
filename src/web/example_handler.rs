//! Example handlers demonstrating binding and rendering end to end.
//!
//! This module is a small reference controller: a `Note` model projected
//! through `NoteDto`, and handlers covering each path through the crate.
//!
//! **These examples are for documentation and testing only.**
//! They show the intended usage without any real HTTP infrastructure.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::binder::Binding;
use crate::capture::read_stream;
use crate::context::RequestContext;
use crate::dto::JsonDto;
use crate::error::Result;
use crate::http::TEXT_CONTENT_TYPE;
use crate::registry::TypeRegistry;
use crate::representable::Representable;
use crate::serializer::{render, Payload};
use crate::sink::ResponseSink;

/// Wire shape of a [`Note`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDto {
    /// Note title
    pub tit: Option<String>,
}

impl JsonDto for NoteDto {}

/// A model standing in for an application entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Note {
    title: Option<String>,
}

impl Note {
    /// Creates a note with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
        }
    }

    /// Returns the title, if set.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

impl Representable for Note {
    type Dto = NoteDto;

    fn merge(&mut self, dto: NoteDto) {
        self.title = dto.tit;
    }

    fn to_dto(&self) -> NoteDto {
        NoteDto {
            tit: self.title.clone(),
        }
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Note({})", self.title.as_deref().unwrap_or("null"))
    }
}

/// Returns the registry the example handlers dispatch through.
pub fn note_registry() -> TypeRegistry {
    TypeRegistry::new()
        .register_dto::<NoteDto>()
        .register_model::<Note>()
}

/// Renders a single note as JSON.
///
/// # Examples
///
/// ```
/// use json_dto::web::example_handler::get_note;
/// use json_dto::BufferedResponse;
///
/// let mut response = BufferedResponse::new();
/// get_note(&mut response).unwrap();
///
/// assert_eq!(response.content_type(), Some("application/json; charset=utf-8"));
/// assert_eq!(response.body_str(), Some(r#"{"tit":"My note"}"#));
/// ```
pub fn get_note<S: ResponseSink + ?Sized>(response: &mut S) -> Result<()> {
    let note = Note::new("My note");
    render(&Payload::single(&note), response)
}

/// Renders a list of notes as a JSON array.
pub fn get_notes<S: ResponseSink + ?Sized>(response: &mut S) -> Result<()> {
    let notes = vec![Note::new("foo"), Note::new("bar")];
    render(&Payload::sequence(&notes), response)
}

/// Echoes the `param` query parameter as text.
///
/// Shows that ordinary GET requests pass through capture untouched.
pub fn get_with_params<S: ResponseSink + ?Sized>(
    ctx: &RequestContext,
    response: &mut S,
) -> Result<()> {
    let param = ctx.request().query_param("param").unwrap_or("null");
    render_text(response, &format!("param={}", param))
}

/// Echoes whatever is left of the request body as text.
///
/// For a non-JSON POST this is the full body; capture never touched it.
pub fn post_with_body<S: ResponseSink + ?Sized>(
    ctx: &mut RequestContext,
    response: &mut S,
) -> Result<()> {
    let body = read_stream(ctx.request_mut().body_mut())?;
    render_text(response, &format!("body={}", body))
}

/// Binds a `NoteDto` parameter and echoes its title and the remaining body.
///
/// The remaining body is always empty for an eligible request.
///
/// # Examples
///
/// ```
/// use json_dto::web::{before_invocation, example_handler::post_note};
/// use json_dto::{BufferedResponse, HttpMethod, Request};
///
/// let request = Request::new("req-1", HttpMethod::Post)
///     .with_content_type("application/json")
///     .with_body(r#"{"tit":"My note"}"#);
/// let mut ctx = before_invocation(request);
///
/// let mut response = BufferedResponse::new();
/// post_note(&mut ctx, &mut response).unwrap();
/// assert_eq!(response.body_str(), Some("title=My note;body="));
/// ```
pub fn post_note<S: ResponseSink + ?Sized>(
    ctx: &mut RequestContext,
    response: &mut S,
) -> Result<()> {
    let note = ctx.binder().bind::<NoteDto>("note").into_option();
    let title = note
        .and_then(|dto| dto.tit)
        .unwrap_or_else(|| "null".to_string());

    let body = read_stream(ctx.request_mut().body_mut())?;
    render_text(response, &format!("title={};body={}", title, body))
}

/// Declares a `Note` model parameter, which is never bound from the body.
///
/// The registry defers because `Note` is not a DTO type, so the parameter
/// falls back to its absent default.
pub fn post_note_model<S: ResponseSink + ?Sized>(
    ctx: &mut RequestContext,
    registry: &TypeRegistry,
    response: &mut S,
) -> Result<()> {
    let note = match registry.bind_as::<Note>(&ctx.binder(), "note") {
        Binding::Bound(note) => note.to_string(),
        Binding::Unbound => "null".to_string(),
    };

    let body = read_stream(ctx.request_mut().body_mut())?;
    render_text(response, &format!("note={};body={}", note, body))
}

fn render_text<S: ResponseSink + ?Sized>(response: &mut S, text: &str) -> Result<()> {
    response.set_content_type(TEXT_CONTENT_TYPE);
    response.write_body(text.as_bytes())?;
    Ok(())
}
