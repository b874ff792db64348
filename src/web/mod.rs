//! Web framework integration surface.
//!
//! This module is the boundary between a host HTTP framework and the
//! binding layer. It handles:
//! - Mapping framework requests to [`Request`](crate::Request)
//! - Running body capture once, before the handler is invoked
//! - A reference controller showing binding and rendering end to end
//!
//! # Design Principles
//!
//! 1. **No Framework Dependencies**: nothing here is framework-specific.
//!    Framework code implements [`ExtractRequest`] for its request type.
//!
//! 2. **Capture Before Invocation**: [`before_invocation`] returns a
//!    captured context; handlers can only bind from that.
//!
//! 3. **Explicit Context**: no global state. The captured body lives in the
//!    per-request context and dies with it.
//!
//! # Integration Flow
//!
//! ```text
//! framework request
//!   ↓ ExtractRequest
//! Request
//!   ↓ before_invocation
//! RequestContext<Captured>
//!   ↓ binder().bind::<Dto>(name)     (once per DTO parameter)
//! handler
//!   ↓ render(&payload, &mut response)
//! framework response
//! ```

pub mod example_handler;
mod extract;
mod middleware;

pub use extract::ExtractRequest;
pub use middleware::{before_invocation, prepare};
