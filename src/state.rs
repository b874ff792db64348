//! Type-state markers for the request pipeline.
//!
//! These zero-sized types encode at compile time whether a request's body
//! capture has already run.

/// Marker for a context whose body has not been captured yet.
///
/// `RequestContext<Pending>` can only be captured; it cannot bind.
#[derive(Debug, Clone, Copy)]
pub struct Pending {
    _private: (),
}

/// Marker for a context whose body capture has run.
///
/// `RequestContext<Captured>` exposes the captured body and the binder.
#[derive(Debug, Clone, Copy)]
pub struct Captured {
    _private: (),
}
