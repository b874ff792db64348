use std::io;

/// Errors raised on the output side of the crate.
///
/// Binding-side problems (unreadable bodies, malformed JSON) never show up
/// here: they are logged and degrade to "no body" or [`Binding::Unbound`].
/// Everything in this enum is a failure of a specific serialize or render
/// call and is returned to the caller as-is.
///
/// [`Binding::Unbound`]: crate::Binding::Unbound
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The value handed to the serializer is not null, not a Representable
    /// model and not a sequence of Representable models.
    #[error("invalid argument: `{type_name}` is not a registered Representable model")]
    InvalidArgument {
        /// Type name of the offending value or sequence element
        type_name: &'static str,
    },

    /// A DTO produced by `to_dto()` could not be encoded as JSON.
    #[error("failed to encode DTO as JSON: {0}")]
    Encode(#[from] serde_json::Error),

    /// Writing the encoded bytes to the response sink failed.
    #[error("failed to write response body: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Creates an `InvalidArgument` error for the given type name.
    pub fn invalid_argument(type_name: &'static str) -> Self {
        Error::InvalidArgument { type_name }
    }

    /// Returns `true` if this is an `InvalidArgument` error.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument { .. })
    }
}

/// Result type used by the serializer and the response writer.
pub type Result<T> = std::result::Result<T, Error>;
