use std::fmt;
use std::io::{self, Cursor, Read};

/// Content type an inbound request must declare, exactly, to be bound.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Content type set on every rendered DTO response.
pub const RESPONSE_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Content type used for plain-text handler responses.
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Character encoding used for request bodies and responses.
pub const CHARSET: &str = "UTF-8";

/// HTTP method of an inbound request.
///
/// Parsing is case-sensitive, as HTTP method tokens are. Anything that is
/// not one of the well-known methods is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method
    Get,
    /// HTTP POST method
    Post,
    /// HTTP PUT method
    Put,
    /// HTTP DELETE method
    Delete,
    /// HTTP PATCH method
    Patch,
    /// HTTP HEAD method
    Head,
    /// HTTP OPTIONS method
    Options,
    /// Any other method token
    Other(String),
}

impl HttpMethod {
    /// Returns `true` for the methods whose body may be bound to a DTO.
    ///
    /// Only POST and PUT qualify. GET and DELETE never carry a bindable
    /// body, and neither does PATCH.
    pub fn is_bindable(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

impl From<&str> for HttpMethod {
    fn from(token: &str) -> Self {
        match token {
            "GET" => HttpMethod::Get,
            "POST" => HttpMethod::Post,
            "PUT" => HttpMethod::Put,
            "DELETE" => HttpMethod::Delete,
            "PATCH" => HttpMethod::Patch,
            "HEAD" => HttpMethod::Head,
            "OPTIONS" => HttpMethod::Options,
            other => HttpMethod::Other(other.to_string()),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
            HttpMethod::Put => write!(f, "PUT"),
            HttpMethod::Delete => write!(f, "DELETE"),
            HttpMethod::Patch => write!(f, "PATCH"),
            HttpMethod::Head => write!(f, "HEAD"),
            HttpMethod::Options => write!(f, "OPTIONS"),
            HttpMethod::Other(token) => write!(f, "{}", token),
        }
    }
}

/// A once-readable request body stream.
///
/// `Body` owns whatever reader the host framework handed over. Reading it
/// consumes it; there is no rewind.
pub struct Body {
    reader: Box<dyn Read + Send>,
}

impl Body {
    /// Creates an already-exhausted body.
    pub fn empty() -> Self {
        Self::from_bytes(Vec::new())
    }

    /// Creates a body that yields the given bytes once.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::from_reader(Cursor::new(bytes.into()))
    }

    /// Wraps an arbitrary reader supplied by the host framework.
    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
        Self {
            reader: Box::new(reader),
        }
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::empty()
    }
}

impl Read for Body {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Body").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_method_display() {
        assert_eq!(format!("{}", HttpMethod::Get), "GET");
        assert_eq!(format!("{}", HttpMethod::Post), "POST");
        assert_eq!(format!("{}", HttpMethod::Put), "PUT");
        assert_eq!(format!("{}", HttpMethod::Delete), "DELETE");
        assert_eq!(format!("{}", HttpMethod::Patch), "PATCH");
        assert_eq!(format!("{}", HttpMethod::Other("PURGE".into())), "PURGE");
    }

    #[test]
    fn http_method_parse_is_case_sensitive() {
        assert_eq!(HttpMethod::from("POST"), HttpMethod::Post);
        assert_eq!(HttpMethod::from("post"), HttpMethod::Other("post".into()));
        assert!(!HttpMethod::from("post").is_bindable());
    }

    #[test]
    fn only_post_and_put_are_bindable() {
        assert!(HttpMethod::Post.is_bindable());
        assert!(HttpMethod::Put.is_bindable());

        assert!(!HttpMethod::Get.is_bindable());
        assert!(!HttpMethod::Delete.is_bindable());
        assert!(!HttpMethod::Patch.is_bindable());
        assert!(!HttpMethod::Head.is_bindable());
        assert!(!HttpMethod::Options.is_bindable());
    }

    #[test]
    fn body_reads_once() {
        let mut body = Body::from_bytes("ABC");
        let mut first = String::new();
        let mut second = String::new();

        body.read_to_string(&mut first).expect("readable");
        body.read_to_string(&mut second).expect("readable");

        assert_eq!(first, "ABC");
        assert_eq!(second, "");
    }

    #[test]
    fn empty_body_yields_nothing() {
        let mut out = Vec::new();
        Body::empty().read_to_end(&mut out).expect("readable");
        assert!(out.is_empty());
    }

    #[test]
    fn body_debug_does_not_expose_content() {
        let body = Body::from_bytes("SECRET_PASSWORD");
        assert!(!format!("{:?}", body).contains("SECRET"));
    }
}
