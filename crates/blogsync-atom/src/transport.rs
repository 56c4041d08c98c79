//! The transport seam between the sync engine and HTTP

use std::fmt;

/// HTTP methods used by AtomPub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully read HTTP response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    /// Status line without the protocol, e.g. `404 Not Found`
    pub status_line: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn is_success(&self) -> bool {
        self.status < 300
    }

    /// Turn a status of 300 or above into [`TransportError::Status`].
    pub fn error_for_status(self) -> Result<Self, TransportError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(TransportError::Status {
                code: self.status,
                status: self.status_line,
                body: String::from_utf8_lossy(&self.body).into_owned(),
            })
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Transport-level failures.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The server answered with a status of 300 or above
    #[error("got [{status}]: {body:?}")]
    Status {
        code: u16,
        status: String,
        body: String,
    },

    /// The request never produced a response
    #[error("{method} {url} failed: {message}")]
    Request {
        method: Method,
        url: String,
        message: String,
    },
}

impl TransportError {
    /// HTTP status code, when the server answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TransportError::Status { code, .. } => Some(*code),
            TransportError::Request { .. } => None,
        }
    }
}

/// A single-attempt, blocking request/response channel.
pub trait Transport {
    /// Perform one round trip; failure statuses come back as responses.
    fn send(&self, method: Method, url: &str, body: Option<&[u8]>)
    -> Result<Response, TransportError>;

    /// Perform one round trip, treating statuses of 300 and above as errors.
    fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<&[u8]>,
    ) -> Result<Response, TransportError> {
        self.send(method, url, body)?.error_for_status()
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&[u8]>,
    ) -> Result<Response, TransportError> {
        (**self).send(method, url, body)
    }
}
