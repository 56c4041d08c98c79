//! In-memory transport replaying scripted responses.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use blogsync_atom::{Method, Response, Transport, TransportError};

/// A request as seen by [`ScriptedTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<String>,
}

/// Transport answering from a script keyed by method and URL.
///
/// Responses queued for the same route are served in order; the last one is
/// repeated once the queue is down to it. Unscripted routes answer
/// `404 Not Found`.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    routes: RefCell<HashMap<(Method, String), VecDeque<Response>>>,
    requests: RefCell<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for `method url`.
    pub fn respond(&self, method: Method, url: &str, status: u16, body: impl Into<String>) -> &Self {
        let response = Response {
            status,
            status_line: status_line(status),
            headers: vec![("Content-Type".to_string(), "application/atom+xml".to_string())],
            body: body.into().into_bytes(),
        };
        self.routes
            .borrow_mut()
            .entry((method, url.to_string()))
            .or_default()
            .push_back(response);
        self
    }

    /// Queue a `200 OK` response for `method url`.
    pub fn ok(&self, method: Method, url: &str, body: impl Into<String>) -> &Self {
        self.respond(method, url, 200, body)
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    /// Number of requests received for `method url`.
    pub fn count(&self, method: Method, url: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|r| r.method == method && r.url == url)
            .count()
    }
}

impl Transport for ScriptedTransport {
    fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&[u8]>,
    ) -> Result<Response, TransportError> {
        self.requests.borrow_mut().push(RecordedRequest {
            method,
            url: url.to_string(),
            body: body.map(|b| String::from_utf8_lossy(b).into_owned()),
        });

        let mut routes = self.routes.borrow_mut();
        let response = match routes.get_mut(&(method, url.to_string())) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };

        Ok(response.unwrap_or_else(|| Response {
            status: 404,
            status_line: status_line(404),
            headers: Vec::new(),
            body: b"Not Found".to_vec(),
        }))
    }
}

fn status_line(status: u16) -> String {
    let reason = match status {
        200 => "OK",
        201 => "Created",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "",
    };
    format!("{status} {reason}").trim_end().to_string()
}
