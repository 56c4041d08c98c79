//! WSSE-signed blocking HTTP transport

use std::sync::Arc;

use crate::logging::Logger;
use crate::transport::{Method, Response, Transport, TransportError};
use crate::wsse::{self, WsseCredentials};

const ATOM_ENTRY_CONTENT_TYPE: &str = "application/atom+xml;type=entry";

/// Production transport backed by `reqwest::blocking`.
///
/// One attempt per call, no retries, and no timeout beyond the client
/// default.
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    credentials: WsseCredentials,
    logger: Arc<Logger>,
}

impl HttpTransport {
    pub fn new(credentials: WsseCredentials, logger: Arc<Logger>) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("blogsync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Request {
                method: Method::Get,
                url: String::new(),
                message: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            client,
            credentials,
            logger,
        })
    }

    fn method(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl Transport for HttpTransport {
    fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&[u8]>,
    ) -> Result<Response, TransportError> {
        let request_error = |message: String| TransportError::Request {
            method,
            url: url.to_string(),
            message,
        };

        let mut request = self
            .client
            .request(Self::method(method), url)
            .header(wsse::HEADER, self.credentials.header_value());
        if let Some(body) = body {
            self.logger.dump_body("request", body);
            request = request
                .header(reqwest::header::CONTENT_TYPE, ATOM_ENTRY_CONTENT_TYPE)
                .body(body.to_vec());
        }

        self.logger.log(method.as_str(), format_args!("---> {url}"));
        let response = request.send().map_err(|e| {
            self.logger.log("error", format_args!("xxxx {url}: {e}"));
            request_error(e.to_string())
        })?;

        let status = response.status();
        let status_line = match status.canonical_reason() {
            Some(reason) => format!("{} {}", status.as_u16(), reason),
            None => status.as_u16().to_string(),
        };
        self.logger.log(method.as_str(), format_args!("<--- {status_line} {url}"));

        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response
            .bytes()
            .map_err(|e| request_error(format!("failed to read response body: {e}")))?
            .to_vec();
        self.logger.dump_body("response", &body);

        Ok(Response {
            status: status.as_u16(),
            status_line,
            headers,
            body,
        })
    }
}
