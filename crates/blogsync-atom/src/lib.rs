//! AtomPub wire format and WSSE-signed transport for blogsync
//!
//! - [`codec`] parses feeds and entries and serializes entries for upload
//! - [`transport`] defines the one-method [`Transport`] seam
//! - [`http`] is the production transport, signing each request with [`wsse`]
//! - [`client`] combines a transport with the codec
//! - [`logging`] is the [`Logger`] value handed to transports and the broker

pub mod client;
pub mod codec;
pub mod error;
pub mod http;
pub mod logging;
pub mod model;
pub mod transport;
pub mod wsse;

pub use client::AtomClient;
pub use codec::{parse_entry, parse_feed, serialize_entry};
pub use error::{Error, Result};
pub use http::HttpTransport;
pub use logging::Logger;
pub use model::{AtomEntry, Author, Category, Content, Control, Feed, Link, Links};
pub use transport::{Method, Response, Transport, TransportError};
pub use wsse::WsseCredentials;
