//! HTTP plumbing shared by the service clients and the downloader.

mod http;

pub use http::{client_builder, HttpTransport, RawResponse, TransportError};
