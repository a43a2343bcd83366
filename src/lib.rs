//! Turn a curl command line into an immutable HTTP request value.
//!
//! Browsers and debugging proxies can copy any request "as cURL". This crate
//! reads such a command back into a [`ParsedRequest`]: method, URI, headers and
//! body, plus the original command text. A `ParsedRequest` never changes after
//! it is built. Every `with_*` / `without_*` method returns a new value and
//! leaves the receiver untouched, so a parsed command can be used as a template
//! for many slightly different requests.
//!
//! # Architecture
//!
//! 1. **Tokenizing**: the command is split on spaces and quoted values spanning
//!    several chunks are stitched back together (see [`token`]).
//! 2. **Extraction**: the token sequence is walked once per field. The first
//!    bare value is the URI, `-X` decides the method (`--data` implies `POST`),
//!    `-H` lines become headers and the first payload flag is the body.
//! 3. **Facade**: the fields are wrapped in a [`ParsedRequest`], which can be
//!    converted into an [`http::Request`] or, with the `reqwest` feature, a
//!    `reqwest::RequestBuilder`.
//!
//! Which flags mean what is configurable through [`Grammar`].
//!
//! # Examples
//!
//! ```
//! use curl_request::ParsedRequest;
//! # fn main() -> Result<(), curl_request::Error> {
//! let curl = "curl https://api.github.com/ -H 'DNT: 1' -H 'Accept: text/html, application/xhtml+xml'";
//! let request: ParsedRequest = curl.parse()?;
//! assert_eq!(request.method(), "GET");
//! assert_eq!(request.uri().host(), Some("api.github.com"));
//! assert_eq!(request.header("dnt"), ["1"]);
//! assert_eq!(request.to_string(), curl);
//! # Ok(())
//! # }
//! ```
//!
//! Deriving new requests:
//!
//! ```
//! use curl_request::ParsedRequest;
//! # fn main() -> Result<(), curl_request::Error> {
//! let base = ParsedRequest::parse("curl https://example.com/items --data 'a=1'")?;
//! let put = base.with_method("PUT").with_header("Content-Type", "text/plain");
//! assert_eq!(base.method(), "POST");
//! assert_eq!(put.method(), "PUT");
//! assert!(!base.has_header("content-type"));
//! # Ok(())
//! # }
//! ```
//!
//! Commands can also be templates:
//!
//! ```
//! use curl_request::ParsedRequest;
//! use serde_json::json;
//! # fn main() -> Result<(), curl_request::Error> {
//! let curl = "curl https://api.example.com/users -H 'Authorization: Bearer {{ token }}'";
//! let request = ParsedRequest::load(curl, json!({ "token": "123456" }))?;
//! assert_eq!(request.header_line("authorization"), "Bearer 123456");
//! # Ok(())
//! # }
//! ```

pub(crate) mod error;
mod grammar;
mod headers;
mod parser;
mod request;
pub mod token;

use http::{Method, Uri};
use std::sync::Arc;

pub use error::Error;
pub use grammar::{DEFAULT_PROTOCOL_VERSION, Grammar};
pub use headers::Headers;
use token::Token;

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRequest {
    raw: Arc<str>,
    tokens: Arc<[Token]>,
    method: String,
    uri: Uri,
    headers: Headers,
    body: String,
    protocol_version: String,
    request_target: Option<String>,
}

impl Default for ParsedRequest {
    fn default() -> Self {
        Self {
            raw: Arc::from(""),
            tokens: Arc::from(Vec::new()),
            method: Method::GET.to_string(),
            uri: Uri::default(),
            headers: Headers::new(),
            body: String::new(),
            protocol_version: DEFAULT_PROTOCOL_VERSION.into(),
            request_target: None,
        }
    }
}
