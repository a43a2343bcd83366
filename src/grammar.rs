//! The flag vocabulary the parser understands.
//!
//! A [`Grammar`] names which flags carry the method, headers and payload,
//! which flags never take a value, and which headers are dropped on the floor.
//! The defaults describe the command lines browsers and debugging proxies
//! produce with "copy as cURL". Because it derives serde traits, a grammar can
//! be kept in a config file next to the commands it is meant to read.

use crate::{ParsedRequest, error::*, parser::parse_with};
use minijinja::Environment;
use serde::{Deserialize, Serialize};
use snafu::ResultExt;

pub const DEFAULT_PROTOCOL_VERSION: &str = "1.1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Grammar {
    /// Flags overriding the request method (`-X`).
    pub method_flags: Vec<String>,
    /// Flags carrying a `Name: value` header line (`-H`).
    pub header_flags: Vec<String>,
    /// Flags carrying a literal payload (`--data`).
    pub data_flags: Vec<String>,
    /// Flags carrying a raw payload (`--data-binary`).
    pub data_binary_flags: Vec<String>,
    /// Flags that take no value (`--compressed`).
    pub single_flags: Vec<String>,
    /// Header names skipped while parsing, compared case-insensitively.
    pub ignore_headers: Vec<String>,
    /// Protocol version reported by every parsed request.
    pub protocol_version: String,
}

impl Default for Grammar {
    fn default() -> Self {
        Self {
            method_flags: vec!["X".into()],
            header_flags: vec!["H".into()],
            data_flags: vec!["data".into()],
            data_binary_flags: vec!["data-binary".into()],
            single_flags: vec!["compressed".into()],
            ignore_headers: vec!["Cookie".into()],
            protocol_version: DEFAULT_PROTOCOL_VERSION.into(),
        }
    }
}

impl Grammar {
    pub fn parse(&self, input: &str) -> Result<ParsedRequest> {
        parse_with(input, self)
    }

    /// Render `input` as a template with `context`, then parse the result.
    pub fn load(&self, input: &str, context: impl Serialize) -> Result<ParsedRequest> {
        let env = Environment::new();
        let input = env.render_str(input, context).context(RenderSnafu)?;
        parse_with(&input, self)
    }

    pub(crate) fn is_single_flag(&self, name: &str) -> bool {
        self.single_flags.iter().any(|flag| flag == name)
    }

    pub(crate) fn is_ignored_header(&self, name: &str) -> bool {
        self.ignore_headers
            .iter()
            .any(|ignored| ignored.eq_ignore_ascii_case(name))
    }

    pub(crate) fn payload_flags(&self) -> Vec<&str> {
        self.data_flags
            .iter()
            .chain(&self.data_binary_flags)
            .map(String::as_str)
            .collect()
    }

    pub(crate) fn method_or_payload_flags(&self) -> Vec<&str> {
        self.method_flags
            .iter()
            .map(String::as_str)
            .chain(self.payload_flags())
            .collect()
    }
}
