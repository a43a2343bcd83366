use snafu::Snafu;

pub(crate) type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Failed to parse URL {value:?}"))]
    ParseUrl {
        value: String,
        source: http::uri::InvalidUri,
    },
    #[snafu(display("Failed to parse HTTP method {value:?}"))]
    ParseMethod {
        value: String,
        source: http::method::InvalidMethod,
    },
    #[snafu(display("Failed to parse header name {name:?}"))]
    ParseHeaderName {
        name: String,
        source: http::header::InvalidHeaderName,
    },
    #[snafu(display("Failed to parse value of header {name}"))]
    ParseHeaderValue {
        name: String,
        source: http::header::InvalidHeaderValue,
    },
    #[snafu(display("Unsupported HTTP protocol version: {version}"))]
    UnsupportedVersion { version: String },
    #[snafu(display("Failed to assemble http request"))]
    BuildRequest { source: http::Error },
    #[cfg(feature = "reqwest")]
    #[snafu(display("Failed to build reqwest client"))]
    BuildClient { source: reqwest::Error },

    #[snafu(display("Failed to render request template"))]
    Render { source: minijinja::Error },
}
