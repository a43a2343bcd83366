use crate::{Headers, ParsedRequest, error::*, token::Token};
use http::{HeaderName, HeaderValue, Method, Uri, Version};
use snafu::ResultExt;
use std::{fmt, str::FromStr};

impl ParsedRequest {
    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Values of header `name`, looked up case-insensitively.
    pub fn header(&self, name: &str) -> &[String] {
        self.headers.get(name)
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains(name)
    }

    pub fn header_line(&self, name: &str) -> String {
        self.headers.line(name)
    }

    pub fn header_lines(&self) -> Vec<(&str, String)> {
        self.headers.lines().collect()
    }

    pub fn header_names(&self) -> Vec<&str> {
        self.headers.names().collect()
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn protocol_version(&self) -> &str {
        &self.protocol_version
    }

    /// The explicit request target if one was set, otherwise the path and
    /// query of the URI.
    pub fn request_target(&self) -> String {
        if let Some(target) = &self.request_target {
            return target.clone();
        }
        let path = match self.uri.path() {
            "" => "/",
            path => path,
        };
        match self.uri.query() {
            Some(query) if !query.is_empty() => format!("{path}?{query}"),
            _ => path.to_owned(),
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The command this request was parsed from.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn with_method(&self, method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_uri(&self, uri: Uri) -> Self {
        Self {
            uri,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_body(&self, body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_protocol_version(&self, version: impl Into<String>) -> Self {
        Self {
            protocol_version: version.into(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_request_target(&self, target: impl Into<String>) -> Self {
        Self {
            request_target: Some(target.into()),
            ..self.clone()
        }
    }

    /// Replace header `name` with a single value.
    #[must_use]
    pub fn with_header(&self, name: &str, value: impl Into<String>) -> Self {
        let mut headers = self.headers.clone();
        headers.insert(name, vec![value.into()]);
        Self {
            headers,
            ..self.clone()
        }
    }

    /// Add a value to header `name`, keeping the values already there.
    #[must_use]
    pub fn with_added_header(&self, name: &str, value: impl Into<String>) -> Self {
        let mut headers = self.headers.clone();
        headers.append(name, value.into());
        Self {
            headers,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn without_header(&self, name: &str) -> Self {
        if !self.headers.contains(name) {
            return self.clone();
        }
        let mut headers = self.headers.clone();
        headers.remove(name);
        Self {
            headers,
            ..self.clone()
        }
    }

    /// The method as an [`http::Method`]. Fails for anything that is not an
    /// HTTP token, such as the empty value of a trailing `-X`.
    pub fn http_method(&self) -> Result<Method> {
        Method::from_bytes(self.method.as_bytes()).context(ParseMethodSnafu {
            value: self.method.as_str(),
        })
    }

    pub fn version(&self) -> Result<Version> {
        let version = match self.protocol_version.as_str() {
            "0.9" => Version::HTTP_09,
            "1.0" => Version::HTTP_10,
            "1.1" => Version::HTTP_11,
            "2" | "2.0" => Version::HTTP_2,
            "3" | "3.0" => Version::HTTP_3,
            version => {
                tracing::debug!(version, "unknown protocol version");
                return UnsupportedVersionSnafu { version }.fail();
            }
        };
        Ok(version)
    }

    pub fn to_request(&self) -> Result<http::Request<String>> {
        http::Request::<String>::try_from(self)
    }
}

impl TryFrom<&ParsedRequest> for http::Request<String> {
    type Error = Error;

    fn try_from(req: &ParsedRequest) -> Result<Self> {
        let mut builder = http::Request::builder()
            .method(req.http_method()?)
            .uri(req.uri.clone())
            .version(req.version()?);

        for (name, values) in req.headers.iter() {
            let header = HeaderName::from_str(name).context(ParseHeaderNameSnafu { name })?;
            for value in values {
                let value = HeaderValue::from_str(value).context(ParseHeaderValueSnafu { name })?;
                builder = builder.header(header.clone(), value);
            }
        }

        builder.body(req.body.clone()).context(BuildRequestSnafu)
    }
}

#[cfg(feature = "reqwest")]
impl TryFrom<&ParsedRequest> for reqwest::RequestBuilder {
    type Error = Error;

    fn try_from(req: &ParsedRequest) -> Result<Self> {
        let client = reqwest::Client::builder().build().context(BuildClientSnafu)?;
        let mut builder = client.request(req.http_method()?, req.uri.to_string());
        for (name, values) in req.headers.iter() {
            for value in values {
                builder = builder.header(name, value.as_str());
            }
        }

        let builder = if req.body.is_empty() {
            builder
        } else {
            builder.body(req.body.clone())
        };

        Ok(builder)
    }
}

impl fmt::Display for ParsedRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
