use crate::{
    Grammar, Headers, ParsedRequest,
    error::*,
    token::{Token, filter, tokenize},
};
use http::Uri;
use serde::Serialize;
use snafu::ResultExt;
use std::{str::FromStr, sync::Arc};

pub(crate) fn parse_with(input: &str, grammar: &Grammar) -> Result<ParsedRequest> {
    let tokens = tokenize(input, grammar);
    tracing::debug!(tokens = tokens.len(), "tokenized curl command");

    Ok(ParsedRequest {
        uri: parse_uri(&tokens)?,
        method: parse_method(&tokens, grammar),
        headers: parse_headers(&tokens, grammar),
        body: parse_body(&tokens, grammar),
        protocol_version: grammar.protocol_version.clone(),
        request_target: None,
        raw: Arc::from(input),
        tokens: Arc::from(tokens),
    })
}

pub(crate) fn parse_uri(tokens: &[Token]) -> Result<Uri> {
    let url = tokens.iter().find_map(|token| match token {
        Token::Bare(value) => Some(value.as_str()),
        Token::Flagged { .. } => None,
    });

    match url {
        None | Some("") => Ok(Uri::default()),
        // curl talks HTTP when the scheme is left out
        Some(url) if !url.contains("://") && !url.starts_with('/') => format!("http://{url}")
            .parse()
            .context(ParseUrlSnafu { value: url }),
        Some(url) => url.parse().context(ParseUrlSnafu { value: url }),
    }
}

// Kept as text; it only has to be a valid token once converted into a request.
pub(crate) fn parse_method(tokens: &[Token], grammar: &Grammar) -> String {
    let flags = grammar.method_or_payload_flags();
    let mut method = "GET";
    for (name, value) in filter(tokens, flags.as_slice()) {
        if grammar.method_flags.iter().any(|flag| flag == name) {
            return value.to_uppercase();
        }
        method = "POST";
    }
    method.to_owned()
}

pub(crate) fn parse_headers(tokens: &[Token], grammar: &Grammar) -> Headers {
    let mut headers = Headers::new();
    for (_, line) in filter(tokens, grammar.header_flags.as_slice()) {
        let (name, value) = match line.split_once(": ") {
            Some((name, value)) => (name.trim(), value.trim()),
            None => {
                tracing::debug!(line, "header without separator, keeping it as a bare name");
                (line.trim(), "")
            }
        };
        if name.is_empty() {
            tracing::debug!(line, "skipping header without a name");
            continue;
        }
        if grammar.is_ignored_header(name) {
            tracing::trace!(name, "skipping ignored header");
            continue;
        }
        headers.insert(name, vec![value.to_owned()]);
    }
    headers
}

pub(crate) fn parse_body(tokens: &[Token], grammar: &Grammar) -> String {
    let flags = grammar.payload_flags();
    filter(tokens, flags.as_slice())
        .map(|(_, value)| value.to_owned())
        .next()
        .unwrap_or_default()
}

impl ParsedRequest {
    pub fn parse(input: &str) -> Result<Self> {
        parse_with(input, &Grammar::default())
    }

    /// Render `input` as a minijinja template with `context`, then parse it.
    /// The rendered command is what [`ParsedRequest::as_str`] returns.
    pub fn load(input: &str, context: impl Serialize) -> Result<Self> {
        Grammar::default().load(input, context)
    }
}

impl FromStr for ParsedRequest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::json;

    #[test]
    fn parse_github_request_should_work() -> Result<()> {
        let input = "curl https://api.github.com/ -H 'DNT: 1' -H 'Accept: text/html, application/xhtml+xml'";
        let parsed = ParsedRequest::from_str(input)?;
        assert_eq!(parsed.method(), "GET");
        assert_eq!(parsed.uri().host(), Some("api.github.com"));
        assert_eq!(parsed.uri().scheme_str(), Some("https"));
        assert_eq!(parsed.header("DNT"), ["1"]);
        assert_eq!(parsed.header("Accept"), ["text/html, application/xhtml+xml"]);
        let line = parsed.header_line("accept");
        let accept: Vec<_> = line.split(',').map(str::trim).collect();
        assert_eq!(accept, vec!["text/html", "application/xhtml+xml"]);
        assert_eq!(parsed.body(), "");
        assert_eq!(parsed.to_string(), input);
        Ok(())
    }

    #[test]
    fn explicit_method_should_win_over_data() -> Result<()> {
        let a: ParsedRequest = "curl https://a.io/ -X POST --data 'foo=bar'".parse()?;
        let b: ParsedRequest = "curl https://a.io/ --data 'foo=bar' -X POST".parse()?;
        let c: ParsedRequest = "curl https://a.io/ --data 'foo=bar' -X put".parse()?;
        let d: ParsedRequest = "curl https://a.io/ -X patch --data-binary 'x'".parse()?;
        assert_eq!(a.method(), "POST");
        assert_eq!(b.method(), "POST");
        assert_eq!(c.method(), "PUT");
        assert_eq!(d.method(), "PATCH");
        Ok(())
    }

    #[test]
    fn data_should_imply_post() -> Result<()> {
        let parsed = ParsedRequest::parse("curl https://a.io/form --data 'foo=bar'")?;
        assert_eq!(parsed.method(), "POST");
        assert_eq!(parsed.body(), "foo=bar");

        let parsed = ParsedRequest::parse("curl https://a.io/form --data-binary 'raw' --data 'x'")?;
        assert_eq!(parsed.method(), "POST");
        assert_eq!(parsed.body(), "raw");
        Ok(())
    }

    #[test]
    fn ignored_headers_should_be_dropped() -> Result<()> {
        let parsed = ParsedRequest::parse(
            "curl https://a.io/ -H 'Cookie: secret=1' -H 'cookie: secret=2' -H 'DNT: 1'",
        )?;
        assert!(!parsed.has_header("Cookie"));
        assert_eq!(parsed.header_names(), vec!["DNT"]);
        Ok(())
    }

    #[test]
    fn duplicate_headers_should_keep_the_last_one() -> Result<()> {
        let parsed = ParsedRequest::parse("curl https://a.io/ -H 'accept: */*' -H 'Accept: text/html'")?;
        assert_eq!(parsed.header_names(), vec!["Accept"]);
        assert_eq!(parsed.header("ACCEPT"), ["text/html"]);
        Ok(())
    }

    #[test]
    fn header_without_separator_should_keep_the_name() -> Result<()> {
        let parsed = ParsedRequest::parse("curl https://a.io/ -H 'X-Flag' -H 'X-Tight:1' -H ': nameless'")?;
        assert_eq!(parsed.header("x-flag"), [""]);
        assert_eq!(parsed.header("X-Tight:1"), [""]);
        assert_eq!(parsed.header_names(), vec!["X-Flag", "X-Tight:1"]);
        Ok(())
    }

    #[test]
    fn uri_should_come_from_the_first_bare_value() -> Result<()> {
        let parsed = ParsedRequest::parse("curl -H 'A: b' 'https://first.io/p?q=1' https://second.io/")?;
        assert_eq!(parsed.uri().host(), Some("first.io"));
        assert_eq!(parsed.request_target(), "/p?q=1");
        Ok(())
    }

    #[test]
    fn missing_scheme_should_default_to_http() -> Result<()> {
        let parsed = ParsedRequest::parse("curl 'ifconfig.me'")?;
        assert_eq!(parsed.uri().to_string(), "http://ifconfig.me/");
        Ok(())
    }

    #[test]
    fn missing_uri_should_be_permissive() -> Result<()> {
        let parsed = ParsedRequest::parse("curl -X DELETE")?;
        assert_eq!(parsed.method(), "DELETE");
        assert_eq!(parsed.uri(), &Uri::default());
        assert_eq!(parsed.request_target(), "/");
        Ok(())
    }

    #[test]
    fn invalid_uri_should_surface_error() {
        let err = ParsedRequest::parse("curl 'https://exa mple.com/'").unwrap_err();
        assert!(matches!(err, Error::ParseUrl { .. }));
    }

    #[test]
    fn empty_method_should_parse_and_fail_on_conversion() -> Result<()> {
        let trailing = ParsedRequest::parse("curl https://a.io/ -H 'DNT: 1' -X")?;
        assert_eq!(trailing.method(), "");
        assert_eq!(trailing.header("dnt"), ["1"]);
        let err = trailing.to_request().unwrap_err();
        assert!(matches!(err, Error::ParseMethod { .. }));

        let quoted = ParsedRequest::parse("curl https://a.io/ -X ''")?;
        assert_eq!(quoted.method(), "");
        Ok(())
    }

    #[test]
    fn invalid_method_should_surface_error_on_conversion() -> Result<()> {
        let parsed = ParsedRequest::parse("curl https://a.io/ -X 'GE T'")?;
        assert_eq!(parsed.method(), "GE T");
        let err = parsed.to_request().unwrap_err();
        assert!(matches!(err, Error::ParseMethod { .. }));
        Ok(())
    }

    #[test]
    fn extraction_should_be_repeatable() -> Result<()> {
        let grammar = Grammar::default();
        let parsed = ParsedRequest::parse("curl https://a.io/ -H 'A: 1' --data x -X PUT")?;
        let tokens = parsed.tokens();
        assert_eq!(&parse_uri(tokens)?, parsed.uri());
        assert_eq!(parse_method(tokens, &grammar), parsed.method());
        assert_eq!(&parse_headers(tokens, &grammar), parsed.headers());
        assert_eq!(parse_body(tokens, &grammar), parsed.body());
        assert_eq!(parse_headers(tokens, &grammar), parse_headers(tokens, &grammar));
        Ok(())
    }

    #[test]
    fn load_should_render_template() -> Result<()> {
        let input = r#"curl \
          -X PATCH \
          --data '{"visibility":"private"}' \
          -H "Accept: application/vnd.github+json" \
          -H "Authorization: Bearer {{ token }}" \
          https://api.github.com/user/email/visibility "#;
        let parsed = ParsedRequest::load(input, json!({ "token": "abcd1234" }))?;
        assert_eq!(parsed.method(), "PATCH");
        assert_eq!(
            parsed.uri().to_string(),
            "https://api.github.com/user/email/visibility"
        );
        assert_eq!(parsed.header_line("authorization"), "Bearer abcd1234");
        assert_eq!(parsed.body(), r#"{"visibility":"private"}"#);
        assert!(parsed.as_str().contains("Bearer abcd1234"));
        Ok(())
    }

    #[test]
    fn load_should_surface_render_error() {
        let err = ParsedRequest::load("curl https://a.io/{{ ", json!({})).unwrap_err();
        assert!(matches!(err, Error::Render { .. }));
    }
}
