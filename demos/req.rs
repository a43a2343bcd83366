use anyhow::Result;
use curl_request::ParsedRequest;
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let input = r#"curl \
    -X PATCH \
    --data '{"visibility":"private"}' \
    -H "Accept: application/vnd.github+json" \
    -H "Authorization: Bearer {{ token }}" \
    -H "X-GitHub-Api-Version: 2022-11-28" \
    https://api.github.com/user/email/visibility "#;
    let context = json!({ "token": "abcd1234" });
    let parsed = ParsedRequest::load(input, Some(context))?;
    println!("{parsed:#?}");
    println!("{}", serde_json::to_string_pretty(parsed.headers())?);

    let request = parsed.with_header("X-GitHub-Api-Version", "2024-01-01").to_request()?;
    println!("{request:#?}");
    Ok(())
}
