//! Blocking JSON fetch over HTTP. The repository is static files on a CDN;
//! a non-2xx status or a parse failure is a load failure, no retries.

use serde::de::DeserializeOwned;
use url::Url;

/// Error during fetch
#[derive(Debug)]
pub struct FetchError {
    pub message: String,
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Parse a base URL, defaulting the scheme to https and guaranteeing a
/// trailing slash so relative joins append instead of replacing.
pub fn parse_base(base: &str) -> Result<Url, FetchError> {
    let mut normalized = if !base.starts_with("http://") && !base.starts_with("https://") {
        format!("https://{}", base)
    } else {
        base.to_string()
    };
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    Url::parse(&normalized).map_err(|e| FetchError {
        message: format!("Invalid base URL: {}", e),
    })
}

/// Fetch a URL and deserialize its body as JSON (blocking).
pub fn fetch_json<T: DeserializeOwned>(url: &Url) -> Result<T, FetchError> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("statscope/", env!("CARGO_PKG_VERSION")))
        .timeout(std::time::Duration::from_secs(15))
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| FetchError {
            message: format!("Client error: {}", e),
        })?;

    let response = client
        .get(url.as_str())
        .header("Accept", "application/json")
        .send()
        .map_err(|e| FetchError {
            message: format!("Request failed: {}", e),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError {
            message: format!("HTTP {}: could not load {}", status.as_u16(), url),
        });
    }

    let body = response.text().map_err(|e| FetchError {
        message: format!("Failed to read body: {}", e),
    })?;

    serde_json::from_str(&body).map_err(|e| FetchError {
        message: format!("Invalid JSON from {}: {}", url, e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_gets_scheme_and_trailing_slash() {
        assert_eq!(
            parse_base("stats.example.org").unwrap().as_str(),
            "https://stats.example.org/"
        );
        assert_eq!(
            parse_base("http://localhost:8000/site").unwrap().as_str(),
            "http://localhost:8000/site/"
        );
    }

    #[test]
    fn relative_joins_append_to_base() {
        let base = parse_base("https://example.org/site").unwrap();
        assert_eq!(
            base.join("data/catalog.json").unwrap().as_str(),
            "https://example.org/site/data/catalog.json"
        );
    }
}
