//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests of a run:
//! - Building the HTTP client with a fixed browser-like header set
//! - GET requests for result pages
//! - Classifying the response into success, bad status or transport error
//! - Decoding the body with the charset from the headers or the markup
//!
//! There are no retries; every page is requested at most once.

use crate::config::RequestConfig;
use encoding_rs::{Encoding, UTF_8};
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION, CONTENT_TYPE, DNT,
};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// User agent sent unless the configuration overrides it
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// How far into the body a `<meta>` charset declaration is looked for
const META_SNIFF_LIMIT: usize = 1024;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Server answered 200 OK and the body was read
    Success {
        /// Page body content
        body: String,
    },

    /// Server answered with any other status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (DNS, connection refused, timeout, body read)
    NetworkError {
        /// Error description
        error: String,
    },
}

/// Builds an HTTP client with proper configuration
///
/// Every request carries the same headers: user agent, `Accept-Language`,
/// `Accept`, `Connection: keep-alive` and `DNT: 1`. No cookie store is kept
/// and no proxy is configured.
///
/// # Example
///
/// ```no_run
/// use price_scout::config::RequestConfig;
/// use price_scout::crawler::build_http_client;
///
/// let client = build_http_client(&RequestConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &RequestConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(DNT, HeaderValue::from_static("1"));

    let user_agent = config.user_agent.as_deref().unwrap_or(BROWSER_USER_AGENT);

    Client::builder()
        .user_agent(user_agent)
        .default_headers(headers)
        .timeout(Duration::from_millis(config.timeout_ms))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches one result page
///
/// # Response Handling
///
/// | Condition | Result |
/// |-----------|--------|
/// | HTTP 200 | Success with body |
/// | Any other status | HttpError |
/// | Timeout, connect, DNS | NetworkError |
/// | Body read failure | NetworkError |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The page URL
pub async fn fetch_page(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            return FetchResult::NetworkError {
                error: describe_error(&e),
            }
        }
    };

    let status = response.status();
    if status != StatusCode::OK {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    match response.bytes().await {
        Ok(bytes) => FetchResult::Success {
            body: decode_body(&bytes, content_type.as_deref()),
        },
        Err(e) => FetchResult::NetworkError {
            error: describe_error(&e),
        },
    }
}

/// Decodes a page body to text
///
/// The charset is taken from a byte order mark, then the `Content-Type`
/// header, then a `<meta>` declaration near the start of the document,
/// falling back to UTF-8. Undecodable bytes become U+FFFD.
pub fn decode_body(bytes: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(|value| charset_label(&value.to_ascii_lowercase()))
        .or_else(|| sniff_meta_charset(bytes))
        .unwrap_or(UTF_8);

    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}

fn sniff_meta_charset(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(META_SNIFF_LIMIT)];
    let head = String::from_utf8_lossy(head).to_ascii_lowercase();

    head.match_indices("<meta").find_map(|(start, _)| {
        let tag = &head[start..];
        let tag = &tag[..tag.find('>').unwrap_or(tag.len())];
        charset_label(tag)
    })
}

/// Resolves the label after `charset=` in a header value or meta tag
fn charset_label(text: &str) -> Option<&'static Encoding> {
    let rest = &text[text.find("charset")? + "charset".len()..];
    let rest = rest.trim_start().strip_prefix('=')?.trim_start();
    let rest = rest.trim_start_matches(['"', '\'']);
    let end = rest
        .find(|c: char| matches!(c, '"' | '\'' | ';' | '/' | '>') || c.is_whitespace())
        .unwrap_or(rest.len());

    Encoding::for_label(rest[..end].as_bytes())
}

fn describe_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        format!("Request timeout: {}", error)
    } else if error.is_connect() {
        format!("Connection failed: {}", error)
    } else {
        error.to_string()
    }
}
