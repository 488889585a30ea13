use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use super::Error;

/// Headers of a desktop Chrome issuing XHRs from the portal page.
const BROWSER_HEADERS: &[(&str, &str)] = &[
    ("accept", "application/xml, text/xml, */*; q=0.01"),
    ("accept-language", "en-US,en;q=0.9,ja;q=0.8"),
    ("cache-control", "no-cache"),
    ("dnt", "1"),
    ("pragma", "no-cache"),
    (
        "sec-ch-ua",
        "\"Google Chrome\";v=\"89\", \"Chromium\";v=\"89\", \";Not A Brand\";v=\"99\"",
    ),
    ("sec-ch-ua-mobile", "?0"),
    ("sec-fetch-dest", "empty"),
    ("sec-fetch-mode", "cors"),
    ("sec-fetch-site", "same-origin"),
];

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/89.0.4389.114 Safari/537.36";

/// Strip path and query from `url`, leaving `scheme://host[:port]`.
fn origin(url: &str) -> &str {
    let host_start = url.find("://").map(|i| i + 3).unwrap_or(0);
    match url[host_start..].find('/') {
        Some(i) => &url[..host_start + i],
        None => url,
    }
}

/// Static header set attached to every request of a session. `origin` and `referer` follow
/// the configured portal URL.
pub fn browser_headers(base_url: &str) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::with_capacity(BROWSER_HEADERS.len() + 2);

    for (name, value) in BROWSER_HEADERS {
        headers.insert(
            HeaderName::from_static(*name),
            HeaderValue::from_static(*value),
        );
    }

    let invalid = |e: http::header::InvalidHeaderValue| {
        Error::InternalError(format!("Invalid portal URL `{}`: {}", base_url, e))
    };
    headers.insert(
        reqwest::header::ORIGIN,
        HeaderValue::from_str(origin(base_url)).map_err(invalid)?,
    );
    headers.insert(
        reqwest::header::REFERER,
        HeaderValue::from_str(base_url).map_err(invalid)?,
    );

    Ok(headers)
}
