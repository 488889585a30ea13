use serde::Serialize;
use std::fmt;
use std::time::Duration;

pub type KWh = f64;

/// Identifier of a monitored installation (`searchid` on the portal). Passed through as-is.
pub type SiteId = str;

#[derive(Clone)]
pub struct Credentials {
    pub base_url: String,
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Point the client at a different portal entry point.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/* The password never ends up in logs, not even at `trace` */
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Connect and read budgets of a request.
///
/// The session's value sets the client-wide connect limit when the session is opened. Passed
/// per call to `get`/`post`, only `total()` applies, as the overall limit of that request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timeout {
    pub connect: Duration,
    pub read: Duration,
}

impl Timeout {
    /// Overall limit of one request, connect phase included.
    pub fn total(&self) -> Duration {
        self.connect + self.read
    }
}

impl Default for Timeout {
    fn default() -> Self {
        Timeout {
            connect: Duration::from_secs(6),
            read: Duration::from_millis(9050),
        }
    }
}

/// Authenticated portal conversation.
///
/// Owns the client, so the connection pool and cookie jar go away with the session on every
/// exit path. The `Drop` impl below only logs that.
#[derive(Debug)]
pub struct Session {
    pub base_url: String,
    pub timeout: Timeout,
    pub client: reqwest::Client,
}

impl Drop for Session {
    fn drop(&mut self) {
        log::debug!("releasing portal session for {}", self.base_url);
    }
}

/// Status and body of a portal response, before any interpretation.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: http::StatusCode,
    pub body: String,
}

/// Ordered `timestamp -> kWh` readings, chronological as reported by the portal.
///
/// `None` marks a sample the portal reported without a numeric value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeSeries(Vec<(String, Option<KWh>)>);

impl TimeSeries {
    pub fn new() -> Self {
        TimeSeries(Vec::new())
    }

    pub fn push(&mut self, timestamp: String, kwh: Option<KWh>) {
        self.0.push((timestamp, kwh));
    }

    /// Reading for `timestamp`; outer `None` if the key is absent, inner `None` if there is no value.
    pub fn get(&self, timestamp: &str) -> Option<Option<KWh>> {
        self.0
            .iter()
            .find(|(ts, _)| ts == timestamp)
            .map(|(_, kwh)| *kwh)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(ts, _)| ts.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<KWh>)> {
        self.0.iter().map(|(ts, kwh)| (ts.as_str(), *kwh))
    }

    /// Sum of all present readings.
    pub fn total(&self) -> KWh {
        self.0.iter().filter_map(|(_, kwh)| *kwh).sum()
    }
}

impl IntoIterator for TimeSeries {
    type Item = (String, Option<KWh>);
    type IntoIter = std::vec::IntoIter<(String, Option<KWh>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
