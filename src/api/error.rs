use http::StatusCode;
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    /// Network, TLS, DNS or timeout failure while talking to the portal.
    ConnectionError(String),
    /// The portal answered with a status that must not be read as data.
    ProtocolError(StatusCode, String),
    /// Response markup lacks the expected structure.
    ParseError(String),
    InternalError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ConnectionError(s) => write!(f, "connection to portal failed: {}", s),
            Error::ProtocolError(status, s) => {
                write!(f, "portal responded {}: {}", status, s)
            }
            Error::ParseError(s) => write!(f, "unexpected portal response: {}", s),
            Error::InternalError(s) => write!(f, "internal error: {}", s),
        }
    }
}

impl std::error::Error for Error {}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => Error::ProtocolError(status, error.to_string()),
            None if error.is_builder() => Error::InternalError(error.to_string()),
            None => Error::ConnectionError(error.to_string()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::Error;
    use http::StatusCode;

    #[test]
    fn display() {
        assert_eq!(
            "portal responded 503 Service Unavailable: maintenance",
            Error::ProtocolError(StatusCode::SERVICE_UNAVAILABLE, String::from("maintenance"))
                .to_string()
        );
        assert_eq!(
            "unexpected portal response: no <hatsuden> element",
            Error::ParseError(String::from("no <hatsuden> element")).to_string()
        );
    }
}
