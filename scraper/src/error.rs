use thiserror::Error;

/// A listing page could not be downloaded.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{url} answered with HTTP {status}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
}

/// A listing card was found but could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListingError {
    #[error("listing has no reference link")]
    MissingLink,
    #[error("reference link {href:?} cannot be resolved: {reason}")]
    BadLink { href: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0:?} is not a salary notation")]
pub struct NotationError(pub String);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is not a valid URL: {source}")]
    InvalidUrl {
        var: &'static str,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write xlsx: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        Self::Csv(err.into())
    }
}

/// Failures that stop a scrape before the first page is requested.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}
