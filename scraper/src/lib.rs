//! remote.com job scraper
//!
//! Fetches listing pages, extracts job cards and normalizes their salaries
//! into a comparable hourly rate.

pub mod config;
pub mod error;
pub mod export;
pub mod fetch;
pub mod paginate;
pub mod parse;
pub mod query;
pub mod salary;

pub use config::ScraperConfig;
pub use error::{ConfigError, ExportError, FetchError, ListingError, NotationError, ScrapeError};
pub use fetch::{HttpPageSource, PageSource};
pub use paginate::{Paginator, ScrapeReport, StopReason};
pub use parse::ListingParser;

use common::{JobRecord, QueryFilter};

/// Scrapes up to `pages` pages (clamped to 1..=50) for `filter`.
pub fn scrape_jobs(
    config: &ScraperConfig,
    filter: &QueryFilter,
    pages: i64,
) -> Result<ScrapeReport, ScrapeError> {
    scrape_jobs_into(config, Vec::new(), filter, pages)
}

/// Like [`scrape_jobs`], but new records are appended after `buffer`.
pub fn scrape_jobs_into(
    config: &ScraperConfig,
    buffer: Vec<JobRecord>,
    filter: &QueryFilter,
    pages: i64,
) -> Result<ScrapeReport, ScrapeError> {
    let source = HttpPageSource::new(config.listing_url.clone()).map_err(ScrapeError::Client)?;
    let paginator = Paginator::new(source, ListingParser::new(config.origin.clone()));
    Ok(paginator.scrape_into(buffer, filter, pages))
}
