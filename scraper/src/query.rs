//! Turns a [`QueryFilter`] into the listing endpoint's query string.

use common::QueryFilter;
use url::form_urlencoded;

/// Hard cap on pages per scrape.
pub const MAX_PAGES: u32 = 50;

/// Compensation is sent in minor units (cents).
const COMPENSATION_SCALE: i64 = 100;

pub fn clamp_page_budget(requested: i64) -> u32 {
    requested.clamp(1, i64::from(MAX_PAGES)) as u32
}

/// Key/value pairs for `page`, in the order the site itself emits them.
///
/// List filters become one pair per element. Page 1 carries no `page` key.
pub fn query_pairs(filter: &QueryFilter, page: u32) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();

    if let Some(currency) = filter.currency {
        pairs.push(("compensationCurrency", currency.as_param().to_string()));
    }
    if let Some(query) = filter.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        pairs.push(("query", query.to_string()));
    }
    for employment in &filter.employment_types {
        pairs.push(("employmentType", employment.as_param().to_string()));
    }
    for location in &filter.workplace_locations {
        pairs.push(("workplaceLocation", location.as_param().to_string()));
    }
    if let Some(seniority) = filter.seniority {
        pairs.push(("seniority", seniority.as_param().to_string()));
    }
    if let Some(travel) = filter.travel_frequency {
        pairs.push(("travelFrequency", travel.as_param().to_string()));
    }
    if let Some(cents) = filter
        .min_compensation
        .filter(|pay| *pay > 0)
        .and_then(|pay| pay.checked_mul(COMPENSATION_SCALE))
    {
        pairs.push(("compensation", cents.to_string()));
    }
    if page > 1 {
        pairs.push(("page", page.to_string()));
    }

    pairs
}

pub fn build_query(filter: &QueryFilter, page: u32) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(query_pairs(filter, page))
        .finish()
}
