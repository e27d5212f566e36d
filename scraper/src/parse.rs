//! Extracts job records from a remote.com listing page.
//!
//! The site ships styled-component class names, so every selector below is
//! tied to the current markup. Fields that are missing from a card degrade to
//! `None`; only a missing reference link rejects the card.

use common::{ContractType, JobRecord, PayCadence, WorkRegime};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};
use url::Url;

use crate::error::ListingError;
use crate::salary::{decode_range, hourly_for};

const QUICK_APPLY: &str = "Quick apply";

const LISTING: &str = "article";
const COMPANY: &str = "span.sc-a6d70f3d-0.cWvlWe";
const FUNCTION: &str = "span.sc-a6d70f3d-0.fsvfbz";
const SALARY_RANGE: &str = "span.sc-a6d70f3d-0.ercMyp";
const PAY_RATE: &str = "span.sc-a6d70f3d-0.bqpWGD";
const LINK: &str = "a.sc-a093e03f-0.sc-a093e03f-1.krjhEa.gZaGuL.sc-31ccc88a-0.jZmZlq";
const ATTRIBUTES: &str = "ul.sc-226ef401-0.cIJpWb.sc-86bf8474-0.iMxrtA";
const ATTRIBUTES_FALLBACK: &str = "div.sc-226ef401-0.jKiWdu.sc-d573d29-0.hmYLJn";
const ATTRIBUTE_ITEM: &str = "li";

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("listing selectors are valid CSS")
}

/// Text content of an element, trimmed.
fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// `/year` -> `Year`: drop the leading symbol, upper-case the first letter, lower-case the rest.
fn pay_rate_label(raw: &str) -> String {
    let mut chars = raw.chars().skip(1);
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

pub struct ListingParser {
    origin: Url,
    listing: Selector,
    company: Selector,
    function: Selector,
    salary_range: Selector,
    pay_rate: Selector,
    link: Selector,
    attributes: Selector,
    attributes_fallback: Selector,
    attribute_item: Selector,
}

impl ListingParser {
    /// `origin` is what relative listing links are resolved against.
    pub fn new(origin: Url) -> Self {
        Self {
            origin,
            listing: selector(LISTING),
            company: selector(COMPANY),
            function: selector(FUNCTION),
            salary_range: selector(SALARY_RANGE),
            pay_rate: selector(PAY_RATE),
            link: selector(LINK),
            attributes: selector(ATTRIBUTES),
            attributes_fallback: selector(ATTRIBUTES_FALLBACK),
            attribute_item: selector(ATTRIBUTE_ITEM),
        }
    }

    /// One outcome per listing card, in page order.
    pub fn parse_page(&self, html: &str) -> Vec<Result<JobRecord, ListingError>> {
        let document = Html::parse_document(html);
        document
            .select(&self.listing)
            .map(|listing| self.parse_listing(listing))
            .collect()
    }

    fn parse_listing(&self, listing: ElementRef<'_>) -> Result<JobRecord, ListingError> {
        let href = listing
            .select(&self.link)
            .next()
            .and_then(|a| a.value().attr("href"))
            .ok_or(ListingError::MissingLink)?;
        let link = self
            .origin
            .join(href)
            .map_err(|err| ListingError::BadLink {
                href: href.to_string(),
                reason: err.to_string(),
            })?;

        let mut job = JobRecord::new(link.to_string());
        if let Some(company) = self.first_text(listing, &self.company) {
            job.company = company;
        }
        job.function = self.first_text(listing, &self.function);

        if let Some(range) = self.first_text(listing, &self.salary_range) {
            match decode_range(&range) {
                Ok((min, max)) => {
                    job.min_salary = Some(min);
                    job.max_salary = Some(max);
                }
                Err(err) => warn!(link = %job.link, %err, "ignoring unreadable salary range"),
            }
        }

        job.pay_rate = self
            .first_text(listing, &self.pay_rate)
            .and_then(|raw| PayCadence::from_label(&pay_rate_label(&raw)));

        for attribute in self.attributes(listing) {
            if attribute == QUICK_APPLY {
                job.quick_apply = true;
            }
            if let Some(regime) = WorkRegime::from_label(&attribute) {
                job.regime = Some(regime);
            }
            if let Some(contract) = ContractType::from_label(&attribute) {
                job.contract = Some(contract);
            }
        }

        job.average_hourly_salary = hourly_for(job.salary_range(), job.contract, job.pay_rate);

        debug!(company = %job.company, function = ?job.function, "📋 parsed listing");
        Ok(job)
    }

    fn first_text(&self, listing: ElementRef<'_>, selector: &Selector) -> Option<String> {
        listing
            .select(selector)
            .next()
            .map(text_of)
            .filter(|text| !text.is_empty())
    }

    /// Attribute labels from the tag list, or from the alternative layout's `li` items.
    fn attributes(&self, listing: ElementRef<'_>) -> Vec<String> {
        if let Some(list) = listing.select(&self.attributes).next() {
            return list.children().filter_map(ElementRef::wrap).map(text_of).collect();
        }
        match listing.select(&self.attributes_fallback).next() {
            Some(container) => container.select(&self.attribute_item).map(text_of).collect(),
            None => {
                debug!("listing has no attribute list");
                Vec::new()
            }
        }
    }
}
