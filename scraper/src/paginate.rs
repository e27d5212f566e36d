//! Walks listing pages until one adds nothing or the page budget runs out.

use common::{JobRecord, QueryFilter};
use serde::Serialize;
use tracing::{info, warn};

use crate::fetch::PageSource;
use crate::parse::ListingParser;
use crate::query::{build_query, clamp_page_budget};

/// Why a scrape stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum StopReason {
    /// `page` added no records (empty, fully malformed, or failed to download).
    NoNewRecords { page: u32 },
    /// Every page in the budget added records.
    BudgetExhausted { pages: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Fetching { page: u32 },
    Done(StopReason),
}

/// What one page contributed.
#[derive(Debug, Default)]
pub struct PageOutcome {
    pub records: Vec<JobRecord>,
    pub malformed: usize,
    pub fetch_failed: bool,
}

/// Records gathered by one scrape, plus how the run went.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrapeReport {
    pub records: Vec<JobRecord>,
    pub pages_visited: u32,
    /// Pages whose download failed; they count as empty for the stop decision.
    pub failed_pages: Vec<u32>,
    pub malformed: usize,
    pub stop: StopReason,
}

pub struct Paginator<S> {
    source: S,
    parser: ListingParser,
}

impl<S: PageSource> Paginator<S> {
    pub fn new(source: S, parser: ListingParser) -> Self {
        Self { source, parser }
    }

    /// Downloads and parses a single page. Failures are logged, never raised.
    pub fn scrape_page(&self, filter: &QueryFilter, page: u32) -> PageOutcome {
        let query = build_query(filter, page);

        let html = match self.source.fetch_page(&query) {
            Ok(html) => html,
            Err(err) => {
                warn!(page, %err, "❌ failed to fetch listing page");
                return PageOutcome {
                    fetch_failed: true,
                    ..Default::default()
                };
            }
        };

        let mut outcome = PageOutcome::default();
        for listing in self.parser.parse_page(&html) {
            match listing {
                Ok(job) => outcome.records.push(job),
                Err(err) => {
                    warn!(page, %err, "skipping malformed listing");
                    outcome.malformed += 1;
                }
            }
        }
        outcome
    }

    pub fn scrape(&self, filter: &QueryFilter, page_budget: i64) -> ScrapeReport {
        self.scrape_into(Vec::new(), filter, page_budget)
    }

    /// Appends the records of every visited page to `buffer` and hands it back in the report.
    pub fn scrape_into(
        &self,
        mut buffer: Vec<JobRecord>,
        filter: &QueryFilter,
        page_budget: i64,
    ) -> ScrapeReport {
        let budget = clamp_page_budget(page_budget);
        let mut failed_pages = Vec::new();
        let mut malformed = 0;
        let mut pages_visited = 0;
        let mut state = State::Fetching { page: 1 };

        let stop = loop {
            let page = match state {
                State::Fetching { page } => page,
                State::Done(reason) => break reason,
            };

            let outcome = self.scrape_page(filter, page);
            pages_visited += 1;
            malformed += outcome.malformed;
            if outcome.fetch_failed {
                failed_pages.push(page);
            }

            let added = outcome.records.len();
            buffer.extend(outcome.records);
            info!(page, added, total = buffer.len(), "📡 scraped listing page");

            state = if added == 0 {
                State::Done(StopReason::NoNewRecords { page })
            } else if page >= budget {
                State::Done(StopReason::BudgetExhausted { pages: budget })
            } else {
                State::Fetching { page: page + 1 }
            };
        };

        info!(
            total = buffer.len(),
            pages_visited,
            malformed,
            ?stop,
            "✨ scrape finished"
        );

        ScrapeReport {
            records: buffer,
            pages_visited,
            failed_pages,
            malformed,
            stop,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::error::FetchError;
    use common::EmploymentType;
    use url::Url;

    const LINK_CLASS: &str = "sc-a093e03f-0 sc-a093e03f-1 krjhEa gZaGuL sc-31ccc88a-0 jZmZlq";

    fn page_with(slugs: &[&str]) -> String {
        slugs
            .iter()
            .map(|slug| {
                format!(r#"<article><a class="{LINK_CLASS}" href="/jobs/{slug}">{slug}</a></article>"#)
            })
            .collect()
    }

    /// Serves canned pages in call order and remembers every query it saw.
    struct StubSource {
        pages: Vec<Option<String>>,
        queries: RefCell<Vec<String>>,
    }

    impl StubSource {
        fn new(pages: Vec<Option<String>>) -> Self {
            Self {
                pages,
                queries: RefCell::new(Vec::new()),
            }
        }
    }

    impl PageSource for &StubSource {
        fn fetch_page(&self, query: &str) -> Result<String, FetchError> {
            let mut queries = self.queries.borrow_mut();
            let index = queries.len();
            queries.push(query.to_string());
            match self.pages.get(index) {
                Some(Some(html)) => Ok(html.clone()),
                _ => Err(FetchError::Status {
                    status: reqwest::StatusCode::BAD_GATEWAY,
                    url: format!("stub?{query}"),
                }),
            }
        }
    }

    fn paginator(source: &StubSource) -> Paginator<&StubSource> {
        Paginator::new(source, ListingParser::new(Url::parse("https://remote.com/").unwrap()))
    }

    #[test]
    fn test_stops_at_first_page_without_new_records() {
        let source = StubSource::new(vec![
            Some(page_with(&["a", "b"])),
            Some(page_with(&[])),
            Some(page_with(&["never-fetched"])),
        ]);

        let report = paginator(&source).scrape(&QueryFilter::default(), 50);

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.pages_visited, 2);
        assert_eq!(report.stop, StopReason::NoNewRecords { page: 2 });
        assert_eq!(source.queries.borrow().len(), 2);
    }

    #[test]
    fn test_page_one_has_no_page_parameter() {
        let source = StubSource::new(vec![
            Some(page_with(&["a"])),
            Some(page_with(&["b"])),
            Some(page_with(&["c"])),
        ]);
        let filter = QueryFilter {
            employment_types: vec![EmploymentType::PartTime],
            ..Default::default()
        };

        let report = paginator(&source).scrape(&filter, 3);

        assert_eq!(report.stop, StopReason::BudgetExhausted { pages: 3 });
        assert_eq!(
            *source.queries.borrow(),
            vec![
                "employmentType=part_time".to_string(),
                "employmentType=part_time&page=2".to_string(),
                "employmentType=part_time&page=3".to_string(),
            ]
        );
    }

    #[test]
    fn test_records_keep_scrape_order() {
        let source = StubSource::new(vec![Some(page_with(&["a", "b"])), Some(page_with(&["c"]))]);

        let report = paginator(&source).scrape(&QueryFilter::default(), 2);

        let links: Vec<&str> = report.records.iter().map(|job| job.link.as_str()).collect();
        assert_eq!(
            links,
            vec![
                "https://remote.com/jobs/a",
                "https://remote.com/jobs/b",
                "https://remote.com/jobs/c",
            ]
        );
    }

    #[test]
    fn test_failed_fetch_counts_as_empty_page() {
        let source = StubSource::new(vec![Some(page_with(&["a"])), None, Some(page_with(&["c"]))]);

        let report = paginator(&source).scrape(&QueryFilter::default(), 10);

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.failed_pages, vec![2]);
        assert_eq!(report.stop, StopReason::NoNewRecords { page: 2 });
    }

    #[test]
    fn test_failure_on_first_page_returns_what_was_buffered() {
        let source = StubSource::new(vec![None]);
        let existing = vec![JobRecord::new("https://remote.com/jobs/old")];

        let report = paginator(&source).scrape_into(existing.clone(), &QueryFilter::default(), 5);

        assert_eq!(report.records, existing);
        assert_eq!(report.pages_visited, 1);
        assert_eq!(report.stop, StopReason::NoNewRecords { page: 1 });
    }

    #[test]
    fn test_appends_to_existing_buffer() {
        let source = StubSource::new(vec![Some(page_with(&["new"]))]);
        let existing = vec![JobRecord::new("https://remote.com/jobs/old")];

        let report = paginator(&source).scrape_into(existing, &QueryFilter::default(), 1);

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.records[0].link, "https://remote.com/jobs/old");
        assert_eq!(report.records[1].link, "https://remote.com/jobs/new");
        assert_eq!(report.stop, StopReason::BudgetExhausted { pages: 1 });
    }

    #[test]
    fn test_malformed_only_page_stops_the_scrape() {
        let source = StubSource::new(vec![
            Some(page_with(&["a"])),
            Some("<article><span>no link</span></article>".to_string()),
        ]);

        let report = paginator(&source).scrape(&QueryFilter::default(), 5);

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.malformed, 1);
        assert_eq!(report.stop, StopReason::NoNewRecords { page: 2 });
    }

    #[test]
    fn test_budget_is_clamped() {
        let pages: Vec<Option<String>> = (0..60)
            .map(|i| Some(page_with(&[format!("job-{i}").as_str()])))
            .collect();
        let source = StubSource::new(pages);

        let report = paginator(&source).scrape(&QueryFilter::default(), 1000);
        assert_eq!(report.pages_visited, 50);
        assert_eq!(report.stop, StopReason::BudgetExhausted { pages: 50 });

        let source = StubSource::new(vec![Some(page_with(&["a"])), Some(page_with(&["b"]))]);
        let report = paginator(&source).scrape(&QueryFilter::default(), 0);
        assert_eq!(report.pages_visited, 1);
    }
}
