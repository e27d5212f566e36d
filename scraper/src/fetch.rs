use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, USER_AGENT};
use tracing::debug;
use url::Url;

use crate::error::FetchError;

// Mimic a real browser, the listing page refuses obvious bots.
const BROWSER_ACCEPT_LANGUAGE: &str = "pt-BR,pt;q=0.9,en-US;q=0.8,en;q=0.7";
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 6.3; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/109.0.0.0 Safari/537.36 OPR/95.0.0.0";

/// Anything that can hand back the HTML of one listing page.
pub trait PageSource {
    fn fetch_page(&self, query: &str) -> Result<String, FetchError>;
}

/// Fetches listing pages over HTTP, one blocking GET per page.
pub struct HttpPageSource {
    client: Client,
    endpoint: Url,
}

impl HttpPageSource {
    pub fn new(endpoint: Url) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(BROWSER_ACCEPT_LANGUAGE));
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));

        let client = Client::builder().default_headers(headers).build()?;
        Ok(Self { client, endpoint })
    }

    pub fn page_url(&self, query: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.set_query((!query.is_empty()).then_some(query));
        url
    }
}

impl PageSource for HttpPageSource {
    fn fetch_page(&self, query: &str) -> Result<String, FetchError> {
        let url = self.page_url(query);
        debug!(%url, "fetching listing page");

        let response = self.client.get(url.clone()).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                url: url.to_string(),
            });
        }

        let body = response.text()?;
        debug!(bytes = body.len(), "fetched listing page");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use axum::{
        http::{HeaderMap, StatusCode, Uri},
        routing::get,
        Router,
    };

    use super::*;

    fn source() -> HttpPageSource {
        HttpPageSource::new(Url::parse("https://remote.com/jobs/all").unwrap()).unwrap()
    }

    /// Echoes the browser headers and query back as the page body.
    async fn echo(headers: HeaderMap, uri: Uri) -> String {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string()
        };
        format!(
            "{}\n{}\n{}",
            header("user-agent"),
            header("accept-language"),
            uri.query().unwrap_or_default()
        )
    }

    async fn down() -> (StatusCode, &'static str) {
        (StatusCode::SERVICE_UNAVAILABLE, "maintenance")
    }

    /// Serves a tiny listing site on its own runtime so the blocking client
    /// never runs inside an async context.
    fn spawn_site() -> Url {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.set_nonblocking(true).unwrap();
        let addr = listener.local_addr().unwrap();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).unwrap();
                let site = Router::new()
                    .route("/jobs/all", get(echo))
                    .route("/down", get(down));
                axum::serve(listener, site).await.unwrap();
            });
        });

        Url::parse(&format!("http://{addr}/")).unwrap()
    }

    #[test]
    fn test_page_url_appends_query() {
        assert_eq!(
            source().page_url("query=rust&page=2").as_str(),
            "https://remote.com/jobs/all?query=rust&page=2"
        );
    }

    #[test]
    fn test_empty_query_leaves_no_question_mark() {
        assert_eq!(source().page_url("").as_str(), "https://remote.com/jobs/all");
    }

    #[test]
    fn test_fetch_sends_browser_headers_and_query() {
        let site = spawn_site();
        let source = HttpPageSource::new(site.join("jobs/all").unwrap()).unwrap();

        let body = source.fetch_page("query=rust&page=2").unwrap();
        let lines: Vec<&str> = body.lines().collect();

        assert_eq!(lines, vec![BROWSER_USER_AGENT, BROWSER_ACCEPT_LANGUAGE, "query=rust&page=2"]);
    }

    #[test]
    fn test_non_success_status_is_an_error() {
        let site = spawn_site();
        let endpoint = site.join("down").unwrap();
        let source = HttpPageSource::new(endpoint.clone()).unwrap();

        match source.fetch_page("") {
            Err(FetchError::Status { status, url }) => {
                assert_eq!(status.as_u16(), 503);
                assert_eq!(url, endpoint.to_string());
            }
            other => panic!("expected a status error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_route_is_an_error() {
        let site = spawn_site();
        let source = HttpPageSource::new(site.join("nowhere").unwrap()).unwrap();

        match source.fetch_page("page=3") {
            Err(FetchError::Status { status, .. }) => assert_eq!(status.as_u16(), 404),
            other => panic!("expected a status error, got {other:?}"),
        }
    }

    #[test]
    fn test_refused_connection_is_a_transport_error() {
        // Bind then drop to get a port nobody listens on.
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let source =
            HttpPageSource::new(Url::parse(&format!("http://{addr}/jobs/all")).unwrap()).unwrap();

        assert!(matches!(source.fetch_page(""), Err(FetchError::Transport(_))));
    }
}
