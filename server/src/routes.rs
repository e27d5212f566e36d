use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use common::{JobRecord, QueryFilter, columns};
use job_scraper::{ScraperConfig, StopReason, export, scrape_jobs};
use serde::{Deserialize, Serialize};

/// Shared application state
pub struct AppState {
    pub scraper: ScraperConfig,
}

/// Grid column definition; money columns get a currency formatter client-side.
#[derive(Debug, Serialize)]
pub struct ColumnDef {
    field: &'static str,
    currency: bool,
    color_scale: bool,
}

fn column_defs() -> Vec<ColumnDef> {
    columns::ALL
        .iter()
        .map(|&field| ColumnDef {
            field,
            currency: columns::is_currency(field),
            color_scale: field == columns::COLOR_SCALE_COLUMN,
        })
        .collect()
}

/// Body of POST /scrape: the filters plus how many pages to scan.
#[derive(Debug, Deserialize)]
struct ScrapeRequest {
    #[serde(flatten)]
    filter: QueryFilter,
    pages: Option<i64>,
}

#[derive(Debug, Serialize)]
struct ScrapeResponse {
    total_results: usize,
    pages_visited: u32,
    failed_pages: Vec<u32>,
    malformed: usize,
    stop_reason: StopReason,
    columns: Vec<ColumnDef>,
    rows: Vec<JobRecord>,
}

/// Any handler failure, reported as a 500 with a JSON body.
pub struct AppError(anyhow::Error);

impl<E: Into<anyhow::Error>> From<E> for AppError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("request failed: {:#}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": format!("{:#}", self.0) })),
        )
            .into_response()
    }
}

/// Handler for GET / (root)
async fn root_handler() -> &'static str {
    "🔍 Job Scraper API\n\nEndpoints:\n  GET  /columns - Grid column definitions\n  POST /scrape  - Scrape remote.com, body: filters + pages\n  POST /export  - Styled xlsx sheet of the posted rows\n  POST /export.csv - CSV sheet of the posted rows\n\nExample:\n  curl -X POST http://127.0.0.1:3000/scrape -H 'content-type: application/json' \\\n    -d '{\"query\": \"rust\", \"employment_types\": [\"full_time\"], \"pages\": 2}'"
}

/// Handler for GET /columns
async fn columns_handler() -> Json<Vec<ColumnDef>> {
    Json(column_defs())
}

/// Handler for POST /scrape
///
/// Each call starts from an empty buffer and runs the whole blocking scrape
/// on the blocking pool.
async fn scrape_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ScrapeRequest>,
) -> Result<Json<ScrapeResponse>, AppError> {
    let config = state.scraper.clone();
    let pages = request.pages.unwrap_or(1);
    let filter = request.filter;

    let report = tokio::task::spawn_blocking(move || scrape_jobs(&config, &filter, pages)).await??;

    Ok(Json(ScrapeResponse {
        total_results: report.records.len(),
        pages_visited: report.pages_visited,
        failed_pages: report.failed_pages,
        malformed: report.malformed,
        stop_reason: report.stop,
        columns: column_defs(),
        rows: report.records,
    }))
}

const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Handler for POST /export
async fn export_handler(Json(rows): Json<Vec<JobRecord>>) -> Result<Response, AppError> {
    let sheet = export::to_xlsx(&rows)?;
    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"scraped.xlsx\""),
        ],
        sheet,
    )
        .into_response())
}

/// Handler for POST /export.csv
async fn export_csv_handler(Json(rows): Json<Vec<JobRecord>>) -> Result<Response, AppError> {
    let sheet = export::to_csv(&rows)?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"scraped.csv\""),
        ],
        sheet,
    )
        .into_response())
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/columns", get(columns_handler))
        .route("/scrape", post(scrape_handler))
        .route("/export", post(export_handler))
        .route("/export.csv", post(export_csv_handler))
        .with_state(state)
}
