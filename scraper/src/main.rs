//! remote.com Job Scraper
//!
//! Scrapes job listings matching the given filters from remote.com
//! and saves them to data/jobs.json (and optionally CSV or xlsx sheets).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use common::{Currency, EmploymentType, QueryFilter, Seniority, TravelFrequency, WorkplaceLocation};
use job_scraper::{export, scrape_jobs, ScraperConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "job-scraper", about = "Scrape remote.com job listings and normalise salaries")]
struct Args {
    /// Free-text role search
    #[arg(short, long)]
    query: Option<String>,

    /// full_time, part_time or contract (repeatable)
    #[arg(long = "employment-type", value_name = "TYPE")]
    employment_types: Vec<EmploymentType>,

    /// remote, hybrid or on_site (repeatable)
    #[arg(long = "workplace", value_name = "LOCATION")]
    workplace_locations: Vec<WorkplaceLocation>,

    /// Minimum seniority, e.g. mid_level
    #[arg(long)]
    seniority: Option<Seniority>,

    /// never, sometimes or often
    #[arg(long)]
    travel: Option<TravelFrequency>,

    /// Minimum pay in whole currency units
    #[arg(long, allow_negative_numbers = true)]
    min_pay: Option<i64>,

    #[arg(long, default_value = "USD")]
    currency: Currency,

    /// Pages to scan, clamped to 1..=50
    #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
    pages: i64,

    #[arg(short, long, default_value = "data/jobs.json")]
    output: PathBuf,

    /// Also write a CSV sheet here
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Also write a styled xlsx sheet here
    #[arg(long)]
    xlsx: Option<PathBuf>,
}

impl Args {
    fn filter(&self) -> QueryFilter {
        QueryFilter {
            query: self.query.clone(),
            employment_types: self.employment_types.clone(),
            workplace_locations: self.workplace_locations.clone(),
            seniority: self.seniority,
            travel_frequency: self.travel,
            min_compensation: self.min_pay,
            currency: Some(self.currency),
        }
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        if !dir.exists() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory {}", dir.display()))?;
            info!("📁 Created {:?}", dir);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let config = ScraperConfig::from_env().context("Invalid scraper configuration")?;

    info!("🔍 Starting remote.com Job Scraper ({})", config.listing_url);

    let report = scrape_jobs(&config, &args.filter(), args.pages)?;
    info!(
        "📊 Total jobs found: {} across {} page(s), {} malformed",
        report.records.len(),
        report.pages_visited,
        report.malformed
    );

    ensure_parent(&args.output)?;
    let json_output =
        serde_json::to_string_pretty(&report.records).context("Failed to serialize jobs to JSON")?;
    fs::write(&args.output, &json_output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    info!("💾 Saved {} jobs to {:?}", report.records.len(), args.output);

    if let Some(path) = &args.csv {
        ensure_parent(path)?;
        let file = fs::File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        export::write_csv(&report.records, file)?;
        info!("💾 Wrote CSV sheet to {:?}", path);
    }

    if let Some(path) = &args.xlsx {
        ensure_parent(path)?;
        export::write_xlsx(&report.records, path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("💾 Wrote xlsx sheet to {:?}", path);
    }

    info!("✨ Scraping complete!");
    Ok(())
}
