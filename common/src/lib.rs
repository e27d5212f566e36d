//! Shared job listing model used by the scraper and the API server.

use serde::{Deserialize, Serialize};

mod filter;

pub use filter::{
    Currency, EmploymentType, ParseFilterError, QueryFilter, Seniority, TravelFrequency,
    WorkplaceLocation,
};

/// Company name used when a listing hides its employer.
pub const CONFIDENTIAL_COMPANY: &str = "CONFIDENTIAL COMPANY";

/// Column names, in grid order. They double as the serialized field names of [`JobRecord`].
pub mod columns {
    pub const COMPANY: &str = "Company Name";
    pub const FUNCTION: &str = "Function";
    pub const QUICK_APPLY: &str = "Is Quick Apply?";
    pub const CONTRACT: &str = "Contract";
    pub const MIN_SALARY: &str = "Minimal Salary";
    pub const MAX_SALARY: &str = "Maximum Salary";
    pub const AVERAGE_HOURLY: &str = "Average Hourly Salary";
    pub const PAY_RATE: &str = "Pay Rate";
    pub const REGIME: &str = "Regime";
    pub const LINK: &str = "Reference Link";

    pub const ALL: [&str; 10] = [
        COMPANY,
        FUNCTION,
        QUICK_APPLY,
        CONTRACT,
        MIN_SALARY,
        MAX_SALARY,
        AVERAGE_HOURLY,
        PAY_RATE,
        REGIME,
        LINK,
    ];

    /// Columns rendered as money in the grid and in exports.
    pub const CURRENCY_COLUMNS: [&str; 3] = [MIN_SALARY, MAX_SALARY, AVERAGE_HOURLY];

    /// Column that gets the red/yellow/green scale in spreadsheet exports.
    pub const COLOR_SCALE_COLUMN: &str = AVERAGE_HOURLY;

    pub fn is_currency(column: &str) -> bool {
        CURRENCY_COLUMNS.contains(&column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
}

impl ContractType {
    /// Matches the attribute label shown on a listing card.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Full-time" => Some(Self::FullTime),
            "Part-time" => Some(Self::PartTime),
            "Contract" => Some(Self::Contract),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::FullTime => "Full-time",
            Self::PartTime => "Part-time",
            Self::Contract => "Contract",
        }
    }

    /// Anything that is not full-time is counted as a half week.
    pub fn weekly_hours(self) -> u32 {
        match self {
            Self::FullTime => 40,
            Self::PartTime | Self::Contract => 20,
        }
    }
}

/// Time unit a salary is quoted per.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayCadence {
    Hour,
    Month,
    Year,
}

impl PayCadence {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Hour" => Some(Self::Hour),
            "Month" => Some(Self::Month),
            "Year" => Some(Self::Year),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Hour => "Hour",
            Self::Month => "Month",
            Self::Year => "Year",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkRegime {
    Remote,
    Hybrid,
    #[serde(rename = "On-site")]
    OnSite,
}

impl WorkRegime {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Remote" => Some(Self::Remote),
            "Hybrid" => Some(Self::Hybrid),
            "On-site" => Some(Self::OnSite),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Remote => "Remote",
            Self::Hybrid => "Hybrid",
            Self::OnSite => "On-site",
        }
    }
}

/// One scraped listing.
///
/// `average_hourly_salary` is only ever set when both salary bounds, the
/// contract type and the pay cadence are known.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct JobRecord {
    #[serde(rename = "Company Name")]
    pub company: String,
    #[serde(rename = "Function")]
    pub function: Option<String>,
    #[serde(rename = "Is Quick Apply?", default)]
    pub quick_apply: bool,
    #[serde(rename = "Contract")]
    pub contract: Option<ContractType>,
    #[serde(rename = "Minimal Salary")]
    pub min_salary: Option<i64>,
    #[serde(rename = "Maximum Salary")]
    pub max_salary: Option<i64>,
    #[serde(rename = "Average Hourly Salary")]
    pub average_hourly_salary: Option<f64>,
    #[serde(rename = "Pay Rate")]
    pub pay_rate: Option<PayCadence>,
    #[serde(rename = "Regime")]
    pub regime: Option<WorkRegime>,
    #[serde(rename = "Reference Link")]
    pub link: String,
}

impl JobRecord {
    /// A bare record for `link`, with every optional field unset.
    pub fn new(link: impl Into<String>) -> Self {
        Self {
            company: CONFIDENTIAL_COMPANY.to_string(),
            function: None,
            quick_apply: false,
            contract: None,
            min_salary: None,
            max_salary: None,
            average_hourly_salary: None,
            pay_rate: None,
            regime: None,
            link: link.into(),
        }
    }

    pub fn salary_range(&self) -> Option<(i64, i64)> {
        self.min_salary.zip(self.max_salary)
    }
}
