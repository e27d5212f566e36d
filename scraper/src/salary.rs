//! Salary notation decoding and conversion to an hourly figure.

use std::sync::LazyLock;

use common::{ContractType, PayCadence};
use regex::Regex;

use crate::error::NotationError;

pub const WEEKS_PER_MONTH: f64 = 4.0;
pub const WEEKS_PER_YEAR: f64 = 52.0;

// An optional leading currency symbol, then either comma-grouped thousands or
// a plain decimal, then an optional k/m suffix.
static NOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\p{Sc}?(?:(?P<grouped>\d{1,3}(?:,\d{3})+)|(?P<number>\d*\.\d+|\d+(?:\.\d+)?))(?P<suffix>[kKmM])?$")
        .expect("notation regex")
});

/// Decodes a compact salary token such as `45k`, `1.2m` or `90000`.
///
/// Fractions are truncated before the suffix multiplier is applied, so
/// `3.9k` is 3000 and `.5k` is 0. One leading currency symbol and
/// `,` thousands grouping are accepted; signs and any other separator
/// placement are rejected.
pub fn decode_notation(token: &str) -> Result<i64, NotationError> {
    let invalid = || NotationError(token.to_string());

    let caps = NOTATION.captures(token.trim()).ok_or_else(invalid)?;
    let number = match (caps.name("grouped"), caps.name("number")) {
        (Some(grouped), _) => grouped.as_str().replace(',', ""),
        (None, Some(number)) => number.as_str().to_string(),
        (None, None) => return Err(invalid()),
    };

    let multiplier = match caps.name("suffix").map(|m| m.as_str()) {
        Some("k" | "K") => 1_000,
        Some("m" | "M") => 1_000_000,
        _ => return number.parse::<i64>().map_err(|_| invalid()),
    };

    let whole = number.parse::<f64>().map_err(|_| invalid())?.trunc() as i64;
    whole.checked_mul(multiplier).ok_or_else(invalid)
}

/// Splits a range like `45k - 60k` and decodes the first and third tokens.
pub fn decode_range(text: &str) -> Result<(i64, i64), NotationError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    match tokens.as_slice() {
        [low, _, high, ..] => Ok((decode_notation(low)?, decode_notation(high)?)),
        _ => Err(NotationError(text.to_string())),
    }
}

/// Midpoint of the two bounds, rounded to cents.
pub fn average_salary(min: i64, max: i64) -> f64 {
    let mid = (min as f64 + max as f64) / 2.0;
    (mid * 100.0).round() / 100.0
}

/// Converts an average salary quoted per `cadence` into an hourly rate.
///
/// Hourly figures pass through untouched; monthly and yearly ones are
/// divided by the hours worked in that period and rounded half-to-even.
pub fn to_hourly_salary(contract: ContractType, cadence: PayCadence, average: f64) -> f64 {
    let weekly_hours = f64::from(contract.weekly_hours());
    match cadence {
        PayCadence::Hour => average,
        PayCadence::Month => (average / (WEEKS_PER_MONTH * weekly_hours)).round_ties_even(),
        PayCadence::Year => (average / (WEEKS_PER_YEAR * weekly_hours)).round_ties_even(),
    }
}

/// Hourly rate for a listing, or `None` unless bounds, contract and cadence are all known.
pub fn hourly_for(
    bounds: Option<(i64, i64)>,
    contract: Option<ContractType>,
    cadence: Option<PayCadence>,
) -> Option<f64> {
    let (min, max) = bounds?;
    Some(to_hourly_salary(contract?, cadence?, average_salary(min, max)))
}
