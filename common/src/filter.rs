//! Search filters accepted by the remote.com listing endpoint.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} value {value:?}")]
pub struct ParseFilterError {
    pub kind: &'static str,
    pub value: String,
}

/// Declares a filter enum whose variants serialize to the endpoint's parameter values.
macro_rules! param_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $param:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $param)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub fn as_param(self) -> &'static str {
                match self {
                    $(Self::$variant => $param,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = ParseFilterError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_param().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| ParseFilterError {
                        kind: stringify!($name),
                        value: s.to_string(),
                    })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_param())
            }
        }
    };
}

param_enum! {
    EmploymentType {
        FullTime => "full_time",
        PartTime => "part_time",
        Contract => "contract",
    }
}

param_enum! {
    WorkplaceLocation {
        Remote => "remote",
        Hybrid => "hybrid",
        OnSite => "on_site",
    }
}

param_enum! {
    /// Minimum seniority level.
    Seniority {
        EntryLevel => "entry_level",
        MidLevel => "mid_level",
        Senior => "senior",
        Manager => "manager",
        Director => "director",
        Executive => "executive",
    }
}

param_enum! {
    TravelFrequency {
        Never => "never",
        Sometimes => "sometimes",
        Often => "often",
    }
}

param_enum! {
    Currency {
        Usd => "USD",
        Cad => "CAD",
        Eur => "EUR",
        Gbp => "GBP",
        Aud => "AUD",
    }
}

/// Optional criteria for one scrape. Unset or empty fields are left out of the query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryFilter {
    pub query: Option<String>,
    pub employment_types: Vec<EmploymentType>,
    pub workplace_locations: Vec<WorkplaceLocation>,
    pub seniority: Option<Seniority>,
    pub travel_frequency: Option<TravelFrequency>,
    /// Minimum pay in major currency units.
    pub min_compensation: Option<i64>,
    pub currency: Option<Currency>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_params_case_insensitively() {
        assert_eq!("full_time".parse::<EmploymentType>(), Ok(EmploymentType::FullTime));
        assert_eq!(" ON_SITE ".parse::<WorkplaceLocation>(), Ok(WorkplaceLocation::OnSite));
        assert_eq!("eur".parse::<Currency>(), Ok(Currency::Eur));
        assert_eq!(Seniority::MidLevel.to_string(), "mid_level");
    }

    #[test]
    fn test_rejects_unknown_values() {
        let err = "weekly".parse::<TravelFrequency>().unwrap_err();
        assert_eq!(err.kind, "TravelFrequency");
        assert_eq!(err.to_string(), "unknown TravelFrequency value \"weekly\"");
    }

    #[test]
    fn test_filter_deserializes_from_sparse_json() {
        let filter: QueryFilter = serde_json::from_str(
            r#"{"query": "rust", "employment_types": ["full_time", "contract"], "currency": "USD"}"#,
        )
        .unwrap();

        assert_eq!(filter.query.as_deref(), Some("rust"));
        assert_eq!(
            filter.employment_types,
            vec![EmploymentType::FullTime, EmploymentType::Contract]
        );
        assert!(filter.workplace_locations.is_empty());
        assert_eq!(filter.currency, Some(Currency::Usd));
        assert_eq!(filter.min_compensation, None);
    }
}
