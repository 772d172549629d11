//! Failure kinds for config loading and ephemeris queries.
//!
//! Every variant is terminal: the binary reports the chain and exits
//! non-zero. Nothing here is retried or recovered.

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not read config file {path}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed YAML, a missing required key, or a value of the wrong type.
    /// serde's message names the offending field.
    #[error("could not parse config")]
    ParseConfig(#[from] serde_yaml::Error),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: String,
    },

    #[error("unknown timezone {0:?}")]
    UnknownTimezone(String),

    /// The site timezone has no valid 12:00:00 on the observation date.
    #[error("local noon on {date} is not a valid wall-clock time in {timezone}")]
    InvalidNoon { date: NaiveDate, timezone: Tz },

    #[error("ephemeris query failed: {0}")]
    Ephemeris(String),

    /// The sun never makes the requested crossing after the anchor, e.g.
    /// astronomical twilight at high latitudes in midsummer.
    #[error("no {event} occurs after {anchor} at this site")]
    EventUndefined {
        event: &'static str,
        anchor: DateTime<Utc>,
    },

    #[error("could not write report")]
    WriteReport(#[from] std::io::Error),
}
