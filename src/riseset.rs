//! Horizon-crossing queries for the sun.
//!
//! All solar geometry is delegated to the NREL SPA implementation in the
//! `solar-positioning` crate; this module only turns its per-UTC-date results
//! into "next event after an anchor" answers in chrono types. No rise/set
//! astronomy is computed locally.

use chrono::{DateTime, Datelike, Duration, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use solar_positioning::{spa, Horizon, SunriseResult};

use crate::config::SiteConfig;
use crate::error::Error;

/// ΔT (TT − UT1) in seconds, the SPA's only time-scale input.
///
/// Good to a few seconds for the 2015–2035 era; rise/set times move by well
/// under a minute across that whole range.
const DELTA_T_SECONDS: f64 = 69.0;

/// A geodetic observing site with its resolved timezone.
#[derive(Debug, Clone)]
pub struct Observer {
    pub name: String,
    /// Degrees, north positive.
    pub latitude: f64,
    /// Degrees, east positive.
    pub longitude: f64,
    /// Meters above the reference ellipsoid.
    pub elevation: f64,
    pub timezone: Tz,
}

impl Observer {
    /// Build an observer from a validated site config.
    pub fn from_site(site: &SiteConfig) -> Result<Observer, Error> {
        Ok(Observer {
            name: site.name.clone(),
            latitude: site.latitude,
            longitude: site.longitude,
            elevation: site.elevation,
            timezone: site.timezone()?,
        })
    }
}

/// Which side of a horizon crossing to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossing {
    /// The sun descends through the horizon (the sunset side).
    Descending,
    /// The sun ascends through the horizon (the sunrise side).
    Ascending,
}

/// Find the first `crossing` of `horizon` strictly after `anchor`.
///
/// The SPA reports crossings per UTC calendar date, so the anchor's date and
/// the following date together cover every instant after the anchor; the
/// earliest candidate wins. Dates where the sun stays on one side of the
/// horizon (polar day or night) contribute no candidate, and if none remain
/// the event is undefined for this site and date.
pub fn next_crossing(
    observer: &Observer,
    anchor: DateTime<Utc>,
    horizon: Horizon,
    crossing: Crossing,
    event: &'static str,
) -> Result<DateTime<Utc>, Error> {
    let mut next: Option<DateTime<Utc>> = None;
    for offset in 0..=1 {
        let date = anchor.date_naive() + Duration::days(offset);
        let result = spa::sunrise_sunset_utc_for_horizon(
            date.year(),
            date.month(),
            date.day(),
            observer.latitude,
            observer.longitude,
            DELTA_T_SECONDS,
            horizon,
        )
        .map_err(|e| Error::Ephemeris(e.to_string()))?;

        let hours = match result {
            SunriseResult::RegularDay {
                sunrise, sunset, ..
            } => match crossing {
                Crossing::Descending => sunset.hours(),
                Crossing::Ascending => sunrise.hours(),
            },
            SunriseResult::AllDay { .. } | SunriseResult::AllNight { .. } => {
                tracing::trace!("{event}: no crossing on {date} (sun stays on one side)");
                continue;
            }
        };

        // Hours are measured from UTC midnight of the queried date and may
        // fall outside [0, 24) when the crossing lands on a neighboring day.
        let midnight = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
        let t = midnight + Duration::seconds((hours * 3600.0).round() as i64);
        tracing::trace!("{event} candidate for {date}: {t}");
        if t > anchor && next.map_or(true, |n| t < n) {
            next = Some(t);
        }
    }
    next.ok_or(Error::EventUndefined { event, anchor })
}
