//! The five-line night-window report.

use std::io::Write;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use solar_positioning::Horizon;

use crate::error::Error;
use crate::riseset::{next_crossing, Crossing, Observer};

/// The four solar events bounding one night, as absolute instants.
///
/// Each event is the next occurrence after local noon on the observation
/// date, so the morning pair usually lands on the following calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NightWindow {
    pub sunset: DateTime<Utc>,
    pub sunrise: DateTime<Utc>,
    /// Evening astronomical twilight: the sun descends through -18 degrees.
    pub dusk: DateTime<Utc>,
    /// Morning astronomical twilight: the sun ascends through -18 degrees.
    pub dawn: DateTime<Utc>,
}

impl NightWindow {
    /// Search forward from local noon on `date` for the next occurrence of
    /// each event. The four queries are independent; any one of them failing
    /// fails the whole window.
    pub fn compute(observer: &Observer, date: NaiveDate) -> Result<NightWindow, Error> {
        let anchor = local_noon(observer, date)?;
        tracing::debug!(
            "searching from {anchor} for {} ({}, {}, {} m)",
            observer.name,
            observer.latitude,
            observer.longitude,
            observer.elevation
        );
        Ok(NightWindow {
            sunset: next_crossing(
                observer,
                anchor,
                Horizon::SunriseSunset,
                Crossing::Descending,
                "sunset",
            )?,
            sunrise: next_crossing(
                observer,
                anchor,
                Horizon::SunriseSunset,
                Crossing::Ascending,
                "sunrise",
            )?,
            dusk: next_crossing(
                observer,
                anchor,
                Horizon::AstronomicalTwilight,
                Crossing::Descending,
                "evening astronomical twilight",
            )?,
            dawn: next_crossing(
                observer,
                anchor,
                Horizon::AstronomicalTwilight,
                Crossing::Ascending,
                "morning astronomical twilight",
            )?,
        })
    }

    /// Write the report: site identity, date, and the four events rendered
    /// as wall-clock `HH:MM` in the observer's timezone.
    pub fn render(
        &self,
        observer: &Observer,
        date_str: &str,
        out: &mut impl Write,
    ) -> Result<(), Error> {
        let tz = observer.timezone;
        let [sunset, sunrise, dusk, dawn] =
            [self.sunset, self.sunrise, self.dusk, self.dawn].map(|t| hhmm(t, tz));

        writeln!(
            out,
            "Site: {} ({:.4}, {:.4})  tz={}",
            observer.name,
            observer.latitude,
            observer.longitude,
            tz.name()
        )?;
        writeln!(out, "Date: {date_str}")?;
        writeln!(out, "Sunset: {sunset}  | Astronomical night starts: {dusk}")?;
        writeln!(out, "Astronomical night ends: {dawn}  | Sunrise: {sunrise}")?;
        writeln!(out, "Astronomical night: {dusk} → {dawn} ({})", tz.name())?;
        Ok(())
    }
}

/// Local noon on `date` in the observer's timezone, as a UTC instant.
///
/// Noon sits safely inside daylight, away from both the previous sunset and
/// the next sunrise, so the forward searches resolve within one civil day.
/// An ambiguous noon (DST fold) takes the earlier reading.
fn local_noon(observer: &Observer, date: NaiveDate) -> Result<DateTime<Utc>, Error> {
    let noon = date.and_time(NaiveTime::from_hms_opt(12, 0, 0).expect("12:00:00 is valid"));
    observer
        .timezone
        .from_local_datetime(&noon)
        .earliest()
        .map(|t| t.with_timezone(&Utc))
        .ok_or(Error::InvalidNoon {
            date,
            timezone: observer.timezone,
        })
}

/// Render an instant as zero-padded 24-hour wall-clock time in `tz`.
fn hhmm(t: DateTime<Utc>, tz: chrono_tz::Tz) -> String {
    let local = t.with_timezone(&tz);
    format!("{:02}:{:02}", local.hour(), local.minute())
}
