//! Site and date configuration, loaded from a YAML file.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::Deserialize;

use crate::error::Error;

/// One observing site, as authored in the config file.
///
/// The fields are plain data; range and timezone checks run in
/// [`Config::from_str`] so serde reports structural problems (missing keys,
/// wrong types) and the loader reports semantic ones.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    pub name: String,
    /// Degrees, north positive.
    pub latitude: f64,
    /// Degrees, east positive.
    pub longitude: f64,
    /// Meters; may be negative (below sea level).
    pub elevation: f64,
    /// IANA identifier, e.g. `Atlantic/Canary`.
    pub timezone: String,
}

impl SiteConfig {
    /// Resolve the configured timezone name against the embedded IANA
    /// database.
    pub fn timezone(&self) -> Result<Tz, Error> {
        self.timezone
            .parse()
            .map_err(|_| Error::UnknownTimezone(self.timezone.clone()))
    }

    fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidValue {
                field: "site.name",
                reason: "must not be empty".to_owned(),
            });
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(Error::InvalidValue {
                field: "site.latitude",
                reason: format!("{} is outside [-90, 90] degrees", self.latitude),
            });
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(Error::InvalidValue {
                field: "site.longitude",
                reason: format!("{} is outside [-180, 180] degrees", self.longitude),
            });
        }
        if !self.elevation.is_finite() {
            return Err(Error::InvalidValue {
                field: "site.elevation",
                reason: format!("{} is not a finite height in meters", self.elevation),
            });
        }
        self.timezone()?;
        Ok(())
    }
}

/// The full config file: one site, one observation date.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    /// `YYYY-MM-DD`, kept verbatim for display. A bare YAML scalar and a
    /// quoted string both load.
    pub observation_date: String,
}

impl Config {
    /// Read and validate the config at `path`.
    pub fn load(path: &Path) -> Result<Config, Error> {
        let text = fs::read_to_string(path).map_err(|source| Error::ReadConfig {
            path: path.to_owned(),
            source,
        })?;
        let config: Config = text.parse()?;
        tracing::debug!(
            "loaded site {:?} ({}, {}) for {}",
            config.site.name,
            config.site.latitude,
            config.site.longitude,
            config.observation_date
        );
        Ok(config)
    }

    /// The observation date as a calendar date.
    pub fn date(&self) -> Result<NaiveDate, Error> {
        self.observation_date
            .parse()
            .map_err(|_| Error::InvalidValue {
                field: "observation_date",
                reason: format!("{:?} is not a YYYY-MM-DD date", self.observation_date),
            })
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Config, Error> {
        let config: Config = serde_yaml::from_str(s)?;
        config.site.validate()?;
        config.date()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &str = "\
site:
  name: Roque de los Muchachos
  latitude: 28.7624
  longitude: -17.8892
  elevation: 2396
  timezone: Atlantic/Canary
observation_date: 2026-01-15
";

    #[test]
    fn loads_bare_date_scalar() {
        let config: Config = GOOD.parse().expect("config should load");
        assert_eq!(config.observation_date, "2026-01-15");
        let date = config.date().expect("date should parse");
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
    }

    #[test]
    fn loads_quoted_date_scalar() {
        let quoted = GOOD.replace("2026-01-15", "\"2026-01-15\"");
        let config: Config = quoted.parse().expect("config should load");
        assert_eq!(config.observation_date, "2026-01-15");
    }

    #[test]
    fn coerces_integer_elevation_to_float() {
        let config: Config = GOOD.parse().expect("config should load");
        assert_eq!(config.site.elevation, 2396.0);
    }

    #[test]
    fn resolves_timezone() {
        let config: Config = GOOD.parse().expect("config should load");
        assert_eq!(
            config.site.timezone().expect("timezone should resolve"),
            chrono_tz::Atlantic::Canary
        );
    }

    #[test]
    fn missing_timezone_key_is_a_parse_error() {
        let text = GOOD.replace("  timezone: Atlantic/Canary\n", "");
        let err = text.parse::<Config>().expect_err("load should fail");
        match err {
            // serde names the missing field in its message
            Error::ParseConfig(source) => assert!(source.to_string().contains("timezone")),
            other => panic!("expected ParseConfig, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_latitude_is_a_parse_error() {
        let text = GOOD.replace("latitude: 28.7624", "latitude: \"not a number\"");
        let err = text.parse::<Config>().expect_err("load should fail");
        assert!(matches!(err, Error::ParseConfig(_)));
    }

    #[test]
    fn out_of_range_latitude_is_rejected() {
        let text = GOOD.replace("latitude: 28.7624", "latitude: 95.0");
        let err = text.parse::<Config>().expect_err("load should fail");
        assert!(matches!(
            err,
            Error::InvalidValue {
                field: "site.latitude",
                ..
            }
        ));
    }

    #[test]
    fn out_of_range_longitude_is_rejected() {
        let text = GOOD.replace("longitude: -17.8892", "longitude: -200.0");
        let err = text.parse::<Config>().expect_err("load should fail");
        assert!(matches!(
            err,
            Error::InvalidValue {
                field: "site.longitude",
                ..
            }
        ));
    }

    #[test]
    fn non_finite_elevation_is_rejected() {
        let text = GOOD.replace("elevation: 2396", "elevation: .nan");
        let err = text.parse::<Config>().expect_err("load should fail");
        assert!(matches!(
            err,
            Error::InvalidValue {
                field: "site.elevation",
                ..
            }
        ));
    }

    #[test]
    fn empty_name_is_rejected() {
        let text = GOOD.replace("name: Roque de los Muchachos", "name: \"  \"");
        let err = text.parse::<Config>().expect_err("load should fail");
        assert!(matches!(
            err,
            Error::InvalidValue {
                field: "site.name",
                ..
            }
        ));
    }

    #[test]
    fn unknown_timezone_is_rejected() {
        let text = GOOD.replace("Atlantic/Canary", "Atlantic/Atlantis");
        let err = text.parse::<Config>().expect_err("load should fail");
        assert!(matches!(err, Error::UnknownTimezone(_)));
    }

    #[test]
    fn malformed_observation_date_is_rejected() {
        let text = GOOD.replace("observation_date: 2026-01-15", "observation_date: soon");
        let err = text.parse::<Config>().expect_err("load should fail");
        assert!(matches!(
            err,
            Error::InvalidValue {
                field: "observation_date",
                ..
            }
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = Config::load(Path::new("/no/such/config.yaml")).expect_err("load should fail");
        match err {
            Error::ReadConfig { source, .. } => {
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound)
            }
            other => panic!("expected ReadConfig, got {other:?}"),
        }
    }
}
