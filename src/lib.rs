//! Night-window reporting for a single observing site.
//!
//! Reads a YAML site/date config, asks the SPA solar ephemeris for the next
//! sunset, sunrise, and astronomical-twilight crossings after local noon on
//! the observation date, and writes a five-line report in the site's
//! timezone.

use std::io::Write;
use std::path::Path;

pub mod config;
pub mod error;
pub mod report;
pub mod riseset;

pub use config::{Config, SiteConfig};
pub use error::Error;
pub use report::NightWindow;
pub use riseset::Observer;

/// Load the config at `config_path`, compute the night window, and write the
/// report to `out`.
///
/// All four events are computed before the first line is written, so a
/// failing query produces no partial report.
pub fn run(config_path: &Path, out: &mut impl Write) -> Result<(), Error> {
    let config = Config::load(config_path)?;
    let observer = Observer::from_site(&config.site)?;
    let window = NightWindow::compute(&observer, config.date()?)?;
    window.render(&observer, &config.observation_date, out)
}
