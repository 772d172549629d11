use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Arg, Command};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let matches = Command::new("night-window")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Report sunset, sunrise, and astronomical-twilight times for an observing site")
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to the site/date config file")
                .default_value("config.yaml"),
        )
        .get_matches();
    let path = matches
        .get_one::<String>("config")
        .map(PathBuf::from)
        .unwrap(); // Safe due to default

    let mut stdout = io::stdout().lock();
    night_window::run(&path, &mut stdout)
        .with_context(|| format!("reporting night window from {}", path.display()))?;
    Ok(())
}
