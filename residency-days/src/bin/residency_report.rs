use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{bail, Context as _, Result};
use chrono::FixedOffset;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use residency_days::event::canonical_country;
use residency_days::localization::{Localize, TzLocation};
use residency_days::{AttributionPolicy, Context, CountryDays, LocationEvent, Origin, Year};

/// Count days spent per country from a JSON location log.
#[derive(Parser, Debug)]
#[command(name = "residency-report")]
#[command(version)]
struct Cli {
    /// JSON array of location events
    events: PathBuf,

    /// Home country, which may receive boundary days and the baseline
    #[arg(long, env = "RESIDENCY_HOME")]
    home: String,

    /// Days spent at home before tracking started
    #[arg(long, default_value_t = 0)]
    baseline: u32,

    /// Convention used to attribute the day of a border crossing
    #[arg(long, default_value_t = AttributionPolicy::default())]
    policy: AttributionPolicy,

    /// Only count days of this year
    #[arg(long)]
    year: Option<Year>,

    /// Reference timezone, as an IANA name or a fixed offset such as +02:00
    #[arg(long, env = "RESIDENCY_TZ")]
    tz: Option<String>,

    /// Where the user comes from before the first event
    #[arg(long, default_value_t = Origin::default())]
    origin: Origin,

    /// Only print the entry of this country
    #[arg(long)]
    country: Option<String>,

    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();
}

fn load_events(cli: &Cli) -> Result<Vec<LocationEvent>> {
    let file = File::open(&cli.events)
        .with_context(|| format!("could not open {}", cli.events.display()))?;

    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("could not read events from {}", cli.events.display()))
}

fn print_report<L: Localize>(cli: &Cli, ctx: Context<L>, events: &[LocationEvent]) -> Result<()> {
    let ctx = ctx.with_policy(cli.policy).with_origin(cli.origin);
    let report = ctx.compute(events, cli.baseline, cli.year)?;

    let output = match &cli.country {
        None => serde_json::to_string_pretty(&report)?,
        Some(country) => {
            let country = canonical_country(country);

            let entry = report.get(&country).cloned().unwrap_or_else(|| CountryDays {
                country,
                ..Default::default()
            });

            serde_json::to_string_pretty(&entry)?
        }
    };

    println!("{output}");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let events = load_events(&cli)?;
    let ctx = Context::new(&cli.home)?;
    log::debug!(events = events.len(), home = ctx.home(); "loaded location log");

    match cli.tz.as_deref().map(str::trim) {
        None | Some("") => print_report(&cli, ctx, &events),
        Some(name) => {
            if let Some(locale) = TzLocation::from_name(name) {
                print_report(&cli, ctx.with_locale(locale), &events)
            } else if let Ok(offset) = name.parse::<FixedOffset>() {
                print_report(&cli, ctx.with_locale(TzLocation::new(offset)), &events)
            } else {
                bail!("unknown timezone `{name}`")
            }
        }
    }
}
