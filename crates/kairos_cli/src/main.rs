use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};
use kairos_rs::{BirthData, CosmicContext, GeoLocation, Kairos, KairosConfig, NatalChart};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "kairos", about = "Astronomical computations for astrology", version)]
struct Cli {
    /// TOML config file (defaults to $KAIROS_CONFIG, then built-in defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,
    /// Debug logging on stderr unless RUST_LOG is set
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Body positions at a UTC instant
    Positions {
        /// UTC instant (YYYY-MM-DDThh:mm:ssZ)
        #[arg(long)]
        at: DateTime<Utc>,
    },
    /// Natal chart from birth data
    Chart(BirthArgs),
    /// Cosmic context at a UTC instant
    Context {
        /// UTC instant (YYYY-MM-DDThh:mm:ssZ)
        #[arg(long)]
        at: DateTime<Utc>,
    },
    /// Cosmic contexts at local noon for an inclusive date span
    Range {
        /// First date (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,
        /// Last date (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,
        /// IANA timezone the dates are local to
        #[arg(long, default_value = "UTC")]
        tz: String,
    },
    /// Transits at a UTC instant against a natal chart
    Transits {
        #[command(flatten)]
        birth: BirthArgs,
        /// UTC instant of the transiting positions (YYYY-MM-DDThh:mm:ssZ)
        #[arg(long)]
        at: DateTime<Utc>,
        /// Keep only transits with at most this orb, tightest first
        #[arg(long)]
        max_orb: Option<f64>,
    },
}

#[derive(Args)]
struct BirthArgs {
    /// Local birth date (YYYY-MM-DD)
    #[arg(long)]
    date: NaiveDate,
    /// Local birth time (hh:mm:ss); omit when unknown
    #[arg(long)]
    time: Option<NaiveTime>,
    /// IANA timezone of the birth place
    #[arg(long)]
    tz: Tz,
    /// Latitude in degrees, north positive
    #[arg(long, allow_negative_numbers = true)]
    lat: f64,
    /// Longitude in degrees, east positive
    #[arg(long, allow_negative_numbers = true)]
    lon: f64,
}

impl BirthArgs {
    fn birth_data(&self) -> BirthData {
        BirthData {
            date: self.date,
            time: self.time,
            timezone: self.tz,
            location: GeoLocation::new(self.lat, self.lon),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => KairosConfig::load(path)?,
        None => KairosConfig::from_env()?,
    };
    let kairos = Kairos::new(config)?;
    debug!(config = ?kairos.config(), "starting");

    match &cli.command {
        Commands::Positions { at } => emit(&kairos.positions_at(at)?, cli.pretty),
        Commands::Chart(birth) => emit(&kairos.compute_chart(&birth.birth_data())?, cli.pretty),
        Commands::Context { at } => emit(&kairos.summarize(at)?, cli.pretty),
        Commands::Range { start, end, tz } => {
            let contexts = kairos.compute_span(*start, *end, tz)?;
            let by_date: BTreeMap<NaiveDate, &CosmicContext> =
                contexts.iter().map(|(d, c)| (*d, c.as_ref())).collect();
            emit(&by_date, cli.pretty)
        }
        Commands::Transits {
            birth,
            at,
            max_orb,
        } => {
            let natal: NatalChart = kairos.compute_chart(&birth.birth_data())?;
            let transits = kairos.match_transits(at, &natal)?;
            let transits = match max_orb {
                Some(orb) => kairos.filter_significant(&transits, *orb),
                None => transits,
            };
            emit(&transits, cli.pretty)
        }
    }
}

fn emit<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<(), Box<dyn std::error::Error>> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
