use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use drivetime::domain::{CoordinateTable, RoutePair, SystemClock};
use drivetime::maps::{FetchConfig, MapsClient, MockPageFetcher, PageFetcher};
use drivetime::row::OutputMode;
use drivetime::sink::{CsvSink, DEFAULT_OUTPUT_PATH};
use drivetime::survey::{Survey, SurveyConfig, SurveyReport};

/// Record current driving times between named places.
#[derive(Debug, Parser)]
#[command(name = "drivetime", version)]
struct Args {
    /// JSON file mapping place names to `[lat, lon]`
    #[arg(long, default_value = "bay_area_lats_longs.json")]
    coords: PathBuf,

    /// CSV file rows are appended to
    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Record only the optimal route, or every route found
    #[arg(long, value_enum, default_value_t = OutputMode::Optimal)]
    mode: OutputMode,

    /// Seconds to wait between queries
    #[arg(long, default_value_t = 10)]
    delay_secs: u64,

    /// Origin for a single query (requires --to)
    #[arg(long, requires = "to")]
    from: Option<String>,

    /// Destination for a single query (requires --from)
    #[arg(long, requires = "from")]
    to: Option<String>,

    /// Override the directions page base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Retries per query after a failed fetch
    #[arg(long, default_value_t = 3)]
    retries: u32,

    /// Read saved pages named `{origin}_to_{destination}.txt` from this
    /// directory instead of fetching them
    #[arg(long)]
    pages_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let started = Instant::now();

    let coords = CoordinateTable::load(&args.coords)?;
    info!(path = %args.coords.display(), locations = coords.len(), "loaded coordinates");

    let pairs = match (&args.from, &args.to) {
        (Some(from), Some(to)) => vec![coords.pair(from, to)?],
        _ => coords.all_pairs(),
    };

    let report = match &args.pages_dir {
        Some(dir) => {
            let fetcher = MockPageFetcher::from_dir(dir, &coords)?;
            info!(dir = %dir.display(), pages = fetcher.len(), "replaying saved pages");
            survey(fetcher, &args, &pairs).await?
        }
        None => {
            let mut config = FetchConfig::new().with_retries(args.retries, 2);
            if let Some(url) = &args.base_url {
                config = config.with_base_url(url);
            }
            survey(MapsClient::new(config)?, &args, &pairs).await?
        }
    };

    info!(
        written = report.written.len(),
        failed = report.failures.len(),
        elapsed_secs = started.elapsed().as_secs_f64(),
        output = %args.output.display(),
        "survey complete"
    );

    if report.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        for (label, e) in &report.failures {
            error!(route = %label, "{e}");
        }
        Ok(ExitCode::FAILURE)
    }
}

async fn survey<F: PageFetcher>(
    fetcher: F,
    args: &Args,
    pairs: &[RoutePair],
) -> Result<SurveyReport, Box<dyn std::error::Error>> {
    let sink = CsvSink::open(&args.output)?;
    let config = SurveyConfig {
        mode: args.mode,
        delay_secs: args.delay_secs,
        ..SurveyConfig::default()
    };

    info!(queries = pairs.len(), mode = ?args.mode, "starting survey");
    let mut survey = Survey::new(fetcher, SystemClock, sink, config);
    Ok(survey.run(pairs).await)
}
