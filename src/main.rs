use clap::{Parser, Subcommand, ValueEnum};
use eyre::{eyre, Result, WrapErr};
use geoverify::api::formatting::render;
use geoverify::logging::init_logging;
use geoverify::{
    evaluate_positions, ConfigurationManager, GeoPosition, OutputFormat, PositionSource, ReplayProvider,
    VerificationReport, VerificationSession, VerifierConfig,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Check whether a position lies within a few meters of a saved reference
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Opts {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Override the proximity threshold (meters)
    #[arg(short, long)]
    threshold: Option<f64>,
    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// Verbose logging
    #[arg(short, long)]
    debug: bool,
    #[command(subcommand)]
    subcmd: SubCommand,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        }
    }
}

#[derive(Debug, Subcommand)]
enum SubCommand {
    /// Distance between two coordinates and whether it is within the threshold
    #[command(allow_negative_numbers = true)]
    Distance {
        lat1: f64,
        lon1: f64,
        lat2: f64,
        lon2: f64,
    },
    /// Run a verification session against recorded readings
    ///
    /// The first reading that succeeds becomes the reference; every
    /// following entry is compared against it.
    Replay {
        /// JSON array of readings and failures
        file: PathBuf,
    },
}

/// Range check between two command-line coordinates
fn distance_report(lat1: f64, lon1: f64, lat2: f64, lon2: f64, threshold_m: f64) -> Result<VerificationReport> {
    let first = GeoPosition::new(lat1, lon1, 0.0).wrap_err("first point")?;
    let second = GeoPosition::new(lat2, lon2, 0.0).wrap_err("second point")?;

    let mut report = VerificationReport::empty(threshold_m);
    report.result = Some(evaluate_positions(&first, &second, threshold_m));
    Ok(report)
}

/// Play a recording through a session and return `(compared, inside)`
///
/// Every step's report goes to `emit`. Failed comparisons are reported but
/// not counted.
async fn run_replay<F>(replay: Arc<ReplayProvider>, config: &VerifierConfig, mut emit: F) -> Result<(usize, usize)>
where
    F: FnMut(&VerificationReport),
{
    let source = PositionSource::new(replay.clone());
    let mut session = VerificationSession::with_settings(source, config.position.clone(), config.threshold_m);

    // the first successful reading becomes the reference
    while session.current().is_none() && replay.remaining() > 0 {
        if let Err(e) = session.acquire().await {
            warn!("acquisition failed: {}", e);
            emit(&session.report());
        }
    }
    if session.current().is_none() {
        return Err(eyre!("no usable reading"));
    }
    session.save_reference()?;
    emit(&session.report());

    let mut inside = 0usize;
    let mut total = 0usize;
    while replay.remaining() > 0 {
        match session.compare().await {
            Ok(result) => {
                total += 1;
                if result.within_range {
                    inside += 1;
                }
            }
            Err(e) => warn!("comparison failed: {}", e),
        }
        emit(&session.report());
    }
    Ok((total, inside))
}

#[tokio::main]
async fn main() -> Result<()> {
    let opts = Opts::parse();

    let mut manager = match &opts.config {
        Some(path) => ConfigurationManager::from_file(path)
            .wrap_err_with(|| format!("loading {}", path.display()))?,
        None => ConfigurationManager::new(),
    };
    if let Some(threshold) = opts.threshold {
        manager.set_threshold(threshold)?;
    }
    let config = manager.config().clone();

    init_logging(opts.debug || config.debug_logging).map_err(|e| eyre!("logging: {}", e))?;

    let format = OutputFormat::from(opts.format);

    match opts.subcmd {
        SubCommand::Distance { lat1, lon1, lat2, lon2 } => {
            let report = distance_report(lat1, lon1, lat2, lon2, config.threshold_m)?;
            println!("{}", render(&report, format));
        }
        SubCommand::Replay { file } => {
            let replay = Arc::new(
                ReplayProvider::from_file(&file).wrap_err_with(|| format!("loading {}", file.display()))?,
            );
            let (total, inside) = run_replay(replay, &config, |report| println!("{}", render(report, format)))
                .await
                .wrap_err_with(|| format!("replaying {}", file.display()))?;
            info!(total, inside, "replay finished");
        }
    }
    Ok(())
}
