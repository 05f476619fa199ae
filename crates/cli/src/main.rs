use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use discrip_core::{
    engine::VIDEO_TS_DIR, fetch_inventory, load_config, validate_config, Config, Engine,
    Extractor, HandbrakeEngine,
};

/// Config file picked up from the working directory when `--config` is not given.
const DEFAULT_CONFIG_FILE: &str = "discrip.toml";

#[derive(Parser, Debug)]
#[command(
    name = "discrip",
    version,
    about = "Convert every title of a DVD folder to a video file with HandBrakeCLI"
)]
struct Cli {
    /// Path to the DVD folder (the one containing VIDEO_TS)
    #[arg(long = "dvdpath", short = 'd', value_name = "DIR")]
    dvd_path: PathBuf,

    /// Path to the HandBrakeCLI binary
    #[arg(long = "handbrake", value_name = "PATH")]
    handbrake: Option<PathBuf>,

    /// HandBrake preset profile
    #[arg(long = "handbrakeprofile", value_name = "NAME")]
    profile: Option<String>,

    /// Directory converted titles are written to
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Configuration file (TOML)
    #[arg(long, env = "DISCRIP_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Skip titles shorter than this many minutes
    #[arg(long, value_name = "MINUTES")]
    min_minutes: Option<u32>,

    /// Only convert this title id (repeatable)
    #[arg(long = "track", value_name = "ID")]
    tracks: Vec<String>,

    /// List the titles and output files without converting anything
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Print the result as JSON on stdout
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.clone().or_else(|| {
        let default = PathBuf::from(DEFAULT_CONFIG_FILE);
        default.exists().then_some(default)
    });

    if let Some(path) = &config_path {
        info!("Loading configuration from {:?}", path);
    }
    let mut config = load_config(config_path.as_deref())
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    apply_overrides(&cli, &mut config);
    validate_config(&config).context("Configuration validation failed")?;

    info!("Engine: {:?}", config.engine.path);
    info!("Profile: {}", config.engine.profile);
    info!("Output directory: {:?}", config.output.dir);

    check_dvd_path(&cli.dvd_path)?;

    let dvd_path = resolve_dvd_path(&cli.dvd_path).await?;

    let engine = Arc::new(HandbrakeEngine::new(config.engine.clone()));
    engine
        .validate()
        .await
        .context("HandBrakeCLI cannot be started")?;

    // First get all the available titles, the main feature isn't always obvious.
    let inventory = fetch_inventory(engine.as_ref(), &dvd_path)
        .await
        .context("Failed to get track info")?;

    let tracks = config.selection.selection().apply(&inventory.tracks);
    info!(
        "Selected {} of {} title(s)",
        tracks.len(),
        inventory.tracks.len()
    );

    let extractor = Extractor::new(
        engine,
        config.output.naming(),
        config.engine.profile.clone(),
    );

    if cli.dry_run {
        let planned = extractor.plan(&dvd_path, &tracks).await;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&planned)?);
        } else {
            for p in &planned {
                info!(
                    "Track {} ({} min) -> {:?}{}",
                    p.job.track.id,
                    p.job.track.runtime_minutes,
                    p.job.output_path,
                    if p.exists { " (exists, would skip)" } else { "" }
                );
            }
        }
        return Ok(());
    }

    tokio::fs::create_dir_all(&config.output.dir)
        .await
        .with_context(|| format!("Failed to create output directory {:?}", config.output.dir))?;

    let report = match extractor.extract(&dvd_path, &tracks).await {
        Ok(report) => report,
        Err(e) => {
            if cli.json {
                let failures: Vec<String> = e.failures().iter().map(|f| f.to_string()).collect();
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({ "failures": failures }))?
                );
            }
            return Err(e).context("Some tracks failed to convert");
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    info!(
        "Conversion done: {} converted, {} skipped",
        report.converted(),
        report.skipped()
    );

    Ok(())
}

/// Command line values win over the configuration file and environment.
fn apply_overrides(cli: &Cli, config: &mut Config) {
    if let Some(path) = &cli.handbrake {
        config.engine.path = path.clone();
    }
    if let Some(profile) = &cli.profile {
        config.engine.profile = profile.clone();
    }
    if let Some(dir) = &cli.output_dir {
        config.output.dir = dir.clone();
    }
    if let Some(minutes) = cli.min_minutes {
        config.selection.min_minutes = minutes;
    }
    if !cli.tracks.is_empty() {
        config.selection.tracks = cli.tracks.clone();
    }
}

/// Output names use the folder name, so `-d .` must resolve to the real folder.
async fn resolve_dvd_path(dvd_path: &Path) -> Result<PathBuf> {
    tokio::fs::canonicalize(dvd_path)
        .await
        .with_context(|| format!("Failed to resolve DVD path {:?}", dvd_path))
}

fn check_dvd_path(dvd_path: &Path) -> Result<()> {
    let video_ts = dvd_path.join(VIDEO_TS_DIR);
    if !video_ts.is_dir() {
        bail!("Invalid DVD path: {} should exist", video_ts.display());
    }
    Ok(())
}
