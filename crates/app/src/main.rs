use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use population_race_core::{
    load_dataset, source_for_path, spawn_playback, Frame, LoadedDataset, LoadStatus, RaceConfig,
    Ranker, Session,
};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

const BAR_WIDTH: u64 = 48;

fn main() -> population_race_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            data,
            config,
            tick_ms,
        } => run_play(&data, config.as_deref(), tick_ms),
        Commands::Snapshot {
            data,
            config,
            year,
            json,
        } => run_snapshot(&data, config.as_deref(), year, json),
    }
}

fn run_play(
    data: &Path,
    config: Option<&Path>,
    tick_ms: Option<u64>,
) -> population_race_core::Result<()> {
    let mut config = load_config(config)?;
    if let Some(tick_ms) = tick_ms {
        config.playback.tick_interval_ms = tick_ms;
        config.validate()?;
    }
    tracing::info!(?data, tick_ms = config.playback.tick_interval_ms, "starting playback");

    let Some(dataset) = load(data)? else {
        return Ok(());
    };
    let session = Session::new(dataset.store, &config);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(play(session, &config))
}

async fn play(session: Session, config: &RaceConfig) -> population_race_core::Result<()> {
    let (finished_tx, mut finished) = mpsc::unbounded_channel();
    let mut was_playing = false;
    let renderer = move |frame: &Frame| {
        print_frame(frame);
        if was_playing && !frame.playback.is_playing {
            let _ = finished_tx.send(());
        }
        was_playing = frame.playback.is_playing;
    };

    let handle = spawn_playback(session, renderer, config.playback.tick_interval());
    handle.toggle()?;

    tokio::select! {
        _ = finished.recv() => tracing::info!("reached the last year"),
        interrupted = tokio::signal::ctrl_c() => {
            interrupted?;
            tracing::info!("interrupted");
        }
    }

    let session = handle.shutdown().await?;
    tracing::info!(year = session.state().current_year, "playback finished");
    Ok(())
}

fn run_snapshot(
    data: &Path,
    config: Option<&Path>,
    year: i32,
    json: bool,
) -> population_race_core::Result<()> {
    let config = load_config(config)?;
    let Some(dataset) = load(data)? else {
        return Ok(());
    };

    let snapshot = Ranker::from_config(&config).rank(dataset.store.records(), year);
    let world_total = dataset.store.world().total(year);

    if json {
        let report = serde_json::json!({
            "year": snapshot.year,
            "world_total": world_total,
            "entries": snapshot.entries,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{year}  total: {world_total}");
    let widest = snapshot.entries.first().map_or(0, |entry| entry.value);
    for (rank, entry) in snapshot.entries.iter().enumerate() {
        println!(
            "{:>2}. {:<28} {:>14} {} {}",
            rank + 1,
            entry.label,
            entry.value,
            entry.color(),
            bar(entry.value, widest)
        );
    }
    Ok(())
}

/// Loads the dataset; prints a notice and yields `None` when it is unavailable.
fn load(data: &Path) -> population_race_core::Result<Option<LoadedDataset>> {
    let source = source_for_path(data)?;
    let dataset = load_dataset(source.as_ref());
    if let LoadStatus::Unavailable { reason } = &dataset.status {
        println!("population data unavailable: {reason}");
        return Ok(None);
    }
    Ok(Some(dataset))
}

fn load_config(path: Option<&Path>) -> population_race_core::Result<RaceConfig> {
    match path {
        Some(path) => RaceConfig::from_json_file(path),
        None => Ok(RaceConfig::default()),
    }
}

fn print_frame(frame: &Frame) {
    let state = if frame.playback.is_playing { ">" } else { "||" };
    println!(
        "\n{state} {}  total: {}  [{:>5.1}%]",
        frame.year(),
        frame.world_total,
        frame.playback.progress_percent
    );

    let series = &frame.series;
    let widest = series.slot(0).value.unwrap_or(0);
    for index in 0..series.len() {
        let slot = series.slot(index);
        let value = slot.value.unwrap_or(0);
        println!(
            "  {:<28} {:>14} {:<7} {}",
            slot.label.unwrap_or(""),
            value,
            slot.color.unwrap_or("-"),
            bar(value, widest)
        );
    }
}

fn bar(value: u64, widest: u64) -> String {
    if widest == 0 {
        return String::new();
    }
    let width = (u128::from(value) * u128::from(BAR_WIDTH) / u128::from(widest)) as usize;
    "#".repeat(width.max(1))
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Bar chart race of population per country", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play the race from the first to the last year.
    Play {
        /// JSON or CSV file with `Country name`, `Year` and `Population` columns.
        #[arg(short, long)]
        data: PathBuf,
        /// Optional JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Override the tick period in milliseconds.
        #[arg(long)]
        tick_ms: Option<u64>,
    },
    /// Print the ranked snapshot for a single year.
    Snapshot {
        #[arg(short, long)]
        data: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        year: i32,
        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}
