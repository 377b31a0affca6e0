//! Entry point for the sync player.
//!
//! Loads a sync configuration and then either prints what it resolves to or
//! drives a headless session against a simulated video and blank pages.

mod config;
mod console;
mod debounce;
mod headless;
mod runtime;

use crate::config::{AppConfig, SyncConfig, load_config, load_sync_config, serialize_config};
use crate::headless::{BlankRenderer, FrameDumpSurface, Progress, SimulatedPlayback, TracingStatus};
use crate::runtime::{Collaborators, Playback, SyncDriver, report_fatal};
use anyhow::{Context, Result, anyhow};
use std::env;
use std::future::Future;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use syncdeck_core::{SyncTable, format_clock};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

const USAGE: &str = "Usage: syncdeck <config.json|url> [--settings <path>] [--print-settings] \
[--pages N] [--snapshot] [--simulate [--speed X] [--frames DIR]] [TIME...]";

/// Simulated playback advances in steps of this much wall time.
const TICK: Duration = Duration::from_millis(100);

/// Extra video after the last sync point when simulating.
const TAIL_SECS: f64 = 10.0;

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Mode {
    Timeline,
    Resolve(Vec<f64>),
    Snapshot,
    Simulate { speed: f64, frames: Option<PathBuf> },
}

#[derive(Debug, Clone, PartialEq)]
struct Args {
    source: String,
    settings: PathBuf,
    print_settings: bool,
    pages: Option<u32>,
    mode: Mode,
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let args = parse_args(env::args().skip(1))?;
    let config = load_config(&args.settings);
    set_log_level(reload_handle, config.log_level.as_filter_str());
    info!(source = %args.source, level = %config.log_level, "Starting sync player");

    if args.print_settings {
        let text = serialize_config(&config).context("Failed to serialize settings")?;
        println!("{text}");
    }

    let sync = match load_sync_config(&args.source) {
        Ok(sync) => sync,
        Err(err) => {
            report_fatal(&mut TracingStatus, &err.to_string());
            return Err(err).context("Could not load the sync configuration");
        }
    };
    let pages = args
        .pages
        .or_else(|| sync.table().max_page())
        .unwrap_or(1);

    let stdout = std::io::stdout();
    execute(args.mode, config, sync, pages, &mut stdout.lock())
}

fn execute(
    mode: Mode,
    config: AppConfig,
    sync: SyncConfig,
    pages: u32,
    out: &mut impl Write,
) -> Result<()> {
    match mode {
        Mode::Timeline => print_timeline(&sync, pages, out)?,
        Mode::Resolve(times) => {
            let table = sync.table();
            for time in times {
                writeln!(out, "{} -> page {}", format_clock(time), table.resolve_page(time))?;
            }
        }
        Mode::Snapshot => {
            let snapshot = block_on(snapshot(config, &sync, pages))?;
            writeln!(out, "{snapshot}")?;
        }
        Mode::Simulate { speed, frames } => {
            block_on(simulate(config, sync, pages, speed, frames))?;
        }
    }
    Ok(())
}

fn block_on<T>(future: impl Future<Output = Result<T>>) -> Result<T> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to start the async runtime")?;
    runtime.block_on(future)
}

fn print_timeline(sync: &SyncConfig, pages: u32, out: &mut impl Write) -> Result<()> {
    let table = sync.table();
    writeln!(out, "video:    {}", sync.video_url)?;
    writeln!(out, "document: {} ({pages} pages)", sync.document_url)?;
    writeln!(out)?;
    for point in table.iter() {
        writeln!(out, "{:>8}  page {}", format_clock(point.time), point.page)?;
    }
    writeln!(out)?;
    for page in 1..=pages {
        match table.seek_time_for_page(page) {
            Some(time) => writeln!(out, "page {page:>3}: seeks to {}", format_clock(time))?,
            None => writeln!(out, "page {page:>3}: no sync point")?,
        }
    }
    Ok(())
}

fn collaborators(
    playback: &SimulatedPlayback,
    pages: u32,
    config: &AppConfig,
    frames: Option<PathBuf>,
) -> Collaborators {
    Collaborators {
        playback: Box::new(playback.clone()),
        renderer: Arc::new(BlankRenderer::new(pages, config.max_render_scale)),
        status: Box::new(TracingStatus),
        surface: Box::new(FrameDumpSurface::new(frames)),
    }
}

async fn snapshot(config: AppConfig, sync: &SyncConfig, pages: u32) -> Result<String> {
    let (handle, inbox) = runtime::channel();
    let playback = SimulatedPlayback::new(video_length(&sync.table()), handle);
    let parts = collaborators(&playback, pages, &config, None);
    let mut driver = SyncDriver::new(config, inbox, parts);
    driver.start(sync).await;
    driver.run_until_idle().await;
    serde_json::to_string_pretty(&driver.session().snapshot())
        .context("Failed to serialize the session snapshot")
}

async fn simulate(
    config: AppConfig,
    sync: SyncConfig,
    pages: u32,
    speed: f64,
    frames: Option<PathBuf>,
) -> Result<()> {
    let (handle, inbox) = runtime::channel();
    let mut playback = SimulatedPlayback::new(video_length(&sync.table()), handle.clone());
    let parts = collaborators(&playback, pages, &config, frames);
    let mut driver = SyncDriver::new(config, inbox, parts);
    driver.start(&sync).await;

    let interrupt = handle.clone();
    ctrlc::set_handler(move || {
        warn!("Interrupted; stopping simulation");
        interrupt.shutdown();
    })
    .context("Failed to install Ctrl-C handler")?;
    // Left detached; process exit ends it.
    console::spawn_stdin_reader(handle.clone())?;

    playback.play();
    info!(speed, "Simulating playback; type n, p, space, resize W H or quit");
    let ticker = tokio::spawn(async move {
        let mut interval = tokio::time::interval(TICK);
        loop {
            interval.tick().await;
            if playback.advance(TICK.as_secs_f64() * speed) == Progress::Ended {
                info!("Playback finished");
                handle.shutdown();
                break;
            }
        }
    });

    driver.run().await;
    ticker.abort();
    Ok(())
}

fn video_length(table: &SyncTable) -> f64 {
    table.iter().map(|p| p.time).fold(0.0, f64::max) + TAIL_SECS
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut args = args.into_iter();
    let mut source = None;
    let mut settings = PathBuf::from("conf/config.toml");
    let mut print_settings = false;
    let mut pages = None;
    let mut snapshot = false;
    let mut simulate = false;
    let mut speed = 1.0;
    let mut frames = None;
    let mut times = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--settings" => settings = PathBuf::from(value_for(&mut args, "--settings")?),
            "--print-settings" => print_settings = true,
            "--pages" => {
                let raw = value_for(&mut args, "--pages")?;
                let count: u32 = raw
                    .parse()
                    .with_context(|| format!("Invalid page count: {raw}"))?;
                if count == 0 {
                    return Err(anyhow!("--pages must be at least 1"));
                }
                pages = Some(count);
            }
            "--snapshot" => snapshot = true,
            "--simulate" => simulate = true,
            "--speed" => {
                let raw = value_for(&mut args, "--speed")?;
                speed = raw
                    .parse::<f64>()
                    .ok()
                    .filter(|s| s.is_finite() && *s > 0.0)
                    .ok_or_else(|| anyhow!("Invalid speed: {raw}"))?;
            }
            "--frames" => frames = Some(PathBuf::from(value_for(&mut args, "--frames")?)),
            flag if flag.starts_with("--") => return Err(anyhow!("Unknown option {flag}\n{USAGE}")),
            value if source.is_none() => source = Some(value.to_string()),
            value => {
                let time: f64 = value
                    .parse()
                    .with_context(|| format!("Invalid time: {value}"))?;
                times.push(time);
            }
        }
    }

    let source = source.ok_or_else(|| anyhow!(USAGE))?;
    if snapshot && simulate {
        return Err(anyhow!("--snapshot and --simulate cannot be combined"));
    }
    let mode = if simulate {
        Mode::Simulate { speed, frames }
    } else if snapshot {
        Mode::Snapshot
    } else if !times.is_empty() {
        Mode::Resolve(times)
    } else {
        Mode::Timeline
    };

    Ok(Args {
        source,
        settings,
        print_settings,
        pages,
        mode,
    })
}

fn value_for(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .ok_or_else(|| anyhow!("{flag} expects a value\n{USAGE}"))
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    warn!("Logging initialized; override level with logging.log_level or RUST_LOG");
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("debug"));
    if let Err(err) = handle.modify(|filter| *filter = parsed.clone()) {
        warn!(%level, "Failed to update log level from settings: {err}");
    } else {
        info!(%level, "Applied log level from settings");
    }
}
