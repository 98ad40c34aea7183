//! replay — command-line driver for the route_replay playback engine.
//!
//! Loads a route (JSON document, waypoint + path CSVs, or a seeded synthetic
//! out-and-back route), plays it back headless or in real time, and
//! optionally records every frame to CSV.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use rp_camera::CameraMode;
use rp_core::{RouteId, SpeedMultiplier, format_clock};
use rp_geocode::CoordinateGeocoder;
use rp_motion::Phase;
use rp_output::{CsvFrameWriter, FrameRecorder};
use rp_playback::{
    Frame, JsonFileRouteSource, PlaybackBuilder, PlaybackConfig, PlaybackError, PlaybackObserver,
    RouteSource, RunOutcome, StaticRouteSource, control_channel, run_headless, run_realtime,
};
use rp_route::{
    Route, SynthParams, load_path_csv, load_route_json, load_waypoints_csv, synthetic_route,
};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "replay", about = "Time-scaled delivery route playback")]
struct Args {
    /// Route document (JSON).
    #[arg(long, conflicts_with_all = ["waypoints", "synthetic"])]
    route: Option<PathBuf>,

    /// Waypoint CSV (use with --path).
    #[arg(long, requires = "path")]
    waypoints: Option<PathBuf>,

    /// Path CSV with lat,lng columns (use with --waypoints).
    #[arg(long, requires = "waypoints")]
    path: Option<PathBuf>,

    /// Generate a seeded out-and-back route instead of loading one.
    #[arg(long)]
    synthetic: bool,

    /// Delivery stops for --synthetic.
    #[arg(long, default_value_t = 5)]
    stops: usize,

    /// Seed for --synthetic.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Playback speed multiplier (route seconds per playback second).
    #[arg(long, default_value_t = 60.0)]
    speed: f64,

    /// Camera mode: overview, chase, or cinematic.
    #[arg(long, default_value = "chase")]
    mode: CameraMode,

    /// Frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Pace frames against the wall clock instead of running flat out.
    #[arg(long)]
    realtime: bool,

    /// Label transit frames with offline coordinate "addresses".
    #[arg(long)]
    geocode: bool,

    /// Directory for frames.csv and phase_events.csv.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Record every n-th frame.
    #[arg(long, default_value_t = 1)]
    record_every: u64,

    /// Playback configuration (JSON); missing fields take defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Debug-level logging (RUST_LOG overrides).
    #[arg(short, long)]
    verbose: bool,
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Prints stop arrivals and departures and forwards to the optional recorder.
struct ConsoleObserver {
    recorder:   Option<FrameRecorder<CsvFrameWriter>>,
    frames:     u64,
    last_frame: Option<Frame>,
    route:      Route,
}

impl ConsoleObserver {
    fn stop_name(&self, i: usize) -> String {
        self.route.waypoint(i).display_name()
    }
}

impl PlaybackObserver for ConsoleObserver {
    fn on_frame(&mut self, frame: &Frame) {
        self.frames += 1;
        if let Some(r) = &mut self.recorder {
            r.on_frame(frame);
        }
        self.last_frame = Some(frame.clone());
    }

    fn on_phase_change(&mut self, from: Option<Phase>, to: Phase, frame: &Frame) {
        match to {
            Phase::Servicing => println!(
                "  [{}] arrived at {}",
                format_clock(frame.elapsed),
                self.stop_name(frame.waypoint_index)
            ),
            Phase::Transit if from == Some(Phase::Servicing) => println!(
                "  [{}] departed {}",
                format_clock(frame.elapsed),
                self.stop_name(frame.waypoint_index)
            ),
            Phase::Complete => println!(
                "  [{}] route complete at {}",
                format_clock(frame.elapsed),
                self.stop_name(frame.waypoint_index)
            ),
            _ => {}
        }
        if let Some(r) = &mut self.recorder {
            r.on_phase_change(from, to, frame);
        }
    }

    fn on_complete(&mut self, frame: &Frame) {
        if let Some(r) = &mut self.recorder {
            r.on_complete(frame);
        }
    }

    fn on_error(&mut self, error: &PlaybackError) {
        eprintln!("playback error: {error}");
    }
}

// ── Setup helpers ─────────────────────────────────────────────────────────────

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_config(path: Option<&Path>) -> Result<PlaybackConfig> {
    let Some(path) = path else {
        return Ok(PlaybackConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: PlaybackConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    debug!(?config, "loaded playback config");
    Ok(config)
}

/// The initial route and the source used to refetch it.
fn load_route(args: &Args) -> Result<(Route, Arc<dyn RouteSource>)> {
    if let Some(path) = &args.route {
        let route = load_route_json(path)
            .with_context(|| format!("loading route {}", path.display()))?;
        let source: Arc<dyn RouteSource> = Arc::new(JsonFileRouteSource::new(path.clone()));
        return Ok((route, source));
    }

    let route = match (&args.waypoints, &args.path) {
        (Some(wp), Some(path)) => {
            let waypoints = load_waypoints_csv(wp)
                .with_context(|| format!("loading waypoints {}", wp.display()))?;
            let samples = load_path_csv(path)
                .with_context(|| format!("loading path {}", path.display()))?;
            Route::new(RouteId(1), waypoints, samples, None)?
        }
        _ => {
            let params = SynthParams { stops: args.stops, ..SynthParams::default() };
            synthetic_route(args.seed, &params)?
        }
    };
    let source: Arc<dyn RouteSource> = Arc::new(StaticRouteSource::new(route.clone()));
    Ok((route, source))
}

fn print_summary(route: &Route, multiplier: SpeedMultiplier) {
    let s = route.summary();
    println!("=== replay — {} ===", s.route_id);
    println!(
        "Stops: {}  |  Distance: {:.1} km  |  Driving: {}  |  Dwell: {}",
        s.delivery_stops,
        s.total_distance_km,
        format_clock(s.travel_secs),
        format_clock(s.dwell_secs),
    );
    match s.average_speed_kmh {
        Some(v) => println!("Average moving speed: {v:.1} km/h"),
        None => println!("Average moving speed: n/a"),
    }
    println!(
        "Path samples: {} ({:.1} km drawn)  |  Playback at {multiplier}: {}",
        s.path_samples,
        s.path_length_km,
        format_clock(multiplier.to_playback(route.total_duration_secs())),
    );
    for (k, leg) in s.legs.iter().enumerate() {
        let to = route.waypoint(k + 1);
        println!(
            "  leg {:>2} → {:<20} {:>6.2} km  {}{}",
            k + 1,
            to.display_name(),
            leg.distance_km,
            format_clock(leg.duration_secs),
            if leg.reported { "" } else { "  (derived)" },
        );
    }
    println!();
}

// ── main ──────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.fps == 0 {
        bail!("--fps must be > 0");
    }
    let multiplier = SpeedMultiplier::new(args.speed)?;
    let config = load_config(args.config.as_deref())?;
    let (route, source) = load_route(&args)?;
    print_summary(&route, multiplier);

    // 1. Build the driver.
    let mut builder = PlaybackBuilder::new(route.clone())
        .multiplier(multiplier)
        .config(config)
        .camera_mode(args.mode);
    if args.geocode {
        builder = builder.geocoder(Arc::new(CoordinateGeocoder));
    }
    let mut driver = builder.build()?;

    // 2. Output.
    let recorder = match &args.out {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
            Some(FrameRecorder::new(CsvFrameWriter::new(dir)?, args.record_every))
        }
        None => None,
    };
    let mut obs = ConsoleObserver { recorder, frames: 0, last_frame: None, route };

    // 3. Run.
    let frame_secs = 1.0 / f64::from(args.fps);
    let t0 = Instant::now();
    let outcome = if args.realtime {
        let (_controls, rx) = control_channel();
        driver.play();
        let summary = run_realtime(
            &mut driver,
            source,
            &mut obs,
            Duration::from_secs_f64(frame_secs),
            rx,
        )
        .await?;
        summary.outcome
    } else {
        run_headless(&mut driver, &mut obs, frame_secs)?;
        RunOutcome::Completed
    };
    let wall = t0.elapsed();

    if let Some(rec) = &mut obs.recorder {
        rec.finish();
        if let Some(e) = rec.take_error() {
            eprintln!("output error: {e}");
        }
    }

    // 4. Summary.
    println!();
    println!("Playback {outcome:?} in {:.3} s wall time, {} frames", wall.as_secs_f64(), obs.frames);
    if let Some(f) = &obs.last_frame {
        println!(
            "  elapsed {}  |  progress {:.1}%  |  phase {}  |  waypoint {}",
            format_clock(f.elapsed),
            f.progress * 100.0,
            f.phase(),
            obs.stop_name(f.waypoint_index),
        );
        println!(
            "  camera {}  heading {:.1}°  tilt {:.1}°  zoom {:.2}",
            driver.camera_mode(),
            f.camera.heading,
            f.camera.tilt,
            f.camera.zoom,
        );
    }
    if let Some(dir) = &args.out {
        info!(dir = %dir.display(), "frames written");
    }
    Ok(())
}
