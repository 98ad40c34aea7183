//! Frame loops: real-time (tokio) and headless (fixed step).

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use rp_camera::CameraMode;
use rp_route::Route;

use crate::{
    PlaybackDriver, PlaybackError, PlaybackObserver, PlaybackResult, PlaybackStatus, RouteSource,
    SourceResult, SpeedChangeTicket,
};

// ── Control surface ───────────────────────────────────────────────────────────

/// A UI action delivered to the real-time loop.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum PlaybackCommand {
    Play,
    Pause,
    Reset,
    Seek(f64),
    SetCameraMode(CameraMode),
    /// Triggers an asynchronous refetch at the new multiplier.
    SetSpeed(f64),
}

/// The UI's end of the control channel.  Dropping it closes the view.
#[derive(Clone, Debug)]
pub struct PlaybackControls {
    commands: mpsc::UnboundedSender<PlaybackCommand>,
    close:    Arc<watch::Sender<bool>>,
}

impl PlaybackControls {
    /// Queue a command.  `false` if the loop has exited.
    pub fn send(&self, cmd: PlaybackCommand) -> bool {
        self.commands.send(cmd).is_ok()
    }

    pub fn play(&self) -> bool {
        self.send(PlaybackCommand::Play)
    }

    pub fn pause(&self) -> bool {
        self.send(PlaybackCommand::Pause)
    }

    pub fn reset(&self) -> bool {
        self.send(PlaybackCommand::Reset)
    }

    pub fn seek(&self, elapsed: f64) -> bool {
        self.send(PlaybackCommand::Seek(elapsed))
    }

    pub fn set_camera_mode(&self, mode: CameraMode) -> bool {
        self.send(PlaybackCommand::SetCameraMode(mode))
    }

    pub fn set_speed_multiplier(&self, n: f64) -> bool {
        self.send(PlaybackCommand::SetSpeed(n))
    }

    /// Ask the loop to cancel its next frame and shut down.
    pub fn close(&self) {
        self.close.send_replace(true);
    }
}

/// The loop's end of the control channel.
#[derive(Debug)]
pub struct ControlReceiver {
    commands: mpsc::UnboundedReceiver<PlaybackCommand>,
    close:    watch::Receiver<bool>,
}

pub fn control_channel() -> (PlaybackControls, ControlReceiver) {
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (close_tx, close_rx) = watch::channel(false);
    (
        PlaybackControls { commands: cmd_tx, close: Arc::new(close_tx) },
        ControlReceiver { commands: cmd_rx, close: close_rx },
    )
}

// ── Outcome ───────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RunOutcome {
    /// Playback reached the end of the route.
    Completed,
    /// The view was closed first.
    Closed,
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct RunSummary {
    pub outcome: RunOutcome,
    pub frames:  u64,
    /// Playback seconds at exit.
    pub elapsed: f64,
}

// ── Real-time loop ────────────────────────────────────────────────────────────

/// Drive `driver` from a tokio interval until the route completes or the
/// view is closed.
///
/// Each frame advances by the measured wall-clock delta since the previous
/// one.  Speed changes are fetched from `source` on a spawned task; their
/// results come back through the loop and are applied between frames, so
/// the driver never interpolates against a half-swapped route.  Fetch
/// failures are reported via [`PlaybackObserver::on_error`] and do not end
/// the loop.
pub async fn run_realtime<O>(
    driver:         &mut PlaybackDriver,
    source:         Arc<dyn RouteSource>,
    observer:       &mut O,
    frame_interval: Duration,
    controls:       ControlReceiver,
) -> PlaybackResult<RunSummary>
where
    O: PlaybackObserver + ?Sized,
{
    let ControlReceiver { mut commands, mut close } = controls;
    let (fetch_tx, mut fetch_rx) = mpsc::unbounded_channel::<(SpeedChangeTicket, SourceResult<Route>)>();
    let mut fetches: Vec<JoinHandle<()>> = Vec::new();

    let mut ticker = tokio::time::interval(frame_interval.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last = Instant::now();
    let mut frames = 0u64;

    info!(
        route = %driver.route().route_id(),
        interval_ms = frame_interval.as_millis() as u64,
        "real-time playback started"
    );

    let outcome = loop {
        if *close.borrow() || driver.is_closed() {
            break RunOutcome::Closed;
        }

        tokio::select! {
            changed = close.changed() => {
                // A dropped sender means the UI is gone.
                if changed.is_err() || *close.borrow() {
                    break RunOutcome::Closed;
                }
            }
            Some(cmd) = commands.recv() => {
                apply_command(driver, &source, observer, cmd, &fetch_tx, &mut fetches);
            }
            Some((ticket, result)) = fetch_rx.recv() => {
                match driver.complete_speed_change(ticket, result) {
                    Ok(()) => {}
                    Err(PlaybackError::StaleFetch { .. }) => {}
                    Err(e) => observer.on_error(&e),
                }
            }
            now = ticker.tick() => {
                let dt = now.saturating_duration_since(last).as_secs_f64();
                last = now;
                let frame = driver.tick(dt, observer);
                frames += 1;
                if frame.finished {
                    break RunOutcome::Completed;
                }
            }
        }
        fetches.retain(|h| !h.is_finished());
    };

    for h in fetches {
        h.abort();
    }
    if outcome == RunOutcome::Closed {
        driver.close();
    }
    info!(?outcome, frames, elapsed = driver.elapsed(), "real-time playback ended");
    Ok(RunSummary { outcome, frames, elapsed: driver.elapsed() })
}

fn apply_command<O>(
    driver:   &mut PlaybackDriver,
    source:   &Arc<dyn RouteSource>,
    observer: &mut O,
    cmd:      PlaybackCommand,
    fetch_tx: &mpsc::UnboundedSender<(SpeedChangeTicket, SourceResult<Route>)>,
    fetches:  &mut Vec<JoinHandle<()>>,
) where
    O: PlaybackObserver + ?Sized,
{
    debug!(?cmd, "playback command");
    match cmd {
        PlaybackCommand::Play              => driver.play(),
        PlaybackCommand::Pause             => driver.pause(),
        PlaybackCommand::Reset             => driver.reset(),
        PlaybackCommand::Seek(t)           => driver.seek(t),
        PlaybackCommand::SetCameraMode(m)  => driver.set_camera_mode(m),
        PlaybackCommand::SetSpeed(n) => match driver.begin_speed_change(n) {
            Ok(ticket) => {
                let source = Arc::clone(source);
                let tx = fetch_tx.clone();
                fetches.push(tokio::spawn(async move {
                    let result = source.fetch(ticket.route_id, ticket.multiplier).await;
                    // The loop may have exited; nothing to deliver to then.
                    let _ = tx.send((ticket, result));
                }));
            }
            Err(e) => {
                warn!(error = %e, "speed change rejected");
                observer.on_error(&e);
            }
        },
    }
}

// ── Headless loop ─────────────────────────────────────────────────────────────

/// Play the route from its current position to the end in fixed steps of
/// `dt` playback-seconds-per-frame, without sleeping.
///
/// Starts playback if it is not already running (restarting a completed
/// route).  Returns the number of frames rendered.
pub fn run_headless<O>(driver: &mut PlaybackDriver, observer: &mut O, dt: f64) -> PlaybackResult<u64>
where
    O: PlaybackObserver + ?Sized,
{
    if !(dt.is_finite() && dt > 0.0) {
        return Err(PlaybackError::InvalidStep(dt));
    }
    if driver.is_closed() {
        return Err(PlaybackError::Closed);
    }
    if driver.is_refetching() {
        return Err(PlaybackError::RefetchInProgress);
    }

    driver.play();
    let mut frames = 0u64;
    // Initial frame at the starting position.
    let mut frame = driver.tick(0.0, observer);
    frames += 1;
    while !frame.finished && driver.status() == PlaybackStatus::Playing {
        frame = driver.tick(dt, observer);
        frames += 1;
    }
    Ok(frames)
}
