//! The playback driver: the only thing that mutates playback state.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, trace, warn};

use rp_camera::{CameraController, CameraInput, CameraMode};
use rp_core::{RouteId, SpeedMultiplier};
use rp_geocode::{GeocodeDispatcher, Geocoder};
use rp_motion::{MotionEngine, Phase, VehicleState};
use rp_route::Route;

use crate::{
    Frame, PlaybackConfig, PlaybackError, PlaybackObserver, PlaybackResult, RouteSource,
    SourceResult, Trail,
};

// ── Status ────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PlaybackStatus {
    #[default]
    Stopped,
    Playing,
    Paused,
}

impl PlaybackStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PlaybackStatus::Stopped => "stopped",
            PlaybackStatus::Playing => "playing",
            PlaybackStatus::Paused  => "paused",
        }
    }
}

impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Speed change bookkeeping ──────────────────────────────────────────────────

/// Handed out by [`PlaybackDriver::begin_speed_change`]; identifies which
/// fetch a result belongs to.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpeedChangeTicket {
    pub generation: u64,
    pub route_id:   RouteId,
    pub multiplier: SpeedMultiplier,
}

#[derive(Copy, Clone, Debug)]
struct PendingFetch {
    generation: u64,
    multiplier: SpeedMultiplier,
    resume:     bool,
}

// ── PlaybackDriver ────────────────────────────────────────────────────────────

/// Owns the playback state for one route view and advances it per tick.
///
/// Create via [`PlaybackBuilder`][crate::PlaybackBuilder].
pub struct PlaybackDriver {
    config:       PlaybackConfig,
    engine:       MotionEngine,
    status:       PlaybackStatus,
    /// Playback seconds, `[0, effective_total_duration]`.
    elapsed:      f64,
    last_heading: f64,
    last_phase:   Option<Phase>,
    trail:        Trail,
    camera:       CameraController,
    geocode:      Option<GeocodeDispatcher>,
    /// Wall-clock seconds since the view opened; drives the cinematic sway.
    wall_secs:    f64,
    generation:   u64,
    pending:      Option<PendingFetch>,
    closed:       bool,
}

impl PlaybackDriver {
    pub(crate) fn new(
        route:      Route,
        multiplier: SpeedMultiplier,
        config:     PlaybackConfig,
        mode:       CameraMode,
        geocoder:   Option<Arc<dyn Geocoder>>,
    ) -> Self {
        let engine  = MotionEngine::new(route, multiplier, config.motion.clone());
        let trail   = Trail::new(config.trail_capacity, config.trail_min_step_m);
        let camera  = CameraController::new(mode, config.camera.clone());
        let geocode = geocoder.map(|g| {
            GeocodeDispatcher::new(g, config.geocode_bucket_size, config.geocode_cache_capacity)
        });

        let mut driver = Self {
            config,
            engine,
            status: PlaybackStatus::Stopped,
            elapsed: 0.0,
            last_heading: 0.0,
            last_phase: None,
            trail,
            camera,
            geocode,
            wall_secs: 0.0,
            generation: 0,
            pending: None,
            closed: false,
        };
        driver.rewind();
        info!(
            route = %driver.route().route_id(),
            waypoints = driver.route().waypoint_count(),
            path_samples = driver.route().path().len(),
            %multiplier,
            duration = driver.duration(),
            "route loaded"
        );
        driver
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Effective total duration in playback seconds.
    pub fn duration(&self) -> f64 {
        self.engine.timeline().effective_total_duration()
    }

    pub fn progress(&self) -> f64 {
        self.engine.timeline().progress_fraction(self.elapsed)
    }

    pub fn multiplier(&self) -> SpeedMultiplier {
        self.engine.timeline().multiplier()
    }

    pub fn route(&self) -> &Route {
        self.engine.route()
    }

    pub fn engine(&self) -> &MotionEngine {
        &self.engine
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn camera_mode(&self) -> CameraMode {
        self.camera.mode()
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub fn geocoder(&self) -> Option<&GeocodeDispatcher> {
        self.geocode.as_ref()
    }

    /// `true` once elapsed has reached the end of the route.
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration()
    }

    /// `true` between `begin_speed_change` and its matching completion.
    pub fn is_refetching(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    // ── Controls ──────────────────────────────────────────────────────────

    /// Start or resume.  On a completed route, restarts from the beginning.
    /// While a speed change is in flight, only arms the resume.
    pub fn play(&mut self) {
        if self.closed {
            return;
        }
        if let Some(p) = &mut self.pending {
            p.resume = true;
            return;
        }
        if self.is_complete() {
            self.rewind();
        }
        self.status = PlaybackStatus::Playing;
    }

    pub fn pause(&mut self) {
        if let Some(p) = &mut self.pending {
            p.resume = false;
        }
        if self.status == PlaybackStatus::Playing {
            self.status = PlaybackStatus::Paused;
        }
    }

    /// Stop, rewind to 0, clear the trail, and snap the camera to the
    /// start-of-route framing.
    pub fn reset(&mut self) {
        self.status = PlaybackStatus::Stopped;
        if let Some(p) = &mut self.pending {
            p.resume = false;
        }
        self.rewind();
    }

    /// Switch camera mode; the next frame snaps to the new framing.
    pub fn set_camera_mode(&mut self, mode: CameraMode) {
        if mode != self.camera.mode() {
            debug!(from = %self.camera.mode(), to = %mode, "camera mode switch");
        }
        self.camera.set_mode(mode);
    }

    /// Jump to `elapsed` playback seconds (clamped to the route).  The trail
    /// is cleared since the vehicle did not drive the gap.
    pub fn seek(&mut self, elapsed: f64) {
        let elapsed = if elapsed.is_nan() { 0.0 } else { elapsed };
        self.elapsed = elapsed.clamp(0.0, self.duration());
        self.trail.clear();
    }

    /// Stop rendering for good: abandons geocode lookups and any pending
    /// speed change.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.status = PlaybackStatus::Stopped;
        self.pending = None;
        self.generation += 1;
        if let Some(g) = &mut self.geocode {
            g.close();
        }
        debug!(route = %self.route().route_id(), "playback view closed");
    }

    // ── Speed changes ─────────────────────────────────────────────────────

    /// First half of a speed change: validate `n`, force `Paused`, and
    /// return the ticket the fetch result must be delivered with.
    ///
    /// A second call before completion supersedes the first; the earlier
    /// ticket becomes stale.
    pub fn begin_speed_change(&mut self, n: f64) -> PlaybackResult<SpeedChangeTicket> {
        if self.closed {
            return Err(PlaybackError::Closed);
        }
        let multiplier = SpeedMultiplier::new(n)?;
        let resume = match self.pending {
            Some(p) => p.resume,
            None    => self.status == PlaybackStatus::Playing,
        };

        self.generation += 1;
        if self.status == PlaybackStatus::Playing {
            self.status = PlaybackStatus::Paused;
        }
        self.pending = Some(PendingFetch { generation: self.generation, multiplier, resume });

        info!(from = %self.multiplier(), to = %multiplier, resume, "speed change requested");
        Ok(SpeedChangeTicket {
            generation: self.generation,
            route_id:   self.route().route_id(),
            multiplier,
        })
    }

    /// Second half of a speed change.
    ///
    /// On success the route is replaced, elapsed rewinds to 0, geocoded
    /// labels are discarded, and playback resumes if it was active.  On
    /// failure the previous route is kept, playback is `Stopped`, and the
    /// source error is returned.  Results for superseded tickets are
    /// dropped with [`PlaybackError::StaleFetch`].
    pub fn complete_speed_change(
        &mut self,
        ticket: SpeedChangeTicket,
        result: SourceResult<Route>,
    ) -> PlaybackResult<()> {
        if self.closed {
            return Err(PlaybackError::Closed);
        }
        let pending = match self.pending {
            Some(p) if p.generation == ticket.generation => p,
            _ => {
                debug!(got = ticket.generation, current = self.generation, "dropping stale route fetch");
                return Err(PlaybackError::StaleFetch {
                    got:     ticket.generation,
                    current: self.generation,
                });
            }
        };
        self.pending = None;

        match result {
            Ok(route) => {
                self.engine = MotionEngine::new(route, pending.multiplier, self.config.motion.clone());
                if let Some(g) = &mut self.geocode {
                    g.invalidate();
                }
                self.rewind();
                self.status = if pending.resume {
                    PlaybackStatus::Playing
                } else {
                    PlaybackStatus::Stopped
                };
                info!(
                    route = %self.route().route_id(),
                    multiplier = %pending.multiplier,
                    duration = self.duration(),
                    resumed = pending.resume,
                    "route refetched"
                );
                Ok(())
            }
            Err(e) => {
                self.status = PlaybackStatus::Stopped;
                warn!(
                    route = %ticket.route_id,
                    multiplier = %pending.multiplier,
                    error = %e,
                    "route refetch failed; keeping previous route"
                );
                Err(e.into())
            }
        }
    }

    /// Fetch the route at multiplier `n` from `source` and swap it in.
    pub async fn set_speed_multiplier<S>(&mut self, source: &S, n: f64) -> PlaybackResult<()>
    where
        S: RouteSource + ?Sized,
    {
        let ticket = self.begin_speed_change(n)?;
        let result = source.fetch(ticket.route_id, ticket.multiplier).await;
        self.complete_speed_change(ticket, result)
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance by `wall_dt` seconds of wall-clock time and render a frame.
    ///
    /// Elapsed only advances while `Playing`; paused and stopped ticks still
    /// render so the camera keeps easing.
    pub fn tick<O>(&mut self, wall_dt: f64, observer: &mut O) -> Frame
    where
        O: PlaybackObserver + ?Sized,
    {
        let dt = if wall_dt.is_finite() && wall_dt > 0.0 { wall_dt } else { 0.0 };
        self.wall_secs += dt;

        let mut finished = false;
        if self.status == PlaybackStatus::Playing {
            let total = self.duration();
            self.elapsed += dt;
            if self.elapsed >= total {
                self.elapsed = total;
                self.status = PlaybackStatus::Stopped;
                finished = true;
            }
        }

        let (res, vehicle) = self.engine.state_at(self.elapsed, self.last_heading);
        self.last_heading = vehicle.heading;

        let in_transit = vehicle.phase == Phase::Transit;
        if in_transit {
            self.trail.push(vehicle.position);
        }
        let label = self.label(&vehicle, res.next_waypoint_index);
        let input = self.camera_input(&vehicle);
        let camera = self.camera.update(&input, dt);

        let frame = Frame {
            elapsed:             self.elapsed,
            progress:            self.progress(),
            status:              self.status,
            waypoint_index:      res.waypoint_index,
            next_waypoint_index: res.next_waypoint_index,
            segment_progress:    res.segment_progress,
            vehicle,
            camera,
            trail:               self.trail.to_vec(),
            label,
            finished,
        };
        trace!(
            elapsed = frame.elapsed,
            phase = %frame.phase(),
            waypoint = frame.waypoint_index,
            "frame"
        );

        let previous = self.last_phase.replace(vehicle.phase);
        if previous != Some(vehicle.phase) {
            observer.on_phase_change(previous, vehicle.phase, &frame);
        }
        observer.on_frame(&frame);
        if finished {
            info!(route = %self.route().route_id(), elapsed = frame.elapsed, "playback complete");
            observer.on_complete(&frame);
        }
        frame
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Rewind to 0 and re-frame the camera without touching `status`.
    fn rewind(&mut self) {
        self.elapsed = 0.0;
        self.trail.clear();
        self.last_phase = None;
        self.last_heading = self.engine.initial_heading();
        let (_, vehicle) = self.engine.state_at(0.0, self.last_heading);
        let input = self.camera_input(&vehicle);
        self.camera.snap(&input);
    }

    fn camera_input(&self, vehicle: &VehicleState) -> CameraInput {
        CameraInput {
            position:        vehicle.position,
            vehicle_heading: vehicle.heading,
            is_stationary:   vehicle.is_stationary(),
            wall_secs:       self.wall_secs,
        }
    }

    /// Transit-only street label.  Polls finished lookups, requests the
    /// current bucket, and falls back to the next stop's name.
    fn label(&mut self, vehicle: &VehicleState, next: Option<usize>) -> Option<String> {
        if vehicle.phase != Phase::Transit {
            return None;
        }
        let fallback = || {
            next.map(|n| format!("En route to {}", self.engine.route().waypoint(n).display_name()))
        };

        let (Some(geocode), Some(idx)) = (self.geocode.as_mut(), vehicle.path_index) else {
            return fallback();
        };
        geocode.poll();
        geocode.request(idx, vehicle.position);
        match geocode.label_for(idx) {
            Some(l) => Some(l.to_owned()),
            None    => fallback(),
        }
    }
}

impl fmt::Debug for PlaybackDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackDriver")
            .field("route", &self.route().route_id())
            .field("status", &self.status)
            .field("elapsed", &self.elapsed)
            .field("multiplier", &self.multiplier())
            .field("camera_mode", &self.camera.mode())
            .field("trail_len", &self.trail.len())
            .field("refetching", &self.pending.is_some())
            .field("closed", &self.closed)
            .finish()
    }
}
