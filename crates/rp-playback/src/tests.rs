//! Unit tests for rp-playback.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use rp_core::{GeoPoint, RouteId, SpeedMultiplier, WaypointId};
use rp_motion::Phase;
use rp_route::{Path, Route, Waypoint, WaypointCategory};

use crate::{
    Frame, PlaybackBuilder, PlaybackDriver, PlaybackError, PlaybackObserver, RouteSource,
    SourceError, SourceResult,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn wp(seq: u32, name: &str, lng: f64, cat: WaypointCategory, arr: f64, dep: f64, km: f64) -> Waypoint {
    Waypoint {
        sequence:                 WaypointId(seq),
        name:                     Some(name.to_owned()),
        position:                 GeoPoint::new(0.0, lng),
        category:                 cat,
        arrival_time_seconds:     arr,
        departure_time_seconds:   dep,
        cumulative_distance_km:   km,
        segment_distance_km:      None,
        segment_duration_seconds: None,
        delivery_quantity:        None,
    }
}

/// Origin at t=0, Alpha 600–900 s, Bravo 1500–1800 s, return at 2400 s, on
/// a 41-sample out-and-back path along the equator.
fn three_stop_route() -> Route {
    use WaypointCategory::*;
    let waypoints = vec![
        wp(0, "Depot", 0.00, Origin,            0.0,    0.0,    0.0),
        wp(1, "Alpha", 0.01, DeliveryStop,      600.0,  900.0,  1.1),
        wp(2, "Bravo", 0.02, DeliveryStop,      1500.0, 1800.0, 2.2),
        wp(3, "Depot", 0.00, DestinationReturn, 2400.0, 2400.0, 4.4),
    ];
    let out: Vec<GeoPoint> = (0..=20).map(|i| GeoPoint::new(0.0, i as f64 * 0.001)).collect();
    let back = out.iter().rev().skip(1).copied();
    let path: Path = out.iter().copied().chain(back).collect();
    Route::new(RouteId(1), waypoints, path, None).unwrap()
}

/// Straight 2000-sample eastbound run, one second per sample at 1×.
fn long_route() -> Route {
    use WaypointCategory::*;
    let waypoints = vec![
        wp(0, "Depot", 0.0, Origin,            0.0,    0.0,    0.0),
        wp(1, "Yard",  2.0, DestinationReturn, 2000.0, 2000.0, 222.0),
    ];
    let path: Path = (0..=2000).map(|i| GeoPoint::new(0.0, i as f64 * 0.001)).collect();
    Route::new(RouteId(2), waypoints, path, None).unwrap()
}

fn x(n: f64) -> SpeedMultiplier {
    SpeedMultiplier::new(n).unwrap()
}

/// Three-stop route at 60×: 40 playback seconds.
fn driver() -> PlaybackDriver {
    PlaybackBuilder::new(three_stop_route()).multiplier(x(60.0)).build().unwrap()
}

#[derive(Default)]
struct Recorder {
    frames:    Vec<Frame>,
    phases:    Vec<(Option<Phase>, Phase)>,
    completes: usize,
    errors:    usize,
}

impl PlaybackObserver for Recorder {
    fn on_frame(&mut self, frame: &Frame) {
        self.frames.push(frame.clone());
    }

    fn on_phase_change(&mut self, from: Option<Phase>, to: Phase, _frame: &Frame) {
        self.phases.push((from, to));
    }

    fn on_complete(&mut self, _frame: &Frame) {
        self.completes += 1;
    }

    fn on_error(&mut self, _error: &PlaybackError) {
        self.errors += 1;
    }
}

/// Serves the three-stop route, or fails every fetch.
struct MockSource {
    fail: bool,
}

#[async_trait]
impl RouteSource for MockSource {
    async fn fetch(&self, _route_id: RouteId, _multiplier: SpeedMultiplier) -> SourceResult<Route> {
        if self.fail {
            Err(SourceError::Unavailable("routing service down".into()))
        } else {
            Ok(three_stop_route())
        }
    }
}

// ── Trail ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod trail {
    use proptest::prelude::*;

    use rp_core::GeoPoint;

    use crate::Trail;

    #[test]
    fn ignores_points_within_min_step() {
        let mut t = Trail::new(10, 5.0);
        assert!(t.push(GeoPoint::new(0.0, 0.0)));
        // ~1.1 m east.
        assert!(!t.push(GeoPoint::new(0.0, 0.00001)));
        // ~11 m east.
        assert!(t.push(GeoPoint::new(0.0, 0.0001)));
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn evicts_oldest_at_capacity() {
        let mut t = Trail::new(3, 5.0);
        for i in 0..5 {
            t.push(GeoPoint::new(0.0, i as f64 * 0.001));
        }
        assert_eq!(t.len(), 3);
        assert_eq!(t.to_vec()[0], GeoPoint::new(0.0, 0.002));
        assert_eq!(t.last(), Some(GeoPoint::new(0.0, 0.004)));
    }

    proptest! {
        #[test]
        fn never_exceeds_capacity(steps in prop::collection::vec(1u32..10, 1000)) {
            let mut t = Trail::new(200, 5.0);
            let mut lng = 0.0;
            for s in steps {
                // Each step is at least ~11 m.
                lng += s as f64 * 0.0001;
                prop_assert!(t.push(GeoPoint::new(0.0, lng)));
                prop_assert!(t.len() <= 200);
            }
            prop_assert_eq!(t.len(), 200);
        }
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use super::*;
    use crate::{PlaybackConfig, PlaybackStatus, StaticRouteSource};

    #[test]
    fn builds_stopped_at_zero() {
        let d = driver();
        assert_eq!(d.status(), PlaybackStatus::Stopped);
        assert_eq!(d.elapsed(), 0.0);
        assert_eq!(d.duration(), 40.0);
        assert!(d.trail().is_empty());
        assert!(d.geocoder().is_none());
    }

    #[test]
    fn rejects_invalid_config() {
        let config = PlaybackConfig { trail_capacity: 0, ..PlaybackConfig::default() };
        let result = PlaybackBuilder::new(three_stop_route()).config(config).build();
        assert!(matches!(result, Err(PlaybackError::Core(_))));
    }

    #[tokio::test]
    async fn fetch_from_source() {
        let source = StaticRouteSource::new(three_stop_route());
        let d = PlaybackBuilder::fetch(&source, RouteId(1), x(120.0))
            .await
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(d.multiplier(), x(120.0));
        assert_eq!(d.duration(), 20.0);
    }

    #[tokio::test]
    async fn fetch_unknown_route_fails() {
        let source = StaticRouteSource::new(three_stop_route());
        let result = PlaybackBuilder::fetch(&source, RouteId(99), x(1.0)).await;
        assert!(matches!(result, Err(PlaybackError::Source(SourceError::NotFound(_)))));
    }
}

// ── Controls ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod controls {
    use approx::assert_relative_eq;

    use super::*;
    use crate::{NoopObserver, PlaybackStatus};
    use rp_camera::{CameraConfig, CameraMode, normalize_heading};

    #[test]
    fn reset_is_idempotent() {
        let mut d = driver();
        d.play();
        for _ in 0..7 {
            d.tick(2.5, &mut NoopObserver);
        }
        assert!(!d.trail().is_empty());

        d.reset();
        let once = (d.status(), d.elapsed(), d.trail().len(), d.camera().state());
        d.reset();
        let twice = (d.status(), d.elapsed(), d.trail().len(), d.camera().state());

        assert_eq!(once, twice);
        assert_eq!(once.0, PlaybackStatus::Stopped);
        assert_eq!(once.1, 0.0);
        assert_eq!(once.2, 0);
    }

    #[test]
    fn pause_freezes_elapsed() {
        let mut d = driver();
        d.play();
        d.tick(3.0, &mut NoopObserver);
        d.pause();
        d.tick(3.0, &mut NoopObserver);
        assert_eq!(d.status(), PlaybackStatus::Paused);
        assert_eq!(d.elapsed(), 3.0);
        d.play();
        d.tick(1.0, &mut NoopObserver);
        assert_eq!(d.elapsed(), 4.0);
    }

    #[test]
    fn stopped_ticks_do_not_advance() {
        let mut d = driver();
        d.tick(5.0, &mut NoopObserver);
        assert_eq!(d.elapsed(), 0.0);
    }

    #[test]
    fn play_after_completion_restarts() {
        let mut d = driver();
        d.play();
        d.tick(100.0, &mut NoopObserver);
        assert!(d.is_complete());
        assert_eq!(d.status(), PlaybackStatus::Stopped);

        d.play();
        assert_eq!(d.status(), PlaybackStatus::Playing);
        assert_eq!(d.elapsed(), 0.0);
    }

    #[test]
    fn seek_clamps_and_clears_trail() {
        let mut d = driver();
        d.play();
        d.tick(5.0, &mut NoopObserver);
        d.seek(1e9);
        assert_eq!(d.elapsed(), 40.0);
        assert!(d.trail().is_empty());
        d.seek(-3.0);
        assert_eq!(d.elapsed(), 0.0);
        d.seek(f64::NAN);
        assert_eq!(d.elapsed(), 0.0);
    }

    #[test]
    fn camera_mode_switch_snaps() {
        let mut d = driver();
        d.seek(16.0);
        d.tick(0.016, &mut NoopObserver);

        d.set_camera_mode(CameraMode::Chase);
        let f = d.tick(0.016, &mut NoopObserver);
        assert_eq!(d.camera_mode(), CameraMode::Chase);
        assert_relative_eq!(f.camera.tilt, CameraConfig::default().chase_tilt);
        assert_relative_eq!(f.camera.heading, normalize_heading(f.vehicle.heading));
        assert_eq!(f.camera.center, f.vehicle.position);
    }

    #[test]
    fn closed_driver_ignores_play() {
        let mut d = driver();
        d.close();
        d.play();
        assert_eq!(d.status(), PlaybackStatus::Stopped);
        assert!(matches!(d.begin_speed_change(2.0), Err(PlaybackError::Closed)));
    }
}

// ── Ticking ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod ticking {
    use approx::assert_relative_eq;

    use super::*;
    use crate::{NoopObserver, PlaybackStatus};

    #[test]
    fn servicing_and_transit_at_scaled_times() {
        let mut d = driver();

        d.seek(10.0);
        let f = d.tick(0.0, &mut NoopObserver);
        assert_eq!(f.phase(), Phase::Servicing);
        assert_eq!(f.waypoint_index, 1);
        assert_eq!(f.vehicle.speed_kmh, 0.0);

        d.seek(16.0);
        let f = d.tick(0.0, &mut NoopObserver);
        assert_eq!(f.phase(), Phase::Transit);
        assert_eq!(f.next_waypoint_index, Some(2));
        assert_relative_eq!(f.segment_progress, 0.1, epsilon = 1e-9);
    }

    #[test]
    fn auto_stops_on_exact_end() {
        let mut d = driver();
        let mut rec = Recorder::default();
        d.play();

        let mut last = d.tick(0.0, &mut rec);
        for _ in 0..1000 {
            last = d.tick(0.7, &mut rec);
            if last.finished {
                break;
            }
        }

        assert!(last.finished);
        assert_eq!(last.elapsed, 40.0);
        assert_eq!(last.progress, 1.0);
        assert_eq!(last.status, PlaybackStatus::Stopped);
        assert_eq!(last.phase(), Phase::Complete);
        assert_eq!(last.waypoint_index, 3);
        assert_eq!(last.next_waypoint_index, None);
        assert_eq!(last.vehicle.distance_remaining_km, None);
        assert_eq!(last.vehicle.eta_secs, None);
        assert_eq!(rec.completes, 1);

        // Further ticks stay put and do not complete again.
        d.tick(0.7, &mut rec);
        assert_eq!(d.elapsed(), 40.0);
        assert_eq!(rec.completes, 1);
    }

    #[test]
    fn phase_changes_follow_schedule() {
        let mut d = driver();
        let mut rec = Recorder::default();
        crate::run_headless(&mut d, &mut rec, 1.0).unwrap();

        use Phase::*;
        assert_eq!(
            rec.phases,
            vec![
                (None, Transit),
                (Some(Transit), Servicing),
                (Some(Servicing), Transit),
                (Some(Transit), Servicing),
                (Some(Servicing), Transit),
                (Some(Transit), Complete),
            ]
        );
    }

    #[test]
    fn transit_label_falls_back_to_next_stop() {
        let mut d = driver();
        d.seek(16.0);
        let f = d.tick(0.0, &mut NoopObserver);
        assert_eq!(f.label.as_deref(), Some("En route to Bravo"));

        d.seek(12.0);
        let f = d.tick(0.0, &mut NoopObserver);
        assert_eq!(f.label, None);
    }

    #[test]
    fn trail_grows_only_in_transit() {
        let mut d = driver();
        d.seek(11.0);
        d.play();
        for _ in 0..3 {
            d.tick(1.0, &mut NoopObserver);
        }
        assert!(d.trail().is_empty(), "servicing Alpha until 15 s");
        for _ in 0..3 {
            d.tick(1.0, &mut NoopObserver);
        }
        assert!(!d.trail().is_empty());
    }

    #[test]
    fn trail_capped_over_long_run() {
        let mut d = PlaybackBuilder::new(long_route()).build().unwrap();
        let cap = d.config().trail_capacity;
        d.play();
        for _ in 0..1000 {
            let f = d.tick(1.0, &mut NoopObserver);
            assert!(f.trail.len() <= cap);
        }
        assert_eq!(d.trail().len(), cap);
    }

    #[test]
    fn empty_path_renders_static_markers() {
        let r = three_stop_route();
        let bare = Route::new(r.route_id(), r.waypoints().to_vec(), Path::empty(), None).unwrap();
        let mut d = PlaybackBuilder::new(bare).multiplier(x(60.0)).build().unwrap();

        d.seek(10.0);
        let f = d.tick(0.0, &mut NoopObserver);
        assert_eq!(f.vehicle.position, GeoPoint::new(0.0, 0.01));
        assert_eq!(f.vehicle.path_index, None);

        let mut rec = Recorder::default();
        let frames = crate::run_headless(&mut d, &mut rec, 1.0).unwrap();
        assert!(frames > 0);
        assert!(rec.frames.iter().all(|f| f.vehicle.heading.is_finite()));
        assert!(rec.frames.iter().all(|f| f.camera.zoom.is_finite()));
    }

    #[test]
    fn nonsense_wall_delta_is_ignored() {
        let mut d = driver();
        d.play();
        d.tick(f64::NAN, &mut NoopObserver);
        d.tick(-4.0, &mut NoopObserver);
        d.tick(f64::INFINITY, &mut NoopObserver);
        assert_eq!(d.elapsed(), 0.0);
    }
}

// ── Speed changes ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod speed_change {
    use super::*;
    use crate::{NoopObserver, PlaybackStatus, StaticRouteSource};

    #[test]
    fn refetch_rewinds_and_resumes() {
        let mut d = driver();
        d.play();
        d.tick(5.0, &mut NoopObserver);

        let t = d.begin_speed_change(120.0).unwrap();
        assert_eq!(d.status(), PlaybackStatus::Paused);
        assert!(d.is_refetching());

        // Paused while the fetch is in flight.
        d.tick(1.0, &mut NoopObserver);
        assert_eq!(d.elapsed(), 5.0);

        d.complete_speed_change(t, Ok(three_stop_route())).unwrap();
        assert!(!d.is_refetching());
        assert_eq!(d.status(), PlaybackStatus::Playing);
        assert_eq!(d.elapsed(), 0.0);
        assert_eq!(d.multiplier(), x(120.0));
        assert_eq!(d.duration(), 20.0);
    }

    #[test]
    fn stopped_playback_stays_stopped() {
        let mut d = driver();
        let t = d.begin_speed_change(120.0).unwrap();
        d.complete_speed_change(t, Ok(three_stop_route())).unwrap();
        assert_eq!(d.status(), PlaybackStatus::Stopped);
    }

    #[test]
    fn superseded_fetch_is_dropped() {
        let mut d = driver();
        d.play();
        let first = d.begin_speed_change(120.0).unwrap();
        let second = d.begin_speed_change(240.0).unwrap();

        let stale = d.complete_speed_change(first, Ok(three_stop_route()));
        assert!(matches!(stale, Err(PlaybackError::StaleFetch { .. })));
        assert!(d.is_refetching());
        assert_eq!(d.multiplier(), x(60.0));

        d.complete_speed_change(second, Ok(three_stop_route())).unwrap();
        assert_eq!(d.multiplier(), x(240.0));
        assert_eq!(d.status(), PlaybackStatus::Playing);
    }

    #[test]
    fn failed_fetch_keeps_route_and_stops() {
        let mut d = driver();
        d.play();
        d.tick(5.0, &mut NoopObserver);

        let t = d.begin_speed_change(120.0).unwrap();
        let err = d.complete_speed_change(t, Err(SourceError::Unavailable("down".into())));
        assert!(matches!(err, Err(PlaybackError::Source(_))));
        assert_eq!(d.status(), PlaybackStatus::Stopped);
        assert_eq!(d.multiplier(), x(60.0));
        assert_eq!(d.elapsed(), 5.0);
        assert!(!d.is_refetching());
    }

    #[test]
    fn invalid_multiplier_changes_nothing() {
        let mut d = driver();
        d.play();
        for n in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(d.begin_speed_change(n), Err(PlaybackError::Core(_))));
        }
        assert_eq!(d.status(), PlaybackStatus::Playing);
        assert!(!d.is_refetching());
    }

    #[test]
    fn pause_during_refetch_cancels_resume() {
        let mut d = driver();
        d.play();
        let t = d.begin_speed_change(120.0).unwrap();
        d.pause();
        d.complete_speed_change(t, Ok(three_stop_route())).unwrap();
        assert_eq!(d.status(), PlaybackStatus::Stopped);
    }

    #[test]
    fn play_during_refetch_arms_resume() {
        let mut d = driver();
        let t = d.begin_speed_change(120.0).unwrap();
        d.play();
        assert_ne!(d.status(), PlaybackStatus::Playing);
        d.complete_speed_change(t, Ok(three_stop_route())).unwrap();
        assert_eq!(d.status(), PlaybackStatus::Playing);
    }

    #[tokio::test]
    async fn async_speed_change_through_source() {
        let source = StaticRouteSource::new(three_stop_route());
        let mut d = driver();
        d.play();
        d.set_speed_multiplier(&source, 300.0).await.unwrap();
        assert_eq!(d.multiplier(), x(300.0));
        assert_eq!(d.duration(), 8.0);
        assert_eq!(d.status(), PlaybackStatus::Playing);
    }

    #[tokio::test]
    async fn async_speed_change_failure_surfaces() {
        let mut d = driver();
        let result = d.set_speed_multiplier(&MockSource { fail: true }, 300.0).await;
        assert!(matches!(result, Err(PlaybackError::Source(SourceError::Unavailable(_)))));
        assert_eq!(d.multiplier(), x(60.0));
    }
}

// ── Runners ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod runner {
    use super::*;
    use crate::{
        NoopObserver, PlaybackStatus, RunOutcome, control_channel, run_headless, run_realtime,
    };
    use rp_camera::CameraMode;

    #[test]
    fn headless_renders_every_step() {
        let mut d = driver();
        let mut rec = Recorder::default();
        let frames = run_headless(&mut d, &mut rec, 1.0).unwrap();
        // Initial frame plus one per second of a 40 s replay.
        assert_eq!(frames, 41);
        assert_eq!(rec.frames.len(), 41);
        assert_eq!(rec.completes, 1);
        assert!(d.is_complete());
    }

    #[test]
    fn headless_rejects_bad_step() {
        let mut d = driver();
        for dt in [0.0, -1.0, f64::NAN] {
            assert!(matches!(
                run_headless(&mut d, &mut NoopObserver, dt),
                Err(PlaybackError::InvalidStep(_))
            ));
        }
    }

    #[test]
    fn headless_refuses_during_refetch() {
        let mut d = driver();
        d.begin_speed_change(2.0).unwrap();
        assert!(matches!(
            run_headless(&mut d, &mut NoopObserver, 1.0),
            Err(PlaybackError::RefetchInProgress)
        ));
    }

    #[tokio::test]
    async fn realtime_runs_to_completion() {
        // 2400 s at 4800× is half a second of playback.
        let mut d = PlaybackBuilder::new(three_stop_route()).multiplier(x(4800.0)).build().unwrap();
        d.play();
        let (_controls, rx) = control_channel();
        let source: Arc<dyn RouteSource> = Arc::new(MockSource { fail: false });
        let mut rec = Recorder::default();

        let summary = run_realtime(&mut d, source, &mut rec, Duration::from_millis(5), rx)
            .await
            .unwrap();

        assert_eq!(summary.outcome, RunOutcome::Completed);
        assert_eq!(summary.elapsed, 0.5);
        assert!(summary.frames > 1);
        assert_eq!(rec.completes, 1);
        assert_eq!(d.status(), PlaybackStatus::Stopped);
    }

    #[tokio::test]
    async fn realtime_close_cancels() {
        let mut d = driver();
        d.play();
        let (controls, rx) = control_channel();
        controls.close();
        let source: Arc<dyn RouteSource> = Arc::new(MockSource { fail: false });

        let summary = run_realtime(&mut d, source, &mut NoopObserver, Duration::from_millis(5), rx)
            .await
            .unwrap();

        assert_eq!(summary.outcome, RunOutcome::Closed);
        assert!(d.is_closed());
        assert!(!controls.play(), "loop has exited");
    }

    #[tokio::test]
    async fn realtime_applies_commands_and_refetches() {
        let mut d = driver();
        d.play();
        let (controls, rx) = control_channel();
        controls.set_camera_mode(CameraMode::Cinematic);
        controls.set_speed_multiplier(120.0);

        let closer = controls.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            closer.close();
        });

        let source: Arc<dyn RouteSource> = Arc::new(MockSource { fail: false });
        let summary = run_realtime(&mut d, source, &mut NoopObserver, Duration::from_millis(5), rx)
            .await
            .unwrap();

        assert_eq!(summary.outcome, RunOutcome::Closed);
        assert_eq!(d.camera_mode(), CameraMode::Cinematic);
        assert_eq!(d.multiplier(), x(120.0));
    }

    #[tokio::test]
    async fn realtime_reports_fetch_failure() {
        let mut d = driver();
        d.play();
        let (controls, rx) = control_channel();
        controls.set_speed_multiplier(120.0);

        let closer = controls.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            closer.close();
        });

        let source: Arc<dyn RouteSource> = Arc::new(MockSource { fail: true });
        let mut rec = Recorder::default();
        run_realtime(&mut d, source, &mut rec, Duration::from_millis(5), rx)
            .await
            .unwrap();

        assert_eq!(rec.errors, 1);
        assert_eq!(d.multiplier(), x(60.0));
    }
}

// ── Sources ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod source {
    use std::io::Write;

    use super::*;
    use crate::JsonFileRouteSource;

    fn write_route(route: &Route) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&route.to_document()).unwrap();
        f.write_all(json.as_bytes()).unwrap();
        f.flush().unwrap();
        f
    }

    #[tokio::test]
    async fn json_file_source_reads_route() {
        let file = write_route(&three_stop_route());
        let source = JsonFileRouteSource::new(file.path());
        let route = source.fetch(RouteId(1), x(60.0)).await.unwrap();
        assert_eq!(route.waypoint_count(), 4);
        assert_eq!(route.path().len(), 41);
    }

    #[tokio::test]
    async fn json_file_source_checks_route_id() {
        let file = write_route(&three_stop_route());
        let source = JsonFileRouteSource::new(file.path());
        let err = source.fetch(RouteId(5), x(60.0)).await.unwrap_err();
        assert!(matches!(err, SourceError::NotFound(RouteId(5))));
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonFileRouteSource::new(dir.path().join("nope.json"));
        let err = source.fetch(RouteId(1), x(1.0)).await.unwrap_err();
        assert!(matches!(err, SourceError::Io(_)));
    }
}
