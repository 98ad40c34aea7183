//! `rp-playback` — the playback driver and its frame loop.
//!
//! # State machine
//!
//! ```text
//!            play()             pause()
//! Stopped ─────────► Playing ◄────────► Paused
//!    ▲                  │
//!    └── end reached ───┘      (reset() → Stopped from anywhere)
//! ```
//!
//! While `Playing`, each [`tick`](PlaybackDriver::tick) advances elapsed
//! playback time by the measured wall-clock delta.  Reaching the effective
//! total duration clamps elapsed to exactly that value, renders one final
//! frame there, and stops.
//!
//! # Speed changes
//!
//! Per-leg segment values depend on the speed multiplier the route was
//! fetched for, so a new multiplier means a new route document.  The driver
//! handles this in two phases:
//!
//! 1. [`begin_speed_change`](PlaybackDriver::begin_speed_change) forces
//!    `Paused`, remembers whether to resume, and hands out a ticket.
//! 2. [`complete_speed_change`](PlaybackDriver::complete_speed_change)
//!    accepts the fetched route only for the newest ticket, rebuilds the
//!    motion engine, rewinds to 0, and resumes if playback was active.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`driver`]   | `PlaybackDriver`, `PlaybackStatus`, `SpeedChangeTicket`       |
//! | [`builder`]  | `PlaybackBuilder`                                            |
//! | [`source`]   | `RouteSource` trait, `StaticRouteSource`, `JsonFileRouteSource` |
//! | [`frame`]    | `Frame` — everything the renderer needs for one tick         |
//! | [`trail`]    | `Trail` — bounded breadcrumb FIFO                            |
//! | [`observer`] | `PlaybackObserver`, `NoopObserver`                           |
//! | [`runner`]   | `run_realtime`, `run_headless`, control channel              |
//! | [`config`]   | `PlaybackConfig`                                             |
//! | [`error`]    | `PlaybackError`, `SourceError`                               |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rp_playback::{NoopObserver, PlaybackBuilder, run_headless};
//!
//! let mut driver = PlaybackBuilder::new(route)
//!     .multiplier(SpeedMultiplier::new(60.0)?)
//!     .build()?;
//! run_headless(&mut driver, &mut NoopObserver, 1.0 / 30.0)?;
//! ```

pub mod builder;
pub mod config;
pub mod driver;
pub mod error;
pub mod frame;
pub mod observer;
pub mod runner;
pub mod source;
pub mod trail;

#[cfg(test)]
mod tests;

pub use builder::PlaybackBuilder;
pub use config::PlaybackConfig;
pub use driver::{PlaybackDriver, PlaybackStatus, SpeedChangeTicket};
pub use error::{PlaybackError, PlaybackResult, SourceError, SourceResult};
pub use frame::Frame;
pub use observer::{NoopObserver, PlaybackObserver};
pub use runner::{
    ControlReceiver, PlaybackCommand, PlaybackControls, RunOutcome, RunSummary, control_channel,
    run_headless, run_realtime,
};
pub use source::{JsonFileRouteSource, RouteSource, StaticRouteSource};
pub use trail::Trail;
