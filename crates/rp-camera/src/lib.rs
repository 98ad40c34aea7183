//! `rp-camera` — a virtual camera that follows the replayed vehicle.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                    |
//! |----------------|-------------------------------------------------------------|
//! | [`mode`]       | `CameraMode` (overview / chase / cinematic), `CameraTargets` |
//! | [`controller`] | `CameraController`, `CameraState`, heading helpers          |
//! | [`config`]     | `CameraConfig`                                              |
//!
//! # Control loop
//!
//! Each frame the active mode turns the vehicle's position, heading, and
//! stationary flag (plus wall-clock time, for the cinematic sway) into
//! target heading/tilt/zoom values.  The controller then moves its current
//! values a fixed fraction of the way toward the targets:
//!
//! ```text
//! current += (target - current) * alpha
//! ```
//!
//! Heading uses the shortest signed angular difference so the camera never
//! spins the long way around across north.  Switching modes snaps straight
//! to the new targets on the next update.

pub mod config;
pub mod controller;
pub mod mode;


pub use config::CameraConfig;
pub use controller::{
    CameraController, CameraInput, CameraState, approach_heading, normalize_heading,
    shortest_heading_delta,
};
pub use mode::{CameraMode, CameraTargets, UnknownCameraMode};
