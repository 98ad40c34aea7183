//! `rp-motion` — where the vehicle is, and how it is moving, at a playback
//! instant.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                     |
//! |----------------|--------------------------------------------------------------|
//! | [`timeline`]   | `Timeline`, `Resolution`, `Phase` — classify an instant       |
//! | [`kinematics`] | `MotionEngine`, `VehicleState` — position, heading, speed    |
//! | [`config`]     | `MotionConfig`                                               |
//!
//! # Model
//!
//! Waypoints partition route time into *servicing* intervals
//! `[arrival, departure)` and *transit* intervals `[departure_i,
//! arrival_{i+1})`.  Both bounds are divided by the speed multiplier to get
//! playback time.  Within a transit interval the fractional progress is
//! mapped linearly onto the path-index span between the two waypoints'
//! [`PathIndexMap`](rp_route::PathIndexMap) entries, which are monotonic,
//! so the rendered vehicle never moves backwards along the path.
//!
//! Everything here is a pure function of its inputs.  The only mutable
//! state (elapsed time, last heading) belongs to the playback driver.

pub mod config;
pub mod kinematics;
pub mod timeline;


pub use config::MotionConfig;
pub use kinematics::{MotionEngine, VehicleState};
pub use timeline::{Phase, Resolution, Timeline, resolve};
