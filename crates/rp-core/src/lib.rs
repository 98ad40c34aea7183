//! `rp-core` — foundational types for the `route_replay` playback engine.
//!
//! This crate is a dependency of every other `rp-*` crate.  It has no `rp-*`
//! dependencies and only `thiserror` (plus optional `serde`) externally.
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `WaypointId`, `RouteId`                               |
//! | [`geo`]         | `GeoPoint`, haversine distance, initial bearing       |
//! | [`time`]        | `SpeedMultiplier`, `format_clock`                     |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::{RouteId, WaypointId};
pub use time::{SpeedMultiplier, format_clock};
