//! `rp-route` — the planned route as the playback engine consumes it.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`waypoint`]   | `Waypoint`, `WaypointCategory`                            |
//! | [`path`]       | `Path` — the dense road polyline                          |
//! | [`route`]      | `Route` (validated, immutable), `RouteDocument`, `Leg`, `RouteSummary` |
//! | [`path_index`] | `PathIndexMap` — forward-only waypoint → path sample map  |
//! | [`loader`]     | JSON document and CSV waypoint/path loaders               |
//! | [`synth`]      | `synthetic_route` — seeded out-and-back delivery route    |
//! | [`error`]      | `RouteError`, `RouteResult<T>`                            |
//!
//! # Immutability
//!
//! A `Route` is validated once in [`Route::new`] and never mutated.  When
//! anything about it changes (a new speed multiplier, a reload) the
//! playback layer fetches a fresh document and builds a new `Route` and a
//! new `PathIndexMap` from scratch.

pub mod error;
pub mod loader;
pub mod path;
pub mod path_index;
pub mod route;
pub mod synth;
pub mod waypoint;


pub use error::{RouteError, RouteResult};
pub use loader::{
    load_path_csv, load_path_reader, load_route_json, load_waypoints_csv,
    load_waypoints_reader, route_from_json_str,
};
pub use path::Path;
pub use path_index::PathIndexMap;
pub use route::{Leg, Route, RouteDocument, RouteSummary};
pub use synth::{SynthParams, synthetic_route};
pub use waypoint::{Waypoint, WaypointCategory};
