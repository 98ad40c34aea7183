//! Route loaders.
//!
//! # JSON
//!
//! One [`RouteDocument`] per file; see its docs for the shape.
//!
//! # CSV
//!
//! Waypoints and path come as two files, the way most routing exports ship
//! them.  Empty cells in optional columns read as `None`.
//!
//! ```csv
//! sequence,name,lat,lng,category,arrival_time_seconds,departure_time_seconds,cumulative_distance_km,segment_distance_km,segment_duration_seconds,delivery_quantity
//! 0,Depot,30.6940,-88.0430,origin,0,0,0,,,
//! 1,Acme,30.7012,-88.0391,delivery_stop,600,900,8.5,8.5,600,12
//! 2,Depot,30.6940,-88.0430,destination_return,1500,1500,17.0,,,
//! ```
//!
//! ```csv
//! lat,lng
//! 30.6940,-88.0430
//! 30.6951,-88.0422
//! ```

use std::io::Read;
use std::path::Path as FsPath;

use serde::Deserialize;

use rp_core::{GeoPoint, WaypointId};

use crate::{Path, Route, RouteDocument, RouteError, RouteResult, Waypoint, WaypointCategory};

// ── JSON ──────────────────────────────────────────────────────────────────────

/// Load and validate a route from a JSON file.
pub fn load_route_json(path: &FsPath) -> RouteResult<Route> {
    let file = std::fs::File::open(path)?;
    let doc: RouteDocument = serde_json::from_reader(std::io::BufReader::new(file))?;
    Route::from_document(doc)
}

/// Parse and validate a route from a JSON string.
pub fn route_from_json_str(s: &str) -> RouteResult<Route> {
    let doc: RouteDocument = serde_json::from_str(s)?;
    Route::from_document(doc)
}

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct WaypointRecord {
    sequence:                 u32,
    #[serde(default)]
    name:                     Option<String>,
    lat:                      f64,
    lng:                      f64,
    category:                 String,
    arrival_time_seconds:     f64,
    departure_time_seconds:   f64,
    cumulative_distance_km:   f64,
    #[serde(default)]
    segment_distance_km:      Option<f64>,
    #[serde(default)]
    segment_duration_seconds: Option<f64>,
    #[serde(default)]
    delivery_quantity:        Option<f64>,
}

#[derive(Deserialize)]
struct PathRecord {
    lat: f64,
    lng: f64,
}

// ── CSV public API ────────────────────────────────────────────────────────────

/// Load waypoints from a CSV file.  Rows are sorted by `sequence`.
pub fn load_waypoints_csv(path: &FsPath) -> RouteResult<Vec<Waypoint>> {
    let file = std::fs::File::open(path)?;
    load_waypoints_reader(file)
}

/// Like [`load_waypoints_csv`] but accepts any `Read` source.
pub fn load_waypoints_reader<R: Read>(reader: R) -> RouteResult<Vec<Waypoint>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut waypoints = Vec::new();

    for result in csv_reader.deserialize::<WaypointRecord>() {
        let r = result?;
        waypoints.push(Waypoint {
            sequence:                 WaypointId(r.sequence),
            name:                     r.name.filter(|n| !n.is_empty()),
            position:                 GeoPoint::new(r.lat, r.lng),
            category:                 r.category.parse::<WaypointCategory>()?,
            arrival_time_seconds:     r.arrival_time_seconds,
            departure_time_seconds:   r.departure_time_seconds,
            cumulative_distance_km:   r.cumulative_distance_km,
            segment_distance_km:      r.segment_distance_km,
            segment_duration_seconds: r.segment_duration_seconds,
            delivery_quantity:        r.delivery_quantity,
        });
    }

    waypoints.sort_by_key(|w| w.sequence);
    Ok(waypoints)
}

/// Load path samples from a CSV file with `lat,lng` columns.
pub fn load_path_csv(path: &FsPath) -> RouteResult<Path> {
    let file = std::fs::File::open(path)?;
    load_path_reader(file)
}

/// Like [`load_path_csv`] but accepts any `Read` source.
pub fn load_path_reader<R: Read>(reader: R) -> RouteResult<Path> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    csv_reader
        .deserialize::<PathRecord>()
        .map(|row| row.map(|r| GeoPoint::new(r.lat, r.lng)).map_err(RouteError::from))
        .collect()
}
