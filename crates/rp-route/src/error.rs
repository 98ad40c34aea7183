//! Route-subsystem error type.

use thiserror::Error;

use rp_core::CoreError;

/// Errors produced while loading or validating a route.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("route has no waypoints")]
    NoWaypoints,

    #[error("waypoint at position {index} has sequence {got}, expected {index}")]
    NonContiguousSequence { index: usize, got: u32 },

    #[error("waypoint {index} arrives before its predecessor")]
    ArrivalsNotSorted { index: usize },

    #[error("waypoint {index} departs before it arrives")]
    DepartureBeforeArrival { index: usize },

    #[error("waypoint {index} has a smaller cumulative distance than its predecessor")]
    CumulativeDistanceDecreasing { index: usize },

    #[error("waypoint {index} has a negative or non-finite {field}")]
    InvalidNumber { index: usize, field: &'static str },

    #[error("waypoint {index}: {source}")]
    InvalidPosition { index: usize, source: CoreError },

    #[error("path sample {index}: {source}")]
    InvalidPathSample { index: usize, source: CoreError },

    /// The path has no samples, so no waypoint can be mapped onto it.
    #[error("path is empty")]
    EmptyPath,

    #[error("invalid synthetic route parameter {field}: {reason}")]
    InvalidSynthParams { field: &'static str, reason: &'static str },

    #[error("route parse error: {0}")]
    Parse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type RouteResult<T> = Result<T, RouteError>;
