use rp_core::{CoreError, RouteId};
use rp_route::RouteError;
use thiserror::Error;

/// Failure to obtain a route from a [`RouteSource`](crate::RouteSource).
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("route {0} not found")]
    NotFound(RouteId),

    #[error("route service unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SourceResult<T> = Result<T, SourceError>;

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Fetching the route failed.  Recoverable: the previous route (if any)
    /// is kept and playback is stopped.
    #[error("route fetch failed: {0}")]
    Source(#[from] SourceError),

    /// A fetch result arrived for a speed change that has since been
    /// superseded or abandoned.
    #[error("stale route fetch (generation {got}, current {current})")]
    StaleFetch { got: u64, current: u64 },

    #[error("fixed step must be finite and > 0, got {0}")]
    InvalidStep(f64),

    #[error("a speed change is in progress")]
    RefetchInProgress,

    #[error("playback view is closed")]
    Closed,
}

pub type PlaybackResult<T> = Result<T, PlaybackError>;
