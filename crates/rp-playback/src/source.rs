//! Where routes come from.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use rp_core::{RouteId, SpeedMultiplier};
use rp_route::{Route, route_from_json_str};

use crate::{SourceError, SourceResult};

/// The routing collaborator.
///
/// Returns the route planned for `route_id` at `multiplier`.  Segment
/// durations can depend on the multiplier, so the driver refetches whenever
/// it changes.  The returned route is treated as immutable.
///
/// # Implementations
///
/// - **Production**: an HTTP client for the routing service
/// - [`StaticRouteSource`]: a fixed, already-loaded route
/// - [`JsonFileRouteSource`]: a route document on disk
#[async_trait]
pub trait RouteSource: Send + Sync + 'static {
    async fn fetch(&self, route_id: RouteId, multiplier: SpeedMultiplier) -> SourceResult<Route>;
}

/// Serves one fixed route regardless of multiplier.
#[derive(Clone, Debug)]
pub struct StaticRouteSource {
    route: Route,
}

impl StaticRouteSource {
    pub fn new(route: Route) -> Self {
        Self { route }
    }
}

#[async_trait]
impl RouteSource for StaticRouteSource {
    async fn fetch(&self, route_id: RouteId, _multiplier: SpeedMultiplier) -> SourceResult<Route> {
        if route_id != self.route.route_id() {
            return Err(SourceError::NotFound(route_id));
        }
        Ok(self.route.clone())
    }
}

/// Reads a JSON route document from disk on every fetch.
#[derive(Clone, Debug)]
pub struct JsonFileRouteSource {
    path: PathBuf,
}

impl JsonFileRouteSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl RouteSource for JsonFileRouteSource {
    async fn fetch(&self, route_id: RouteId, multiplier: SpeedMultiplier) -> SourceResult<Route> {
        debug!(path = %self.path.display(), %route_id, %multiplier, "reading route document");
        let text = tokio::fs::read_to_string(&self.path).await?;
        let route = route_from_json_str(&text)?;
        if route.route_id() != route_id {
            return Err(SourceError::NotFound(route_id));
        }
        Ok(route)
    }
}
