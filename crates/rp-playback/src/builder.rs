//! Fluent builder for constructing a [`PlaybackDriver`].

use std::sync::Arc;

use tracing::info;

use rp_camera::CameraMode;
use rp_core::{RouteId, SpeedMultiplier};
use rp_geocode::Geocoder;
use rp_route::Route;

use crate::{PlaybackConfig, PlaybackDriver, PlaybackResult, RouteSource};

/// Fluent builder for [`PlaybackDriver`].
///
/// # Required inputs
///
/// - [`Route`] — directly via [`new`](Self::new), or fetched from a
///   [`RouteSource`] via [`fetch`](Self::fetch)
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                        |
/// |-------------------|--------------------------------|
/// | `.multiplier(m)`  | `SpeedMultiplier::REAL_TIME`   |
/// | `.config(c)`      | `PlaybackConfig::default()`    |
/// | `.camera_mode(m)` | `CameraMode::Overview`         |
/// | `.geocoder(g)`    | none: fallback labels only     |
///
/// # Example
///
/// ```rust,ignore
/// let mut driver = PlaybackBuilder::fetch(&source, RouteId(7), SpeedMultiplier::new(60.0)?)
///     .await?
///     .camera_mode(CameraMode::Chase)
///     .geocoder(Arc::new(CoordinateGeocoder))
///     .build()?;
/// driver.play();
/// ```
pub struct PlaybackBuilder {
    route:      Route,
    multiplier: SpeedMultiplier,
    config:     PlaybackConfig,
    mode:       CameraMode,
    geocoder:   Option<Arc<dyn Geocoder>>,
}

impl PlaybackBuilder {
    pub fn new(route: Route) -> Self {
        Self {
            route,
            multiplier: SpeedMultiplier::REAL_TIME,
            config:     PlaybackConfig::default(),
            mode:       CameraMode::default(),
            geocoder:   None,
        }
    }

    /// Fetch `route_id` at `multiplier` from `source` and start a builder
    /// for it.
    pub async fn fetch<S>(source: &S, route_id: RouteId, multiplier: SpeedMultiplier) -> PlaybackResult<Self>
    where
        S: RouteSource + ?Sized,
    {
        let route = source.fetch(route_id, multiplier).await?;
        info!(%route_id, %multiplier, "route fetched");
        Ok(Self::new(route).multiplier(multiplier))
    }

    pub fn multiplier(mut self, multiplier: SpeedMultiplier) -> Self {
        self.multiplier = multiplier;
        self
    }

    pub fn config(mut self, config: PlaybackConfig) -> Self {
        self.config = config;
        self
    }

    pub fn camera_mode(mut self, mode: CameraMode) -> Self {
        self.mode = mode;
        self
    }

    /// Enable street labels.  Without a geocoder, transit labels are always
    /// `En route to <next stop>`.
    pub fn geocoder(mut self, geocoder: Arc<dyn Geocoder>) -> Self {
        self.geocoder = Some(geocoder);
        self
    }

    /// Validate the config and return a stopped driver at elapsed 0.
    pub fn build(self) -> PlaybackResult<PlaybackDriver> {
        self.config.validate()?;
        Ok(PlaybackDriver::new(
            self.route,
            self.multiplier,
            self.config,
            self.mode,
            self.geocoder,
        ))
    }
}
