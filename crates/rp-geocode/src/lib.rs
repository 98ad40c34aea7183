//! `rp-geocode` — street labels for the vehicle's current position.
//!
//! Labels are display sugar.  Lookups are asynchronous, best-effort, and
//! never block a frame: the playback tick asks for a label, gets whatever is
//! cached, and the answer for a new stretch of road shows up a few frames
//! later.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                 |
//! |----------------|----------------------------------------------------------|
//! | [`geocoder`]   | `Geocoder` async trait, `Address`, `CoordinateGeocoder`  |
//! | [`cache`]      | `LabelCache` — bucket → label, in-flight set, generation |
//! | [`dispatcher`] | `GeocodeDispatcher` — spawns lookups, drains results     |
//! | [`error`]      | `GeocodeError`, `GeocodeResult<T>`                       |
//!
//! # Buckets
//!
//! Path samples are grouped into fixed-size buckets
//! (`path_index / bucket_size`).  Each bucket is looked up at most once per
//! route; failures are cached too, as "no label", so a flaky service is not
//! hammered every frame.

pub mod cache;
pub mod dispatcher;
pub mod error;
pub mod geocoder;

#[cfg(test)]
mod tests;

pub use cache::{LabelCache, LookupTicket, bucket_for};
pub use dispatcher::GeocodeDispatcher;
pub use error::{GeocodeError, GeocodeResult};
pub use geocoder::{Address, CoordinateGeocoder, Geocoder};
