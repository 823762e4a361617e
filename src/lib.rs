//! Orbital propagation and coordinate transforms for a live satellite globe.
//!
//! Raw two-line element text becomes render-space positions in four steps:
//! triplet parsing ([`tle`]), SGP4 initialization and propagation
//! ([`Satellite`]), inertial-to-geodetic-to-Cartesian conversion
//! ([`transform`]), and a once-per-second batch update of a flat position
//! buffer ([`SatelliteTracker`]). The same spherical projection
//! ([`projection`]) places country borders and labels so every layer of the
//! globe stays aligned.

pub use geo::{AvailabilityFeed, Country, ServiceStatus};
pub use satellite::{InitError, Satellite};
pub use tle::{ElementSet, FetchError};
pub use tracker::{SatelliteTracker, TICK_PERIOD_SECONDS};
pub use types::Eci;
pub use types::Geodetic;
pub use types::RenderPosition;
pub use types::{GLOBE_RADIUS, LABEL_RADIUS, SATELLITE_RADIUS};

pub mod geo;
mod helpers;
pub mod projection;
mod satellite;
pub mod tle;
mod tracker;
pub mod transform;
mod types;
