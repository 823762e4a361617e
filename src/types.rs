pub const F: f64 = 1. / 298.257223563;
pub const A: f64 = 6378.135;//km, WGS72 equatorial radius to match the SGP4 output frame

///Radius of the rendered Earth sphere in scene units.
pub const GLOBE_RADIUS: f64 = 5.0;
///Satellites sit slightly above the terrain surface.
pub const SATELLITE_RADIUS: f64 = 5.2;
///Country labels float just above the border overlays.
pub const LABEL_RADIUS: f64 = 5.02;

#[derive(Clone, Copy)]
pub struct Eci {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub vx: f64,
    pub vy: f64,
    pub vz: f64,
}
#[derive(Clone, Copy)]
pub struct Geodetic {
    pub lat: f64,
    pub lon: f64,
    pub alt: f64,
}
///Cartesian point in scene units, on (or near) a sphere of the radius it was
///projected with. Valid only for the tick it was computed on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}
