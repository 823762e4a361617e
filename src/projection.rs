//! Shared geographic projection.
//!
//! One spherical mapping serves satellite positions, country border rings,
//! and label anchors. The longitude sign flip matches the globe texture
//! orientation; if any consumer diverges from it, overlays drift off the
//! terrain underneath them.

use std::f64::consts::PI;

use crate::types::RenderPosition;

///Maps latitude/longitude in degrees onto a sphere of the given radius.
///Radius varies by consumer purely to stack overlays without z-fighting;
///the mapping itself is radius-agnostic.
pub fn geodetic_to_cartesian(lat: f64, lon: f64, radius: f64) -> RenderPosition {
    let phi = (90. - lat) * PI / 180.;
    let theta = -lon * PI / 180.;
    RenderPosition {
        x: radius * phi.sin() * theta.cos(),
        y: radius * phi.cos(),
        z: radius * phi.sin() * theta.sin(),
    }
}

///Projects a border ring, closing it by repeating the first vertex.
///Vertices are (lat, lon) pairs in degrees.
pub fn project_ring(ring: &[(f64, f64)], radius: f64) -> Vec<RenderPosition> {
    let mut points: Vec<RenderPosition> = ring
        .iter()
        .map(|&(lat, lon)| geodetic_to_cartesian(lat, lon, radius))
        .collect();
    if let Some(&first) = points.first() {
        points.push(first);
    }
    points
}

///Signed-area centroid of a ring via the planar shoelace formula, on the raw
///(lat, lon) coordinates. Falls back to the arithmetic mean of the vertices
///when the signed area vanishes; several real coastline rings are thin
///enough to cancel themselves out and would otherwise divide by zero.
pub fn ring_centroid(ring: &[(f64, f64)]) -> (f64, f64) {
    if ring.len() < 3 {
        return ring.first().copied().unwrap_or((0., 0.));
    }
    let mut area = 0.;
    let mut centroid_lat = 0.;
    let mut centroid_lon = 0.;
    for window in ring.windows(2) {
        let (y0, x0) = window[0];
        let (y1, x1) = window[1];
        let a = x0 * y1 - x1 * y0;
        area += a;
        centroid_lon += (x0 + x1) * a;
        centroid_lat += (y0 + y1) * a;
    }
    area *= 0.5;
    if area.abs() < 1e-10 {
        let n = ring.len() as f64;
        let lat = ring.iter().map(|p| p.0).sum::<f64>() / n;
        let lon = ring.iter().map(|p| p.1).sum::<f64>() / n;
        return (lat, lon);
    }
    (centroid_lat / (6. * area), centroid_lon / (6. * area))
}
