//! Country geometry and service availability.
//!
//! Parses the Natural Earth admin-0 GeoJSON into border rings and label
//! anchors, plus the availability feed that classifies each country. Border
//! data and satellite data are independent failure domains: a failed fetch
//! here omits the overlay and nothing else.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

use crate::projection::ring_centroid;
use crate::tle::{fetch_text, FetchError};

pub const COUNTRIES_GEOJSON_URL: &str =
    "https://raw.githubusercontent.com/nvkelso/natural-earth-vector/master/geojson/ne_110m_admin_0_countries.geojson";
pub const AVAILABILITY_URL: &str = "https://www.starlink.com/public-files/availability.json";

#[derive(Debug, Error)]
pub enum GeoError {
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("not a feature collection")]
    NotFeatureCollection,
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

///One country's outline: every polygon ring as (lat, lon) vertex lists.
#[derive(Clone, Debug)]
pub struct Country {
    pub name: String,
    pub iso_code: Option<String>,
    pub rings: Vec<Vec<(f64, f64)>>,
}

impl Country {
    ///Anchor point for the country label: shoelace centroid of the largest
    ///ring, rejected when out of range or non-finite.
    pub fn label_anchor(&self) -> Option<(f64, f64)> {
        let largest = self.rings.iter().max_by(|a, b| {
            ring_area_abs(a)
                .partial_cmp(&ring_area_abs(b))
                .unwrap_or(std::cmp::Ordering::Equal)
        })?;
        let (lat, lon) = ring_centroid(largest);
        if !lat.is_finite() || !lon.is_finite() || lat.abs() > 90. || lon.abs() > 180. {
            return None;
        }
        Some((lat, lon))
    }
}

fn ring_area_abs(ring: &[(f64, f64)]) -> f64 {
    let mut area = 0.;
    for window in ring.windows(2) {
        let (y0, x0) = window[0];
        let (y1, x1) = window[1];
        area += (x0 * y1 - x1 * y0).abs();
    }
    area
}

const NAME_FIELDS: [&str; 6] = ["NAME", "name", "ADMIN", "NAME_EN", "SOVEREIGNT", "NAME_LONG"];
const ISO_FIELDS: [&str; 4] = ["iso_a2", "postal", "ISO_A2", "wb_a2"];

///Parses a GeoJSON `FeatureCollection` of `Polygon`/`MultiPolygon` features.
///Features without usable geometry are skipped, not errors.
pub fn parse_countries(json: &str) -> Result<Vec<Country>, GeoError> {
    let v: serde_json::Value = serde_json::from_str(json)?;
    let features = v["features"].as_array().ok_or(GeoError::NotFeatureCollection)?;
    let mut countries = Vec::new();
    for feature in features {
        let properties = &feature["properties"];
        let geometry = &feature["geometry"];
        let rings = match geometry["type"].as_str() {
            Some("Polygon") => extract_polygon(&geometry["coordinates"]),
            Some("MultiPolygon") => geometry["coordinates"]
                .as_array()
                .map(|polygons| {
                    polygons
                        .iter()
                        .flat_map(extract_polygon)
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default(),
            _ => continue,
        };
        if rings.is_empty() {
            continue;
        }
        countries.push(Country {
            name: property_string(properties, &NAME_FIELDS).unwrap_or_else(|| "Unknown".to_string()),
            iso_code: iso_code(properties),
            rings,
        });
    }
    Ok(countries)
}

///Outer ring of each polygon; holes are not drawn.
fn extract_polygon(coordinates: &serde_json::Value) -> Vec<Vec<(f64, f64)>> {
    coordinates
        .as_array()
        .and_then(|rings| rings.first())
        .and_then(extract_ring)
        .into_iter()
        .collect()
}

fn extract_ring(arr: &serde_json::Value) -> Option<Vec<(f64, f64)>> {
    let points = arr.as_array()?;
    let coords: Vec<(f64, f64)> = points
        .iter()
        .filter_map(|p| {
            let pair = p.as_array()?;
            Some((pair.get(1)?.as_f64()?, pair.first()?.as_f64()?))
        })
        .collect();
    if coords.is_empty() { None } else { Some(coords) }
}

fn property_string(properties: &serde_json::Value, fields: &[&str]) -> Option<String> {
    fields
        .iter()
        .filter_map(|f| properties[*f].as_str())
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn iso_code(properties: &serde_json::Value) -> Option<String> {
    ISO_FIELDS
        .iter()
        .filter_map(|f| properties[*f].as_str())
        .find(|v| v.len() == 2 && *v != "-99" && *v != "XX")
        .map(str::to_uppercase)
}

///Availability category for one country, ordered by how loudly it is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServiceStatus {
    Available,
    ComingSoon,
    WaitingList,
    Unavailable,
}

impl ServiceStatus {
    ///Border overlay radius; each category sits on its own shell so the
    ///louder categories draw over the quieter ones without z-fighting.
    pub fn border_radius(&self) -> f64 {
        match self {
            Self::Available => 5.01,
            Self::ComingSoon => 5.012,
            Self::WaitingList => 5.013,
            Self::Unavailable => 5.015,
        }
    }

    fn from_feed_status(status: &str) -> ServiceStatus {
        match status {
            "launched" | "available" | "exclude" => Self::Available,
            "coming_soon" => Self::ComingSoon,
            "pending_regulatory" | "faq" | "unknown" => Self::WaitingList,
            _ => Self::Unavailable,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct CountryAvailability {
    pub status: String,
    #[serde(default)]
    pub expected: Option<String>,
}

///The availability feed, keyed by ISO 3166 alpha-2 country code.
#[derive(Clone, Debug, Deserialize)]
pub struct AvailabilityFeed {
    pub admin0: HashMap<String, CountryAvailability>,
}

impl AvailabilityFeed {
    pub fn parse(json: &str) -> Result<AvailabilityFeed, GeoError> {
        Ok(serde_json::from_str(json)?)
    }

    ///Countries missing from the feed, and countries without a resolvable
    ///ISO code, both fall back to `Unavailable`.
    pub fn status_for(&self, country: &Country) -> ServiceStatus {
        country
            .iso_code
            .as_deref()
            .and_then(|code| self.admin0.get(code))
            .map(|entry| ServiceStatus::from_feed_status(&entry.status))
            .unwrap_or(ServiceStatus::Unavailable)
    }
}

pub fn fetch_countries(url: &str) -> Result<Vec<Country>, GeoError> {
    parse_countries(&fetch_text(url)?)
}

pub fn fetch_availability(url: &str) -> Result<AvailabilityFeed, GeoError> {
    AvailabilityFeed::parse(&fetch_text(url)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::assert_almost_eq;

    const SQUARE: &str = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": { "NAME": "Squareland", "iso_a2": "SQ" },
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[0,0],[10,0],[10,10],[0,10],[0,0]]]
            }
        }]
    }"#;

    #[test]
    fn test_parse_polygon() {
        let countries = parse_countries(SQUARE).unwrap();
        assert_eq!(countries.len(), 1);
        let country = &countries[0];
        assert_eq!(country.name, "Squareland");
        assert_eq!(country.iso_code.as_deref(), Some("SQ"));
        assert_eq!(country.rings.len(), 1);
        //GeoJSON pairs are [lon, lat]; rings store (lat, lon)
        assert_eq!(country.rings[0][1], (0., 10.));
    }

    #[test]
    fn test_parse_multipolygon_keeps_outer_rings() {
        let json = r#"{
            "features": [{
                "properties": { "name": "Twin Isles", "postal": "TI" },
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[0,0],[1,0],[1,1],[0,0]], [[0.2,0.2],[0.4,0.2],[0.4,0.4],[0.2,0.2]]],
                        [[[20,20],[30,20],[30,30],[20,30],[20,20]]]
                    ]
                }
            }]
        }"#;
        let countries = parse_countries(json).unwrap();
        assert_eq!(countries[0].rings.len(), 2);
    }

    #[test]
    fn test_label_anchor_uses_largest_ring() {
        let json = r#"{
            "features": [{
                "properties": { "NAME": "Twin Isles" },
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[0,0],[1,0],[1,1],[0,1],[0,0]]],
                        [[[20,20],[30,20],[30,30],[20,30],[20,20]]]
                    ]
                }
            }]
        }"#;
        let countries = parse_countries(json).unwrap();
        let (lat, lon) = countries[0].label_anchor().unwrap();
        assert_almost_eq(lat, 25.0);
        assert_almost_eq(lon, 25.0);
    }

    #[test]
    fn test_degenerate_ring_anchor_is_finite() {
        //a back-and-forth "ring" with zero signed area still labels
        let json = r#"{
            "features": [{
                "properties": { "NAME": "Sliver" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0,0],[5,5],[0,0],[5,5],[0,0]]]
                }
            }]
        }"#;
        let countries = parse_countries(json).unwrap();
        let (lat, lon) = countries[0].label_anchor().unwrap();
        assert!(lat.is_finite() && lon.is_finite());
        assert_almost_eq(lat, 2.0);
        assert_almost_eq(lon, 2.0);
    }

    #[test]
    fn test_iso_placeholders_rejected() {
        let json = r#"{
            "features": [{
                "properties": { "NAME": "Nowhere", "iso_a2": "-99", "wb_a2": "nw" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0,0],[1,0],[1,1],[0,0]]]
                }
            }]
        }"#;
        let countries = parse_countries(json).unwrap();
        assert_eq!(countries[0].iso_code.as_deref(), Some("NW"));
    }

    #[test]
    fn test_availability_classification() {
        let feed = AvailabilityFeed::parse(
            r#"{ "admin0": {
                "SQ": { "status": "launched" },
                "CS": { "status": "coming_soon", "expected": "2026" },
                "WL": { "status": "pending_regulatory" },
                "NO": { "status": "banned" }
            }}"#,
        )
        .unwrap();
        let mut country = parse_countries(SQUARE).unwrap().remove(0);
        assert_eq!(feed.status_for(&country), ServiceStatus::Available);
        country.iso_code = Some("CS".to_string());
        assert_eq!(feed.status_for(&country), ServiceStatus::ComingSoon);
        country.iso_code = Some("WL".to_string());
        assert_eq!(feed.status_for(&country), ServiceStatus::WaitingList);
        country.iso_code = Some("NO".to_string());
        assert_eq!(feed.status_for(&country), ServiceStatus::Unavailable);
        country.iso_code = None;
        assert_eq!(feed.status_for(&country), ServiceStatus::Unavailable);
    }

    #[test]
    fn test_status_radii_stack_outward() {
        assert!(ServiceStatus::Available.border_radius() < ServiceStatus::ComingSoon.border_radius());
        assert!(ServiceStatus::ComingSoon.border_radius() < ServiceStatus::WaitingList.border_radius());
        assert!(ServiceStatus::WaitingList.border_radius() < ServiceStatus::Unavailable.border_radius());
    }
}
