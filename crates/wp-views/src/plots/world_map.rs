//! Bundled country outlines and the Mercator projection used by the maps
//!
//! The outlines are a low-resolution GeoJSON FeatureCollection keyed by the
//! `iso_a3` property. Polygons are triangulated once at load so painting a
//! frame only projects vertices.

use std::str::FromStr;
use ahash::AHashMap;
use egui::{Pos2, Rect, Vec2};
use geo::{Contains, TriangulateEarcut};
use geo_types::{Coord, Geometry, MultiPolygon, Point};
use geojson::GeoJson;
use once_cell::sync::Lazy;
use thiserror::Error;

const BUNDLED_GEOJSON: &str = include_str!("../../assets/countries_lowres.geojson");

/// Latitudes outside this band are clamped before projecting
pub const MAX_LATITUDE: f64 = 84.0;
pub const MIN_LATITUDE: f64 = -58.0;

static BUNDLED: Lazy<Option<WorldMap>> = Lazy::new(|| match WorldMap::from_geojson(BUNDLED_GEOJSON) {
    Ok(map) => {
        tracing::debug!("Loaded {} country outlines", map.len());
        Some(map)
    }
    Err(e) => {
        tracing::error!("Bundled country outlines are unusable: {}", e);
        None
    }
});

#[derive(Debug, Error)]
pub enum MapError {
    #[error("invalid GeoJSON: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("expected a FeatureCollection")]
    NotACollection,

    #[error("feature {0} has no iso_a3 property")]
    MissingIsoCode(usize),

    #[error("feature {0} is not a polygon")]
    NotAPolygon(String),
}

/// Outline of one country in lon/lat degrees
#[derive(Debug, Clone)]
pub struct CountryShape {
    pub iso_code: String,
    pub name: String,
    pub shape: MultiPolygon<f64>,
    /// Earcut triangles of every polygon, ready for a mesh
    pub triangles: Vec<[Coord<f64>; 3]>,
}

impl CountryShape {
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        self.shape.contains(&Point::new(lon, lat))
    }
}

/// Country outlines keyed by ISO Alpha-3 code, in file order
#[derive(Debug, Clone, Default)]
pub struct WorldMap {
    countries: Vec<CountryShape>,
    index: AHashMap<String, usize>,
}

impl WorldMap {
    /// Shared map parsed from the bundled outlines, `None` if they fail to parse
    pub fn bundled() -> Option<&'static WorldMap> {
        BUNDLED.as_ref()
    }

    pub fn from_geojson(text: &str) -> Result<Self, MapError> {
        let collection = match GeoJson::from_str(text)? {
            GeoJson::FeatureCollection(collection) => collection,
            _ => return Err(MapError::NotACollection),
        };

        let mut map = WorldMap::default();
        for (position, mut feature) in collection.features.into_iter().enumerate() {
            let iso_code = feature
                .property("iso_a3")
                .and_then(|v| v.as_str())
                .ok_or(MapError::MissingIsoCode(position))?
                .to_string();
            let name = feature
                .property("name")
                .and_then(|v| v.as_str())
                .unwrap_or(&iso_code)
                .to_string();

            let geometry = feature
                .geometry
                .take()
                .ok_or_else(|| MapError::NotAPolygon(iso_code.clone()))?;
            let shape = match Geometry::<f64>::try_from(geometry)? {
                Geometry::MultiPolygon(multi) => multi,
                Geometry::Polygon(polygon) => MultiPolygon::new(vec![polygon]),
                _ => return Err(MapError::NotAPolygon(iso_code)),
            };

            let triangles = shape
                .iter()
                .flat_map(|polygon| polygon.earcut_triangles())
                .map(|t| [t.0, t.1, t.2])
                .collect();

            map.index.insert(iso_code.clone(), map.countries.len());
            map.countries.push(CountryShape {
                iso_code,
                name,
                shape,
                triangles,
            });
        }

        Ok(map)
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn countries(&self) -> &[CountryShape] {
        &self.countries
    }

    pub fn get(&self, iso_code: &str) -> Option<&CountryShape> {
        self.index.get(iso_code).map(|&i| &self.countries[i])
    }

    /// Country under a lon/lat position
    ///
    /// Later features are painted on top (Lesotho over South Africa), so
    /// they are tested first.
    pub fn country_at(&self, lon: f64, lat: f64) -> Option<&CountryShape> {
        self.countries.iter().rev().find(|c| c.contains(lon, lat))
    }

    /// How many distinct codes have no outline in the map
    pub fn missing_count<'a>(&self, iso_codes: impl IntoIterator<Item = &'a str>) -> usize {
        let mut missing: Vec<&str> = iso_codes
            .into_iter()
            .filter(|code| !self.index.contains_key(*code))
            .collect();
        missing.sort_unstable();
        missing.dedup();
        missing.len()
    }
}

fn mercator_y(lat: f64) -> f64 {
    let lat = lat.clamp(MIN_LATITUDE, MAX_LATITUDE).to_radians();
    (std::f64::consts::FRAC_PI_4 + lat / 2.0).tan().ln()
}

fn inverse_mercator_y(y: f64) -> f64 {
    (2.0 * y.exp().atan() - std::f64::consts::FRAC_PI_2).to_degrees()
}

/// Mercator projection of the clamped latitude band onto a screen rect
#[derive(Debug, Clone, Copy)]
pub struct MapProjection {
    pub rect: Rect,
}

impl MapProjection {
    /// Width over height of the projected world
    pub fn aspect_ratio() -> f32 {
        (std::f64::consts::TAU / (mercator_y(MAX_LATITUDE) - mercator_y(MIN_LATITUDE))) as f32
    }

    /// Largest rect with the world's aspect ratio centered in `available`
    pub fn fit(available: Rect) -> Self {
        let aspect = Self::aspect_ratio();
        let width = available.width().min(available.height() * aspect);
        let size = Vec2::new(width, width / aspect);
        Self {
            rect: Rect::from_center_size(available.center(), size),
        }
    }

    pub fn project(&self, lon: f64, lat: f64) -> Pos2 {
        let top = mercator_y(MAX_LATITUDE);
        let bottom = mercator_y(MIN_LATITUDE);
        let x = (lon.clamp(-180.0, 180.0) + 180.0) / 360.0;
        let y = (top - mercator_y(lat)) / (top - bottom);

        Pos2::new(
            self.rect.left() + x as f32 * self.rect.width(),
            self.rect.top() + y as f32 * self.rect.height(),
        )
    }

    pub fn project_coord(&self, coord: Coord<f64>) -> Pos2 {
        self.project(coord.x, coord.y)
    }

    /// Lon/lat under a screen position, `None` outside the map rect
    pub fn unproject(&self, pos: Pos2) -> Option<(f64, f64)> {
        if !self.rect.contains(pos) || self.rect.width() <= 0.0 || self.rect.height() <= 0.0 {
            return None;
        }
        let top = mercator_y(MAX_LATITUDE);
        let bottom = mercator_y(MIN_LATITUDE);
        let x = ((pos.x - self.rect.left()) / self.rect.width()) as f64;
        let y = ((pos.y - self.rect.top()) / self.rect.height()) as f64;

        Some((x * 360.0 - 180.0, inverse_mercator_y(top - y * (top - bottom))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_COUNTRIES: &str = r#"{"type":"FeatureCollection","features":[
        {"type":"Feature","properties":{"iso_a3":"AAA","name":"Square"},
         "geometry":{"type":"Polygon","coordinates":[[[0,0],[10,0],[10,10],[0,10],[0,0]]]}},
        {"type":"Feature","properties":{"iso_a3":"BBB","name":"Inner"},
         "geometry":{"type":"MultiPolygon","coordinates":[[[[2,2],[4,2],[4,4],[2,4],[2,2]]]]}}
    ]}"#;

    fn projection() -> MapProjection {
        MapProjection {
            rect: Rect::from_min_size(Pos2::new(100.0, 50.0), Vec2::new(720.0, 400.0)),
        }
    }

    #[test]
    fn parses_features_by_code() {
        let map = WorldMap::from_geojson(TWO_COUNTRIES).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("AAA").unwrap().name, "Square");
        assert_eq!(map.get("AAA").unwrap().triangles.len(), 2);
        assert!(map.get("CCC").is_none());
    }

    #[test]
    fn later_features_win_the_hit_test() {
        let map = WorldMap::from_geojson(TWO_COUNTRIES).unwrap();
        assert_eq!(map.country_at(3.0, 3.0).unwrap().iso_code, "BBB");
        assert_eq!(map.country_at(8.0, 8.0).unwrap().iso_code, "AAA");
        assert!(map.country_at(-20.0, 5.0).is_none());
    }

    #[test]
    fn rejects_features_without_a_code() {
        let text = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{},"geometry":{"type":"Point","coordinates":[0,0]}}]}"#;
        assert!(matches!(WorldMap::from_geojson(text), Err(MapError::MissingIsoCode(0))));
        assert!(matches!(
            WorldMap::from_geojson(r#"{"type":"Point","coordinates":[0,0]}"#),
            Err(MapError::NotACollection)
        ));
    }

    #[test]
    fn bundled_outlines_cover_the_fixture_countries() {
        let map = WorldMap::bundled().unwrap();
        assert!(map.len() > 200);
        for code in ["AFG", "BRA", "CHN", "IND", "IDN", "PAK", "USA"] {
            assert!(map.get(code).is_some(), "{} has no outline", code);
        }

        let brazil = map.get("BRA").unwrap();
        assert!(!brazil.triangles.is_empty());
        // Brasília
        assert_eq!(map.country_at(-47.9, -15.8).unwrap().iso_code, "BRA");
        // Lesotho lies inside South Africa's outline
        assert_eq!(map.country_at(28.2, -29.6).unwrap().iso_code, "LSO");
        assert_eq!(map.country_at(24.0, -30.0).unwrap().iso_code, "ZAF");
    }

    #[test]
    fn aggregates_have_no_outline() {
        let map = WorldMap::bundled().unwrap();
        let codes = ["BRA", "WLD", "SSA1", "WLD", "CHN"];
        assert_eq!(map.missing_count(codes), 2);
    }

    #[test]
    fn prime_meridian_and_equator_positions() {
        let projection = projection();
        let origin = projection.project(0.0, 0.0);
        assert!((origin.x - projection.rect.center().x).abs() < 1e-3);
        // The band is taller north of the equator
        assert!(origin.y > projection.rect.center().y);

        let corner = projection.project(-180.0, 90.0);
        assert_eq!(corner, projection.rect.left_top());
    }

    #[test]
    fn unproject_inverts_project() {
        let projection = projection();
        for (lon, lat) in [(-47.9, -15.8), (116.4, 39.9), (0.0, 0.0), (170.0, -45.0)] {
            let (back_lon, back_lat) = projection.unproject(projection.project(lon, lat)).unwrap();
            assert!((back_lon - lon).abs() < 0.05, "{} vs {}", back_lon, lon);
            assert!((back_lat - lat).abs() < 0.05, "{} vs {}", back_lat, lat);
        }
        assert!(projection.unproject(Pos2::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn fit_keeps_the_aspect_ratio() {
        let available = Rect::from_min_size(Pos2::ZERO, Vec2::new(1000.0, 300.0));
        let projection = MapProjection::fit(available);
        assert!((projection.rect.height() - 300.0).abs() < 1e-3);
        let ratio = projection.rect.width() / projection.rect.height();
        assert!((ratio - MapProjection::aspect_ratio()).abs() < 1e-3);
        assert!((projection.rect.center().x - 500.0).abs() < 1e-3);
    }
}
