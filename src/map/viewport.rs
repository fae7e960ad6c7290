use crate::error::MapError;
use serde::Serialize;

/// Geographic coordinate, serialized as `[lng, lat]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "[f64; 2]")]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

impl From<LngLat> for [f64; 2] {
    fn from(p: LngLat) -> Self {
        [p.lng, p.lat]
    }
}

/// Pan limit, serialized as `[[sw_lng, sw_lat], [ne_lng, ne_lat]]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "[[f64; 2]; 2]")]
pub struct LngLatBounds {
    pub southwest: LngLat,
    pub northeast: LngLat,
}

impl LngLatBounds {
    pub const fn new(southwest: LngLat, northeast: LngLat) -> Self {
        Self {
            southwest,
            northeast,
        }
    }

    pub fn contains(&self, p: &LngLat) -> bool {
        p.lng >= self.southwest.lng
            && p.lng <= self.northeast.lng
            && p.lat >= self.southwest.lat
            && p.lat <= self.northeast.lat
    }
}

impl From<LngLatBounds> for [[f64; 2]; 2] {
    fn from(b: LngLatBounds) -> Self {
        [b.southwest.into(), b.northeast.into()]
    }
}

/// Initial view plus the zoom and pan limits applied to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportConstraints {
    pub center: LngLat,
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub max_bounds: LngLatBounds,
}

impl ViewportConstraints {
    /// Central Europe, centered on Germany.
    pub const fn game_region() -> Self {
        Self {
            center: LngLat::new(10.4515, 51.1657),
            zoom: 4.0,
            min_zoom: 4.0,
            max_zoom: 12.0,
            max_bounds: LngLatBounds::new(LngLat::new(0.0, 40.0), LngLat::new(25.0, 80.0)),
        }
    }

    pub fn validate(&self) -> Result<(), MapError> {
        if !(self.min_zoom <= self.zoom && self.zoom <= self.max_zoom) {
            return Err(MapError::configuration(format!(
                "zoom {} outside [{}, {}]",
                self.zoom, self.min_zoom, self.max_zoom
            )));
        }
        let (sw, ne) = (self.max_bounds.southwest, self.max_bounds.northeast);
        if !(sw.lng < ne.lng && sw.lat < ne.lat) {
            return Err(MapError::configuration(format!(
                "bounds southwest ({}, {}) not below northeast ({}, {})",
                sw.lng, sw.lat, ne.lng, ne.lat
            )));
        }
        if !self.max_bounds.contains(&self.center) {
            return Err(MapError::configuration(format!(
                "center ({}, {}) outside bounds",
                self.center.lng, self.center.lat
            )));
        }
        Ok(())
    }
}

impl Default for ViewportConstraints {
    fn default() -> Self {
        Self::game_region()
    }
}
