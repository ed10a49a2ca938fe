use serde::{Deserialize, Serialize};

/// Horizontal WGS84 position in degrees, GeoJSON axis order.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    pub lon_deg: f64,
    pub lat_deg: f64,
}

impl LonLat {
    pub const fn new(lon_deg: f64, lat_deg: f64) -> Self {
        Self { lon_deg, lat_deg }
    }

    /// Leaflet-style `[lat, lon]` pair.
    pub fn to_lat_lng(self) -> LatLng {
        LatLng::new(self.lat_deg, self.lon_deg)
    }
}

/// `[lat, lon]` pair as consumed by the map view.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "[f64; 2]", from = "[f64; 2]")]
pub struct LatLng {
    pub lat_deg: f64,
    pub lon_deg: f64,
}

impl LatLng {
    pub const fn new(lat_deg: f64, lon_deg: f64) -> Self {
        Self { lat_deg, lon_deg }
    }
}

impl From<LatLng> for [f64; 2] {
    fn from(v: LatLng) -> Self {
        [v.lat_deg, v.lon_deg]
    }
}

impl From<[f64; 2]> for LatLng {
    fn from(v: [f64; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}

/// Hypocenter: horizontal position plus depth below sea level.
///
/// Depth is positive downwards in kilometers. Negative values are valid and
/// describe events located above the reference surface.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    pub lon_deg: f64,
    pub lat_deg: f64,
    pub depth_km: f64,
}

impl GeoPosition {
    pub const fn new(lon_deg: f64, lat_deg: f64, depth_km: f64) -> Self {
        Self {
            lon_deg,
            lat_deg,
            depth_km,
        }
    }

    pub fn surface(&self) -> LonLat {
        LonLat::new(self.lon_deg, self.lat_deg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lat_lng_serializes_as_pair() {
        let center = LatLng::new(39.8282, -98.5795);
        let json = serde_json::to_string(&center).unwrap();
        assert_eq!(json, "[39.8282,-98.5795]");
    }

    #[test]
    fn surface_drops_depth() {
        let p = GeoPosition::new(-117.5, 35.7, 8.2);
        assert_eq!(p.surface(), LonLat::new(-117.5, 35.7));
        assert_eq!(p.surface().to_lat_lng(), LatLng::new(35.7, -117.5));
    }
}
