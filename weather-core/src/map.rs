//! OpenStreetMap view centred on the queried location.

use std::f64::consts::PI;

pub const TILE_URL_TEMPLATE: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const ATTRIBUTION: &str = "© OpenStreetMap contributors";
pub const DEFAULT_ZOOM: u8 = 10;
/// Deepest zoom the OSM tile servers provide.
pub const MAX_ZOOM: u8 = 19;

/// London, shown until the first forecast arrives.
pub const DEFAULT_CENTER: (f64, f64) = (51.505, -0.09);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
}

impl Default for MapView {
    fn default() -> Self {
        Self::centered(DEFAULT_CENTER.0, DEFAULT_CENTER.1)
    }
}

impl MapView {
    pub fn centered(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            zoom: DEFAULT_ZOOM,
        }
    }

    /// Zoom actually used for tiles and links, capped at [`MAX_ZOOM`].
    pub fn effective_zoom(&self) -> u8 {
        self.zoom.min(MAX_ZOOM)
    }

    /// Slippy-map tile `(x, y)` containing the centre at the current zoom.
    pub fn center_tile(&self) -> (u32, u32) {
        let n = f64::from(1u32 << self.effective_zoom());
        // Web Mercator is undefined at the poles.
        let lat = self.latitude.clamp(-85.051_128, 85.051_128).to_radians();
        let x = (self.longitude + 180.0) / 360.0 * n;
        let y = (1.0 - lat.tan().asinh() / PI) / 2.0 * n;
        let max = n - 1.0;
        (x.clamp(0.0, max) as u32, y.clamp(0.0, max) as u32)
    }

    pub fn center_tile_url(&self) -> String {
        let (x, y) = self.center_tile();
        TILE_URL_TEMPLATE
            .replace("{z}", &self.effective_zoom().to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }

    /// Link that opens the same view on openstreetmap.org with a marker.
    pub fn browse_url(&self) -> String {
        format!(
            "https://www.openstreetmap.org/?mlat={lat:.4}&mlon={lon:.4}#map={z}/{lat:.4}/{lon:.4}",
            lat = self.latitude,
            lon = self.longitude,
            z = self.effective_zoom(),
        )
    }
}
