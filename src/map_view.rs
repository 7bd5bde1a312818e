use crate::graphics::Raster;
use crate::tiles::{
    tile_url, TileSource, MAX_NATIVE_ZOOM, MAX_ZOOM, MIN_NATIVE_ZOOM, MIN_ZOOM, TILE_SIZE,
};

/// World-space corners of the mapped region, blocks.
pub const WORLD_LOWER: [i32; 3] = [-1536, -64, -3072];
pub const WORLD_UPPER: [i32; 3] = [2560, 320, 1024];

const PLACEHOLDER_A: [u8; 4] = [74, 56, 41, 255];
const PLACEHOLDER_B: [u8; 4] = [58, 44, 32, 255];

/// Projects a world position into map coordinates: the map's vertical axis
/// is the negated world z, its horizontal axis the world x (simple CRS, no
/// geodesy).
pub const fn world_to_map(pos: [i32; 3]) -> [i32; 2] {
    [-pos[2], pos[0]]
}

/// Map-space corners of the pannable region.
pub const MAP_BOUNDS: [[i32; 2]; 2] = [world_to_map(WORLD_LOWER), world_to_map(WORLD_UPPER)];

/// Pannable, zoomable viewer over the world tile pyramid.
///
/// Works in "map pixels": at zoom `z` one map unit is `2^z` screen pixels
/// and a tile covers `TILE_SIZE` screen pixels. Tiles exist natively for
/// zooms `0..=4`; at zoom -1 the viewer shows the placeholder checker only.
pub struct MapView {
    center_x: f64,
    center_z: f64,
    zoom: i32,
}

impl MapView {
    pub fn new() -> Self {
        Self {
            center_x: 0.0,
            center_z: 0.0,
            zoom: 2,
        }
    }

    pub fn zoom(&self) -> i32 {
        self.zoom
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + 1).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom - 1).max(MIN_ZOOM);
    }

    fn scale(&self) -> f64 {
        (2.0f64).powi(self.zoom)
    }

    /// Pans by a screen-pixel delta, keeping the center inside the world
    /// bounds.
    pub fn pan(&mut self, dx_px: f64, dz_px: f64) {
        let s = self.scale();
        self.center_x = (self.center_x + dx_px / s)
            .clamp(MAP_BOUNDS[0][1] as f64, MAP_BOUNDS[1][1] as f64);
        // The map's vertical axis is negated world z, so the lat bounds
        // come back swapped and negated.
        self.center_z = (self.center_z + dz_px / s)
            .clamp(-MAP_BOUNDS[0][0] as f64, -MAP_BOUNDS[1][0] as f64);
    }

    /// Inclusive tile index range covering a viewport, in the current
    /// zoom's tile grid. Returns `None` when no native tiles exist at this
    /// zoom.
    pub fn visible_tiles(
        &self,
        viewport_w: u32,
        viewport_h: u32,
    ) -> Option<(i32, i32, i32, i32)> {
        if self.zoom < MIN_NATIVE_ZOOM || self.zoom > MAX_NATIVE_ZOOM {
            return None;
        }
        let s = self.scale();
        let half_w = viewport_w as f64 / 2.0;
        let half_h = viewport_h as f64 / 2.0;
        let left = self.center_x * s - half_w;
        let top = self.center_z * s - half_h;
        let tile = TILE_SIZE as f64;
        let tx0 = (left / tile).floor() as i32;
        let tz0 = (top / tile).floor() as i32;
        let tx1 = ((left + viewport_w as f64) / tile).floor() as i32;
        let tz1 = ((top + viewport_h as f64) / tile).floor() as i32;
        Some((tx0, tz0, tx1, tz1))
    }

    /// Paints the visible tile span into the frame; tiles the source does
    /// not have (or zooms with no native tiles) fall back to a checker.
    pub fn render(&self, raster: &mut Raster<'_>, source: &mut dyn TileSource) {
        let (vw, vh) = (raster.width, raster.height);
        checker_background(raster);

        let Some((tx0, tz0, tx1, tz1)) = self.visible_tiles(vw, vh) else {
            return;
        };
        let s = self.scale();
        let origin_x = self.center_x * s - vw as f64 / 2.0;
        let origin_z = self.center_z * s - vh as f64 / 2.0;

        for tz in tz0..=tz1 {
            for tx in tx0..=tx1 {
                let sx = (tx as f64 * TILE_SIZE as f64 - origin_x).round() as i64;
                let sz = (tz as f64 * TILE_SIZE as f64 - origin_z).round() as i64;
                match source.fetch(tx, tz, self.zoom) {
                    Ok(Some(tile)) => blit_tile(raster, &tile.pixels, sx, sz),
                    Ok(None) => log::trace!("no tile at {}", tile_url(tx, tz, self.zoom)),
                    Err(err) => log::warn!("tile ({}, {}, {}): {}", tx, tz, self.zoom, err),
                }
            }
        }
    }
}

impl Default for MapView {
    fn default() -> Self {
        Self::new()
    }
}

fn checker_background(raster: &mut Raster<'_>) {
    let w = raster.width as usize;
    for (i, pixel) in raster.frame.chunks_exact_mut(4).enumerate() {
        let (x, y) = (i % w, i / w);
        let color = if ((x / 64) + (y / 64)) % 2 == 0 {
            PLACEHOLDER_A
        } else {
            PLACEHOLDER_B
        };
        pixel.copy_from_slice(&color);
    }
}

/// Copies a 512x512 RGBA tile to screen position (sx, sz), clipped.
fn blit_tile(raster: &mut Raster<'_>, pixels: &[u8], sx: i64, sz: i64) {
    let (w, h) = (raster.width as i64, raster.height as i64);
    let tile = TILE_SIZE as i64;
    for ty in 0..tile {
        let py = sz + ty;
        if py < 0 || py >= h {
            continue;
        }
        for tx in 0..tile {
            let px = sx + tx;
            if px < 0 || px >= w {
                continue;
            }
            let src = ((ty * tile + tx) * 4) as usize;
            let dst = ((py * w + px) * 4) as usize;
            if src + 4 <= pixels.len() && dst + 4 <= raster.frame.len() {
                raster.frame[dst..dst + 4].copy_from_slice(&pixels[src..src + 4]);
            }
        }
    }
}
