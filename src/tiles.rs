use std::collections::HashMap;

use thiserror::Error;

/// Tiles are square RGBA rasters served by the world's tile server, which
/// this crate only knows as a capability.
pub const TILE_SIZE: u32 = 512;

/// Display zoom range; tiles only exist natively for `0..=MAX_NATIVE_ZOOM`.
pub const MIN_ZOOM: i32 = -1;
pub const MAX_ZOOM: i32 = 4;
pub const MIN_NATIVE_ZOOM: i32 = 0;
pub const MAX_NATIVE_ZOOM: i32 = 4;

#[derive(Error, Debug)]
pub enum TileError {
    #[error("tile transport error: {0}")]
    Transport(String),
    #[error("tile decode error: {0}")]
    Decode(String),
}

/// One fetched tile: `TILE_SIZE * TILE_SIZE` RGBA pixels, row-major.
#[derive(Debug, Clone)]
pub struct Tile {
    pub pixels: Vec<u8>,
}

impl Tile {
    pub fn solid(color: [u8; 4]) -> Self {
        let mut pixels = Vec::with_capacity((TILE_SIZE * TILE_SIZE * 4) as usize);
        for _ in 0..TILE_SIZE * TILE_SIZE {
            pixels.extend_from_slice(&color);
        }
        Self { pixels }
    }
}

/// URL scheme the reverse proxy expects.
pub fn tile_url(x: i32, y: i32, z: i32) -> String {
    format!("/tiles/{}/{}/{}/tile", x, y, z)
}

/// Source of map tiles. The HTTP transport behind the reverse proxy is an
/// external collaborator; implementations may cache, fetch lazily, or (as
/// the in-memory source below) hold everything up front. `Ok(None)` means
/// the tile does not exist at these coordinates.
pub trait TileSource {
    fn fetch(&mut self, x: i32, y: i32, z: i32) -> Result<Option<&Tile>, TileError>;
}

/// Tile source backed by a map, used for tests and offline rendering.
#[derive(Debug, Default)]
pub struct MemoryTileSource {
    tiles: HashMap<(i32, i32, i32), Tile>,
}

impl MemoryTileSource {
    pub fn insert(&mut self, x: i32, y: i32, z: i32, tile: Tile) {
        self.tiles.insert((x, y, z), tile);
    }
}

impl TileSource for MemoryTileSource {
    fn fetch(&mut self, x: i32, y: i32, z: i32) -> Result<Option<&Tile>, TileError> {
        Ok(self.tiles.get(&(x, y, z)))
    }
}
