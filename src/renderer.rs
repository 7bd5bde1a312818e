use crate::life::Grid;
use crate::surface::{rgb, Rgba, Surface};

// Programmer-art grass block palette.
const SKY: Rgba = rgb(0x7F, 0xA1, 0xFF);
const GRASS_TOP: Rgba = rgb(0x7C, 0xBD, 0x6B);
const GRASS_SHADE: Rgba = [106, 168, 79, 77]; // 30% overlay
const DIRT_TOP: Rgba = rgb(0x96, 0x68, 0x3B);
const DIRT_MID: Rgba = rgb(0x8B, 0x5A, 0x2B);
const DIRT_BOTTOM: Rgba = rgb(0x7A, 0x4F, 0x1F);
const OUTLINE: Rgba = [0, 0, 0, 38]; // 15% black

/// Paints a grid as textured voxel blocks: grass top, checkered shading,
/// a dirt band below each block for the 3D face, and a faint outline.
/// Stateless apart from the cell size; rendering the same grid twice
/// produces identical pixels.
pub struct GardenRenderer {
    cell_size: f64,
}

impl GardenRenderer {
    pub fn new(cell_size: u32) -> Self {
        Self {
            cell_size: cell_size as f64,
        }
    }

    /// Depth of the dirt face drawn under each block.
    fn depth(&self) -> f64 {
        (self.cell_size * 0.7).floor().max(4.0)
    }

    pub fn render(&self, grid: &Grid, surface: &mut dyn Surface) {
        surface.clear(SKY);

        let cell = self.cell_size;
        let half = cell / 2.0;
        let depth = self.depth();

        for y in 0..grid.rows() {
            for x in 0..grid.cols() {
                if !grid.is_alive(x, y) {
                    continue;
                }
                let px = x as f64 * cell;
                let py = y as f64 * cell;

                surface.fill_rect(px, py, cell, cell, GRASS_TOP);

                // Checkered shading on opposite quarters of the top face.
                surface.fill_rect(px, py, half, half, GRASS_SHADE);
                surface.fill_rect(px + half, py + half, half, half, GRASS_SHADE);

                surface.fill_vertical_gradient(
                    px,
                    py + cell,
                    cell,
                    depth,
                    &[(0.0, DIRT_TOP), (0.5, DIRT_MID), (1.0, DIRT_BOTTOM)],
                );

                surface.stroke_rect(px, py, cell, cell, OUTLINE);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::recording::{DrawOp, RecordingSurface};

    fn small_grid() -> Grid {
        let mut g = Grid::new(10, 10);
        g.set_alive(0, 0);
        g.set_alive(3, 2);
        g.set_alive(9, 9);
        g
    }

    #[test]
    fn render_is_idempotent() {
        let grid = small_grid();
        let renderer = GardenRenderer::new(32);
        let mut first = RecordingSurface::default();
        let mut second = RecordingSurface::default();
        renderer.render(&grid, &mut first);
        renderer.render(&grid, &mut second);
        assert_eq!(first.ops, second.ops);
    }

    #[test]
    fn clears_before_painting_and_skips_dead_cells() {
        let grid = small_grid();
        let renderer = GardenRenderer::new(32);
        let mut surface = RecordingSurface::default();
        renderer.render(&grid, &mut surface);

        assert_eq!(surface.ops[0], DrawOp::Clear(SKY));
        // 3 live cells, 5 draw calls each: top + 2 shading overlays as
        // fills, one gradient band, one outline.
        let fills = surface
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::FillRect(..)))
            .count();
        let gradients = surface
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Gradient(..)))
            .count();
        let strokes = surface
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::StrokeRect(..)))
            .count();
        assert_eq!(fills, 9);
        assert_eq!(gradients, 3);
        assert_eq!(strokes, 3);
    }

    #[test]
    fn blocks_land_at_cell_origins() {
        let mut g = Grid::new(10, 10);
        g.set_alive(3, 2);
        let renderer = GardenRenderer::new(32);
        let mut surface = RecordingSurface::default();
        renderer.render(&g, &mut surface);
        assert!(surface
            .ops
            .contains(&DrawOp::FillRect(96_000, 64_000, 32_000, 32_000, GRASS_TOP)));
    }

    #[test]
    fn dirt_depth_has_a_floor() {
        assert_eq!(GardenRenderer::new(32).depth(), 22.0);
        assert_eq!(GardenRenderer::new(48).depth(), 33.0);
        assert_eq!(GardenRenderer::new(4).depth(), 4.0);
    }
}
