use pixels::{Pixels, SurfaceTexture};
use winit::window::Window;

use crate::layout::Layout;
use crate::surface::{Rgba, Surface};

/// Owns the window frame buffer and presents it.
///
/// The buffer is sized to the layout's backing dimensions (logical size
/// times the clamped device pixel ratio); drawing goes through [`Raster`],
/// which applies the ratio as a uniform scale so callers work in logical
/// pixels.
pub struct FrameSurface {
    pixels: Pixels,
    buf_width: u32,
    buf_height: u32,
    scale: f64,
}

impl FrameSurface {
    pub fn new(window: &Window, layout: &Layout) -> Result<Self, pixels::Error> {
        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, window);
        let pixels = Pixels::new(layout.surface_width, layout.surface_height, surface_texture)?;
        Ok(Self {
            pixels,
            buf_width: layout.surface_width,
            buf_height: layout.surface_height,
            scale: layout.dpr,
        })
    }

    /// Resizes both the window surface and the backing buffer. Failures are
    /// logged and absorbed; the animation degrades instead of crashing.
    pub fn resize(&mut self, window_width: u32, window_height: u32, layout: &Layout) {
        if let Err(err) = self.pixels.resize_surface(window_width, window_height) {
            log::error!("failed to resize surface: {}", err);
        }
        if let Err(err) = self
            .pixels
            .resize_buffer(layout.surface_width, layout.surface_height)
        {
            log::error!("failed to resize buffer: {}", err);
        }
        self.buf_width = layout.surface_width;
        self.buf_height = layout.surface_height;
        self.scale = layout.dpr;
    }

    /// Borrows the frame for drawing.
    pub fn raster(&mut self) -> Raster<'_> {
        Raster {
            frame: self.pixels.frame_mut(),
            width: self.buf_width,
            height: self.buf_height,
            scale: self.scale,
        }
    }

    pub fn present(&mut self) -> Result<(), pixels::Error> {
        self.pixels.render()
    }
}

/// RGBA rasterizer over a borrowed frame, the production [`Surface`].
pub struct Raster<'a> {
    pub frame: &'a mut [u8],
    pub width: u32,
    pub height: u32,
    pub scale: f64,
}

impl Raster<'_> {
    #[inline]
    fn blend(frame: &mut [u8], idx: usize, color: Rgba) {
        let a = color[3] as u16;
        if a == 255 {
            frame[idx..idx + 3].copy_from_slice(&color[..3]);
            frame[idx + 3] = 255;
        } else if a > 0 {
            let inv = 255 - a;
            for c in 0..3 {
                frame[idx + c] = ((frame[idx + c] as u16 * inv + color[c] as u16 * a) / 255) as u8;
            }
            frame[idx + 3] = 255;
        }
    }

    /// Fills a device-pixel rect with bounds checks, blending if needed.
    fn fill_device_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgba) {
        let (w, h) = (self.width as i64, self.height as i64);
        for py in y0.max(0)..y1.min(h) {
            for px in x0.max(0)..x1.min(w) {
                let idx = ((py * w + px) * 4) as usize;
                if idx + 3 < self.frame.len() {
                    Self::blend(self.frame, idx, color);
                }
            }
        }
    }

    #[inline]
    fn to_device(&self, v: f64) -> i64 {
        (v * self.scale).round() as i64
    }
}

impl Surface for Raster<'_> {
    fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    fn clear(&mut self, color: Rgba) {
        for pixel in self.frame.chunks_exact_mut(4) {
            pixel.copy_from_slice(&[color[0], color[1], color[2], 255]);
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba) {
        let (x0, y0) = (self.to_device(x), self.to_device(y));
        let (x1, y1) = (self.to_device(x + w), self.to_device(y + h));
        self.fill_device_rect(x0, y0, x1, y1, color);
    }

    fn fill_vertical_gradient(&mut self, x: f64, y: f64, w: f64, h: f64, stops: &[(f64, Rgba)]) {
        if stops.is_empty() {
            return;
        }
        let (x0, y0) = (self.to_device(x), self.to_device(y));
        let (x1, y1) = (self.to_device(x + w), self.to_device(y + h));
        let span = (y1 - y0 - 1).max(1) as f64;
        for py in y0.max(0)..y1.min(self.height as i64) {
            let t = (py - y0) as f64 / span;
            let color = sample_stops(stops, t);
            self.fill_device_rect(x0, py, x1, py + 1, color);
        }
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba) {
        let (x0, y0) = (self.to_device(x), self.to_device(y));
        let (x1, y1) = (self.to_device(x + w), self.to_device(y + h));
        let t = self.scale.round().max(1.0) as i64;
        // Top, bottom, left, right, drawn just inside the bounds.
        self.fill_device_rect(x0, y0, x1, (y0 + t).min(y1), color);
        self.fill_device_rect(x0, (y1 - t).max(y0), x1, y1, color);
        self.fill_device_rect(x0, y0, (x0 + t).min(x1), y1, color);
        self.fill_device_rect((x1 - t).max(x0), y0, x1, y1, color);
    }
}

/// Linear interpolation across ordered gradient stops.
fn sample_stops(stops: &[(f64, Rgba)], t: f64) -> Rgba {
    let t = t.clamp(0.0, 1.0);
    let first = stops[0];
    if t <= first.0 {
        return first.1;
    }
    for pair in stops.windows(2) {
        let (o0, c0) = pair[0];
        let (o1, c1) = pair[1];
        if t <= o1 {
            let f = if o1 > o0 { (t - o0) / (o1 - o0) } else { 1.0 };
            let mut out = [0u8; 4];
            for i in 0..4 {
                out[i] = (c0[i] as f64 + (c1[i] as f64 - c0[i] as f64) * f).round() as u8;
            }
            return out;
        }
    }
    stops[stops.len() - 1].1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::rgb;

    fn raster(buf: &mut Vec<u8>, width: u32, height: u32, scale: f64) -> Raster<'_> {
        buf.resize((width * height * 4) as usize, 0);
        Raster {
            frame: buf,
            width,
            height,
            scale,
        }
    }

    fn pixel(buf: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * width + x) * 4) as usize;
        [buf[idx], buf[idx + 1], buf[idx + 2], buf[idx + 3]]
    }

    #[test]
    fn clear_then_fill_produces_expected_pixels() {
        let mut buf = Vec::new();
        let mut r = raster(&mut buf, 8, 8, 1.0);
        r.clear(rgb(10, 20, 30));
        r.fill_rect(2.0, 2.0, 3.0, 3.0, rgb(200, 100, 50));
        assert_eq!(pixel(&buf, 8, 0, 0), [10, 20, 30, 255]);
        assert_eq!(pixel(&buf, 8, 2, 2), [200, 100, 50, 255]);
        assert_eq!(pixel(&buf, 8, 4, 4), [200, 100, 50, 255]);
        assert_eq!(pixel(&buf, 8, 5, 5), [10, 20, 30, 255]);
    }

    #[test]
    fn scale_maps_logical_to_device_pixels() {
        let mut buf = Vec::new();
        let mut r = raster(&mut buf, 16, 16, 1.0);
        r.set_scale(2.0);
        r.fill_rect(2.0, 2.0, 2.0, 2.0, rgb(255, 0, 0));
        // Logical (2,2)..(4,4) lands on device (4,4)..(8,8).
        assert_eq!(pixel(&buf, 16, 4, 4), [255, 0, 0, 255]);
        assert_eq!(pixel(&buf, 16, 7, 7), [255, 0, 0, 255]);
        assert_eq!(pixel(&buf, 16, 3, 3), [0, 0, 0, 0]);
        assert_eq!(pixel(&buf, 16, 8, 8), [0, 0, 0, 0]);
    }

    #[test]
    fn translucent_fill_blends_over_background() {
        let mut buf = Vec::new();
        let mut r = raster(&mut buf, 4, 4, 1.0);
        r.clear(rgb(100, 100, 100));
        r.fill_rect(0.0, 0.0, 4.0, 4.0, [0, 0, 0, 38]);
        let p = pixel(&buf, 4, 1, 1);
        // 100 * (255 - 38) / 255 = 85.
        assert_eq!(p, [85, 85, 85, 255]);
    }

    #[test]
    fn gradient_hits_stop_colors_at_endpoints() {
        let mut buf = Vec::new();
        let mut r = raster(&mut buf, 4, 10, 1.0);
        let stops = [(0.0, rgb(10, 0, 0)), (1.0, rgb(250, 0, 0))];
        r.fill_vertical_gradient(0.0, 0.0, 4.0, 10.0, &stops);
        assert_eq!(pixel(&buf, 4, 0, 0), [10, 0, 0, 255]);
        assert_eq!(pixel(&buf, 4, 0, 9), [250, 0, 0, 255]);
        // Monotone in between.
        assert!(pixel(&buf, 4, 0, 5)[0] > pixel(&buf, 4, 0, 2)[0]);
    }

    #[test]
    fn stroke_leaves_interior_untouched() {
        let mut buf = Vec::new();
        let mut r = raster(&mut buf, 8, 8, 1.0);
        r.clear(rgb(0, 0, 0));
        r.stroke_rect(1.0, 1.0, 6.0, 6.0, rgb(255, 255, 255));
        assert_eq!(pixel(&buf, 8, 1, 1), [255, 255, 255, 255]);
        assert_eq!(pixel(&buf, 8, 6, 6), [255, 255, 255, 255]);
        assert_eq!(pixel(&buf, 8, 3, 3), [0, 0, 0, 255]);
    }

    #[test]
    fn out_of_bounds_draws_are_clipped() {
        let mut buf = Vec::new();
        let mut r = raster(&mut buf, 4, 4, 1.0);
        r.fill_rect(-2.0, -2.0, 100.0, 100.0, rgb(1, 2, 3));
        assert_eq!(pixel(&buf, 4, 0, 0), [1, 2, 3, 255]);
        assert_eq!(pixel(&buf, 4, 3, 3), [1, 2, 3, 255]);
    }

    #[test]
    fn repeated_renders_produce_identical_frames() {
        use crate::life::Grid;
        use crate::renderer::GardenRenderer;

        let mut g = Grid::new(10, 10);
        g.set_alive(1, 1);
        g.set_alive(4, 7);
        let renderer = GardenRenderer::new(8);

        let mut a = Vec::new();
        let mut b = Vec::new();
        renderer.render(&g, &mut raster(&mut a, 80, 80, 1.0));
        renderer.render(&g, &mut raster(&mut b, 80, 80, 1.0));
        assert_eq!(a, b);
    }
}
