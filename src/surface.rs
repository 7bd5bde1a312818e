/// RGBA color, straight alpha.
pub type Rgba = [u8; 4];

pub const fn rgb(r: u8, g: u8, b: u8) -> Rgba {
    [r, g, b, 255]
}

/// Drawing capability the renderer paints through.
///
/// Coordinates are logical pixels; implementations apply the uniform scale
/// set by `set_scale` (the clamped device pixel ratio) when rasterizing.
/// Colors with alpha below 255 are blended over existing pixels.
pub trait Surface {
    fn set_scale(&mut self, scale: f64);
    /// Fills the entire surface, ignoring the scale transform.
    fn clear(&mut self, color: Rgba);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba);
    /// Fills a rect with a top-to-bottom gradient. `stops` are
    /// (offset in [0, 1], color) pairs in ascending offset order.
    fn fill_vertical_gradient(&mut self, x: f64, y: f64, w: f64, h: f64, stops: &[(f64, Rgba)]);
    /// 1-px outline just inside the rect bounds.
    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba);
}

/// In-memory surface that records every draw call, for headless tests.
#[cfg(test)]
pub mod recording {
    use super::Rgba;

    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawOp {
        SetScale(f64),
        Clear(Rgba),
        FillRect(i64, i64, i64, i64, Rgba),
        Gradient(i64, i64, i64, i64, Vec<(i64, Rgba)>),
        StrokeRect(i64, i64, i64, i64, Rgba),
    }

    /// Captures draw ops with coordinates quantized to millipixels so the
    /// op streams of two renders can be compared for equality.
    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub ops: Vec<DrawOp>,
    }

    fn q(v: f64) -> i64 {
        (v * 1000.0).round() as i64
    }

    impl super::Surface for RecordingSurface {
        fn set_scale(&mut self, scale: f64) {
            self.ops.push(DrawOp::SetScale(scale));
        }

        fn clear(&mut self, color: Rgba) {
            self.ops.push(DrawOp::Clear(color));
        }

        fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba) {
            self.ops.push(DrawOp::FillRect(q(x), q(y), q(w), q(h), color));
        }

        fn fill_vertical_gradient(
            &mut self,
            x: f64,
            y: f64,
            w: f64,
            h: f64,
            stops: &[(f64, Rgba)],
        ) {
            let stops = stops.iter().map(|&(o, c)| (q(o), c)).collect();
            self.ops.push(DrawOp::Gradient(q(x), q(y), q(w), q(h), stops));
        }

        fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba) {
            self.ops.push(DrawOp::StrokeRect(q(x), q(y), q(w), q(h), color));
        }
    }
}
