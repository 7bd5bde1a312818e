/// Resolved geometry for one viewport size.
///
/// Grid dimensions and all drawing coordinates are in logical (CSS-style)
/// pixels; the backing frame buffer is `dpr` times larger in each axis and
/// the surface applies `dpr` as a uniform scale so the renderer never sees
/// the difference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub cols: usize,
    pub rows: usize,
    /// Device pixel ratio, clamped to [1, 2].
    pub dpr: f64,
    /// Logical viewport size in pixels.
    pub logical_width: u32,
    pub logical_height: u32,
    /// Backing surface size in device pixels.
    pub surface_width: u32,
    pub surface_height: u32,
}

impl Layout {
    /// Computes grid and surface geometry from a logical viewport size.
    ///
    /// The clamp keeps very-high-DPI displays from quadrupling the frame
    /// buffer; the floor of 10 keeps the automaton usable on degenerate
    /// viewports and rules out zero-sized buffers downstream.
    pub fn compute(
        logical_width: u32,
        logical_height: u32,
        cell_size: u32,
        scale_factor: f64,
    ) -> Self {
        let dpr = scale_factor.clamp(1.0, 2.0);
        let cols = ((logical_width / cell_size.max(1)) as usize).max(10);
        let rows = ((logical_height / cell_size.max(1)) as usize).max(10);
        Self {
            cols,
            rows,
            dpr,
            logical_width,
            logical_height,
            surface_width: (logical_width as f64 * dpr).floor() as u32,
            surface_height: (logical_height as f64 * dpr).floor() as u32,
        }
    }

}
