use rand::Rng;

/// Double-buffered Game-of-Life grid on a toroidal surface.
///
/// `cells` is the live generation, `scratch` is only written during a step.
/// Both are flat row-major `u8` buffers holding exactly 0 (dead) or 1 (alive).
#[derive(Debug, Clone)]
pub struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<u8>,
    scratch: Vec<u8>,
}

impl Grid {
    /// Allocates an all-dead grid. Dimensions must be at least 1; the layout
    /// manager never produces anything below 10.
    pub fn new(cols: usize, rows: usize) -> Self {
        debug_assert!(cols >= 1 && rows >= 1);
        Self {
            cols,
            rows,
            cells: vec![0; cols * rows],
            scratch: vec![0; cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Live generation, row-major.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.cols + x
    }

    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.cells[self.idx(x, y)] == 1
    }

    #[cfg(test)]
    pub fn set_alive(&mut self, x: usize, y: usize) {
        let i = self.idx(x, y);
        self.cells[i] = 1;
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == 1).count()
    }

    /// Clears the grid and activates `floor(cols * rows * density)` cells at
    /// uniformly random coordinates, sampled with replacement. Duplicate
    /// picks are allowed, so the resulting live count may fall slightly
    /// below the nominal target.
    pub fn seed_random<R: Rng + ?Sized>(&mut self, density: f64, rng: &mut R) {
        self.cells.fill(0);
        let total = (self.cols as f64 * self.rows as f64 * density).floor() as usize;
        for _ in 0..total {
            let x = rng.random_range(0..self.cols);
            let y = rng.random_range(0..self.rows);
            let i = self.idx(x, y);
            self.cells[i] = 1;
        }
    }

    /// Advances the automaton one generation.
    ///
    /// Reads only `cells`, writes each `scratch` cell exactly once, then
    /// swaps the buffer roles. Neighbor lookups wrap modulo the grid
    /// dimensions, so the surface is a closed torus.
    pub fn step(&mut self) {
        let (cols, rows) = (self.cols, self.rows);
        for y in 0..rows {
            let y_up = if y == 0 { rows - 1 } else { y - 1 };
            let y_dn = if y == rows - 1 { 0 } else { y + 1 };
            for x in 0..cols {
                let x_lt = if x == 0 { cols - 1 } else { x - 1 };
                let x_rt = if x == cols - 1 { 0 } else { x + 1 };
                let n = self.cells[y_up * cols + x_lt]
                    + self.cells[y_up * cols + x]
                    + self.cells[y_up * cols + x_rt]
                    + self.cells[y * cols + x_lt]
                    + self.cells[y * cols + x_rt]
                    + self.cells[y_dn * cols + x_lt]
                    + self.cells[y_dn * cols + x]
                    + self.cells[y_dn * cols + x_rt];
                let alive = self.cells[y * cols + x] == 1;
                self.scratch[y * cols + x] = if n == 3 || (alive && n == 2) { 1 } else { 0 };
            }
        }
        std::mem::swap(&mut self.cells, &mut self.scratch);
    }
}
