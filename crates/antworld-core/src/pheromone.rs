use crate::position::Position;

/// Integer cell coordinates inside a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Position at the cell's integer coordinates; truncates back to this cell.
    pub fn position(&self) -> Position {
        Position::new(self.x as f64, self.y as f64)
    }
}

/// Map a continuous position to its cell, or `None` outside `[0,width) x [0,height)`.
pub(crate) fn cell_at(width: usize, height: usize, p: &Position) -> Option<Cell> {
    let (x, y) = (p.x(), p.y());
    if x >= 0.0 && y >= 0.0 && x < width as f64 && y < height as f64 {
        Some(Cell::new(x as usize, y as usize))
    } else {
        None
    }
}

/// 2D grid of pheromone intensities, stored row-major.
#[derive(Clone, Debug)]
pub struct PheromoneField {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl PheromoneField {
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "field extents must be positive");
        Self {
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    pub fn cell(&self, p: &Position) -> Option<Cell> {
        cell_at(self.width, self.height, p)
    }

    /// Value at the cell containing `p`; 0.0 outside the grid.
    pub fn get(&self, p: &Position) -> f32 {
        self.cell(p).map_or(0.0, |c| self.at(c))
    }

    pub fn at(&self, cell: Cell) -> f32 {
        self.data[self.index(cell)]
    }

    pub fn add(&mut self, cell: Cell, amount: f32) {
        let idx = self.index(cell);
        self.data[idx] += amount;
    }

    pub fn set(&mut self, cell: Cell, value: f32) {
        let idx = self.index(cell);
        self.data[idx] = value;
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn total(&self) -> f64 {
        self.data.iter().map(|&v| v as f64).sum()
    }

    /// Exchange the backing storage with `buffer`, which must have the same length.
    pub(crate) fn swap_data(&mut self, buffer: &mut Vec<f32>) {
        debug_assert_eq!(buffer.len(), self.data.len(), "buffer shape mismatch");
        std::mem::swap(&mut self.data, buffer);
    }

    fn index(&self, cell: Cell) -> usize {
        debug_assert!(cell.x < self.width && cell.y < self.height);
        cell.y * self.width + cell.x
    }
}
