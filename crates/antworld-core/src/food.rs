use crate::pheromone::Cell;
use crate::position::Position;
use crate::spatial::{self, FoodLocation};
use rstar::RTree;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// A depletable food resource with a circular capture area.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FoodSource {
    id: u64,
    position: Position,
    radius: f64,
    remaining: u32,
}

impl FoodSource {
    pub(crate) fn new(id: u64, position: Position, radius: f64, units: u32) -> Self {
        Self {
            id,
            position,
            radius,
            remaining: units,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn has_food(&self) -> bool {
        self.remaining > 0
    }

    pub fn covers(&self, p: &Position) -> bool {
        self.position.is_within_radius(p, self.radius)
    }

    /// Remove one unit. No-op once empty.
    pub(crate) fn take_unit(&mut self) {
        if self.has_food() {
            self.remaining -= 1;
        }
    }

    fn location(&self) -> FoodLocation {
        FoodLocation {
            id: self.id,
            position: self.position.to_array(),
            radius: self.radius,
        }
    }
}

/// Active food sources together with the per-cell presence index derived from them.
///
/// `insert` and `remove` are the only ways to change the active set; both bring
/// the spatial index and the presence grid up to date before returning, so
/// `contains(cell)` always equals "some active source covers the cell".
#[derive(Clone, Debug)]
pub(crate) struct FoodSites {
    width: usize,
    height: usize,
    // Insertion order; ids increase monotonically along the vec.
    sources: Vec<FoodSource>,
    index: RTree<FoodLocation>,
    presence: Vec<bool>,
    next_id: u64,
    // Upper bound on the radius of any source ever inserted.
    max_radius: f64,
}

impl FoodSites {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            sources: Vec::new(),
            index: RTree::new(),
            presence: vec![false; width * height],
            next_id: 0,
            max_radius: 0.0,
        }
    }

    pub fn sources(&self) -> &[FoodSource] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.presence[cell.y * self.width + cell.x]
    }

    pub fn present_cells(&self) -> usize {
        self.presence.iter().filter(|&&p| p).count()
    }

    pub fn remaining_units(&self) -> u64 {
        self.sources.iter().map(|s| s.remaining as u64).sum()
    }

    pub fn nearest(&self, p: &Position) -> Option<u64> {
        spatial::nearest_source(&self.index, p)
    }

    /// Add a source and mark every cell it covers. Returns the new source's id.
    pub fn insert(&mut self, position: Position, radius: f64, units: u32) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        let source = FoodSource::new(id, position, radius, units);
        self.index.insert(source.location());
        self.max_radius = self.max_radius.max(radius);

        let (xs, ys) = self.bounding_box(&position, radius);
        for y in ys {
            for x in xs.clone() {
                if source.covers(&Cell::new(x, y).position()) {
                    self.presence[y * self.width + x] = true;
                }
            }
        }
        self.sources.push(source);
        id
    }

    /// Remove a source and clear the cells it covered, keeping cells that another
    /// active source still covers.
    pub fn remove(&mut self, id: u64) -> Option<FoodSource> {
        let slot = self.sources.iter().position(|s| s.id == id)?;
        let source = self.sources.remove(slot);
        self.index.remove(&source.location());

        let (xs, ys) = self.bounding_box(&source.position, source.radius);
        for y in ys {
            for x in xs.clone() {
                let cell = Cell::new(x, y).position();
                if source.covers(&cell) {
                    self.presence[y * self.width + x] =
                        spatial::is_covered(&self.index, &cell, self.max_radius);
                }
            }
        }
        Some(source)
    }

    /// Take one unit from the source and return what is left.
    pub fn take_unit(&mut self, id: u64) -> Option<u32> {
        let source = self.sources.iter_mut().find(|s| s.id == id)?;
        source.take_unit();
        Some(source.remaining)
    }

    fn bounding_box(
        &self,
        center: &Position,
        radius: f64,
    ) -> (RangeInclusive<usize>, RangeInclusive<usize>) {
        // Nothing beyond the larger grid extent can be inside the grid.
        let reach = radius.ceil().min(self.width.max(self.height) as f64) as i64;
        let cx = center.x() as i64;
        let cy = center.y() as i64;
        let clip = |c: i64, extent: usize| -> RangeInclusive<usize> {
            let lo = (c - reach).max(0);
            let hi = (c + reach).min(extent as i64 - 1);
            if lo > hi {
                // box lies entirely outside the grid
                return RangeInclusive::new(1, 0);
            }
            lo as usize..=hi as usize
        };
        (clip(cx, self.width), clip(cy, self.height))
    }
}
