use serde::{Deserialize, Serialize};

/// Immutable point in continuous world space.
///
/// Grid lookups truncate the coordinates to the containing cell; distance
/// queries use the raw coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    x: f64,
    y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn distance_2(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn distance(&self, other: &Position) -> f64 {
        self.distance_2(other).sqrt()
    }

    /// True when `other` lies within Euclidean distance `radius` (inclusive).
    pub fn is_within_radius(&self, other: &Position, radius: f64) -> bool {
        self.distance_2(other) <= radius * radius
    }

    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

#[cfg(test)]
mod tests {
    use super::Position;

    #[test]
    fn radius_check_is_inclusive() {
        let a = Position::new(0.0, 0.0);
        assert!(a.is_within_radius(&Position::new(3.0, 4.0), 5.0));
        assert!(!a.is_within_radius(&Position::new(3.0, 4.1), 5.0));
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Position::new(1.5, -2.0);
        let b = Position::new(-4.0, 7.25);
        assert!((a.distance(&b) - b.distance(&a)).abs() < f64::EPSILON);
    }
}
