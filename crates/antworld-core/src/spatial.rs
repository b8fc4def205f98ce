use crate::position::Position;
use rstar::{PointDistance, RTree, RTreeObject, AABB};

/// Point entry for an active food source in the R*-tree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FoodLocation {
    pub id: u64,
    pub position: [f64; 2],
    pub radius: f64,
}

impl FoodLocation {
    pub fn covers(&self, point: &[f64; 2]) -> bool {
        self.distance_2(point) <= self.radius * self.radius
    }
}

impl RTreeObject for FoodLocation {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

impl PointDistance for FoodLocation {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.position[0] - point[0];
        let dy = self.position[1] - point[1];
        dx * dx + dy * dy
    }
}

/// Id of the source nearest to `point`. Among equally near sources the lowest id
/// (earliest inserted) wins.
pub fn nearest_source(tree: &RTree<FoodLocation>, point: &Position) -> Option<u64> {
    let query = point.to_array();
    let mut candidates = tree.nearest_neighbor_iter_with_distance_2(&query);
    let (first, best) = candidates.next()?;
    let mut chosen = first.id;
    for (loc, dist_2) in candidates {
        if dist_2 > best {
            break;
        }
        chosen = chosen.min(loc.id);
    }
    Some(chosen)
}

/// Whether any indexed source covers `point`. `max_radius` bounds the radius of
/// every entry in the tree.
pub fn is_covered(tree: &RTree<FoodLocation>, point: &Position, max_radius: f64) -> bool {
    let query = point.to_array();
    tree.locate_within_distance(query, max_radius * max_radius)
        .any(|loc| loc.covers(&query))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(id: u64, x: f64, y: f64, radius: f64) -> FoodLocation {
        FoodLocation {
            id,
            position: [x, y],
            radius,
        }
    }

    #[test]
    fn nearest_prefers_lowest_id_on_ties() {
        let mut tree = RTree::new();
        tree.insert(loc(5, 10.0, 0.0, 1.0));
        tree.insert(loc(2, -10.0, 0.0, 1.0));
        tree.insert(loc(9, 0.0, 10.0, 1.0));
        assert_eq!(nearest_source(&tree, &Position::new(0.0, 0.0)), Some(2));
        assert_eq!(nearest_source(&tree, &Position::new(9.0, 0.0)), Some(5));
    }

    #[test]
    fn nearest_on_empty_tree_is_none() {
        let tree: RTree<FoodLocation> = RTree::new();
        assert_eq!(nearest_source(&tree, &Position::new(0.0, 0.0)), None);
    }

    #[test]
    fn coverage_respects_each_entry_radius() {
        let tree = RTree::bulk_load(vec![loc(0, 0.0, 0.0, 2.0), loc(1, 10.0, 0.0, 5.0)]);
        assert!(is_covered(&tree, &Position::new(2.0, 0.0), 5.0));
        assert!(!is_covered(&tree, &Position::new(3.0, 0.0), 5.0));
        assert!(is_covered(&tree, &Position::new(5.0, 0.0), 5.0));
    }
}
