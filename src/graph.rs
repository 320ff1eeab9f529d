//! Graph adapter (§4.G): presents a [`crate::subdivision::Subdivision`] (and,
//! via [`crate::polygon_grid`], a regular cell tiling) as a plain 2D-graph
//! interface, the way `GridAdapter` unifies rectangular and hex grids behind
//! one trait regardless of the concrete neighbor rule underneath.

use crate::subdivision::{Subdivision, VertexId};
use crate::types::Point;

/// A 2D graph: nodes carry a position, `get_neighbors` lists adjacency,
/// `get_distance` is Euclidean between two nodes' positions.
pub trait Graph2D {
    type Node: Copy + Eq;

    fn position(&self, node: Self::Node) -> Point;
    fn get_neighbors(&self, node: Self::Node) -> Vec<Self::Node>;
    fn get_nearest_node(&self, q: Point) -> Option<Self::Node>;

    /// Exact (not epsilon) containment check, per §4.G.
    fn contains(&self, q: Point) -> bool;

    fn get_distance(&self, a: Self::Node, b: Self::Node) -> f64 {
        self.position(a).distance(&self.position(b))
    }
}

impl Graph2D for Subdivision {
    type Node = VertexId;

    fn position(&self, node: VertexId) -> Point {
        self.point_of(node)
    }

    /// Destinations of `v`'s outgoing half-edges, in the subdivision's
    /// angular rotation order (§4.G).
    fn get_neighbors(&self, node: VertexId) -> Vec<VertexId> {
        self.outgoing(node)
            .iter()
            .map(|&e| self.destination(e))
            .collect()
    }

    fn get_nearest_node(&self, q: Point) -> Option<VertexId> {
        self.find_nearest_vertex(q)
    }

    fn contains(&self, q: Point) -> bool {
        self.find_vertex(q).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subdivision::from_polygons;

    #[test]
    fn subdivision_graph_neighbors_match_square_degree() {
        let square = vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 0.0),
        ];
        let sub = from_polygons(&[square], 1e-9);
        for v in sub.vertices() {
            assert_eq!(sub.get_neighbors(v).len(), 2);
        }
    }

    #[test]
    fn get_distance_is_euclidean() {
        let square = vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 3.0),
            Point::new(4.0, 3.0),
            Point::new(4.0, 0.0),
        ];
        let sub = from_polygons(&[square], 1e-9);
        let a = sub.find_vertex(Point::new(0.0, 0.0)).unwrap();
        let b = sub.find_vertex(Point::new(4.0, 3.0)).unwrap();
        assert!((sub.get_distance(a, b) - 5.0).abs() < 1e-9);
    }
}
