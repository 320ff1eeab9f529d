//! Brute-force queries over a [`Subdivision`] (§4.S): the reference
//! implementation [`crate::point_location`]'s accelerated `find` is checked
//! against.

use super::{EdgeId, FaceId, Subdivision, VertexId};
use crate::hull::{point_in_polygon, point_on_segment, PointInPolygon};
use crate::types::{CompareX, Point};

/// The element `find` resolves a query point to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubdivisionElement {
    Face(FaceId),
    Edge(EdgeId),
    Vertex(VertexId),
}

impl Subdivision {
    /// Exact (under ε) vertex lookup, O(log n) via the sorted vertex array.
    pub fn find_vertex(&self, p: Point) -> Option<VertexId> {
        self.find_vertex_index(p).map(|i| self.vertex_order[i].1)
    }

    /// Nearest vertex by Euclidean distance, O(√n) via [`CompareX::find_nearest`].
    pub fn find_nearest_vertex(&self, q: Point) -> Option<VertexId> {
        if self.vertex_order.is_empty() {
            return None;
        }
        let points: Vec<Point> = self.vertex_order.iter().map(|&(p, _)| p).collect();
        let idx = CompareX::new(self.eps).find_nearest(&points, &q)?;
        Some(self.vertex_order[idx].1)
    }

    /// The outgoing half-edge from `origin` whose destination matches `destination`
    /// under ε, rotating through `origin`'s outgoing edges (§4.S).
    pub fn find_edge(&self, origin: VertexId, destination: Point) -> Option<EdgeId> {
        self.outgoing(origin)
            .iter()
            .copied()
            .find(|&e| self.point_of(self.destination(e)).eq_eps(&destination, self.eps))
    }

    /// Nearest half-edge to `q` by point-to-segment distance, with the
    /// distance itself. Brute scan (§4.S); this crate does not maintain a
    /// bounding-box index, so there is no pruning beyond the linear scan.
    pub fn find_nearest_edge(&self, q: Point) -> Option<(EdgeId, f64)> {
        let mut best: Option<(EdgeId, f64)> = None;
        for e in self.edges() {
            let a = self.point_of(self.origin(e));
            let b = self.point_of(self.destination(e));
            let d = point_segment_distance(a, b, q);
            if best.map_or(true, |(_, bd)| d < bd) {
                best = Some((e, d));
            }
        }
        best
    }

    /// Resolves `q` to a vertex, an edge, or a face — vertex ties beat edge
    /// ties beat face containment (§4.S, §9: "the source always returns the
    /// Vertex variant").
    pub fn find(&self, q: Point) -> SubdivisionElement {
        if let Some(v) = self.find_vertex(q) {
            return SubdivisionElement::Vertex(v);
        }
        for e in self.edges() {
            let a = self.point_of(self.origin(e));
            let b = self.point_of(self.destination(e));
            if point_on_segment(a, b, q, self.eps) {
                return SubdivisionElement::Edge(e);
            }
        }
        for f in self.faces() {
            if f == FaceId(0) {
                continue;
            }
            let outer = match self.outer_edge(f) {
                Some(e) => e,
                None => continue,
            };
            let poly = self.cycle_points(outer);
            if !matches!(point_in_polygon(&poly, q, self.eps), PointInPolygon::Inside) {
                continue;
            }
            let in_hole = self.inner_edges(f).iter().any(|&h| {
                let hole = self.cycle_points(h);
                matches!(point_in_polygon(&hole, q, self.eps), PointInPolygon::Inside)
            });
            if !in_hole {
                return SubdivisionElement::Face(f);
            }
        }
        SubdivisionElement::Face(FaceId(0))
    }
}

fn point_segment_distance(a: Point, b: Point, q: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.square_length();
    if len_sq == 0.0 {
        return a.distance(&q);
    }
    let t = ((q - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    let proj = a + ab * t;
    proj.distance(&q)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subdivision::build::from_polygons;

    #[test]
    fn find_resolves_vertex_edge_and_face() {
        let square = vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 0.0),
        ];
        let sub = from_polygons(&[square], 1e-9);
        assert!(matches!(
            sub.find(Point::new(0.0, 0.0)),
            SubdivisionElement::Vertex(_)
        ));
        assert!(matches!(
            sub.find(Point::new(0.0, 5.0)),
            SubdivisionElement::Edge(_)
        ));
        assert!(matches!(
            sub.find(Point::new(5.0, 5.0)),
            SubdivisionElement::Face(f) if f != FaceId(0)
        ));
        assert!(matches!(
            sub.find(Point::new(50.0, 50.0)),
            SubdivisionElement::Face(FaceId(0))
        ));
    }

    #[test]
    fn concentric_nested_triangles_resolve_in_insertion_order() {
        // Four nested rectangles centered on the y-axis; successively
        // smaller, so a point above all of them hits only the unbounded
        // face while one inside each ring resolves to a deeper bounded face.
        let ring = |half: f64| {
            vec![
                Point::new(-half, -half),
                Point::new(-half, half),
                Point::new(half, half),
                Point::new(half, -half),
            ]
        };
        let sub = from_polygons(&[ring(8.0), ring(6.0), ring(4.0), ring(2.0)], 1e-9);
        assert!(matches!(
            sub.find(Point::new(0.0, 10.0)),
            SubdivisionElement::Face(FaceId(0))
        ));
        for y in [7.0, 5.0, 3.0, 1.0] {
            assert!(matches!(
                sub.find(Point::new(0.0, y)),
                SubdivisionElement::Face(f) if f != FaceId(0)
            ));
        }
    }

    #[test]
    fn find_nearest_edge_picks_closest_segment() {
        use crate::subdivision::build::from_lines;
        use crate::types::LineSegment;
        let segs = vec![LineSegment::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0))];
        let sub = from_lines(&segs, 1e-9);
        let (_, d) = sub.find_nearest_edge(Point::new(5.0, 1.0)).unwrap();
        assert!((d - 1.0).abs() < 1e-9);
    }
}
