//! Map overlay (§1, §4.S): merges two subdivisions into the subdivision of
//! their combined arrangement. Collects every undirected edge's geometry
//! from both inputs and re-runs the general [`super::build::from_lines`]
//! construction over the union, the same way [`super::build::from_polygons`]
//! reduces to [`super::build::from_lines`] rather than hand-rolling a
//! separate incremental merge.

use super::{Subdivision, VertexId};
use crate::types::LineSegment;

fn edges_of(sub: &Subdivision) -> Vec<LineSegment> {
    let mut segments = Vec::new();
    for e in sub.edges() {
        // Each undirected edge owns two half-edges; emit it once, when
        // visited from the smaller of its two endpoint ids, to avoid
        // duplicating every segment.
        let twin = sub.twin(e);
        if e.0 > twin.0 {
            continue;
        }
        let origin: VertexId = sub.origin(e);
        let dest: VertexId = sub.destination(e);
        segments.push(LineSegment::new(sub.point_of(origin), sub.point_of(dest)));
    }
    segments
}

/// Merges `a` and `b` into a single subdivision covering the union of both
/// arrangements' edges. Uses the tighter (smaller) of the two epsilons, so
/// neither input's tolerance is silently loosened.
pub fn overlay(a: &Subdivision, b: &Subdivision) -> Subdivision {
    let eps = a.epsilon().min(b.epsilon());
    let (seg_a, seg_b) = (edges_of(a), edges_of(b));
    log::debug!(
        "subdivision::overlay: merging {} + {} edges at eps={}",
        seg_a.len(),
        seg_b.len(),
        eps
    );
    let mut segments = seg_a;
    segments.extend(seg_b);
    super::build::from_lines(&segments, eps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subdivision::build::from_polygons;
    use crate::types::Point;

    #[test]
    fn overlay_of_two_disjoint_squares_has_two_bounded_faces() {
        let left = vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 0.0),
        ];
        let right = vec![
            Point::new(5.0, 0.0),
            Point::new(5.0, 1.0),
            Point::new(6.0, 1.0),
            Point::new(6.0, 0.0),
        ];
        let a = from_polygons(&[left], 1e-9);
        let b = from_polygons(&[right], 1e-9);
        let merged = overlay(&a, &b);
        assert_eq!(merged.face_count(), 3);
    }

    #[test]
    fn overlay_of_crossing_squares_splits_into_more_faces() {
        let sq_a = vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 2.0),
            Point::new(2.0, 2.0),
            Point::new(2.0, 0.0),
        ];
        let sq_b = vec![
            Point::new(1.0, 1.0),
            Point::new(1.0, 3.0),
            Point::new(3.0, 3.0),
            Point::new(3.0, 1.0),
        ];
        let a = from_polygons(&[sq_a], 1e-9);
        let b = from_polygons(&[sq_b], 1e-9);
        let merged = overlay(&a, &b);
        // The two overlapping squares split into three bounded regions
        // (a-only, overlap, b-only) plus the unbounded face.
        assert_eq!(merged.face_count(), 4);
    }
}
