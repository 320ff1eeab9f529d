//! All-pairs intersection of a set of straight segments (§4.M), in two
//! interchangeable variants with identical observable output: [`brute_force`]
//! (the O(n²) reference) and [`sweep`] (Bentley–Ottmann-style).

mod active;
mod sweep_impl;

use crate::line_intersection::intersect;
use crate::line_location::LineLocation;
use crate::types::{CompareY, LineSegment, Point};

pub use sweep_impl::sweep;

/// A point shared by two or more input segments (§3). `participants` is
/// sorted by segment index; each location is one of
/// `{Start, Between, End}` — `Before`/`After` only make sense for an
/// ordered pair of segments and never appear here.
#[derive(Clone, Debug, PartialEq)]
pub struct MultiLinePoint {
    pub point: Point,
    pub participants: Vec<(usize, LineLocation)>,
}

impl MultiLinePoint {
    fn new(point: Point) -> Self {
        MultiLinePoint {
            point,
            participants: Vec::new(),
        }
    }

    /// Inserts or strengthens a participant's location. `Start`/`End`
    /// outrank `Between` when the same segment is recorded twice for the
    /// same clustered point (can happen when epsilon merges two nearby
    /// raw intersection points).
    fn record(&mut self, segment: usize, location: LineLocation) {
        if let Some(existing) = self.participants.iter_mut().find(|(s, _)| *s == segment) {
            if existing.1 == LineLocation::Between && location != LineLocation::Between {
                existing.1 = location;
            }
        } else {
            self.participants.push((segment, location));
        }
    }
}

/// Reference O(n²) implementation: every pair is tested directly, and
/// results are grouped into clusters by coordinate equality under `eps`.
pub fn brute_force(segments: &[LineSegment], eps: f64) -> Vec<MultiLinePoint> {
    let mut clusters: Vec<MultiLinePoint> = Vec::new();

    let mut add = |point: Point, segment: usize, location: LineLocation| {
        if let Some(c) = clusters.iter_mut().find(|c| c.point.eq_eps(&point, eps)) {
            c.record(segment, location);
        } else {
            let mut c = MultiLinePoint::new(point);
            c.record(segment, location);
            clusters.push(c);
        }
    };

    for i in 0..segments.len() {
        for j in (i + 1)..segments.len() {
            let r = intersect(segments[i], segments[j], eps);
            let Some(p) = r.shared else { continue };
            let in_range = |loc: LineLocation| {
                matches!(
                    loc,
                    LineLocation::Start | LineLocation::Between | LineLocation::End
                )
            };
            if !in_range(r.location_a) || !in_range(r.location_b) {
                continue;
            }
            add(p, i, r.location_a);
            add(p, j, r.location_b);
        }
    }

    clusters.retain(|c| c.participants.len() >= 2);
    for c in &mut clusters {
        c.participants.sort_by_key(|(s, _)| *s);
    }
    clusters.sort_by(|a, b| CompareY::new(eps).compare(&a.point, &b.point));
    log::debug!(
        "multi_intersection::brute_force: {} segments -> {} points",
        segments.len(),
        clusters.len()
    );
    clusters
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_of_lines_through_one_point() {
        let mut segments = Vec::new();
        for k in 0..100 {
            let kx = k as f64;
            segments.push(LineSegment::new(
                Point::new(10.0 * kx, 0.0),
                Point::new(1000.0 - 10.0 * kx, 1000.0),
            ));
        }
        let points = brute_force(&segments, 1e-6);
        assert_eq!(points.len(), 1);
        let p = &points[0];
        assert!(p.point.eq_eps(&Point::new(500.0, 500.0), 1e-6));
        assert_eq!(p.participants.len(), 100);
        assert!(p
            .participants
            .iter()
            .all(|(_, loc)| *loc == LineLocation::Between));
    }

    #[test]
    fn no_intersections_for_disjoint_segments() {
        let segments = vec![
            LineSegment::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0)),
            LineSegment::new(Point::new(0.0, 5.0), Point::new(1.0, 5.0)),
        ];
        assert!(brute_force(&segments, 1e-9).is_empty());
    }

    #[test]
    fn shared_endpoint_is_reported() {
        let segments = vec![
            LineSegment::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0)),
            LineSegment::new(Point::new(1.0, 1.0), Point::new(2.0, 0.0)),
        ];
        let points = brute_force(&segments, 1e-9);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].point, Point::new(1.0, 1.0));
        let locs: Vec<_> = points[0].participants.iter().map(|(_, l)| *l).collect();
        assert!(locs.contains(&LineLocation::End));
        assert!(locs.contains(&LineLocation::Start));
    }
}
