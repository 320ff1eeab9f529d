//! Bentley–Ottmann-style sweep (§4.M). Segments are swept left to right;
//! an event queue holds left-endpoint, right-endpoint, and (discovered)
//! intersection events, and a status structure tracks the segments the
//! sweep line currently crosses, ordered top-to-bottom by their y at the
//! current sweep position.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::active::ActiveSet;
use super::MultiLinePoint;
use crate::line_intersection::intersect;
use crate::line_location::LineLocation;
use crate::types::{CompareX, LineSegment, Point};

/// Event points are bucketed onto a grid of cell size `max(eps, 1e-9)` so
/// that, per §4.M, "an event point absorbs any other event point within
/// eps in both axes." A grid bucket is a practical, easily-verified stand-in
/// for full union-find merging of near-coincident floating point events.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
struct GridKey(i64, i64);

fn grid_key(p: Point, cell: f64) -> GridKey {
    GridKey((p.x / cell).round() as i64, (p.y / cell).round() as i64)
}

#[derive(Debug, Default)]
struct EventBucket {
    point: Option<Point>,
    left: Vec<usize>,
    right: Vec<usize>,
}

/// y-coordinate of `seg`'s carrier at `x`, used to order the active status
/// structure; vertical segments fall back to their lower endpoint.
fn y_at_x(seg: LineSegment, x: f64) -> f64 {
    let v = seg.vector();
    if v.x.abs() < 1e-12 {
        seg.start.y.min(seg.end.y)
    } else {
        seg.start.y + v.y * (x - seg.start.x) / v.x
    }
}

fn status_order(segments: &[LineSegment], x: f64, a: usize, b: usize) -> Ordering {
    let ya = y_at_x(segments[a], x);
    let yb = y_at_x(segments[b], x);
    ya.partial_cmp(&yb).unwrap_or(Ordering::Equal).then_with(|| {
        segments[a]
            .angle()
            .partial_cmp(&segments[b].angle())
            .unwrap_or(Ordering::Equal)
    })
}

fn carrier_contains(seg: LineSegment, p: Point, eps: f64) -> bool {
    let v = seg.vector();
    let len = v.length();
    if len == 0.0 {
        return seg.start.eq_eps(&p, eps);
    }
    let w = p - seg.start;
    let cross = w.cross(&v).abs() / len;
    if cross > eps {
        return false;
    }
    let t = w.dot(&v) / (len * len);
    t >= -eps / len && t <= 1.0 + eps / len
}

struct EventQueue {
    cell: f64,
    buckets: BTreeMap<GridKey, EventBucket>,
}

impl EventQueue {
    fn new(cell: f64) -> Self {
        EventQueue {
            cell,
            buckets: BTreeMap::new(),
        }
    }

    fn bucket_mut(&mut self, p: Point) -> &mut EventBucket {
        let key = grid_key(p, self.cell);
        let entry = self.buckets.entry(key).or_default();
        if entry.point.is_none() {
            entry.point = Some(p);
        }
        entry
    }

    fn push_left(&mut self, p: Point, seg: usize) {
        self.bucket_mut(p).left.push(seg);
    }

    fn push_right(&mut self, p: Point, seg: usize) {
        self.bucket_mut(p).right.push(seg);
    }

    /// Schedules a candidate crossing discovered mid-sweep; a no-op bucket
    /// (no declared left/right members) is fine, since processing re-derives
    /// membership from the live active set.
    fn push_candidate(&mut self, p: Point) {
        self.bucket_mut(p);
    }

    fn pop_min(&mut self) -> Option<(GridKey, EventBucket)> {
        let key = *self.buckets.keys().next()?;
        let bucket = self.buckets.remove(&key).unwrap();
        Some((key, bucket))
    }
}

/// Bentley–Ottmann-style all-pairs intersection. Same observable output as
/// [`super::brute_force`] (cross-checked in the test suite), typically
/// faster when few segments pairwise cross.
pub fn sweep(segments: &[LineSegment], eps: f64) -> Vec<MultiLinePoint> {
    let cell = eps.max(1e-9);
    let mut queue = EventQueue::new(cell);

    for (i, seg) in segments.iter().enumerate() {
        if seg.is_degenerate(eps) {
            continue;
        }
        let (left, right) = if CompareX::new(eps).compare(&seg.start, &seg.end) != Ordering::Greater
        {
            (seg.start, seg.end)
        } else {
            (seg.end, seg.start)
        };
        queue.push_left(left, i);
        queue.push_right(right, i);
    }

    let mut active = ActiveSet::new();
    let mut results: Vec<MultiLinePoint> = Vec::new();
    let mut events_processed = 0usize;

    while let Some((_, bucket)) = queue.pop_min() {
        events_processed += 1;
        let Some(p) = bucket.point else { continue };

        let mut in_u_or_l = bucket.left.clone();
        in_u_or_l.extend(bucket.right.iter().copied());

        let c: Vec<usize> = active
            .iter()
            .filter(|&s| !in_u_or_l.contains(&s) && carrier_contains(segments[s], p, eps))
            .collect();

        let total_distinct = bucket.left.len() + bucket.right.len() + c.len();
        if total_distinct >= 2 {
            let mut mlp = MultiLinePoint::new(p);
            for &s in &bucket.left {
                mlp.record(s, LineLocation::Start);
            }
            for &s in &c {
                mlp.record(s, LineLocation::Between);
            }
            for &s in &bucket.right {
                mlp.record(s, LineLocation::End);
            }
            mlp.participants.sort_by_key(|(s, _)| *s);
            log::trace!(
                "sweep: event at ({}, {}) with {} participants",
                p.x,
                p.y,
                mlp.participants.len()
            );
            results.push(mlp);
        }

        for &s in bucket.right.iter().chain(c.iter()) {
            active.remove(s);
        }

        let sweep_x = p.x;
        let mut inserted = Vec::new();
        for &s in bucket.left.iter().chain(c.iter()) {
            active.insert_sorted(s, |a, b| status_order(segments, sweep_x, a, b));
            inserted.push(s);
        }

        // Re-test the boundary of every newly inserted segment against its
        // current neighbors; new crossings strictly after `p` are enqueued.
        for &s in &inserted {
            if let Some(idx) = active.position(s) {
                let (prev, next) = active.neighbors_at(idx);
                for other in [prev, next].into_iter().flatten() {
                    if other == s {
                        continue;
                    }
                    test_and_schedule(segments, s, other, p, eps, &mut queue);
                }
            }
        }
        // If nothing was inserted, a pure removal may have made two
        // previously separated segments newly adjacent; find that boundary
        // by where `p.y` would sit in the active order and test it too.
        if inserted.is_empty() {
            let idx = active.split_point(|s| y_at_x(segments[s], sweep_x) < p.y);
            if let (Some(prev), Some(next)) = (
                idx.checked_sub(1).and_then(|i| active.get(i)),
                active.get(idx),
            ) {
                test_and_schedule(segments, prev, next, p, eps, &mut queue);
            }
        }
    }

    log::debug!(
        "multi_intersection::sweep: {} segments, {} events, {} multi-points",
        segments.len(),
        events_processed,
        results.len()
    );
    results.sort_by(|a, b| crate::types::CompareY::new(eps).compare(&a.point, &b.point));
    results
}

fn test_and_schedule(
    segments: &[LineSegment],
    a: usize,
    b: usize,
    after: Point,
    eps: f64,
    queue: &mut EventQueue,
) {
    let r = intersect(segments[a], segments[b], eps);
    let Some(p) = r.shared else { return };
    let in_range = |loc: LineLocation| {
        matches!(
            loc,
            LineLocation::Start | LineLocation::Between | LineLocation::End
        )
    };
    if !in_range(r.location_a) || !in_range(r.location_b) {
        return;
    }
    // Only schedule points at or after the current sweep position, in
    // (x, y) order, matching the "left < intersection < right at equal
    // coordinates" tie-break described in §4.M.
    if p.x < after.x - eps || (p.x <= after.x + eps && p.y < after.y - eps) {
        return;
    }
    queue.push_candidate(p);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multi_intersection::brute_force;

    fn assert_same_points(mut a: Vec<MultiLinePoint>, mut b: Vec<MultiLinePoint>, eps: f64) {
        assert_eq!(a.len(), b.len(), "{:?} vs {:?}", a, b);
        a.sort_by(|x, y| x.point.x.partial_cmp(&y.point.x).unwrap());
        b.sort_by(|x, y| x.point.x.partial_cmp(&y.point.x).unwrap());
        for (x, y) in a.iter().zip(b.iter()) {
            assert!(x.point.eq_eps(&y.point, eps.max(1e-6)));
            assert_eq!(x.participants, y.participants);
        }
    }

    #[test]
    fn sweep_matches_brute_force_on_crossing_segments() {
        let segments = vec![
            LineSegment::new(Point::new(0.0, 0.0), Point::new(4.0, 4.0)),
            LineSegment::new(Point::new(0.0, 4.0), Point::new(4.0, 0.0)),
            LineSegment::new(Point::new(1.0, 0.0), Point::new(1.0, 4.0)),
        ];
        let bf = brute_force(&segments, 1e-9);
        let sw = sweep(&segments, 1e-9);
        assert_same_points(bf, sw, 1e-9);
    }

    #[test]
    fn sweep_matches_brute_force_on_star() {
        let mut segments = Vec::new();
        for k in 0..20 {
            let kx = k as f64;
            segments.push(LineSegment::new(
                Point::new(10.0 * kx, 0.0),
                Point::new(200.0 - 10.0 * kx, 200.0),
            ));
        }
        let bf = brute_force(&segments, 1e-6);
        let sw = sweep(&segments, 1e-6);
        assert_same_points(bf, sw, 1e-6);
    }

    #[test]
    fn sweep_handles_disjoint_segments() {
        let segments = vec![
            LineSegment::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0)),
            LineSegment::new(Point::new(0.0, 5.0), Point::new(1.0, 5.0)),
        ];
        assert!(sweep(&segments, 1e-9).is_empty());
    }
}
