//! Pairwise line-segment intersection (§4.R), the primitive every other
//! component in this crate composes on top of.

use crate::line_location::{LineLocation, LineRelation};
use crate::types::{LineSegment, Point};

/// The result of intersecting two oriented segments. See the invariants in
/// spec §3 for what combinations of fields can occur together.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineIntersection {
    pub shared: Option<Point>,
    pub location_a: LineLocation,
    pub location_b: LineLocation,
    pub relation: LineRelation,
}

fn classify_param(t: f64, eps_param: f64) -> LineLocation {
    if t < -eps_param {
        LineLocation::Before
    } else if t <= eps_param {
        LineLocation::Start
    } else if t < 1.0 - eps_param {
        LineLocation::Between
    } else if t <= 1.0 + eps_param {
        LineLocation::End
    } else {
        LineLocation::After
    }
}

/// Parametric tolerance for a segment of the given length: an absolute
/// coordinate epsilon converted into a fraction of the segment's own
/// length, so short and long segments are treated consistently.
fn param_eps(eps: f64, length: f64) -> f64 {
    if length > 0.0 {
        eps / length
    } else {
        eps
    }
}

/// Implements §4.R's three-way test: parallel vs. collinear vs. divergent,
/// following the classic parametric-line formulation.
pub fn intersect(a: LineSegment, b: LineSegment, eps: f64) -> LineIntersection {
    let r = a.vector();
    let s = b.vector();
    let d = r.cross(&s);
    let scale = r.length().max(s.length()).max(f64::MIN_POSITIVE);

    if d.abs() <= eps * scale {
        let qp = b.start - a.start;
        let cross_qp_r = qp.cross(&r);
        if cross_qp_r.abs() <= eps * scale {
            return collinear_intersection(a, b, eps);
        }
        log::trace!("line_intersection: parallel, non-collinear");
        return LineIntersection {
            shared: None,
            location_a: LineLocation::None,
            location_b: LineLocation::None,
            relation: LineRelation::Parallel,
        };
    }

    let qp = b.start - a.start;
    let t = qp.cross(&s) / d;
    let u = qp.cross(&r) / d;
    let shared = a.point_at(t);

    let eps_a = param_eps(eps, r.length());
    let eps_b = param_eps(eps, s.length());
    let mut location_a = classify_param(t, eps_a);
    let mut location_b = classify_param(u, eps_b);

    // Edge policy: an endpoint shared by both segments is always Start/End,
    // never Between, on both sides.
    if a.start.eq_eps(&shared, eps) {
        location_a = LineLocation::Start;
    } else if a.end.eq_eps(&shared, eps) {
        location_a = LineLocation::End;
    }
    if b.start.eq_eps(&shared, eps) {
        location_b = LineLocation::Start;
    } else if b.end.eq_eps(&shared, eps) {
        location_b = LineLocation::End;
    }

    log::trace!(
        "line_intersection: divergent at ({}, {}), locations ({:?}, {:?})",
        shared.x,
        shared.y,
        location_a,
        location_b
    );
    LineIntersection {
        shared: Some(shared),
        location_a,
        location_b,
        relation: LineRelation::Divergent,
    }
}

/// Collinear carriers: project every endpoint onto `a`'s own
/// parametrization and intersect the two unit intervals. On overlap, the
/// "first" overlap point (lowest parameter along `a`) is reported, per the
/// literal scenario in spec §8.2. On no overlap, mirrors the source's
/// documented behavior of reporting `Collinear` with no shared point rather
/// than reclassifying as `Parallel` (§9 open question).
fn collinear_intersection(a: LineSegment, b: LineSegment, eps: f64) -> LineIntersection {
    let av = a.vector();
    let av_sq = av.square_length();
    let eps_a = param_eps(eps, av.length());

    let param_on_a = |p: Point| -> f64 {
        if av_sq == 0.0 {
            0.0
        } else {
            (p - a.start).dot(&av) / av_sq
        }
    };

    let bs = param_on_a(b.start);
    let be = param_on_a(b.end);
    let (b_lo, b_hi) = if bs <= be { (bs, be) } else { (be, bs) };
    let overlap_lo = 0.0_f64.max(b_lo);
    let overlap_hi = 1.0_f64.min(b_hi);

    if overlap_lo > overlap_hi + eps_a {
        log::trace!("line_intersection: collinear, no overlap");
        return LineIntersection {
            shared: None,
            location_a: LineLocation::None,
            location_b: LineLocation::None,
            relation: LineRelation::Collinear,
        };
    }

    let clamped = overlap_lo.clamp(0.0, 1.0);
    let shared = a.point_at(clamped);
    let location_a = classify_param(clamped, eps_a);

    let bv = b.vector();
    let bv_sq = bv.square_length();
    let eps_b = param_eps(eps, bv.length());
    let t_b = if bv_sq == 0.0 {
        0.0
    } else {
        (shared - b.start).dot(&bv) / bv_sq
    };
    let location_b = classify_param(t_b, eps_b);

    log::trace!("line_intersection: collinear overlap at ({}, {})", shared.x, shared.y);
    LineIntersection {
        shared: Some(shared),
        location_a,
        location_b,
        relation: LineRelation::Collinear,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divergent_intersection_scenario() {
        let a = LineSegment::new(Point::new(0.0, 0.0), Point::new(0.9, 0.9));
        let b = LineSegment::new(Point::new(0.0, 2.0), Point::new(0.9, 1.1));
        let r = intersect(a, b, 1e-9);
        assert_eq!(r.relation, LineRelation::Divergent);
        let p = r.shared.unwrap();
        assert!((p.x - 1.0).abs() < 1e-9 && (p.y - 1.0).abs() < 1e-9);
        assert_eq!(r.location_a, LineLocation::After);
        assert_eq!(r.location_b, LineLocation::After);
    }

    #[test]
    fn collinear_touching_scenario() {
        let a = LineSegment::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0));
        let b = LineSegment::new(Point::new(1.0, 1.0), Point::new(2.0, 2.0));
        let r = intersect(a, b, 1e-9);
        assert_eq!(r.relation, LineRelation::Collinear);
        assert_eq!(r.shared, Some(Point::new(1.0, 1.0)));
        assert_eq!(r.location_a, LineLocation::End);
        assert_eq!(r.location_b, LineLocation::Start);
    }

    #[test]
    fn crossing_unit_segments() {
        let a = LineSegment::new(Point::new(0.0, 0.0), Point::new(5.0, 5.0));
        let b = LineSegment::new(Point::new(0.0, 5.0), Point::new(5.0, 0.0));
        let r = intersect(a, b, 1e-9);
        assert_eq!(r.relation, LineRelation::Divergent);
        assert_eq!(r.shared, Some(Point::new(2.5, 2.5)));
        assert_eq!(r.location_a, LineLocation::Between);
        assert_eq!(r.location_b, LineLocation::Between);
    }

    #[test]
    fn parallel_non_collinear_has_no_shared_point() {
        let a = LineSegment::new(Point::new(0.0, 0.0), Point::new(5.0, 5.0));
        let b = LineSegment::new(Point::new(0.0, 1.0), Point::new(5.0, 6.0));
        let r = intersect(a, b, 1e-9);
        assert_eq!(r.relation, LineRelation::Parallel);
        assert_eq!(r.shared, None);
    }

    #[test]
    fn collinear_disjoint_reports_no_shared_point() {
        let a = LineSegment::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0));
        let b = LineSegment::new(Point::new(2.0, 0.0), Point::new(3.0, 0.0));
        let r = intersect(a, b, 1e-9);
        assert_eq!(r.relation, LineRelation::Collinear);
        assert_eq!(r.shared, None);
        assert_eq!(r.location_a, LineLocation::None);
        assert_eq!(r.location_b, LineLocation::None);
    }
}
