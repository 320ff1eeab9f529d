//! Convex hull and polygon operations (§4.H): Andrew's monotone chain,
//! signed area, centroid, and point-in-polygon classification.

use crate::error::{Error, Result};
use crate::types::{CompareX, Point};

/// A finite ordered sequence of points interpreted as a closed simple ring
/// (§3). The closing edge (last point back to the first) is implicit.
pub type Polygon = Vec<Point>;

/// Classification of a point relative to a polygon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointInPolygon {
    Inside,
    Outside,
    Edge,
    Vertex,
}

/// Signed turn direction of `o -> a -> b`: positive for a left (CCW) turn.
/// Delegates to `robust`'s adaptive-precision `orient2d` rather than a plain
/// cross product — exactly the near-collinear, catastrophic-cancellation
/// case the monotone chain below hinges on when points are nearly colinear.
fn cross(o: Point, a: Point, b: Point) -> f64 {
    robust::orient2d(
        robust::Coord { x: o.x, y: o.y },
        robust::Coord { x: a.x, y: a.y },
        robust::Coord { x: b.x, y: b.y },
    )
}

/// Andrew's monotone chain. Returns the hull in CCW order (negative signed
/// area under the screen-coordinate convention). Degenerate inputs: zero
/// points yield an empty hull; all-equal points collapse to one point;
/// collinear points collapse to the two extremes.
pub fn convex_hull(points: &[Point], eps: f64) -> Polygon {
    let mut pts: Vec<Point> = points.to_vec();
    let cmp = CompareX::new(eps);
    pts.sort_by(|a, b| cmp.compare(a, b));
    pts.dedup_by(|a, b| a.eq_eps(b, eps));

    if pts.len() <= 2 {
        return pts;
    }

    let mut lower: Vec<Point> = Vec::new();
    for &p in &pts {
        while lower.len() >= 2
            && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= eps
        {
            lower.pop();
        }
        lower.push(p);
    }

    let mut upper: Vec<Point> = Vec::new();
    for &p in pts.iter().rev() {
        while upper.len() >= 2
            && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= eps
        {
            upper.pop();
        }
        upper.push(p);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);

    // All-collinear input: both chains degenerate to the same two extremes.
    if lower.len() < 3 {
        let mut extremes = vec![pts[0]];
        if let Some(&last) = pts.last() {
            if !extremes[0].eq_eps(&last, eps) {
                extremes.push(last);
            }
        }
        return extremes;
    }

    log::debug!("convex_hull: {} points -> {} hull vertices", points.len(), lower.len());
    // The chain above builds CCW order in math coordinates (y up); flip to
    // the screen-coordinate (negative-area) convention spec §3 requires.
    reverse_to_screen_ccw(lower)
}

fn reverse_to_screen_ccw(hull: Polygon) -> Polygon {
    if signed_area(&hull) > 0.0 {
        hull.into_iter().rev().collect()
    } else {
        hull
    }
}

/// Signed area by the shoelace formula. Interior on the left of each edge
/// is positive; screen-coordinate CCW polygons (the convention this crate
/// uses for outer boundaries) are therefore negative (§3).
pub fn signed_area(polygon: &[Point]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[(i + 1) % polygon.len()];
        sum += a.x * b.y - b.x * a.y;
    }
    sum / 2.0
}

/// Standard area-weighted centroid. Undefined for a zero-area polygon —
/// callers must check first (§4.H); this returns [`Error::PreconditionViolation`]
/// rather than NaN.
pub fn centroid(polygon: &[Point]) -> Result<Point> {
    let area = signed_area(polygon);
    if area.abs() < f64::EPSILON {
        return Err(Error::precondition(
            "centroid is undefined for a zero-area polygon",
        ));
    }
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[(i + 1) % polygon.len()];
        let cross = a.x * b.y - b.x * a.y;
        cx += (a.x + b.x) * cross;
        cy += (a.y + b.y) * cross;
    }
    let scale = 1.0 / (6.0 * area);
    Ok(Point::new(cx * scale, cy * scale))
}

/// Classifies `q` against `polygon`: first checks every edge for
/// `Vertex`/`Edge` under `eps`, then falls back to a half-open ray-crossing
/// count so a ray grazing a vertex produces a single classification.
pub fn point_in_polygon(polygon: &[Point], q: Point, eps: f64) -> PointInPolygon {
    if polygon.is_empty() {
        return PointInPolygon::Outside;
    }
    for &v in polygon {
        if v.eq_eps(&q, eps) {
            return PointInPolygon::Vertex;
        }
    }
    let n = polygon.len();
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        if point_on_segment(a, b, q, eps) {
            return PointInPolygon::Edge;
        }
    }

    let mut inside = false;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        // Half-open convention: an edge is "counted" only when its lower
        // endpoint is included and its upper endpoint excluded, so a ray
        // through a shared vertex is attributed to exactly one edge.
        if (a.y <= q.y) != (b.y <= q.y) {
            let x_at_y = a.x + (q.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if x_at_y > q.x {
                inside = !inside;
            }
        }
    }
    if inside {
        PointInPolygon::Inside
    } else {
        PointInPolygon::Outside
    }
}

pub(crate) fn point_on_segment(a: Point, b: Point, q: Point, eps: f64) -> bool {
    let ab = b - a;
    let len = ab.length();
    if len == 0.0 {
        return a.eq_eps(&q, eps);
    }
    let w = q - a;
    if w.cross(&ab).abs() / len > eps {
        return false;
    }
    let t = w.dot(&ab) / (len * len);
    (-eps / len..=1.0 + eps / len).contains(&t)
}
