//! Construction paths for [`Subdivision`] (§4.S): from a raw segment soup,
//! or from a set of polygon rings.

use super::Subdivision;
use crate::hull::Polygon;
use crate::multi_intersection::brute_force;
use crate::types::LineSegment;

/// Builds a subdivision from an arbitrary set of segments: runs the
/// multi-segment intersector, splits every input segment at each point
/// where it participates, and inserts the resulting mini-segments.
/// [`brute_force`] is used rather than [`crate::multi_intersection::sweep`]
/// here — both have identical observable output (§4.M), and the simpler
/// implementation is the safer foundation for a structural builder.
pub fn from_lines(segments: &[LineSegment], eps: f64) -> Subdivision {
    let mut sub = Subdivision::empty(eps);
    if segments.is_empty() {
        return sub;
    }

    let multi_points = brute_force(segments, eps);

    for (i, seg) in segments.iter().enumerate() {
        if seg.is_degenerate(eps) {
            continue;
        }
        let v = seg.vector();
        let sq = v.square_length();

        let mut params: Vec<f64> = vec![0.0, 1.0];
        for mp in &multi_points {
            if mp.participants.iter().any(|&(s, _)| s == i) {
                let t = (mp.point - seg.start).dot(&v) / sq;
                params.push(t.clamp(0.0, 1.0));
            }
        }
        params.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let param_eps = if v.length() > 0.0 { eps / v.length() } else { eps };
        params.dedup_by(|a, b| (*a - *b).abs() <= param_eps);

        for w in params.windows(2) {
            let p0 = seg.point_at(w[0]);
            let p1 = seg.point_at(w[1]);
            sub.insert_raw_edge(p0, p1);
        }
    }

    sub.rebuild_faces();
    log::debug!(
        "subdivision::from_lines: {} input segments -> {} vertices, {} faces",
        segments.len(),
        sub.vertex_count(),
        sub.face_count()
    );
    sub
}

/// Builds a subdivision from a set of closed polygon rings: each ring
/// becomes the outer boundary of a new bounded face when rings don't cross
/// (§4.S). This always routes through the general [`from_lines`] path
/// rather than a specialized non-crossing fast path — still correct, just
/// without that optimization (see `DESIGN.md`).
pub fn from_polygons(rings: &[Polygon], eps: f64) -> Subdivision {
    let mut segments = Vec::new();
    for ring in rings {
        let n = ring.len();
        if n < 2 {
            continue;
        }
        for i in 0..n {
            let a = ring[i];
            let b = ring[(i + 1) % n];
            segments.push(LineSegment::new(a, b));
        }
    }
    from_lines(&segments, eps)
}
