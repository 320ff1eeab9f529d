//! Voronoi diagram and Delaunay triangulation construction (§4.V).
//!
//! Delaunay triangulation delegates to `spade`'s incremental Bowyer-Watson
//! triangulator the way `geo`'s `triangulate_spade` module does. Voronoi
//! regions are *not* built by walking spade's dual-graph handles — that path
//! (`voronoi_faces`/`adjacent_edges`, distinguishing `Inner`/`Outer` vertices
//! for rays that run off to infinity) needs a general polygon boolean-ops
//! step to clip against a rectangle. This crate instead clips each site's
//! cell directly: start from the bounding rectangle and, for every other
//! site, cut away the half-plane on the far side of the two sites'
//! perpendicular bisector — a textbook incremental half-plane intersection,
//! grounded in the `clip_polygon_halfplane`/`voronoi_cell` pair also present
//! in this retrieval pack. `O(n^2)` per diagram; acceptable since the
//! triangulation itself (the part callers actually need at scale) stays
//! `O(n log n)` via spade.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spade::{DelaunayTriangulation, Point2, Triangulation};

use crate::collections::InsertionOrderedMap;
use crate::config::SiteDensityConfig;
use crate::error::{check_epsilon, check_finite_point, Error, Result};
use crate::hull::{centroid, Polygon};
use crate::subdivision::{from_lines, from_polygons, FaceId, Subdivision, SubdivisionElement};
use crate::types::{CompareX, LineSegment, Point, Rect};

/// One undirected edge of a Delaunay triangulation, stored start-to-end in
/// canonical (x-then-y lexicographically smaller first) order so the same
/// edge always compares equal regardless of which site it was discovered
/// from.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DelaunayEdge {
    pub start: Point,
    pub end: Point,
}

impl DelaunayEdge {
    fn new(a: Point, b: Point) -> Self {
        if CompareX::exact(&a, &b) == std::cmp::Ordering::Greater {
            DelaunayEdge { start: b, end: a }
        } else {
            DelaunayEdge { start: a, end: b }
        }
    }
}

/// The three arrays §4.V's contract specifies: generator sites, the
/// triangulation's undirected edges, and each site's clipped Voronoi cell.
#[derive(Clone, Debug)]
pub struct VoronoiResult {
    pub sites: Vec<Point>,
    pub delaunay_edges: Vec<DelaunayEdge>,
    pub voronoi_regions: Vec<Polygon>,
}

/// Builds the Delaunay triangulation and Voronoi diagram of `sites`, with
/// every region clipped to `bounding_rect`.
///
/// Errors: a non-finite site, a negative epsilon, an empty `bounding_rect`,
/// a site outside `bounding_rect`, or two sites equal under `eps`.
pub fn find_all(sites: &[Point], bounding_rect: Rect, eps: f64) -> Result<VoronoiResult> {
    check_epsilon(eps)?;
    if bounding_rect.is_empty() {
        return Err(Error::invalid_input(
            "bounding_rect must have positive width and height",
        ));
    }
    for (i, s) in sites.iter().enumerate() {
        check_finite_point(s, "voronoi::find_all site")?;
        if !bounding_rect.contains(s) {
            return Err(Error::invalid_input(format!(
                "site {i} at ({}, {}) lies outside bounding_rect",
                s.x, s.y
            )));
        }
        for (j, other) in sites.iter().enumerate().skip(i + 1) {
            if s.eq_eps(other, eps) {
                return Err(Error::invalid_input(format!(
                    "sites {i} and {j} are equal under epsilon={eps}"
                )));
            }
        }
    }

    log::debug!(
        "voronoi::find_all: triangulating {} sites in {:?}",
        sites.len(),
        bounding_rect
    );

    let mut triangulation: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::new();
    for s in sites {
        // Already checked for near-duplicates above, so every insert is
        // expected to succeed; `?` surfaces spade's own (stricter, exact)
        // duplicate/NaN rejection as a construction error rather than a panic.
        triangulation
            .insert(Point2::new(s.x, s.y))
            .map_err(|e| Error::invalid_input(format!("triangulation rejected a site: {e}")))?;
    }

    // Map each inserted coordinate back to its site index. `face.positions()`
    // returns the same `Point2` values handed to `insert`, so matching on
    // the bit pattern is exact (the teacher's own `triangulate_spade`
    // reads triangle coordinates the same way, via `face.positions()`).
    let site_index: std::collections::HashMap<(u64, u64), usize> = sites
        .iter()
        .enumerate()
        .map(|(i, s)| ((s.x.to_bits(), s.y.to_bits()), i))
        .collect();

    let mut edge_set: std::collections::HashSet<(usize, usize)> = std::collections::HashSet::new();
    let mut delaunay_edges = Vec::new();
    for face in triangulation.inner_faces() {
        let positions = face.positions();
        for i in 0..3 {
            let p = positions[i];
            let q = positions[(i + 1) % 3];
            let a = site_index[&(p.x.to_bits(), p.y.to_bits())];
            let b = site_index[&(q.x.to_bits(), q.y.to_bits())];
            let key = if a < b { (a, b) } else { (b, a) };
            if edge_set.insert(key) {
                delaunay_edges.push(DelaunayEdge::new(sites[key.0], sites[key.1]));
            }
        }
    }
    delaunay_edges.sort_by(|a, b| CompareX::exact(&a.start, &b.start));

    let voronoi_regions: Vec<Polygon> = (0..sites.len())
        .map(|i| voronoi_cell(i, sites, bounding_rect))
        .collect();

    Ok(VoronoiResult {
        sites: sites.to_vec(),
        delaunay_edges,
        voronoi_regions,
    })
}

/// Generates `n` sites uniformly at random inside `bounds`, rejecting any
/// candidate closer than `config.min_distance` to an already-accepted site
/// (§6 "site density min-distance"). `config.seed` feeds a deterministic
/// `StdRng`, matching the `seed: Option<u64>` convention `kmeans/mod.rs`
/// uses for its own randomized initialization; `None` draws from OS
/// entropy. Errors with [`Error::NumericIndeterminate`] if a site can't be
/// placed within `config.max_attempts_per_site` rejections — a sign
/// `min_distance` is too large for `bounds` to hold `n` sites.
pub fn random_sites(n: usize, bounds: Rect, config: SiteDensityConfig) -> Result<Vec<Point>> {
    check_epsilon(config.min_distance)?;
    if bounds.is_empty() {
        return Err(Error::invalid_input(
            "bounds must have positive width and height",
        ));
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let min = bounds.min();
    let max = bounds.max();
    let mut sites: Vec<Point> = Vec::with_capacity(n);
    for i in 0..n {
        let mut placed = false;
        for _ in 0..config.max_attempts_per_site {
            let candidate = Point::new(rng.gen_range(min.x..=max.x), rng.gen_range(min.y..=max.y));
            if sites
                .iter()
                .all(|s| s.distance(&candidate) >= config.min_distance)
            {
                sites.push(candidate);
                placed = true;
                break;
            }
        }
        if !placed {
            return Err(Error::numeric_indeterminate(format!(
                "could not place site {i} of {n}: min_distance={} too large for {bounds:?} after {} attempts",
                config.min_distance, config.max_attempts_per_site
            )));
        }
    }

    log::debug!(
        "voronoi::random_sites: placed {} sites in {:?} with min_distance={}",
        sites.len(),
        bounds,
        config.min_distance
    );
    Ok(sites)
}

/// `bounding_rect` as a clockwise (positive signed-area) ring, the
/// orientation convention §4.V asks Voronoi regions to use.
fn clockwise_rect_ring(r: Rect) -> Polygon {
    vec![
        r.min(),
        Point::new(r.max().x, r.min().y),
        r.max(),
        Point::new(r.min().x, r.max().y),
    ]
}

/// Sutherland-Hodgman clipping by a single half-plane: keeps the side with
/// `(p - mid) . normal >= 0`.
fn clip_half_plane(poly: &[Point], normal: Point, mid: Point) -> Polygon {
    if poly.is_empty() {
        return Vec::new();
    }
    let side = |p: Point| (p - mid).dot(&normal);

    let mut out = Vec::with_capacity(poly.len() + 1);
    let mut prev = poly[poly.len() - 1];
    let mut prev_inside = side(prev) >= 0.0;

    for &cur in poly {
        let cur_inside = side(cur) >= 0.0;
        if cur_inside {
            if !prev_inside {
                out.push(segment_vs_line(prev, cur, normal, mid));
            }
            out.push(cur);
        } else if prev_inside {
            out.push(segment_vs_line(prev, cur, normal, mid));
        }
        prev = cur;
        prev_inside = cur_inside;
    }
    out
}

/// Where segment `prev -> cur` crosses the line through `mid` perpendicular
/// to `normal`. Exists whenever `prev`/`cur` are on opposite sides, which is
/// the only case the caller uses this in.
fn segment_vs_line(prev: Point, cur: Point, normal: Point, mid: Point) -> Point {
    let d = cur - prev;
    let denom = d.dot(&normal);
    let t = (mid - prev).dot(&normal) / denom;
    prev + d * t.clamp(0.0, 1.0)
}

/// The Voronoi cell of `sites[site_idx]`: the bounding rectangle cut down
/// by the perpendicular-bisector half-plane of every other site, keeping
/// the half closer to `sites[site_idx]`.
fn voronoi_cell(site_idx: usize, sites: &[Point], bounding_rect: Rect) -> Polygon {
    let site = sites[site_idx];
    let mut poly = clockwise_rect_ring(bounding_rect);

    for (j, &other) in sites.iter().enumerate() {
        if j == site_idx || poly.is_empty() {
            continue;
        }
        let mid = Point::new((site.x + other.x) / 2.0, (site.y + other.y) / 2.0);
        // Points closer to `site` than to `other` satisfy
        // `(p - mid) . (site - other) >= 0`.
        let normal = site - other;
        poly = clip_half_plane(&poly, normal, mid);
    }
    poly
}

impl VoronoiResult {
    /// One bounded face per Delaunay triangle. Reuses the general segment
    /// builder rather than hand-assembling triangle rings: a triangulation's
    /// edges never cross except at shared vertices, so `from_lines` recovers
    /// exactly the triangle faces.
    pub fn to_delaunay_subdivision(&self, eps: f64) -> Subdivision {
        let segments: Vec<LineSegment> = self
            .delaunay_edges
            .iter()
            .map(|e| LineSegment::new(e.start, e.end))
            .collect();
        from_lines(&segments, eps)
    }

    /// One bounded face per Voronoi region, plus the region-index <->
    /// face-key bijection §4.V asks for.
    pub fn to_voronoi_subdivision(&self, eps: f64) -> (Subdivision, InsertionOrderedMap<usize, FaceId>) {
        let sub = from_polygons(&self.voronoi_regions, eps);
        let mut region_to_face = InsertionOrderedMap::new();
        for (i, region) in self.voronoi_regions.iter().enumerate() {
            if region.len() < 3 {
                continue;
            }
            let Ok(c) = centroid(region) else {
                continue;
            };
            if let SubdivisionElement::Face(f) = sub.find(c) {
                region_to_face.insert(i, f);
            }
        }
        (sub, region_to_face)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hull::signed_area;

    fn unit_square() -> Rect {
        Rect::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0))
    }

    #[test]
    fn three_sites_produce_three_regions_and_three_edges() {
        let sites = vec![
            Point::new(2.0, 2.0),
            Point::new(8.0, 2.0),
            Point::new(5.0, 8.0),
        ];
        let result = find_all(&sites, unit_square(), 1e-9).unwrap();
        assert_eq!(result.voronoi_regions.len(), 3);
        assert_eq!(result.delaunay_edges.len(), 3);
        for region in &result.voronoi_regions {
            assert!(region.len() >= 3);
            // §4.V: regions are clockwise, i.e. positive signed area.
            assert!(signed_area(region) > 0.0);
        }
    }

    #[test]
    fn duplicate_site_under_epsilon_is_rejected() {
        let sites = vec![Point::new(1.0, 1.0), Point::new(1.0 + 1e-12, 1.0)];
        let err = find_all(&sites, unit_square(), 1e-9).unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
    }

    #[test]
    fn site_outside_bounding_rect_is_rejected() {
        let sites = vec![Point::new(100.0, 100.0)];
        let err = find_all(&sites, unit_square(), 1e-9).unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
    }

    #[test]
    fn two_site_diagram_splits_rect_on_the_perpendicular_bisector() {
        let sites = vec![Point::new(2.0, 5.0), Point::new(8.0, 5.0)];
        let result = find_all(&sites, unit_square(), 1e-9).unwrap();
        assert_eq!(result.voronoi_regions.len(), 2);
        assert_eq!(result.delaunay_edges.len(), 1);
        // The bisector is x = 5; neither cell should cross it.
        assert!(result.voronoi_regions[0].iter().all(|p| p.x <= 5.0 + 1e-9));
        assert!(result.voronoi_regions[1].iter().all(|p| p.x >= 5.0 - 1e-9));
    }

    #[test]
    fn delaunay_edges_are_canonically_ordered() {
        let sites = vec![
            Point::new(2.0, 2.0),
            Point::new(8.0, 2.0),
            Point::new(5.0, 8.0),
        ];
        let result = find_all(&sites, unit_square(), 1e-9).unwrap();
        for e in &result.delaunay_edges {
            assert_ne!(CompareX::exact(&e.start, &e.end), std::cmp::Ordering::Greater);
        }
    }

    #[test]
    fn to_delaunay_subdivision_has_one_face_per_triangle() {
        let sites = vec![
            Point::new(2.0, 2.0),
            Point::new(8.0, 2.0),
            Point::new(5.0, 8.0),
        ];
        let result = find_all(&sites, unit_square(), 1e-9).unwrap();
        let sub = result.to_delaunay_subdivision(1e-9);
        // One triangle among three non-collinear sites: one bounded face.
        assert_eq!(sub.face_count(), 2);
    }

    #[test]
    fn to_voronoi_subdivision_maps_every_region_to_a_distinct_face() {
        let sites = vec![
            Point::new(2.0, 2.0),
            Point::new(8.0, 2.0),
            Point::new(5.0, 8.0),
        ];
        let result = find_all(&sites, unit_square(), 1e-9).unwrap();
        let (_sub, region_to_face) = result.to_voronoi_subdivision(1e-9);
        assert_eq!(region_to_face.len(), 3);
        let faces: std::collections::HashSet<_> = region_to_face.values().copied().collect();
        assert_eq!(faces.len(), 3);
    }

    #[test]
    fn random_sites_are_seeded_reproducibly_and_respect_min_distance() {
        let cfg = SiteDensityConfig::new(2.0).seed(7);
        let a = random_sites(20, unit_square(), cfg).unwrap();
        let b = random_sites(20, unit_square(), cfg).unwrap();
        assert_eq!(a, b, "same seed must reproduce the same sites");
        for i in 0..a.len() {
            for j in (i + 1)..a.len() {
                assert!(a[i].distance(&a[j]) >= 2.0 - 1e-9);
            }
        }
        for p in &a {
            assert!(unit_square().contains(p));
        }
    }

    #[test]
    fn random_sites_rejects_an_unsatisfiable_density() {
        let cfg = SiteDensityConfig::new(50.0)
            .seed(1)
            .max_attempts_per_site(20);
        let err = random_sites(100, unit_square(), cfg).unwrap_err();
        assert!(matches!(err, Error::NumericIndeterminate { .. }));
    }
}
