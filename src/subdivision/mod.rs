//! Doubly-connected edge list planar subdivision (§4.S), the structural
//! core the rest of the kernel builds on. Half-edges, vertices, and faces
//! live in arenas keyed by small integer handles rather than as a cyclic
//! graph of references (§9 design note), which is what lets [`Subdivision`]
//! be `Clone` and compared for [`Subdivision::structure_equals`] cheaply.

mod build;
mod overlay;
mod query;
mod validate;

pub use build::{from_lines, from_polygons};
pub use overlay::overlay;
pub use query::SubdivisionElement;

use crate::error::{Error, Result};
use crate::hull::{centroid, signed_area};
use crate::types::{CompareX, Point};

/// Handle into [`Subdivision`]'s vertex arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(pub usize);

/// Handle into [`Subdivision`]'s half-edge arena. Twins have consecutive
/// even/odd indices (§3): `e ^ 1` is always `e`'s twin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub usize);

/// Handle into [`Subdivision`]'s face arena. Face 0 is always the unbounded
/// face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FaceId(pub usize);

#[derive(Clone, Debug)]
struct VertexRec {
    point: Point,
    /// Outgoing half-edges from this vertex, kept sorted by direction angle
    /// (ascending, atan2 order) so splicing a new edge in is a single
    /// binary search plus the four-pointer rewire in [`Subdivision::splice_new_outgoing`].
    outgoing: Vec<EdgeId>,
}

#[derive(Clone, Debug)]
struct HalfEdgeRec {
    origin: VertexId,
    twin: EdgeId,
    face: FaceId,
    next: EdgeId,
    prev: EdgeId,
}

#[derive(Clone, Debug, Default)]
struct FaceRec {
    /// `None` only for face 0 (§3: "the unbounded face has no outer
    /// boundary").
    outer: Option<EdgeId>,
    /// One representative half-edge per hole.
    inners: Vec<EdgeId>,
}

/// Placeholder face id used for half-edges not yet assigned during
/// incremental construction; [`Subdivision::rebuild_faces`] replaces every
/// occurrence before returning control to the caller.
const UNASSIGNED: FaceId = FaceId(usize::MAX);

/// A planar subdivision represented as a doubly-connected edge list.
///
/// Vertices are kept in an array ordered lexicographically by `(x, y)` under
/// the subdivision's epsilon (§3); half-edges and faces are insertion-ordered
/// arenas addressed by [`EdgeId`]/[`FaceId`]. All public mutators leave the
/// structure in a state that passes [`Subdivision::validate`] or are not
/// committed at all (§7: "no partially mutated subdivision is ever
/// returned").
#[derive(Clone, Debug)]
pub struct Subdivision {
    eps: f64,
    vertices: Vec<VertexRec>,
    /// `(point, vertex)` sorted by `CompareX`, mirroring the vertex map's
    /// `(x, y)` ordering (§3) while keeping `VertexId`s stable arena indices.
    vertex_order: Vec<(Point, VertexId)>,
    edges: Vec<HalfEdgeRec>,
    faces: Vec<Option<FaceRec>>,
    zero_area_cycles: Vec<EdgeId>,
}

impl Subdivision {
    /// An empty subdivision consisting of only the unbounded face.
    pub fn empty(eps: f64) -> Self {
        Subdivision {
            eps,
            vertices: Vec::new(),
            vertex_order: Vec::new(),
            edges: Vec::new(),
            faces: vec![Some(FaceRec::default())],
            zero_area_cycles: Vec::new(),
        }
    }

    pub fn epsilon(&self) -> f64 {
        self.eps
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.iter().filter(|f| f.is_some()).count()
    }

    pub fn point_of(&self, v: VertexId) -> Point {
        self.vertices[v.0].point
    }

    pub fn origin(&self, e: EdgeId) -> VertexId {
        self.edges[e.0].origin
    }

    pub fn destination(&self, e: EdgeId) -> VertexId {
        self.edges[self.edges[e.0].twin.0].origin
    }

    pub fn twin(&self, e: EdgeId) -> EdgeId {
        self.edges[e.0].twin
    }

    pub fn next(&self, e: EdgeId) -> EdgeId {
        self.edges[e.0].next
    }

    pub fn prev(&self, e: EdgeId) -> EdgeId {
        self.edges[e.0].prev
    }

    pub fn face_of(&self, e: EdgeId) -> FaceId {
        self.edges[e.0].face
    }

    /// All vertex ids, in `(x, y)` order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertex_order.iter().map(|&(_, id)| id)
    }

    /// All half-edge ids, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        (0..self.edges.len()).map(EdgeId)
    }

    /// All live face ids, in insertion order, face 0 first.
    pub fn faces(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.faces
            .iter()
            .enumerate()
            .filter(|(_, f)| f.is_some())
            .map(|(i, _)| FaceId(i))
    }

    /// Outgoing half-edges from `v`, in CCW angular order.
    pub fn outgoing(&self, v: VertexId) -> &[EdgeId] {
        &self.vertices[v.0].outgoing
    }

    /// `None` for the unbounded face, or any face with no outer cycle yet.
    pub fn outer_edge(&self, f: FaceId) -> Option<EdgeId> {
        self.faces[f.0].as_ref().and_then(|rec| rec.outer)
    }

    /// One representative half-edge per hole of `f`.
    pub fn inner_edges(&self, f: FaceId) -> &[EdgeId] {
        self.faces[f.0]
            .as_ref()
            .map(|rec| rec.inners.as_slice())
            .unwrap_or(&[])
    }

    /// Half-edges belonging to degenerate (near-zero-area) cycles — inputs
    /// folded back on themselves, or dangling "bridge" edges with the same
    /// face on both sides (§3, §4.S).
    pub fn zero_area_cycles(&self) -> &[EdgeId] {
        &self.zero_area_cycles
    }

    /// Walks the `next`-cycle starting at `e`, returning the vertex sequence
    /// (one point per half-edge origin).
    pub fn cycle_points(&self, e: EdgeId) -> Vec<Point> {
        let mut points = Vec::new();
        let mut cur = e;
        loop {
            points.push(self.point_of(self.origin(cur)));
            cur = self.next(cur);
            if cur == e {
                break;
            }
        }
        points
    }

    pub fn cycle_signed_area(&self, e: EdgeId) -> f64 {
        signed_area(&self.cycle_points(e))
    }

    /// Centroid of the cycle starting at `e`; `Err` for a zero-area cycle
    /// (§4.H).
    pub fn cycle_centroid(&self, e: EdgeId) -> Result<Point> {
        centroid(&self.cycle_points(e))
    }

    pub fn is_zero_area_cycle(&self, e: EdgeId) -> bool {
        self.cycle_signed_area(e).abs() <= AREA_EPS
    }

    fn find_vertex_index(&self, p: Point) -> Option<usize> {
        let cmp = CompareX::new(self.eps);
        let pos = self
            .vertex_order
            .partition_point(|&(vp, _)| cmp.compare(&vp, &p) == std::cmp::Ordering::Less);
        let mut i = pos;
        while i > 0 {
            i -= 1;
            let (vp, _) = self.vertex_order[i];
            if p.x - vp.x > self.eps {
                break;
            }
            if vp.eq_eps(&p, self.eps) {
                return Some(i);
            }
        }
        let mut j = pos;
        while j < self.vertex_order.len() {
            let (vp, _) = self.vertex_order[j];
            if vp.x - p.x > self.eps {
                break;
            }
            if vp.eq_eps(&p, self.eps) {
                return Some(j);
            }
            j += 1;
        }
        None
    }

    fn get_or_create_vertex(&mut self, p: Point) -> VertexId {
        if let Some(i) = self.find_vertex_index(p) {
            return self.vertex_order[i].1;
        }
        let id = VertexId(self.vertices.len());
        self.vertices.push(VertexRec {
            point: p,
            outgoing: Vec::new(),
        });
        let cmp = CompareX::new(self.eps);
        let pos = self
            .vertex_order
            .partition_point(|&(vp, _)| cmp.compare(&vp, &p) == std::cmp::Ordering::Less);
        self.vertex_order.insert(pos, (p, id));
        id
    }

    fn edge_angle(&self, e: EdgeId) -> f64 {
        let origin = self.point_of(self.origin(e));
        let dest = self.point_of(self.destination(e));
        (dest.y - origin.y).atan2(dest.x - origin.x)
    }

    /// Inserts `new` (already pushed into the edge arena, outgoing from
    /// `vertex`) into `vertex`'s rotation, rewiring `next`/`prev` at both
    /// ends of the splice. Spec §4.S steps 2–3, applied uniformly so the
    /// degree-0-to-1 case (self-wrapping cycle) falls out of the same
    /// formula rather than needing a branch.
    fn splice_new_outgoing(&mut self, vertex: VertexId, new: EdgeId) {
        let new_angle = self.edge_angle(new);
        let mut outgoing = std::mem::take(&mut self.vertices[vertex.0].outgoing);
        let pos = outgoing.partition_point(|&e| self.edge_angle(e) < new_angle);
        outgoing.insert(pos, new);
        let k = outgoing.len();
        let succ = outgoing[(pos + 1) % k];
        let pred = outgoing[(pos + k - 1) % k];

        let twin_pred = self.edges[pred.0].twin;
        let twin_new = self.edges[new.0].twin;
        self.edges[twin_pred.0].next = new;
        self.edges[new.0].prev = twin_pred;
        self.edges[twin_new.0].next = succ;
        self.edges[succ.0].prev = twin_new;

        self.vertices[vertex.0].outgoing = outgoing;
    }

    /// Creates a half-edge pair between two (possibly new) points and
    /// splices both ends into their vertex rotations. Face assignment is
    /// deferred to [`Subdivision::rebuild_faces`], called once after every
    /// edge of a construction batch has been inserted — an engineering
    /// simplification over fully incremental face split/merge documented in
    /// `DESIGN.md`: the two produce identical final topology, since face
    /// membership is a pure function of the completed `next`/`twin` graph.
    fn insert_raw_edge(&mut self, u_pt: Point, v_pt: Point) -> Option<(EdgeId, EdgeId)> {
        if u_pt.eq_eps(&v_pt, self.eps) {
            return None;
        }
        let u = self.get_or_create_vertex(u_pt);
        let v = self.get_or_create_vertex(v_pt);
        let e = EdgeId(self.edges.len());
        let te = EdgeId(self.edges.len() + 1);
        self.edges.push(HalfEdgeRec {
            origin: u,
            twin: te,
            face: UNASSIGNED,
            next: e,
            prev: e,
        });
        self.edges.push(HalfEdgeRec {
            origin: v,
            twin: e,
            face: UNASSIGNED,
            next: te,
            prev: te,
        });
        self.splice_new_outgoing(u, e);
        self.splice_new_outgoing(v, te);
        log::debug!(
            "subdivision: inserted edge {} -> {} ({:?} / {:?})",
            u.0,
            v.0,
            e,
            te
        );
        Some((e, te))
    }

    /// Discovers every `next`-cycle, then assigns face ids: negative-area
    /// cycles each become the outer boundary of a new bounded face;
    /// positive-area (hole) and near-zero-area (dangling/degenerate) cycles
    /// are nested into the smallest bounded face whose outer polygon
    /// strictly contains a representative point, or left as a hole of the
    /// unbounded face (id 0) otherwise.
    fn rebuild_faces(&mut self) {
        use crate::hull::{point_in_polygon, PointInPolygon};

        let n = self.edges.len();
        let mut visited = vec![false; n];
        let mut cycles: Vec<Vec<EdgeId>> = Vec::new();
        for start in 0..n {
            if visited[start] {
                continue;
            }
            let mut members = Vec::new();
            let mut cur = EdgeId(start);
            loop {
                visited[cur.0] = true;
                members.push(cur);
                cur = self.next(cur);
                if cur.0 == start {
                    break;
                }
            }
            cycles.push(members);
        }

        self.faces = vec![Some(FaceRec::default())];
        self.zero_area_cycles.clear();

        let mut outer_polys: Vec<(FaceId, Vec<Point>, f64)> = Vec::new();
        let mut pending: Vec<Vec<EdgeId>> = Vec::new();

        for members in cycles {
            let points: Vec<Point> = members.iter().map(|&e| self.point_of(self.origin(e))).collect();
            let area = signed_area(&points);
            if area < -AREA_EPS {
                let face_id = FaceId(self.faces.len());
                self.faces.push(Some(FaceRec {
                    outer: Some(members[0]),
                    inners: Vec::new(),
                }));
                for &e in &members {
                    self.edges[e.0].face = face_id;
                }
                outer_polys.push((face_id, points, area.abs()));
            } else {
                pending.push(members);
            }
        }

        for members in pending {
            let probe = self.point_of(self.origin(members[0]));
            let points: Vec<Point> = members.iter().map(|&e| self.point_of(self.origin(e))).collect();
            let area = signed_area(&points);
            let zero_area = area.abs() <= AREA_EPS;

            let mut best: Option<(FaceId, f64)> = None;
            for (face_id, poly, poly_area) in &outer_polys {
                if matches!(
                    point_in_polygon(poly, probe, self.eps),
                    PointInPolygon::Inside
                ) && best.map_or(true, |(_, a)| *poly_area < a)
                {
                    best = Some((*face_id, *poly_area));
                }
            }
            let owner = best.map(|(f, _)| f).unwrap_or(FaceId(0));
            if let Some(rec) = self.faces[owner.0].as_mut() {
                rec.inners.push(members[0]);
            }
            for &e in &members {
                self.edges[e.0].face = owner;
            }
            if zero_area {
                self.zero_area_cycles.push(members[0]);
            }
        }

        log::debug!(
            "subdivision: rebuilt {} faces from {} half-edges",
            self.face_count(),
            n
        );
    }

    /// Two subdivisions have identical topology and coordinates under the
    /// (looser of the two) epsilon — same vertex points in the same order,
    /// same edge origin/twin/next graph, same face outer/inner assignment
    /// (§3, §8).
    pub fn structure_equals(&self, other: &Subdivision) -> bool {
        if self.vertices.len() != other.vertices.len() || self.edges.len() != other.edges.len() {
            return false;
        }
        let eps = self.eps.max(other.eps);
        for (a, b) in self.vertex_order.iter().zip(other.vertex_order.iter()) {
            if !a.0.eq_eps(&b.0, eps) {
                return false;
            }
        }
        for e in 0..self.edges.len() {
            let ea = &self.edges[e];
            let eb = &other.edges[e];
            if ea.twin != eb.twin || ea.next != eb.next || ea.prev != eb.prev {
                return false;
            }
            if !self.point_of(ea.origin).eq_eps(&other.point_of(eb.origin), eps) {
                return false;
            }
        }
        if self.face_count() != other.face_count() {
            return false;
        }
        for f in 0..self.faces.len() {
            match (&self.faces[f], &other.faces[f]) {
                (None, None) => {}
                (Some(fa), Some(fb)) => {
                    if fa.outer.is_some() != fb.outer.is_some() || fa.inners.len() != fb.inners.len() {
                        return false;
                    }
                }
                _ => return false,
            }
        }
        true
    }
}

/// Shoelace-area threshold below which a cycle counts as degenerate (§3's
/// "zero-area cycle"). Distinct from the caller-supplied point epsilon: a
/// long dangling edge has coordinate gaps well above a typical point
/// epsilon but still traces a true zero-area (folded) cycle.
const AREA_EPS: f64 = 1e-9;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LineSegment;

    #[test]
    fn insert_single_edge_forms_degenerate_bridge_cycle() {
        let mut sub = Subdivision::empty(1e-9);
        let (e, te) = sub
            .insert_raw_edge(Point::new(0.0, 0.0), Point::new(1.0, 0.0))
            .unwrap();
        sub.rebuild_faces();
        assert_eq!(sub.next(e), te);
        assert_eq!(sub.next(te), e);
        assert_eq!(sub.vertex_count(), 2);
        assert_eq!(sub.edge_count(), 2);
        assert_eq!(sub.zero_area_cycles().len(), 1);
    }

    #[test]
    fn insert_triangle_forms_two_faces() {
        let mut sub = Subdivision::empty(1e-9);
        let a = Point::new(0.0, 0.0);
        let b = Point::new(4.0, 0.0);
        let c = Point::new(0.0, 4.0);
        sub.insert_raw_edge(a, b);
        sub.insert_raw_edge(b, c);
        sub.insert_raw_edge(c, a);
        sub.rebuild_faces();
        assert_eq!(sub.vertex_count(), 3);
        assert_eq!(sub.edge_count(), 6);
        assert_eq!(sub.face_count(), 2);
        let bounded = sub.faces().find(|&f| f != FaceId(0)).unwrap();
        assert!(sub.cycle_signed_area(sub.outer_edge(bounded).unwrap()) < 0.0);
    }

    #[test]
    fn structure_equals_holds_for_clone() {
        let segs = vec![
            LineSegment::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0)),
            LineSegment::new(Point::new(1.0, 0.0), Point::new(0.0, 1.0)),
            LineSegment::new(Point::new(0.0, 1.0), Point::new(0.0, 0.0)),
        ];
        let sub = build::from_lines(&segs, 1e-9);
        let cloned = sub.clone();
        assert!(sub.structure_equals(&cloned));
    }
}
