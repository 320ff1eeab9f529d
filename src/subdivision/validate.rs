//! `Validate` (§4.S): an O(n) diagnostic checking every invariant of §3.
//! Only this pass (or internal `debug_assert!`s in the builders) may
//! surface [`crate::error::Error::TopologyViolation`] — the constructive
//! fast path never does (§7).

use super::{FaceId, Subdivision};
use crate::config::ValidateConfig;
use crate::error::{Error, Result};

impl Subdivision {
    /// Checks every invariant of §3 in one O(n) pass. Returns the first
    /// violation found; a clean pass returns `Ok(())`.
    pub fn validate(&self, config: ValidateConfig) -> Result<()> {
        for e in self.edges() {
            let t = self.twin(e);
            if self.twin(t) != e {
                return Err(Error::topology(format!(
                    "twin({:?}) = {:?}, but twin({:?}) = {:?} (expected {:?})",
                    e,
                    t,
                    t,
                    self.twin(t),
                    e
                )));
            }
            if t == e {
                return Err(Error::topology(format!("edge {e:?} is its own twin")));
            }
            if self.origin(t) != self.destination(e) {
                return Err(Error::topology(format!(
                    "origin(twin({e:?})) does not equal destination({e:?})"
                )));
            }

            let (n, p) = (self.next(e), self.prev(e));
            if self.face_of(n) != self.face_of(e) || self.face_of(p) != self.face_of(e) {
                return Err(Error::topology(format!(
                    "next/prev of {e:?} leave its face"
                )));
            }
            if self.next(p) != e || self.prev(n) != e {
                return Err(Error::topology(format!(
                    "next/prev cycle broken around {e:?}"
                )));
            }
        }

        // No two half-edges sharing an origin may share a destination.
        for v in self.vertices() {
            let outgoing = self.outgoing(v);
            for i in 0..outgoing.len() {
                for j in (i + 1)..outgoing.len() {
                    if self.destination(outgoing[i]) == self.destination(outgoing[j]) {
                        return Err(Error::topology(format!(
                            "vertex {v:?} has two outgoing edges to the same destination"
                        )));
                    }
                }
            }
        }

        // No two vertices compare equal under epsilon: adjacent pairs in
        // (x, y) order are the only candidates, since CompareX total-orders
        // vertex_order by that same epsilon.
        let points: Vec<_> = self.vertices().map(|v| self.point_of(v)).collect();
        for w in points.windows(2) {
            if w[0].eq_eps(&w[1], self.eps) {
                return Err(Error::topology(
                    "two distinct vertices compare equal under epsilon",
                ));
            }
        }

        for f in self.faces() {
            if f == FaceId(0) {
                if self.outer_edge(f).is_some() {
                    return Err(Error::topology("the unbounded face has an outer boundary"));
                }
                continue;
            }
            let outer = self
                .outer_edge(f)
                .ok_or_else(|| Error::topology(format!("bounded face {f:?} has no outer boundary")))?;
            let area = self.cycle_signed_area(outer);
            if area > 0.0 && !self.is_zero_area_cycle(outer) {
                return Err(Error::topology(format!(
                    "face {f:?}'s outer boundary has positive signed area {area}"
                )));
            }
            for &inner in self.inner_edges(f) {
                let inner_area = self.cycle_signed_area(inner);
                if inner_area < 0.0 && !self.is_zero_area_cycle(inner) {
                    return Err(Error::topology(format!(
                        "face {f:?}'s inner boundary (hole) has negative signed area {inner_area}"
                    )));
                }
            }
        }

        if !config.allow_zero_area_cycles && !self.zero_area_cycles().is_empty() {
            return Err(Error::topology(format!(
                "{} zero-area cycle(s) present and not explicitly allowed",
                self.zero_area_cycles().len()
            )));
        }

        log::debug!(
            "subdivision::validate: {} vertices, {} edges, {} faces OK",
            self.vertex_count(),
            self.edge_count(),
            self.face_count()
        );
        Ok(())
    }
}
