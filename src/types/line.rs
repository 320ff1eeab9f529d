use super::point::Point;

/// An ordered pair of points. Derived quantities (vector, length, slope,
/// angle) are computed on demand rather than cached, matching the
/// value-type, no-hidden-state feel of `geo_types::Line`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineSegment {
    pub start: Point,
    pub end: Point,
}

impl LineSegment {
    pub fn new(start: Point, end: Point) -> Self {
        LineSegment { start, end }
    }

    pub fn vector(&self) -> Point {
        self.end - self.start
    }

    pub fn length(&self) -> f64 {
        self.vector().length()
    }

    pub fn square_length(&self) -> f64 {
        self.vector().square_length()
    }

    /// `Δy / Δx`; `±inf` for a vertical segment, `NaN` only for a
    /// degenerate (zero-length) one.
    pub fn slope(&self) -> f64 {
        let v = self.vector();
        v.y / v.x
    }

    /// Direction angle in radians, normalized to `[-π, π]`.
    pub fn angle(&self) -> f64 {
        let v = self.vector();
        v.y.atan2(v.x)
    }

    /// A segment is degenerate when its endpoints coincide under `eps`.
    pub fn is_degenerate(&self, eps: f64) -> bool {
        self.start.eq_eps(&self.end, eps)
    }

    /// The point on the segment at parameter `t ∈ [0, 1]` (unclamped for
    /// `t` outside that range, i.e. evaluated on the infinite carrier).
    pub fn point_at(&self, t: f64) -> Point {
        self.start + self.vector() * t
    }

    pub fn bounding_min(&self) -> Point {
        Point::new(self.start.x.min(self.end.x), self.start.y.min(self.end.y))
    }

    pub fn bounding_max(&self) -> Point {
        Point::new(self.start.x.max(self.end.x), self.start.y.max(self.end.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_is_normalized_to_pi_range() {
        let l = LineSegment::new(Point::new(0.0, 0.0), Point::new(-1.0, -1.0));
        let a = l.angle();
        assert!(a >= -std::f64::consts::PI && a <= std::f64::consts::PI);
    }

    #[test]
    fn degenerate_detects_coincident_endpoints() {
        let l = LineSegment::new(Point::new(1.0, 1.0), Point::new(1.0 + 1e-9, 1.0));
        assert!(l.is_degenerate(1e-6));
        assert!(!l.is_degenerate(0.0));
    }
}
