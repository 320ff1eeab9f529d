use std::cmp::Ordering;
use std::ops::{Add, Mul, Neg, Sub};

/// Bound shared by every flavor of [`Coord`]. The core (§4.P) is
/// double-only; integer and single-precision flavors are siblings that get
/// the same arithmetic for free by being generic over this trait, per the
/// "dynamic dispatch over numeric flavors" design note.
pub trait CoordNum: num_traits::Num + Copy + PartialOrd + std::fmt::Debug + 'static {}
impl<T> CoordNum for T where T: num_traits::Num + Copy + PartialOrd + std::fmt::Debug + 'static {}

/// A pair of coordinates. Generic over the numeric flavor; [`Point`] is the
/// double-precision specialization the rest of the kernel operates on.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord<T: CoordNum = f64> {
    pub x: T,
    pub y: T,
}

/// The double-precision flavor used throughout the geometry kernel.
pub type Point = Coord<f64>;

impl<T: CoordNum> Coord<T> {
    pub fn new(x: T, y: T) -> Self {
        Coord { x, y }
    }
}

impl<T: CoordNum> Add for Coord<T> {
    type Output = Coord<T>;
    fn add(self, rhs: Self) -> Self {
        Coord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: CoordNum> Sub for Coord<T> {
    type Output = Coord<T>;
    fn sub(self, rhs: Self) -> Self {
        Coord::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<T: CoordNum> Mul<T> for Coord<T> {
    type Output = Coord<T>;
    fn mul(self, rhs: T) -> Self {
        Coord::new(self.x * rhs, self.y * rhs)
    }
}

impl<T> Neg for Coord<T>
where
    T: CoordNum + Neg<Output = T>,
{
    type Output = Coord<T>;
    fn neg(self) -> Self {
        Coord::new(-self.x, -self.y)
    }
}

impl Coord<f64> {
    /// Exact, bitwise coordinate equality.
    pub fn eq_exact(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// Epsilon equality: both coordinates within `eps` independently.
    /// `eps` must be `>= 0`; `eps == 0.0` degrades to [`Self::eq_exact`].
    pub fn eq_eps(&self, other: &Self, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps && (self.y - other.y).abs() <= eps
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// 2D cross product (the z-component of the 3D cross product).
    pub fn cross(&self, other: &Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn length(&self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn square_length(&self) -> f64 {
        self.dot(self)
    }

    pub fn distance(&self, other: &Self) -> f64 {
        (*self - *other).length()
    }

    pub fn square_distance(&self, other: &Self) -> f64 {
        (*self - *other).square_length()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Orders by x, breaking ties by y. Both an "exact" static comparator and an
/// epsilon-aware instance form are exposed, per §4.P.
#[derive(Clone, Copy, Debug, Default)]
pub struct CompareX {
    pub eps: f64,
}

/// Orders by y, breaking ties by x.
#[derive(Clone, Copy, Debug, Default)]
pub struct CompareY {
    pub eps: f64,
}

fn cmp_with_eps(a: f64, b: f64, eps: f64) -> Ordering {
    let d = a - b;
    if d.abs() <= eps {
        Ordering::Equal
    } else if d < 0.0 {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

impl CompareX {
    pub fn new(eps: f64) -> Self {
        CompareX { eps }
    }

    /// Exact (`eps == 0.0`) x-then-y ordering, usable as a `sort_by` key
    /// without constructing an instance.
    pub fn exact(a: &Point, b: &Point) -> Ordering {
        CompareX::default().compare(a, b)
    }

    pub fn compare(&self, a: &Point, b: &Point) -> Ordering {
        match cmp_with_eps(a.x, b.x, self.eps) {
            Ordering::Equal => cmp_with_eps(a.y, b.y, self.eps),
            other => other,
        }
    }

    /// Binary search plus expanding-window nearest-point search, O(√n) on a
    /// well-distributed sorted-by-x array (§4.P). Ties are resolved in
    /// favor of the first candidate reached by the expanding window — the
    /// source leaves this unspecified (§9 open question) and so do we.
    pub fn find_nearest(&self, sorted: &[Point], q: &Point) -> Option<usize> {
        find_nearest_generic(sorted, q, |p| p.x, self.eps)
    }
}

impl CompareY {
    pub fn new(eps: f64) -> Self {
        CompareY { eps }
    }

    pub fn exact(a: &Point, b: &Point) -> Ordering {
        CompareY::default().compare(a, b)
    }

    pub fn compare(&self, a: &Point, b: &Point) -> Ordering {
        match cmp_with_eps(a.y, b.y, self.eps) {
            Ordering::Equal => cmp_with_eps(a.x, b.x, self.eps),
            other => other,
        }
    }

    pub fn find_nearest(&self, sorted: &[Point], q: &Point) -> Option<usize> {
        find_nearest_generic(sorted, q, |p| p.y, self.eps)
    }
}

/// Shared nearest-point search: seed with a lower-bound on the primary
/// coordinate, then expand a window on both sides while the primary-axis
/// gap to the query remains smaller than the best Euclidean distance seen
/// so far. Early termination, not a sorted linear scan, is the contract.
fn find_nearest_generic(
    sorted: &[Point],
    q: &Point,
    primary: impl Fn(&Point) -> f64,
    eps: f64,
) -> Option<usize> {
    if sorted.is_empty() {
        return None;
    }
    let qp = primary(q);
    // Lower bound: first index whose primary coordinate is >= qp - eps.
    let seed = sorted.partition_point(|p| primary(p) < qp - eps);
    let seed = seed.min(sorted.len() - 1);

    let mut best_idx = seed;
    let mut best_dist = sorted[seed].square_distance(q);

    let mut lo = seed as isize;
    let mut hi = seed as isize;
    loop {
        let mut advanced = false;
        if lo > 0 {
            let gap = qp - primary(&sorted[(lo - 1) as usize]);
            if gap * gap < best_dist || lo as usize == sorted.len() {
                lo -= 1;
                let d = sorted[lo as usize].square_distance(q);
                if d < best_dist {
                    best_dist = d;
                    best_idx = lo as usize;
                }
                advanced = true;
            }
        }
        if (hi as usize) + 1 < sorted.len() {
            let gap = primary(&sorted[(hi + 1) as usize]) - qp;
            if gap * gap < best_dist {
                hi += 1;
                let d = sorted[hi as usize].square_distance(q);
                if d < best_dist {
                    best_dist = d;
                    best_idx = hi as usize;
                }
                advanced = true;
            }
        }
        if !advanced {
            break;
        }
    }
    Some(best_idx)
}

#[cfg(feature = "approx")]
mod approx_impls {
    use super::Coord;
    use approx::{AbsDiffEq, RelativeEq};

    impl AbsDiffEq for Coord<f64> {
        type Epsilon = f64;
        fn default_epsilon() -> f64 {
            f64::default_epsilon()
        }
        fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
            self.eq_eps(other, epsilon)
        }
    }

    impl RelativeEq for Coord<f64> {
        fn default_max_relative() -> f64 {
            f64::default_max_relative()
        }
        fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
            f64::relative_eq(&self.x, &other.x, epsilon, max_relative)
                && f64::relative_eq(&self.y, &other.y, epsilon, max_relative)
        }
    }
}
