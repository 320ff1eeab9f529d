//! Small builder structs grouping the optional parameters listed in spec §6.
//! Follows the `VoronoiParams`/`KMeansParams` convention (`fn new() -> Self`
//! plus chainable setters) rather than plain positional arguments.

use crate::types::Rect;

/// Absolute tolerance used pervasively for equality and on-segment tests.
/// `Default` is `0.0`, i.e. exact.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Epsilon(pub f64);

impl Default for Epsilon {
    fn default() -> Self {
        Epsilon(0.0)
    }
}

impl Epsilon {
    pub fn new(value: f64) -> Self {
        Epsilon(value)
    }

    pub fn get(&self) -> f64 {
        self.0
    }
}

impl From<f64> for Epsilon {
    fn from(value: f64) -> Self {
        Epsilon(value)
    }
}

/// Configuration for [`crate::voronoi::find_all`].
#[derive(Clone, Debug)]
pub struct VoronoiConfig {
    pub bounding_rect: Rect,
    pub epsilon: f64,
}

impl VoronoiConfig {
    pub fn new(bounding_rect: Rect) -> Self {
        VoronoiConfig {
            bounding_rect,
            epsilon: 0.0,
        }
    }

    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }
}

/// Configuration for [`crate::point_location::SubdivisionSearch::build`].
///
/// `seed: None` draws the shuffle from OS entropy via `StdRng::from_entropy`;
/// `Some(seed)` is fully deterministic, matching the `seed: Option<u64>`
/// convention `kmeans/mod.rs` uses for its own randomized pass.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocatorConfig {
    pub epsilon: f64,
    pub seed: Option<u64>,
}

impl LocatorConfig {
    pub fn new() -> Self {
        LocatorConfig::default()
    }

    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Configuration for [`crate::voronoi::random_sites`] (§6 "site density
/// min-distance"): the minimum pairwise distance enforced by rejection
/// sampling, the RNG seed, and a bound on rejection attempts per site.
#[derive(Clone, Copy, Debug)]
pub struct SiteDensityConfig {
    pub min_distance: f64,
    pub seed: Option<u64>,
    pub max_attempts_per_site: usize,
}

impl SiteDensityConfig {
    pub fn new(min_distance: f64) -> Self {
        SiteDensityConfig {
            min_distance,
            seed: None,
            max_attempts_per_site: 1000,
        }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn max_attempts_per_site(mut self, max_attempts: usize) -> Self {
        self.max_attempts_per_site = max_attempts;
        self
    }
}

/// Configuration for [`crate::subdivision::Subdivision::validate`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ValidateConfig {
    pub allow_zero_area_cycles: bool,
}

impl ValidateConfig {
    pub fn new() -> Self {
        ValidateConfig::default()
    }

    pub fn allow_zero_area_cycles(mut self, allow: bool) -> Self {
        self.allow_zero_area_cycles = allow;
        self
    }
}
