//! A 2D planar-subdivision geometry kernel.
//!
//! # Modules
//!
//! - **[`types`]**: [`types::Coord`]/[`types::Point`], [`types::LineSegment`],
//!   [`types::Rect`], [`types::Size`], and the epsilon-aware comparators
//!   [`types::CompareX`]/[`types::CompareY`] everything else composes on.
//! - **[`line_location`]**: the [`line_location::LineLocation`]/
//!   [`line_location::LineRelation`] vocabulary shared by the pairwise and
//!   multi-segment intersectors.
//! - **[`line_intersection`]**: pairwise segment [`line_intersection::intersect`].
//! - **[`multi_intersection`]**: all-pairs intersection of a segment set, in
//!   brute-force ([`multi_intersection::brute_force`]) and sweep-line
//!   ([`multi_intersection::sweep`]) variants with identical output.
//! - **[`hull`]**: convex hull, polygon area/centroid, point-in-polygon.
//! - **[`subdivision`]**: the doubly-connected edge list planar subdivision —
//!   construction, queries, overlay, and validation.
//! - **[`voronoi`]**: Delaunay triangulation and Voronoi diagram construction
//!   over a bounded rectangle, and conversion into subdivisions.
//! - **[`point_location`]**: a persistent trapezoidal-map acceleration
//!   structure answering `find(q)` against a built subdivision.
//! - **[`graph`]**: a 2D-graph view over a subdivision's vertices.
//! - **[`polygon_grid`]**: regular square/triangle/hexagon cell tilings,
//!   exposed through the same graph interface and convertible to a
//!   subdivision.
//! - **[`error`]**: the structured [`error::Error`] kinds every fallible
//!   operation returns.
//! - **[`config`]**: the small builder structs (`Epsilon`, `VoronoiConfig`,
//!   `LocatorConfig`, `ValidateConfig`, `SiteDensityConfig`) used to
//!   configure the above.
//! - **[`collections`]**: the insertion-ordered map used for small
//!   integer-keyed bijections (cell ↔ face, Voronoi region ↔ face).

pub mod collections;
pub mod config;
pub mod error;
pub mod graph;
pub mod hull;
pub mod line_intersection;
pub mod line_location;
pub mod multi_intersection;
pub mod point_location;
pub mod polygon_grid;
pub mod subdivision;
pub mod types;
pub mod voronoi;

pub use config::{Epsilon, LocatorConfig, SiteDensityConfig, ValidateConfig, VoronoiConfig};
pub use error::{Error, Result};
pub use graph::Graph2D;
pub use hull::{centroid, convex_hull, point_in_polygon, signed_area, Polygon, PointInPolygon};
pub use line_intersection::{intersect, LineIntersection};
pub use line_location::{LineLocation, LineRelation};
pub use multi_intersection::MultiLinePoint;
pub use point_location::SubdivisionSearch;
pub use polygon_grid::{Cell, CellShape, Connectivity, GridConfig, PolygonGrid};
pub use subdivision::{EdgeId, FaceId, Subdivision, SubdivisionElement, VertexId};
pub use types::{Coord, CoordNum, LineSegment, Point, Rect, Size};
pub use voronoi::{random_sites, DelaunayEdge, VoronoiResult};
