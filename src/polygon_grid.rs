//! Regular cell tilings (§4.G/§4.K): square, triangle, and hexagon grids
//! exposed through the same [`Graph2D`] interface a [`Subdivision`] is, and
//! convertible into one. Grounded in the same adapter shape a `GridAdapter`
//! trait gives rectangular and hex grids elsewhere in this retrieval pack —
//! one trait, several concrete neighbor rules underneath.

use crate::collections::InsertionOrderedMap;
use crate::graph::Graph2D;
use crate::hull::{centroid, Polygon};
use crate::subdivision::{from_polygons, FaceId, Subdivision, SubdivisionElement};
use crate::types::Point;

/// The cell shape a [`PolygonGrid`] tiles with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellShape {
    Square,
    Triangle,
    Hexagon,
}

/// Neighbor rule for [`CellShape::Square`] cells. Triangle and hexagon
/// cells always use their natural edge-adjacency (3 and 6 respectively);
/// this knob only widens/narrows the square case.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Connectivity {
    /// Orthogonal neighbors only.
    Four,
    /// Orthogonal plus diagonal neighbors (Moore neighborhood).
    Eight,
}

/// Placement parameters shared by every shape: cell size, world-space
/// origin, rotation, and (square-only) a per-row horizontal brick offset.
#[derive(Clone, Copy, Debug)]
pub struct GridConfig {
    pub shape: CellShape,
    pub cell_size: f64,
    pub origin: Point,
    pub orientation_deg: f64,
    pub shift: f64,
    pub connectivity: Connectivity,
}

impl GridConfig {
    pub fn new(shape: CellShape, cell_size: f64) -> Self {
        GridConfig {
            shape,
            cell_size,
            origin: Point::new(0.0, 0.0),
            orientation_deg: 0.0,
            shift: 0.0,
            connectivity: Connectivity::Four,
        }
    }

    pub fn origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    pub fn orientation_deg(mut self, deg: f64) -> Self {
        self.orientation_deg = deg;
        self
    }

    /// Fractional (0..1) horizontal offset applied to alternating rows of a
    /// square grid, for a brick-course layout. Ignored for other shapes.
    pub fn shift(mut self, shift: f64) -> Self {
        self.shift = shift;
        self
    }

    pub fn connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    fn place(&self, local: Point) -> Point {
        let theta = self.orientation_deg.to_radians();
        let (s, c) = theta.sin_cos();
        Point::new(
            self.origin.x + local.x * c - local.y * s,
            self.origin.y + local.x * s + local.y * c,
        )
    }
}

/// A cell coordinate. `Square`/`Triangle` use an integer (col, row) pair;
/// `Hexagon` uses axial (q, r).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    Square(i64, i64),
    Triangle(i64, i64),
    Hexagon(i64, i64),
}

/// A finite rectangular patch of `cols` by `rows` cells of `config.shape`.
pub struct PolygonGrid {
    config: GridConfig,
    cols: i64,
    rows: i64,
}

impl PolygonGrid {
    pub fn new(config: GridConfig, cols: usize, rows: usize) -> Self {
        PolygonGrid {
            config,
            cols: cols as i64,
            rows: rows as i64,
        }
    }

    pub fn config(&self) -> GridConfig {
        self.config
    }

    fn in_bounds(&self, cell: Cell) -> bool {
        match cell {
            Cell::Square(c, r) => (0..self.cols).contains(&c) && (0..self.rows).contains(&r),
            // Triangle columns run `0..(2 * cols)` (two triangles per unit
            // square), per `cells()`.
            Cell::Triangle(c, r) => (0..2 * self.cols).contains(&c) && (0..self.rows).contains(&r),
            Cell::Hexagon(q, r) => (0..self.cols).contains(&q) && (0..self.rows).contains(&r),
        }
    }

    /// Every cell in the patch, in row-major order.
    pub fn cells(&self) -> Vec<Cell> {
        let mut out = Vec::with_capacity((self.cols * self.rows) as usize);
        match self.config.shape {
            CellShape::Square | CellShape::Hexagon => {
                for r in 0..self.rows {
                    for c in 0..self.cols {
                        out.push(if self.config.shape == CellShape::Square {
                            Cell::Square(c, r)
                        } else {
                            Cell::Hexagon(c, r)
                        });
                    }
                }
            }
            CellShape::Triangle => {
                // Two triangles (up at even columns, down at odd) per unit
                // square, so a `cols`-wide patch has `2 * cols` triangle
                // columns.
                for r in 0..self.rows {
                    for c in 0..(2 * self.cols) {
                        out.push(Cell::Triangle(c, r));
                    }
                }
            }
        }
        out
    }

    /// The cell's polygon ring in world coordinates.
    pub fn cell_polygon(&self, cell: Cell) -> Polygon {
        let s = self.config.cell_size;
        match cell {
            Cell::Square(c, r) => {
                let row_shift = if r.rem_euclid(2) == 1 {
                    self.config.shift * s
                } else {
                    0.0
                };
                let x0 = c as f64 * s + row_shift;
                let y0 = r as f64 * s;
                vec![
                    self.config.place(Point::new(x0, y0)),
                    self.config.place(Point::new(x0 + s, y0)),
                    self.config.place(Point::new(x0 + s, y0 + s)),
                    self.config.place(Point::new(x0, y0 + s)),
                ]
            }
            Cell::Triangle(c, r) => {
                let h = s * 3f64.sqrt() / 2.0;
                let y0 = r as f64 * h;
                let y1 = y0 + h;
                // Column `c` spans half a unit square each; even columns
                // point up, odd columns point down.
                let x_left = (c / 2) as f64 * s + if c.rem_euclid(2) == 1 { s / 2.0 } else { 0.0 };
                if c.rem_euclid(2) == 0 {
                    vec![
                        self.config.place(Point::new(x_left, y1)),
                        self.config.place(Point::new(x_left + s, y1)),
                        self.config.place(Point::new(x_left + s / 2.0, y0)),
                    ]
                } else {
                    vec![
                        self.config.place(Point::new(x_left, y0)),
                        self.config.place(Point::new(x_left + s / 2.0, y1)),
                        self.config.place(Point::new(x_left - s / 2.0, y1)),
                    ]
                }
            }
            Cell::Hexagon(q, r) => {
                let cx = s * 3f64.sqrt() * (q as f64 + (r as f64) / 2.0);
                let cy = s * 1.5 * r as f64;
                let mut ring = Vec::with_capacity(6);
                for k in 0..6 {
                    let angle = (60 * k) as f64 + 30.0;
                    let rad = angle.to_radians();
                    ring.push(self.config.place(Point::new(cx + s * rad.cos(), cy + s * rad.sin())));
                }
                ring
            }
        }
    }

    pub fn cell_centroid(&self, cell: Cell) -> Point {
        let ring = self.cell_polygon(cell);
        centroid(&ring).unwrap_or_else(|_| {
            let n = ring.len().max(1) as f64;
            let sum = ring
                .iter()
                .fold(Point::new(0.0, 0.0), |acc, &p| acc + p);
            Point::new(sum.x / n, sum.y / n)
        })
    }

    fn neighbors(&self, cell: Cell) -> Vec<Cell> {
        let candidates: Vec<Cell> = match cell {
            Cell::Square(c, r) => {
                let mut v = vec![
                    Cell::Square(c - 1, r),
                    Cell::Square(c + 1, r),
                    Cell::Square(c, r - 1),
                    Cell::Square(c, r + 1),
                ];
                if self.config.connectivity == Connectivity::Eight {
                    v.extend([
                        Cell::Square(c - 1, r - 1),
                        Cell::Square(c + 1, r - 1),
                        Cell::Square(c - 1, r + 1),
                        Cell::Square(c + 1, r + 1),
                    ]);
                }
                v
            }
            Cell::Triangle(c, r) => {
                let mut v = vec![Cell::Triangle(c - 1, r), Cell::Triangle(c + 1, r)];
                // An "up" triangle (even column) shares its base with the
                // "down" triangle directly below it; a "down" triangle
                // shares its base with the "up" triangle above it.
                if c.rem_euclid(2) == 0 {
                    v.push(Cell::Triangle(c, r + 1));
                } else {
                    v.push(Cell::Triangle(c, r - 1));
                }
                v
            }
            Cell::Hexagon(q, r) => vec![
                Cell::Hexagon(q + 1, r),
                Cell::Hexagon(q - 1, r),
                Cell::Hexagon(q, r + 1),
                Cell::Hexagon(q, r - 1),
                Cell::Hexagon(q + 1, r - 1),
                Cell::Hexagon(q - 1, r + 1),
            ],
        };
        candidates.into_iter().filter(|c| self.in_bounds(*c)).collect()
    }

    /// One bounded face per cell, with the cell <-> face-key bijection
    /// §4.K asks for.
    pub fn to_subdivision(&self, eps: f64) -> (Subdivision, InsertionOrderedMap<Cell, FaceId>) {
        let cells = self.cells();
        let rings: Vec<Polygon> = cells.iter().map(|&c| self.cell_polygon(c)).collect();
        let sub = from_polygons(&rings, eps);

        let mut cell_to_face = InsertionOrderedMap::new();
        for &cell in &cells {
            let c = self.cell_centroid(cell);
            if let SubdivisionElement::Face(f) = sub.find(c) {
                cell_to_face.insert(cell, f);
            }
        }
        log::debug!(
            "polygon_grid::to_subdivision: {} cells -> {} faces",
            cells.len(),
            sub.face_count()
        );
        (sub, cell_to_face)
    }
}

impl Graph2D for PolygonGrid {
    type Node = Cell;

    fn position(&self, node: Cell) -> Point {
        self.cell_centroid(node)
    }

    fn get_neighbors(&self, node: Cell) -> Vec<Cell> {
        self.neighbors(node)
    }

    fn get_nearest_node(&self, q: Point) -> Option<Cell> {
        self.cells()
            .into_iter()
            .min_by(|&a, &b| {
                let da = self.cell_centroid(a).distance(&q);
                let db = self.cell_centroid(b).distance(&q);
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
    }

    fn contains(&self, q: Point) -> bool {
        self.cells().into_iter().any(|c| self.cell_centroid(c).eq_exact(&q))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_by_two_square_grid_has_four_cells_and_shared_edges() {
        let grid = PolygonGrid::new(GridConfig::new(CellShape::Square, 1.0), 2, 2);
        let cells = grid.cells();
        assert_eq!(cells.len(), 4);
        for &c in &cells {
            let neighbors = grid.get_neighbors(c);
            assert_eq!(neighbors.len(), 2, "every cell in a 2x2 orthogonal grid has exactly 2 in-bounds neighbors");
        }
    }

    #[test]
    fn eight_connectivity_adds_the_diagonal_neighbor() {
        let grid = PolygonGrid::new(
            GridConfig::new(CellShape::Square, 1.0).connectivity(Connectivity::Eight),
            2,
            2,
        );
        for c in grid.cells() {
            assert_eq!(grid.get_neighbors(c).len(), 3, "2x2 Moore neighborhood: 2 orthogonal + 1 diagonal");
        }
    }

    #[test]
    fn pairwise_distances_in_a_uniform_square_grid_are_equal() {
        let grid = PolygonGrid::new(GridConfig::new(CellShape::Square, 2.0), 2, 1);
        let d = grid.get_distance(Cell::Square(0, 0), Cell::Square(1, 0));
        assert!((d - 2.0).abs() < 1e-9);
    }

    #[test]
    fn to_subdivision_round_trips_every_cell_centroid_to_its_own_face() {
        let grid = PolygonGrid::new(GridConfig::new(CellShape::Square, 1.0), 2, 2);
        let (sub, cell_to_face) = grid.to_subdivision(1e-9);
        assert_eq!(cell_to_face.len(), 4);
        for &cell in &grid.cells() {
            let face = *cell_to_face.get(&cell).unwrap();
            let c = grid.cell_centroid(cell);
            assert_eq!(sub.find(c), SubdivisionElement::Face(face));
        }
    }

    #[test]
    fn hexagon_cell_has_six_vertices() {
        let grid = PolygonGrid::new(GridConfig::new(CellShape::Hexagon, 1.0), 3, 3);
        let ring = grid.cell_polygon(Cell::Hexagon(1, 1));
        assert_eq!(ring.len(), 6);
    }

    #[test]
    fn triangle_cells_alternate_up_and_down_but_share_edge_length() {
        let grid = PolygonGrid::new(GridConfig::new(CellShape::Triangle, 2.0), 2, 2);
        let up = grid.cell_polygon(Cell::Triangle(0, 0));
        let down = grid.cell_polygon(Cell::Triangle(1, 0));
        assert_eq!(up.len(), 3);
        assert_eq!(down.len(), 3);
    }
}
