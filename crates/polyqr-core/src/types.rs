//! Shared types for the polyqr extraction core.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::decompose::DecomposePolicy;

/// A module cell, addressed `(row, col)`.
pub type Cell = (u32, u32);

/// A grid vertex: the corner of a module.
///
/// An `n×n` grid has `(n+1)×(n+1)` vertices. Ordering is row-major,
/// which is what the boundary graph and the decomposer rely on for
/// deterministic iteration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Point {
    /// Vertex row (grows downward).
    pub row: u32,
    /// Vertex column (grows to the right).
    pub col: u32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Manhattan distance to another point.
    ///
    /// For the axis-aligned segments of a chain this is the segment
    /// length in module units.
    #[must_use]
    pub const fn manhattan(self, other: Self) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Whether three grid points share a row or share a column.
///
/// On an axis-aligned path this is exactly "the middle point does not
/// turn".
#[must_use]
pub const fn collinear(a: Point, b: Point, c: Point) -> bool {
    (a.row == b.row && b.row == c.row) || (a.col == b.col && b.col == c.col)
}

/// An undirected unit edge between two adjacent grid points.
///
/// Stored canonically with the smaller endpoint first, so an edge and
/// its reverse compare and hash equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    a: Point,
    b: Point,
}

impl Edge {
    /// Create the canonical edge between `p` and `q`.
    #[must_use]
    pub fn new(p: Point, q: Point) -> Self {
        if p <= q { Self { a: p, b: q } } else { Self { a: q, b: p } }
    }

    /// The smaller endpoint.
    #[must_use]
    pub const fn a(self) -> Point {
        self.a
    }

    /// The larger endpoint.
    #[must_use]
    pub const fn b(self) -> Point {
        self.b
    }

    /// The endpoint opposite `p`, if `p` is an endpoint.
    #[must_use]
    pub fn other(self, p: Point) -> Option<Point> {
        if p == self.a {
            Some(self.b)
        } else if p == self.b {
            Some(self.a)
        } else {
            None
        }
    }
}

/// A closed polygon: an ordered point sequence with an implicit edge
/// from the last point back to the first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chain(Vec<Point>);

impl Chain {
    /// Create a chain from its vertices.
    #[must_use]
    pub const fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Returns `true` if the chain has no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of vertices.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns a slice of all points.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// Consumes the chain and returns the underlying vector of points.
    #[must_use]
    pub fn into_points(self) -> Vec<Point> {
        self.0
    }

    /// Iterate over the polygon's sides as `(from, to)` pairs, including
    /// the closing side from the last point back to the first.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.0.len();
        (0..n).map(move |i| (self.0[i], self.0[(i + 1) % n]))
    }

    /// Expand every side into its canonical unit edges.
    ///
    /// Diagonal sides (which a well-formed chain never contains) yield
    /// nothing.
    pub fn unit_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.segments().flat_map(|(p, q)| unit_steps(p, q))
    }
}

/// Unit edges along an axis-aligned segment from `p` to `q`.
fn unit_steps(p: Point, q: Point) -> Vec<Edge> {
    if p.row == q.row {
        let (lo, hi) = (p.col.min(q.col), p.col.max(q.col));
        (lo..hi)
            .map(|c| Edge::new(Point::new(p.row, c), Point::new(p.row, c + 1)))
            .collect()
    } else if p.col == q.col {
        let (lo, hi) = (p.row.min(q.row), p.row.max(q.row));
        (lo..hi)
            .map(|r| Edge::new(Point::new(r, p.col), Point::new(r + 1, p.col)))
            .collect()
    } else {
        Vec::new()
    }
}

/// All chains of one 4-connected component.
///
/// The chains are drawn together under the even-odd rule so that hole
/// boundaries subtract area from the outer boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainGroup {
    /// First cell of the component in row-major discovery order.
    pub anchor: Cell,
    /// Closed chains, largest boundary piece first.
    pub chains: Vec<Chain>,
    /// Boundary vertices of degree 4 (corner-only contacts).
    pub junctions: Vec<Point>,
}

/// Result of extracting polygons from a grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    /// Edge length of the source grid in modules.
    pub size: u32,
    /// One group per component, in row-major discovery order.
    pub groups: Vec<ChainGroup>,
}

impl Extraction {
    /// Returns `true` if the grid had no black modules.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterate over every chain of every group, in emission order.
    pub fn chains(&self) -> impl Iterator<Item = &Chain> + '_ {
        self.groups.iter().flat_map(|g| g.chains.iter())
    }
}

/// Configuration for polygon extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// How boundary graphs with degree-4 junctions are split into chains.
    pub policy: DecomposePolicy,

    /// Whether to remove collinear vertices from the chains.
    ///
    /// Disabling this keeps every unit step, which is useful for
    /// checking closure but produces much larger output.
    pub simplify: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            policy: DecomposePolicy::default(),
            simplify: true,
        }
    }
}

/// Errors that can occur during extraction.
///
/// The first group are input violations detected before any traversal.
/// The remaining variants are internal invariant violations: they are
/// unreachable for any grid, but are reported instead of emitting a
/// garbled chain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// The grid has no rows.
    #[error("grid has no rows")]
    EmptyGrid,

    /// A row's length differs from the first row's.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },

    /// The grid is rectangular but not square.
    #[error("grid is {rows}x{cols}, expected a square grid")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// The grid dimension does not fit the vertex coordinate range.
    #[error("grid dimension {0} is too large")]
    TooLarge(usize),

    /// A textual grid contained a character that is neither black nor white.
    #[error("unexpected character {ch:?} at row {row}, column {col}")]
    InvalidCell {
        /// Row of the character.
        row: usize,
        /// Column of the character.
        col: usize,
        /// The offending character.
        ch: char,
    },

    /// A non-empty component produced no boundary edges.
    #[error("component anchored at {anchor:?} has no boundary edges")]
    EmptyBoundary {
        /// First cell of the component.
        anchor: Cell,
    },

    /// The decomposer ran out of unused edges where one must exist.
    #[error("cycle decomposition of component anchored at {anchor:?} stalled at vertex {at}")]
    DeadEnd {
        /// First cell of the component.
        anchor: Cell,
        /// Vertex at which no continuation was found.
        at: Point,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // --- Point tests ---

    #[test]
    fn point_ordering_is_row_major() {
        assert!(Point::new(0, 5) < Point::new(1, 0));
        assert!(Point::new(2, 1) < Point::new(2, 3));
    }

    #[test]
    fn manhattan_distance() {
        assert_eq!(Point::new(1, 4).manhattan(Point::new(1, 1)), 3);
        assert_eq!(Point::new(0, 2).manhattan(Point::new(5, 2)), 5);
    }

    #[test]
    fn point_display() {
        assert_eq!(Point::new(3, 7).to_string(), "(3, 7)");
    }

    #[test]
    fn collinear_rows_and_columns() {
        assert!(collinear(Point::new(1, 0), Point::new(1, 1), Point::new(1, 2)));
        assert!(collinear(Point::new(0, 4), Point::new(1, 4), Point::new(2, 4)));
        assert!(!collinear(Point::new(0, 0), Point::new(0, 1), Point::new(1, 1)));
    }

    // --- Edge tests ---

    #[test]
    fn edge_is_canonical() {
        let p = Point::new(2, 3);
        let q = Point::new(2, 4);
        assert_eq!(Edge::new(p, q), Edge::new(q, p));
        assert_eq!(Edge::new(q, p).a(), p);
        assert_eq!(Edge::new(q, p).b(), q);
    }

    #[test]
    fn edge_other_endpoint() {
        let e = Edge::new(Point::new(0, 0), Point::new(1, 0));
        assert_eq!(e.other(Point::new(0, 0)), Some(Point::new(1, 0)));
        assert_eq!(e.other(Point::new(1, 0)), Some(Point::new(0, 0)));
        assert_eq!(e.other(Point::new(5, 5)), None);
    }

    // --- Chain tests ---

    #[test]
    fn segments_include_closing_side() {
        let chain = Chain::new(vec![
            Point::new(0, 0),
            Point::new(0, 2),
            Point::new(1, 2),
            Point::new(1, 0),
        ]);
        let segments: Vec<_> = chain.segments().collect();
        assert_eq!(segments.len(), 4);
        assert_eq!(segments[3], (Point::new(1, 0), Point::new(0, 0)));
    }

    #[test]
    fn unit_edges_expand_long_sides() {
        let chain = Chain::new(vec![
            Point::new(0, 0),
            Point::new(0, 2),
            Point::new(1, 2),
            Point::new(1, 0),
        ]);
        // Perimeter of a 1x2 rectangle.
        assert_eq!(chain.unit_edges().count(), 6);
        assert!(
            chain
                .unit_edges()
                .any(|e| e == Edge::new(Point::new(0, 1), Point::new(0, 2)))
        );
    }

    #[test]
    fn diagonal_side_has_no_unit_edges() {
        let chain = Chain::new(vec![Point::new(0, 0), Point::new(1, 1)]);
        assert_eq!(chain.unit_edges().count(), 0);
    }

    // --- Config tests ---

    #[test]
    fn default_config_simplifies() {
        let config = ExtractConfig::default();
        assert!(config.simplify);
        assert_eq!(config.policy, DecomposePolicy::Spliced);
    }

    #[test]
    fn config_roundtrips_through_json() {
        let config = ExtractConfig {
            policy: DecomposePolicy::Separate,
            simplify: false,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: ExtractConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn partial_config_json_uses_defaults() {
        let config: ExtractConfig =
            serde_json::from_str(r#"{"policy":"separate"}"#).unwrap();
        assert_eq!(config.policy, DecomposePolicy::Separate);
        assert!(config.simplify);
    }

    // --- Error tests ---

    #[test]
    fn error_messages_name_the_anchor() {
        let err = ExtractError::DeadEnd {
            anchor: (3, 4),
            at: Point::new(5, 6),
        };
        let msg = err.to_string();
        assert!(msg.contains("(3, 4)"), "{msg}");
        assert!(msg.contains("(5, 6)"), "{msg}");
    }
}
