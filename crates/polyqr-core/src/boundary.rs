//! Boundary extraction: count module edges and build the boundary graph.
//!
//! Every member cell contributes its four unit edges. Edges shared by
//! two member cells are interior and cancel out; edges counted exactly
//! once separate the component from white modules (or the grid border)
//! and form the outer boundary together with every hole boundary.
//!
//! Every vertex of the resulting graph has degree 2 or 4. Degree 4
//! occurs exactly where two parts of the region touch only at a corner.

use std::collections::{BTreeSet, HashMap};

use petgraph::graphmap::UnGraphMap;
use petgraph::visit::Bfs;

use crate::components::Component;
use crate::types::{Cell, Edge, ExtractError, Point};

/// The four edges of a module in enumeration order: top, left, right,
/// bottom.
#[must_use]
pub fn cell_edges((row, col): Cell) -> [Edge; 4] {
    let p00 = Point::new(row, col);
    let p01 = Point::new(row, col + 1);
    let p10 = Point::new(row + 1, col);
    let p11 = Point::new(row + 1, col + 1);
    [
        Edge::new(p00, p01),
        Edge::new(p00, p10),
        Edge::new(p01, p11),
        Edge::new(p10, p11),
    ]
}

/// Compute the boundary edge set of a component: every edge with
/// multiplicity exactly one.
///
/// # Errors
///
/// Returns [`ExtractError::EmptyBoundary`] if the set is empty, which
/// cannot happen for a non-empty finite component.
pub fn boundary_edges(component: &Component) -> Result<BTreeSet<Edge>, ExtractError> {
    let mut counts: HashMap<Edge, u32> = HashMap::with_capacity(component.len() * 4);
    for &cell in component.cells() {
        for edge in cell_edges(cell) {
            *counts.entry(edge).or_insert(0) += 1;
        }
    }

    let boundary: BTreeSet<Edge> = counts
        .into_iter()
        .filter_map(|(edge, count)| (count == 1).then_some(edge))
        .collect();

    if boundary.is_empty() {
        return Err(ExtractError::EmptyBoundary {
            anchor: component.anchor(),
        });
    }
    Ok(boundary)
}

/// Undirected adjacency over boundary-edge endpoints.
///
/// Edges are inserted in canonical edge order, so neighbor iteration is
/// deterministic: for a vertex `v` the order is up, left, right, down.
#[derive(Debug, Clone)]
pub struct BoundaryGraph {
    graph: UnGraphMap<Point, ()>,
}

impl BoundaryGraph {
    /// Build the graph from a boundary edge set.
    #[must_use]
    pub fn new(edges: &BTreeSet<Edge>) -> Self {
        let mut graph = UnGraphMap::with_capacity(edges.len(), edges.len());
        for edge in edges {
            graph.add_edge(edge.a(), edge.b(), ());
        }
        Self { graph }
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Neighbors of `p` in the graph's fixed iteration order.
    pub fn neighbors(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        self.graph.neighbors(p)
    }

    /// Degree of `p` (0 if `p` is not a vertex).
    #[must_use]
    pub fn degree(&self, p: Point) -> usize {
        if self.graph.contains_node(p) {
            self.graph.neighbors(p).count()
        } else {
            0
        }
    }

    /// Vertices of degree 4, in row-major order.
    #[must_use]
    pub fn junctions(&self) -> Vec<Point> {
        let mut junctions: Vec<Point> = self
            .graph
            .nodes()
            .filter(|&p| self.degree(p) == 4)
            .collect();
        junctions.sort_unstable();
        junctions
    }

    /// Connected pieces of the graph, largest (by vertex count) first.
    ///
    /// Pieces of equal size keep the order of their smallest vertex.
    #[must_use]
    pub fn pieces(&self) -> Vec<BTreeSet<Point>> {
        let vertices: BTreeSet<Point> = self.graph.nodes().collect();
        let mut assigned: BTreeSet<Point> = BTreeSet::new();
        let mut pieces = Vec::new();

        for &start in &vertices {
            if assigned.contains(&start) {
                continue;
            }
            let mut piece = BTreeSet::new();
            let mut bfs = Bfs::new(&self.graph, start);
            while let Some(p) = bfs.next(&self.graph) {
                piece.insert(p);
            }
            assigned.extend(piece.iter().copied());
            pieces.push(piece);
        }

        pieces.sort_by(|a, b| b.len().cmp(&a.len()));
        pieces
    }
}
