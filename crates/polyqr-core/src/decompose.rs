//! Cycle decomposition: partition a component's boundary edges into
//! closed chains.
//!
//! This module defines the [`ChainDecomposer`] trait and the
//! [`DecomposePolicy`] enum for selecting how degree-4 junctions are
//! resolved. Both policies walk the boundary with the same
//! turn-preference rule: when more than one unused edge leaves the
//! current vertex, a neighbor that turns is taken over one that
//! continues straight. The walk therefore hugs the wall and dives into a
//! hole that touches the boundary at a corner instead of cutting past
//! it, which keeps straight runs short once corners are rounded.
//!
//! Whatever the policy, every boundary edge ends up in exactly one chain
//! exactly once, so the even-odd fill of the chains is always the
//! component itself.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::boundary::BoundaryGraph;
use crate::types::{Cell, Chain, Edge, ExtractError, Point, collinear};

/// Selects how boundary graphs are split into closed chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecomposePolicy {
    /// One chain per connected boundary piece.
    ///
    /// Walks that stop early at a degree-4 junction are extended by
    /// splicing further passes into the previous walk, so a hole that
    /// touches the outline at a corner is drawn as part of the same
    /// self-touching chain.
    #[default]
    Spliced,

    /// A new chain every time a walk returns to its start vertex.
    ///
    /// Pieces with junctions may yield several chains that share a
    /// vertex.
    Separate,
}

/// Trait for boundary decomposition strategies.
///
/// Input: the boundary graph and edge set of one component.
/// Output: closed chains that use every boundary edge exactly once.
pub trait ChainDecomposer {
    /// Decompose the boundary of the component anchored at `anchor`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::DeadEnd`] if a walk cannot be continued.
    fn decompose(
        &self,
        graph: &BoundaryGraph,
        edges: &BTreeSet<Edge>,
        anchor: Cell,
    ) -> Result<Vec<Chain>, ExtractError>;
}

impl ChainDecomposer for DecomposePolicy {
    fn decompose(
        &self,
        graph: &BoundaryGraph,
        edges: &BTreeSet<Edge>,
        anchor: Cell,
    ) -> Result<Vec<Chain>, ExtractError> {
        let mut chains = Vec::new();
        for piece in graph.pieces() {
            let mut unused: BTreeSet<Edge> = edges
                .iter()
                .filter(|e| piece.contains(&e.a()))
                .copied()
                .collect();
            match *self {
                Self::Spliced => {
                    chains.push(spliced_chain(graph, &piece, &mut unused, anchor)?);
                }
                Self::Separate => {
                    chains.extend(separate_chains(graph, &mut unused, anchor)?);
                }
            }
        }
        Ok(chains)
    }
}

/// Pick the next vertex from `curr` along an unused edge.
///
/// With a known previous vertex, the first candidate that turns wins;
/// otherwise (or if every candidate goes straight) the first candidate
/// in adjacency order is taken.
fn next_vertex(
    graph: &BoundaryGraph,
    unused: &BTreeSet<Edge>,
    prev: Option<Point>,
    curr: Point,
) -> Option<Point> {
    let mut candidates = graph
        .neighbors(curr)
        .filter(|&v| unused.contains(&Edge::new(curr, v)));
    let first = candidates.next()?;
    match prev {
        Some(p) if collinear(p, curr, first) => {
            Some(candidates.find(|&v| !collinear(p, curr, v)).unwrap_or(first))
        }
        _ => Some(first),
    }
}

/// Build one closed chain covering every edge of a boundary piece.
fn spliced_chain(
    graph: &BoundaryGraph,
    piece: &BTreeSet<Point>,
    unused: &mut BTreeSet<Edge>,
    anchor: Cell,
) -> Result<Chain, ExtractError> {
    // The row-major smallest vertex has only a right and a down edge.
    let init = piece
        .first()
        .copied()
        .ok_or(ExtractError::EmptyBoundary { anchor })?;

    // Initial walk: close as soon as the edge back to `init` is free.
    let mut walk = vec![init];
    let mut prev = None;
    loop {
        let curr = walk[walk.len() - 1];
        if curr != init && unused.remove(&Edge::new(curr, init)) {
            break;
        }
        let next =
            next_vertex(graph, unused, prev, curr).ok_or(ExtractError::DeadEnd { anchor, at: curr })?;
        unused.remove(&Edge::new(curr, next));
        walk.push(next);
        prev = Some(curr);
    }

    // Splice passes: follow the previous walk, detouring along unused
    // edges wherever they leave the current vertex.
    while !unused.is_empty() {
        let remaining = unused.len();
        let mut spliced = vec![init];
        let mut prev = None;
        let mut cursor = 1;
        loop {
            let curr = spliced[spliced.len() - 1];
            if let Some(next) = next_vertex(graph, unused, prev, curr) {
                unused.remove(&Edge::new(curr, next));
                spliced.push(next);
                prev = Some(curr);
                continue;
            }
            // A detour can only get stuck where it left the walk.
            if walk[cursor - 1] != curr {
                return Err(ExtractError::DeadEnd { anchor, at: curr });
            }
            if cursor == walk.len() {
                break;
            }
            spliced.push(walk[cursor]);
            prev = Some(curr);
            cursor += 1;
        }
        if unused.len() == remaining {
            return Err(ExtractError::DeadEnd { anchor, at: init });
        }
        tracing::trace!(
            ?anchor,
            vertices = spliced.len(),
            remaining = unused.len(),
            "splice pass"
        );
        walk = spliced;
    }

    Ok(Chain::new(walk))
}

/// Split a boundary piece into closed walks, closing each one the first
/// time it returns to its start vertex.
fn separate_chains(
    graph: &BoundaryGraph,
    unused: &mut BTreeSet<Edge>,
    anchor: Cell,
) -> Result<Vec<Chain>, ExtractError> {
    let mut chains = Vec::new();
    // The smallest unused edge starts at the smallest vertex with one.
    while let Some(start) = unused.first().map(|e| e.a()) {
        let mut walk = vec![start];
        let mut prev = None;
        let mut curr = start;
        loop {
            let next = next_vertex(graph, unused, prev, curr)
                .ok_or(ExtractError::DeadEnd { anchor, at: curr })?;
            unused.remove(&Edge::new(curr, next));
            if next == start {
                break;
            }
            walk.push(next);
            prev = Some(curr);
            curr = next;
        }
        chains.push(Chain::new(walk));
    }
    Ok(chains)
}
