//! polyqr-core: Pure polygon extraction for QR module grids (sans-IO).
//!
//! Converts a square grid of black/white modules into closed,
//! axis-aligned polygons through:
//! component finding -> boundary extraction -> cycle decomposition ->
//! simplification.
//!
//! Every 4-connected set of black modules becomes one [`ChainGroup`].
//! Filled under the even-odd rule, each group covers exactly its
//! component, holes included. This crate has **no I/O dependencies**;
//! QR encoding lives in the CLI and text serialization in
//! `polyqr-export`.

pub mod boundary;
pub mod components;
pub mod decompose;
pub mod grid;
pub mod raster;
pub mod simplify;
pub mod stats;
pub mod types;

pub use boundary::BoundaryGraph;
pub use components::{Component, find_components};
pub use decompose::{ChainDecomposer, DecomposePolicy};
pub use grid::Grid;
pub use raster::fill_even_odd;
pub use stats::ExtractStats;
pub use types::{Cell, Chain, ChainGroup, Edge, ExtractConfig, ExtractError, Extraction, Point};

/// Extract the polygons of every black component of `grid`.
///
/// Groups are emitted in row-major order of their first cell. Within a
/// group, chains are ordered largest boundary piece first. The output is
/// fully determined by the grid and the configuration.
///
/// # Errors
///
/// Returns [`ExtractError::EmptyBoundary`] or [`ExtractError::DeadEnd`]
/// if an internal invariant is violated. Neither occurs for a valid
/// [`Grid`].
pub fn extract(grid: &Grid, config: &ExtractConfig) -> Result<Extraction, ExtractError> {
    let groups = find_components(grid)
        .iter()
        .map(|component| extract_component(component, config))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Extraction {
        size: grid.size(),
        groups,
    })
}

/// Extract the chains of a single component.
///
/// # Errors
///
/// See [`extract`].
pub fn extract_component(
    component: &Component,
    config: &ExtractConfig,
) -> Result<ChainGroup, ExtractError> {
    let anchor = component.anchor();
    let edges = boundary::boundary_edges(component)?;
    let graph = BoundaryGraph::new(&edges);
    let junctions = graph.junctions();

    let chains = config.policy.decompose(&graph, &edges, anchor)?;
    let chains = if config.simplify {
        simplify::simplify_chains(&chains)
    } else {
        chains
    };

    tracing::debug!(
        ?anchor,
        cells = component.len(),
        boundary_edges = edges.len(),
        junctions = junctions.len(),
        chains = chains.len(),
        "extracted component"
    );

    Ok(ChainGroup {
        anchor,
        chains,
        junctions,
    })
}
