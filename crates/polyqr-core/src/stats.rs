//! Summary counts for an [`Extraction`].

use serde::Serialize;

use crate::types::Extraction;

/// Counts describing an extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ExtractStats {
    /// Number of 4-connected components.
    pub components: usize,
    /// Number of emitted chains.
    pub chains: usize,
    /// Total vertex count over all chains.
    pub vertices: usize,
    /// Total number of unit boundary edges covered by the chains.
    pub boundary_edges: usize,
    /// Number of degree-4 boundary vertices.
    pub junctions: usize,
}

impl ExtractStats {
    /// Compute the counts for `extraction`.
    #[must_use]
    pub fn of(extraction: &Extraction) -> Self {
        let mut stats = Self {
            components: extraction.groups.len(),
            ..Self::default()
        };
        for group in &extraction.groups {
            stats.junctions += group.junctions.len();
            for chain in &group.chains {
                stats.chains += 1;
                stats.vertices += chain.len();
                stats.boundary_edges += chain.unit_edges().count();
            }
        }
        stats
    }
}
