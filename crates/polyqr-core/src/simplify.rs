//! Chain simplification: drop vertices that do not turn.
//!
//! A vertex whose cyclic predecessor and successor lie on the same row
//! or the same column is redundant. Removal never changes the traced
//! region, and the chain stays axis-aligned.

use crate::types::{Chain, collinear};

/// Remove every collinear vertex of a closed chain.
///
/// Runs to a fixed point, so the result has no remaining collinear
/// vertex and simplifying it again is a no-op. Chains with fewer than
/// three points are returned unchanged.
#[must_use = "returns the simplified chain"]
pub fn simplify_chain(chain: &Chain) -> Chain {
    let mut points = chain.points().to_vec();

    // Stop once every vertex has been checked without a removal.
    let mut idx = 0;
    let mut kept_in_a_row = 0;
    while points.len() >= 3 && kept_in_a_row < points.len() {
        let n = points.len();
        idx %= n;
        let prev = points[(idx + n - 1) % n];
        let next = points[(idx + 1) % n];
        if collinear(prev, points[idx], next) {
            points.remove(idx);
            kept_in_a_row = 0;
        } else {
            kept_in_a_row += 1;
            idx += 1;
        }
    }

    Chain::new(points)
}

/// Simplify multiple chains independently.
#[must_use = "returns the simplified chains"]
pub fn simplify_chains(chains: &[Chain]) -> Vec<Chain> {
    chains.iter().map(simplify_chain).collect()
}
