//! Component finder: flood-fill 4-connected black modules.
//!
//! Components are discovered in row-major scan order and expanded
//! breadth-first with the grid's fixed neighbor order (up, left, right,
//! down), so the output is fully deterministic.

use std::collections::VecDeque;

use crate::grid::Grid;
use crate::types::Cell;

/// A maximal 4-connected set of black modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    cells: Vec<Cell>,
}

impl Component {
    /// The first cell discovered, i.e. the row-major smallest cell.
    #[must_use]
    pub fn anchor(&self) -> Cell {
        // A component always holds at least its seed cell.
        self.cells.first().copied().unwrap_or_default()
    }

    /// Member cells in breadth-first visitation order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of member cells.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the component has no cells.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Find every 4-connected black component of the grid.
///
/// Every black module belongs to exactly one returned component.
#[must_use = "returns the discovered components"]
pub fn find_components(grid: &Grid) -> Vec<Component> {
    let n = grid.size();
    let mut visited = vec![false; n as usize * n as usize];
    let mut components = Vec::new();

    for row in 0..n {
        for col in 0..n {
            if !grid.is_black(row, col) || visited[grid.index(row, col)] {
                continue;
            }

            visited[grid.index(row, col)] = true;
            let mut queue = VecDeque::from([(row, col)]);
            let mut cells = Vec::new();

            while let Some((r, c)) = queue.pop_front() {
                cells.push((r, c));
                for (nr, nc) in grid.neighbors(r, c) {
                    let idx = grid.index(nr, nc);
                    if grid.is_black(nr, nc) && !visited[idx] {
                        visited[idx] = true;
                        queue.push_back((nr, nc));
                    }
                }
            }

            components.push(Component { cells });
        }
    }

    components
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_grid_has_no_components() {
        let grid = Grid::from_fn(5, |_, _| false).unwrap();
        assert!(find_components(&grid).is_empty());
    }

    #[test]
    fn single_cell_component() {
        let grid = Grid::from_ascii("...\n.#.\n...").unwrap();
        let components = find_components(&grid);
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].cells(), &[(1, 1)]);
        assert_eq!(components[0].anchor(), (1, 1));
    }

    #[test]
    fn diagonal_cells_are_separate_components() {
        let grid = Grid::from_ascii("#.\n.#").unwrap();
        let components = find_components(&grid);
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].anchor(), (0, 0));
        assert_eq!(components[1].anchor(), (1, 1));
    }

    #[test]
    fn bfs_visits_neighbors_in_fixed_order() {
        let grid = Grid::from_ascii(
            "
            ###
            #.#
            ##.
            ",
        )
        .unwrap();
        let components = find_components(&grid);
        assert_eq!(components.len(), 1);
        assert_eq!(
            components[0].cells(),
            &[(0, 0), (0, 1), (1, 0), (0, 2), (2, 0), (1, 2), (2, 1)]
        );
    }

    #[test]
    fn components_cover_every_black_cell_once() {
        let grid = Grid::from_fn(9, |r, c| (r * 7 + c * 3) % 5 < 2).unwrap();
        let components = find_components(&grid);
        let mut seen = vec![false; 81];
        for component in &components {
            for &(r, c) in component.cells() {
                let idx = grid.index(r, c);
                assert!(!seen[idx], "cell ({r}, {c}) in two components");
                seen[idx] = true;
            }
        }
        let covered = seen.iter().filter(|&&s| s).count();
        assert_eq!(covered, grid.black_count());
    }

    #[test]
    fn discovery_order_is_row_major() {
        let grid = Grid::from_ascii(
            "
            ..#.
            #...
            ...#
            .#..
            ",
        )
        .unwrap();
        let anchors: Vec<_> = find_components(&grid).iter().map(Component::anchor).collect();
        assert_eq!(anchors, vec![(0, 2), (1, 0), (2, 3), (3, 1)]);
    }
}
