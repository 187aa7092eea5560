//! Grid adapter: a validated, immutable square boolean matrix.
//!
//! The QR encoder hands the core an opaque `size` plus an `is_black`
//! predicate. [`Grid`] normalizes that into a flat row-major buffer and
//! rejects ragged or non-square input before any traversal begins.

use std::fmt;

use crate::types::{Cell, ExtractError};

/// Orthogonal neighbor offsets in visitation order: up, left, right, down.
const NEIGHBOR_OFFSETS: [(i32, i32); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

/// A square grid of modules; `true` means black.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: u32,
    cells: Vec<bool>,
}

impl Grid {
    /// Build a grid from rows of modules.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::EmptyGrid`] if there are no rows,
    /// [`ExtractError::RaggedRow`] if a row's length differs from the
    /// first row's, [`ExtractError::NotSquare`] if the grid is not
    /// square, and [`ExtractError::TooLarge`] if the dimension does not
    /// fit vertex coordinates.
    pub fn new<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self, ExtractError> {
        let first = rows.first().ok_or(ExtractError::EmptyGrid)?.as_ref().len();
        for (row, cells) in rows.iter().enumerate() {
            let found = cells.as_ref().len();
            if found != first {
                return Err(ExtractError::RaggedRow {
                    row,
                    expected: first,
                    found,
                });
            }
        }
        if first != rows.len() {
            return Err(ExtractError::NotSquare {
                rows: rows.len(),
                cols: first,
            });
        }
        let size = checked_size(rows.len())?;
        let cells = rows
            .iter()
            .flat_map(|r| r.as_ref().iter().copied())
            .collect();
        Ok(Self { size, cells })
    }

    /// Build a `size×size` grid from a predicate over `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::EmptyGrid`] if `size` is zero and
    /// [`ExtractError::TooLarge`] if it does not fit vertex coordinates.
    pub fn from_fn(size: u32, mut is_black: impl FnMut(u32, u32) -> bool) -> Result<Self, ExtractError> {
        if size == 0 {
            return Err(ExtractError::EmptyGrid);
        }
        if size == u32::MAX {
            return Err(ExtractError::TooLarge(size as usize));
        }
        let mut cells = Vec::with_capacity(size as usize * size as usize);
        for row in 0..size {
            for col in 0..size {
                cells.push(is_black(row, col));
            }
        }
        Ok(Self { size, cells })
    }

    /// Parse a textual grid, one line per row.
    ///
    /// `#`, `X`, and `1` are black; `.`, `_`, and `0` are white. Blank
    /// lines and surrounding whitespace are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::InvalidCell`] for any other character and
    /// the shape errors of [`Grid::new`].
    ///
    /// # Examples
    ///
    /// ```
    /// use polyqr_core::Grid;
    ///
    /// let grid = Grid::from_ascii("
    ///     #.
    ///     .#
    /// ").unwrap();
    /// assert_eq!(grid.size(), 2);
    /// assert!(grid.is_black(1, 1));
    /// ```
    pub fn from_ascii(text: &str) -> Result<Self, ExtractError> {
        let rows = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .map(|(col, ch)| match ch {
                        '#' | 'X' | '1' => Ok(true),
                        '.' | '_' | '0' => Ok(false),
                        _ => Err(ExtractError::InvalidCell { row, col, ch }),
                    })
                    .collect::<Result<Vec<bool>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&rows)
    }

    /// Edge length in modules.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Whether `(row, col)` addresses a module of this grid.
    #[must_use]
    pub const fn in_bounds(&self, row: u32, col: u32) -> bool {
        row < self.size && col < self.size
    }

    /// Whether the module at `(row, col)` is black.
    ///
    /// Out-of-bounds coordinates are white.
    #[must_use]
    pub fn is_black(&self, row: u32, col: u32) -> bool {
        self.in_bounds(row, col) && self.cells[self.index(row, col)]
    }

    /// In-bounds orthogonal neighbors of `(row, col)`, in the fixed
    /// order up, left, right, down.
    pub fn neighbors(&self, row: u32, col: u32) -> impl Iterator<Item = Cell> + '_ {
        NEIGHBOR_OFFSETS.iter().filter_map(move |&(dr, dc)| {
            let r = row.checked_add_signed(dr)?;
            let c = col.checked_add_signed(dc)?;
            self.in_bounds(r, c).then_some((r, c))
        })
    }

    /// Number of black modules.
    #[must_use]
    pub fn black_count(&self) -> usize {
        self.cells.iter().filter(|&&b| b).count()
    }

    /// Copy the grid out as rows of modules.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        self.cells
            .chunks(self.size as usize)
            .map(<[bool]>::to_vec)
            .collect()
    }

    pub(crate) const fn index(&self, row: u32, col: u32) -> usize {
        row as usize * self.size as usize + col as usize
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size as usize) {
            for &black in row {
                f.write_str(if black { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Convert a row count into a vertex-safe dimension.
fn checked_size(n: usize) -> Result<u32, ExtractError> {
    u32::try_from(n)
        .ok()
        .filter(|&s| s < u32::MAX)
        .ok_or(ExtractError::TooLarge(n))
}
