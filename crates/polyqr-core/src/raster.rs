//! Even-odd rasterization of axis-aligned polygons back onto the module
//! grid.
//!
//! A module is filled when a ray from its center toward increasing
//! columns crosses an odd number of polygon sides. Only vertical sides
//! can be crossed; horizontal sides run through no module center.

use crate::types::Point;

/// Fill a `size×size` grid from closed polygons under the even-odd rule.
///
/// Each polygon is a closed vertex loop (the last vertex connects back
/// to the first). Diagonal sides are ignored. Sides outside the grid are
/// clipped.
///
/// Feeding the chains of an extraction back through this function
/// reproduces the source grid exactly.
#[must_use]
pub fn fill_even_odd<'a, I>(polygons: I, size: u32) -> Vec<Vec<bool>>
where
    I: IntoIterator<Item = &'a [Point]>,
{
    let n = size as usize;
    let mut rows = vec![vec![false; n]; n];

    for polygon in polygons {
        let len = polygon.len();
        for i in 0..len {
            let p = polygon[i];
            let q = polygon[(i + 1) % len];
            if p.col != q.col || p.row == q.row {
                continue;
            }
            let lo = p.row.min(q.row).min(size) as usize;
            let hi = p.row.max(q.row).min(size) as usize;
            let cols = p.col.min(size) as usize;
            for row in &mut rows[lo..hi] {
                for cell in &mut row[..cols] {
                    *cell = !*cell;
                }
            }
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(u32, u32)]) -> Vec<Point> {
        raw.iter().map(|&(r, c)| Point::new(r, c)).collect()
    }

    #[test]
    fn unit_square_fills_one_module() {
        let square = pts(&[(1, 1), (1, 2), (2, 2), (2, 1)]);
        let rows = fill_even_odd([square.as_slice()], 3);
        assert_eq!(
            rows,
            vec![
                vec![false, false, false],
                vec![false, true, false],
                vec![false, false, false],
            ]
        );
    }

    #[test]
    fn hole_chain_cancels_interior() {
        let outer = pts(&[(0, 0), (0, 3), (3, 3), (3, 0)]);
        let hole = pts(&[(1, 1), (1, 2), (2, 2), (2, 1)]);
        let rows = fill_even_odd([outer.as_slice(), hole.as_slice()], 3);
        assert_eq!(
            rows,
            vec![
                vec![true, true, true],
                vec![true, false, true],
                vec![true, true, true],
            ]
        );
    }

    #[test]
    fn self_touching_chain_keeps_hole_open() {
        let chain = pts(&[
            (0, 0),
            (0, 3),
            (2, 3),
            (2, 2),
            (1, 2),
            (1, 1),
            (2, 1),
            (2, 2),
            (3, 2),
            (3, 0),
        ]);
        let rows = fill_even_odd([chain.as_slice()], 3);
        assert_eq!(
            rows,
            vec![
                vec![true, true, true],
                vec![true, false, true],
                vec![true, true, false],
            ]
        );
    }

    #[test]
    fn no_polygons_fill_nothing() {
        let rows = fill_even_odd(std::iter::empty::<&[Point]>(), 2);
        assert_eq!(rows, vec![vec![false, false], vec![false, false]]);
    }

    #[test]
    fn sides_outside_the_grid_are_clipped() {
        let big = pts(&[(0, 0), (0, 5), (5, 5), (5, 0)]);
        let rows = fill_even_odd([big.as_slice()], 2);
        assert_eq!(rows, vec![vec![true, true], vec![true, true]]);
    }
}
