//! TikZ export serializer.
//!
//! Emits one `tikzpicture` whose unit vectors are the module size. Each
//! chain group becomes a single `\draw` statement so that the even-odd
//! rule applies to its outer boundary and holes together. Grid columns
//! map to `x` and negated grid rows to `y`, so the picture is upright.

use std::fmt::Write;

use polyqr_core::{Chain, Extraction};

/// Options for the TikZ picture.
#[derive(Debug, Clone, Copy)]
pub struct TikzOptions<'a> {
    /// Edge length of one module, as a TikZ dimension (e.g. `1mm`).
    pub size: &'a str,

    /// Extra style options appended verbatim to the polygon style.
    pub style: &'a str,
}

/// Serialize an extraction into a TikZ picture.
///
/// The output has no trailing newline and ends with `%` so it can be
/// placed inline.
///
/// # Examples
///
/// ```
/// use polyqr_core::{ExtractConfig, Grid, extract};
/// use polyqr_export::{TikzOptions, to_tikz};
///
/// let grid = Grid::from_ascii("#").unwrap();
/// let extraction = extract(&grid, &ExtractConfig::default()).unwrap();
/// let tikz = to_tikz(&extraction, &TikzOptions { size: "1mm", style: "" });
/// assert!(tikz.contains(r"\draw[qrpoly] (0, 0) -- (1, 0) -- (1, -1) -- (0, -1) -- cycle;"));
/// ```
#[must_use]
pub fn to_tikz(extraction: &Extraction, options: &TikzOptions<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "\\begin{{tikzpicture}}[x={size},y={size},qrpoly/.style={{fill=black, draw=none, even odd rule, {style}}}]",
        size = options.size,
        style = options.style,
    );

    for group in &extraction.groups {
        let chains: Vec<String> = group.chains.iter().map(chain_to_tikz).collect();
        let _ = writeln!(out, "  \\draw[qrpoly] {};", chains.join(" "));
    }

    out.push_str("\\end{tikzpicture}%");
    out
}

/// Format one chain as a closed TikZ path.
fn chain_to_tikz(chain: &Chain) -> String {
    let mut s = String::new();
    for p in chain.points() {
        let _ = write!(s, "({}, {}) -- ", p.col, -i64::from(p.row));
    }
    s.push_str("cycle");
    s
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use polyqr_core::{ExtractConfig, Grid, extract};

    const OPTIONS: TikzOptions<'static> = TikzOptions {
        size: "0.5mm",
        style: "fill=blue",
    };

    fn tikz_of(text: &str) -> String {
        let grid = Grid::from_ascii(text).unwrap();
        let extraction = extract(&grid, &ExtractConfig::default()).unwrap();
        to_tikz(&extraction, &OPTIONS)
    }

    #[test]
    fn empty_grid_has_header_and_footer_only() {
        let tikz = tikz_of("..\n..");
        assert_eq!(
            tikz,
            "\\begin{tikzpicture}[x=0.5mm,y=0.5mm,qrpoly/.style={fill=black, draw=none, even odd rule, fill=blue}]\n\
             \\end{tikzpicture}%"
        );
    }

    #[test]
    fn block_is_one_draw_statement() {
        let tikz = tikz_of("##\n##");
        let lines: Vec<&str> = tikz.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            "  \\draw[qrpoly] (0, 0) -- (2, 0) -- (2, -2) -- (0, -2) -- cycle;"
        );
        assert_eq!(lines[2], "\\end{tikzpicture}%");
    }

    #[test]
    fn hole_chain_shares_the_draw_statement() {
        let tikz = tikz_of("###\n#.#\n###");
        let lines: Vec<&str> = tikz.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            "  \\draw[qrpoly] (0, 0) -- (3, 0) -- (3, -3) -- (0, -3) -- cycle \
             (1, -1) -- (2, -1) -- (2, -2) -- (1, -2) -- cycle;"
        );
    }

    #[test]
    fn one_draw_statement_per_component() {
        let tikz = tikz_of("#.\n.#");
        let draws = tikz.lines().filter(|l| l.starts_with("  \\draw")).count();
        assert_eq!(draws, 2);
        assert!(tikz.contains("(1, -1) -- (2, -1) -- (2, -2) -- (1, -2) -- cycle;"));
    }

    #[test]
    fn output_is_deterministic() {
        let text = "#.##\n##.#\n.###\n#..#";
        assert_eq!(tikz_of(text), tikz_of(text));
    }
}
