//! SVG export serializer.
//!
//! Path data is written by hand because every token picks the shorter
//! of its absolute and relative spelling (`M`/`m`, `H`/`h`, `V`/`v`),
//! which the [`svg`] crate's `Data` builder cannot express. The document
//! around the paths (root element, `<title>`, `<desc>`, escaping) is
//! built with the [`svg`] crate.
//!
//! Coordinates are `x = col` and `y = row`. Every path is filled with
//! `fill-rule="evenodd"` so hole chains subtract from their outline.

use svg::Document;
use svg::node::Text;
use svg::node::element::{Description, Path, Title};

use polyqr_core::{Chain, ChainGroup, Extraction, Point};

/// Errors that can occur while building SVG path data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SvgError {
    /// Two consecutive chain vertices differ in both coordinates.
    #[error("chain side from {from} to {to} is not axis-aligned")]
    DiagonalSide {
        /// Start of the side.
        from: Point,
        /// End of the side.
        to: Point,
    },
}

/// How chain groups are distributed over `<path>` elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SvgLayout {
    /// A single path holding every chain of every group.
    #[default]
    Compound,

    /// One path per chain group.
    PerComponent,
}

/// Metadata to embed in the SVG document.
///
/// Text values are XML-escaped by the `svg` crate.
#[derive(Debug, Clone, Default)]
pub struct SvgMetadata<'a> {
    /// Document title, emitted as `<title>`.
    pub title: Option<&'a str>,

    /// Document description, emitted as `<desc>`.
    pub description: Option<&'a str>,
}

/// Pick the shorter of two encodings of the same token.
///
/// Ties go to the absolute form.
#[must_use]
pub fn shorter(absolute: String, relative: String) -> String {
    if relative.len() < absolute.len() {
        relative
    } else {
        absolute
    }
}

/// Encode a move to `to`, relative to the current point if there is one.
#[must_use]
pub fn move_token(current: Option<Point>, to: Point) -> String {
    let absolute = format!("M{} {}", to.col, to.row);
    match current {
        None => absolute,
        Some(from) => shorter(
            absolute,
            format!("m{} {}", delta(from.col, to.col), delta(from.row, to.row)),
        ),
    }
}

/// Encode an axis-aligned line from `from` to `to`.
///
/// # Errors
///
/// Returns [`SvgError::DiagonalSide`] if the points differ in both
/// coordinates.
pub fn line_token(from: Point, to: Point) -> Result<String, SvgError> {
    if from.row == to.row {
        Ok(shorter(
            format!("H{}", to.col),
            format!("h{}", delta(from.col, to.col)),
        ))
    } else if from.col == to.col {
        Ok(shorter(
            format!("V{}", to.row),
            format!("v{}", delta(from.row, to.row)),
        ))
    } else {
        Err(SvgError::DiagonalSide { from, to })
    }
}

fn delta(from: u32, to: u32) -> i64 {
    i64::from(to) - i64::from(from)
}

/// Append the path data of `chains` to `out`.
///
/// `current` is the current point before the first chain; on return it
/// is the start of the last closed chain.
fn write_chains(
    out: &mut String,
    chains: &[Chain],
    current: &mut Option<Point>,
) -> Result<(), SvgError> {
    for chain in chains {
        let points = chain.points();
        let Some(&start) = points.first() else {
            continue;
        };
        out.push_str(&move_token(*current, start));
        for pair in points.windows(2) {
            out.push_str(&line_token(pair[0], pair[1])?);
        }
        out.push('z');
        *current = Some(start);
    }
    Ok(())
}

/// Build the path data (`d` attribute values) for an extraction.
///
/// [`SvgLayout::Compound`] yields at most one string; the current point
/// is carried across groups. [`SvgLayout::PerComponent`] yields one
/// string per group, each starting with an absolute move. Empty
/// extractions yield no strings.
///
/// # Errors
///
/// Returns [`SvgError::DiagonalSide`] if a chain is not axis-aligned.
pub fn path_data(extraction: &Extraction, layout: SvgLayout) -> Result<Vec<String>, SvgError> {
    match layout {
        SvgLayout::Compound => {
            let mut d = String::new();
            let mut current = None;
            for group in &extraction.groups {
                write_chains(&mut d, &group.chains, &mut current)?;
            }
            Ok(if d.is_empty() { Vec::new() } else { vec![d] })
        }
        SvgLayout::PerComponent => extraction
            .groups
            .iter()
            .map(group_path_data)
            .collect(),
    }
}

fn group_path_data(group: &ChainGroup) -> Result<String, SvgError> {
    let mut d = String::new();
    write_chains(&mut d, &group.chains, &mut None)?;
    Ok(d)
}

fn path_element(d: String) -> Path {
    Path::new().set("fill-rule", "evenodd").set("d", d)
}

/// Serialize an extraction into bare `<path>` elements, one per line of
/// the returned vector.
///
/// # Errors
///
/// See [`path_data`].
pub fn path_elements(extraction: &Extraction, layout: SvgLayout) -> Result<Vec<String>, SvgError> {
    Ok(path_data(extraction, layout)?
        .into_iter()
        .map(|d| path_element(d).to_string())
        .collect())
}

/// Serialize an extraction into an SVG document string.
///
/// The `viewBox` is `0 0 n n` for an `n×n` grid, so one user unit is one
/// module.
///
/// # Examples
///
/// ```
/// use polyqr_core::{ExtractConfig, Grid, extract};
/// use polyqr_export::{SvgLayout, SvgMetadata, to_svg};
///
/// let grid = Grid::from_ascii("##\n##").unwrap();
/// let extraction = extract(&grid, &ExtractConfig::default()).unwrap();
/// let metadata = SvgMetadata {
///     title: Some("block"),
///     ..SvgMetadata::default()
/// };
/// let svg = to_svg(&extraction, SvgLayout::Compound, &metadata).unwrap();
/// assert!(svg.contains(r#"viewBox="0 0 2 2""#));
/// assert!(svg.contains("<title>block</title>"));
/// assert!(svg.contains(r#"d="M0 0H2V2H0z""#));
/// ```
///
/// # Errors
///
/// See [`path_data`].
pub fn to_svg(
    extraction: &Extraction,
    layout: SvgLayout,
    metadata: &SvgMetadata<'_>,
) -> Result<String, SvgError> {
    let n = extraction.size;
    let mut doc = Document::new().set("viewBox", (0, 0, n, n));

    if let Some(title) = metadata.title {
        doc = doc.add(Title::new(title));
    }
    if let Some(description) = metadata.description {
        doc = doc.add(Description::new().add(Text::new(description)));
    }

    for d in path_data(extraction, layout)? {
        doc = doc.add(path_element(d));
    }

    // The svg crate omits the XML declaration, so we prepend it.
    Ok(format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{doc}\n"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use polyqr_core::{ExtractConfig, Grid, extract};

    fn extraction_of(text: &str) -> Extraction {
        let grid = Grid::from_ascii(text).unwrap();
        extract(&grid, &ExtractConfig::default()).unwrap()
    }

    // --- token encoding ---

    #[test]
    fn shorter_prefers_absolute_on_ties() {
        assert_eq!(shorter("H5".into(), "h1".into()), "H5");
        assert_eq!(shorter("H15".into(), "h1".into()), "h1");
        assert_eq!(shorter("H5".into(), "h-10".into()), "H5");
    }

    #[test]
    fn first_move_is_absolute() {
        assert_eq!(move_token(None, Point::new(3, 7)), "M7 3");
    }

    #[test]
    fn move_picks_relative_when_shorter() {
        let from = Point::new(10, 12);
        assert_eq!(move_token(Some(from), Point::new(11, 13)), "m1 1");
        // "M1 2" beats "m-11 -8".
        assert_eq!(move_token(Some(from), Point::new(2, 1)), "M1 2");
    }

    #[test]
    fn line_tokens_follow_the_axis() {
        let from = Point::new(4, 10);
        assert_eq!(line_token(from, Point::new(4, 12)).unwrap(), "h2");
        assert_eq!(line_token(from, Point::new(4, 3)).unwrap(), "H3");
        assert_eq!(line_token(from, Point::new(0, 10)).unwrap(), "V0");
        assert_eq!(line_token(from, Point::new(13, 10)).unwrap(), "v9");
        // Equal length: absolute wins.
        assert_eq!(line_token(from, Point::new(15, 10)).unwrap(), "V15");
    }

    #[test]
    fn diagonal_side_is_rejected() {
        let from = Point::new(0, 0);
        let to = Point::new(1, 1);
        assert_eq!(
            line_token(from, to),
            Err(SvgError::DiagonalSide { from, to })
        );
    }

    // --- path data ---

    #[test]
    fn empty_extraction_has_no_paths() {
        let extraction = extraction_of("..\n..");
        assert!(path_data(&extraction, SvgLayout::Compound).unwrap().is_empty());
        assert!(path_data(&extraction, SvgLayout::PerComponent).unwrap().is_empty());
    }

    #[test]
    fn annulus_path_data() {
        let extraction = extraction_of("###\n#.#\n###");
        let d = path_data(&extraction, SvgLayout::Compound).unwrap();
        assert_eq!(d, vec!["M0 0H3V3H0zM1 1H2V2H1z".to_string()]);
    }

    #[test]
    fn compound_layout_carries_current_point_across_groups() {
        let grid = Grid::from_fn(12, |r, c| (r, c) == (10, 10) || (r, c) == (11, 11)).unwrap();
        let extraction = extract(&grid, &ExtractConfig::default()).unwrap();

        let compound = path_data(&extraction, SvgLayout::Compound).unwrap();
        assert_eq!(compound, vec!["M10 10h1v1H10zm1 1h1v1H11z".to_string()]);

        let separate = path_data(&extraction, SvgLayout::PerComponent).unwrap();
        assert_eq!(
            separate,
            vec!["M10 10h1v1H10z".to_string(), "M11 11h1v1H11z".to_string()]
        );
    }

    #[test]
    fn per_component_path_moves_relative_within_a_group() {
        let grid = Grid::from_fn(12, |r, c| r >= 9 && c >= 9 && (r, c) != (10, 10)).unwrap();
        let extraction = extract(&grid, &ExtractConfig::default()).unwrap();
        let separate = path_data(&extraction, SvgLayout::PerComponent).unwrap();
        assert_eq!(separate, vec!["M9 9h3v3H9zm1 1h1v1H10z".to_string()]);
    }

    #[test]
    fn path_elements_are_evenodd() {
        let extraction = extraction_of("#");
        let elements = path_elements(&extraction, SvgLayout::PerComponent).unwrap();
        assert_eq!(elements.len(), 1);
        assert!(elements[0].starts_with("<path"));
        assert!(elements[0].contains(r#"fill-rule="evenodd""#));
        assert!(elements[0].contains(r#"d="M0 0H1V1H0z""#));
    }

    // --- documents ---

    #[test]
    fn document_has_declaration_and_viewbox() {
        let extraction = extraction_of("#..\n...\n..#");
        let svg = to_svg(&extraction, SvgLayout::PerComponent, &SvgMetadata::default()).unwrap();
        assert!(svg.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg"));
        assert!(svg.contains(r#"viewBox="0 0 3 3""#));
        assert!(svg.contains(r#"xmlns="http://www.w3.org/2000/svg""#));
        assert_eq!(svg.matches("<path").count(), 2);
        assert!(!svg.contains("<title>"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn metadata_is_escaped() {
        let extraction = extraction_of("#");
        let metadata = SvgMetadata {
            title: Some("a < b"),
            description: Some("R&D"),
        };
        let svg = to_svg(&extraction, SvgLayout::Compound, &metadata).unwrap();
        assert!(svg.contains("<title>a &lt; b</title>"), "{svg}");
        assert!(svg.contains("<desc>R&amp;D</desc>"), "{svg}");
    }
}
