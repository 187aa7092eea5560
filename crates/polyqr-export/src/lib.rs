//! polyqr-export: Pure format serializers (sans-IO)
//!
//! Converts extracted polygons into output formats: a TikZ picture and
//! SVG documents or bare path elements. Also parses the emitted SVG path
//! data back into vertex loops.

pub mod path;
pub mod svg;
pub mod tikz;

pub use path::{PathError, parse_path_data};
pub use svg::{SvgError, SvgLayout, SvgMetadata, path_data, path_elements, to_svg};
pub use tikz::{TikzOptions, to_tikz};
