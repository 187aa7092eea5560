//! polyqr: render a message as a QR code built from minimal polygons.
//!
//! Encodes the message with medium error correction, extracts one
//! even-odd polygon group per connected set of black modules, and
//! prints the result to stdout as a TikZ picture (default), a complete
//! SVG document, or bare SVG `<path>` elements.
//!
//! # Usage
//!
//! ```text
//! polyqr [OPTIONS] <SIZE> <STYLE> <MSG>
//! polyqr 1mm "fill=black!80" "https://example.com" > qr.tex
//! polyqr --format svg 1 "" "hello" > qr.svg
//! ```
//!
//! Logs go to stderr so stdout can be redirected into a document.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use polyqr_core::{DecomposePolicy, ExtractConfig, ExtractStats, Extraction, Grid, extract};
use polyqr_export::{SvgLayout, SvgMetadata, TikzOptions, path_elements, to_svg, to_tikz};
use qrcodegen::{QrCode, QrCodeEcc};
use tracing::Level;

/// Render a message as a QR code made of minimal even-odd polygons.
#[derive(Parser, Debug)]
#[command(name = "polyqr", version)]
struct Cli {
    /// Edge length of one QR code module (a TikZ dimension such as `1mm`).
    size: String,

    /// TikZ style options appended to every polygon.
    style: String,

    /// Message to encode.
    msg: String,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Tikz)]
    format: Format,

    /// How corner-touching boundaries are split into chains.
    #[arg(long, value_enum, default_value_t = Policy::Spliced)]
    policy: Policy,

    /// Keep every unit step instead of only the corners.
    #[arg(long)]
    no_simplify: bool,

    /// Full extraction config as a JSON string.
    ///
    /// When provided, `--policy` and `--no-simplify` are ignored. The
    /// JSON must be a valid `ExtractConfig` serialization; missing
    /// fields take their defaults.
    #[arg(long)]
    config_json: Option<String>,

    /// Print extraction statistics as JSON to stderr.
    #[arg(long)]
    stats: bool,

    /// Increase log verbosity (`-v` info, `-vv` debug, `-vvv` trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Output format selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// A TikZ picture with one `\draw` per component.
    Tikz,
    /// A standalone SVG document with one compound path.
    Svg,
    /// One SVG `<path>` element per component, one per line.
    SvgPaths,
}

/// Decomposition policy selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Policy {
    /// One self-touching chain per boundary piece.
    Spliced,
    /// A new chain every time a walk closes.
    Separate,
}

/// Build an [`ExtractConfig`] from CLI arguments.
///
/// If `--config-json` is provided, the JSON is parsed directly and the
/// individual flags are ignored.
fn config_from_cli(cli: &Cli) -> Result<ExtractConfig> {
    if let Some(ref json) = cli.config_json {
        return serde_json::from_str(json).context("parsing --config-json");
    }

    Ok(ExtractConfig {
        policy: match cli.policy {
            Policy::Spliced => DecomposePolicy::Spliced,
            Policy::Separate => DecomposePolicy::Separate,
        },
        simplify: !cli.no_simplify,
    })
}

const fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Encode `msg` and copy its modules into a [`Grid`].
fn qr_grid(msg: &str) -> Result<Grid> {
    let qr = QrCode::encode_text(msg, QrCodeEcc::Medium)
        .context("message does not fit in a QR code")?;
    let size = qr.size();
    let rows: Vec<Vec<bool>> = (0..size)
        .map(|y| (0..size).map(|x| qr.get_module(x, y)).collect())
        .collect();
    tracing::info!(size, version = qr.version().value(), "encoded message");
    Ok(Grid::new(&rows)?)
}

fn render(cli: &Cli, extraction: &Extraction) -> Result<String> {
    Ok(match cli.format {
        Format::Tikz => to_tikz(
            extraction,
            &TikzOptions {
                size: &cli.size,
                style: &cli.style,
            },
        ),
        Format::Svg => {
            let metadata = SvgMetadata {
                title: Some(&cli.msg),
                ..SvgMetadata::default()
            };
            to_svg(extraction, SvgLayout::Compound, &metadata)?
                .trim_end()
                .to_owned()
        }
        Format::SvgPaths => path_elements(extraction, SvgLayout::PerComponent)?.join("\n"),
    })
}

/// Run the whole pipeline and return the text for stdout.
fn run(cli: &Cli) -> Result<String> {
    let config = config_from_cli(cli)?;
    tracing::debug!(?config, format = ?cli.format, "starting");

    let grid = qr_grid(&cli.msg)?;
    let extraction = extract(&grid, &config).context("extracting polygons")?;

    let stats = ExtractStats::of(&extraction);
    tracing::info!(
        components = stats.components,
        chains = stats.chains,
        vertices = stats.vertices,
        "extracted polygons"
    );
    if cli.stats {
        eprintln!(
            "{}",
            serde_json::to_string(&stats).context("serializing statistics")?
        );
    }

    render(cli, &extraction).context("serializing output")
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(log_level(cli.verbose))
        .init();

    match run(&cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
