//! Parser for the SVG path data emitted by [`crate::svg`].
//!
//! Supports the commands the serializer writes:
//! - `M`/`m` (moveto)
//! - `H`/`h` (horizontal lineto)
//! - `V`/`v` (vertical lineto)
//! - `Z`/`z` (closepath)
//!
//! Operands are integers. Each closed subpath becomes one vertex loop
//! with `x` read as the column and `y` as the row.

use thiserror::Error;

use polyqr_core::Point;

/// Error type for path parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum PathError {
    /// Path string is empty.
    #[error("empty path string")]
    Empty,
    /// Unknown command character.
    #[error("unknown command '{0}'")]
    UnknownCommand(char),
    /// A command is missing one of its operands.
    #[error("not enough operands for command '{0}'")]
    MissingOperand(char),
    /// An operand is not an integer.
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    /// A number appears where a command is expected.
    #[error("unexpected number '{0}' where a command was expected")]
    UnexpectedNumber(String),
    /// The first command is not a moveto.
    #[error("path must start with M or m command")]
    MissingMoveto,
    /// A vertex lies left of or above the origin.
    #[error("vertex ({x}, {y}) is outside the grid")]
    NegativeCoordinate {
        /// Column coordinate.
        x: i64,
        /// Row coordinate.
        y: i64,
    },
    /// A relative offset moves the current point past the `i64` range.
    #[error("relative offset {offset} from {from} overflows")]
    OutOfRange {
        /// Coordinate before the offset.
        from: i64,
        /// The offending offset.
        offset: i64,
    },
    /// The path ends inside a subpath that was never closed.
    #[error("path ends with an unclosed subpath")]
    Unclosed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Command(char),
    Number(String),
}

/// Parse path data into closed vertex loops, one per subpath.
///
/// The closing `z` does not repeat the start vertex. After a `z` the
/// current point is the start of the closed subpath, so a following
/// `m` is relative to it.
///
/// # Examples
///
/// ```
/// use polyqr_core::Point;
/// use polyqr_export::parse_path_data;
///
/// let loops = parse_path_data("M0 0H2V1H0z").unwrap();
/// assert_eq!(
///     loops,
///     vec![vec![
///         Point::new(0, 0),
///         Point::new(0, 2),
///         Point::new(1, 2),
///         Point::new(1, 0),
///     ]]
/// );
/// ```
///
/// # Errors
///
/// Returns [`PathError`] if the data is malformed, uses an unsupported
/// command, leaves a subpath open, places a vertex at a negative
/// coordinate, or offsets a coordinate past the `i64` range.
pub fn parse_path_data(data: &str) -> Result<Vec<Vec<Point>>, PathError> {
    let data = data.trim();
    if data.is_empty() {
        return Err(PathError::Empty);
    }

    let mut tokens = tokenize(data).into_iter();
    let mut loops = Vec::new();
    let mut subpath: Vec<Point> = Vec::new();
    let mut current: (i64, i64) = (0, 0);
    let mut start = current;
    let mut has_moveto = false;

    while let Some(token) = tokens.next() {
        let cmd = match token {
            Token::Command(c) => c,
            Token::Number(n) => return Err(PathError::UnexpectedNumber(n)),
        };

        if !has_moveto && cmd != 'M' && cmd != 'm' {
            return Err(PathError::MissingMoveto);
        }

        match cmd {
            'M' | 'm' => {
                if !subpath.is_empty() {
                    return Err(PathError::Unclosed);
                }
                let x = next_number(&mut tokens, cmd)?;
                let y = next_number(&mut tokens, cmd)?;
                current = if cmd == 'M' || !has_moveto {
                    (x, y)
                } else {
                    (offset(current.0, x)?, offset(current.1, y)?)
                };
                start = current;
                has_moveto = true;
                subpath.push(to_point(current)?);
            }
            'H' | 'h' => {
                let x = next_number(&mut tokens, cmd)?;
                current.0 = if cmd == 'H' { x } else { offset(current.0, x)? };
                subpath.push(to_point(current)?);
            }
            'V' | 'v' => {
                let y = next_number(&mut tokens, cmd)?;
                current.1 = if cmd == 'V' { y } else { offset(current.1, y)? };
                subpath.push(to_point(current)?);
            }
            'Z' | 'z' => {
                current = start;
                if !subpath.is_empty() {
                    loops.push(std::mem::take(&mut subpath));
                }
            }
            other => return Err(PathError::UnknownCommand(other)),
        }
    }

    if !subpath.is_empty() {
        return Err(PathError::Unclosed);
    }
    Ok(loops)
}

/// Split path data into command letters and number strings.
fn tokenize(data: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in data.chars() {
        match ch {
            c if c.is_ascii_alphabetic() => {
                flush(&mut tokens, &mut current);
                tokens.push(Token::Command(c));
            }
            ',' | ' ' | '\t' | '\n' | '\r' => flush(&mut tokens, &mut current),
            // A sign starts a new number.
            '-' | '+' => {
                flush(&mut tokens, &mut current);
                current.push(ch);
            }
            _ => current.push(ch),
        }
    }
    flush(&mut tokens, &mut current);

    tokens
}

fn flush(tokens: &mut Vec<Token>, current: &mut String) {
    if !current.is_empty() {
        tokens.push(Token::Number(std::mem::take(current)));
    }
}

fn next_number(
    tokens: &mut impl Iterator<Item = Token>,
    cmd: char,
) -> Result<i64, PathError> {
    match tokens.next() {
        Some(Token::Number(n)) => n.parse().map_err(|_| PathError::InvalidNumber(n)),
        _ => Err(PathError::MissingOperand(cmd)),
    }
}

fn offset(from: i64, by: i64) -> Result<i64, PathError> {
    from.checked_add(by)
        .ok_or(PathError::OutOfRange { from, offset: by })
}

fn to_point((x, y): (i64, i64)) -> Result<Point, PathError> {
    match (u32::try_from(y), u32::try_from(x)) {
        (Ok(row), Ok(col)) => Ok(Point::new(row, col)),
        _ => Err(PathError::NegativeCoordinate { x, y }),
    }
}
