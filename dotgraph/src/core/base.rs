//! Contains utilities, enums, constants and simple data structures that are
//! used across the program.

use std::fmt;

/// A point in the source text. Lines and columns start at 1, the offset
/// counts chars from the beginning of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// The position of the first char of the input.
    pub fn start() -> Self {
        Self::new(0, 1, 1)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open range in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub start: Position,
    pub end: Position,
}

impl Location {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Returns the smallest range that covers both \p self and \p other.
    pub fn join(&self, other: &Location) -> Location {
        let start = if other.start.offset < self.start.offset {
            other.start
        } else {
            self.start
        };
        let end = if other.end.offset > self.end.offset {
            other.end
        } else {
            self.end
        };
        Location { start, end }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// The compass points that may follow a port name: `a:port:ne`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compass {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
    C,
    Any,
}

impl Compass {
    pub fn from_name(name: &str) -> Option<Compass> {
        match name {
            "n" => Some(Compass::N),
            "ne" => Some(Compass::NE),
            "e" => Some(Compass::E),
            "se" => Some(Compass::SE),
            "s" => Some(Compass::S),
            "sw" => Some(Compass::SW),
            "w" => Some(Compass::W),
            "nw" => Some(Compass::NW),
            "c" => Some(Compass::C),
            "_" => Some(Compass::Any),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Compass::N => "n",
            Compass::NE => "ne",
            Compass::E => "e",
            Compass::SE => "se",
            Compass::S => "s",
            Compass::SW => "sw",
            Compass::W => "w",
            Compass::NW => "nw",
            Compass::C => "c",
            Compass::Any => "_",
        }
    }
}

impl fmt::Display for Compass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[test]
fn test_location_join() {
    let a = Location::new(Position::new(4, 1, 5), Position::new(6, 1, 7));
    let b = Location::new(Position::new(0, 1, 1), Position::new(5, 1, 6));
    let j = a.join(&b);
    assert_eq!(j.start.offset, 0);
    assert_eq!(j.end.offset, 6);
}

#[test]
fn test_compass_names() {
    for name in ["n", "ne", "e", "se", "s", "sw", "w", "nw", "c", "_"] {
        let c = Compass::from_name(name).unwrap();
        assert_eq!(c.as_str(), name);
    }
    assert!(Compass::from_name("north").is_none());
    assert!(Compass::from_name("N").is_none());
}
