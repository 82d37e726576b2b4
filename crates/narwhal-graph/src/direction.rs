use crate::error::{Error, Result};
use std::str::FromStr;

/// The side of a vertex outline a port sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum CardinalDirection {
    North,
    East,
    South,
    West,
}

impl CardinalDirection {
    pub const ALL: [CardinalDirection; 4] = [
        CardinalDirection::North,
        CardinalDirection::East,
        CardinalDirection::South,
        CardinalDirection::West,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CardinalDirection::North => "N",
            CardinalDirection::East => "E",
            CardinalDirection::South => "S",
            CardinalDirection::West => "W",
        }
    }

    /// Whether ports on this side slide horizontally (North/South) rather than vertically.
    pub fn is_horizontal_side(self) -> bool {
        matches!(self, CardinalDirection::North | CardinalDirection::South)
    }
}

impl std::fmt::Display for CardinalDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardinalDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "n" | "north" => Ok(CardinalDirection::North),
            "e" | "east" => Ok(CardinalDirection::East),
            "s" | "south" => Ok(CardinalDirection::South),
            "w" | "west" => Ok(CardinalDirection::West),
            _ => Err(Error::UnsupportedDirection {
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for CardinalDirection {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<CardinalDirection> for &'static str {
    fn from(value: CardinalDirection) -> Self {
        value.as_str()
    }
}
