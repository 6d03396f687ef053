use std::fmt;
use std::num::NonZeroU16;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compass {
    North,
    South,
    East,
    West,
}

impl Compass {
    /// Document order: attributes and direction labels are always listed this way.
    pub const ALL_DIRECTIONS: [Compass; 4] =
        [Compass::North, Compass::South, Compass::East, Compass::West];

    pub fn label(&self) -> &'static str {
        match self {
            Compass::North => "North",
            Compass::South => "South",
            Compass::East => "East",
            Compass::West => "West",
        }
    }
}

impl fmt::Display for Compass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("unknown direction [{0}], expected one of north/south/east/west")]
pub struct UnknownCompass(String);

impl FromStr for Compass {
    type Err = UnknownCompass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "n" | "north" => Ok(Compass::North),
            "s" | "south" => Ok(Compass::South),
            "e" | "east" => Ok(Compass::East),
            "w" | "west" => Ok(Compass::West),
            _ => Err(UnknownCompass(s.to_string())),
        }
    }
}

/// Identifier of a location. Zero is never a valid id, it is the "no exit"
/// sentinel, so exits are stored as `Option<LocationId>`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct LocationId(NonZeroU16);

impl LocationId {
    /// Where every player starts, and where a player with no stored position is.
    pub const START: LocationId = LocationId(NonZeroU16::MIN);

    pub fn new(id: u16) -> Option<Self> {
        NonZeroU16::new(id).map(LocationId)
    }

    pub fn get(&self) -> u16 {
        self.0.get()
    }

    /// Raw exit encoding, 0 for no exit
    pub fn raw(exit: Option<LocationId>) -> u16 {
        exit.map(|id| id.get()).unwrap_or_default()
    }
}

impl TryFrom<u16> for LocationId {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        LocationId::new(value).ok_or_else(|| "location id 0 is reserved for \"no exit\"".to_string())
    }
}

impl From<LocationId> for u16 {
    fn from(id: LocationId) -> Self {
        id.get()
    }
}

impl FromStr for LocationId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: u16 = s.parse().map_err(|e| format!("invalid location id [{s}]: {e}"))?;
        LocationId::try_from(raw)
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An actor identity: owners, administrators and players are all principals.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Principal(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Principal {
    fn from(value: &str) -> Self {
        Principal::new(value)
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
