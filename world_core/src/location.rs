use getset::{CopyGetters, Getters};

use crate::common::{Compass, LocationId};
use crate::error::{Result, WorldError};

pub const MAX_NAME_LEN: usize = 55;
pub const MAX_DESCRIPTION_LEN: usize = 170;

/// Everything an owner can set on a location. `update` replaces all of it at
/// once, so this type is also the update payload.
///
/// The default value (empty texts, no respawn point, no exits) is what a
/// location looks like before it is first written.
#[derive(Clone, CopyGetters, Debug, Default, Eq, Getters, PartialEq)]
pub struct Location {
    #[getset(get = "pub")]
    name: Vec<u8>,
    #[getset(get = "pub")]
    description: Vec<u8>,
    #[getset(get_copy = "pub")]
    respawn_point: bool,
    #[getset(get_copy = "pub")]
    north: Option<LocationId>,
    #[getset(get_copy = "pub")]
    south: Option<LocationId>,
    #[getset(get_copy = "pub")]
    east: Option<LocationId>,
    #[getset(get_copy = "pub")]
    west: Option<LocationId>,
}

/// Stands in for locations that were never written
pub(crate) static UNSET_LOCATION: Location = Location {
    name: Vec::new(),
    description: Vec::new(),
    respawn_point: false,
    north: None,
    south: None,
    east: None,
    west: None,
};

impl Location {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name<B: Into<Vec<u8>>>(mut self, name: B) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description<B: Into<Vec<u8>>>(mut self, description: B) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_respawn_point(mut self, respawn_point: bool) -> Self {
        self.respawn_point = respawn_point;
        self
    }

    /// Sets (or with `None`, clears) the exit in `dir`
    pub fn with_exit<I: Into<Option<LocationId>>>(mut self, dir: Compass, exit: I) -> Self {
        *self.exit_mut(dir) = exit.into();
        self
    }

    pub fn exit(&self, dir: Compass) -> Option<LocationId> {
        match dir {
            Compass::North => self.north,
            Compass::South => self.south,
            Compass::East => self.east,
            Compass::West => self.west,
        }
    }

    fn exit_mut(&mut self, dir: Compass) -> &mut Option<LocationId> {
        match dir {
            Compass::North => &mut self.north,
            Compass::South => &mut self.south,
            Compass::East => &mut self.east,
            Compass::West => &mut self.west,
        }
    }

    /// All four exits in document order
    pub fn exits(&self) -> [(Compass, Option<LocationId>); 4] {
        Compass::ALL_DIRECTIONS.map(|dir| (dir, self.exit(dir)))
    }

    /// Checks the byte length limits. Exits are not checked here: an exit may
    /// point at a location that is minted later.
    pub fn validate(&self) -> Result<()> {
        if self.name.len() > MAX_NAME_LEN {
            return Err(WorldError::TooLong {
                field: "name",
                len: self.name.len(),
                max: MAX_NAME_LEN,
            });
        }
        if self.description.len() > MAX_DESCRIPTION_LEN {
            return Err(WorldError::TooLong {
                field: "description",
                len: self.description.len(),
                max: MAX_DESCRIPTION_LEN,
            });
        }
        Ok(())
    }
}
