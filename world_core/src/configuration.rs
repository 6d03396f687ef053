use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::common::{Compass, LocationId, Principal};
use crate::error::WorldError;
use crate::location::Location;
use crate::registry::{MemoryRegistry, Registry};
use crate::world::World;

/// A world written down as TOML.
///
/// ```toml
/// privileged = ["admin"]
///
/// [[location]]
/// owner = "alice"
/// name = "Gate"
/// east = 2
/// ```
///
/// Locations are minted in file order, so the n-th `[[location]]` gets id n.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct WorldConfiguration {
    #[serde(default)]
    pub privileged: Vec<Principal>,
    #[serde(default, rename = "location")]
    pub locations: Vec<LocationConfiguration>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct LocationConfiguration {
    pub owner: Principal,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub respawn_point: bool,
    pub north: Option<LocationId>,
    pub south: Option<LocationId>,
    pub east: Option<LocationId>,
    pub west: Option<LocationId>,
    #[serde(default)]
    pub frozen: bool,
}

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("could not read world file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse world file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("location {index} ({name:?}) rejected: {source}")]
    Location {
        index: usize,
        name: String,
        source: WorldError,
    },
    #[error("no location ids left to mint for location {0}")]
    SupplyExhausted(usize),
    #[error("location {0} is marked frozen but no privileged principal is configured")]
    FreezeWithoutPrivilege(usize),
}

impl LocationConfiguration {
    fn to_location(&self) -> Location {
        Location::new()
            .with_name(self.name.as_str())
            .with_description(self.description.as_str())
            .with_respawn_point(self.respawn_point)
            .with_exit(Compass::North, self.north)
            .with_exit(Compass::South, self.south)
            .with_exit(Compass::East, self.east)
            .with_exit(Compass::West, self.west)
    }
}

impl WorldConfiguration {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigurationError> {
        Ok(toml::from_str(toml_str)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        log::info!("Loading world file {}", path.to_string_lossy());
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    /// Mints every location for its owner, then writes it through the normal
    /// update path, so the same limits apply as for any other update.
    pub fn build(&self) -> Result<World, ConfigurationError> {
        let mut registry = MemoryRegistry::new();
        for principal in self.privileged.iter() {
            registry.grant_privilege(principal.clone());
        }
        let admin = self.privileged.first();

        let mut world = World::new(registry);
        for (index, config) in self.locations.iter().enumerate() {
            let id = world
                .registry_mut()
                .mint(&config.owner, 1)
                .pop()
                .ok_or(ConfigurationError::SupplyExhausted(index))?;
            let rejected = |source| ConfigurationError::Location {
                index,
                name: config.name.clone(),
                source,
            };
            world
                .update(&config.owner, id, config.to_location())
                .map_err(rejected)?;
            if config.frozen {
                let admin = admin.ok_or(ConfigurationError::FreezeWithoutPrivilege(index))?;
                world.set_frozen(admin, id, true).map_err(rejected)?;
            }
        }
        log::info!(
            "Built world with {} location(s)",
            world.registry().total_supply()
        );
        Ok(world)
    }
}

#[cfg(test)]
mod test {
    use indoc::indoc;
    use test_log::test;

    use super::*;

    fn id(raw: u16) -> LocationId {
        LocationId::new(raw).unwrap()
    }

    const TWO_ROOMS: &str = indoc! {r#"
        privileged = ["admin"]

        [[location]]
        owner = "alice"
        name = "Gate"
        description = "An iron gate."
        east = 2

        [[location]]
        owner = "bob"
        name = "Yard"
        respawn_point = true
        west = 1
        frozen = true
    "#};

    #[test]
    fn builds_world_in_file_order() {
        let world = WorldConfiguration::from_toml_str(TWO_ROOMS)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(2, world.registry().total_supply());
        assert_eq!(Some(Principal::from("bob")), world.registry().owner_of(id(2)));
        assert!(world.registry().is_privileged(&Principal::from("admin")));

        let gate = world.get(id(1));
        assert_eq!(b"Gate", gate.name().as_slice());
        assert_eq!(b"An iron gate.", gate.description().as_slice());
        assert_eq!(Some(id(2)), gate.east());
        assert!(!gate.respawn_point());
        assert!(world.get(id(2)).respawn_point());
        assert!(world.store().is_frozen(id(2)));
        assert!(!world.store().is_frozen(id(1)));
    }

    #[test]
    fn limits_apply_to_files() {
        let toml_str = format!(
            "[[location]]\nowner = \"alice\"\nname = \"{}\"\n",
            "n".repeat(56)
        );
        let err = WorldConfiguration::from_toml_str(&toml_str)
            .unwrap()
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::Location {
                index: 0,
                source: WorldError::TooLong { field: "name", .. },
                ..
            }
        ));
    }

    #[test]
    fn zero_exit_is_rejected() {
        let err = WorldConfiguration::from_toml_str(indoc! {r#"
            [[location]]
            owner = "alice"
            north = 0
        "#})
        .unwrap_err();
        assert!(matches!(err, ConfigurationError::Toml(_)));
    }

    #[test]
    fn freezing_needs_an_admin() {
        let err = WorldConfiguration::from_toml_str(indoc! {r#"
            [[location]]
            owner = "alice"
            frozen = true
        "#})
        .unwrap()
        .build()
        .unwrap_err();
        assert!(matches!(err, ConfigurationError::FreezeWithoutPrivilege(0)));
    }
}
