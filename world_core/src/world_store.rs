use std::collections::{HashMap, HashSet};

use crate::common::{LocationId, Principal};
use crate::error::{Result, WorldError};
use crate::location::{Location, UNSET_LOCATION};
use crate::registry::Registry;

/// Stored location data plus the set of frozen locations.
///
/// Who owns what and which ids exist is answered by the [`Registry`] passed
/// to each mutation, never stored here.
#[derive(Clone, Debug, Default)]
pub struct WorldGraphStore {
    locations: HashMap<LocationId, Location>,
    frozen: HashSet<LocationId>,
}

impl WorldGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored location, or the empty location if `id` was never updated.
    pub fn get(&self, id: LocationId) -> &Location {
        log::trace!("Reading location [{id}]");
        self.locations.get(&id).unwrap_or(&UNSET_LOCATION)
    }

    pub fn is_frozen(&self, id: LocationId) -> bool {
        log::trace!("Reading frozen flag of [{id}]");
        self.frozen.contains(&id)
    }

    /// Locks or unlocks `id` against updates. Only privileged callers may do
    /// this. Setting the flag it already has is not an error.
    pub fn set_frozen<R: Registry + ?Sized>(
        &mut self,
        registry: &R,
        caller: &Principal,
        id: LocationId,
        frozen: bool,
    ) -> Result<()> {
        if !registry.is_privileged(caller) {
            log::warn!("[{caller}] tried to set frozen={frozen} on [{id}] without privilege");
            return Err(WorldError::Forbidden {
                caller: caller.clone(),
                id,
            });
        }
        if frozen {
            self.frozen.insert(id);
        } else {
            self.frozen.remove(&id);
        }
        log::debug!("Location [{id}] frozen={frozen} by [{caller}]");
        Ok(())
    }

    /// Replaces every field of `id` with `data`.
    ///
    /// Checked in order: the location exists, the texts fit, the caller owns
    /// it or is privileged, it is not frozen. Nothing is written unless all
    /// checks pass.
    pub fn update<R: Registry + ?Sized>(
        &mut self,
        registry: &R,
        caller: &Principal,
        id: LocationId,
        data: Location,
    ) -> Result<()> {
        let result = self.check_update(registry, caller, id, &data);
        if let Err(err) = &result {
            log::warn!("Update of [{id}] by [{caller}] rejected: {err}");
            return result;
        }
        log::debug!("Location [{id}] updated by [{caller}]");
        self.locations.insert(id, data);
        Ok(())
    }

    fn check_update<R: Registry + ?Sized>(
        &self,
        registry: &R,
        caller: &Principal,
        id: LocationId,
        data: &Location,
    ) -> Result<()> {
        if !registry.exists(id) {
            return Err(WorldError::NotFound(id));
        }
        data.validate()?;
        let is_owner = registry.owner_of(id).as_ref() == Some(caller);
        if !is_owner && !registry.is_privileged(caller) {
            return Err(WorldError::Forbidden {
                caller: caller.clone(),
                id,
            });
        }
        if self.is_frozen(id) {
            return Err(WorldError::Frozen(id));
        }
        Ok(())
    }

    /// Name of the location `exit` leads to, if there is an exit and the
    /// location it names exists.
    pub fn exit_destination_name<R: Registry + ?Sized>(
        &self,
        registry: &R,
        exit: Option<LocationId>,
    ) -> Option<&[u8]> {
        exit.filter(|id| registry.exists(*id))
            .map(|id| self.get(id).name().as_slice())
    }
}

#[cfg(test)]
mod test {
    use test_log::test;

    use super::*;
    use crate::common::Compass;
    use crate::registry::MemoryRegistry;

    struct Fixture {
        registry: MemoryRegistry,
        store: WorldGraphStore,
        owner: Principal,
        admin: Principal,
        stranger: Principal,
    }

    fn fixture() -> Fixture {
        let owner = Principal::from("owner");
        let admin = Principal::from("admin");
        let mut registry = MemoryRegistry::new();
        registry.mint(&owner, 2);
        registry.grant_privilege(admin.clone());
        Fixture {
            registry,
            store: WorldGraphStore::new(),
            owner,
            admin,
            stranger: Principal::from("stranger"),
        }
    }

    fn id(raw: u16) -> LocationId {
        LocationId::new(raw).unwrap()
    }

    fn hall() -> Location {
        Location::new()
            .with_name("Hall")
            .with_description("A long hall")
            .with_exit(Compass::East, id(2))
    }

    #[test]
    fn unset_location_reads_as_empty() {
        let Fixture { store, .. } = fixture();
        assert_eq!(&Location::default(), store.get(id(1)));
        assert_eq!(&Location::default(), store.get(id(900)));
    }

    #[test]
    fn owner_update_replaces_all_fields() {
        let Fixture {
            registry,
            mut store,
            owner,
            ..
        } = fixture();
        store.update(&registry, &owner, id(1), hall()).unwrap();
        assert_eq!(&hall(), store.get(id(1)));

        let replacement = Location::new().with_name("Cellar").with_respawn_point(true);
        store
            .update(&registry, &owner, id(1), replacement.clone())
            .unwrap();
        assert_eq!(&replacement, store.get(id(1)));
        assert_eq!(None, store.get(id(1)).east());
    }

    #[test]
    fn exits_may_point_at_unminted_locations() {
        let Fixture {
            registry,
            mut store,
            owner,
            ..
        } = fixture();
        let data = Location::new().with_exit(Compass::North, id(40));
        assert_eq!(Ok(()), store.update(&registry, &owner, id(1), data));
        assert_eq!(None, store.exit_destination_name(&registry, Some(id(40))));
    }

    #[test]
    fn update_rejections() {
        let Fixture {
            registry,
            mut store,
            owner,
            admin,
            stranger,
        } = fixture();
        assert_eq!(
            Err(WorldError::NotFound(id(3))),
            store.update(&registry, &owner, id(3), hall())
        );
        assert!(matches!(
            store.update(&registry, &owner, id(1), hall().with_name(vec![b'x'; 56])),
            Err(WorldError::TooLong { field: "name", .. })
        ));
        assert_eq!(
            Err(WorldError::Forbidden {
                caller: stranger.clone(),
                id: id(1)
            }),
            store.update(&registry, &stranger, id(1), hall())
        );
        assert_eq!(Ok(()), store.update(&registry, &admin, id(1), hall()));
        assert_eq!(&hall(), store.get(id(1)));
    }

    #[test]
    fn frozen_location_rejects_owner_and_admin() {
        let Fixture {
            registry,
            mut store,
            owner,
            admin,
            ..
        } = fixture();
        store.set_frozen(&registry, &admin, id(1), true).unwrap();
        store.set_frozen(&registry, &admin, id(1), true).unwrap();
        assert!(store.is_frozen(id(1)));
        assert_eq!(
            Err(WorldError::Frozen(id(1))),
            store.update(&registry, &owner, id(1), hall())
        );
        assert_eq!(
            Err(WorldError::Frozen(id(1))),
            store.update(&registry, &admin, id(1), hall())
        );
        assert_eq!(&Location::default(), store.get(id(1)));

        store.set_frozen(&registry, &admin, id(1), false).unwrap();
        assert_eq!(Ok(()), store.update(&registry, &owner, id(1), hall()));
    }

    #[test]
    fn only_privileged_may_freeze() {
        let Fixture {
            registry,
            mut store,
            owner,
            ..
        } = fixture();
        assert_eq!(
            Err(WorldError::Forbidden {
                caller: owner.clone(),
                id: id(1)
            }),
            store.set_frozen(&registry, &owner, id(1), true)
        );
        assert!(!store.is_frozen(id(1)));
    }

    #[test]
    fn error_precedence() {
        let Fixture {
            registry,
            mut store,
            admin,
            stranger,
            ..
        } = fixture();
        store.set_frozen(&registry, &admin, id(1), true).unwrap();
        let too_long = hall().with_description(vec![b'd'; 171]);
        assert!(matches!(
            store.update(&registry, &stranger, id(1), too_long),
            Err(WorldError::TooLong { .. })
        ));
        assert!(matches!(
            store.update(&registry, &stranger, id(1), hall()),
            Err(WorldError::Forbidden { .. })
        ));
        assert_eq!(
            Err(WorldError::NotFound(id(9))),
            store.update(&registry, &stranger, id(9), hall())
        );
    }
}
