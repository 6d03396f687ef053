use std::collections::{HashMap, HashSet};
use std::fmt::Debug;

use crate::common::{LocationId, Principal};
use crate::error::{Result, WorldError};

/// Ownership and existence facts about locations, kept outside the world.
///
/// The world store and the movement engine only ever ask questions through
/// this trait, so they do not care who issues location ids or how ownership
/// changes hands.
pub trait Registry: Debug {
    fn exists(&self, id: LocationId) -> bool;

    /// `None` for ids that were never minted
    fn owner_of(&self, id: LocationId) -> Option<Principal>;

    /// Administrators may edit any location and freeze/unfreeze locations.
    fn is_privileged(&self, caller: &Principal) -> bool;

    fn total_supply(&self) -> u16;

    /// Mints up to `count` new locations for `owner`, returning their ids.
    fn mint(&mut self, owner: &Principal, count: u16) -> Vec<LocationId>;
}

/// A registry that keeps everything in memory. Ids are handed out
/// sequentially starting at 1.
#[derive(Debug)]
pub struct MemoryRegistry {
    owners: HashMap<LocationId, Principal>,
    privileged: HashSet<Principal>,
    total_supply: u16,
    max_supply: u16,
}

impl Default for MemoryRegistry {
    fn default() -> Self {
        Self {
            owners: HashMap::new(),
            privileged: HashSet::new(),
            total_supply: 0,
            max_supply: u16::MAX,
        }
    }
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_supply(max_supply: u16) -> Self {
        Self {
            max_supply,
            ..Self::default()
        }
    }

    pub fn grant_privilege(&mut self, principal: Principal) {
        log::debug!("Granting privilege to [{principal}]");
        self.privileged.insert(principal);
    }

    pub fn revoke_privilege(&mut self, principal: &Principal) {
        log::debug!("Revoking privilege from [{principal}]");
        self.privileged.remove(principal);
    }

    /// Hands `id` over from its current owner `from` to `to`
    pub fn transfer(&mut self, id: LocationId, from: &Principal, to: Principal) -> Result<()> {
        let owner = self.owners.get_mut(&id).ok_or(WorldError::NotFound(id))?;
        if owner != from {
            return Err(WorldError::Forbidden {
                caller: from.clone(),
                id,
            });
        }
        log::debug!("Location [{id}] transferred from [{from}] to [{to}]");
        *owner = to;
        Ok(())
    }
}

impl Registry for MemoryRegistry {
    fn exists(&self, id: LocationId) -> bool {
        id.get() <= self.total_supply
    }

    fn owner_of(&self, id: LocationId) -> Option<Principal> {
        self.owners.get(&id).cloned()
    }

    fn is_privileged(&self, caller: &Principal) -> bool {
        self.privileged.contains(caller)
    }

    fn total_supply(&self) -> u16 {
        self.total_supply
    }

    fn mint(&mut self, owner: &Principal, count: u16) -> Vec<LocationId> {
        let available = self.max_supply.saturating_sub(self.total_supply);
        if count > available {
            log::warn!(
                "Requested {count} locations for [{owner}] but only {available} remain, minting {available}"
            );
        }
        let minted: Vec<LocationId> = (1..=count.min(available))
            .filter_map(|offset| LocationId::new(self.total_supply + offset))
            .collect();
        for id in minted.iter() {
            self.owners.insert(*id, owner.clone());
        }
        self.total_supply += minted.len() as u16;
        log::debug!("Minted {} location(s) for [{owner}]", minted.len());
        minted
    }
}
