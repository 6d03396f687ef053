use std::collections::HashMap;
use std::mem;

use crate::common::{Compass, LocationId, Principal};
use crate::error::{Result, WorldError};
use crate::registry::Registry;
use crate::render;
use crate::world_store::WorldGraphStore;

/// Record of a successful position change, queued until drained.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MovementEvent {
    Moved {
        player: Principal,
        from: LocationId,
        to: LocationId,
        direction: Compass,
    },
    Respawned {
        player: Principal,
        from: LocationId,
        to: LocationId,
    },
}

impl MovementEvent {
    pub fn player(&self) -> &Principal {
        match self {
            MovementEvent::Moved { player, .. } | MovementEvent::Respawned { player, .. } => {
                player
            },
        }
    }

    pub fn to(&self) -> LocationId {
        match self {
            MovementEvent::Moved { to, .. } | MovementEvent::Respawned { to, .. } => *to,
        }
    }
}

/// Tracks where each player is. A player that never moved is at
/// [`LocationId::START`].
#[derive(Debug, Default)]
pub struct MovementEngine {
    positions: HashMap<Principal, LocationId>,
    events: Vec<MovementEvent>,
}

impl MovementEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_position(&self, player: &Principal) -> LocationId {
        self.positions
            .get(player)
            .copied()
            .unwrap_or(LocationId::START)
    }

    /// Follows the `direction` exit of the player's current location.
    pub fn move_player<R: Registry + ?Sized>(
        &mut self,
        store: &WorldGraphStore,
        registry: &R,
        player: &Principal,
        direction: Compass,
    ) -> Result<LocationId> {
        let from = self.current_position(player);
        let Some(to) = store.get(from).exit(direction) else {
            log::warn!("[{player}] tried to go {direction} from [{from}], there is no exit");
            return Err(WorldError::NoExit { from, direction });
        };
        if !registry.exists(to) {
            log::warn!("[{player}] tried to go {direction} from [{from}] into missing [{to}]");
            return Err(WorldError::NotFound(to));
        }
        self.positions.insert(player.clone(), to);
        log::debug!("[{player}] moved {direction} from [{from}] to [{to}]");
        self.events.push(MovementEvent::Moved {
            player: player.clone(),
            from,
            to,
            direction,
        });
        Ok(to)
    }

    /// Teleports the player to `target`, which must be a respawn point.
    /// Adjacency does not matter.
    pub fn respawn<R: Registry + ?Sized>(
        &mut self,
        store: &WorldGraphStore,
        registry: &R,
        player: &Principal,
        target: LocationId,
    ) -> Result<()> {
        if !registry.exists(target) {
            log::warn!("[{player}] tried to respawn at missing [{target}]");
            return Err(WorldError::NotFound(target));
        }
        if !store.get(target).respawn_point() {
            log::warn!("[{player}] tried to respawn at [{target}], not a respawn point");
            return Err(WorldError::NotRespawnPoint(target));
        }
        let from = self.current_position(player);
        self.positions.insert(player.clone(), target);
        log::debug!("[{player}] respawned from [{from}] at [{target}]");
        self.events.push(MovementEvent::Respawned {
            player: player.clone(),
            from,
            to: target,
        });
        Ok(())
    }

    /// The document for the player's current location
    pub fn look<R: Registry + ?Sized>(
        &self,
        store: &WorldGraphStore,
        registry: &R,
        player: &Principal,
    ) -> String {
        render::render(store, registry, self.current_position(player))
    }

    /// Exits of the player's current location, in document order
    pub fn exits(
        &self,
        store: &WorldGraphStore,
        player: &Principal,
    ) -> [(Compass, Option<LocationId>); 4] {
        store.get(self.current_position(player)).exits()
    }

    /// Takes every event recorded since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<MovementEvent> {
        mem::take(&mut self.events)
    }
}
