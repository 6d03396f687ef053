use getset::{Getters, MutGetters};

use crate::common::{Compass, LocationId, Principal};
use crate::error::Result;
use crate::location::Location;
use crate::movement::{MovementEngine, MovementEvent};
use crate::registry::{MemoryRegistry, Registry};
use crate::render;
use crate::world_store::WorldGraphStore;

/// A registry, the location store and the movement engine, kept together so
/// callers do not have to thread all three through every call.
#[derive(Debug, Default, Getters, MutGetters)]
pub struct World<R: Registry = MemoryRegistry> {
    #[getset(get = "pub", get_mut = "pub")]
    registry: R,
    #[getset(get = "pub")]
    store: WorldGraphStore,
    #[getset(get = "pub")]
    movement: MovementEngine,
}

impl<R: Registry> World<R> {
    pub fn new(registry: R) -> Self {
        World {
            registry,
            store: WorldGraphStore::new(),
            movement: MovementEngine::new(),
        }
    }

    pub fn get(&self, id: LocationId) -> &Location {
        self.store.get(id)
    }

    pub fn update(&mut self, caller: &Principal, id: LocationId, data: Location) -> Result<()> {
        self.store.update(&self.registry, caller, id, data)
    }

    pub fn set_frozen(&mut self, caller: &Principal, id: LocationId, frozen: bool) -> Result<()> {
        self.store.set_frozen(&self.registry, caller, id, frozen)
    }

    pub fn current_position(&self, player: &Principal) -> LocationId {
        self.movement.current_position(player)
    }

    pub fn move_player(&mut self, player: &Principal, direction: Compass) -> Result<LocationId> {
        self.movement
            .move_player(&self.store, &self.registry, player, direction)
    }

    pub fn respawn(&mut self, player: &Principal, target: LocationId) -> Result<()> {
        self.movement
            .respawn(&self.store, &self.registry, player, target)
    }

    pub fn look(&self, player: &Principal) -> String {
        self.movement.look(&self.store, &self.registry, player)
    }

    pub fn exits(&self, player: &Principal) -> [(Compass, Option<LocationId>); 4] {
        self.movement.exits(&self.store, player)
    }

    pub fn render(&self, id: LocationId) -> String {
        render::render(&self.store, &self.registry, id)
    }

    pub fn drain_events(&mut self) -> Vec<MovementEvent> {
        self.movement.drain_events()
    }
}
