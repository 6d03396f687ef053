pub use crate::common::{Compass, LocationId, Principal};
pub use crate::configuration::WorldConfiguration;
pub use crate::location::Location;
pub use crate::movement::{MovementEngine, MovementEvent};
pub use crate::registry::{MemoryRegistry, Registry};
pub use crate::world_store::WorldGraphStore;
pub use crate::{Result, World, WorldError};
