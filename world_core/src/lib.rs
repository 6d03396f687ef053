pub mod codec;
pub mod common;
pub mod configuration;
mod error;
pub mod line_split;
pub mod location;
pub mod movement;
pub mod prelude;
pub mod registry;
pub mod render;
mod world;
pub mod world_store;

pub use error::{Result, WorldError};
pub use world::World;
