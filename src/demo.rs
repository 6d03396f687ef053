use anyhow::anyhow;
use world_core::prelude::*;

/// Principal that builds and owns the demo rooms
pub const DEMO_BUILDER: &str = "builder";

/// Two rooms joined east/west, used when no world file is given.
/// Neither room is a respawn point.
pub fn demo_world() -> anyhow::Result<World> {
    let builder = Principal::from(DEMO_BUILDER);
    let mut world = World::new(MemoryRegistry::new());
    let ids = world.registry_mut().mint(&builder, 2);
    let [entrance, gallery]: [LocationId; 2] = ids.try_into().map_err(|ids: Vec<LocationId>| {
        anyhow!("expected 2 demo locations, minted {}", ids.len())
    })?;
    world.update(
        &builder,
        entrance,
        Location::new()
            .with_name("Entrance")
            .with_description(
                "A draughty entrance hall. Dust hangs in the light from a doorway \
                 to the east, and the floor is worn smooth by the passage of many feet.",
            )
            .with_exit(Compass::East, gallery),
    )?;
    world.update(
        &builder,
        gallery,
        Location::new()
            .with_name("Gallery")
            .with_description("Empty frames line the walls.")
            .with_exit(Compass::West, entrance),
    )?;
    log::debug!("Demo world built");
    Ok(world)
}

#[cfg(test)]
mod test {
    use test_log::test;

    use super::*;

    #[test]
    fn demo_world_loops_east_west() {
        let mut world = demo_world().unwrap();
        let player = Principal::from("player");
        let start = world.current_position(&player);
        let gallery = world.move_player(&player, Compass::East).unwrap();
        assert_ne!(start, gallery);
        assert_eq!(Ok(start), world.move_player(&player, Compass::West));
        assert!(world.get(start).description().len() > 51);
    }
}
