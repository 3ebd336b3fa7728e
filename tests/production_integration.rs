//! Integration tests for production jobs
//!
//! A farm only accepts a dwarf carrying a spore, so the search has to plan
//! "pick up the spore, then walk to the farm" as one path.

use bunker_builder::city::building::StructureKind;
use bunker_builder::city::items::ItemType;
use bunker_builder::core::types::DwarfId;
use bunker_builder::ecs::world::World;
use bunker_builder::simulation::tick::{run_simulation_tick, SimulationEvent};
use bunker_builder::simulation::work::JobKind;
use bunker_builder::spatial::grid::{Cell, Point};

fn farm_claims(events: &[SimulationEvent], dwarf: DwarfId) -> usize {
    events
        .iter()
        .filter(|e| {
            matches!(
                e,
                SimulationEvent::JobClaimed {
                    dwarf: d,
                    job: JobKind::Production(StructureKind::ProductionFarm),
                    ..
                } if *d == dwarf
            )
        })
        .count()
}

#[test]
fn test_dwarf_fetches_spore_and_reaches_farm() {
    let mut world = World::new();
    let dwarf = world.spawn_dwarf("Farmer".into(), Cell::new(0, 2));
    let spore = world.add_item(Point::new(100, 350), ItemType::Spore);
    let farm = Cell::new(0, 4);
    world.add_structure(farm, StructureKind::ProductionFarm);

    let mut picked_up_at = None;
    for tick in 0..100 {
        let events = run_simulation_tick(&mut world);
        assert_eq!(farm_claims(&events, dwarf), 1, "farm not claimed on tick {tick}");
        if events.contains(&SimulationEvent::ItemPickedUp { dwarf, item: spore }) {
            assert!(picked_up_at.is_none(), "spore picked up twice");
            picked_up_at = Some(tick);
        }
    }

    assert!(picked_up_at.is_some());
    let view = world.dwarf(dwarf).unwrap();
    assert_eq!(view.held_item, Some(spore));
    assert_eq!(Cell::from(view.position), farm);
    assert_eq!(view.position, Point::new(199, 450));

    // The carried spore travels with the dwarf
    let item = world.items.get(spore).unwrap();
    assert_eq!(item.position, view.position);
    assert_eq!(item.carrier, Some(dwarf));
    // Nothing stays reserved between ticks
    assert_eq!(item.assignee, None);
    assert!(world.structures.structure(farm).unwrap().is_available());
}

#[test]
fn test_spore_pickup_happens_on_its_waypoint() {
    let mut world = World::new();
    let dwarf = world.spawn_dwarf("Farmer".into(), Cell::new(0, 2));
    let spore = world.add_item(Point::new(100, 350), ItemType::Spore);
    world.add_structure(Cell::new(0, 4), StructureKind::ProductionFarm);

    for _ in 0..100 {
        let events = run_simulation_tick(&mut world);
        if events.contains(&SimulationEvent::ItemPickedUp { dwarf, item: spore }) {
            assert_eq!(world.dwarf(dwarf).unwrap().position, Point::new(199, 350));
            return;
        }
    }
    panic!("spore never picked up");
}

#[test]
fn test_farm_ignored_without_spores() {
    let mut world = World::new();
    let dwarf = world.spawn_dwarf("Idle".into(), Cell::new(0, 2));
    world.add_structure(Cell::new(0, 3), StructureKind::ProductionFarm);

    for _ in 0..10 {
        let events = run_simulation_tick(&mut world);
        assert_eq!(farm_claims(&events, dwarf), 0);
    }
    assert_eq!(
        world.dwarf(dwarf).unwrap().position,
        Point::new(199, 250)
    );
}

#[test]
fn test_one_spore_feeds_one_farmer() {
    let mut world = World::new();
    let a = world.spawn_dwarf("Near".into(), Cell::new(0, 2));
    let b = world.spawn_dwarf("Far".into(), Cell::new(0, 9));
    let spore = world.add_item(Point::new(100, 350), ItemType::Spore);
    world.add_structure(Cell::new(0, 4), StructureKind::ProductionFarm);
    world.add_structure(Cell::new(0, 6), StructureKind::ProductionFarm);

    for _ in 0..60 {
        let events = run_simulation_tick(&mut world);
        assert_eq!(farm_claims(&events, b), 0, "second dwarf reserved the spore");
    }
    assert_eq!(world.dwarf(a).unwrap().held_item, Some(spore));
    assert_eq!(world.dwarf(b).unwrap().held_item, None);
}

#[test]
fn test_carried_spore_is_not_picked_up_again() {
    let mut world = World::new();
    let a = world.spawn_dwarf("Holder".into(), Cell::new(0, 3));
    let b = world.spawn_dwarf("Grabber".into(), Cell::new(0, 3));
    let spore = world.add_item(Point::new(100, 350), ItemType::Spore);
    world.add_structure(Cell::new(0, 5), StructureKind::ProductionFarm);

    let mut pickups = Vec::new();
    for _ in 0..80 {
        for event in run_simulation_tick(&mut world) {
            if let SimulationEvent::ItemPickedUp { dwarf, item } = event {
                pickups.push((dwarf, item));
            }
        }
    }
    assert_eq!(pickups, vec![(a, spore)]);
    assert_eq!(world.items.get(spore).unwrap().carrier, Some(a));
}
