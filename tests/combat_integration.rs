//! Combat resolver integration tests
//!
//! Fire resolution against real terrain: walls eat bullets, cover facing
//! changes damage, and the event log captures the full exchange.

use glam::Vec3;
use killhouse::combat::constants::CENTER_MASS_OFFSET;
use killhouse::combat::cover::CoverEffectiveness;
use killhouse::combat::entity::{CombatEntity, EntityKind};
use killhouse::combat::events::CombatEventKind;
use killhouse::combat::resolution::{CombatResolver, FireOutcome};
use killhouse::combat::weapons::WeaponState;
use killhouse::nav::{Bounds, NavigationMesh, Obstacle, ObstacleKind, Pathfinder};

fn armed(kind: EntityKind, position: Vec3) -> CombatEntity {
    let mut entity = CombatEntity::with_weapons(kind, vec![WeaponState::rifle()]);
    entity.position = position;
    entity
}

fn walled_range() -> Pathfinder {
    let mut nav = Pathfinder::new();
    nav.load_navigation_mesh(NavigationMesh {
        bounds: Bounds::new(Vec3::new(-50.0, 0.0, -50.0), Vec3::new(50.0, 6.0, 50.0)),
        obstacles: vec![Obstacle {
            position: Vec3::new(10.0, 0.0, 0.0),
            size: Vec3::new(1.0, 4.0, 8.0),
            kind: ObstacleKind::Wall,
        }],
        cover_points: Vec::new(),
    });
    nav
}

#[test]
fn test_wall_stops_fire_before_the_target() {
    let mut combat = CombatResolver::new(5);
    let nav = walled_range();

    let shooter = combat.register_entity(armed(EntityKind::Friendly, Vec3::ZERO));
    combat.register_entity(armed(EntityKind::Hostile, Vec3::new(20.0, 0.0, 0.0)));
    combat.advance_time(1.0);

    let outcome = combat.process_weapon_fire(shooter, Vec3::X, &nav);
    match outcome {
        FireOutcome::EnvironmentHit { hit_point } => {
            assert!(hit_point.x < 20.0, "impact should be at the wall, not past it");
        }
        other => panic!("expected environment hit, got {other:?}"),
    }
}

#[test]
fn test_open_field_exchange_kills_and_logs() {
    let mut combat = CombatResolver::new(5);
    let nav = Pathfinder::new();

    let shooter = combat.register_entity(armed(EntityKind::Friendly, Vec3::ZERO));
    let target = combat.register_entity(armed(EntityKind::Hostile, Vec3::new(5.0, 0.0, 0.0)));

    let mut killed = false;
    for _ in 0..100 {
        combat.advance_time(0.2);
        let aim = Vec3::new(5.0, CENTER_MASS_OFFSET, 0.0) - Vec3::new(0.0, CENTER_MASS_OFFSET, 0.0);
        match combat.process_weapon_fire(shooter, aim, &nav) {
            FireOutcome::NoAmmo => combat.reload(shooter),
            FireOutcome::Hit { target: hit, .. } => {
                assert_eq!(hit, target);
                if !combat.entity(target).unwrap().is_alive() {
                    killed = true;
                    break;
                }
            }
            _ => {}
        }
    }
    assert!(killed, "point-blank sustained fire should down the target");

    let events = combat.drain_events();
    assert!(events
        .iter()
        .any(|e| matches!(e.kind, CombatEventKind::Kill { .. })));
    assert!(events
        .iter()
        .any(|e| matches!(e.kind, CombatEventKind::Hit { .. })));
    assert_eq!(combat.event_count(), 0);
}

#[test]
fn test_facing_the_threat_grants_cover() {
    let mut combat = CombatResolver::new(5);

    let mut covered = armed(EntityKind::Hostile, Vec3::new(10.0, 0.0, 0.0));
    covered.facing = Vec3::NEG_X;
    let covered_id = combat.register_entity(covered);

    // Incoming fire travels +X; a defender facing -X is square-on to it
    let effect = combat.cover_for(covered_id, Vec3::X).unwrap();
    assert_eq!(effect, CoverEffectiveness::Full);

    // Same fire from behind finds the defender exposed
    let effect = combat.cover_for(covered_id, Vec3::NEG_X).unwrap();
    assert_eq!(effect, CoverEffectiveness::Exposed);
}

#[test]
fn test_cover_reduces_damage_taken() {
    // Damage of the first connecting shot; identical seed and fire
    // pattern, only the target's facing differs
    let first_hit = |facing: Vec3| {
        let mut combat = CombatResolver::new(5);
        let shooter = combat.register_entity(armed(EntityKind::Friendly, Vec3::ZERO));
        let mut target = armed(EntityKind::Hostile, Vec3::new(5.0, 0.0, 0.0));
        target.facing = facing;
        combat.register_entity(target);

        let nav = Pathfinder::new();
        for _ in 0..200 {
            combat.advance_time(0.2);
            match combat.process_weapon_fire(shooter, Vec3::X, &nav) {
                FireOutcome::Hit { damage, .. } => return damage,
                FireOutcome::NoAmmo => combat.reload(shooter),
                _ => {}
            }
        }
        panic!("no hit landed in 200 attempts");
    };

    let exposed_damage = first_hit(Vec3::X);
    let covered_damage = first_hit(Vec3::NEG_X);
    assert!(covered_damage < exposed_damage);
}

#[test]
fn test_weapon_switch_changes_loadout_behavior() {
    let mut combat = CombatResolver::new(5);
    let mut entity = CombatEntity::with_weapons(
        EntityKind::Friendly,
        vec![WeaponState::rifle(), WeaponState::marksman()],
    );
    entity.position = Vec3::ZERO;
    let id = combat.register_entity(entity);

    assert_eq!(combat.entity(id).unwrap().weapon().unwrap().name, "rifle");
    combat.switch_weapon(id, 1);
    assert_eq!(combat.entity(id).unwrap().weapon().unwrap().name, "marksman");

    // Out-of-range index leaves the equipped weapon alone
    combat.switch_weapon(id, 9);
    assert_eq!(combat.entity(id).unwrap().weapon().unwrap().name, "marksman");

    let events = combat.drain_events();
    assert!(events
        .iter()
        .any(|e| matches!(e.kind, CombatEventKind::WeaponSwitch { .. })));
}
