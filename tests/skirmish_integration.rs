//! Full-loop skirmish tests
//!
//! Scenario load, director, navigation, and combat running together the
//! way the headless runner drives them.

use glam::Vec3;
use killhouse::combat::entity::{CombatEntity, EntityKind};
use killhouse::combat::resolution::CombatResolver;
use killhouse::combat::weapons::WeaponState;
use killhouse::director::force::AiDirector;
use killhouse::director::units::{AiDifficulty, Doctrine};
use killhouse::nav::Pathfinder;
use killhouse::scenario::Scenario;

const YARD_JSON: &str = r#"{
    "name": "test-yard",
    "mesh": {
        "bounds": { "min": [-40.0, 0.0, -40.0], "max": [40.0, 6.0, 40.0] },
        "obstacles": [
            { "position": [0.0, 0.0, 0.0], "size": [10.0, 3.0, 1.0], "kind": "Wall" }
        ],
        "cover_points": [
            { "position": [0.0, 0.0, -2.0], "direction": [0.0, 0.0, 1.0], "quality": "Full" }
        ]
    },
    "spawn_points": [[-30.0, 0.0, 30.0], [30.0, 0.0, 30.0]],
    "player_start": [0.0, 0.0, -30.0]
}"#;

fn setup() -> (Scenario, Pathfinder, AiDirector, CombatResolver) {
    let scenario = Scenario::from_json(YARD_JSON).unwrap();
    let mut nav = Pathfinder::new();
    let mut director = AiDirector::new(17);
    let combat = CombatResolver::new(17);
    scenario.apply(&mut nav, &mut director);
    (scenario, nav, director, combat)
}

#[test]
fn test_paths_route_around_scenario_walls() {
    let (_, nav, _, _) = setup();
    let start = Vec3::new(0.0, 0.0, -10.0);
    let goal = Vec3::new(0.0, 0.0, 10.0);

    let path = nav.find_path(start, goal, false).unwrap();
    assert!(path.len() > 2, "a straight line would pass through the wall");
    assert!(!nav.has_line_of_sight(start + Vec3::Y, goal + Vec3::Y));
}

#[test]
fn test_skirmish_runs_to_completion_without_panics() {
    let (scenario, nav, mut director, mut combat) = setup();

    let mut player = CombatEntity::with_weapons(EntityKind::Friendly, vec![WeaponState::rifle()]);
    player.position = scenario.player_start;
    let player_id = combat.register_entity(player);

    for point in scenario.spawn_points.iter().copied() {
        director.spawn_squad(3, point, AiDifficulty::Medium, Doctrine::Conventional, &mut combat);
    }
    assert_eq!(director.units().len(), 6);

    let dt = 0.1;
    for _ in 0..600 {
        combat.advance_time(dt);
        let player_position = combat.entity(player_id).unwrap().position;
        director.update(player_position, dt, &nav, &mut combat);
        if director.should_spawn_reinforcements(dt) {
            director.spawn_reinforcements(3, AiDifficulty::Medium, &mut combat);
        }
        combat.drain_events();
    }

    // One resolver entity per surviving unit plus the trainee
    assert_eq!(combat.entity_count(), director.units().len() + 1);
    let stats = director.enemy_stats();
    assert!(stats.active <= director.max_active_enemies() as usize);
    assert!(stats.average_morale >= 0.0 && stats.average_morale <= 100.0);
}

#[test]
fn test_units_stay_inside_scenario_bounds() {
    let (scenario, nav, mut director, mut combat) = setup();
    director.spawn_squad(
        4,
        Vec3::new(-30.0, 0.0, 30.0),
        AiDifficulty::Medium,
        Doctrine::Conventional,
        &mut combat,
    );

    let dt = 0.1;
    for _ in 0..400 {
        combat.advance_time(dt);
        director.update(scenario.player_start, dt, &nav, &mut combat);
    }

    let bounds = scenario.mesh.bounds;
    let margin = 2.0;
    for unit in director.units() {
        assert!(unit.position.x >= bounds.min.x - margin);
        assert!(unit.position.x <= bounds.max.x + margin);
        assert!(unit.position.z >= bounds.min.z - margin);
        assert!(unit.position.z <= bounds.max.z + margin);
    }
}
