//! Headless Skirmish Runner
//!
//! Runs a scripted trainee against the AI director and prints a JSON
//! summary. Useful for tuning the difficulty controller and for soak
//! testing the full update loop without a frontend.

use std::path::PathBuf;

use clap::Parser;
use glam::Vec3;
use serde::Serialize;

use killhouse::combat::constants::CENTER_MASS_OFFSET;
use killhouse::combat::entity::{CombatEntity, EntityKind};
use killhouse::combat::resolution::{CombatResolver, FireOutcome};
use killhouse::combat::weapons::WeaponState;
use killhouse::director::difficulty::PerformanceMetrics;
use killhouse::director::force::AiDirector;
use killhouse::director::units::{AiDifficulty, Doctrine};
use killhouse::nav::{Bounds, CoverPoint, CoverQuality, NavigationMesh, Obstacle, ObstacleKind, Pathfinder};
use killhouse::scenario::Scenario;

/// Headless skirmish between a scripted trainee and the AI director
#[derive(Parser, Debug)]
#[command(name = "skirmish_runner")]
#[command(about = "Run a scripted trainee against the AI director and output a JSON summary")]
struct Args {
    /// Simulation seed (drives both the director and the resolver)
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Maximum simulation ticks (10 ticks per second)
    #[arg(long, default_value_t = 3000)]
    max_ticks: u64,

    /// Units per opposing squad
    #[arg(long, default_value_t = 4)]
    squad_size: usize,

    /// Opposing force difficulty: easy, medium, hard
    #[arg(long, default_value = "medium")]
    difficulty: String,

    /// Scenario JSON path; omit for the built-in training map
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,
}

#[derive(Serialize)]
struct SkirmishResult {
    scenario: String,
    ticks: u64,
    trainee_shots: u32,
    trainee_hits: u32,
    trainee_casualties: u32,
    enemies_spawned: usize,
    enemies_eliminated: usize,
    final_difficulty_multiplier: f32,
    final_max_active: u32,
    average_enemy_morale: f32,
    seed: u64,
}

fn parse_difficulty(name: &str) -> AiDifficulty {
    match name {
        "easy" => AiDifficulty::Easy,
        "hard" => AiDifficulty::Hard,
        _ => AiDifficulty::Medium,
    }
}

/// Built-in training map: a walled yard with two cover walls
fn training_map() -> Scenario {
    let wall = |x: f32, z: f32| Obstacle {
        position: Vec3::new(x, 0.0, z),
        size: Vec3::new(6.0, 2.5, 0.5),
        kind: ObstacleKind::Wall,
    };
    Scenario {
        name: "training-yard".to_string(),
        mesh: NavigationMesh {
            bounds: Bounds::new(Vec3::new(-40.0, 0.0, -40.0), Vec3::new(40.0, 6.0, 40.0)),
            obstacles: vec![wall(-8.0, 0.0), wall(8.0, 12.0)],
            cover_points: vec![
                CoverPoint {
                    position: Vec3::new(-8.0, 0.0, -1.0),
                    direction: Vec3::new(0.0, 0.0, 1.0),
                    quality: CoverQuality::Full,
                },
                CoverPoint {
                    position: Vec3::new(8.0, 0.0, 11.0),
                    direction: Vec3::new(0.0, 0.0, 1.0),
                    quality: CoverQuality::Partial,
                },
            ],
        },
        spawn_points: vec![
            Vec3::new(-30.0, 0.0, 30.0),
            Vec3::new(30.0, 0.0, 30.0),
            Vec3::new(0.0, 0.0, 35.0),
        ],
        player_start: Vec3::new(0.0, 0.0, -30.0),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let args = Args::parse();
    let difficulty = parse_difficulty(&args.difficulty);

    let scenario = match &args.scenario {
        Some(path) => match Scenario::from_file(path) {
            Ok(scenario) => scenario,
            Err(e) => {
                eprintln!("Failed to load scenario: {e}");
                std::process::exit(1);
            }
        },
        None => training_map(),
    };

    let mut nav = Pathfinder::new();
    let mut director = AiDirector::new(args.seed);
    let mut combat = CombatResolver::new(args.seed.wrapping_add(1));
    scenario.apply(&mut nav, &mut director);

    // Trainee entity: the director's units shoot at this
    let mut player = CombatEntity::with_weapons(EntityKind::Friendly, vec![WeaponState::rifle()]);
    player.position = scenario.player_start;
    let player_id = combat.register_entity(player);

    // Opening force: two squads at the far spawn points
    for point in scenario.spawn_points.iter().take(2).copied() {
        director.spawn_squad(args.squad_size, point, difficulty, Doctrine::Conventional, &mut combat);
    }
    let mut enemies_spawned = director.units().len();

    let dt = 0.1;
    let mut tick = 0u64;
    let mut shots = 0u32;
    let mut hits = 0u32;
    let mut casualties = 0u32;
    // Totals at the last scoring window boundary
    let mut window_start = (0u32, 0u32, 0u32);

    while tick < args.max_ticks {
        combat.advance_time(dt);

        let player_position = combat
            .entity(player_id)
            .map(|e| e.position)
            .unwrap_or(scenario.player_start);

        // Scripted trainee: push toward the middle of the yard and fire
        // at the nearest hostile in sight
        let advance_target = Vec3::new(0.0, 0.0, 10.0);
        let to_target = advance_target - player_position;
        if to_target.length() > 1.0 {
            combat.set_position(
                player_id,
                player_position + to_target.normalize() * 2.0 * dt,
            );
        }

        let target = director
            .units()
            .iter()
            .map(|u| u.position)
            .filter(|p| {
                nav.has_line_of_sight(player_position + Vec3::Y, *p + Vec3::Y)
            })
            .min_by(|a, b| {
                a.distance(player_position)
                    .total_cmp(&b.distance(player_position))
            });
        if let Some(target) = target {
            let aim = target + Vec3::Y * CENTER_MASS_OFFSET;
            let origin = player_position + Vec3::Y * CENTER_MASS_OFFSET;
            match combat.process_weapon_fire(player_id, aim - origin, &nav) {
                FireOutcome::Hit { .. } => {
                    shots += 1;
                    hits += 1;
                }
                FireOutcome::Miss | FireOutcome::EnvironmentHit { .. } => shots += 1,
                FireOutcome::NoAmmo => {
                    let empty = combat
                        .entity(player_id)
                        .and_then(|e| e.weapon())
                        .map(|w| w.ammo == 0)
                        .unwrap_or(false);
                    if empty {
                        combat.reload(player_id);
                    }
                }
            }
        }

        director.update(player_position, dt, &nav, &mut combat);

        // Downed trainee: count the casualty and reset at the start line
        let player_down = combat
            .entity(player_id)
            .map(|e| !e.is_alive())
            .unwrap_or(true);
        if player_down {
            casualties += 1;
            if let Some(entity) = combat.entity_mut(player_id) {
                entity.health = entity.max_health;
            }
            combat.set_position(player_id, scenario.player_start);
        }

        if director.should_spawn_reinforcements(dt) {
            let before = director.units().len();
            if director
                .spawn_reinforcements(args.squad_size, difficulty, &mut combat)
                .is_some()
            {
                enemies_spawned += director.units().len() - before;
            }
        }

        // Score a performance window every 10 seconds
        tick += 1;
        if tick % 100 == 0 {
            let window = PerformanceMetrics {
                shots_fired: shots - window_start.0,
                shots_hit: hits - window_start.1,
                casualties_taken: casualties - window_start.2,
                objectives_completed: 0,
                total_objectives: 0,
            };
            window_start = (shots, hits, casualties);
            director.adjust_difficulty(&window);
        }

        combat.drain_events();

        if director.units().is_empty() {
            break;
        }
    }

    let stats = director.enemy_stats();
    let result = SkirmishResult {
        scenario: scenario.name.clone(),
        ticks: tick,
        trainee_shots: shots,
        trainee_hits: hits,
        trainee_casualties: casualties,
        enemies_spawned,
        enemies_eliminated: enemies_spawned.saturating_sub(stats.active),
        final_difficulty_multiplier: stats.difficulty_multiplier,
        final_max_active: director.max_active_enemies(),
        average_enemy_morale: stats.average_morale,
        seed: args.seed,
    };

    match args.format.as_str() {
        "text" => {
            println!("Skirmish Result");
            println!("===============");
            println!("Scenario: {}", result.scenario);
            println!("Ticks: {}", result.ticks);
            println!("Trainee: {}/{} hits, {} casualties", result.trainee_hits, result.trainee_shots, result.trainee_casualties);
            println!("Enemies: {} spawned, {} eliminated", result.enemies_spawned, result.enemies_eliminated);
            println!("Difficulty multiplier: {:.2}", result.final_difficulty_multiplier);
            println!("Population cap: {}", result.final_max_active);
            println!("Seed: {}", result.seed);
        }
        _ => {
            println!("{}", serde_json::to_string_pretty(&result).unwrap());
        }
    }
}
