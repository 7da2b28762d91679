//! Weapon-fire resolution against the entity registry
//!
//! Sequence per shot: ammo/cooldown gate, spread perturbation, proximity
//! raycast against registered entities, terrain check, damage curve with
//! cover mitigation, clamped damage application, event recording.

use ahash::AHashMap;
use glam::Vec3;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::combat::constants::{BASE_SPREAD_RADIANS, CENTER_MASS_OFFSET, HEAD_HEIGHT_OFFSET, HIT_RADIUS};
use crate::combat::cover::{cover_effectiveness, CoverEffectiveness};
use crate::combat::entity::CombatEntity;
use crate::combat::events::{CombatEventKind, CombatEventLog};
use crate::core::types::{EntityId, Tick};
use crate::nav::Pathfinder;

/// Outcome of one fire action
#[derive(Debug, Clone, PartialEq)]
pub enum FireOutcome {
    Hit {
        target: EntityId,
        damage: f32,
        headshot: bool,
        hit_point: Vec3,
    },
    Miss,
    EnvironmentHit {
        hit_point: Vec3,
    },
    /// No weapon, empty magazine, or still on cooldown - no state changed
    NoAmmo,
}

/// Owns the authoritative combat entity registry and the event log
///
/// All mutation goes through `&mut self`; one resolver per simulation.
/// Entities are raycast in registration order so outcomes are reproducible
/// under a fixed seed.
pub struct CombatResolver {
    entities: AHashMap<EntityId, CombatEntity>,
    order: Vec<EntityId>,
    events: CombatEventLog,
    rng: ChaCha8Rng,
    time: f32,
    tick: Tick,
}

impl CombatResolver {
    pub fn new(seed: u64) -> Self {
        Self {
            entities: AHashMap::new(),
            order: Vec::new(),
            events: CombatEventLog::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            time: 0.0,
            tick: 0,
        }
    }

    // --- Registry ---

    pub fn register_entity(&mut self, entity: CombatEntity) -> EntityId {
        let id = entity.id;
        if self.entities.insert(id, entity).is_none() {
            self.order.push(id);
        }
        id
    }

    /// Stale ids are a no-op
    pub fn unregister_entity(&mut self, id: EntityId) {
        if self.entities.remove(&id).is_some() {
            self.order.retain(|other| *other != id);
        }
    }

    pub fn entity(&self, id: EntityId) -> Option<&CombatEntity> {
        self.entities.get(&id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut CombatEntity> {
        self.entities.get_mut(&id)
    }

    /// Registered entities in stable registration order
    pub fn entities(&self) -> impl Iterator<Item = &CombatEntity> {
        self.order.iter().filter_map(|id| self.entities.get(id))
    }

    pub fn entity_count(&self) -> usize {
        self.order.len()
    }

    pub fn set_position(&mut self, id: EntityId, position: Vec3) {
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.position = position;
        }
    }

    // --- Time ---

    /// Advance sim time by one tick; drives cooldowns and event timestamps
    pub fn advance_time(&mut self, dt: f32) {
        self.time += dt;
        self.tick += 1;
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn tick(&self) -> Tick {
        self.tick
    }

    // --- Fire resolution ---

    /// Resolve one weapon-fire action
    ///
    /// `nav` supplies the terrain raycast for environment strikes; with no
    /// mesh loaded a ray that finds no entity is a plain miss. A stale
    /// shooter id resolves to `NoAmmo` (nothing to fire with).
    pub fn process_weapon_fire(
        &mut self,
        shooter: EntityId,
        direction: Vec3,
        nav: &Pathfinder,
    ) -> FireOutcome {
        let now = self.time;
        let (origin, weapon) = {
            let Some(entity) = self.entities.get(&shooter) else {
                return FireOutcome::NoAmmo;
            };
            let Some(weapon) = entity.weapon() else {
                return FireOutcome::NoAmmo;
            };
            if !weapon.ready(now) {
                return FireOutcome::NoAmmo;
            }
            (
                entity.position + Vec3::Y * CENTER_MASS_OFFSET,
                weapon.clone(),
            )
        };

        // Commit the shot before resolving it
        if let Some(state) = self
            .entities
            .get_mut(&shooter)
            .and_then(CombatEntity::weapon_mut)
        {
            state.ammo -= 1;
            state.last_fired = now;
        }

        let dir = self.perturb_direction(direction, weapon.recoil_multiplier);

        // Nearest entity along the ray within range and hit radius
        let mut best: Option<(f32, EntityId, Vec3)> = None;
        for id in &self.order {
            if *id == shooter {
                continue;
            }
            let Some(target) = self.entities.get(id) else {
                continue;
            };
            if !target.is_alive() {
                continue;
            }

            let aim_center = target.position + Vec3::Y * CENTER_MASS_OFFSET;
            let along = (aim_center - origin).dot(dir);
            if along <= 0.0 || along > weapon.effective_range {
                continue;
            }
            let closest = origin + dir * along;
            if closest.distance(aim_center) > HIT_RADIUS
                || best.as_ref().is_some_and(|(t, _, _)| *t <= along)
            {
                continue;
            }
            best = Some((along, *id, closest));
        }

        // Terrain may intercept the ray before the entity does
        let terrain_limit = best
            .as_ref()
            .map_or(weapon.effective_range, |(t, _, _)| *t);
        if let Some(point) = nav.raycast_obstruction(origin, dir, terrain_limit) {
            self.events
                .record(self.tick, CombatEventKind::Miss { attacker: shooter });
            return FireOutcome::EnvironmentHit { hit_point: point };
        }

        let Some((distance, target_id, hit_point)) = best else {
            self.events
                .record(self.tick, CombatEventKind::Miss { attacker: shooter });
            return FireOutcome::Miss;
        };

        let Some(target) = self.entities.get_mut(&target_id) else {
            return FireOutcome::Miss;
        };
        let headshot = hit_point.y >= target.position.y + HEAD_HEIGHT_OFFSET;
        let cover = cover_effectiveness(target.facing, dir);
        let damage =
            weapon.damage_at(distance, headshot, target.armor) * cover.damage_multiplier();

        let was_alive = target.is_alive();
        target.apply_damage(damage);
        let killed = was_alive && !target.is_alive();

        self.events.record(
            self.tick,
            CombatEventKind::Hit {
                attacker: shooter,
                target: target_id,
                damage,
                headshot,
            },
        );
        if killed {
            tracing::debug!(?shooter, target = ?target_id, "target killed");
            self.events.record(
                self.tick,
                CombatEventKind::Kill {
                    attacker: shooter,
                    target: target_id,
                },
            );
        }

        FireOutcome::Hit {
            target: target_id,
            damage,
            headshot,
            hit_point,
        }
    }

    /// Uniform aim perturbation in a small cone scaled by the weapon's
    /// recoil multiplier
    fn perturb_direction(&mut self, direction: Vec3, recoil_multiplier: f32) -> Vec3 {
        let dir = direction.normalize_or_zero();
        if dir == Vec3::ZERO {
            return Vec3::NEG_Z;
        }

        let spread = BASE_SPREAD_RADIANS * recoil_multiplier;
        if spread <= 0.0 {
            return dir;
        }

        let right = {
            let r = dir.cross(Vec3::Y);
            if r.length_squared() < 1e-6 {
                Vec3::X
            } else {
                r.normalize()
            }
        };
        let up = right.cross(dir);

        let a: f32 = self.rng.gen_range(-spread..=spread);
        let b: f32 = self.rng.gen_range(-spread..=spread);
        (dir + right * a + up * b).normalize()
    }

    /// Cover category an entity enjoys against fire from `threat_direction`
    pub fn cover_for(&self, id: EntityId, threat_direction: Vec3) -> Option<CoverEffectiveness> {
        self.entities
            .get(&id)
            .map(|entity| cover_effectiveness(entity.facing, threat_direction))
    }

    // --- Magazine management ---

    pub fn reload(&mut self, id: EntityId) {
        let Some(weapon) = self.entities.get_mut(&id).and_then(CombatEntity::weapon_mut)
        else {
            return;
        };
        weapon.refill();
        self.events.record(self.tick, CombatEventKind::Reload { entity: id });
    }

    pub fn switch_weapon(&mut self, id: EntityId, index: usize) {
        let Some(entity) = self.entities.get_mut(&id) else {
            return;
        };
        if index >= entity.weapons.len() {
            return;
        }
        entity.equipped = index;
        let weapon = entity.weapons[index].name.clone();
        self.events
            .record(self.tick, CombatEventKind::WeaponSwitch { entity: id, weapon });
    }

    // --- Analytics boundary ---

    pub fn drain_events(&mut self) -> Vec<crate::combat::events::CombatEvent> {
        self.events.drain()
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }
}
