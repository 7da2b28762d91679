//! Combat event stream consumed by the after-action analytics collaborator

use serde::{Deserialize, Serialize};

use crate::core::types::{EntityId, Tick};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatEvent {
    pub tick: Tick,
    pub kind: CombatEventKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CombatEventKind {
    Hit {
        attacker: EntityId,
        target: EntityId,
        damage: f32,
        headshot: bool,
    },
    Kill {
        attacker: EntityId,
        target: EntityId,
    },
    Miss {
        attacker: EntityId,
    },
    Reload {
        entity: EntityId,
    },
    WeaponSwitch {
        entity: EntityId,
        weapon: String,
    },
}

/// Append-only buffer of combat events
///
/// The analytics consumer drains it; the core never reads it back.
#[derive(Debug, Default)]
pub struct CombatEventLog {
    events: Vec<CombatEvent>,
}

impl CombatEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, tick: Tick, kind: CombatEventKind) {
        self.events.push(CombatEvent { tick, kind });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CombatEvent> {
        self.events.iter()
    }

    /// Hand the buffered events to the consumer and clear the log
    pub fn drain(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }
}
