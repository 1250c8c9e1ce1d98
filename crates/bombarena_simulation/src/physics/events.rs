//! Physics events (для VFX/звука/сетевой репликации снаружи симуляции)

use bevy::prelude::*;

/// Бомба получила knock (от другой бомбы)
#[derive(Event, Debug, Clone)]
pub struct BombKnocked {
    pub bomb: Entity,
    pub source: Entity,
    pub direction: Vec3,
}

/// Актор получил knock от бомбы
#[derive(Event, Debug, Clone)]
pub struct ActorKnocked {
    pub actor: Entity,
    pub source: Entity,
    pub direction: Vec3,
}

/// One-shot контакт бомбы с knockable целью (impact feedback)
#[derive(Event, Debug, Clone)]
pub struct BombImpact {
    pub bomb: Entity,
    pub target: Entity,
    pub point: Vec3,
}
