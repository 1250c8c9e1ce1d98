//! Detonation events

use bevy::prelude::*;

/// Запрос урона (Damageable capability)
///
/// Бомба → детонирует немедленно, актор → ActorDamaged.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageRequest {
    pub target: Entity,
    /// Кто нанёс (взрыв), None - внешний источник
    pub source: Option<Entity>,
}

/// Бомба детонировала (fuse истёк или DamageRequest)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct BombDetonated {
    pub bomb: Entity,
    pub position: Vec3,
}

/// Актор задет взрывом (health bookkeeping - снаружи симуляции)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ActorDamaged {
    pub actor: Entity,
    pub source: Option<Entity>,
}
