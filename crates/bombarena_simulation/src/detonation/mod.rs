//! Detonation module: fuse, урон, взрывы
//!
//! ECS ответственность:
//! - Fuse countdown → Detonated
//! - DamageRequest (Damageable capability) → детонация / ActorDamaged
//! - Explosion: расширение, урон по overlap, цепные реакции
//!
//! Health/VFX/звук - снаружи (читают BombDetonated, ActorDamaged).

use bevy::prelude::*;

pub mod events;
pub mod explosion;
pub mod fuse;

// Re-export основных типов
pub use events::{ActorDamaged, BombDetonated, DamageRequest};
pub use explosion::{expand_explosions, explode_bombs, Explosion};
pub use fuse::{apply_damage_requests, tick_fuses};

use crate::collision::DynamicSpheres;
use crate::config::BombPhysicsConfig;
use crate::ArenaSet;

/// Detonation Plugin
///
/// Порядок выполнения:
/// 1. tick_fuses, apply_damage_requests (ArenaSet::Lifecycle) - до physics,
///    детонировавшие бомбы в этом тике уже не двигаются
/// 2. explode_bombs, expand_explosions (ArenaSet::Detonation) - после physics
pub struct DetonationPlugin;

impl Plugin for DetonationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BombPhysicsConfig>()
            .init_resource::<DynamicSpheres>()
            .add_event::<DamageRequest>()
            .add_event::<BombDetonated>()
            .add_event::<ActorDamaged>();

        app.add_systems(
            FixedUpdate,
            (
                (tick_fuses, apply_damage_requests)
                    .chain()
                    .in_set(ArenaSet::Lifecycle),
                (explode_bombs, expand_explosions)
                    .chain()
                    .in_set(ArenaSet::Detonation),
            ),
        );
    }
}
