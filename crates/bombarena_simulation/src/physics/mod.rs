//! Bomb physics module
//!
//! Discrete-time swept-sphere движение бомб:
//! grounding → vertical integration → horizontal direction → resolution loop.
//!
//! Pure функции (body/grounding/integrator/resolution/momentum/step) не знают про ECS,
//! systems копируют компоненты в DynamicBody и обратно.

use bevy::prelude::*;

pub mod body;
pub mod events;
pub mod grounding;
pub mod integrator;
pub mod momentum;
pub mod resolution;
pub mod spawn;
pub mod step;
pub mod systems;


// Re-export основных типов
pub use body::DynamicBody;
pub use events::{ActorKnocked, BombImpact, BombKnocked};
pub use grounding::{detect_ground, GroundContact};
pub use integrator::{horizontal_delta, integrate_vertical, project_on_plane};
pub use momentum::{separation_offset, transfer_momentum, ContactEffect, TransferOutcome};
pub use resolution::{resolve, Resolution, MIN_MOVE_LENGTH};
pub use spawn::{
    actor_bundle, bomb_bundle, environment_bundle, spawn_bomb, spawn_environment,
    spawn_knockable_actor, spawn_owned_bomb,
};
pub use step::step_body;

use crate::collision::DynamicSpheres;
use crate::config::BombPhysicsConfig;
use crate::ArenaSet;

/// Bomb Physics Plugin
///
/// Регистрирует системы в FixedUpdate:
/// 1. register_environment (ArenaSet::Environment) - статика → ArenaScene
/// 2. step_bombs (ArenaSet::Physics) - resolution pass всех бомб
pub struct BombPhysicsPlugin;

impl Plugin for BombPhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BombPhysicsConfig>()
            .init_resource::<DynamicSpheres>()
            .add_event::<BombKnocked>()
            .add_event::<ActorKnocked>()
            .add_event::<BombImpact>();

        app.add_systems(
            FixedUpdate,
            (
                systems::register_environment.in_set(ArenaSet::Environment),
                systems::step_bombs.in_set(ArenaSet::Physics),
            ),
        );
    }
}
