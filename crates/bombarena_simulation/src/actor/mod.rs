//! Actor domain - то, что игрок делает с бомбами
//!
//! Содержит:
//! - DropBombIntent → drop новой бомбы или kick соседней
//!
//! Компоненты (KnockableActor, BombCarrier) - в crate::components::actor.

use bevy::prelude::*;

pub mod drop;

// Re-export основных типов
pub use drop::{drop_position, foot_position, process_drop_intents, BombDropped, BombKicked, DropBombIntent};

use crate::collision::DynamicSpheres;
use crate::config::BombPhysicsConfig;
use crate::ArenaSet;

/// Actor Plugin: drop/kick в конце тика (новые бомбы двигаются со следующего)
pub struct ActorPlugin;

impl Plugin for ActorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BombPhysicsConfig>()
            .init_resource::<DynamicSpheres>()
            .add_event::<DropBombIntent>()
            .add_event::<BombDropped>()
            .add_event::<BombKicked>();

        app.add_systems(FixedUpdate, process_drop_intents.in_set(ArenaSet::Actors));
    }
}
