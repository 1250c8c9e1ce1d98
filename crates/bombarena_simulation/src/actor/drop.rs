//! Drop / kick: что делает актор по кнопке "бомба"
//!
//! Overlap у ног актора против DYNAMIC:
//! - бомба рядом → kick: knock(facing), актор игнорируется бомбой `kick_ignore_seconds`
//! - иначе → новая бомба у ног (если есть свободный слот BombCarrier)

use bevy::prelude::*;

use crate::collision::{SceneGeometry, COLLISION_MASK_DROP_PROBE};
use crate::components::{Bomb, BombCarrier, BombMotion, Detonated};
use crate::config::BombPhysicsConfig;
use crate::logger;
use crate::physics::spawn_owned_bomb;

/// Намерение актора положить/пнуть бомбу (input снаружи симуляции)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DropBombIntent {
    pub actor: Entity,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct BombDropped {
    pub actor: Entity,
    pub bomb: Entity,
    pub position: Vec3,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct BombKicked {
    pub actor: Entity,
    pub bomb: Entity,
    pub direction: Vec3,
}

/// Точка у ног актора
pub fn foot_position(actor_position: Vec3, config: &BombPhysicsConfig) -> Vec3 {
    actor_position - Vec3::Y * config.actor_foot_offset
}

/// Центр новой бомбы: на полу под ногами + skin
pub fn drop_position(actor_position: Vec3, config: &BombPhysicsConfig) -> Vec3 {
    let feet = foot_position(actor_position, config);
    Vec3::new(feet.x, feet.y + config.bomb_radius + config.skin_width, feet.z)
}

/// Система: DropBombIntent → kick или drop
#[allow(clippy::too_many_arguments)]
pub fn process_drop_intents(
    mut commands: Commands,
    mut intents: EventReader<DropBombIntent>,
    mut actors: Query<(&Transform, &mut BombCarrier), Without<Bomb>>,
    mut bombs: Query<&mut BombMotion, (With<Bomb>, Without<Detonated>)>,
    mut geometry: SceneGeometry,
    mut dropped_events: EventWriter<BombDropped>,
    mut kicked_events: EventWriter<BombKicked>,
    config: Res<BombPhysicsConfig>,
) {
    for intent in intents.read() {
        let Ok((transform, mut carrier)) = actors.get_mut(intent.actor) else {
            logger::log_warning(&format!("DropBombIntent: actor {:?} has no BombCarrier", intent.actor));
            continue;
        };

        let feet = foot_position(transform.translation, &config);
        let probe_radius = config.actor_probe_radius;
        let Some(mut nearby) = geometry.with(|scene| {
            scene.overlap_sphere(feet, probe_radius, COLLISION_MASK_DROP_PROBE, &[intent.actor])
        }) else {
            logger::log_warning("DropBombIntent: no scene geometry");
            continue;
        };
        nearby.sort_by_key(|bomb| bomb.index());

        // Kick: первая живая бомба у ног
        let kicked = nearby.into_iter().find_map(|bomb| {
            let mut motion = bombs.get_mut(bomb).ok()?;
            motion.knock(carrier.facing);
            motion.set_ignored_collider(intent.actor, config.kick_ignore_seconds);
            Some(bomb)
        });

        if let Some(bomb) = kicked {
            kicked_events.write(BombKicked {
                actor: intent.actor,
                bomb,
                direction: carrier.facing,
            });
            logger::log(&format!("Actor {:?} kicked bomb {:?} → {:?}", intent.actor, bomb, carrier.facing));
            continue;
        }

        if !carrier.can_drop() {
            logger::log(&format!(
                "Actor {:?}: no free bomb slot ({}/{})",
                intent.actor, carrier.active_bombs, carrier.max_bombs
            ));
            continue;
        }

        let position = drop_position(transform.translation, &config);
        let bomb = spawn_owned_bomb(&mut commands, intent.actor, position, &config);
        carrier.on_bomb_dropped();

        dropped_events.write(BombDropped {
            actor: intent.actor,
            bomb,
            position,
        });
        logger::log_info(&format!("Actor {:?} dropped bomb {:?} at {:?}", intent.actor, bomb, position));
    }
}
