//! Fuse countdown + DamageRequest → Detonated
//!
//! Detonated - one-way маркер: бомба выпадает из resolution,
//! explode_bombs в этом же тике превращает её во взрыв.

use std::collections::HashSet;

use bevy::prelude::*;

use super::events::{ActorDamaged, BombDetonated, DamageRequest};
use crate::components::{Bomb, Detonated, Fuse, KnockableActor};
use crate::logger;

/// Система: countdown fuse у всех живых бомб
pub fn tick_fuses(
    mut commands: Commands,
    mut bombs: Query<(Entity, &Transform, &mut Fuse), (With<Bomb>, Without<Detonated>)>,
    mut detonated_events: EventWriter<BombDetonated>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.timestep().as_secs_f32();

    for (entity, transform, mut fuse) in bombs.iter_mut() {
        fuse.tick(delta);
        if !fuse.is_expired() {
            continue;
        }

        commands.entity(entity).insert(Detonated);
        detonated_events.write(BombDetonated {
            bomb: entity,
            position: transform.translation,
        });
        logger::log_info(&format!("Bomb {:?}: fuse expired", entity));
    }
}

/// Система: DamageRequest → детонация бомбы / ActorDamaged
///
/// Повторные запросы к одной цели в этом тике игнорируются.
pub fn apply_damage_requests(
    mut commands: Commands,
    mut requests: EventReader<DamageRequest>,
    bombs: Query<&Transform, (With<Bomb>, Without<Detonated>)>,
    actors: Query<(), (With<KnockableActor>, Without<Bomb>)>,
    mut detonated_events: EventWriter<BombDetonated>,
    mut damaged_events: EventWriter<ActorDamaged>,
) {
    let mut handled = HashSet::new();

    for request in requests.read() {
        if !handled.insert(request.target) {
            continue;
        }

        if let Ok(transform) = bombs.get(request.target) {
            commands.entity(request.target).insert(Detonated);
            detonated_events.write(BombDetonated {
                bomb: request.target,
                position: transform.translation,
            });
            logger::log_info(&format!(
                "Bomb {:?} detonated by damage from {:?}",
                request.target, request.source
            ));
            continue;
        }

        if actors.get(request.target).is_ok() {
            damaged_events.write(ActorDamaged {
                actor: request.target,
                source: request.source,
            });
            logger::log_info(&format!("Actor {:?} damaged by {:?}", request.target, request.source));
            continue;
        }

        // Уже детонировавшая бомба или despawned entity - норма при цепной реакции
        logger::log(&format!("DamageRequest: target {:?} is not damageable", request.target));
    }
}
