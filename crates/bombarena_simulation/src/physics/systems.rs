//! ECS systems bomb physics
//!
//! - register_environment: EnvironmentCollider → ArenaScene
//! - step_bombs: один resolution pass на бомбу, по возрастанию entity index
//!
//! Эффекты на другие тела применяются СРАЗУ после pass бомбы-источника,
//! до pass следующей бомбы (следующая бомба видит уже сдвинутые/knocked тела).

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::body::DynamicBody;
use super::events::{ActorKnocked, BombImpact, BombKnocked};
use super::momentum::ContactEffect;
use super::step::step_body;
use crate::collision::{get_layer_name, ArenaScene, ColliderRegistry, SceneGeometry, COLLISION_LAYER_ENVIRONMENT};
use crate::components::{Bomb, BombMotion, BombTuning, Detonated, EnvironmentCollider, KnockableActor};
use crate::config::BombPhysicsConfig;
use crate::logger;

/// Бомбы, для которых выполняется resolution
pub type BombBodies<'w, 's> = Query<
    'w,
    's,
    (Entity, &'static mut Transform, &'static mut BombMotion, &'static BombTuning),
    (With<Bomb>, Without<Detonated>),
>;

/// Акторы, которых бомбы толкают (locomotion внешняя)
pub type KnockableActors<'w, 's> =
    Query<'w, 's, (Entity, &'static Transform, &'static mut KnockableActor), Without<Bomb>>;

#[derive(SystemParam)]
pub struct ContactEvents<'w> {
    bomb_knocked: EventWriter<'w, BombKnocked>,
    actor_knocked: EventWriter<'w, ActorKnocked>,
    impacts: EventWriter<'w, BombImpact>,
}

/// Синхронизация статической геометрии с ArenaScene
///
/// Без ArenaScene (Rapier backend) ничего не делает: Collider уже на entity.
pub fn register_environment(
    scene: Option<ResMut<ArenaScene>>,
    added: Query<(Entity, &EnvironmentCollider), Added<EnvironmentCollider>>,
    mut removed: RemovedComponents<EnvironmentCollider>,
) {
    let Some(mut scene) = scene else {
        return;
    };

    for entity in removed.read() {
        scene.remove_static(entity);
    }

    for (entity, collider) in added.iter() {
        scene.add_static(entity, collider.shape);
        logger::log(&format!(
            "{} collider {:?} registered: {:?}",
            get_layer_name(COLLISION_LAYER_ENVIRONMENT),
            entity,
            collider.shape
        ));
    }
}

/// Bomb physics tick
///
/// 1. Capability registry из текущих позиций бомб и акторов
/// 2. Dynamic spheres → сцена
/// 3. Для каждой бомбы (по entity index): step_body → write back → эффекты
pub fn step_bombs(
    mut geometry: SceneGeometry,
    mut bombs: BombBodies,
    mut actors: KnockableActors,
    mut events: ContactEvents,
    config: Res<BombPhysicsConfig>,
    time: Res<Time<Fixed>>,
    mut missing_geometry_reported: Local<bool>,
) {
    let delta = time.timestep().as_secs_f32();

    let mut registry = ColliderRegistry::default();
    for (entity, transform, _, tuning) in bombs.iter() {
        registry.register_bomb(entity, transform.translation, tuning.radius);
    }
    for (entity, transform, actor) in actors.iter() {
        registry.register_actor(entity, transform.translation, actor.radius);
    }
    geometry.sync_dynamic_spheres(&registry.dynamic_spheres());

    // Детерминированный порядок
    let mut order: Vec<Entity> = bombs.iter().map(|(entity, ..)| entity).collect();
    order.sort_by_key(|entity| entity.index());

    let mut effects = Vec::new();

    for entity in order {
        let Ok((_, transform, motion, tuning)) = bombs.get(entity) else {
            continue;
        };
        let mut body = DynamicBody::new(entity, transform.translation, *motion, *tuning);

        let stepped = geometry.with(|scene| {
            step_body(&mut body, &*scene, &registry, &config, delta, &mut effects)
        });

        let Some(resolution) = stepped else {
            if !*missing_geometry_reported {
                logger::log_error("step_bombs: no ArenaScene and no Rapier context, bombs are frozen");
                *missing_geometry_reported = true;
            }
            return;
        };

        if !resolution.is_consumed() {
            logger::log(&format!(
                "Bomb {:?}: iteration cap reached, dropped {:.4}m",
                entity,
                resolution.remainder.length()
            ));
        }

        if let Ok((_, mut transform, mut motion, _)) = bombs.get_mut(entity) {
            transform.translation = body.position;
            *motion = body.motion;
        }
        registry.move_to(entity, body.position);
        geometry.move_dynamic_sphere(entity, body.position);

        for effect in effects.drain(..) {
            apply_contact_effect(effect, &mut bombs, &mut actors, &mut registry, &mut geometry, &mut events);
        }
    }
}

fn apply_contact_effect(
    effect: ContactEffect,
    bombs: &mut BombBodies,
    actors: &mut KnockableActors,
    registry: &mut ColliderRegistry,
    geometry: &mut SceneGeometry,
    events: &mut ContactEvents,
) {
    match effect {
        ContactEffect::Knock {
            source,
            target,
            direction,
        } => {
            if let Ok((_, _, mut motion, _)) = bombs.get_mut(target) {
                motion.knock(direction);
                events.bomb_knocked.write(BombKnocked {
                    bomb: target,
                    source,
                    direction,
                });
                logger::log(&format!("Bomb {:?} knocked bomb {:?} → {:?}", source, target, direction));
                return;
            }

            let Ok((_, _, mut actor)) = actors.get_mut(target) else {
                logger::log_warning(&format!("Knock: target {:?} is neither bomb nor actor", target));
                return;
            };
            actor.knock(direction);
            events.actor_knocked.write(ActorKnocked {
                actor: target,
                source,
                direction,
            });
            logger::log(&format!("Bomb {:?} knocked actor {:?} → {:?}", source, target, direction));
        }

        ContactEffect::Displace { target, offset } => {
            let Ok((_, mut transform, _, _)) = bombs.get_mut(target) else {
                logger::log_warning(&format!("Displace: bomb {:?} not found", target));
                return;
            };
            transform.translation += offset;
            registry.move_to(target, transform.translation);
            geometry.move_dynamic_sphere(target, transform.translation);
        }

        ContactEffect::Impact {
            source,
            target,
            point,
        } => {
            events.impacts.write(BombImpact {
                bomb: source,
                target,
                point,
            });
        }
    }
}
