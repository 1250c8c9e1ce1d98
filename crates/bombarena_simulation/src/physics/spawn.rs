//! Spawn helpers: бомбы, акторы, статическая геометрия
//!
//! Бомбы и акторы - только ECS компоненты: сцена видит их через зеркало
//! `DynamicSpheres`. Статика дополнительно несёт Rapier коллайдер с
//! collision groups, чтобы тот же entity работал и с Rapier backend.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::collision::{environment_groups, StaticShape};
use crate::components::{Bomb, BombCarrier, BombMotion, BombOwner, EnvironmentCollider, Fuse, KnockableActor};
use crate::config::BombPhysicsConfig;

/// Полуразмер плиты, которой плоскость представлена в Rapier (метры)
const PLANE_HALF_EXTENT: f32 = 100.0;
const PLANE_HALF_THICKNESS: f32 = 0.5;

/// Бомба: zero motion, полный fuse
pub fn bomb_bundle(position: Vec3, config: &BombPhysicsConfig) -> impl Bundle {
    (
        Bomb,
        Transform::from_translation(position),
        BombMotion::default(),
        config.bomb_tuning(),
        Fuse::new(config.fuse_seconds),
    )
}

pub fn spawn_bomb(commands: &mut Commands, position: Vec3, config: &BombPhysicsConfig) -> Entity {
    commands.spawn(bomb_bundle(position, config)).id()
}

/// Бомба актора: владелец + актор исключён из коллизий на `kick_ignore_seconds`
/// (иначе бомба сразу толкнёт того, кто её положил)
pub fn spawn_owned_bomb(
    commands: &mut Commands,
    owner: Entity,
    position: Vec3,
    config: &BombPhysicsConfig,
) -> Entity {
    let mut motion = BombMotion::default();
    motion.set_ignored_collider(owner, config.kick_ignore_seconds);

    commands
        .spawn(bomb_bundle(position, config))
        .insert((motion, BombOwner(owner)))
        .id()
}

/// Knockable актор с BombCarrier
pub fn actor_bundle(position: Vec3, radius: f32) -> impl Bundle {
    (
        KnockableActor::new(radius),
        BombCarrier::default(),
        Transform::from_translation(position),
    )
}

pub fn spawn_knockable_actor(commands: &mut Commands, position: Vec3, radius: f32) -> Entity {
    commands.spawn(actor_bundle(position, radius)).id()
}

/// Статическая геометрия
///
/// Plane в Rapier - толстая плита, верхняя грань которой лежит в плоскости.
pub fn environment_bundle(collider: impl Into<EnvironmentCollider>) -> impl Bundle {
    let environment = collider.into();
    let (transform, collider) = match environment.shape {
        StaticShape::Plane { normal, offset } => {
            let normal = normal.normalize_or_zero();
            let rotation = Quat::from_rotation_arc(Vec3::Y, normal);
            let center = normal * (offset - PLANE_HALF_THICKNESS);
            (
                Transform::from_translation(center).with_rotation(rotation),
                Collider::cuboid(PLANE_HALF_EXTENT, PLANE_HALF_THICKNESS, PLANE_HALF_EXTENT),
            )
        }
        StaticShape::Sphere { center, radius } => {
            (Transform::from_translation(center), Collider::ball(radius))
        }
    };

    (
        environment,
        transform,
        RigidBody::Fixed,
        collider,
        environment_groups(),
    )
}

pub fn spawn_environment(commands: &mut Commands, collider: impl Into<EnvironmentCollider>) -> Entity {
    commands.spawn(environment_bundle(collider)).id()
}
