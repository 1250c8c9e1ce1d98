//! Explosion: расширяющаяся сфера урона
//!
//! Радиус растёт от радиуса бомбы со скоростью `expansion_speed`
//! до `max_radius` (base × bomb_power владельца). Каждый тик overlap
//! против DYNAMIC | KNOCKABLE, каждая цель получает DamageRequest один раз.
//! Бомба, задетая взрывом, детонирует в следующем тике (цепная реакция).

use bevy::prelude::*;

use super::events::DamageRequest;
use crate::collision::{SceneGeometry, COLLISION_MASK_EXPLOSION};
use crate::components::{Bomb, BombCarrier, BombOwner, BombTuning, Detonated, KnockableActor};
use crate::config::BombPhysicsConfig;
use crate::logger;

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct Explosion {
    /// Бомба, из которой возник взрыв (уже despawned)
    pub source: Entity,
    pub radius: f32,
    pub max_radius: f32,
    pub expansion_speed: f32,
    /// Оставшееся время жизни (секунды)
    pub remaining: f32,
    /// Кому уже отправлен DamageRequest
    pub damaged: Vec<Entity>,
}

impl Explosion {
    pub fn new(source: Entity, start_radius: f32, bomb_power: u32, config: &BombPhysicsConfig) -> Self {
        let max_radius = config.explosion_base_radius * bomb_power.max(1) as f32;
        Self {
            source,
            radius: start_radius.min(max_radius),
            max_radius,
            expansion_speed: config.explosion_expansion_speed,
            remaining: config.explosion_duration,
            damaged: Vec::new(),
        }
    }

    /// Рост радиуса + countdown; true пока взрыв жив
    pub fn advance(&mut self, delta: f32) -> bool {
        self.radius = (self.radius + self.expansion_speed * delta).min(self.max_radius);
        self.remaining -= delta;
        self.remaining > 0.0
    }

    /// Отметить цель; false если она уже была задета
    pub fn mark_damaged(&mut self, target: Entity) -> bool {
        if self.damaged.contains(&target) {
            return false;
        }
        self.damaged.push(target);
        true
    }
}

/// Система: Detonated бомбы → Explosion, despawn бомбы, слот владельцу
pub fn explode_bombs(
    mut commands: Commands,
    bombs: Query<(Entity, &Transform, &BombTuning, Option<&BombOwner>), (With<Bomb>, With<Detonated>)>,
    mut carriers: Query<&mut BombCarrier>,
    config: Res<BombPhysicsConfig>,
) {
    for (entity, transform, tuning, owner) in bombs.iter() {
        let mut bomb_power = 1;

        if let Some(BombOwner(owner)) = owner {
            match carriers.get_mut(*owner) {
                Ok(mut carrier) => {
                    bomb_power = carrier.bomb_power;
                    carrier.on_bomb_detonated();
                }
                Err(_) => {
                    logger::log_warning(&format!("Bomb {:?}: owner {:?} has no BombCarrier", entity, owner));
                }
            }
        }

        let explosion = Explosion::new(entity, tuning.radius, bomb_power, &config);
        logger::log_info(&format!(
            "Bomb {:?} exploded at {:?} (max radius {:.2})",
            entity, transform.translation, explosion.max_radius
        ));

        commands.spawn((explosion, Transform::from_translation(transform.translation)));
        commands.entity(entity).despawn();
    }
}

/// Система: расширение взрывов + DamageRequest для задетых
pub fn expand_explosions(
    mut commands: Commands,
    mut explosions: Query<(Entity, &Transform, &mut Explosion)>,
    damageable: Query<(), (Or<(With<Bomb>, With<KnockableActor>)>, Without<Detonated>)>,
    mut geometry: SceneGeometry,
    mut damage_requests: EventWriter<DamageRequest>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.timestep().as_secs_f32();

    for (entity, transform, mut explosion) in explosions.iter_mut() {
        let alive = explosion.advance(delta);
        let center = transform.translation;
        let radius = explosion.radius;
        let source = explosion.source;

        let Some(mut overlapping) = geometry.with(|scene| {
            scene.overlap_sphere(center, radius, COLLISION_MASK_EXPLOSION, &[source])
        }) else {
            logger::log_warning("expand_explosions: no scene geometry");
            return;
        };
        overlapping.sort_by_key(|target| target.index());

        for target in overlapping {
            // Сцена может ещё держать despawned бомбу до следующего sync
            if damageable.get(target).is_err() {
                continue;
            }
            if explosion.mark_damaged(target) {
                damage_requests.write(DamageRequest {
                    target,
                    source: Some(source),
                });
            }
        }

        if !alive {
            commands.entity(entity).despawn();
        }
    }
}
