//! Collision Resolution Loop
//!
//! Потребляет desired displacement за тик:
//! sweep → depenetration (skin width) → slide / momentum transfer → повтор.
//!
//! Ограничен `max_iterations` (default 5): остаток после cap молча
//! отбрасывается, тик никогда не зависает.

use bevy::prelude::*;

use super::body::DynamicBody;
use super::integrator::project_on_plane;
use super::momentum::{knock_transfer, transfer_momentum, ContactEffect, TransferOutcome};
use crate::collision::{
    sort_hits, ColliderRegistry, ContactTarget, GeometryQuery, COLLISION_MASK_BOMB_SWEEP,
};
use crate::config::BombPhysicsConfig;

/// Остаток короче этого считается потреблённым
pub const MIN_MOVE_LENGTH: f32 = 1e-6;

/// Если проекция направления на стену короче - упёрлись лоб в лоб, stop()
const SLIDE_STOP_THRESHOLD: f32 = 1e-3;

/// Итог resolve()
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// Непотреблённый остаток (ненулевой только если упёрлись в cap)
    pub remainder: Vec3,
    /// Сколько sweep итераций выполнено
    pub iterations: u32,
}

impl Resolution {
    pub fn is_consumed(&self) -> bool {
        self.remainder.length() < MIN_MOVE_LENGTH
    }
}

/// Провести тело через сцену на `desired`
///
/// Мутирует `body.position` и `body.motion`; эффекты на другие тела
/// дописываются в `effects`.
#[allow(clippy::too_many_arguments)]
pub fn resolve<G: GeometryQuery + ?Sized>(
    body: &mut DynamicBody,
    desired: Vec3,
    geometry: &G,
    registry: &ColliderRegistry,
    config: &BombPhysicsConfig,
    delta: f32,
    effects: &mut Vec<ContactEffect>,
) -> Resolution {
    let mut remaining = desired;
    let mut excluded = body.exclusions();
    let mut iterations = 0;

    for _ in 0..config.max_iterations {
        let length = remaining.length();
        if length < MIN_MOVE_LENGTH {
            remaining = Vec3::ZERO;
            break;
        }

        iterations += 1;
        let direction = remaining / length;

        let mut hits = geometry.sweep_sphere(
            body.position,
            body.tuning.radius,
            direction,
            length,
            COLLISION_MASK_BOMB_SWEEP,
            &excluded,
        );

        if hits.is_empty() {
            body.position += remaining;
            remaining = Vec3::ZERO;
            break;
        }

        sort_hits(&mut hits);

        // Depenetration по ближайшему hit; ровно skin_width = "не двигаемся"
        let skin = body.tuning.skin_width;
        let closest = hits[0].distance;
        if closest > skin {
            body.position += direction * (closest - skin);
        }
        remaining -= direction * closest;

        // Все hits "этого шага" (в пределах skin от ближайшего) дают эффекты
        let step_band = closest + skin;
        let mut knocked = false;

        for hit in hits.iter().take_while(|hit| hit.distance <= step_band) {
            let target = registry.lookup(hit.collider);

            if knocked {
                // Тело уже остановлено: остальные knockable цели получают только knock
                if target.is_knockable() {
                    let _ = knock_transfer(body, hit, target, Vec3::ZERO, direction, config, effects);
                }
                continue;
            }

            match target {
                ContactTarget::Environment => {
                    remaining = slide_along(body, remaining, hit.normal);
                }
                ContactTarget::Bomb(_) | ContactTarget::Actor(_) => {
                    match transfer_momentum(body, hit, target, remaining, direction, config, delta, effects) {
                        TransferOutcome::BounceOver { remaining: redirected } => {
                            remaining = redirected;
                            excluded.push(hit.collider);
                        }
                        TransferOutcome::Knocked => {
                            remaining = Vec3::ZERO;
                            knocked = true;
                        }
                        TransferOutcome::Supported => {
                            remaining = Vec3::ZERO;
                        }
                    }
                }
            }
        }

        if knocked {
            break;
        }
    }

    Resolution {
        remainder: remaining,
        iterations,
    }
}

/// Скольжение вдоль поверхности с нормалью `normal`
///
/// - остаток проецируется на плоскость
/// - horizontal_direction = XZ проекции направления (stop() если XZ съеден)
/// - vertical_velocity = Y проекции скорости (посадка на пол → 0)
pub(super) fn slide_along(body: &mut DynamicBody, remaining: Vec3, normal: Vec3) -> Vec3 {
    let velocity = project_on_plane(body.velocity(), normal);

    if body.motion.is_moving() {
        let heading = project_on_plane(body.motion.horizontal_direction, normal);
        let flat = Vec3::new(heading.x, 0.0, heading.z);
        if flat.length() < SLIDE_STOP_THRESHOLD {
            body.motion.stop();
        } else {
            body.motion.set_horizontal_direction(flat);
        }
    }

    body.motion.vertical_velocity = velocity.y;

    project_on_plane(remaining, normal)
}
