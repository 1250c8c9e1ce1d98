//! Momentum Transfer Protocol
//!
//! Контакт с другой бомбой или knockable актором:
//! - Bounce-over: airborne бомба цепляет низ цели → прыжок через неё
//! - Knock transfer (default): цель получает направление движения,
//!   бомба останавливается, перекрывшиеся бомбы разводятся
//! - Support: чисто вертикальный контакт (бомба лежит на другой бомбе) -
//!   цель служит опорой, vertical_velocity гасится, эффектов нет
//!
//! Эффекты на ДРУГИЕ тела не применяются сразу - они пишутся в очередь
//! `ContactEffect` и применяются system'ой после pass этой бомбы.

use bevy::prelude::*;

use super::body::DynamicBody;
use crate::collision::{ContactTarget, SphereInfo, SweepHit};
use crate::config::BombPhysicsConfig;

/// Эффект на другое тело, собранный во время resolution pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactEffect {
    /// target.knock(direction)
    Knock {
        source: Entity,
        target: Entity,
        direction: Vec3,
    },
    /// Сдвинуть бомбу target на offset (separation)
    Displace { target: Entity, offset: Vec3 },
    /// One-shot feedback (VFX/звук), на resolution не влияет
    Impact {
        source: Entity,
        target: Entity,
        point: Vec3,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransferOutcome {
    /// Прыжок через цель; цель исключается до конца pass
    BounceOver { remaining: Vec3 },
    /// Направление передано, тело остановлено
    Knocked,
    /// Направление без XZ: цель - опора, knock'ать нечем
    Supported,
}

/// XZ направления короче этого - контакт чисто вертикальный
const SUPPORT_EPSILON: f32 = 1e-3;

/// Решить, что делать с контактом `hit` против knockable цели
///
/// `remaining` - остаток desired displacement после depenetration,
/// `travel_direction` - направление текущего sweep (fallback для knock).
#[allow(clippy::too_many_arguments)]
pub fn transfer_momentum(
    body: &mut DynamicBody,
    hit: &SweepHit,
    target: ContactTarget,
    remaining: Vec3,
    travel_direction: Vec3,
    config: &BombPhysicsConfig,
    delta: f32,
    effects: &mut Vec<ContactEffect>,
) -> TransferOutcome {
    if let Some(sphere) = target.sphere() {
        if should_bounce_over(body, hit, sphere, config) {
            body.motion.vertical_velocity = config.bounce_velocity;
            let mut redirected = remaining;
            redirected.y = config.bounce_velocity * delta;
            return TransferOutcome::BounceOver {
                remaining: redirected,
            };
        }
    }

    knock_transfer(body, hit, target, remaining, travel_direction, config, effects)
}

/// Airborne + контакт не выше bounce_height в frame цели
fn should_bounce_over(
    body: &DynamicBody,
    hit: &SweepHit,
    target: SphereInfo,
    config: &BombPhysicsConfig,
) -> bool {
    !body.motion.grounded && hit.point.y - target.center.y <= config.bounce_height
}

/// Knock transfer: Knock (+ Displace для бомбы) + Impact, тело останавливается
///
/// Вертикальный контакт (падение на цель сверху) - `Supported`: падение гасится,
/// цель не трогаем.
pub fn knock_transfer(
    body: &mut DynamicBody,
    hit: &SweepHit,
    target: ContactTarget,
    remaining: Vec3,
    travel_direction: Vec3,
    config: &BombPhysicsConfig,
    effects: &mut Vec<ContactEffect>,
) -> TransferOutcome {
    // Передаём направление, не величину
    let direction = remaining.try_normalize().unwrap_or(travel_direction);

    if Vec3::new(direction.x, 0.0, direction.z).length() < SUPPORT_EPSILON {
        body.motion.vertical_velocity = 0.0;
        return TransferOutcome::Supported;
    }

    effects.push(ContactEffect::Knock {
        source: body.collider,
        target: hit.collider,
        direction,
    });

    if let ContactTarget::Bomb(other) = target {
        if let Some(offset) = separation_offset(body.position, body.tuning.radius, other, direction, config) {
            effects.push(ContactEffect::Displace {
                target: hit.collider,
                offset,
            });
        }
    }

    body.motion.stop();

    effects.push(ContactEffect::Impact {
        source: body.collider,
        target: hit.collider,
        point: hit.point,
    });

    TransferOutcome::Knocked
}

/// Смещение бомбы `other`, чтобы она перестала перекрываться с телом в `position`
///
/// `overlap = r1 + r2 - |B - A|`; сдвиг вдоль горизонтального направления движения,
/// делённый на cos угла между ним и линией центров (скользящий контакт требует
/// большего сдвига). Cos ограничен снизу `separation_epsilon`.
///
/// `None` - тела не перекрываются.
pub fn separation_offset(
    position: Vec3,
    radius: f32,
    other: SphereInfo,
    direction: Vec3,
    config: &BombPhysicsConfig,
) -> Option<Vec3> {
    let separation = other.center - position;
    let distance = separation.length();
    let overlap = radius + other.radius - distance;
    if overlap <= 0.0 {
        return None;
    }

    // Толкаем в плоскости XZ: вниз в пол толкать нельзя.
    // Без XZ у движения - от тела по линии центров; строго друг над другом - некуда
    let push = Vec3::new(direction.x, 0.0, direction.z)
        .try_normalize()
        .or_else(|| Vec3::new(separation.x, 0.0, separation.z).try_normalize())?;

    let alignment = if distance > f32::EPSILON {
        separation.dot(push).abs() / distance
    } else {
        0.0
    };

    let magnitude = (overlap + config.separation_buffer) / alignment.max(config.separation_epsilon);
    Some(push * magnitude)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{BombMotion, BombTuning};

    fn moving_body(grounded: bool) -> DynamicBody {
        let mut motion = BombMotion::default();
        motion.knock(Vec3::X);
        motion.grounded = grounded;
        DynamicBody::new(Entity::from_raw(1), Vec3::ZERO, motion, BombTuning::default())
    }

    fn hit_at(point: Vec3) -> SweepHit {
        SweepHit {
            collider: Entity::from_raw(2),
            point,
            normal: Vec3::NEG_X,
            distance: 0.0,
        }
    }

    fn other_bomb(center: Vec3) -> ContactTarget {
        ContactTarget::Bomb(SphereInfo { center, radius: 0.5 })
    }

    #[test]
    fn test_grounded_body_knocks_and_stops() {
        let config = BombPhysicsConfig::default();
        let mut body = moving_body(true);
        let mut effects = Vec::new();

        let outcome = transfer_momentum(
            &mut body,
            &hit_at(Vec3::new(0.5, 0.0, 0.0)),
            other_bomb(Vec3::new(1.2, 0.0, 0.0)),
            Vec3::new(0.05, 0.0, 0.0),
            Vec3::X,
            &config,
            1.0 / 60.0,
            &mut effects,
        );

        assert_eq!(outcome, TransferOutcome::Knocked);
        assert!(!body.motion.is_moving());
        assert_eq!(
            effects[0],
            ContactEffect::Knock { source: Entity::from_raw(1), target: Entity::from_raw(2), direction: Vec3::X }
        );
        // Не перекрываются → без Displace, сразу Impact
        assert_eq!(effects.len(), 2);
        assert!(matches!(effects[1], ContactEffect::Impact { .. }));
    }

    #[test]
    fn test_zero_remaining_falls_back_to_travel_direction() {
        let config = BombPhysicsConfig::default();
        let mut body = moving_body(true);
        let mut effects = Vec::new();

        transfer_momentum(
            &mut body,
            &hit_at(Vec3::new(0.0, 0.0, 0.5)),
            ContactTarget::Actor(SphereInfo { center: Vec3::new(0.0, 0.0, 1.0), radius: 0.5 }),
            Vec3::ZERO,
            Vec3::Z,
            &config,
            1.0 / 60.0,
            &mut effects,
        );

        assert!(matches!(effects[0], ContactEffect::Knock { direction, .. } if direction == Vec3::Z));
    }

    #[test]
    fn test_airborne_low_contact_bounces() {
        let config = BombPhysicsConfig::default();
        let mut body = moving_body(false);
        body.motion.vertical_velocity = -1.0;
        let mut effects = Vec::new();

        let outcome = transfer_momentum(
            &mut body,
            &hit_at(Vec3::new(0.6, 0.1, 0.0)),
            ContactTarget::Actor(SphereInfo { center: Vec3::new(1.0, 0.0, 0.0), radius: 0.5 }),
            Vec3::new(0.05, 0.0, 0.0),
            Vec3::X,
            &config,
            0.02,
            &mut effects,
        );

        assert_eq!(
            outcome,
            TransferOutcome::BounceOver { remaining: Vec3::new(0.05, config.bounce_velocity * 0.02, 0.0) }
        );
        assert_eq!(body.motion.vertical_velocity, config.bounce_velocity);
        assert!(body.motion.is_moving());
        assert!(effects.is_empty());
    }

    #[test]
    fn test_airborne_high_contact_knocks() {
        let config = BombPhysicsConfig::default();
        let mut body = moving_body(false);
        let mut effects = Vec::new();

        // Контакт выше bounce_height относительно центра цели
        let outcome = transfer_momentum(
            &mut body,
            &hit_at(Vec3::new(0.8, 0.45, 0.0)),
            other_bomb(Vec3::new(1.0, 0.0, 0.0)),
            Vec3::X * 0.05,
            Vec3::X,
            &config,
            0.02,
            &mut effects,
        );

        assert_eq!(outcome, TransferOutcome::Knocked);
    }

    #[test]
    fn test_separation_head_on() {
        let config = BombPhysicsConfig::default();
        let other = SphereInfo { center: Vec3::new(0.8, 0.0, 0.0), radius: 0.5 };

        let offset = separation_offset(Vec3::ZERO, 0.5, other, Vec3::X, &config).expect("overlapping");
        let separated = other.center + offset;
        assert!(separated.distance(Vec3::ZERO) >= 1.0);
        assert!((offset.x - (0.2 + config.separation_buffer)).abs() < 1e-5);
    }

    #[test]
    fn test_separation_glancing_needs_larger_offset() {
        let config = BombPhysicsConfig::default();
        let other = SphereInfo { center: Vec3::new(0.6, 0.0, 0.5), radius: 0.5 };

        let offset = separation_offset(Vec3::ZERO, 0.5, other, Vec3::X, &config).expect("overlapping");
        let overlap = 1.0 - other.center.length();
        let separated = other.center + offset;

        assert!(offset.length() > overlap);
        assert!(separated.distance(Vec3::ZERO) >= 1.0, "distance = {}", separated.distance(Vec3::ZERO));
    }

    #[test]
    fn test_separation_none_when_apart() {
        let config = BombPhysicsConfig::default();
        let other = SphereInfo { center: Vec3::new(1.2, 0.0, 0.0), radius: 0.5 };
        assert!(separation_offset(Vec3::ZERO, 0.5, other, Vec3::X, &config).is_none());
    }

    #[test]
    fn test_separation_perpendicular_is_bounded_by_epsilon() {
        let config = BombPhysicsConfig::default();
        // Линия центров перпендикулярна направлению движения
        let other = SphereInfo { center: Vec3::new(0.0, 0.0, 0.9), radius: 0.5 };

        let offset = separation_offset(Vec3::ZERO, 0.5, other, Vec3::X, &config).expect("overlapping");
        let expected = (0.1 + config.separation_buffer) / config.separation_epsilon;
        assert!((offset.length() - expected).abs() < 1e-4);
        assert!(offset.length().is_finite());
    }

    #[test]
    fn test_vertical_contact_supports_without_effects() {
        let config = BombPhysicsConfig::default();
        let mut body = DynamicBody::new(
            Entity::from_raw(1),
            Vec3::new(0.0, 1.0, 0.0),
            BombMotion::default(),
            BombTuning::default(),
        );
        body.motion.vertical_velocity = -6.0;
        let mut effects = Vec::new();

        // Падение сверху на бомбу: remaining съеден depenetration'ом, sweep шёл вниз
        let outcome = transfer_momentum(
            &mut body,
            &SweepHit {
                collider: Entity::from_raw(2),
                point: Vec3::new(0.0, 0.5, 0.0),
                normal: Vec3::Y,
                distance: 0.0,
            },
            other_bomb(Vec3::ZERO),
            Vec3::ZERO,
            Vec3::NEG_Y,
            &config,
            1.0 / 60.0,
            &mut effects,
        );

        assert_eq!(outcome, TransferOutcome::Supported);
        assert_eq!(body.motion.vertical_velocity, 0.0);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_separation_vertical_direction_pushes_along_centers() {
        let config = BombPhysicsConfig::default();
        let other = SphereInfo { center: Vec3::new(0.3, -0.8, 0.0), radius: 0.5 };

        let offset = separation_offset(Vec3::ZERO, 0.5, other, Vec3::NEG_Y, &config).expect("overlapping");
        assert_eq!(offset.y, 0.0);
        assert!(offset.x > 0.0);
        assert_eq!(offset.z, 0.0);
    }

    #[test]
    fn test_separation_stacked_bodies_have_no_push() {
        let config = BombPhysicsConfig::default();
        let other = SphereInfo { center: Vec3::new(0.0, -0.9, 0.0), radius: 0.5 };
        assert!(separation_offset(Vec3::ZERO, 0.5, other, Vec3::NEG_Y, &config).is_none());
    }
}
