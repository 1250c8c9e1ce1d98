//! Vertical Integrator + горизонтальный вклад Direction Accumulator
//!
//! Оба возвращают смещение за тик; сумма = desired displacement для resolve().

use bevy::prelude::*;

use crate::components::{BombMotion, BombTuning};

/// Гравитация (airborne) или сброс vertical_velocity (grounded)
///
/// Возвращает вертикальное смещение за тик.
pub fn integrate_vertical(motion: &mut BombMotion, tuning: &BombTuning, delta: f32) -> Vec3 {
    if motion.grounded {
        motion.vertical_velocity = 0.0;
    } else {
        motion.vertical_velocity -= tuning.gravity * delta;
    }

    Vec3::Y * motion.vertical_velocity * delta
}

/// Горизонтальное смещение за тик
///
/// На земле направление проецируется на плоскость пола (склоны),
/// длина сохраняется: `move_speed * delta`.
pub fn horizontal_delta(motion: &BombMotion, tuning: &BombTuning, delta: f32) -> Vec3 {
    if !motion.is_moving() {
        return Vec3::ZERO;
    }

    let direction = if motion.grounded {
        project_on_plane(motion.horizontal_direction, motion.ground_normal).normalize_or_zero()
    } else {
        motion.horizontal_direction
    };

    direction * tuning.move_speed * delta
}

/// Проекция вектора на плоскость с нормалью `normal` (unit)
pub fn project_on_plane(vector: Vec3, normal: Vec3) -> Vec3 {
    vector - normal * vector.dot(normal)
}
