//! DynamicBody - рабочая копия бомбы на время её resolution pass
//!
//! System копирует Transform + BombMotion + BombTuning в DynamicBody,
//! прогоняет step_body и пишет результат обратно. Так pure-функции
//! physics не зависят от ECS и тестируются без App.

use bevy::prelude::*;

use crate::components::{BombMotion, BombTuning};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DynamicBody {
    /// Собственный коллайдер (исключается из sweep)
    pub collider: Entity,
    pub position: Vec3,
    pub motion: BombMotion,
    pub tuning: BombTuning,
}

impl DynamicBody {
    pub fn new(collider: Entity, position: Vec3, motion: BombMotion, tuning: BombTuning) -> Self {
        Self {
            collider,
            position,
            motion,
            tuning,
        }
    }

    /// Коллайдеры, которые sweep этого тела не видит: сам + ignored
    pub fn exclusions(&self) -> Vec<Entity> {
        let mut excluded = vec![self.collider];
        if let Some(ignored) = self.motion.ignored_collider() {
            excluded.push(ignored);
        }
        excluded
    }

    /// Текущая скорость (горизонталь + vertical_velocity)
    pub fn velocity(&self) -> Vec3 {
        self.motion.horizontal_direction * self.tuning.move_speed
            + Vec3::Y * self.motion.vertical_velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exclusions_include_ignored() {
        let mut motion = BombMotion::default();
        let body = DynamicBody::new(Entity::from_raw(1), Vec3::ZERO, motion, BombTuning::default());
        assert_eq!(body.exclusions(), vec![Entity::from_raw(1)]);

        motion.set_ignored_collider(Entity::from_raw(2), 1.0);
        let body = DynamicBody::new(Entity::from_raw(1), Vec3::ZERO, motion, BombTuning::default());
        assert_eq!(body.exclusions(), vec![Entity::from_raw(1), Entity::from_raw(2)]);
    }

    #[test]
    fn test_velocity() {
        let mut motion = BombMotion::default();
        motion.knock(Vec3::X);
        motion.vertical_velocity = -2.0;

        let body = DynamicBody::new(Entity::from_raw(1), Vec3::ZERO, motion, BombTuning::default());
        assert_eq!(body.velocity(), Vec3::new(5.0, -2.0, 0.0));
    }
}
