//! Статическая геометрия арены: EnvironmentCollider

use bevy::prelude::*;

use crate::collision::StaticShape;

/// Статический коллайдер (пол, стена, столб)
///
/// При появлении регистрируется в ArenaScene (если она есть),
/// при удалении - убирается оттуда. Для Rapier backend spawn helper
/// дополнительно вешает Collider.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct EnvironmentCollider {
    pub shape: StaticShape,
}

impl EnvironmentCollider {
    pub fn new(shape: StaticShape) -> Self {
        Self { shape }
    }

    pub fn ground(height: f32) -> Self {
        Self::new(StaticShape::ground(height))
    }

    /// Стена: плоскость через `point`, `normal` смотрит внутрь арены
    pub fn wall(point: Vec3, normal: Vec3) -> Self {
        Self::new(StaticShape::plane_through(point, normal))
    }

    pub fn pillar(center: Vec3, radius: f32) -> Self {
        Self::new(StaticShape::Sphere { center, radius })
    }
}

impl From<StaticShape> for EnvironmentCollider {
    fn from(shape: StaticShape) -> Self {
        Self::new(shape)
    }
}
