//! ArenaScene - аналитическая сцена для headless симуляции и тестов
//!
//! Поддерживает только то, что нужно арене:
//! - Plane (пол, стены): бесконечная плоскость `normal · x = offset`
//! - Sphere (статические препятствия)
//! - Dynamic spheres (бомбы, акторы) - зеркалируются из ECS каждый тик
//!
//! Sweep сфера-vs-плоскость и сфера-vs-сфера считается в closed form,
//! без broad-phase (арены маленькие, десятки коллайдеров).

use bevy::prelude::*;

use super::dynamics::{sweep_ball, DynamicSpheres};
use super::layers::COLLISION_LAYER_ENVIRONMENT;
use super::query::{DynamicSphere, GeometryQuery, SweepHit};

/// Порог "движемся параллельно плоскости"
const PARALLEL_EPSILON: f32 = 1e-6;

/// Форма статического коллайдера
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StaticShape {
    /// Плоскость: `normal · x = offset`, normal смотрит в "свободную" сторону
    Plane { normal: Vec3, offset: f32 },
    /// Неподвижная сфера
    Sphere { center: Vec3, radius: f32 },
}

impl StaticShape {
    /// Горизонтальный пол на высоте `height`
    pub fn ground(height: f32) -> Self {
        Self::Plane {
            normal: Vec3::Y,
            offset: height,
        }
    }

    /// Плоскость через точку `point` с нормалью `normal`
    pub fn plane_through(point: Vec3, normal: Vec3) -> Self {
        let normal = normal.normalize_or_zero();
        Self::Plane {
            normal,
            offset: normal.dot(point),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct StaticCollider {
    id: Entity,
    shape: StaticShape,
}

/// Аналитическая сцена (resource)
///
/// Если resource присутствует - `SceneGeometry` использует его вместо Rapier.
#[derive(Resource, Debug, Default, Clone)]
pub struct ArenaScene {
    statics: Vec<StaticCollider>,
    dynamics: DynamicSpheres,
}

impl ArenaScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Добавить (или заменить) статический коллайдер
    pub fn add_static(&mut self, id: Entity, shape: StaticShape) {
        let shape = match shape {
            StaticShape::Plane { normal, offset } => {
                // Храним unit normal: иначе offset и distance не в метрах
                let length = normal.length();
                if length <= f32::EPSILON {
                    crate::log_warning(&format!("ArenaScene: plane {:?} has zero normal, skipped", id));
                    return;
                }
                StaticShape::Plane {
                    normal: normal / length,
                    offset: offset / length,
                }
            }
            sphere => sphere,
        };

        self.remove_static(id);
        self.statics.push(StaticCollider { id, shape });
    }

    pub fn remove_static(&mut self, id: Entity) {
        self.statics.retain(|collider| collider.id != id);
    }

    /// Добавить или обновить динамическую сферу
    pub fn upsert_dynamic(&mut self, sphere: DynamicSphere) {
        self.dynamics.upsert(sphere);
    }

    pub fn static_count(&self) -> usize {
        self.statics.len()
    }

    pub fn dynamic_count(&self) -> usize {
        self.dynamics.len()
    }

    pub fn dynamic_sphere(&self, id: Entity) -> Option<&DynamicSphere> {
        self.dynamics.get(id)
    }
}

impl GeometryQuery for ArenaScene {
    fn sweep_sphere(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        mask: u32,
        exclude: &[Entity],
    ) -> Vec<SweepHit> {
        let mut hits = Vec::new();

        if mask & COLLISION_LAYER_ENVIRONMENT != 0 {
            for collider in self.statics.iter().filter(|c| !exclude.contains(&c.id)) {
                let contact = match collider.shape {
                    StaticShape::Plane { normal, offset } => {
                        sweep_plane(origin, radius, direction, max_distance, normal, offset)
                    }
                    StaticShape::Sphere { center, radius: ball } => {
                        sweep_ball(origin, radius, direction, max_distance, center, ball)
                    }
                };

                if let Some((distance, point, normal)) = contact {
                    hits.push(SweepHit {
                        collider: collider.id,
                        point,
                        normal,
                        distance,
                    });
                }
            }
        }

        self.dynamics
            .sweep(origin, radius, direction, max_distance, mask, exclude, &mut hits);

        hits
    }

    fn overlap_sphere(&self, center: Vec3, radius: f32, mask: u32, exclude: &[Entity]) -> Vec<Entity> {
        let mut found = Vec::new();

        if mask & COLLISION_LAYER_ENVIRONMENT != 0 {
            for collider in self.statics.iter().filter(|c| !exclude.contains(&c.id)) {
                let overlaps = match collider.shape {
                    StaticShape::Plane { normal, offset } => normal.dot(center) - offset < radius,
                    StaticShape::Sphere { center: ball_center, radius: ball } => {
                        center.distance(ball_center) < radius + ball
                    }
                };
                if overlaps {
                    found.push(collider.id);
                }
            }
        }

        self.dynamics.overlap(center, radius, mask, exclude, &mut found);

        found
    }

    fn sync_dynamic_spheres(&mut self, spheres: &[DynamicSphere]) {
        self.dynamics.sync(spheres);
    }

    fn move_dynamic_sphere(&mut self, id: Entity, center: Vec3) {
        self.dynamics.move_to(id, center);
    }
}

/// Sweep сферы против плоскости
///
/// Возвращает (distance, point, normal). Если сфера уже пересекает плоскость
/// и движется глубже - контакт на distance = 0 (resolution не будет толкать внутрь).
fn sweep_plane(
    origin: Vec3,
    radius: f32,
    direction: Vec3,
    max_distance: f32,
    normal: Vec3,
    offset: f32,
) -> Option<(f32, Vec3, Vec3)> {
    let approach = direction.dot(normal);
    if approach >= -PARALLEL_EPSILON {
        // Движемся параллельно или от плоскости
        return None;
    }

    let separation = normal.dot(origin) - offset - radius;
    let distance = if separation <= 0.0 {
        0.0
    } else {
        separation / -approach
    };

    if distance > max_distance {
        return None;
    }

    let point = origin + direction * distance - normal * radius;
    Some((distance, point, normal))
}
