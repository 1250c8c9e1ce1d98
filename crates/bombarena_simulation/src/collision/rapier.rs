//! Rapier adapter для Geometry Query Port
//!
//! Используется когда в App подключен RapierPhysicsPlugin, а `ArenaScene` нет.
//! Rapier `cast_shape` отдаёт только ближайший hit - поэтому sweep повторяем,
//! исключая уже найденные коллайдеры (до `MAX_SWEEP_HITS`).
//!
//! Rapier спрашиваем только про ENVIRONMENT: статика внутри тика не двигается.
//! Бомбы и акторы берём из `DynamicSpheres` - Rapier синхронизирует
//! коллайдеры только в PostUpdate, а resolution двигает тела посреди тика.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::dynamics::DynamicSpheres;
use super::layers::{query_groups, COLLISION_LAYER_ENVIRONMENT};
use super::query::{DynamicSphere, GeometryQuery, SweepHit};

/// Сколько hits собираем за один sweep (стена + пара бомб - реальный максимум)
const MAX_SWEEP_HITS: usize = 8;

/// Порог "движемся параллельно поверхности"
const PARALLEL_EPSILON: f32 = 1e-6;

/// Обёртка над RapierContext + зеркало динамических сфер
pub struct RapierGeometry<'a, 'c> {
    context: &'a RapierContext<'c>,
    dynamics: &'a mut DynamicSpheres,
}

impl<'a, 'c> RapierGeometry<'a, 'c> {
    pub fn new(context: &'a RapierContext<'c>, dynamics: &'a mut DynamicSpheres) -> Self {
        Self { context, dynamics }
    }
}

impl GeometryQuery for RapierGeometry<'_, '_> {
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
        self.dynamics
            .sweep(origin, radius, direction, max_distance, mask, exclude, &mut hits);

        if mask & COLLISION_LAYER_ENVIRONMENT == 0 {
            return hits;
        }

        let shape = Collider::ball(radius);
        let groups = query_groups(COLLISION_LAYER_ENVIRONMENT);
        let mut excluded: Vec<Entity> = exclude.to_vec();

        for _ in 0..MAX_SWEEP_HITS {
            let predicate = |entity: Entity| !excluded.contains(&entity);
            let filter = QueryFilter::new().groups(groups).predicate(&predicate);
            let options = ShapeCastOptions::with_max_time_of_impact(max_distance);

            // direction - unit vector, поэтому time_of_impact == дистанция
            let Some((entity, hit)) =
                self.context
                    .cast_shape(origin, Quat::IDENTITY, direction, &*shape.raw, options, filter)
            else {
                break;
            };

            excluded.push(entity);

            // normal1 - наружная нормаль нашего шара к препятствию; шар не повёрнут,
            // поэтому local == world. Контакт на поверхности шара в момент удара.
            let impact_center = origin + direction * hit.time_of_impact;
            let normal = match hit.details {
                Some(details) => -details.normal1,
                // Penetration без геометрии: нормаль против движения
                None => -direction,
            };

            // Уже касаемся и уходим от поверхности (или скользим вдоль) - не контакт
            if normal.dot(direction) >= -PARALLEL_EPSILON {
                continue;
            }

            hits.push(SweepHit {
                collider: entity,
                point: impact_center - normal * radius,
                normal,
                distance: hit.time_of_impact,
            });
        }

        hits
    }

    fn overlap_sphere(&self, center: Vec3, radius: f32, mask: u32, exclude: &[Entity]) -> Vec<Entity> {
        let mut found = Vec::new();
        self.dynamics.overlap(center, radius, mask, exclude, &mut found);

        if mask & COLLISION_LAYER_ENVIRONMENT != 0 {
            let shape = Collider::ball(radius);
            let predicate = |entity: Entity| !exclude.contains(&entity);
            let filter = QueryFilter::new()
                .groups(query_groups(COLLISION_LAYER_ENVIRONMENT))
                .predicate(&predicate);

            self.context
                .intersect_shape(center, Quat::IDENTITY, &*shape.raw, filter, |entity| {
                    found.push(entity);
                    true // продолжаем поиск
                });
        }

        // Rapier отдаёт в порядке BVH - сортируем для детерминизма
        found.sort_by_key(|entity| entity.index());
        found
    }

    fn sync_dynamic_spheres(&mut self, spheres: &[DynamicSphere]) {
        self.dynamics.sync(spheres);
    }

    fn move_dynamic_sphere(&mut self, id: Entity, center: Vec3) {
        self.dynamics.move_to(id, center);
    }
}
