//! DynamicSpheres - зеркало движущихся тел (бомбы, акторы) для scene queries
//!
//! Оба backend'а спрашивают про бомбы и акторов только здесь:
//! позиция обновляется сразу после resolution pass тела, поэтому
//! следующая бомба в том же тике видит её уже на новом месте.
//! Rapier отвечает только за статическую геометрию.

use bevy::prelude::*;

use super::query::{DynamicSphere, SweepHit};

#[derive(Resource, Debug, Default, Clone)]
pub struct DynamicSpheres {
    spheres: Vec<DynamicSphere>,
}

impl DynamicSpheres {
    /// Заменить весь набор (начало тика)
    pub fn sync(&mut self, spheres: &[DynamicSphere]) {
        self.spheres.clear();
        self.spheres.extend_from_slice(spheres);
    }

    pub fn upsert(&mut self, sphere: DynamicSphere) {
        match self.spheres.iter_mut().find(|existing| existing.id == sphere.id) {
            Some(existing) => *existing = sphere,
            None => self.spheres.push(sphere),
        }
    }

    pub fn move_to(&mut self, id: Entity, center: Vec3) {
        if let Some(sphere) = self.spheres.iter_mut().find(|sphere| sphere.id == id) {
            sphere.center = center;
        }
    }

    pub fn get(&self, id: Entity) -> Option<&DynamicSphere> {
        self.spheres.iter().find(|sphere| sphere.id == id)
    }

    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }

    fn candidates<'a>(&'a self, mask: u32, exclude: &'a [Entity]) -> impl Iterator<Item = &'a DynamicSphere> {
        self.spheres
            .iter()
            .filter(move |s| s.layer & mask != 0 && !exclude.contains(&s.id))
    }

    /// Sweep против всех сфер из `mask`, hits дописываются в `hits`
    #[allow(clippy::too_many_arguments)]
    pub fn sweep(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        mask: u32,
        exclude: &[Entity],
        hits: &mut Vec<SweepHit>,
    ) {
        for sphere in self.candidates(mask, exclude) {
            if let Some((distance, point, normal)) =
                sweep_ball(origin, radius, direction, max_distance, sphere.center, sphere.radius)
            {
                hits.push(SweepHit {
                    collider: sphere.id,
                    point,
                    normal,
                    distance,
                });
            }
        }
    }

    pub fn overlap(&self, center: Vec3, radius: f32, mask: u32, exclude: &[Entity], found: &mut Vec<Entity>) {
        found.extend(
            self.candidates(mask, exclude)
                .filter(|sphere| center.distance(sphere.center) < radius + sphere.radius)
                .map(|sphere| sphere.id),
        );
    }
}

/// Sweep сферы против сферы (ray vs сфера радиуса r1 + r2)
///
/// Возвращает (distance, point, normal).
pub(super) fn sweep_ball(
    origin: Vec3,
    radius: f32,
    direction: Vec3,
    max_distance: f32,
    center: Vec3,
    ball_radius: f32,
) -> Option<(f32, Vec3, Vec3)> {
    let combined = radius + ball_radius;
    let offset = origin - center;
    let along = offset.dot(direction);
    let c = offset.length_squared() - combined * combined;

    let distance = if c <= 0.0 {
        // Уже касаемся/пересекаемся: контакт только если движемся к центру
        if along >= 0.0 {
            return None;
        }
        0.0
    } else {
        if along > 0.0 {
            return None;
        }
        let discriminant = along * along - c;
        if discriminant < 0.0 {
            return None;
        }
        -along - discriminant.sqrt()
    };

    if distance > max_distance {
        return None;
    }

    let impact_center = origin + direction * distance;
    let normal = (impact_center - center).try_normalize().unwrap_or(-direction);
    let point = center + normal * ball_radius;
    Some((distance, point, normal))
}
