//! ColliderRegistry - capability table: collider id → что это за тело
//!
//! Вместо runtime type probing ("есть ли у коллайдера Knockable?")
//! resolution loop делает ОДИН lookup на hit и получает tagged union.
//! Всё, чего нет в таблице, - Environment (статическая геометрия).
//!
//! Таблица строится заново в начале каждого тика из ECS queries и
//! обновляется после каждого resolution pass (позиции сфер).

use std::collections::HashMap;

use bevy::prelude::*;

use super::layers::{COLLISION_LAYER_DYNAMIC, COLLISION_LAYER_KNOCKABLE};
use super::query::DynamicSphere;

/// Сфера другого тела (центр на момент lookup + радиус)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereInfo {
    pub center: Vec3,
    pub radius: f32,
}

/// Во что попал sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactTarget {
    /// Стены, пол, препятствия - скользим вдоль поверхности
    Environment,
    /// Другая бомба - Knock + separation
    Bomb(SphereInfo),
    /// Knockable actor (player) - Knock, без separation
    Actor(SphereInfo),
}

impl ContactTarget {
    pub fn is_knockable(&self) -> bool {
        !matches!(self, ContactTarget::Environment)
    }

    pub fn sphere(&self) -> Option<SphereInfo> {
        match self {
            ContactTarget::Environment => None,
            ContactTarget::Bomb(sphere) | ContactTarget::Actor(sphere) => Some(*sphere),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct ColliderRegistry {
    entries: HashMap<Entity, ContactTarget>,
}

impl ColliderRegistry {
    pub fn register_bomb(&mut self, id: Entity, center: Vec3, radius: f32) {
        self.entries
            .insert(id, ContactTarget::Bomb(SphereInfo { center, radius }));
    }

    pub fn register_actor(&mut self, id: Entity, center: Vec3, radius: f32) {
        self.entries
            .insert(id, ContactTarget::Actor(SphereInfo { center, radius }));
    }

    pub fn lookup(&self, id: Entity) -> ContactTarget {
        self.entries
            .get(&id)
            .copied()
            .unwrap_or(ContactTarget::Environment)
    }

    /// Обновить центр сферы (после resolution pass или separation)
    pub fn move_to(&mut self, id: Entity, center: Vec3) {
        match self.entries.get_mut(&id) {
            Some(ContactTarget::Bomb(sphere)) | Some(ContactTarget::Actor(sphere)) => {
                sphere.center = center;
            }
            _ => {}
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Все зарегистрированные сферы для адаптера сцены
    ///
    /// Отсортировано по entity index (HashMap порядок не детерминирован).
    pub fn dynamic_spheres(&self) -> Vec<DynamicSphere> {
        let mut spheres: Vec<DynamicSphere> = self
            .entries
            .iter()
            .filter_map(|(id, target)| match target {
                ContactTarget::Bomb(sphere) => Some(DynamicSphere {
                    id: *id,
                    center: sphere.center,
                    radius: sphere.radius,
                    layer: COLLISION_LAYER_DYNAMIC,
                }),
                ContactTarget::Actor(sphere) => Some(DynamicSphere {
                    id: *id,
                    center: sphere.center,
                    radius: sphere.radius,
                    layer: COLLISION_LAYER_KNOCKABLE,
                }),
                ContactTarget::Environment => None,
            })
            .collect();

        spheres.sort_by_key(|sphere| sphere.id.index());
        spheres
    }
}
