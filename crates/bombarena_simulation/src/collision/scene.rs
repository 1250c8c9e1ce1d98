//! SceneGeometry - SystemParam, выбирающий backend для Geometry Query Port
//!
//! - `ArenaScene` resource есть → аналитическая сцена (headless, тесты)
//! - иначе → Rapier context (нужен RapierPhysicsPlugin) для статики
//!   + `DynamicSpheres` resource для бомб и акторов
//!
//! Systems не знают, какой backend активен: работают через `&mut dyn GeometryQuery`.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::arena::ArenaScene;
use super::dynamics::DynamicSpheres;
use super::query::{DynamicSphere, GeometryQuery};
use super::rapier::RapierGeometry;

#[derive(SystemParam)]
pub struct SceneGeometry<'w, 's> {
    arena: Option<ResMut<'w, ArenaScene>>,
    dynamics: ResMut<'w, DynamicSpheres>,
    rapier: ReadRapierContext<'w, 's>,
}

impl SceneGeometry<'_, '_> {
    /// Выполнить запрос к активному backend
    ///
    /// `None` - нет ни ArenaScene, ни Rapier context (App собран без геометрии).
    pub fn with<R>(&mut self, query: impl FnOnce(&mut dyn GeometryQuery) -> R) -> Option<R> {
        if let Some(arena) = self.arena.as_deref_mut() {
            return Some(query(arena));
        }

        let Ok(context) = self.rapier.single() else {
            return None;
        };
        let mut geometry = RapierGeometry::new(&context, &mut self.dynamics);
        Some(query(&mut geometry))
    }

    pub fn sync_dynamic_spheres(&mut self, spheres: &[DynamicSphere]) {
        match self.arena.as_deref_mut() {
            Some(arena) => arena.sync_dynamic_spheres(spheres),
            None => self.dynamics.sync(spheres),
        }
    }

    pub fn move_dynamic_sphere(&mut self, id: Entity, center: Vec3) {
        match self.arena.as_deref_mut() {
            Some(arena) => arena.move_dynamic_sphere(id, center),
            None => self.dynamics.move_to(id, center),
        }
    }
}
