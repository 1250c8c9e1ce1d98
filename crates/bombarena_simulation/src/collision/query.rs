//! Geometry Query Port - то, что resolution loop спрашивает у сцены
//!
//! Сам broad-phase НЕ наша ответственность: реализации живут в адаптерах
//! (`ArenaScene` для headless/тестов, `RapierGeometry` для Rapier).
//! Все запросы синхронные и возвращаются в том же тике.

use bevy::prelude::*;

/// Результат sweep: с чем столкнулись, где, нормаль поверхности, дистанция вдоль направления
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepHit {
    /// Collider id (entity коллайдера)
    pub collider: Entity,
    /// Точка контакта на поверхности препятствия (world space)
    pub point: Vec3,
    /// Нормаль поверхности препятствия (смотрит на движущуюся сферу)
    pub normal: Vec3,
    /// Сколько сфера прошла вдоль direction до контакта
    pub distance: f32,
}

/// Динамическая сфера, которую адаптер сцены должен видеть в этом тике
/// (бомбы и акторы двигаются - статическая геометрия нет)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DynamicSphere {
    pub id: Entity,
    pub center: Vec3,
    pub radius: f32,
    pub layer: u32,
}

/// Geometry Query Port
///
/// Порядок hits в `sweep_sphere` НЕ гарантирован - сортирует caller (`sort_hits`).
pub trait GeometryQuery {
    /// Sweep сферы из `origin` вдоль `direction` (unit) на `max_distance`
    fn sweep_sphere(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        mask: u32,
        exclude: &[Entity],
    ) -> Vec<SweepHit>;

    /// Все коллайдеры, пересекающие сферу в точке `center`
    fn overlap_sphere(&self, center: Vec3, radius: f32, mask: u32, exclude: &[Entity]) -> Vec<Entity>;

    /// Sweep вниз (-Y), ближайший hit
    fn sweep_down(
        &self,
        origin: Vec3,
        radius: f32,
        max_distance: f32,
        mask: u32,
        exclude: &[Entity],
    ) -> Option<SweepHit> {
        self.sweep_sphere(origin, radius, Vec3::NEG_Y, max_distance, mask, exclude)
            .into_iter()
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    /// Заменить набор динамических сфер (вызывается в начале тика)
    ///
    /// Адаптеры, которые сами синхронизируют трансформы (Rapier), игнорируют.
    fn sync_dynamic_spheres(&mut self, _spheres: &[DynamicSphere]) {}

    /// Сдвинуть одну динамическую сферу после её resolution pass
    fn move_dynamic_sphere(&mut self, _id: Entity, _center: Vec3) {}
}

/// Сортировка hits по возрастанию дистанции
///
/// Tie-break по entity index - чтобы порядок был детерминированным.
pub fn sort_hits(hits: &mut [SweepHit]) {
    hits.sort_by(|a, b| {
        a.distance
            .total_cmp(&b.distance)
            .then_with(|| a.collider.index().cmp(&b.collider.index()))
    });
}
