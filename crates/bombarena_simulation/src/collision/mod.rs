//! Collision domain - всё, что resolution loop знает о сцене
//!
//! Содержит:
//! - layers: битовые маски слоёв (+ Rapier CollisionGroups)
//! - query: Geometry Query Port (trait GeometryQuery, SweepHit)
//! - arena: аналитическая сцена (planes + spheres)
//! - dynamics: зеркало бомб и акторов (общее для обоих backend'ов)
//! - rapier: adapter над RapierContext
//! - registry: capability table collider → ContactTarget
//! - scene: SceneGeometry SystemParam (выбор backend)

pub mod arena;
pub mod dynamics;
pub mod layers;
pub mod query;
pub mod rapier;
pub mod registry;
pub mod scene;

// Re-exports для удобного импорта
pub use arena::{ArenaScene, StaticShape};
pub use dynamics::DynamicSpheres;
pub use layers::*;
pub use query::{sort_hits, DynamicSphere, GeometryQuery, SweepHit};
pub use rapier::RapierGeometry;
pub use registry::{ColliderRegistry, ContactTarget, SphereInfo};
pub use scene::SceneGeometry;
