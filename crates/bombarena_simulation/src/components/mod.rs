//! ECS Components для entity арены
//!
//! Организация по доменам:
//! - bomb: dynamic body (Bomb, BombMotion, BombTuning, Fuse, BombOwner, Detonated)
//! - actor: игроки (KnockableActor, BombCarrier)
//! - world: статическая геометрия (EnvironmentCollider)

pub mod actor;
pub mod bomb;
pub mod world;

// Re-exports для удобного импорта
pub use actor::*;
pub use bomb::*;
pub use world::*;
