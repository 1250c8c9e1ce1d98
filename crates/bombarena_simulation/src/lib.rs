//! BOMBARENA Simulation Core
//!
//! ECS-симуляция бомб на арене (Bevy 0.16, fixed timestep):
//! swept-sphere движение, grounding, скольжение по стенам,
//! bounce-over и knock transfer между бомбами и игроками.
//!
//! Геометрия сцены - через Geometry Query Port (`collision::GeometryQuery`):
//! - ArenaScene resource - аналитическая сцена (headless, тесты)
//! - Rapier context - если ArenaScene нет (статика из Rapier, бомбы из DynamicSpheres)

use bevy::prelude::*;
use bevy_rapier3d::prelude::{NoUserData, RapierPhysicsPlugin};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod actor;
pub mod collision;
pub mod components;
pub mod config;
pub mod detonation;
pub mod logger;
pub mod physics;

// Re-export базовых компонентов для удобства
pub use actor::{ActorPlugin, BombDropped, BombKicked, DropBombIntent};
pub use collision::{ArenaScene, GeometryQuery, StaticShape};
pub use components::*;
pub use config::BombPhysicsConfig;
pub use detonation::{ActorDamaged, BombDetonated, DamageRequest, DetonationPlugin, Explosion};
pub use physics::{
    actor_bundle, bomb_bundle, environment_bundle, spawn_bomb, spawn_environment, spawn_knockable_actor,
    ActorKnocked, BombImpact, BombKnocked, BombPhysicsPlugin,
};

// Re-export logger
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, LogLevel};

/// Фазы тика арены (FixedUpdate), выполняются строго по порядку
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArenaSet {
    /// Статическая геометрия → ArenaScene
    Environment,
    /// Fuse, DamageRequest → Detonated
    Lifecycle,
    /// Resolution pass всех бомб
    Physics,
    /// Взрывы, цепные реакции
    Detonation,
    /// Drop / kick (новые бомбы двигаются со следующего тика)
    Actors,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct BombArenaPlugin;

impl Plugin for BombArenaPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BombPhysicsConfig>();

        // Fixed timestep из конфига (default 60Hz)
        let fixed_time = app.world().resource::<BombPhysicsConfig>().fixed_time();

        app.insert_resource(fixed_time)
            .configure_sets(
                FixedUpdate,
                (
                    ArenaSet::Environment,
                    ArenaSet::Lifecycle,
                    ArenaSet::Physics,
                    ArenaSet::Detonation,
                    ArenaSet::Actors,
                )
                    .chain(),
            )
            // Подсистемы
            .add_plugins((BombPhysicsPlugin, DetonationPlugin, ActorPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Аналитическая сцена (ArenaScene) + дефолтный конфиг.
pub fn create_headless_app(seed: u64) -> App {
    create_headless_app_with_config(seed, BombPhysicsConfig::default())
}

/// То же, но с заданным конфигом (например, из JSON)
pub fn create_headless_app_with_config(seed: u64, config: BombPhysicsConfig) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(config)
        .init_resource::<ArenaScene>()
        .add_plugins(BombArenaPlugin);

    app
}

/// Headless App с Rapier backend вместо ArenaScene
///
/// Startup уже прогнан (default Rapier context создан). Статику, заспавненную
/// после этого, Rapier подхватывает на следующем `app.update()` (PostUpdate).
pub fn create_rapier_app_with_config(seed: u64, config: BombPhysicsConfig) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins((MinimalPlugins, bevy::transform::TransformPlugin))
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(config)
        .add_plugins(BombArenaPlugin);

    app.update();
    app
}

/// Прогнать `ticks` fixed тиков напрямую (без привязки к wall clock)
pub fn run_fixed_ticks(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        app.world_mut().run_schedule(FixedUpdate);
    }
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    // Собираем все компоненты в детерминированный формат
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
