//! Property-based тесты детерминизма
//!
//! Арена с россыпью бомб: одинаковый seed → идентичные Transform и BombMotion

use bevy::prelude::*;
use bombarena_simulation::*;
use rand::Rng;

const BOMB_COUNT: usize = 24;
const TICK_COUNT: usize = 300;

fn spawn_random_bombs(app: &mut App, config: &BombPhysicsConfig) {
    let rest_height = config.bomb_radius + config.skin_width;
    let bombs: Vec<(Vec3, Vec3)> = {
        let mut rng = app.world_mut().resource_mut::<DeterministicRng>();
        (0..BOMB_COUNT)
            .map(|_| {
                let position = Vec3::new(
                    rng.rng.gen_range(-5.0..5.0),
                    rest_height + rng.rng.gen_range(0.0..1.5),
                    rng.rng.gen_range(-5.0..5.0),
                );
                let knock = Vec3::new(rng.rng.gen_range(-1.0..1.0), 0.0, rng.rng.gen_range(-1.0..1.0));
                (position, knock)
            })
            .collect()
    };

    for (position, knock) in bombs {
        let bomb = app.world_mut().spawn(bomb_bundle(position, config)).id();
        if let Some(mut motion) = app.world_mut().get_mut::<BombMotion>(bomb) {
            motion.knock(knock);
        }
    }
}

/// Запускает симуляцию и возвращает snapshot мира
fn run_simulation(seed: u64) -> (Vec<u8>, Vec<u8>) {
    // Длинный fuse: проверяем именно resolution
    let config = BombPhysicsConfig {
        fuse_seconds: 100.0,
        ..Default::default()
    };
    let mut app = create_headless_app_with_config(seed, config.clone());

    app.world_mut().spawn(environment_bundle(StaticShape::ground(0.0)));
    for normal in [Vec3::X, Vec3::NEG_X, Vec3::Z, Vec3::NEG_Z] {
        app.world_mut()
            .spawn(environment_bundle(StaticShape::plane_through(-normal * 6.0, normal)));
    }
    app.world_mut().spawn(environment_bundle(StaticShape::Sphere {
        center: Vec3::new(0.0, 0.5, 0.0),
        radius: 0.8,
    }));

    spawn_random_bombs(&mut app, &config);
    run_fixed_ticks(&mut app, TICK_COUNT);

    let world = app.world_mut();
    (world_snapshot::<Transform>(world), world_snapshot::<BombMotion>(world))
}

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;

    let first = run_simulation(SEED);
    let second = run_simulation(SEED);

    assert_eq!(
        first, second,
        "Симуляция с одинаковым seed ({}) дала разные результаты!",
        SEED
    );
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;

    // Запускаем 3 раза - все должны быть идентичны
    let snapshots: Vec<_> = (0..3).map(|_| run_simulation(SEED)).collect();

    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(snapshots[0], *snapshot, "Прогон {} дал результат отличный от прогона 0", i);
    }
}

#[test]
fn test_different_seeds_diverge() {
    assert_ne!(run_simulation(1).0, run_simulation(2).0);
}
