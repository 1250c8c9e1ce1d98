//! Headless симуляция BOMBARENA
//!
//! Арена: пол, 4 стены, столбы, два игрока и россыпь бомб со случайными knock'ами.
//! Первый аргумент (опционально) - путь к JSON с BombPhysicsConfig.

use bevy::prelude::*;
use rand::Rng;

use bombarena_simulation::{
    actor_bundle, bomb_bundle, create_headless_app_with_config, environment_bundle, log_error, log_info,
    run_fixed_ticks, Bomb, BombCarrier, BombMotion, BombPhysicsConfig, DeterministicRng, DropBombIntent,
    EnvironmentCollider, Explosion,
};

const ARENA_HALF_SIZE: f32 = 8.0;
const BOMB_COUNT: usize = 12;
const TICK_COUNT: usize = 600;
/// Тик, на котором игроки подбирают power-up
const POWER_UP_TICK: usize = 300;

fn load_config() -> BombPhysicsConfig {
    let Some(path) = std::env::args().nth(1) else {
        return BombPhysicsConfig::default();
    };

    let json = match std::fs::read_to_string(&path) {
        Ok(json) => json,
        Err(err) => {
            log_error(&format!("Failed to read config {}: {}", path, err));
            return BombPhysicsConfig::default();
        }
    };

    match BombPhysicsConfig::from_json_str(&json) {
        Ok(config) => config,
        Err(err) => {
            log_error(&format!("Invalid config {}: {}", path, err));
            BombPhysicsConfig::default()
        }
    }
}

fn spawn_arena(world: &mut World, config: &BombPhysicsConfig) {
    world.spawn(environment_bundle(EnvironmentCollider::ground(0.0)));

    for normal in [Vec3::X, Vec3::NEG_X, Vec3::Z, Vec3::NEG_Z] {
        // Нормаль смотрит внутрь арены
        world.spawn(environment_bundle(EnvironmentCollider::wall(-normal * ARENA_HALF_SIZE, normal)));
    }

    for center in [Vec3::new(-3.0, 0.5, -3.0), Vec3::new(3.0, 0.5, 3.0)] {
        world.spawn(environment_bundle(EnvironmentCollider::pillar(center, 0.7)));
    }

    let rest_height = config.bomb_radius + config.skin_width;
    let positions: Vec<(Vec3, Vec3)> = {
        let mut rng = world.resource_mut::<DeterministicRng>();
        (0..BOMB_COUNT)
            .map(|_| {
                let position = Vec3::new(
                    rng.rng.gen_range(-6.0..6.0),
                    rest_height + rng.rng.gen_range(0.0..2.0),
                    rng.rng.gen_range(-6.0..6.0),
                );
                let knock = Vec3::new(rng.rng.gen_range(-1.0..1.0), 0.0, rng.rng.gen_range(-1.0..1.0));
                (position, knock)
            })
            .collect()
    };

    for (position, knock) in positions {
        let bomb = world.spawn(bomb_bundle(position, config)).id();
        if let Some(mut motion) = world.get_mut::<BombMotion>(bomb) {
            motion.knock(knock);
        }
    }
}

fn main() {
    let seed = 42;
    let config = load_config();
    let mut app = create_headless_app_with_config(seed, config.clone());
    log_info(&format!("Starting BOMBARENA headless simulation (seed: {})", seed));

    spawn_arena(app.world_mut(), &config);
    let players = [
        app.world_mut()
            .spawn(actor_bundle(Vec3::new(-5.0, config.actor_foot_offset, 0.0), 0.4))
            .id(),
        app.world_mut()
            .spawn(actor_bundle(Vec3::new(5.0, config.actor_foot_offset, 0.0), 0.4))
            .id(),
    ];

    for tick in 0..TICK_COUNT {
        if tick == POWER_UP_TICK {
            for actor in players {
                if let Some(mut carrier) = app.world_mut().get_mut::<BombCarrier>(actor) {
                    carrier.increase_bomb_power();
                    carrier.increase_max_bombs();
                    log_info(&format!(
                        "Power-up: {:?} power {}, max bombs {}",
                        actor, carrier.bomb_power, carrier.max_bombs
                    ));
                }
            }
        }

        if tick % 90 == 0 {
            for actor in players {
                app.world_mut().send_event(DropBombIntent { actor });
            }
        }

        run_fixed_ticks(&mut app, 1);

        if tick % 60 == 0 {
            let world = app.world_mut();
            let bombs = world.query_filtered::<(), With<Bomb>>().iter(world).count();
            let explosions = world.query::<&Explosion>().iter(world).count();
            log_info(&format!("Tick {}: {} bombs, {} explosions", tick, bombs, explosions));
        }
    }

    log_info("Simulation complete!");
}
