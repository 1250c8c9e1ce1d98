//! Detonation integration test
//!
//! Fuse → Detonated → Explosion, цепная реакция, урон акторам,
//! возврат слота владельцу.

use bevy::prelude::*;
use bombarena_simulation::*;

fn quiet_config() -> BombPhysicsConfig {
    BombPhysicsConfig {
        fuse_seconds: 100.0,
        ..Default::default()
    }
}

fn arena_app(config: &BombPhysicsConfig) -> App {
    let mut app = create_headless_app_with_config(11, config.clone());
    app.world_mut().spawn(environment_bundle(StaticShape::ground(0.0)));
    app
}

fn spawn_bomb_with_fuse(app: &mut App, position: Vec3, fuse: f32, config: &BombPhysicsConfig) -> Entity {
    app.world_mut()
        .spawn(bomb_bundle(position, config))
        .insert(Fuse::new(fuse))
        .id()
}

fn events<E: Event + Clone>(app: &App) -> Vec<E> {
    app.world()
        .resource::<Events<E>>()
        .iter_current_update_events()
        .cloned()
        .collect()
}

fn explosion_count(app: &mut App) -> usize {
    let world = app.world_mut();
    world.query::<&Explosion>().iter(world).count()
}

#[test]
fn test_fuse_expiry_spawns_explosion() {
    let config = BombPhysicsConfig {
        fuse_seconds: 0.5,
        ..Default::default()
    };
    let mut app = arena_app(&config);
    let y = config.bomb_radius + config.skin_width;
    let bomb = app.world_mut().spawn(bomb_bundle(Vec3::new(1.0, y, 2.0), &config)).id();

    // 0.5 sec @ 60Hz = 30 тиков
    run_fixed_ticks(&mut app, 20);
    assert!(app.world().get_entity(bomb).is_ok());
    assert_eq!(explosion_count(&mut app), 0);

    run_fixed_ticks(&mut app, 12);
    assert!(app.world().get_entity(bomb).is_err(), "bomb should be despawned");
    assert_eq!(explosion_count(&mut app), 1);

    let detonated = events::<BombDetonated>(&app);
    assert_eq!(detonated.len(), 1);
    assert_eq!(detonated[0].bomb, bomb);
    assert!(detonated[0].position.distance(Vec3::new(1.0, y, 2.0)) < 1e-4);

    // Взрыв живёт explosion_duration и исчезает
    run_fixed_ticks(&mut app, 40);
    assert_eq!(explosion_count(&mut app), 0);
}

#[test]
fn test_explosion_chain_reaction() {
    let config = quiet_config();
    let mut app = arena_app(&config);
    let y = config.bomb_radius + config.skin_width;

    let first = spawn_bomb_with_fuse(&mut app, Vec3::new(0.0, y, 0.0), 0.1, &config);
    // В пределах explosion_base_radius + bomb_radius
    let second = spawn_bomb_with_fuse(&mut app, Vec3::new(1.5, y, 0.0), 10.0, &config);
    // Вне досягаемости
    let far = spawn_bomb_with_fuse(&mut app, Vec3::new(6.0, y, 0.0), 10.0, &config);

    run_fixed_ticks(&mut app, 40);

    assert!(app.world().get_entity(first).is_err());
    assert!(app.world().get_entity(second).is_err(), "second bomb should chain-detonate");
    assert!(app.world().get_entity(far).is_ok());

    let detonated: Vec<Entity> = events::<BombDetonated>(&app)
        .into_iter()
        .map(|event| event.bomb)
        .collect();
    assert_eq!(detonated, vec![first, second]);

    let requests = events::<DamageRequest>(&app);
    assert!(requests
        .iter()
        .any(|request| request.target == second && request.source == Some(first)));
    assert!(requests.iter().all(|request| request.target != far));
}

#[test]
fn test_explosion_damages_actor_once() {
    let config = quiet_config();
    let mut app = arena_app(&config);
    let y = config.bomb_radius + config.skin_width;

    let actor = app
        .world_mut()
        .spawn(actor_bundle(Vec3::new(1.2, config.actor_foot_offset, 0.0), 0.4))
        .id();
    let bomb = spawn_bomb_with_fuse(&mut app, Vec3::new(0.0, y, 0.0), 0.1, &config);

    run_fixed_ticks(&mut app, 60);

    let damaged = events::<ActorDamaged>(&app);
    assert_eq!(damaged.len(), 1);
    assert_eq!(damaged[0].actor, actor);
    assert_eq!(damaged[0].source, Some(bomb));

    // Урон не убирает актора из мира
    assert!(app.world().get_entity(actor).is_ok());
}

#[test]
fn test_damage_request_detonates_bomb_next_tick() {
    let config = quiet_config();
    let mut app = arena_app(&config);
    let y = config.bomb_radius + config.skin_width;
    let bomb = app.world_mut().spawn(bomb_bundle(Vec3::new(0.0, y, 0.0), &config)).id();

    run_fixed_ticks(&mut app, 1);
    app.world_mut().send_event(DamageRequest { target: bomb, source: None });
    // Повторный запрос в том же тике игнорируется
    app.world_mut().send_event(DamageRequest { target: bomb, source: None });
    run_fixed_ticks(&mut app, 1);

    assert!(app.world().get_entity(bomb).is_err());
    assert_eq!(explosion_count(&mut app), 1);
    assert_eq!(events::<BombDetonated>(&app).len(), 1);
}

#[test]
fn test_detonation_returns_slot_to_owner() {
    let config = BombPhysicsConfig {
        fuse_seconds: 0.2,
        ..Default::default()
    };
    let mut app = arena_app(&config);
    let actor = app
        .world_mut()
        .spawn(actor_bundle(Vec3::new(0.0, config.actor_foot_offset, 0.0), 0.4))
        .id();

    app.world_mut().send_event(DropBombIntent { actor });
    run_fixed_ticks(&mut app, 1);
    assert_eq!(app.world().get::<BombCarrier>(actor).map(|c| c.active_bombs), Some(1));

    run_fixed_ticks(&mut app, 30);
    assert_eq!(app.world().get::<BombCarrier>(actor).map(|c| c.active_bombs), Some(0));
    assert_eq!(events::<BombDetonated>(&app).len(), 1);
}

#[test]
fn test_power_up_extends_explosion_reach() {
    let config = BombPhysicsConfig {
        fuse_seconds: 0.2,
        ..Default::default()
    };
    let mut app = arena_app(&config);
    let y = config.bomb_radius + config.skin_width;
    let actor = app
        .world_mut()
        .spawn(actor_bundle(Vec3::new(0.0, config.actor_foot_offset, 0.0), 0.4))
        .id();
    if let Some(mut carrier) = app.world_mut().get_mut::<BombCarrier>(actor) {
        carrier.increase_bomb_power();
    }

    // Дальше base радиуса, но в пределах base × 2
    let reach = config.explosion_base_radius * 2.0 + config.bomb_radius;
    let target = spawn_bomb_with_fuse(&mut app, Vec3::new(reach - 0.3, y, 0.0), 10.0, &config);

    app.world_mut().send_event(DropBombIntent { actor });
    run_fixed_ticks(&mut app, 45);

    let detonated: Vec<Entity> = events::<BombDetonated>(&app)
        .into_iter()
        .map(|event| event.bomb)
        .collect();
    assert_eq!(detonated.len(), 2, "powered explosion should reach {:?}", target);
    assert_eq!(detonated[1], target);
    assert!(app.world().get_entity(target).is_err());
}
