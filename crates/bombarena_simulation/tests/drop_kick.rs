//! Drop / kick integration test

use bevy::prelude::*;
use bombarena_simulation::*;

fn arena_app(config: &BombPhysicsConfig) -> App {
    let mut app = create_headless_app_with_config(21, config.clone());
    app.world_mut().spawn(environment_bundle(StaticShape::ground(0.0)));
    app
}

fn long_fuse_config() -> BombPhysicsConfig {
    BombPhysicsConfig {
        fuse_seconds: 100.0,
        ..Default::default()
    }
}

fn spawn_player(app: &mut App, config: &BombPhysicsConfig) -> Entity {
    app.world_mut()
        .spawn(actor_bundle(Vec3::new(0.0, config.actor_foot_offset, 0.0), 0.4))
        .id()
}

fn events<E: Event + Clone>(app: &App) -> Vec<E> {
    app.world()
        .resource::<Events<E>>()
        .iter_current_update_events()
        .cloned()
        .collect()
}

fn bombs(app: &mut App) -> Vec<Entity> {
    let world = app.world_mut();
    world.query_filtered::<Entity, With<Bomb>>().iter(world).collect()
}

#[test]
fn test_drop_spawns_owned_bomb_at_feet() {
    let config = long_fuse_config();
    let mut app = arena_app(&config);
    let actor = spawn_player(&mut app, &config);

    app.world_mut().send_event(DropBombIntent { actor });
    run_fixed_ticks(&mut app, 1);

    let dropped = events::<BombDropped>(&app);
    assert_eq!(dropped.len(), 1);
    let bomb = dropped[0].bomb;
    assert_eq!(bombs(&mut app), vec![bomb]);

    let world = app.world();
    assert_eq!(world.get::<BombOwner>(bomb), Some(&BombOwner(actor)));
    assert_eq!(
        world.get::<BombMotion>(bomb).and_then(|motion| motion.ignored_collider()),
        Some(actor)
    );
    let position = world.get::<Transform>(bomb).map(|t| t.translation).unwrap_or_default();
    assert!(position.distance(Vec3::new(0.0, config.bomb_radius + config.skin_width, 0.0)) < 1e-5);
    assert_eq!(world.get::<BombCarrier>(actor).map(|c| c.active_bombs), Some(1));
}

#[test]
fn test_dropped_bomb_does_not_push_owner() {
    let config = long_fuse_config();
    let mut app = arena_app(&config);
    let actor = spawn_player(&mut app, &config);

    app.world_mut().send_event(DropBombIntent { actor });
    run_fixed_ticks(&mut app, 20);

    assert!(events::<ActorKnocked>(&app).is_empty());
    let knockable = app.world().get::<KnockableActor>(actor).copied();
    assert_eq!(knockable.map(|actor| actor.is_knocked()), Some(false));
}

#[test]
fn test_second_intent_kicks_bomb_at_feet() {
    let config = long_fuse_config();
    let mut app = arena_app(&config);
    let actor = spawn_player(&mut app, &config);
    if let Some(mut carrier) = app.world_mut().get_mut::<BombCarrier>(actor) {
        carrier.set_facing(Vec3::X);
    }

    app.world_mut().send_event(DropBombIntent { actor });
    run_fixed_ticks(&mut app, 1);
    app.world_mut().send_event(DropBombIntent { actor });
    run_fixed_ticks(&mut app, 1);

    // Kick, не новая бомба
    let all_bombs = bombs(&mut app);
    assert_eq!(all_bombs.len(), 1);
    let bomb = all_bombs[0];

    let kicked = events::<BombKicked>(&app);
    assert_eq!(kicked.len(), 1);
    assert_eq!(kicked[0].bomb, bomb);
    assert_eq!(kicked[0].actor, actor);

    let motion = app.world().get::<BombMotion>(bomb).copied().unwrap_or_default();
    assert!(motion.is_moving());
    assert!(motion.horizontal_direction.distance(Vec3::X) < 1e-5);
    assert_eq!(motion.ignored_collider(), Some(actor));

    // Бомба укатывается сквозь ноги актора
    run_fixed_ticks(&mut app, 30);
    let x = app.world().get::<Transform>(bomb).map(|t| t.translation.x).unwrap_or_default();
    assert!(x > 2.0, "kicked bomb did not roll away: {}", x);
    assert!(events::<ActorKnocked>(&app).is_empty());
}

#[test]
fn test_no_free_slot_no_drop() {
    let config = long_fuse_config();
    let mut app = arena_app(&config);
    let actor = spawn_player(&mut app, &config);

    app.world_mut().send_event(DropBombIntent { actor });
    run_fixed_ticks(&mut app, 1);

    // Отходим от бомбы, чтобы не пнуть её
    if let Some(mut transform) = app.world_mut().get_mut::<Transform>(actor) {
        transform.translation.x = 5.0;
    }
    app.world_mut().send_event(DropBombIntent { actor });
    run_fixed_ticks(&mut app, 1);

    assert_eq!(bombs(&mut app).len(), 1);
    assert_eq!(events::<BombDropped>(&app).len(), 1);
    assert!(events::<BombKicked>(&app).is_empty());

    // Дополнительный слот
    if let Some(mut carrier) = app.world_mut().get_mut::<BombCarrier>(actor) {
        carrier.increase_max_bombs();
    }
    app.world_mut().send_event(DropBombIntent { actor });
    run_fixed_ticks(&mut app, 1);
    assert_eq!(bombs(&mut app).len(), 2);
}
