//! Per-tick pipeline одного тела
//!
//! Порядок:
//! 1. Grounding Detector
//! 2. Vertical Integrator (зависит от grounded)
//! 3. Horizontal delta (проекция на пол если grounded)
//! 4. Collision Resolution Loop (vertical + horizontal)
//! 5. Countdown ignored collider

use super::body::DynamicBody;
use super::grounding::detect_ground;
use super::integrator::{horizontal_delta, integrate_vertical};
use super::momentum::ContactEffect;
use super::resolution::{resolve, Resolution};
use crate::collision::{ColliderRegistry, GeometryQuery};
use crate::config::BombPhysicsConfig;

pub fn step_body<G: GeometryQuery + ?Sized>(
    body: &mut DynamicBody,
    geometry: &G,
    registry: &ColliderRegistry,
    config: &BombPhysicsConfig,
    delta: f32,
    effects: &mut Vec<ContactEffect>,
) -> Resolution {
    let ground = detect_ground(geometry, body, config);
    body.motion.grounded = ground.grounded;
    body.motion.ground_normal = ground.normal;

    let vertical = integrate_vertical(&mut body.motion, &body.tuning, delta);
    let horizontal = horizontal_delta(&body.motion, &body.tuning, delta);

    let resolution = resolve(body, vertical + horizontal, geometry, registry, config, delta, effects);

    // Исключение снимается ПОСЛЕ pass: hits вернутся со следующего тика
    body.motion.tick_ignored_collider(delta);

    resolution
}
