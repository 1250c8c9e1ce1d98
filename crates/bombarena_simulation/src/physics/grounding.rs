//! Grounding Detector
//!
//! Короткий sweep вниз на `skin_width + ground_probe_buffer` против ENVIRONMENT.
//! Запускается первым в тике тела, результат пишется в BombMotion.

use bevy::prelude::*;

use super::body::DynamicBody;
use crate::collision::{GeometryQuery, COLLISION_MASK_GROUND_PROBE};
use crate::config::BombPhysicsConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundContact {
    pub grounded: bool,
    /// Нормаль пола (Vec3::Y если не на земле - не используется)
    pub normal: Vec3,
}

impl GroundContact {
    pub const AIRBORNE: Self = Self {
        grounded: false,
        normal: Vec3::Y,
    };
}

pub fn detect_ground<G: GeometryQuery + ?Sized>(
    geometry: &G,
    body: &DynamicBody,
    config: &BombPhysicsConfig,
) -> GroundContact {
    let probe_distance = body.tuning.skin_width + config.ground_probe_buffer;

    match geometry.sweep_down(
        body.position,
        body.tuning.radius,
        probe_distance,
        COLLISION_MASK_GROUND_PROBE,
        &body.exclusions(),
    ) {
        Some(hit) => GroundContact {
            grounded: true,
            normal: hit.normal,
        },
        None => GroundContact::AIRBORNE,
    }
}
