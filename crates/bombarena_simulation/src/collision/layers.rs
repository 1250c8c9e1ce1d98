//! Collision Layers Constants
//!
//! Centralised битовые маски для всего проекта (ArenaScene и Rapier используют одни и те же биты).
//!
//! ## Архитектура:
//! - **Layer (битовая маска):** На каком слое находится объект
//! - **Mask (битовая маска):** С какими слоями объект коллидирует / что ищет query
//!
//! ## Layers:
//! - Layer 1 (0b1 = 1): Reserved
//! - Layer 2 (0b10 = 2): Knockable actors (players)
//! - Layer 3 (0b100 = 4): Environment (стены, пол, препятствия)
//! - Layer 4 (0b1000 = 8): Dynamic bodies (бомбы)
//!
//! ## Использование:
//! ```ignore
//! use crate::collision::layers::*;
//!
//! // Sweep бомбы (всё, во что она может врезаться)
//! scene.sweep_sphere(origin, radius, dir, len, COLLISION_MASK_BOMB_SWEEP, &exclude);
//!
//! // Ground probe (только environment)
//! scene.sweep_down(origin, radius, probe, COLLISION_MASK_GROUND_PROBE, &exclude);
//! ```

use bevy_rapier3d::prelude::{CollisionGroups, Group};

// ============================================================================
// Layer Битовые Маски (на каком слое объект находится)
// ============================================================================

/// Layer 2: Knockable actors (players - свой locomotion, принимают Knock)
pub const COLLISION_LAYER_KNOCKABLE: u32 = 0b10; // 2

/// Layer 3: Environment (walls, ground, static obstacles)
pub const COLLISION_LAYER_ENVIRONMENT: u32 = 0b100; // 4

/// Layer 4: Dynamic bodies (bombs)
pub const COLLISION_LAYER_DYNAMIC: u32 = 0b1000; // 8

// ============================================================================
// Mask Битовые Маски (с чем объект коллидирует)
// ============================================================================

/// Mask: sweep бомбы в resolution loop (Environment + Dynamic + Knockable)
pub const COLLISION_MASK_BOMB_SWEEP: u32 =
    COLLISION_LAYER_ENVIRONMENT | COLLISION_LAYER_DYNAMIC | COLLISION_LAYER_KNOCKABLE;

/// Mask: ground probe (только Environment - стоять на других бомбах нельзя)
pub const COLLISION_MASK_GROUND_PROBE: u32 = COLLISION_LAYER_ENVIRONMENT;

/// Mask: взрыв задевает бомбы и акторов
pub const COLLISION_MASK_EXPLOSION: u32 = COLLISION_LAYER_DYNAMIC | COLLISION_LAYER_KNOCKABLE;

/// Mask: overlap у ног актора при drop/kick (ищем только бомбы)
pub const COLLISION_MASK_DROP_PROBE: u32 = COLLISION_LAYER_DYNAMIC;

// ============================================================================
// Helper Functions
// ============================================================================

/// Получить название слоя для debug логов
pub fn get_layer_name(layer_bits: u32) -> &'static str {
    match layer_bits {
        COLLISION_LAYER_KNOCKABLE => "Knockable",
        COLLISION_LAYER_ENVIRONMENT => "Environment",
        COLLISION_LAYER_DYNAMIC => "Dynamic",
        _ => "Unknown",
    }
}

/// Rapier groups для статической геометрии
pub fn environment_groups() -> CollisionGroups {
    CollisionGroups::new(
        Group::from_bits_truncate(COLLISION_LAYER_ENVIRONMENT),
        Group::from_bits_truncate(COLLISION_LAYER_DYNAMIC | COLLISION_LAYER_KNOCKABLE),
    )
}

/// Groups для scene query: membership = все, filter = mask
///
/// Rapier проверяет `query.filter & collider.membership` - так mask выбирает слои.
pub fn query_groups(mask: u32) -> CollisionGroups {
    CollisionGroups::new(Group::ALL, Group::from_bits_truncate(mask))
}
