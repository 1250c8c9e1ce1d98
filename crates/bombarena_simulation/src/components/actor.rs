//! Компоненты акторов (игроков): KnockableActor, BombCarrier
//!
//! Locomotion актора внешняя - здесь только то, что видит bomb physics:
//! сфера для sweep и накопленный knockback.

use bevy::prelude::*;

/// Актор, которого бомба может толкнуть
///
/// Resolution loop бомб для акторов НЕ выполняется.
/// `knockback` - zero или unit vector в XZ, забирает внешний контроллер.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct KnockableActor {
    /// Радиус collision сферы актора (метры)
    pub radius: f32,
    pub knockback: Vec3,
}

impl Default for KnockableActor {
    fn default() -> Self {
        Self::new(0.4)
    }
}

impl KnockableActor {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            knockback: Vec3::ZERO,
        }
    }

    /// Knock: то же additive blending, что у BombMotion
    pub fn knock(&mut self, direction: Vec3) {
        let flat = Vec3::new(direction.x, 0.0, direction.z).normalize_or_zero();
        self.knockback = Vec3::new(self.knockback.x + flat.x, 0.0, self.knockback.z + flat.z)
            .normalize_or_zero();
    }

    pub fn is_knocked(&self) -> bool {
        self.knockback != Vec3::ZERO
    }

    /// Забрать накопленный knockback (внешний контроллер, раз в тик)
    pub fn take_knockback(&mut self) -> Vec3 {
        std::mem::take(&mut self.knockback)
    }
}

/// Бомбы актора: лимит, активные, сила взрыва, куда смотрит
///
/// Инвариант: active_bombs ≤ max_bombs (drop проверяет can_drop)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct BombCarrier {
    pub max_bombs: u32,
    pub active_bombs: u32,
    /// Множитель радиуса взрыва
    pub bomb_power: u32,
    /// Направление kick (unit, XZ)
    pub facing: Vec3,
}

impl Default for BombCarrier {
    fn default() -> Self {
        Self {
            max_bombs: 1,
            active_bombs: 0,
            bomb_power: 1,
            facing: Vec3::Z,
        }
    }
}

impl BombCarrier {
    pub fn can_drop(&self) -> bool {
        self.active_bombs < self.max_bombs
    }

    pub fn on_bomb_dropped(&mut self) {
        self.active_bombs += 1;
    }

    pub fn on_bomb_detonated(&mut self) {
        self.active_bombs = self.active_bombs.saturating_sub(1);
    }

    /// Нулевое направление игнорируется (актор стоит - facing не меняется)
    pub fn set_facing(&mut self, direction: Vec3) {
        let flat = Vec3::new(direction.x, 0.0, direction.z);
        if let Some(facing) = flat.try_normalize() {
            self.facing = facing;
        }
    }

    pub fn increase_bomb_power(&mut self) {
        self.bomb_power += 1;
    }

    pub fn increase_max_bombs(&mut self) {
        self.max_bombs += 1;
    }
}
