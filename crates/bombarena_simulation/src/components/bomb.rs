//! Bomb компоненты: motion state, tuning, fuse
//!
//! Архитектура: Required Components (Bevy 0.16)
//! - Bomb требует BombMotion + BombTuning + Fuse + Transform автоматически
//! - BombMotion мутирует ТОЛЬКО resolution pass этой бомбы
//!   (+ Knock от других тел через очередь эффектов)

use bevy::prelude::*;

/// Порог "направление вырождено в ноль"
const DIRECTION_EPSILON: f32 = 1e-6;

/// Бомба - dynamic spherical body
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(BombMotion, BombTuning, Fuse, Transform)]
pub struct Bomb;

/// Коллайдер, временно исключённый из sweep/overlap этой бомбы
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct IgnoredCollider {
    pub collider: Entity,
    /// Оставшееся время (секунды)
    pub remaining: f32,
}

/// Motion state бомбы
///
/// Инварианты:
/// - `horizontal_direction` либо ноль, либо unit vector в плоскости XZ
/// - `is_moving == (horizontal_direction != 0)`
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct BombMotion {
    pub horizontal_direction: Vec3,
    /// Отрицательная при падении, 0 на земле
    pub vertical_velocity: f32,
    pub is_moving: bool,
    /// Пересчитывается каждый тик Grounding Detector'ом
    pub grounded: bool,
    pub ground_normal: Vec3,
    pub ignored: Option<IgnoredCollider>,
}

impl Default for BombMotion {
    fn default() -> Self {
        Self {
            horizontal_direction: Vec3::ZERO,
            vertical_velocity: 0.0,
            is_moving: false,
            grounded: false,
            ground_normal: Vec3::Y,
            ignored: None,
        }
    }
}

impl BombMotion {
    /// Knock: добавить направление к текущему и перенормировать
    ///
    /// Несколько knock'ов в одном тике складываются: встречные гасят друг друга,
    /// бомба почти (или полностью) останавливается.
    pub fn knock(&mut self, direction: Vec3) {
        let flat = Vec3::new(direction.x, 0.0, direction.z).normalize_or_zero();
        self.set_horizontal_direction(self.horizontal_direction + flat);
    }

    /// Idle: обнулить направление
    pub fn stop(&mut self) {
        self.horizontal_direction = Vec3::ZERO;
        self.is_moving = false;
    }

    pub fn is_moving(&self) -> bool {
        self.is_moving
    }

    pub fn move_direction(&self) -> Vec3 {
        self.horizontal_direction
    }

    /// Задать направление (Y отбрасывается, результат нормируется)
    ///
    /// Нулевой вектор → stop().
    pub fn set_horizontal_direction(&mut self, direction: Vec3) {
        let flat = Vec3::new(direction.x, 0.0, direction.z);
        if flat.length_squared() <= DIRECTION_EPSILON * DIRECTION_EPSILON {
            self.stop();
            return;
        }

        self.horizontal_direction = flat.normalize();
        self.is_moving = true;
    }

    /// Исключить коллайдер из collision checks на `duration` секунд
    pub fn set_ignored_collider(&mut self, collider: Entity, duration: f32) {
        self.ignored = Some(IgnoredCollider {
            collider,
            remaining: duration,
        });
    }

    pub fn ignored_collider(&self) -> Option<Entity> {
        self.ignored.map(|ignored| ignored.collider)
    }

    /// Countdown исключения (раз в тик, после resolution pass)
    pub fn tick_ignored_collider(&mut self, delta: f32) {
        if let Some(ignored) = self.ignored.as_mut() {
            ignored.remaining -= delta;
            if ignored.remaining <= 0.0 {
                self.ignored = None;
            }
        }
    }

    /// Lifecycle hook: (re)activation из пула
    pub fn reset_state(&mut self) {
        *self = Self::default();
    }
}

/// Фиксированные параметры тела бомбы
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct BombTuning {
    /// Радиус collision сферы (метры)
    pub radius: f32,
    /// Горизонтальная скорость (m/s)
    pub move_speed: f32,
    /// Модуль гравитации (m/s²)
    pub gravity: f32,
    /// Зазор до препятствий (метры)
    pub skin_width: f32,
}

impl Default for BombTuning {
    fn default() -> Self {
        Self {
            radius: 0.5,
            move_speed: 5.0,
            gravity: 9.81,
            skin_width: 0.015,
        }
    }
}

/// Detonation countdown
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Fuse {
    pub remaining: f32,
    pub duration: f32,
}

impl Default for Fuse {
    fn default() -> Self {
        Self::new(3.0)
    }
}

impl Fuse {
    pub fn new(duration: f32) -> Self {
        Self {
            remaining: duration,
            duration,
        }
    }

    pub fn tick(&mut self, delta: f32) {
        if self.remaining > 0.0 {
            self.remaining -= delta;
        }
    }

    pub fn is_expired(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Lifecycle hook: перезапуск countdown
    pub fn restart(&mut self) {
        self.remaining = self.duration;
    }
}

/// Кто бросил бомбу (слот BombCarrier освобождается при детонации)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct BombOwner(pub Entity);

/// Маркер: бомба детонировала (one-way, resolution больше не выполняется)
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Detonated;
