//! BombPhysicsConfig - глобальная конфигурация арены
//!
//! Resource с дефолтами (константы подобраны под бомбу радиусом 0.5m),
//! загружается из JSON (`#[serde(default)]` - можно указывать только часть полей).
//!
//! Валидация (отрицательные радиусы, скорости) НЕ делается: это precondition
//! для того, кто собирает конфиг.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::BombTuning;

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BombPhysicsConfig {
    /// Частота simulation tick (Hz)
    pub tick_hz: f64,

    // === Resolution loop ===
    /// Максимум sweep итераций на один resolve (гарантия завершения тика)
    pub max_iterations: u32,
    /// Запас ground probe сверх skin width (метры)
    pub ground_probe_buffer: f32,

    // === Momentum transfer ===
    /// Высота контакта в локальном frame цели, ниже которой airborne бомба перепрыгивает
    pub bounce_height: f32,
    /// Вертикальная скорость прыжка через препятствие (m/s)
    pub bounce_velocity: f32,
    /// Запас при разведении перекрывшихся бомб (метры)
    pub separation_buffer: f32,
    /// Нижняя граница cos угла контакта (защита от деления на ~0 при скользящем касании)
    pub separation_epsilon: f32,

    // === Bomb body (BombTuning по умолчанию) ===
    pub bomb_radius: f32,
    pub bomb_move_speed: f32,
    /// Модуль гравитации (m/s², положительный)
    pub bomb_gravity: f32,
    pub skin_width: f32,

    // === Lifecycle ===
    /// Время до детонации (секунды)
    pub fuse_seconds: f32,
    /// Сколько бомба игнорирует актора, который её бросил/пнул (секунды)
    pub kick_ignore_seconds: f32,
    pub explosion_expansion_speed: f32,
    /// Радиус взрыва при bomb_power = 1 (метры)
    pub explosion_base_radius: f32,
    pub explosion_duration: f32,

    // === Actor probe ===
    /// Смещение от центра актора до его ног (метры)
    pub actor_foot_offset: f32,
    /// Радиус overlap у ног при drop/kick
    pub actor_probe_radius: f32,
}

impl Default for BombPhysicsConfig {
    fn default() -> Self {
        Self {
            tick_hz: 60.0,

            max_iterations: 5,
            ground_probe_buffer: 0.05,

            bounce_height: 0.25,
            bounce_velocity: 4.0,
            separation_buffer: 0.01,
            separation_epsilon: 0.1,

            bomb_radius: 0.5,
            bomb_move_speed: 5.0,
            bomb_gravity: 9.81,
            skin_width: 0.015,

            fuse_seconds: 3.0,
            kick_ignore_seconds: 0.5,
            explosion_expansion_speed: 8.0,
            explosion_base_radius: 1.5,
            explosion_duration: 0.5,

            actor_foot_offset: 0.5,
            actor_probe_radius: 0.6,
        }
    }
}

impl BombPhysicsConfig {
    /// Загрузить из JSON (отсутствующие поля берутся из Default)
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// BombTuning для новой бомбы
    pub fn bomb_tuning(&self) -> BombTuning {
        BombTuning {
            radius: self.bomb_radius,
            move_speed: self.bomb_move_speed,
            gravity: self.bomb_gravity,
            skin_width: self.skin_width,
        }
    }

    /// Fixed timestep для Time::<Fixed>
    pub fn fixed_time(&self) -> Time<Fixed> {
        Time::<Fixed>::from_hz(self.tick_hz)
    }
}
