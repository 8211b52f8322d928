//! Simulation config (data-driven, JSON)
//!
//! Все секции `#[serde(default)]` — можно задать только то, что меняется:
//! ```json
//! { "flock": { "boid_count": 120 }, "warden": { "detection_range": 12.0 } }
//! ```

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Размер клетки grid по умолчанию (= perception radius боида)
pub const DEFAULT_CELL_SIZE: f32 = 2.5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse failed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Корневой config симуляции
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed для DeterministicRng
    pub seed: u64,
    /// Fixed timestep (Hz)
    pub tick_rate: f64,
    pub flock: FlockConfig,
    pub steering: SteeringConfig,
    pub warden: WardenConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tick_rate: 60.0,
            flock: FlockConfig::default(),
            steering: SteeringConfig::default(),
            warden: WardenConfig::default(),
        }
    }
}

/// Популяция флока + зона спавна
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlockConfig {
    pub boid_count: usize,
    pub center: [f32; 3],
    /// Радиус спавна и радиус bounds avoidance
    pub radius: f32,
    /// Отступ от края, после которого включается bounds avoidance
    pub bounds_margin: f32,
    /// Фиксированная высота спавна (Y)
    pub height_offset: f32,
    pub cell_size: f32,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            boid_count: 50,
            center: [0.0, 0.0, 0.0],
            radius: 20.0,
            bounds_margin: 2.0,
            height_offset: 1.0,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

/// Параметры отдельного боида и веса сил
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringConfig {
    pub max_speed: f32,
    pub max_force: f32,
    pub perception_radius: f32,
    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    pub bounds_weight: f32,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            max_speed: 5.0,
            max_force: 3.0,
            perception_radius: 2.5,
            separation_weight: 1.5,
            alignment_weight: 1.0,
            cohesion_weight: 1.0,
            bounds_weight: 1.0,
        }
    }
}

/// FSM-агенты (охранники): пороги переходов + сенсоры
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WardenConfig {
    pub move_speed: f32,
    pub detection_range: f32,
    pub attack_range: f32,
    pub lose_target_range: f32,
    pub detection_requires_sight: bool,
    pub chase_speed_multiplier: f32,
    pub attack_cooldown: f32,
    pub vision_range: f32,
    /// Полный угол конуса (градусы)
    pub vision_angle: f32,
    pub hearing_range: f32,
    pub minimum_noise_level: f32,
}

impl Default for WardenConfig {
    fn default() -> Self {
        Self {
            move_speed: 3.0,
            detection_range: 10.0,
            attack_range: 2.0,
            lose_target_range: 15.0,
            detection_requires_sight: false,
            chase_speed_multiplier: 1.5,
            attack_cooldown: 1.0,
            vision_range: 10.0,
            vision_angle: 120.0,
            hearing_range: 15.0,
            minimum_noise_level: 10.0,
        }
    }
}

impl SimulationConfig {
    /// Parse + validate
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tick_rate > 0.0) {
            return Err(ConfigError::Invalid {
                field: "tick_rate",
                reason: "must be positive",
            });
        }
        if !(self.flock.cell_size > 0.0) {
            return Err(ConfigError::Invalid {
                field: "flock.cell_size",
                reason: "must be positive",
            });
        }
        if self.flock.radius < 0.0 {
            return Err(ConfigError::Invalid {
                field: "flock.radius",
                reason: "must not be negative",
            });
        }
        let steering = &self.steering;
        non_negative("steering.max_speed", steering.max_speed)?;
        non_negative("steering.max_force", steering.max_force)?;
        non_negative("steering.perception_radius", steering.perception_radius)?;
        finite("steering.separation_weight", steering.separation_weight)?;
        finite("steering.alignment_weight", steering.alignment_weight)?;
        finite("steering.cohesion_weight", steering.cohesion_weight)?;
        finite("steering.bounds_weight", steering.bounds_weight)?;

        let warden = &self.warden;
        non_negative("warden.detection_range", warden.detection_range)?;
        non_negative("warden.attack_range", warden.attack_range)?;
        non_negative("warden.lose_target_range", warden.lose_target_range)?;
        non_negative("warden.vision_range", warden.vision_range)?;
        non_negative("warden.hearing_range", warden.hearing_range)?;
        if self.warden.attack_range > self.warden.lose_target_range {
            return Err(ConfigError::Invalid {
                field: "warden.attack_range",
                reason: "must not exceed lose_target_range",
            });
        }
        Ok(())
    }

    pub fn flock_center(&self) -> Vec3 {
        Vec3::from_array(self.flock.center)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }
}

/// Конечное и ≥ 0 (радиусы, дальности, скорости)
fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(ConfigError::Invalid {
            field,
            reason: "must not be negative",
        });
    }
    Ok(())
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::Invalid {
            field,
            reason: "must be finite",
        });
    }
    Ok(())
}
