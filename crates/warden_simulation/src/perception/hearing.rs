//! Hearing sensor (линейное затухание по дистанции)

use bevy::prelude::*;

#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct HearingSensor {
    /// Радиус слышимости (метры)
    pub hearing_range: f32,
    /// Минимальная громкость после затухания
    pub minimum_noise_level: f32,
}

impl Default for HearingSensor {
    fn default() -> Self {
        Self {
            hearing_range: 15.0,
            minimum_noise_level: 10.0,
        }
    }
}

impl HearingSensor {
    pub fn new(hearing_range: f32, minimum_noise_level: f32) -> Self {
        Self {
            hearing_range,
            minimum_noise_level,
        }
    }

    /// Громкость шума в точке listener: `level * (1 - d / range)`
    pub fn attenuated_level(&self, listener: Vec3, noise_position: Vec3, noise_level: f32) -> f32 {
        let distance = listener.distance(noise_position);
        noise_level * (1.0 - distance / self.hearing_range)
    }

    /// Слышит ли listener шум
    ///
    /// Обе границы включительные: attenuated ≥ minimum И distance ≤ range.
    pub fn can_hear(&self, listener: Vec3, noise_position: Vec3, noise_level: f32) -> bool {
        if !(self.hearing_range > 0.0) {
            return false;
        }

        let distance = listener.distance(noise_position);
        let attenuated = self.attenuated_level(listener, noise_position, noise_level);

        attenuated >= self.minimum_noise_level && distance <= self.hearing_range
    }
}
