// Tuning values for the particle field. The defaults reproduce the look of the
// landing page background; tweak a copy of `FieldConfig::default()` to restyle it.

use crate::color::Color;

#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub particle_count: usize,
    /// Pairs closer than this (in pixels) are joined by a line.
    pub connection_distance: f64,

    pub size_min: f64,
    pub size_max: f64,
    pub pulse_amplitude: f64,

    /// Velocity components are drawn from `[-speed / 2, speed / 2)`.
    pub speed: f64,
    pub pulse_speed_min: f64,
    pub pulse_speed_max: f64,

    pub particle_color: Color,
    pub glow_opacity_center: f64,
    pub glow_opacity_mid: f64,
    pub core_opacity: f64,

    pub line_color: Color,
    pub line_opacity_multiplier: f64,
    pub line_width_min: f64,
    pub line_width_max: f64,
}

impl FieldConfig {
    pub const DEFAULT_PARTICLE_COUNT: usize = 24;
    pub const DEFAULT_CONNECTION_DISTANCE: f64 = 200.0;

    pub fn with_particle_count(mut self, particle_count: usize) -> Self {
        self.particle_count = particle_count;
        self
    }

    pub fn with_connection_distance(mut self, connection_distance: f64) -> Self {
        self.connection_distance = connection_distance;
        self
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            particle_count: Self::DEFAULT_PARTICLE_COUNT,
            connection_distance: Self::DEFAULT_CONNECTION_DISTANCE,
            size_min: 3.0,
            size_max: 8.0,
            pulse_amplitude: 1.0,
            speed: 0.3,
            pulse_speed_min: 0.01,
            pulse_speed_max: 0.03,
            particle_color: Color::from_u32(0x787878),
            glow_opacity_center: 0.3,
            glow_opacity_mid: 0.12,
            core_opacity: 0.5,
            line_color: Color::from_u32(0xdcdcdc),
            line_opacity_multiplier: 0.8,
            line_width_min: 0.3,
            line_width_max: 1.8,
        }
    }
}
