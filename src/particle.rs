// A single drifting glow point: position, velocity and a sine-driven pulse on its radius

use crate::config::FieldConfig;
use crate::viewport::Viewport;
use rand::Rng;
use std::f64::consts::PI;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: [f64; 2],
    pub vel: [f64; 2],
    pub base_radius: f64,
    pub radius: f64,
    pub pulse_phase: f64,
    pub pulse_speed: f64,
}

impl Particle {
    pub fn new(pos: [f64; 2], vel: [f64; 2], base_radius: f64, pulse_speed: f64) -> Particle {
        Particle {
            pos,
            vel,
            base_radius,
            radius: base_radius,
            pulse_phase: 0.0,
            pulse_speed,
        }
    }

    // Uses `gen::<f64>() * span` rather than `gen_range` so a zero-sized
    // viewport yields particles at the origin instead of panicking.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, viewport: Viewport, config: &FieldConfig) -> Particle {
        let pos_x = rng.gen::<f64>() * viewport.width_f64();
        let pos_y = rng.gen::<f64>() * viewport.height_f64();
        let vel_x = (rng.gen::<f64>() - 0.5) * config.speed;
        let vel_y = (rng.gen::<f64>() - 0.5) * config.speed;
        let base_radius = rng.gen::<f64>() * (config.size_max - config.size_min) + config.size_min;
        let pulse_speed =
            rng.gen::<f64>() * (config.pulse_speed_max - config.pulse_speed_min) + config.pulse_speed_min;
        let pulse_phase = rng.gen::<f64>() * PI * 2.0;

        Particle {
            pulse_phase,
            ..Particle::new([pos_x, pos_y], [vel_x, vel_y], base_radius, pulse_speed)
        }
    }

    /// One frame of motion: move, bounce off the edges, clamp, then pulse.
    pub fn update(&mut self, viewport: Viewport, pulse_amplitude: f64) {
        let bounds = [viewport.width_f64(), viewport.height_f64()];

        for axis in 0..2 {
            self.pos[axis] += self.vel[axis];
            if self.pos[axis] < 0.0 || self.pos[axis] > bounds[axis] {
                self.vel[axis] *= -1.0;
            }
            self.pos[axis] = self.pos[axis].max(0.0).min(bounds[axis]);
        }

        self.pulse_phase += self.pulse_speed;
        self.radius = self.base_radius + self.pulse_phase.sin() * pulse_amplitude;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn viewport() -> Viewport {
        Viewport::new(800, 600)
    }

    #[test]
    fn bounces_and_clamps_at_left_wall() {
        let mut p = Particle::new([-5.0, 300.0], [-1.0, 0.0], 4.0, 0.02);
        p.update(viewport(), 1.0);

        assert_eq!(p.vel, [1.0, 0.0]);
        assert_eq!(p.pos, [0.0, 300.0]);
    }

    #[test]
    fn bounces_and_clamps_at_far_walls() {
        let mut p = Particle::new([799.9, 599.9], [0.25, 0.25], 4.0, 0.02);
        p.update(viewport(), 1.0);

        assert_eq!(p.vel, [-0.25, -0.25]);
        assert_eq!(p.pos, [800.0, 600.0]);
    }

    #[test]
    fn particle_on_the_wall_moving_outward_reflects() {
        let mut p = Particle::new([0.0, 10.0], [-0.1, 0.0], 4.0, 0.02);
        p.update(viewport(), 1.0);
        assert_eq!(p.vel[0], 0.1);
        assert_eq!(p.pos[0], 0.0);

        p.update(viewport(), 1.0);
        assert!((p.pos[0] - 0.1).abs() < 1e-12);
        assert_eq!(p.vel[0], 0.1);
    }

    #[test]
    fn velocity_is_unchanged_while_inside_bounds() {
        let mut p = Particle::new([100.0, 100.0], [0.15, -0.1], 4.0, 0.02);
        for _ in 0..500 {
            p.update(viewport(), 1.0);
        }
        assert_eq!(p.vel, [0.15, -0.1]);
        assert!((p.pos[0] - 175.0).abs() < 1e-9);
        assert!((p.pos[1] - 50.0).abs() < 1e-9);
    }

    #[test]
    fn radius_pulses_around_base_radius() {
        let mut p = Particle::new([10.0, 10.0], [0.0, 0.0], 5.0, 0.3);
        let mut seen_above = false;
        let mut seen_below = false;
        for _ in 0..100 {
            p.update(viewport(), 1.0);
            assert!((p.radius - p.base_radius).abs() <= 1.0);
            seen_above |= p.radius > p.base_radius;
            seen_below |= p.radius < p.base_radius;
        }
        assert!(seen_above && seen_below);
    }

    #[test]
    fn random_particles_respect_configured_ranges() {
        let config = FieldConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let p = Particle::random(&mut rng, viewport(), &config);
            assert!(p.pos[0] >= 0.0 && p.pos[0] <= 800.0);
            assert!(p.pos[1] >= 0.0 && p.pos[1] <= 600.0);
            assert!(p.vel[0].abs() <= config.speed / 2.0);
            assert!(p.vel[1].abs() <= config.speed / 2.0);
            assert!(p.base_radius >= config.size_min && p.base_radius < config.size_max);
            assert_eq!(p.radius, p.base_radius);
            assert!(p.pulse_speed >= config.pulse_speed_min && p.pulse_speed < config.pulse_speed_max);
            assert!(p.pulse_phase >= 0.0 && p.pulse_phase < 2.0 * PI);
        }
    }

    #[test]
    fn zero_viewport_spawns_at_origin() {
        let mut rng = StdRng::seed_from_u64(1);
        let p = Particle::random(&mut rng, Viewport::new(0, 0), &FieldConfig::default());
        assert_eq!(p.pos, [0.0, 0.0]);
    }
}
