// The particle store plus the per-frame update/draw cycle.

use crate::config::FieldConfig;
use crate::particle::Particle;
use crate::renderer::{Renderer, Surface};
use crate::viewport::Viewport;
use rand::Rng;
use wasm_bindgen::JsValue;

pub struct ParticleField {
    particles: Vec<Particle>,
    viewport: Viewport,
    renderer: Renderer,
}

impl ParticleField {
    /// Spawns `config.particle_count` particles inside `viewport`.
    /// The count never changes afterwards.
    pub fn initialize<R: Rng + ?Sized>(config: FieldConfig, viewport: Viewport, rng: &mut R) -> Self {
        let particles = (0..config.particle_count)
            .map(|_| Particle::random(&mut *rng, viewport, &config))
            .collect();
        Self::from_particles(config, viewport, particles)
    }

    pub fn from_particles(config: FieldConfig, viewport: Viewport, particles: Vec<Particle>) -> Self {
        ParticleField {
            particles,
            viewport,
            renderer: Renderer::new(config),
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &FieldConfig {
        self.renderer.config()
    }

    /// New collision bounds; particles outside them are pulled back in on their next update.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// One frame: clear, draw the connections for the current positions,
    /// then move and draw each particle in turn.
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<(), JsValue> {
        surface.clear(self.viewport.width_f64(), self.viewport.height_f64())?;
        self.renderer.render_connections(surface, &self.particles)?;

        let amplitude = self.renderer.config().pulse_amplitude;
        for particle in &mut self.particles {
            particle.update(self.viewport, amplitude);
            self.renderer.render_particle(surface, particle)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::tests::{DrawCall, RecordingSurface};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded_field(seed: u64, count: usize) -> ParticleField {
        let config = FieldConfig::default().with_particle_count(count);
        let mut rng = StdRng::seed_from_u64(seed);
        ParticleField::initialize(config, Viewport::new(800, 600), &mut rng)
    }

    #[test]
    fn same_seed_gives_same_layout() {
        let a = seeded_field(42, 24);
        let b = seeded_field(42, 24);
        assert_eq!(a.particles().len(), 24);
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn different_seeds_give_different_layouts() {
        assert_ne!(seeded_field(1, 24).particles(), seeded_field(2, 24).particles());
    }

    #[test]
    fn invariants_hold_over_many_frames() {
        let mut field = seeded_field(9, 40);
        let amplitude = field.config().pulse_amplitude;
        let mut surface = RecordingSurface::default();
        for _ in 0..2_000 {
            field.tick(&mut surface).unwrap();
            surface.calls.clear();
            for p in field.particles() {
                assert!(p.pos[0] >= 0.0 && p.pos[0] <= 800.0);
                assert!(p.pos[1] >= 0.0 && p.pos[1] <= 600.0);
                assert!((p.radius - p.base_radius).abs() <= amplitude);
            }
        }
        assert_eq!(field.particles().len(), 40);
    }

    #[test]
    fn shrinking_the_viewport_pulls_particles_in() {
        let mut field = seeded_field(3, 24);
        field.resize(Viewport::new(100, 50));
        let mut surface = RecordingSurface::default();
        field.tick(&mut surface).unwrap();

        assert_eq!(surface.calls[0], DrawCall::Clear(100.0, 50.0));
        for p in field.particles() {
            assert!(p.pos[0] <= 100.0 && p.pos[1] <= 50.0);
        }
    }

    #[test]
    fn two_particle_frame_draws_one_line_then_particles() {
        let config = FieldConfig::default();
        let particles = vec![
            Particle::new([0.0, 300.0], [0.0, 0.0], 4.0, 0.02),
            Particle::new([10.0, 300.0], [0.0, 0.0], 4.0, 0.02),
        ];
        let mut field = ParticleField::from_particles(config, Viewport::new(800, 600), particles);
        let mut surface = RecordingSurface::default();
        field.tick(&mut surface).unwrap();

        assert_eq!(surface.calls[0], DrawCall::Clear(800.0, 600.0));
        match &surface.calls[1] {
            DrawCall::Line { stops, .. } => {
                assert!((stops[0].color.alpha - 0.95 * 0.8).abs() < 1e-12);
            }
            other => panic!("expected a line, got {:?}", other),
        }
        assert!(matches!(surface.calls[2], DrawCall::Glow { .. }));
        assert!(matches!(surface.calls[3], DrawCall::Circle { .. }));
        assert!(matches!(surface.calls[4], DrawCall::Glow { .. }));
        assert!(matches!(surface.calls[5], DrawCall::Circle { .. }));
        assert_eq!(surface.calls.len(), 6);
    }

    #[test]
    fn connections_use_positions_from_before_the_move() {
        let particles = vec![
            Particle::new([100.0, 100.0], [5.0, 0.0], 4.0, 0.02),
            Particle::new([150.0, 100.0], [0.0, 0.0], 4.0, 0.02),
        ];
        let mut field =
            ParticleField::from_particles(FieldConfig::default(), Viewport::new(800, 600), particles);
        let mut surface = RecordingSurface::default();
        field.tick(&mut surface).unwrap();

        match &surface.calls[1] {
            DrawCall::Line { from, .. } => assert_eq!(*from, [100.0, 100.0]),
            other => panic!("expected a line, got {:?}", other),
        }
        match &surface.calls[2] {
            DrawCall::Glow { center, .. } => assert_eq!(*center, [105.0, 100.0]),
            other => panic!("expected a glow, got {:?}", other),
        }
    }
}
