// Renderer that turns the particle field into 2D canvas calls: fading connection
// lines between nearby particles, then a soft glow and a solid core per particle.
//
// Drawing goes through the `Surface` trait so the same code can target a real
// `CanvasRenderingContext2d` or a recording surface in tests.

use crate::color::Rgba;
use crate::config::FieldConfig;
use crate::particle::Particle;
use std::f64::consts::PI;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Rgba,
}

pub trait Surface {
    fn clear(&mut self, width: f64, height: f64) -> Result<(), JsValue>;

    /// Strokes a straight line painted with a linear gradient running from `from` to `to`.
    fn stroke_gradient_line(
        &mut self,
        from: [f64; 2],
        to: [f64; 2],
        line_width: f64,
        stops: &[GradientStop],
    ) -> Result<(), JsValue>;

    /// Fills a circle of `radius` with a radial gradient from its center to its edge.
    fn fill_radial_glow(
        &mut self,
        center: [f64; 2],
        radius: f64,
        stops: &[GradientStop],
    ) -> Result<(), JsValue>;

    fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Rgba) -> Result<(), JsValue>;
}

impl Surface for CanvasRenderingContext2d {
    fn clear(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        self.clear_rect(0.0, 0.0, width, height);
        Ok(())
    }

    fn stroke_gradient_line(
        &mut self,
        from: [f64; 2],
        to: [f64; 2],
        line_width: f64,
        stops: &[GradientStop],
    ) -> Result<(), JsValue> {
        let gradient = self.create_linear_gradient(from[0], from[1], to[0], to[1]);
        for stop in stops {
            gradient.add_color_stop(stop.offset as f32, &stop.color.to_string())?;
        }

        self.begin_path();
        self.move_to(from[0], from[1]);
        self.line_to(to[0], to[1]);
        self.set_stroke_style_canvas_gradient(&gradient);
        self.set_line_width(line_width);
        self.stroke();
        Ok(())
    }

    fn fill_radial_glow(
        &mut self,
        center: [f64; 2],
        radius: f64,
        stops: &[GradientStop],
    ) -> Result<(), JsValue> {
        let [x, y] = center;
        let gradient = self.create_radial_gradient(x, y, 0.0, x, y, radius)?;
        for stop in stops {
            gradient.add_color_stop(stop.offset as f32, &stop.color.to_string())?;
        }

        self.begin_path();
        self.arc(x, y, radius, 0.0, PI * 2.0)?;
        self.set_fill_style_canvas_gradient(&gradient);
        self.fill();
        Ok(())
    }

    fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Rgba) -> Result<(), JsValue> {
        self.begin_path();
        self.arc(center[0], center[1], radius, 0.0, PI * 2.0)?;
        self.set_fill_style_str(&color.to_string());
        self.fill();
        Ok(())
    }
}

/// Style of the line joining two particles.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Connection {
    pub from: [f64; 2],
    pub to: [f64; 2],
    pub opacity: f64,
    pub line_width: f64,
}

pub struct Renderer {
    config: FieldConfig,
}

impl Renderer {
    pub fn new(config: FieldConfig) -> Self {
        Renderer { config }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Returns the line to draw between `a` and `b`, if they are close enough.
    /// Opacity falls off linearly and reaches zero at the connection distance.
    pub fn connection(&self, a: &Particle, b: &Particle) -> Option<Connection> {
        let threshold = self.config.connection_distance;
        let distance = glm::distance(&glm::vec2(a.pos[0], a.pos[1]), &glm::vec2(b.pos[0], b.pos[1]));
        if !(distance < threshold) {
            return None;
        }

        let proximity = 1.0 - distance / threshold;
        Some(Connection {
            from: a.pos,
            to: b.pos,
            opacity: proximity * self.config.line_opacity_multiplier,
            line_width: proximity * (self.config.line_width_max - self.config.line_width_min)
                + self.config.line_width_min,
        })
    }

    /// Every pair `i < j` closer than the connection distance. O(n²).
    pub fn connections<'a>(&'a self, particles: &'a [Particle]) -> impl Iterator<Item = Connection> + 'a {
        particles.iter().enumerate().flat_map(move |(i, a)| {
            particles[i + 1..]
                .iter()
                .filter_map(move |b| self.connection(a, b))
        })
    }

    pub fn render_connections<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        particles: &[Particle],
    ) -> Result<(), JsValue> {
        let line_color = self.config.line_color;
        for connection in self.connections(particles) {
            // The far end fades to half strength, which gives the lines their flicker.
            let stops = [
                GradientStop {
                    offset: 0.0,
                    color: line_color.with_alpha(connection.opacity),
                },
                GradientStop {
                    offset: 1.0,
                    color: line_color.with_alpha(connection.opacity * 0.5),
                },
            ];
            surface.stroke_gradient_line(connection.from, connection.to, connection.line_width, &stops)?;
        }
        Ok(())
    }

    pub fn render_particle<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        particle: &Particle,
    ) -> Result<(), JsValue> {
        let color = self.config.particle_color;
        let glow = [
            GradientStop {
                offset: 0.0,
                color: color.with_alpha(self.config.glow_opacity_center),
            },
            GradientStop {
                offset: 0.5,
                color: color.with_alpha(self.config.glow_opacity_mid),
            },
            GradientStop {
                offset: 1.0,
                color: color.with_alpha(0.0),
            },
        ];
        surface.fill_radial_glow(particle.pos, particle.radius * 2.0, &glow)?;
        surface.fill_circle(
            particle.pos,
            particle.radius,
            color.with_alpha(self.config.core_opacity),
        )
    }
}
