// Simple color struct, created from an unsigned 32 representing 0xRRGGBB.
// Opacity is never baked in: every draw call picks its own alpha.

use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn from_u32(num: u32) -> Color {
        let r = (num >> 16) as u8;
        let g = (num >> 8) as u8;
        let b = num as u8;

        Color { r, g, b }
    }

    pub fn with_alpha(self, alpha: f64) -> Rgba {
        Rgba { color: self, alpha }
    }
}

/// A color paired with an opacity, formatted as a CSS `rgba(...)` string.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rgba {
    pub color: Color,
    pub alpha: f64,
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({}, {}, {}, {})",
            self.color.r, self.color.g, self.color.b, self.alpha
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpacks_rgb_channels() {
        let c = Color::from_u32(0x78dc10);
        assert_eq!(c, Color { r: 0x78, g: 0xdc, b: 0x10 });
    }

    #[test]
    fn formats_as_css_rgba() {
        let css = Color::from_u32(0x787878).with_alpha(0.5).to_string();
        assert_eq!(css, "rgba(120, 120, 120, 0.5)");
    }
}
