//! Colour palette for the monitor display.

use crossterm::style::Color;

/// 24-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale every channel by `factor`, truncating.
    #[must_use]
    pub fn dim(self, factor: f32) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        let scale = |c: u8| (f32::from(c) * factor) as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::Rgb {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
        }
    }
}

/// Handler zones and axis bars cycle through this palette.
pub const PALETTE: [Rgb; 8] = [
    Rgb::new(0xFF, 0x6B, 0x6B),
    Rgb::new(0x4E, 0xCD, 0xC4),
    Rgb::new(0xFF, 0xE6, 0x6D),
    Rgb::new(0x95, 0xE1, 0xD3),
    Rgb::new(0xF3, 0x81, 0x81),
    Rgb::new(0xAA, 0x96, 0xDA),
    Rgb::new(0xFC, 0xBA, 0xD3),
    Rgb::new(0xA8, 0xD8, 0xEA),
];

/// Brightness of a zone's background relative to its border colour.
pub const ZONE_DIM: f32 = 0.3;

pub const MARKER: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);
pub const TRACK: Rgb = Rgb::new(0x33, 0x33, 0x33);
pub const MUTED: Rgb = Rgb::new(0x88, 0x88, 0x88);
pub const READY: Rgb = Rgb::new(0x4E, 0xCD, 0xC4);
pub const ALERT: Rgb = Rgb::new(0xFF, 0x6B, 0x6B);

pub const fn palette_color(index: usize) -> Rgb {
    PALETTE[index % PALETTE.len()]
}
