use crate::foundation::error::{TimetableError, TimetableResult};

pub use kurbo::{Line, Point, Rect};

/// Page units per typographic point (page units are millimetres).
pub const UNITS_PER_PT: f64 = 25.4 / 72.0;

/// Build a rectangle from its top-left corner and size, the way page coordinates are specified.
pub fn rect_xywh(x: f64, y: f64, w: f64, h: f64) -> Rect {
    Rect::new(x, y, x + w, y + h)
}

/// Straight (non-premultiplied) RGB8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const LIGHT_GREY: Self = Self::new(178, 178, 178);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (the leading `#` is optional, case-insensitive).
    pub fn from_hex(s: &str) -> TimetableResult<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(TimetableError::validation(format!(
                "hex color must be #RRGGBB, got \"{s}\""
            )));
        }

        fn hex_byte(pair: &str) -> TimetableResult<u8> {
            u8::from_str_radix(pair, 16).map_err(|_| {
                TimetableError::validation(format!("invalid hex byte \"{pair}\""))
            })
        }

        Ok(Self {
            r: hex_byte(&hex[0..2])?,
            g: hex_byte(&hex[2..4])?,
            b: hex_byte(&hex[4..6])?,
        })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channels scaled to `0.0..=1.0`.
    pub fn to_unit_f32(self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
