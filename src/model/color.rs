//! Crosshair color.

use std::fmt;
use std::str::FromStr;

/// Opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Background key of color-keyed overlay windows.
    ///
    /// Never accepted as a crosshair color: [`Rgb::selectable`] maps it away.
    pub const TRANSPARENT_KEY: Rgb = Rgb::new(0x00, 0x00, 0x01);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `RRGGBB` (any case, surrounding whitespace ignored).
    pub fn parse_hex(s: &str) -> Option<Self> {
        let t = s.trim();
        let hex = t.strip_prefix('#').unwrap_or(t);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self::new(r, g, b))
    }

    /// `#RRGGBB`, upper-case.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// The color as it may be drawn: the transparent key becomes pure black.
    pub fn selectable(self) -> Self {
        if self == Self::TRANSPARENT_KEY {
            Self::new(0, 0, 0)
        } else {
            self
        }
    }

    /// Components normalised to [0, 1] for Direct2D.
    pub fn to_unit_f32(self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }

    /// Pack as a Win32 `COLORREF` value (0x00BBGGRR).
    pub fn to_colorref(self) -> u32 {
        self.r as u32 | (self.g as u32) << 8 | (self.b as u32) << 16
    }

    /// Unpack a Win32 `COLORREF` value.
    pub fn from_colorref(value: u32) -> Self {
        Self::new(
            (value & 0xFF) as u8,
            ((value >> 8) & 0xFF) as u8,
            ((value >> 16) & 0xFF) as u8,
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s).ok_or_else(|| format!("invalid color: {s:?}"))
    }
}
