//! RGBA colors for rings, labels and backgrounds.
//!
//! Colors can be written in a catalog as a CSS/SVG color name (`"black"`),
//! a hex code (`"#a8bd47"`, `"#a8bd4780"`), or a 3/4-element channel array.
//! An RGB triple is always treated as fully opaque.

use std::str::FromStr;

use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::error::BadgeError;

// ============================================================================
// Color
// ============================================================================

/// An 8-bit-per-channel sRGB color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ColorRepr", into = "ColorRepr")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// White with zero alpha; the default badge background.
    pub const TRANSPARENT: Self = Self::rgba(255, 255, 255, 0);

    /// Creates an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Returns true if the alpha channel is 255.
    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub(crate) fn to_pixel(self) -> image::Rgba<u8> {
        image::Rgba(self.to_array())
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::rgb(r, g, b)
    }
}

impl From<(u8, u8, u8, u8)> for Color {
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self {
        Self::rgba(r, g, b, a)
    }
}

impl From<Srgb<u8>> for Color {
    fn from(c: Srgb<u8>) -> Self {
        Self::rgb(c.red, c.green, c.blue)
    }
}

impl FromStr for Color {
    type Err = BadgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();

        if let Some(named) = palette::named::from_str(&lower) {
            return Ok(named.into());
        }

        let digits = lower.trim_start_matches('#');
        if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_hexdigit()) {
            match digits.len() {
                3 | 6 => {
                    if let Ok(rgb) = Srgb::<u8>::from_str(digits) {
                        return Ok(rgb.into());
                    }
                }
                8 => {
                    let (rgb, alpha) = digits.split_at(6);
                    let parsed = (Srgb::<u8>::from_str(rgb), u8::from_str_radix(alpha, 16));
                    if let (Ok(rgb), Ok(a)) = parsed {
                        return Ok(Color { a, ..Color::from(rgb) });
                    }
                }
                _ => {}
            }
        }

        Err(BadgeError::InvalidColor(trimmed.to_string()))
    }
}

// ============================================================================
// Serialized form
// ============================================================================

/// Wire representation of a [`Color`] in catalogs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(untagged)]
enum ColorRepr {
    Rgb([u8; 3]),
    Rgba([u8; 4]),
    Text(String),
}

impl TryFrom<ColorRepr> for Color {
    type Error = BadgeError;

    fn try_from(repr: ColorRepr) -> Result<Self, Self::Error> {
        match repr {
            ColorRepr::Rgb([r, g, b]) => Ok(Self::rgb(r, g, b)),
            ColorRepr::Rgba([r, g, b, a]) => Ok(Self::rgba(r, g, b, a)),
            ColorRepr::Text(s) => s.parse(),
        }
    }
}

impl From<Color> for ColorRepr {
    fn from(c: Color) -> Self {
        if c.is_opaque() {
            Self::Rgb([c.r, c.g, c.b])
        } else {
            Self::Rgba(c.to_array())
        }
    }
}

#[cfg(feature = "jsonschema")]
impl schemars::JsonSchema for Color {
    fn schema_name() -> String {
        "Color".to_owned()
    }

    fn json_schema(generator: &mut schemars::r#gen::SchemaGenerator) -> schemars::schema::Schema {
        <ColorRepr as schemars::JsonSchema>::json_schema(generator)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_colors() {
        assert_eq!("black".parse::<Color>().unwrap(), Color::BLACK);
        assert_eq!("White".parse::<Color>().unwrap(), Color::WHITE);
    }

    #[test]
    fn parses_hex_colors() {
        assert_eq!("#a8bd47".parse::<Color>().unwrap(), Color::rgb(168, 189, 71));
        assert_eq!("f4477a".parse::<Color>().unwrap(), Color::rgb(244, 71, 122));
        assert_eq!("#ffffff00".parse::<Color>().unwrap(), Color::TRANSPARENT);
    }

    #[test]
    fn rejects_unknown_color() {
        let err = "not-a-color".parse::<Color>().unwrap_err();
        assert!(matches!(err, BadgeError::InvalidColor(ref s) if s == "not-a-color"));
        assert!("#12345".parse::<Color>().is_err());
    }

    #[test]
    fn rgb_triple_is_opaque() {
        let c: Color = (4, 117, 193).into();
        assert!(c.is_opaque());
        assert_eq!(c.to_array(), [4, 117, 193, 255]);
    }

    #[test]
    fn deserializes_every_form() {
        let colors: Vec<Color> =
            serde_json::from_str(r##"["black", "#dc2c65", [209, 66, 161], [255, 255, 255, 0]]"##)
                .unwrap();
        assert_eq!(
            colors,
            vec![
                Color::BLACK,
                Color::rgb(220, 44, 101),
                Color::rgb(209, 66, 161),
                Color::TRANSPARENT,
            ]
        );
    }

    #[test]
    fn serializes_opaque_as_triple() {
        let json = serde_json::to_string(&Color::rgb(255, 70, 54)).unwrap();
        assert_eq!(json, "[255,70,54]");
        let json = serde_json::to_string(&Color::TRANSPARENT).unwrap();
        assert_eq!(json, "[255,255,255,0]");
    }

    #[test]
    fn invalid_string_in_json_fails() {
        let result: Result<Color, _> = serde_json::from_str(r#""blurple-ish""#);
        assert!(result.is_err());
    }
}
