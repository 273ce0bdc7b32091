use std::str::FromStr;

use crate::error::{PlateMapError, PlateMapResult};

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Opaque color from 8-bit channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

impl FromStr for Color {
    type Err = PlateMapError;

    /// Accepts `#RRGGBB` / `#RRGGBBAA` hex (leading `#` optional,
    /// case-insensitive) and CSS named colors.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PlateMapError::input("empty color value"));
        }

        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }

        if let Some(named) = palette::named::from_str(&s.to_ascii_lowercase()) {
            return Ok(Color::rgb(named.red, named.green, named.blue));
        }

        // Bare hex without the leading '#'. Named lookup runs first so a color
        // name can never be shadowed by an accidental hex interpretation.
        if matches!(s.len(), 6 | 8) && s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return parse_hex(s);
        }

        Err(PlateMapError::input(format!(
            "unrecognized color '{s}' (expected a CSS color name or #RRGGBB/#RRGGBBAA)"
        )))
    }
}

fn parse_hex(s: &str) -> PlateMapResult<Color> {
    if !s.is_ascii() {
        return Err(PlateMapError::input(format!("invalid hex color \"{s}\"")));
    }

    fn hex_byte(pair: &str) -> PlateMapResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| PlateMapError::input(format!("invalid hex byte \"{pair}\"")))
    }

    match s.len() {
        6 => Ok(Color {
            r: hex_byte(&s[0..2])?,
            g: hex_byte(&s[2..4])?,
            b: hex_byte(&s[4..6])?,
            a: 255,
        }),
        8 => Ok(Color {
            r: hex_byte(&s[0..2])?,
            g: hex_byte(&s[2..4])?,
            b: hex_byte(&s[4..6])?,
            a: hex_byte(&s[6..8])?,
        }),
        _ => Err(PlateMapError::input(
            "hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_rgb_and_rgba() {
        let c: Color = "#ff0000".parse().unwrap();
        assert_eq!(c, Color::rgb(255, 0, 0));

        let c: Color = "00FF00".parse().unwrap();
        assert_eq!(c, Color::rgb(0, 255, 0));

        let c: Color = "#0000ff80".parse().unwrap();
        assert_eq!((c.b, c.a), (255, 128));
    }

    #[test]
    fn parses_named_colors() {
        let c: Color = "red".parse().unwrap();
        assert_eq!(c, Color::rgb(255, 0, 0));

        let c: Color = " White ".parse().unwrap();
        assert_eq!(c, Color::WHITE);

        let c: Color = "cornflowerblue".parse().unwrap();
        assert_eq!(c, Color::rgb(100, 149, 237));
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", "#12345", "#ggg000", "notacolor", "#ff00"] {
            assert!(bad.parse::<Color>().is_err(), "accepted '{bad}'");
        }
    }
}
