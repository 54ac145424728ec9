//! Color handling for ArtWeave diagrams
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Colors always display as 8-bit sRGB hex, so palette
//! entries round-trip into SVG attributes unchanged.

use std::{fmt, str::FromStr};

use color::{DynamicColor, Srgb};

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use artweave_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// assert_eq!(red.to_string(), "#ff0000");
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        write!(f, "#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)?;
        if rgba.a != u8::MAX {
            write!(f, "{:02x}", rgba.a)?;
        }
        Ok(())
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        assert!(Color::new("#ff0000").is_ok());
        assert!(Color::new("not-a-color").is_err());
    }

    #[test]
    fn test_color_default() {
        assert_eq!(Color::default().to_string(), "#000000");
    }

    #[test]
    fn test_hex_round_trips_without_float_noise() {
        for hex in ["#fce7f3", "#1f2937", "#d97706", "#ffffff"] {
            assert_eq!(Color::new(hex).unwrap().to_string(), hex);
        }
    }

    #[test]
    fn test_named_and_translucent_colors() {
        assert_eq!(Color::new("blue").unwrap().to_string(), "#0000ff");
        assert_eq!(
            Color::new("rgba(255, 0, 0, 0.25)").unwrap().to_string(),
            "#ff000040"
        );
    }
}
