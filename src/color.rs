use std::str::FromStr;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::error::DiagramError;

// ---------------------------------------------------------------------------
// Colour names and hex codes
// ---------------------------------------------------------------------------

/// Parse a CSS colour name (`"green"`) or hex code (`"#4472C4"`).
pub fn parse_color(spec: &str) -> Result<Color32, DiagramError> {
    let spec = spec.trim();
    let rgb: Srgb<u8> = if spec.starts_with('#') {
        Srgb::from_str(spec).map_err(|_| DiagramError::InvalidColor(spec.to_string()))?
    } else {
        palette::named::from_str(&spec.to_ascii_lowercase())
            .ok_or_else(|| DiagramError::InvalidColor(spec.to_string()))?
    };
    Ok(Color32::from_rgb(rgb.red, rgb.green, rgb.blue))
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_color("#4472C4").unwrap(), Color32::from_rgb(0x44, 0x72, 0xC4));
        assert_eq!(parse_color("#fec001").unwrap(), Color32::from_rgb(0xFE, 0xC0, 0x01));
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(parse_color("black").unwrap(), Color32::from_rgb(0, 0, 0));
        assert_eq!(parse_color("Green").unwrap(), Color32::from_rgb(0, 128, 0));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(parse_color("#12"), Err(DiagramError::InvalidColor(_))));
        assert!(matches!(parse_color("not-a-colour"), Err(DiagramError::InvalidColor(_))));
    }

    #[test]
    fn test_palette_distinct() {
        let colors = generate_palette(4);
        assert_eq!(colors.len(), 4);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }
}
