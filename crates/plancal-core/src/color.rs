//! Deterministic phase-to-color assignment.
//!
//! The same normalized phase name always maps to the same RGB triple,
//! across runs and platforms. The key is trimmed and case-folded, hashed
//! with SHA-256, and the first two digest bytes select a hue on an HSL
//! wheel with fixed saturation and lightness.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

const SATURATION: f64 = 0.65;
const LIGHTNESS: f64 = 0.52;

/// 24-bit RGB triple, opaque to the layout core
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Uppercase `RRGGBB` form, as consumed by `xcolor` and SVG
    pub fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Deterministic color for a phase (or sub-phase) name
pub fn phase_color(name: &str) -> Color {
    let digest = Sha256::digest(normalize_key(name).as_bytes());
    let hue = f64::from(u16::from_be_bytes([digest[0], digest[1]]) % 360);
    hsl_to_rgb(hue, SATURATION, LIGHTNESS)
}

fn normalize_key(name: &str) -> String {
    name.trim().to_lowercase()
}

fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> Color {
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let hue_prime = hue / 60.0;
    let x = chroma * (1.0 - (hue_prime % 2.0 - 1.0).abs());
    let (r1, g1, b1) = match hue_prime as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = lightness - chroma / 2.0;
    Color {
        r: ((r1 + m) * 255.0).round() as u8,
        g: ((g1 + m) * 255.0).round() as u8,
        b: ((b1 + m) * 255.0).round() as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn stable_across_calls() {
        assert_eq!(phase_color("Writing"), phase_color("Writing"));
    }

    #[test]
    fn invariant_under_trim_and_case() {
        let base = phase_color("Writing");
        assert_eq!(phase_color("  Writing  "), base);
        assert_eq!(phase_color("WRITING"), base);
        assert_eq!(phase_color("writing"), base);
    }

    #[test]
    fn distinct_names_differ() {
        // Not guaranteed for arbitrary inputs, but these must not collide
        // for the wheel to be useful at all.
        let names = ["Writing", "Review", "Analysis", "Submission"];
        for (i, a) in names.iter().enumerate() {
            for b in &names[i + 1..] {
                assert_ne!(phase_color(a), phase_color(b), "{a} vs {b}");
            }
        }
    }

    #[test]
    fn hex_is_six_uppercase_digits() {
        let hex = phase_color("Writing").hex();
        assert_eq!(hex.len(), 6);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(hex, hex.to_uppercase());
    }

    #[test]
    fn hsl_conversion_primaries() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), Color::new(255, 0, 0));
        assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), Color::new(0, 255, 0));
        assert_eq!(hsl_to_rgb(240.0, 1.0, 0.5), Color::new(0, 0, 255));
    }
}
