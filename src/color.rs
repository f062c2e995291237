//! Color handling for baked lighting data
//!
//! Surfels store their low-frequency albedo in the YCoCg luma/chroma
//! encoding rather than RGB: the luma channel carries most of the
//! perceptual information, which lets downstream lighting passes
//! quantize the chroma channels more aggressively.
//!
//! Author: Moroya Sakamoto

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// An RGB color with linear-space helpers and YCoCg conversion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
}

impl Color {
    /// Opaque white
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };
    /// Opaque black
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };
    /// Mid gray
    pub const GRAY: Color = Color { r: 0.3, g: 0.3, b: 0.3 };

    /// Create a new color from RGB channels
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Color { r, g, b }
    }

    /// Create a grayscale color
    pub fn splat(white: f32) -> Self {
        Color { r: white, g: white, b: white }
    }

    /// RGB channels as a vector
    #[inline]
    pub fn rgb(&self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b)
    }

    /// Convert gamma-encoded channels to linear space (gamma 2.2)
    pub fn linear(&self) -> Color {
        Color {
            r: self.r.powf(2.2),
            g: self.g.powf(2.2),
            b: self.b.powf(2.2),
        }
    }

    /// Convert to the YCoCg luma/chroma encoding.
    ///
    /// Returns `(Y, Co, Cg)` packed in a vector: Y in [0, 1] for
    /// inputs in [0, 1], Co and Cg in [-0.5, 0.5].
    #[inline]
    pub fn to_ycocg(&self) -> Vec3 {
        let co = (self.r - self.b) / 2.0;
        let t = self.b + co;
        let cg = (self.g - t) / 2.0;
        let y = t + cg;
        Vec3::new(y, co, cg)
    }

    /// Reconstruct an RGB color from a YCoCg triple
    #[inline]
    pub fn from_ycocg(ycocg: Vec3) -> Color {
        let t = ycocg.x - ycocg.z;
        Color {
            r: t + ycocg.y,
            g: ycocg.x + ycocg.z,
            b: t - ycocg.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ycocg_round_trip() {
        let colors = [
            Color::WHITE,
            Color::BLACK,
            Color::new(1.0, 0.0, 0.0),
            Color::new(0.2, 0.7, 0.4),
        ];
        for color in colors {
            let back = Color::from_ycocg(color.to_ycocg());
            assert!((back.r - color.r).abs() < 1e-6);
            assert!((back.g - color.g).abs() < 1e-6);
            assert!((back.b - color.b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_gray_has_no_chroma() {
        let ycocg = Color::GRAY.to_ycocg();
        assert!((ycocg.x - 0.3).abs() < 1e-6);
        assert!(ycocg.y.abs() < 1e-6);
        assert!(ycocg.z.abs() < 1e-6);
    }

    #[test]
    fn test_linear_darkens_midtones() {
        let linear = Color::splat(0.5).linear();
        assert!(linear.r < 0.5);
    }
}
