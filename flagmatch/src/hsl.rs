//! RGB to HSL conversion.
//!
//! The similarity judgment runs in hue/saturation/lightness space rather
//! than raw RGB: two flag regions printed in slightly different inks should
//! still count as the same color, while a gray should not pair up with a
//! saturated red of equal brightness.

use rgb::RGBA8;

/// A color in HSL space. Hue is in degrees [0,360), saturation and
/// lightness in [0,1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

/// Converts an sRGB pixel to HSL. Alpha is ignored; it participates in
/// blank detection only, never in the color math.
pub(crate) fn rgb_to_hsl(p: RGBA8) -> Hsl {
    let r = f32::from(p.r) / 255.0;
    let g = f32::from(p.g) / 255.0;
    let b = f32::from(p.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let l = (max + min) / 2.0;
    let mut h = 0.0;
    let mut s = 0.0;

    if delta > 0.0 {
        s = if l > 0.5 {
            delta / (2.0 - max - min)
        } else {
            delta / (max + min)
        };

        // Channel comparisons on the u8 values; ties resolve r, then g,
        // matching the max computed above.
        h = if p.r >= p.g && p.r >= p.b {
            ((g - b) / delta + if g < b { 6.0 } else { 0.0 }) / 6.0
        } else if p.g >= p.b {
            ((b - r) / delta + 2.0) / 6.0
        } else {
            ((r - g) / delta + 4.0) / 6.0
        };
    }

    Hsl { h: h * 360.0, s, l }
}

/// Circular hue distance in degrees: 359° and 1° are 2° apart.
pub(crate) fn hue_distance(h1: f32, h2: f32) -> f32 {
    let d = (h1 - h2).abs();
    if d > 180.0 {
        360.0 - d
    } else {
        d
    }
}
