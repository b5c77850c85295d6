//! Color similarity strategies.
//!
//! Three policies decide whether two pixel colors count as "the same color"
//! for matching purposes. They are deliberately kept as separate strategies
//! behind one enum rather than merged into a single thresholded formula;
//! their thresholds are not comparable.

use crate::hsl::{hue_distance, rgb_to_hsl, Hsl};
use crate::MatchParams;
use rgb::RGBA8;

/// Selects which color similarity policy a comparison uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SimilarityModel {
    /// HSL with lightness/saturation banding (default).
    ///
    /// Rejects very-dark vs not-very-dark and very-light vs not-very-light
    /// pairs outright, then gates on circular hue distance (skipped when
    /// both colors are near-gray), saturation delta, and lightness delta.
    #[default]
    HslBanded,
    /// Rec. 601 luma gate followed by per-channel RGB distance.
    LuminanceDistance,
    /// Plain Euclidean distance in the RGB cube.
    EuclideanDistance,
}

/// Returns true when the two colors are perceptually equivalent under the
/// model selected in `params`.
///
/// Pure, total, and symmetric: `colors_match(a, b, p) == colors_match(b, a, p)`
/// for every pair. All-zero pixels are evaluated like any other color; they
/// read as very dark and therefore only match other very-dark colors.
#[must_use]
pub fn colors_match(a: RGBA8, b: RGBA8, params: &MatchParams) -> bool {
    match params.model() {
        SimilarityModel::HslBanded => hsl_match(&rgb_to_hsl(a), &rgb_to_hsl(b), params),
        SimilarityModel::LuminanceDistance => luminance_match(a, b, params),
        SimilarityModel::EuclideanDistance => euclidean_match(a, b, params),
    }
}

/// Banded HSL rules over already-converted colors.
///
/// Split out so a precomputed reference can cache the HSL of its own side
/// and pay the conversion only for the candidate.
pub(crate) fn hsl_match(ca: &Hsl, cb: &Hsl, params: &MatchParams) -> bool {
    // A very dark or very light color only ever matches a color in the same
    // band; without this, near-black pixels pair up with mid-tones whose
    // hue happens to be close.
    let one_very_dark =
        (ca.l < params.very_dark_threshold()) != (cb.l < params.very_dark_threshold());
    let one_very_light =
        (ca.l > params.very_light_threshold()) != (cb.l > params.very_light_threshold());
    if one_very_dark || one_very_light {
        return false;
    }

    // Hue is meaningless on near-grays; skip the hue gate when both sides
    // are desaturated.
    let both_desaturated = ca.s < params.gray_threshold() && cb.s < params.gray_threshold();
    let hue_diff = hue_distance(ca.h, cb.h);

    (hue_diff < params.hue_threshold() || both_desaturated)
        && (ca.s - cb.s).abs() < params.saturation_threshold()
        && (ca.l - cb.l).abs() < params.lightness_threshold()
}

fn luma(p: RGBA8) -> f32 {
    0.299 * f32::from(p.r) + 0.587 * f32::from(p.g) + 0.114 * f32::from(p.b)
}

fn luminance_match(a: RGBA8, b: RGBA8, params: &MatchParams) -> bool {
    if (luma(a) - luma(b)).abs() > params.luma_threshold() {
        return false;
    }
    let dr = (f32::from(a.r) - f32::from(b.r)).abs();
    let dg = (f32::from(a.g) - f32::from(b.g)).abs();
    let db = (f32::from(a.b) - f32::from(b.b)).abs();
    dr <= params.channel_threshold()
        && dg <= params.channel_threshold()
        && db <= params.channel_threshold()
}

fn euclidean_match(a: RGBA8, b: RGBA8, params: &MatchParams) -> bool {
    let dr = f32::from(a.r) - f32::from(b.r);
    let dg = f32::from(a.g) - f32::from(b.g);
    let db = f32::from(a.b) - f32::from(b.b);
    (dr * dr + dg * dg + db * db).sqrt() < params.distance_threshold()
}
