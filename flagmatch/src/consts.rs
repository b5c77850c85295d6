//! Default thresholds for the color similarity models.
//!
//! These are the tuned values the matcher ships with. Every one of them can
//! be overridden per comparison through [`crate::MatchParams`].

// ============================================================================
// HSL banded model
// ============================================================================

/// Maximum circular hue difference for a hue-based match, in degrees [0,360).
pub const HUE_THRESHOLD: f32 = 30.0;

/// Maximum absolute saturation difference, over [0,1].
pub const SATURATION_THRESHOLD: f32 = 0.5;

/// Maximum absolute lightness difference, over [0,1].
pub const LIGHTNESS_THRESHOLD: f32 = 0.5;

/// Lightness below which a color counts as "very dark".
///
/// A very dark color never matches a color that is not very dark, keeping
/// near-black pixels from pairing up with mid-tones.
pub const VERY_DARK_THRESHOLD: f32 = 0.15;

/// Lightness above which a color counts as "very light".
pub const VERY_LIGHT_THRESHOLD: f32 = 0.85;

/// Saturation below which a color is treated as gray.
///
/// When both colors are this desaturated their hue is meaningless and the
/// hue gate is skipped.
pub const GRAY_THRESHOLD: f32 = 0.1;

// ============================================================================
// Luminance + channel-distance model
// ============================================================================

/// Maximum absolute Rec. 601 luma difference, over [0,255].
pub const LUMA_THRESHOLD: f32 = 40.0;

/// Maximum absolute per-channel difference, over [0,255].
pub const CHANNEL_THRESHOLD: f32 = 70.0;

// ============================================================================
// Euclidean RGB-distance model
// ============================================================================

/// Maximum Euclidean RGB distance, over the [0,255] cube.
pub const DISTANCE_THRESHOLD: f32 = 90.0;
