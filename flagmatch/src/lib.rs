//! # flagmatch
//!
//! Pixel-wise perceptual matching for flag-guessing games.
//!
//! Given two equally-dimensioned images, [`compare`] produces a match image
//! containing only the pixels whose colors the similarity model judges
//! equivalent, together with a match percentage over the non-blank pixels
//! of the reference image. [`union`] folds per-guess match images into a
//! cumulative "revealed so far" composite.
//!
//! The similarity judgment runs in HSL space by default, with lightness and
//! saturation banding so near-black, near-white, and gray pixels never pair
//! up with mid-tones or strong hues. Two alternative policies are available
//! behind [`SimilarityModel`].
//!
//! Decoding image files and resizing the two inputs to a common size is the
//! caller's job; this crate operates on decoded pixel grids only and
//! performs no I/O.
//!
//! ## Example
//!
//! ```rust
//! use flagmatch::{compare, union, Img, MatchParams, RGBA8};
//!
//! let red = RGBA8::new(255, 0, 0, 255);
//! let near_red = RGBA8::new(250, 5, 5, 255);
//!
//! let target = Img::new(vec![red; 4], 2, 2);
//! let guess = Img::new(vec![near_red; 4], 2, 2);
//!
//! let params = MatchParams::default();
//! let result = compare(target.as_ref(), guess.as_ref(), &params)?;
//! assert_eq!(result.percentage, 100);
//!
//! // First guess establishes the composite; later guesses merge into it.
//! let composite = union(None, result.image.as_ref())?;
//! let composite = union(Some(composite.as_ref()), result.image.as_ref())?;
//! assert_eq!((composite.width(), composite.height()), (2, 2));
//! # Ok::<(), flagmatch::FlagmatchError>(())
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]

mod composite;
pub mod consts;
mod hsl;
mod intersect;
mod precompute;
mod similarity;

pub use precompute::MatchReference;
pub use similarity::{colors_match, SimilarityModel};

// Re-export imgref and rgb types for convenience
pub use imgref::{Img, ImgRef, ImgVec};
pub use rgb::{RGB8, RGBA8};

/// Error type for flagmatch operations.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FlagmatchError {
    /// Image dimensions don't match.
    ///
    /// Comparison and union never walk mismatched grids up to the shorter
    /// dimension; resizing to a common size is the caller's step.
    DimensionMismatch {
        /// First image width.
        w1: usize,
        /// First image height.
        h1: usize,
        /// Second image width.
        w2: usize,
        /// Second image height.
        h2: usize,
    },
}

impl std::fmt::Display for FlagmatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DimensionMismatch { w1, h1, w2, h2 } => {
                write!(f, "image dimensions don't match: {w1}x{h1} vs {w2}x{h2}")
            }
        }
    }
}

impl std::error::Error for FlagmatchError {}

/// Comparison parameters: similarity model selection plus the thresholds
/// the models run with.
///
/// Use the builder pattern to construct:
/// ```rust
/// use flagmatch::{MatchParams, SimilarityModel};
///
/// let params = MatchParams::new()
///     .with_model(SimilarityModel::HslBanded)
///     .with_hue_threshold(20.0)   // stricter hue agreement
///     .with_gray_threshold(0.15); // wider gray band
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MatchParams {
    model: SimilarityModel,
    hue_threshold: f32,
    saturation_threshold: f32,
    lightness_threshold: f32,
    very_dark_threshold: f32,
    very_light_threshold: f32,
    gray_threshold: f32,
    luma_threshold: f32,
    channel_threshold: f32,
    distance_threshold: f32,
}

impl Default for MatchParams {
    fn default() -> Self {
        Self {
            model: SimilarityModel::default(),
            hue_threshold: consts::HUE_THRESHOLD,
            saturation_threshold: consts::SATURATION_THRESHOLD,
            lightness_threshold: consts::LIGHTNESS_THRESHOLD,
            very_dark_threshold: consts::VERY_DARK_THRESHOLD,
            very_light_threshold: consts::VERY_LIGHT_THRESHOLD,
            gray_threshold: consts::GRAY_THRESHOLD,
            luma_threshold: consts::LUMA_THRESHOLD,
            channel_threshold: consts::CHANNEL_THRESHOLD,
            distance_threshold: consts::DISTANCE_THRESHOLD,
        }
    }
}

impl MatchParams {
    /// Creates a new `MatchParams` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the similarity model.
    #[must_use]
    pub fn with_model(mut self, model: SimilarityModel) -> Self {
        self.model = model;
        self
    }

    /// Sets the maximum circular hue difference (degrees) for a hue-based
    /// match under the banded model.
    #[must_use]
    pub fn with_hue_threshold(mut self, degrees: f32) -> Self {
        self.hue_threshold = degrees;
        self
    }

    /// Sets the maximum saturation difference under the banded model.
    #[must_use]
    pub fn with_saturation_threshold(mut self, threshold: f32) -> Self {
        self.saturation_threshold = threshold;
        self
    }

    /// Sets the maximum lightness difference under the banded model.
    #[must_use]
    pub fn with_lightness_threshold(mut self, threshold: f32) -> Self {
        self.lightness_threshold = threshold;
        self
    }

    /// Sets the lightness below which a color counts as very dark.
    #[must_use]
    pub fn with_very_dark_threshold(mut self, threshold: f32) -> Self {
        self.very_dark_threshold = threshold;
        self
    }

    /// Sets the lightness above which a color counts as very light.
    #[must_use]
    pub fn with_very_light_threshold(mut self, threshold: f32) -> Self {
        self.very_light_threshold = threshold;
        self
    }

    /// Sets the saturation below which a color is treated as gray.
    #[must_use]
    pub fn with_gray_threshold(mut self, threshold: f32) -> Self {
        self.gray_threshold = threshold;
        self
    }

    /// Sets the maximum Rec. 601 luma difference for the luminance model.
    #[must_use]
    pub fn with_luma_threshold(mut self, threshold: f32) -> Self {
        self.luma_threshold = threshold;
        self
    }

    /// Sets the maximum per-channel difference for the luminance model.
    #[must_use]
    pub fn with_channel_threshold(mut self, threshold: f32) -> Self {
        self.channel_threshold = threshold;
        self
    }

    /// Sets the maximum RGB distance for the Euclidean model.
    #[must_use]
    pub fn with_distance_threshold(mut self, threshold: f32) -> Self {
        self.distance_threshold = threshold;
        self
    }

    /// Returns the selected similarity model.
    #[must_use]
    pub fn model(&self) -> SimilarityModel {
        self.model
    }

    /// Returns the hue threshold in degrees.
    #[must_use]
    pub fn hue_threshold(&self) -> f32 {
        self.hue_threshold
    }

    /// Returns the saturation threshold.
    #[must_use]
    pub fn saturation_threshold(&self) -> f32 {
        self.saturation_threshold
    }

    /// Returns the lightness threshold.
    #[must_use]
    pub fn lightness_threshold(&self) -> f32 {
        self.lightness_threshold
    }

    /// Returns the very-dark lightness boundary.
    #[must_use]
    pub fn very_dark_threshold(&self) -> f32 {
        self.very_dark_threshold
    }

    /// Returns the very-light lightness boundary.
    #[must_use]
    pub fn very_light_threshold(&self) -> f32 {
        self.very_light_threshold
    }

    /// Returns the gray saturation boundary.
    #[must_use]
    pub fn gray_threshold(&self) -> f32 {
        self.gray_threshold
    }

    /// Returns the luma threshold.
    #[must_use]
    pub fn luma_threshold(&self) -> f32 {
        self.luma_threshold
    }

    /// Returns the per-channel threshold.
    #[must_use]
    pub fn channel_threshold(&self) -> f32 {
        self.channel_threshold
    }

    /// Returns the Euclidean distance threshold.
    #[must_use]
    pub fn distance_threshold(&self) -> f32 {
        self.distance_threshold
    }
}

/// Result of comparing a guess against a reference image.
#[derive(Debug, Clone)]
pub struct MatchResult {
    /// Match image: the reference pixel wherever the colors agreed,
    /// transparent black everywhere else. Same dimensions as the inputs.
    pub image: ImgVec<RGBA8>,
    /// Floor percentage of matched non-blank reference pixels, in [0,100].
    /// A reference with no non-blank pixels scores 0.
    pub percentage: u8,
}

fn check_dimensions(
    w1: usize,
    h1: usize,
    w2: usize,
    h2: usize,
) -> Result<(), FlagmatchError> {
    if w1 != w2 || h1 != h2 {
        return Err(FlagmatchError::DimensionMismatch { w1, h1, w2, h2 });
    }
    Ok(())
}

/// Compares `candidate` against `reference` pixel by pixel.
///
/// Every coordinate where the similarity model judges the two colors
/// equivalent contributes the reference pixel to the match image; every
/// other coordinate is transparent black. The percentage counts matched
/// non-blank reference pixels over all non-blank reference pixels,
/// floored to an integer.
///
/// Both inputs are read-only; the match image is a fresh allocation.
///
/// # Errors
/// Returns [`FlagmatchError::DimensionMismatch`] when the two grids differ
/// in width or height. Resize before calling; the engine never resizes.
pub fn compare(
    reference: ImgRef<RGBA8>,
    candidate: ImgRef<RGBA8>,
    params: &MatchParams,
) -> Result<MatchResult, FlagmatchError> {
    check_dimensions(
        reference.width(),
        reference.height(),
        candidate.width(),
        candidate.height(),
    )?;
    Ok(intersect::intersect_images(reference, candidate, params))
}

/// Merges a new match image into the running reveal composite.
///
/// With no `previous` composite the result is a copy of `next`. Otherwise,
/// wherever `next` has a non-blank pixel it wins; everywhere else the
/// previously revealed pixel is kept. Revealed area therefore never
/// shrinks across successive calls.
///
/// # Errors
/// Returns [`FlagmatchError::DimensionMismatch`] when both images are
/// present and differ in width or height.
pub fn union(
    previous: Option<ImgRef<RGBA8>>,
    next: ImgRef<RGBA8>,
) -> Result<ImgVec<RGBA8>, FlagmatchError> {
    let Some(previous) = previous else {
        return Ok(composite::to_owned(next));
    };
    check_dimensions(
        previous.width(),
        previous.height(),
        next.width(),
        next.height(),
    )?;
    Ok(composite::union_images(previous, next))
}

/// Converts an RGB grid to the RGBA layout the engine works in, with every
/// pixel fully opaque.
///
/// Opaque black input pixels become `(0,0,0,255)`, which still counts as
/// non-blank; only decoded transparency produces blank pixels.
#[must_use]
pub fn rgb_to_rgba(img: ImgRef<RGB8>) -> ImgVec<RGBA8> {
    let mut buf = Vec::with_capacity(img.width() * img.height());
    for row in img.rows() {
        buf.extend(row.iter().map(|p| RGBA8::new(p.r, p.g, p.b, 255)));
    }
    Img::new(buf, img.width(), img.height())
}
