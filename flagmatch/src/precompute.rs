//! Precomputed reference data for fast repeated comparisons.
//!
//! A game session compares every guess against the same fixed target flag.
//! [`MatchReference`] converts the target to HSL once and caches its
//! non-blank pixel total, so each guess pays the conversion for its own
//! side only.
//!
//! # Example
//!
//! ```
//! use flagmatch::{Img, MatchParams, MatchReference, RGBA8};
//!
//! let red = RGBA8::new(255, 0, 0, 255);
//! let target = Img::new(vec![red; 16], 4, 4);
//!
//! let reference = MatchReference::new(target.as_ref(), MatchParams::default());
//! for shade in [250u8, 200, 120] {
//!     let guess = Img::new(vec![RGBA8::new(shade, 5, 5, 255); 16], 4, 4);
//!     let result = reference.compare_with(guess.as_ref()).expect("same dimensions");
//!     println!("shade {shade}: {}%", result.percentage);
//! }
//! ```

use crate::hsl::{rgb_to_hsl, Hsl};
use crate::intersect::{is_blank, percentage, BLANK};
use crate::similarity::{colors_match, hsl_match, SimilarityModel};
use crate::{FlagmatchError, MatchParams, MatchResult};
use imgref::{Img, ImgRef};
use rgb::RGBA8;

/// A target image with its reference-side work done up front.
///
/// [`MatchReference::compare_with`] produces pixel-for-pixel the same
/// [`MatchResult`] as [`crate::compare`] against the same target and
/// parameters.
#[derive(Debug, Clone)]
pub struct MatchReference {
    /// Target pixels, row-major and stride-free.
    pixels: Vec<RGBA8>,
    /// Per-pixel HSL of the target; cached for the banded model only.
    hsl: Option<Vec<Hsl>>,
    /// Non-blank pixel count of the target, the percentage denominator.
    total_non_blank: u64,
    width: usize,
    height: usize,
    params: MatchParams,
}

impl MatchReference {
    /// Precomputes reference data for `target` under `params`.
    #[must_use]
    pub fn new(target: ImgRef<RGBA8>, params: MatchParams) -> Self {
        let mut pixels = Vec::with_capacity(target.width() * target.height());
        for row in target.rows() {
            pixels.extend_from_slice(row);
        }

        let total_non_blank = pixels.iter().filter(|&&p| !is_blank(p)).count() as u64;

        let hsl = match params.model() {
            SimilarityModel::HslBanded => {
                Some(pixels.iter().map(|&p| rgb_to_hsl(p)).collect())
            }
            _ => None,
        };

        Self {
            pixels,
            hsl,
            total_non_blank,
            width: target.width(),
            height: target.height(),
            params,
        }
    }

    /// Target width in pixels.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Target height in pixels.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The parameters this reference was built with.
    #[must_use]
    pub fn params(&self) -> &MatchParams {
        &self.params
    }

    /// Compares a candidate against the precomputed target.
    ///
    /// # Errors
    /// Returns [`FlagmatchError::DimensionMismatch`] when the candidate's
    /// dimensions differ from the target's.
    pub fn compare_with(&self, candidate: ImgRef<RGBA8>) -> Result<MatchResult, FlagmatchError> {
        if candidate.width() != self.width || candidate.height() != self.height {
            return Err(FlagmatchError::DimensionMismatch {
                w1: self.width,
                h1: self.height,
                w2: candidate.width(),
                h2: candidate.height(),
            });
        }

        let mut out = Vec::with_capacity(self.width * self.height);
        let mut matched: u64 = 0;

        for (y, cand_row) in candidate.rows().enumerate() {
            let row_start = y * self.width;
            for (x, &pc) in cand_row.iter().enumerate() {
                let idx = row_start + x;
                let pr = self.pixels[idx];

                let hit = match &self.hsl {
                    Some(hsl) => hsl_match(&hsl[idx], &rgb_to_hsl(pc), &self.params),
                    None => colors_match(pr, pc, &self.params),
                };

                out.push(if hit { pr } else { BLANK });
                if hit && !is_blank(pr) {
                    matched += 1;
                }
            }
        }

        Ok(MatchResult {
            image: Img::new(out, self.width, self.height),
            percentage: percentage(matched, self.total_non_blank),
        })
    }
}
