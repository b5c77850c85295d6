//! Match-image construction and percentage accounting.

use crate::similarity::colors_match;
use crate::{MatchParams, MatchResult};
use imgref::{Img, ImgRef};
use rgb::RGBA8;

/// The "nothing revealed here" sentinel: fully transparent black.
pub(crate) const BLANK: RGBA8 = RGBA8 {
    r: 0,
    g: 0,
    b: 0,
    a: 0,
};

/// A pixel with every channel zero carries no flag content; it is padding
/// or transparent background and stays out of the percentage accounting.
pub(crate) fn is_blank(p: RGBA8) -> bool {
    p.r == 0 && p.g == 0 && p.b == 0 && p.a == 0
}

/// Floor percentage of matched over total non-blank reference pixels.
/// An entirely blank reference yields 0 rather than a division error.
pub(crate) fn percentage(matched: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    (matched * 100 / total) as u8
}

/// Raster scan over both grids. Dimensions are checked by the caller.
///
/// The output copies the reference pixel where the similarity model says
/// the colors agree and writes [`BLANK`] everywhere else. Counters run over
/// the reference side only: blank reference pixels contribute to neither
/// the numerator nor the denominator.
pub(crate) fn intersect_images(
    reference: ImgRef<RGBA8>,
    candidate: ImgRef<RGBA8>,
    params: &MatchParams,
) -> MatchResult {
    let (width, height) = (reference.width(), reference.height());

    let mut out = Vec::with_capacity(width * height);
    let mut matched: u64 = 0;
    let mut total: u64 = 0;

    for (ref_row, cand_row) in reference.rows().zip(candidate.rows()) {
        for (&pr, &pc) in ref_row.iter().zip(cand_row) {
            let hit = colors_match(pr, pc, params);
            out.push(if hit { pr } else { BLANK });

            if !is_blank(pr) {
                total += 1;
                if hit {
                    matched += 1;
                }
            }
        }
    }

    MatchResult {
        image: Img::new(out, width, height),
        percentage: percentage(matched, total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MatchParams;
    use imgref::Img;
    use rgb::RGBA8;

    const fn px(r: u8, g: u8, b: u8) -> RGBA8 {
        RGBA8 { r, g, b, a: 255 }
    }

    #[test]
    fn percentage_floors() {
        assert_eq!(percentage(0, 3), 0);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 66);
        assert_eq!(percentage(3, 3), 100);
    }

    #[test]
    fn percentage_of_empty_reference_is_zero() {
        assert_eq!(percentage(0, 0), 0);
    }

    #[test]
    fn counters_skip_blank_reference_pixels() {
        // Reference: red, blank. Candidate: near-red, green. The blank
        // reference pixel is out of the accounting entirely, so one match
        // out of one counted pixel reads as 100%.
        let reference = Img::new(vec![px(255, 0, 0), BLANK], 2, 1);
        let candidate = Img::new(vec![px(250, 5, 5), px(0, 255, 0)], 2, 1);

        let result = intersect_images(
            reference.as_ref(),
            candidate.as_ref(),
            &MatchParams::default(),
        );

        assert_eq!(result.percentage, 100);
        assert_eq!(result.image.buf(), &[px(255, 0, 0), BLANK]);
    }

    #[test]
    fn mismatches_blank_out_the_reference_pixel() {
        let reference = Img::new(vec![px(255, 255, 255)], 1, 1);
        let candidate = Img::new(vec![px(0, 0, 0)], 1, 1);

        let result = intersect_images(
            reference.as_ref(),
            candidate.as_ref(),
            &MatchParams::default(),
        );

        assert_eq!(result.percentage, 0);
        assert_eq!(result.image.buf(), &[BLANK]);
    }

    #[test]
    fn is_blank_requires_every_channel_zero() {
        assert!(is_blank(BLANK));
        assert!(!is_blank(RGBA8 { r: 0, g: 0, b: 0, a: 255 }));
        assert!(!is_blank(RGBA8 { r: 0, g: 0, b: 1, a: 0 }));
    }
}
