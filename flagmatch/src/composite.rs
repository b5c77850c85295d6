//! The reveal composite: union of match images across guesses.

use crate::intersect::is_blank;
use imgref::{Img, ImgRef, ImgVec};
use rgb::RGBA8;

/// Per-coordinate merge of two same-sized images. Dimensions are checked by
/// the caller.
///
/// Newly revealed detail wins: wherever `next` is non-blank its pixel is
/// taken, otherwise whatever `previous` already revealed is kept. A pixel
/// revealed by any earlier guess therefore never reverts to blank.
pub(crate) fn union_images(previous: ImgRef<RGBA8>, next: ImgRef<RGBA8>) -> ImgVec<RGBA8> {
    let (width, height) = (previous.width(), previous.height());

    let mut out = Vec::with_capacity(width * height);
    for (prev_row, next_row) in previous.rows().zip(next.rows()) {
        for (&pp, &pn) in prev_row.iter().zip(next_row) {
            out.push(if is_blank(pn) { pp } else { pn });
        }
    }

    Img::new(out, width, height)
}

/// Stride-free owned copy of a borrowed image.
pub(crate) fn to_owned(img: ImgRef<RGBA8>) -> ImgVec<RGBA8> {
    let mut buf = Vec::with_capacity(img.width() * img.height());
    for row in img.rows() {
        buf.extend_from_slice(row);
    }
    Img::new(buf, img.width(), img.height())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intersect::BLANK;
    use imgref::Img;
    use rgb::RGBA8;

    const fn px(r: u8, g: u8, b: u8) -> RGBA8 {
        RGBA8 { r, g, b, a: 255 }
    }

    #[test]
    fn next_wins_where_non_blank() {
        let previous = Img::new(vec![px(255, 0, 0), BLANK], 2, 1);
        let next = Img::new(vec![px(0, 0, 255), px(0, 255, 0)], 2, 1);

        let merged = union_images(previous.as_ref(), next.as_ref());
        assert_eq!(merged.buf(), &[px(0, 0, 255), px(0, 255, 0)]);
    }

    #[test]
    fn blank_next_is_identity() {
        let previous = Img::new(vec![px(255, 0, 0), BLANK, px(0, 255, 0)], 3, 1);
        let next = Img::new(vec![BLANK; 3], 3, 1);

        let merged = union_images(previous.as_ref(), next.as_ref());
        assert_eq!(merged.buf(), previous.buf());
    }

    #[test]
    fn to_owned_round_trips() {
        let img = Img::new(vec![px(1, 2, 3), px(4, 5, 6)], 2, 1);
        let copy = to_owned(img.as_ref());
        assert_eq!(copy.buf(), img.buf());
        assert_eq!((copy.width(), copy.height()), (2, 1));
    }
}
