//! Property-based tests for the matching engine.
//!
//! These pin down the algebraic contract: the similarity judgment is
//! symmetric and reflexive, comparison respects blank pixels, and the
//! reveal composite only ever grows.

use flagmatch::{
    colors_match, compare, union, FlagmatchError, Img, ImgVec, MatchParams, SimilarityModel, RGBA8,
};
use proptest::prelude::*;

fn arb_color() -> impl Strategy<Value = RGBA8> {
    (any::<u8>(), any::<u8>(), any::<u8>(), any::<u8>())
        .prop_map(|(r, g, b, a)| RGBA8 { r, g, b, a })
}

fn arb_model() -> impl Strategy<Value = SimilarityModel> {
    prop_oneof![
        Just(SimilarityModel::HslBanded),
        Just(SimilarityModel::LuminanceDistance),
        Just(SimilarityModel::EuclideanDistance),
    ]
}

fn arb_image() -> impl Strategy<Value = ImgVec<RGBA8>> {
    (1usize..8, 1usize..8).prop_flat_map(|(w, h)| {
        prop::collection::vec(arb_color(), w * h).prop_map(move |buf| Img::new(buf, w, h))
    })
}

/// Two independent images of one shared size.
fn arb_image_pair() -> impl Strategy<Value = (ImgVec<RGBA8>, ImgVec<RGBA8>)> {
    (1usize..8, 1usize..8).prop_flat_map(|(w, h)| {
        (
            prop::collection::vec(arb_color(), w * h),
            prop::collection::vec(arb_color(), w * h),
        )
            .prop_map(move |(b1, b2)| (Img::new(b1, w, h), Img::new(b2, w, h)))
    })
}

/// Three independent images of one shared size.
fn arb_image_triple() -> impl Strategy<Value = Vec<ImgVec<RGBA8>>> {
    (1usize..8, 1usize..8).prop_flat_map(|(w, h)| {
        prop::collection::vec(prop::collection::vec(arb_color(), w * h), 3)
            .prop_map(move |bufs| bufs.into_iter().map(|b| Img::new(b, w, h)).collect())
    })
}

fn is_blank(p: RGBA8) -> bool {
    p.r == 0 && p.g == 0 && p.b == 0 && p.a == 0
}

proptest! {
    /// colors_match(a, b) == colors_match(b, a) under every model.
    #[test]
    fn symmetry(a in arb_color(), b in arb_color(), model in arb_model()) {
        let params = MatchParams::default().with_model(model);
        prop_assert_eq!(
            colors_match(a, b, &params),
            colors_match(b, a, &params),
            "model {:?} is asymmetric for {:?} vs {:?}", model, a, b
        );
    }

    /// Every color matches itself under every model.
    #[test]
    fn reflexivity(a in arb_color(), model in arb_model()) {
        let params = MatchParams::default().with_model(model);
        prop_assert!(colors_match(a, a, &params), "model {:?} rejects {:?} against itself", model, a);
    }

    /// Comparing an image against itself reproduces it, and scores 100%
    /// whenever anything is there to score.
    #[test]
    fn identity_comparison(img in arb_image()) {
        let result = compare(img.as_ref(), img.as_ref(), &MatchParams::default()).unwrap();

        prop_assert_eq!(result.image.buf(), img.buf());

        let has_content = img.buf().iter().any(|&p| !is_blank(p));
        let expected = if has_content { 100 } else { 0 };
        prop_assert_eq!(result.percentage, expected);
    }

    /// The percentage is always a bounded integer.
    #[test]
    fn percentage_bounds((reference, candidate) in arb_image_pair()) {
        let result = compare(reference.as_ref(), candidate.as_ref(), &MatchParams::default()).unwrap();
        prop_assert!(result.percentage <= 100);
    }

    /// A blank reference pixel contributes nothing: the candidate's value
    /// underneath it can change freely without affecting the result.
    #[test]
    fn blank_reference_pixels_are_inert(
        (reference, candidate) in arb_image_pair(),
        replacement in arb_color(),
    ) {
        let params = MatchParams::default();
        let before = compare(reference.as_ref(), candidate.as_ref(), &params).unwrap();

        let Some(pos) = reference.buf().iter().position(|&p| is_blank(p)) else {
            return Ok(()); // no blank pixel generated this run
        };

        let mut mutated = candidate.buf().to_vec();
        mutated[pos] = replacement;
        let mutated = Img::new(mutated, candidate.width(), candidate.height());
        let after = compare(reference.as_ref(), mutated.as_ref(), &params).unwrap();

        prop_assert_eq!(before.percentage, after.percentage);
        prop_assert_eq!(before.image.buf(), after.image.buf());
    }

    /// Folding match images through union never un-reveals a pixel.
    #[test]
    fn monotonic_reveal(images in arb_image_triple()) {
        let mut composite: Option<ImgVec<RGBA8>> = None;

        for next in &images {
            let merged = union(composite.as_ref().map(|c| c.as_ref()), next.as_ref()).unwrap();

            if let Some(prev) = &composite {
                for (p, m) in prev.buf().iter().zip(merged.buf()) {
                    prop_assert!(
                        is_blank(*p) || !is_blank(*m),
                        "revealed pixel reverted to blank"
                    );
                }
            }
            composite = Some(merged);
        }
    }

    /// Union with no previous composite is a plain copy.
    #[test]
    fn union_with_absent_previous(img in arb_image()) {
        let composite = union(None, img.as_ref()).unwrap();
        prop_assert_eq!(composite.buf(), img.buf());
        prop_assert_eq!(composite.width(), img.width());
        prop_assert_eq!(composite.height(), img.height());
    }

    /// Union with a fully blank next image changes nothing.
    #[test]
    fn union_with_blank_next_is_identity(img in arb_image()) {
        let blank = Img::new(
            vec![RGBA8 { r: 0, g: 0, b: 0, a: 0 }; img.width() * img.height()],
            img.width(),
            img.height(),
        );
        let merged = union(Some(img.as_ref()), blank.as_ref()).unwrap();
        prop_assert_eq!(merged.buf(), img.buf());
    }

    /// Differing dimensions are rejected up front, for compare and union alike.
    #[test]
    fn dimension_guard(
        (w1, h1, w2, h2) in (1usize..8, 1usize..8, 1usize..8, 1usize..8)
            .prop_filter("dimensions must differ", |(w1, h1, w2, h2)| (w1, h1) != (w2, h2)),
        color in arb_color(),
    ) {
        let img1 = Img::new(vec![color; w1 * h1], w1, h1);
        let img2 = Img::new(vec![color; w2 * h2], w2, h2);

        let compared = compare(img1.as_ref(), img2.as_ref(), &MatchParams::default());
        let compared_is_mismatch = matches!(compared, Err(FlagmatchError::DimensionMismatch { .. }));
        prop_assert!(compared_is_mismatch);

        let unioned = union(Some(img1.as_ref()), img2.as_ref());
        let unioned_is_mismatch = matches!(unioned, Err(FlagmatchError::DimensionMismatch { .. }));
        prop_assert!(unioned_is_mismatch);
    }
}
