//! Minimal end-to-end run: compare two tricolor flags, then accumulate the
//! reveal composite across a second guess.

use flagmatch::{compare, union, Img, ImgVec, MatchParams, RGBA8};

const fn px(r: u8, g: u8, b: u8) -> RGBA8 {
    RGBA8 { r, g, b, a: 255 }
}

fn vertical_tricolor(width: usize, height: usize, colors: [RGBA8; 3]) -> ImgVec<RGBA8> {
    let stripe = width / 3;
    let mut buf = Vec::with_capacity(width * height);
    for _y in 0..height {
        for x in 0..width {
            buf.push(colors[(x / stripe).min(2)]);
        }
    }
    Img::new(buf, width, height)
}

fn revealed(img: &ImgVec<RGBA8>) -> usize {
    img.buf()
        .iter()
        .filter(|p| p.r != 0 || p.g != 0 || p.b != 0 || p.a != 0)
        .count()
}

fn main() {
    let france = vertical_tricolor(90, 60, [px(0, 85, 164), px(255, 255, 255), px(239, 65, 53)]);
    let ireland = vertical_tricolor(90, 60, [px(22, 155, 98), px(255, 255, 255), px(255, 136, 62)]);
    let netherlands =
        vertical_tricolor(90, 60, [px(174, 28, 40), px(255, 255, 255), px(33, 70, 139)]);

    let params = MatchParams::default();

    let first = compare(france.as_ref(), ireland.as_ref(), &params).expect("same dimensions");
    println!("ireland vs france: {}%", first.percentage);

    let composite = union(None, first.image.as_ref()).expect("first guess");

    let second = compare(france.as_ref(), netherlands.as_ref(), &params).expect("same dimensions");
    println!("netherlands vs france: {}%", second.percentage);

    let composite = union(Some(composite.as_ref()), second.image.as_ref()).expect("same dimensions");
    println!(
        "revealed after two guesses: {}/{} pixels",
        revealed(&composite),
        composite.width() * composite.height()
    );
}
