//! Deterministic synthetic flag images for tests.
//!
//! These produce flag-like pixel grids using an LCG PRNG where randomness
//! is needed, ensuring identical test inputs across all platforms.

use flagmatch::{Img, ImgVec, RGBA8};

/// Fully transparent black: the "no flag content" sentinel.
pub const BLANK: RGBA8 = RGBA8 {
    r: 0,
    g: 0,
    b: 0,
    a: 0,
};

/// Opaque pixel shorthand.
pub const fn px(r: u8, g: u8, b: u8) -> RGBA8 {
    RGBA8 { r, g, b, a: 255 }
}

// ============================================================================
// LCG PRNG
// ============================================================================

/// LCG pseudo-random number generator (deterministic)
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u8(&mut self) -> u8 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.state >> 33) & 0xFF) as u8
    }
}

// ============================================================================
// Image generation
// ============================================================================

/// Solid color image.
pub fn solid(width: usize, height: usize, color: RGBA8) -> ImgVec<RGBA8> {
    Img::new(vec![color; width * height], width, height)
}

/// Vertical tricolor; the last stripe absorbs any width remainder.
pub fn vertical_tricolor(width: usize, height: usize, colors: [RGBA8; 3]) -> ImgVec<RGBA8> {
    let stripe = width / 3;
    let mut buf = Vec::with_capacity(width * height);
    for _y in 0..height {
        for x in 0..width {
            let c = if x < stripe {
                colors[0]
            } else if x < 2 * stripe {
                colors[1]
            } else {
                colors[2]
            };
            buf.push(c);
        }
    }
    Img::new(buf, width, height)
}

/// Opaque random-color image.
pub fn noise(width: usize, height: usize, seed: u64) -> ImgVec<RGBA8> {
    let mut rng = Lcg::new(seed);
    let buf = (0..width * height)
        .map(|_| px(rng.next_u8(), rng.next_u8(), rng.next_u8()))
        .collect();
    Img::new(buf, width, height)
}
