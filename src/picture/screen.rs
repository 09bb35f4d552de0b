//! ## Hi-res screen sampling
//!
//! The boot code displays a square picture in the upper left of the hi-res screen.
//! Each screen byte holds 7 pixels, least significant bit on the left, with the
//! high bit set.

use super::bitmap::Bitmap;

/// Width and height of the square picture in pixels
pub const HIRES_DIMENSION: usize = 147;
/// Screen bytes per row of the picture
pub const HIRES_STRIDE: usize = HIRES_DIMENSION / 7;
pub const HIRES_LEN: usize = HIRES_STRIDE * HIRES_DIMENSION;

/// Sample the bitmap onto the hi-res grid, rows are packed one after the other.
pub fn sample_hires(bitmap: &Bitmap) -> [u8;HIRES_LEN] {
    let mut ans = [0;HIRES_LEN];
    for y in 0..HIRES_DIMENSION {
        let v = y as f32 / HIRES_DIMENSION as f32;
        for col in 0..HIRES_STRIDE {
            let mut byte = 0x80;
            for bit in 0..7 {
                let u = (col*7 + bit) as f32 / HIRES_DIMENSION as f32;
                if bitmap.sample_greyscale(u,v) >= 0.5 {
                    byte |= 1 << bit;
                }
            }
            ans[y*HIRES_STRIDE + col] = byte;
        }
    }
    ans
}
