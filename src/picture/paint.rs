//! ## Polar track painting
//!
//! Tracks after the first are not meant to be read.  Each one is filled with nibbles that
//! trace the picture around a circle, so that a flux visualizer shows the picture on the
//! disk surface.  Track 1 is the outer rim of the picture and the last track the inner rim.

use std::f64::consts::PI;
use crate::img::tracks::{TrackBits,TRACK_BUF_LEN,TRACK_BIT_CAPACITY};
use crate::DYNERR;
use super::bitmap::Bitmap;

/// Radius of the outermost painted track, in picture widths
pub const OUTER_RADIUS: f64 = 0.5;
/// Track spacing is this span divided by the number of tracks, so the innermost
/// painted track stops one spacing short of it
pub const INNER_RADIUS: f64 = 0.1415;
/// Flux transition on every bit cell, appears light
const LIGHT: u8 = 0xff;
/// Sparse flux transitions, appears dark
const DARK: u8 = 0x96;

/// Radius used for `track`, which must be from 1 to `num_tracks-1`.
/// Kept in single precision so edge pixels land the same as in existing picture disks.
pub fn track_radius(track: usize,num_tracks: usize) -> f32 {
    let radius_per_track = ((OUTER_RADIUS - INNER_RADIUS) / (num_tracks - 1) as f64) as f32;
    (OUTER_RADIUS - ((track - 1) as f32 * radius_per_track) as f64) as f32
}

/// Fill a whole track by sampling the picture around a circle.
/// Byte 0 is at the top and the bytes proceed clockwise.
pub fn paint_track(bitmap: &Bitmap,track: usize,num_tracks: usize) -> Result<TrackBits,DYNERR> {
    let r = track_radius(track,num_tracks);
    let arc = 2.0 * PI / TRACK_BUF_LEN as f64;
    let mut buf = vec![0;TRACK_BUF_LEN];
    for (k,byte) in buf.iter_mut().enumerate() {
        let theta = (PI/2.0 + arc * (TRACK_BUF_LEN - k) as f64) as f32;
        let u = (0.5 + (r * theta.cos()) as f64) as f32;
        let v = (0.5 - (r * theta.sin()) as f64) as f32;
        *byte = match bitmap.sample_greyscale(u,v) > 0.5 {
            true => LIGHT,
            false => DARK
        };
    }
    TrackBits::from_bytes(buf,TRACK_BIT_CAPACITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radii() {
        assert_eq!(track_radius(1,46) as f64,OUTER_RADIUS);
        // last track is 44 of 45 spacings in
        let innermost = OUTER_RADIUS - 44.0 * (OUTER_RADIUS - INNER_RADIUS) / 45.0;
        assert!((track_radius(45,46) as f64 - innermost).abs() < 1e-6);
        assert!(track_radius(45,46) as f64 > INNER_RADIUS + 0.007);
        assert_eq!(track_radius(2,2) as f64,OUTER_RADIUS);
        assert!(track_radius(20,46) < track_radius(19,46));
    }

    #[test]
    fn solid_track() {
        let white = Bitmap::create(1,1,vec![255,255,255,255]).expect("bad bitmap");
        let trk = paint_track(&white,1,46).expect("paint failed");
        assert_eq!(trk.bit_count(),TRACK_BIT_CAPACITY);
        assert_eq!(trk.block_count(),13);
        assert!(trk.as_slice().iter().all(|x| *x==LIGHT));
    }

    #[test]
    fn top_and_bottom() {
        // top half white, bottom half black
        let bmp = Bitmap::create(1,2,vec![255,255,255,255,0,0,0,255]).expect("bad bitmap");
        let trk = paint_track(&bmp,10,46).expect("paint failed");
        let bytes = trk.as_slice();
        assert_eq!(bytes[0],LIGHT);
        assert_eq!(bytes[TRACK_BUF_LEN/2],DARK);
        // left and right are both at the boundary, so check a bit above and below
        assert_eq!(bytes[TRACK_BUF_LEN/4 - 100],LIGHT);
        assert_eq!(bytes[TRACK_BUF_LEN/4 + 100],DARK);
        assert_eq!(bytes[3*TRACK_BUF_LEN/4 - 100],DARK);
        assert_eq!(bytes[3*TRACK_BUF_LEN/4 + 100],LIGHT);
    }
}
