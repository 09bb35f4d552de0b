//! # Picture Disk Module
//!
//! Turns a picture into the tracks of a picture disk.
//!
//! * track 0 is an ordinary DOS order track that boots and shows the picture on the hi-res screen
//! * the remaining tracks are painted with the picture in polar coordinates, they hold no data
//!
//! The tracks are handed to `img::woz2` to build the disk image.

pub mod bitmap;
pub mod screen;
pub mod boot;
pub mod paint;

use log::{info,error};
use crate::img;
use crate::img::tracks::{TrackBits,SectorOrder};
use crate::img::woz2::MAX_TRACKS;
use crate::DYNERR;
use bitmap::Bitmap;

/// Number of tracks on the disk unless otherwise requested
pub const DEFAULT_TRACKS: usize = 46;

/// Enumerates picture errors.  The `Display` trait will print equivalent long message.
#[derive(thiserror::Error,Debug)]
pub enum Error {
    #[error("bitmap dimensions do not match the pixel data")]
    BitmapSize
}

#[derive(Clone,Debug)]
pub struct PictureParams {
    /// total tracks including the boot track, from 1 to 53
    pub tracks: usize,
    /// shown below the picture, replaces the built in message
    pub message: Option<String>
}

impl Default for PictureParams {
    fn default() -> Self {
        Self {
            tracks: DEFAULT_TRACKS,
            message: None
        }
    }
}

/// Produce every track of the picture disk, in order starting with track 0.
pub fn build_tracks(bitmap: &Bitmap,params: &PictureParams) -> Result<Vec<TrackBits>,DYNERR> {
    if params.tracks < 1 || params.tracks > MAX_TRACKS {
        error!("track count must be 1 to {}, got {}",MAX_TRACKS,params.tracks);
        return Err(Box::new(img::Error::TrackCount));
    }
    let hires = screen::sample_hires(bitmap);
    let track0 = boot::boot_track(&hires,params.message.as_deref());
    let mut ans = vec![TrackBits::from_sectors(&track0,0,SectorOrder::Dos)?];
    for track in 1..params.tracks {
        ans.push(paint::paint_track(bitmap,track,params.tracks)?);
    }
    info!("built {} tracks",ans.len());
    Ok(ans)
}
