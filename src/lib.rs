//! # `picturedsk` main library
//!
//! This library makes Apple II picture disks.  A picture disk is a WOZ v2 image of a
//! 5.25 inch floppy that boots and shows a picture on the hi-res screen, while the rest
//! of the disk surface is painted with the same picture, so that a flux visualizer
//! shows it on the disk itself.
//!
//! ## Architecture
//!
//! * `img` knows the Apple II track format and the WOZ v2 container, nothing about pictures
//! * `picture` samples the picture and produces the track bitstreams
//! * `commands` runs the CLI subcommands
//!
//! The image is built entirely in memory and only written out at the end, so a failure
//! leaves no partial file.
//!
//! ## Example
//!
//! ```no_run
//! let bitmap = picturedsk::picture::bitmap::Bitmap::from_file("cat.png")?;
//! let params = picturedsk::picture::PictureParams::default();
//! let info = picturedsk::img::woz2::InfoParams::default();
//! let woz = picturedsk::create_picture_disk(&bitmap,&params,&info)?;
//! woz.write_to_file("cat.woz")?;
//! # Ok::<(),Box<dyn std::error::Error>>(())
//! ```

pub mod img;
pub mod picture;
pub mod commands;

use img::woz2::{Woz2,InfoParams};
use picture::{PictureParams,bitmap::Bitmap};

type DYNERR = Box<dyn std::error::Error>;
type STDRESULT = Result<(),Box<dyn std::error::Error>>;

/// Build a picture disk image in memory
pub fn create_picture_disk(bitmap: &Bitmap,params: &PictureParams,info: &InfoParams) -> Result<Woz2,DYNERR> {
    let tracks = picture::build_tracks(bitmap,params)?;
    Woz2::create(info,&tracks)
}
