//! # Disk Image Module
//!
//! This produces WOZ v2 disk images from track bitstreams.
//! Writing only: there is no provision for reading an image back.
//!
//! ## Layers
//!
//! * `tracks` holds a track bitstream and the bit writer that fills it
//! * `tracks::gcr` encodes 16 sectors of data as a standard Apple II track
//! * `chunk` is the growable buffer each WOZ chunk is built in
//! * `woz2` assembles the INFO, TMAP, TRKS, and WRIT chunks and serializes the file
//! * `woz` has constants and the checksum shared by the above
//!
//! ## Disk Geometry
//!
//! Only one kind of disk is produced: 5.25 inch, single sided, 16 sectors of 256 bytes
//! per track, 4 microsecond bit cells, every track 13 blocks long.

pub mod chunk;
pub mod woz;
pub mod woz2;
pub mod tracks;

/// Enumerates disk image errors.  The `Display` trait will print equivalent long message.
#[derive(thiserror::Error,Debug)]
pub enum Error {
    #[error("sector data has the wrong length")]
    SectorDataSize,
    #[error("track buffer is the wrong size")]
    TrackBufferSize,
    #[error("track number out of range")]
    TrackNumber,
    #[error("track count out of range")]
    TrackCount,
    #[error("bit count does not fit the track buffer")]
    BitCount,
    #[error("chunk does not start on a block boundary")]
    ChunkAlignment,
    #[error("chunk name must be 4 ASCII characters")]
    ChunkName
}
