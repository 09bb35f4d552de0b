//! ## Support for WOZ v2 disk images
//!
//! The image is assembled from four chunks that always appear in the order
//! INFO, TMAP, TRKS, WRIT.  The order matters: the TRKS directory gives block numbers
//! relative to the start of the file, so INFO and TMAP must be complete before TRKS is built.
//!
//! The `DiskStruct` trait is used to flatten the fixed size header and track records.
//! Everything else is written through the `Chunk` buffer.

// a2kit_macro automatically derives `new`, `to_bytes`, `from_bytes`, and `length` from a DiskStruct.
use a2kit_macro::{DiskStructError,DiskStruct};
use a2kit_macro_derive::DiskStruct;
use log::{debug,info,error};
use std::path::Path;
use crate::img;
use crate::img::chunk::Chunk;
use crate::img::tracks::{TrackBits,BLOCK_SIZE};
use crate::img::woz::{self,HEADER_LEN,CHUNK_HEADER_LEN,TMAP_LEN,NO_TRACK,TRKS_BITS_OFFSET};
use crate::{STDRESULT,DYNERR};

/// Length of the INFO v2 record
const INFO_LEN: usize = 60;
/// Tracks beyond this would fall off the end of the TMAP or WRIT quarter track range
pub const MAX_TRACKS: usize = 53;
/// WRIT flag to wipe the track before writing it
const WRIT_CLEAR_FIRST: u8 = 0x01;

#[derive(DiskStruct)]
pub struct Header {
    vers: [u8;4],
    high_bits: u8,
    lfcrlf: [u8;3],
    crc32: [u8;4]
}

/// One entry in the TRKS directory
#[derive(DiskStruct,Clone,Copy)]
pub struct Trk {
    starting_block: [u8;2],
    block_count: [u8;2],
    bit_count: [u8;4]
}

/// Adjustable fields of the INFO chunk.
/// The rest of INFO is fixed by the kind of disk, or computed from the tracks.
#[derive(Clone,Debug)]
pub struct InfoParams {
    /// up to 32 characters, longer names are cut off
    pub creator: String,
    pub write_protected: bool,
    /// tracks were imaged with cross-track sync
    pub synchronized: bool,
    /// fake bits were removed
    pub cleaned: bool,
    /// 0 unknown, 1 16 sector, 2 13 sector, 3 both
    pub boot_sector_format: u8,
    /// in units of 125 ns, 32 is the standard 4 us
    pub optimal_bit_timing: u8,
    /// bit 0 is the ][, bit 1 the ][+, and so on up to the /// Plus
    pub compatible_hardware: u16,
    /// in K
    pub required_ram: u16
}

impl Default for InfoParams {
    fn default() -> Self {
        Self {
            creator: "picturedsk v".to_string() + env!("CARGO_PKG_VERSION"),
            write_protected: true,
            synchronized: true,
            cleaned: true,
            boot_sector_format: 1,
            optimal_bit_timing: 32,
            compatible_hardware: 0x7f,
            required_ram: 64
        }
    }
}

pub struct Woz2 {
    header: Header,
    info: Chunk,
    tmap: Chunk,
    trks: Chunk,
    writ: Chunk
}

impl Header {
    fn create() -> Self {
        Self {
            vers: woz::WOZ2_MAGIC,
            high_bits: woz::HIGH_BITS,
            lfcrlf: woz::LFCRLF,
            crc32: [0,0,0,0]
        }
    }
}

impl Trk {
    fn create(starting_block: usize,block_count: usize,bit_count: usize) -> Self {
        Self {
            starting_block: u16::to_le_bytes(starting_block as u16),
            block_count: u16::to_le_bytes(block_count as u16),
            bit_count: u32::to_le_bytes(bit_count as u32)
        }
    }
}

/// Subtrack (quarter track) where the write of track `idx` begins.
/// Track 0 is at its usual spot, track 1 is a whole track later, the rest follow every 3 quarters.
pub fn writ_subtrack(idx: usize) -> usize {
    match idx {
        0 => 0,
        _ => 1 + 3*idx
    }
}

/// TMAP entry for quarter track position `pos` given `num_tracks` tracks.
/// Track 0 occupies positions 0 and 1, position 2 is empty, and then every track
/// is detected at 3 consecutive positions with no gaps.
pub fn tmap_entry(pos: usize,num_tracks: usize) -> u8 {
    let track = match pos {
        0 | 1 => 0,
        2 => return NO_TRACK,
        _ => pos / 3
    };
    match track < num_tracks {
        true => track as u8,
        false => NO_TRACK
    }
}

impl Woz2 {
    fn new() -> Result<Self,DYNERR> {
        Ok(Self {
            header: Header::create(),
            info: Chunk::create("INFO")?,
            tmap: Chunk::create("TMAP")?,
            trks: Chunk::create("TRKS")?,
            writ: Chunk::create("WRIT")?
        })
    }
    /// Build a complete image from the given tracks, track `i` of the slice is track `i` of the disk.
    pub fn create(params: &InfoParams,tracks: &[TrackBits]) -> Result<Self,DYNERR> {
        if tracks.len() < 1 || tracks.len() > MAX_TRACKS {
            error!("track count must be 1 to {}, got {}",MAX_TRACKS,tracks.len());
            return Err(Box::new(img::Error::TrackCount));
        }
        let mut ans = Self::new()?;
        ans.build_info(params,tracks);
        ans.build_tmap(tracks.len());
        ans.build_trks(tracks)?;
        ans.build_writ(tracks);
        for chunk in [&ans.info,&ans.tmap,&ans.trks,&ans.writ] {
            debug!("{} chunk has {} bytes",chunk.name(),chunk.mark());
        }
        Ok(ans)
    }
    fn build_info(&mut self,params: &InfoParams,tracks: &[TrackBits]) {
        let largest_track = tracks.iter().map(|t| t.block_count()).max().unwrap_or(0);
        let info = &mut self.info;
        info.write_u8(2); // INFO version
        info.write_u8(1); // 5.25 inch
        info.write_u8(params.write_protected as u8);
        info.write_u8(params.synchronized as u8);
        info.write_u8(params.cleaned as u8);
        info.write_fixed_string(&params.creator,32);
        info.write_u8(1); // sides
        info.write_u8(params.boot_sector_format);
        info.write_u8(params.optimal_bit_timing);
        info.write_u16(params.compatible_hardware);
        info.write_u16(params.required_ram);
        info.write_u16(largest_track as u16);
        info.write_u16(0); // no FLUX chunk
        info.write_u16(0); // largest flux track
        info.set_mark(INFO_LEN);
    }
    fn build_tmap(&mut self,num_tracks: usize) {
        for pos in 0..TMAP_LEN {
            self.tmap.write_u8(tmap_entry(pos,num_tracks));
        }
    }
    fn build_trks(&mut self,tracks: &[TrackBits]) -> STDRESULT {
        debug_assert!(self.info.mark()==INFO_LEN && self.tmap.mark()==TMAP_LEN,"TRKS built before INFO and TMAP");
        let bits_offset = HEADER_LEN + self.info.size_on_disk() + self.tmap.size_on_disk() + CHUNK_HEADER_LEN + TRKS_BITS_OFFSET;
        if bits_offset % BLOCK_SIZE != 0 {
            error!("track bits would start at offset {}",bits_offset);
            return Err(Box::new(img::Error::ChunkAlignment));
        }
        let mut block = bits_offset / BLOCK_SIZE;
        for trk in tracks {
            self.trks.write_bytes(&Trk::create(block,trk.block_count(),trk.bit_count()).to_bytes());
            block += trk.block_count();
        }
        self.trks.set_mark(TRKS_BITS_OFFSET);
        for trk in tracks {
            let bits = trk.as_slice();
            self.trks.write_bytes(bits);
            self.trks.advance_mark(trk.block_count()*BLOCK_SIZE - bits.len());
        }
        Ok(())
    }
    fn build_writ(&mut self,tracks: &[TrackBits]) {
        for (idx,trk) in tracks.iter().enumerate() {
            let writ = &mut self.writ;
            writ.write_u8(writ_subtrack(idx) as u8);
            writ.write_u8(1); // command count
            writ.write_u8(WRIT_CLEAR_FIRST);
            writ.write_u8(0);
            writ.write_u32(woz::crc32(0,trk.valid_bytes()));
            // the one command writes the whole track with no leader
            writ.write_u32(0); // start bit
            writ.write_u32(trk.bit_count() as u32);
            writ.write_u8(0); // leader nibble
            writ.write_u8(0); // leader nibble bit width
            writ.write_u8(0); // leader count
            writ.write_u8(0);
        }
    }
    pub fn info(&self) -> &Chunk {
        &self.info
    }
    pub fn tmap(&self) -> &Chunk {
        &self.tmap
    }
    pub fn trks(&self) -> &Chunk {
        &self.trks
    }
    pub fn writ(&self) -> &Chunk {
        &self.writ
    }
    /// Flatten the image, including the checksum in the header
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut ans: Vec<u8> = self.header.to_bytes();
        self.info.serialize(&mut ans);
        self.tmap.serialize(&mut ans);
        self.trks.serialize(&mut ans);
        self.writ.serialize(&mut ans);
        let crc = woz::crc32(0,&ans[HEADER_LEN..]);
        ans[8..12].copy_from_slice(&u32::to_le_bytes(crc));
        info!("WOZ image is {} bytes with CRC {:08X}",ans.len(),crc);
        ans
    }
    /// Write the image to `path`.  The file is only opened after the whole image is in memory.
    pub fn write_to_file<P: AsRef<Path>>(&self,path: P) -> STDRESULT {
        let buf = self.to_bytes();
        if let Err(e) = std::fs::write(&path,&buf) {
            error!("could not write {}: {}",path.as_ref().display(),e);
            return Err(Box::new(e));
        }
        info!("wrote {}",path.as_ref().display());
        Ok(())
    }
}
