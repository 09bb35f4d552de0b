//! # Track Bitstreams
//!
//! This module provides tools for working with tracks at the bitstream level.
//! A track is held in `TrackBits`, a buffer of whole WOZ blocks together with
//! the number of bits that are actually part of the track.  Bits beyond that
//! count are padding and stay zero.
//!
//! The `BitWriter` lays bytes down at arbitrary bit offsets.  It only ever sets bits,
//! so it must be handed a zeroed buffer, and regions must not be written twice.
//!
//! The `gcr` submodule uses these to produce a complete 16 sector track.

use std::fmt;
use log::{debug,error};
use crate::img;
use crate::DYNERR;

pub mod gcr;

/// Bits start every 4 microseconds, 8 bits per byte, track buffers are in blocks of this size
pub const BLOCK_SIZE: usize = 512;
/// Number of blocks reserved for every 5.25 inch track
pub const TRACK_BLOCKS: usize = 13;
/// Capacity of a track bitstream buffer in bytes
pub const TRACK_BUF_LEN: usize = TRACK_BLOCKS * BLOCK_SIZE;
/// Capacity of a track bitstream buffer in bits
pub const TRACK_BIT_CAPACITY: usize = TRACK_BUF_LEN * 8;

/// Selects how logical sectors are laid out around the track.
/// The source data for a track is always given in logical order.
#[derive(PartialEq,Eq,Clone,Copy,Debug)]
pub enum SectorOrder {
    /// DOS 3.3 interleave, physical sector `s` holds logical `7s mod 15`
    Dos,
    /// ProDOS interleave, physical sector `s` holds logical `8s mod 15`
    ProDos
}

impl SectorOrder {
    /// Logical sector that is stored in physical sector `psec`
    pub fn logical_sector(&self,psec: usize) -> usize {
        if psec == 15 {
            return 15;
        }
        let multiplier = match self {
            Self::Dos => 7,
            Self::ProDos => 8
        };
        (psec * multiplier) % 15
    }
}

impl fmt::Display for SectorOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dos => write!(f,"DOS 3.3 order"),
            Self::ProDos => write!(f,"ProDOS order")
        }
    }
}

/// Writes bytes into a zeroed buffer starting at any bit.
/// Bit order is MSB to LSB, so a byte straddling a boundary puts its high bits
/// in the earlier byte.
pub struct BitWriter<'a> {
    bits: &'a mut [u8],
    bit_ptr: usize
}

impl <'a> BitWriter<'a> {
    pub fn create(bits: &'a mut [u8],bit_ptr: usize) -> Self {
        Self {
            bits,
            bit_ptr
        }
    }
    pub fn bit_ptr(&self) -> usize {
        self.bit_ptr
    }
    /// Number of bits the underlying buffer can hold
    pub fn capacity(&self) -> usize {
        self.bits.len() * 8
    }
    /// OR `val` into the stream and advance 8 bits, returns the new bit pointer.
    /// Panics if the byte would run off the end of the buffer.
    pub fn write_byte(&mut self,val: u8) -> usize {
        let shift = self.bit_ptr & 7;
        let idx = self.bit_ptr >> 3;
        debug_assert!(self.bits[idx] & (0xff >> shift) == 0,"bit writer would overlap at {}",self.bit_ptr);
        self.bits[idx] |= val >> shift;
        if shift > 0 {
            debug_assert!(self.bits[idx+1] & (0xff << (8-shift)) == 0,"bit writer would overlap at {}",self.bit_ptr);
            self.bits[idx+1] |= val << (8-shift);
        }
        self.bit_ptr += 8;
        self.bit_ptr
    }
    /// Write a value as two 4&4 nibbles, advancing 16 bits
    pub fn write_44(&mut self,val: u8) -> usize {
        for nib in gcr::encode_44(val) {
            self.write_byte(nib);
        }
        self.bit_ptr
    }
    /// Write a sync byte, i.e., 0xff followed by two zero bits, advancing 10 bits
    pub fn write_sync(&mut self) -> usize {
        self.write_byte(0xff);
        self.bit_ptr += 2;
        self.bit_ptr
    }
    pub fn write_syncs(&mut self,count: usize) -> usize {
        for _i in 0..count {
            self.write_sync();
        }
        self.bit_ptr
    }
    pub fn write_bytes(&mut self,dat: &[u8]) -> usize {
        for byte in dat {
            self.write_byte(*byte);
        }
        self.bit_ptr
    }
}

/// Bitstream for one track, stored in whole blocks.
pub struct TrackBits {
    buf: Vec<u8>,
    bit_count: usize
}

impl TrackBits {
    /// Track of maximum length with no bits set
    pub fn blank() -> Self {
        Self {
            buf: vec![0;TRACK_BUF_LEN],
            bit_count: 0
        }
    }
    /// Encode 16 logical sectors as a standard track, see `gcr::encode_track`
    pub fn from_sectors(dat: &[u8],track: usize,order: SectorOrder) -> Result<Self,DYNERR> {
        let mut ans = Self::blank();
        ans.bit_count = gcr::encode_track(&mut ans.buf,dat,track,order)?;
        debug!("track {} encoded with {} bits in {}",track,ans.bit_count,order);
        Ok(ans)
    }
    /// Take an existing bit buffer, only the first `bit_count` bits are part of the track.
    /// The buffer may not exceed the track capacity.
    pub fn from_bytes(buf: Vec<u8>,bit_count: usize) -> Result<Self,DYNERR> {
        if buf.len() > TRACK_BUF_LEN {
            error!("track buffer has {} bytes, limit is {}",buf.len(),TRACK_BUF_LEN);
            return Err(Box::new(img::Error::TrackBufferSize));
        }
        if bit_count > buf.len() * 8 {
            error!("bit count {} does not fit in {} bytes",bit_count,buf.len());
            return Err(Box::new(img::Error::BitCount));
        }
        Ok(Self {
            buf,
            bit_count
        })
    }
    pub fn bit_count(&self) -> usize {
        self.bit_count
    }
    /// Number of WOZ blocks needed to hold the buffer
    pub fn block_count(&self) -> usize {
        (self.buf.len() + BLOCK_SIZE - 1) / BLOCK_SIZE
    }
    /// The whole buffer including padding
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }
    /// Only the bytes that carry track bits
    pub fn valid_bytes(&self) -> &[u8] {
        &self.buf[0..(self.bit_count + 7) / 8]
    }
}
