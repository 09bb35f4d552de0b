//! ## module for GCR tracks
//!
//! This lays out a standard 16 sector Apple II track at the level of bits.
//! The track starts with a leader of sync bytes.  Each sector then has an address
//! field, a short gap, a data field, and a longer gap.  The last sector is closed
//! with a single filler byte rather than a gap.
//!
//! Sectors are written in physical order; the `SectorOrder` picks which logical
//! sector of the source data goes into each physical slot.

use log::{trace,error};
use crate::img;
use crate::DYNERR;
use super::{BitWriter,SectorOrder,TRACK_BUF_LEN};

mod woz_nibbles;

pub use woz_nibbles::{encode_44,encode_62,encode_sector_62,FWD_62,SECTOR_NIBS_62};

/// Volume number recorded in every address field
pub const VOLUME: u8 = 254;
pub const SECTORS: usize = 16;
pub const SECTOR_SIZE: usize = 256;
/// Length of the logical data for one track
pub const TRACK_DATA_LEN: usize = SECTORS * SECTOR_SIZE;

const LEADER_SYNCS: usize = 64;
const ADDRESS_GAP_SYNCS: usize = 7;
const SECTOR_GAP_SYNCS: usize = 16;
const ADDRESS_PROLOG: [u8;3] = [0xd5,0xaa,0x96];
const DATA_PROLOG: [u8;3] = [0xd5,0xaa,0xad];
const EPILOG: [u8;3] = [0xde,0xaa,0xeb];

/// Bits produced by `encode_track`, this is the same for every track
pub const TRACK_BITS: usize = LEADER_SYNCS*10
    + SECTORS*(3*8 + 4*16 + 3*8 + ADDRESS_GAP_SYNCS*10 + 3*8 + SECTOR_NIBS_62*8 + 3*8)
    + (SECTORS-1)*SECTOR_GAP_SYNCS*10
    + 8;

/// Write a complete track into `bits`, returning the number of bits written.
/// * `bits` - destination, at least `TRACK_BUF_LEN` bytes, it is zeroed first
/// * `dat` - 16 logical sectors, exactly `TRACK_DATA_LEN` bytes
/// * `track` - track number recorded in the address fields
/// * `order` - mapping from physical to logical sectors
pub fn encode_track(bits: &mut [u8],dat: &[u8],track: usize,order: SectorOrder) -> Result<usize,DYNERR> {
    if dat.len() != TRACK_DATA_LEN {
        error!("track data has {} bytes, expected {}",dat.len(),TRACK_DATA_LEN);
        return Err(Box::new(img::Error::SectorDataSize));
    }
    if bits.len() < TRACK_BUF_LEN {
        error!("track buffer has {} bytes, need {}",bits.len(),TRACK_BUF_LEN);
        return Err(Box::new(img::Error::TrackBufferSize));
    }
    let track = match u8::try_from(track) {
        Ok(t) => t,
        Err(_) => {
            error!("track {} cannot be recorded in an address field",track);
            return Err(Box::new(img::Error::TrackNumber));
        }
    };
    bits.fill(0);
    let mut writer = BitWriter::create(bits,0);
    writer.write_syncs(LEADER_SYNCS);
    for psec in 0..SECTORS {
        // address field
        writer.write_bytes(&ADDRESS_PROLOG);
        writer.write_44(VOLUME);
        writer.write_44(track);
        writer.write_44(psec as u8);
        writer.write_44(VOLUME ^ track ^ psec as u8);
        writer.write_bytes(&EPILOG);
        writer.write_syncs(ADDRESS_GAP_SYNCS);
        // data field
        writer.write_bytes(&DATA_PROLOG);
        let lsec = order.logical_sector(psec);
        trace!("physical sector {} gets logical sector {}",psec,lsec);
        let mut sec: [u8;SECTOR_SIZE] = [0;SECTOR_SIZE];
        sec.copy_from_slice(&dat[lsec*SECTOR_SIZE..(lsec+1)*SECTOR_SIZE]);
        writer.write_bytes(&encode_sector_62(&sec));
        writer.write_bytes(&EPILOG);
        if psec < SECTORS-1 {
            writer.write_syncs(SECTOR_GAP_SYNCS);
        } else {
            writer.write_byte(0xff);
        }
    }
    debug_assert!(writer.bit_ptr() <= writer.capacity());
    Ok(writer.bit_ptr())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::img::tracks::TRACK_BIT_CAPACITY;

    #[test]
    fn bit_budget() {
        assert_eq!(TRACK_BITS,50632);
        assert!(TRACK_BITS <= TRACK_BIT_CAPACITY);
    }

    #[test]
    fn leader_and_first_address() {
        let mut bits = vec![0;TRACK_BUF_LEN];
        let count = encode_track(&mut bits,&[0;TRACK_DATA_LEN],17,SectorOrder::Dos).expect("encode failed");
        assert_eq!(count,TRACK_BITS);
        // 64 syncs is 640 bits which is byte aligned
        assert_eq!(bits[80..83],ADDRESS_PROLOG);
        assert_eq!(bits[83..85],encode_44(VOLUME));
        assert_eq!(bits[85..87],encode_44(17));
        assert_eq!(bits[87..89],encode_44(0));
        assert_eq!(bits[89..91],encode_44(VOLUME ^ 17));
        assert_eq!(bits[91..94],EPILOG);
        // padding stays clear
        assert!(bits[(TRACK_BITS+7)/8..].iter().all(|x| *x==0));
    }

    /// read 8 bits starting at any bit offset
    fn read_byte(bits: &[u8],ptr: usize) -> u8 {
        let idx = ptr >> 3;
        let shift = ptr & 7;
        let pair = ((bits[idx] as u16) << 8) | bits[idx+1] as u16;
        (pair >> (8 - shift)) as u8
    }

    fn read_bytes(bits: &[u8],ptr: &mut usize,count: usize) -> Vec<u8> {
        let mut ans = Vec::new();
        for _i in 0..count {
            ans.push(read_byte(bits,*ptr));
            *ptr += 8;
        }
        ans
    }

    fn expect_syncs(bits: &[u8],ptr: &mut usize,count: usize) {
        for _i in 0..count {
            assert_eq!(read_byte(bits,*ptr),0xff);
            // two zero bits follow each sync byte
            assert_eq!(read_byte(bits,*ptr+8) & 0xc0,0);
            *ptr += 10;
        }
    }

    /// Walk every physical sector and check it carries `logical[psec]` from the source data
    fn check_sector_layout(order: SectorOrder,logical: [usize;SECTORS]) {
        let mut dat = vec![0;TRACK_DATA_LEN];
        for (i,x) in dat.iter_mut().enumerate() {
            *x = ((i/SECTOR_SIZE)*17 + (i%SECTOR_SIZE)*3) as u8;
        }
        let mut bits = vec![0;TRACK_BUF_LEN];
        let count = encode_track(&mut bits,&dat,5,order).expect("encode failed");
        assert_eq!(count,TRACK_BITS);
        let mut ptr = 0;
        expect_syncs(&bits,&mut ptr,LEADER_SYNCS);
        for psec in 0..SECTORS {
            assert_eq!(read_bytes(&bits,&mut ptr,3),ADDRESS_PROLOG,"{} sector {}",order,psec);
            assert_eq!(read_bytes(&bits,&mut ptr,2),encode_44(VOLUME));
            assert_eq!(read_bytes(&bits,&mut ptr,2),encode_44(5));
            assert_eq!(read_bytes(&bits,&mut ptr,2),encode_44(psec as u8));
            assert_eq!(read_bytes(&bits,&mut ptr,2),encode_44(VOLUME ^ 5 ^ psec as u8));
            assert_eq!(read_bytes(&bits,&mut ptr,3),EPILOG);
            expect_syncs(&bits,&mut ptr,ADDRESS_GAP_SYNCS);
            assert_eq!(read_bytes(&bits,&mut ptr,3),DATA_PROLOG);
            let lsec = logical[psec];
            let mut sec: [u8;SECTOR_SIZE] = [0;SECTOR_SIZE];
            sec.copy_from_slice(&dat[lsec*SECTOR_SIZE..(lsec+1)*SECTOR_SIZE]);
            assert_eq!(read_bytes(&bits,&mut ptr,SECTOR_NIBS_62),encode_sector_62(&sec).to_vec(),"{} sector {}",order,psec);
            assert_eq!(read_bytes(&bits,&mut ptr,3),EPILOG);
            match psec < SECTORS-1 {
                true => expect_syncs(&bits,&mut ptr,SECTOR_GAP_SYNCS),
                false => assert_eq!(read_bytes(&bits,&mut ptr,1),[0xff])
            }
        }
        assert_eq!(ptr,TRACK_BITS);
    }

    #[test]
    fn sectors_in_physical_order() {
        check_sector_layout(SectorOrder::Dos,[0,7,14,6,13,5,12,4,11,3,10,2,9,1,8,15]);
        check_sector_layout(SectorOrder::ProDos,[0,8,1,9,2,10,3,11,4,12,5,13,6,14,7,15]);
    }

    #[test]
    fn stale_buffer_is_cleared() {
        let mut bits = vec![0x5a;TRACK_BUF_LEN];
        encode_track(&mut bits,&[0;TRACK_DATA_LEN],0,SectorOrder::ProDos).expect("encode failed");
        assert!(bits[(TRACK_BITS+7)/8..].iter().all(|x| *x==0));
        assert_eq!(bits[0],0xff);
    }

    #[test]
    fn preconditions() {
        let mut bits = vec![0;TRACK_BUF_LEN];
        assert!(encode_track(&mut bits,&[0;TRACK_DATA_LEN-1],0,SectorOrder::Dos).is_err());
        assert!(encode_track(&mut bits,&[0;TRACK_DATA_LEN],256,SectorOrder::Dos).is_err());
        let mut short = vec![0;TRACK_BUF_LEN-1];
        assert!(encode_track(&mut short,&[0;TRACK_DATA_LEN],0,SectorOrder::Dos).is_err());
    }
}
