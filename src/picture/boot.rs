//! ## Boot code for the picture disk
//!
//! Track 0 is a bootable DOS order track.  The first stage loader in logical sector 0
//! pulls the rest of the track into memory, and then jumps to the second stage at $B000.
//! The second stage copies the picture from $B100 onto the hi-res screen and prints
//! a message that is stored as text in its own sector.

use log::warn;
use crate::img::tracks::gcr::{SECTOR_SIZE,TRACK_DATA_LEN};
use super::screen::HIRES_LEN;

/// Longest message that fits in the stage 2 sector
pub const MAX_MESSAGE_LEN: usize = 40;
/// Message position within the stage 2 sector
const MESSAGE_OFFSET: usize = 177;
/// Logical sectors that receive the hi-res data, in the order it is loaded
const PICTURE_SECTORS: [usize;13] = [8,1,9,2,10,3,11,4,12,5,13,6,14];

/// Stage 1, loaded by the disk controller ROM at $0800
pub const STAGE1: [u8;SECTOR_SIZE] = [
    0x01,0xa5,0x27,0xc9,0x09,0xd0,0x18,0xa5,0x2b,0x4a,0x4a,0x4a,0x4a,0x09,0xc0,0x85,
    0x3f,0xa9,0x5c,0x85,0x3e,0x18,0xad,0x5c,0x08,0x6d,0x5d,0x08,0x8d,0x5c,0x08,0xae,
    0x5d,0x08,0x30,0x15,0xbd,0x4b,0x08,0x85,0x5d,0xce,0x5d,0x08,0xad,0x5c,0x08,0x85,
    0x27,0xce,0x5c,0x08,0xa6,0x2b,0x6c,0x3e,0x00,0xee,0x5c,0x08,0xee,0x5c,0x08,0x20,
    0x89,0xfe,0x20,0x93,0xfe,0x20,0x2f,0xfb,0x4c,0x00,0xb0,0x00,0x0d,0x0b,0x09,0x07,
    0x05,0x03,0x01,0x0e,0x0c,0x0a,0x08,0x06,0x04,0x02,0x0f,0x00,0xb0,0x0e,0xb0,0x0e,
    0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,
    0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,
    0x54,0x68,0x69,0x73,0x20,0x69,0x73,0x20,0x61,0x20,0x50,0x69,0x63,0x74,0x75,0x72,
    0x65,0x44,0x53,0x4b,0x20,0x28,0x74,0x6d,0x29,0x20,0x21,0x00,0x00,0x00,0x00,0x00,
    0x43,0x6f,0x70,0x79,0x72,0x69,0x67,0x68,0x74,0x20,0x28,0x63,0x29,0x20,0x42,0x65,
    0x6e,0x20,0x5a,0x6f,0x74,0x74,0x6f,0x20,0x32,0x30,0x32,0x31,0x00,0x00,0x00,0x00,
    0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,
    0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,
    0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,
    0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00
];

/// Stage 2, runs at $B000 and displays the picture
pub const STAGE2: [u8;SECTOR_SIZE] = [
    0xa2,0x60,0xbd,0x88,0xc0,0xa2,0x50,0xbd,0x88,0xc0,0xa9,0x17,0x85,0x25,0x20,0xe2,
    0xf3,0xa2,0x07,0x20,0xf0,0xf6,0x20,0x57,0xf4,0x20,0xf6,0xf3,0xa9,0xb1,0x85,0x09,
    0xa9,0x00,0x85,0x08,0x85,0xfb,0xae,0x52,0xb0,0x20,0x53,0xb0,0xa0,0x09,0x84,0xfa,
    0xa4,0xfb,0xb1,0x08,0xc8,0xd0,0x03,0xee,0x09,0x00,0x84,0xfb,0xa4,0xfa,0x91,0x06,
    0xc8,0xc0,0x1e,0xd0,0xe9,0xee,0x52,0xb0,0xa0,0x99,0xcc,0x52,0xb0,0xf0,0x4e,0x4c,
    0x26,0xb0,0x06,0x8a,0x4a,0x4a,0x4a,0x18,0x0a,0xa8,0xb9,0x75,0xb0,0x48,0xc8,0xb9,
    0x75,0xb0,0x48,0x8a,0x29,0x07,0x18,0x0a,0x0a,0x85,0x07,0x68,0x18,0x65,0x07,0x85,
    0x07,0x68,0x85,0x06,0x60,0x00,0x20,0x80,0x20,0x00,0x21,0x80,0x21,0x00,0x22,0x80,
    0x22,0x00,0x23,0x80,0x23,0x28,0x20,0xa8,0x20,0x28,0x21,0xa8,0x21,0x28,0x22,0xa8,
    0x22,0x28,0x23,0xa8,0x23,0x50,0x20,0xd0,0x20,0x50,0x21,0xd0,0x21,0xa2,0x00,0xbd,
    0xb0,0xb0,0xf0,0x09,0x09,0x80,0x20,0xf0,0xfd,0xe8,0x4c,0x9f,0xb0,0x4c,0xad,0xb0,
    0x0a,0x46,0x4c,0x55,0x58,0x2d,0x49,0x4d,0x41,0x47,0x45,0x20,0x54,0x48,0x49,0x53,
    0x20,0x44,0x49,0x53,0x4b,0x20,0x46,0x4f,0x52,0x20,0x41,0x20,0x53,0x55,0x52,0x50,
    0x52,0x49,0x53,0x45,0x0d,0x3d,0x29,0x0d,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,
    0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,
    0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x00,0x42,0x5a
];

/// Put the message into the stage 2 sector, `sec` must be the full sector.
/// Lower case is raised, anything else outside ' '..='_' becomes a space, and the
/// message is cut off at `MAX_MESSAGE_LEN`.
fn patch_message(sec: &mut [u8],msg: &str) {
    let mut ptr = MESSAGE_OFFSET;
    for c in msg.chars().take(MAX_MESSAGE_LEN) {
        let c = c.to_ascii_uppercase();
        sec[ptr] = match c {
            ' '..='_' => c as u8,
            _ => b' '
        };
        ptr += 1;
    }
    sec[ptr..ptr+3].copy_from_slice(&[0x0d,0x0d,0x00]);
}

/// Build the logical data for track 0, in DOS order, from the hi-res screen bytes.
/// If there is no message the one built into stage 2 is kept.
pub fn boot_track(hires: &[u8;HIRES_LEN],message: Option<&str>) -> Vec<u8> {
    let mut ans = vec![0;TRACK_DATA_LEN];
    ans[0..SECTOR_SIZE].copy_from_slice(&STAGE1);
    for (i,chunk) in hires.chunks(SECTOR_SIZE).enumerate() {
        let offset = PICTURE_SECTORS[i]*SECTOR_SIZE;
        ans[offset..offset+chunk.len()].copy_from_slice(chunk);
    }
    let stage2 = &mut ans[15*SECTOR_SIZE..16*SECTOR_SIZE];
    stage2.copy_from_slice(&STAGE2);
    if let Some(msg) = message {
        if msg.chars().count() > MAX_MESSAGE_LEN {
            warn!("message is longer than {} characters and will be cut off",MAX_MESSAGE_LEN);
        }
        patch_message(stage2,msg);
    }
    ans
}
