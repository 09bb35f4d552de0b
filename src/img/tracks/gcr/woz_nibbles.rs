//! Module for handling Steve Wozniak's nibbles
//!
//! The nibbles handled by this module are a form of group code recording (GCR),
//! although Apple did not use that terminology for a long time.
//! Each 256 byte sector is split into its top six bits and its bottom two bits.
//! The bottom bits of three different bytes are gathered into one 6-bit value,
//! then every 6-bit value is chained through a running XOR and mapped to a disk byte.
//! The result is 343 disk bytes, the last of which is the checksum.
//!
//! Only the encoding direction is needed here.

/// Number of 6-bit values that hold the low bits of a sector
pub const CHUNK62: usize = 0x56;
/// Length of a 256 byte sector after 6&2 encoding
pub const SECTOR_NIBS_62: usize = 343;

/// Map from 6-bit value to a disk byte the Disk II can read back.
/// Every entry has the top bit set and no more than one pair of adjacent zeros.
pub const FWD_62: [u8;64] = [
    0x96, 0x97, 0x9a, 0x9b, 0x9d, 0x9e, 0x9f, 0xa6,
    0xa7, 0xab, 0xac, 0xad, 0xae, 0xaf, 0xb2, 0xb3,
    0xb4, 0xb5, 0xb6, 0xb7, 0xb9, 0xba, 0xbb, 0xbc,
    0xbd, 0xbe, 0xbf, 0xcb, 0xcd, 0xce, 0xcf, 0xd3,
    0xd6, 0xd7, 0xd9, 0xda, 0xdb, 0xdc, 0xdd, 0xde,
    0xdf, 0xe5, 0xe6, 0xe7, 0xe9, 0xea, 0xeb, 0xec,
    0xed, 0xee, 0xef, 0xf2, 0xf3, 0xf4, 0xf5, 0xf6,
    0xf7, 0xf9, 0xfa, 0xfb, 0xfc, 0xfd, 0xfe, 0xff
];

/// The low two bits of each data byte are stored swapped
const BIT_REVERSE_2: [u8;4] = [0,2,1,3];

/// encode a normal byte as two 4&4 nibbles
pub fn encode_44(val: u8) -> [u8;2] {
    return [(val >> 1) | 0xaa, val | 0xaa];
}

/// encode a 6-bit value as a 6&2 nibble
pub fn encode_62(val: u8) -> u8 {
    return FWD_62[(val & 0x3f) as usize];
}

/// Encode 256 bytes as 343 nibbles.
/// The first 86 values hold the swapped low bit pairs, three source bytes per value
/// (the last two values only get two), then come the 256 top-six-bit values.
pub fn encode_sector_62(dat: &[u8;256]) -> [u8;SECTOR_NIBS_62] {
    let mut raw: [u8;SECTOR_NIBS_62] = [0;SECTOR_NIBS_62];
    for c in 0..CHUNK62 {
        let mut twos = BIT_REVERSE_2[(dat[c] & 3) as usize];
        twos |= BIT_REVERSE_2[(dat[c+CHUNK62] & 3) as usize] << 2;
        // 256 = 84*3 + 2*2, so the third slot runs out at 84
        if c + 2*CHUNK62 < 256 {
            twos |= BIT_REVERSE_2[(dat[c+2*CHUNK62] & 3) as usize] << 4;
        }
        raw[c] = twos;
    }
    for c in 0..256 {
        raw[CHUNK62+c] = dat[c] >> 2;
    }
    // running checksum: each value is XOR'd with its predecessor, the last value is the residue
    let mut ans: [u8;SECTOR_NIBS_62] = [0;SECTOR_NIBS_62];
    let mut chksum: u8 = 0;
    for i in 0..SECTOR_NIBS_62-1 {
        ans[i] = encode_62(raw[i] ^ chksum);
        chksum = raw[i];
    }
    ans[SECTOR_NIBS_62-1] = encode_62(chksum);
    ans
}
