//! ## WOZ chunk buffer
//!
//! A chunk is built up by appending little endian values at a write position, the "mark".
//! The mark can also be moved, either back to overwrite or truncate, or forward to
//! reserve a zeroed region that is filled in later.
//!
//! The backing storage is kept zeroed beyond the mark and only ever grows.

use log::{trace,error};
use crate::img;
use crate::DYNERR;
use super::woz::CHUNK_HEADER_LEN;

const INITIAL_CAPACITY: usize = 4096;

pub struct Chunk {
    id: [u8;4],
    mark: usize,
    buf: Vec<u8>
}

impl Chunk {
    /// Create an empty chunk, `name` must be 4 ASCII characters such as "INFO"
    pub fn create(name: &str) -> Result<Self,DYNERR> {
        let bytes = name.as_bytes();
        if bytes.len() != 4 || !name.is_ascii() {
            error!("bad chunk name `{}`",name);
            return Err(Box::new(img::Error::ChunkName));
        }
        Ok(Self {
            id: [bytes[0],bytes[1],bytes[2],bytes[3]],
            mark: 0,
            buf: vec![0;INITIAL_CAPACITY]
        })
    }
    pub fn id(&self) -> [u8;4] {
        self.id
    }
    pub fn name(&self) -> String {
        String::from_utf8_lossy(&self.id).to_string()
    }
    /// current write position, which is also the length of the chunk data
    pub fn mark(&self) -> usize {
        self.mark
    }
    /// bytes allocated, never less than the mark
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }
    /// the chunk data, excluding id and size
    pub fn data(&self) -> &[u8] {
        &self.buf[0..self.mark]
    }
    /// bytes this chunk occupies in the file, including id and size
    pub fn size_on_disk(&self) -> usize {
        CHUNK_HEADER_LEN + self.mark
    }
    /// Make sure `count` more bytes fit after the mark.
    /// Capacity doubles, unless that is still too small, in which case it grows to fit exactly.
    fn reserve(&mut self,count: usize) {
        let needed = self.mark + count;
        if needed > self.buf.len() {
            let mut new_cap = self.buf.len() * 2;
            if needed > new_cap {
                new_cap = needed;
            }
            trace!("{} chunk grows from {} to {}",self.name(),self.buf.len(),new_cap);
            self.buf.resize(new_cap,0);
        }
    }
    pub fn write_u8(&mut self,val: u8) {
        self.write_bytes(&[val]);
    }
    pub fn write_u16(&mut self,val: u16) {
        self.write_bytes(&u16::to_le_bytes(val));
    }
    pub fn write_u32(&mut self,val: u32) {
        self.write_bytes(&u32::to_le_bytes(val));
    }
    /// Write exactly `n` bytes of `s`, truncating, or padding with spaces.
    /// There is no terminating null.
    pub fn write_fixed_string(&mut self,s: &str,n: usize) {
        let mut padded: Vec<u8> = vec![0x20;n];
        for (i,byte) in s.as_bytes().iter().take(n).enumerate() {
            padded[i] = *byte;
        }
        self.write_bytes(&padded);
    }
    pub fn write_bytes(&mut self,dat: &[u8]) {
        self.reserve(dat.len());
        self.buf[self.mark..self.mark+dat.len()].copy_from_slice(dat);
        self.mark += dat.len();
    }
    /// Move the mark.  Moving back truncates the data but keeps the capacity.
    /// Moving forward zero fills the gap.
    pub fn set_mark(&mut self,mark: usize) {
        if mark <= self.mark {
            // keep the region beyond the mark zeroed
            self.buf[mark..self.mark].fill(0);
            self.mark = mark;
            return;
        }
        self.reserve(mark - self.mark);
        self.buf[self.mark..mark].fill(0);
        self.mark = mark;
    }
    pub fn advance_mark(&mut self,offset: usize) {
        self.set_mark(self.mark + offset);
    }
    /// Append id, size, and data to `dest`, returns number of bytes appended
    pub fn serialize(&self,dest: &mut Vec<u8>) -> usize {
        dest.extend_from_slice(&self.id);
        dest.extend_from_slice(&u32::to_le_bytes(self.mark as u32));
        dest.extend_from_slice(self.data());
        self.size_on_disk()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        assert!(Chunk::create("INFO").is_ok());
        assert!(Chunk::create("INF").is_err());
        assert!(Chunk::create("TRKSX").is_err());
        assert!(Chunk::create("TMÄ").is_err());
    }

    #[test]
    fn little_endian() {
        let mut chunk = Chunk::create("TEST").expect("bad name");
        chunk.write_u8(0x12);
        chunk.write_u16(0x3456);
        chunk.write_u32(0x789abcde);
        assert_eq!(chunk.mark(),7);
        assert_eq!(chunk.data(),&[0x12,0x56,0x34,0xde,0xbc,0x9a,0x78]);
    }

    #[test]
    fn fixed_string() {
        let mut chunk = Chunk::create("TEST").expect("bad name");
        chunk.write_fixed_string("abc",6);
        chunk.write_fixed_string("truncated",5);
        chunk.write_fixed_string("",2);
        assert_eq!(chunk.data(),b"abc   trunc  ");
    }

    #[test]
    fn growth_keeps_content() {
        let mut chunk = Chunk::create("TEST").expect("bad name");
        let pattern: Vec<u8> = (0..4000).map(|i| (i % 251) as u8).collect();
        chunk.write_bytes(&pattern);
        assert_eq!(chunk.capacity(),INITIAL_CAPACITY);
        // doubling is enough
        chunk.write_bytes(&[0xaa;1000]);
        assert_eq!(chunk.capacity(),2*INITIAL_CAPACITY);
        assert_eq!(chunk.data()[0..4000],pattern[..]);
        // doubling is not enough, so grow to fit
        chunk.write_bytes(&vec![0x55;20000]);
        assert_eq!(chunk.capacity(),25000);
        assert_eq!(chunk.mark(),25000);
        assert_eq!(chunk.data()[0..4000],pattern[..]);
        assert!(chunk.data()[4000..5000].iter().all(|x| *x==0xaa));
    }

    #[test]
    fn marks() {
        let mut chunk = Chunk::create("TEST").expect("bad name");
        chunk.write_bytes(&[1,2,3,4,5,6]);
        chunk.set_mark(2);
        assert_eq!(chunk.data(),&[1,2]);
        assert_eq!(chunk.capacity(),INITIAL_CAPACITY);
        chunk.advance_mark(3);
        assert_eq!(chunk.data(),&[1,2,0,0,0]);
        chunk.write_u8(9);
        chunk.set_mark(8);
        assert_eq!(chunk.data(),&[1,2,0,0,0,9,0,0]);
        chunk.set_mark(10000);
        assert_eq!(chunk.mark(),10000);
        assert!(chunk.capacity() >= 10000);
        assert!(chunk.data()[8..].iter().all(|x| *x==0));
    }

    #[test]
    fn serialized_form() {
        let mut chunk = Chunk::create("TMAP").expect("bad name");
        chunk.write_bytes(&[0xff;3]);
        let mut dest = vec![0xee];
        assert_eq!(chunk.serialize(&mut dest),11);
        assert_eq!(dest,vec![0xee,b'T',b'M',b'A',b'P',3,0,0,0,0xff,0xff,0xff]);
    }
}
