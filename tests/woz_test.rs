// test of the WOZ v2 container as assembled from picture tracks
use hex;
use picturedsk::img::woz;
use picturedsk::img::woz2::InfoParams;
use picturedsk::img::tracks::gcr;
use picturedsk::picture::PictureParams;
use picturedsk::picture::bitmap::Bitmap;
type STDRESULT = Result<(),Box<dyn std::error::Error>>;

const TRKS_DATA: usize = 256;
const WRIT_CHUNK: usize = TRKS_DATA + 1280 + 46*6656;

fn u16_at(buf: &[u8],offset: usize) -> u16 {
    u16::from_le_bytes([buf[offset],buf[offset+1]])
}

fn u32_at(buf: &[u8],offset: usize) -> u32 {
    u32::from_le_bytes([buf[offset],buf[offset+1],buf[offset+2],buf[offset+3]])
}

fn default_image() -> Result<Vec<u8>,Box<dyn std::error::Error>> {
    let bitmap = Bitmap::create(2,2,vec![255;16])?;
    let woz = picturedsk::create_picture_disk(&bitmap,&PictureParams::default(),&InfoParams::default())?;
    Ok(woz.to_bytes())
}

#[test]
fn chunk_sequence() -> STDRESULT {
    let buf = default_image()?;
    assert_eq!(u32_at(&buf,8),woz::crc32(0,&buf[12..]));
    assert_eq!(u32_at(&buf,12),woz::INFO_ID);
    assert_eq!(u32_at(&buf,16),60);
    assert_eq!(u32_at(&buf,80),woz::TMAP_ID);
    assert_eq!(u32_at(&buf,84),160);
    assert_eq!(u32_at(&buf,248),woz::TRKS_ID);
    assert_eq!(u32_at(&buf,252) as usize,WRIT_CHUNK - TRKS_DATA);
    assert_eq!(u32_at(&buf,WRIT_CHUNK),woz::WRIT_ID);
    // 20 byte records
    assert_eq!(u32_at(&buf,WRIT_CHUNK+4),920);
    assert_eq!(buf.len(),WRIT_CHUNK + 8 + 46*20);
    assert_eq!(buf.len(),308640);
    Ok(())
}

#[test]
fn track_directory() -> STDRESULT {
    let buf = default_image()?;
    // track 0 bits begin at block 3
    assert_eq!(u16_at(&buf,TRKS_DATA),3);
    assert_eq!(u16_at(&buf,TRKS_DATA+2),13);
    assert_eq!(u32_at(&buf,TRKS_DATA+4) as usize,gcr::TRACK_BITS);
    for i in 1..46 {
        let entry = TRKS_DATA + 8*i;
        assert_eq!(u16_at(&buf,entry),3 + 13*i as u16);
        assert_eq!(u16_at(&buf,entry+2),13);
        assert_eq!(u32_at(&buf,entry+4),53248);
    }
    assert!(buf[TRKS_DATA+8*46..TRKS_DATA+1280].iter().all(|x| *x==0));
    // painted with a white picture
    assert!(buf[16*512..WRIT_CHUNK].iter().all(|x| *x==0xff));
    Ok(())
}

#[test]
fn boot_track_bits() -> STDRESULT {
    let buf = default_image()?;
    let bits = &buf[3*512..16*512];
    // 64 sync bytes of 10 bits each, then the first address field
    assert_eq!(bits[0],0xff);
    assert_eq!(bits[80..94],hex::decode("d5aa96fffeaaaaaaaafffedeaaeb")?);
    // the padding after the track is zero
    assert!(bits[(gcr::TRACK_BITS+7)/8..].iter().all(|x| *x==0));
    Ok(())
}

#[test]
fn write_records() -> STDRESULT {
    let buf = default_image()?;
    let trk0 = &buf[3*512..3*512+(gcr::TRACK_BITS+7)/8];
    let rec = &buf[WRIT_CHUNK+8..WRIT_CHUNK+28];
    assert_eq!(rec[0..4],[0,1,1,0]);
    assert_eq!(u32_at(rec,4),woz::crc32(0,trk0));
    assert_eq!(u32_at(rec,8),0);
    assert_eq!(u32_at(rec,12) as usize,gcr::TRACK_BITS);
    assert_eq!(rec[16..20],[0;4]);
    let subtracks: Vec<u8> = (0..46).map(|i| buf[WRIT_CHUNK+8+20*i]).collect();
    assert_eq!(subtracks[0..4],[0,4,7,10]);
    assert_eq!(subtracks[45],136);
    let trk1 = &buf[16*512..29*512];
    assert_eq!(u32_at(&buf,WRIT_CHUNK+8+20+4),woz::crc32(0,trk1));
    Ok(())
}

#[test]
fn saved_file_matches() -> STDRESULT {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("white.woz");
    let bitmap = Bitmap::create(1,1,vec![255;4])?;
    let params = PictureParams { tracks: 3, message: Some("saved".to_string()) };
    let woz = picturedsk::create_picture_disk(&bitmap,&params,&InfoParams::default())?;
    woz.write_to_file(&path)?;
    assert_eq!(std::fs::read(&path)?,woz.to_bytes());
    Ok(())
}
