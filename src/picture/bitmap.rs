//! ## Picture source
//!
//! Holds the input picture as 8-bit RGBA and samples it as black or white
//! at texture coordinates.  Any format the `image` crate is built with can be loaded.

use std::path::Path;
use log::{debug,error};
use super::Error;
use crate::DYNERR;

pub struct Bitmap {
    width: usize,
    height: usize,
    rgba: Vec<u8>
}

fn srgb_to_linear(x: f64) -> f64 {
    if x < 0.04045 {
        return x / 12.92;
    }
    ((x + 0.055) / 1.055).powf(2.4)
}

fn linear_to_srgb(y: f64) -> f64 {
    if y <= 0.0031308 {
        return 12.92 * y;
    }
    1.055 * y.powf(1.0 / 2.4) - 0.055
}

impl Bitmap {
    /// Wrap packed RGBA pixels, row major starting at the top left
    pub fn create(width: usize,height: usize,rgba: Vec<u8>) -> Result<Self,DYNERR> {
        if width==0 || height==0 || rgba.len() != width*height*4 {
            error!("{}x{} bitmap cannot have {} bytes of RGBA",width,height,rgba.len());
            return Err(Box::new(Error::BitmapSize));
        }
        Ok(Self {
            width,
            height,
            rgba
        })
    }
    /// Decode a picture file, the format is detected from the extension
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self,DYNERR> {
        let img = match image::open(&path) {
            Ok(img) => img.to_rgba8(),
            Err(e) => {
                error!("could not load {}: {}",path.as_ref().display(),e);
                return Err(Box::new(e));
            }
        };
        debug!("loaded {}x{} picture",img.width(),img.height());
        Self::create(img.width() as usize,img.height() as usize,img.into_raw())
    }
    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    /// Sample the nearest pixel at texture coordinates (`u`,`v`), which are clamped to [0,1].
    /// The luminance is rounded so the result is 0.0 or 1.0.  Alpha is ignored.
    pub fn sample_greyscale(&self,u: f32,v: f32) -> f64 {
        let u = u.clamp(0.0,1.0);
        let v = v.clamp(0.0,1.0);
        let x = usize::min((u * self.width as f32) as usize,self.width-1);
        let y = usize::min((v * self.height as f32) as usize,self.height-1);
        let base = (y*self.width + x)*4;
        let [r,g,b] = [0,1,2].map(|i| srgb_to_linear(self.rgba[base+i] as f64 / 255.0));
        let grey = 0.2126*r + 0.7152*g + 0.0722*b;
        linear_to_srgb(grey).round()
    }
}
