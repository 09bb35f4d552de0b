use clap;
use std::path::Path;
use log::{info,warn,error};
use crate::img::woz2::InfoParams;
use crate::picture::{PictureParams,DEFAULT_TRACKS};
use crate::picture::bitmap::Bitmap;
use crate::STDRESULT;
use super::CommandError;

const MAX_CREATOR_LEN: usize = 32;

pub fn mkpic(cmd: &clap::ArgMatches) -> STDRESULT {
    let (img_path,dest_path) = match (cmd.get_one::<String>("image"),cmd.get_one::<String>("dimg")) {
        (Some(i),Some(d)) => (i,d),
        _ => return Err(Box::new(CommandError::InvalidCommand))
    };
    if !Path::new(img_path).exists() {
        error!("picture {} not found",img_path);
        return Err(Box::new(CommandError::FileNotFound));
    }
    if Path::new(dest_path).exists() && !cmd.get_flag("force") {
        error!("{} already exists, use --force to overwrite",dest_path);
        return Err(Box::new(CommandError::FileExists));
    }
    let tracks = match cmd.get_one::<u8>("tracks") {
        Some(t) => *t as usize,
        None => DEFAULT_TRACKS
    };
    let mut info = InfoParams::default();
    if let Some(creator) = cmd.get_one::<String>("creator") {
        if creator.len() > MAX_CREATOR_LEN {
            warn!("creator will be cut off at {} bytes",MAX_CREATOR_LEN);
        }
        info.creator = creator.to_string();
    }
    info.write_protected = !cmd.get_flag("unprotected");
    let params = PictureParams {
        tracks,
        message: cmd.get_one::<String>("message").cloned()
    };
    let bitmap = Bitmap::from_file(img_path)?;
    info!("picture is {}x{}",bitmap.width(),bitmap.height());
    let woz = crate::create_picture_disk(&bitmap,&params,&info)?;
    woz.write_to_file(dest_path)
}
