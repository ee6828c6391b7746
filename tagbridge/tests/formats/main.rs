#![allow(missing_docs)]

mod asf;
mod id3v2;
mod mp4;
mod ogg;
mod util;
