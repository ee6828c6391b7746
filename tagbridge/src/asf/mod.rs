//! ASF (WMA/WMV) specific items
//!
//! ## File notes
//!
//! Tags live in two children of the header object:
//!
//! * The content description object, holding the closed set `TITLE`, `AUTHOR`, `COPYRIGHT`,
//!   `DESCRIPTION` and `RATING`
//! * The extended content description object, holding everything else as typed descriptors
//!
//! An [`AsfTag`] holds both as one list of fields, and splits them again when written.

mod object;
mod read;
mod tag;
mod write;

pub use tag::AsfTag;
