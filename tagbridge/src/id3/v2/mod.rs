//! ID3v2 items and utilities
//!
//! ## Important notes
//!
//! See:
//!
//! * [`Id3v2Tag`]
//! * [`Id3v2Version`]
//!
//! Only ID3v2.3 and ID3v2.4 are handled, which are distinct [`TagFormat`](crate::tag::TagFormat)s
//! with their own registries. Tags can be moved between the two with [`Id3v2Tag::convert_version`].

mod frame;
mod header;
mod read;
mod tag;
mod write;

pub use header::Id3v2Version;
pub use tag::Id3v2Tag;
