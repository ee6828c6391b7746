//! ID3 specific items
//!
//! Only ID3v2.3 and ID3v2.4 are supported, see [`v2`].

pub mod v2;
