//! MP4 specific items
//!
//! ## File notes
//!
//! The tag is the `ilst` atom, found at `moov.udta.meta.ilst`. Each of its children is an atom
//! named after the field (`©nam`, `trkn`, ...), holding one `data` atom per value. Freeform atoms
//! (`----`) carry their name in `mean` and `name` children.
//!
//! Only the `ilst` atom is handled, rewriting the `moov` atom of a file is left to the caller.

mod atom;
mod ilst;
mod read;
mod tag;

pub use tag::Mp4Tag;
