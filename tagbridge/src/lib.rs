//! Read, write, and convert audio tags through one generic field model.
//!
//! # Supported Formats
//!
//! | Format            | Read | Write | Type                                        |
//! |-------------------|------|-------|---------------------------------------------|
//! | ID3v2.3 / ID3v2.4 | X    | X     | [`Id3v2Tag`](id3::v2::Id3v2Tag)             |
//! | ASF               | X    | X     | [`AsfTag`](asf::AsfTag)                     |
//! | Vorbis comments   | X    | X     | [`VorbisComments`](ogg::VorbisComments)     |
//! | MP4 ilst          | X    | X     | [`Mp4Tag`](mp4::Mp4Tag)                     |
//!
//! # The field model
//!
//! Every tag is an ordered multimap of format specific identifiers (`TIT2`, `WM/AlbumTitle`,
//! `ARTIST`, `©nam`, ...) to [`Field`](field::Field)s. What each format accepts, and how its
//! identifiers map to the format independent [`FieldKey`](registry::FieldKey)s, is described by the
//! [`Registries`](registry::Registries).
//!
//! # Examples
//!
//! ## Using generic keys
//!
//! ```rust
//! use tagbridge::prelude::*;
//! use tagbridge::registry::{FieldKey, Registries};
//! use tagbridge::id3::v2::{Id3v2Tag, Id3v2Version};
//!
//! # fn main() -> tagbridge::error::Result<()> {
//! let registries = Registries::new();
//! let mut tag = Id3v2Tag::new(&registries, Id3v2Version::V4);
//!
//! tag.set_field(FieldKey::TrackNumber, "5")?;
//! tag.set_field(FieldKey::TrackTotal, "12")?;
//!
//! assert_eq!(tag.get_first(FieldKey::TrackNumber)?.as_deref(), Some("5"));
//! assert_eq!(tag.track_total(), Some(12));
//! # Ok(()) }
//! ```
//!
//! ## Converting between formats
//!
//! ```rust
//! use tagbridge::prelude::*;
//! use tagbridge::field::TagField;
//! use tagbridge::registry::{FieldKey, Registries};
//! use tagbridge::mp4::Mp4Tag;
//! use tagbridge::ogg::VorbisComments;
//!
//! # fn main() -> tagbridge::error::Result<()> {
//! let registries = Registries::new();
//!
//! let mut comments = VorbisComments::new(&registries);
//! comments.add_field(FieldKey::Artist, "Foo artist")?;
//! comments.add_field(FieldKey::Mood, "Calm")?;
//!
//! let mut ilst = Mp4Tag::new(&registries);
//! ilst.fill_from(comments.container().fields().map(|field| field as &dyn TagField))?;
//!
//! assert_eq!(ilst.artist().as_deref(), Some("Foo artist"));
//! assert_eq!(ilst.get_first(FieldKey::Mood)?.as_deref(), Some("Calm"));
//! # Ok(()) }
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod config;
pub mod error;
pub mod field;
pub(crate) mod macros;
pub mod registry;
pub mod tag;
pub mod util;

pub mod asf;
pub mod id3;
pub mod mp4;
pub mod ogg;

pub use util::text::TextEncoding;

pub mod prelude {
	//! A prelude for commonly used items in the library.
	//!
	//! This module is intended to be wildcard imported.
	//!
	//! ```rust
	//! use tagbridge::prelude::*;
	//! ```

	pub use crate::tag::{Accessor, FormatAdapter};
}
