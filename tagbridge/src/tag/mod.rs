//! Format independent tag handling
//!
//! Every format's tag is a [`TagContainer`] of [`Field`](crate::field::Field)s wrapped in a
//! [`FormatAdapter`], which provides the generic key layer and conversions between formats.
//!
//! To create a tag for a format only known at runtime, see [`new_tag`].

mod accessor;
mod adapter;
mod aliased;
mod container;
mod tag_format;

pub use accessor::Accessor;
pub use adapter::FormatAdapter;
pub(crate) use adapter::add_converted;
pub use aliased::{AliasedTag, CopiedTag};
pub use container::{Fields, TagContainer};
pub use tag_format::TagFormat;

use crate::asf::AsfTag;
use crate::id3::v2::{Id3v2Tag, Id3v2Version};
use crate::mp4::Mp4Tag;
use crate::ogg::VorbisComments;
use crate::registry::Registries;

/// Creates an empty tag of `format`
///
/// # Examples
///
/// ```rust
/// use tagbridge::registry::{FieldKey, Registries};
/// use tagbridge::tag::{TagFormat, new_tag};
///
/// # fn main() -> tagbridge::error::Result<()> {
/// let registries = Registries::new();
///
/// for format in TagFormat::ALL {
/// 	let mut tag = new_tag(format, &registries);
/// 	tag.set_field(FieldKey::Title, "Foo title")?;
///
/// 	assert_eq!(tag.get_first(FieldKey::Title)?.as_deref(), Some("Foo title"));
/// }
/// # Ok(()) }
/// ```
pub fn new_tag<'r>(format: TagFormat, registries: &'r Registries) -> Box<dyn FormatAdapter<'r> + 'r> {
	match format {
		TagFormat::Id3v23 => Box::new(Id3v2Tag::new(registries, Id3v2Version::V3)),
		TagFormat::Id3v24 => Box::new(Id3v2Tag::new(registries, Id3v2Version::V4)),
		TagFormat::Asf => Box::new(AsfTag::new(registries)),
		TagFormat::VorbisComments => Box::new(VorbisComments::new(registries)),
		TagFormat::Mp4Ilst => Box::new(Mp4Tag::new(registries)),
	}
}
