use crate::util::text::TextEncoding;

/// The tag's format
///
/// ID3v2.3 and ID3v2.4 are distinct formats, as their frame sets and allowed encodings differ.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum TagFormat {
	/// Represents an ID3v2.3 tag
	Id3v23,
	/// Represents an ID3v2.4 tag
	Id3v24,
	/// Represents the ASF content description and extended content description objects
	Asf,
	/// Represents vorbis comments
	VorbisComments,
	/// Represents an MP4 ilst atom
	Mp4Ilst,
}

impl TagFormat {
	/// All formats, in a stable order
	pub const ALL: [TagFormat; 5] = [
		TagFormat::Id3v23,
		TagFormat::Id3v24,
		TagFormat::Asf,
		TagFormat::VorbisComments,
		TagFormat::Mp4Ilst,
	];

	/// Whether the format is a member of the ID3v2 family
	pub fn is_id3v2(self) -> bool {
		matches!(self, TagFormat::Id3v23 | TagFormat::Id3v24)
	}

	/// The encoding text is stored in when the caller doesn't ask for another one
	pub fn default_encoding(self) -> TextEncoding {
		match self {
			TagFormat::Id3v23 | TagFormat::Id3v24 => TextEncoding::Latin1,
			TagFormat::Asf => TextEncoding::UTF16LE,
			TagFormat::VorbisComments | TagFormat::Mp4Ilst => TextEncoding::UTF8,
		}
	}

	/// The encodings a text field of this format may be stored in
	pub fn allowed_encodings(self) -> &'static [TextEncoding] {
		match self {
			TagFormat::Id3v23 => &[TextEncoding::Latin1, TextEncoding::UTF16],
			TagFormat::Id3v24 => &[
				TextEncoding::Latin1,
				TextEncoding::UTF16,
				TextEncoding::UTF16BE,
				TextEncoding::UTF8,
			],
			TagFormat::Asf => &[TextEncoding::UTF16LE],
			TagFormat::VorbisComments | TagFormat::Mp4Ilst => &[TextEncoding::UTF8],
		}
	}

	/// Reduces a composite id (`TXXX:desc`, `----:mean:name`) to the id used for classification
	///
	/// ASF and Vorbis names may legally contain colons, so they are returned as is.
	pub fn base_id(self, id: &str) -> &str {
		match self {
			TagFormat::Id3v23 | TagFormat::Id3v24 | TagFormat::Mp4Ilst => {
				id.split_once(':').map_or(id, |(base, _)| base)
			},
			TagFormat::Asf | TagFormat::VorbisComments => id,
		}
	}
}
