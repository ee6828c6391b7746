//! The generic field model
//!
//! A [`Field`] binds a [`FieldValue`] to a format specific identifier. Everything a tag can hold is
//! one of three shapes: text, an opaque binary payload, or a [`NumericTuple`].
//!
//! Fields from outside of this crate can take part in copies through the [`TagField`] trait.

mod codec;
mod tuple;

pub use codec::SizeTerminatedBytes;
pub use tuple::{IntegerKind, NumericTuple};

use crate::error::Result;
use crate::registry::genres::genre_name;
use crate::tag::TagFormat;
use crate::util::text::TextEncoding;

use std::borrow::Cow;

/// A format specific field identifier, such as `TIT2`, `WM/AlbumTitle` or `----:com.apple.iTunes:MOOD`
pub type FieldId = Cow<'static, str>;

/// Text along with the encoding it is stored in
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextValue {
	/// The text
	pub content: String,
	/// The encoding of the text once written
	pub encoding: TextEncoding,
	/// ISO-639-2 language code, only used by ID3v2 `COMM` and `USLT`
	pub language: Option<[u8; 3]>,
}

impl TextValue {
	/// Creates a `TextValue` with no language
	pub fn new(content: impl Into<String>, encoding: TextEncoding) -> Self {
		Self {
			content: content.into(),
			encoding,
			language: None,
		}
	}
}

/// The value of a [`Field`]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldValue {
	/// Text in a declared encoding
	Text(TextValue),
	/// Opaque bytes, such as a picture
	Binary(Vec<u8>),
	/// Fixed-width integers, such as a track number pair
	NumericTuple(NumericTuple),
}

impl FieldValue {
	/// Returns the text, if this is a `Text` value
	pub fn text(&self) -> Option<&str> {
		match self {
			FieldValue::Text(text) => Some(&text.content),
			_ => None,
		}
	}

	/// Returns the bytes, if this is a `Binary` value
	pub fn binary(&self) -> Option<&[u8]> {
		match self {
			FieldValue::Binary(bytes) => Some(bytes),
			_ => None,
		}
	}

	/// Returns the tuple, if this is a `NumericTuple` value
	pub fn numeric(&self) -> Option<&NumericTuple> {
		match self {
			FieldValue::NumericTuple(tuple) => Some(tuple),
			_ => None,
		}
	}
}

/// A value bound to a format specific identifier
///
/// # Examples
///
/// ```rust
/// use tagbridge::field::{Field, FieldValue, TagField, TextValue};
/// use tagbridge::tag::TagFormat;
/// use tagbridge::util::text::TextEncoding;
///
/// let title = Field::new(
/// 	TagFormat::Id3v24,
/// 	"TIT2",
/// 	FieldValue::Text(TextValue::new("Foo", TextEncoding::UTF8)),
/// );
///
/// assert_eq!(title.id(), "TIT2");
/// assert_eq!(title.text().as_deref(), Some("Foo"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Field {
	pub(crate) format: TagFormat,
	pub(crate) id: FieldId,
	pub(crate) value: FieldValue,
}

impl Field {
	/// Create a new `Field`
	pub fn new(format: TagFormat, id: impl Into<FieldId>, value: FieldValue) -> Self {
		Self {
			format,
			id: id.into(),
			value,
		}
	}

	/// Create a new text `Field` in the format's default encoding
	pub fn new_text(format: TagFormat, id: impl Into<FieldId>, content: impl Into<String>) -> Self {
		Self::new(
			format,
			id,
			FieldValue::Text(TextValue::new(content, format.default_encoding())),
		)
	}

	/// The field's identifier
	pub fn id(&self) -> &str {
		&self.id
	}

	/// The format the field belongs to
	pub fn format(&self) -> TagFormat {
		self.format
	}

	/// The field's value
	pub fn value(&self) -> &FieldValue {
		&self.value
	}

	/// A mutable reference to the field's value
	pub fn value_mut(&mut self) -> &mut FieldValue {
		&mut self.value
	}

	/// Consumes the field, returning its value
	pub fn into_value(self) -> FieldValue {
		self.value
	}

	pub(crate) fn set_id(&mut self, id: impl Into<FieldId>) {
		self.id = id.into();
	}
}

/// A field that can be copied between tags
///
/// This is implemented for [`Field`], and can be implemented for fields of other libraries so
/// that they may be handed to [`FormatAdapter::copy_field_from`](crate::tag::FormatAdapter::copy_field_from).
/// Fields that aren't `Field`s are copied as binary, through [`TagField::raw_content`].
pub trait TagField {
	/// The field's identifier
	fn id(&self) -> &str;

	/// The format the field belongs to, if it is one of this crate's formats
	fn format(&self) -> Option<TagFormat> {
		None
	}

	/// The field's content as text, if it has a textual rendering
	fn text(&self) -> Option<Cow<'_, str>>;

	/// The encoding of the text, if any
	fn encoding(&self) -> Option<TextEncoding> {
		None
	}

	/// The field's content, as it would be stored
	///
	/// # Errors
	///
	/// The content cannot be represented in its declared encoding
	fn raw_content(&self) -> Result<Vec<u8>>;

	/// Whether the field holds nothing of value
	fn is_empty(&self) -> bool;

	/// Returns the field as a [`Field`], if it is one
	fn as_field(&self) -> Option<&Field> {
		None
	}
}

impl TagField for Field {
	fn id(&self) -> &str {
		&self.id
	}

	fn format(&self) -> Option<TagFormat> {
		Some(self.format)
	}

	fn text(&self) -> Option<Cow<'_, str>> {
		match &self.value {
			FieldValue::Text(text) => Some(Cow::Borrowed(&text.content)),
			FieldValue::NumericTuple(tuple) => {
				// `gnre` holds an ID3v1 genre index, plus one
				if self.format == TagFormat::Mp4Ilst && self.id == "gnre" {
					let genre = (tuple.value() as usize).checked_sub(1).and_then(genre_name);
					if let Some(genre) = genre {
						return Some(Cow::Borrowed(genre));
					}
				}

				Some(Cow::Owned(tuple.to_string()))
			},
			FieldValue::Binary(_) => None,
		}
	}

	fn encoding(&self) -> Option<TextEncoding> {
		match &self.value {
			FieldValue::Text(text) => Some(text.encoding),
			_ => None,
		}
	}

	fn raw_content(&self) -> Result<Vec<u8>> {
		match &self.value {
			FieldValue::Text(text) => Ok(text.encoding.encode(&text.content, false)?),
			FieldValue::Binary(bytes) => Ok(bytes.clone()),
			FieldValue::NumericTuple(tuple) => Ok(tuple.to_be_bytes()),
		}
	}

	fn is_empty(&self) -> bool {
		match &self.value {
			FieldValue::Text(text) => text.content.trim().is_empty(),
			FieldValue::Binary(bytes) => bytes.is_empty(),
			FieldValue::NumericTuple(tuple) => tuple.is_empty(),
		}
	}

	fn as_field(&self) -> Option<&Field> {
		Some(self)
	}
}

impl<T: TagField + ?Sized> TagField for &T {
	fn id(&self) -> &str {
		(**self).id()
	}

	fn format(&self) -> Option<TagFormat> {
		(**self).format()
	}

	fn text(&self) -> Option<Cow<'_, str>> {
		(**self).text()
	}

	fn encoding(&self) -> Option<TextEncoding> {
		(**self).encoding()
	}

	fn raw_content(&self) -> Result<Vec<u8>> {
		(**self).raw_content()
	}

	fn is_empty(&self) -> bool {
		(**self).is_empty()
	}

	fn as_field(&self) -> Option<&Field> {
		(**self).as_field()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test_log::test]
	fn text_views() {
		let field = Field::new_text(TagFormat::VorbisComments, "ARTIST", "  ");
		assert!(TagField::is_empty(&field));

		let track = Field::new(
			TagFormat::Mp4Ilst,
			"trkn",
			FieldValue::NumericTuple(NumericTuple::pair(4, 5, 12)),
		);
		assert_eq!(track.text().as_deref(), Some("5/12"));
		assert_eq!(track.raw_content().unwrap(), [0, 0, 0, 5, 0, 12, 0, 0]);
	}

	#[test_log::test]
	fn raw_content_respects_encoding() {
		let field = Field::new(
			TagFormat::Id3v23,
			"TIT2",
			FieldValue::Text(TextValue::new("\u{00f8}", TextEncoding::Latin1)),
		);
		assert_eq!(field.raw_content().unwrap(), [0xF8]);

		let field = Field::new(
			TagFormat::Id3v23,
			"TIT2",
			FieldValue::Text(TextValue::new("\u{4e2d}", TextEncoding::Latin1)),
		);
		assert!(field.raw_content().is_err());
	}
}
