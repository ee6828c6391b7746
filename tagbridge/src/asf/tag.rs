use super::object::numeric_kind;
use super::read::read_from;
use super::write::{create_objects, rewrite_header};
use crate::config::ParseOptions;
use crate::error::{Result, TextEncodingError};
use crate::field::{Field, FieldId, FieldValue, NumericTuple, TextValue};
use crate::registry::{Registries, is_valid_id};
use crate::tag::{Accessor, FormatAdapter, TagContainer, TagFormat};
use crate::util::text::TextEncoding;

use std::borrow::Cow;
use std::io::{Read, Write};

// Lengths are stored as 16-bit byte counts, including the terminator
const MAX_TEXT_UNITS: usize = (u16::MAX as usize / 2) - 1;

/// An ASF tag
///
/// All text is stored as UTF-16LE. Text may not contain NUL characters, and must fit in a 16-bit
/// byte length.
///
/// ## Conversions
///
/// `TITLE`, `AUTHOR`, `COPYRIGHT`, `DESCRIPTION` and `RATING` are written to the content
/// description object, everything else is written as an extended content descriptor.
#[derive(Debug, Clone)]
pub struct AsfTag<'r> {
	registries: &'r Registries,
	pub(crate) container: TagContainer<'r, Field>,
}

impl<'r> AsfTag<'r> {
	/// Create an empty tag
	pub fn new(registries: &'r Registries) -> Self {
		Self {
			registries,
			container: TagContainer::new(registries.get(TagFormat::Asf)),
		}
	}

	/// Read a tag from an ASF header object
	///
	/// `reader` is expected to be positioned at the header object, which is the start of any ASF file.
	///
	/// # Errors
	///
	/// * [`ErrorKind::CannotRead`](crate::error::ErrorKind::CannotRead): the header object is missing or truncated
	/// * Any descriptor error, with [`ParsingMode::Strict`](crate::config::ParsingMode::Strict)
	pub fn read_from<R>(
		reader: &mut R,
		registries: &'r Registries,
		parse_options: ParseOptions,
	) -> Result<Self>
	where
		R: Read,
	{
		read_from(reader, registries, parse_options)
	}

	/// Copy an ASF file from `reader` to `writer`, replacing its tag with this one
	///
	/// The description objects of the original header object are dropped, and all other objects are kept.
	///
	/// # Errors
	///
	/// * See [`AsfTag::read_from`]
	/// * An item is too large for its 16-bit length
	/// * [`std::io::Error`]
	pub fn rewrite_header<R, W>(
		&self,
		reader: &mut R,
		writer: &mut W,
		parse_options: ParseOptions,
	) -> Result<()>
	where
		R: Read,
		W: Write,
	{
		rewrite_header(self, reader, writer, parse_options)
	}

	/// The content description and extended content description objects of this tag
	///
	/// Objects that would be empty are omitted.
	///
	/// # Errors
	///
	/// An item is too large for its 16-bit length
	pub fn to_objects(&self) -> Result<Vec<Vec<u8>>> {
		let objects = create_objects(self)?;
		Ok([
			objects.content_description,
			objects.extended_content_description,
		]
		.into_iter()
		.flatten()
		.collect())
	}

	/// The copyright notice
	pub fn copyright(&self) -> Option<String> {
		self.first_text("COPYRIGHT")
	}

	/// Sets the copyright notice
	///
	/// # Errors
	///
	/// See [`FormatAdapter::build_field`]
	pub fn set_copyright(&mut self, copyright: &str) -> Result<()> {
		let field = self.build_field(Cow::Borrowed("COPYRIGHT"), copyright)?;
		self.container.set(field);
		Ok(())
	}

	/// The rating
	pub fn rating(&self) -> Option<String> {
		self.first_text("RATING")
	}

	/// Sets the rating
	///
	/// # Errors
	///
	/// See [`FormatAdapter::build_field`]
	pub fn set_rating(&mut self, rating: &str) -> Result<()> {
		let field = self.build_field(Cow::Borrowed("RATING"), rating)?;
		self.container.set(field);
		Ok(())
	}

	fn first_text(&self, id: &str) -> Option<String> {
		self.container
			.get_first(id)
			.and_then(|field| field.value().text())
			.map(str::to_string)
	}
}

impl<'r> FormatAdapter<'r> for AsfTag<'r> {
	fn format(&self) -> TagFormat {
		TagFormat::Asf
	}

	fn registries(&self) -> &'r Registries {
		self.registries
	}

	fn container(&self) -> &TagContainer<'r, Field> {
		&self.container
	}

	fn container_mut(&mut self) -> &mut TagContainer<'r, Field> {
		&mut self.container
	}

	fn build_field(&self, id: FieldId, value: &str) -> Result<Field> {
		if let Some(kind) = numeric_kind(&id) {
			let tuple = NumericTuple::parse_scalar(kind, value)?;
			return Ok(Field::new(TagFormat::Asf, id, FieldValue::NumericTuple(tuple)));
		}

		self.verify_text(TextEncoding::UTF16LE, value)?;
		Ok(Field::new(
			TagFormat::Asf,
			id,
			FieldValue::Text(TextValue::new(value, TextEncoding::UTF16LE)),
		))
	}

	fn custom_id(&self, name: &str) -> Option<FieldId> {
		is_valid_id(TagFormat::Asf, name).then(|| Cow::Owned(name.to_owned()))
	}

	fn verify_text(&self, encoding: TextEncoding, text: &str) -> Result<()> {
		encoding.verify(text)?;

		if let Some(index) = text.chars().position(|c| c == '\0') {
			return Err(TextEncodingError::new(encoding, index).into());
		}

		if text.encode_utf16().count() > MAX_TEXT_UNITS {
			let valid_up_to = text
				.char_indices()
				.scan(0, |units, (index, c)| {
					*units += c.len_utf16();
					Some((index, *units))
				})
				.take_while(|(_, units)| *units <= MAX_TEXT_UNITS)
				.count();

			return Err(TextEncodingError::new(encoding, valid_up_to).into());
		}

		Ok(())
	}
}

impl<'r> Accessor<'r> for AsfTag<'r> {}
