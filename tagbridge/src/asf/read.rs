use super::object::{
	CONTENT_DESCRIPTION_OBJECT, DESCRIPTION_IDS, DescriptorType, EXTENDED_CONTENT_DESCRIPTION_OBJECT,
	Guid, HEADER_OBJECT, HEADER_OBJECT_SIZE, OBJECT_HEADER_SIZE, read_integer,
};
use super::tag::AsfTag;
use crate::config::{ParseOptions, ParsingMode};
use crate::error::{CannotReadError, CannotReadKind, Result, TagError};
use crate::field::{Field, FieldValue, TextValue};
use crate::macros::{decode_err, try_vec};
use crate::registry::Registries;
use crate::tag::TagFormat;
use crate::util::text::{TextEncoding, decode_bytes};

use std::io::Read;

use byteorder::{ByteOrder, LittleEndian};

/// A child of the header object
pub(crate) struct AsfObject<'a> {
	pub(crate) guid: Guid,
	/// The entire object, including its header
	pub(crate) bytes: &'a [u8],
}

impl AsfObject<'_> {
	pub(crate) fn content(&self) -> &[u8] {
		&self.bytes[OBJECT_HEADER_SIZE..]
	}
}

/// The header object, read into memory
pub(crate) struct HeaderObject {
	/// The header object fields following the object header (child count and reserved bytes)
	pub(crate) reserved: [u8; 2],
	pub(crate) children: Vec<u8>,
	pub(crate) child_count: u32,
}

fn truncated() -> TagError {
	CannotReadError::new(TagFormat::Asf, CannotReadKind::Truncated).into()
}

impl HeaderObject {
	pub(crate) fn read<R>(reader: &mut R, parse_options: ParseOptions) -> Result<Self>
	where
		R: Read,
	{
		let mut header = [0; HEADER_OBJECT_SIZE];
		reader.read_exact(&mut header).map_err(|_| truncated())?;

		if header[..16] != HEADER_OBJECT {
			return Err(CannotReadError::new(TagFormat::Asf, CannotReadKind::MissingSignature).into());
		}

		let size = LittleEndian::read_u64(&header[16..24]);
		let child_count = LittleEndian::read_u32(&header[24..28]);
		let reserved = [header[28], header[29]];

		let Some(children_size) = (size as usize).checked_sub(HEADER_OBJECT_SIZE) else {
			decode_err!(@BAIL Asf, "Header object is smaller than its own header");
		};

		let mut children = try_vec![0; children_size, parse_options.allocation_limit];
		reader.read_exact(&mut children).map_err(|_| truncated())?;

		log::debug!("Read ASF header object, size: {size}, children: {child_count}");

		Ok(Self {
			reserved,
			children,
			child_count,
		})
	}

	/// Walks the child objects
	pub(crate) fn objects(&self, parsing_mode: ParsingMode) -> Result<Vec<AsfObject<'_>>> {
		let mut objects = Vec::new();
		let mut pos = 0;

		for _ in 0..self.child_count {
			if pos + OBJECT_HEADER_SIZE > self.children.len() {
				if parsing_mode == ParsingMode::Strict {
					return Err(truncated());
				}

				log::warn!("ASF header object holds fewer children than declared");
				break;
			}

			let mut guid = [0; 16];
			guid.copy_from_slice(&self.children[pos..pos + 16]);
			let size = LittleEndian::read_u64(&self.children[pos + 16..pos + 24]) as usize;

			if size < OBJECT_HEADER_SIZE || size > self.children.len() - pos {
				if parsing_mode == ParsingMode::Strict {
					decode_err!(@BAIL Asf, "Found an object with an invalid size");
				}

				log::warn!("Found an ASF object with an invalid size, discarding the remaining objects");
				break;
			}

			objects.push(AsfObject {
				guid,
				bytes: &self.children[pos..pos + size],
			});
			pos += size;
		}

		Ok(objects)
	}
}

pub(crate) fn read_from<'r, R>(
	reader: &mut R,
	registries: &'r Registries,
	parse_options: ParseOptions,
) -> Result<AsfTag<'r>>
where
	R: Read,
{
	let header = HeaderObject::read(reader, parse_options)?;

	let mut tag = AsfTag::new(registries);
	for object in header.objects(parse_options.parsing_mode)? {
		let result = match object.guid {
			CONTENT_DESCRIPTION_OBJECT => read_content_description(object.content(), &mut tag),
			EXTENDED_CONTENT_DESCRIPTION_OBJECT => {
				read_extended_content_description(object.content(), &mut tag, parse_options)
			},
			_ => continue,
		};

		if let Err(err) = result {
			if parse_options.parsing_mode == ParsingMode::Strict {
				return Err(err);
			}

			log::warn!("Skipping malformed ASF description object: {err}");
		}
	}

	Ok(tag)
}

// Five lengths, followed by the five strings
fn read_content_description(content: &[u8], tag: &mut AsfTag<'_>) -> Result<()> {
	if content.len() < 10 {
		return Err(truncated());
	}

	let mut pos = 10;
	for (index, id) in DESCRIPTION_IDS.iter().enumerate() {
		let len = usize::from(LittleEndian::read_u16(&content[index * 2..]));
		if pos + len > content.len() {
			return Err(truncated());
		}

		let value = decode_bytes(&content[pos..pos + len], TextEncoding::UTF16LE)?;
		pos += len;

		if value.is_empty() {
			continue;
		}

		tag.container.push_read(Field::new(
			TagFormat::Asf,
			*id,
			FieldValue::Text(TextValue::new(value, TextEncoding::UTF16LE)),
		));
	}

	Ok(())
}

struct ByteReader<'a> {
	content: &'a [u8],
	pos: usize,
}

impl<'a> ByteReader<'a> {
	fn u16(&mut self) -> Result<u16> {
		let bytes = self.bytes(2)?;
		Ok(LittleEndian::read_u16(bytes))
	}

	fn bytes(&mut self, len: usize) -> Result<&'a [u8]> {
		if self.pos + len > self.content.len() {
			return Err(truncated());
		}

		let bytes = &self.content[self.pos..self.pos + len];
		self.pos += len;
		Ok(bytes)
	}
}

fn read_extended_content_description(
	content: &[u8],
	tag: &mut AsfTag<'_>,
	parse_options: ParseOptions,
) -> Result<()> {
	let mut reader = ByteReader { content, pos: 0 };

	let count = reader.u16()?;
	for _ in 0..count {
		let name_len = usize::from(reader.u16()?);
		let name = decode_bytes(reader.bytes(name_len)?, TextEncoding::UTF16LE)?;
		let value_type = reader.u16()?;
		let value_len = usize::from(reader.u16()?);
		let value = reader.bytes(value_len)?;

		let field = match DescriptorType::from_u16(value_type) {
			Some(DescriptorType::Text) => Ok(FieldValue::Text(TextValue::new(
				decode_bytes(value, TextEncoding::UTF16LE)?,
				TextEncoding::UTF16LE,
			))),
			Some(DescriptorType::Binary) => Ok(FieldValue::Binary(value.to_vec())),
			Some(integer) => match integer.integer_kind() {
				Some(kind) => read_integer(kind, value).map(FieldValue::NumericTuple),
				None => unreachable!("text and binary are handled above"),
			},
			None => Err(decode_err!(Asf, "Found an unknown descriptor type")),
		};

		match field {
			Ok(value) if !name.is_empty() => {
				tag.container.push_read(Field::new(TagFormat::Asf, name, value));
			},
			Ok(_) => log::warn!("Skipping ASF descriptor without a name"),
			Err(err) => {
				if parse_options.parsing_mode == ParsingMode::Strict {
					return Err(err);
				}

				log::warn!("Skipping malformed ASF descriptor \"{name}\": {err}");
			},
		}
	}

	Ok(())
}
