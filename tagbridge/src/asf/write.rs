use super::object::{
	CONTENT_DESCRIPTION_OBJECT, DESCRIPTION_IDS, DescriptorType, EXTENDED_CONTENT_DESCRIPTION_OBJECT,
	HEADER_OBJECT, OBJECT_HEADER_SIZE, write_integer,
};
use super::read::HeaderObject;
use super::tag::AsfTag;
use crate::config::ParseOptions;
use crate::error::Result;
use crate::field::{Field, FieldValue};
use crate::macros::err;
use crate::util::text::TextEncoding;

use std::io::{Read, Write};

use byteorder::{LittleEndian, WriteBytesExt};

fn u16_len(len: usize) -> Result<u16> {
	match u16::try_from(len) {
		Ok(len) => Ok(len),
		Err(_) => err!(TooMuchData),
	}
}

fn utf16_terminated(text: &str) -> Result<Vec<u8>> {
	Ok(TextEncoding::UTF16LE.encode(text, true)?)
}

fn wrap_object(guid: [u8; 16], content: &[u8]) -> Vec<u8> {
	let mut object = Vec::with_capacity(OBJECT_HEADER_SIZE + content.len());
	object.extend_from_slice(&guid);
	object.extend(((OBJECT_HEADER_SIZE + content.len()) as u64).to_le_bytes());
	object.extend_from_slice(content);
	object
}

/// The content description and extended content description objects of a tag
///
/// Either is `None` if it would be empty.
pub(crate) struct DescriptionObjects {
	pub(crate) content_description: Option<Vec<u8>>,
	pub(crate) extended_content_description: Option<Vec<u8>>,
}

pub(crate) fn create_objects(tag: &AsfTag<'_>) -> Result<DescriptionObjects> {
	let mut description_values: [Option<Vec<u8>>; 5] = Default::default();
	let mut descriptors = Vec::new();
	let mut descriptor_count = 0_u16;

	for field in tag.container.fields() {
		let description_slot = DESCRIPTION_IDS.iter().position(|id| *id == field.id());

		match (description_slot, field.value()) {
			(Some(slot), FieldValue::Text(text)) if description_values[slot].is_none() => {
				description_values[slot] = Some(utf16_terminated(&text.content)?);
			},
			_ => {
				write_descriptor(field, &mut descriptors)?;
				descriptor_count = match descriptor_count.checked_add(1) {
					Some(count) => count,
					None => err!(TooMuchData),
				};
			},
		}
	}

	let content_description = if description_values.iter().any(Option::is_some) {
		let mut content = Vec::new();
		for value in &description_values {
			let len = value.as_ref().map_or(0, Vec::len);
			content.write_u16::<LittleEndian>(u16_len(len)?)?;
		}

		for value in description_values.iter().flatten() {
			content.extend_from_slice(value);
		}

		Some(wrap_object(CONTENT_DESCRIPTION_OBJECT, &content))
	} else {
		None
	};

	let extended_content_description = if descriptor_count > 0 {
		let mut content = Vec::with_capacity(2 + descriptors.len());
		content.write_u16::<LittleEndian>(descriptor_count)?;
		content.extend(descriptors);

		Some(wrap_object(EXTENDED_CONTENT_DESCRIPTION_OBJECT, &content))
	} else {
		None
	};

	Ok(DescriptionObjects {
		content_description,
		extended_content_description,
	})
}

fn write_descriptor(field: &Field, out: &mut Vec<u8>) -> Result<()> {
	let name = utf16_terminated(field.id())?;

	let (value_type, value) = match field.value() {
		FieldValue::Text(text) => (DescriptorType::Text, utf16_terminated(&text.content)?),
		FieldValue::Binary(bytes) => (DescriptorType::Binary, bytes.clone()),
		FieldValue::NumericTuple(tuple) => {
			let mut value = Vec::new();
			write_integer(tuple, &mut value);
			(DescriptorType::from_integer_kind(tuple.kind()), value)
		},
	};

	out.write_u16::<LittleEndian>(u16_len(name.len())?)?;
	out.extend(name);
	out.write_u16::<LittleEndian>(value_type.as_u16())?;
	out.write_u16::<LittleEndian>(u16_len(value.len())?)?;
	out.extend(value);

	Ok(())
}

/// Rewrites the header object of `reader` with the tag's objects, then copies the rest of the file
pub(crate) fn rewrite_header<R, W>(
	tag: &AsfTag<'_>,
	reader: &mut R,
	writer: &mut W,
	parse_options: ParseOptions,
) -> Result<()>
where
	R: Read,
	W: Write,
{
	let header = HeaderObject::read(reader, parse_options)?;
	let objects = create_objects(tag)?;

	let mut children = Vec::with_capacity(header.children.len());
	let mut child_count = 0_u32;

	for object in header.objects(parse_options.parsing_mode)? {
		if object.guid == CONTENT_DESCRIPTION_OBJECT
			|| object.guid == EXTENDED_CONTENT_DESCRIPTION_OBJECT
		{
			continue;
		}

		children.extend_from_slice(object.bytes);
		child_count += 1;
	}

	for object in [
		objects.content_description,
		objects.extended_content_description,
	]
	.into_iter()
	.flatten()
	{
		children.extend(object);
		child_count += 1;
	}

	let size = (super::object::HEADER_OBJECT_SIZE + children.len()) as u64;

	let mut out = Vec::with_capacity(size as usize);
	out.extend_from_slice(&HEADER_OBJECT);
	out.write_u64::<LittleEndian>(size)?;
	out.write_u32::<LittleEndian>(child_count)?;
	out.extend_from_slice(&header.reserved);
	out.extend(children);

	writer.write_all(&out)?;
	std::io::copy(reader, writer)?;

	Ok(())
}
