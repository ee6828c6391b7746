use super::reassemble::reassemble_comment_packet;
use super::tag::VorbisComments;
use crate::config::{ParseOptions, ParsingMode};
use crate::error::Result;
use crate::field::{Field, FieldValue, TextValue};
use crate::macros::{decode_err, err, try_vec};
use crate::registry::{Registries, is_valid_id};
use crate::tag::TagFormat;
use crate::util::text::{TextEncoding, utf8_decode};

use std::io::{Read, Seek};

use byteorder::{LittleEndian, ReadBytesExt};
use data_encoding::BASE64;

pub(crate) const PICTURE_KEY: &str = "METADATA_BLOCK_PICTURE";

pub(crate) fn read_from<'r, R>(
	reader: &mut R,
	registries: &'r Registries,
	parse_options: ParseOptions,
) -> Result<VorbisComments<'r>>
where
	R: Read + Seek,
{
	let packet = reassemble_comment_packet(reader, parse_options)?;

	let mut body = &packet.body[..];
	let tag = read_comments(&mut body, registries, parse_options)?;

	if packet.format.has_framing_bit() && body.first().is_none_or(|b| b & 1 == 0) {
		log::warn!("Vorbis comment packet is missing its framing bit");
	}

	Ok(tag)
}

/// Parses the body of a comment packet, following its signature
pub(crate) fn read_comments<'r>(
	data: &mut &[u8],
	registries: &'r Registries,
	parse_options: ParseOptions,
) -> Result<VorbisComments<'r>> {
	let parse_mode = parse_options.parsing_mode;

	let vendor_len = data.read_u32::<LittleEndian>()?;
	if vendor_len as usize > data.len() {
		err!(SizeMismatch);
	}

	let mut vendor_bytes = try_vec![0; vendor_len as usize, parse_options.allocation_limit];
	data.read_exact(&mut vendor_bytes)?;

	let vendor = match utf8_decode(vendor_bytes) {
		Ok(vendor) => vendor,
		Err(e) => {
			if parse_mode == ParsingMode::Strict {
				return Err(e);
			}

			log::warn!("Vendor string is not valid UTF-8, discarding");
			String::new()
		},
	};

	let number_of_items = data.read_u32::<LittleEndian>()?;
	// Every item needs at least its length
	if number_of_items as usize > data.len() >> 2 {
		err!(SizeMismatch);
	}

	let mut tag = VorbisComments::new(registries);
	tag.set_vendor(vendor);

	for _ in 0..number_of_items {
		let comment_len = data.read_u32::<LittleEndian>()?;
		if comment_len as usize > data.len() {
			err!(SizeMismatch);
		}

		let mut comment_bytes = try_vec![0; comment_len as usize, parse_options.allocation_limit];
		data.read_exact(&mut comment_bytes)?;

		match read_comment(&comment_bytes, parse_mode) {
			Ok(Some(field)) => tag.container.push_read(field),
			Ok(None) => {},
			Err(e) => {
				if parse_mode == ParsingMode::Strict {
					return Err(e);
				}

				log::warn!("Discarding malformed comment: {e}");
			},
		}
	}

	// Any trailing bytes (the Vorbis framing bit, Opus padding) are ignored
	Ok(tag)
}

// KEY=VALUE
fn read_comment(comment: &[u8], parse_mode: ParsingMode) -> Result<Option<Field>> {
	let mut split = comment.splitn(2, |b| *b == b'=');

	let key = split.next().unwrap_or_default();
	let Some(value) = split.next() else {
		if parse_mode == ParsingMode::Strict {
			decode_err!(@BAIL VorbisComments, "Comment is missing its separator");
		}

		log::warn!("No separator found in comment, discarding");
		return Ok(None);
	};

	let Ok(key) = std::str::from_utf8(key) else {
		decode_err!(@BAIL VorbisComments, "Comment key is not valid ASCII");
	};

	if !is_valid_id(TagFormat::VorbisComments, key) {
		decode_err!(@BAIL VorbisComments, "Comment key contains invalid characters");
	}

	if key.eq_ignore_ascii_case(PICTURE_KEY) {
		let Ok(picture) = BASE64.decode(value) else {
			decode_err!(@BAIL VorbisComments, "Picture is not valid base64");
		};

		return Ok(Some(Field::new(
			TagFormat::VorbisComments,
			key.to_owned(),
			FieldValue::Binary(picture),
		)));
	}

	let value = utf8_decode(value.to_vec())?;
	Ok(Some(Field::new(
		TagFormat::VorbisComments,
		key.to_owned(),
		FieldValue::Text(TextValue::new(value, TextEncoding::UTF8)),
	)))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::ErrorKind;
	use crate::tag::FormatAdapter;

	use std::sync::LazyLock;

	static REGISTRIES: LazyLock<Registries> = LazyLock::new(Registries::new);

	fn body(vendor: &str, comments: &[&[u8]]) -> Vec<u8> {
		let mut body = Vec::new();
		body.extend((vendor.len() as u32).to_le_bytes());
		body.extend(vendor.as_bytes());
		body.extend((comments.len() as u32).to_le_bytes());
		for comment in comments {
			body.extend((comment.len() as u32).to_le_bytes());
			body.extend_from_slice(comment);
		}
		body.push(1);
		body
	}

	#[test_log::test]
	fn comments_in_order() {
		let body = body(
			"vendor",
			&[b"TITLE=Foo", b"artist=Bar", b"ARTIST=Baz", b"CUSTOM=Qux"],
		);

		let tag = read_comments(&mut &body[..], &REGISTRIES, ParseOptions::new()).unwrap();
		assert_eq!(tag.vendor(), "vendor");
		assert_eq!(
			tag.container.ids().collect::<Vec<_>>(),
			["TITLE", "artist", "CUSTOM"]
		);
		assert_eq!(
			tag.get_all(crate::registry::FieldKey::Artist).unwrap(),
			["Bar", "Baz"]
		);
	}

	#[test_log::test]
	fn pictures_are_base64() {
		let picture = format!("{PICTURE_KEY}={}", BASE64.encode(&[1, 2, 3]));
		let body = body("", &[picture.as_bytes()]);

		let tag = read_comments(&mut &body[..], &REGISTRIES, ParseOptions::new()).unwrap();
		let field = tag.container.get_first(PICTURE_KEY).unwrap();
		assert_eq!(field.value().binary(), Some(&[1, 2, 3][..]));
	}

	#[test_log::test]
	fn malformed_comments() {
		let body = body("", &[b"NOSEPARATOR", b"BAD~KEY=1", b"TITLE=Foo"]);

		let tag = read_comments(&mut &body[..], &REGISTRIES, ParseOptions::new()).unwrap();
		assert_eq!(tag.container.len(), 1);

		let err = read_comments(
			&mut &body[..],
			&REGISTRIES,
			ParseOptions::new().parsing_mode(ParsingMode::Strict),
		)
		.unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::CannotRead(_)));
	}

	#[test_log::test]
	fn item_count_too_large() {
		let mut body = body("", &[]);
		body[4..8].copy_from_slice(&u32::MAX.to_le_bytes());

		let err = read_comments(&mut &body[..], &REGISTRIES, ParseOptions::new()).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::SizeMismatch));
	}
}
