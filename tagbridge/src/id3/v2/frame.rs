//! ID3v2 frame bodies
//!
//! Frames are represented as [`Field`]s:
//!
//! | Frame                | Identifier          | Value                                      |
//! |----------------------|---------------------|--------------------------------------------|
//! | Text (`T***`)        | `TIT2`              | Text, multiple values NUL-separated        |
//! | `TXXX`               | `TXXX:<description>`| Text                                       |
//! | URL (`W***`)         | `WOAR`              | Latin-1 text                               |
//! | `WXXX`               | `WXXX:<description>`| Latin-1 text                               |
//! | `COMM`/`USLT`        | `COMM[:<description>]` | Text with a language                    |
//! | Anything else        | `APIC`              | Binary body                                |

use super::Id3v2Version;
use crate::error::{CannotReadError, CannotReadKind, Result};
use crate::field::{Field, FieldValue, SizeTerminatedBytes, TextValue};
use crate::util::text::{TextEncoding, decode_bytes, read_terminated_text};

use std::io::Cursor;

const DEFAULT_LANGUAGE: [u8; 3] = *b"eng";

/// The layout of a frame body, decided by its identifier
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum FrameLayout {
	Text,
	UserText,
	Url,
	UserUrl,
	Language,
	Binary,
}

impl FrameLayout {
	pub(crate) fn of(id: &str) -> Self {
		let base = id.split(':').next().unwrap_or(id);
		match base {
			"TXXX" => Self::UserText,
			"WXXX" => Self::UserUrl,
			"COMM" | "USLT" => Self::Language,
			// IPLS and the iTunes v2.3 sort order frames share the text frame layout
			"IPLS" | "XSOA" | "XSOP" | "XSOT" => Self::Text,
			_ if base.starts_with('T') => Self::Text,
			_ if base.starts_with('W') => Self::Url,
			_ => Self::Binary,
		}
	}
}

fn malformed(version: Id3v2Version, message: &'static str) -> crate::error::TagError {
	CannotReadError::new(version.format(), CannotReadKind::Malformed(message)).into()
}

fn read_encoding(version: Id3v2Version, byte: u8) -> Result<TextEncoding> {
	match (version, TextEncoding::from_u8(byte)) {
		(Id3v2Version::V3, Some(encoding @ (TextEncoding::Latin1 | TextEncoding::UTF16))) => {
			Ok(encoding)
		},
		(
			Id3v2Version::V4,
			Some(
				encoding @ (TextEncoding::Latin1
				| TextEncoding::UTF16
				| TextEncoding::UTF16BE
				| TextEncoding::UTF8),
			),
		) => Ok(encoding),
		_ => Err(malformed(version, "Found invalid text encoding")),
	}
}

// Every string of a text frame, each may be terminated
fn decode_values(content: &[u8], encoding: TextEncoding) -> Result<Vec<String>> {
	let mut reader = Cursor::new(content);
	let mut values = Vec::new();

	while (reader.position() as usize) < content.len() {
		let value = read_terminated_text(&mut reader, encoding)?;

		if value.bytes_read == 0 {
			break;
		}

		values.push(value.content);
	}

	while values.last().is_some_and(String::is_empty) {
		values.pop();
	}

	Ok(values)
}

/// Decodes the body of the frame `id`
///
/// `Ok(None)` is returned for frames that hold nothing, for example a text frame consisting only
/// of an encoding byte.
pub(crate) fn decode_frame(id: &str, content: &[u8], version: Id3v2Version) -> Result<Option<Field>> {
	let format = version.format();
	let layout = FrameLayout::of(id);

	if layout == FrameLayout::Binary {
		let body = SizeTerminatedBytes::read(content, 0);
		return Ok(Some(Field::new(
			format,
			id.to_owned(),
			FieldValue::Binary(body.into_inner()),
		)));
	}

	if layout == FrameLayout::Url {
		let url = decode_bytes(content, TextEncoding::Latin1)?;
		return Ok(Some(Field::new(
			format,
			id.to_owned(),
			FieldValue::Text(TextValue::new(url, TextEncoding::Latin1)),
		)));
	}

	let Some((&encoding_byte, rest)) = content.split_first() else {
		return Ok(None);
	};
	let encoding = read_encoding(version, encoding_byte)?;

	let field = match layout {
		FrameLayout::Text => {
			let values = decode_values(rest, encoding)?;
			Field::new(
				format,
				id.to_owned(),
				FieldValue::Text(TextValue::new(values.join("\0"), encoding)),
			)
		},
		FrameLayout::UserText | FrameLayout::UserUrl => {
			let mut reader = Cursor::new(rest);
			let description = read_terminated_text(&mut reader, encoding)?
			.content;

			let remaining = &rest[reader.position() as usize..];
			let (value, value_encoding) = if layout == FrameLayout::UserUrl {
				(decode_bytes(remaining, TextEncoding::Latin1)?, TextEncoding::Latin1)
			} else {
				(decode_values(remaining, encoding)?.join("\0"), encoding)
			};

			Field::new(
				format,
				format!("{id}:{description}"),
				FieldValue::Text(TextValue::new(value, value_encoding)),
			)
		},
		FrameLayout::Language => {
			if rest.len() < 3 {
				return Err(malformed(version, "Language frame is too short"));
			}

			let language = [rest[0], rest[1], rest[2]];

			let mut reader = Cursor::new(&rest[3..]);
			let description = read_terminated_text(&mut reader, encoding)?
			.content;
			let text = decode_bytes(&rest[3 + reader.position() as usize..], encoding)?;

			let id = if description.is_empty() {
				id.to_owned()
			} else {
				format!("{id}:{description}")
			};

			Field::new(
				format,
				id,
				FieldValue::Text(TextValue {
					content: text,
					encoding,
					language: Some(language),
				}),
			)
		},
		FrameLayout::Url | FrameLayout::Binary => unreachable!("handled above"),
	};

	Ok(Some(field))
}

fn write_encoding(encoding: TextEncoding, version: Id3v2Version) -> TextEncoding {
	match version {
		Id3v2Version::V3 => encoding.to_id3v23(),
		// UTF-16LE without a BOM has no ID3 encoding byte
		Id3v2Version::V4 if encoding == TextEncoding::UTF16LE => TextEncoding::UTF16,
		Id3v2Version::V4 => encoding,
	}
}

// Every value but the last is terminated, each UTF-16 value carries its own BOM
fn encode_values(content: &str, encoding: TextEncoding, out: &mut Vec<u8>) -> Result<()> {
	let mut values = content.split('\0').peekable();
	while let Some(value) = values.next() {
		out.extend(encoding.encode(value, values.peek().is_some())?);
	}

	Ok(())
}

/// The encoding of a description, which may not share the Latin-1 restriction of its URL
fn description_encoding(description: &str, version: Id3v2Version) -> TextEncoding {
	if TextEncoding::Latin1.verify(description).is_ok() {
		return TextEncoding::Latin1;
	}

	match version {
		Id3v2Version::V3 => TextEncoding::UTF16,
		Id3v2Version::V4 => TextEncoding::UTF8,
	}
}

/// Encodes the body of a frame
///
/// The frame identifier is returned along with the body, with any description removed.
pub(crate) fn encode_frame<'a>(field: &'a Field, version: Id3v2Version) -> Result<(&'a str, Vec<u8>)> {
	let (id, description) = match field.id().split_once(':') {
		Some((id, description)) => (id, description),
		None => (field.id(), ""),
	};

	let mut body = Vec::new();

	let text = match field.value() {
		FieldValue::Binary(bytes) => {
			SizeTerminatedBytes::new(bytes.clone()).write_to(&mut body);
			return Ok((id, body));
		},
		FieldValue::NumericTuple(tuple) => {
			TextValue::new(tuple.to_string(), TextEncoding::Latin1)
		},
		FieldValue::Text(text) => text.clone(),
	};

	let layout = FrameLayout::of(id);
	match layout {
		FrameLayout::Url => body.extend(TextEncoding::Latin1.encode(&text.content, false)?),
		FrameLayout::UserUrl => {
			let encoding = description_encoding(description, version);
			body.push(encoding as u8);
			body.extend(encoding.encode(description, true)?);
			body.extend(TextEncoding::Latin1.encode(&text.content, false)?);
		},
		FrameLayout::UserText => {
			let encoding = write_encoding(text.encoding, version);
			body.push(encoding as u8);
			body.extend(encoding.encode(description, true)?);
			encode_values(&text.content, encoding, &mut body)?;
		},
		FrameLayout::Language => {
			let encoding = write_encoding(text.encoding, version);
			body.push(encoding as u8);
			body.extend(text.language.unwrap_or(DEFAULT_LANGUAGE));
			body.extend(encoding.encode(description, true)?);
			body.extend(encoding.encode(&text.content, false)?);
		},
		FrameLayout::Text | FrameLayout::Binary => {
			let encoding = write_encoding(text.encoding, version);
			body.push(encoding as u8);
			encode_values(&text.content, encoding, &mut body)?;
		},
	}

	Ok((id, body))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::field::TagField;

	#[test_log::test]
	fn layouts() {
		assert_eq!(FrameLayout::of("TIT2"), FrameLayout::Text);
		assert_eq!(FrameLayout::of("TXXX:MOOD"), FrameLayout::UserText);
		assert_eq!(FrameLayout::of("WOAR"), FrameLayout::Url);
		assert_eq!(FrameLayout::of("COMM:iTunNORM"), FrameLayout::Language);
		assert_eq!(FrameLayout::of("APIC"), FrameLayout::Binary);
		assert_eq!(FrameLayout::of("IPLS"), FrameLayout::Text);
		assert_eq!(FrameLayout::of("XSOA"), FrameLayout::Text);
		assert_eq!(FrameLayout::of("XSOT"), FrameLayout::Text);
	}

	#[test_log::test]
	fn multi_value_text_frame() {
		let content = b"\x03Foo\x00Bar\x00";
		let field = decode_frame("TPE1", content, Id3v2Version::V4)
			.unwrap()
			.unwrap();

		assert_eq!(field.text().as_deref(), Some("Foo\0Bar"));

		let (id, body) = encode_frame(&field, Id3v2Version::V4).unwrap();
		assert_eq!(id, "TPE1");
		assert_eq!(body, b"\x03Foo\x00Bar");
	}

	#[test_log::test]
	fn user_text_frame() {
		let content = b"\x00MOOD\x00Calm";
		let field = decode_frame("TXXX", content, Id3v2Version::V3)
			.unwrap()
			.unwrap();

		assert_eq!(field.id(), "TXXX:MOOD");
		assert_eq!(field.text().as_deref(), Some("Calm"));

		let (id, body) = encode_frame(&field, Id3v2Version::V3).unwrap();
		assert_eq!(id, "TXXX");
		assert_eq!(body, content);
	}

	#[test_log::test]
	fn comment_frame() {
		let content = b"\x00deu\x00Kommentar";
		let field = decode_frame("COMM", content, Id3v2Version::V4)
			.unwrap()
			.unwrap();

		assert_eq!(field.id(), "COMM");
		let FieldValue::Text(text) = field.value() else {
			unreachable!()
		};
		assert_eq!(text.language, Some(*b"deu"));
		assert_eq!(text.content, "Kommentar");

		let (_, body) = encode_frame(&field, Id3v2Version::V4).unwrap();
		assert_eq!(body, content);
	}

	#[test_log::test]
	fn utf8_rejected_in_v3() {
		let content = b"\x03Foo";
		assert!(decode_frame("TIT2", content, Id3v2Version::V3).is_err());
	}

	#[test_log::test]
	fn binary_frame_body_is_kept() {
		let content = [0x01, 0x02, 0x03];
		let field = decode_frame("PRIV", &content, Id3v2Version::V4)
			.unwrap()
			.unwrap();

		assert_eq!(field.value().binary(), Some(&content[..]));
		assert_eq!(encode_frame(&field, Id3v2Version::V4).unwrap().1, content);
	}

	#[test_log::test]
	fn utf8_text_downgraded_to_utf16() {
		let field = Field::new(
			crate::tag::TagFormat::Id3v23,
			"TIT2",
			FieldValue::Text(TextValue::new("A", TextEncoding::UTF8)),
		);

		let (_, body) = encode_frame(&field, Id3v2Version::V3).unwrap();
		assert_eq!(body, [1, 0xFF, 0xFE, b'A', 0]);
	}
}
