use super::atom::{AtomInfo, string_to_fourcc};
use super::tag::Mp4Tag;
use crate::config::{ParseOptions, ParsingMode};
use crate::error::Result;
use crate::field::{Field, FieldValue, IntegerKind, NumericTuple, TextValue};
use crate::macros::{err, parse_mode_choice};
use crate::registry::Registries;
use crate::registry::genres::genre_name;
use crate::tag::TagFormat;
use crate::util::text::{TextEncoding, utf16_decode_bytes, utf8_decode};

use std::borrow::Cow;
use std::io::{Cursor, Seek, SeekFrom};

use byteorder::{BigEndian, ReadBytesExt};

// https://developer.apple.com/documentation/quicktime-file-format/well-known_types
pub(crate) const IMPLICIT: u32 = 0;
pub(crate) const UTF8: u32 = 1;
pub(crate) const UTF16: u32 = 2;
pub(crate) const JPEG: u32 = 13;
pub(crate) const PNG: u32 = 14;
pub(crate) const BE_SIGNED_INTEGER: u32 = 21;

const FREEFORM: &str = "----";

pub(crate) const GENRE_TEXT: &str = "\u{a9}gen";
pub(crate) const GENRE_INDEX: &str = "gnre";

/// How the value of a numeric atom is laid out
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum NumericLayout {
	/// A 16-bit ordinal/total pair with the given slot count
	Pair(usize),
	Scalar(IntegerKind),
}

/// The numeric layout of an atom, along with the type indicator it is written with
pub(crate) fn numeric_layout(ident: &str) -> Option<(NumericLayout, u32)> {
	let layout = match ident {
		"trkn" => (NumericLayout::Pair(NumericTuple::TRACK_SLOTS), IMPLICIT),
		"disk" => (NumericLayout::Pair(NumericTuple::DISC_SLOTS), IMPLICIT),
		"gnre" => (NumericLayout::Scalar(IntegerKind::U16), IMPLICIT),
		"tmpo" => (NumericLayout::Scalar(IntegerKind::U16), BE_SIGNED_INTEGER),
		"cpil" | "pgap" | "rtng" | "stik" => {
			(NumericLayout::Scalar(IntegerKind::U8), BE_SIGNED_INTEGER)
		},
		_ => return None,
	};

	Some(layout)
}

/// Parses the content of an `ilst` atom
pub(crate) fn parse_ilst<'r>(
	ilst: &[u8],
	registries: &'r Registries,
	parse_options: ParseOptions,
) -> Result<Mp4Tag<'r>> {
	let parse_mode = parse_options.parsing_mode;
	let mut tag = Mp4Tag::new(registries);

	for (atom, content) in children(ilst, parse_mode)? {
		let ident = match &atom.fourcc {
			b"free" | b"skip" => continue,
			b"----" => match freeform_ident(&atom, content, parse_mode)? {
				Some(ident) => ident,
				None => continue,
			},
			_ => atom.ident(),
		};

		let mut found_data = false;
		for (child, data) in children(content, parse_mode)? {
			if &child.fourcc != b"data" {
				continue;
			}

			found_data = true;
			match parse_data(&ident, data, parse_mode) {
				Ok(Some(field)) => tag.container.push_read(field),
				Ok(None) => {},
				Err(e) => {
					if parse_mode == ParsingMode::Strict {
						return Err(e);
					}

					log::warn!("Skipping malformed value of atom \"{ident}\": {e}");
				},
			}
		}

		if !found_data {
			parse_mode_choice!(
				parse_mode,
				STRICT: err!(BadAtom("Expected atom \"data\" to follow the identifier")),
				DEFAULT: log::warn!("Atom \"{ident}\" holds no values, skipping")
			);
		}
	}

	Ok(tag)
}

// Splits a buffer into its atoms, yielding each with its content
fn children(bytes: &[u8], parse_mode: ParsingMode) -> Result<Vec<(AtomInfo, &[u8])>> {
	let end = bytes.len() as u64;
	let mut reader = Cursor::new(bytes);

	let mut atoms = Vec::new();
	while let Some(atom) = AtomInfo::read(&mut reader, end, parse_mode)? {
		let content = &bytes[atom.content_start() as usize..atom.end() as usize];
		reader.seek(SeekFrom::Start(atom.end()))?;
		atoms.push((atom, content));
	}

	Ok(atoms)
}

// ----:mean:name
fn freeform_ident(atom: &AtomInfo, content: &[u8], parse_mode: ParsingMode) -> Result<Option<String>> {
	let mut mean = None;
	let mut name = None;

	for (child, chunk) in children(content, parse_mode)? {
		let target = match &child.fourcc {
			b"mean" => &mut mean,
			b"name" => &mut name,
			_ => continue,
		};

		// Skip the version and flags
		let Some(text) = chunk.get(4..) else {
			err!(BadAtom("Found an incomplete freeform identifier"));
		};

		*target = Some(utf8_decode(text.to_vec())?);
	}

	match (mean, name) {
		(Some(mean), Some(name)) if !mean.is_empty() && !name.is_empty() => {
			Ok(Some(format!("{FREEFORM}:{mean}:{name}")))
		},
		_ => {
			parse_mode_choice!(
				parse_mode,
				STRICT: err!(BadAtom("Found an incomplete freeform identifier")),
				DEFAULT: {
					log::warn!(
						"Skipping freeform atom at {} with a missing mean or name",
						atom.start
					);
					Ok(None)
				}
			)
		},
	}
}

// The content of a `data` atom: type indicator, locale, value
fn parse_data(ident: &str, data: &[u8], parse_mode: ParsingMode) -> Result<Option<Field>> {
	let mut reader = data;
	if reader.len() < 8 {
		err!(BadAtom("Found an incomplete data atom"));
	}

	// The first byte is the type set, which is always 0
	let type_indicator = reader.read_u32::<BigEndian>()? & 0x00FF_FFFF;
	let _locale = reader.read_u32::<BigEndian>()?;
	let value = reader;

	if let Some((layout, _)) = numeric_layout(ident) {
		let kind = match layout {
			NumericLayout::Pair(_) => IntegerKind::U16,
			NumericLayout::Scalar(kind) => scalar_kind(kind, value.len()),
		};

		let tuple = NumericTuple::from_be_bytes(kind, value)?;
		if ident == GENRE_INDEX && genre_name((tuple.value() as usize).wrapping_sub(1)).is_none() {
			parse_mode_choice!(
				parse_mode,
				STRICT: err!(InvalidFieldData("gnre is not a standard genre")),
				DEFAULT: log::warn!("Atom \"gnre\" holds an unknown genre {}", tuple.value())
			);
		}

		return Ok(Some(Field::new(
			TagFormat::Mp4Ilst,
			ident.to_owned(),
			FieldValue::NumericTuple(tuple),
		)));
	}

	let value = match type_indicator {
		UTF8 => FieldValue::Text(TextValue::new(utf8_decode(value.to_vec())?, TextEncoding::UTF8)),
		UTF16 => FieldValue::Text(TextValue::new(
			utf16_decode_bytes(value, u16::from_be_bytes)?,
			TextEncoding::UTF8,
		)),
		_ => FieldValue::Binary(value.to_vec()),
	};

	Ok(Some(Field::new(TagFormat::Mp4Ilst, ident.to_owned(), value)))
}

// Writers don't agree on the width of single integers, so a differently sized value is kept as is
fn scalar_kind(expected: IntegerKind, len: usize) -> IntegerKind {
	match len {
		_ if len == expected.width() => expected,
		1 => IntegerKind::U8,
		2 => IntegerKind::U16,
		4 => IntegerKind::U32,
		8 => IntegerKind::U64,
		_ => expected,
	}
}

/// Writes a complete `ilst` atom
///
/// Values of the same identifier share one atom, each held in its own `data` atom.
pub(crate) fn dump_ilst(tag: &Mp4Tag<'_>) -> Result<Vec<u8>> {
	let mut children = Vec::new();

	for ident in tag.container.ids() {
		let mut ident = ident;
		let mut values = tag
			.container
			.get(ident)
			.iter()
			.map(|field| Cow::Borrowed(field.value()))
			.collect::<Vec<_>>();

		if ident == GENRE_INDEX && tag.write_options().write_mp4_genres_as_text {
			if tag.container.contains(GENRE_TEXT) {
				log::debug!("Dropping \"gnre\", the tag already holds a textual genre");
				continue;
			}

			ident = GENRE_TEXT;
			values = values
				.iter()
				.filter_map(|value| genre_as_text(value))
				.map(Cow::Owned)
				.collect();
		}

		let mut content = Vec::new();
		let fourcc = match ident.strip_prefix("----:").and_then(|rest| rest.split_once(':')) {
			Some((mean, name)) => {
				content.extend(full_atom(b"mean", mean.as_bytes())?);
				content.extend(full_atom(b"name", name.as_bytes())?);
				*b"----"
			},
			None => match string_to_fourcc(ident) {
				Some(fourcc) => fourcc,
				None => err!(BadAtom("Atom identifiers must be 4 Latin-1 characters")),
			},
		};

		for value in values {
			content.extend(data_atom(ident, &value)?);
		}

		children.extend(atom(&fourcc, &content)?);
	}

	atom(b"ilst", &children)
}

/// The name of the standard genre a `gnre` value refers to
pub(crate) fn genre_as_text(value: &FieldValue) -> Option<FieldValue> {
	let index = value.numeric()?.value() as usize;
	let name = genre_name(index.checked_sub(1)?)?;

	Some(FieldValue::Text(TextValue::new(name, TextEncoding::UTF8)))
}

fn data_atom(ident: &str, value: &FieldValue) -> Result<Vec<u8>> {
	let (type_indicator, payload) = match value {
		FieldValue::Text(text) => (UTF8, text.content.as_bytes().to_vec()),
		FieldValue::Binary(bytes) => (image_type(bytes), bytes.clone()),
		FieldValue::NumericTuple(tuple) => {
			let type_indicator =
				numeric_layout(ident).map_or(BE_SIGNED_INTEGER, |(_, type_indicator)| type_indicator);
			return Ok(tuple.to_data_atom(type_indicator));
		},
	};

	let mut content = type_indicator.to_be_bytes().to_vec();
	// Locale
	content.extend([0; 4]);
	content.extend(payload);

	atom(b"data", &content)
}

fn image_type(bytes: &[u8]) -> u32 {
	if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
		return PNG;
	}

	if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
		return JPEG;
	}

	IMPLICIT
}

fn atom(fourcc: &[u8; 4], content: &[u8]) -> Result<Vec<u8>> {
	let Ok(len) = u32::try_from(content.len() + 8) else {
		err!(TooMuchData);
	};

	let mut bytes = Vec::with_capacity(len as usize);
	bytes.extend(len.to_be_bytes());
	bytes.extend(fourcc);
	bytes.extend(content);
	Ok(bytes)
}

fn full_atom(fourcc: &[u8; 4], content: &[u8]) -> Result<Vec<u8>> {
	let mut versioned = vec![0; 4];
	versioned.extend(content);
	atom(fourcc, &versioned)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::ErrorKind;

	use std::sync::LazyLock;

	static REGISTRIES: LazyLock<Registries> = LazyLock::new(Registries::new);

	fn ilst_content(bytes: &[u8]) -> &[u8] {
		&bytes[8..]
	}

	fn text_atom(fourcc: &[u8; 4], text: &str) -> Vec<u8> {
		let mut data = UTF8.to_be_bytes().to_vec();
		data.extend([0; 4]);
		data.extend(text.as_bytes());
		atom(fourcc, &atom(b"data", &data).unwrap()).unwrap()
	}

	#[test_log::test]
	fn parse_known_atoms() {
		let trkn = NumericTuple::pair(NumericTuple::TRACK_SLOTS, 5, 12).to_data_atom(IMPLICIT);
		let tmpo = NumericTuple::scalar(IntegerKind::U16, 120).to_data_atom(BE_SIGNED_INTEGER);

		let ilst = [
			text_atom(b"\xA9nam", "Foo title"),
			atom(b"trkn", &trkn).unwrap(),
			atom(b"tmpo", &tmpo).unwrap(),
			atom(b"free", &[0; 16]).unwrap(),
		]
		.concat();

		let tag = parse_ilst(&ilst, &REGISTRIES, ParseOptions::new()).unwrap();
		assert_eq!(
			tag.container.ids().collect::<Vec<_>>(),
			["\u{a9}nam", "trkn", "tmpo"]
		);

		let trkn = tag.container.get_first("trkn").unwrap();
		assert_eq!(trkn.value().numeric().map(ToString::to_string).as_deref(), Some("5/12"));

		let tmpo = tag.container.get_first("tmpo").unwrap();
		assert_eq!(tmpo.value().numeric().map(NumericTuple::value), Some(120));
	}

	#[test_log::test]
	fn freeform_atoms() {
		let mut content = full_atom(b"mean", b"com.apple.iTunes").unwrap();
		content.extend(full_atom(b"name", b"MOOD").unwrap());
		let mut data = UTF8.to_be_bytes().to_vec();
		data.extend([0; 4]);
		data.extend(b"Calm");
		content.extend(atom(b"data", &data).unwrap());

		let ilst = atom(b"----", &content).unwrap();
		let tag = parse_ilst(&ilst, &REGISTRIES, ParseOptions::new()).unwrap();

		let field = tag.container.get_first("----:com.apple.iTunes:MOOD").unwrap();
		assert_eq!(field.value().text(), Some("Calm"));

		let dumped = dump_ilst(&tag).unwrap();
		assert_eq!(ilst_content(&dumped), ilst.as_slice());
	}

	#[test_log::test]
	fn missing_data_atom() {
		let ilst = atom(b"\xA9nam", &atom(b"free", &[]).unwrap()).unwrap();

		let tag = parse_ilst(&ilst, &REGISTRIES, ParseOptions::new()).unwrap();
		assert!(tag.container.is_empty());

		let err = parse_ilst(
			&ilst,
			&REGISTRIES,
			ParseOptions::new().parsing_mode(ParsingMode::Strict),
		)
		.unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::BadAtom(_)));
	}

	#[test_log::test]
	fn odd_integer_widths() {
		let cpil = NumericTuple::scalar(IntegerKind::U32, 1).to_data_atom(BE_SIGNED_INTEGER);
		let ilst = atom(b"cpil", &cpil).unwrap();

		let tag = parse_ilst(&ilst, &REGISTRIES, ParseOptions::new()).unwrap();
		let cpil = tag.container.get_first("cpil").unwrap().value().numeric().unwrap();
		assert_eq!(cpil.kind(), IntegerKind::U32);

		// Written back with the width it was read with
		assert_eq!(ilst_content(&dump_ilst(&tag).unwrap()), ilst.as_slice());
	}

	#[test_log::test]
	fn images_are_typed() {
		assert_eq!(image_type(b"\x89PNG\r\n\x1a\n...."), PNG);
		assert_eq!(image_type(&[0xFF, 0xD8, 0xFF, 0xE0]), JPEG);
		assert_eq!(image_type(b"GIF89a"), IMPLICIT);
	}
}
