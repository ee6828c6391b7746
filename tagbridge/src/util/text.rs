//! Text encodings and their codecs

use crate::error::{ErrorKind, Result, TagError};
use crate::macros::err;

use std::io::Read;

/// Errors that can occur while encoding text
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TextEncodingError {
	encoding: TextEncoding,
	valid_up_to: usize,
}

impl TextEncodingError {
	pub(crate) fn new(encoding: TextEncoding, valid_up_to: usize) -> Self {
		Self {
			encoding,
			valid_up_to,
		}
	}

	/// The target text encoding
	pub fn encoding(&self) -> TextEncoding {
		self.encoding
	}

	/// The character index in the provided string up to which the encoding was valid
	pub fn valid_up_to(&self) -> usize {
		self.valid_up_to
	}
}

impl core::fmt::Display for TextEncodingError {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		write!(
			f,
			"invalid {} sequence from index {}",
			self.encoding.name(),
			self.valid_up_to
		)
	}
}

impl core::error::Error for TextEncodingError {}

/// A character encoding for text stored in a tag
///
/// The discriminants of the first four variants match the ID3v2 text encoding byte.
#[derive(Debug, Clone, Eq, PartialEq, Copy, Hash)]
#[repr(u8)]
pub enum TextEncoding {
	/// ISO-8859-1
	Latin1 = 0,
	/// UTF-16 with a byte order mark
	UTF16 = 1,
	/// UTF-16 big endian
	UTF16BE = 2,
	/// UTF-8
	UTF8 = 3,
	/// UTF-16 little endian, without a byte order mark (ASF)
	UTF16LE = 4,
}

impl TextEncoding {
	/// Get a `TextEncoding` from an ID3v2 text encoding byte, must be 0-3 inclusive
	pub fn from_u8(byte: u8) -> Option<Self> {
		match byte {
			0 => Some(Self::Latin1),
			1 => Some(Self::UTF16),
			2 => Some(Self::UTF16BE),
			3 => Some(Self::UTF8),
			_ => None,
		}
	}

	/// A human readable name for the encoding
	pub fn name(self) -> &'static str {
		match self {
			TextEncoding::Latin1 => "Latin-1",
			TextEncoding::UTF16 => "UTF-16",
			TextEncoding::UTF16BE => "UTF-16 BE",
			TextEncoding::UTF8 => "UTF-8",
			TextEncoding::UTF16LE => "UTF-16 LE",
		}
	}

	/// Whether the encoding uses two byte code units
	pub(crate) fn is_utf16(self) -> bool {
		matches!(
			self,
			TextEncoding::UTF16 | TextEncoding::UTF16BE | TextEncoding::UTF16LE
		)
	}

	/// Checks that every character of `text` can be represented in this encoding
	///
	/// # Errors
	///
	/// The first unrepresentable character, see [`TextEncodingError::valid_up_to`]
	pub fn verify(self, text: &str) -> std::result::Result<(), TextEncodingError> {
		match self {
			TextEncoding::Latin1 => match text.chars().position(|c| u32::from(c) > 0xFF) {
				Some(index) => Err(TextEncodingError::new(self, index)),
				None => Ok(()),
			},
			// Every Unicode scalar value is representable in UTF-8 and UTF-16
			_ => Ok(()),
		}
	}

	/// The ID3v2.4 encodings are not available in ID3v2.3, substitute them with UTF-16.
	pub(crate) fn to_id3v23(self) -> Self {
		match self {
			Self::UTF8 | Self::UTF16BE | Self::UTF16LE => {
				log::warn!(
					"Text encoding {:?} is not supported in ID3v2.3, substituting with UTF-16",
					self
				);
				Self::UTF16
			},
			_ => self,
		}
	}

	pub(crate) fn encode(
		self,
		text: &str,
		terminated: bool,
	) -> std::result::Result<Vec<u8>, TextEncodingError> {
		match self {
			TextEncoding::Latin1 => latin1_encode(text, terminated),
			TextEncoding::UTF16 => Ok(utf16_encode(text, u16::to_le_bytes, true, terminated)),
			TextEncoding::UTF16BE => Ok(utf16_encode(text, u16::to_be_bytes, false, terminated)),
			TextEncoding::UTF16LE => Ok(utf16_encode(text, u16::to_le_bytes, false, terminated)),
			TextEncoding::UTF8 => {
				let mut out = text.as_bytes().to_vec();
				out.extend(terminated.then_some(0));
				Ok(out)
			},
		}
	}
}

/// A string read up to (and including) its null terminator
#[derive(Eq, PartialEq, Debug, Default)]
pub(crate) struct TerminatedText {
	pub(crate) content: String,
	/// The bytes consumed from the reader, terminator included
	pub(crate) bytes_read: usize,
}

/// Reads a single null terminated string from `reader`
///
/// The terminator is one null byte, or two for the UTF-16 encodings. Hitting the end of
/// `reader` before a terminator is not an error, the string simply ends there.
pub(crate) fn read_terminated_text<R>(reader: &mut R, encoding: TextEncoding) -> Result<TerminatedText>
where
	R: Read,
{
	let unit_len = if encoding.is_utf16() { 2 } else { 1 };

	let mut raw = Vec::new();
	let mut buf = [0; 2];
	let mut terminator_len = 0;

	loop {
		let unit = &mut buf[..unit_len];
		if reader.read_exact(unit).is_err() {
			break;
		}

		if unit.iter().all(|&b| b == 0) {
			terminator_len = unit_len;
			break;
		}

		raw.extend_from_slice(unit);
	}

	let content = decode_bytes(&raw, encoding)?;
	Ok(TerminatedText {
		content,
		bytes_read: raw.len() + terminator_len,
	})
}

/// Decode an entire buffer, trailing nulls are trimmed
pub(crate) fn decode_bytes(raw_bytes: &[u8], encoding: TextEncoding) -> Result<String> {
	if raw_bytes.is_empty() {
		return Ok(String::new());
	}

	match encoding {
		TextEncoding::Latin1 => {
			let text = raw_bytes.iter().copied().map(char::from).collect();
			Ok(without_trailing_nulls(text))
		},
		TextEncoding::UTF16 => match raw_bytes {
			[0xFE, 0xFF, rest @ ..] => utf16_decode_bytes(rest, u16::from_be_bytes),
			[0xFF, 0xFE, rest @ ..] => utf16_decode_bytes(rest, u16::from_le_bytes),
			[_] => err!(TextDecode("UTF-16 string has an invalid length (< 2)")),
			_ => err!(TextDecode("UTF-16 string has an invalid byte order mark")),
		},
		TextEncoding::UTF16BE => utf16_decode_bytes(raw_bytes, u16::from_be_bytes),
		TextEncoding::UTF16LE => utf16_decode_bytes(raw_bytes, u16::from_le_bytes),
		TextEncoding::UTF8 => utf8_decode(raw_bytes.to_vec())
			.map_err(|_| TagError::new(ErrorKind::TextDecode("Expected a UTF-8 string"))),
	}
}

pub(crate) fn utf8_decode(bytes: Vec<u8>) -> Result<String> {
	let text = String::from_utf8(bytes)?;
	Ok(without_trailing_nulls(text))
}

/// Decodes BOM-less UTF-16, with `endianness` converting each code unit
///
/// Stray byte order marks are dropped, they appear when multiple ID3v2 strings are joined.
pub(crate) fn utf16_decode_bytes(bytes: &[u8], endianness: fn([u8; 2]) -> u16) -> Result<String> {
	if bytes.len() % 2 != 0 {
		err!(TextDecode("UTF-16 string has an odd length"));
	}

	let units = bytes
		.chunks_exact(2)
		.map(|pair| endianness([pair[0], pair[1]]))
		.filter(|&unit| unit != 0xFEFF);

	let text = char::decode_utf16(units)
		.collect::<std::result::Result<String, _>>()
		.map_err(|_| TagError::new(ErrorKind::TextDecode("Given an invalid UTF-16 string")))?;

	Ok(without_trailing_nulls(text))
}

fn without_trailing_nulls(mut text: String) -> String {
	let len = text.trim_end_matches('\0').len();
	text.truncate(len);
	text
}

fn latin1_encode(text: &str, terminated: bool) -> std::result::Result<Vec<u8>, TextEncodingError> {
	let mut out = Vec::with_capacity(text.len() + usize::from(terminated));
	for (index, c) in text.chars().enumerate() {
		match u8::try_from(u32::from(c)) {
			Ok(byte) => out.push(byte),
			Err(_) => return Err(TextEncodingError::new(TextEncoding::Latin1, index)),
		}
	}

	if terminated {
		out.push(0);
	}

	Ok(out)
}

fn utf16_encode(
	text: &str,
	endianness: fn(u16) -> [u8; 2],
	bom: bool,
	terminated: bool,
) -> Vec<u8> {
	let units = bom
		.then_some(0xFEFF)
		.into_iter()
		.chain(text.encode_utf16())
		.chain(terminated.then_some(0));

	units.flat_map(endianness).collect()
}
