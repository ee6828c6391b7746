use crate::config::ParsingMode;
use crate::error::Result;
use crate::macros::{err, parse_mode_choice};

use std::io::{Read, Seek, SeekFrom};

use byteorder::{BigEndian, ReadBytesExt};

pub(crate) const ATOM_HEADER_LEN: u64 = 8;

/// The position and size of an atom
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AtomInfo {
	pub(crate) start: u64,
	/// The full length, including the header
	pub(crate) len: u64,
	pub(crate) extended: bool,
	pub(crate) fourcc: [u8; 4],
}

// Same character set as TagLib
fn is_valid_identifier_byte(b: u8) -> bool {
	(b' '..=b'~').contains(&b) || b == b'\xA9'
}

impl AtomInfo {
	/// Reads the next atom header, leaving `data` positioned at its content
	///
	/// `parent_end` is the offset the atom may not extend past. Returns `None` once
	/// `parent_end` is reached, or when an unrecoverable atom is skipped.
	pub(crate) fn read<R>(
		data: &mut R,
		parent_end: u64,
		parse_mode: ParsingMode,
	) -> Result<Option<Self>>
	where
		R: Read + Seek,
	{
		let start = data.stream_position()?;
		if start + ATOM_HEADER_LEN > parent_end {
			return Ok(None);
		}

		let len_raw = u64::from(data.read_u32::<BigEndian>()?);

		let mut fourcc = [0; 4];
		data.read_exact(&mut fourcc)?;

		if !fourcc.iter().copied().all(is_valid_identifier_byte) {
			parse_mode_choice!(
				parse_mode,
				STRICT: err!(BadAtom("Encountered an atom with invalid characters")),
				DEFAULT: {
					log::warn!("Encountered an atom with invalid characters, stopping");
					data.seek(SeekFrom::Start(parent_end))?;
					return Ok(None);
				}
			);
		}

		let (len, extended) = match len_raw {
			// The atom extends to the end of its parent
			0 => (parent_end - start, false),
			1 => (data.read_u64::<BigEndian>()?, true),
			_ => (len_raw, false),
		};

		let info = Self {
			start,
			len,
			extended,
			fourcc,
		};

		if len < info.header_len() {
			err!(BadAtom("Found an invalid length (< 8)"));
		}

		if start + len > parent_end {
			parse_mode_choice!(
				parse_mode,
				RELAXED: {
					log::warn!("Atom \"{}\" overruns its parent, clamping", info.ident());
					return Ok(Some(Self {
						len: parent_end - start,
						..info
					}));
				},
				DEFAULT: err!(SizeMismatch)
			);
		}

		Ok(Some(info))
	}

	pub(crate) fn header_len(&self) -> u64 {
		if self.extended {
			return ATOM_HEADER_LEN + 8;
		}

		ATOM_HEADER_LEN
	}

	pub(crate) fn content_start(&self) -> u64 {
		self.start + self.header_len()
	}

	pub(crate) fn end(&self) -> u64 {
		self.start + self.len
	}

	/// The identifier, with each byte interpreted as Latin-1
	pub(crate) fn ident(&self) -> String {
		fourcc_to_string(self.fourcc)
	}
}

pub(crate) fn fourcc_to_string(fourcc: [u8; 4]) -> String {
	fourcc.iter().map(|&b| char::from(b)).collect()
}

/// Converts a 4 character Latin-1 identifier (`©nam`) back to its bytes
pub(crate) fn string_to_fourcc(ident: &str) -> Option<[u8; 4]> {
	let bytes = ident
		.chars()
		.map(|c| u8::try_from(u32::from(c)).ok())
		.collect::<Option<Vec<u8>>>()?;

	bytes.try_into().ok()
}

/// Searches the atoms between the current position and `parent_end` for `fourcc`
///
/// On success, `data` is positioned at the content of the found atom.
pub(crate) fn find_child<R>(
	data: &mut R,
	parent_end: u64,
	fourcc: &[u8; 4],
	parse_mode: ParsingMode,
) -> Result<Option<AtomInfo>>
where
	R: Read + Seek,
{
	while let Some(atom) = AtomInfo::read(data, parent_end, parse_mode)? {
		if &atom.fourcc == fourcc {
			return Ok(Some(atom));
		}

		data.seek(SeekFrom::Start(atom.end()))?;
	}

	Ok(None)
}

/// Skips the version and flags of a full `meta` atom
///
/// QuickTime writes `meta` as a plain container, in which case nothing is skipped.
pub(crate) fn skip_meta_version<R>(data: &mut R) -> Result<()>
where
	R: Read + Seek,
{
	let _version_flags = data.read_u32::<BigEndian>()?;

	let mut next_ident = [0; 4];
	data.read_exact(&mut next_ident)?;

	match &next_ident {
		b"hdlr" | b"ilst" | b"mhdr" | b"ctry" | b"lang" => {
			log::warn!("File contains a non-full 'meta' atom");
			data.seek(SeekFrom::Current(-8))?;
		},
		_ => {
			data.seek(SeekFrom::Current(-4))?;
		},
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::ErrorKind;

	use std::io::Cursor;

	fn atom(fourcc: &[u8; 4], content: &[u8]) -> Vec<u8> {
		let mut bytes = ((content.len() + 8) as u32).to_be_bytes().to_vec();
		bytes.extend(fourcc);
		bytes.extend(content);
		bytes
	}

	#[test_log::test]
	fn find_nested() {
		let bytes = [atom(b"free", &[0; 4]), atom(b"moov", &atom(b"udta", &[]))].concat();
		let end = bytes.len() as u64;
		let mut reader = Cursor::new(bytes);

		let moov = find_child(&mut reader, end, b"moov", ParsingMode::Strict)
			.unwrap()
			.unwrap();
		assert_eq!(moov.start, 12);
		assert_eq!(reader.position(), moov.content_start());

		let udta = find_child(&mut reader, moov.end(), b"udta", ParsingMode::Strict)
			.unwrap()
			.unwrap();
		assert_eq!(udta.len, 8);

		assert_eq!(
			find_child(&mut reader, moov.end(), b"meta", ParsingMode::Strict).unwrap(),
			None
		);
	}

	#[test_log::test]
	fn extended_and_open_ended_sizes() {
		let mut bytes = 1_u32.to_be_bytes().to_vec();
		bytes.extend(b"mdat");
		bytes.extend(20_u64.to_be_bytes());
		bytes.extend([0; 4]);
		bytes.extend(0_u32.to_be_bytes());
		bytes.extend(b"free");
		bytes.extend([0; 6]);

		let end = bytes.len() as u64;
		let mut reader = Cursor::new(bytes);

		let mdat = AtomInfo::read(&mut reader, end, ParsingMode::Strict)
			.unwrap()
			.unwrap();
		assert!(mdat.extended);
		assert_eq!(mdat.content_start(), 16);

		reader.set_position(mdat.end());
		let free = AtomInfo::read(&mut reader, end, ParsingMode::Strict)
			.unwrap()
			.unwrap();
		assert_eq!(free.len, 14);
		assert_eq!(free.end(), end);
	}

	#[test_log::test]
	fn overrunning_atoms() {
		let mut bytes = atom(b"ilst", &[0; 8]);
		bytes.truncate(12);
		let end = bytes.len() as u64;

		let err = AtomInfo::read(&mut Cursor::new(&bytes), end, ParsingMode::BestAttempt)
			.unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::SizeMismatch));

		let clamped = AtomInfo::read(&mut Cursor::new(&bytes), end, ParsingMode::Relaxed)
			.unwrap()
			.unwrap();
		assert_eq!(clamped.len, 12);
	}

	#[test_log::test]
	fn latin1_identifiers() {
		assert_eq!(fourcc_to_string(*b"\xA9nam"), "\u{a9}nam");
		assert_eq!(string_to_fourcc("\u{a9}nam"), Some(*b"\xA9nam"));
		assert_eq!(string_to_fourcc("\u{263A}abc"), None);
		assert_eq!(string_to_fourcc("toolong"), None);
	}
}
