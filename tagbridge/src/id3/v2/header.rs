use crate::config::ParseOptions;
use crate::error::{CannotReadError, CannotReadKind, Result};
use crate::macros::{decode_err, err};
use crate::tag::TagFormat;
use crate::util::synchsafe::unsynch_u32;

use std::io::Read;

use byteorder::{BigEndian, ByteOrder, ReadBytesExt};

/// The ID3v2 version
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum Id3v2Version {
	/// ID3v2.3
	V3,
	/// ID3v2.4
	V4,
}

impl Id3v2Version {
	/// The [`TagFormat`] of this version
	pub fn format(self) -> TagFormat {
		match self {
			Id3v2Version::V3 => TagFormat::Id3v23,
			Id3v2Version::V4 => TagFormat::Id3v24,
		}
	}

	pub(crate) fn major(self) -> u8 {
		match self {
			Id3v2Version::V3 => 3,
			Id3v2Version::V4 => 4,
		}
	}
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct Id3v2Header {
	pub version: Id3v2Version,
	/// Tag level unsynchronisation
	pub unsynchronisation: bool,
	/// The size of the tag contents (**DOES NOT INCLUDE THE HEADER/FOOTER**)
	pub size: u32,
	/// The size of the extended header, which is part of `size`
	pub extended_size: u32,
}

impl Id3v2Header {
	pub(crate) fn parse<R>(bytes: &mut R, parse_options: ParseOptions) -> Result<Self>
	where
		R: Read,
	{
		log::debug!("Parsing ID3v2 header");

		let mut header = [0; 10];
		if bytes.read_exact(&mut header).is_err() {
			decode_err!(@BAIL "ID3v2 header is truncated");
		}

		if &header[..3] != b"ID3" {
			return Err(CannotReadError::from_kind(CannotReadKind::MissingSignature).into());
		}

		// Version is stored as [major, minor], but here we don't care about minor revisions
		let version = match header[3] {
			3 => Id3v2Version::V3,
			4 => Id3v2Version::V4,
			_ => decode_err!(@BAIL "Unsupported ID3v2 major version"),
		};
		let format = version.format();

		let flags = header[5];
		let size = unsynch_u32(BigEndian::read_u32(&header[6..]));

		let mut extended_size = 0;
		if flags & 0x40 == 0x40 {
			let declared = bytes.read_u32::<BigEndian>()?;

			// The ID3v2.3 size excludes the size field itself, ID3v2.4 includes it
			extended_size = match version {
				Id3v2Version::V3 => declared.saturating_add(4),
				Id3v2Version::V4 => unsynch_u32(declared),
			};

			if extended_size < 6 || extended_size > size {
				return Err(CannotReadError::new(
					format,
					CannotReadKind::Malformed("Invalid extended header size"),
				)
				.into());
			}

			let to_skip = u64::from(extended_size - 4);
			if (to_skip as usize) > parse_options.allocation_limit {
				err!(TooMuchData);
			}

			// Nothing in the extended header is of interest
			let skipped = std::io::copy(&mut bytes.by_ref().take(to_skip), &mut std::io::sink())?;
			if skipped != to_skip {
				return Err(CannotReadError::new(format, CannotReadKind::Truncated).into());
			}

			log::debug!("Skipped an extended header of {} bytes", extended_size);
		}

		Ok(Id3v2Header {
			version,
			unsynchronisation: flags & 0x80 == 0x80,
			size,
			extended_size,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::{Id3v2Header, Id3v2Version};
	use crate::config::ParseOptions;
	use crate::error::CannotReadKind;

	#[test_log::test]
	fn parse_plain_header() {
		let bytes = [b'I', b'D', b'3', 4, 0, 0, 0, 0, 0x02, 0x01];
		let header = Id3v2Header::parse(&mut &bytes[..], ParseOptions::new()).unwrap();

		assert_eq!(header.version, Id3v2Version::V4);
		assert_eq!(header.size, 257);
		assert!(!header.unsynchronisation);
	}

	#[test_log::test]
	fn skip_v3_extended_header() {
		let mut bytes = vec![b'I', b'D', b'3', 3, 0, 0x40, 0, 0, 0, 20];
		bytes.extend_from_slice(&[0, 0, 0, 6, 0, 0, 0, 0, 0, 0]);
		bytes.extend_from_slice(b"TIT2");

		let mut reader = &bytes[..];
		let header = Id3v2Header::parse(&mut reader, ParseOptions::new()).unwrap();

		assert_eq!(header.extended_size, 10);
		assert_eq!(reader, b"TIT2");
	}

	#[test_log::test]
	fn missing_signature() {
		let bytes = [b'I', b'D', b'4', 4, 0, 0, 0, 0, 0, 0];
		let err = Id3v2Header::parse(&mut &bytes[..], ParseOptions::new()).unwrap_err();

		assert_eq!(err.cannot_read_kind(), Some(CannotReadKind::MissingSignature));
	}
}
