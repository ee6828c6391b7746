use crate::error::Result;
use crate::field::{IntegerKind, NumericTuple};
use crate::macros::err;

use byteorder::{ByteOrder, LittleEndian};

/// The size of an object header: a GUID and a 64-bit size
pub(crate) const OBJECT_HEADER_SIZE: usize = 24;
/// The header object additionally holds a child count and two reserved bytes
pub(crate) const HEADER_OBJECT_SIZE: usize = OBJECT_HEADER_SIZE + 6;

/// A GUID as stored on disk, the first three groups are little-endian
pub(crate) type Guid = [u8; 16];

/// `75B22630-668E-11CF-A6D9-00AA0062CE6C`
pub(crate) const HEADER_OBJECT: Guid = [
	0x30, 0x26, 0xB2, 0x75, 0x8E, 0x66, 0xCF, 0x11, 0xA6, 0xD9, 0x00, 0xAA, 0x00, 0x62, 0xCE, 0x6C,
];

/// `75B22633-668E-11CF-A6D9-00AA0062CE6C`
pub(crate) const CONTENT_DESCRIPTION_OBJECT: Guid = [
	0x33, 0x26, 0xB2, 0x75, 0x8E, 0x66, 0xCF, 0x11, 0xA6, 0xD9, 0x00, 0xAA, 0x00, 0x62, 0xCE, 0x6C,
];

/// `D2D0A440-E307-11D2-97F0-00A0C95EA850`
pub(crate) const EXTENDED_CONTENT_DESCRIPTION_OBJECT: Guid = [
	0x40, 0xA4, 0xD0, 0xD2, 0x07, 0xE3, 0xD2, 0x11, 0x97, 0xF0, 0x00, 0xA0, 0xC9, 0x5E, 0xA8, 0x50,
];

/// The fields of the content description object, in their on-disk order
pub(crate) const DESCRIPTION_IDS: [&str; 5] = ["TITLE", "AUTHOR", "COPYRIGHT", "DESCRIPTION", "RATING"];

/// Descriptors that are stored as numbers rather than text
pub(crate) const NUMERIC_DESCRIPTORS: [(&str, IntegerKind); 2] = [
	("WM/IsCompilation", IntegerKind::Bool32),
	("IsVBR", IntegerKind::Bool32),
];

pub(crate) fn numeric_kind(id: &str) -> Option<IntegerKind> {
	NUMERIC_DESCRIPTORS
		.iter()
		.find(|(name, _)| *name == id)
		.map(|(_, kind)| *kind)
}

/// The value type of an extended content descriptor
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum DescriptorType {
	Text,
	Binary,
	Bool,
	DWord,
	QWord,
	Word,
}

impl DescriptorType {
	pub(crate) fn from_u16(value: u16) -> Option<Self> {
		match value {
			0 => Some(Self::Text),
			1 => Some(Self::Binary),
			2 => Some(Self::Bool),
			3 => Some(Self::DWord),
			4 => Some(Self::QWord),
			5 => Some(Self::Word),
			_ => None,
		}
	}

	pub(crate) fn as_u16(self) -> u16 {
		match self {
			Self::Text => 0,
			Self::Binary => 1,
			Self::Bool => 2,
			Self::DWord => 3,
			Self::QWord => 4,
			Self::Word => 5,
		}
	}

	pub(crate) fn integer_kind(self) -> Option<IntegerKind> {
		match self {
			Self::Bool => Some(IntegerKind::Bool32),
			Self::DWord => Some(IntegerKind::U32),
			Self::QWord => Some(IntegerKind::U64),
			Self::Word => Some(IntegerKind::U16),
			Self::Text | Self::Binary => None,
		}
	}

	pub(crate) fn from_integer_kind(kind: IntegerKind) -> Self {
		match kind {
			IntegerKind::Bool32 => Self::Bool,
			IntegerKind::U8 | IntegerKind::U16 => Self::Word,
			IntegerKind::U32 => Self::DWord,
			IntegerKind::U64 => Self::QWord,
		}
	}
}

/// Reads a little-endian integer descriptor value
pub(crate) fn read_integer(kind: IntegerKind, bytes: &[u8]) -> Result<NumericTuple> {
	let value = match (kind, bytes.len()) {
		(IntegerKind::U16, 2) => u64::from(LittleEndian::read_u16(bytes)),
		(IntegerKind::U32 | IntegerKind::Bool32, 4) => u64::from(LittleEndian::read_u32(bytes)),
		(IntegerKind::U64, 8) => LittleEndian::read_u64(bytes),
		_ => err!(SizeMismatch),
	};

	Ok(NumericTuple::scalar(kind, value))
}

/// Writes an integer descriptor value, WORDs are used for 8-bit values
pub(crate) fn write_integer(tuple: &NumericTuple, out: &mut Vec<u8>) {
	let value = tuple.value();
	match DescriptorType::from_integer_kind(tuple.kind()) {
		DescriptorType::Word => out.extend((value as u16).to_le_bytes()),
		DescriptorType::Bool | DescriptorType::DWord => out.extend((value as u32).to_le_bytes()),
		_ => out.extend(value.to_le_bytes()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test_log::test]
	fn descriptor_types() {
		for value in 0..6 {
			assert_eq!(DescriptorType::from_u16(value).unwrap().as_u16(), value);
		}

		assert_eq!(DescriptorType::from_u16(6), None);
	}

	#[test_log::test]
	fn integers_are_little_endian() {
		let tuple = read_integer(IntegerKind::U32, &[0x01, 0x02, 0, 0]).unwrap();
		assert_eq!(tuple.value(), 0x0201);

		let mut out = Vec::new();
		write_integer(&tuple, &mut out);
		assert_eq!(out, [0x01, 0x02, 0, 0]);

		assert!(read_integer(IntegerKind::U16, &[0, 0, 0]).is_err());
	}
}
