use crate::error::Result;
use crate::macros::{decode_err, err};

use std::fmt::{Display, Formatter};
use std::io::{Cursor, Read};

use byteorder::{BigEndian, ReadBytesExt};

/// The width and interpretation of each slot in a [`NumericTuple`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum IntegerKind {
	/// 8-bit unsigned
	U8,
	/// 16-bit unsigned
	U16,
	/// 32-bit unsigned
	U32,
	/// 64-bit unsigned
	U64,
	/// A boolean stored in 32 bits
	Bool32,
}

impl IntegerKind {
	/// The size of one slot in bytes
	pub fn width(self) -> usize {
		match self {
			IntegerKind::U8 => 1,
			IntegerKind::U16 => 2,
			IntegerKind::U32 | IntegerKind::Bool32 => 4,
			IntegerKind::U64 => 8,
		}
	}

	fn max(self) -> u64 {
		match self {
			IntegerKind::U8 => u64::from(u8::MAX),
			IntegerKind::U16 => u64::from(u16::MAX),
			IntegerKind::U32 => u64::from(u32::MAX),
			IntegerKind::U64 => u64::MAX,
			IntegerKind::Bool32 => 1,
		}
	}
}

/// An ordered sequence of fixed-width integers
///
/// Tuples with a single slot hold a plain number (`tmpo`, an ASF `DWORD`, ...).
///
/// Tuples with more than one slot are positional pairs, laid out as `trkn` and `disk` are:
///
/// | Slot | Meaning                            |
/// |------|------------------------------------|
/// | 0    | Reserved                           |
/// | 1    | Ordinal                            |
/// | 2    | Total, 0 when unspecified          |
/// | 3    | Reserved (`trkn` only)             |
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NumericTuple {
	kind: IntegerKind,
	slots: Vec<u64>,
}

impl NumericTuple {
	/// Slot count of a track number pair
	pub const TRACK_SLOTS: usize = 4;
	/// Slot count of a disc number pair
	pub const DISC_SLOTS: usize = 3;

	const ORDINAL_SLOT: usize = 1;
	const TOTAL_SLOT: usize = 2;

	/// Creates a tuple from raw slots
	///
	/// Values exceeding the width of `kind` are clamped.
	pub fn new(kind: IntegerKind, slots: Vec<u64>) -> Self {
		let max = kind.max();
		let slots = slots.into_iter().map(|slot| slot.min(max)).collect();

		Self { kind, slots }
	}

	/// Creates a single slot tuple
	pub fn scalar(kind: IntegerKind, value: u64) -> Self {
		Self::new(kind, vec![value])
	}

	/// Creates a 16-bit pair with `slot_count` slots
	///
	/// # Examples
	///
	/// ```rust
	/// use tagbridge::field::NumericTuple;
	///
	/// let track = NumericTuple::pair(NumericTuple::TRACK_SLOTS, 5, 12);
	/// assert_eq!(track.slots(), &[0, 5, 12, 0]);
	/// assert_eq!(track.to_string(), "5/12");
	/// ```
	pub fn pair(slot_count: usize, ordinal: u16, total: u16) -> Self {
		let mut slots = vec![0; slot_count.max(Self::TOTAL_SLOT + 1)];
		slots[Self::ORDINAL_SLOT] = u64::from(ordinal);
		slots[Self::TOTAL_SLOT] = u64::from(total);

		Self {
			kind: IntegerKind::U16,
			slots,
		}
	}

	/// Parses an `"N"` or `"N/M"` string into a 16-bit pair
	///
	/// # Errors
	///
	/// * The string splits into anything other than one or two parts
	/// * A part is empty, or isn't a 16-bit number
	///
	/// # Examples
	///
	/// ```rust
	/// use tagbridge::field::NumericTuple;
	///
	/// # fn main() -> tagbridge::error::Result<()> {
	/// let disc = NumericTuple::parse_pair("2/3", NumericTuple::DISC_SLOTS)?;
	/// assert_eq!(disc.ordinal(), Some(2));
	/// assert_eq!(disc.total(), Some(3));
	///
	/// assert!(NumericTuple::parse_pair("1/2/3", NumericTuple::DISC_SLOTS).is_err());
	/// # Ok(()) }
	/// ```
	pub fn parse_pair(text: &str, slot_count: usize) -> Result<Self> {
		let parts = text.split('/').map(str::trim).collect::<Vec<_>>();

		let (ordinal, total) = match parts.as_slice() {
			[ordinal] => (parse_slot(ordinal)?, 0),
			[ordinal, total] => (parse_slot(ordinal)?, parse_slot(total)?),
			_ => err!(InvalidFieldData("expected a number, or two numbers separated by '/'")),
		};

		Ok(Self::pair(slot_count, ordinal, total))
	}

	/// Parses a single number
	///
	/// For [`IntegerKind::Bool32`], `true` and `false` are accepted as well.
	///
	/// # Errors
	///
	/// `text` isn't a number that fits `kind`
	pub fn parse_scalar(kind: IntegerKind, text: &str) -> Result<Self> {
		let text = text.trim();

		if kind == IntegerKind::Bool32 {
			if text.eq_ignore_ascii_case("true") {
				return Ok(Self::scalar(kind, 1));
			}

			if text.eq_ignore_ascii_case("false") {
				return Ok(Self::scalar(kind, 0));
			}
		}

		match text.parse::<u64>() {
			Ok(value) if value <= kind.max() => Ok(Self::scalar(kind, value)),
			_ => err!(InvalidFieldData("expected a number")),
		}
	}

	/// The integer kind of every slot
	pub fn kind(&self) -> IntegerKind {
		self.kind
	}

	/// The raw slots
	pub fn slots(&self) -> &[u64] {
		&self.slots
	}

	/// Whether this is a positional pair rather than a plain number
	pub fn is_pair(&self) -> bool {
		self.slots.len() > 1
	}

	/// The plain value of a single slot tuple, or the ordinal of a pair
	pub fn value(&self) -> u64 {
		if self.is_pair() {
			return self.ordinal().unwrap_or(0);
		}

		self.slots.first().copied().unwrap_or(0)
	}

	/// The ordinal of a pair
	pub fn ordinal(&self) -> Option<u64> {
		if !self.is_pair() {
			return None;
		}

		self.slots.get(Self::ORDINAL_SLOT).copied()
	}

	/// The total of a pair, `None` when unspecified (0)
	pub fn total(&self) -> Option<u64> {
		if !self.is_pair() {
			return None;
		}

		self.slots
			.get(Self::TOTAL_SLOT)
			.copied()
			.filter(|total| *total > 0)
	}

	/// Sets the ordinal of a pair, leaving the other slots intact
	pub fn set_ordinal(&mut self, ordinal: u16) {
		self.set_slot(Self::ORDINAL_SLOT, ordinal);
	}

	/// Sets the total of a pair, leaving the other slots intact
	pub fn set_total(&mut self, total: u16) {
		self.set_slot(Self::TOTAL_SLOT, total);
	}

	fn set_slot(&mut self, index: usize, value: u16) {
		if self.slots.len() <= Self::TOTAL_SLOT {
			self.slots.resize(Self::TOTAL_SLOT + 1, 0);
		}

		self.slots[index] = u64::from(value).min(self.kind.max());
	}

	/// Whether the tuple carries no information (an all zero pair)
	pub fn is_empty(&self) -> bool {
		self.slots.is_empty() || (self.is_pair() && self.slots.iter().all(|slot| *slot == 0))
	}

	/// Reads big-endian slots of `kind`, consuming all of `bytes`
	///
	/// # Errors
	///
	/// The length of `bytes` isn't a multiple of the slot width
	pub fn from_be_bytes(kind: IntegerKind, bytes: &[u8]) -> Result<Self> {
		let width = kind.width();
		if bytes.is_empty() || bytes.len() % width != 0 {
			err!(SizeMismatch);
		}

		let mut reader = Cursor::new(bytes);
		let mut slots = Vec::with_capacity(bytes.len() / width);
		for _ in 0..bytes.len() / width {
			slots.push(reader.read_uint::<BigEndian>(width)?);
		}

		Ok(Self { kind, slots })
	}

	/// Writes every slot as a big-endian integer
	pub fn to_be_bytes(&self) -> Vec<u8> {
		let width = self.kind.width();

		let mut out = Vec::with_capacity(self.slots.len() * width);
		for slot in &self.slots {
			out.extend_from_slice(&slot.to_be_bytes()[8 - width..]);
		}

		out
	}

	/// Reads the tuple from an embedded `data` box
	///
	/// The box is laid out as a 32-bit size, `data`, a 32-bit type indicator, a 32-bit locale,
	/// followed by the slots.
	///
	/// # Errors
	///
	/// * The box is too short, or its size disagrees with `bytes`
	/// * The identifier isn't `data`
	/// * See [`NumericTuple::from_be_bytes`]
	pub fn read_data_atom(kind: IntegerKind, bytes: &[u8]) -> Result<Self> {
		const HEADER_LEN: usize = 16;

		if bytes.len() < HEADER_LEN {
			decode_err!(@BAIL Mp4Ilst, Truncated);
		}

		let mut reader = Cursor::new(bytes);
		let size = reader.read_u32::<BigEndian>()? as usize;

		let mut ident = [0; 4];
		reader.read_exact(&mut ident)?;
		if &ident != b"data" {
			err!(BadAtom("Expected atom \"data\" to hold the numeric value"));
		}

		if size < HEADER_LEN || size > bytes.len() {
			err!(SizeMismatch);
		}

		Self::from_be_bytes(kind, &bytes[HEADER_LEN..size])
	}

	/// Writes the tuple as a `data` box with the given type indicator
	pub fn to_data_atom(&self, type_indicator: u32) -> Vec<u8> {
		let content = self.to_be_bytes();

		let mut out = Vec::with_capacity(16 + content.len());
		out.extend_from_slice(&(16 + content.len() as u32).to_be_bytes());
		out.extend_from_slice(b"data");
		out.extend_from_slice(&type_indicator.to_be_bytes());
		// Locale
		out.extend_from_slice(&[0; 4]);
		out.extend_from_slice(&content);

		out
	}
}

fn parse_slot(part: &str) -> Result<u16> {
	if part.is_empty() {
		err!(InvalidFieldData("empty number"));
	}

	match part.parse::<u16>() {
		Ok(value) => Ok(value),
		Err(_) => err!(InvalidFieldData("not a 16-bit number")),
	}
}

impl Display for NumericTuple {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if !self.is_pair() {
			return write!(f, "{}", self.value());
		}

		match (self.ordinal().unwrap_or(0), self.total()) {
			(ordinal, Some(total)) => write!(f, "{ordinal}/{total}"),
			(ordinal, None) => write!(f, "{ordinal}"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::{IntegerKind, NumericTuple};
	use crate::error::ErrorKind;

	#[test_log::test]
	fn render_pairs() {
		assert_eq!(NumericTuple::pair(4, 5, 0).to_string(), "5");
		assert_eq!(NumericTuple::pair(4, 5, 12).to_string(), "5/12");
		assert_eq!(NumericTuple::pair(3, 1, 2).to_string(), "1/2");
	}

	#[test_log::test]
	fn parse_pair_split_counts() {
		let track = NumericTuple::parse_pair("5", 4).unwrap();
		assert_eq!(track.slots(), &[0, 5, 0, 0]);

		let track = NumericTuple::parse_pair(" 5 / 12 ", 4).unwrap();
		assert_eq!(track.slots(), &[0, 5, 12, 0]);

		for bad in ["1/2/3", "", "/", "5/", "a/2", "70000"] {
			let err = NumericTuple::parse_pair(bad, 4).unwrap_err();
			assert!(
				matches!(err.kind(), ErrorKind::InvalidFieldData(_)),
				"{bad:?} was accepted"
			);
		}
	}

	#[test_log::test]
	fn data_atom_layout() {
		let trkn = NumericTuple::pair(NumericTuple::TRACK_SLOTS, 3, 10);
		let atom = trkn.to_data_atom(0);

		assert_eq!(
			atom,
			[
				0, 0, 0, 24, b'd', b'a', b't', b'a', 0, 0, 0, 0, 0, 0, 0, 0, // Header
				0, 0, 0, 3, 0, 10, 0, 0, // Slots
			]
		);

		let read = NumericTuple::read_data_atom(IntegerKind::U16, &atom).unwrap();
		assert_eq!(read.ordinal(), Some(3));
		assert_eq!(read.total(), Some(10));
	}

	#[test_log::test]
	fn data_atom_bad_ident() {
		let mut atom = NumericTuple::pair(3, 1, 1).to_data_atom(0);
		atom[4..8].copy_from_slice(b"date");

		assert!(NumericTuple::read_data_atom(IntegerKind::U16, &atom).is_err());
		assert!(NumericTuple::read_data_atom(IntegerKind::U16, &atom[..10]).is_err());
	}

	#[test_log::test]
	fn scalars() {
		let bpm = NumericTuple::parse_scalar(IntegerKind::U16, "128").unwrap();
		assert_eq!(bpm.to_be_bytes(), [0, 128]);
		assert_eq!(bpm.to_string(), "128");
		assert!(!bpm.is_empty());

		let flag = NumericTuple::parse_scalar(IntegerKind::Bool32, "true").unwrap();
		assert_eq!(flag.value(), 1);

		assert!(NumericTuple::parse_scalar(IntegerKind::U8, "256").is_err());
		assert!(NumericTuple::parse_scalar(IntegerKind::U16, "fast").is_err());
	}
}
