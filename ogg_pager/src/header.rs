use crate::{PageError, Result};

use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};

/// An OGG page header
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PageHeader {
	/// The position in the stream the page started at
	pub start: u64,
	pub(crate) header_type_flag: u8,
	/// The page's absolute granule position
	pub abgp: u64,
	/// The page's stream serial number
	pub stream_serial: u32,
	/// The page's sequence number
	pub sequence_number: u32,
	pub(crate) checksum: u32,
	pub(crate) segments: Vec<u8>,
}

impl PageHeader {
	/// Create a new `PageHeader`
	///
	/// The checksum will be zeroed, see [`Page::gen_crc`](crate::Page::gen_crc).
	pub fn new(
		header_type_flag: u8,
		abgp: u64,
		stream_serial: u32,
		sequence_number: u32,
		segments: Vec<u8>,
	) -> Self {
		Self {
			start: 0,
			header_type_flag,
			abgp,
			stream_serial,
			sequence_number,
			checksum: 0,
			segments,
		}
	}

	/// Read a page header, including its segment table
	///
	/// The reader will be positioned at the start of the page content.
	///
	/// # Errors
	///
	/// * [`std::io::Error`]
	/// * The page is missing its magic signature, has a bad version, or has no segments
	pub fn read<R>(data: &mut R) -> Result<Self>
	where
		R: Read + std::io::Seek,
	{
		let start = data.stream_position()?;

		let mut sig = [0; 4];
		data.read_exact(&mut sig)?;

		if &sig != b"OggS" {
			return Err(PageError::MissingMagic);
		}

		// Version, always 0
		let version = data.read_u8()?;
		if version != 0 {
			return Err(PageError::InvalidVersion);
		}

		let header_type_flag = data.read_u8()?;

		let abgp = data.read_u64::<LittleEndian>()?;
		let stream_serial = data.read_u32::<LittleEndian>()?;
		let sequence_number = data.read_u32::<LittleEndian>()?;
		let checksum = data.read_u32::<LittleEndian>()?;

		let segment_count = data.read_u8()?;
		if segment_count < 1 {
			return Err(PageError::BadSegmentCount);
		}

		let mut segments = vec![0; segment_count as usize];
		data.read_exact(&mut segments)?;

		Ok(Self {
			start,
			header_type_flag,
			abgp,
			stream_serial,
			sequence_number,
			checksum,
			segments,
		})
	}

	/// Returns the page's header type flag
	pub fn header_type_flag(&self) -> u8 {
		self.header_type_flag
	}

	/// Sets the page's header type flag
	pub fn set_header_type_flag(&mut self, flag: u8) {
		self.header_type_flag = flag;
	}

	/// Returns the page's checksum
	pub fn checksum(&self) -> u32 {
		self.checksum
	}

	/// Returns the page's segment table
	pub fn segments(&self) -> &[u8] {
		&self.segments
	}

	/// The size of the page content, the sum of all lacing values
	pub fn content_size(&self) -> usize {
		self.segments.iter().map(|&s| usize::from(s)).sum()
	}

	/// The lengths of every packet (or packet fragment) on this page, in order
	///
	/// The first entry may be the tail of a packet started on a previous page, and the
	/// last entry may be incomplete, see [`PageHeader::last_packet_incomplete`].
	///
	/// # Example
	///
	/// ```rust
	/// use ogg_pager::PageHeader;
	///
	/// let header = PageHeader::new(0, 0, 0, 0, vec![255, 10, 20, 255]);
	///
	/// assert_eq!(header.packet_lengths(), vec![265, 20, 255]);
	/// assert!(header.last_packet_incomplete());
	/// ```
	pub fn packet_lengths(&self) -> Vec<u64> {
		let mut lengths = Vec::new();

		let mut current = 0_u64;
		let mut pending = false;
		for &segment in &self.segments {
			current += u64::from(segment);
			pending = true;

			if segment < 255 {
				lengths.push(current);
				current = 0;
				pending = false;
			}
		}

		if pending {
			lengths.push(current);
		}

		lengths
	}

	/// Whether the final packet on this page continues on the next page
	///
	/// This is the case when the last lacing value is 255.
	pub fn last_packet_incomplete(&self) -> bool {
		self.segments.last() == Some(&255)
	}
}
