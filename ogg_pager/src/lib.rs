//! A simple OGG page reader
//!
//! This crate only deals with the physical layer of an OGG stream: pages, their headers,
//! and the lacing values that describe where packets begin and end.

mod crc;
mod error;
mod header;
mod packets;
mod paginate;

use std::io::{Read, Seek};

pub use crc::crc32;
pub use error::{PageError, Result};
pub use header::PageHeader;
pub use packets::{Packets, PacketsIter};
pub use paginate::paginate;

/// The page starts with a packet continued from the previous page
pub const CONTINUED_PACKET: u8 = 0x01;
/// The page is the first page of the logical bitstream
pub const CONTAINS_FIRST_PAGE_OF_BITSTREAM: u8 = 0x02;
/// The page is the last page of the logical bitstream
pub const CONTAINS_LAST_PAGE_OF_BITSTREAM: u8 = 0x04;

/// The maximum page content size
pub const MAX_CONTENT_SIZE: usize = 65025;
/// The maximum number of lacing values in a single segment table
pub const MAX_SEGMENT_COUNT: usize = 255;
/// The granule position of a page on which no packet finishes (-1 in two's complement)
pub const NO_PACKET_FINISHED: u64 = u64::MAX;

const PAGE_HEADER_SIZE: usize = 27;

/// An OGG page
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Page {
	content: Vec<u8>,
	header: PageHeader,
	end: u64,
}

impl Page {
	/// Create a new `Page` from a header and its content
	///
	/// # Errors
	///
	/// The size described by the header's segment table does not match `content.len()`
	///
	/// # Example
	///
	/// ```rust
	/// use ogg_pager::{CONTAINS_FIRST_PAGE_OF_BITSTREAM, Page, PageHeader, segment_table};
	///
	/// # fn main() -> Result<(), ogg_pager::PageError> {
	/// let ident_header_packet = vec![1, 2, 3];
	///
	/// let header = PageHeader::new(
	/// 	CONTAINS_FIRST_PAGE_OF_BITSTREAM,
	/// 	0,
	/// 	2784419176,
	/// 	0,
	/// 	segment_table(ident_header_packet.len())?,
	/// );
	/// let page = Page::new(header, ident_header_packet)?;
	/// assert_eq!(page.content(), &[1, 2, 3]);
	/// # Ok(()) }
	/// ```
	pub fn new(header: PageHeader, content: Vec<u8>) -> Result<Self> {
		if header.content_size() != content.len() {
			return Err(PageError::ContentSizeMismatch);
		}

		let end = header.start + (PAGE_HEADER_SIZE + header.segments().len() + content.len()) as u64;
		Ok(Self {
			content,
			header,
			end,
		})
	}

	/// Attempts to read a `Page` from a reader
	///
	/// # Errors
	///
	/// * [`std::io::Error`]
	/// * [`PageError`]
	pub fn read<R>(data: &mut R) -> Result<Self>
	where
		R: Read + Seek,
	{
		let header = PageHeader::read(data)?;

		let mut content = vec![0; header.content_size()];
		data.read_exact(&mut content)?;

		let end = data.stream_position()?;

		Ok(Page {
			content,
			header,
			end,
		})
	}

	/// Convert the page to bytes for writing
	///
	/// NOTE: This will write the checksum as is. It is likely [`Page::gen_crc`] will have
	/// to be used prior.
	pub fn as_bytes(&self) -> Vec<u8> {
		let segments = self.header.segments();

		let mut bytes =
			Vec::with_capacity(PAGE_HEADER_SIZE + segments.len() + self.content.len());

		bytes.extend(b"OggS");
		bytes.push(0); // Version
		bytes.push(self.header.header_type_flag());
		bytes.extend(self.header.abgp.to_le_bytes());
		bytes.extend(self.header.stream_serial.to_le_bytes());
		bytes.extend(self.header.sequence_number.to_le_bytes());
		bytes.extend(self.header.checksum().to_le_bytes());
		bytes.push(segments.len() as u8);
		bytes.extend(segments);
		bytes.extend(self.content.iter());

		bytes
	}

	/// Generates the CRC checksum of the page
	pub fn gen_crc(&mut self) {
		self.header.checksum = 0;
		self.header.checksum = crc::crc32(&self.as_bytes());
	}

	/// Returns the page header
	pub fn header(&self) -> &PageHeader {
		&self.header
	}

	/// Returns a mutable reference to the page header
	///
	/// NOTE: Changing the header will invalidate the checksum.
	pub fn header_mut(&mut self) -> &mut PageHeader {
		&mut self.header
	}

	/// Returns the page's content
	pub fn content(&self) -> &[u8] {
		self.content.as_slice()
	}

	/// Consumes the page and returns its content
	pub fn take_content(self) -> Vec<u8> {
		self.content
	}

	/// The position in the stream the page ended
	pub fn end(&self) -> u64 {
		self.end
	}
}

/// Creates the segment table for a single, complete packet
///
/// # Errors
///
/// `length` > [`MAX_CONTENT_SIZE`]
///
/// # Example
///
/// ```rust
/// use ogg_pager::segment_table;
///
/// # fn main() -> Result<(), ogg_pager::PageError> {
/// assert_eq!(segment_table(300)?, vec![255, 45]);
///
/// // A packet that is a multiple of 255 needs a terminating zero lacing value
/// assert_eq!(segment_table(255)?, vec![255, 0]);
/// # Ok(()) }
/// ```
pub fn segment_table(length: usize) -> Result<Vec<u8>> {
	if length == 0 {
		return Ok(vec![0]);
	}

	let needed = (length / 255) + 1;
	if needed > MAX_SEGMENT_COUNT {
		return Err(PageError::TooMuchData);
	}

	let mut segments = vec![255; needed - 1];
	segments.push((length % 255) as u8);

	Ok(segments)
}
