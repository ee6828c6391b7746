use crate::error::Result;
use crate::{
	CONTAINS_FIRST_PAGE_OF_BITSTREAM, CONTAINS_LAST_PAGE_OF_BITSTREAM, CONTINUED_PACKET,
	MAX_SEGMENT_COUNT, NO_PACKET_FINISHED, Page, PageHeader,
};

struct PaginateContext {
	pages: Vec<Page>,
	abgp: u64,
	stream_serial: u32,
	header_flags: u8,
	segments: Vec<u8>,
	content: Vec<u8>,
	first_page: bool,
	// The first segment of the page being built continues a packet from the previous page
	continued: bool,
	packet_finished_on_page: bool,
	pos: u64,
}

impl PaginateContext {
	fn new(abgp: u64, stream_serial: u32, header_flags: u8) -> Self {
		Self {
			pages: Vec::new(),
			abgp,
			stream_serial,
			header_flags,
			segments: Vec::with_capacity(MAX_SEGMENT_COUNT),
			content: Vec::new(),
			first_page: true,
			continued: false,
			packet_finished_on_page: false,
			pos: 0,
		}
	}

	fn push_segment(&mut self, segment: &[u8]) -> Result<()> {
		debug_assert!(segment.len() <= 255);

		self.segments.push(segment.len() as u8);
		self.content.extend_from_slice(segment);

		let packet_done = segment.len() < 255;
		if packet_done {
			self.packet_finished_on_page = true;
		}

		if self.segments.len() == MAX_SEGMENT_COUNT {
			self.flush_page(!packet_done)?;
		}

		Ok(())
	}

	fn flush_page(&mut self, packet_continues: bool) -> Result<()> {
		let mut header_type_flag = 0;
		if self.first_page && self.header_flags & CONTAINS_FIRST_PAGE_OF_BITSTREAM != 0 {
			header_type_flag |= CONTAINS_FIRST_PAGE_OF_BITSTREAM;
		}
		if self.continued {
			header_type_flag |= CONTINUED_PACKET;
		}

		let abgp = if self.packet_finished_on_page {
			self.abgp
		} else {
			NO_PACKET_FINISHED
		};

		let mut header = PageHeader::new(
			header_type_flag,
			abgp,
			self.stream_serial,
			self.pages.len() as u32,
			core::mem::take(&mut self.segments),
		);
		header.start = self.pos;

		let page = Page::new(header, core::mem::take(&mut self.content))?;
		self.pos = page.end();
		self.pages.push(page);

		self.first_page = false;
		self.continued = packet_continues;
		self.packet_finished_on_page = false;

		Ok(())
	}
}

/// Create pages from a list of packets
///
/// Packets are laced back to back, so a page may hold the end of one packet and the start of
/// the next. Sequence numbers start at 0, and the checksums are left zeroed.
///
/// # Errors
///
/// This will only error if the pages could not be constructed, which should not happen
/// for any input.
///
/// # Example
///
/// ```rust
/// use ogg_pager::paginate;
///
/// # fn main() -> Result<(), ogg_pager::PageError> {
/// let comment_header_packet = vec![0; 300];
/// let setup_header_packet = vec![1; 20];
/// let stream_serial_number = 2784419176;
///
/// let pages = paginate(
/// 	[comment_header_packet.as_slice(), setup_header_packet.as_slice()],
/// 	stream_serial_number,
/// 	0,
/// 	0,
/// )?;
///
/// assert_eq!(pages.len(), 1);
/// assert_eq!(pages[0].header().segments(), &[255, 45, 20]);
/// # Ok(()) }
/// ```
pub fn paginate<'a, I>(packets: I, stream_serial: u32, abgp: u64, flags: u8) -> Result<Vec<Page>>
where
	I: IntoIterator<Item = &'a [u8]>,
{
	let mut ctx = PaginateContext::new(abgp, stream_serial, flags);

	for packet in packets {
		let mut remaining = packet;
		loop {
			let segment_len = remaining.len().min(255);
			let (segment, rest) = remaining.split_at(segment_len);
			ctx.push_segment(segment)?;
			remaining = rest;

			// A packet ends on the first lacing value below 255, which may be a zero
			if segment_len < 255 {
				break;
			}
		}
	}

	if !ctx.segments.is_empty() {
		ctx.flush_page(false)?;
	}

	if flags & CONTAINS_LAST_PAGE_OF_BITSTREAM != 0 {
		if let Some(last) = ctx.pages.last_mut() {
			last.header_mut().header_type_flag |= CONTAINS_LAST_PAGE_OF_BITSTREAM;
		}
	}

	Ok(ctx.pages)
}
