use crate::error::{PageError, Result};
use crate::header::PageHeader;
use crate::paginate::paginate;
use crate::Page;

use std::fmt::{Debug, Formatter};
use std::io::{ErrorKind, Read, Seek};

/// A container for packets in an OGG file
#[derive(Clone, PartialEq, Eq)]
pub struct Packets {
	content: Vec<u8>,
	packet_sizes: Vec<u64>,
}

impl Packets {
	/// Read a specific number of complete packets from a reader
	///
	/// Whole pages are consumed, so the reader will be positioned at the start of the page
	/// following the one the last packet ended on. Any packets after the last requested one on
	/// that page are discarded.
	///
	/// # Errors
	///
	/// * The stream ends before `count` packets are complete ([`PageError::NotEnoughData`])
	/// * A page is malformed
	///
	/// # Examples
	///
	/// ```rust
	/// use ogg_pager::{Packets, paginate};
	/// use std::io::Cursor;
	///
	/// # fn main() -> Result<(), ogg_pager::PageError> {
	/// let first = vec![1; 400];
	/// let second = vec![2; 10];
	///
	/// let mut stream = Vec::new();
	/// for mut page in paginate([first.as_slice(), second.as_slice()], 1, 0, 0)? {
	/// 	page.gen_crc();
	/// 	stream.extend(page.as_bytes());
	/// }
	///
	/// let packets = Packets::read_count(&mut Cursor::new(stream), 2)?;
	/// assert_eq!(packets.get(1), Some(second.as_slice()));
	/// # Ok(()) }
	/// ```
	pub fn read_count<R>(data: &mut R, count: usize) -> Result<Self>
	where
		R: Read + Seek,
	{
		let mut content = Vec::new();
		let mut packet_sizes = Vec::with_capacity(count);

		let mut current_packet_size = 0_u64;
		'pages: while packet_sizes.len() < count {
			let header = match PageHeader::read(data) {
				Ok(header) => header,
				Err(PageError::Io(e)) if e.kind() == ErrorKind::UnexpectedEof => {
					return Err(PageError::NotEnoughData);
				},
				Err(e) => return Err(e),
			};

			let mut page_content = vec![0; header.content_size()];
			data.read_exact(&mut page_content)?;

			let mut pos = 0;
			for &segment in header.segments() {
				let segment = usize::from(segment);
				content.extend_from_slice(&page_content[pos..pos + segment]);
				pos += segment;

				current_packet_size += segment as u64;
				if segment < 255 {
					packet_sizes.push(current_packet_size);
					current_packet_size = 0;

					if packet_sizes.len() == count {
						break 'pages;
					}
				}
			}
		}

		Ok(Self {
			content,
			packet_sizes,
		})
	}

	/// Returns the number of packets
	pub fn len(&self) -> usize {
		self.packet_sizes.len()
	}

	/// Returns true if there are no packets
	pub fn is_empty(&self) -> bool {
		self.packet_sizes.is_empty()
	}

	/// Gets the packet at a specified index, returning its contents
	///
	/// This is zero-indexed, an out of bounds index returns [`None`].
	pub fn get(&self, idx: usize) -> Option<&[u8]> {
		self.iter().nth(idx)
	}

	/// Replaces the content of the packet at `idx`, returning `false` if it does not exist
	pub fn set(&mut self, idx: usize, content: impl Into<Vec<u8>>) -> bool {
		let Some(&packet_size) = self.packet_sizes.get(idx) else {
			return false;
		};

		let start_pos = self.packet_sizes[..idx].iter().sum::<u64>() as usize;
		let end_pos = start_pos + packet_size as usize;

		let content = content.into();
		self.packet_sizes[idx] = content.len() as u64;
		self.content.splice(start_pos..end_pos, content);

		true
	}

	/// Returns an iterator over the packets
	pub fn iter(&self) -> PacketsIter<'_> {
		<&Self as IntoIterator>::into_iter(self)
	}

	/// Convert the packets into a stream of pages
	///
	/// See [`paginate()`] for more information.
	///
	/// # Errors
	///
	/// See [`paginate()`]
	pub fn paginate(&self, stream_serial: u32, abgp: u64, flags: u8) -> Result<Vec<Page>> {
		paginate(self.iter(), stream_serial, abgp, flags)
	}
}

/// An iterator over packets
///
/// This is created by calling `into_iter` on [`Packets`]
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PacketsIter<'a> {
	content: &'a [u8],
	packet_sizes: &'a [u64],
}

impl<'a> Iterator for PacketsIter<'a> {
	type Item = &'a [u8];

	fn next(&mut self) -> Option<Self::Item> {
		let (&packet_size, remaining_sizes) = self.packet_sizes.split_first()?;
		self.packet_sizes = remaining_sizes;

		let (ret, remaining) = self.content.split_at(packet_size as usize);
		self.content = remaining;

		Some(ret)
	}
}

impl<'a> IntoIterator for &'a Packets {
	type Item = &'a [u8];
	type IntoIter = PacketsIter<'a>;

	fn into_iter(self) -> Self::IntoIter {
		PacketsIter {
			content: &self.content,
			packet_sizes: &self.packet_sizes,
		}
	}
}

impl Debug for Packets {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Packets")
			.field("total_bytes", &self.content.len())
			.field("count", &self.packet_sizes.len())
			.finish()
	}
}
