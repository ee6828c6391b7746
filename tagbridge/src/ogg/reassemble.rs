use super::OggFormat;
use crate::config::ParseOptions;
use crate::error::Result;
use crate::macros::decode_err;

use std::io::{ErrorKind as IoErrorKind, Read, Seek};

use ogg_pager::{Page, PageError, PageHeader};

/// The comment packet of a stream, reassembled from its pages
#[derive(Debug)]
pub(crate) struct CommentPacket {
	pub(crate) format: OggFormat,
	/// The packet, following its capture signature
	pub(crate) body: Vec<u8>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum State {
	ExpectHeaderPage,
	ReadCommentStart,
	ContinuePages,
	Done,
}

/// Reads pages until the comment packet is complete
///
/// `reader` is expected to be positioned at the first page of the stream.
pub(crate) fn reassemble_comment_packet<R>(
	reader: &mut R,
	parse_options: ParseOptions,
) -> Result<CommentPacket>
where
	R: Read + Seek,
{
	let mut state = State::ExpectHeaderPage;

	let mut format = OggFormat::Vorbis;
	let mut body = Vec::new();
	let mut continuation_pages = 0_u32;

	while state != State::Done {
		state = match state {
			State::ExpectHeaderPage => {
				// The identification header is of no use here
				header_page(reader)?;

				State::ReadCommentStart
			},
			State::ReadCommentStart => {
				let page = header_page(reader)?;
				let packet = first_packet(&page);

				let Some(detected) = OggFormat::from_comment_packet(packet) else {
					decode_err!(@BAIL VorbisComments, MissingSignature);
				};

				format = detected;
				append(
					&mut body,
					&packet[detected.comment_signature().len()..],
					parse_options,
				)?;

				next_state(page.header())
			},
			State::ContinuePages => {
				continuation_pages += 1;
				if continuation_pages > parse_options.max_comment_pages {
					log::warn!(
						"Comment packet spans more than {} pages",
						parse_options.max_comment_pages
					);
					decode_err!(@BAIL VorbisComments, PacketNeverTerminated);
				}

				let page = match Page::read(reader) {
					Ok(page) => page,
					Err(PageError::Io(e)) if e.kind() == IoErrorKind::UnexpectedEof => {
						decode_err!(@BAIL VorbisComments, PacketNeverTerminated)
					},
					Err(e) => return Err(e.into()),
				};

				append(&mut body, first_packet(&page), parse_options)?;
				next_state(page.header())
			},
			State::Done => State::Done,
		};
	}

	Ok(CommentPacket { format, body })
}

fn header_page<R>(reader: &mut R) -> Result<Page>
where
	R: Read + Seek,
{
	match Page::read(reader) {
		Ok(page) => Ok(page),
		Err(PageError::Io(e)) if e.kind() == IoErrorKind::UnexpectedEof => {
			Err(decode_err!(VorbisComments, Truncated))
		},
		Err(PageError::MissingMagic) => Err(decode_err!(VorbisComments, MissingSignature)),
		Err(e) => Err(e.into()),
	}
}

// The bytes of the first packet (or packet fragment) on a page
fn first_packet(page: &Page) -> &[u8] {
	let length = page
		.header()
		.packet_lengths()
		.first()
		.copied()
		.unwrap_or(0);

	&page.content()[..length as usize]
}

// The packet is complete once another packet follows it, or the page doesn't hand it over to the
// next one
fn next_state(header: &PageHeader) -> State {
	if header.packet_lengths().len() > 1 || !header.last_packet_incomplete() {
		return State::Done;
	}

	State::ContinuePages
}

fn append(body: &mut Vec<u8>, bytes: &[u8], parse_options: ParseOptions) -> Result<()> {
	if body.len() + bytes.len() > parse_options.max_comment_size {
		log::warn!(
			"Comment packet exceeds {} bytes",
			parse_options.max_comment_size
		);
		decode_err!(@BAIL VorbisComments, PacketNeverTerminated);
	}

	body.try_reserve(bytes.len())?;
	body.extend_from_slice(bytes);
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::CannotReadKind;

	use std::io::Cursor;

	use ogg_pager::{CONTAINS_FIRST_PAGE_OF_BITSTREAM, paginate};

	const SERIAL: u32 = 0x1234_5678;

	fn stream(packets: &[&[u8]]) -> Vec<u8> {
		let mut bytes = Vec::new();
		let (ident, rest) = packets.split_first().unwrap();

		let mut sequence = 0;
		let ident_pages = paginate([*ident], SERIAL, 0, CONTAINS_FIRST_PAGE_OF_BITSTREAM).unwrap();
		let header_pages = paginate(rest.iter().copied(), SERIAL, 0, 0).unwrap();
		for mut page in ident_pages.into_iter().chain(header_pages) {
			page.header_mut().sequence_number = sequence;
			page.gen_crc();
			bytes.extend(page.as_bytes());
			sequence += 1;
		}

		bytes
	}

	fn comment_packet(body: &[u8]) -> Vec<u8> {
		let mut packet = b"\x03vorbis".to_vec();
		packet.extend_from_slice(body);
		packet
	}

	#[test_log::test]
	fn single_page() {
		let comment = comment_packet(b"body\x01");
		let bytes = stream(&[b"\x01vorbis", &comment, b"\x05vorbis setup"]);

		let packet =
			reassemble_comment_packet(&mut Cursor::new(bytes), ParseOptions::new()).unwrap();
		assert_eq!(packet.format, OggFormat::Vorbis);
		assert_eq!(packet.body, b"body\x01");
	}

	#[test_log::test]
	fn packet_spanning_two_pages() {
		let body = (0..70_000_u32).map(|i| (i % 251) as u8).collect::<Vec<_>>();
		let comment = comment_packet(&body);
		let bytes = stream(&[b"\x01vorbis", &comment, b"\x05vorbis setup"]);

		let packet =
			reassemble_comment_packet(&mut Cursor::new(bytes), ParseOptions::new()).unwrap();
		assert_eq!(packet.body, body);
	}

	#[test_log::test]
	fn opus_signature() {
		let bytes = stream(&[b"OpusHead", b"OpusTagsbody"]);

		let packet =
			reassemble_comment_packet(&mut Cursor::new(bytes), ParseOptions::new()).unwrap();
		assert_eq!(packet.format, OggFormat::Opus);
		assert_eq!(packet.body, b"body");
	}

	#[test_log::test]
	fn corrupted_signature() {
		let bytes = stream(&[b"\x01vorbis", b"\x03vorbiz body", b"\x05vorbis setup"]);

		let err =
			reassemble_comment_packet(&mut Cursor::new(bytes), ParseOptions::new()).unwrap_err();
		assert_eq!(err.cannot_read_kind(), Some(CannotReadKind::MissingSignature));
	}

	#[test_log::test]
	fn missing_comment_page() {
		let bytes = stream(&[b"\x01vorbis"]);

		let err =
			reassemble_comment_packet(&mut Cursor::new(bytes), ParseOptions::new()).unwrap_err();
		assert_eq!(err.cannot_read_kind(), Some(CannotReadKind::Truncated));
	}

	#[test_log::test]
	fn stream_ends_mid_packet() {
		let comment = comment_packet(&[0; 70_000]);
		let mut bytes = stream(&[b"\x01vorbis", &comment]);

		// Drop the final page
		let pages = {
			let mut reader = Cursor::new(&bytes);
			let mut ends = Vec::new();
			while let Ok(page) = Page::read(&mut reader) {
				ends.push(page.end());
			}
			ends
		};
		bytes.truncate(pages[1] as usize);

		let err =
			reassemble_comment_packet(&mut Cursor::new(bytes), ParseOptions::new()).unwrap_err();
		assert_eq!(
			err.cannot_read_kind(),
			Some(CannotReadKind::PacketNeverTerminated)
		);
	}

	#[test_log::test]
	fn bounded_by_page_count() {
		let comment = comment_packet(&[0; 70_000]);
		let bytes = stream(&[b"\x01vorbis", &comment, b"\x05vorbis setup"]);

		let err = reassemble_comment_packet(
			&mut Cursor::new(bytes),
			ParseOptions::new().max_comment_pages(0),
		)
		.unwrap_err();
		assert_eq!(
			err.cannot_read_kind(),
			Some(CannotReadKind::PacketNeverTerminated)
		);
	}

	#[test_log::test]
	fn bounded_by_size() {
		let comment = comment_packet(&[0; 1000]);
		let bytes = stream(&[b"\x01vorbis", &comment, b"\x05vorbis setup"]);

		let err = reassemble_comment_packet(
			&mut Cursor::new(bytes),
			ParseOptions::new().max_comment_size(999),
		)
		.unwrap_err();
		assert_eq!(
			err.cannot_read_kind(),
			Some(CannotReadKind::PacketNeverTerminated)
		);
	}
}
