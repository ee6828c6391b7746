use super::OggFormat;
use super::tag::VorbisComments;
use crate::error::Result;
use crate::field::FieldValue;
use crate::macros::{decode_err, err};

use std::io::{ErrorKind as IoErrorKind, Read, Seek, SeekFrom, Write};

use byteorder::{LittleEndian, WriteBytesExt};
use data_encoding::BASE64;
use ogg_pager::{Packets, Page, PageError, paginate};

/// Creates a complete comment packet, including its signature
pub(crate) fn create_comment_packet(tag: &VorbisComments<'_>, format: OggFormat) -> Result<Vec<u8>> {
	let mut packet = Vec::new();

	let vendor = tag.vendor().as_bytes();
	packet.extend_from_slice(format.comment_signature());
	packet.write_u32::<LittleEndian>(length(vendor.len())?)?;
	packet.extend_from_slice(vendor);

	let comments = tag
		.container
		.fields()
		.map(|field| {
			let value = match field.value() {
				FieldValue::Text(text) => text.content.clone(),
				FieldValue::Binary(bytes) => BASE64.encode(bytes),
				FieldValue::NumericTuple(tuple) => tuple.to_string(),
			};

			format!("{}={value}", field.id())
		})
		.collect::<Vec<_>>();

	packet.write_u32::<LittleEndian>(length(comments.len())?)?;
	for comment in comments {
		packet.write_u32::<LittleEndian>(length(comment.len())?)?;
		packet.extend_from_slice(comment.as_bytes());
	}

	if format.has_framing_bit() {
		packet.push(1);
	}

	Ok(packet)
}

fn length(len: usize) -> Result<u32> {
	match u32::try_from(len) {
		Ok(len) => Ok(len),
		Err(_) => err!(TooMuchData),
	}
}

/// Copies the stream in `reader` to `writer`, replacing its comment packet
///
/// The identification page is copied as is. The comment and setup packets are paginated again, and
/// the pages of the stream that follow them are renumbered.
///
/// Nothing is written to `writer` unless the entire stream could be read.
pub(crate) fn write_to<R, W>(tag: &VorbisComments<'_>, reader: &mut R, writer: &mut W) -> Result<()>
where
	R: Read + Seek,
	W: Write,
{
	let start = reader.stream_position()?;
	let ident_page = Page::read(reader)?;

	let Some(format) = OggFormat::from_ident_packet(ident_page.content()) else {
		decode_err!(@BAIL VorbisComments, MissingSignature);
	};

	let stream_serial = ident_page.header().stream_serial;

	reader.seek(SeekFrom::Start(start))?;
	let packets = Packets::read_count(reader, format.header_packet_count())?;

	match packets.get(1) {
		Some(packet) if packet.starts_with(format.comment_signature()) => {},
		_ => decode_err!(@BAIL VorbisComments, MissingSignature),
	}

	let comment_packet = create_comment_packet(tag, format)?;

	let mut header_packets = vec![comment_packet.as_slice()];
	header_packets.extend(packets.iter().skip(2));

	// Header pages never complete an audio packet
	let header_pages = paginate(header_packets, stream_serial, 0, 0)?;

	let mut output = Vec::new();
	let mut sequence_number = ident_page.header().sequence_number;
	output.extend(ident_page.as_bytes());

	for mut page in header_pages {
		sequence_number += 1;
		page.header_mut().sequence_number = sequence_number;
		page.gen_crc();
		output.extend(page.as_bytes());
	}

	loop {
		let mut page = match Page::read(reader) {
			Ok(page) => page,
			Err(PageError::Io(e)) if e.kind() == IoErrorKind::UnexpectedEof => break,
			Err(e) => return Err(e.into()),
		};

		// Pages of other logical streams keep their numbering
		if page.header().stream_serial == stream_serial {
			sequence_number += 1;
			page.header_mut().sequence_number = sequence_number;
			page.gen_crc();
		}

		output.extend(page.as_bytes());
	}

	writer.write_all(&output)?;
	Ok(())
}
