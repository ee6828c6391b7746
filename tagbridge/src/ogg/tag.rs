use super::OggFormat;
use super::read::read_from;
use super::write::{create_comment_packet, write_to};
use crate::config::ParseOptions;
use crate::error::Result;
use crate::field::{Field, FieldId, FieldValue, TextValue};
use crate::registry::{Registries, is_valid_id};
use crate::tag::{Accessor, FormatAdapter, TagContainer, TagFormat};
use crate::util::text::TextEncoding;

use std::borrow::Cow;
use std::io::{Read, Seek, Write};

/// Vorbis comments
///
/// Keys are printable ASCII, compared without regard to case. All values are UTF-8, with the
/// exception of `METADATA_BLOCK_PICTURE`, which holds a FLAC picture block stored as base64.
///
/// The same comments are used by Vorbis and Opus, which only differ in the signature and framing
/// of the packet.
#[derive(Debug, Clone)]
pub struct VorbisComments<'r> {
	registries: &'r Registries,
	vendor: String,
	pub(crate) container: TagContainer<'r, Field>,
}

impl<'r> VorbisComments<'r> {
	/// Create an empty tag, with an empty vendor string
	pub fn new(registries: &'r Registries) -> Self {
		Self {
			registries,
			vendor: String::new(),
			container: TagContainer::new(registries.get(TagFormat::VorbisComments)),
		}
	}

	/// The vendor string, usually identifying the encoder
	pub fn vendor(&self) -> &str {
		&self.vendor
	}

	/// Sets the vendor string
	pub fn set_vendor(&mut self, vendor: impl Into<String>) {
		self.vendor = vendor.into();
	}

	/// Read the comments of an OGG Vorbis or Opus stream
	///
	/// `reader` is expected to be positioned at the first page of the stream.
	///
	/// # Errors
	///
	/// * [`ErrorKind::CannotRead`](crate::error::ErrorKind::CannotRead):
	///   * The comment packet has neither the Vorbis nor the Opus signature
	///   * The stream ends before the comment packet does
	///   * The comment packet spans more pages or bytes than `parse_options` allow
	/// * Any malformed comment, with [`ParsingMode::Strict`](crate::config::ParsingMode::Strict)
	pub fn read_from<R>(
		reader: &mut R,
		registries: &'r Registries,
		parse_options: ParseOptions,
	) -> Result<Self>
	where
		R: Read + Seek,
	{
		read_from(reader, registries, parse_options)
	}

	/// Copy the OGG stream in `reader` to `writer`, replacing its comments with this tag
	///
	/// # Errors
	///
	/// * The stream isn't a Vorbis or Opus stream
	/// * The header packets are incomplete
	/// * [`std::io::Error`]
	pub fn write_to<R, W>(&self, reader: &mut R, writer: &mut W) -> Result<()>
	where
		R: Read + Seek,
		W: Write,
	{
		write_to(self, reader, writer)
	}

	/// The complete Vorbis comment header packet for this tag, including the framing bit
	///
	/// # Errors
	///
	/// The tag is too large to be described by its 32-bit lengths
	pub fn to_vorbis_packet(&self) -> Result<Vec<u8>> {
		create_comment_packet(self, OggFormat::Vorbis)
	}

	/// The complete Opus comment header packet for this tag
	///
	/// # Errors
	///
	/// The tag is too large to be described by its 32-bit lengths
	pub fn to_opus_packet(&self) -> Result<Vec<u8>> {
		create_comment_packet(self, OggFormat::Opus)
	}
}

impl<'r> FormatAdapter<'r> for VorbisComments<'r> {
	fn format(&self) -> TagFormat {
		TagFormat::VorbisComments
	}

	fn registries(&self) -> &'r Registries {
		self.registries
	}

	fn container(&self) -> &TagContainer<'r, Field> {
		&self.container
	}

	fn container_mut(&mut self) -> &mut TagContainer<'r, Field> {
		&mut self.container
	}

	fn build_field(&self, id: FieldId, value: &str) -> Result<Field> {
		Ok(Field::new(
			TagFormat::VorbisComments,
			id,
			FieldValue::Text(TextValue::new(value, TextEncoding::UTF8)),
		))
	}

	fn custom_id(&self, name: &str) -> Option<FieldId> {
		is_valid_id(TagFormat::VorbisComments, name).then(|| Cow::Owned(name.to_ascii_uppercase()))
	}
}

impl<'r> Accessor<'r> for VorbisComments<'r> {}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::{CannotReadKind, ErrorKind};
	use crate::registry::FieldKey;

	use std::io::Cursor;

	use ogg_pager::{CONTAINS_FIRST_PAGE_OF_BITSTREAM, Page, paginate};

	const SERIAL: u32 = 42;

	fn pages(packets: &[&[u8]], flags: u8, abgp: u64) -> Vec<Page> {
		paginate(packets.iter().copied(), SERIAL, abgp, flags).unwrap()
	}

	// An identification page, the given header packets, then a page of "audio"
	fn stream(format: OggFormat, header_packets: &[&[u8]]) -> Vec<u8> {
		let ident: &[u8] = match format {
			OggFormat::Vorbis => b"\x01vorbis ident",
			OggFormat::Opus => b"OpusHead ident",
		};

		let audio = [0xAB; 300];
		let stream_pages = pages(&[ident], CONTAINS_FIRST_PAGE_OF_BITSTREAM, 0)
			.into_iter()
			.chain(pages(header_packets, 0, 0))
			.chain(pages(&[&audio, &audio[..10]], 0, 4096));

		let mut bytes = Vec::new();
		for (sequence_number, mut page) in stream_pages.enumerate() {
			page.header_mut().sequence_number = sequence_number as u32;
			page.gen_crc();
			bytes.extend(page.as_bytes());
		}

		bytes
	}

	fn all_pages(bytes: &[u8]) -> Vec<Page> {
		let mut reader = Cursor::new(bytes);
		let mut pages = Vec::new();
		while let Ok(page) = Page::read(&mut reader) {
			pages.push(page);
		}
		pages
	}

	fn sample_tag(registries: &Registries) -> VorbisComments<'_> {
		let mut tag = VorbisComments::new(registries);
		tag.set_vendor("tagbridge");
		tag.add_field(FieldKey::Title, "Foo title").unwrap();
		tag.add_field(FieldKey::Artist, "Bar artist").unwrap();
		tag.add_field(FieldKey::Artist, "Baz artist").unwrap();
		tag.set_field(FieldKey::TrackNumber, "5").unwrap();
		tag
	}

	#[test_log::test]
	fn vorbis_round_trip() {
		let registries = Registries::new();
		let tag = sample_tag(&registries);

		let original = stream(
			OggFormat::Vorbis,
			&[b"\x03vorbis\x00\x00\x00\x00\x00\x00\x00\x00\x01", b"\x05vorbis setup"],
		);

		let mut written = Vec::new();
		tag.write_to(&mut Cursor::new(&original), &mut written).unwrap();

		let read =
			VorbisComments::read_from(&mut Cursor::new(&written), &registries, ParseOptions::new())
				.unwrap();
		assert_eq!(read.vendor(), "tagbridge");
		assert!(read.container.fields().eq(tag.container.fields()));

		// The setup header and the audio pages survive
		let pages = all_pages(&written);
		assert_eq!(pages.len(), 3);
		assert!(pages[1].content().ends_with(b"\x01\x05vorbis setup"));
		assert_eq!(pages[2].header().abgp, 4096);
		for (sequence_number, page) in pages.iter().enumerate() {
			assert_eq!(page.header().sequence_number, sequence_number as u32);
		}
	}

	#[test_log::test]
	fn large_comments_are_repaginated() {
		let registries = Registries::new();
		let mut tag = sample_tag(&registries);
		tag.set_field(FieldKey::Lyrics, &"la".repeat(50_000)).unwrap();

		let original = stream(
			OggFormat::Vorbis,
			&[b"\x03vorbis\x00\x00\x00\x00\x00\x00\x00\x00\x01", b"\x05vorbis setup"],
		);

		let mut written = Vec::new();
		tag.write_to(&mut Cursor::new(&original), &mut written).unwrap();

		let pages = all_pages(&written);
		assert_eq!(pages.len(), 4);
		for (sequence_number, page) in pages.iter().enumerate() {
			assert_eq!(page.header().sequence_number, sequence_number as u32);
		}

		let read =
			VorbisComments::read_from(&mut Cursor::new(&written), &registries, ParseOptions::new())
				.unwrap();
		assert_eq!(
			read.get_first(FieldKey::Lyrics).unwrap().map(|lyrics| lyrics.len()),
			Some(100_000)
		);
	}

	#[test_log::test]
	fn opus_has_no_framing_bit() {
		let registries = Registries::new();
		let tag = sample_tag(&registries);

		let packet = tag.to_opus_packet().unwrap();
		assert!(packet.starts_with(b"OpusTags"));
		assert!(packet.ends_with(b"TRACKNUMBER=5"));

		let packet = tag.to_vorbis_packet().unwrap();
		assert!(packet.starts_with(b"\x03vorbis"));
		assert!(packet.ends_with(b"TRACKNUMBER=5\x01"));

		let original = stream(OggFormat::Opus, &[b"OpusTags\x00\x00\x00\x00\x00\x00\x00\x00"]);
		let mut written = Vec::new();
		tag.write_to(&mut Cursor::new(&original), &mut written).unwrap();

		let read =
			VorbisComments::read_from(&mut Cursor::new(&written), &registries, ParseOptions::new())
				.unwrap();
		assert_eq!(read.title().as_deref(), Some("Foo title"));
		assert_eq!(read.track(), Some(5));
	}

	#[test_log::test]
	fn not_an_ogg_stream() {
		let registries = Registries::new();

		let err = VorbisComments::read_from(
			&mut Cursor::new(b"RIFF\x00\x00\x00\x00WAVE".to_vec()),
			&registries,
			ParseOptions::new(),
		)
		.unwrap_err();
		assert_eq!(err.cannot_read_kind(), Some(CannotReadKind::MissingSignature));

		let original = stream(OggFormat::Vorbis, &[b"\x03vorbiz", b"\x05vorbis setup"]);
		let err = VorbisComments::new(&registries)
			.write_to(&mut Cursor::new(&original), &mut Vec::new())
			.unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::CannotRead(_)));
	}

	#[test_log::test]
	fn corrupt_audio_page_writes_nothing() {
		let registries = Registries::new();
		let tag = sample_tag(&registries);

		let mut original = stream(
			OggFormat::Vorbis,
			&[b"\x03vorbis\x00\x00\x00\x00\x00\x00\x00\x00\x01", b"\x05vorbis setup"],
		);

		// Break the capture pattern of the audio page
		let audio_start = all_pages(&original)[1].end() as usize;
		original[audio_start] = b'X';

		let mut written = Vec::new();
		assert!(tag.write_to(&mut Cursor::new(&original), &mut written).is_err());
		assert!(written.is_empty());
	}

	#[test_log::test]
	fn custom_keys_are_upper_case() {
		let registries = Registries::new();
		let tag = VorbisComments::new(&registries);

		assert_eq!(tag.custom_id("my key").as_deref(), Some("MY KEY"));
		assert_eq!(tag.custom_id("a=b"), None);
	}
}
