use crate::util::{
	OPUS_IDENT, VORBIS_IDENT, VORBIS_SETUP, audio, file_content, ogg_pages, ogg_stream, temp_file,
	vorbis_comment_packet,
};
use tagbridge::config::ParseOptions;
use tagbridge::error::CannotReadKind;
use tagbridge::ogg::VorbisComments;
use tagbridge::prelude::*;
use tagbridge::registry::{FieldKey, Registries};

use std::io::{Cursor, Seek as _};

#[test_log::test]
fn vorbis_read_write() {
	let registries = Registries::new();

	let packet = vorbis_comment_packet("Foo encoder", &["TITLE=Foo title", "ARTIST=Bar artist"]);
	let mut file = temp_file(&ogg_stream(VORBIS_IDENT, &[&packet, VORBIS_SETUP]));

	let mut tag = VorbisComments::read_from(&mut file, &registries, ParseOptions::new()).unwrap();
	assert_eq!(tag.vendor(), "Foo encoder");
	assert_eq!(tag.title().as_deref(), Some("Foo title"));

	tag.add_field(FieldKey::Artist, "Baz artist").unwrap();
	tag.set_field(FieldKey::Genre, "Jazz").unwrap();

	let mut output = temp_file(&[]);
	file.rewind().unwrap();
	tag.write_to(&mut file, &mut output).unwrap();

	let written = file_content(&mut output);
	let pages = ogg_pages(&written);
	assert_eq!(pages[0].content(), VORBIS_IDENT);
	assert_eq!(pages.last().unwrap().content(), audio());

	let read = VorbisComments::read_from(&mut output, &registries, ParseOptions::new()).unwrap();
	assert_eq!(read.vendor(), "Foo encoder");
	assert_eq!(
		read.get_all(FieldKey::Artist).unwrap(),
		["Bar artist", "Baz artist"]
	);
	assert_eq!(read.genre().as_deref(), Some("Jazz"));
}

#[test_log::test]
fn opus_read_write() {
	let registries = Registries::new();

	let mut tag = VorbisComments::new(&registries);
	tag.set_vendor("Foo encoder");
	tag.set_title(String::from("Foo title")).unwrap();
	tag.set_track(3).unwrap();

	let original = ogg_stream(OPUS_IDENT, &[b"OpusTags\x00\x00\x00\x00\x00\x00\x00\x00"]);
	let mut written = Vec::new();
	tag.write_to(&mut Cursor::new(original), &mut written).unwrap();

	let pages = ogg_pages(&written);
	assert!(pages[1].content().starts_with(b"OpusTags"));
	for (sequence_number, page) in pages.iter().enumerate() {
		assert_eq!(page.header().sequence_number, sequence_number as u32);
	}

	let read =
		VorbisComments::read_from(&mut Cursor::new(written), &registries, ParseOptions::new())
			.unwrap();
	assert_eq!(read.title().as_deref(), Some("Foo title"));
	assert_eq!(read.track(), Some(3));
}

#[test_log::test]
fn comment_packet_spanning_pages() {
	let registries = Registries::new();

	let lyrics = format!("LYRICS={}", "la".repeat(40_000));
	let packet = vorbis_comment_packet("Foo encoder", &["TITLE=Foo title", &lyrics]);
	let stream = ogg_stream(VORBIS_IDENT, &[&packet, VORBIS_SETUP]);
	assert!(ogg_pages(&stream).len() > 3);

	let tag =
		VorbisComments::read_from(&mut Cursor::new(stream), &registries, ParseOptions::new())
			.unwrap();

	assert_eq!(tag.to_vorbis_packet().unwrap(), packet);
}

#[test_log::test]
fn unterminated_comment_packet() {
	let registries = Registries::new();

	let lyrics = format!("LYRICS={}", "la".repeat(40_000));
	let packet = vorbis_comment_packet("Foo encoder", &[&lyrics]);
	let stream = ogg_stream(VORBIS_IDENT, &[&packet, VORBIS_SETUP]);

	// The identification page, and only the first page of the comment packet
	let pages = ogg_pages(&stream);
	let truncated = [pages[0].as_bytes(), pages[1].as_bytes()].concat();

	let err = VorbisComments::read_from(
		&mut Cursor::new(truncated),
		&registries,
		ParseOptions::new(),
	)
	.unwrap_err();
	assert_eq!(err.cannot_read_kind(), Some(CannotReadKind::PacketNeverTerminated));

	let err = VorbisComments::read_from(
		&mut Cursor::new(stream),
		&registries,
		ParseOptions::new().max_comment_size(1024),
	)
	.unwrap_err();
	assert_eq!(err.cannot_read_kind(), Some(CannotReadKind::PacketNeverTerminated));
}

#[test_log::test]
fn corrupted_comment_signature() {
	let registries = Registries::new();

	let mut packet = vorbis_comment_packet("Foo encoder", &["TITLE=Foo title"]);
	packet[6] = b'z';

	let stream = ogg_stream(VORBIS_IDENT, &[&packet, VORBIS_SETUP]);
	let err =
		VorbisComments::read_from(&mut Cursor::new(stream), &registries, ParseOptions::new())
			.unwrap_err();
	assert_eq!(err.cannot_read_kind(), Some(CannotReadKind::MissingSignature));
}
