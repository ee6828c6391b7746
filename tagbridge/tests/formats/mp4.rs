use crate::util::{atom, mp4_file, temp_file};
use tagbridge::config::{ParseOptions, WriteOptions};
use tagbridge::error::CannotReadKind;
use tagbridge::mp4::Mp4Tag;
use tagbridge::prelude::*;
use tagbridge::registry::{FieldKey, Registries};

const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\x0dIHDR";

#[test_log::test]
fn read_write() {
	let registries = Registries::new();

	let mut tag = Mp4Tag::new(&registries);
	tag.set_title(String::from("Foo title")).unwrap();
	tag.set_artist(String::from("Bar artist")).unwrap();
	tag.set_field(FieldKey::TrackNumber, "5/12").unwrap();
	tag.set_field(FieldKey::DiscNumber, "1").unwrap();
	tag.set_field(FieldKey::Compilation, "1").unwrap();
	tag.add_field(FieldKey::Barcode, "0123456789").unwrap();

	let cover = tag.create_binary_field(FieldKey::CoverArt, PNG.to_vec()).unwrap();
	tag.container_mut().add(cover);

	let mut file = temp_file(&mp4_file(&tag.dump_ilst().unwrap()));
	let read = Mp4Tag::read_from(&mut file, &registries, ParseOptions::new()).unwrap();

	assert_eq!(read.title().as_deref(), Some("Foo title"));
	assert_eq!(read.artist().as_deref(), Some("Bar artist"));
	assert_eq!(read.track(), Some(5));
	assert_eq!(read.track_total(), Some(12));
	assert_eq!(read.disk(), Some(1));
	assert_eq!(read.get_first(FieldKey::Compilation).unwrap().as_deref(), Some("1"));
	assert_eq!(
		read.get_first(FieldKey::Barcode).unwrap().as_deref(),
		Some("0123456789")
	);

	let covr = read.container().get_first("covr").unwrap();
	assert_eq!(covr.value().binary(), Some(PNG));
}

#[test_log::test]
fn genres_as_text() {
	let registries = Registries::new();

	let mut tag =
		Mp4Tag::with_write_options(&registries, WriteOptions::new().write_mp4_genres_as_text(true));
	tag.set_genre(String::from("Rock")).unwrap();

	let mut file = temp_file(&mp4_file(&tag.dump_ilst().unwrap()));
	let read = Mp4Tag::read_from(&mut file, &registries, ParseOptions::new()).unwrap();

	assert_eq!(read.genre().as_deref(), Some("Rock"));
	assert!(read.container().contains("\u{a9}gen"));
	assert!(!read.container().contains("gnre"));
}

#[test_log::test]
fn missing_file_type() {
	let registries = Registries::new();

	let mut file = temp_file(&atom(b"moov", &atom(b"udta", &[])));
	let err = Mp4Tag::read_from(&mut file, &registries, ParseOptions::new()).unwrap_err();
	assert_eq!(err.cannot_read_kind(), Some(CannotReadKind::MissingSignature));
}
