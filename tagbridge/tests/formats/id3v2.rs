use crate::util::{audio, file_content, temp_file};
use tagbridge::config::{ParseOptions, WriteOptions};
use tagbridge::field::{Field, FieldValue, TagField, TextValue};
use tagbridge::id3::v2::{Id3v2Tag, Id3v2Version};
use tagbridge::prelude::*;
use tagbridge::registry::{FieldKey, Registries};
use tagbridge::tag::TagFormat;
use tagbridge::TextEncoding;

use std::io::{Seek as _, SeekFrom, Write as _};

// Writes `tag` in front of some audio, then reads it back from the file
fn write_and_read<'r>(tag: &Id3v2Tag<'_>, registries: &'r Registries) -> Id3v2Tag<'r> {
	let mut file = temp_file(&[]);
	tag.dump_to(&mut file, WriteOptions::new()).unwrap();
	file.write_all(&audio()).unwrap();

	let content = file_content(&mut file);
	assert!(content.ends_with(&audio()));

	Id3v2Tag::read_from(&mut file, registries, ParseOptions::new()).unwrap()
}

#[test_log::test]
fn v24_read_write() {
	let registries = Registries::new();
	let mut tag = Id3v2Tag::new(&registries, Id3v2Version::V4);

	tag.set_title(String::from("Foo title")).unwrap();
	tag.add_field(FieldKey::Artist, "Foo artist").unwrap();
	tag.add_field(FieldKey::Artist, "Bar artist").unwrap();
	tag.set_field(FieldKey::TrackNumber, "5/12").unwrap();
	tag.set_field(FieldKey::Comment, "Qux comment").unwrap();

	let read = write_and_read(&tag, &registries);
	assert_eq!(read.version(), Id3v2Version::V4);
	assert_eq!(read.title().as_deref(), Some("Foo title"));
	assert_eq!(
		read.get_all(FieldKey::Artist).unwrap(),
		["Foo artist", "Bar artist"]
	);
	assert_eq!(read.get_first(FieldKey::TrackNumber).unwrap().as_deref(), Some("5"));
	assert_eq!(read.get_first(FieldKey::TrackTotal).unwrap().as_deref(), Some("12"));
	assert_eq!(read.comment().as_deref(), Some("Qux comment"));
}

#[test_log::test]
fn v23_read_write() {
	let registries = Registries::new();
	let mut tag = Id3v2Tag::new(&registries, Id3v2Version::V3);

	tag.set_artist(String::from("Foo artist")).unwrap();
	tag.set_year(2004).unwrap();
	tag.set_genre(String::from("Rock")).unwrap();
	tag.set_field(FieldKey::Mood, "Calm").unwrap();

	let read = write_and_read(&tag, &registries);
	assert_eq!(read.version(), Id3v2Version::V3);
	assert_eq!(read.artist().as_deref(), Some("Foo artist"));
	assert_eq!(read.year(), Some(2004));
	assert_eq!(read.genre().as_deref(), Some("Rock"));
	assert_eq!(read.get_first(FieldKey::Mood).unwrap().as_deref(), Some("Calm"));
	assert!(read.container().contains("TXXX:MOOD"));
}

#[test_log::test]
fn v23_sort_frames() {
	let registries = Registries::new();
	let mut tag = Id3v2Tag::new(&registries, Id3v2Version::V3);

	tag.set_field(FieldKey::AlbumSort, "Album, The").unwrap();
	tag.set_field(FieldKey::ArtistSort, "Artist, The").unwrap();
	tag.set_field(FieldKey::TitleSort, "Title, The").unwrap();

	let read = write_and_read(&tag, &registries);
	assert_eq!(read.get_all(FieldKey::AlbumSort).unwrap(), ["Album, The"]);
	assert_eq!(read.get_all(FieldKey::ArtistSort).unwrap(), ["Artist, The"]);
	assert_eq!(read.get_all(FieldKey::TitleSort).unwrap(), ["Title, The"]);

	let xsoa = read.container().get_first("XSOA").unwrap();
	assert_eq!(xsoa.value().text(), Some("Album, The"));
}

#[test_log::test]
fn set_replaces_added_values() {
	let registries = Registries::new();
	let mut tag = Id3v2Tag::new(&registries, Id3v2Version::V4);

	tag.add_field(FieldKey::Artist, "Foo artist").unwrap();
	tag.add_field(FieldKey::Artist, "Bar artist").unwrap();
	tag.set_field(FieldKey::Artist, "Baz artist").unwrap();

	let read = write_and_read(&tag, &registries);
	assert_eq!(read.get_all(FieldKey::Artist).unwrap(), ["Baz artist"]);
}

#[test_log::test]
fn involved_people_upgrade() {
	let registries = Registries::new();
	let mut tag = Id3v2Tag::new(&registries, Id3v2Version::V3);

	tag.container_mut().add(Field::new(
		TagFormat::Id3v23,
		"IPLS",
		FieldValue::Text(TextValue::new("producer\0Foo", TextEncoding::UTF16)),
	));

	let mut read = write_and_read(&tag, &registries);
	assert_eq!(
		read.container().get_first("IPLS").unwrap().encoding(),
		Some(TextEncoding::UTF16)
	);

	read.convert_version(Id3v2Version::V4);

	let tipl = read.container().get_first("TIPL").unwrap();
	assert_eq!(tipl.encoding(), Some(TextEncoding::Latin1));
	assert_eq!(tipl.value().text(), Some("producer\0Foo"));
	assert!(!read.container().contains("IPLS"));
}

#[test_log::test]
fn missing_header() {
	let registries = Registries::new();

	let mut file = temp_file(&audio());
	file.seek(SeekFrom::Start(0)).unwrap();

	let err = Id3v2Tag::read_from(&mut file, &registries, ParseOptions::new()).unwrap_err();
	assert!(err.cannot_read_kind().is_some());
}
