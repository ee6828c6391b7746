use crate::util::{
	ASF_FILE_PROPERTIES_OBJECT, asf_file, asf_object, audio, file_content, temp_file,
};
use tagbridge::asf::AsfTag;
use tagbridge::config::ParseOptions;
use tagbridge::prelude::*;
use tagbridge::registry::{FieldKey, Registries};

use std::io::Seek as _;

const CONTENT_DESCRIPTION_OBJECT: [u8; 16] = [
	0x33, 0x26, 0xB2, 0x75, 0x8E, 0x66, 0xCF, 0x11, 0xA6, 0xD9, 0x00, 0xAA, 0x00, 0x62, 0xCE, 0x6C,
];

fn count_objects(file: &[u8], guid: &[u8; 16]) -> usize {
	file.windows(16).filter(|window| window == guid).count()
}

#[test_log::test]
fn read_write() {
	let registries = Registries::new();

	let properties = asf_object(ASF_FILE_PROPERTIES_OBJECT, &[0x11; 80]);
	let mut file = temp_file(&asf_file(&[properties.clone()], &audio()));

	let mut tag = AsfTag::read_from(&mut file, &registries, ParseOptions::new()).unwrap();
	assert!(tag.container().is_empty());

	tag.set_title(String::from("Foo title")).unwrap();
	tag.set_artist(String::from("Bar artist")).unwrap();
	tag.add_field(FieldKey::Genre, "Rock").unwrap();
	tag.add_field(FieldKey::Genre, "Jazz").unwrap();
	tag.set_field(FieldKey::TrackNumber, "5").unwrap();
	tag.set_rating("5 stars").unwrap();

	let mut output = temp_file(&[]);
	file.rewind().unwrap();
	tag.rewrite_header(&mut file, &mut output, ParseOptions::new())
		.unwrap();

	let written = file_content(&mut output);
	assert!(written.ends_with(&audio()));
	assert!(written.windows(properties.len()).any(|window| window == &properties[..]));

	let read = AsfTag::read_from(&mut output, &registries, ParseOptions::new()).unwrap();
	assert_eq!(read.title().as_deref(), Some("Foo title"));
	assert_eq!(read.artist().as_deref(), Some("Bar artist"));
	assert_eq!(read.get_all(FieldKey::Genre).unwrap(), ["Rock", "Jazz"]);
	assert_eq!(read.track(), Some(5));
	assert_eq!(read.rating().as_deref(), Some("5 stars"));
}

#[test_log::test]
fn rewrite_replaces_existing_tag() {
	let registries = Registries::new();

	let mut first = AsfTag::new(&registries);
	first.set_title(String::from("Foo title")).unwrap();
	first.set_comment(String::from("Foo comment")).unwrap();

	let mut tagged = Vec::new();
	first
		.rewrite_header(
			&mut &asf_file(&[], &audio())[..],
			&mut tagged,
			ParseOptions::new(),
		)
		.unwrap();

	let mut second = AsfTag::read_from(&mut &tagged[..], &registries, ParseOptions::new()).unwrap();
	assert_eq!(second.comment().as_deref(), Some("Foo comment"));

	second.set_title(String::from("Bar title")).unwrap();
	second.remove_comment();

	let mut retagged = Vec::new();
	second
		.rewrite_header(&mut &tagged[..], &mut retagged, ParseOptions::new())
		.unwrap();
	assert_eq!(count_objects(&retagged, &CONTENT_DESCRIPTION_OBJECT), 1);

	let read = AsfTag::read_from(&mut &retagged[..], &registries, ParseOptions::new()).unwrap();
	assert_eq!(read.title().as_deref(), Some("Bar title"));
	assert_eq!(read.comment(), None);
	assert!(retagged.ends_with(&audio()));
}

#[test_log::test]
fn truncated_header_object() {
	let registries = Registries::new();

	let file = asf_file(&[asf_object(ASF_FILE_PROPERTIES_OBJECT, &[0; 80])], &[]);
	let err = AsfTag::read_from(&mut &file[..40], &registries, ParseOptions::new()).unwrap_err();
	assert!(err.cannot_read_kind().is_some());
}
