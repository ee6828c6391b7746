use std::fs::File;
use std::io::{Seek as _, Write as _};

use ogg_pager::{CONTAINS_FIRST_PAGE_OF_BITSTREAM, Page, paginate};

pub const VORBIS_IDENT: &[u8] = b"\x01vorbis\x00\x00\x00\x00\x02\x44\xac\x00\x00";
pub const VORBIS_SETUP: &[u8] = b"\x05vorbis setup";
pub const OPUS_IDENT: &[u8] = b"OpusHead\x01\x02\x38\x01\x80\xbb\x00\x00";

const SERIAL: u32 = 1234;

/// Create a new temporary file holding `content`
pub fn temp_file(content: &[u8]) -> File {
	let mut file = tempfile::tempfile().unwrap();
	file.write_all(content).unwrap();
	file.rewind().unwrap();

	file
}

/// Read everything from the start of `file`
pub fn file_content(file: &mut File) -> Vec<u8> {
	use std::io::Read as _;

	let mut content = Vec::new();
	file.rewind().unwrap();
	file.read_to_end(&mut content).unwrap();
	file.rewind().unwrap();

	content
}

pub fn audio() -> Vec<u8> {
	(0..=255_u8).cycle().take(1000).collect()
}

/// An OGG stream: the identification page, the remaining header packets, then a page of audio
pub fn ogg_stream(ident: &[u8], header_packets: &[&[u8]]) -> Vec<u8> {
	let audio = audio();

	let pages = paginate([ident], SERIAL, 0, CONTAINS_FIRST_PAGE_OF_BITSTREAM)
		.unwrap()
		.into_iter()
		.chain(paginate(header_packets.iter().copied(), SERIAL, 0, 0).unwrap())
		.chain(paginate([audio.as_slice()], SERIAL, 960, 0).unwrap());

	let mut bytes = Vec::new();
	for (sequence_number, mut page) in pages.enumerate() {
		page.header_mut().sequence_number = sequence_number as u32;
		page.gen_crc();
		bytes.extend(page.as_bytes());
	}

	bytes
}

/// A Vorbis comment header packet, with the framing bit
pub fn vorbis_comment_packet(vendor: &str, comments: &[&str]) -> Vec<u8> {
	let mut packet = b"\x03vorbis".to_vec();
	packet.extend((vendor.len() as u32).to_le_bytes());
	packet.extend(vendor.as_bytes());
	packet.extend((comments.len() as u32).to_le_bytes());
	for comment in comments {
		packet.extend((comment.len() as u32).to_le_bytes());
		packet.extend(comment.as_bytes());
	}
	packet.push(1);

	packet
}

pub fn ogg_pages(stream: &[u8]) -> Vec<Page> {
	let mut reader = std::io::Cursor::new(stream);
	let mut pages = Vec::new();
	while let Ok(page) = Page::read(&mut reader) {
		pages.push(page);
	}

	pages
}

pub const ASF_HEADER_OBJECT: [u8; 16] = [
	0x30, 0x26, 0xB2, 0x75, 0x8E, 0x66, 0xCF, 0x11, 0xA6, 0xD9, 0x00, 0xAA, 0x00, 0x62, 0xCE, 0x6C,
];

// Stands in for the file properties object, which is kept as is
pub const ASF_FILE_PROPERTIES_OBJECT: [u8; 16] = [
	0xA1, 0xDC, 0xAB, 0x8C, 0x47, 0xA9, 0xCF, 0x11, 0x8E, 0xE4, 0x00, 0xC0, 0x0C, 0x20, 0x53, 0x65,
];

pub fn asf_object(guid: [u8; 16], content: &[u8]) -> Vec<u8> {
	let mut object = guid.to_vec();
	object.extend(((content.len() + 24) as u64).to_le_bytes());
	object.extend_from_slice(content);
	object
}

/// A header object holding `objects`, followed by `trailing`
pub fn asf_file(objects: &[Vec<u8>], trailing: &[u8]) -> Vec<u8> {
	let children = objects.concat();

	let mut file = ASF_HEADER_OBJECT.to_vec();
	file.extend(((children.len() + 30) as u64).to_le_bytes());
	file.extend((objects.len() as u32).to_le_bytes());
	file.extend([0x01, 0x02]);
	file.extend(children);
	file.extend_from_slice(trailing);
	file
}

pub fn atom(fourcc: &[u8; 4], content: &[u8]) -> Vec<u8> {
	let mut atom = ((content.len() + 8) as u32).to_be_bytes().to_vec();
	atom.extend(fourcc);
	atom.extend_from_slice(content);
	atom
}

/// An MP4 file with `ilst` in `moov.udta.meta`
pub fn mp4_file(ilst: &[u8]) -> Vec<u8> {
	let mut meta = vec![0; 4];
	meta.extend(atom(b"hdlr", &[0; 25]));
	meta.extend_from_slice(ilst);

	let moov = atom(
		b"moov",
		&[atom(b"mvhd", &[0; 100]), atom(b"udta", &atom(b"meta", &meta))].concat(),
	);

	[atom(b"ftyp", b"M4A \x00\x00\x02\x00isom"), moov, atom(b"mdat", &audio())].concat()
}
