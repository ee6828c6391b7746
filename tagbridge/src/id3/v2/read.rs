use super::Id3v2Version;
use super::frame::decode_frame;
use super::header::Id3v2Header;
use super::tag::Id3v2Tag;
use crate::config::{ParseOptions, ParsingMode};
use crate::error::{CannotReadError, CannotReadKind, ErrorKind, Result, TagError};
use crate::macros::{parse_mode_choice, try_vec};
use crate::registry::Registries;
use crate::util::synchsafe::{is_synchsafe, unsynch_u32, unsynchronise};

use std::borrow::Cow;
use std::io::Read;

use byteorder::{BigEndian, ByteOrder};

const FRAME_HEADER_SIZE: usize = 10;

pub(crate) fn parse_id3v2<'r, R>(
	bytes: &mut R,
	header: Id3v2Header,
	registries: &'r Registries,
	parse_options: ParseOptions,
) -> Result<Id3v2Tag<'r>>
where
	R: Read,
{
	log::debug!(
		"Parsing ID3v2 tag, size: {}, version: {:?}",
		header.size,
		header.version
	);

	let format = header.version.format();
	let parsing_mode = parse_options.parsing_mode;

	let content_size = (header.size - header.extended_size) as usize;
	let mut content = try_vec![0; content_size, parse_options.allocation_limit];

	let mut read = 0;
	while read < content_size {
		match bytes.read(&mut content[read..])? {
			0 => break,
			n => read += n,
		}
	}

	if read < content_size {
		parse_mode_choice!(
			parsing_mode,
			RELAXED: {
				log::warn!("ID3v2 tag is truncated, reading {read} of {content_size} bytes");
				content.truncate(read);
			},
			DEFAULT: return Err(CannotReadError::new(format, CannotReadKind::Truncated).into())
		);
	}

	// ID3v2.4 unsynchronises frames individually, the tag flag only says that all of them are
	if header.unsynchronisation && header.version == Id3v2Version::V3 {
		content = unsynchronise(&content);
	}

	let mut tag = Id3v2Tag::new(registries, header.version);
	read_all_frames_into_tag(&content, &header, parsing_mode, &mut tag)?;

	Ok(tag)
}

fn frame_size(raw: u32, version: Id3v2Version) -> u32 {
	match version {
		Id3v2Version::V3 => raw,
		// Some writers use plain integers in ID3v2.4 frames
		Id3v2Version::V4 if is_synchsafe(raw) => unsynch_u32(raw),
		Id3v2Version::V4 => {
			log::warn!("Found a non-synchsafe ID3v2.4 frame size, reading it as a plain integer");
			raw
		},
	}
}

fn is_valid_frame_id(id: &[u8]) -> bool {
	id.iter().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

fn read_all_frames_into_tag(
	content: &[u8],
	header: &Id3v2Header,
	parsing_mode: ParsingMode,
	tag: &mut Id3v2Tag<'_>,
) -> Result<()> {
	let version = header.version;
	let format = version.format();

	let mut pos = 0;
	while pos + FRAME_HEADER_SIZE <= content.len() {
		let frame_header = &content[pos..pos + FRAME_HEADER_SIZE];

		// Padding
		if frame_header[0] == 0 {
			break;
		}

		let id = &frame_header[..4];
		let mut size = frame_size(BigEndian::read_u32(&frame_header[4..8]), version) as usize;
		let flags = [frame_header[8], frame_header[9]];
		pos += FRAME_HEADER_SIZE;

		let remaining = content.len() - pos;
		if size > remaining {
			parse_mode_choice!(
				parsing_mode,
				BESTATTEMPT: {
					log::warn!("Frame size overruns the tag, discarding the remaining frames");
					break;
				},
				RELAXED: {
					log::warn!("Frame size overruns the tag, clamping {size} to {remaining}");
					size = remaining;
				},
				DEFAULT: return Err(CannotReadError::new(format, CannotReadKind::Truncated).into())
			);
		}

		let body = &content[pos..pos + size];
		pos += size;

		if !is_valid_frame_id(id) {
			if parsing_mode == ParsingMode::Strict {
				return Err(TagError::new(ErrorKind::BadFrameId(id.to_vec())));
			}

			log::warn!("Skipping frame with an invalid ID: {:x?}", id);
			continue;
		}

		// Checked above
		let id = std::str::from_utf8(id).unwrap_or_default();

		let Some(body) = frame_body(id, body, flags, version, header.unsynchronisation) else {
			continue;
		};

		match decode_frame(id, &body, version) {
			Ok(Some(field)) => tag.container.push_read(field),
			Ok(None) => log::debug!("Skipping empty frame \"{id}\""),
			Err(err) => {
				if parsing_mode == ParsingMode::Strict {
					return Err(err);
				}

				log::warn!("Skipping malformed frame \"{id}\": {err}");
			},
		}
	}

	Ok(())
}

// Applies the frame format flags, `None` if the content cannot be read
fn frame_body<'a>(
	id: &str,
	body: &'a [u8],
	flags: [u8; 2],
	version: Id3v2Version,
	tag_unsynchronisation: bool,
) -> Option<Cow<'a, [u8]>> {
	let format_flags = flags[1];

	let (compressed, encrypted, grouped, unsynchronised, length_indicator) = match version {
		Id3v2Version::V3 => (
			format_flags & 0x80 == 0x80,
			format_flags & 0x40 == 0x40,
			format_flags & 0x20 == 0x20,
			false,
			false,
		),
		Id3v2Version::V4 => (
			format_flags & 0x08 == 0x08,
			format_flags & 0x04 == 0x04,
			format_flags & 0x40 == 0x40,
			tag_unsynchronisation || format_flags & 0x02 == 0x02,
			format_flags & 0x01 == 0x01,
		),
	};

	if compressed || encrypted {
		log::warn!("Skipping compressed or encrypted frame \"{id}\"");
		return None;
	}

	let mut skip = 0;
	if grouped {
		skip += 1;
	}

	// Compression always adds a length indicator in ID3v2.4, so it only appears alone here
	if length_indicator {
		skip += 4;
	}

	if skip > body.len() {
		log::warn!("Frame \"{id}\" is too short for its flags, skipping");
		return None;
	}

	let body = &body[skip..];
	if unsynchronised {
		return Some(Cow::Owned(unsynchronise(body)));
	}

	Some(Cow::Borrowed(body))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::field::TagField;

	fn v4_frame(id: &[u8; 4], body: &[u8]) -> Vec<u8> {
		let mut frame = id.to_vec();
		frame.extend((body.len() as u32).to_be_bytes());
		frame.extend([0, 0]);
		frame.extend(body);
		frame
	}

	fn tag_bytes(frames: &[u8], padding: usize) -> Vec<u8> {
		let size = (frames.len() + padding) as u32;
		let mut bytes = vec![b'I', b'D', b'3', 4, 0, 0];
		bytes.extend(crate::util::synchsafe::synch_u32(size).unwrap().to_be_bytes());
		bytes.extend(frames);
		bytes.extend(std::iter::repeat_n(0, padding));
		bytes
	}

	fn parse(bytes: &[u8], parse_options: ParseOptions) -> Result<Id3v2Tag<'static>> {
		static REGISTRIES: std::sync::LazyLock<Registries> = std::sync::LazyLock::new(Registries::new);

		let mut reader = bytes;
		let header = Id3v2Header::parse(&mut reader, parse_options)?;
		parse_id3v2(&mut reader, header, &REGISTRIES, parse_options)
	}

	#[test_log::test]
	fn padding_ends_frames() {
		let mut frames = v4_frame(b"TIT2", b"\x00Foo title");
		frames.extend(v4_frame(b"PRIV", b"owner\x00\x01\x02"));

		let tag = parse(&tag_bytes(&frames, 64), ParseOptions::new()).unwrap();
		assert_eq!(tag.container.len(), 2);
		assert_eq!(
			tag.container.get_first("TIT2").unwrap().text().as_deref(),
			Some("Foo title")
		);
		assert_eq!(
			tag.container.get_first("PRIV").unwrap().value().binary(),
			Some(&b"owner\x00\x01\x02"[..])
		);
	}

	#[test_log::test]
	fn bad_frame_id() {
		let mut frames = v4_frame(b"TI+2", b"\x00Foo");
		frames.extend(v4_frame(b"TPE1", b"\x00Bar"));
		let bytes = tag_bytes(&frames, 0);

		let tag = parse(&bytes, ParseOptions::new()).unwrap();
		assert_eq!(tag.container.len(), 1);

		let err = parse(&bytes, ParseOptions::new().parsing_mode(ParsingMode::Strict)).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::BadFrameId(_)));
	}

	#[test_log::test]
	fn duplicate_single_valued_frames_keep_first() {
		let mut frames = v4_frame(b"TIT2", b"\x00First");
		frames.extend(v4_frame(b"TIT2", b"\x00Second"));

		let tag = parse(&tag_bytes(&frames, 0), ParseOptions::new()).unwrap();
		assert_eq!(
			tag.container.get_first("TIT2").unwrap().text().as_deref(),
			Some("First")
		);
	}

	#[test_log::test]
	fn overrunning_frame() {
		let mut frames = v4_frame(b"TIT2", b"\x00Foo");
		let mut overrun = b"TPE1".to_vec();
		overrun.extend(100_u32.to_be_bytes());
		overrun.extend([0, 0, 0]);
		overrun.extend(b"Bar");
		frames.extend(overrun);
		let bytes = tag_bytes(&frames, 0);

		let tag = parse(&bytes, ParseOptions::new()).unwrap();
		assert_eq!(tag.container.len(), 1);

		let tag = parse(&bytes, ParseOptions::new().parsing_mode(ParsingMode::Relaxed)).unwrap();
		assert_eq!(
			tag.container.get_first("TPE1").unwrap().text().as_deref(),
			Some("Bar")
		);

		let err = parse(&bytes, ParseOptions::new().parsing_mode(ParsingMode::Strict)).unwrap_err();
		assert_eq!(err.cannot_read_kind(), Some(CannotReadKind::Truncated));
	}

	#[test_log::test]
	fn truncated_tag() {
		let frames = v4_frame(b"TIT2", b"\x00Foo");
		let mut bytes = tag_bytes(&frames, 0);
		bytes.truncate(bytes.len() - 2);

		let err = parse(&bytes, ParseOptions::new()).unwrap_err();
		assert_eq!(err.cannot_read_kind(), Some(CannotReadKind::Truncated));
	}
}
