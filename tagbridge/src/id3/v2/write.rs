use super::Id3v2Version;
use super::frame::encode_frame;
use super::tag::Id3v2Tag;
use crate::config::WriteOptions;
use crate::error::Result;
use crate::field::Field;
use crate::macros::err;
use crate::util::synchsafe::synch_u32;

use byteorder::{BigEndian, WriteBytesExt};

/// Creates the full tag, including the header and padding
pub(crate) fn create_tag(tag: &Id3v2Tag<'_>, write_options: WriteOptions) -> Result<Vec<u8>> {
	let version = tag.version();

	let mut frames = Vec::new();
	for field in tag.container.fields() {
		write_frame(field, version, &mut frames)?;
	}

	let padding = write_options.preferred_padding.unwrap_or(0) as usize;
	log::debug!(
		"Writing ID3v2 tag, {} bytes of frames, {} bytes of padding",
		frames.len(),
		padding
	);

	let Ok(size) = u32::try_from(frames.len() + padding) else {
		err!(TooMuchData);
	};

	let mut out = Vec::with_capacity(10 + frames.len() + padding);
	out.extend_from_slice(b"ID3");
	out.push(version.major());
	// Revision and flags
	out.extend([0, 0]);
	out.write_u32::<BigEndian>(synch_u32(size)?)?;
	out.extend(frames);
	out.resize(out.len() + padding, 0);

	Ok(out)
}

fn write_frame(field: &Field, version: Id3v2Version, out: &mut Vec<u8>) -> Result<()> {
	let (id, body) = encode_frame(field, version)?;
	if id.len() != 4 {
		log::warn!("Skipping frame with an invalid ID \"{id}\"");
		return Ok(());
	}

	let Ok(size) = u32::try_from(body.len()) else {
		err!(TooMuchData);
	};

	out.extend_from_slice(id.as_bytes());
	match version {
		Id3v2Version::V3 => out.write_u32::<BigEndian>(size)?,
		Id3v2Version::V4 => out.write_u32::<BigEndian>(synch_u32(size)?)?,
	}

	// Flags
	out.extend([0, 0]);
	out.extend(body);

	Ok(())
}
