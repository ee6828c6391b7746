use super::atom::{AtomInfo, find_child, skip_meta_version};
use super::ilst::parse_ilst;
use super::tag::Mp4Tag;
use crate::config::ParseOptions;
use crate::error::Result;
use crate::macros::{decode_err, try_vec};
use crate::registry::Registries;

use std::io::{Read, Seek, SeekFrom};

/// Locates `moov.udta.meta.ilst` and parses it
///
/// A file without an `ilst` atom produces an empty tag.
pub(crate) fn read_from<'r, R>(
	reader: &mut R,
	registries: &'r Registries,
	parse_options: ParseOptions,
) -> Result<Mp4Tag<'r>>
where
	R: Read + Seek,
{
	let parse_mode = parse_options.parsing_mode;

	let start = reader.stream_position()?;
	let file_end = reader.seek(SeekFrom::End(0))?;
	reader.seek(SeekFrom::Start(start))?;

	match AtomInfo::read(reader, file_end, parse_mode)? {
		Some(ftyp) if &ftyp.fourcc == b"ftyp" => {
			reader.seek(SeekFrom::Start(ftyp.end()))?;
		},
		_ => decode_err!(@BAIL Mp4Ilst, MissingSignature),
	}

	let Some(moov) = find_child(reader, file_end, b"moov", parse_mode)? else {
		decode_err!(@BAIL Mp4Ilst, "File contains no \"moov\" atom");
	};

	let Some(udta) = find_child(reader, moov.end(), b"udta", parse_mode)? else {
		log::debug!("File contains no \"udta\" atom");
		return Ok(Mp4Tag::new(registries));
	};

	let Some(meta) = find_child(reader, udta.end(), b"meta", parse_mode)? else {
		log::debug!("File contains no \"meta\" atom");
		return Ok(Mp4Tag::new(registries));
	};

	skip_meta_version(reader)?;

	let Some(ilst) = find_child(reader, meta.end(), b"ilst", parse_mode)? else {
		log::debug!("File contains no \"ilst\" atom");
		return Ok(Mp4Tag::new(registries));
	};

	let len = (ilst.end() - ilst.content_start()) as usize;
	let mut content = try_vec![0; len, parse_options.allocation_limit];
	reader.read_exact(&mut content)?;

	parse_ilst(&content, registries, parse_options)
}
