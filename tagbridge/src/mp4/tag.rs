use super::ilst::{
	GENRE_INDEX, GENRE_TEXT, NumericLayout, dump_ilst, genre_as_text, numeric_layout,
};
use super::read::read_from;
use crate::config::{ParseOptions, WriteOptions};
use crate::error::Result;
use crate::field::{Field, FieldId, FieldValue, IntegerKind, NumericTuple, TextValue};
use crate::macros::err;
use crate::registry::genres::genre_index;
use crate::registry::{FieldKey, Registries, is_valid_id};
use crate::tag::{Accessor, FormatAdapter, TagContainer, TagFormat};
use crate::util::text::TextEncoding;

use std::borrow::Cow;
use std::io::{Read, Seek};

const ITUNES_MEAN: &str = "com.apple.iTunes";

/// An MP4 ilst atom
///
/// ## Numeric atoms
///
/// `trkn`, `disk`, `tmpo`, `cpil`, `gnre`, `rtng`, `pgap` and `stik` hold integers, and are
/// validated when set. Everything else is UTF-8 text, except for `covr`, which holds image data.
///
/// ## Genres
///
/// A genre from the standard ID3v1 list is stored in `gnre` as its index + 1, any other genre in
/// `©gen`. Setting one removes the other. With [`WriteOptions::write_mp4_genres_as_text`], every
/// genre is stored in `©gen`.
///
/// ## Custom fields
///
/// Fields with no counterpart in MP4 are stored as freeform atoms, `----:com.apple.iTunes:<name>`.
#[derive(Debug, Clone)]
pub struct Mp4Tag<'r> {
	registries: &'r Registries,
	write_options: WriteOptions,
	pub(crate) container: TagContainer<'r, Field>,
}

impl<'r> Mp4Tag<'r> {
	/// Create an empty tag
	pub fn new(registries: &'r Registries) -> Self {
		Self::with_write_options(registries, WriteOptions::default())
	}

	/// Create an empty tag, consulting `write_options` when fields are set and written
	pub fn with_write_options(registries: &'r Registries, write_options: WriteOptions) -> Self {
		Self {
			registries,
			write_options,
			container: TagContainer::new(registries.get(TagFormat::Mp4Ilst)),
		}
	}

	/// The [`WriteOptions`] of this tag
	pub fn write_options(&self) -> WriteOptions {
		self.write_options
	}

	/// Replaces the [`WriteOptions`] of this tag
	pub fn set_write_options(&mut self, write_options: WriteOptions) {
		self.write_options = write_options;
	}

	/// Read the `ilst` atom of an MP4 file
	///
	/// The atom is located at `moov.udta.meta.ilst`. A file without one produces an empty tag.
	///
	/// # Errors
	///
	/// * [`ErrorKind::CannotRead`](crate::error::ErrorKind::CannotRead): the file doesn't start with
	///   an `ftyp` atom, or has no `moov` atom
	/// * [`ErrorKind::BadAtom`](crate::error::ErrorKind::BadAtom) and [`ErrorKind::SizeMismatch`](crate::error::ErrorKind::SizeMismatch):
	///   the atom structure is corrupt
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

	/// Serializes the tag as a complete `ilst` atom
	///
	/// # Errors
	///
	/// * An identifier can't be expressed as an atom
	/// * An atom is too large for its 32-bit size
	pub fn dump_ilst(&self) -> Result<Vec<u8>> {
		dump_ilst(self)
	}

	fn genre_field(&self, value: &str) -> Field {
		if !self.write_options.write_mp4_genres_as_text {
			if let Some(index) = genre_index(value) {
				return Field::new(
					TagFormat::Mp4Ilst,
					GENRE_INDEX,
					FieldValue::NumericTuple(NumericTuple::scalar(IntegerKind::U16, index as u64 + 1)),
				);
			}
		}

		Field::new(
			TagFormat::Mp4Ilst,
			GENRE_TEXT,
			FieldValue::Text(TextValue::new(value, TextEncoding::UTF8)),
		)
	}
}

impl<'r> FormatAdapter<'r> for Mp4Tag<'r> {
	fn format(&self) -> TagFormat {
		TagFormat::Mp4Ilst
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

	/// Genres are routed to `©gen` or `gnre`, regardless of which of the two `id` is
	fn build_field(&self, id: FieldId, value: &str) -> Result<Field> {
		if id == GENRE_TEXT {
			return Ok(self.genre_field(value));
		}

		if id == GENRE_INDEX {
			let field = self.genre_field(value);
			if field.id() != GENRE_INDEX && !self.write_options.write_mp4_genres_as_text {
				err!(InvalidFieldData("gnre only holds standard genres"));
			}

			return Ok(field);
		}

		if let Some((layout, _)) = numeric_layout(&id) {
			let tuple = match layout {
				NumericLayout::Pair(slots) => NumericTuple::parse_pair(value, slots)?,
				NumericLayout::Scalar(kind) => NumericTuple::parse_scalar(kind, value)?,
			};

			return Ok(Field::new(TagFormat::Mp4Ilst, id, FieldValue::NumericTuple(tuple)));
		}

		if self.registry().classify(&id).binary {
			err!(InvalidFieldData("binary atoms cannot be created from text"));
		}

		Ok(Field::new(
			TagFormat::Mp4Ilst,
			id,
			FieldValue::Text(TextValue::new(value, TextEncoding::UTF8)),
		))
	}

	fn custom_id(&self, name: &str) -> Option<FieldId> {
		let id = format!("----:{ITUNES_MEAN}:{name}");
		is_valid_id(TagFormat::Mp4Ilst, &id).then_some(Cow::Owned(id))
	}

	fn build_pair_field(&self, id: &'static str, pair: NumericTuple) -> Field {
		Field::new(TagFormat::Mp4Ilst, id, FieldValue::NumericTuple(pair))
	}

	fn render_field(&self, field: &Field) -> Vec<String> {
		if field.id() == GENRE_INDEX {
			if let Some(FieldValue::Text(genre)) = genre_as_text(field.value()) {
				return vec![genre.content];
			}
		}

		match field.value() {
			FieldValue::Text(text) => vec![text.content.clone()],
			FieldValue::NumericTuple(tuple) => vec![tuple.to_string()],
			FieldValue::Binary(_) => Vec::new(),
		}
	}

	fn key_ids(&self, key: FieldKey) -> Result<Vec<&'static str>> {
		if key == FieldKey::Genre {
			return Ok(vec![GENRE_TEXT, GENRE_INDEX]);
		}

		Ok(vec![self.key_id(key)?])
	}

	fn add_field(&mut self, key: FieldKey, value: &str) -> Result<()> {
		// A genre may switch atoms, which a plain insertion would leave behind
		if key == FieldKey::Genre || self.registry().pair_slot(key).is_some() {
			return self.set_field(key, value);
		}

		let field = self.create_field(key, value)?;
		self.container.add(field);
		Ok(())
	}
}

impl<'r> Accessor<'r> for Mp4Tag<'r> {}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::ErrorKind;

	use std::io::Cursor;

	fn atom(fourcc: &[u8; 4], content: &[u8]) -> Vec<u8> {
		let mut bytes = ((content.len() + 8) as u32).to_be_bytes().to_vec();
		bytes.extend(fourcc);
		bytes.extend(content);
		bytes
	}

	// ftyp, moov.udta.meta.ilst, then some "media data"
	fn file_with(ilst: &[u8]) -> Vec<u8> {
		let mut meta = vec![0; 4];
		meta.extend(atom(b"hdlr", &[0; 25]));
		meta.extend_from_slice(ilst);

		let moov = atom(
			b"moov",
			&[atom(b"mvhd", &[0; 100]), atom(b"udta", &atom(b"meta", &meta))].concat(),
		);

		[atom(b"ftyp", b"M4A \x00\x00\x02\x00isom"), moov, atom(b"mdat", &[0xAB; 64])].concat()
	}

	#[test_log::test]
	fn file_round_trip() {
		let registries = Registries::new();

		let mut tag = Mp4Tag::new(&registries);
		tag.set_title(String::from("Foo title")).unwrap();
		tag.set_track(5).unwrap();
		tag.set_track_total(12).unwrap();
		tag.set_disk(1).unwrap();
		tag.set_field(FieldKey::Bpm, "120").unwrap();
		tag.set_field(FieldKey::Mood, "Calm").unwrap();
		tag.set_genre(String::from("Rock")).unwrap();

		let file = file_with(&tag.dump_ilst().unwrap());
		let read = Mp4Tag::read_from(&mut Cursor::new(file), &registries, ParseOptions::new())
			.unwrap();

		assert!(read.container.fields().eq(tag.container.fields()));
		assert_eq!(read.title().as_deref(), Some("Foo title"));
		assert_eq!(read.get_first(FieldKey::TrackNumber).unwrap().as_deref(), Some("5"));
		assert_eq!(read.track_total(), Some(12));
		assert_eq!(read.disk(), Some(1));
		assert_eq!(read.disk_total(), None);
		assert_eq!(read.genre().as_deref(), Some("Rock"));
		assert_eq!(
			read.get_first(FieldKey::Mood).unwrap().as_deref(),
			Some("Calm")
		);
		assert!(read.container.contains("----:com.apple.iTunes:MOOD"));
	}

	#[test_log::test]
	fn missing_tag_atoms() {
		let registries = Registries::new();

		let file = [atom(b"ftyp", b"M4A "), atom(b"moov", &atom(b"mvhd", &[0; 8]))].concat();
		let tag = Mp4Tag::read_from(&mut Cursor::new(file), &registries, ParseOptions::new())
			.unwrap();
		assert!(tag.container.is_empty());

		let err = Mp4Tag::read_from(
			&mut Cursor::new(atom(b"moov", &[])),
			&registries,
			ParseOptions::new(),
		)
		.unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::CannotRead(_)));
	}

	#[test_log::test]
	fn genre_atoms() {
		let registries = Registries::new();
		let mut tag = Mp4Tag::new(&registries);

		tag.set_genre(String::from("Rock")).unwrap();
		assert_eq!(
			tag.container
				.get_first(GENRE_INDEX)
				.and_then(|field| field.value().numeric())
				.map(NumericTuple::value),
			Some(18)
		);

		// A non-standard genre moves to ©gen
		tag.add_field(FieldKey::Genre, "Chiptune-ish").unwrap();
		assert!(!tag.container.contains(GENRE_INDEX));
		assert_eq!(tag.get_all(FieldKey::Genre).unwrap(), ["Chiptune-ish"]);

		let err = tag
			.build_field(Cow::Borrowed(GENRE_INDEX), "Chiptune-ish")
			.unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::InvalidFieldData(_)));

		let mut text_only =
			Mp4Tag::with_write_options(&registries, WriteOptions::new().write_mp4_genres_as_text(true));
		text_only.set_genre(String::from("Rock")).unwrap();
		assert!(text_only.container.contains(GENRE_TEXT));
		assert!(!text_only.container.contains(GENRE_INDEX));
	}

	#[test_log::test]
	fn gnre_written_as_text() {
		let registries = Registries::new();

		let mut tag = Mp4Tag::new(&registries);
		tag.set_genre(String::from("Rock")).unwrap();
		tag.set_write_options(WriteOptions::new().write_mp4_genres_as_text(true));

		let ilst = tag.dump_ilst().unwrap();
		assert!(ilst.windows(4).any(|window| window == b"\xA9gen"));
		assert!(!ilst.windows(4).any(|window| window == b"gnre"));
	}

	#[test_log::test]
	fn numeric_atoms_are_validated() {
		let registries = Registries::new();
		let mut tag = Mp4Tag::new(&registries);

		let err = tag.set_field(FieldKey::Bpm, "fast").unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::InvalidFieldData(_)));

		let err = tag.set_field(FieldKey::TrackNumber, "1/2/3").unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::InvalidFieldData(_)));

		tag.set_field(FieldKey::TrackNumber, "3/9").unwrap();
		let trkn = tag.container.get_first("trkn").unwrap().value().numeric().unwrap();
		assert_eq!(trkn.slots(), &[0, 3, 9, 0]);
	}

	#[test_log::test]
	fn custom_fields_are_freeform() {
		let registries = Registries::new();
		let tag = Mp4Tag::new(&registries);

		assert_eq!(
			tag.custom_id("MY FIELD").as_deref(),
			Some("----:com.apple.iTunes:MY FIELD")
		);
		assert_eq!(tag.custom_id(""), None);
	}
}
