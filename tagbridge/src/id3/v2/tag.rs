use super::frame::FrameLayout;
use super::header::{Id3v2Header, Id3v2Version};
use super::read::parse_id3v2;
use super::write::create_tag;
use crate::config::{ParseOptions, WriteOptions};
use crate::error::Result;
use crate::field::{Field, FieldId, FieldValue, NumericTuple, TextValue};
use crate::macros::err;
use crate::registry::genres::{genre_index, resolve_id3_genre};
use crate::registry::{FieldKey, IdentifierRegistry, Registries};
use crate::tag::{Accessor, FormatAdapter, TagContainer, TagFormat};
use crate::util::text::TextEncoding;

use std::borrow::Cow;
use std::io::{Read, Write};

const DEFAULT_LANGUAGE: [u8; 3] = *b"eng";

// (ID3v2.3, ID3v2.4)
const SIBLING_FRAMES: [(&str, &str); 5] = [
	("IPLS", "TIPL"),
	("TORY", "TDOR"),
	("XSOA", "TSOA"),
	("XSOP", "TSOP"),
	("XSOT", "TSOT"),
];

/// An ID3v2.3 or ID3v2.4 tag
///
/// ## Text frames
///
/// In ID3v2.4, text frames may hold multiple values separated by NUL. [`FormatAdapter::add_field`]
/// appends to the existing frame rather than creating a new one, and [`FormatAdapter::get_all`]
/// returns each value separately.
///
/// ## Genres
///
/// Genres from the ID3v1 genre list are stored by their index, `17` in ID3v2.4 and `(17)` in
/// ID3v2.3. Reading always produces the name.
///
/// ```rust
/// use tagbridge::prelude::*;
/// use tagbridge::id3::v2::{Id3v2Tag, Id3v2Version};
/// use tagbridge::registry::{FieldKey, Registries};
///
/// # fn main() -> tagbridge::error::Result<()> {
/// let registries = Registries::new();
/// let mut tag = Id3v2Tag::new(&registries, Id3v2Version::V4);
///
/// tag.add_field(FieldKey::Genre, "Rock")?;
/// tag.add_field(FieldKey::Genre, "Something else")?;
///
/// let tcon = tag.container().get_first("TCON").unwrap();
/// assert_eq!(tcon.value().text(), Some("17\0Something else"));
/// assert_eq!(tag.get_all(FieldKey::Genre)?, ["Rock", "Something else"]);
/// # Ok(()) }
/// ```
#[derive(Debug, Clone)]
pub struct Id3v2Tag<'r> {
	version: Id3v2Version,
	registries: &'r Registries,
	pub(crate) container: TagContainer<'r, Field>,
}

impl<'r> Id3v2Tag<'r> {
	/// Create an empty tag of `version`
	pub fn new(registries: &'r Registries, version: Id3v2Version) -> Self {
		Self {
			version,
			registries,
			container: TagContainer::new(registries.get(version.format())),
		}
	}

	/// The tag's version
	pub fn version(&self) -> Id3v2Version {
		self.version
	}

	/// Read a tag, starting at the current position of `reader`
	///
	/// # Errors
	///
	/// * [`ErrorKind::CannotRead`](crate::error::ErrorKind::CannotRead): the header is missing or
	///   the tag is structurally invalid
	/// * Any frame error, with [`ParsingMode::Strict`](crate::config::ParsingMode::Strict)
	pub fn read_from<R>(
		reader: &mut R,
		registries: &'r Registries,
		parse_options: ParseOptions,
	) -> Result<Self>
	where
		R: Read,
	{
		let header = Id3v2Header::parse(reader, parse_options)?;
		parse_id3v2(reader, header, registries, parse_options)
	}

	/// Write the tag, including its header and padding, to `writer`
	///
	/// The tag is always written in its own version. Nothing is written if any frame fails to encode.
	///
	/// # Errors
	///
	/// * A frame's text cannot be represented in its encoding
	/// * The tag is too large for a synchsafe size
	/// * [`std::io::Error`]
	pub fn dump_to<W>(&self, writer: &mut W, write_options: WriteOptions) -> Result<()>
	where
		W: Write,
	{
		let tag = create_tag(self, write_options)?;
		writer.write_all(&tag)?;
		Ok(())
	}

	/// Remove every frame that should be discarded once the audio is altered
	///
	/// These are frames such as `ETCO` and `TLEN`, which describe the audio data itself.
	pub fn discard_on_alter(&mut self) {
		let registry = self.registries.get(self.version.format());
		self.container.retain(|field| {
			let discard = registry.classify(field.id()).discard_on_alter;
			if discard {
				log::debug!("Discarding frame \"{}\"", field.id());
			}

			!discard
		});
	}

	/// Convert the tag to another ID3v2 version
	///
	/// * `TYER`, `TDAT` and `TIME` are merged into `TDRC` when upgrading, and split when downgrading
	/// * `IPLS`, `TORY` and the `XSO*` frames move to their siblings `TIPL`, `TDOR` and `TSO*`
	/// * Frames without a counterpart are moved through their generic key, if any
	/// * Anything else that the target version doesn't support is dropped
	pub fn convert_version(&mut self, version: Id3v2Version) {
		if version == self.version {
			return;
		}

		let from = self.registries.get(self.version.format());
		let to = self.registries.get(version.format());

		let old = std::mem::replace(&mut self.container, TagContainer::new(to));
		let mut fields = old.into_fields().collect::<Vec<_>>();
		self.version = version;

		match version {
			Id3v2Version::V4 => {
				if let Some(timestamp) = merge_dates(&mut fields) {
					self.container.add(Field::new(
						TagFormat::Id3v24,
						"TDRC",
						FieldValue::Text(TextValue::new(timestamp, TextEncoding::Latin1)),
					));
				}
			},
			Id3v2Version::V3 => {
				for (id, value) in split_timestamp(&mut fields) {
					self.container.add(Field::new(
						TagFormat::Id3v23,
						id,
						FieldValue::Text(TextValue::new(value, TextEncoding::Latin1)),
					));
				}
			},
		}

		for field in fields {
			if let Some(field) = convert_frame(field, from, to, version) {
				self.container.add(field);
			}
		}
	}

	fn text_encoding_for(&self, text: &str) -> TextEncoding {
		if TextEncoding::Latin1.verify(text).is_ok() {
			return TextEncoding::Latin1;
		}

		match self.version {
			Id3v2Version::V3 => TextEncoding::UTF16,
			Id3v2Version::V4 => TextEncoding::UTF8,
		}
	}

	fn genre_value(&self, value: &str) -> String {
		match (genre_index(value), self.version) {
			(Some(index), Id3v2Version::V4) => index.to_string(),
			(Some(index), Id3v2Version::V3) => format!("({index})"),
			(None, _) => value.to_string(),
		}
	}
}

impl<'r> FormatAdapter<'r> for Id3v2Tag<'r> {
	fn format(&self) -> TagFormat {
		self.version.format()
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
		let format = self.format();
		let base = format.base_id(&id);

		let content = match FrameLayout::of(&id) {
			FrameLayout::Url | FrameLayout::UserUrl => {
				TextEncoding::Latin1.verify(value)?;
				return Ok(Field::new(
					format,
					id,
					FieldValue::Text(TextValue::new(value, TextEncoding::Latin1)),
				));
			},
			FrameLayout::Binary => err!(InvalidFieldData("binary frames cannot be created from text")),
			FrameLayout::Language => {
				return Ok(Field::new(
					format,
					id,
					FieldValue::Text(TextValue {
						content: value.to_string(),
						encoding: self.text_encoding_for(value),
						language: Some(DEFAULT_LANGUAGE),
					}),
				));
			},
			FrameLayout::UserText => value.to_string(),
			FrameLayout::Text => match base {
				"TCON" => self.genre_value(value),
				"TRCK" => NumericTuple::parse_pair(value, NumericTuple::TRACK_SLOTS)?.to_string(),
				"TPOS" => NumericTuple::parse_pair(value, NumericTuple::DISC_SLOTS)?.to_string(),
				"TBPM" | "TLEN" => require_digits(value)?.to_string(),
				"TYER" | "TORY" => year_prefix(value)?.to_string(),
				"TDAT" | "TIME" => {
					let digits = require_digits(value)?;
					if digits.len() != 4 {
						err!(InvalidFieldData("expected exactly 4 digits"));
					}

					digits.to_string()
				},
				_ => value.to_string(),
			},
		};

		let encoding = self.text_encoding_for(&content);
		Ok(Field::new(
			format,
			id,
			FieldValue::Text(TextValue::new(content, encoding)),
		))
	}

	fn custom_id(&self, name: &str) -> Option<FieldId> {
		if name.is_empty() {
			return None;
		}

		Some(Cow::Owned(format!("TXXX:{name}")))
	}

	fn render_field(&self, field: &Field) -> Vec<String> {
		let Some(text) = field.value().text() else {
			return Vec::new();
		};

		let values: Vec<&str> = match FrameLayout::of(field.id()) {
			FrameLayout::Text | FrameLayout::UserText => text.split('\0').collect(),
			_ => vec![text],
		};

		let is_genre = self.format().base_id(field.id()) == "TCON";
		values
			.into_iter()
			.filter(|value| !value.is_empty())
			.map(|value| {
				if is_genre {
					resolve_id3_genre(value)
				} else {
					value.to_string()
				}
			})
			.collect()
	}

	fn allowed_encodings(&self, id: &str) -> &'static [TextEncoding] {
		match FrameLayout::of(id) {
			FrameLayout::Url | FrameLayout::UserUrl => &[TextEncoding::Latin1],
			_ => self.format().allowed_encodings(),
		}
	}

	fn add_field(&mut self, key: FieldKey, value: &str) -> Result<()> {
		if self.registry().pair_slot(key).is_some() {
			return self.set_field(key, value);
		}

		let field = self.create_field(key, value)?;

		// ID3v2.4 text frames hold multiple values in one frame
		if self.version == Id3v2Version::V4 && FrameLayout::of(field.id()) == FrameLayout::Text {
			if let (Some(existing), FieldValue::Text(new)) =
				(self.container.get_first_mut(field.id()), field.value())
			{
				if let FieldValue::Text(existing) = existing.value_mut() {
					existing.content.push('\0');
					existing.content.push_str(&new.content);

					if existing.encoding.verify(&existing.content).is_err() {
						existing.encoding = new.encoding;
					}

					return Ok(());
				}
			}
		}

		self.container.add(field);
		Ok(())
	}
}

impl<'r> Accessor<'r> for Id3v2Tag<'r> {}

fn require_digits(value: &str) -> Result<&str> {
	let value = value.trim();
	if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
		err!(InvalidFieldData("expected a number"));
	}

	Ok(value)
}

// "2004-05-01" -> "2004"
fn year_prefix(value: &str) -> Result<&str> {
	let value = value.trim();
	match value.get(..4) {
		Some(year) if year.bytes().all(|b| b.is_ascii_digit()) => Ok(year),
		_ => err!(InvalidFieldData("expected a year")),
	}
}

fn take_text(fields: &mut Vec<Field>, id: &str) -> Option<String> {
	let position = fields.iter().position(|field| field.id() == id)?;
	let field = fields.remove(position);
	field.value().text().map(str::to_string)
}

fn is_digits(value: &str, len: usize) -> bool {
	value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

// TYER "2004" + TDAT "0105" (DDMM) + TIME "1230" (HHMM) -> "2004-05-01T12:30"
fn merge_dates(fields: &mut Vec<Field>) -> Option<String> {
	let year = take_text(fields, "TYER");
	let date = take_text(fields, "TDAT");
	let time = take_text(fields, "TIME");

	let Some(year) = year.filter(|year| is_digits(year, 4)) else {
		if date.is_some() || time.is_some() {
			log::warn!("Dropping TDAT/TIME without a valid TYER");
		}

		return None;
	};

	let mut timestamp = year;
	if let Some(date) = date.filter(|date| is_digits(date, 4)) {
		timestamp.push_str(&format!("-{}-{}", &date[2..4], &date[..2]));

		if let Some(time) = time.filter(|time| is_digits(time, 4)) {
			timestamp.push_str(&format!("T{}:{}", &time[..2], &time[2..4]));
		}
	}

	Some(timestamp)
}

// "2004-05-01T12:30" -> TYER "2004", TDAT "0105", TIME "1230"
fn split_timestamp(fields: &mut Vec<Field>) -> Vec<(&'static str, String)> {
	let Some(timestamp) = take_text(fields, "TDRC") else {
		return Vec::new();
	};

	let mut frames = Vec::new();
	let Some(year) = timestamp.get(..4).filter(|year| is_digits(year, 4)) else {
		log::warn!("Dropping TDRC with an invalid year: \"{timestamp}\"");
		return frames;
	};
	frames.push(("TYER", year.to_string()));

	let month = timestamp.get(5..7).filter(|m| is_digits(m, 2));
	let day = timestamp.get(8..10).filter(|d| is_digits(d, 2));
	if let (Some(month), Some(day)) = (month, day) {
		frames.push(("TDAT", format!("{day}{month}")));

		let hour = timestamp.get(11..13).filter(|h| is_digits(h, 2));
		let minute = timestamp.get(14..16).filter(|m| is_digits(m, 2));
		if let (Some(hour), Some(minute)) = (hour, minute) {
			frames.push(("TIME", format!("{hour}{minute}")));
		}
	}

	frames
}

fn sibling(id: &str, version: Id3v2Version) -> Option<&'static str> {
	SIBLING_FRAMES.iter().find_map(|(v3, v4)| match version {
		Id3v2Version::V4 if *v3 == id => Some(*v4),
		Id3v2Version::V3 if *v4 == id => Some(*v3),
		_ => None,
	})
}

fn convert_frame(
	field: Field,
	from: &IdentifierRegistry,
	to: &IdentifierRegistry,
	version: Id3v2Version,
) -> Option<Field> {
	let format = version.format();
	let id = field.id().to_owned();

	let target_id: FieldId = if let Some(sibling) = sibling(&id, version) {
		Cow::Borrowed(sibling)
	} else if to.is_valid_id(&id) && to.classify(&id).supported {
		Cow::Owned(id.clone())
	} else if let Some(mapped) = from
		.format_to_generic(&id)
		.and_then(|key| to.generic_to_format(key))
	{
		Cow::Borrowed(mapped)
	} else if !from.classify(&id).supported {
		// Unknown frames are carried over as-is
		Cow::Owned(id.clone())
	} else {
		log::warn!("Dropping frame \"{id}\", it has no counterpart in {format:?}");
		return None;
	};

	let mut value = field.into_value();
	if let FieldValue::Text(text) = &mut value {
		match &*target_id {
			// The involved people list moves to the plain text encodings
			"TIPL" if id == "IPLS" => {
				text.encoding = match TextEncoding::Latin1.verify(&text.content) {
					Ok(()) => TextEncoding::Latin1,
					Err(_) => TextEncoding::UTF16,
				};
			},
			"TORY" => text.content.truncate(4),
			"TCON" => text.content = convert_genres(&text.content, version),
			_ => {},
		}

		if version == Id3v2Version::V3 {
			text.encoding = text.encoding.to_id3v23();
		}
	}

	Some(Field::new(format, target_id, value))
}

fn convert_genres(content: &str, version: Id3v2Version) -> String {
	content
		.split('\0')
		.map(|genre| {
			let name = resolve_id3_genre(genre);
			match (genre_index(&name), version) {
				(Some(index), Id3v2Version::V4) => index.to_string(),
				(Some(index), Id3v2Version::V3) => format!("({index})"),
				(None, _) => name,
			}
		})
		.collect::<Vec<_>>()
		.join("\0")
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::ErrorKind;
	use crate::field::TagField;

	fn round_trip<'r>(tag: &Id3v2Tag<'r>, registries: &'r Registries) -> Id3v2Tag<'r> {
		let mut bytes = Vec::new();
		tag.dump_to(&mut bytes, WriteOptions::new()).unwrap();
		Id3v2Tag::read_from(&mut &bytes[..], registries, ParseOptions::new()).unwrap()
	}

	#[test_log::test]
	fn v24_round_trip() {
		let registries = Registries::new();
		let mut tag = Id3v2Tag::new(&registries, Id3v2Version::V4);

		tag.set_field(FieldKey::Title, "Foo title").unwrap();
		tag.add_field(FieldKey::Artist, "Foo artist").unwrap();
		tag.add_field(FieldKey::Artist, "B\u{e4}r artist").unwrap();
		tag.set_field(FieldKey::TrackNumber, "5/12").unwrap();
		tag.add_field(FieldKey::Comment, "First comment").unwrap();
		tag.add_field(FieldKey::Comment, "\u{4e2d}\u{6587}").unwrap();
		tag.set_field(FieldKey::Mood, "Calm").unwrap();

		let read = round_trip(&tag, &registries);
		assert!(read.container.fields().eq(tag.container.fields()));

		assert_eq!(read.get_all(FieldKey::Artist).unwrap(), ["Foo artist", "B\u{e4}r artist"]);
		assert_eq!(read.get_all(FieldKey::Comment).unwrap(), ["First comment", "\u{4e2d}\u{6587}"]);
		assert_eq!(read.track(), Some(5));
		assert_eq!(read.track_total(), Some(12));
		assert_eq!(read.get_first(FieldKey::Mood).unwrap().as_deref(), Some("Calm"));
	}

	#[test_log::test]
	fn v23_genre_references() {
		let registries = Registries::new();
		let mut tag = Id3v2Tag::new(&registries, Id3v2Version::V3);

		tag.set_field(FieldKey::Genre, "Rock").unwrap();
		assert_eq!(
			tag.container.get_first("TCON").unwrap().value().text(),
			Some("(17)")
		);

		let read = round_trip(&tag, &registries);
		assert_eq!(read.genre().as_deref(), Some("Rock"));

		tag.set_field(FieldKey::Genre, "Not a standard genre").unwrap();
		assert_eq!(tag.genre().as_deref(), Some("Not a standard genre"));
	}

	#[test_log::test]
	fn numeric_frames_are_validated() {
		let registries = Registries::new();
		let mut tag = Id3v2Tag::new(&registries, Id3v2Version::V3);

		let err = tag.set_field(FieldKey::Bpm, "fast").unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::InvalidFieldData(_)));

		let err = tag.set_field(FieldKey::TrackNumber, "1/2/3").unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::InvalidFieldData(_)));

		tag.set_field(FieldKey::Year, "2004-05-01").unwrap();
		assert_eq!(tag.year(), Some(2004));
		assert_eq!(
			tag.container.get_first("TYER").unwrap().value().text(),
			Some("2004")
		);

		assert_eq!(tag.container.len(), 1);
	}

	#[test_log::test]
	fn url_frames_are_latin1() {
		let registries = Registries::new();
		let mut tag = Id3v2Tag::new(&registries, Id3v2Version::V4);

		let err = tag
			.set_field(FieldKey::CopyrightUrl, "https://example.com/\u{4e2d}")
			.unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::UnsupportedEncoding(_)));
		assert!(tag.container.is_empty());

		tag.set_field(FieldKey::CopyrightUrl, "https://example.com").unwrap();
		let read = round_trip(&tag, &registries);
		assert_eq!(
			read.get_first(FieldKey::CopyrightUrl).unwrap().as_deref(),
			Some("https://example.com")
		);
	}

	#[test_log::test]
	fn track_total_keeps_ordinal() {
		let registries = Registries::new();
		let mut tag = Id3v2Tag::new(&registries, Id3v2Version::V4);

		tag.set_field(FieldKey::TrackNumber, "5").unwrap();
		assert_eq!(tag.get_first(FieldKey::TrackTotal).unwrap(), None);

		tag.set_field(FieldKey::TrackTotal, "12").unwrap();
		assert_eq!(
			tag.container.get_first("TRCK").unwrap().value().text(),
			Some("5/12")
		);

		tag.delete_field(FieldKey::TrackTotal).unwrap();
		assert_eq!(
			tag.container.get_first("TRCK").unwrap().value().text(),
			Some("5")
		);
	}

	#[test_log::test]
	fn upgrade_to_v24() {
		let registries = Registries::new();
		let mut tag = Id3v2Tag::new(&registries, Id3v2Version::V3);

		tag.container.add(Field::new(
			TagFormat::Id3v23,
			"IPLS",
			FieldValue::Text(TextValue::new("producer\0Foo", TextEncoding::UTF16)),
		));
		tag.set_field(FieldKey::Year, "2004").unwrap();
		tag.container.add(Field::new_text(TagFormat::Id3v23, "TDAT", "0105"));
		tag.container.add(Field::new_text(TagFormat::Id3v23, "TIME", "1230"));
		tag.set_field(FieldKey::AlbumSort, "Album, The").unwrap();
		tag.set_field(FieldKey::Genre, "Rock").unwrap();

		tag.convert_version(Id3v2Version::V4);
		assert_eq!(tag.format(), TagFormat::Id3v24);

		let tipl = tag.container.get_first("TIPL").unwrap();
		assert_eq!(tipl.encoding(), Some(TextEncoding::Latin1));
		assert_eq!(tipl.value().text(), Some("producer\0Foo"));

		assert_eq!(
			tag.container.get_first("TDRC").unwrap().value().text(),
			Some("2004-05-01T12:30")
		);
		assert!(!tag.container.contains("TYER"));
		assert_eq!(
			tag.container.get_first("TSOA").unwrap().value().text(),
			Some("Album, The")
		);
		assert_eq!(
			tag.container.get_first("TCON").unwrap().value().text(),
			Some("17")
		);
	}

	#[test_log::test]
	fn downgrade_to_v23() {
		let registries = Registries::new();
		let mut tag = Id3v2Tag::new(&registries, Id3v2Version::V4);

		tag.set_field(FieldKey::Year, "2004-05-01T12:30:00").unwrap();
		tag.set_field(FieldKey::Mood, "Calm").unwrap();
		tag.set_field(FieldKey::Title, "\u{4e2d}\u{6587}").unwrap();
		tag.container.add(Field::new_text(TagFormat::Id3v24, "TDEN", "2005"));

		tag.convert_version(Id3v2Version::V3);

		assert_eq!(tag.container.get_first("TYER").unwrap().value().text(), Some("2004"));
		assert_eq!(tag.container.get_first("TDAT").unwrap().value().text(), Some("0105"));
		assert_eq!(tag.container.get_first("TIME").unwrap().value().text(), Some("1230"));
		assert_eq!(tag.get_first(FieldKey::Mood).unwrap().as_deref(), Some("Calm"));
		assert!(!tag.container.contains("TDEN"));
		assert_eq!(
			tag.container.get_first("TIT2").unwrap().encoding(),
			Some(TextEncoding::UTF16)
		);

		let read = round_trip(&tag, &registries);
		assert_eq!(read.title().as_deref(), Some("\u{4e2d}\u{6587}"));
	}

	#[test_log::test]
	fn discard_frames_on_alter() {
		let registries = Registries::new();
		let mut tag = Id3v2Tag::new(&registries, Id3v2Version::V3);

		tag.container.add(Field::new_text(TagFormat::Id3v23, "TLEN", "1000"));
		tag.container.add(Field::new(
			TagFormat::Id3v23,
			"ETCO",
			FieldValue::Binary(vec![1, 2, 3]),
		));
		tag.set_field(FieldKey::Title, "Foo title").unwrap();

		tag.discard_on_alter();
		assert_eq!(tag.container.ids().collect::<Vec<_>>(), ["TIT2"]);
	}
}
