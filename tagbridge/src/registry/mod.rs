//! Per-format identifier registries
//!
//! Every format (and ID3v2 version) has exactly one [`IdentifierRegistry`], holding the
//! identifiers it accepts, how each of them is classified, and how they map to and from
//! [`FieldKey`]s.
//!
//! Registries are built once through [`Registries::new`] and are read-only afterwards.
//!
//! ```rust
//! use tagbridge::registry::{FieldKey, Registries};
//! use tagbridge::tag::TagFormat;
//!
//! let registries = Registries::new();
//!
//! let id3v24 = registries.get(TagFormat::Id3v24);
//! assert_eq!(id3v24.generic_to_format(FieldKey::Year), Some("TDRC"));
//!
//! let vorbis = registries.get(TagFormat::VorbisComments);
//! assert_eq!(vorbis.format_to_generic("artist"), Some(FieldKey::Artist));
//! ```

pub mod genres;
mod key;
pub(crate) mod tables;

pub use key::FieldKey;

use crate::tag::TagFormat;

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

/// Which half of a shared numeric pair (`TRCK`, `TPOS`, `trkn`, `disk`) a key refers to
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PairSlot {
	/// The position, e.g. the track number
	Ordinal,
	/// The total count, e.g. the number of tracks
	Total,
}

/// The categories an identifier belongs to
///
/// See [`IdentifierRegistry::classify`]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Classification {
	/// The identifier is known to the format
	pub supported: bool,
	/// The identifier is non-standard, but widely accepted
	pub extension: bool,
	/// The identifier is one of the core display fields
	pub common: bool,
	/// The identifier holds an opaque payload, never text
	pub binary: bool,
	/// The identifier holds a Latin-1 URL
	pub url: bool,
	/// The identifier may appear more than once in a tag
	pub multi_value: bool,
	/// The field must be dropped once the audio it describes is altered
	pub discard_on_alter: bool,
}

/// The static description of a registry, see [`tables`]
#[derive(Debug)]
pub(crate) struct RegistryTable {
	pub(crate) format: TagFormat,
	/// Every known identifier, with a human readable description
	pub(crate) supported: &'static [(&'static str, &'static str)],
	pub(crate) extension: &'static [&'static str],
	pub(crate) common: &'static [&'static str],
	pub(crate) binary: &'static [&'static str],
	pub(crate) url: &'static [&'static str],
	pub(crate) multi_value: &'static [&'static str],
	pub(crate) discard_on_alter: &'static [&'static str],
	/// Composite ids (`TXXX:desc`) that may repeat, but never with the same description
	pub(crate) keyed_by_description: &'static [&'static str],
	/// The first mapping of an identifier decides its reverse lookup
	pub(crate) mappings: &'static [(FieldKey, &'static str)],
	pub(crate) pairs: &'static [(FieldKey, PairSlot)],
	/// Whether syntactically valid, unknown identifiers are accepted as multi-valued extensions
	pub(crate) open_ended: bool,
}

/// The identifiers of a single format and version
#[derive(Debug)]
pub struct IdentifierRegistry {
	table: &'static RegistryTable,
	descriptions: HashMap<&'static str, &'static str>,
	extension: HashSet<&'static str>,
	common: HashSet<&'static str>,
	binary: HashSet<&'static str>,
	url: HashSet<&'static str>,
	multi_value: HashSet<&'static str>,
	discard_on_alter: HashSet<&'static str>,
	to_format: HashMap<FieldKey, &'static str>,
	to_generic: HashMap<&'static str, FieldKey>,
	pairs: HashMap<FieldKey, PairSlot>,
}

impl IdentifierRegistry {
	pub(crate) fn from_table(table: &'static RegistryTable) -> Self {
		let set = |ids: &'static [&'static str]| ids.iter().copied().collect::<HashSet<_>>();

		let mut to_format = HashMap::with_capacity(table.mappings.len());
		let mut to_generic = HashMap::with_capacity(table.mappings.len());
		for (key, id) in table.mappings {
			to_format.entry(*key).or_insert(*id);
			to_generic.entry(*id).or_insert(*key);
		}

		Self {
			table,
			descriptions: table.supported.iter().copied().collect(),
			extension: set(table.extension),
			common: set(table.common),
			binary: set(table.binary),
			url: set(table.url),
			multi_value: set(table.multi_value),
			discard_on_alter: set(table.discard_on_alter),
			to_format,
			to_generic,
			pairs: table.pairs.iter().copied().collect(),
		}
	}

	/// The format this registry describes
	pub fn format(&self) -> TagFormat {
		self.table.format
	}

	// Vorbis comment keys are case-insensitive, the tables store them upper case
	fn normalize<'a>(&self, id: &'a str) -> Cow<'a, str> {
		if self.table.format == TagFormat::VorbisComments && id.bytes().any(|b| b.is_ascii_lowercase()) {
			return Cow::Owned(id.to_ascii_uppercase());
		}

		Cow::Borrowed(id)
	}

	/// Classifies an identifier
	///
	/// Composite ids are reduced to their base id first, so `TXXX:BARCODE` is classified as `TXXX`.
	/// Unknown or malformed ids produce an all-`false` classification.
	pub fn classify(&self, id: &str) -> Classification {
		let id = self.normalize(id);
		let base = self.table.format.base_id(&id);

		if !self.descriptions.contains_key(base) {
			if self.table.open_ended && self.is_valid_id(&id) {
				return Classification {
					supported: true,
					extension: true,
					multi_value: true,
					..Classification::default()
				};
			}

			return Classification::default();
		}

		Classification {
			supported: true,
			extension: self.extension.contains(base),
			common: self.common.contains(base),
			binary: self.binary.contains(base),
			url: self.url.contains(base),
			multi_value: self.multi_value.contains(base),
			discard_on_alter: self.discard_on_alter.contains(base),
		}
	}

	/// Whether two ids refer to the same field
	///
	/// Vorbis comment keys ignore ASCII case, every other format compares exactly.
	pub fn ids_match(&self, a: &str, b: &str) -> bool {
		match self.table.format {
			TagFormat::VorbisComments => a.eq_ignore_ascii_case(b),
			_ => a == b,
		}
	}

	/// Whether more than one value may be stored under this exact id
	///
	/// This differs from [`Classification::multi_value`] for description keyed frames: a tag may
	/// hold many `TXXX` frames, but only one `TXXX:BARCODE`.
	pub fn allows_multiple(&self, id: &str) -> bool {
		let id = self.normalize(id);
		let base = self.table.format.base_id(&id);
		if base.len() != id.len() && self.table.keyed_by_description.contains(&base) {
			return false;
		}

		self.classify(&id).multi_value
	}

	/// The description of a known identifier
	pub fn describe(&self, id: &str) -> Option<&'static str> {
		let id = self.normalize(id);
		self.descriptions
			.get(self.table.format.base_id(&id))
			.copied()
	}

	/// Maps a generic key to this format's identifier
	pub fn generic_to_format(&self, key: FieldKey) -> Option<&'static str> {
		self.to_format.get(&key).copied()
	}

	/// Maps an identifier of this format back to a generic key
	///
	/// For Vorbis comments, the lookup ignores ASCII case.
	pub fn format_to_generic(&self, id: &str) -> Option<FieldKey> {
		self.to_generic.get(&*self.normalize(id)).copied()
	}

	/// For keys sharing a numeric pair, the shared id and the slot the key occupies
	pub fn pair_slot(&self, key: FieldKey) -> Option<(&'static str, PairSlot)> {
		let slot = self.pairs.get(&key)?;
		Some((self.generic_to_format(key)?, *slot))
	}

	/// All generic keys sharing a pair id, along with their slot
	pub(crate) fn pair_keys(&self, id: &str) -> impl Iterator<Item = (FieldKey, PairSlot)> + '_ {
		let id = self.normalize(id).into_owned();
		self.table
			.pairs
			.iter()
			.copied()
			.filter(move |(key, _)| self.generic_to_format(*key) == Some(id.as_str()))
	}

	/// Iterates the bidirectional mapping table, in table order
	pub fn mappings(&self) -> impl Iterator<Item = (FieldKey, &'static str)> + '_ {
		self.table.mappings.iter().copied()
	}

	/// Iterates every known identifier, in table order
	pub fn supported_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.table.supported.iter().map(|(id, _)| *id)
	}

	/// Whether `id` is syntactically valid for this format
	///
	/// This doesn't require the id to be known, see [`IdentifierRegistry::classify`].
	pub fn is_valid_id(&self, id: &str) -> bool {
		is_valid_id(self.table.format, id)
	}
}

/// Checks the identifier syntax of a format
///
/// * ID3v2: 4 characters of `[A-Z0-9]`, `TXXX`, `WXXX`, `COMM` and `USLT` may carry a `:description`
/// * MP4: 4 Latin-1 characters, or `----:mean:name`
/// * Vorbis comments: printable ASCII (0x20..=0x7D) except `=`
/// * ASF: non-empty and shorter than 32767 UTF-16 code units
pub fn is_valid_id(format: TagFormat, id: &str) -> bool {
	match format {
		TagFormat::Id3v23 | TagFormat::Id3v24 => {
			let base = format.base_id(id);
			let base_valid = base.len() == 4
				&& base
					.bytes()
					.all(|b| b.is_ascii_uppercase() || b.is_ascii_digit());

			base_valid
				&& (base.len() == id.len() || matches!(base, "TXXX" | "WXXX" | "COMM" | "USLT"))
		},
		TagFormat::Mp4Ilst => {
			if let Some(rest) = id.strip_prefix("----:") {
				return matches!(rest.split_once(':'), Some((mean, name)) if !mean.is_empty() && !name.is_empty());
			}

			id.chars().count() == 4 && id.chars().all(|c| (c as u32) <= 0xFF)
		},
		TagFormat::VorbisComments => {
			!id.is_empty() && id.bytes().all(|b| (0x20..=0x7D).contains(&b) && b != b'=')
		},
		TagFormat::Asf => !id.is_empty() && id.encode_utf16().count() < 32767,
	}
}

/// One [`IdentifierRegistry`] per [`TagFormat`]
///
/// This is `Send + Sync`, and is meant to be built once and shared by reference.
#[derive(Debug)]
pub struct Registries {
	id3v23: IdentifierRegistry,
	id3v24: IdentifierRegistry,
	asf: IdentifierRegistry,
	vorbis: IdentifierRegistry,
	mp4: IdentifierRegistry,
}

impl Registries {
	/// Builds every registry from the static tables
	#[must_use]
	pub fn new() -> Self {
		Self {
			id3v23: IdentifierRegistry::from_table(&tables::id3v23::TABLE),
			id3v24: IdentifierRegistry::from_table(&tables::id3v24::TABLE),
			asf: IdentifierRegistry::from_table(&tables::asf::TABLE),
			vorbis: IdentifierRegistry::from_table(&tables::vorbis::TABLE),
			mp4: IdentifierRegistry::from_table(&tables::mp4::TABLE),
		}
	}

	/// Gets the registry of a format
	pub fn get(&self, format: TagFormat) -> &IdentifierRegistry {
		match format {
			TagFormat::Id3v23 => &self.id3v23,
			TagFormat::Id3v24 => &self.id3v24,
			TagFormat::Asf => &self.asf,
			TagFormat::VorbisComments => &self.vorbis,
			TagFormat::Mp4Ilst => &self.mp4,
		}
	}
}

impl Default for Registries {
	fn default() -> Self {
		Self::new()
	}
}
