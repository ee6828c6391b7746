use super::{FormatAdapter, TagContainer, TagFormat, add_converted, new_tag};
use crate::error::Result;
use crate::field::{Field, TagField};
use crate::macros::err;
use crate::registry::Registries;

/// A tag that borrows fields of any format without converting them
///
/// The fields keep their original identifiers and values. Only the multiplicity rules of the
/// tag's format apply, through its [`TagContainer`].
///
/// # Examples
///
/// ```rust
/// use tagbridge::field::{Field, TagField};
/// use tagbridge::registry::Registries;
/// use tagbridge::tag::{AliasedTag, TagFormat};
///
/// let registries = Registries::new();
/// let title = Field::new_text(TagFormat::Id3v24, "TIT2", "Foo title");
///
/// let tag = AliasedTag::from_fields(
/// 	TagFormat::VorbisComments,
/// 	&registries,
/// 	[&title as &dyn TagField],
/// );
///
/// assert_eq!(tag.get("TIT2").len(), 1);
/// ```
pub struct AliasedTag<'r, 'a> {
	format: TagFormat,
	container: TagContainer<'r, &'a dyn TagField>,
}

impl<'r, 'a> AliasedTag<'r, 'a> {
	/// Create an empty `AliasedTag` following the rules of `format`
	pub fn new(format: TagFormat, registries: &'r Registries) -> Self {
		Self {
			format,
			container: TagContainer::new(registries.get(format)),
		}
	}

	/// Create an `AliasedTag` from borrowed fields
	pub fn from_fields<I>(format: TagFormat, registries: &'r Registries, fields: I) -> Self
	where
		I: IntoIterator<Item = &'a dyn TagField>,
	{
		let mut tag = Self::new(format, registries);
		for field in fields {
			tag.add(field);
		}

		tag
	}

	/// The format whose rules the tag follows
	pub fn format(&self) -> TagFormat {
		self.format
	}

	/// Add a borrowed field
	pub fn add(&mut self, field: &'a dyn TagField) {
		self.container.add(field);
	}

	/// All fields stored under `id`
	pub fn get(&self, id: &str) -> &[&'a dyn TagField] {
		self.container.get(id)
	}

	/// The first field stored under `id`
	pub fn get_first(&self, id: &str) -> Option<&'a dyn TagField> {
		self.container.get_first(id).copied()
	}

	/// The text of the first field stored under `id`
	pub fn get_text(&self, id: &str) -> Option<String> {
		self.get_first(id)
			.and_then(|field| field.text())
			.map(|text| text.into_owned())
	}

	/// The underlying container
	pub fn container(&self) -> &TagContainer<'r, &'a dyn TagField> {
		&self.container
	}

	/// Iterates over the borrowed fields
	pub fn fields(&self) -> impl Iterator<Item = &'a dyn TagField> + '_ {
		self.container.fields().copied()
	}

	/// The number of fields
	pub fn len(&self) -> usize {
		self.container.len()
	}

	/// Whether the tag holds no fields
	pub fn is_empty(&self) -> bool {
		self.container.is_empty()
	}
}

/// The result of [`CopiedTag::copy`]
///
/// A copy either converts every field into the target format, or aliases the source fields.
/// Only converted copies support format specific operations.
pub enum CopiedTag<'r, 'a> {
	/// Every field was converted into a native field of the target format
	Converted(Box<dyn FormatAdapter<'r> + 'r>),
	/// The source fields are referenced as-is
	Aliased(AliasedTag<'r, 'a>),
}

impl<'r, 'a> CopiedTag<'r, 'a> {
	/// Copy `fields` into a new tag of `format`
	///
	/// With `convert` set, every field goes through
	/// [`FormatAdapter::copy_fields_from`]. Fields without a counterpart in `format` are dropped.
	///
	/// # Errors
	///
	/// Only when converting, see [`FormatAdapter::copy_field_from`]
	///
	/// # Examples
	///
	/// ```rust
	/// use tagbridge::field::{Field, TagField};
	/// use tagbridge::registry::{FieldKey, Registries};
	/// use tagbridge::tag::{CopiedTag, TagFormat};
	///
	/// # fn main() -> tagbridge::error::Result<()> {
	/// let registries = Registries::new();
	/// let artist = Field::new_text(TagFormat::VorbisComments, "ARTIST", "Foo artist");
	///
	/// let copy = CopiedTag::copy(
	/// 	TagFormat::Id3v24,
	/// 	&registries,
	/// 	[&artist as &dyn TagField],
	/// 	true,
	/// )?;
	///
	/// assert_eq!(copy.native_fields()?.get("TPE1").len(), 1);
	/// # Ok(()) }
	/// ```
	pub fn copy<I>(format: TagFormat, registries: &'r Registries, fields: I, convert: bool) -> Result<Self>
	where
		I: IntoIterator<Item = &'a dyn TagField>,
	{
		if !convert {
			return Ok(Self::Aliased(AliasedTag::from_fields(
				format, registries, fields,
			)));
		}

		let mut tag = new_tag(format, registries);

		let mut converted = Vec::new();
		for field in fields {
			converted.extend(tag.copy_fields_from(field)?);
		}

		for field in converted {
			add_converted(tag.as_mut(), field);
		}

		Ok(Self::Converted(tag))
	}

	/// Whether the fields were converted
	pub fn is_converted(&self) -> bool {
		matches!(self, Self::Converted(_))
	}

	/// The format of the copy
	pub fn format(&self) -> TagFormat {
		match self {
			Self::Converted(tag) => tag.format(),
			Self::Aliased(tag) => tag.format(),
		}
	}

	/// The number of fields in the copy
	pub fn len(&self) -> usize {
		match self {
			Self::Converted(tag) => tag.container().len(),
			Self::Aliased(tag) => tag.len(),
		}
	}

	/// Whether the copy holds no fields
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// The native fields of a converted copy
	///
	/// # Errors
	///
	/// [`ErrorKind::IllegalState`](crate::error::ErrorKind::IllegalState): the copy is aliased
	pub fn native_fields(&self) -> Result<&TagContainer<'r, Field>> {
		match self {
			Self::Converted(tag) => Ok(tag.container()),
			Self::Aliased(_) => err!(IllegalState("aliased copies have no native fields")),
		}
	}

	/// The tag of a converted copy
	///
	/// # Errors
	///
	/// [`ErrorKind::IllegalState`](crate::error::ErrorKind::IllegalState): the copy is aliased
	pub fn native_tag(&mut self) -> Result<&mut (dyn FormatAdapter<'r> + 'r)> {
		match self {
			Self::Converted(tag) => Ok(&mut **tag),
			Self::Aliased(_) => err!(IllegalState("aliased copies cannot be modified as native tags")),
		}
	}
}
