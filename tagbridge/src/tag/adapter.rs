use super::container::TagContainer;
use super::TagFormat;
use crate::error::Result;
use crate::field::{Field, FieldId, FieldValue, NumericTuple, TagField, TextValue};
use crate::macros::err;
use crate::registry::{FieldKey, IdentifierRegistry, PairSlot, Registries};
use crate::util::text::TextEncoding;

use std::borrow::Cow;

/// Format-aware field handling on top of a [`TagContainer`]
///
/// Every format's tag implements this trait, which provides:
///
/// * The generic key layer ([`FormatAdapter::get_all`], [`FormatAdapter::set_field`], ...), which
///   translates [`FieldKey`]s through the format's [`IdentifierRegistry`]
/// * Value-converting copies of fields from other tags ([`FormatAdapter::copy_field_from`])
///
/// Implementors only provide the format specific hooks, most notably [`FormatAdapter::build_field`].
///
/// # Examples
///
/// ```rust
/// use tagbridge::registry::{FieldKey, Registries};
/// use tagbridge::tag::FormatAdapter;
/// use tagbridge::ogg::VorbisComments;
///
/// # fn main() -> tagbridge::error::Result<()> {
/// let registries = Registries::new();
/// let mut tag = VorbisComments::new(&registries);
///
/// tag.add_field(FieldKey::Artist, "Foo")?;
/// tag.add_field(FieldKey::Artist, "Bar")?;
///
/// assert_eq!(tag.get_all(FieldKey::Artist)?, ["Foo", "Bar"]);
/// # Ok(()) }
/// ```
pub trait FormatAdapter<'r> {
	/// The format of the tag
	fn format(&self) -> TagFormat;

	/// The registries the tag was created with
	fn registries(&self) -> &'r Registries;

	/// The registry of this tag's format
	fn registry(&self) -> &'r IdentifierRegistry {
		self.registries().get(self.format())
	}

	/// The underlying container
	fn container(&self) -> &TagContainer<'r, Field>;

	/// A mutable reference to the underlying container
	fn container_mut(&mut self) -> &mut TagContainer<'r, Field>;

	/// Builds a field of this format from text
	///
	/// `id` has already been resolved. Implementors validate `value`, and pick the representation
	/// and encoding of the field.
	///
	/// # Errors
	///
	/// * [`ErrorKind::InvalidFieldData`](crate::error::ErrorKind::InvalidFieldData): `value` isn't acceptable for `id`
	/// * [`ErrorKind::UnsupportedEncoding`](crate::error::ErrorKind::UnsupportedEncoding): `value` cannot be stored in any allowed encoding
	fn build_field(&self, id: FieldId, value: &str) -> Result<Field>;

	/// Wraps an identifier foreign to this format in its custom field syntax
	///
	/// `None` if the name cannot be expressed at all.
	fn custom_id(&self, name: &str) -> Option<FieldId>;

	/// Builds the field shared by a numeric pair (track/disc number and total)
	///
	/// By default, the pair is stored as `"N/M"` text.
	fn build_pair_field(&self, id: &'static str, pair: NumericTuple) -> Field {
		Field::new(
			self.format(),
			id,
			FieldValue::Text(TextValue::new(pair.to_string(), self.default_encoding(id))),
		)
	}

	/// Renders a native field to zero or more values
	fn render_field(&self, field: &Field) -> Vec<String> {
		field
			.text()
			.map(|text| vec![text.into_owned()])
			.unwrap_or_default()
	}

	/// Every identifier the values of `key` may be stored under
	///
	/// # Errors
	///
	/// `key` has no mapping in this format
	fn key_ids(&self, key: FieldKey) -> Result<Vec<&'static str>> {
		Ok(vec![self.key_id(key)?])
	}

	/// The encodings the text of `id` may be stored in
	fn allowed_encodings(&self, _id: &str) -> &'static [TextEncoding] {
		self.format().allowed_encodings()
	}

	/// The encoding used for `id` when the source encoding isn't allowed
	fn default_encoding(&self, id: &str) -> TextEncoding {
		let allowed = self.allowed_encodings(id);
		let default = self.format().default_encoding();

		if allowed.contains(&default) || allowed.is_empty() {
			return default;
		}

		allowed[0]
	}

	/// Checks that `text` can be stored in `encoding`
	///
	/// # Errors
	///
	/// [`ErrorKind::UnsupportedEncoding`](crate::error::ErrorKind::UnsupportedEncoding)
	fn verify_text(&self, encoding: TextEncoding, text: &str) -> Result<()> {
		encoding.verify(text)?;
		Ok(())
	}

	/// Maps a generic key to this format's identifier
	///
	/// # Errors
	///
	/// [`ErrorKind::KeyNotFound`](crate::error::ErrorKind::KeyNotFound)
	fn key_id(&self, key: FieldKey) -> Result<&'static str> {
		match self.registry().generic_to_format(key) {
			Some(id) => Ok(id),
			None => err!(KeyNotFound(key)),
		}
	}

	/// Creates a field for a generic key, without adding it to the tag
	///
	/// For the total of a numeric pair, the ordinal of the created field is 0.
	///
	/// # Errors
	///
	/// * [`ErrorKind::KeyNotFound`](crate::error::ErrorKind::KeyNotFound)
	/// * [`ErrorKind::InvalidFieldData`](crate::error::ErrorKind::InvalidFieldData): `value`
	///   doesn't satisfy the field's content constraints, or `key` holds binary data
	/// * See [`FormatAdapter::build_field`]
	fn create_field(&self, key: FieldKey, value: &str) -> Result<Field> {
		let id = self.key_id(key)?;

		if let Some((_, slot)) = self.registry().pair_slot(key) {
			let slots = pair_slot_count(key);
			let pair = match slot {
				PairSlot::Ordinal => NumericTuple::parse_pair(value, slots)?,
				PairSlot::Total => NumericTuple::pair(slots, 0, parse_total(value)?),
			};

			return Ok(self.build_pair_field(id, pair));
		}

		if self.registry().classify(id).binary {
			err!(InvalidFieldData("binary fields cannot be created from text"));
		}

		self.build_field(Cow::Borrowed(id), value)
	}

	/// Creates a binary field for a generic key, without adding it to the tag
	///
	/// # Errors
	///
	/// * [`ErrorKind::KeyNotFound`](crate::error::ErrorKind::KeyNotFound)
	/// * [`ErrorKind::InvalidFieldData`](crate::error::ErrorKind::InvalidFieldData): `key` doesn't hold binary data
	fn create_binary_field(&self, key: FieldKey, data: Vec<u8>) -> Result<Field> {
		let id = self.key_id(key)?;
		if !self.registry().classify(id).binary {
			err!(InvalidFieldData("only binary fields can hold raw bytes"));
		}

		Ok(Field::new(self.format(), id, FieldValue::Binary(data)))
	}

	/// Every value stored for a generic key
	///
	/// An empty list means the key is mapped, but has no values.
	///
	/// # Errors
	///
	/// [`ErrorKind::KeyNotFound`](crate::error::ErrorKind::KeyNotFound)
	fn get_all(&self, key: FieldKey) -> Result<Vec<String>> {
		if let Some((id, slot)) = self.registry().pair_slot(key) {
			return Ok(self
				.container()
				.get(id)
				.iter()
				.filter_map(|field| pair_component(field, slot))
				.collect());
		}

		let mut values = Vec::new();
		for id in self.key_ids(key)? {
			for field in self.container().get(id) {
				values.extend(self.render_field(field));
			}
		}

		Ok(values)
	}

	/// The first value stored for a generic key
	///
	/// # Errors
	///
	/// [`ErrorKind::KeyNotFound`](crate::error::ErrorKind::KeyNotFound)
	fn get_first(&self, key: FieldKey) -> Result<Option<String>> {
		Ok(self.get_all(key)?.into_iter().next())
	}

	/// Sets a generic key, replacing all of its values
	///
	/// For keys sharing a numeric pair, the other half of the pair is kept.
	///
	/// # Errors
	///
	/// See [`FormatAdapter::create_field`]. The tag is left unmodified on error.
	fn set_field(&mut self, key: FieldKey, value: &str) -> Result<()> {
		let field = match self.registry().pair_slot(key) {
			Some((id, slot)) => merged_pair_field(self, key, id, slot, value)?,
			None => self.create_field(key, value)?,
		};

		for id in self.key_ids(key)? {
			if id != field.id() {
				self.container_mut().delete(id);
			}
		}

		self.container_mut().set(field);
		Ok(())
	}

	/// Adds a value to a generic key
	///
	/// If the key is single-valued, this behaves like [`FormatAdapter::set_field`].
	///
	/// # Errors
	///
	/// See [`FormatAdapter::create_field`]. The tag is left unmodified on error.
	fn add_field(&mut self, key: FieldKey, value: &str) -> Result<()> {
		if self.registry().pair_slot(key).is_some() {
			return self.set_field(key, value);
		}

		let field = self.create_field(key, value)?;
		self.container_mut().add(field);
		Ok(())
	}

	/// Removes every value of a generic key
	///
	/// Removing the total of a numeric pair keeps its ordinal.
	///
	/// # Errors
	///
	/// [`ErrorKind::KeyNotFound`](crate::error::ErrorKind::KeyNotFound)
	fn delete_field(&mut self, key: FieldKey) -> Result<()> {
		if let Some((id, PairSlot::Total)) = self.registry().pair_slot(key) {
			let mut pair = current_pair(self, key, id);
			if pair.ordinal().unwrap_or(0) == 0 {
				self.container_mut().delete(id);
				return Ok(());
			}

			if self.container().contains(id) {
				pair.set_total(0);
				let field = self.build_pair_field(id, pair);
				self.container_mut().set(field);
			}

			return Ok(());
		}

		for id in self.key_ids(key)? {
			self.container_mut().delete(id);
		}

		Ok(())
	}

	/// Translates the identifier of a field from any format into this format's
	///
	/// In order, the identifier is:
	///
	/// 1. Mapped through the source format's generic key, if both formats map it
	/// 2. Kept, if this format knows it
	/// 3. Wrapped in this format's custom field syntax, see [`FormatAdapter::custom_id`]
	fn convert_id(&self, source: &dyn TagField) -> Option<FieldId> {
		let source_id = source.id();

		let Some(source_format) = source.format() else {
			return keep_or_wrap(self, source_id);
		};

		if source_format == self.format() {
			return Some(Cow::Owned(source_id.to_owned()));
		}

		let mapped = self
			.registries()
			.get(source_format)
			.format_to_generic(source_id)
			.and_then(|key| self.registry().generic_to_format(key));
		if let Some(id) = mapped {
			return Some(Cow::Borrowed(id));
		}

		keep_or_wrap(self, custom_name(source_format, source_id))
	}

	/// Copies a field of any format into this format, converting its value
	///
	/// This doesn't add the field to the tag. In order:
	///
	/// 1. The identifier is translated, see [`FormatAdapter::convert_id`]
	/// 2. Blank text fields are dropped (`Ok(None)`)
	/// 3. Non-empty fields of this format are cloned
	/// 4. Fields with a textual rendering are rebuilt from it, in the source encoding if it is
	///    allowed here, otherwise in the encoding [`FormatAdapter::build_field`] picked
	/// 5. Anything else is copied as its raw bytes ([`TagField::raw_content`])
	///
	/// Keys sharing a numeric pair here (`TRCK`, `trkn`) are built through their pair slot, so a
	/// copied total becomes a pair with an ordinal of 0. A source pair may convert to two fields
	/// when this format stores the total under its own key. Only the first is returned here, see
	/// [`FormatAdapter::copy_fields_from`].
	///
	/// # Errors
	///
	/// * [`ErrorKind::UnsupportedEncoding`](crate::error::ErrorKind::UnsupportedEncoding): the
	///   text cannot be represented in the chosen encoding
	/// * [`ErrorKind::InvalidFieldData`](crate::error::ErrorKind::InvalidFieldData): the text is
	///   unacceptable for the target field
	fn copy_field_from(&self, source: &dyn TagField) -> Result<Option<Field>> {
		Ok(self.copy_fields_from(source)?.into_iter().next())
	}

	/// Copies a field of any format into this format, converting its value
	///
	/// Like [`FormatAdapter::copy_field_from`], except that a numeric pair (`"5/12"`) copied into a
	/// format storing its halves under separate keys (`TRACKNUMBER`, `TRACKTOTAL`) produces both
	/// fields. Halves that are unset (0) are left out.
	///
	/// # Errors
	///
	/// See [`FormatAdapter::copy_field_from`]
	fn copy_fields_from(&self, source: &dyn TagField) -> Result<Vec<Field>> {
		if let Some(fields) = split_pair(self, source)? {
			return Ok(fields);
		}

		Ok(copy_single(self, source)?.into_iter().collect())
	}

	/// Copies every field of `fields` into the tag
	///
	/// Fields are converted with [`FormatAdapter::copy_fields_from`], and are only added once all
	/// of them converted successfully. Halves of a numeric pair are merged into the pair already
	/// in the tag.
	///
	/// Returns the number of converted fields.
	///
	/// # Errors
	///
	/// See [`FormatAdapter::copy_field_from`]. The tag is left unmodified on error.
	fn fill_from<'a, I>(&mut self, fields: I) -> Result<usize>
	where
		I: IntoIterator<Item = &'a dyn TagField>,
		Self: Sized,
	{
		let mut converted = Vec::new();
		for field in fields {
			converted.extend(self.copy_fields_from(field)?);
		}

		let count = converted.len();
		for field in converted {
			add_converted(self, field);
		}

		Ok(count)
	}
}

// Composite ids are reduced to the name a user would recognize
fn custom_name(format: TagFormat, id: &str) -> &str {
	match format {
		TagFormat::Id3v23 | TagFormat::Id3v24 => match id.split_once(':') {
			Some(("TXXX" | "WXXX", description)) => description,
			_ => id,
		},
		TagFormat::Mp4Ilst => match id.strip_prefix("----:").and_then(|rest| rest.split_once(':')) {
			Some((_, name)) => name,
			None => id,
		},
		TagFormat::Asf | TagFormat::VorbisComments => id,
	}
}

fn keep_or_wrap<'r, A>(adapter: &A, name: &str) -> Option<FieldId>
where
	A: FormatAdapter<'r> + ?Sized,
{
	let registry = adapter.registry();
	if registry.is_valid_id(name) && registry.classify(name).supported {
		return Some(Cow::Owned(name.to_owned()));
	}

	adapter.custom_id(name)
}

fn source_key<'r, A>(adapter: &A, source: &dyn TagField) -> Option<FieldKey>
where
	A: FormatAdapter<'r> + ?Sized,
{
	let format = source.format()?;
	adapter.registries().get(format).format_to_generic(source.id())
}

// Steps 1 through 5 of `copy_field_from`, for a single resulting field
fn copy_single<'r, A>(adapter: &A, source: &dyn TagField) -> Result<Option<Field>>
where
	A: FormatAdapter<'r> + ?Sized,
{
	let Some(id) = adapter.convert_id(source) else {
		log::debug!(
			"Dropping field \"{}\", it has no counterpart in {:?}",
			source.id(),
			adapter.format()
		);
		return Ok(None);
	};

	let text = source.text();
	if let Some(text) = &text {
		if text.trim().is_empty() {
			log::debug!("Dropping blank field \"{}\"", source.id());
			return Ok(None);
		}
	}

	if let Some(field) = source.as_field() {
		if field.format() == adapter.format() {
			if TagField::is_empty(field) {
				return Ok(None);
			}

			let mut copy = field.clone();
			copy.set_id(id);
			return Ok(Some(copy));
		}
	}

	let Some(text) = text else {
		let content = source.raw_content()?;
		if content.is_empty() {
			log::debug!("Dropping empty field \"{}\"", source.id());
			return Ok(None);
		}

		return Ok(Some(Field::new(adapter.format(), id, FieldValue::Binary(content))));
	};

	if let Some(key) = source_key(adapter, source) {
		if adapter.registry().pair_slot(key).is_some() {
			return adapter.create_field(key, &text).map(Some);
		}
	}

	if adapter.registry().classify(&id).binary {
		err!(InvalidFieldData("text cannot be stored in a binary field"));
	}

	let mut field = adapter.build_field(id, &text)?;
	if let FieldValue::Text(value) = &mut field.value {
		let allowed = adapter.allowed_encodings(&field.id);
		let encoding = match source.encoding() {
			Some(encoding) if allowed.contains(&encoding) => encoding,
			_ if allowed.contains(&value.encoding) => value.encoding,
			_ => adapter.default_encoding(&field.id),
		};

		adapter.verify_text(encoding, &value.content)?;
		value.encoding = encoding;
	}

	Ok(Some(field))
}

// A pair of the source format (`TRCK`, `trkn`), copied into a format keeping its halves apart.
// `None` when `source` isn't such a pair.
fn split_pair<'r, A>(adapter: &A, source: &dyn TagField) -> Result<Option<Vec<Field>>>
where
	A: FormatAdapter<'r> + ?Sized,
{
	let Some(format) = source.format() else {
		return Ok(None);
	};

	if format == adapter.format() {
		return Ok(None);
	}

	let source_registry = adapter.registries().get(format);
	let halves = source_registry.pair_keys(source.id()).collect::<Vec<_>>();
	let half = |wanted: PairSlot| {
		halves
			.iter()
			.find(|(_, slot)| *slot == wanted)
			.map(|(key, _)| *key)
	};

	let (Some(ordinal_key), Some(total_key)) = (half(PairSlot::Ordinal), half(PairSlot::Total))
	else {
		return Ok(None);
	};

	if adapter.registry().pair_slot(ordinal_key).is_some() {
		return Ok(None);
	}

	let Some(text) = source.text() else {
		return Ok(None);
	};

	let Ok(pair) = NumericTuple::parse_pair(&text, pair_slot_count(ordinal_key)) else {
		return Ok(None);
	};

	let registry = adapter.registry();

	let mut fields = Vec::new();
	if let Some(ordinal) = pair.ordinal().filter(|ordinal| *ordinal > 0) {
		if registry.generic_to_format(ordinal_key).is_some() {
			fields.push(adapter.create_field(ordinal_key, &ordinal.to_string())?);
		}
	}

	if let Some(total) = pair.total() {
		if registry.generic_to_format(total_key).is_some() {
			fields.push(adapter.create_field(total_key, &total.to_string())?);
		} else {
			log::debug!(
				"Dropping the total of \"{}\", it has no counterpart in {:?}",
				source.id(),
				adapter.format()
			);
		}
	}

	Ok(Some(fields))
}

// Adds a converted field, merging halves of a numeric pair into the stored pair
pub(crate) fn add_converted<'r, A>(adapter: &mut A, field: Field)
where
	A: FormatAdapter<'r> + ?Sized,
{
	let registry = adapter.registry();
	let pair = registry
		.pair_keys(&field.id)
		.next()
		.and_then(|(key, _)| Some((key, registry.pair_slot(key)?.0)));

	let Some((key, id)) = pair else {
		adapter.container_mut().add(field);
		return;
	};

	let Some(new) = field_pair(&field, pair_slot_count(key)) else {
		adapter.container_mut().add(field);
		return;
	};

	let mut merged = current_pair(adapter, key, id);
	if let Some(ordinal) = new.ordinal().filter(|ordinal| *ordinal > 0) {
		merged.set_ordinal(ordinal as u16);
	}

	if let Some(total) = new.total() {
		merged.set_total(total as u16);
	}

	let field = adapter.build_pair_field(id, merged);
	adapter.container_mut().set(field);
}

fn pair_slot_count(key: FieldKey) -> usize {
	match key {
		FieldKey::TrackNumber | FieldKey::TrackTotal => NumericTuple::TRACK_SLOTS,
		_ => NumericTuple::DISC_SLOTS,
	}
}

fn parse_total(value: &str) -> Result<u16> {
	match value.trim().parse::<u16>() {
		Ok(total) => Ok(total),
		Err(_) => err!(InvalidFieldData("expected a single 16-bit number")),
	}
}

/// Reads a numeric pair from a native field, whether it is stored as numbers or as `"N/M"` text
fn field_pair(field: &Field, slots: usize) -> Option<NumericTuple> {
	match field.value() {
		FieldValue::NumericTuple(tuple) => Some(tuple.clone()),
		FieldValue::Text(text) => NumericTuple::parse_pair(&text.content, slots).ok(),
		FieldValue::Binary(_) => None,
	}
}

fn pair_component(field: &Field, slot: PairSlot) -> Option<String> {
	let Some(pair) = field_pair(field, NumericTuple::TRACK_SLOTS) else {
		// Unparseable text still has an ordinal, just not a numeric one
		return match (slot, field.value().text()) {
			(PairSlot::Ordinal, Some(text)) if !text.trim().is_empty() => Some(text.to_string()),
			_ => None,
		};
	};

	match slot {
		PairSlot::Ordinal => pair
			.ordinal()
			.filter(|ordinal| *ordinal > 0)
			.map(|ordinal| ordinal.to_string()),
		PairSlot::Total => pair.total().map(|total| total.to_string()),
	}
}

fn current_pair<'r, A>(adapter: &A, key: FieldKey, id: &str) -> NumericTuple
where
	A: FormatAdapter<'r> + ?Sized,
{
	let slots = pair_slot_count(key);
	adapter
		.container()
		.get_first(id)
		.and_then(|field| field_pair(field, slots))
		.unwrap_or_else(|| NumericTuple::pair(slots, 0, 0))
}

fn merged_pair_field<'r, A>(
	adapter: &A,
	key: FieldKey,
	id: &'static str,
	slot: PairSlot,
	value: &str,
) -> Result<Field>
where
	A: FormatAdapter<'r> + ?Sized,
{
	let slots = pair_slot_count(key);
	let mut pair = current_pair(adapter, key, id);

	match slot {
		PairSlot::Ordinal => {
			let new = NumericTuple::parse_pair(value, slots)?;
			pair.set_ordinal(new.ordinal().unwrap_or(0) as u16);
			if let Some(total) = new.total() {
				pair.set_total(total as u16);
			}
		},
		PairSlot::Total => pair.set_total(parse_total(value)?),
	}

	Ok(adapter.build_pair_field(id, pair))
}
