use crate::field::{FieldId, FieldValue, TagField};
use crate::registry::IdentifierRegistry;

/// An ordered multimap from field identifiers to their values
///
/// Identifiers are kept in the order they were first inserted, and values keep their order
/// within an identifier. Whether an identifier may hold more than one value is decided by the
/// [`IdentifierRegistry`] of the container's format.
///
/// `V` is the stored field type. Converting tags store owned [`Field`](crate::field::Field)s,
/// [`AliasedTag`](crate::tag::AliasedTag)s store `&dyn TagField`s.
#[derive(Debug, Clone)]
pub struct TagContainer<'r, V> {
	registry: &'r IdentifierRegistry,
	entries: Vec<(FieldId, Vec<V>)>,
}

impl<'r, V: TagField> TagContainer<'r, V> {
	/// Create an empty container for the format of `registry`
	pub fn new(registry: &'r IdentifierRegistry) -> Self {
		Self {
			registry,
			entries: Vec::new(),
		}
	}

	/// The registry the container consults
	pub fn registry(&self) -> &'r IdentifierRegistry {
		self.registry
	}

	// Binary identifiers never hold text
	fn debug_assert_value_kind(&self, field: &V) {
		let Some(field) = field.as_field() else {
			return;
		};

		debug_assert!(
			field.format() != self.registry.format()
				|| !matches!(field.value(), FieldValue::Text(_))
				|| !self.registry.classify(field.id()).binary,
			"binary field \"{}\" cannot hold text",
			field.id()
		);
	}

	fn position(&self, id: &str) -> Option<usize> {
		self.entries
			.iter()
			.position(|(existing, _)| self.registry.ids_match(existing, id))
	}

	/// Add a field
	///
	/// If the field's identifier isn't allowed to hold multiple values, this behaves like
	/// [`TagContainer::set`].
	pub fn add(&mut self, field: V) {
		self.debug_assert_value_kind(&field);
		if !self.registry.allows_multiple(field.id()) {
			self.set(field);
			return;
		}

		match self.position(field.id()) {
			Some(index) => self.entries[index].1.push(field),
			None => self.entries.push((FieldId::Owned(field.id().to_owned()), vec![field])),
		}
	}

	/// Set a field, replacing every existing value of its identifier
	///
	/// The identifier keeps its original position.
	pub fn set(&mut self, field: V) {
		self.debug_assert_value_kind(&field);
		match self.position(field.id()) {
			Some(index) => self.entries[index].1 = vec![field],
			None => self.entries.push((FieldId::Owned(field.id().to_owned()), vec![field])),
		}
	}

	/// Insert a field read from a file
	///
	/// Unlike [`TagContainer::add`], a repeated single-valued identifier doesn't replace the
	/// existing value. The first occurrence is kept, and the rest are discarded.
	pub(crate) fn push_read(&mut self, field: V) {
		match self.position(field.id()) {
			Some(index) => {
				if self.registry.allows_multiple(field.id()) {
					self.entries[index].1.push(field);
				} else {
					log::warn!(
						"Discarding repeated value of single-valued field \"{}\"",
						field.id()
					);
				}
			},
			None => self.entries.push((FieldId::Owned(field.id().to_owned()), vec![field])),
		}
	}

	/// All values of an identifier, in insertion order
	///
	/// Unknown identifiers produce an empty slice.
	pub fn get(&self, id: &str) -> &[V] {
		match self.position(id) {
			Some(index) => &self.entries[index].1,
			None => &[],
		}
	}

	/// The first value of an identifier
	pub fn get_first(&self, id: &str) -> Option<&V> {
		self.get(id).first()
	}

	/// A mutable reference to the first value of an identifier
	pub fn get_first_mut(&mut self, id: &str) -> Option<&mut V> {
		let index = self.position(id)?;
		self.entries[index].1.first_mut()
	}

	/// Whether any value is stored under `id`
	pub fn contains(&self, id: &str) -> bool {
		self.position(id).is_some()
	}

	/// Remove and return every value of an identifier
	pub fn delete(&mut self, id: &str) -> Vec<V> {
		match self.position(id) {
			Some(index) => self.entries.remove(index).1,
			None => Vec::new(),
		}
	}

	/// Retains only the fields matching the predicate
	///
	/// Identifiers left with no values are removed.
	pub fn retain<F>(&mut self, mut f: F)
	where
		F: FnMut(&V) -> bool,
	{
		for (_, values) in &mut self.entries {
			values.retain(&mut f);
		}

		self.entries.retain(|(_, values)| !values.is_empty());
	}

	/// Consumes the container, returning every stored field in iteration order
	pub fn into_fields(self) -> impl Iterator<Item = V> {
		self.entries.into_iter().flat_map(|(_, values)| values)
	}

	/// Removes every field
	pub fn clear(&mut self) {
		self.entries.clear();
	}

	/// The stored identifiers, in the order they were first inserted
	pub fn ids(&self) -> impl Iterator<Item = &str> + Clone {
		self.entries.iter().map(|(id, _)| &**id)
	}

	/// Iterates over every stored field
	///
	/// The iterator is lazy and can be restarted by cloning it.
	pub fn fields(&self) -> Fields<'_, V> {
		Fields {
			entries: self.entries.iter(),
			current: [].iter(),
		}
	}

	/// The total number of stored fields
	pub fn len(&self) -> usize {
		self.entries.iter().map(|(_, values)| values.len()).sum()
	}

	/// Whether the container holds no fields
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// An iterator over the fields of a [`TagContainer`]
///
/// See [`TagContainer::fields`]
#[derive(Debug)]
pub struct Fields<'a, V> {
	entries: std::slice::Iter<'a, (FieldId, Vec<V>)>,
	current: std::slice::Iter<'a, V>,
}

impl<V> Clone for Fields<'_, V> {
	fn clone(&self) -> Self {
		Self {
			entries: self.entries.clone(),
			current: self.current.clone(),
		}
	}
}

impl<'a, V> Iterator for Fields<'a, V> {
	type Item = &'a V;

	fn next(&mut self) -> Option<Self::Item> {
		loop {
			if let Some(field) = self.current.next() {
				return Some(field);
			}

			let (_, values) = self.entries.next()?;
			self.current = values.iter();
		}
	}
}
