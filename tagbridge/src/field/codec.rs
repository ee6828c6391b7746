//! Primitive layouts shared by the field types

/// A byte field that extends to the end of its buffer
///
/// There is no length prefix or terminator: the field's size is whatever remains of the
/// enclosing frame or atom.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SizeTerminatedBytes(Vec<u8>);

impl SizeTerminatedBytes {
	/// Creates a field holding `bytes`
	pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
		Self(bytes.into())
	}

	/// Consumes everything from `offset` to the end of `buf`
	///
	/// An `offset` at or past the end of the buffer produces an empty value.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagbridge::field::SizeTerminatedBytes;
	///
	/// let buf = [1, 2, 3, 4];
	///
	/// assert_eq!(SizeTerminatedBytes::read(&buf, 1).as_bytes(), &[2, 3, 4]);
	/// assert!(SizeTerminatedBytes::read(&buf, 10).is_empty());
	/// ```
	pub fn read(buf: &[u8], offset: usize) -> Self {
		match buf.get(offset..) {
			Some(rest) => Self(rest.to_vec()),
			None => Self::default(),
		}
	}

	/// Writes the stored bytes, exactly as they are
	pub fn write_to(&self, out: &mut Vec<u8>) {
		out.extend_from_slice(&self.0);
	}

	/// The stored bytes
	pub fn as_bytes(&self) -> &[u8] {
		&self.0
	}

	/// The number of stored bytes
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Whether the field is empty
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Consumes the field, returning the bytes
	pub fn into_inner(self) -> Vec<u8> {
		self.0
	}
}

impl From<Vec<u8>> for SizeTerminatedBytes {
	fn from(input: Vec<u8>) -> Self {
		Self(input)
	}
}

#[cfg(test)]
mod tests {
	use super::SizeTerminatedBytes;

	#[test_log::test]
	fn offset_at_end_is_empty() {
		let buf = [0xAA, 0xBB];
		assert!(SizeTerminatedBytes::read(&buf, 2).is_empty());
		assert!(SizeTerminatedBytes::read(&[], 0).is_empty());
	}

	#[test_log::test]
	fn write_emits_no_prefix() {
		let field = SizeTerminatedBytes::read(b"\x00\x01PRIVATE", 2);

		let mut out = vec![0xFF];
		field.write_to(&mut out);
		assert_eq!(out, b"\xFFPRIVATE");
	}
}
