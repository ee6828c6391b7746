/// Options to control how tags are written
///
/// This acts as a dumping ground for format-specific settings, and is handed to the tags that
/// consult it when they are created.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct WriteOptions {
	pub(crate) preferred_padding: Option<u32>,
	pub(crate) write_mp4_genres_as_text: bool,
}

impl WriteOptions {
	/// Default preferred padding size in bytes
	pub const DEFAULT_PREFERRED_PADDING: u32 = 1024;

	/// Creates a new `WriteOptions`, alias for `Default` implementation
	///
	/// See also: [`WriteOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use tagbridge::config::WriteOptions;
	///
	/// let write_options = WriteOptions::new();
	/// ```
	pub const fn new() -> Self {
		Self {
			preferred_padding: Some(Self::DEFAULT_PREFERRED_PADDING),
			write_mp4_genres_as_text: false,
		}
	}

	/// Set the preferred padding size in bytes
	///
	/// Only ID3v2 tags are padded. A size of 0 disables padding.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagbridge::config::WriteOptions;
	///
	/// // Leave room for a cover art to be added later
	/// let options = WriteOptions::new().preferred_padding(64 * 1024);
	///
	/// // Tags written for a size-constrained device
	/// let options = WriteOptions::new().preferred_padding(0);
	/// ```
	pub const fn preferred_padding(mut self, preferred_padding: u32) -> Self {
		self.preferred_padding = if preferred_padding == 0 {
			None
		} else {
			Some(preferred_padding)
		};
		self
	}

	/// Whether to always store MP4 genres as free text
	///
	/// By default, a genre from the ID3v1 genre list is stored in the numeric `gnre` atom, and
	/// anything else in `©gen`. With this set, `©gen` is used for everything.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagbridge::config::WriteOptions;
	///
	/// let options = WriteOptions::new().write_mp4_genres_as_text(true);
	/// ```
	pub const fn write_mp4_genres_as_text(mut self, write_mp4_genres_as_text: bool) -> Self {
		self.write_mp4_genres_as_text = write_mp4_genres_as_text;
		self
	}
}

impl Default for WriteOptions {
	/// The default implementation for `WriteOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// WriteOptions {
	///     preferred_padding: 1024,
	///     write_mp4_genres_as_text: false,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}
