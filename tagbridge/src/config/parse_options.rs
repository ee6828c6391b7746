/// Options to control how tags are parsed
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct ParseOptions {
	pub(crate) parsing_mode: ParsingMode,
	pub(crate) max_comment_pages: u32,
	pub(crate) max_comment_size: usize,
	pub(crate) allocation_limit: usize,
}

impl Default for ParseOptions {
	/// The default implementation for `ParseOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// ParseOptions {
	/// 	parsing_mode: ParsingMode::BestAttempt,
	/// 	max_comment_pages: 256,
	/// 	max_comment_size: 16 * 1024 * 1024,
	/// 	allocation_limit: 16 * 1024 * 1024,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}

impl ParseOptions {
	/// Default parsing mode
	pub const DEFAULT_PARSING_MODE: ParsingMode = ParsingMode::BestAttempt;

	/// Default number of pages a single comment packet may span
	pub const DEFAULT_MAX_COMMENT_PAGES: u32 = 256;

	/// Default size ceiling of a reassembled comment packet
	pub const DEFAULT_MAX_COMMENT_SIZE: usize = 16 * 1024 * 1024;

	/// Default ceiling for any single length-prefixed allocation
	pub const DEFAULT_ALLOCATION_LIMIT: usize = 16 * 1024 * 1024;

	/// Creates a new `ParseOptions`, alias for `Default` implementation
	///
	/// See also: [`ParseOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use tagbridge::config::ParseOptions;
	///
	/// let parsing_options = ParseOptions::new();
	/// ```
	#[must_use]
	pub const fn new() -> Self {
		Self {
			parsing_mode: Self::DEFAULT_PARSING_MODE,
			max_comment_pages: Self::DEFAULT_MAX_COMMENT_PAGES,
			max_comment_size: Self::DEFAULT_MAX_COMMENT_SIZE,
			allocation_limit: Self::DEFAULT_ALLOCATION_LIMIT,
		}
	}

	/// The parsing mode to use, see [`ParsingMode`] for details
	///
	/// # Examples
	///
	/// ```rust
	/// use tagbridge::config::{ParseOptions, ParsingMode};
	///
	/// // By default, `parsing_mode` is ParsingMode::BestAttempt. Here, we need absolute correctness.
	/// let parsing_options = ParseOptions::new().parsing_mode(ParsingMode::Strict);
	/// ```
	pub const fn parsing_mode(mut self, parsing_mode: ParsingMode) -> Self {
		self.parsing_mode = parsing_mode;
		self
	}

	/// The maximum number of pages an OGG comment packet may span
	///
	/// This counts the page the packet starts on. A packet still incomplete after this many
	/// pages is treated as never terminating.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagbridge::config::ParseOptions;
	///
	/// // My files never have more than a handful of comments
	/// let parsing_options = ParseOptions::new().max_comment_pages(8);
	/// ```
	pub const fn max_comment_pages(mut self, max_comment_pages: u32) -> Self {
		self.max_comment_pages = max_comment_pages;
		self
	}

	/// The maximum size in bytes of a reassembled OGG comment packet
	pub const fn max_comment_size(mut self, max_comment_size: usize) -> Self {
		self.max_comment_size = max_comment_size;
		self
	}

	/// The maximum size of any single allocation driven by a length read from the input
	///
	/// Inputs declaring larger items fail with [`ErrorKind::TooMuchData`](crate::error::ErrorKind::TooMuchData).
	pub const fn allocation_limit(mut self, allocation_limit: usize) -> Self {
		self.allocation_limit = allocation_limit;
		self
	}
}

/// The parsing strictness mode
///
/// This can be set with [`ParseOptions::parsing_mode`].
///
/// # Examples
///
/// ```rust
/// use tagbridge::config::{ParseOptions, ParsingMode};
///
/// let parsing_options = ParseOptions::new().parsing_mode(ParsingMode::Relaxed);
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
#[non_exhaustive]
pub enum ParsingMode {
	/// Will eagerly error on invalid input
	///
	/// Any malformed frame, descriptor, comment or atom discards the entire tag.
	Strict,
	/// Default mode, less eager to error on recoverably malformed input
	///
	/// Malformed units are skipped with a warning, provided the structure around them
	/// is intact.
	#[default]
	BestAttempt,
	/// Least eager to error, may produce partial output
	///
	/// In addition to skipping malformed units, declared sizes that overrun their container
	/// are clamped to the remaining data.
	Relaxed,
}
