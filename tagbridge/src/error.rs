//! Contains the errors that can arise within tagbridge
//!
//! The primary error is [`TagError`]. The type of error is determined by [`ErrorKind`],
//! which can be extended at any time.

use crate::registry::FieldKey;
use crate::tag::TagFormat;
pub use crate::util::text::TextEncodingError;

use std::collections::TryReserveError;
use std::fmt::{Debug, Display, Formatter};

use ogg_pager::PageError;

/// Alias for `Result<T, TagError>`
pub type Result<T> = std::result::Result<T, TagError>;

/// The types of errors that can occur
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
	/// Structural validation failed while reading, see [`CannotReadError`]
	///
	/// This is always fatal to the current read.
	CannotRead(CannotReadError),
	/// A value does not satisfy the content constraints of its field
	///
	/// This is raised while constructing the field, before the tag is touched.
	InvalidFieldData(&'static str),
	/// Text cannot be represented in the character set(s) the target allows
	UnsupportedEncoding(TextEncodingError),
	/// The generic key has no mapping in the target format
	KeyNotFound(FieldKey),
	/// A format-specific operation was attempted on a tag that only aliases its fields
	IllegalState(&'static str),

	/// Attempting to read/write an abnormally large amount of data
	TooMuchData,
	/// Expected the data to be a different size than provided
	///
	/// This occurs when the size of an item is written as one value, but that size is either too
	/// big or small to be valid within the bounds of that item.
	SizeMismatch,
	/// Errors that arise while decoding text
	TextDecode(&'static str),
	/// Arises when an ID3v2 frame ID contains invalid characters
	BadFrameId(Vec<u8>),
	/// Arises when an atom contains invalid data
	BadAtom(&'static str),

	// Conversions for external errors
	/// Errors that arise while parsing OGG pages
	OggPage(PageError),
	/// Unable to convert bytes to a String
	StringFromUtf8(std::string::FromUtf8Error),
	/// Represents all cases of [`std::io::Error`].
	Io(std::io::Error),
	/// Failure to allocate enough memory
	Alloc(TryReserveError),
}

/// The structural problem behind a [`CannotReadError`]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CannotReadKind {
	/// A magic signature or capture pattern did not match
	MissingSignature,
	/// The input ended before a structure was complete
	Truncated,
	/// A packet kept spanning pages past the configured page or size ceiling
	PacketNeverTerminated,
	/// Any other malformed structure
	Malformed(&'static str),
}

impl Display for CannotReadKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::MissingSignature => write!(f, "missing or invalid signature"),
			Self::Truncated => write!(f, "unexpected end of data"),
			Self::PacketNeverTerminated => write!(f, "comment packet never terminated"),
			Self::Malformed(description) => write!(f, "{description}"),
		}
	}
}

/// An error that arises while reading a tag
pub struct CannotReadError {
	format: Option<TagFormat>,
	kind: CannotReadKind,
}

impl CannotReadError {
	/// Create a `CannotReadError` bound to a [`TagFormat`]
	#[must_use]
	pub const fn new(format: TagFormat, kind: CannotReadKind) -> Self {
		Self {
			format: Some(format),
			kind,
		}
	}

	/// Create a `CannotReadError` without binding it to a [`TagFormat`]
	#[must_use]
	pub const fn from_kind(kind: CannotReadKind) -> Self {
		Self { format: None, kind }
	}

	/// Returns the associated [`TagFormat`], if one exists
	pub fn format(&self) -> Option<TagFormat> {
		self.format
	}

	/// Returns the [`CannotReadKind`]
	pub fn kind(&self) -> CannotReadKind {
		self.kind
	}
}

impl Debug for CannotReadError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if let Some(format) = self.format {
			write!(f, "{:?}: {:?}", format, self.kind)
		} else {
			write!(f, "{:?}", self.kind)
		}
	}
}

impl Display for CannotReadError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if let Some(format) = self.format {
			write!(f, "{:?}: {}", format, self.kind)
		} else {
			write!(f, "{}", self.kind)
		}
	}
}

/// Errors that could occur within tagbridge
pub struct TagError {
	pub(crate) kind: ErrorKind,
}

impl TagError {
	/// Create a `TagError` from an [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use tagbridge::error::{ErrorKind, TagError};
	///
	/// let too_much_data = TagError::new(ErrorKind::TooMuchData);
	/// ```
	#[must_use]
	pub const fn new(kind: ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use tagbridge::error::{ErrorKind, TagError};
	///
	/// let error = TagError::new(ErrorKind::InvalidFieldData("not a number"));
	/// if let ErrorKind::InvalidFieldData(reason) = error.kind() {
	/// 	println!("Bad value: {reason}");
	/// }
	/// ```
	pub fn kind(&self) -> &ErrorKind {
		&self.kind
	}

	/// Returns the [`CannotReadKind`] if this is a read failure
	pub fn cannot_read_kind(&self) -> Option<CannotReadKind> {
		match &self.kind {
			ErrorKind::CannotRead(err) => Some(err.kind()),
			_ => None,
		}
	}
}

impl std::error::Error for TagError {}

impl Debug for TagError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.kind)
	}
}

impl From<CannotReadError> for TagError {
	fn from(input: CannotReadError) -> Self {
		Self {
			kind: ErrorKind::CannotRead(input),
		}
	}
}

impl From<TextEncodingError> for TagError {
	fn from(input: TextEncodingError) -> Self {
		Self {
			kind: ErrorKind::UnsupportedEncoding(input),
		}
	}
}

impl From<PageError> for TagError {
	fn from(input: PageError) -> Self {
		Self {
			kind: ErrorKind::OggPage(input),
		}
	}
}

impl From<std::io::Error> for TagError {
	fn from(input: std::io::Error) -> Self {
		Self {
			kind: ErrorKind::Io(input),
		}
	}
}

impl From<std::string::FromUtf8Error> for TagError {
	fn from(input: std::string::FromUtf8Error) -> Self {
		Self {
			kind: ErrorKind::StringFromUtf8(input),
		}
	}
}

impl From<TryReserveError> for TagError {
	fn from(input: TryReserveError) -> Self {
		Self {
			kind: ErrorKind::Alloc(input),
		}
	}
}

impl Display for TagError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.kind {
			// Conversions
			ErrorKind::OggPage(ref err) => write!(f, "{err}"),
			ErrorKind::StringFromUtf8(ref err) => write!(f, "{err}"),
			ErrorKind::Io(ref err) => write!(f, "{err}"),
			ErrorKind::Alloc(ref err) => write!(f, "{err}"),

			ErrorKind::CannotRead(ref err) => write!(f, "Cannot read tag: {err}"),
			ErrorKind::InvalidFieldData(message) => write!(f, "Invalid field data: {message}"),
			ErrorKind::UnsupportedEncoding(ref err) => write!(f, "Unsupported encoding: {err}"),
			ErrorKind::KeyNotFound(key) => {
				write!(f, "No mapping exists for the key {key:?} in this format")
			},
			ErrorKind::IllegalState(message) => write!(f, "Illegal state: {message}"),

			ErrorKind::TooMuchData => write!(
				f,
				"Attempted to read/write an abnormally large amount of data"
			),
			ErrorKind::SizeMismatch => write!(
				f,
				"Encountered an invalid item size, either too big or too small to be valid"
			),
			ErrorKind::TextDecode(message) => write!(f, "Text decoding: {message}"),
			ErrorKind::BadFrameId(ref frame_id) => {
				write!(f, "ID3v2: Failed to parse a frame ID: 0x{frame_id:x?}")
			},
			ErrorKind::BadAtom(message) => write!(f, "MP4 Atom: {message}"),
		}
	}
}
