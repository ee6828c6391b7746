use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::io;

/// Alias for `Result<T, PageError>`
pub type Result<T> = std::result::Result<T, PageError>;

/// Failures while reading, building or paginating [`Page`](crate::Page)s
#[derive(Debug)]
pub enum PageError {
	/// A page header declares a stream structure version other than 0
	InvalidVersion,
	/// A page header declares zero segments
	BadSegmentCount,
	/// No `OggS` capture pattern where a page should start
	MissingMagic,
	/// More content than a single page (255 segments) can describe
	TooMuchData,
	/// The stream ended before the expected number of packets were complete
	NotEnoughData,
	/// The segment table describes more content than the page holds
	ContentSizeMismatch,
	/// An error from the underlying reader or writer
	Io(io::Error),
}

impl Display for PageError {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let message = match self {
			Self::InvalidVersion => "Unsupported stream structure version (expected 0)",
			Self::BadSegmentCount => "Page declares no segments",
			Self::MissingMagic => "Page is missing its \"OggS\" capture pattern",
			Self::TooMuchData => "Content does not fit in a single page",
			Self::NotEnoughData => "Stream ended before all expected packets were read",
			Self::ContentSizeMismatch => "Page content does not match its segment table",
			Self::Io(err) => return write!(f, "{err}"),
		};

		f.write_str(message)
	}
}

impl Error for PageError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		if let Self::Io(err) = self {
			return Some(err);
		}

		None
	}
}

impl From<io::Error> for PageError {
	fn from(err: io::Error) -> Self {
		Self::Io(err)
	}
}
