//! Items for OGG container formats
//!
//! ## File notes
//!
//! Vorbis and Opus streams carry their tag as the second header packet, which may span any number
//! of pages. The packet is reassembled from its pages when read, and the header packets are
//! repaginated when written.

mod read;
mod reassemble;
mod tag;
mod write;

pub use tag::VorbisComments;

// Capture signatures of the comment header packet
pub(crate) const VORBIS_COMMENT_HEAD: &[u8] = b"\x03vorbis";
pub(crate) const OPUSTAGS: &[u8] = b"OpusTags";

// Capture signatures of the identification header packet
pub(crate) const VORBIS_IDENT_HEAD: &[u8] = b"\x01vorbis";
pub(crate) const OPUSHEAD: &[u8] = b"OpusHead";

/// The codec a comment packet belongs to
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum OggFormat {
	Vorbis,
	Opus,
}

impl OggFormat {
	pub(crate) fn comment_signature(self) -> &'static [u8] {
		match self {
			OggFormat::Vorbis => VORBIS_COMMENT_HEAD,
			OggFormat::Opus => OPUSTAGS,
		}
	}

	/// Detects the codec from the start of a comment packet
	pub(crate) fn from_comment_packet(packet: &[u8]) -> Option<Self> {
		[OggFormat::Vorbis, OggFormat::Opus]
			.into_iter()
			.find(|format| packet.starts_with(format.comment_signature()))
	}

	/// Detects the codec from the start of an identification packet
	pub(crate) fn from_ident_packet(packet: &[u8]) -> Option<Self> {
		if packet.starts_with(VORBIS_IDENT_HEAD) {
			return Some(OggFormat::Vorbis);
		}

		packet.starts_with(OPUSHEAD).then_some(OggFormat::Opus)
	}

	/// The number of header packets, including the identification header
	///
	/// Vorbis has a setup header following the comments, Opus doesn't.
	pub(crate) fn header_packet_count(self) -> usize {
		match self {
			OggFormat::Vorbis => 3,
			OggFormat::Opus => 2,
		}
	}

	/// Vorbis terminates its header packets with a framing bit
	pub(crate) fn has_framing_bit(self) -> bool {
		self == OggFormat::Vorbis
	}
}
