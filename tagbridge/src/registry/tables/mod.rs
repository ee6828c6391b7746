//! The static tables each [`IdentifierRegistry`](super::IdentifierRegistry) is built from

pub(crate) mod asf;
pub(crate) mod id3v23;
pub(crate) mod id3v24;
pub(crate) mod mp4;
pub(crate) mod vorbis;
