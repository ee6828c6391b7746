use std::fmt::{Display, Formatter};

// Generates `FieldKey`, along with `FieldKey::ALL` and the stable upper case names
//
// Usage:
//
// gen_field_keys!(
// 	/// Docs
// 	Variant => "NAME",
// );
macro_rules! gen_field_keys {
	(
		$(
			$(#[$variant_meta:meta])*
			$variant:ident => $name:literal
		),+ $(,)?
	) => {
		/// A generic, format-neutral representation of a field
		///
		/// Each format maps (a subset of) these keys to its own identifiers through its
		/// [`IdentifierRegistry`](crate::registry::IdentifierRegistry).
		#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
		#[non_exhaustive]
		pub enum FieldKey {
			$(
				$(#[$variant_meta])*
				$variant,
			)+
		}

		impl FieldKey {
			/// Every `FieldKey` variant, in declaration order
			pub const ALL: &'static [FieldKey] = &[$(FieldKey::$variant,)+];

			/// The stable upper case name of the key
			///
			/// # Examples
			///
			/// ```rust
			/// use tagbridge::registry::FieldKey;
			///
			/// assert_eq!(FieldKey::AlbumArtist.name(), "ALBUM_ARTIST");
			/// ```
			pub fn name(self) -> &'static str {
				match self {
					$(FieldKey::$variant => $name,)+
				}
			}

			/// Looks a key up by its [name](FieldKey::name), ignoring ASCII case
			pub fn from_name(name: &str) -> Option<Self> {
				$(
					if name.eq_ignore_ascii_case($name) {
						return Some(FieldKey::$variant);
					}
				)+

				None
			}
		}
	};
}

gen_field_keys!(
	/// Album title
	Album => "ALBUM",
	/// Album artist
	AlbumArtist => "ALBUM_ARTIST",
	/// Album artist sort order
	AlbumArtistSort => "ALBUM_ARTIST_SORT",
	/// Album title sort order
	AlbumSort => "ALBUM_SORT",
	/// Amazon standard identification number
	AmazonId => "AMAZON_ID",
	/// Arranger
	Arranger => "ARRANGER",
	/// Track artist
	Artist => "ARTIST",
	/// Track artist sort order
	ArtistSort => "ARTIST_SORT",
	/// Every artist credited on the track
	Artists => "ARTISTS",
	/// Release barcode
	Barcode => "BARCODE",
	/// Beats per minute
	Bpm => "BPM",
	/// Label catalog number
	CatalogNumber => "CATALOG_NO",
	/// Comment
	Comment => "COMMENT",
	/// Part of a compilation
	Compilation => "IS_COMPILATION",
	/// Composer
	Composer => "COMPOSER",
	/// Composer sort order
	ComposerSort => "COMPOSER_SORT",
	/// Conductor
	Conductor => "CONDUCTOR",
	/// Copyright message
	Copyright => "COPYRIGHT",
	/// Copyright and legal information URL
	CopyrightUrl => "URL_COPYRIGHT",
	/// Release country
	Country => "COUNTRY",
	/// Attached front cover
	CoverArt => "COVER_ART",
	/// Disc number
	DiscNumber => "DISC_NO",
	/// Total number of discs
	DiscTotal => "DISC_TOTAL",
	/// DJ mixer
	DjMixer => "DJMIXER",
	/// Person or organisation that encoded the file
	EncodedBy => "ENCODED_BY",
	/// Encoding software
	Encoder => "ENCODER",
	/// Engineer
	Engineer => "ENGINEER",
	/// Genre
	Genre => "GENRE",
	/// Content group
	Grouping => "GROUPING",
	/// Involved people list
	InvolvedPeople => "INVOLVED_PEOPLE",
	/// International standard recording code
	Isrc => "ISRC",
	/// Initial key
	Key => "KEY",
	/// Language of the lyrics
	Language => "LANGUAGE",
	/// Lyricist
	Lyricist => "LYRICIST",
	/// Unsynchronised lyrics
	Lyrics => "LYRICS",
	/// Source media
	Media => "MEDIA",
	/// Mixer
	Mixer => "MIXER",
	/// Mood
	Mood => "MOOD",
	/// MusicBrainz artist id
	MusicBrainzArtistId => "MUSICBRAINZ_ARTISTID",
	/// MusicBrainz release artist id
	MusicBrainzReleaseArtistId => "MUSICBRAINZ_RELEASEARTISTID",
	/// MusicBrainz release group id
	MusicBrainzReleaseGroupId => "MUSICBRAINZ_RELEASEGROUPID",
	/// MusicBrainz release id
	MusicBrainzReleaseId => "MUSICBRAINZ_RELEASEID",
	/// Original album title
	OriginalAlbum => "ORIGINAL_ALBUM",
	/// Original artist
	OriginalArtist => "ORIGINAL_ARTIST",
	/// Original lyricist
	OriginalLyricist => "ORIGINAL_LYRICIST",
	/// Original release year
	OriginalYear => "ORIGINAL_YEAR",
	/// Producer
	Producer => "PRODUCER",
	/// Publisher or record label
	Publisher => "RECORD_LABEL",
	/// Rating
	Rating => "RATING",
	/// Remixer
	Remixer => "REMIXER",
	/// Script the text is written in
	Script => "SCRIPT",
	/// Track subtitle
	Subtitle => "SUBTITLE",
	/// Track title
	Title => "TITLE",
	/// Track title sort order
	TitleSort => "TITLE_SORT",
	/// Track number
	TrackNumber => "TRACK",
	/// Total number of tracks
	TrackTotal => "TRACK_TOTAL",
	/// Lyrics site URL
	UrlLyricsSite => "URL_LYRICS_SITE",
	/// Official artist site URL
	UrlOfficialArtistSite => "URL_OFFICIAL_ARTIST_SITE",
	/// Official release site URL
	UrlOfficialReleaseSite => "URL_OFFICIAL_RELEASE_SITE",
	/// Recording year
	Year => "YEAR",
);

impl Display for FieldKey {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

#[cfg(test)]
mod tests {
	use super::FieldKey;

	#[test_log::test]
	fn names_are_unique() {
		for (i, key) in FieldKey::ALL.iter().enumerate() {
			for other in &FieldKey::ALL[i + 1..] {
				assert_ne!(key.name(), other.name());
			}
		}
	}

	#[test_log::test]
	fn lookup_by_name() {
		assert_eq!(FieldKey::from_name("disc_total"), Some(FieldKey::DiscTotal));
		assert_eq!(FieldKey::from_name("TRACK"), Some(FieldKey::TrackNumber));
		assert_eq!(FieldKey::from_name("NOT_A_KEY"), None);
	}
}
