use crate::registry::{FieldKey, RegistryTable};
use crate::tag::TagFormat;

pub(crate) static TABLE: RegistryTable = RegistryTable {
	format: TagFormat::VorbisComments,
	supported: &[
		("ALBUM", "Album title"),
		("ALBUMARTIST", "Album artist"),
		("ALBUMARTISTSORT", "Album artist sort order"),
		("ALBUMSORT", "Album title sort order"),
		("ARRANGER", "Arranger"),
		("ARTIST", "Track artist"),
		("ARTISTS", "Every credited artist"),
		("ARTISTSORT", "Track artist sort order"),
		("ASIN", "Amazon standard identification number"),
		("BARCODE", "Release barcode"),
		("BPM", "Beats per minute"),
		("CATALOGNUMBER", "Label catalog number"),
		("COMMENT", "Comment"),
		("COMPILATION", "Part of a compilation"),
		("COMPOSER", "Composer"),
		("COMPOSERSORT", "Composer sort order"),
		("CONDUCTOR", "Conductor"),
		("CONTACT", "Contact information for the creators or distributors"),
		("COPYRIGHT", "Copyright attribution"),
		("DATE", "Recording date"),
		("DESCRIPTION", "Short description of the contents"),
		("DISCNUMBER", "Disc number"),
		("DISCTOTAL", "Total number of discs"),
		("DJMIXER", "DJ mixer"),
		("ENCODEDBY", "Person or organisation that encoded the file"),
		("ENCODER", "Encoding software"),
		("ENGINEER", "Engineer"),
		("GENRE", "Genre"),
		("GROUPING", "Content group"),
		("ISRC", "International standard recording code"),
		("KEY", "Initial key"),
		("LABEL", "Record label"),
		("LANGUAGE", "Language of the lyrics"),
		("LOCATION", "Recording location"),
		("LYRICIST", "Lyricist"),
		("LYRICS", "Lyrics"),
		("MEDIA", "Source media"),
		("METADATA_BLOCK_PICTURE", "Base64 encoded FLAC picture block"),
		("MIXER", "Mixer"),
		("MOOD", "Mood"),
		("MUSICBRAINZ_ALBUMARTISTID", "MusicBrainz release artist id"),
		("MUSICBRAINZ_ALBUMID", "MusicBrainz release id"),
		("MUSICBRAINZ_ARTISTID", "MusicBrainz artist id"),
		("MUSICBRAINZ_RELEASEGROUPID", "MusicBrainz release group id"),
		("ORGANIZATION", "Producing organisation or record label"),
		("ORIGINALALBUM", "Original album title"),
		("ORIGINALARTIST", "Original artist"),
		("ORIGINALLYRICIST", "Original lyricist"),
		("ORIGINALYEAR", "Original release year"),
		("PERFORMER", "Performer"),
		("PRODUCER", "Producer"),
		("RATING", "Rating"),
		("RELEASECOUNTRY", "Release country"),
		("REMIXER", "Remixer"),
		("SCRIPT", "Script the text is written in"),
		("SUBTITLE", "Track subtitle"),
		("TITLE", "Track title"),
		("TITLESORT", "Track title sort order"),
		("TRACKNUMBER", "Track number"),
		("TRACKTOTAL", "Total number of tracks"),
		("URL_LYRICS_SITE", "Lyrics site URL"),
		("URL_OFFICIAL_ARTIST_SITE", "Official artist site URL"),
		("URL_OFFICIAL_RELEASE_SITE", "Official release site URL"),
		("VERSION", "Version of the track"),
	],
	extension: &[
		"ALBUMARTIST",
		"ALBUMARTISTSORT",
		"ALBUMSORT",
		"ARTISTSORT",
		"COMPOSERSORT",
		"TITLESORT",
		"METADATA_BLOCK_PICTURE",
	],
	common: &[
		"ALBUM",
		"ARTIST",
		"COMMENT",
		"DATE",
		"GENRE",
		"TITLE",
		"TRACKNUMBER",
	],
	binary: &["METADATA_BLOCK_PICTURE"],
	url: &[],
	multi_value: &[
		"ALBUM",
		"ALBUMARTIST",
		"ARRANGER",
		"ARTIST",
		"ARTISTS",
		"COMMENT",
		"COMPOSER",
		"CONDUCTOR",
		"CONTACT",
		"COPYRIGHT",
		"DESCRIPTION",
		"DJMIXER",
		"ENGINEER",
		"GENRE",
		"GROUPING",
		"ISRC",
		"LABEL",
		"LANGUAGE",
		"LOCATION",
		"LYRICIST",
		"METADATA_BLOCK_PICTURE",
		"MIXER",
		"MOOD",
		"MUSICBRAINZ_ALBUMARTISTID",
		"MUSICBRAINZ_ARTISTID",
		"ORGANIZATION",
		"PERFORMER",
		"PRODUCER",
		"REMIXER",
		"TITLE",
		"VERSION",
	],
	discard_on_alter: &[],
	keyed_by_description: &[],
	mappings: &[
		(FieldKey::Album, "ALBUM"),
		(FieldKey::AlbumArtist, "ALBUMARTIST"),
		(FieldKey::AlbumArtistSort, "ALBUMARTISTSORT"),
		(FieldKey::AlbumSort, "ALBUMSORT"),
		(FieldKey::AmazonId, "ASIN"),
		(FieldKey::Arranger, "ARRANGER"),
		(FieldKey::Artist, "ARTIST"),
		(FieldKey::ArtistSort, "ARTISTSORT"),
		(FieldKey::Artists, "ARTISTS"),
		(FieldKey::Barcode, "BARCODE"),
		(FieldKey::Bpm, "BPM"),
		(FieldKey::CatalogNumber, "CATALOGNUMBER"),
		(FieldKey::Comment, "COMMENT"),
		(FieldKey::Compilation, "COMPILATION"),
		(FieldKey::Composer, "COMPOSER"),
		(FieldKey::ComposerSort, "COMPOSERSORT"),
		(FieldKey::Conductor, "CONDUCTOR"),
		(FieldKey::Copyright, "COPYRIGHT"),
		(FieldKey::Country, "RELEASECOUNTRY"),
		(FieldKey::CoverArt, "METADATA_BLOCK_PICTURE"),
		(FieldKey::DiscNumber, "DISCNUMBER"),
		(FieldKey::DiscTotal, "DISCTOTAL"),
		(FieldKey::DjMixer, "DJMIXER"),
		(FieldKey::EncodedBy, "ENCODEDBY"),
		(FieldKey::Encoder, "ENCODER"),
		(FieldKey::Engineer, "ENGINEER"),
		(FieldKey::Genre, "GENRE"),
		(FieldKey::Grouping, "GROUPING"),
		(FieldKey::Isrc, "ISRC"),
		(FieldKey::Key, "KEY"),
		(FieldKey::Language, "LANGUAGE"),
		(FieldKey::Lyricist, "LYRICIST"),
		(FieldKey::Lyrics, "LYRICS"),
		(FieldKey::Media, "MEDIA"),
		(FieldKey::Mixer, "MIXER"),
		(FieldKey::Mood, "MOOD"),
		(FieldKey::MusicBrainzArtistId, "MUSICBRAINZ_ARTISTID"),
		(
			FieldKey::MusicBrainzReleaseArtistId,
			"MUSICBRAINZ_ALBUMARTISTID",
		),
		(
			FieldKey::MusicBrainzReleaseGroupId,
			"MUSICBRAINZ_RELEASEGROUPID",
		),
		(FieldKey::MusicBrainzReleaseId, "MUSICBRAINZ_ALBUMID"),
		(FieldKey::OriginalAlbum, "ORIGINALALBUM"),
		(FieldKey::OriginalArtist, "ORIGINALARTIST"),
		(FieldKey::OriginalLyricist, "ORIGINALLYRICIST"),
		(FieldKey::OriginalYear, "ORIGINALYEAR"),
		(FieldKey::Producer, "PRODUCER"),
		(FieldKey::Publisher, "LABEL"),
		(FieldKey::Rating, "RATING"),
		(FieldKey::Remixer, "REMIXER"),
		(FieldKey::Script, "SCRIPT"),
		(FieldKey::Subtitle, "SUBTITLE"),
		(FieldKey::Title, "TITLE"),
		(FieldKey::TitleSort, "TITLESORT"),
		(FieldKey::TrackNumber, "TRACKNUMBER"),
		(FieldKey::TrackTotal, "TRACKTOTAL"),
		(FieldKey::UrlLyricsSite, "URL_LYRICS_SITE"),
		(FieldKey::UrlOfficialArtistSite, "URL_OFFICIAL_ARTIST_SITE"),
		(FieldKey::UrlOfficialReleaseSite, "URL_OFFICIAL_RELEASE_SITE"),
		(FieldKey::Year, "DATE"),
	],
	pairs: &[],
	open_ended: true,
};
