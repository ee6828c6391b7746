use crate::registry::{FieldKey, RegistryTable};
use crate::tag::TagFormat;

pub(crate) static TABLE: RegistryTable = RegistryTable {
	format: TagFormat::Asf,
	supported: &[
		// Content description object
		("TITLE", "Title"),
		("AUTHOR", "Author"),
		("COPYRIGHT", "Copyright"),
		("DESCRIPTION", "Description"),
		("RATING", "Rating"),
		// Extended content description object
		("ASIN", "Amazon standard identification number"),
		("IsVBR", "Variable bit rate flag"),
		("MusicBrainz/Album Artist Id", "MusicBrainz release artist id"),
		("MusicBrainz/Album Id", "MusicBrainz release id"),
		("MusicBrainz/Artist Id", "MusicBrainz artist id"),
		("MusicBrainz/Release Group Id", "MusicBrainz release group id"),
		("WM/AlbumArtist", "Album artist"),
		("WM/AlbumArtistSortOrder", "Album artist sort order"),
		("WM/AlbumSortOrder", "Album title sort order"),
		("WM/AlbumTitle", "Album title"),
		("WM/ArtistSortOrder", "Artist sort order"),
		("WM/AuthorURL", "Official artist site"),
		("WM/Barcode", "Release barcode"),
		("WM/BeatsPerMinute", "Beats per minute"),
		("WM/CatalogNo", "Label catalog number"),
		("WM/Composer", "Composer"),
		("WM/ComposerSortOrder", "Composer sort order"),
		("WM/Conductor", "Conductor"),
		("WM/ContentGroupDescription", "Content group"),
		("WM/EncodedBy", "Person or organisation that encoded the file"),
		("WM/EncodingTime", "Encoding time"),
		("WM/Genre", "Genre"),
		("WM/InitialKey", "Initial key"),
		("WM/ISRC", "International standard recording code"),
		("WM/IsCompilation", "Part of a compilation"),
		("WM/Language", "Language"),
		("WM/Lyrics", "Lyrics"),
		("WM/MCDI", "Music CD identifier"),
		("WM/Media", "Source media"),
		("WM/ModifiedBy", "Remixer"),
		("WM/Mood", "Mood"),
		("WM/OriginalAlbumTitle", "Original album title"),
		("WM/OriginalArtist", "Original artist"),
		("WM/OriginalLyricist", "Original lyricist"),
		("WM/OriginalReleaseYear", "Original release year"),
		("WM/PartOfSet", "Disc number"),
		("WM/Picture", "Attached picture"),
		("WM/Producer", "Producer"),
		("WM/Publisher", "Publisher"),
		("WM/Script", "Script"),
		("WM/SharedUserRating", "User rating"),
		("WM/SubTitle", "Track subtitle"),
		("WM/TitleSortOrder", "Title sort order"),
		("WM/ToolName", "Encoding software"),
		("WM/TrackNumber", "Track number"),
		("WM/Writer", "Lyricist"),
		("WM/Year", "Year"),
	],
	extension: &["ASIN", "WM/Barcode", "WM/Script"],
	common: &[
		"WM/AlbumTitle",
		"AUTHOR",
		"DESCRIPTION",
		"WM/Genre",
		"TITLE",
		"WM/TrackNumber",
		"WM/Year",
	],
	binary: &["WM/Picture", "WM/MCDI"],
	url: &["WM/AuthorURL"],
	multi_value: &[
		"WM/AlbumArtist",
		"WM/Composer",
		"WM/Conductor",
		"WM/Genre",
		"WM/Mood",
		"WM/Picture",
		"WM/Producer",
		"WM/Writer",
		"MusicBrainz/Artist Id",
	],
	discard_on_alter: &[],
	keyed_by_description: &[],
	mappings: &[
		(FieldKey::Album, "WM/AlbumTitle"),
		(FieldKey::AlbumArtist, "WM/AlbumArtist"),
		(FieldKey::AlbumArtistSort, "WM/AlbumArtistSortOrder"),
		(FieldKey::AlbumSort, "WM/AlbumSortOrder"),
		(FieldKey::AmazonId, "ASIN"),
		(FieldKey::Artist, "AUTHOR"),
		(FieldKey::ArtistSort, "WM/ArtistSortOrder"),
		(FieldKey::Barcode, "WM/Barcode"),
		(FieldKey::Bpm, "WM/BeatsPerMinute"),
		(FieldKey::CatalogNumber, "WM/CatalogNo"),
		(FieldKey::Comment, "DESCRIPTION"),
		(FieldKey::Compilation, "WM/IsCompilation"),
		(FieldKey::Composer, "WM/Composer"),
		(FieldKey::ComposerSort, "WM/ComposerSortOrder"),
		(FieldKey::Conductor, "WM/Conductor"),
		(FieldKey::Copyright, "COPYRIGHT"),
		(FieldKey::CoverArt, "WM/Picture"),
		(FieldKey::DiscNumber, "WM/PartOfSet"),
		(FieldKey::EncodedBy, "WM/EncodedBy"),
		(FieldKey::Encoder, "WM/ToolName"),
		(FieldKey::Genre, "WM/Genre"),
		(FieldKey::Grouping, "WM/ContentGroupDescription"),
		(FieldKey::Isrc, "WM/ISRC"),
		(FieldKey::Key, "WM/InitialKey"),
		(FieldKey::Language, "WM/Language"),
		(FieldKey::Lyricist, "WM/Writer"),
		(FieldKey::Lyrics, "WM/Lyrics"),
		(FieldKey::Media, "WM/Media"),
		(FieldKey::Mood, "WM/Mood"),
		(FieldKey::MusicBrainzArtistId, "MusicBrainz/Artist Id"),
		(
			FieldKey::MusicBrainzReleaseArtistId,
			"MusicBrainz/Album Artist Id",
		),
		(
			FieldKey::MusicBrainzReleaseGroupId,
			"MusicBrainz/Release Group Id",
		),
		(FieldKey::MusicBrainzReleaseId, "MusicBrainz/Album Id"),
		(FieldKey::OriginalAlbum, "WM/OriginalAlbumTitle"),
		(FieldKey::OriginalArtist, "WM/OriginalArtist"),
		(FieldKey::OriginalLyricist, "WM/OriginalLyricist"),
		(FieldKey::OriginalYear, "WM/OriginalReleaseYear"),
		(FieldKey::Producer, "WM/Producer"),
		(FieldKey::Publisher, "WM/Publisher"),
		(FieldKey::Rating, "RATING"),
		(FieldKey::Remixer, "WM/ModifiedBy"),
		(FieldKey::Script, "WM/Script"),
		(FieldKey::Subtitle, "WM/SubTitle"),
		(FieldKey::Title, "TITLE"),
		(FieldKey::TitleSort, "WM/TitleSortOrder"),
		(FieldKey::TrackNumber, "WM/TrackNumber"),
		(FieldKey::UrlOfficialArtistSite, "WM/AuthorURL"),
		(FieldKey::Year, "WM/Year"),
	],
	pairs: &[],
	open_ended: true,
};
