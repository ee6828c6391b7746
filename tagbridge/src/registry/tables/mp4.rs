use crate::registry::{FieldKey, PairSlot, RegistryTable};
use crate::tag::TagFormat;

pub(crate) static TABLE: RegistryTable = RegistryTable {
	format: TagFormat::Mp4Ilst,
	supported: &[
		("\u{a9}alb", "Album"),
		("\u{a9}ART", "Artist"),
		("\u{a9}cmt", "Comment"),
		("\u{a9}day", "Release date"),
		("\u{a9}enc", "Encoded by"),
		("\u{a9}gen", "Genre, free text"),
		("\u{a9}grp", "Grouping"),
		("\u{a9}lyr", "Lyrics"),
		("\u{a9}nam", "Title"),
		("\u{a9}too", "Encoding software"),
		("\u{a9}wrt", "Composer"),
		("----", "Freeform"),
		("aART", "Album artist"),
		("covr", "Cover art"),
		("cpil", "Compilation flag"),
		("cprt", "Copyright"),
		("desc", "Description"),
		("disk", "Disc number"),
		("gnre", "Genre, ID3v1 index + 1"),
		("pgap", "Gapless playback flag"),
		("rtng", "Content rating"),
		("soaa", "Album artist sort order"),
		("soal", "Album sort order"),
		("soar", "Artist sort order"),
		("soco", "Composer sort order"),
		("sonm", "Title sort order"),
		("stik", "Media kind"),
		("tmpo", "Beats per minute"),
		("trkn", "Track number"),
	],
	extension: &["----"],
	common: &[
		"\u{a9}alb",
		"\u{a9}ART",
		"\u{a9}cmt",
		"\u{a9}day",
		"\u{a9}gen",
		"\u{a9}nam",
		"trkn",
	],
	binary: &["covr"],
	url: &[],
	multi_value: &["covr", "----"],
	discard_on_alter: &[],
	keyed_by_description: &[],
	mappings: &[
		(FieldKey::Album, "\u{a9}alb"),
		(FieldKey::AlbumArtist, "aART"),
		(FieldKey::AlbumArtistSort, "soaa"),
		(FieldKey::AlbumSort, "soal"),
		(FieldKey::AmazonId, "----:com.apple.iTunes:ASIN"),
		(FieldKey::Artist, "\u{a9}ART"),
		(FieldKey::ArtistSort, "soar"),
		(FieldKey::Artists, "----:com.apple.iTunes:ARTISTS"),
		(FieldKey::Barcode, "----:com.apple.iTunes:BARCODE"),
		(FieldKey::Bpm, "tmpo"),
		(FieldKey::CatalogNumber, "----:com.apple.iTunes:CATALOGNUMBER"),
		(FieldKey::Comment, "\u{a9}cmt"),
		(FieldKey::Compilation, "cpil"),
		(FieldKey::Composer, "\u{a9}wrt"),
		(FieldKey::ComposerSort, "soco"),
		(FieldKey::Conductor, "----:com.apple.iTunes:CONDUCTOR"),
		(FieldKey::Copyright, "cprt"),
		(
			FieldKey::Country,
			"----:com.apple.iTunes:MusicBrainz Album Release Country",
		),
		(FieldKey::CoverArt, "covr"),
		(FieldKey::DiscNumber, "disk"),
		(FieldKey::DiscTotal, "disk"),
		(FieldKey::EncodedBy, "\u{a9}enc"),
		(FieldKey::Encoder, "\u{a9}too"),
		(FieldKey::Genre, "\u{a9}gen"),
		(FieldKey::Genre, "gnre"),
		(FieldKey::Grouping, "\u{a9}grp"),
		(FieldKey::Isrc, "----:com.apple.iTunes:ISRC"),
		(FieldKey::Key, "----:com.apple.iTunes:initialkey"),
		(FieldKey::Language, "----:com.apple.iTunes:LANGUAGE"),
		(FieldKey::Lyricist, "----:com.apple.iTunes:LYRICIST"),
		(FieldKey::Lyrics, "\u{a9}lyr"),
		(FieldKey::Media, "----:com.apple.iTunes:MEDIA"),
		(FieldKey::Mood, "----:com.apple.iTunes:MOOD"),
		(
			FieldKey::MusicBrainzArtistId,
			"----:com.apple.iTunes:MusicBrainz Artist Id",
		),
		(
			FieldKey::MusicBrainzReleaseArtistId,
			"----:com.apple.iTunes:MusicBrainz Album Artist Id",
		),
		(
			FieldKey::MusicBrainzReleaseGroupId,
			"----:com.apple.iTunes:MusicBrainz Release Group Id",
		),
		(
			FieldKey::MusicBrainzReleaseId,
			"----:com.apple.iTunes:MusicBrainz Album Id",
		),
		(FieldKey::Producer, "----:com.apple.iTunes:PRODUCER"),
		(FieldKey::Publisher, "----:com.apple.iTunes:LABEL"),
		(FieldKey::Rating, "rtng"),
		(FieldKey::Remixer, "----:com.apple.iTunes:REMIXER"),
		(FieldKey::Script, "----:com.apple.iTunes:SCRIPT"),
		(FieldKey::Subtitle, "----:com.apple.iTunes:SUBTITLE"),
		(FieldKey::Title, "\u{a9}nam"),
		(FieldKey::TitleSort, "sonm"),
		(FieldKey::TrackNumber, "trkn"),
		(FieldKey::TrackTotal, "trkn"),
		(FieldKey::Year, "\u{a9}day"),
	],
	pairs: &[
		(FieldKey::TrackNumber, PairSlot::Ordinal),
		(FieldKey::TrackTotal, PairSlot::Total),
		(FieldKey::DiscNumber, PairSlot::Ordinal),
		(FieldKey::DiscTotal, PairSlot::Total),
	],
	open_ended: false,
};
