use crate::registry::{FieldKey, PairSlot, RegistryTable};
use crate::tag::TagFormat;

pub(crate) static TABLE: RegistryTable = RegistryTable {
	format: TagFormat::Id3v24,
	supported: &[
		("AENC", "Audio encryption"),
		("APIC", "Attached picture"),
		("ASPI", "Audio seek point index"),
		("COMM", "Comments"),
		("COMR", "Commercial frame"),
		("ENCR", "Encryption method registration"),
		("EQU2", "Equalisation (2)"),
		("ETCO", "Event timing codes"),
		("GEOB", "General encapsulated object"),
		("GRID", "Group identification registration"),
		("LINK", "Linked information"),
		("MCDI", "Music CD identifier"),
		("MLLT", "MPEG location lookup table"),
		("OWNE", "Ownership frame"),
		("PCNT", "Play counter"),
		("POPM", "Popularimeter"),
		("POSS", "Position synchronisation frame"),
		("PRIV", "Private frame"),
		("RBUF", "Recommended buffer size"),
		("RVA2", "Relative volume adjustment (2)"),
		("RVRB", "Reverb"),
		("SEEK", "Seek frame"),
		("SIGN", "Signature frame"),
		("SYLT", "Synchronized lyric/text"),
		("SYTC", "Synchronized tempo codes"),
		("TALB", "Text: Album/Movie/Show title"),
		("TBPM", "Text: BPM (Beats Per Minute)"),
		("TCMP", "Text: iTunes compilation flag"),
		("TCOM", "Text: Composer"),
		("TCON", "Text: Content type"),
		("TCOP", "Text: Copyright message"),
		("TDEN", "Text: Encoding time"),
		("TDLY", "Text: Playlist delay"),
		("TDOR", "Text: Original release time"),
		("TDRC", "Text: Recording time"),
		("TDRL", "Text: Release time"),
		("TDTG", "Text: Tagging time"),
		("TENC", "Text: Encoded by"),
		("TEXT", "Text: Lyricist/Text writer"),
		("TFLT", "Text: File type"),
		("TIPL", "Text: Involved people list"),
		("TIT1", "Text: Content group description"),
		("TIT2", "Text: Title/Songname/Content description"),
		("TIT3", "Text: Subtitle/Description refinement"),
		("TKEY", "Text: Initial key"),
		("TLAN", "Text: Language(s)"),
		("TLEN", "Text: Length"),
		("TMCL", "Text: Musician credits list"),
		("TMED", "Text: Media type"),
		("TMOO", "Text: Mood"),
		("TOAL", "Text: Original album/movie/show title"),
		("TOFN", "Text: Original filename"),
		("TOLY", "Text: Original lyricist(s)/text writer(s)"),
		("TOPE", "Text: Original artist(s)/performer(s)"),
		("TOWN", "Text: File owner/licensee"),
		("TPE1", "Text: Lead performer(s)/Soloist(s)"),
		("TPE2", "Text: Band/orchestra/accompaniment"),
		("TPE3", "Text: Conductor/performer refinement"),
		("TPE4", "Text: Interpreted, remixed, or otherwise modified by"),
		("TPOS", "Text: Part of a set"),
		("TPRO", "Text: Produced notice"),
		("TPUB", "Text: Publisher"),
		("TRCK", "Text: Track number/Position in set"),
		("TRSN", "Text: Internet radio station name"),
		("TRSO", "Text: Internet radio station owner"),
		("TSO2", "Text: Album artist sort order"),
		("TSOA", "Text: Album sort order"),
		("TSOC", "Text: Composer sort order"),
		("TSOP", "Text: Performer sort order"),
		("TSOT", "Text: Title sort order"),
		("TSRC", "Text: ISRC (International Standard Recording Code)"),
		("TSSE", "Text: Software/Hardware and settings used for encoding"),
		("TSST", "Text: Set subtitle"),
		("TXXX", "User defined text information frame"),
		("UFID", "Unique file identifier"),
		("USER", "Terms of use"),
		("USLT", "Unsychronized lyric/text transcription"),
		("WCOM", "URL: Commercial information"),
		("WCOP", "URL: Copyright/Legal information"),
		("WOAF", "URL: Official audio file webpage"),
		("WOAR", "URL: Official artist/performer webpage"),
		("WOAS", "URL: Official audio source webpage"),
		("WORS", "URL: Official internet radio station homepage"),
		("WPAY", "URL: Payment"),
		("WPUB", "URL: Publishers official webpage"),
		("WXXX", "User defined URL link frame"),
	],
	extension: &["TCMP", "TSO2", "TSOC"],
	common: &["TPE1", "TALB", "TIT2", "TCON", "TRCK", "TDRC", "COMM"],
	binary: &[
		"APIC", "AENC", "ENCR", "EQU2", "ETCO", "GEOB", "RVA2", "RBUF", "UFID", "SIGN", "ASPI",
	],
	url: &[
		"WCOM", "WCOP", "WOAF", "WOAR", "WOAS", "WORS", "WPAY", "WPUB", "WXXX",
	],
	multi_value: &[
		"TXXX", "WXXX", "APIC", "PRIV", "COMM", "UFID", "USLT", "POPM", "GEOB", "WOAR", "SIGN",
	],
	discard_on_alter: &[
		"ASPI", "ETCO", "EQU2", "MLLT", "POSS", "SEEK", "SYLT", "SYTC", "RVA2", "TENC", "TLEN",
	],
	keyed_by_description: &["TXXX", "WXXX"],
	mappings: &[
		(FieldKey::Album, "TALB"),
		(FieldKey::AlbumArtist, "TPE2"),
		(FieldKey::AlbumArtistSort, "TSO2"),
		(FieldKey::AlbumSort, "TSOA"),
		(FieldKey::AmazonId, "TXXX:ASIN"),
		(FieldKey::Artist, "TPE1"),
		(FieldKey::ArtistSort, "TSOP"),
		(FieldKey::Artists, "TXXX:ARTISTS"),
		(FieldKey::Barcode, "TXXX:BARCODE"),
		(FieldKey::Bpm, "TBPM"),
		(FieldKey::CatalogNumber, "TXXX:CATALOGNUMBER"),
		(FieldKey::Comment, "COMM"),
		(FieldKey::Compilation, "TCMP"),
		(FieldKey::Composer, "TCOM"),
		(FieldKey::ComposerSort, "TSOC"),
		(FieldKey::Conductor, "TPE3"),
		(FieldKey::Copyright, "TCOP"),
		(FieldKey::CopyrightUrl, "WCOP"),
		(FieldKey::Country, "TXXX:MusicBrainz Album Release Country"),
		(FieldKey::CoverArt, "APIC"),
		(FieldKey::DiscNumber, "TPOS"),
		(FieldKey::DiscTotal, "TPOS"),
		(FieldKey::EncodedBy, "TENC"),
		(FieldKey::Encoder, "TSSE"),
		(FieldKey::Genre, "TCON"),
		(FieldKey::Grouping, "TIT1"),
		(FieldKey::InvolvedPeople, "TIPL"),
		(FieldKey::Isrc, "TSRC"),
		(FieldKey::Key, "TKEY"),
		(FieldKey::Language, "TLAN"),
		(FieldKey::Lyricist, "TEXT"),
		(FieldKey::Lyrics, "USLT"),
		(FieldKey::Media, "TMED"),
		(FieldKey::Mood, "TMOO"),
		(FieldKey::MusicBrainzArtistId, "TXXX:MusicBrainz Artist Id"),
		(
			FieldKey::MusicBrainzReleaseArtistId,
			"TXXX:MusicBrainz Album Artist Id",
		),
		(
			FieldKey::MusicBrainzReleaseGroupId,
			"TXXX:MusicBrainz Release Group Id",
		),
		(FieldKey::MusicBrainzReleaseId, "TXXX:MusicBrainz Album Id"),
		(FieldKey::OriginalAlbum, "TOAL"),
		(FieldKey::OriginalArtist, "TOPE"),
		(FieldKey::OriginalLyricist, "TOLY"),
		(FieldKey::OriginalYear, "TDOR"),
		(FieldKey::Publisher, "TPUB"),
		(FieldKey::Remixer, "TPE4"),
		(FieldKey::Script, "TXXX:SCRIPT"),
		(FieldKey::Subtitle, "TIT3"),
		(FieldKey::Title, "TIT2"),
		(FieldKey::TitleSort, "TSOT"),
		(FieldKey::TrackNumber, "TRCK"),
		(FieldKey::TrackTotal, "TRCK"),
		(FieldKey::UrlLyricsSite, "WXXX:LYRICS_SITE"),
		(FieldKey::UrlOfficialArtistSite, "WOAR"),
		(FieldKey::UrlOfficialReleaseSite, "WOAF"),
		(FieldKey::Year, "TDRC"),
	],
	pairs: &[
		(FieldKey::TrackNumber, PairSlot::Ordinal),
		(FieldKey::TrackTotal, PairSlot::Total),
		(FieldKey::DiscNumber, PairSlot::Ordinal),
		(FieldKey::DiscTotal, PairSlot::Total),
	],
	open_ended: false,
};
