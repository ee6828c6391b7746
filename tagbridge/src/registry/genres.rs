//! The ID3v1 genre list, including the Winamp extensions
//!
//! ID3v2 `TCON` and MP4 `gnre` refer to these genres by index.

/// The standard genres, indexed by their ID3v1 number
pub const GENRES: [&str; 192] = [
	"Blues",
	"Classic Rock",
	"Country",
	"Dance",
	"Disco",
	"Funk",
	"Grunge",
	"Hip-Hop",
	"Jazz",
	"Metal",
	"New Age",
	"Oldies",
	"Other",
	"Pop",
	"R&B",
	"Rap",
	"Reggae",
	"Rock",
	"Techno",
	"Industrial",
	"Alternative",
	"Ska",
	"Death Metal",
	"Pranks",
	"Soundtrack",
	"Euro-Techno",
	"Ambient",
	"Trip-Hop",
	"Vocal",
	"Jazz+Funk",
	"Fusion",
	"Trance",
	"Classical",
	"Instrumental",
	"Acid",
	"House",
	"Game",
	"Sound Clip",
	"Gospel",
	"Noise",
	"AlternRock",
	"Bass",
	"Soul",
	"Punk",
	"Space",
	"Meditative",
	"Instrumental Pop",
	"Instrumental Rock",
	"Ethnic",
	"Gothic",
	"Darkwave",
	"Techno-Industrial",
	"Electronic",
	"Pop-Folk",
	"Eurodance",
	"Dream",
	"Southern Rock",
	"Comedy",
	"Cult",
	"Gangsta",
	"Top 40",
	"Christian Rap",
	"Pop/Funk",
	"Jungle",
	"Native American",
	"Cabaret",
	"New Wave",
	"Psychadelic",
	"Rave",
	"Showtunes",
	"Trailer",
	"Lo-Fi",
	"Tribal",
	"Acid Punk",
	"Acid Jazz",
	"Polka",
	"Retro",
	"Musical",
	"Rock & Roll",
	"Hard Rock",
	"Folk",
	"Folk-Rock",
	"National Folk",
	"Swing",
	"Fast Fusion",
	"Bebob",
	"Latin",
	"Revival",
	"Celtic",
	"Bluegrass",
	"Avantgarde",
	"Gothic Rock",
	"Progressive Rock",
	"Psychedelic Rock",
	"Symphonic Rock",
	"Slow Rock",
	"Big Band",
	"Chorus",
	"Easy Listening",
	"Acoustic",
	"Humour",
	"Speech",
	"Chanson",
	"Opera",
	"Chamber Music",
	"Sonata",
	"Symphony",
	"Booty Bass",
	"Primus",
	"Porn Groove",
	"Satire",
	"Slow Jam",
	"Club",
	"Tango",
	"Samba",
	"Folklore",
	"Ballad",
	"Power Ballad",
	"Rhythmic Soul",
	"Freestyle",
	"Duet",
	"Punk Rock",
	"Drum Solo",
	"A capella",
	"Euro-House",
	"Dance Hall",
	"Goa",
	"Drum & Bass",
	"Club-House",
	"Hardcore",
	"Terror",
	"Indie",
	"BritPop",
	"Negerpunk",
	"Polsk Punk",
	"Beat",
	"Christian Gangsta Rap",
	"Heavy Metal",
	"Black Metal",
	"Crossover",
	"Contemporary Christian",
	"Christian Rock",
	"Merengue",
	"Salsa",
	"Thrash Metal",
	"Anime",
	"JPop",
	"Synthpop",
	"Abstract",
	"Art Rock",
	"Baroque",
	"Bhangra",
	"Big Beat",
	"Breakbeat",
	"Chillout",
	"Downtempo",
	"Dub",
	"EBM",
	"Eclectic",
	"Electro",
	"Electroclash",
	"Emo",
	"Experimental",
	"Garage",
	"Global",
	"IDM",
	"Illbient",
	"Industro-Goth",
	"Jam Band",
	"Krautrock",
	"Leftfield",
	"Lounge",
	"Math Rock",
	"New Romantic",
	"Nu-Breakz",
	"Post-Punk",
	"Post-Rock",
	"Psytrance",
	"Shoegaze",
	"Space Rock",
	"Trop Rock",
	"World Music",
	"Neoclassical",
	"Audiobook",
	"Audio Theatre",
	"Neue Deutsche Welle",
	"Podcast",
	"Indie Rock",
	"G-Funk",
	"Dubstep",
	"Garage Rock",
	"Psybient",
];

/// Finds the index of a standard genre, ignoring ASCII case
pub fn genre_index(name: &str) -> Option<usize> {
	GENRES
		.iter()
		.position(|genre| genre.eq_ignore_ascii_case(name.trim()))
}

/// Gets the name of a standard genre by its index
pub fn genre_name(index: usize) -> Option<&'static str> {
	GENRES.get(index).copied()
}

/// Resolves an ID3v2 `TCON` value to a display name
///
/// Handles the plain index form (`17`), the ID3v2.3 reference form (`(17)`), and a reference
/// followed by a refinement (`(17)Rock`), in which case the refinement wins. Anything else,
/// including indices outside the table, is returned untouched.
pub(crate) fn resolve_id3_genre(value: &str) -> String {
	let value = value.trim();

	if let Some(rest) = value.strip_prefix('(') {
		if let Some((number, refinement)) = rest.split_once(')') {
			if let Ok(index) = number.parse::<usize>() {
				if !refinement.is_empty() {
					return refinement.to_string();
				}

				if let Some(name) = genre_name(index) {
					return name.to_string();
				}
			}
		}

		return value.to_string();
	}

	match value.parse::<usize>().ok().and_then(genre_name) {
		Some(name) => name.to_string(),
		None => value.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test_log::test]
	fn table_lookups() {
		assert_eq!(genre_index("Rock"), Some(17));
		assert_eq!(genre_index("rock"), Some(17));
		assert_eq!(genre_index("Psybient"), Some(191));
		assert_eq!(genre_index("Vaporwave"), None);
		assert_eq!(genre_name(1), Some("Classic Rock"));
		assert_eq!(genre_name(192), None);
	}

	#[test_log::test]
	fn id3_genre_forms() {
		assert_eq!(resolve_id3_genre("17"), "Rock");
		assert_eq!(resolve_id3_genre("(17)"), "Rock");
		assert_eq!(resolve_id3_genre("(17)Hard Rock"), "Hard Rock");
		assert_eq!(resolve_id3_genre("250"), "250");
		assert_eq!(resolve_id3_genre("(250)"), "(250)");
		assert_eq!(resolve_id3_genre("Vaporwave"), "Vaporwave");
	}
}
