#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use tagbridge::config::ParseOptions;
use tagbridge::id3::v2::Id3v2Tag;
use tagbridge::registry::Registries;

fuzz_target!(|data: Vec<u8>| {
	let registries = Registries::new();
	let _ = Id3v2Tag::read_from(&mut Cursor::new(data), &registries, ParseOptions::new());
});
