#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use tagbridge::config::{ParseOptions, WriteOptions};
use tagbridge::id3::v2::Id3v2Tag;
use tagbridge::registry::Registries;

// Anything that reads must either write, or fail without panicking
fuzz_target!(|data: Vec<u8>| {
	let registries = Registries::new();
	if let Ok(tag) = Id3v2Tag::read_from(&mut Cursor::new(data), &registries, ParseOptions::new()) {
		let _ = tag.dump_to(&mut Vec::new(), WriteOptions::new());
	}
});
