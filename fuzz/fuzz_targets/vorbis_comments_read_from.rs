#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use tagbridge::config::ParseOptions;
use tagbridge::ogg::VorbisComments;
use tagbridge::registry::Registries;

fuzz_target!(|data: Vec<u8>| {
	let registries = Registries::new();
	let _ = VorbisComments::read_from(&mut Cursor::new(data), &registries, ParseOptions::new());
});
