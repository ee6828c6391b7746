#![no_main]

use libfuzzer_sys::fuzz_target;
use tagbridge::asf::AsfTag;
use tagbridge::config::ParseOptions;
use tagbridge::registry::Registries;

fuzz_target!(|data: &[u8]| {
	let registries = Registries::new();
	let _ = AsfTag::read_from(&mut &data[..], &registries, ParseOptions::new());
});
