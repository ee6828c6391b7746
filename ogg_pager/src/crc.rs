// Polynomial 0x04C11DB7, no reflection, initial value and final XOR of zero
const CRC_LOOKUP_ARRAY: [u32; 256] = generate_table();

const fn generate_table() -> [u32; 256] {
	let mut table = [0_u32; 256];

	let mut i = 0;
	while i < 256 {
		let mut r = (i as u32) << 24;

		let mut j = 0;
		while j < 8 {
			r = if r & 0x8000_0000 == 0 {
				r << 1
			} else {
				(r << 1) ^ 0x04C1_1DB7
			};
			j += 1;
		}

		table[i] = r;
		i += 1;
	}

	table
}

/// Generate a CRC checksum for use in OGG pages
///
/// The checksum field of the page must be zeroed before calling this.
pub fn crc32(data: &[u8]) -> u32 {
	let mut crc = 0_u32;

	for &byte in data {
		let index = ((crc >> 24) as u8) ^ byte;
		crc = (crc << 8) ^ CRC_LOOKUP_ARRAY[index as usize];
	}

	crc
}

#[cfg(test)]
mod tests {
	#[test]
	fn check_value() {
		assert_eq!(super::crc32(b"123456789"), 0x89A1_897F);
		assert_eq!(super::crc32(&[]), 0);
	}
}
