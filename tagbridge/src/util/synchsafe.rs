//! Synchsafe integers and unsynchronisation, as used by ID3v2

use crate::error::Result;
use crate::macros::err;

/// Decode a 28-bit synchsafe integer
///
/// Each byte only carries 7 bits, the most significant bit must be clear.
pub(crate) fn unsynch_u32(n: u32) -> u32 {
	(n & 0xFF) | ((n & 0xFF00) >> 1) | ((n & 0xFF_0000) >> 2) | ((n & 0xFF00_0000) >> 3)
}

/// Encode a value as a 28-bit synchsafe integer
///
/// # Errors
///
/// `n` does not fit in 28 bits
pub(crate) fn synch_u32(n: u32) -> Result<u32> {
	if n > 0x0FFF_FFFF {
		err!(TooMuchData);
	}

	let mut x: u32 = n & 0x7F | (n & 0xFFFF_FF80) << 1;
	x = x & 0x7FFF | (x & 0xFFFF_8000) << 1;
	x = x & 0x7F_FFFF | (x & 0xFF80_0000) << 1;
	Ok(x)
}

/// Whether every byte of `n` has its most significant bit clear
pub(crate) fn is_synchsafe(n: u32) -> bool {
	n & 0x8080_8080 == 0
}

/// Undo unsynchronisation, replacing every `0xFF 0x00` pair with `0xFF`
pub(crate) fn unsynchronise(content: &[u8]) -> Vec<u8> {
	let mut out = Vec::with_capacity(content.len());

	let mut previous_ff = false;
	for &byte in content {
		if previous_ff && byte == 0x00 {
			previous_ff = false;
			continue;
		}

		previous_ff = byte == 0xFF;
		out.push(byte);
	}

	out
}

#[cfg(test)]
mod tests {
	#[test_log::test]
	fn synchsafe_round_trip() {
		assert_eq!(super::synch_u32(0x0FFF_FFFF).unwrap(), 0x7F7F_7F7F);
		assert_eq!(super::unsynch_u32(0x7F7F_7F7F), 0x0FFF_FFFF);

		assert_eq!(super::synch_u32(257).unwrap(), 0x0201);
		assert_eq!(super::unsynch_u32(0x0201), 257);

		assert!(super::synch_u32(0x1000_0000).is_err());
	}

	#[test_log::test]
	fn remove_unsynchronisation() {
		let content = [0xFF, 0x00, 0xE0, 0x12, 0xFF, 0x00, 0x00];
		assert_eq!(super::unsynchronise(&content), vec![0xFF, 0xE0, 0x12, 0xFF, 0x00]);
	}
}
