use crate::error::Result;
use crate::macros::err;

/// **DO NOT USE DIRECTLY**
///
/// Creates a `Vec` of the specified length, containing copies of `element`.
///
/// This should be used through [`try_vec!`](crate::macros::try_vec)
pub(crate) fn fallible_vec_from_element<T>(
	element: T,
	expected_size: usize,
	limit: usize,
) -> Result<Vec<T>>
where
	T: Clone,
{
	if expected_size > limit {
		err!(TooMuchData);
	}

	let mut v = Vec::new();
	v.try_reserve_exact(expected_size)?;
	v.resize(expected_size, element);

	Ok(v)
}

#[cfg(test)]
mod tests {
	use crate::error::ErrorKind;

	#[test_log::test]
	fn vec_fallible_repeat() {
		let u8_vec_len_20 = super::fallible_vec_from_element(0_u8, 20, 100).unwrap();
		assert_eq!(u8_vec_len_20, vec![0; 20]);

		let too_big = super::fallible_vec_from_element(0_u8, 101, 100).unwrap_err();
		assert!(matches!(too_big.kind(), ErrorKind::TooMuchData));
	}
}
