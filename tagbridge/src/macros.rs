// Fallible `vec![elem; size]`, bounded by an allocation limit
//
// Usage:
// - try_vec!(0; size, limit) -> e.g. `parse_options.allocation_limit`
macro_rules! try_vec {
	($elem:expr; $size:expr, $limit:expr) => {{ $crate::util::alloc::fallible_vec_from_element($elem, $size, $limit)? }};
}

// Shorthand for return Err(TagError::new(ErrorKind::Foo))
//
// Usage:
// - err!(Variant)          -> return Err(TagError::new(ErrorKind::Variant))
// - err!(Variant(Message)) -> return Err(TagError::new(ErrorKind::Variant(Message)))
macro_rules! err {
	($variant:ident) => {
		return Err(crate::error::TagError::new(
			crate::error::ErrorKind::$variant,
		))
	};
	($variant:ident($reason:expr)) => {
		return Err(crate::error::TagError::new(
			crate::error::ErrorKind::$variant($reason),
		))
	};
}

// Shorthand for CannotReadError::new(TagFormat::Foo, CannotReadKind::Malformed("Message"))
//
// Usage:
//
// - decode_err!(Format, "Message")
// - decode_err!(Format, KindVariant)
// - decode_err!("Message")
//
// or bail:
//
// - decode_err!(@BAIL Format, "Message")
// - decode_err!(@BAIL Format, KindVariant)
// - decode_err!(@BAIL "Message")
macro_rules! decode_err {
	($format:ident, $reason:literal) => {
		Into::<crate::error::TagError>::into(crate::error::CannotReadError::new(
			crate::tag::TagFormat::$format,
			crate::error::CannotReadKind::Malformed($reason),
		))
	};
	($format:ident, $kind:ident) => {
		Into::<crate::error::TagError>::into(crate::error::CannotReadError::new(
			crate::tag::TagFormat::$format,
			crate::error::CannotReadKind::$kind,
		))
	};
	($reason:literal) => {
		Into::<crate::error::TagError>::into(crate::error::CannotReadError::from_kind(
			crate::error::CannotReadKind::Malformed($reason),
		))
	};
	(@BAIL $format:ident, $reason:tt) => {
		return Err(decode_err!($format, $reason))
	};
	(@BAIL $reason:literal) => {
		return Err(decode_err!($reason))
	};
}

// A macro for handling the different `ParsingMode`s
//
// NOTE: All fields are optional, if `STRICT` or `RELAXED` are missing, it will
// 		 fall through to `DEFAULT`. If `DEFAULT` is missing, it will fall through
// 		 to an empty block.
//
// Usage:
//
// - parse_mode_choice!(
// 		ident_of_parsing_mode,
// 		STRICT: some_expr,
// 		RELAXED: some_expr,
// 		DEFAULT: some_expr,
// 	 )
macro_rules! parse_mode_choice {
	(
		$parse_mode:ident,
		$(STRICT: $strict_handler:expr,)?
		$(BESTATTEMPT: $best_attempt_handler:expr,)?
		$(RELAXED: $relaxed_handler:expr,)?
		DEFAULT: $default:expr
	) => {
		match $parse_mode {
			$(crate::config::ParsingMode::Strict => { $strict_handler },)?
			$(crate::config::ParsingMode::BestAttempt => { $best_attempt_handler },)?
			$(crate::config::ParsingMode::Relaxed => { $relaxed_handler },)?
			#[allow(unreachable_patterns)]
			_ => { $default }
		}
	};
	(
		$parse_mode:ident,
		$(STRICT: $strict_handler:expr,)?
		$(BESTATTEMPT: $best_attempt_handler:expr,)?
		$(RELAXED: $relaxed_handler:expr $(,)?)?
	) => {
		match $parse_mode {
			$(crate::config::ParsingMode::Strict => { $strict_handler },)?
			$(crate::config::ParsingMode::BestAttempt => { $best_attempt_handler },)?
			$(crate::config::ParsingMode::Relaxed => { $relaxed_handler },)?
			#[allow(unreachable_patterns)]
			_ => {}
		}
	};
}

pub(crate) use {decode_err, err, parse_mode_choice, try_vec};
