use super::FormatAdapter;
use crate::error::Result;
use crate::registry::FieldKey;

// This defines the `Accessor` trait, used to define unified getters/setters for commonly
// accessed tag values.
//
// Usage:
//
// accessor_trait! {
//     [field_name]<type> => FieldKey,
// }
//
// * `field_name` is the name of the method to access the field. If a name consists of multiple segments,
// such as `track_number`, they should be separated by spaces like so: [track number]<type>.
//
// * `type` is either `String` or `u32`. Numbers are read from the leading digits of the value.
macro_rules! accessor_trait {
	($([$($name:tt)+] < $ty:ident > => $key:ident),+ $(,)?) => {
		/// Provides accessors for common items
		///
		/// Every accessor goes through the generic key layer of [`FormatAdapter`]. Keys that have no
		/// mapping in a format read as `None`, and fail to be set with
		/// [`ErrorKind::KeyNotFound`](crate::error::ErrorKind::KeyNotFound).
		///
		/// Note that for keys supporting multiple values, the behavior of any setter methods is
		/// to **overwrite**, not append. If multi-value support is needed, use [`FormatAdapter::add_field`].
		pub trait Accessor<'r>: FormatAdapter<'r> {
			$(
				accessor_trait! { @METHODS [$($name)+] $ty $key }
			)+
		}
	};
	(@METHODS [$name:tt $($other:tt)*] String $key:ident) => {
		paste::paste! {
			#[doc = "Returns the " $name $(" " $other)* "."]
			///
			/// For keys with multiple values, this will only return the first one.
			fn [<$name $(_ $other)*>](&self) -> Option<String> {
				self.get_first(FieldKey::$key).ok().flatten()
			}

			#[doc = "Sets the " $name $(" " $other)* ", replacing any existing values."]
			///
			/// # Errors
			///
			/// See [`FormatAdapter::set_field`]
			fn [<set_ $name $(_ $other)*>](&mut self, value: String) -> Result<()> {
				self.set_field(FieldKey::$key, &value)
			}

			#[doc = "Removes the " $name $(" " $other)*]
			fn [<remove_ $name $(_ $other)*>](&mut self) {
				if self.delete_field(FieldKey::$key).is_err() {
					log::debug!("{:?} has no mapping for {:?}, nothing to remove", self.format(), FieldKey::$key);
				}
			}
		}
	};
	(@METHODS [$name:tt $($other:tt)*] u32 $key:ident) => {
		paste::paste! {
			#[doc = "Returns the " $name $(" " $other)* "."]
			fn [<$name $(_ $other)*>](&self) -> Option<u32> {
				self.get_first(FieldKey::$key)
					.ok()
					.flatten()
					.and_then(|value| leading_number(&value))
			}

			#[doc = "Sets the " $name $(" " $other)* "."]
			///
			/// # Errors
			///
			/// See [`FormatAdapter::set_field`]
			fn [<set_ $name $(_ $other)*>](&mut self, value: u32) -> Result<()> {
				self.set_field(FieldKey::$key, &value.to_string())
			}

			#[doc = "Removes the " $name $(" " $other)*]
			fn [<remove_ $name $(_ $other)*>](&mut self) {
				if self.delete_field(FieldKey::$key).is_err() {
					log::debug!("{:?} has no mapping for {:?}, nothing to remove", self.format(), FieldKey::$key);
				}
			}
		}
	};
}

accessor_trait! {
	[artist]<String> => Artist,         [title      ]<String> => Title,
	[album ]<String> => Album,          [genre      ]<String> => Genre,
	[track ]<u32>    => TrackNumber,    [track total]<u32>    => TrackTotal,
	[disk  ]<u32>    => DiscNumber,     [disk total ]<u32>    => DiscTotal,
	[year  ]<u32>    => Year,           [comment    ]<String> => Comment,
}

// "2004-05-01" -> 2004, "3/12" -> 3
fn leading_number(value: &str) -> Option<u32> {
	let value = value.trim_start();
	let end = value
		.find(|c: char| !c.is_ascii_digit())
		.unwrap_or(value.len());

	value[..end].parse().ok()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ogg::VorbisComments;
	use crate::registry::Registries;

	#[test_log::test]
	fn leading_numbers() {
		assert_eq!(leading_number("2004-05-01"), Some(2004));
		assert_eq!(leading_number(" 7"), Some(7));
		assert_eq!(leading_number("side A"), None);
	}

	#[test_log::test]
	fn accessors_use_generic_keys() {
		let registries = Registries::new();
		let mut tag = VorbisComments::new(&registries);

		tag.set_artist(String::from("Foo artist")).unwrap();
		tag.set_track(3).unwrap();
		tag.set_year(1999).unwrap();

		assert_eq!(tag.artist().as_deref(), Some("Foo artist"));
		assert_eq!(tag.track(), Some(3));
		assert_eq!(tag.year(), Some(1999));
		assert_eq!(tag.get_first(FieldKey::Year).unwrap().as_deref(), Some("1999"));

		tag.remove_artist();
		assert_eq!(tag.artist(), None);
	}
}
