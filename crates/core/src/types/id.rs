//! Catalog identifiers.
//!
//! Plant and category ids are both bare integers in the catalog API. Giving
//! each its own type keeps a category id from being passed where a plant id
//! is expected.

/// Declares an integer id type for one kind of catalog record.
///
/// The generated type wraps an `i32`, serializes as the bare number, and can
/// be parsed straight out of a path segment or query parameter. It converts
/// to and from `i32` and displays as the number itself.
///
/// ```rust
/// # use green_earth_core::define_id;
/// define_id!(NurseryId);
///
/// let nursery = NurseryId::new(3);
/// assert_eq!(nursery.as_i32(), 3);
/// assert_eq!(nursery.to_string(), "3");
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            Default,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Wrap a raw catalog id.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// The raw catalog id.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(PlantId);
define_id!(CategoryId);
