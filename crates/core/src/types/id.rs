//! Newtype IDs for type-safe content-store document references.
//!
//! Use the `define_document_id!` macro to create type-safe ID wrappers that
//! prevent accidentally mixing IDs from different document types.

use thiserror::Error;

/// Errors that can occur when parsing a document ID.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentIdError {
    /// The input string is empty or only whitespace.
    #[error("document id cannot be empty")]
    Empty,
    /// The input contains a character outside `[A-Za-z0-9._-]`.
    #[error("document id contains an invalid character: {0:?}")]
    InvalidChar(char),
}

/// Validate a raw document ID.
///
/// Content-store IDs are opaque, but they are always non-empty and drawn
/// from `[A-Za-z0-9._-]`, so they can be embedded in URL paths verbatim.
///
/// # Errors
///
/// Returns `DocumentIdError` if the input is empty or contains an invalid
/// character.
pub fn validate_document_id(raw: &str) -> Result<(), DocumentIdError> {
    if raw.trim().is_empty() {
        return Err(DocumentIdError::Empty);
    }
    let allowed = |c: &char| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-');
    if let Some(c) = raw.chars().find(|c| !allowed(c)) {
        return Err(DocumentIdError::InvalidChar(c));
    }
    Ok(())
}

/// Macro to define a type-safe document ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - `parse()` (validated), `as_str()`, `into_inner()`
/// - `Display`, `FromStr` and `AsRef<str>` implementations
///
/// # Example
///
/// ```rust
/// # use chefbook_core::define_document_id;
/// define_document_id!(ChefId);
/// define_document_id!(DishId);
///
/// let chef_id = ChefId::parse("chef-1").unwrap();
/// let dish_id = DishId::parse("chef-1").unwrap();
///
/// // These are different types, so this won't compile:
/// // let _: ChefId = dish_id;
/// ```
#[macro_export]
macro_rules! define_document_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Parse an ID from a raw content-store identifier.
            ///
            /// # Errors
            ///
            /// Returns `DocumentIdError` if the identifier is empty or
            /// contains a character outside `[A-Za-z0-9._-]`.
            pub fn parse(raw: &str) -> ::core::result::Result<Self, $crate::DocumentIdError> {
                $crate::validate_document_id(raw)?;
                Ok(Self(raw.to_owned()))
            }

            /// Returns the ID as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the ID and returns its inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::DocumentIdError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_document_id!(ChefId);
define_document_id!(MenuItemId);
