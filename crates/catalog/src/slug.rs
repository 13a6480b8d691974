//! URL-safe slugs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use rentshop_core::ValueObject;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SlugError {
    #[error("This field is required.")]
    Empty,

    #[error("Enter a valid slug consisting of letters, numbers, underscores or hyphens.")]
    InvalidCharacters,

    #[error("Ensure this value has at most {max} characters (it has {actual}).")]
    TooLong { max: usize, actual: usize },
}

/// A non-empty string of ASCII letters, digits, `-` and `_`.
///
/// Holding a `Slug` means the text can be dropped into a URL path segment
/// as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl ValueObject for Slug {}

pub fn is_slug_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

impl Slug {
    /// Parse submitted text as a slug, trimming surrounding whitespace.
    pub fn parse(raw: &str) -> Result<Self, SlugError> {
        let s = raw.trim();
        if s.is_empty() {
            return Err(SlugError::Empty);
        }
        if !s.chars().all(is_slug_char) {
            return Err(SlugError::InvalidCharacters);
        }
        Ok(Self(s.to_string()))
    }

    /// Parse and additionally enforce a maximum length (in characters).
    pub fn parse_with_max(raw: &str, max: usize) -> Result<Self, SlugError> {
        let slug = Self::parse(raw)?;
        let actual = slug.0.chars().count();
        if actual > max {
            return Err(SlugError::TooLong { max, actual });
        }
        Ok(slug)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Slug {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

/// Derive a slug suggestion from a display name.
///
/// Lowercases ASCII letters, collapses every run of other characters into a
/// single `-` and trims dashes from both ends. Returns `None` when nothing
/// slug-safe is left (e.g. a name made only of punctuation).
pub fn slugify(text: &str) -> Option<Slug> {
    let mut out = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    if out.is_empty() { None } else { Some(Slug(out)) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_letters_digits_dash_underscore() {
        let slug = Slug::parse("  Power_drill-2000 ").unwrap();
        assert_eq!(slug.as_str(), "Power_drill-2000");
    }

    #[test]
    fn rejects_empty_and_whitespace() {
        assert_eq!(Slug::parse(""), Err(SlugError::Empty));
        assert_eq!(Slug::parse("   "), Err(SlugError::Empty));
    }

    #[test]
    fn rejects_spaces_slashes_and_non_ascii() {
        for bad in ["power drill", "tools/drills", "café", "a?b"] {
            assert_eq!(Slug::parse(bad), Err(SlugError::InvalidCharacters), "{bad}");
        }
    }

    #[test]
    fn enforces_max_length() {
        let long = "a".repeat(101);
        assert_eq!(
            Slug::parse_with_max(&long, 100),
            Err(SlugError::TooLong { max: 100, actual: 101 })
        );
        assert!(Slug::parse_with_max(&long[..100], 100).is_ok());
    }

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("  Garden & Outdoor  Tools ").unwrap().as_str(), "garden-outdoor-tools");
        assert_eq!(slugify("DSLR Camera (Canon)").unwrap().as_str(), "dslr-camera-canon");
        assert!(slugify("!!!").is_none());
    }

    #[test]
    fn deserialize_validates() {
        let ok: Slug = serde_json::from_str("\"ladders\"").unwrap();
        assert_eq!(ok.as_str(), "ladders");
        assert!(serde_json::from_str::<Slug>("\"two words\"").is_err());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn slugify_output_is_always_a_valid_slug(text in ".{0,64}") {
                if let Some(slug) = slugify(&text) {
                    prop_assert!(Slug::parse(slug.as_str()).is_ok());
                    prop_assert!(!slug.as_str().starts_with('-'));
                    prop_assert!(!slug.as_str().ends_with('-'));
                }
            }

            #[test]
            fn parse_accepts_exactly_the_slug_charset(text in "[A-Za-z0-9_ /.-]{1,32}") {
                let valid = text.trim().chars().all(is_slug_char) && !text.trim().is_empty();
                prop_assert_eq!(Slug::parse(&text).is_ok(), valid);
            }
        }
    }
}
