//! Per-field tag tables and the tag value syntax.
//!
//! A field declares one value per tag key, e.g.
//! `#[named(json = "user_id,omitempty", db = "uid")]`. The text before the
//! first comma is the field's name under that key, the rest are options.
//! The name `-` opts the field out.

use core::fmt;

/// The name that excludes a field from a schema.
pub const SKIP_NAME: &str = "-";

// -----------------------------------------------------------------------------
// StructTag

/// The tag table of a single field: `(key, value)` pairs in declaration order.
///
/// # Examples
///
/// ```
/// use vc_named::tag::StructTag;
///
/// let tag = StructTag::new(&[("json", "id,omitempty"), ("db", "uid")]);
///
/// assert_eq!(tag.get("db"), Some("uid"));
/// assert_eq!(tag.lookup("json").unwrap().name(), "id");
/// assert!(tag.get("xml").is_none());
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StructTag {
    entries: &'static [(&'static str, &'static str)],
    skip_all: bool,
}

impl StructTag {
    /// A tag table without entries.
    pub const EMPTY: Self = Self::new(&[]);

    /// Creates a tag table from `(key, value)` pairs.
    #[inline]
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self {
            entries,
            skip_all: false,
        }
    }

    /// Marks the field as excluded under every tag key.
    #[inline]
    pub const fn with_skip_all(self) -> Self {
        Self {
            skip_all: true,
            ..self
        }
    }

    /// Returns `true` if the field is excluded under every tag key.
    #[inline]
    pub const fn is_skip_all(&self) -> bool {
        self.skip_all
    }

    /// Returns the raw value for `key`. The first entry wins on duplicates.
    pub fn get(&self, key: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find_map(|&(k, v)| if k == key { Some(v) } else { None })
    }

    /// Returns the parsed value for `key`.
    #[inline]
    pub fn lookup(&self, key: &str) -> Option<TagValue> {
        self.get(key).map(TagValue::parse)
    }

    /// Returns the `(key, value)` pairs.
    #[inline]
    pub fn entries(&self) -> &'static [(&'static str, &'static str)] {
        self.entries
    }

    /// Returns `true` if no entries are declared.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for StructTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        map.entries(self.entries.iter().map(|(k, v)| (k, v)));
        if self.skip_all {
            map.entry(&"skip", &true);
        }
        map.finish()
    }
}

// -----------------------------------------------------------------------------
// TagValue

/// A tag value split into its name and comma separated options.
///
/// # Examples
///
/// ```
/// use vc_named::tag::TagValue;
///
/// let value = TagValue::parse("f1,omitempty,string");
/// assert_eq!(value.name(), "f1");
/// assert!(value.has_option("omitempty"));
/// assert!(!value.has_option("f1"));
///
/// assert!(TagValue::parse("-").is_skip());
/// assert!(TagValue::parse("-,omitempty").is_skip());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagValue {
    name: &'static str,
    options: &'static str,
}

impl TagValue {
    /// Splits `raw` at the first comma.
    pub fn parse(raw: &'static str) -> Self {
        match raw.split_once(',') {
            Some((name, options)) => Self { name, options },
            None => Self {
                name: raw,
                options: "",
            },
        }
    }

    /// The name part, may be empty.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The raw option text after the first comma.
    #[inline]
    pub const fn options(&self) -> &'static str {
        self.options
    }

    /// Iterates the non-empty options.
    pub fn iter_options(&self) -> impl Iterator<Item = &'static str> {
        self.options.split(',').filter(|opt| !opt.is_empty())
    }

    /// Returns `true` if `option` is listed.
    pub fn has_option(&self, option: &str) -> bool {
        self.iter_options().any(|opt| opt == option)
    }

    /// Returns `true` if the value opts the field out (its name is `-`).
    #[inline]
    pub fn is_skip(&self) -> bool {
        self.name == SKIP_NAME
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{StructTag, TagValue};

    #[test]
    fn empty_value() {
        let value = TagValue::parse("");
        assert_eq!(value.name(), "");
        assert_eq!(value.iter_options().count(), 0);
        assert!(!value.is_skip());
    }

    #[test]
    fn options_only() {
        let value = TagValue::parse(",omitempty");
        assert_eq!(value.name(), "");
        assert!(value.has_option("omitempty"));
    }

    #[test]
    fn first_duplicate_wins() {
        let tag = StructTag::new(&[("json", "a"), ("json", "b")]);
        assert_eq!(tag.get("json"), Some("a"));
    }

    #[test]
    fn skip_all() {
        let tag = StructTag::EMPTY.with_skip_all();
        assert!(tag.is_skip_all());
        assert!(tag.is_empty());
        assert!(!StructTag::EMPTY.is_skip_all());
    }
}
