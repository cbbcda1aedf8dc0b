use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

/// Separator used by [`FieldPath::join`] when an empty separator is given.
pub const DEFAULT_SEPARATOR: &str = ".";

// -----------------------------------------------------------------------------
// FieldPath

/// The hierarchical name of a wrapper field, from the struct root to the field.
///
/// Paths are created once while a [`Schema`](crate::Schema) is built and are
/// shared by reference with every linked instance. The dotted form is
/// precomputed, so [`join`](Self::join) with the default separator does
/// not allocate.
///
/// # Examples
///
/// ```
/// use vc_named::FieldPath;
///
/// let path = FieldPath::new(vec!["order", "items", "sku"]);
///
/// assert_eq!(path.name(), "sku");
/// assert_eq!(path.join(""), "order.items.sku");
/// assert_eq!(path.join("/"), "order/items/sku");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Box<[&'static str]>,
    dotted: Box<str>,
}

impl FieldPath {
    /// Creates a path from its segments.
    pub fn new(segments: Vec<&'static str>) -> Self {
        let dotted = segments.join(DEFAULT_SEPARATOR).into_boxed_str();
        Self {
            segments: segments.into_boxed_slice(),
            dotted,
        }
    }

    /// Creates a path of `parent` followed by `name`.
    pub fn child(parent: &[&'static str], name: &'static str) -> Self {
        let mut segments = Vec::with_capacity(parent.len() + 1);
        segments.extend_from_slice(parent);
        segments.push(name);
        Self::new(segments)
    }

    /// Creates a path of `prefix` followed by the segments of `self`.
    pub fn with_prefix(&self, prefix: &[&'static str]) -> Self {
        let mut segments = Vec::with_capacity(prefix.len() + self.segments.len());
        segments.extend_from_slice(prefix);
        segments.extend_from_slice(&self.segments);
        Self::new(segments)
    }

    /// Returns the path segments in root-to-leaf order.
    #[inline]
    pub fn segments(&self) -> &[&'static str] {
        &self.segments
    }

    /// Returns the leaf segment, or `""` for an empty path.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.segments.last().copied().unwrap_or("")
    }

    /// Returns the number of segments.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if the path has no segments.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the segments joined by [`DEFAULT_SEPARATOR`].
    #[inline]
    pub fn dotted(&self) -> &str {
        &self.dotted
    }

    /// Joins the segments with `separator`.
    ///
    /// An empty separator means [`DEFAULT_SEPARATOR`], which borrows the
    /// precomputed form.
    pub fn join(&self, separator: &str) -> Cow<'_, str> {
        if separator.is_empty() || separator == DEFAULT_SEPARATOR {
            Cow::Borrowed(&self.dotted)
        } else {
            Cow::Owned(self.segments.join(separator))
        }
    }

    /// Returns `true` if the segments equal `segments`.
    #[inline]
    pub fn is(&self, segments: &[&str]) -> bool {
        *self.segments == *segments
    }
}

impl fmt::Debug for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.segments.iter()).finish()
    }
}

impl fmt::Display for FieldPath {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.dotted)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::FieldPath;
    use alloc::borrow::Cow;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn default_separator_is_borrowed() {
        let path = FieldPath::new(vec!["a", "b"]);
        assert!(matches!(path.join(""), Cow::Borrowed("a.b")));
        assert!(matches!(path.join("."), Cow::Borrowed("a.b")));
        assert_eq!(path.join("->"), "a->b");
    }

    #[test]
    fn empty_path() {
        let path = FieldPath::new(Vec::new());
        assert!(path.is_empty());
        assert_eq!(path.name(), "");
        assert_eq!(path.join(""), "");
    }

    #[test]
    fn child_and_prefix() {
        let parent = FieldPath::new(vec!["top"]);
        let child = FieldPath::child(parent.segments(), "mid");
        assert!(child.is(&["top", "mid"]));

        let prefixed = child.with_prefix(&["root"]);
        assert!(prefixed.is(&["root", "top", "mid"]));
        assert_eq!(prefixed.to_string(), "root.top.mid");
    }
}
