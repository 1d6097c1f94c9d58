//! String interner for identifier storage.
//!
//! Provides O(1) interning and lookup. Interned strings live for the
//! lifetime of the interner; `Name`s index into its storage.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::Name;

/// Interior state of the interner.
struct InternerInner {
    /// Map from string content to index.
    map: FxHashMap<Box<str>, u32>,
    /// Storage for string contents, indexed by `Name::raw()`.
    strings: Vec<Box<str>>,
}

/// String interner with lock-guarded interior mutability.
///
/// Interning takes `&self`, so a single interner can be shared by the
/// lexer, parser, and evaluator without threading `&mut` through every
/// call path.
pub struct StringInterner {
    inner: RwLock<InternerInner>,
}

impl StringInterner {
    /// Create a new interner with the empty string pre-interned at index 0.
    pub fn new() -> Self {
        let mut map = FxHashMap::default();
        map.insert(Box::from(""), 0);
        StringInterner {
            inner: RwLock::new(InternerInner {
                map,
                strings: vec![Box::from("")],
            }),
        }
    }

    /// Intern a string, returning its `Name`.
    ///
    /// Interning the same string twice returns the same `Name`.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` distinct strings are interned.
    pub fn intern(&self, s: &str) -> Name {
        {
            let inner = self.inner.read();
            if let Some(&idx) = inner.map.get(s) {
                return Name::from_raw(idx);
            }
        }
        let mut inner = self.inner.write();
        // Re-check under the write lock: another caller may have interned
        // between the read unlock and here.
        if let Some(&idx) = inner.map.get(s) {
            return Name::from_raw(idx);
        }
        let idx = u32::try_from(inner.strings.len()).expect("interner capacity exceeded");
        inner.strings.push(Box::from(s));
        inner.map.insert(Box::from(s), idx);
        Name::from_raw(idx)
    }

    /// Look up the string for a `Name`, cloning it out of storage.
    ///
    /// Returns the empty string for a `Name` not produced by this interner.
    pub fn resolve(&self, name: Name) -> String {
        let inner = self.inner.read();
        inner
            .strings
            .get(name.raw() as usize)
            .map(|s| s.to_string())
            .unwrap_or_default()
    }

    /// Number of interned strings (including the pre-interned empty string).
    pub fn len(&self) -> usize {
        self.inner.read().strings.len()
    }

    /// Whether the interner holds only the pre-interned empty string.
    pub fn is_empty(&self) -> bool {
        self.len() == 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn intern_same_string_returns_same_name() {
        let interner = StringInterner::new();
        let a = interner.intern("fib");
        let b = interner.intern("fib");
        assert_eq!(a, b);
    }

    #[test]
    fn intern_distinct_strings_returns_distinct_names() {
        let interner = StringInterner::new();
        let a = interner.intern("inner");
        let b = interner.intern("outer");
        assert_ne!(a, b);
    }

    #[test]
    fn resolve_roundtrip() {
        let interner = StringInterner::new();
        let name = interner.intern("makeClosure");
        assert_eq!(interner.resolve(name), "makeClosure");
    }

    #[test]
    fn empty_string_is_preinterned() {
        let interner = StringInterner::new();
        assert_eq!(interner.intern(""), Name::EMPTY);
        assert!(interner.is_empty());
    }

    #[test]
    fn resolve_unknown_name_is_empty() {
        let interner = StringInterner::new();
        assert_eq!(interner.resolve(Name::from_raw(999)), "");
    }
}
