//! Context records - immutable key/value mappings visible to a subtree.

use std::any::{Any, type_name};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

// =============================================================================
// ContextValue
// =============================================================================

/// An opaque, cheaply clonable context value.
///
/// Usually an [`Accessor`](crate::types::Accessor), but anything `'static`
/// can be published. Cloning shares the same allocation.
#[derive(Clone)]
pub struct ContextValue(Rc<dyn Any>);

impl ContextValue {
    pub fn new<T: 'static>(value: T) -> Self {
        Self(Rc::new(value))
    }

    /// Borrow the value if it holds a `T`.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Clone the value out if it holds a `T`.
    pub fn get<T: Clone + 'static>(&self) -> Option<T> {
        self.downcast_ref::<T>().cloned()
    }

    /// Whether both handles share the same allocation.
    pub fn ptr_eq(&self, other: &ContextValue) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ContextValue(..)")
    }
}

// =============================================================================
// ContextRecord
// =============================================================================

/// Immutable-by-convention mapping from key to [`ContextValue`].
///
/// Cloning is an `Rc` bump, so a record can be snapshotted freely. The
/// builder methods copy-on-write, so a snapshot that is already shared is
/// never changed under its holders.
#[derive(Clone, Default)]
pub struct ContextRecord {
    entries: Rc<HashMap<String, ContextValue>>,
}

impl ContextRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) `key`, returning the updated record.
    pub fn with<T: 'static>(self, key: impl Into<String>, value: T) -> Self {
        self.with_value(key, ContextValue::new(value))
    }

    /// Like [`with`](Self::with), for an already wrapped value.
    pub fn with_value(mut self, key: impl Into<String>, value: ContextValue) -> Self {
        Rc::make_mut(&mut self.entries).insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContextValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Shallow merge: `own` keys shadow `self` keys, the rest are inherited.
    ///
    /// Returns a new record; neither input is modified.
    pub fn merge(&self, own: &ContextRecord) -> ContextRecord {
        if own.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return own.clone();
        }
        let mut entries = HashMap::with_capacity(self.len() + own.len());
        for (key, value) in self.entries.iter().chain(own.entries.iter()) {
            entries.insert(key.clone(), value.clone());
        }
        ContextRecord {
            entries: Rc::new(entries),
        }
    }

    /// Whether both records share the same storage.
    pub fn ptr_eq(&self, other: &ContextRecord) -> bool {
        Rc::ptr_eq(&self.entries, &other.entries)
    }

    /// Typed read of a single key.
    pub fn value<T: Clone + 'static>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(ContextValue::get::<T>)
    }

    pub(crate) fn expected_name<T>() -> &'static str {
        type_name::<T>()
    }
}

impl<K: Into<String>> FromIterator<(K, ContextValue)> for ContextRecord {
    fn from_iter<I: IntoIterator<Item = (K, ContextValue)>>(iter: I) -> Self {
        let entries = iter.into_iter().map(|(k, v)| (k.into(), v)).collect();
        ContextRecord {
            entries: Rc::new(entries),
        }
    }
}

impl fmt::Debug for ContextRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.keys().collect();
        keys.sort_unstable();
        f.debug_struct("ContextRecord").field("keys", &keys).finish()
    }
}

/// Build a [`ContextRecord`] from `key => value` pairs.
///
/// ```ignore
/// let map = context_map! { "foo" => Accessor::from(1), "bar" => Accessor::from(2) };
/// ```
#[macro_export]
macro_rules! context_map {
    () => {
        $crate::scope::ContextRecord::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::scope::ContextRecord::new()$(.with($key, $value))+
    };
}
