use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;

/// A single field value read from a [`Record`].
///
/// Values are only ever read: the engine compares and stringifies them, it never writes them back.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue<'a> {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(Cow<'a, str>),
}

impl<'a> FieldValue<'a> {
    pub fn text(s: impl Into<Cow<'a, str>>) -> Self {
        Self::Text(s.into())
    }

    pub fn into_owned(self) -> FieldValue<'static> {
        match self {
            Self::Bool(b) => FieldValue::Bool(b),
            Self::Int(i) => FieldValue::Int(i),
            Self::Float(f) => FieldValue::Float(f),
            Self::Text(s) => FieldValue::Text(Cow::Owned(s.into_owned())),
        }
    }

    /// Borrows the value without cloning owned text.
    pub fn reborrow(&self) -> FieldValue<'_> {
        match self {
            Self::Bool(b) => FieldValue::Bool(*b),
            Self::Int(i) => FieldValue::Int(*i),
            Self::Float(f) => FieldValue::Float(*f),
            Self::Text(s) => FieldValue::Text(Cow::Borrowed(s.as_ref())),
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            Self::Bool(_) => 0,
            Self::Int(_) | Self::Float(_) => 1,
            Self::Text(_) => 2,
        }
    }

    /// Total order used by the sort stage.
    ///
    /// Same-kind values use their natural order (floats via `total_cmp`), integers and floats
    /// compare numerically, and mixed kinds order as `Bool < number < Text`.
    pub fn total_cmp(&self, other: &FieldValue<'_>) -> Ordering {
        match (self, other) {
            (Self::Bool(a), FieldValue::Bool(b)) => a.cmp(b),
            (Self::Int(a), FieldValue::Int(b)) => a.cmp(b),
            (Self::Float(a), FieldValue::Float(b)) => a.total_cmp(b),
            (Self::Int(a), FieldValue::Float(b)) => (*a as f64).total_cmp(b),
            (Self::Float(a), FieldValue::Int(b)) => a.total_cmp(&(*b as f64)),
            (Self::Text(a), FieldValue::Text(b)) => a.as_ref().cmp(b.as_ref()),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }

    /// Case-insensitive containment check against an already-lowercased needle.
    pub(crate) fn contains_lowercase(&self, needle: &str) -> bool {
        match self {
            Self::Text(s) => s.to_lowercase().contains(needle),
            other => other.to_string().to_lowercase().contains(needle),
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for FieldValue<'static> {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for FieldValue<'static> {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for FieldValue<'static> {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<f64> for FieldValue<'static> {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for FieldValue<'static> {
    fn from(v: String) -> Self {
        Self::Text(Cow::Owned(v))
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(v: &'a str) -> Self {
        Self::Text(Cow::Borrowed(v))
    }
}

/// An opaque item the engine can filter, sort, and window.
///
/// The engine is generic over the item's shape; it only needs to look fields up by name and
/// enumerate them for free-text search.
pub trait Record {
    /// Returns the value of `key`, or `None` when the field is absent.
    fn field(&self, key: &str) -> Option<FieldValue<'_>>;

    /// Visits every present field.
    fn for_each_field(&self, f: &mut dyn FnMut(&str, FieldValue<'_>));

    /// Timestamp used by date-range predicates (e.g. an event's start time).
    ///
    /// Items without a timestamp are never excluded by a date range.
    fn timestamp_ms(&self) -> Option<i64> {
        None
    }
}

impl Record for BTreeMap<String, FieldValue<'static>> {
    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        self.get(key).map(FieldValue::reborrow)
    }

    fn for_each_field(&self, f: &mut dyn FnMut(&str, FieldValue<'_>)) {
        for (k, v) in self {
            f(k, v.reborrow());
        }
    }
}

impl<S: BuildHasher> Record for HashMap<String, FieldValue<'static>, S> {
    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        self.get(key).map(FieldValue::reborrow)
    }

    fn for_each_field(&self, f: &mut dyn FnMut(&str, FieldValue<'_>)) {
        for (k, v) in self {
            f(k, v.reborrow());
        }
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        (**self).field(key)
    }

    fn for_each_field(&self, f: &mut dyn FnMut(&str, FieldValue<'_>)) {
        (**self).for_each_field(f)
    }

    fn timestamp_ms(&self) -> Option<i64> {
        (**self).timestamp_ms()
    }
}

impl<R: Record + ?Sized> Record for std::sync::Arc<R> {
    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        (**self).field(key)
    }

    fn for_each_field(&self, f: &mut dyn FnMut(&str, FieldValue<'_>)) {
        (**self).for_each_field(f)
    }

    fn timestamp_ms(&self) -> Option<i64> {
        (**self).timestamp_ms()
    }
}
