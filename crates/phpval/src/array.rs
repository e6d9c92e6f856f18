//! Ordered array collaborator and the key domain
//!
//! The full copy-on-write array subsystem lives outside this crate; the
//! value core needs the interface boundary: count, a logical deep copy,
//! ordered iteration (plain and by-reference), and the loose/strict
//! comparison entry points. The IndexMap preserves PHP's insertion
//! order.
//!
//! The integer/string key-normalization rule is owned here (by this
//! crate, not re-derived by the container): a string folds to an
//! integer key only when it is the canonical decimal rendering of an
//! `i64` — no leading zeros, no `+`, no `-0`, no fraction.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::error::Result;
use crate::value::Value;

/// A lookup key: integer or text, never anything else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IntStringKey {
    /// Integer key
    Int(i64),

    /// Text key
    Str(Rc<str>),
}

impl IntStringKey {
    /// Normalize a string key, folding canonical integers.
    ///
    /// `"8"` and `"-8"` fold; `"08"`, `"8.0"`, `"+8"`, `"-0"`, and
    /// anything past the `i64` range stay text.
    pub fn from_str_key(s: &str) -> IntStringKey {
        match canonical_int(s) {
            Some(i) => IntStringKey::Int(i),
            None => IntStringKey::Str(Rc::from(s)),
        }
    }
}

/// The canonical-integer check behind key folding.
fn canonical_int(s: &str) -> Option<i64> {
    let bytes = s.as_bytes();
    let digits = match bytes.first() {
        Some(b'-') => &bytes[1..],
        _ => bytes,
    };
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    if digits[0] == b'0' && digits.len() > 1 {
        return None;
    }
    if bytes[0] == b'-' && digits == b"0" {
        return None;
    }
    s.parse::<i64>().ok()
}

impl From<i64> for IntStringKey {
    fn from(i: i64) -> Self {
        IntStringKey::Int(i)
    }
}

impl From<&str> for IntStringKey {
    fn from(s: &str) -> Self {
        IntStringKey::from_str_key(s)
    }
}

impl fmt::Display for IntStringKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntStringKey::Int(i) => write!(f, "{}", i),
            IntStringKey::Str(s) => write!(f, "{}", s),
        }
    }
}

/// An insertion-ordered PHP array.
#[derive(Debug, Default)]
pub struct PhpArray {
    entries: IndexMap<IntStringKey, Value>,
    next_index: i64,
}

impl PhpArray {
    /// Create an empty array.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the array holds no elements.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a value by key.
    pub fn get(&self, key: &IntStringKey) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Insert or overwrite a keyed element; integer keys advance the
    /// next append index past themselves. The index never advances past
    /// `i64::MAX`, so it cannot wrap negative.
    pub fn insert(&mut self, key: IntStringKey, value: Value) {
        if let IntStringKey::Int(i) = key {
            if i >= self.next_index {
                self.next_index = i.saturating_add(1);
            }
        }
        self.entries.insert(key, value);
    }

    /// Append at the next free integer index.
    pub fn append(&mut self, value: Value) {
        let key = IntStringKey::Int(self.next_index);
        self.insert(key, value);
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&IntStringKey, &Value)> {
        self.entries.iter()
    }

    /// Logical deep copy: nested arrays and builders are cloned, scalar
    /// and reference payloads copy cheaply.
    pub fn clone_value(&self) -> PhpArray {
        PhpArray {
            entries: self
                .entries
                .iter()
                .map(|(k, v)| (k.clone(), v.deep_copy()))
                .collect(),
            next_index: self.next_index,
        }
    }

    /// Loose three-way comparison: shorter arrays order first, equal
    /// lengths compare element-wise by the left side's keys. A key
    /// missing on the right makes the left side greater.
    pub fn compare(&self, other: &PhpArray) -> Result<Ordering> {
        match self.len().cmp(&other.len()) {
            Ordering::Equal => {}
            ord => return Ok(ord),
        }
        for (key, value) in &self.entries {
            match other.entries.get(key) {
                None => return Ok(Ordering::Greater),
                Some(rhs) => match value.compare(rhs)? {
                    Ordering::Equal => {}
                    ord => return Ok(ord),
                },
            }
        }
        Ok(Ordering::Equal)
    }

    /// Identity comparison: same keys, same order, strictly equal
    /// values.
    pub fn strict_eq(&self, other: &PhpArray) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .zip(other.entries.iter())
                .all(|((ka, va), (kb, vb))| ka == kb && va.strict_equals(vb))
    }

    /// Snapshot an enumerator over the current entries.
    ///
    /// With `by_ref` every visited slot is first promoted to an alias in
    /// place, so writes through the yielded value land back in the
    /// array.
    pub fn enumerator(&mut self, by_ref: bool) -> Enumerator {
        if by_ref {
            for (_, slot) in self.entries.iter_mut() {
                slot.ensure_alias();
            }
        }
        let snapshot: Vec<(IntStringKey, Value)> = self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Enumerator {
            entries: snapshot.into_iter(),
        }
    }
}

/// Ordered key/value iteration over an array snapshot.
#[derive(Debug)]
pub struct Enumerator {
    entries: std::vec::IntoIter<(IntStringKey, Value)>,
}

impl Iterator for Enumerator {
    type Item = (Value, Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(|(k, v)| (Value::from(k), v))
    }
}
