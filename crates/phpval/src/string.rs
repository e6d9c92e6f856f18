//! Mutable string builder collaborator
//!
//! The full binary-string subsystem lives outside this crate; the value
//! core only needs the conversion surface and a deep copy, so the
//! builder here is interface-level. Immutable text (`Value::Str`) and a
//! builder hold the same logical type at different representations.

use crate::number::PhpNumber;
use crate::parse::{self, NumberInfo};

/// A mutable string under construction.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MutableString {
    text: String,
}

impl MutableString {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// True when nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Append a chunk of text.
    pub fn append(&mut self, chunk: &str) {
        self.text.push_str(chunk);
    }

    /// View the accumulated content.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// PHP truthiness: empty and `"0"` are false.
    pub fn to_bool(&self) -> bool {
        !self.text.is_empty() && self.text != "0"
    }

    /// Integer coercion through the numeric automaton.
    pub fn to_long(&self) -> i64 {
        parse::str_to_long(&self.text)
    }

    /// Float coercion through the numeric automaton.
    pub fn to_double(&self) -> f64 {
        parse::str_to_double(&self.text)
    }

    /// Classified numeric coercion, for arithmetic.
    pub fn to_number(&self) -> (NumberInfo, PhpNumber) {
        parse::str_to_number(&self.text)
    }

    /// Copy for value-assignment semantics.
    pub fn deep_copy(&self) -> MutableString {
        self.clone()
    }
}

impl<T: Into<String>> From<T> for MutableString {
    fn from(text: T) -> Self {
        Self { text: text.into() }
    }
}
