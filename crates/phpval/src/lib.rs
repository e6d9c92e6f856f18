//! # Phpval
//!
//! The dynamic value core for a PHP runtime: one tagged [`Value`]
//! container per variable, plus the conversion, comparison, and
//! aliasing machinery PHP's type juggling requires.
//!
//! ## Architecture
//!
//! - **Value**: a tagged union of the ten PHP value kinds; every
//!   operation dispatches through a stateless per-kind handler
//! - **Parsing**: PHP's numeric-literal reader for string-to-number
//!   coercion, with overflow saturation and prefix semantics
//! - **Comparison**: the loose (`==`, `<`) relation across every type
//!   pair, and strict (`===`) identity
//! - **Aliasing**: shared reference cells with explicit use counts,
//!   the `&$var` substrate
//!
//! Values are single-threaded by construction (`Rc`/`RefCell`); a
//! runtime embeds one value graph per execution.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod array;
pub mod compare;
pub mod context;
pub mod error;
pub mod number;
pub mod object;
pub mod parse;
pub mod string;
pub mod value;

// Re-export main types
pub use array::{Enumerator, IntStringKey, PhpArray};
pub use compare::compare_values;
pub use context::Context;
pub use error::{Result, ValueError};
pub use number::PhpNumber;
pub use object::{PhpObject, StdObject};
pub use parse::NumberInfo;
pub use string::MutableString;
pub use value::{AliasCell, Value};

/// Phpval version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
