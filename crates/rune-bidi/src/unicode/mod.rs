//! Unicode character properties consumed by the resolver.
//!
//! The resolver never looks characters up itself; it asks a
//! [`ClassProvider`]. [`UnicodeClasses`] answers from the tables shipped
//! with `unicode-bidi`.

pub mod classes;

pub use classes::{Bracket, BracketKind, ClassProvider, UnicodeClasses};
pub use unicode_bidi::BidiClass;
