//! Bidirectional text resolution for Rune.
//!
//! Resolves embedding levels for mixed left-to-right and right-to-left
//! text and reorders lines for display, following the Unicode
//! Bidirectional Algorithm.
//!
//! ```
//! use rune_bidi::{BaseDirection, Paragraph};
//!
//! let para = Paragraph::new("abc \u{05D0}\u{05D1}", BaseDirection::Ltr)?;
//! assert_eq!(para.levels(), &[0, 0, 0, 0, 1, 1]);
//! assert_eq!(para.visual_order(), vec![0, 1, 2, 3, 5, 4]);
//! # Ok::<(), rune_bidi::BidiError>(())
//! ```

pub mod bidi;
pub mod error;
pub mod unicode;

pub use bidi::{
    BaseDirection, BidiRun, DepthOverflow, Direction, LEVEL_OVERRIDE, LevelSource, Line,
    MAX_DEPTH, Paragraph, ParagraphSpan, ResolveOptions, Resolver, apply_mirroring, count_runs,
    invert_map, is_rtl, mirrored_char, next_run, reorder_logical, reorder_visual, runs,
    visual_runs,
};
pub use error::{BidiError, ErrorKind, Result};
pub use unicode::{BidiClass, ClassProvider, UnicodeClasses};
