//! Unicode Bidirectional Algorithm (UAX #9).
//!
//! [`Resolver`] turns text, UTF-16 code units or raw bidi classes into a
//! [`Paragraph`] of resolved embedding levels. Lines sliced from a
//! paragraph are reordered for display; the free functions in
//! [`reorder`] and [`runs`] work on any level array.

mod brackets;
mod explicit;
mod implicit;
mod sequences;
mod weak;

pub mod levels;
pub mod line;
pub mod mirror;
pub mod paragraph;
pub mod reorder;
pub mod resolver;
pub mod runs;

pub use levels::{BaseDirection, Direction, LEVEL_OVERRIDE, MAX_DEPTH, is_rtl};
pub use line::Line;
pub use mirror::{apply_mirroring, mirrored_char};
pub use paragraph::{Paragraph, ParagraphSpan};
pub use reorder::{invert_map, reorder_logical, reorder_visual};
pub use resolver::{DepthOverflow, ResolveOptions, Resolver};
pub use runs::{BidiRun, LevelSource, count_runs, next_run, runs, visual_runs};
