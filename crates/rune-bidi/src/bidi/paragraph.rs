use core::ops::Range;

use unicode_bidi::BidiClass;

use crate::bidi::levels::{BaseDirection, Direction};
use crate::bidi::line::Line;
use crate::bidi::reorder::{invert_map, reorder_visual};
use crate::bidi::resolver::{Resolved, Resolver};
use crate::error::{BidiError, Result};

/// One paragraph of the input as split by P1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParagraphSpan {
    /// Index range, including the trailing paragraph separator if any.
    pub range: Range<usize>,
    /// Paragraph embedding level (UAX-9).
    pub level: u8,
    /// Direction derived from the final levels of the span.
    pub direction: Direction,
}

/// Resolved bidi state of a text buffer.
///
/// Indices are positions in the input: `char`s for [`Paragraph::new`],
/// UTF-16 code units for [`Paragraph::from_utf16`]. Text containing
/// paragraph separators is resolved one paragraph at a time; see
/// [`Paragraph::paragraphs`].
#[derive(Debug, Clone)]
pub struct Paragraph {
    /// Per position; `None` for the trailing unit of a surrogate pair.
    /// Empty when resolved from classes alone.
    text: Vec<Option<char>>,
    classes: Vec<BidiClass>,
    base_direction: BaseDirection,
    base_level: u8,
    seeds: Option<Vec<u8>>,
    spans: Vec<ParagraphSpan>,
    implicit: Vec<u8>,
    levels: Vec<u8>,
}

impl Paragraph {
    /// Resolve `text` with the default resolver.
    pub fn new(text: &str, base: BaseDirection) -> Result<Self> {
        Resolver::new().resolve(text, base)
    }

    /// Resolve `text` seeded with per-character embedding levels.
    pub fn with_levels(text: &str, base: BaseDirection, seeds: &[u8]) -> Result<Self> {
        Resolver::new().resolve_with_levels(text, base, seeds)
    }

    /// Resolve UTF-16 text, producing one level per code unit.
    pub fn from_utf16(units: &[u16], base: BaseDirection, seeds: Option<&[u8]>) -> Result<Self> {
        Resolver::new().resolve_utf16(units, base, seeds)
    }

    /// Resolve a sequence of bidi classes.
    pub fn from_classes(classes: &[BidiClass], base: BaseDirection) -> Result<Self> {
        Resolver::new().resolve_classes(classes, base, None)
    }

    pub(crate) fn from_resolved(
        resolved: Resolved,
        text: Vec<Option<char>>,
        base_direction: BaseDirection,
        seeds: Option<Vec<u8>>,
    ) -> Self {
        Self {
            text,
            classes: resolved.classes,
            base_direction,
            base_level: resolved.base_level,
            seeds,
            spans: resolved.spans,
            implicit: resolved.implicit,
            levels: resolved.levels,
        }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// The direction requested at resolution time.
    pub fn base_direction(&self) -> BaseDirection {
        self.base_direction
    }

    /// Embedding level of the first paragraph.
    pub fn base_level(&self) -> u8 {
        self.base_level
    }

    /// LTR if every level is even, RTL if every level is odd, else mixed.
    pub fn direction(&self) -> Direction {
        Direction::of_levels(&self.levels, self.base_level)
    }

    /// Resolved levels, one per position.
    pub fn levels(&self) -> &[u8] {
        &self.levels
    }

    /// Original bidi classes, one per position.
    pub fn classes(&self) -> &[BidiClass] {
        &self.classes
    }

    /// Seed levels supplied at resolution time.
    pub fn seed_levels(&self) -> Option<&[u8]> {
        self.seeds.as_deref()
    }

    pub fn paragraphs(&self) -> &[ParagraphSpan] {
        &self.spans
    }

    /// The paragraph containing position `index`.
    pub fn paragraph_at(&self, index: usize) -> Option<&ParagraphSpan> {
        let pos = self.spans.partition_point(|span| span.range.end <= index);
        self.spans.get(pos).filter(|span| span.range.contains(&index))
    }

    /// Copy `[start, limit)` into an independent line.
    ///
    /// L1 is re-applied with `limit` as the end of the line, so trailing
    /// whitespace of a line broken mid-paragraph drops to the paragraph
    /// level. An empty range yields an empty line. A non-empty range must
    /// stay inside one paragraph.
    pub fn slice_line(&self, start: usize, limit: usize) -> Result<Line> {
        let len = self.len();
        if start > limit || limit > len {
            return Err(BidiError::InvalidRange { start, limit, len });
        }
        if start == limit {
            let level = self
                .paragraph_at(start)
                .map_or(self.base_level, |span| span.level);
            return Ok(Line::empty(start, level));
        }

        let span = self
            .paragraph_at(start)
            .ok_or(BidiError::InvalidRange { start, limit, len })?;
        if limit > span.range.end {
            return Err(BidiError::CrossesParagraph { start, limit });
        }

        let text = if self.text.is_empty() {
            &[][..]
        } else {
            &self.text[start..limit]
        };
        Ok(Line::new(
            start,
            span.level,
            &self.implicit[start..limit],
            &self.classes[start..limit],
            text,
        ))
    }

    /// Visual-to-logical map, each paragraph reordered on its own.
    pub fn visual_order(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.len());
        for span in &self.spans {
            let offset = span.range.start;
            order.extend(
                reorder_visual(&self.levels[span.range.clone()])
                    .into_iter()
                    .map(|i| i + offset),
            );
        }
        order
    }

    /// Logical-to-visual map, the inverse of [`Paragraph::visual_order`].
    pub fn logical_order(&self) -> Vec<usize> {
        invert_map(&self.visual_order())
    }

    /// Visual position of logical position `logical`.
    pub fn visual_index(&self, logical: usize) -> Result<usize> {
        self.check_index("visual_index on empty text", logical)?;
        Ok(self.logical_order()[logical])
    }

    /// Logical position displayed at visual position `visual`.
    pub fn logical_index(&self, visual: usize) -> Result<usize> {
        self.check_index("logical_index on empty text", visual)?;
        Ok(self.visual_order()[visual])
    }

    /// Visual string of `[start, limit)`, mirrored and without controls.
    pub fn reordered_text(&self, start: usize, limit: usize) -> Result<String> {
        self.slice_line(start, limit)?.reordered_text(true)
    }

    fn check_index(&self, operation: &'static str, index: usize) -> Result<()> {
        if self.is_empty() {
            return Err(BidiError::Unsupported(operation));
        }
        if index >= self.len() {
            return Err(BidiError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        Ok(())
    }
}
