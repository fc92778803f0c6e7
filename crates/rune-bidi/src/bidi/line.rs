use unicode_bidi::BidiClass;

use crate::bidi::implicit::reset_whitespace;
use crate::bidi::levels::Direction;
use crate::bidi::mirror::apply_mirroring;
use crate::bidi::reorder::{invert_map, reorder_visual};
use crate::bidi::runs::{self, BidiRun};
use crate::error::{BidiError, Result};

/// A contiguous slice of a resolved paragraph, ready for reordering.
///
/// Lines own their data; the paragraph they came from can be dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    start: usize,
    base_level: u8,
    levels: Vec<u8>,
    classes: Vec<BidiClass>,
    text: Vec<Option<char>>,
}

impl Line {
    pub(crate) fn new(
        start: usize,
        base_level: u8,
        implicit: &[u8],
        classes: &[BidiClass],
        text: &[Option<char>],
    ) -> Self {
        let mut levels = implicit.to_vec();
        reset_whitespace(&mut levels, classes, base_level);
        Self {
            start,
            base_level,
            levels,
            classes: classes.to_vec(),
            text: text.to_vec(),
        }
    }

    pub(crate) fn empty(start: usize, base_level: u8) -> Self {
        Self {
            start,
            base_level,
            levels: Vec::new(),
            classes: Vec::new(),
            text: Vec::new(),
        }
    }

    /// Offset of the line's first position in its source paragraph.
    pub fn start(&self) -> usize {
        self.start
    }

    /// One past the line's last position in its source paragraph.
    pub fn limit(&self) -> usize {
        self.start + self.levels.len()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Embedding level of the paragraph the line belongs to.
    pub fn base_level(&self) -> u8 {
        self.base_level
    }

    pub fn direction(&self) -> Direction {
        Direction::of_levels(&self.levels, self.base_level)
    }

    /// Line-relative levels with L1 applied at the line end.
    pub fn levels(&self) -> &[u8] {
        &self.levels
    }

    /// Runs in logical order.
    pub fn runs(&self) -> Vec<BidiRun> {
        runs::runs(self)
    }

    pub fn count_runs(&self) -> usize {
        runs::count_runs(self)
    }

    /// Runs in the order they are displayed.
    pub fn visual_runs(&self) -> Vec<BidiRun> {
        runs::visual_runs(self)
    }

    /// Visual-to-logical map, line-relative.
    pub fn visual_order(&self) -> Vec<usize> {
        reorder_visual(&self.levels)
    }

    /// Logical-to-visual map, line-relative.
    pub fn logical_order(&self) -> Vec<usize> {
        invert_map(&self.visual_order())
    }

    pub fn visual_index(&self, logical: usize) -> Result<usize> {
        self.check_index("visual_index on an empty line", logical)?;
        Ok(self.logical_order()[logical])
    }

    pub fn logical_index(&self, visual: usize) -> Result<usize> {
        self.check_index("logical_index on an empty line", visual)?;
        Ok(self.visual_order()[visual])
    }

    /// The line's characters in display order.
    ///
    /// Explicit formatting characters and implicit marks (LRM, RLM, ALM)
    /// are dropped. With `mirror`, characters at odd levels are replaced by
    /// their mirrored glyph (L4).
    pub fn reordered_text(&self, mirror: bool) -> Result<String> {
        if self.text.is_empty() && !self.levels.is_empty() {
            return Err(BidiError::Unsupported(
                "reordered text of a line resolved without characters",
            ));
        }
        let mut chars = Vec::with_capacity(self.len());
        let mut levels = Vec::with_capacity(self.len());
        for i in self.visual_order() {
            let Some(c) = self.text[i] else {
                continue;
            };
            if is_bidi_control(self.classes[i], c) {
                continue;
            }
            chars.push(c);
            levels.push(self.levels[i]);
        }
        if mirror {
            apply_mirroring(&mut chars, &levels);
        }
        Ok(chars.into_iter().collect())
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

fn is_bidi_control(class: BidiClass, c: char) -> bool {
    matches!(
        class,
        BidiClass::LRE
            | BidiClass::RLE
            | BidiClass::LRO
            | BidiClass::RLO
            | BidiClass::PDF
            | BidiClass::LRI
            | BidiClass::RLI
            | BidiClass::FSI
            | BidiClass::PDI
    ) || matches!(c, '\u{200E}' | '\u{200F}' | '\u{061C}')
}

#[cfg(test)]
mod tests {
    use crate::bidi::{BaseDirection, Paragraph};

    #[test]
    fn line_end_resets_trailing_whitespace() {
        // "אב גד" in an LTR paragraph: the space stays RTL inside the
        // paragraph but trails the first line.
        let para = Paragraph::new("\u{05D0}\u{05D1} \u{05D2}\u{05D3}", BaseDirection::Ltr).unwrap();
        assert_eq!(para.levels(), &[1, 1, 1, 1, 1]);
        let line = para.slice_line(0, 3).unwrap();
        assert_eq!(line.levels(), &[1, 1, 0]);
        assert_eq!(line.count_runs(), 2);
        let rest = para.slice_line(3, 5).unwrap();
        assert_eq!(rest.start(), 3);
        assert_eq!(rest.limit(), 5);
        assert_eq!(rest.levels(), &[1, 1]);
    }

    #[test]
    fn line_outlives_paragraph() {
        let line = {
            let para = Paragraph::new("abc \u{05D0}\u{05D1}", BaseDirection::Ltr).unwrap();
            para.slice_line(2, 6).unwrap()
        };
        assert_eq!(line.levels(), &[0, 0, 1, 1]);
        assert_eq!(line.visual_order(), vec![0, 1, 3, 2]);
    }

    #[test]
    fn empty_line_has_no_runs() {
        let para = Paragraph::new("abc", BaseDirection::Rtl).unwrap();
        let line = para.slice_line(1, 1).unwrap();
        assert!(line.is_empty());
        assert_eq!(line.count_runs(), 0);
        assert_eq!(line.base_level(), 1);
        assert!(line.visual_index(0).is_err());
    }

    #[test]
    fn reordered_text_mirrors_and_drops_controls() {
        let para = Paragraph::new("a\u{202B}(\u{05D0})\u{202C}b", BaseDirection::Ltr).unwrap();
        let line = para.slice_line(0, para.len()).unwrap();
        assert_eq!(line.reordered_text(true).unwrap(), "a(\u{05D0})b");
        assert_eq!(line.reordered_text(false).unwrap(), "a)\u{05D0}(b");
    }

    #[test]
    fn class_only_lines_cannot_render_text() {
        use unicode_bidi::BidiClass;
        let para = Paragraph::from_classes(&[BidiClass::L], BaseDirection::Ltr).unwrap();
        let line = para.slice_line(0, 1).unwrap();
        assert!(line.reordered_text(false).is_err());
    }
}
