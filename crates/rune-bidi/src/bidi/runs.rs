use core::ops::Range;

use crate::bidi::levels::{Direction, LEVEL_OVERRIDE, is_rtl};
use crate::bidi::line::Line;
use crate::bidi::paragraph::Paragraph;
use crate::bidi::reorder::reorder_visual;

/// Anything that exposes a per-position level array.
pub trait LevelSource {
    fn levels(&self) -> &[u8];
}

impl LevelSource for [u8] {
    fn levels(&self) -> &[u8] {
        self
    }
}

impl LevelSource for Vec<u8> {
    fn levels(&self) -> &[u8] {
        self
    }
}

impl LevelSource for Paragraph {
    fn levels(&self) -> &[u8] {
        Paragraph::levels(self)
    }
}

impl LevelSource for Line {
    fn levels(&self) -> &[u8] {
        Line::levels(self)
    }
}

/// A maximal run of positions sharing one embedding level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BidiRun {
    pub start: usize,
    pub limit: usize,
    /// Embedding level for this run.
    pub level: u8,
}

impl BidiRun {
    pub fn range(&self) -> Range<usize> {
        self.start..self.limit
    }

    pub fn len(&self) -> usize {
        self.limit - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.limit
    }

    pub fn is_rtl(&self) -> bool {
        is_rtl(self.level)
    }

    pub fn direction(&self) -> Direction {
        Direction::of_level(self.level)
    }
}

/// The run starting at `cursor` and the cursor just past it.
///
/// Returns `None` once `cursor` reaches the end. The override flag bit is
/// not part of a level.
pub fn next_run(levels: &[u8], cursor: usize) -> Option<(BidiRun, usize)> {
    let level = levels.get(cursor)? & !LEVEL_OVERRIDE;
    let limit = levels[cursor..]
        .iter()
        .position(|&l| l & !LEVEL_OVERRIDE != level)
        .map_or(levels.len(), |offset| cursor + offset);
    Some((
        BidiRun {
            start: cursor,
            limit,
            level,
        },
        limit,
    ))
}

/// All runs in logical order.
pub fn runs<S: LevelSource + ?Sized>(source: &S) -> Vec<BidiRun> {
    let levels = source.levels();
    let mut out = Vec::new();
    let mut cursor = 0;
    while let Some((run, next)) = next_run(levels, cursor) {
        out.push(run);
        cursor = next;
    }
    out
}

/// Number of runs; `0` for empty input.
pub fn count_runs<S: LevelSource + ?Sized>(source: &S) -> usize {
    let levels = source.levels();
    match levels.first() {
        None => 0,
        Some(_) => {
            1 + levels
                .windows(2)
                .filter(|pair| pair[0] & !LEVEL_OVERRIDE != pair[1] & !LEVEL_OVERRIDE)
                .count()
        }
    }
}

/// Runs in visual order, treating the whole source as one line.
///
/// Reordering whole runs by their levels gives the same arrangement as
/// reordering the positions one by one.
pub fn visual_runs<S: LevelSource + ?Sized>(source: &S) -> Vec<BidiRun> {
    let logical = runs(source);
    let run_levels: Vec<u8> = logical.iter().map(|run| run.level).collect();
    reorder_visual(&run_levels)
        .into_iter()
        .map(|i| logical[i])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_where_levels_change() {
        let levels = [0u8, 0, 1, 1, 2, 0];
        let found = runs(&levels[..]);
        assert_eq!(
            found,
            vec![
                BidiRun { start: 0, limit: 2, level: 0 },
                BidiRun { start: 2, limit: 4, level: 1 },
                BidiRun { start: 4, limit: 5, level: 2 },
                BidiRun { start: 5, limit: 6, level: 0 },
            ]
        );
        assert_eq!(count_runs(&levels[..]), 4);
        assert!(found[1].is_rtl());
        assert_eq!(found[2].direction(), Direction::Ltr);
    }

    #[test]
    fn stepwise_iteration() {
        let levels = vec![1u8, 1, 0];
        let (first, cursor) = next_run(&levels, 0).unwrap();
        assert_eq!(first.range(), 0..2);
        let (second, cursor) = next_run(&levels, cursor).unwrap();
        assert_eq!(second.len(), 1);
        assert!(next_run(&levels, cursor).is_none());
    }

    #[test]
    fn empty_levels_have_no_runs() {
        let levels: Vec<u8> = Vec::new();
        assert!(runs(&levels).is_empty());
        assert_eq!(count_runs(&levels), 0);
        assert!(visual_runs(&levels).is_empty());
    }

    #[test]
    fn visual_runs_reverse_rtl_groups() {
        // LTR "ab" then RTL "CD" then LTR number "12" inside it.
        let levels = vec![0u8, 0, 1, 1, 2, 2];
        let order: Vec<(usize, usize)> = visual_runs(&levels)
            .iter()
            .map(|run| (run.start, run.limit))
            .collect();
        assert_eq!(order, vec![(0, 2), (4, 6), (2, 4)]);
    }

    #[test]
    fn override_bit_does_not_split_runs() {
        let levels = [1u8, 1 | LEVEL_OVERRIDE];
        assert_eq!(count_runs(&levels[..]), 1);
        assert_eq!(runs(&levels[..])[0].level, 1);
    }
}
