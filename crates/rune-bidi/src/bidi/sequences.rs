//! Isolating run sequences (BD13, X10).
//!
//! Characters removed by X9 stay in the arrays but never appear in a
//! sequence; every later rule walks sequences, so they are skipped for free.

use unicode_bidi::BidiClass;

use crate::bidi::levels::is_rtl;
use crate::unicode::classes::{is_isolate_initiator, is_removed_by_x9};

/// A chain of level runs joined across matched isolate initiator/PDI pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct IsolatingRunSequence {
    /// Paragraph-relative indices, logical order, removed characters excluded.
    pub indices: Vec<usize>,
    pub level: u8,
    /// Start-of-sequence type, `L` or `R`.
    pub sos: BidiClass,
    /// End-of-sequence type, `L` or `R`.
    pub eos: BidiClass,
}

impl IsolatingRunSequence {
    /// Embedding direction of the sequence as a strong type.
    pub fn embedding_direction(&self) -> BidiClass {
        strong_for_level(self.level)
    }
}

pub(crate) fn strong_for_level(level: u8) -> BidiClass {
    if is_rtl(level) {
        BidiClass::R
    } else {
        BidiClass::L
    }
}

/// Matching PDI for every isolate initiator (BD9).
pub(crate) fn matching_pdis(classes: &[BidiClass]) -> Vec<Option<usize>> {
    let mut matches = vec![None; classes.len()];
    let mut open: Vec<usize> = Vec::new();
    for (i, &class) in classes.iter().enumerate() {
        if is_isolate_initiator(class) {
            open.push(i);
        } else if class == BidiClass::PDI {
            if let Some(initiator) = open.pop() {
                matches[initiator] = Some(i);
            }
        }
    }
    matches
}

/// Split a paragraph into isolating run sequences.
///
/// `classes` are the original classes, `levels` the explicit levels from
/// X1-X8.
pub(crate) fn isolating_run_sequences(
    classes: &[BidiClass],
    levels: &[u8],
    para_level: u8,
) -> Vec<IsolatingRunSequence> {
    let runs = level_runs(classes, levels);
    if runs.is_empty() {
        return Vec::new();
    }

    let pdis = matching_pdis(classes);
    let mut run_of = vec![usize::MAX; classes.len()];
    for (r, run) in runs.iter().enumerate() {
        for &i in run {
            run_of[i] = r;
        }
    }

    let mut assigned = vec![false; runs.len()];
    let mut sequences = Vec::new();

    for r in 0..runs.len() {
        if assigned[r] {
            continue;
        }

        let mut chain = vec![r];
        assigned[r] = true;
        loop {
            let last_run = chain[chain.len() - 1];
            let last = runs[last_run][runs[last_run].len() - 1];
            let next = match pdis[last] {
                Some(pdi) if is_isolate_initiator(classes[last]) => run_of[pdi],
                _ => break,
            };
            if next == usize::MAX || assigned[next] {
                break;
            }
            assigned[next] = true;
            chain.push(next);
        }

        let first_run = chain[0];
        let last_run = chain[chain.len() - 1];
        let indices: Vec<usize> = chain.iter().flat_map(|&c| runs[c].iter().copied()).collect();
        let level = levels[indices[0]];
        let last = indices[indices.len() - 1];

        let before = if first_run == 0 {
            para_level
        } else {
            levels[runs[first_run - 1][0]]
        };
        let after = if is_isolate_initiator(classes[last]) || last_run + 1 == runs.len() {
            para_level
        } else {
            levels[runs[last_run + 1][0]]
        };

        sequences.push(IsolatingRunSequence {
            indices,
            level,
            sos: strong_for_level(level.max(before)),
            eos: strong_for_level(level.max(after)),
        });
    }

    log::trace!(
        "{} level runs grouped into {} isolating run sequences",
        runs.len(),
        sequences.len()
    );
    sequences
}

/// Maximal same-level runs over the characters X9 keeps.
fn level_runs(classes: &[BidiClass], levels: &[u8]) -> Vec<Vec<usize>> {
    let mut runs: Vec<Vec<usize>> = Vec::new();
    let mut current_level = None;
    for (i, &class) in classes.iter().enumerate() {
        if is_removed_by_x9(class) {
            continue;
        }
        match runs.last_mut() {
            Some(run) if current_level == Some(levels[i]) => run.push(i),
            _ => {
                runs.push(vec![i]);
                current_level = Some(levels[i]);
            }
        }
    }
    runs
}
