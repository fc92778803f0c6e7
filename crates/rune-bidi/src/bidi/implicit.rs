//! Neutral resolution (N1-N2), implicit levels (I1-I2) and the line-end
//! whitespace reset (L1).

use unicode_bidi::BidiClass;

use crate::bidi::sequences::IsolatingRunSequence;
use crate::unicode::classes::{is_neutral_or_isolate, is_removed_by_x9};

/// Resolve neutral and isolate types of one sequence to `L` or `R`.
pub(crate) fn resolve_neutral(types: &mut [BidiClass], seq: &IsolatingRunSequence) {
    let indices = &seq.indices;
    let embedding = seq.embedding_direction();

    let mut k = 0;
    while k < indices.len() {
        if !is_neutral_or_isolate(types[indices[k]]) {
            k += 1;
            continue;
        }
        let start = k;
        while k < indices.len() && is_neutral_or_isolate(types[indices[k]]) {
            k += 1;
        }

        let before = if start == 0 {
            seq.sos
        } else {
            strong_for_neutrals(types[indices[start - 1]])
        };
        let after = if k == indices.len() {
            seq.eos
        } else {
            strong_for_neutrals(types[indices[k]])
        };
        let resolved = if before == after { before } else { embedding };

        for &i in &indices[start..k] {
            types[i] = resolved;
        }
    }
}

/// EN and AN act as R next to neutrals.
fn strong_for_neutrals(class: BidiClass) -> BidiClass {
    match class {
        BidiClass::EN | BidiClass::AN => BidiClass::R,
        other => other,
    }
}

/// Raise levels by resolved type (I1, I2).
pub(crate) fn resolve_implicit(levels: &mut [u8], types: &[BidiClass], seq: &IsolatingRunSequence) {
    for &i in &seq.indices {
        let level = levels[i];
        levels[i] = match (level & 1, types[i]) {
            (0, BidiClass::R) => level + 1,
            (0, BidiClass::AN | BidiClass::EN) => level + 2,
            (1, BidiClass::L | BidiClass::EN | BidiClass::AN) => level + 1,
            _ => level,
        };
    }
}

/// Give every X9-removed character the level of the character before it.
pub(crate) fn assign_removed_levels(levels: &mut [u8], classes: &[BidiClass], para_level: u8) {
    for i in 0..levels.len() {
        if is_removed_by_x9(classes[i]) {
            levels[i] = if i == 0 { para_level } else { levels[i - 1] };
        }
    }
}

/// Reset separators and trailing whitespace to the paragraph level (L1).
///
/// `levels` and the original `classes` cover exactly one line; its last
/// character is the end of the line.
pub(crate) fn reset_whitespace(levels: &mut [u8], classes: &[BidiClass], para_level: u8) {
    let mut at_boundary = true;
    for i in (0..levels.len()).rev() {
        match classes[i] {
            BidiClass::B | BidiClass::S => {
                levels[i] = para_level;
                at_boundary = true;
            }
            BidiClass::WS | BidiClass::LRI | BidiClass::RLI | BidiClass::FSI | BidiClass::PDI => {
                if at_boundary {
                    levels[i] = para_level;
                }
            }
            class if is_removed_by_x9(class) => {
                if at_boundary {
                    levels[i] = para_level;
                }
            }
            _ => at_boundary = false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use BidiClass::*;

    fn seq(len: usize, level: u8, sos: BidiClass, eos: BidiClass) -> IsolatingRunSequence {
        IsolatingRunSequence {
            indices: (0..len).collect(),
            level,
            sos,
            eos,
        }
    }

    #[test]
    fn neutrals_between_same_direction_take_it() {
        let mut types = vec![R, WS, ON, R];
        resolve_neutral(&mut types, &seq(4, 0, L, L));
        assert_eq!(types, vec![R, R, R, R]);
    }

    #[test]
    fn neutrals_between_numbers_and_r_become_r() {
        let mut types = vec![EN, WS, R];
        resolve_neutral(&mut types, &seq(3, 0, L, L));
        assert_eq!(types[1], R);
    }

    #[test]
    fn neutrals_between_mixed_take_embedding() {
        let mut types = vec![L, WS, R];
        resolve_neutral(&mut types, &seq(3, 1, R, R));
        assert_eq!(types[1], R);
        let mut types = vec![WS, R];
        resolve_neutral(&mut types, &seq(2, 0, L, L));
        assert_eq!(types[0], L);
    }

    #[test]
    fn implicit_levels_follow_parity() {
        let mut levels = vec![0, 0, 0, 1, 1, 1];
        let types = [R, AN, EN, L, EN, R];
        resolve_implicit(&mut levels, &types, &seq(6, 0, L, L));
        assert_eq!(levels, vec![1, 2, 2, 2, 2, 1]);
    }

    #[test]
    fn removed_characters_copy_previous_level() {
        let mut levels = vec![5, 1, 7, 3];
        assign_removed_levels(&mut levels, &[RLE, L, BN, L], 0);
        assert_eq!(levels, vec![0, 1, 1, 3]);
    }

    #[test]
    fn trailing_whitespace_resets_to_paragraph_level() {
        let mut levels = vec![1, 1, 1, 1];
        reset_whitespace(&mut levels, &[R, WS, R, WS], 0);
        assert_eq!(levels, vec![1, 1, 1, 0]);
    }

    #[test]
    fn whitespace_before_separators_resets() {
        let mut levels = vec![2, 2, 2, 2, 2];
        reset_whitespace(&mut levels, &[L, WS, S, L, B], 1);
        assert_eq!(levels, vec![2, 1, 1, 2, 1]);
    }
}
