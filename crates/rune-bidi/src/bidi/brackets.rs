//! Paired bracket resolution (BD16, N0).

use unicode_bidi::BidiClass;

use crate::bidi::sequences::IsolatingRunSequence;
use crate::unicode::{Bracket, BracketKind};

/// Depth limit of the BD16 opener stack.
const MAX_BRACKET_DEPTH: usize = 63;

/// Resolve paired brackets of one sequence in place.
///
/// `brackets` holds the paired-bracket property per character and
/// `original` the classes before any rule ran (to find NSMs after brackets).
pub(crate) fn resolve_brackets(
    types: &mut [BidiClass],
    original: &[BidiClass],
    brackets: &[Option<Bracket>],
    seq: &IsolatingRunSequence,
) {
    let pairs = locate_pairs(types, brackets, seq);
    if pairs.is_empty() {
        return;
    }

    let indices = &seq.indices;
    let embedding = seq.embedding_direction();

    for (open, close) in pairs {
        let mut has_embedding = false;
        let mut has_opposite = false;
        for &i in &indices[open + 1..close] {
            match strong_for_brackets(types[i]) {
                Some(dir) if dir == embedding => {
                    has_embedding = true;
                    break;
                }
                Some(_) => has_opposite = true,
                None => {}
            }
        }

        let resolved = if has_embedding {
            embedding
        } else if has_opposite {
            let context = indices[..open]
                .iter()
                .rev()
                .find_map(|&i| strong_for_brackets(types[i]))
                .unwrap_or(seq.sos);
            if context != embedding {
                context
            } else {
                embedding
            }
        } else {
            continue;
        };

        for position in [open, close] {
            types[indices[position]] = resolved;
            for &i in &indices[position + 1..] {
                if original[i] != BidiClass::NSM {
                    break;
                }
                types[i] = resolved;
            }
        }
    }
}

/// Bracket pairs as positions within the sequence, sorted by opener.
fn locate_pairs(
    types: &[BidiClass],
    brackets: &[Option<Bracket>],
    seq: &IsolatingRunSequence,
) -> Vec<(usize, usize)> {
    let mut openers: Vec<(char, usize)> = Vec::new();
    let mut pairs = Vec::new();

    for (k, &i) in seq.indices.iter().enumerate() {
        if types[i] != BidiClass::ON {
            continue;
        }
        let Some(bracket) = brackets[i] else {
            continue;
        };
        match bracket.kind {
            BracketKind::Open => {
                if openers.len() == MAX_BRACKET_DEPTH {
                    break;
                }
                openers.push((bracket.pair, k));
            }
            BracketKind::Close => {
                if let Some(depth) = openers.iter().rposition(|&(pair, _)| pair == bracket.pair) {
                    pairs.push((openers[depth].1, k));
                    openers.truncate(depth);
                }
            }
        }
    }

    pairs.sort_unstable();
    pairs
}

/// Strong direction as N0 sees it: EN and AN count as R.
fn strong_for_brackets(class: BidiClass) -> Option<BidiClass> {
    match class {
        BidiClass::L => Some(BidiClass::L),
        BidiClass::R | BidiClass::EN | BidiClass::AN => Some(BidiClass::R),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unicode::{ClassProvider, UnicodeClasses};
    use BidiClass::*;

    fn run(text: &str, types: &[BidiClass], level: u8) -> Vec<BidiClass> {
        let chars: Vec<char> = text.chars().collect();
        let brackets: Vec<Option<Bracket>> =
            chars.iter().map(|&c| UnicodeClasses.bracket(c)).collect();
        let original: Vec<BidiClass> = chars.iter().map(|&c| UnicodeClasses.bidi_class(c)).collect();
        let dir = if level % 2 == 1 { R } else { L };
        let seq = IsolatingRunSequence {
            indices: (0..chars.len()).collect(),
            level,
            sos: dir,
            eos: dir,
        };
        let mut types = types.to_vec();
        resolve_brackets(&mut types, &original, &brackets, &seq);
        types
    }

    #[test]
    fn brackets_follow_matching_embedding_content() {
        // a(b)c at LTR level
        assert_eq!(run("a(b)c", &[L, ON, L, ON, L], 0), vec![L, L, L, L, L]);
    }

    #[test]
    fn opposite_content_with_opposite_context() {
        // R ( R ) at LTR level: context before the pair is R.
        let types = run("\u{05D0}(\u{05D1})", &[R, ON, R, ON], 0);
        assert_eq!(types, vec![R, R, R, R]);
    }

    #[test]
    fn opposite_content_without_context_uses_embedding() {
        let types = run("a(\u{05D1})", &[L, ON, R, ON], 0);
        assert_eq!(types, vec![L, L, R, L]);
    }

    #[test]
    fn brackets_without_strong_content_stay_neutral() {
        let types = run("a( )b", &[L, ON, WS, ON, L], 0);
        assert_eq!(types, vec![L, ON, WS, ON, L]);
    }

    #[test]
    fn mismatched_closer_is_ignored() {
        let types = run("a(b]c", &[L, ON, L, ON, L], 0);
        assert_eq!(types, vec![L, ON, L, ON, L]);
    }

    #[test]
    fn closer_pops_inner_openers() {
        let pairs = {
            let chars: Vec<char> = "([)]".chars().collect();
            let brackets: Vec<Option<Bracket>> =
                chars.iter().map(|&c| UnicodeClasses.bracket(c)).collect();
            let seq = IsolatingRunSequence {
                indices: (0..4).collect(),
                level: 0,
                sos: L,
                eos: L,
            };
            locate_pairs(&[ON; 4], &brackets, &seq)
        };
        assert_eq!(pairs, vec![(0, 2)]);
    }
}
