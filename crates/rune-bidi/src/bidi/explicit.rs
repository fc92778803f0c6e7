//! Paragraph level (P2-P3) and explicit embedding levels (X1-X8).

use unicode_bidi::BidiClass;

use crate::bidi::levels::{LEVEL_OVERRIDE, MAX_DEPTH, least_even_greater, least_odd_greater};
use crate::bidi::resolver::DepthOverflow;
use crate::error::{BidiError, Result};
use crate::unicode::classes::is_strong;

/// Level of the first strong character, skipping isolate contents.
///
/// With `stop_at_pdi`, scanning ends at a PDI that closes the isolate the
/// scan started in (X5c). Returns `None` when no strong character is found.
pub(crate) fn first_strong_level(classes: &[BidiClass], stop_at_pdi: bool) -> Option<u8> {
    let mut depth = 0usize;
    for &class in classes {
        match class {
            BidiClass::LRI | BidiClass::RLI | BidiClass::FSI => depth += 1,
            BidiClass::PDI => {
                if depth > 0 {
                    depth -= 1;
                } else if stop_at_pdi {
                    return None;
                }
            }
            class if depth == 0 && is_strong(class) => {
                return Some(u8::from(class != BidiClass::L));
            }
            _ => {}
        }
    }
    None
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Override {
    Neutral,
    Ltr,
    Rtl,
}

impl Override {
    fn from_seed(seed: u8) -> Self {
        if seed & LEVEL_OVERRIDE == 0 {
            Override::Neutral
        } else if seed & 1 == 1 {
            Override::Rtl
        } else {
            Override::Ltr
        }
    }

    fn apply(self, class: BidiClass) -> BidiClass {
        match self {
            Override::Neutral => class,
            Override::Ltr => BidiClass::L,
            Override::Rtl => BidiClass::R,
        }
    }
}

/// Entry on the directional status stack.
#[derive(Debug, Clone, Copy)]
struct Status {
    level: u8,
    override_status: Override,
    isolate: bool,
}

/// Explicit levels and working types for one paragraph.
#[derive(Debug, Clone)]
pub(crate) struct Explicit {
    pub levels: Vec<u8>,
    pub types: Vec<BidiClass>,
}

/// Apply X1-X8 to one paragraph.
///
/// `seeds`, when present, are normalized seed levels (override bit kept,
/// level already validated). They replace the paragraph entry at the bottom
/// of the stack for each character. `offset` is the paragraph's position in
/// the full text, used for error reporting.
pub(crate) fn resolve_explicit(
    classes: &[BidiClass],
    para_level: u8,
    seeds: Option<&[u8]>,
    overflow: DepthOverflow,
    offset: usize,
) -> Result<Explicit> {
    let n = classes.len();
    let mut levels = vec![para_level; n];
    let mut types = classes.to_vec();

    let mut stack: Vec<Status> = Vec::with_capacity(MAX_DEPTH as usize + 2);
    stack.push(Status {
        level: para_level,
        override_status: Override::Neutral,
        isolate: false,
    });

    let mut overflow_isolates = 0usize;
    let mut overflow_embeddings = 0usize;
    let mut valid_isolates = 0usize;

    for i in 0..n {
        let (level, override_status) = current(&stack, seeds, i);
        let class = classes[i];

        match class {
            BidiClass::RLE | BidiClass::LRE | BidiClass::RLO | BidiClass::LRO => {
                levels[i] = level;
                let new_level = if matches!(class, BidiClass::RLE | BidiClass::RLO) {
                    least_odd_greater(level)
                } else {
                    least_even_greater(level)
                };
                if new_level <= MAX_DEPTH && overflow_isolates == 0 && overflow_embeddings == 0 {
                    stack.push(Status {
                        level: new_level,
                        override_status: match class {
                            BidiClass::RLO => Override::Rtl,
                            BidiClass::LRO => Override::Ltr,
                            _ => Override::Neutral,
                        },
                        isolate: false,
                    });
                } else {
                    check_overflow(new_level, overflow, offset + i)?;
                    if overflow_isolates == 0 {
                        overflow_embeddings += 1;
                    }
                }
            }
            BidiClass::RLI | BidiClass::LRI | BidiClass::FSI => {
                levels[i] = level;
                types[i] = override_status.apply(class);
                let rtl = match class {
                    BidiClass::RLI => true,
                    BidiClass::LRI => false,
                    _ => first_strong_level(&classes[i + 1..], true) == Some(1),
                };
                let new_level = if rtl {
                    least_odd_greater(level)
                } else {
                    least_even_greater(level)
                };
                if new_level <= MAX_DEPTH && overflow_isolates == 0 && overflow_embeddings == 0 {
                    valid_isolates += 1;
                    stack.push(Status {
                        level: new_level,
                        override_status: Override::Neutral,
                        isolate: true,
                    });
                } else {
                    check_overflow(new_level, overflow, offset + i)?;
                    overflow_isolates += 1;
                }
            }
            BidiClass::PDI => {
                if overflow_isolates > 0 {
                    overflow_isolates -= 1;
                } else if valid_isolates > 0 {
                    overflow_embeddings = 0;
                    while stack.last().is_some_and(|s| !s.isolate) {
                        stack.pop();
                    }
                    stack.pop();
                    valid_isolates -= 1;
                }
                let (level, override_status) = current(&stack, seeds, i);
                levels[i] = level;
                types[i] = override_status.apply(class);
            }
            BidiClass::PDF => {
                if overflow_isolates > 0 {
                    // Inside an overflowed isolate; nothing to pop.
                } else if overflow_embeddings > 0 {
                    overflow_embeddings -= 1;
                } else if stack.len() >= 2 && stack.last().is_some_and(|s| !s.isolate) {
                    stack.pop();
                }
                levels[i] = current(&stack, seeds, i).0;
            }
            BidiClass::B => {
                levels[i] = para_level;
            }
            BidiClass::BN => {
                levels[i] = level;
            }
            _ => {
                levels[i] = level;
                types[i] = override_status.apply(class);
            }
        }
    }

    Ok(Explicit { levels, types })
}

/// Level and override in effect for character `i`.
fn current(stack: &[Status], seeds: Option<&[u8]>, i: usize) -> (u8, Override) {
    match (stack, seeds) {
        ([_], Some(seeds)) => {
            let seed = seeds[i];
            (seed & !LEVEL_OVERRIDE, Override::from_seed(seed))
        }
        _ => {
            let top = stack[stack.len() - 1];
            (top.level, top.override_status)
        }
    }
}

fn check_overflow(new_level: u8, overflow: DepthOverflow, index: usize) -> Result<()> {
    if new_level > MAX_DEPTH && overflow == DepthOverflow::Reject {
        return Err(BidiError::DepthExceeded {
            index,
            max: MAX_DEPTH,
        });
    }
    if new_level > MAX_DEPTH {
        log::warn!("ignoring explicit embedding at index {index}: depth limit {MAX_DEPTH} reached");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use BidiClass::*;

    fn explicit(classes: &[BidiClass], para_level: u8) -> Explicit {
        resolve_explicit(classes, para_level, None, DepthOverflow::Reject, 0).unwrap()
    }

    #[test]
    fn first_strong_skips_isolates() {
        assert_eq!(first_strong_level(&[WS, RLI, L, PDI, R], false), Some(1));
        assert_eq!(first_strong_level(&[EN, ON], false), None);
        assert_eq!(first_strong_level(&[AL, L], false), Some(1));
    }

    #[test]
    fn fsi_scan_stops_at_closing_pdi() {
        assert_eq!(first_strong_level(&[ON, PDI, R], true), None);
        assert_eq!(first_strong_level(&[ON, PDI, R], false), Some(1));
    }

    #[test]
    fn embeddings_raise_levels_until_pdf() {
        let result = explicit(&[L, RLE, L, PDF, L], 0);
        assert_eq!(result.levels, vec![0, 0, 1, 0, 0]);
    }

    #[test]
    fn overrides_rewrite_types() {
        let result = explicit(&[RLO, L, EN, PDF, L], 0);
        assert_eq!(result.types[1], R);
        assert_eq!(result.types[2], R);
        assert_eq!(result.types[4], L);
        assert_eq!(result.levels[1], 1);
    }

    #[test]
    fn isolates_keep_outer_level_on_controls() {
        let result = explicit(&[L, LRI, R, PDI, L], 0);
        assert_eq!(result.levels, vec![0, 0, 2, 0, 0]);
    }

    #[test]
    fn fsi_picks_direction_from_content() {
        let result = explicit(&[FSI, R, PDI], 0);
        assert_eq!(result.levels[1], 1);
        let result = explicit(&[FSI, ON, L, PDI], 1);
        assert_eq!(result.levels[2], 2);
    }

    #[test]
    fn pdi_closes_embeddings_opened_inside_isolate() {
        let result = explicit(&[RLI, LRE, L, PDI, L], 0);
        assert_eq!(result.levels[2], 2);
        assert_eq!(result.levels[4], 0);
    }

    #[test]
    fn depth_overflow_rejects_by_default() {
        let mut classes = vec![LRE; 62];
        classes.push(L);
        let result = resolve_explicit(&classes, 0, None, DepthOverflow::Reject, 0).unwrap();
        assert_eq!(result.levels[62], 124);

        let classes = vec![LRE; 63];
        let err = resolve_explicit(&classes, 0, None, DepthOverflow::Reject, 10).unwrap_err();
        assert_eq!(err, BidiError::DepthExceeded { index: 72, max: 125 });
    }

    #[test]
    fn depth_overflow_can_be_ignored() {
        let mut classes = vec![RLE; 70];
        classes.push(L);
        classes.push(PDF);
        classes.push(L);
        let result = resolve_explicit(&classes, 0, None, DepthOverflow::Ignore, 0).unwrap();
        assert_eq!(result.levels[70], 125);
        // The PDF only cancels an overflowed embedding.
        assert_eq!(result.levels[72], 125);
    }

    #[test]
    fn overflowed_isolates_are_closed_by_their_own_pdi() {
        // 63 RLIs reach level 125; the 64th overflows.
        let mut classes = vec![RLI; 64];
        classes.extend([L, PDI, L, PDI, L]);
        let err = resolve_explicit(&classes, 0, None, DepthOverflow::Reject, 0).unwrap_err();
        assert_eq!(err, BidiError::DepthExceeded { index: 63, max: 125 });

        let result = resolve_explicit(&classes, 0, None, DepthOverflow::Ignore, 0).unwrap();
        assert_eq!(result.levels[62], 123);
        assert_eq!(result.levels[63], 125);
        assert_eq!(result.levels[64], 125);
        // First PDI only decrements the overflow count.
        assert_eq!(result.levels[65], 125);
        assert_eq!(result.levels[66], 125);
        // Second PDI pops the innermost valid isolate.
        assert_eq!(result.levels[67], 123);
        assert_eq!(result.levels[68], 123);
    }

    #[test]
    fn seeds_form_the_stack_bottom() {
        let seeds = [0, 2, 2 | LEVEL_OVERRIDE, 0];
        let result =
            resolve_explicit(&[L, L, L, L], 0, Some(&seeds), DepthOverflow::Reject, 0).unwrap();
        assert_eq!(result.levels, vec![0, 2, 2, 0]);
        assert_eq!(result.types[2], L);

        let seeds = [1 | LEVEL_OVERRIDE, 1, 1];
        let result =
            resolve_explicit(&[L, RLE, L], 0, Some(&seeds), DepthOverflow::Reject, 0).unwrap();
        assert_eq!(result.types[0], R);
        assert_eq!(result.levels[2], 3);
    }
}
