use crate::bidi::levels::LEVEL_OVERRIDE;

/// Visual-to-logical map for one line of levels (UAX-9 L2).
///
/// `map[v]` is the logical index displayed at visual position `v`. From the
/// highest level down to the lowest odd level, every maximal range at that
/// level or above is reversed. Levels need not come from a resolved
/// paragraph; the override flag bit is ignored.
pub fn reorder_visual(levels: &[u8]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..levels.len()).collect();
    let level_at = |i: usize| levels[i] & !LEVEL_OVERRIDE;

    let Some(highest) = (0..levels.len()).map(level_at).max() else {
        return order;
    };
    let lowest_odd = (0..levels.len()).map(level_at).min().unwrap_or(0) | 1;

    let mut threshold = highest;
    while threshold >= lowest_odd {
        let mut i = 0;
        while i < order.len() {
            if level_at(order[i]) < threshold {
                i += 1;
                continue;
            }
            let start = i;
            while i < order.len() && level_at(order[i]) >= threshold {
                i += 1;
            }
            order[start..i].reverse();
        }
        threshold -= 1;
    }
    order
}

/// Logical-to-visual map: `map[l]` is the visual position of logical index `l`.
pub fn reorder_logical(levels: &[u8]) -> Vec<usize> {
    invert_map(&reorder_visual(levels))
}

/// Invert an index map.
///
/// The result is sized to the largest index plus one; positions no entry
/// maps to hold `usize::MAX`. Entries that are themselves `usize::MAX` are
/// holes and map nowhere, so inverting an inverse round-trips.
pub fn invert_map(map: &[usize]) -> Vec<usize> {
    let len = map
        .iter()
        .filter(|&&to| to != usize::MAX)
        .max()
        .map_or(0, |&max| max + 1);
    let mut inverse = vec![usize::MAX; len];
    for (from, &to) in map.iter().enumerate() {
        if to != usize::MAX {
            inverse[to] = from;
        }
    }
    inverse
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_ltr_is_identity() {
        assert_eq!(reorder_visual(&[0, 0, 0, 0]), vec![0, 1, 2, 3]);
        assert_eq!(reorder_visual(&[2, 2]), vec![0, 1]);
    }

    #[test]
    fn all_rtl_reverses() {
        assert_eq!(reorder_visual(&[1, 1, 1]), vec![2, 1, 0]);
    }

    #[test]
    fn nested_levels() {
        assert_eq!(reorder_visual(&[0, 1, 2, 1, 0]), vec![0, 3, 2, 1, 4]);
        assert_eq!(reorder_visual(&[1, 2, 2, 1]), vec![3, 1, 2, 0]);
    }

    #[test]
    fn rtl_paragraph_with_embedded_ltr() {
        // "אב cd" at RTL paragraph level.
        assert_eq!(reorder_visual(&[1, 1, 1, 2, 2]), vec![3, 4, 2, 1, 0]);
    }

    #[test]
    fn logical_map_inverts_visual_map() {
        let levels = [0, 1, 1, 2, 0];
        let visual = reorder_visual(&levels);
        let logical = reorder_logical(&levels);
        for (v, &l) in visual.iter().enumerate() {
            assert_eq!(logical[l], v);
        }
    }

    #[test]
    fn override_bit_is_masked() {
        assert_eq!(reorder_visual(&[1 | LEVEL_OVERRIDE, 1]), vec![1, 0]);
    }

    #[test]
    fn invert_map_marks_holes() {
        assert_eq!(invert_map(&[2, 0]), vec![1, usize::MAX, 0]);
        assert!(invert_map(&[]).is_empty());
    }

    #[test]
    fn invert_map_skips_hole_entries() {
        let holes = invert_map(&[2, 0]);
        assert_eq!(invert_map(&holes), vec![2, 0]);
        assert_eq!(invert_map(&[usize::MAX, 1]), vec![usize::MAX, 1]);
        assert!(invert_map(&[usize::MAX]).is_empty());
    }
}
