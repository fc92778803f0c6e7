/// Maximum explicit embedding depth (UAX #9 BD2).
pub const MAX_DEPTH: u8 = 125;

/// Flag bit on a seed level forcing the character's direction by parity.
pub const LEVEL_OVERRIDE: u8 = 0x80;

/// Base direction hint for paragraph analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BaseDirection {
    /// Detect paragraph base direction from text (first strong char).
    #[default]
    Auto,
    /// Force overall left-to-right base direction.
    Ltr,
    /// Force overall right-to-left base direction.
    Rtl,
}

impl BaseDirection {
    pub fn to_level(self) -> Option<u8> {
        match self {
            BaseDirection::Auto => None,
            BaseDirection::Ltr => Some(0),
            BaseDirection::Rtl => Some(1),
        }
    }
}

/// Direction classification of a paragraph, line or run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ltr,
    Rtl,
    Mixed,
}

impl Direction {
    /// Direction of a single level by parity.
    pub fn of_level(level: u8) -> Self {
        if is_rtl(level) {
            Direction::Rtl
        } else {
            Direction::Ltr
        }
    }

    /// Overall direction of a level array.
    ///
    /// All-even is LTR, all-odd is RTL, anything else is mixed. An empty
    /// array takes the direction of `base_level`.
    pub fn of_levels(levels: &[u8], base_level: u8) -> Self {
        let mut even = false;
        let mut odd = false;
        for &level in levels {
            if is_rtl(level) {
                odd = true;
            } else {
                even = true;
            }
            if even && odd {
                return Direction::Mixed;
            }
        }
        match (even, odd) {
            (false, true) => Direction::Rtl,
            (true, false) => Direction::Ltr,
            _ => Direction::of_level(base_level),
        }
    }
}

/// Odd levels are right-to-left.
pub fn is_rtl(level: u8) -> bool {
    level & 1 == 1
}

pub(crate) fn least_odd_greater(level: u8) -> u8 {
    (level + 1) | 1
}

pub(crate) fn least_even_greater(level: u8) -> u8 {
    (level + 2) & !1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forced_directions_map_to_levels() {
        assert_eq!(BaseDirection::Ltr.to_level(), Some(0));
        assert_eq!(BaseDirection::Rtl.to_level(), Some(1));
        assert_eq!(BaseDirection::Auto.to_level(), None);
    }

    #[test]
    fn next_levels_keep_parity() {
        assert_eq!(least_odd_greater(0), 1);
        assert_eq!(least_odd_greater(1), 3);
        assert_eq!(least_even_greater(0), 2);
        assert_eq!(least_even_greater(1), 2);
        assert_eq!(least_even_greater(124), 126);
    }

    #[test]
    fn classifies_level_arrays() {
        assert_eq!(Direction::of_levels(&[0, 2, 0], 0), Direction::Ltr);
        assert_eq!(Direction::of_levels(&[1, 3], 0), Direction::Rtl);
        assert_eq!(Direction::of_levels(&[0, 1], 0), Direction::Mixed);
        assert_eq!(Direction::of_levels(&[], 1), Direction::Rtl);
        assert_eq!(Direction::of_levels(&[], 0), Direction::Ltr);
    }
}
