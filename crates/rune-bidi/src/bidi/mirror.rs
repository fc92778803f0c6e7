//! Glyph mirroring for characters displayed at odd levels (UAX-9 L4).
//!
//! Covers the paired brackets, quotation marks and relational operators
//! that show up in practice. Characters outside the table are returned
//! unchanged.

/// Mirrored pairs, each listed once as `(a, b)`.
const PAIRS: &[(char, char)] = &[
    ('(', ')'),
    ('<', '>'),
    ('[', ']'),
    ('{', '}'),
    ('\u{00AB}', '\u{00BB}'), // « »
    ('\u{2039}', '\u{203A}'), // ‹ ›
    ('\u{2045}', '\u{2046}'), // ⁅ ⁆
    ('\u{207D}', '\u{207E}'), // ⁽ ⁾
    ('\u{208D}', '\u{208E}'), // ₍ ₎
    ('\u{2208}', '\u{220B}'), // ∈ ∋
    ('\u{2264}', '\u{2265}'), // ≤ ≥
    ('\u{2282}', '\u{2283}'), // ⊂ ⊃
    ('\u{2286}', '\u{2287}'), // ⊆ ⊇
    ('\u{2329}', '\u{232A}'), // 〈 〉
    ('\u{27E8}', '\u{27E9}'), // ⟨ ⟩
    ('\u{27E6}', '\u{27E7}'), // ⟦ ⟧
    ('\u{2983}', '\u{2984}'), // ⦃ ⦄
    ('\u{3008}', '\u{3009}'), // 〈 〉
    ('\u{300A}', '\u{300B}'), // 《 》
    ('\u{300C}', '\u{300D}'), // 「 」
    ('\u{300E}', '\u{300F}'), // 『 』
    ('\u{3010}', '\u{3011}'), // 【 】
    ('\u{3014}', '\u{3015}'), // 〔 〕
    ('\u{3016}', '\u{3017}'), // 〖 〗
    ('\u{3018}', '\u{3019}'), // 〘 〙
    ('\u{301A}', '\u{301B}'), // 〚 〛
    ('\u{FE59}', '\u{FE5A}'), // small parentheses
    ('\u{FE5B}', '\u{FE5C}'),
    ('\u{FE5D}', '\u{FE5E}'),
    ('\u{FF08}', '\u{FF09}'), // fullwidth forms
    ('\u{FF1C}', '\u{FF1E}'),
    ('\u{FF3B}', '\u{FF3D}'),
    ('\u{FF5B}', '\u{FF5D}'),
    ('\u{FF5F}', '\u{FF60}'),
    ('\u{FF62}', '\u{FF63}'),
];

/// Glyph shown for `ch` in right-to-left context.
///
/// Looks `ch` up on either side of the pair table; anything outside it
/// maps to itself.
pub fn mirrored_char(ch: char) -> char {
    PAIRS
        .iter()
        .find_map(|&(a, b)| {
            if ch == a {
                Some(b)
            } else if ch == b {
                Some(a)
            } else {
                None
            }
        })
        .unwrap_or(ch)
}

/// Mirror every character of `chars` whose level is odd.
///
/// Extra entries on either side are ignored.
pub fn apply_mirroring(chars: &mut [char], levels: &[u8]) {
    for (ch, &level) in chars.iter_mut().zip(levels) {
        if level & 1 == 1 {
            *ch = mirrored_char(*ch);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swaps_both_halves_of_a_pair() {
        assert_eq!(mirrored_char('('), ')');
        assert_eq!(mirrored_char(')'), '(');
    }

    #[test]
    fn covers_ascii_delimiters() {
        assert_eq!(mirrored_char('['), ']');
        assert_eq!(mirrored_char('}'), '{');
        assert_eq!(mirrored_char('<'), '>');
    }

    #[test]
    fn mirrors_quotes_and_cjk_brackets() {
        assert_eq!(mirrored_char('«'), '»');
        assert_eq!(mirrored_char('」'), '「');
        assert_eq!(mirrored_char('\u{FF09}'), '\u{FF08}');
    }

    #[test]
    fn leaves_other_characters() {
        assert_eq!(mirrored_char('a'), 'a');
        assert_eq!(mirrored_char('\u{05D0}'), '\u{05D0}');
    }

    #[test]
    fn mirrors_only_odd_levels() {
        let mut chars = ['(', '(', ')'];
        apply_mirroring(&mut chars, &[0, 1, 2]);
        assert_eq!(chars, ['(', ')', ')']);
    }
}
