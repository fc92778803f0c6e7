use unicode_bidi::{BidiClass, BidiDataSource, HardcodedBidiData};

/// Whether a paired bracket opens or closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketKind {
    Open,
    Close,
}

/// Paired-bracket property of a character (`Bidi_Paired_Bracket_Type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bracket {
    /// Canonical opening bracket of the pair. Both halves of a pair share it.
    pub pair: char,
    pub kind: BracketKind,
}

/// Source of the Unicode properties the resolver consumes.
///
/// Implementations must be pure: the same character always maps to the
/// same class and bracket property.
pub trait ClassProvider {
    /// `Bidi_Class` of `c`.
    fn bidi_class(&self, c: char) -> BidiClass;

    /// Paired bracket data for `c`, if it is a paired bracket.
    fn bracket(&self, c: char) -> Option<Bracket>;
}

/// Provider backed by the Unicode data tables compiled into `unicode-bidi`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeClasses;

impl ClassProvider for UnicodeClasses {
    fn bidi_class(&self, c: char) -> BidiClass {
        HardcodedBidiData.bidi_class(c)
    }

    fn bracket(&self, c: char) -> Option<Bracket> {
        let matched = HardcodedBidiData.bidi_matched_opening_bracket(c)?;
        Some(Bracket {
            pair: canonical_bracket(matched.opening),
            kind: if matched.is_open {
                BracketKind::Open
            } else {
                BracketKind::Close
            },
        })
    }
}

/// Fold canonically equivalent brackets (BD16) onto one representative.
fn canonical_bracket(c: char) -> char {
    match c {
        '\u{2329}' => '\u{3008}',
        '\u{232A}' => '\u{3009}',
        other => other,
    }
}

/// Strong types: L, R, AL.
pub(crate) fn is_strong(class: BidiClass) -> bool {
    matches!(class, BidiClass::L | BidiClass::R | BidiClass::AL)
}

/// LRI, RLI, FSI.
pub(crate) fn is_isolate_initiator(class: BidiClass) -> bool {
    matches!(class, BidiClass::LRI | BidiClass::RLI | BidiClass::FSI)
}

/// Characters X9 removes from the algorithm: embeddings, overrides, PDF, BN.
pub(crate) fn is_removed_by_x9(class: BidiClass) -> bool {
    matches!(
        class,
        BidiClass::LRE
            | BidiClass::RLE
            | BidiClass::LRO
            | BidiClass::RLO
            | BidiClass::PDF
            | BidiClass::BN
    )
}

/// Neutral and isolate types resolved by N1/N2.
pub(crate) fn is_neutral_or_isolate(class: BidiClass) -> bool {
    matches!(
        class,
        BidiClass::B
            | BidiClass::S
            | BidiClass::WS
            | BidiClass::ON
            | BidiClass::LRI
            | BidiClass::RLI
            | BidiClass::FSI
            | BidiClass::PDI
    )
}
