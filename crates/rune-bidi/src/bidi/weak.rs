//! Weak type resolution (W1-W7).

use unicode_bidi::BidiClass;

use crate::bidi::sequences::IsolatingRunSequence;
use crate::unicode::classes::is_isolate_initiator;

/// Resolve weak types of one isolating run sequence in place.
pub(crate) fn resolve_weak(types: &mut [BidiClass], seq: &IsolatingRunSequence) {
    let indices = &seq.indices;

    // W1
    let mut prev = seq.sos;
    for &i in indices {
        if types[i] == BidiClass::NSM {
            types[i] = if is_isolate_initiator(prev) || prev == BidiClass::PDI {
                BidiClass::ON
            } else {
                prev
            };
        }
        prev = types[i];
    }

    // W2, W3
    let mut last_strong = seq.sos;
    for &i in indices {
        match types[i] {
            BidiClass::L | BidiClass::R => last_strong = types[i],
            BidiClass::AL => {
                last_strong = BidiClass::AL;
                types[i] = BidiClass::R;
            }
            BidiClass::EN if last_strong == BidiClass::AL => types[i] = BidiClass::AN,
            _ => {}
        }
    }

    // W4
    for k in 1..indices.len().saturating_sub(1) {
        let i = indices[k];
        let before = types[indices[k - 1]];
        let after = types[indices[k + 1]];
        match types[i] {
            BidiClass::ES if before == BidiClass::EN && after == BidiClass::EN => {
                types[i] = BidiClass::EN;
            }
            BidiClass::CS if before == after && matches!(before, BidiClass::EN | BidiClass::AN) => {
                types[i] = before;
            }
            _ => {}
        }
    }

    // W5
    let mut k = 0;
    while k < indices.len() {
        if types[indices[k]] != BidiClass::ET {
            k += 1;
            continue;
        }
        let start = k;
        while k < indices.len() && types[indices[k]] == BidiClass::ET {
            k += 1;
        }
        let touches_number = (start > 0 && types[indices[start - 1]] == BidiClass::EN)
            || (k < indices.len() && types[indices[k]] == BidiClass::EN);
        if touches_number {
            for &i in &indices[start..k] {
                types[i] = BidiClass::EN;
            }
        }
    }

    // W6
    for &i in indices {
        if matches!(types[i], BidiClass::ES | BidiClass::ET | BidiClass::CS) {
            types[i] = BidiClass::ON;
        }
    }

    // W7
    let mut last_strong = seq.sos;
    for &i in indices {
        match types[i] {
            BidiClass::L | BidiClass::R => last_strong = types[i],
            BidiClass::EN if last_strong == BidiClass::L => types[i] = BidiClass::L,
            _ => {}
        }
    }
}
