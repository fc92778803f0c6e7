use core::ops::Range;

use unicode_bidi::BidiClass;

use crate::bidi::brackets::resolve_brackets;
use crate::bidi::explicit::{first_strong_level, resolve_explicit};
use crate::bidi::implicit::{assign_removed_levels, reset_whitespace, resolve_implicit, resolve_neutral};
use crate::bidi::levels::{BaseDirection, Direction, LEVEL_OVERRIDE, MAX_DEPTH};
use crate::bidi::paragraph::{Paragraph, ParagraphSpan};
use crate::bidi::sequences::isolating_run_sequences;
use crate::bidi::weak::resolve_weak;
use crate::error::{BidiError, Result};
use crate::unicode::{Bracket, ClassProvider, UnicodeClasses};

/// What to do when explicit embeddings nest past [`MAX_DEPTH`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthOverflow {
    /// Fail with [`BidiError::DepthExceeded`].
    #[default]
    Reject,
    /// Ignore the overflowing controls, as UAX #9 X1-X8 prescribe.
    Ignore,
}

/// Tunables for level resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolveOptions {
    pub depth_overflow: DepthOverflow,
}

/// Paragraph resolver parameterized over the character-property source.
///
/// ```
/// use rune_bidi::{BaseDirection, Resolver};
///
/// let para = Resolver::new().resolve("abc \u{05D0}\u{05D1}", BaseDirection::Auto).unwrap();
/// assert_eq!(para.levels(), &[0, 0, 0, 0, 1, 1]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Resolver<P = UnicodeClasses> {
    provider: P,
    options: ResolveOptions,
}

impl Resolver<UnicodeClasses> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: ClassProvider> Resolver<P> {
    /// Resolver that classifies characters through `provider`.
    pub fn with_provider(provider: P) -> Self {
        Self {
            provider,
            options: ResolveOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ResolveOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> ResolveOptions {
        self.options
    }

    /// Resolve `text`, one level per `char`.
    pub fn resolve(&self, text: &str, base: BaseDirection) -> Result<Paragraph> {
        let chars: Vec<char> = text.chars().collect();
        self.resolve_chars(&chars, base, None)
    }

    /// Resolve `text` with per-character seed levels.
    ///
    /// A seed's low seven bits are an embedding level (`0` stands for the
    /// paragraph level); [`LEVEL_OVERRIDE`] forces the character's direction
    /// by parity. Explicit formatting characters in the text embed on top of
    /// the seed of the character where they occur.
    pub fn resolve_with_levels(
        &self,
        text: &str,
        base: BaseDirection,
        seeds: &[u8],
    ) -> Result<Paragraph> {
        let chars: Vec<char> = text.chars().collect();
        self.resolve_chars(&chars, base, Some(seeds))
    }

    /// Resolve a character slice, optionally seeded.
    pub fn resolve_chars(
        &self,
        chars: &[char],
        base: BaseDirection,
        seeds: Option<&[u8]>,
    ) -> Result<Paragraph> {
        let classes: Vec<BidiClass> = chars.iter().map(|&c| self.provider.bidi_class(c)).collect();
        let brackets: Vec<Option<Bracket>> = chars.iter().map(|&c| self.provider.bracket(c)).collect();
        let resolved = self.resolve_input(classes, Some(brackets.as_slice()), base, seeds)?;
        let text = chars.iter().copied().map(Some).collect();
        Ok(Paragraph::from_resolved(resolved, text, base, seeds.map(<[u8]>::to_vec)))
    }

    /// Resolve UTF-16 text with one level per code unit.
    ///
    /// Both units of a surrogate pair receive the level of their code point;
    /// a lone surrogate is treated as a left-to-right character. `seeds`, if
    /// given, are per code unit and the leading unit's seed applies.
    pub fn resolve_utf16(
        &self,
        units: &[u16],
        base: BaseDirection,
        seeds: Option<&[u8]>,
    ) -> Result<Paragraph> {
        if let Some(seeds) = seeds {
            check_len(units.len(), seeds.len())?;
        }

        let mut widths = Vec::with_capacity(units.len());
        let mut classes = Vec::with_capacity(units.len());
        let mut brackets = Vec::with_capacity(units.len());
        let mut text = Vec::with_capacity(units.len());
        for decoded in char::decode_utf16(units.iter().copied()) {
            match decoded {
                Ok(c) => {
                    widths.push(c.len_utf16());
                    classes.push(self.provider.bidi_class(c));
                    brackets.push(self.provider.bracket(c));
                    text.push(Some(c));
                    if c.len_utf16() == 2 {
                        text.push(None);
                    }
                }
                Err(_) => {
                    widths.push(1);
                    classes.push(BidiClass::L);
                    brackets.push(None);
                    text.push(Some(char::REPLACEMENT_CHARACTER));
                }
            }
        }

        let char_seeds: Option<Vec<u8>> = seeds.map(|seeds| {
            let mut offset = 0;
            widths
                .iter()
                .map(|&width| {
                    let seed = seeds[offset];
                    offset += width;
                    seed
                })
                .collect()
        });

        let resolved = self
            .resolve_input(classes, Some(brackets.as_slice()), base, char_seeds.as_deref())
            .map_err(|err| remap_error(err, &widths))?;
        Ok(Paragraph::from_resolved(
            resolved.expand(&widths),
            text,
            base,
            seeds.map(<[u8]>::to_vec),
        ))
    }

    /// Resolve pre-classified input. No bracket pairing is possible.
    pub fn resolve_classes(
        &self,
        classes: &[BidiClass],
        base: BaseDirection,
        seeds: Option<&[u8]>,
    ) -> Result<Paragraph> {
        let resolved = self.resolve_input(classes.to_vec(), None, base, seeds)?;
        Ok(Paragraph::from_resolved(
            resolved,
            Vec::new(),
            base,
            seeds.map(<[u8]>::to_vec),
        ))
    }

    fn resolve_input(
        &self,
        classes: Vec<BidiClass>,
        brackets: Option<&[Option<Bracket>]>,
        base: BaseDirection,
        seeds: Option<&[u8]>,
    ) -> Result<Resolved> {
        if let Some(seeds) = seeds {
            check_len(classes.len(), seeds.len())?;
        }

        let mut spans = Vec::new();
        let mut implicit = Vec::with_capacity(classes.len());
        let mut levels = Vec::with_capacity(classes.len());

        for range in split_paragraphs(&classes) {
            let para_classes = &classes[range.clone()];
            let para_level = base
                .to_level()
                .unwrap_or_else(|| first_strong_level(para_classes, false).unwrap_or(0));
            log::debug!(
                "paragraph {}..{} resolved at level {para_level} (requested {base:?})",
                range.start,
                range.end
            );

            let para_seeds = seeds
                .map(|seeds| normalize_seeds(&seeds[range.clone()], para_level, range.start))
                .transpose()?;

            let explicit = resolve_explicit(
                para_classes,
                para_level,
                para_seeds.as_deref(),
                self.options.depth_overflow,
                range.start,
            )?;
            let mut types = explicit.types;
            let mut para_levels = explicit.levels;

            for seq in isolating_run_sequences(para_classes, &para_levels, para_level) {
                resolve_weak(&mut types, &seq);
                if let Some(brackets) = brackets {
                    resolve_brackets(&mut types, para_classes, &brackets[range.clone()], &seq);
                }
                resolve_neutral(&mut types, &seq);
                resolve_implicit(&mut para_levels, &types, &seq);
            }
            assign_removed_levels(&mut para_levels, para_classes, para_level);
            implicit.extend_from_slice(&para_levels);

            reset_whitespace(&mut para_levels, para_classes, para_level);
            spans.push(ParagraphSpan {
                range,
                level: para_level,
                direction: Direction::of_levels(&para_levels, para_level),
            });
            levels.extend_from_slice(&para_levels);
        }

        let base_level = spans
            .first()
            .map(|span| span.level)
            .unwrap_or_else(|| base.to_level().unwrap_or(0));

        Ok(Resolved {
            classes,
            base_level,
            spans,
            implicit,
            levels,
        })
    }
}

/// Output of the resolution pipeline before it is wrapped in a [`Paragraph`].
#[derive(Debug, Clone)]
pub(crate) struct Resolved {
    pub classes: Vec<BidiClass>,
    pub base_level: u8,
    pub spans: Vec<ParagraphSpan>,
    /// Levels after I1-I2, before L1.
    pub implicit: Vec<u8>,
    /// Levels after L1 with each paragraph end as the line end.
    pub levels: Vec<u8>,
}

impl Resolved {
    /// Repeat every entry `widths[i]` times (code points to code units).
    fn expand(self, widths: &[usize]) -> Resolved {
        let repeat = |values: &[u8]| -> Vec<u8> {
            values
                .iter()
                .zip(widths)
                .flat_map(|(&v, &w)| core::iter::repeat(v).take(w))
                .collect()
        };
        let classes = self
            .classes
            .iter()
            .zip(widths)
            .flat_map(|(&c, &w)| core::iter::repeat(c).take(w))
            .collect();

        let mut unit_offsets = Vec::with_capacity(widths.len() + 1);
        let mut total = 0;
        unit_offsets.push(0);
        for &w in widths {
            total += w;
            unit_offsets.push(total);
        }
        let spans = self
            .spans
            .into_iter()
            .map(|span| ParagraphSpan {
                range: unit_offsets[span.range.start]..unit_offsets[span.range.end],
                ..span
            })
            .collect();

        Resolved {
            classes,
            base_level: self.base_level,
            spans,
            implicit: repeat(&self.implicit),
            levels: repeat(&self.levels),
        }
    }
}

/// P1: split after every paragraph separator.
fn split_paragraphs(classes: &[BidiClass]) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut start = 0;
    for (i, &class) in classes.iter().enumerate() {
        if class == BidiClass::B {
            ranges.push(start..i + 1);
            start = i + 1;
        }
    }
    if start < classes.len() {
        ranges.push(start..classes.len());
    }
    ranges
}

fn check_len(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(BidiError::LengthMismatch { expected, actual });
    }
    Ok(())
}

/// Replace `0` by the paragraph level and validate the rest.
fn normalize_seeds(seeds: &[u8], para_level: u8, offset: usize) -> Result<Vec<u8>> {
    seeds
        .iter()
        .enumerate()
        .map(|(k, &seed)| {
            let level = seed & !LEVEL_OVERRIDE;
            if level == 0 {
                Ok(para_level | (seed & LEVEL_OVERRIDE))
            } else if level < para_level || level > MAX_DEPTH {
                Err(BidiError::InvalidLevel {
                    index: offset + k,
                    level: seed,
                    min: para_level,
                    max: MAX_DEPTH,
                })
            } else {
                Ok(seed)
            }
        })
        .collect()
}

/// Translate code point indices in an error into code unit indices.
fn remap_error(err: BidiError, widths: &[usize]) -> BidiError {
    let unit = |index: usize| widths[..index.min(widths.len())].iter().sum::<usize>();
    match err {
        BidiError::InvalidLevel {
            index,
            level,
            min,
            max,
        } => BidiError::InvalidLevel {
            index: unit(index),
            level,
            min,
            max,
        },
        BidiError::DepthExceeded { index, max } => BidiError::DepthExceeded {
            index: unit(index),
            max,
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn splits_after_paragraph_separators() {
        use BidiClass::*;
        assert_eq!(split_paragraphs(&[L, B, R]), vec![0..2, 2..3]);
        assert_eq!(split_paragraphs(&[L, B]), vec![0..2]);
        assert!(split_paragraphs(&[]).is_empty());
    }

    #[test]
    fn zero_seeds_mean_paragraph_level() {
        let seeds = normalize_seeds(&[0, 3, LEVEL_OVERRIDE], 1, 0).unwrap();
        assert_eq!(seeds, vec![1, 3, 1 | LEVEL_OVERRIDE]);
    }

    #[test]
    fn seeds_below_paragraph_level_are_rejected() {
        let err = normalize_seeds(&[2, 1], 2, 5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(matches!(err, BidiError::InvalidLevel { index: 6, .. }));
        assert!(normalize_seeds(&[126], 0, 0).is_err());
    }

    #[test]
    fn resolver_options_are_carried() {
        let options = ResolveOptions {
            depth_overflow: DepthOverflow::Ignore,
        };
        let resolver = Resolver::new().with_options(options);
        assert_eq!(resolver.options(), options);
        let text: String = core::iter::repeat('\u{202B}').take(80).chain(['a']).collect();
        let para = resolver.resolve(&text, BaseDirection::Ltr).unwrap();
        assert_eq!(para.levels()[80], 126);
    }

    #[test]
    fn custom_provider_drives_classification() {
        struct AllRtl;
        impl ClassProvider for AllRtl {
            fn bidi_class(&self, _: char) -> BidiClass {
                BidiClass::R
            }
            fn bracket(&self, _: char) -> Option<Bracket> {
                None
            }
        }
        let para = Resolver::with_provider(AllRtl)
            .resolve("abc", BaseDirection::Auto)
            .unwrap();
        assert_eq!(para.levels(), &[1, 1, 1]);
    }

    #[test]
    fn utf16_errors_report_unit_indices() {
        let err = remap_error(BidiError::DepthExceeded { index: 2, max: 125 }, &[2, 1, 1]);
        assert_eq!(err, BidiError::DepthExceeded { index: 3, max: 125 });
    }
}
