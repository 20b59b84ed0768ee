use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;

/// The placeholder written into a template wherever a numeric literal was
/// extracted. U+FFFC does not occur in style values, so reconstruction can
/// match on the single character.
pub(crate) const NUMBER_SLOT: char = '\u{FFFC}';

const ROUND_SCALE: f64 = 1_000_000.0;

/// Rounds to 6 fractional digits, half away from zero.
///
/// Both progress values and interpolated components pass through this before
/// they become observable, so equality comparisons (change detection, exact
/// keyframe hits after modifier arithmetic) are not at the mercy of
/// floating-point noise.
pub(crate) fn round6(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scaled = value * ROUND_SCALE;
    if scaled >= i64::MAX as f64 || scaled <= i64::MIN as f64 {
        return value;
    }
    let half = if scaled >= 0.0 { 0.5 } else { -0.5 };
    ((scaled + half) as i64) as f64 / ROUND_SCALE
}

/// Formats an interpolated component the way it would be authored: rounded,
/// shortest decimal form, no trailing zeros.
pub(crate) fn format_number(value: f64) -> String {
    let mut out = String::new();
    let _ = write!(out, "{}", round6(value));
    out
}

/// One property's textual value at one progress point, decomposed into its
/// numeric components and a reusable template.
///
/// `numbers` holds every optionally-signed integer-or-decimal literal found
/// in the raw value, left to right; `template` is the raw value with each
/// literal replaced by a placeholder. Substituting the components back into
/// the template in order reproduces the raw value. A value with no embedded
/// numbers (`none`, `auto`, keywords in general) is a constant: its template
/// is the raw text and it is always returned verbatim.
#[derive(Clone, Debug, PartialEq)]
pub struct ValueTemplate {
    progress: f64,
    raw: String,
    numbers: Vec<f64>,
    template: String,
}

impl ValueTemplate {
    pub fn new(progress: f64, raw: &str) -> Self {
        let (numbers, template) = decompose(raw);
        Self {
            progress,
            raw: String::from(raw),
            numbers,
            template,
        }
    }

    /// Keyframe position as a normalized fraction (0.0 = 0%, 1.0 = 100%).
    ///
    /// May fall outside `[0, 1]` after timeline modifiers are applied.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn numbers(&self) -> &[f64] {
        &self.numbers
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Whether the value carries no numeric components (keyword values).
    pub fn is_constant(&self) -> bool {
        self.numbers.is_empty()
    }

    /// Substitutes `components` into the template's placeholder positions in
    /// order. Components beyond the placeholder count are dropped.
    pub(crate) fn fill(&self, components: &[f64]) -> String {
        let mut out = String::with_capacity(self.template.len() + components.len() * 8);
        let mut next = 0usize;
        for ch in self.template.chars() {
            if ch == NUMBER_SLOT {
                if let Some(&value) = components.get(next) {
                    out.push_str(&format_number(value));
                }
                next += 1;
            } else {
                out.push(ch);
            }
        }
        out
    }
}

/// Extracts every numeric literal from `raw` and builds the matching
/// placeholder template.
fn decompose(raw: &str) -> (Vec<f64>, String) {
    let mut numbers = Vec::new();
    let mut template = String::with_capacity(raw.len());
    let mut rest = raw;

    while !rest.is_empty() {
        match match_number(rest) {
            Some(len) => {
                let literal = &rest[..len];
                match literal.parse::<f64>() {
                    Ok(value) => {
                        numbers.push(value);
                        template.push(NUMBER_SLOT);
                    }
                    // The scanner only matches parseable literals; keep the
                    // text untouched if that ever disagrees.
                    Err(_) => template.push_str(literal),
                }
                rest = &rest[len..];
            }
            None => {
                let mut chars = rest.chars();
                if let Some(ch) = chars.next() {
                    template.push(ch);
                }
                rest = chars.as_str();
            }
        }
    }

    (numbers, template)
}

/// Matches an optionally-signed integer-or-decimal literal at the start of
/// `s`, returning its byte length.
///
/// A sign only starts a literal when digits follow it, so a lone `-` inside
/// `calc(100% - 50px)` stays text while `-50px` yields `-50`.
fn match_number(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }

    let int_digits = leading_digits(&bytes[i..]);
    i += int_digits;

    let mut frac_digits = 0;
    if bytes.get(i) == Some(&b'.') {
        frac_digits = leading_digits(&bytes[i + 1..]);
        if frac_digits > 0 {
            i += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }
    Some(i)
}

fn leading_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
