//! Number and character decoding into glyph codes.

use num_traits::float::FloatCore;
use num_traits::NumCast;

use crate::constants::*;

/// Radix used when rendering numbers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Base {
    #[default]
    Decimal,
    Hex,
}

impl Base {
    fn powers(self) -> &'static [i64] {
        match self {
            Base::Decimal => &POWERS_OF_10,
            Base::Hex => &POWERS_OF_16,
        }
    }

    /// `base^exp`, saturating at the largest tabulated power.
    pub fn power(self, exp: usize) -> i64 {
        let powers = self.powers();
        powers[exp.min(powers.len() - 1)]
    }

    /// Largest value that fits in `num_digits` positions.
    pub fn max_value(self, num_digits: usize) -> i64 {
        self.power(num_digits) - 1
    }

    /// Smallest value that fits, one position being taken by the sign.
    pub fn min_value(self, num_digits: usize) -> i64 {
        -(self.power(num_digits.saturating_sub(1)) - 1)
    }
}

/// Fills `digits` with glyph codes for `value`, most significant first.
/// Returns whether the value fit.
///
/// Out-of-range values turn every position into a dash. Negative values put
/// a dash in the first position. Unless `leading_zeros` is set, zeros left of
/// the decimal point position are blanked up to the first non-zero digit.
pub fn find_digits(
    value: i64,
    dec_places: Option<u8>,
    base: Base,
    leading_zeros: bool,
    digits: &mut [u8],
) -> bool {
    let num_digits = digits.len();
    if num_digits == 0 {
        return value == 0;
    }

    if value > base.max_value(num_digits) || value < base.min_value(num_digits) {
        digits.fill(DASH_IDX);
        return false;
    }

    let mut remaining = value;
    let mut start = 0;
    if remaining < 0 {
        digits[0] = DASH_IDX;
        start = 1;
        remaining = -remaining;
    }

    for (pos, digit) in digits.iter_mut().enumerate().skip(start) {
        let factor = base.power(num_digits - 1 - pos);
        let d = remaining / factor;
        *digit = NUMERAL_OFFSET + d as u8;
        remaining -= d * factor;
    }

    if !leading_zeros {
        let dec_places = (dec_places.unwrap_or(0) as usize).min(num_digits - 1);
        for digit in digits[..num_digits - 1 - dec_places].iter_mut() {
            if *digit == NUMERAL_OFFSET {
                *digit = BLANK_IDX;
            } else if *digit < NUMERAL_OFFSET + 16 {
                break;
            }
        }
    }

    true
}

/// Index of the position carrying the decimal point, if it is on the display.
pub fn decimal_point_position(dec_places: Option<u8>, num_digits: usize) -> Option<usize> {
    let dec_places = dec_places? as usize;
    if dec_places < num_digits {
        Some(num_digits - 1 - dec_places)
    } else {
        None
    }
}

/// Scales `value` by `base^dec_places` and rounds half away from zero.
/// Returns `None` when the result is not representable.
pub fn scale_float<F: FloatCore>(value: F, dec_places: Option<u8>, base: Base) -> Option<i64> {
    let scale = base.power(dec_places.unwrap_or(0) as usize);
    let factor = <F as NumCast>::from(scale)?;
    (value * factor).round().to_i64()
}

/// Glyph code for a single character. Letters are case-insensitive;
/// anything without a glyph becomes a dash.
pub fn glyph_for_char(c: char) -> u8 {
    match c {
        '0'..='9' => NUMERAL_OFFSET + (c as u8 - b'0'),
        'a'..='z' => ALPHA_OFFSET + (c as u8 - b'a'),
        'A'..='Z' => ALPHA_OFFSET + (c as u8 - b'A'),
        ' ' => BLANK_IDX,
        '.' => PERIOD_IDX,
        '*' => ASTERISK_IDX,
        '_' => UNDERSCORE_IDX,
        _ => DASH_IDX,
    }
}

/// Writes segment masks for `text` into `codes`, one position per character.
/// A period following a character is folded into that position. Stops at a
/// NUL or at the end of either side; positions past that are left untouched.
/// Returns the number of positions written.
pub fn segments_from_chars<I>(text: I, codes: &mut [u8]) -> usize
where
    I: IntoIterator<Item = char>,
{
    let mut chars = text.into_iter().take_while(|&c| c != '\0').peekable();
    let mut written = 0;

    for code in codes.iter_mut() {
        let Some(c) = chars.next() else {
            break;
        };
        *code = glyph(glyph_for_char(c));
        if chars.next_if_eq(&'.').is_some() {
            *code |= glyph(PERIOD_IDX);
        }
        written += 1;
    }

    written
}
