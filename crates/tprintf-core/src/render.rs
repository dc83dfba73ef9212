//! Field rendering: numeric and string conversion bodies plus the shared
//! padding/assembly step.
//!
//! Every conversion produces a [`Field`] — sign prefix, precision-driven
//! zero digits, body bytes — and all width/flag handling happens once in
//! [`write_field`]. Keeping padding in a single place is what guarantees
//! flag/width interactions behave identically across conversions; the one
//! subtle rule is that zero-fill goes between the sign and the digits,
//! never before the sign.

use crate::directive::Flags;
use crate::writer::BoundedWriter;

/// Scratch space for digit generation. 64 octal digits cover `u64::MAX`.
pub const DIGIT_BUF: usize = 64;

/// An unpadded rendered field.
///
/// Natural length = sign byte (if any) + leading zero digits + body.
#[derive(Debug, Clone, Copy)]
pub struct Field<'a> {
    /// `-`, `+`, or space; counted as part of the natural length.
    pub sign: Option<u8>,
    /// Zero digits demanded by precision, between sign and body.
    pub leading_zeros: usize,
    /// Digit run or string bytes.
    pub body: &'a [u8],
}

impl Field<'_> {
    /// Unpadded length, the `L` that field width pads against.
    #[must_use]
    pub fn natural_len(&self) -> usize {
        usize::from(self.sign.is_some()) + self.leading_zeros + self.body.len()
    }
}

// ---------------------------------------------------------------------------
// Numeric rendering
// ---------------------------------------------------------------------------

fn base_for(conversion: u8) -> (u64, bool) {
    match conversion {
        b'o' => (8, false),
        b'x' => (16, false),
        b'X' => (16, true),
        _ => (10, false),
    }
}

/// Render `value` in `base` into the END of `buf`, right-aligned.
/// Returns the number of digits written.
fn render_digits(mut value: u64, base: u64, uppercase: bool, buf: &mut [u8; DIGIT_BUF]) -> usize {
    if value == 0 {
        buf[DIGIT_BUF - 1] = b'0';
        return 1;
    }
    let alpha = if uppercase { b'A' } else { b'a' };
    let mut pos = DIGIT_BUF;
    while value > 0 && pos > 0 {
        pos -= 1;
        let digit = (value % base) as u8;
        buf[pos] = if digit < 10 {
            b'0' + digit
        } else {
            alpha + (digit - 10)
        };
        value /= base;
    }
    DIGIT_BUF - pos
}

/// Build the field for an integer conversion.
///
/// `negative` and `magnitude` are the sign/magnitude decomposition of the
/// decoded argument (always `false` for unsigned conversions). Precision
/// sets the minimum digit count; precision 0 with value 0 renders an empty
/// digit run. Sign characters apply to signed conversions only — `+`/space
/// flags on `u`/`o`/`x`/`X` are accepted and ignored.
pub fn numeric_field<'a>(
    negative: bool,
    magnitude: u64,
    conversion: u8,
    precision: Option<usize>,
    flags: Flags,
    scratch: &'a mut [u8; DIGIT_BUF],
) -> Field<'a> {
    let (base, uppercase) = base_for(conversion);
    let signed = matches!(conversion, b'd' | b'i');

    let suppress_zero = magnitude == 0 && precision == Some(0);
    let digit_count = if suppress_zero {
        0
    } else {
        render_digits(magnitude, base, uppercase, scratch)
    };
    let body = &scratch[DIGIT_BUF - digit_count..];

    let leading_zeros = precision.map_or(0, |p| p.saturating_sub(digit_count));

    let sign = if !signed {
        None
    } else if negative {
        Some(b'-')
    } else if flags.force_sign {
        Some(b'+')
    } else if flags.space_sign {
        Some(b' ')
    } else {
        None
    };

    Field {
        sign,
        leading_zeros,
        body,
    }
}

// ---------------------------------------------------------------------------
// String rendering
// ---------------------------------------------------------------------------

/// Build the field for a string conversion: the first `precision` bytes of
/// `s` if precision is set and shorter, else all of `s`.
#[must_use]
pub fn string_field(s: &[u8], precision: Option<usize>) -> Field<'_> {
    let limit = precision.unwrap_or(s.len()).min(s.len());
    Field {
        sign: None,
        leading_zeros: 0,
        body: &s[..limit],
    }
}

// ---------------------------------------------------------------------------
// Shared padding / assembly
// ---------------------------------------------------------------------------

/// Pad `field` to `width` and emit it through the writer.
///
/// Fill is space except when `zero_fill` is set, in which case zeros are
/// inserted after the sign. Left justification always pads with trailing
/// spaces. The caller decides `zero_fill` eligibility (numeric conversion,
/// `0` flag, not left-justified, no explicit precision).
pub fn write_field(
    out: &mut BoundedWriter<'_>,
    field: &Field<'_>,
    width: usize,
    left_justify: bool,
    zero_fill: bool,
) {
    let pad = width.saturating_sub(field.natural_len());

    if left_justify {
        emit_content(out, field);
        out.fill(b' ', pad);
    } else if zero_fill {
        if let Some(sign) = field.sign {
            out.append(&[sign]);
        }
        out.fill(b'0', pad);
        out.fill(b'0', field.leading_zeros);
        out.append(field.body);
    } else {
        out.fill(b' ', pad);
        emit_content(out, field);
    }
}

fn emit_content(out: &mut BoundedWriter<'_>, field: &Field<'_>) {
    if let Some(sign) = field.sign {
        out.append(&[sign]);
    }
    out.fill(b'0', field.leading_zeros);
    out.append(field.body);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn render(field: &Field<'_>, width: usize, left: bool, zero: bool) -> Vec<u8> {
        let mut buf = [0u8; 128];
        let mut w = BoundedWriter::new(&mut buf);
        write_field(&mut w, field, width, left, zero);
        let n = w.finish();
        buf[..n].to_vec()
    }

    #[test]
    fn plain_decimal() {
        let mut scratch = [0u8; DIGIT_BUF];
        let f = numeric_field(false, 42, b'd', None, Flags::default(), &mut scratch);
        assert_eq!(render(&f, 0, false, false), b"42");
    }

    #[test]
    fn negative_with_zero_fill_keeps_sign_first() {
        let mut scratch = [0u8; DIGIT_BUF];
        let f = numeric_field(true, 3, b'd', None, Flags::default(), &mut scratch);
        assert_eq!(render(&f, 5, false, true), b"-0003");
    }

    #[test]
    fn precision_pads_digits_not_width() {
        let mut scratch = [0u8; DIGIT_BUF];
        let f = numeric_field(false, 42, b'd', Some(5), Flags::default(), &mut scratch);
        assert_eq!(f.leading_zeros, 3);
        assert_eq!(render(&f, 8, false, false), b"   00042");
    }

    #[test]
    fn zero_value_zero_precision_is_empty() {
        let mut scratch = [0u8; DIGIT_BUF];
        let f = numeric_field(false, 0, b'd', Some(0), Flags::default(), &mut scratch);
        assert_eq!(f.natural_len(), 0);
        assert_eq!(render(&f, 0, false, false), b"");
        assert_eq!(render(&f, 3, false, false), b"   ");
    }

    #[test]
    fn force_sign_beats_space() {
        let flags = Flags {
            force_sign: true,
            space_sign: true,
            ..Flags::default()
        };
        let mut scratch = [0u8; DIGIT_BUF];
        let f = numeric_field(false, 7, b'd', None, flags, &mut scratch);
        assert_eq!(render(&f, 0, false, false), b"+7");
    }

    #[test]
    fn space_flag_on_nonnegative() {
        let flags = Flags {
            space_sign: true,
            ..Flags::default()
        };
        let mut scratch = [0u8; DIGIT_BUF];
        let f = numeric_field(false, 7, b'd', None, flags, &mut scratch);
        assert_eq!(render(&f, 0, false, false), b" 7");
    }

    #[test]
    fn unsigned_never_signs() {
        let flags = Flags {
            force_sign: true,
            space_sign: true,
            ..Flags::default()
        };
        let mut scratch = [0u8; DIGIT_BUF];
        let f = numeric_field(false, 9, b'u', None, flags, &mut scratch);
        assert_eq!(render(&f, 0, false, false), b"9");
    }

    #[test]
    fn hex_alphabets() {
        let mut scratch = [0u8; DIGIT_BUF];
        let f = numeric_field(false, 0xBEEF, b'x', None, Flags::default(), &mut scratch);
        assert_eq!(render(&f, 0, false, false), b"beef");
        let mut scratch = [0u8; DIGIT_BUF];
        let f = numeric_field(false, 0xBEEF, b'X', None, Flags::default(), &mut scratch);
        assert_eq!(render(&f, 0, false, false), b"BEEF");
    }

    #[test]
    fn octal() {
        let mut scratch = [0u8; DIGIT_BUF];
        let f = numeric_field(false, 0o777, b'o', None, Flags::default(), &mut scratch);
        assert_eq!(render(&f, 0, false, false), b"777");
    }

    #[test]
    fn u64_max_octal_fits_scratch() {
        let mut scratch = [0u8; DIGIT_BUF];
        let f = numeric_field(false, u64::MAX, b'o', None, Flags::default(), &mut scratch);
        assert_eq!(f.body.len(), 22);
        assert_eq!(render(&f, 0, false, false), b"1777777777777777777777");
    }

    #[test]
    fn left_justify_pads_with_trailing_spaces() {
        let mut scratch = [0u8; DIGIT_BUF];
        let f = numeric_field(true, 42, b'd', None, Flags::default(), &mut scratch);
        assert_eq!(render(&f, 6, true, false), b"-42   ");
    }

    #[test]
    fn string_truncated_by_precision() {
        let f = string_field(b"hello", Some(3));
        assert_eq!(render(&f, 0, false, false), b"hel");
    }

    #[test]
    fn string_precision_longer_than_input() {
        let f = string_field(b"hi", Some(10));
        assert_eq!(render(&f, 0, false, false), b"hi");
    }

    #[test]
    fn string_width_pads_with_spaces() {
        let f = string_field(b"ab", None);
        assert_eq!(render(&f, 5, false, false), b"   ab");
        assert_eq!(render(&f, 5, true, false), b"ab   ");
    }
}
