//! Typed argument list and sequential cursor.
//!
//! The C original pulls conversion arguments from a `va_list`; here the
//! caller builds an ordered, typed slice of [`Value`]s up front and the
//! cursor performs sequential typed reads, consuming exactly one slot per
//! read. The consumption order per directive is width argument, then
//! precision argument, then value argument, matching left-to-right textual
//! order in the template.

use crate::directive::LengthMod;
use crate::error::FormatError;

/// A single variadic-style argument.
///
/// Integer variants mirror the length-modifier bit widths (`hh` 8-bit, `h`
/// 16-bit, none 32-bit, `l`/`ll` 64-bit). `Str` is a narrow byte string
/// without a terminating zero; the slice length is authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value<'a> {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Str(&'a [u8]),
}

/// Sequential typed reader over an argument slice.
pub struct ArgCursor<'s, 'v> {
    args: &'s [Value<'v>],
    index: usize,
}

impl<'s, 'v> ArgCursor<'s, 'v> {
    #[must_use]
    pub fn new(args: &'s [Value<'v>]) -> Self {
        Self { args, index: 0 }
    }

    /// Number of argument slots consumed so far.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.index
    }

    fn take(&mut self, at: usize, expected: &'static str) -> Result<Value<'v>, FormatError> {
        match self.args.get(self.index) {
            Some(&value) => {
                self.index += 1;
                Ok(value)
            }
            None => Err(FormatError::ArgumentMismatch {
                index: self.index,
                at,
                expected,
            }),
        }
    }

    fn mismatch(&self, at: usize, expected: &'static str) -> FormatError {
        FormatError::ArgumentMismatch {
            // `take` already advanced past the offending slot.
            index: self.index - 1,
            at,
            expected,
        }
    }

    /// Read a width or precision argument (always a 32-bit signed int, as
    /// with the `*` form in C).
    pub fn next_i32(&mut self, at: usize) -> Result<i32, FormatError> {
        match self.take(at, "i32")? {
            Value::I32(v) => Ok(v),
            _ => Err(self.mismatch(at, "i32")),
        }
    }

    /// Read a signed integer of the width selected by `length`, sign-extended
    /// to 64 bits.
    pub fn next_signed(&mut self, length: LengthMod, at: usize) -> Result<i64, FormatError> {
        let expected = match length {
            LengthMod::Hh => "i8",
            LengthMod::H => "i16",
            LengthMod::None => "i32",
            LengthMod::L | LengthMod::Ll => "i64",
        };
        match (length, self.take(at, expected)?) {
            (LengthMod::Hh, Value::I8(v)) => Ok(i64::from(v)),
            (LengthMod::H, Value::I16(v)) => Ok(i64::from(v)),
            (LengthMod::None, Value::I32(v)) => Ok(i64::from(v)),
            (LengthMod::L | LengthMod::Ll, Value::I64(v)) => Ok(v),
            _ => Err(self.mismatch(at, expected)),
        }
    }

    /// Read an unsigned integer of the width selected by `length`,
    /// zero-extended to 64 bits.
    pub fn next_unsigned(&mut self, length: LengthMod, at: usize) -> Result<u64, FormatError> {
        let expected = match length {
            LengthMod::Hh => "u8",
            LengthMod::H => "u16",
            LengthMod::None => "u32",
            LengthMod::L | LengthMod::Ll => "u64",
        };
        match (length, self.take(at, expected)?) {
            (LengthMod::Hh, Value::U8(v)) => Ok(u64::from(v)),
            (LengthMod::H, Value::U16(v)) => Ok(u64::from(v)),
            (LengthMod::None, Value::U32(v)) => Ok(u64::from(v)),
            (LengthMod::L | LengthMod::Ll, Value::U64(v)) => Ok(v),
            _ => Err(self.mismatch(at, expected)),
        }
    }

    /// Read a string argument. Length modifiers are not combined with string
    /// conversions in this subset, so the modifier is not consulted.
    pub fn next_str(&mut self, at: usize) -> Result<&'v [u8], FormatError> {
        match self.take(at, "str")? {
            Value::Str(s) => Ok(s),
            _ => Err(self.mismatch(at, "str")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_in_order() {
        let args = [Value::I32(6), Value::I32(3), Value::I32(42)];
        let mut cur = ArgCursor::new(&args);
        assert_eq!(cur.next_i32(0).unwrap(), 6);
        assert_eq!(cur.next_i32(0).unwrap(), 3);
        assert_eq!(cur.next_signed(LengthMod::None, 0).unwrap(), 42);
        assert_eq!(cur.consumed(), 3);
    }

    #[test]
    fn sign_extends_narrow_values() {
        let args = [Value::I8(-1), Value::I16(-2)];
        let mut cur = ArgCursor::new(&args);
        assert_eq!(cur.next_signed(LengthMod::Hh, 0).unwrap(), -1);
        assert_eq!(cur.next_signed(LengthMod::H, 0).unwrap(), -2);
    }

    #[test]
    fn zero_extends_unsigned() {
        let args = [Value::U8(0xFF), Value::U64(u64::MAX)];
        let mut cur = ArgCursor::new(&args);
        assert_eq!(cur.next_unsigned(LengthMod::Hh, 0).unwrap(), 255);
        assert_eq!(cur.next_unsigned(LengthMod::Ll, 0).unwrap(), u64::MAX);
    }

    #[test]
    fn exhaustion_reports_mismatch() {
        let mut cur = ArgCursor::new(&[]);
        let err = cur.next_i32(4).unwrap_err();
        assert_eq!(
            err,
            FormatError::ArgumentMismatch {
                index: 0,
                at: 4,
                expected: "i32"
            }
        );
    }

    #[test]
    fn wrong_type_reports_mismatch() {
        let args = [Value::Str(b"nope")];
        let mut cur = ArgCursor::new(&args);
        let err = cur.next_signed(LengthMod::None, 9).unwrap_err();
        assert_eq!(
            err,
            FormatError::ArgumentMismatch {
                index: 0,
                at: 9,
                expected: "i32"
            }
        );
    }

    #[test]
    fn long_and_long_long_share_width() {
        let args = [Value::I64(-5), Value::I64(7)];
        let mut cur = ArgCursor::new(&args);
        assert_eq!(cur.next_signed(LengthMod::L, 0).unwrap(), -5);
        assert_eq!(cur.next_signed(LengthMod::Ll, 0).unwrap(), 7);
    }
}
