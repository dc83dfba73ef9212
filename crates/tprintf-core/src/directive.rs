//! Format template parsing.
//!
//! Scans a template into a lazy sequence of literal spans and parsed
//! directive descriptors. Grammar per directive:
//!
//! ```text
//! % [flags]* [width] [. precision] [length-mod] conversion
//! ```
//!
//! Supported flags are `space + - 0`, length modifiers `hh h l ll`, and
//! conversions `d i o u x X s`. `%%` emits a literal percent. Anything else
//! under a `%` is a fatal parse error; there is no silent pass-through.
//!
//! Reference: ISO C11 7.21.6.1, restricted to the subset above.

use crate::error::FormatError;

// ---------------------------------------------------------------------------
// Directive descriptor types
// ---------------------------------------------------------------------------

/// Flags parsed from a directive. Repeats are accepted and collapse into the
/// set; `+` overrides space and `-` cancels `0` at parse time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    pub left_justify: bool, // '-'
    pub force_sign: bool,   // '+'
    pub space_sign: bool,   // ' '
    pub zero_pad: bool,     // '0'
}

/// Field width specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    None,
    Fixed(usize),
    FromArg, // '*'
}

/// Precision specification. A bare `.` parses as `Fixed(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    None,
    Fixed(usize),
    FromArg, // '.*'
}

/// Length modifier selecting the argument bit width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthMod {
    None,
    Hh, // 8-bit
    H,  // 16-bit
    L,  // 64-bit (long)
    Ll, // 64-bit (long long)
}

/// A fully parsed conversion directive. Immutable after parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive {
    pub flags: Flags,
    pub width: Width,
    pub precision: Precision,
    pub length: LengthMod,
    pub conversion: u8,
    /// Byte offset of the introducing `%` in the template, for diagnostics.
    pub offset: usize,
}

/// One node of a parsed template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Literal bytes emitted verbatim.
    Literal(&'a [u8]),
    /// A `%%` escape (emit a single '%', consume no argument).
    Percent,
    /// A conversion directive requiring argument(s).
    Directive(Directive),
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Parse a single directive starting after the `%`.
///
/// `rest` points at the first byte after `%`; `at` is the offset of the `%`
/// itself. Returns the directive and the number of bytes consumed from
/// `rest`.
pub fn parse_directive(rest: &[u8], at: usize) -> Result<(Directive, usize), FormatError> {
    let mut pos = 0;
    let len = rest.len();

    // --- flags ---
    let mut flags = Flags::default();
    while pos < len {
        match rest[pos] {
            b'-' => flags.left_justify = true,
            b'+' => flags.force_sign = true,
            b' ' => flags.space_sign = true,
            b'0' => flags.zero_pad = true,
            _ => break,
        }
        pos += 1;
    }
    // '+' overrides ' '; '-' overrides '0'.
    if flags.force_sign {
        flags.space_sign = false;
    }
    if flags.left_justify {
        flags.zero_pad = false;
    }

    // --- width ---
    let width = if pos < len && rest[pos] == b'*' {
        pos += 1;
        Width::FromArg
    } else {
        let start = pos;
        while pos < len && rest[pos].is_ascii_digit() {
            pos += 1;
        }
        if pos > start {
            Width::Fixed(parse_decimal(&rest[start..pos]))
        } else {
            Width::None
        }
    };

    // --- precision ---
    let precision = if pos < len && rest[pos] == b'.' {
        pos += 1;
        if pos < len && rest[pos] == b'*' {
            pos += 1;
            Precision::FromArg
        } else {
            let start = pos;
            while pos < len && rest[pos].is_ascii_digit() {
                pos += 1;
            }
            // A bare '.' means precision zero.
            Precision::Fixed(if pos > start {
                parse_decimal(&rest[start..pos])
            } else {
                0
            })
        }
    } else {
        Precision::None
    };

    // --- length modifier ---
    let length = if pos < len {
        match rest[pos] {
            b'h' => {
                pos += 1;
                if pos < len && rest[pos] == b'h' {
                    pos += 1;
                    LengthMod::Hh
                } else {
                    LengthMod::H
                }
            }
            b'l' => {
                pos += 1;
                if pos < len && rest[pos] == b'l' {
                    pos += 1;
                    LengthMod::Ll
                } else {
                    LengthMod::L
                }
            }
            _ => LengthMod::None,
        }
    } else {
        LengthMod::None
    };

    // --- conversion character ---
    if pos >= len {
        return Err(FormatError::TruncatedDirective { at });
    }
    let conversion = rest[pos];
    pos += 1;

    match conversion {
        b'd' | b'i' | b'o' | b'u' | b'x' | b'X' | b's' => {}
        other => {
            return Err(FormatError::UnsupportedConversion {
                conversion: other,
                at,
            });
        }
    }

    Ok((
        Directive {
            flags,
            width,
            precision,
            length,
            conversion,
            offset: at,
        },
        pos,
    ))
}

/// Lazy iterator over the segments of a format template.
///
/// Yields literal spans and directives left to right; the first malformed
/// directive ends iteration with an `Err` item.
pub struct Segments<'a> {
    fmt: &'a [u8],
    pos: usize,
}

impl<'a> Segments<'a> {
    #[must_use]
    pub fn new(fmt: &'a [u8]) -> Self {
        Self { fmt, pos: 0 }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Result<Segment<'a>, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        let len = self.fmt.len();
        if self.pos >= len {
            return None;
        }

        if self.fmt[self.pos] != b'%' {
            let start = self.pos;
            while self.pos < len && self.fmt[self.pos] != b'%' {
                self.pos += 1;
            }
            return Some(Ok(Segment::Literal(&self.fmt[start..self.pos])));
        }

        let at = self.pos;
        self.pos += 1;
        if self.pos >= len {
            // Bare '%' at the end of the template.
            return Some(Err(FormatError::TruncatedDirective { at }));
        }
        if self.fmt[self.pos] == b'%' {
            self.pos += 1;
            return Some(Ok(Segment::Percent));
        }

        match parse_directive(&self.fmt[self.pos..], at) {
            Ok((dir, consumed)) => {
                self.pos += consumed;
                Some(Ok(Segment::Directive(dir)))
            }
            Err(err) => {
                self.pos = len;
                Some(Err(err))
            }
        }
    }
}

fn parse_decimal(digits: &[u8]) -> usize {
    let mut result = 0_usize;
    for &d in digits {
        result = result
            .saturating_mul(10)
            .saturating_add((d - b'0') as usize);
    }
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
