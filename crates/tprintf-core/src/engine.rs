//! Orchestration: drives parser, argument cursor, renderers, and writer.
//!
//! A call is fully transient — parser state, cursor position, and write
//! state live on the stack and nothing persists across calls, so concurrent
//! calls with distinct buffers are safe. The engine performs no I/O and
//! requires no process-wide setup.

use crate::args::{ArgCursor, Value};
use crate::directive::{Directive, Precision, Segment, Segments, Width};
use crate::error::FormatError;
use crate::render::{DIGIT_BUF, numeric_field, string_field, write_field};
use crate::writer::BoundedWriter;

/// Render `template` with `args` into `dst`, whose length is the capacity
/// (terminator slot included).
///
/// Returns the logical output length — what the output would occupy with
/// unlimited capacity — regardless of truncation. With a non-empty `dst`
/// the stored bytes are zero-terminated, on the error path too; an empty
/// `dst` stores nothing and the call purely measures.
///
/// `args` must list one slot per argument the template consumes, in
/// left-to-right order (width, then precision, then value, per directive).
pub fn format_into(
    dst: &mut [u8],
    template: &[u8],
    args: &[Value<'_>],
) -> Result<usize, FormatError> {
    let mut out = BoundedWriter::new(dst);
    let mut cursor = ArgCursor::new(args);

    for node in Segments::new(template) {
        let node = match node {
            Ok(node) => node,
            Err(err) => {
                out.finish();
                return Err(err);
            }
        };
        match node {
            Segment::Literal(bytes) => out.append(bytes),
            Segment::Percent => out.append(b"%"),
            Segment::Directive(dir) => {
                if let Err(err) = render_directive(&mut out, &mut cursor, &dir) {
                    out.finish();
                    return Err(err);
                }
            }
        }
    }

    Ok(out.finish())
}

/// C-shaped entry point: logical length on success, `-1` on a fatal
/// directive error.
pub fn snprintf(dst: &mut [u8], template: &[u8], args: &[Value<'_>]) -> isize {
    match format_into(dst, template, args) {
        Ok(len) => isize::try_from(len).unwrap_or(isize::MAX),
        Err(_) => -1,
    }
}

/// Unbounded render: measure, then format into an exactly-sized buffer.
pub fn format_to_vec(template: &[u8], args: &[Value<'_>]) -> Result<Vec<u8>, FormatError> {
    let needed = format_into(&mut [], template, args)?;
    let mut buf = vec![0u8; needed + 1];
    let n = format_into(&mut buf, template, args)?;
    debug_assert_eq!(n, needed);
    buf.truncate(n);
    Ok(buf)
}

fn render_directive(
    out: &mut BoundedWriter<'_>,
    cursor: &mut ArgCursor<'_, '_>,
    dir: &Directive,
) -> Result<(), FormatError> {
    let at = dir.offset;
    let mut left_justify = dir.flags.left_justify;
    let mut zero_pad = dir.flags.zero_pad;

    // Width first, precision second, value last — argument order matches
    // the textual order of the `*` markers.
    let width = match dir.width {
        Width::None => 0,
        Width::Fixed(w) => w,
        Width::FromArg => {
            let w = cursor.next_i32(at)?;
            if w < 0 {
                // Negative dynamic width means left-justify with |w|,
                // which also cancels zero padding.
                left_justify = true;
                zero_pad = false;
                w.unsigned_abs() as usize
            } else {
                w as usize
            }
        }
    };

    let precision = match dir.precision {
        Precision::None => None,
        Precision::Fixed(p) => Some(p),
        Precision::FromArg => {
            let p = cursor.next_i32(at)?;
            // A negative dynamic precision is treated as absent.
            if p < 0 { None } else { Some(p as usize) }
        }
    };

    let numeric = dir.conversion != b's';
    // The 0 flag only fills when right-justified, and an explicit precision
    // on an integer conversion disables it (ISO C 7.21.6.1).
    let zero_fill = zero_pad && numeric && !left_justify && precision.is_none();

    match dir.conversion {
        b'd' | b'i' => {
            let v = cursor.next_signed(dir.length, at)?;
            let mut scratch = [0u8; DIGIT_BUF];
            let field = numeric_field(
                v < 0,
                v.unsigned_abs(),
                dir.conversion,
                precision,
                dir.flags,
                &mut scratch,
            );
            write_field(out, &field, width, left_justify, zero_fill);
        }
        b'o' | b'u' | b'x' | b'X' => {
            let v = cursor.next_unsigned(dir.length, at)?;
            let mut scratch = [0u8; DIGIT_BUF];
            let field = numeric_field(false, v, dir.conversion, precision, dir.flags, &mut scratch);
            write_field(out, &field, width, left_justify, zero_fill);
        }
        b's' => {
            let s = cursor.next_str(at)?;
            let field = string_field(s, precision);
            write_field(out, &field, width, left_justify, false);
        }
        // Parser admits nothing else.
        other => {
            return Err(FormatError::UnsupportedConversion {
                conversion: other,
                at,
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
