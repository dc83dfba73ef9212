//! Host libc reference oracle.
//!
//! Bridges a typed argument list onto a real variadic `snprintf` call so the
//! engine can be diffed byte-for-byte against the platform implementation.
//! This is the only module that performs FFI; everything is promoted to
//! register-width slots (the same promotion the C ABI applies to variadic
//! integer arguments on 64-bit targets) and dispatched by slot count.

use std::ffi::CString;
use std::os::raw::{c_char, c_int};

use thiserror::Error;

use crate::generator::OwnedValue;

/// Maximum variadic slots a single call may need. The generator produces at
/// most 5 directives with 3 slots each.
pub const MAX_SLOTS: usize = 16;

/// Failures of the oracle itself (never of the implementation under test).
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("template contains an interior NUL byte")]
    TemplateNul,
    #[error("string argument contains an interior NUL byte")]
    ArgumentNul,
    #[error("call needs {needed} variadic slots, limit is {MAX_SLOTS}")]
    TooManySlots { needed: usize },
    #[error("host snprintf returned {code}")]
    HostFailure { code: i32 },
}

/// What the host wrote: the stored bytes (up to the terminator) plus the
/// logical length it reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRender {
    pub stored: Vec<u8>,
    pub logical: usize,
}

/// Invoke host `snprintf` with the given capacity.
pub fn host_snprintf(
    capacity: usize,
    template: &[u8],
    args: &[OwnedValue],
) -> Result<HostRender, OracleError> {
    let fmt = CString::new(template).map_err(|_| OracleError::TemplateNul)?;

    // Promote arguments to variadic slots. CString heap buffers stay put
    // when the owning vector grows, so pointers taken here remain valid for
    // the duration of the call.
    let mut strings: Vec<CString> = Vec::new();
    let mut slots: Vec<u64> = Vec::with_capacity(args.len());
    for arg in args {
        let slot = match arg {
            OwnedValue::I8(v) => i64::from(*v) as u64,
            OwnedValue::I16(v) => i64::from(*v) as u64,
            OwnedValue::I32(v) => i64::from(*v) as u64,
            OwnedValue::I64(v) => *v as u64,
            OwnedValue::U8(v) => u64::from(*v),
            OwnedValue::U16(v) => u64::from(*v),
            OwnedValue::U32(v) => u64::from(*v),
            OwnedValue::U64(v) => *v,
            OwnedValue::Str(s) => {
                let c = CString::new(s.as_slice()).map_err(|_| OracleError::ArgumentNul)?;
                let ptr = c.as_ptr() as usize as u64;
                strings.push(c);
                ptr
            }
        };
        slots.push(slot);
    }
    if slots.len() > MAX_SLOTS {
        return Err(OracleError::TooManySlots {
            needed: slots.len(),
        });
    }

    let mut buf = vec![0u8; capacity.max(1)];
    let ret = unsafe {
        dispatch(
            buf.as_mut_ptr().cast::<c_char>(),
            capacity,
            fmt.as_ptr(),
            &slots,
        )
    };
    drop(strings);

    if ret < 0 {
        return Err(OracleError::HostFailure { code: ret });
    }
    let logical = ret as usize;
    let stored = if capacity == 0 {
        Vec::new()
    } else {
        buf[..logical.min(capacity - 1)].to_vec()
    };
    Ok(HostRender { stored, logical })
}

/// Full (untruncated) host rendering: measure with capacity 0, then render
/// into an exactly-sized buffer.
pub fn host_render_full(template: &[u8], args: &[OwnedValue]) -> Result<Vec<u8>, OracleError> {
    let measured = host_snprintf(0, template, args)?;
    let full = host_snprintf(measured.logical + 1, template, args)?;
    Ok(full.stored)
}

/// Variadic dispatch by slot count. All slots are register-width integers;
/// the callee narrows per its own format string.
unsafe fn dispatch(buf: *mut c_char, capacity: usize, fmt: *const c_char, s: &[u64]) -> c_int {
    unsafe {
        match *s {
            [] => libc::snprintf(buf, capacity, fmt),
            [a] => libc::snprintf(buf, capacity, fmt, a),
            [a, b] => libc::snprintf(buf, capacity, fmt, a, b),
            [a, b, c] => libc::snprintf(buf, capacity, fmt, a, b, c),
            [a, b, c, d] => libc::snprintf(buf, capacity, fmt, a, b, c, d),
            [a, b, c, d, e] => libc::snprintf(buf, capacity, fmt, a, b, c, d, e),
            [a, b, c, d, e, f] => libc::snprintf(buf, capacity, fmt, a, b, c, d, e, f),
            [a, b, c, d, e, f, g] => libc::snprintf(buf, capacity, fmt, a, b, c, d, e, f, g),
            [a, b, c, d, e, f, g, h] => libc::snprintf(buf, capacity, fmt, a, b, c, d, e, f, g, h),
            [a, b, c, d, e, f, g, h, i] => {
                libc::snprintf(buf, capacity, fmt, a, b, c, d, e, f, g, h, i)
            }
            [a, b, c, d, e, f, g, h, i, j] => {
                libc::snprintf(buf, capacity, fmt, a, b, c, d, e, f, g, h, i, j)
            }
            [a, b, c, d, e, f, g, h, i, j, k] => {
                libc::snprintf(buf, capacity, fmt, a, b, c, d, e, f, g, h, i, j, k)
            }
            [a, b, c, d, e, f, g, h, i, j, k, l] => {
                libc::snprintf(buf, capacity, fmt, a, b, c, d, e, f, g, h, i, j, k, l)
            }
            [a, b, c, d, e, f, g, h, i, j, k, l, m] => {
                libc::snprintf(buf, capacity, fmt, a, b, c, d, e, f, g, h, i, j, k, l, m)
            }
            [a, b, c, d, e, f, g, h, i, j, k, l, m, n] => {
                libc::snprintf(buf, capacity, fmt, a, b, c, d, e, f, g, h, i, j, k, l, m, n)
            }
            [a, b, c, d, e, f, g, h, i, j, k, l, m, n, o] => {
                libc::snprintf(buf, capacity, fmt, a, b, c, d, e, f, g, h, i, j, k, l, m, n, o)
            }
            [a, b, c, d, e, f, g, h, i, j, k, l, m, n, o, p] => {
                libc::snprintf(buf, capacity, fmt, a, b, c, d, e, f, g, h, i, j, k, l, m, n, o, p)
            }
            _ => -1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_plain_decimal() {
        let out = host_snprintf(32, b"%d", &[OwnedValue::I32(123)]).unwrap();
        assert_eq!(out.stored, b"123");
        assert_eq!(out.logical, 3);
    }

    #[test]
    fn capacity_zero_measures() {
        let out = host_snprintf(0, b"%d", &[OwnedValue::I32(12345)]).unwrap();
        assert!(out.stored.is_empty());
        assert_eq!(out.logical, 5);
    }

    #[test]
    fn truncates_at_capacity() {
        let out = host_snprintf(4, b"%s", &[OwnedValue::Str(b"hello".to_vec())]).unwrap();
        assert_eq!(out.stored, b"hel");
        assert_eq!(out.logical, 5);
    }

    #[test]
    fn mixed_widths_promote_correctly() {
        let out = host_render_full(
            b"%hhd %hd %d %ld %llu",
            &[
                OwnedValue::I8(-1),
                OwnedValue::I16(-300),
                OwnedValue::I32(7),
                OwnedValue::I64(-5_000_000_000),
                OwnedValue::U64(u64::MAX),
            ],
        )
        .unwrap();
        assert_eq!(out, b"-1 -300 7 -5000000000 18446744073709551615");
    }

    #[test]
    fn interior_nul_in_template_is_rejected() {
        let err = host_snprintf(8, b"a\0b", &[]).unwrap_err();
        assert!(matches!(err, OracleError::TemplateNul));
    }
}
