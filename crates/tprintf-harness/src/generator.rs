//! Randomized test-case generation.
//!
//! Produces format templates and matching argument lists within the
//! supported conversion subset: 1–5 pieces per call, each a literal run, an
//! integer directive (random flags, optional literal or `*` width/precision,
//! random length modifier with a bit-width-appropriate random value), or a
//! string. Every generated case is a valid call — argument slots line up
//! with what the template consumes, in width/precision/value order.
//!
//! Generation is deterministic: a case is fully determined by (root seed,
//! case index), so any failure can be regenerated in isolation.

use tprintf_core::Value;

/// Owning counterpart of [`Value`], so a generated case can outlive the
/// generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnedValue {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Str(Vec<u8>),
}

impl OwnedValue {
    /// Borrow as the engine-facing value type.
    #[must_use]
    pub fn as_value(&self) -> Value<'_> {
        match self {
            Self::I8(v) => Value::I8(*v),
            Self::I16(v) => Value::I16(*v),
            Self::I32(v) => Value::I32(*v),
            Self::I64(v) => Value::I64(*v),
            Self::U8(v) => Value::U8(*v),
            Self::U16(v) => Value::U16(*v),
            Self::U32(v) => Value::U32(*v),
            Self::U64(v) => Value::U64(*v),
            Self::Str(s) => Value::Str(s),
        }
    }
}

/// One generated call: a template plus its argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Case {
    pub index: usize,
    pub template: Vec<u8>,
    pub args: Vec<OwnedValue>,
}

impl Case {
    /// Deterministically generate case `index` of the stream rooted at
    /// `seed`.
    #[must_use]
    pub fn generate(seed: u64, index: usize) -> Self {
        let mut rng = SplitMix64::new(seed ^ (index as u64).wrapping_mul(0xA076_1D64_78BD_642F));
        let mut template = Vec::new();
        let mut args = Vec::new();

        let pieces = 1 + rng.below(5);
        for _ in 0..pieces {
            match rng.below(4) {
                0 => gen_signed(&mut rng, &mut template, &mut args),
                1 => gen_unsigned(&mut rng, &mut template, &mut args),
                2 => gen_string_directive(&mut rng, &mut template, &mut args),
                _ => gen_literal(&mut rng, &mut template),
            }
        }

        Self {
            index,
            template,
            args,
        }
    }

    /// Borrowed argument slice for the engine.
    #[must_use]
    pub fn arg_values(&self) -> Vec<Value<'_>> {
        self.args.iter().map(OwnedValue::as_value).collect()
    }
}

// ---------------------------------------------------------------------------
// Deterministic RNG (splitmix64)
// ---------------------------------------------------------------------------

struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform-ish value in `0..n`. Modulo bias is irrelevant at test scale.
    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    fn range_i32(&mut self, lo: i32, hi: i32) -> i32 {
        lo + self.below((hi - lo + 1) as u64) as i32
    }

    fn chance(&mut self, num: u64, den: u64) -> bool {
        self.below(den) < num
    }
}

// ---------------------------------------------------------------------------
// Piece generators
// ---------------------------------------------------------------------------

/// Emit random flags plus width/precision for an integer directive.
/// Negative rolls become the `*` form; a negative argument value is
/// sometimes supplied to exercise the normalization rules.
fn gen_int_meta(rng: &mut SplitMix64, template: &mut Vec<u8>, args: &mut Vec<OwnedValue>) {
    for flag in [b' ', b'+', b'-', b'0'] {
        if rng.chance(1, 2) {
            template.push(flag);
        }
    }

    let width = rng.range_i32(-20, 20);
    if width > 0 {
        template.extend_from_slice(width.to_string().as_bytes());
    } else if width < 0 {
        template.push(b'*');
        let supplied = if rng.chance(1, 2) { -width } else { width };
        args.push(OwnedValue::I32(supplied));
    }

    let precision = rng.range_i32(-20, 20);
    if precision > 0 {
        template.push(b'.');
        template.extend_from_slice(precision.to_string().as_bytes());
    } else if precision < 0 {
        template.extend_from_slice(b".*");
        let supplied = if rng.chance(1, 2) { -precision } else { precision };
        args.push(OwnedValue::I32(supplied));
    } else if rng.chance(1, 4) {
        // Bare '.' is precision zero.
        template.push(b'.');
    }
}

fn gen_signed(rng: &mut SplitMix64, template: &mut Vec<u8>, args: &mut Vec<OwnedValue>) {
    template.push(b'%');
    gen_int_meta(rng, template, args);
    let raw = rng.next_u64();
    let (modifier, value): (&[u8], OwnedValue) = match rng.below(5) {
        0 => (b"hh", OwnedValue::I8(raw as i8)),
        1 => (b"h", OwnedValue::I16(raw as i16)),
        2 => (b"", OwnedValue::I32(raw as i32)),
        3 => (b"l", OwnedValue::I64(raw as i64)),
        _ => (b"ll", OwnedValue::I64(raw as i64)),
    };
    template.extend_from_slice(modifier);
    template.push(if rng.chance(1, 2) { b'd' } else { b'i' });
    args.push(value);
}

fn gen_unsigned(rng: &mut SplitMix64, template: &mut Vec<u8>, args: &mut Vec<OwnedValue>) {
    template.push(b'%');
    gen_int_meta(rng, template, args);
    let raw = rng.next_u64();
    let (modifier, value): (&[u8], OwnedValue) = match rng.below(5) {
        0 => (b"hh", OwnedValue::U8(raw as u8)),
        1 => (b"h", OwnedValue::U16(raw as u16)),
        2 => (b"", OwnedValue::U32(raw as u32)),
        3 => (b"l", OwnedValue::U64(raw)),
        _ => (b"ll", OwnedValue::U64(raw)),
    };
    template.extend_from_slice(modifier);
    let conv = [b'o', b'u', b'x', b'X'][rng.below(4) as usize];
    template.push(conv);
    args.push(value);
}

/// `%s` with optional `-` flag, width, and precision. Only flags with
/// standard-defined string behavior are generated, so the host reference
/// stays an authoritative oracle.
fn gen_string_directive(rng: &mut SplitMix64, template: &mut Vec<u8>, args: &mut Vec<OwnedValue>) {
    template.push(b'%');
    if rng.chance(1, 3) {
        if rng.chance(1, 2) {
            template.push(b'-');
        }
        let width = rng.range_i32(0, 20);
        if width > 0 {
            template.extend_from_slice(width.to_string().as_bytes());
        }
        let precision = rng.range_i32(-10, 10);
        if precision >= 0 {
            template.push(b'.');
            template.extend_from_slice(precision.to_string().as_bytes());
        }
    }
    template.push(b's');
    args.push(OwnedValue::Str(random_text(rng)));
}

fn gen_literal(rng: &mut SplitMix64, template: &mut Vec<u8>) {
    template.extend_from_slice(&random_text(rng));
    if rng.chance(1, 8) {
        template.extend_from_slice(b"%%");
    }
}

/// Letters and spaces, length 0..=50 skewed toward short strings.
fn random_text(rng: &mut SplitMix64) -> Vec<u8> {
    const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ ";
    let len = rng.below(51).min(rng.below(51)) as usize;
    (0..len)
        .map(|_| ALPHABET[rng.below(ALPHABET.len() as u64) as usize])
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tprintf_core::{Precision, Segment, Segments, Width, format_to_vec};

    #[test]
    fn generation_is_deterministic() {
        let a = Case::generate(0x1234, 7);
        let b = Case::generate(0x1234, 7);
        assert_eq!(a, b);
        let c = Case::generate(0x1234, 8);
        assert_ne!(a.template, c.template);
    }

    #[test]
    fn generated_cases_are_valid_calls() {
        for index in 0..500 {
            let case = Case::generate(0xA11CE, index);
            let args = case.arg_values();
            let rendered = format_to_vec(&case.template, &args);
            assert!(
                rendered.is_ok(),
                "case {index} invalid: template {:?}, err {:?}",
                String::from_utf8_lossy(&case.template),
                rendered.unwrap_err()
            );
        }
    }

    #[test]
    fn argument_count_matches_template_demand() {
        for index in 0..500 {
            let case = Case::generate(0xBEE, index);
            let mut needed = 0usize;
            for node in Segments::new(&case.template) {
                if let Segment::Directive(dir) = node.unwrap() {
                    if dir.width == Width::FromArg {
                        needed += 1;
                    }
                    if dir.precision == Precision::FromArg {
                        needed += 1;
                    }
                    needed += 1;
                }
            }
            assert_eq!(needed, case.args.len(), "case {index}");
        }
    }

    #[test]
    fn slot_demand_stays_within_oracle_limit() {
        for index in 0..2000 {
            let case = Case::generate(0xCAFE, index);
            assert!(case.args.len() <= crate::oracle::MAX_SLOTS);
        }
    }
}
