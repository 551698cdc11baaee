//! Typed substitution values.

use std::fmt;

use crate::num;

/// Fractional-digit policy for float rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decimals {
    /// Exactly this many truncated digits after the decimal point.
    /// `Fixed(0)` renders the integer part alone.
    Fixed(u8),
    /// Up to this many digits, stopping at the last non-zero one; an
    /// all-zero fraction drops the decimal point entirely.
    MaxNonZero(u8),
}

/// Layout of a rendered timer value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerStyle {
    /// `m:ss` below one hour, `h:mm:ss` from one hour up.
    Auto,
    /// `m:ss` with unbounded minutes.
    MinSec,
    /// `h:mm:ss`.
    HourMinSec,
}

/// One substitution value. Exactly one payload is live per instance.
///
/// Values borrow their string and display payloads, so filling an argument
/// never copies the underlying text.
#[derive(Clone, Copy)]
pub enum ArgValue<'a> {
    /// No value; renders nothing.
    Absent,
    Bool(bool),
    Char(char),
    CharRepeat { ch: char, count: u16 },
    Str(&'a str),
    /// A byte range of `source`; validated on entry into an [`ArgList`].
    ///
    /// [`ArgList`]: crate::ArgList
    StrRange {
        source: &'a str,
        start: usize,
        len: usize,
    },
    Int { value: i64, base: u32 },
    Float { value: f64, decimals: Decimals },
    Timer { seconds: i64, style: TimerStyle },
    /// An opaque value rendered through its `Display` impl.
    Display(&'a dyn fmt::Display),
}

impl<'a> ArgValue<'a> {
    /// Renders the payload into `out`.
    ///
    /// Returns whether anything was written, which is `false` only for
    /// [`ArgValue::Absent`].
    pub fn write_to(&self, out: &mut String) -> bool {
        use std::fmt::Write as _;
        match *self {
            ArgValue::Absent => false,
            ArgValue::Bool(b) => {
                out.push_str(if b { "true" } else { "false" });
                true
            }
            ArgValue::Char(c) => {
                out.push(c);
                true
            }
            ArgValue::CharRepeat { ch, count } => {
                for _ in 0..count {
                    out.push(ch);
                }
                true
            }
            ArgValue::Str(s) => {
                out.push_str(s);
                true
            }
            ArgValue::StrRange { source, start, len } => {
                out.push_str(&source[start..start + len]);
                true
            }
            ArgValue::Int { value, base } => {
                num::write_int_unchecked(out, value, base);
                true
            }
            ArgValue::Float { value, decimals } => {
                num::write_float(out, value, decimals);
                true
            }
            ArgValue::Timer { seconds, style } => {
                num::write_timer(out, seconds, style);
                true
            }
            ArgValue::Display(value) => {
                let _ = write!(out, "{value}");
                true
            }
        }
    }

    /// Materializes the rendered text.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }
}

impl PartialEq for ArgValue<'_> {
    fn eq(&self, other: &Self) -> bool {
        use ArgValue::*;
        match (self, other) {
            (Absent, Absent) => true,
            (Bool(a), Bool(b)) => a == b,
            (Char(a), Char(b)) => a == b,
            (
                CharRepeat { ch: a, count: n },
                CharRepeat { ch: b, count: m },
            ) => a == b && n == m,
            (Str(a), Str(b)) => a == b,
            (
                StrRange { source: a, start: s0, len: l0 },
                StrRange { source: b, start: s1, len: l1 },
            ) => a == b && s0 == s1 && l0 == l1,
            (Int { value: a, base: b0 }, Int { value: b, base: b1 }) => a == b && b0 == b1,
            (
                Float { value: a, decimals: d0 },
                Float { value: b, decimals: d1 },
            ) => a == b && d0 == d1,
            (
                Timer { seconds: a, style: s0 },
                Timer { seconds: b, style: s1 },
            ) => a == b && s0 == s1,
            // Opaque payloads compare by identity.
            (Display(a), Display(b)) => std::ptr::addr_eq(
                *a as *const dyn fmt::Display,
                *b as *const dyn fmt::Display,
            ),
            _ => false,
        }
    }
}

impl fmt::Debug for ArgValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Absent => f.write_str("Absent"),
            ArgValue::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            ArgValue::Char(c) => f.debug_tuple("Char").field(c).finish(),
            ArgValue::CharRepeat { ch, count } => f
                .debug_struct("CharRepeat")
                .field("ch", ch)
                .field("count", count)
                .finish(),
            ArgValue::Str(s) => f.debug_tuple("Str").field(s).finish(),
            ArgValue::StrRange { source, start, len } => f
                .debug_struct("StrRange")
                .field("source", source)
                .field("start", start)
                .field("len", len)
                .finish(),
            ArgValue::Int { value, base } => f
                .debug_struct("Int")
                .field("value", value)
                .field("base", base)
                .finish(),
            ArgValue::Float { value, decimals } => f
                .debug_struct("Float")
                .field("value", value)
                .field("decimals", decimals)
                .finish(),
            ArgValue::Timer { seconds, style } => f
                .debug_struct("Timer")
                .field("seconds", seconds)
                .field("style", style)
                .finish(),
            ArgValue::Display(value) => write!(f, "Display({value})"),
        }
    }
}
