//! Scalar encoding for the JSON and line-protocol formats.
//!
//! Every literal the compiler bakes into a skeleton and every value the
//! render engine substitutes goes through these functions, so both phases
//! agree on escaping and number formatting.
//!
//! # Number Formatting
//!
//! | Where | Floats |
//! |-------|--------|
//! | Baked literals, tag values | shortest round-trip form, never exponential (`3.25`, `1`) |
//! | Render parameters, point values | fixed-point with the configured precision (`100.500000`) |
//!
//! Non-finite floats have no representation in either format and are
//! rejected.

use crate::error::{Error, Result};
use crate::value::Value;

/// Writes `s` as a quoted JSON string, escaping `"` and `\`.
///
/// No other character is escaped. Control characters (`\n`, `\t`, U+0000
/// to U+001F) are written as-is, which strict JSON parsers reject; strings
/// holding them do not round-trip.
pub fn write_string(out: &mut String, s: &str) {
    out.reserve(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => out.push(c),
        }
    }
    out.push('"');
}

/// Writes a JSON property key followed by `:`.
pub fn write_key(out: &mut String, key: &str) {
    write_string(out, key);
    out.push(':');
}

/// Writes a float in its shortest non-exponential form.
pub fn write_float(out: &mut String, n: f64) -> Result<()> {
    check_finite(n)?;
    out.push_str(&n.to_string());
    Ok(())
}

/// Writes a float in fixed-point notation with `precision` decimals.
pub fn write_fixed(out: &mut String, n: f64, precision: usize) -> Result<()> {
    check_finite(n)?;
    out.push_str(&format!("{:.*}", precision, n));
    Ok(())
}

fn check_finite(n: f64) -> Result<()> {
    if n.is_finite() {
        Ok(())
    } else {
        Err(Error::UnsupportedKind {
            kind: non_finite_kind(n),
        })
    }
}

/// Names the kind of a non-finite float.
pub(crate) fn non_finite_kind(n: f64) -> &'static str {
    if n.is_nan() {
        "NaN float"
    } else {
        "infinite float"
    }
}

/// Encodes render-time values as JSON.
///
/// Floats passed as parameters are written in fixed-point notation;
/// collections are written inline, in key order for maps.
#[derive(Debug, Clone, Copy)]
pub struct JsonEncoder {
    float_precision: usize,
}

impl JsonEncoder {
    /// Creates an encoder writing floats with `float_precision` decimals.
    pub fn new(float_precision: usize) -> Self {
        Self { float_precision }
    }

    /// Appends the JSON encoding of `value` to `out`.
    pub fn write(&self, out: &mut String, value: &Value) -> Result<()> {
        match value {
            Value::String(s) => write_string(out, s),
            Value::Int(n) => out.push_str(&n.to_string()),
            Value::UInt(n) => out.push_str(&n.to_string()),
            Value::Float(n) => write_fixed(out, *n, self.float_precision)?,
            Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Value::Null => out.push_str("null"),
            Value::Map(map) => {
                out.push('{');
                for (i, (key, item)) in map.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    write_key(out, key);
                    self.write(out, item)?;
                }
                out.push('}');
            }
            Value::List(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    self.write(out, item)?;
                }
                out.push(']');
            }
        }
        Ok(())
    }

    /// Returns the JSON encoding of `value` as a new string.
    pub fn encode(&self, value: &Value) -> Result<String> {
        let mut out = String::new();
        self.write(&mut out, value)?;
        Ok(out)
    }
}

/// Appends a line-protocol tag value: strings raw, numbers and booleans as text.
pub fn write_tag_value(out: &mut String, value: &Value) -> Result<()> {
    match value {
        Value::String(s) => out.push_str(s),
        Value::Int(n) => out.push_str(&n.to_string()),
        Value::UInt(n) => out.push_str(&n.to_string()),
        Value::Float(n) => write_float(out, *n)?,
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Map(_) | Value::List(_) | Value::Null => {
            return Err(Error::UnsupportedKind { kind: value.kind() })
        }
    }
    Ok(())
}
