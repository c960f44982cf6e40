//! Byte layout of committed documents
//!
//! Documents are single-line JSON with `", "` between items and `": "`
//! between key and value. Non-ASCII text is written as-is. Floats use the
//! shortest round-trip digits: positional notation for exponents in
//! `-4..16`, otherwise `d.ddde±XX` with at least two exponent digits.
//! Identities are hashes of these bytes, so any change here renames every
//! submission.

use crate::error::Result;
use serde::Serialize;
use serde_json::ser::Formatter;
use std::io;

/// Serialize `value` to document bytes
pub fn to_document_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(256);
    let mut ser = serde_json::Serializer::with_formatter(&mut out, DocumentFormatter);
    value.serialize(&mut ser)?;
    Ok(out)
}

/// JSON formatter writing spaced separators and positional/exponent floats
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentFormatter;

impl Formatter for DocumentFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(format_f64(value).as_bytes())
    }
}

/// Render a finite float the way documents store it
///
/// `80.0` stays `80.0`, `1e16` becomes `1e+16`, `0.00001` becomes `1e-05`.
pub fn format_f64(value: f64) -> String {
    // `{:e}` gives the shortest round-trip digits, e.g. "-1.25e-7"
    let sci = format!("{value:e}");
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let (sign, mantissa) = mantissa
        .strip_prefix('-')
        .map_or(("", mantissa), |m| ("-", m));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    let body = if (-4..16).contains(&exponent) {
        positional(&digits, exponent)
    } else {
        let (lead, rest) = digits.split_at(1);
        let fraction = if rest.is_empty() {
            String::new()
        } else {
            format!(".{rest}")
        };
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        format!("{lead}{fraction}e{exp_sign}{:02}", exponent.unsigned_abs())
    };

    format!("{sign}{body}")
}

fn positional(digits: &str, exponent: i32) -> String {
    if exponent < 0 {
        let zeros = "0".repeat(exponent.unsigned_abs() as usize - 1);
        return format!("0.{zeros}{digits}");
    }

    let int_len = exponent.unsigned_abs() as usize + 1;
    if digits.len() <= int_len {
        format!("{digits}{}.0", "0".repeat(int_len - digits.len()))
    } else {
        let (int_part, frac_part) = digits.split_at(int_len);
        format!("{int_part}.{frac_part}")
    }
}
