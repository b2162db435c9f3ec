//! # literal.rs
//!
//! Scanning of numeric literals inside normalized expression text.
//!
//! A literal is a decimal number with an optional fraction and an optional
//! exponent, `[+-]?(d+(.d*)?|.d+)([eE][+-]?d+)?`. The sign in front is only
//! part of the literal where the caller allows it.

use num_complex::Complex;

fn count_digits(bytes: &[u8], start: usize) -> usize
{
    bytes[start.min(bytes.len())..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count()
}

/// Returns the byte length of the numeric literal at the start of `text`.
///
/// # Arguments
///
/// * `text` - The text to scan.
/// * `signed` - Whether a leading `+` or `-` belongs to the literal.
pub(crate) fn leading_len(text: &str, signed: bool) -> Option<usize>
{
    let bytes = text.as_bytes();
    let mut end = 0;
    if signed && matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_digits = count_digits(bytes, end);
    end += int_digits;

    if bytes.get(end) == Some(&b'.') {
        let frac_digits = count_digits(bytes, end + 1);
        if int_digits == 0 && frac_digits == 0 {
            return None;
        }
        end += 1 + frac_digits;
    } else if int_digits == 0 {
        return None;
    }

    // an exponent only counts when digits follow it
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(bytes, exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    Some(end)
}

/// Returns the byte length of the longest unsigned literal `text` ends with.
pub(crate) fn trailing_len(text: &str) -> Option<usize>
{
    text.char_indices()
        .map(|(start, _)| start)
        .find(|start| is_literal(&text[*start..], false))
        .map(|start| text.len() - start)
}

/// Returns true if the whole of `text` is one numeric literal.
pub(crate) fn is_literal(text: &str, signed: bool) -> bool
{
    !text.is_empty() && leading_len(text, signed) == Some(text.len())
}

/// Parses `text` as a signed numeric literal.
pub(crate) fn parse(text: &str) -> Option<Complex<f64>>
{
    if !is_literal(text, true) {
        return None;
    }
    text.parse::<f64>().ok().map(Complex::from)
}

/// Returns true if the sign at byte `idx` is the exponent sign of a literal,
/// as in `1e-5`, rather than an additive operator.
pub(crate) fn is_exponent_sign(text: &str, idx: usize) -> bool
{
    let bytes = text.as_bytes();
    if idx < 2 || !matches!(bytes.get(idx - 1), Some(b'e' | b'E')) {
        return false;
    }
    if !bytes.get(idx + 1).is_some_and(|b| b.is_ascii_digit()) {
        return false;
    }

    let mantissa_end = idx - 1;
    let mantissa_start = bytes[..mantissa_end]
        .iter()
        .rposition(|b| !(b.is_ascii_digit() || *b == b'.'))
        .map_or(0, |pos| pos + 1);
    let mantissa = &bytes[mantissa_start..mantissa_end];
    if !mantissa.iter().any(|b| b.is_ascii_digit()) {
        return false;
    }

    // `x2e-1` is the identifier `x2`, `e`, minus one
    match text[..mantissa_start].chars().next_back() {
        Some(c) => !(c.is_alphanumeric() || c == '_'),
        None => true,
    }
}
