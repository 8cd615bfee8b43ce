use crate::error::ScriptError;
use crate::range::Range;

/// Render a number the way the host language's `String(n)` does.
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    // ToString(-0) is "0"
    if n == 0.0 {
        return "0".to_string();
    }
    if n.is_infinite() {
        return if n < 0.0 { "-Infinity".to_string() } else { "Infinity".to_string() };
    }

    let sign = if n < 0.0 { "-" } else { "" };
    // `{:e}` yields the shortest round-tripping digits, e.g. "1.2345e3"
    let formatted = format!("{:e}", n.abs());
    let Some((mantissa, exponent)) = formatted.split_once('e') else {
        return format!("{n}");
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return format!("{n}");
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    let point = exponent + 1;

    let body = if k <= point && point <= 21 {
        format!("{digits}{}", "0".repeat((point - k) as usize))
    } else if 0 < point && point <= 21 {
        let (int_part, frac_part) = digits.split_at(point as usize);
        format!("{int_part}.{frac_part}")
    } else if -6 < point && point <= 0 {
        format!("0.{}{digits}", "0".repeat((-point) as usize))
    } else {
        let e = point - 1;
        let e_sign = if e < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{first}e{e_sign}{}", e.abs())
        } else {
            format!("{first}.{rest}e{e_sign}{}", e.abs())
        }
    };
    format!("{sign}{body}")
}

/// `Number.prototype.toString(radix)`; `radix` must already be validated to 2..=36.
///
/// Fraction digits are emitted only while they still distinguish `n` from its
/// neighbouring doubles, so the output is the shortest that reads back as `n`.
pub fn number_to_string_radix(n: f64, radix: u32) -> String {
    if radix == 10 || !n.is_finite() {
        return number_to_string(n);
    }
    let value = n.abs();
    let base = radix as f64;
    let mut integer = value.floor();
    let mut fraction = value - integer;

    // half the gap to the next double, never below the smallest subnormal
    let mut delta = (0.5 * (next_double(value) - value)).max(f64::from_bits(1));
    let mut fraction_digits: Vec<u32> = Vec::new();
    if fraction >= delta {
        loop {
            fraction *= base;
            delta *= base;
            let digit = fraction as u32;
            fraction_digits.push(digit);
            fraction -= digit as f64;
            let rounds_up = fraction > 0.5 || (fraction == 0.5 && digit % 2 == 1);
            if rounds_up && fraction + delta > 1.0 {
                loop {
                    match fraction_digits.pop() {
                        None => {
                            integer += 1.0;
                            break;
                        }
                        Some(d) if d + 1 < radix => {
                            fraction_digits.push(d + 1);
                            break;
                        }
                        Some(_) => {}
                    }
                }
                break;
            }
            if fraction < delta {
                break;
            }
        }
    }

    // digits beyond 2^53 are not representable and render as zeros
    let mut int_digits = Vec::new();
    while integer / base >= MAX_EXACT_INTEGER {
        integer /= base;
        int_digits.push('0');
    }
    loop {
        let remainder = integer % base;
        int_digits.push(std::char::from_digit(remainder as u32, radix).unwrap_or('0'));
        integer = (integer - remainder) / base;
        if integer <= 0.0 {
            break;
        }
    }

    let mut result = String::new();
    if n < 0.0 {
        result.push('-');
    }
    result.extend(int_digits.into_iter().rev());
    if !fraction_digits.is_empty() {
        result.push('.');
        result.extend(
            fraction_digits
                .into_iter()
                .map(|d| std::char::from_digit(d, radix).unwrap_or('0')),
        );
    }
    result
}

const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

fn next_double(value: f64) -> f64 {
    f64::from_bits(value.to_bits() + 1)
}

/// `Number.prototype.toFixed(digits)`.
pub fn number_to_fixed(n: f64, digits: f64, range: Option<Range>) -> Result<String, ScriptError> {
    let digits = if digits.is_nan() { 0.0 } else { digits.trunc() };
    if !(0.0..=100.0).contains(&digits) {
        return Err(ScriptError::range_error("toFixed() digits argument must be between 0 and 100", range));
    }
    let digits = digits as usize;
    if !n.is_finite() || n.abs() >= 1e21 {
        return Ok(number_to_string(n));
    }
    // -0 fails this test and renders unsigned
    if n < 0.0 {
        let positive = number_to_fixed(-n, digits as f64, range)?;
        return Ok(format!("-{positive}"));
    }

    let n = n.abs();
    // the host rounds exact ties away from zero, `format!` rounds them to even
    if let Some(rounded) = round_exact_tie(n, digits) {
        return Ok(rounded);
    }
    Ok(format!("{:.*}", digits, n))
}

// Every finite double has at most this many fractional decimal digits.
const EXACT_FRACTION_DIGITS: usize = 1074;

/// `Some` only when the exact decimal value of `n` lies halfway between two
/// candidates at `digits` fraction digits; the tie is rounded up.
fn round_exact_tie(n: f64, digits: usize) -> Option<String> {
    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, n);
    let (int_part, frac_part) = exact.split_once('.')?;
    let (kept, rest) = frac_part.split_at(digits);
    let mut rest = rest.bytes();
    if rest.next() != Some(b'5') || !rest.all(|b| b == b'0') {
        return None;
    }
    let incremented = increment_decimal(&format!("{int_part}{kept}"));
    Some(insert_decimal_point(&incremented, digits))
}

fn increment_decimal(digits: &str) -> String {
    let mut bytes = digits.as_bytes().to_vec();
    for b in bytes.iter_mut().rev() {
        if *b == b'9' {
            *b = b'0';
        } else {
            *b += 1;
            return bytes.into_iter().map(char::from).collect();
        }
    }
    std::iter::once('1').chain(bytes.into_iter().map(char::from)).collect()
}

fn insert_decimal_point(integer_digits: &str, digits: usize) -> String {
    if digits == 0 {
        return integer_digits.to_string();
    }
    let padded = format!("{integer_digits:0>width$}", width = digits + 1);
    let (int_part, frac_part) = padded.split_at(padded.len() - digits);
    format!("{int_part}.{frac_part}")
}

fn is_js_whitespace(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

/// The host language's `Number(string)` conversion.
pub fn string_to_number(s: &str) -> f64 {
    let trimmed = s.trim_matches(is_js_whitespace);
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let prefixed = [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)]
        .iter()
        .find_map(|(prefix, radix)| trimmed.strip_prefix(prefix).map(|rest| (rest, *radix)));
    if let Some((digits, radix)) = prefixed {
        return parse_integer_digits(digits, radix);
    }

    // Rust's parser also accepts "inf", "nan" and friends, which the host rejects
    let allowed = trimmed
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !allowed {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_integer_digits(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    let mut value = 0.0;
    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(d) => value = value * radix as f64 + d as f64,
            None => return f64::NAN,
        }
    }
    value
}
