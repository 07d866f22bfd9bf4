//! Literal tokens for scalar values.

use buildgen_syntax::Expr;

/// Exponents at or above this use scientific notation, as `%g` does when
/// formatting with the shortest round-trip precision.
const EXPONENT_THRESHOLD: i32 = 6;

pub(crate) fn bool_literal(v: bool) -> Expr {
    Expr::literal(if v { "True" } else { "False" })
}

pub(crate) fn int_literal(v: i64) -> Expr {
    Expr::literal(v.to_string())
}

pub(crate) fn uint_literal(v: u64) -> Expr {
    Expr::literal(v.to_string())
}

pub(crate) fn float_literal(v: f64) -> Expr {
    Expr::literal(format_float(v))
}

/// Shortest decimal that round-trips to `v`, in `%g` layout.
///
/// `1.0` renders as `1`, `1e6` as `1e+06` and `0.00001` as `1e-05`.
pub fn format_float(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }
    if v == 0.0 {
        return if v.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // `{:e}` yields the shortest round-trip digits, e.g. "-1.2345e3".
    let sci = format!("{:e}", v);
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(m) => ("-", m),
        None => ("", mantissa),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    let body = if exp < -4 || exp >= EXPONENT_THRESHOLD {
        let (first, rest) = digits.split_at(1);
        let exp_sign = if exp < 0 { '-' } else { '+' };
        if rest.is_empty() {
            format!("{}e{}{:02}", first, exp_sign, exp.abs())
        } else {
            format!("{}.{}e{}{:02}", first, rest, exp_sign, exp.abs())
        }
    } else if exp >= 0 {
        let int_len = exp as usize + 1;
        if digits.len() <= int_len {
            format!("{}{}", digits, "0".repeat(int_len - digits.len()))
        } else {
            format!("{}.{}", &digits[..int_len], &digits[int_len..])
        }
    } else {
        format!("0.{}{}", "0".repeat((-exp - 1) as usize), digits)
    };
    format!("{}{}", sign, body)
}
