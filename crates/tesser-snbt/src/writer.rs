use std::fmt::{self, Write};

use crate::value::{Compound, Number, TypedArray, Value};

/// Whether `s` can be written without quotes and read back as the same
/// unquoted string.
fn is_bare_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | '+' | '-' | ':'))
}

/// Compound keys additionally exclude ':'.
fn is_bare_key(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | '+' | '-'))
}

fn write_quoted(f: &mut impl Write, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

fn write_key(f: &mut impl Write, key: &str) -> fmt::Result {
    if is_bare_key(key) {
        f.write_str(key)
    } else {
        write_quoted(f, key)
    }
}

/// `Display` for floats is positional, never exponent form. Whole values
/// get a ".0" so they read back as floats.
fn write_float(f: &mut impl Write, text: String) -> fmt::Result {
    f.write_str(&text)?;
    if text.bytes().all(|b| b.is_ascii_digit() || b == b'-') {
        f.write_str(".0")?;
    }
    Ok(())
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::Byte(v) => write!(f, "{v}")?,
            Number::Short(v) => write!(f, "{v}")?,
            Number::Int(v) => write!(f, "{v}")?,
            Number::Long(v) => write!(f, "{v}")?,
            Number::Float(v) => write_float(f, v.to_string())?,
            Number::Double(v) => write_float(f, v.to_string())?,
        }
        match self.suffix() {
            Some(suffix) => f.write_char(suffix),
            None => Ok(()),
        }
    }
}

impl fmt::Display for TypedArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{};", self.prefix())?;
        match self {
            TypedArray::Byte(v) => write_joined(f, v.iter().map(|x| Number::Byte(*x))),
            TypedArray::Short(v) => write_joined(f, v.iter().map(|x| Number::Short(*x))),
            TypedArray::Int(v) => write_joined(f, v.iter().map(|x| Number::Int(*x))),
            TypedArray::Long(v) => write_joined(f, v.iter().map(|x| Number::Long(*x))),
        }?;
        f.write_char(']')
    }
}

fn write_joined<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = T>,
) -> fmt::Result {
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_char(',')?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('{')?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_char(',')?;
            }
            write_key(f, key)?;
            write!(f, ":{value}")?;
        }
        f.write_char('}')
    }
}

/// Compact text form that `parse` reads back to an equal value.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Compound(c) => write!(f, "{c}"),
            Value::List(items) => {
                f.write_char('[')?;
                write_joined(f, items.iter())?;
                f.write_char(']')
            }
            Value::Array(a) => write!(f, "{a}"),
            Value::QuotedString(s) => write_quoted(f, s),
            Value::UnquotedString(s) if is_bare_identifier(s) => f.write_str(s),
            Value::UnquotedString(s) => write_quoted(f, s),
            Value::Number(n) => write!(f, "{n}"),
        }
    }
}
