use crate::error::{ParseError, ParseErrorKind};
use crate::value::{Compound, Number, TypedArray, Value};

/// Nesting depth allowed by `ParseOptions::default()`.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Limits applied while parsing untrusted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum nesting of compounds and lists.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Parse a complete document with default options.
pub fn parse(input: &str) -> Result<Value, ParseError> {
    parse_with(input, &ParseOptions::default())
}

/// Parse a complete document. The whole input must be one value, optionally
/// surrounded by whitespace.
pub fn parse_with(input: &str, options: &ParseOptions) -> Result<Value, ParseError> {
    let mut parser = Parser {
        input,
        pos: 0,
        depth: 0,
        max_depth: options.max_depth,
    };
    let value = parser.parse_value()?;
    parser.skip_whitespace();
    match parser.peek() {
        None => Ok(value),
        Some(found) => Err(parser.error(ParseErrorKind::ExpectedToken {
            expected: "end of input",
            found,
        })),
    }
}

fn is_unquoted_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '.' | '+' | '-' | ':')
}

/// Keys stop at ':' since it separates key from value.
fn is_key_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '.' | '+' | '-')
}

/// Literals too large for f64 are rejected rather than read as infinity.
fn parse_double(literal: &str) -> Option<f64> {
    literal.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn is_suffix(c: char) -> bool {
    matches!(c, 'b' | 's' | 'l' | 'f' | 'd' | 'B' | 'S' | 'L' | 'F' | 'D')
}

/// Recursive-descent parser over a byte cursor into `input`.
/// `pos` always sits on a char boundary.
struct Parser<'a> {
    input: &'a str,
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        self.error_at(kind, self.pos)
    }

    fn error_at(&self, kind: ParseErrorKind, offset: usize) -> ParseError {
        ParseError::new(kind, self.input, offset)
    }

    fn expect(&mut self, expected: char, what: &'static str) -> Result<(), ParseError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.pos += c.len_utf8();
                Ok(())
            }
            Some(found) => Err(self.error(ParseErrorKind::ExpectedToken {
                expected: what,
                found,
            })),
            None => Err(self.error(ParseErrorKind::UnexpectedEnd(what))),
        }
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth >= self.max_depth {
            return Err(self.error(ParseErrorKind::DepthLimitExceeded(self.max_depth)));
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// After an element: consume `,` or the closing delimiter.
    /// Returns true once the sequence is closed. A trailing comma before the
    /// closing delimiter is accepted.
    fn sequence_step(&mut self, close: char, what: &'static str) -> Result<bool, ParseError> {
        self.skip_whitespace();
        match self.peek() {
            Some(c) if c == close => {
                self.bump();
                Ok(true)
            }
            Some(',') => {
                self.bump();
                self.skip_whitespace();
                if self.peek() == Some(close) {
                    self.bump();
                    return Ok(true);
                }
                Ok(false)
            }
            Some(found) => Err(self.error(ParseErrorKind::ExpectedToken {
                expected: what,
                found,
            })),
            None => Err(self.error(ParseErrorKind::UnexpectedEnd(what))),
        }
    }

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(self.error(ParseErrorKind::UnexpectedEnd("a value"))),
            Some('{') => self.parse_compound().map(Value::Compound),
            Some('[') => self.parse_list(),
            Some('"') => self.parse_quoted().map(Value::QuotedString),
            Some(c) if c.is_ascii_digit() || c == '-' => self.parse_number().map(Value::Number),
            Some(c) if c.is_alphabetic() || c == '_' => {
                Ok(Value::UnquotedString(self.take_while(is_unquoted_char).to_owned()))
            }
            Some(c) => Err(self.error(ParseErrorKind::UnexpectedCharacter(c))),
        }
    }

    fn take_while(&mut self, accept: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !accept(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        let input = self.input;
        &input[start..self.pos]
    }

    fn parse_compound(&mut self) -> Result<Compound, ParseError> {
        self.expect('{', "'{'")?;
        self.enter()?;
        let mut compound = Compound::new();

        self.skip_whitespace();
        if self.peek() == Some('}') {
            self.bump();
            self.leave();
            return Ok(compound);
        }

        loop {
            self.skip_whitespace();
            let key = self.parse_key()?;
            self.skip_whitespace();
            self.expect(':', "':'")?;
            let value = self.parse_value()?;
            compound.insert(key, value);
            if self.sequence_step('}', "',' or '}'")? {
                break;
            }
        }

        self.leave();
        Ok(compound)
    }

    fn parse_key(&mut self) -> Result<String, ParseError> {
        if self.peek() == Some('"') {
            return self.parse_quoted();
        }
        let key = self.take_while(is_key_char);
        if !key.is_empty() {
            return Ok(key.to_owned());
        }
        match self.peek() {
            Some(c) => Err(self.error(ParseErrorKind::UnexpectedCharacter(c))),
            None => Err(self.error(ParseErrorKind::UnexpectedEnd("a key"))),
        }
    }

    /// `B;`, `S;`, `I;` or `L;` at the cursor.
    fn typed_array_prefix(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        match (chars.next(), chars.next()) {
            (Some(kind @ ('B' | 'S' | 'I' | 'L')), Some(';')) => Some(kind),
            _ => None,
        }
    }

    fn parse_list(&mut self) -> Result<Value, ParseError> {
        self.expect('[', "'['")?;
        self.enter()?;
        self.skip_whitespace();

        if let Some(kind) = self.typed_array_prefix() {
            self.pos += 2;
            let array = self.parse_typed_array(kind)?;
            self.leave();
            return Ok(Value::Array(array));
        }

        let mut items = Vec::new();
        if self.peek() == Some(']') {
            self.bump();
            self.leave();
            return Ok(Value::List(items));
        }

        loop {
            items.push(self.parse_value()?);
            if self.sequence_step(']', "',' or ']'")? {
                break;
            }
        }

        self.leave();
        Ok(Value::List(items))
    }

    /// Elements are coerced to the prefix width; their own suffixes only
    /// matter for range checking the literal.
    fn parse_typed_array(&mut self, kind: char) -> Result<TypedArray, ParseError> {
        let mut values = Vec::new();

        self.skip_whitespace();
        if self.peek() == Some(']') {
            self.bump();
        } else {
            loop {
                self.skip_whitespace();
                match self.peek() {
                    Some(c) if c.is_ascii_digit() || c == '-' => {
                        values.push(self.parse_number()?.to_i64_lossy());
                    }
                    Some(found) => {
                        return Err(self.error(ParseErrorKind::ExpectedToken {
                            expected: "a number",
                            found,
                        }))
                    }
                    None => return Err(self.error(ParseErrorKind::UnexpectedEnd("a number"))),
                }
                if self.sequence_step(']', "',' or ']'")? {
                    break;
                }
            }
        }

        Ok(match kind {
            'B' => TypedArray::Byte(values.into_iter().map(|v| v as i8).collect()),
            'S' => TypedArray::Short(values.into_iter().map(|v| v as i16).collect()),
            'L' => TypedArray::Long(values),
            _ => TypedArray::Int(values.into_iter().map(|v| v as i32).collect()),
        })
    }

    fn parse_quoted(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        self.expect('"', "'\"'")?;
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error_at(ParseErrorKind::UnterminatedString, start)),
                Some('"') => return Ok(out),
                Some('\\') => match self.bump() {
                    None => {
                        return Err(self.error_at(ParseErrorKind::UnterminatedString, start))
                    }
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('r') => out.push('\r'),
                    // '\\', '"' and anything else: keep the character
                    Some(other) => out.push(other),
                },
                Some(c) => out.push(c),
            }
        }
    }

    /// Digits with at most one '.', then an optional width suffix.
    fn parse_number(&mut self) -> Result<Number, ParseError> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.bump();
        }
        let mut seen_dot = false;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.bump();
            } else if c == '.' && !seen_dot {
                seen_dot = true;
                self.bump();
            } else {
                break;
            }
        }
        let input = self.input;
        let literal = &input[start..self.pos];

        let suffix = match self.peek() {
            Some(c) if is_suffix(c) => {
                self.bump();
                Some(c.to_ascii_lowercase())
            }
            _ => None,
        };

        let number = match suffix {
            Some('b') => literal.parse().ok().map(Number::Byte),
            Some('s') => literal.parse().ok().map(Number::Short),
            Some('l') => literal.parse().ok().map(Number::Long),
            Some('f') => literal
                .parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Number::Float),
            Some('d') => parse_double(literal).map(Number::Double),
            _ if seen_dot => parse_double(literal).map(Number::Double),
            _ => literal
                .parse::<i64>()
                .ok()
                .map(|v| i32::try_from(v).map_or(Number::Long(v), Number::Int)),
        };

        number.ok_or_else(|| {
            let text = input[start..self.pos].to_owned();
            self.error_at(ParseErrorKind::NumberFormat(text), start)
        })
    }
}
