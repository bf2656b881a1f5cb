//! Recursive-descent parser for flat map literals.
//!
//! Accepts the dictionary subset of Python literal syntax that plugin
//! configurations use for `other_config`, e.g. `{'mqtt_topic': 'x', 'qos': 1}`.
//! Only string keys and scalar values are allowed; anything else is rejected
//! with the offset where parsing stopped.

use std::fmt;

/// A scalar value inside a map literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Str(s) => f.write_str(s),
            Scalar::Int(i) => write!(f, "{i}"),
            Scalar::Float(v) => f.write_str(&float_repr(*v)),
            Scalar::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Shortest round-trip text for a float, fixed notation for exponents in
/// `-4..16` and `1e+20` style otherwise.
pub fn float_repr(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let sign = if v.is_sign_negative() { "-" } else { "" };
    let sci = format!("{:e}", v.abs());
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    if (-4..16).contains(&exp) {
        let body = if exp >= 0 {
            let point = exp as usize + 1;
            if digits.len() <= point {
                format!("{digits}{}.0", "0".repeat(point - digits.len()))
            } else {
                format!("{}.{}", &digits[..point], &digits[point..])
            }
        } else {
            format!("0.{}{digits}", "0".repeat((-exp - 1) as usize))
        };
        format!("{sign}{body}")
    } else {
        let mantissa = if digits.len() > 1 {
            format!("{}.{}", &digits[..1], &digits[1..])
        } else {
            digits
        };
        let exp_sign = if exp < 0 { '-' } else { '+' };
        format!("{sign}{mantissa}e{exp_sign}{:02}", exp.abs())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason} at offset {offset}")]
pub struct LiteralError {
    pub offset: usize,
    pub reason: String,
}

/// Parse `src` as a flat map literal, keeping entries in source order.
///
/// A repeated key keeps its first position and takes the last value.
pub fn parse_map(src: &str) -> Result<Vec<(String, Scalar)>, LiteralError> {
    let mut parser = Parser { src, pos: 0 };
    parser.skip_ws();
    if parser.peek() != Some('{') {
        return Err(parser.error(format!(
            "expected a map literal, found {}",
            parser.describe_next()
        )));
    }
    let entries = parser.map()?;
    parser.skip_ws();
    if parser.pos < src.len() {
        return Err(parser.error("unexpected trailing input"));
    }
    Ok(entries)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    fn error(&self, reason: impl Into<String>) -> LiteralError {
        LiteralError {
            offset: self.pos,
            reason: reason.into(),
        }
    }

    fn describe_next(&self) -> String {
        match self.peek() {
            Some(c) => format!("'{c}'"),
            None => "end of input".to_string(),
        }
    }

    fn map(&mut self) -> Result<Vec<(String, Scalar)>, LiteralError> {
        self.eat('{');
        let mut entries: Vec<(String, Scalar)> = Vec::new();

        loop {
            self.skip_ws();
            if self.eat('}') {
                return Ok(entries);
            }

            let key = match self.peek() {
                Some('\'') | Some('"') => self.string()?,
                _ => {
                    return Err(self.error(format!(
                        "expected a string key, found {}",
                        self.describe_next()
                    )));
                }
            };

            self.skip_ws();
            if !self.eat(':') {
                return Err(self.error(format!(
                    "expected ':' after key '{key}', found {}",
                    self.describe_next()
                )));
            }
            self.skip_ws();
            let value = self.scalar()?;

            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = value,
                None => entries.push((key, value)),
            }

            self.skip_ws();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some('}') => {}
                _ => {
                    return Err(self.error(format!(
                        "expected ',' or '}}', found {}",
                        self.describe_next()
                    )));
                }
            }
        }
    }

    fn scalar(&mut self) -> Result<Scalar, LiteralError> {
        match self.peek() {
            Some('\'') | Some('"') => self.string().map(Scalar::Str),
            Some('{') | Some('[') | Some('(') => {
                Err(self.error("nested values are not allowed in a flat map"))
            }
            Some(c) if c.is_ascii_digit() || c == '-' || c == '+' || c == '.' => self.number(),
            Some(c) if c.is_alphabetic() => {
                let start = self.pos;
                while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
                    self.bump();
                }
                match &self.src[start..self.pos] {
                    "True" | "true" => Ok(Scalar::Bool(true)),
                    "False" | "false" => Ok(Scalar::Bool(false)),
                    "None" => Err(LiteralError {
                        offset: start,
                        reason: "None is not a supported value".to_string(),
                    }),
                    word => Err(LiteralError {
                        offset: start,
                        reason: format!("unknown name '{word}'"),
                    }),
                }
            }
            _ => Err(self.error(format!(
                "expected a value, found {}",
                self.describe_next()
            ))),
        }
    }

    fn string(&mut self) -> Result<String, LiteralError> {
        let start = self.pos;
        let Some(quote) = self.bump() else {
            return Err(self.error("expected a string"));
        };
        let mut out = String::new();

        loop {
            match self.bump() {
                None => {
                    return Err(LiteralError {
                        offset: start,
                        reason: "unterminated string".to_string(),
                    });
                }
                Some(c) if c == quote => return Ok(out),
                Some('\\') => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('r') => out.push('\r'),
                    Some('a') => out.push('\u{07}'),
                    Some('b') => out.push('\u{08}'),
                    Some('f') => out.push('\u{0c}'),
                    Some('v') => out.push('\u{0b}'),
                    Some(c @ ('\\' | '\'' | '"')) => out.push(c),
                    Some('\n') => {}
                    Some(c @ '0'..='7') => {
                        let mut code = c.to_digit(8).unwrap_or(0);
                        for _ in 0..2 {
                            match self.peek().and_then(|d| d.to_digit(8)) {
                                Some(d) => {
                                    code = code * 8 + d;
                                    self.bump();
                                }
                                None => break,
                            }
                        }
                        out.push(self.code_point(code, start)?);
                    }
                    Some('x') => out.push(self.hex_escape(2, start)?),
                    Some('u') => out.push(self.hex_escape(4, start)?),
                    Some('U') => out.push(self.hex_escape(8, start)?),
                    Some(c) => {
                        out.push('\\');
                        out.push(c);
                    }
                    None => {
                        return Err(LiteralError {
                            offset: start,
                            reason: "unterminated string".to_string(),
                        });
                    }
                },
                Some(c) => out.push(c),
            }
        }
    }

    /// Read exactly `width` hex digits after `\x`, `\u` or `\U`.
    fn hex_escape(&mut self, width: usize, start: usize) -> Result<char, LiteralError> {
        let mut code = 0u32;
        for _ in 0..width {
            let Some(d) = self.peek().and_then(|c| c.to_digit(16)) else {
                return Err(self.error(format!("truncated \\x/\\u escape, need {width} hex digits")));
            };
            code = code * 16 + d;
            self.bump();
        }
        self.code_point(code, start)
    }

    fn code_point(&self, code: u32, start: usize) -> Result<char, LiteralError> {
        char::from_u32(code).ok_or_else(|| LiteralError {
            offset: start,
            reason: format!("invalid code point {code:#x} in string"),
        })
    }

    fn number(&mut self) -> Result<Scalar, LiteralError> {
        let start = self.pos;
        if matches!(self.peek(), Some('-') | Some('+')) {
            self.bump();
        }
        let mut is_float = false;
        while let Some(c) = self.peek() {
            match c {
                '0'..='9' | '_' => {}
                '.' | 'e' | 'E' => is_float = true,
                '-' | '+' if matches!(self.src[..self.pos].chars().last(), Some('e' | 'E')) => {}
                _ => break,
            }
            self.bump();
        }

        let raw = &self.src[start..self.pos];
        let bytes = raw.as_bytes();
        let misplaced_underscore = bytes.iter().enumerate().any(|(i, b)| {
            *b == b'_'
                && !(i > 0
                    && bytes[i - 1].is_ascii_digit()
                    && bytes.get(i + 1).is_some_and(u8::is_ascii_digit))
        });
        if misplaced_underscore {
            return Err(LiteralError {
                offset: start,
                reason: format!("invalid number '{raw}'"),
            });
        }

        let text: String = raw
            .chars()
            .filter(|c| *c != '_')
            .collect();
        let parsed = if is_float {
            text.parse::<f64>().ok().map(Scalar::Float)
        } else {
            text.parse::<i64>().ok().map(Scalar::Int)
        };

        parsed.ok_or_else(|| LiteralError {
            offset: start,
            reason: format!("invalid number '{}'", &self.src[start..self.pos]),
        })
    }
}
