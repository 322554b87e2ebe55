//! Parser for literal values embedded in CSV cells.
//!
//! The semi-structured columns are serialized lists of records, written
//! either in Python literal syntax (`[{'id': 28, 'name': 'Action'}]`) or as
//! JSON (`[{"id": 28, "name": "Action"}]`). This module accepts both and
//! produces a [`serde_json::Value`] tree.
//!
//! Supported grammar:
//! - strings in single or double quotes, with backslash escapes
//! - integers and floats (with optional sign and exponent)
//! - `None`/`null`, `True`/`False`/`true`/`false`
//! - lists `[..]`, tuples `(..)` (both become arrays) and dicts `{..}`
//!
//! Dict keys that are not strings are stringified, since JSON objects only
//! have string keys. Containers nested deeper than [`MAX_DEPTH`] are rejected.

use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Deepest container nesting accepted, matching serde_json's recursion limit
pub const MAX_DEPTH: usize = 128;

/// Why a literal could not be parsed
#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid literal at byte {offset}: {reason}")]
pub struct LiteralError {
    pub offset: usize,
    pub reason: String,
}

/// Parse a complete literal. Trailing non-whitespace input is an error.
pub fn parse_literal(input: &str) -> Result<Value, LiteralError> {
    let mut parser = LiteralParser {
        src: input,
        pos: 0,
        depth: 0,
    };
    let value = parser.parse_value()?;
    parser.skip_whitespace();
    if parser.pos != input.len() {
        return Err(parser.error("trailing characters after literal"));
    }
    Ok(value)
}

struct LiteralParser<'a> {
    src: &'a str,
    pos: usize,
    /// Containers currently open
    depth: usize,
}

impl<'a> LiteralParser<'a> {
    fn error(&self, reason: impl Into<String>) -> LiteralError {
        LiteralError {
            offset: self.pos,
            reason: reason.into(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
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

    fn expect(&mut self, expected: char) -> Result<(), LiteralError> {
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(self.error(format!("expected '{}', found '{}'", expected, c))),
            None => Err(self.error(format!("expected '{}', found end of input", expected))),
        }
    }

    fn parse_value(&mut self) -> Result<Value, LiteralError> {
        self.skip_whitespace();
        match self.peek() {
            Some('[') => self.nested(|p| p.parse_sequence('[', ']')),
            Some('(') => self.nested(|p| p.parse_sequence('(', ')')),
            Some('{') => self.nested(Self::parse_dict),
            Some(q @ ('\'' | '"')) => self.parse_string(q).map(Value::String),
            Some(c) if c == '-' || c == '+' || c == '.' || c.is_ascii_digit() => self.parse_number(),
            Some(c) if c.is_alphabetic() => self.parse_keyword(),
            Some(c) => Err(self.error(format!("unexpected character '{}'", c))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    /// Run a container parser one level deeper, failing past `MAX_DEPTH`
    fn nested<F>(&mut self, parse: F) -> Result<Value, LiteralError>
    where
        F: FnOnce(&mut Self) -> Result<Value, LiteralError>,
    {
        if self.depth >= MAX_DEPTH {
            return Err(self.error("nesting too deep"));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Lists and tuples. A trailing comma is allowed, as in Python.
    fn parse_sequence(&mut self, open: char, close: char) -> Result<Value, LiteralError> {
        self.expect(open)?;
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some(close) {
                self.bump();
                return Ok(Value::Array(items));
            }
            items.push(self.parse_value()?);
            self.skip_whitespace();
            match self.bump() {
                Some(',') => continue,
                Some(c) if c == close => return Ok(Value::Array(items)),
                Some(c) => return Err(self.error(format!("expected ',' or '{}', found '{}'", close, c))),
                None => return Err(self.error("unterminated sequence")),
            }
        }
    }

    fn parse_dict(&mut self) -> Result<Value, LiteralError> {
        self.expect('{')?;
        let mut map = Map::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some('}') {
                self.bump();
                return Ok(Value::Object(map));
            }
            let key = match self.parse_value()? {
                Value::String(s) => s,
                Value::Array(_) | Value::Object(_) => {
                    return Err(self.error("unhashable dict key"));
                }
                other => other.to_string(),
            };
            self.skip_whitespace();
            self.expect(':')?;
            let value = self.parse_value()?;
            map.insert(key, value);
            self.skip_whitespace();
            match self.bump() {
                Some(',') => continue,
                Some('}') => return Ok(Value::Object(map)),
                Some(c) => return Err(self.error(format!("expected ',' or '}}', found '{}'", c))),
                None => return Err(self.error("unterminated dict")),
            }
        }
    }

    fn parse_string(&mut self, quote: char) -> Result<String, LiteralError> {
        self.expect(quote)?;
        let mut out = String::new();
        loop {
            match self.bump() {
                Some(c) if c == quote => return Ok(out),
                Some('\\') => self.parse_escape(&mut out)?,
                Some(c) => out.push(c),
                None => return Err(self.error("unterminated string")),
            }
        }
    }

    fn parse_escape(&mut self, out: &mut String) -> Result<(), LiteralError> {
        let c = self.bump().ok_or_else(|| self.error("dangling escape"))?;
        match c {
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            '/' => out.push('/'),
            '\n' => {} // line continuation
            'x' => out.push(self.parse_hex_escape(2)?),
            'u' => out.push(self.parse_hex_escape(4)?),
            'U' => out.push(self.parse_hex_escape(8)?),
            other => {
                // Unknown escapes are kept verbatim
                out.push('\\');
                out.push(other);
            }
        }
        Ok(())
    }

    fn parse_hex_escape(&mut self, digits: usize) -> Result<char, LiteralError> {
        let end = self.pos + digits;
        let hex = self
            .src
            .get(self.pos..end)
            .ok_or_else(|| self.error("truncated escape"))?;
        let code = u32::from_str_radix(hex, 16).map_err(|_| self.error("invalid hex escape"))?;
        self.pos = end;
        char::from_u32(code).ok_or_else(|| self.error("escape is not a valid code point"))
    }

    fn parse_number(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        if matches!(self.peek(), Some('-' | '+')) {
            self.bump();
        }
        let mut is_float = false;
        while let Some(c) = self.peek() {
            match c {
                '0'..='9' | '_' => {}
                '.' => is_float = true,
                'e' | 'E' => {
                    is_float = true;
                    self.bump();
                    if matches!(self.peek(), Some('-' | '+')) {
                        self.bump();
                    }
                    continue;
                }
                _ => break,
            }
            self.bump();
        }
        let text: String = self.src[start..self.pos].chars().filter(|&c| c != '_').collect();

        if !is_float {
            if let Ok(n) = text.parse::<i64>() {
                return Ok(Value::Number(n.into()));
            }
            if let Ok(n) = text.parse::<u64>() {
                return Ok(Value::Number(n.into()));
            }
            // Wider integers keep their exact digits
            let digits = text.strip_prefix('+').unwrap_or(&text);
            if let Ok(n) = serde_json::from_str::<Number>(digits) {
                return Ok(Value::Number(n));
            }
        }
        let f = text
            .parse::<f64>()
            .map_err(|_| self.error(format!("invalid number '{}'", text)))?;
        Number::from_f64(f)
            .map(Value::Number)
            .ok_or_else(|| self.error(format!("non-finite number '{}'", text)))
    }

    fn parse_keyword(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !(c.is_alphanumeric() || c == '_') {
                break;
            }
            self.bump();
        }
        match &self.src[start..self.pos] {
            "None" | "null" => Ok(Value::Null),
            "True" | "true" => Ok(Value::Bool(true)),
            "False" | "false" => Ok(Value::Bool(false)),
            word => {
                self.pos = start;
                Err(self.error(format!("unknown name '{}'", word)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_python_list_of_dicts() {
        let value = parse_literal("[{'id': 28, 'name': 'Action'}, {'id': 12, 'name': 'Adventure'}]").unwrap();
        assert_eq!(
            value,
            json!([{"id": 28, "name": "Action"}, {"id": 12, "name": "Adventure"}])
        );
    }

    #[test]
    fn test_json_syntax() {
        let value = parse_literal(r#"[{"id": 1, "name": "Sam Worthington", "order": 0}]"#).unwrap();
        assert_eq!(value[0]["name"], "Sam Worthington");
        assert_eq!(value[0]["order"], 0);
    }

    #[test]
    fn test_keywords_and_numbers() {
        let value = parse_literal("(None, True, false, -3, 2.5, 1e3)").unwrap();
        assert_eq!(value, json!([null, true, false, -3, 2.5, 1000.0]));
    }

    #[test]
    fn test_wide_integers_keep_their_digits() {
        let value = parse_literal("[12345678901234567890123, -98765432109876543210, +18446744073709551616]").unwrap();
        let rendered: Vec<String> = value.as_array().unwrap().iter().map(|v| v.to_string()).collect();
        assert_eq!(
            rendered,
            vec!["12345678901234567890123", "-98765432109876543210", "18446744073709551616"]
        );
    }

    #[test]
    fn test_escapes_and_mixed_quotes() {
        let value = parse_literal(r#"['It\'s', "say \"hi\"", 'caf\xe9', "d'Artagnan"]"#).unwrap();
        assert_eq!(value, json!(["It's", "say \"hi\"", "café", "d'Artagnan"]));
    }

    #[test]
    fn test_trailing_comma_and_empty_containers() {
        assert_eq!(parse_literal("[1, 2,]").unwrap(), json!([1, 2]));
        assert_eq!(parse_literal("  []  ").unwrap(), json!([]));
        assert_eq!(parse_literal("{}").unwrap(), json!({}));
    }

    #[test]
    fn test_non_string_keys_are_stringified() {
        assert_eq!(parse_literal("{1: 'a'}").unwrap(), json!({"1": "a"}));
    }

    #[test]
    fn test_malformed_inputs() {
        for input in ["", "[", "[{'name': 'x'}", "['a' 'b']", "[1] extra", "{'a' 1}", "nan", "'open"] {
            assert!(parse_literal(input).is_err(), "expected error for {:?}", input);
        }
    }

    #[test]
    fn test_nesting_limit() {
        let ok = format!("{}{}", "[".repeat(MAX_DEPTH), "]".repeat(MAX_DEPTH));
        assert!(parse_literal(&ok).is_ok());

        let too_deep = format!("{}{}", "[".repeat(MAX_DEPTH + 1), "]".repeat(MAX_DEPTH + 1));
        let err = parse_literal(&too_deep).unwrap_err();
        assert_eq!(err.offset, MAX_DEPTH);

        assert!(parse_literal(&"{'a': ".repeat(10_000)).is_err());
        assert!(parse_literal(&"(".repeat(100_000)).is_err());
    }

    #[test]
    fn test_error_reports_offset() {
        let err = parse_literal("[1, ?]").unwrap_err();
        assert_eq!(err.offset, 4);
    }
}
