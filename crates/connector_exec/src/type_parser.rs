//! Parsing of coordinator type signatures into execution types.
//!
//! Accepts signatures like `bigint`, `varchar(10)`, `decimal(12, 2)`,
//! `timestamp with time zone`, `array(integer)`, `map(varchar, double)` and
//! `row(id bigint, "Full Name" varchar)`. Type names are case insensitive.

use connector_error::{ConnectorError, Result};

use crate::datatype::{
    DECIMAL_MAX_PRECISION,
    DataType,
    DecimalTypeMeta,
    Field,
    ListTypeMeta,
    MapTypeMeta,
    StructTypeMeta,
};

/// Precision used for a bare `decimal`.
const DECIMAL_DEFAULT_PRECISION: u8 = DECIMAL_MAX_PRECISION;
/// Scale used for a bare `decimal`.
const DECIMAL_DEFAULT_SCALE: u8 = 0;

/// Parses type signatures.
///
/// Holds no state, a single parser can be shared across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeParser;

impl TypeParser {
    pub const fn new() -> Self {
        TypeParser
    }

    pub fn parse(&self, signature: &str) -> Result<DataType> {
        let mut parser = SignatureParser {
            input: signature,
            pos: 0,
        };

        let datatype = parser.parse_type()?;
        parser.skip_whitespace();
        if !parser.is_eof() {
            return Err(parser.error(format!(
                "unexpected trailing input '{}'",
                parser.remaining()
            )));
        }

        Ok(datatype)
    }
}

#[derive(Debug)]
struct SignatureParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> SignatureParser<'a> {
    fn error(&self, reason: impl Into<String>) -> ConnectorError {
        ConnectorError::type_parse(
            self.input,
            format!("{} (at position {})", reason.into(), self.pos),
        )
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn skip_whitespace(&mut self) {
        let rest = self.remaining();
        self.pos += rest.len() - rest.trim_start().len();
    }

    /// Consume `c` (after any whitespace) if it's next.
    fn consume_char(&mut self, c: char) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect_char(&mut self, c: char) -> Result<()> {
        if self.consume_char(c) {
            return Ok(());
        }
        match self.peek() {
            Some(found) => Err(self.error(format!("expected '{c}', found '{found}'"))),
            None => Err(self.error(format!("expected '{c}', found end of input"))),
        }
    }

    /// Read an unquoted identifier: letters, digits and underscores.
    fn identifier(&mut self) -> Option<&'a str> {
        self.skip_whitespace();
        let rest = self.remaining();
        let len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        if len == 0 {
            return None;
        }
        self.pos += len;
        Some(&rest[..len])
    }

    /// Read a double quoted identifier. Embedded quotes are escaped by
    /// doubling them.
    fn quoted_identifier(&mut self) -> Result<String> {
        self.expect_char('"')?;
        let mut name = String::new();
        loop {
            let Some(c) = self.peek() else {
                return Err(self.error("unterminated quoted identifier"));
            };
            self.pos += c.len_utf8();
            if c == '"' {
                if self.peek() == Some('"') {
                    self.pos += 1;
                    name.push('"');
                    continue;
                }
                return Ok(name);
            }
            name.push(c);
        }
    }

    /// Consume a sequence of keywords, e.g. `with time zone`. Nothing is
    /// consumed if the full sequence doesn't match.
    fn consume_keywords(&mut self, keywords: &[&str]) -> bool {
        let start = self.pos;
        for keyword in keywords {
            match self.identifier() {
                Some(ident) if ident.eq_ignore_ascii_case(keyword) => (),
                _ => {
                    self.pos = start;
                    return false;
                }
            }
        }
        true
    }

    fn number(&mut self) -> Result<u32> {
        let ident = self
            .identifier()
            .ok_or_else(|| self.error("expected a number"))?;
        ident
            .parse()
            .map_err(|_| self.error(format!("expected a number, found '{ident}'")))
    }

    fn parse_type(&mut self) -> Result<DataType> {
        let name = self
            .identifier()
            .ok_or_else(|| self.error("expected a type name"))?;

        Ok(match name.to_ascii_lowercase().as_str() {
            "boolean" => DataType::Boolean,
            "tinyint" => DataType::Int8,
            "smallint" => DataType::Int16,
            "integer" | "int" => DataType::Int32,
            "bigint" => DataType::Int64,
            "real" => DataType::Float32,
            "double" => DataType::Float64,
            "varbinary" => DataType::Binary,
            "date" => DataType::Date,
            "unknown" => DataType::Unknown,
            "varchar" | "char" => {
                if self.consume_char('(') {
                    let _length = self.number()?;
                    self.expect_char(')')?;
                }
                DataType::Utf8
            }
            "timestamp" => {
                if self.consume_keywords(&["with", "time", "zone"]) {
                    DataType::TimestampTz
                } else {
                    DataType::Timestamp
                }
            }
            "decimal" => DataType::Decimal(self.parse_decimal_meta()?),
            "array" => {
                self.expect_char('(')?;
                let element = self.parse_type()?;
                self.expect_char(')')?;
                DataType::List(ListTypeMeta::new(element))
            }
            "map" => {
                self.expect_char('(')?;
                let key = self.parse_type()?;
                self.expect_char(',')?;
                let value = self.parse_type()?;
                self.expect_char(')')?;
                DataType::Map(MapTypeMeta::new(key, value))
            }
            "row" => DataType::Struct(self.parse_row_fields()?),
            other => return Err(self.error(format!("unknown type '{other}'"))),
        })
    }

    fn parse_decimal_meta(&mut self) -> Result<DecimalTypeMeta> {
        if !self.consume_char('(') {
            return Ok(DecimalTypeMeta::new(
                DECIMAL_DEFAULT_PRECISION,
                DECIMAL_DEFAULT_SCALE,
            ));
        }

        let precision = self.number()?;
        let scale = if self.consume_char(',') {
            self.number()?
        } else {
            0
        };
        self.expect_char(')')?;

        if precision == 0 || precision > DECIMAL_MAX_PRECISION as u32 {
            return Err(self.error(format!(
                "decimal precision must be between 1 and {DECIMAL_MAX_PRECISION}, got {precision}"
            )));
        }
        if scale > precision {
            return Err(self.error(format!(
                "decimal scale {scale} exceeds precision {precision}"
            )));
        }

        Ok(DecimalTypeMeta::new(precision as u8, scale as u8))
    }

    fn parse_row_fields(&mut self) -> Result<StructTypeMeta> {
        self.expect_char('(')?;
        let mut fields = Vec::new();
        loop {
            fields.push(self.parse_row_field()?);
            if self.consume_char(')') {
                break;
            }
            self.expect_char(',')?;
        }

        Ok(StructTypeMeta { fields })
    }

    /// Parse a single row field, either `name type`, `"quoted name" type`, or
    /// an anonymous `type`.
    fn parse_row_field(&mut self) -> Result<Field> {
        self.skip_whitespace();
        if self.peek() == Some('"') {
            let name = self.quoted_identifier()?;
            let datatype = self.parse_type()?;
            return Ok(Field::new(name, datatype));
        }

        let start = self.pos;
        let name = self
            .identifier()
            .ok_or_else(|| self.error("expected a field name or type"))?;

        self.skip_whitespace();
        if matches!(self.peek(), Some(',' | ')' | '(')) {
            // Just a type, e.g. `row(bigint, varchar(3))`.
            self.pos = start;
            let datatype = self.parse_type()?;
            return Ok(Field::new("", datatype));
        }

        match self.parse_type() {
            Ok(datatype) => Ok(Field::new(name, datatype)),
            Err(named_err) => {
                // Could be a multi word anonymous type like `timestamp with
                // time zone`.
                self.pos = start;
                let Ok(datatype) = self.parse_type() else {
                    return Err(named_err);
                };
                if matches!(self.peek_after_whitespace(), Some(',' | ')')) {
                    Ok(Field::new("", datatype))
                } else {
                    Err(named_err)
                }
            }
        }
    }

    fn peek_after_whitespace(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.peek()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> DataType {
        TypeParser::new().parse(s).unwrap()
    }

    #[test]
    fn primitives() {
        // (signature, expected)
        let test_cases = vec![
            ("boolean", DataType::Boolean),
            ("tinyint", DataType::Int8),
            ("smallint", DataType::Int16),
            ("integer", DataType::Int32),
            ("int", DataType::Int32),
            ("BIGINT", DataType::Int64),
            ("real", DataType::Float32),
            ("double", DataType::Float64),
            ("varchar", DataType::Utf8),
            ("varchar(255)", DataType::Utf8),
            ("char(3)", DataType::Utf8),
            ("varbinary", DataType::Binary),
            ("date", DataType::Date),
            ("timestamp", DataType::Timestamp),
            ("timestamp with time zone", DataType::TimestampTz),
            ("  Timestamp  With Time Zone ", DataType::TimestampTz),
            ("unknown", DataType::Unknown),
        ];

        for (signature, expected) in test_cases {
            assert_eq!(expected, parse(signature), "signature: {signature}");
        }
    }

    #[test]
    fn decimals() {
        assert_eq!(
            DataType::Decimal(DecimalTypeMeta::new(10, 2)),
            parse("decimal(10,2)")
        );
        assert_eq!(
            DataType::Decimal(DecimalTypeMeta::new(38, 10)),
            parse("decimal( 38 , 10 )")
        );
        assert_eq!(
            DataType::Decimal(DecimalTypeMeta::new(5, 0)),
            parse("decimal(5)")
        );
        assert_eq!(
            DataType::Decimal(DecimalTypeMeta::new(38, 0)),
            parse("decimal")
        );
    }

    #[test]
    fn invalid_decimals() {
        let parser = TypeParser::new();
        assert!(parser.parse("decimal(0,0)").is_err());
        assert!(parser.parse("decimal(39,2)").is_err());
        assert!(parser.parse("decimal(4,5)").is_err());
        assert!(parser.parse("decimal(a,b)").is_err());
    }

    #[test]
    fn nested() {
        assert_eq!(
            DataType::List(ListTypeMeta::new(DataType::Int32)),
            parse("array(integer)")
        );
        assert_eq!(
            DataType::Map(MapTypeMeta::new(
                DataType::Utf8,
                DataType::List(ListTypeMeta::new(DataType::Float64))
            )),
            parse("map(varchar, array(double))")
        );
    }

    #[test]
    fn rows() {
        let expected = DataType::Struct(StructTypeMeta {
            fields: vec![
                Field::new("Id", DataType::Int64),
                Field::new("full name", DataType::Utf8),
                Field::new(
                    "addr",
                    DataType::Struct(StructTypeMeta {
                        fields: vec![Field::new("zip", DataType::Utf8)],
                    }),
                ),
            ],
        });
        assert_eq!(
            expected,
            parse(r#"row(Id bigint, "full name" varchar(20), addr row(zip varchar))"#)
        );
    }

    #[test]
    fn anonymous_row_fields() {
        let expected = DataType::Struct(StructTypeMeta {
            fields: vec![
                Field::new("", DataType::Int64),
                Field::new("", DataType::Utf8),
                Field::new("", DataType::TimestampTz),
            ],
        });
        assert_eq!(
            expected,
            parse("row(bigint, varchar(3), timestamp with time zone)")
        );
    }

    #[test]
    fn quoted_name_with_escaped_quote() {
        let expected = DataType::Struct(StructTypeMeta {
            fields: vec![Field::new(r#"say "hi""#, DataType::Boolean)],
        });
        assert_eq!(expected, parse(r#"row("say ""hi""" boolean)"#));
    }

    #[test]
    fn errors_name_the_signature() {
        let parser = TypeParser::new();
        for signature in [
            "",
            "blob",
            "varchar(",
            "array(integer",
            "map(varchar)",
            "row()",
            "bigint bigint",
            r#"row("unterminated bigint)"#,
        ] {
            let err = parser.parse(signature).unwrap_err();
            match &err {
                ConnectorError::TypeParse { type_string, .. } => {
                    assert_eq!(signature, type_string)
                }
                other => panic!("unexpected error for '{signature}': {other}"),
            }
        }
    }
}
