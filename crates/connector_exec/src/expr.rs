//! Typed expressions and scan filters.

use std::fmt;

use connector_error::{ConnectorError, Result};
use serde_json::Value;

use crate::datatype::DataType;
use crate::type_parser::TypeParser;

/// A resolved expression, evaluated by the engine above the scan when it can't
/// be pushed into the reader.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedExpr {
    Constant {
        datatype: DataType,
        value: Value,
    },
    Column {
        datatype: DataType,
        name: String,
    },
    Call {
        datatype: DataType,
        function: String,
        inputs: Vec<TypedExpr>,
    },
}

impl TypedExpr {
    pub fn datatype(&self) -> &DataType {
        match self {
            Self::Constant { datatype, .. }
            | Self::Column { datatype, .. }
            | Self::Call { datatype, .. } => datatype,
        }
    }
}

impl fmt::Display for TypedExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant { value, .. } => write!(f, "{value}"),
            Self::Column { name, .. } => write!(f, "{name}"),
            Self::Call {
                function, inputs, ..
            } => {
                let inputs: Vec<_> = inputs.iter().map(|input| input.to_string()).collect();
                write!(f, "{function}({})", inputs.join(", "))
            }
        }
    }
}

/// A filter on a single (sub)field, evaluated by the reader.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    IsNull,
    IsNotNull,
    /// Inclusive integer range.
    BigintRange {
        lower: i64,
        upper: i64,
        null_allowed: bool,
    },
    BytesValues {
        values: Vec<String>,
        null_allowed: bool,
    },
}

/// Converts coordinator row expressions into typed expressions.
pub trait ExprConverter: fmt::Debug + Send + Sync {
    fn to_typed_expr(&self, expr: &Value) -> Result<TypedExpr>;
}

/// Converts the JSON form of coordinator row expressions.
///
/// Understands `variable`, `constant` and `call` expressions. Special forms and
/// lambdas are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExprConverter {
    type_parser: TypeParser,
}

impl JsonExprConverter {
    pub const fn new(type_parser: TypeParser) -> Self {
        JsonExprConverter { type_parser }
    }

    fn field<'a>(expr: &'a Value, name: &str) -> Result<&'a Value> {
        expr.get(name).ok_or_else(|| invalid_expr(expr, format!("missing field '{name}'")))
    }

    fn str_field<'a>(expr: &'a Value, name: &str) -> Result<&'a str> {
        Self::field(expr, name)?
            .as_str()
            .ok_or_else(|| invalid_expr(expr, format!("field '{name}' is not a string")))
    }

    fn parse_type(&self, expr: &Value, field: &str) -> Result<DataType> {
        self.type_parser.parse(Self::str_field(expr, field)?)
    }
}

fn invalid_expr(expr: &Value, reason: String) -> ConnectorError {
    ConnectorError::InvalidExpression {
        expr: expr.to_string(),
        reason,
    }
}

impl ExprConverter for JsonExprConverter {
    fn to_typed_expr(&self, expr: &Value) -> Result<TypedExpr> {
        match Self::str_field(expr, "@type")? {
            "variable" => Ok(TypedExpr::Column {
                datatype: self.parse_type(expr, "type")?,
                name: Self::str_field(expr, "name")?.to_string(),
            }),
            "constant" => Ok(TypedExpr::Constant {
                datatype: self.parse_type(expr, "type")?,
                value: Self::field(expr, "value")?.clone(),
            }),
            "call" => {
                let arguments = Self::field(expr, "arguments")?
                    .as_array()
                    .ok_or_else(|| invalid_expr(expr, "arguments is not an array".to_string()))?;
                let inputs = arguments
                    .iter()
                    .map(|arg| self.to_typed_expr(arg))
                    .collect::<Result<Vec<_>>>()?;

                Ok(TypedExpr::Call {
                    datatype: self.parse_type(expr, "returnType")?,
                    function: Self::str_field(expr, "displayName")?.to_string(),
                    inputs,
                })
            }
            other => Err(invalid_expr(expr, format!("unsupported expression type '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn convert_call() {
        let expr = json!({
            "@type": "call",
            "displayName": "greater_than",
            "returnType": "boolean",
            "arguments": [
                {"@type": "variable", "name": "c1", "type": "bigint"},
                {"@type": "constant", "type": "bigint", "value": 10},
            ],
        });

        let typed = JsonExprConverter::default().to_typed_expr(&expr).unwrap();
        assert_eq!(&DataType::Boolean, typed.datatype());
        assert_eq!("greater_than(c1, 10)", typed.to_string());
    }

    #[test]
    fn reject_special_forms() {
        let expr = json!({"@type": "special", "form": "AND", "arguments": []});
        let err = JsonExprConverter::default().to_typed_expr(&expr).unwrap_err();
        assert!(matches!(err, ConnectorError::InvalidExpression { .. }), "{err}");
    }

    #[test]
    fn bad_type_in_expression() {
        let expr = json!({"@type": "variable", "name": "c1", "type": "blob"});
        let err = JsonExprConverter::default().to_typed_expr(&expr).unwrap_err();
        assert!(matches!(err, ConnectorError::TypeParse { .. }), "{err}");
    }
}
