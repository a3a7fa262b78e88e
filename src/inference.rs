//! Default-value type resolution.
//!
//! A leaf's `default_value` decides the C++ type of its field. Resolution
//! happens once, at ingestion, and produces a [`DefaultValue`] that the
//! emitter later renders back into literal text.
//!
//! Classification order:
//! - booleans are decided before any numeric check, so `true` never
//!   becomes an integer
//! - integers before floats (`5` is `int`, `5.0` is `double`)
//! - arrays take their kind from the first element; every other element
//!   must match it
pub mod arr;
pub mod num;
pub mod str;

use serde_json::Value;

use crate::error::SchemaTypeError;
use crate::ir::{DefaultValue, ScalarValue};

// ------------------------------ Resolve ---------------------------------- //

pub fn resolve(value: &Value) -> Result<DefaultValue, SchemaTypeError> {
    match value {
        Value::Array(xs) => {
            let (kind, items) = arr::resolve_array(xs)?;
            Ok(DefaultValue::Array { kind, items })
        }
        other => resolve_scalar(other).map(DefaultValue::Scalar),
    }
}

pub fn resolve_scalar(value: &Value) -> Result<ScalarValue, SchemaTypeError> {
    match value {
        // keep first: bool must never reach the numeric arm
        Value::Bool(b) => Ok(ScalarValue::Bool(*b)),
        Value::Number(n) => num::resolve_number(n),
        Value::String(s) => Ok(ScalarValue::String(s.clone())),
        other => Err(SchemaTypeError::Unsupported { found: kind_name(other) }),
    }
}

/// Human name of a raw document value's kind, for diagnostics.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "double",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "mapping",
    }
}

// ------------------------------ Render ----------------------------------- //

pub fn render_scalar(value: &ScalarValue) -> String {
    match value {
        ScalarValue::String(s) => str::quote(s),
        ScalarValue::Double(f) => num::render_double(f.0),
        ScalarValue::Integer(i) => i.to_string(),
        ScalarValue::Bool(b) => if *b { "true".to_string() } else { "false".to_string() },
    }
}

/// Initializer text for a field: `5`, `"fast"`, or `{1, 2, 3}` for arrays.
pub fn render_default(value: &DefaultValue) -> String {
    match value {
        DefaultValue::Scalar(v) => render_scalar(v),
        DefaultValue::Array { items, .. } => {
            let parts = items.iter().map(render_scalar).collect::<Vec<_>>();
            format!("{{{}}}", parts.join(", "))
        }
    }
}
