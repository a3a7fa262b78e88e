use ordered_float::OrderedFloat;
use serde_json::Number;

use crate::error::SchemaTypeError;
use crate::ir::ScalarValue;

/// Integers first. Fields are C++ `int`, so an integer outside `i32` is
/// rejected rather than narrowed or widened to `double`.
pub fn resolve_number(n: &Number) -> Result<ScalarValue, SchemaTypeError> {
    if n.is_i64() || n.is_u64() {
        return n
            .as_i64()
            .and_then(|i| i32::try_from(i).ok())
            .map(ScalarValue::Integer)
            .ok_or_else(|| SchemaTypeError::IntegerOutOfRange { value: n.to_string() });
    }
    match n.as_f64() {
        Some(f) => Ok(ScalarValue::Double(OrderedFloat(f))),
        None => Err(SchemaTypeError::Unsupported { found: "number" }),
    }
}

/// Shortest text that parses back to the same `f64`, always with a `.` or an
/// exponent so C++ reads it as a `double`.
pub fn render_double(f: f64) -> String {
    let text = format!("{f:?}");
    if text.contains(['.', 'e', 'E']) {
        text
    } else {
        format!("{text}.0")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_double_keeps_a_decimal_point() {
        assert_eq!(render_double(5.0), "5.0");
        assert_eq!(render_double(2.5), "2.5");
        assert_eq!(render_double(-0.125), "-0.125");
        assert_eq!(render_double(1e-7), "1e-7");
    }

    #[test]
    fn large_unsigned_is_out_of_range() {
        let n = Number::from(u64::MAX);
        assert_eq!(
            resolve_number(&n),
            Err(SchemaTypeError::IntegerOutOfRange { value: u64::MAX.to_string() })
        );
    }

    #[test]
    fn integers_must_fit_a_cpp_int() {
        assert_eq!(resolve_number(&Number::from(i32::MAX)), Ok(ScalarValue::Integer(i32::MAX)));
        assert_eq!(resolve_number(&Number::from(i32::MIN)), Ok(ScalarValue::Integer(i32::MIN)));
        assert_eq!(
            resolve_number(&Number::from(5_000_000_000i64)),
            Err(SchemaTypeError::IntegerOutOfRange { value: "5000000000".into() })
        );
        assert_eq!(
            resolve_number(&Number::from(-3_000_000_000i64)),
            Err(SchemaTypeError::IntegerOutOfRange { value: "-3000000000".into() })
        );
    }

    #[test]
    fn floats_and_integers_split() {
        assert_eq!(resolve_number(&Number::from(7)), Ok(ScalarValue::Integer(7)));
        let f = Number::from_f64(7.5).unwrap();
        assert_eq!(resolve_number(&f), Ok(ScalarValue::Double(OrderedFloat(7.5))));
    }
}
