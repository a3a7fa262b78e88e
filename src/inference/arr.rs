use serde_json::Value;

use super::{kind_name, resolve_scalar};
use crate::error::SchemaTypeError;
use crate::ir::{ScalarKind, ScalarValue};

/// The first element fixes the element kind; every later element is checked
/// against it.
pub fn resolve_array(xs: &[Value]) -> Result<(ScalarKind, Vec<ScalarValue>), SchemaTypeError> {
    let first = xs.first().ok_or(SchemaTypeError::EmptyArray)?;
    let head = resolve_scalar(first)?;
    let kind = head.kind();

    let mut items = Vec::with_capacity(xs.len());
    items.push(head);
    for (index, el) in xs.iter().enumerate().skip(1) {
        let mismatch = || SchemaTypeError::ElementMismatch { index, expected: kind, found: kind_name(el) };
        let item = match resolve_scalar(el) {
            Ok(item) if item.kind() == kind => item,
            Ok(_) | Err(SchemaTypeError::Unsupported { .. }) => return Err(mismatch()),
            // right kind, bad value
            Err(other) => return Err(other),
        };
        items.push(item);
    }
    Ok((kind, items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resolve(v: Value) -> Result<(ScalarKind, Vec<ScalarValue>), SchemaTypeError> {
        resolve_array(v.as_array().unwrap())
    }

    #[test]
    fn homogeneous_arrays() {
        let (kind, items) = resolve(json!(["a", "b"])).unwrap();
        assert_eq!(kind, ScalarKind::String);
        assert_eq!(items.len(), 2);

        let (kind, _) = resolve(json!([0.5, 1.5, 2.0])).unwrap();
        assert_eq!(kind, ScalarKind::Double);
    }

    #[test]
    fn empty_array_is_rejected() {
        assert_eq!(resolve(json!([])), Err(SchemaTypeError::EmptyArray));
    }

    #[test]
    fn later_elements_must_match_the_first() {
        assert_eq!(
            resolve(json!([1, 2, "three"])),
            Err(SchemaTypeError::ElementMismatch { index: 2, expected: ScalarKind::Integer, found: "string" })
        );
        assert_eq!(
            resolve(json!([1, true])),
            Err(SchemaTypeError::ElementMismatch { index: 1, expected: ScalarKind::Integer, found: "boolean" })
        );
        assert_eq!(
            resolve(json!([1.5, 2])),
            Err(SchemaTypeError::ElementMismatch { index: 1, expected: ScalarKind::Double, found: "integer" })
        );
        assert_eq!(
            resolve(json!(["a", null])),
            Err(SchemaTypeError::ElementMismatch { index: 1, expected: ScalarKind::String, found: "null" })
        );
    }

    #[test]
    fn value_errors_in_later_elements_pass_through() {
        assert_eq!(
            resolve(json!([1, 18446744073709551615u64])),
            Err(SchemaTypeError::IntegerOutOfRange { value: "18446744073709551615".into() })
        );
        assert_eq!(
            resolve(json!([1, 2, 5000000000i64])),
            Err(SchemaTypeError::IntegerOutOfRange { value: "5000000000".into() })
        );
    }
}
