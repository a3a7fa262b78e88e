use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};
use thiserror::Error;

use crate::error::SchemaTypeError;
use crate::lower::DEFAULT_VALUE_KEY;

/// Why a schema document could not be turned into a value tree.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    /// Malformed source text, with path context
    #[error("{0}")]
    Syntax(String),

    /// A default value the tree cannot represent (`.inf`, `.nan`)
    #[error("invalid default for parameter '{parameter}'")]
    Type {
        parameter: String,
        #[source]
        source: SchemaTypeError,
    },
}

/// Source syntax of a schema document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    /// `.json` selects JSON; everything else is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }
}

/// Deserialize with JSON-path context in error messages.
pub fn from_json_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, String> {
    let de = &mut serde_json::Deserializer::from_str(src);
    match serde_path_to_error::deserialize::<_, T>(de) {
        Ok(v) => Ok(v),
        Err(err) => {
            let path = err.path().to_string();
            Err(format!("at path {path} → {}", err.into_inner()))
        }
    }
}

/// Deserialize the first document of a YAML stream, with path context in
/// error messages. Later documents are ignored.
pub fn from_yaml_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, String> {
    let Some(de) = serde_yaml::Deserializer::from_str(src).next() else {
        return Err("document is empty".to_string());
    };
    match serde_path_to_error::deserialize::<_, T>(de) {
        Ok(v) => Ok(v),
        Err(err) => {
            let path = err.path().to_string();
            Err(format!("at path {path} → {}", err.into_inner()))
        }
    }
}

/// Parse a schema document into an order-preserving value tree.
pub fn parse_document(src: &str, format: DocumentFormat) -> Result<Value, DocumentError> {
    match format {
        DocumentFormat::Yaml => {
            let yaml = from_yaml_str_with_path::<serde_yaml::Value>(src).map_err(DocumentError::Syntax)?;
            yaml_to_json(yaml, &mut Vec::new())
        }
        DocumentFormat::Json => from_json_str_with_path(src).map_err(DocumentError::Syntax),
    }
}

// `keys` is the chain of mapping keys leading to `value`, root first.
fn yaml_to_json(value: serde_yaml::Value, keys: &mut Vec<String>) -> Result<Value, DocumentError> {
    use serde_yaml::Value as Yaml;

    Ok(match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => yaml_number(&n, keys)?,
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(|item| yaml_to_json(item, keys))
                .collect::<Result<_, _>>()?,
        ),
        Yaml::Mapping(entries) => {
            let mut map = Map::new();
            for (key, item) in entries {
                let key = yaml_key(key)?;
                keys.push(key.clone());
                let item = yaml_to_json(item, keys)?;
                keys.pop();
                map.insert(key, item);
            }
            Value::Object(map)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value, keys)?,
    })
}

fn yaml_number(n: &serde_yaml::Number, keys: &[String]) -> Result<Value, DocumentError> {
    if let Some(i) = n.as_i64() {
        return Ok(Value::Number(i.into()));
    }
    if let Some(u) = n.as_u64() {
        return Ok(Value::Number(u.into()));
    }
    let f = n.as_f64().unwrap_or(f64::NAN);
    if let Some(number) = Number::from_f64(f) {
        return Ok(Value::Number(number));
    }
    // Non-finite under a `default_value` belongs to that parameter; anywhere
    // else it is just an unusable scalar.
    match keys.iter().rposition(|key| key == DEFAULT_VALUE_KEY) {
        Some(k) if k >= 1 => Err(DocumentError::Type {
            parameter: keys[1..k].join("."),
            source: SchemaTypeError::NonFinite { value: f.to_string() },
        }),
        _ => Ok(Value::Null),
    }
}

fn yaml_key(key: serde_yaml::Value) -> Result<String, DocumentError> {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Null => Ok("null".to_string()),
        Yaml::Tagged(tagged) => yaml_key(tagged.value),
        Yaml::Sequence(_) | Yaml::Mapping(_) => {
            Err(DocumentError::Syntax("mapping keys must be scalars".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn yaml_keeps_insertion_order_and_kinds() {
        let src = "
controller:
  zeta:
    default_value: 1
  alpha:
    default_value: 1.0
  flag:
    default_value: true
";
        let doc = parse_document(src, DocumentFormat::Yaml).unwrap();
        let keys = doc["controller"].as_object().unwrap().keys().cloned().collect::<Vec<_>>();
        assert_eq!(keys, ["zeta", "alpha", "flag"]);
        assert!(doc["controller"]["zeta"]["default_value"].is_i64());
        assert!(doc["controller"]["alpha"]["default_value"].is_f64());
        assert!(doc["controller"]["flag"]["default_value"].is_boolean());
    }

    #[test]
    fn only_first_yaml_document_is_read() {
        let src = "a:\n  b:\n    default_value: 1\n---\nc: 2\n";
        let doc = parse_document(src, DocumentFormat::Yaml).unwrap();
        assert_eq!(doc, json!({"a": {"b": {"default_value": 1}}}));
    }

    #[test]
    fn json_errors_carry_position() {
        let err = parse_document("{\"a\": [1, }", DocumentFormat::Json).unwrap_err();
        assert!(matches!(err, DocumentError::Syntax(ref detail) if detail.starts_with("at path")), "{err}");
    }

    #[test]
    fn non_finite_defaults_name_their_parameter() {
        let cases = [
            ("c:\n  gain:\n    default_value: .inf\n", "gain", "inf"),
            ("c:\n  gain:\n    default_value: -.inf\n", "gain", "-inf"),
            ("c:\n  a:\n    b:\n      default_value: [0.5, .NaN]\n", "a.b", "NaN"),
        ];
        for (src, parameter, value) in cases {
            let err = parse_document(src, DocumentFormat::Yaml).unwrap_err();
            assert_eq!(
                err,
                DocumentError::Type {
                    parameter: parameter.to_string(),
                    source: SchemaTypeError::NonFinite { value: value.to_string() },
                }
            );
        }
    }

    #[test]
    fn non_finite_outside_defaults_is_null() {
        let src = "c:\n  gain:\n    default_value: 1.5\n    description: .inf\n";
        let doc = parse_document(src, DocumentFormat::Yaml).unwrap();
        assert_eq!(doc, json!({"c": {"gain": {"default_value": 1.5, "description": null}}}));
    }

    #[test]
    fn tags_and_scalar_keys_are_flattened() {
        let src = "c:\n  1: !custom 2\n  true: x\n";
        let doc = parse_document(src, DocumentFormat::Yaml).unwrap();
        assert_eq!(doc, json!({"c": {"1": 2, "true": "x"}}));
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(DocumentFormat::from_path(Path::new("x/params.json")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("x/params.JSON")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("x/params.yaml")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("params")), DocumentFormat::Yaml);
    }
}
