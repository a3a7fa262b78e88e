// Strongly-typed schema tree for codegen. No serde_json::Value here.

use std::fmt;

use indexmap::IndexMap;
use ordered_float::OrderedFloat;

/// The four value kinds a parameter can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    String,
    Double,
    Integer,
    Bool,
}

impl ScalarKind {
    pub fn name(self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Double => "double",
            ScalarKind::Integer => "integer",
            ScalarKind::Bool => "boolean",
        }
    }

    /// C++ element type used in the generated struct.
    pub fn cpp_type(self) -> &'static str {
        match self {
            ScalarKind::String => "std::string",
            ScalarKind::Double => "double",
            ScalarKind::Integer => "int",
            ScalarKind::Bool => "bool",
        }
    }

    /// `rclcpp::Parameter` accessor for a scalar of this kind.
    pub fn scalar_conversion(self) -> &'static str {
        match self {
            ScalarKind::String => "as_string()",
            ScalarKind::Double => "as_double()",
            ScalarKind::Integer => "as_int()",
            ScalarKind::Bool => "as_bool()",
        }
    }

    /// `rclcpp::Parameter` accessor for an array of this kind.
    pub fn array_conversion(self) -> &'static str {
        match self {
            ScalarKind::String => "as_string_array()",
            ScalarKind::Double => "as_double_array()",
            ScalarKind::Integer => "as_integer_array()",
            ScalarKind::Bool => "as_bool_array()",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Semantic type of a generated field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafType {
    Scalar(ScalarKind),
    Array(ScalarKind),
}

impl LeafType {
    pub fn cpp_type(self) -> String {
        match self {
            LeafType::Scalar(kind) => kind.cpp_type().to_string(),
            LeafType::Array(kind) => format!("std::vector<{}>", kind.cpp_type()),
        }
    }

    pub fn conversion(self) -> &'static str {
        match self {
            LeafType::Scalar(kind) => kind.scalar_conversion(),
            LeafType::Array(kind) => kind.array_conversion(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalarValue {
    String(String),
    Double(OrderedFloat<f64>),
    Integer(i32),
    Bool(bool),
}

impl ScalarValue {
    pub fn kind(&self) -> ScalarKind {
        match self {
            ScalarValue::String(_) => ScalarKind::String,
            ScalarValue::Double(_) => ScalarKind::Double,
            ScalarValue::Integer(_) => ScalarKind::Integer,
            ScalarValue::Bool(_) => ScalarKind::Bool,
        }
    }
}

/// A classified `default_value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultValue {
    Scalar(ScalarValue),
    Array {
        kind: ScalarKind,
        items: Vec<ScalarValue>, // non-empty, every item is `kind`
    },
}

impl DefaultValue {
    pub fn leaf_type(&self) -> LeafType {
        match self {
            DefaultValue::Scalar(value) => LeafType::Scalar(value.kind()),
            DefaultValue::Array { kind, .. } => LeafType::Array(*kind),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafDefinition {
    pub default_value: DefaultValue,
    pub description: Option<String>, // logged, never emitted
}

/// A group holds only sub-nodes; a leaf is one parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaNode {
    Group(IndexMap<String, SchemaNode>), // insertion order is emission order
    Leaf(LeafDefinition),
}

/// The root group of one schema document. The root is never wrapped in its
/// own struct and never appears in parameter names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub target: String,
    pub root: IndexMap<String, SchemaNode>,
}

impl Schema {
    /// Number of leaf parameters in the tree.
    pub fn leaf_count(&self) -> usize {
        fn count(node: &SchemaNode) -> usize {
            match node {
                SchemaNode::Leaf(_) => 1,
                SchemaNode::Group(children) => children.values().map(count).sum(),
            }
        }
        self.root.values().map(count).sum()
    }
}
